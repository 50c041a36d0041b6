//! Resolves identifiers through the configured backend and cache.
//!
//! $ cargo run --bin resolve_demo -- --settings=settings/dev.toml alice ghost ghost
//!
//! Repeating an identifier shows the cache at work: the second lookup of a
//! failed user reports `CachedFailure` instead of the original reason.
use sslify::application_port::ResolveError;
use sslify::logger::*;
use sslify::server::Server;
use sslify::settings::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = ResolveCli::parse();

    let logger = Logger::new_bootstrap();
    let project_settings = parse_settings(cli.settings.as_deref())?;
    logger.reload_from_config(&LogConfig::from(&project_settings.log))?;

    let server = Server::try_new(&project_settings).await?;

    for user in &cli.users {
        match server.identity_service.resolve(user).await {
            Ok(record) => println!("{}: {}", user, serde_json::to_string_pretty(&record)?),
            Err(ResolveError::Transport(e)) => println!("{}: directory error: {}", user, e),
            Err(e) => println!("{}: {:?} ({})", user, e, e),
        }
    }

    Ok(())
}
