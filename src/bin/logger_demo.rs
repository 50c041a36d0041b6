use sslify::logger::*;

fn main() -> anyhow::Result<()> {
    let logger = Logger::new_bootstrap();
    trace!("bootstrap trace log");
    debug!("bootstrap debug log");
    info!(user = "alice", "bootstrap info log");

    let config = LogConfig {
        filter: "sslify=debug".to_string(),
    };
    logger.reload_from_config(&config)?;
    trace!("application trace log");
    debug!(user = "alice", "cached hit");
    info!("application info log");

    Ok(())
}
