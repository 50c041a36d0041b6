use super::Parser;

#[derive(Parser, Debug)]
#[command(about = "Certificate identity lookup service")]
pub struct Cli {
    /// Path of the TOML settings file
    #[arg(long)]
    pub settings: Option<String>,
}

#[derive(Parser, Debug)]
#[command(about = "Resolve identifiers against the configured directory")]
pub struct ResolveCli {
    #[arg(long)]
    pub settings: Option<String>,
    /// Identifiers to resolve, in order
    #[arg(required = true)]
    pub users: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_cli_takes_several_users() {
        let cli =
            ResolveCli::parse_from(["resolve_demo", "--settings", "a.toml", "alice", "alice"]);
        assert_eq!(cli.settings.as_deref(), Some("a.toml"));
        assert_eq!(cli.users, vec!["alice", "alice"]);
    }

    #[test]
    fn resolve_cli_requires_a_user() {
        assert!(ResolveCli::try_parse_from(["resolve_demo"]).is_err());
    }
}
