use crate::domain_model::DirectoryQueries;
use anyhow::{Result, anyhow};
use config::{Config, File, FileFormat};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub cache: Cache,
    pub directory: Directory,
    pub http: Http,
    pub identity: Identity,
    pub log: Log,
}

#[derive(Debug, Deserialize)]
pub struct Cache {
    pub backend: String, // "memory" or "redis"
    pub ttl_secs: Option<u64>,
    pub redis_url: Option<String>,
    #[serde(default = "default_cache_prefix")]
    pub prefix: String,
}

#[derive(Deserialize)]
pub struct Directory {
    pub url: String,
    pub bind_dn: Option<String>,
    pub bind_password: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub starttls: bool,
    pub queries: DirectoryQueries,
}

// keeps the bind password out of logs
impl std::fmt::Debug for Directory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Directory")
            .field("url", &self.url)
            .field("bind_dn", &self.bind_dn)
            .field("bind_password", &self.bind_password.as_ref().map(|_| "***"))
            .field("timeout_secs", &self.timeout_secs)
            .field("starttls", &self.starttls)
            .field("queries", &self.queries)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
pub struct Http {
    pub address: String,
    pub cert_path: Option<String>,
    pub key_path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Identity {
    pub backend: String, // "fake" or "real"
}

#[derive(Debug, Deserialize)]
pub struct Log {
    pub filter: String,
}

fn default_cache_prefix() -> String {
    "certinfo".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

#[cfg(debug_assertions)]
const SETTINGS_PATH: &str = "settings/dev.toml";
#[cfg(not(debug_assertions))]
const SETTINGS_PATH: &str = "settings/release.toml";

pub fn parse_settings(path: Option<&str>) -> Result<Settings> {
    let path = path.unwrap_or(SETTINGS_PATH);

    let settings: Settings = Config::builder()
        .add_source(File::with_name(path))
        .build()
        .map_err(|e| anyhow!(e))?
        .try_deserialize()
        .map_err(|e| anyhow!(e))?;

    Ok(settings)
}

pub fn parse_settings_str(toml: &str) -> Result<Settings> {
    let settings: Settings = Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()
        .map_err(|e| anyhow!(e))?
        .try_deserialize()
        .map_err(|e| anyhow!(e))?;

    Ok(settings)
}
