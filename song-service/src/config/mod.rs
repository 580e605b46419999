use secrecy::{ExposeSecret, Secret};
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct SongConfig {
    pub common: core_config::Config,
    pub otlp_endpoint: Option<String>,
    pub mongodb: MongoConfig,
    pub seed: SeedConfig,
}

#[derive(Debug, Clone)]
pub struct MongoConfig {
    /// `host` or `host:port`.
    pub service: String,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<Secret<String>>,
    pub database: String,
}

#[derive(Debug, Clone)]
pub struct SeedConfig {
    /// JSON file with the startup songs; the bundled catalog when `None`.
    pub data_path: Option<PathBuf>,
    /// Drop and repopulate the collection at boot.
    pub on_startup: bool,
}

impl SongConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common = core_config::Config::load()?;
        Self::from_lookup(common, |key| env::var(key).ok())
    }

    /// Builds the service settings from `lookup`, which resolves a variable
    /// name to its value.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let service = lookup("MONGODB_SERVICE")
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| {
                AppError::ConfigError(anyhow::anyhow!(
                    "Missing MongoDB server in the MONGODB_SERVICE variable"
                ))
            })?;

        let port = lookup("MONGODB_PORT")
            .map(|raw| {
                raw.parse::<u16>().map_err(|e| {
                    AppError::ConfigError(anyhow::anyhow!("Invalid MONGODB_PORT '{}': {}", raw, e))
                })
            })
            .transpose()?;

        let on_startup = match lookup("SEED_ON_STARTUP") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                AppError::ConfigError(anyhow::anyhow!("Invalid SEED_ON_STARTUP '{}'", raw))
            })?,
            None => true,
        };

        Ok(SongConfig {
            common,
            otlp_endpoint: lookup("OTLP_ENDPOINT").filter(|value| !value.is_empty()),
            mongodb: MongoConfig {
                service,
                port,
                username: lookup("MONGODB_USERNAME").filter(|value| !value.is_empty()),
                password: lookup("MONGODB_PASSWORD")
                    .filter(|value| !value.is_empty())
                    .map(Secret::new),
                database: lookup("MONGODB_DATABASE").unwrap_or_else(|| "songs".to_string()),
            },
            seed: SeedConfig {
                data_path: lookup("SONGS_DATA_PATH").map(PathBuf::from),
                on_startup,
            },
        })
    }
}

impl MongoConfig {
    fn host(&self) -> String {
        match self.port {
            Some(port) if !self.service.contains(':') => format!("{}:{}", self.service, port),
            _ => self.service.clone(),
        }
    }

    /// Full connection string. Credentials are used only when both halves are
    /// set, and are percent-encoded so `@`, `:` or `/` survive URI parsing.
    pub fn connection_uri(&self) -> Secret<String> {
        let uri = match (&self.username, &self.password) {
            (Some(user), Some(password)) => format!(
                "mongodb://{}:{}@{}",
                urlencoding::encode(user),
                urlencoding::encode(password.expose_secret()),
                self.host()
            ),
            _ => format!("mongodb://{}", self.host()),
        };
        Secret::new(uri)
    }

    /// Connection string safe for logs.
    pub fn redacted_uri(&self) -> String {
        match (&self.username, &self.password) {
            (Some(user), Some(_)) => format!(
                "mongodb://{}:****@{}",
                urlencoding::encode(user),
                self.host()
            ),
            _ => format!("mongodb://{}", self.host()),
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
