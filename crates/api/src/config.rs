use std::env;

use review_portal_core::store::{AirtableStoreConfig, DEFAULT_API_URL};

pub const DEFAULT_POSTS_TABLE: &str = "tblLmGVahsBF7uJlY";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} is not valid: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server host to bind to.
    pub host: String,
    /// Server port to bind to.
    pub port: u16,
    /// Log level used when `RUST_LOG` is not set.
    pub log_level: String,
    pub store: AirtableStoreConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the config from any variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &'static str| var(name).ok_or(ConfigError::Missing(name));

        let port: u16 = match var("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: raw,
            })?,
            None => 3000,
        };

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            store: AirtableStoreConfig {
                api_url: var("AIRTABLE_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
                base_id: required("AIRTABLE_BASE_ID")?,
                table: var("AIRTABLE_POSTS_TABLE")
                    .unwrap_or_else(|| DEFAULT_POSTS_TABLE.to_string()),
                api_key: required("AIRTABLE_API_KEY")?,
            },
        })
    }

    /// Build the socket address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
