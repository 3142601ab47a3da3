use std::path::Path;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to render default config: {0}")]
    Render(#[from] toml::ser::Error),

    #[error("created default config at {path}; fill it in and restart")]
    Created { path: String },
}

/// Load a TOML settings file, creating it with defaults when absent.
///
/// A freshly created file is reported as `ConfigError::Created` so the
/// process exits and the operator edits the file before the next start.
pub fn load_or_init<T>(path: &Path) -> Result<T, ConfigError>
where
    T: DeserializeOwned + Serialize + Default,
{
    match std::fs::read_to_string(path) {
        Ok(raw) => Ok(toml::from_str(&raw)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            let rendered = toml::to_string_pretty(&T::default())?;
            std::fs::write(path, rendered)?;
            Err(ConfigError::Created {
                path: path.display().to_string(),
            })
        }
        Err(e) => Err(ConfigError::Io(e)),
    }
}

/// Settings for the inventory query service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// How long a fetched payload is served from cache, in minutes.
    /// Fractional values are allowed; converted to whole seconds internally.
    #[serde(default = "default_data_ttl_minutes")]
    pub data_ttl_minutes: f64,
    /// Redis connection URL for the TTL store.
    #[serde(default = "default_redis_url")]
    pub redis_url: String,
    /// Address the query endpoint listens on.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

impl ServerConfig {
    pub fn ttl_seconds(&self) -> u64 {
        (self.data_ttl_minutes * 60.0) as u64
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_ttl_minutes: default_data_ttl_minutes(),
            redis_url: default_redis_url(),
            bind_addr: default_bind_addr(),
            upstream: UpstreamConfig::default(),
        }
    }
}

/// Settings for the upstream pricing provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpstreamConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Provider-name filter passed to the priced-item listing.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Fixed game-catalog id scoping all price lookups.
    #[serde(default = "default_app_id")]
    pub app_id: u32,
    /// Timeout for each upstream call, in seconds.
    #[serde(default = "default_upstream_timeout")]
    pub timeout_seconds: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            provider: default_provider(),
            app_id: default_app_id(),
            timeout_seconds: default_upstream_timeout(),
        }
    }
}

/// Settings for the chat front-end.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrontendConfig {
    /// Credential handed to the chat transport. Must be set before start.
    #[serde(default)]
    pub transport_token: String,
    /// Base URL of the inventory query service.
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// Timeout for query and profile-lookup calls, in seconds.
    #[serde(default = "default_frontend_timeout")]
    pub timeout_seconds: u64,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            transport_token: String::new(),
            server_url: default_server_url(),
            timeout_seconds: default_frontend_timeout(),
        }
    }
}

fn default_data_ttl_minutes() -> f64 {
    20.0
}
fn default_redis_url() -> String {
    "redis://redis:6379/0".to_string()
}
fn default_bind_addr() -> String {
    "0.0.0.0:8000".to_string()
}
fn default_base_url() -> String {
    "https://api.pricempire.com".to_string()
}
fn default_provider() -> String {
    "buff".to_string()
}
fn default_app_id() -> u32 {
    730
}
fn default_upstream_timeout() -> u64 {
    120
}
fn default_server_url() -> String {
    "http://server:8000".to_string()
}
fn default_frontend_timeout() -> u64 {
    120
}
