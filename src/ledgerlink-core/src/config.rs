use serde::{Deserialize, Serialize};

use crate::chunking::CHUNK_SIZE;
use crate::error::{ClientError, Result};

pub const HOST_ENV: &str = "LEDGERLINK_HOST";
pub const PORT_ENV: &str = "LEDGERLINK_PORT";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,

    /// Upper bound on each piece of a streamed request body
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Optional request timeout in seconds. None leaves it to the caller.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    8800 // validator HTTP port
}

fn default_chunk_size() -> usize {
    CHUNK_SIZE
}

fn default_user_agent() -> String {
    format!("ledgerlink/{}", env!("CARGO_PKG_VERSION"))
}

impl ClientConfig {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: ClientConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `LEDGERLINK_HOST` / `LEDGERLINK_PORT` when set
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(host) = std::env::var(HOST_ENV) {
            self.host = host;
        }
        if let Ok(port) = std::env::var(PORT_ENV) {
            self.port = port.parse().map_err(|_| {
                ClientError::precondition(format!("{} is not a valid port: {}", PORT_ENV, port))
            })?;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(ClientError::precondition("'host' must be provided."));
        }
        if self.port == 0 {
            return Err(ClientError::precondition("'port' must be provided."));
        }
        if self.chunk_size == 0 {
            return Err(ClientError::precondition("chunk size must be greater than zero"));
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            chunk_size: default_chunk_size(),
            user_agent: default_user_agent(),
            timeout_secs: None,
        }
    }
}
