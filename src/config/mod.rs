//! Service configuration.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;

/// Configuration for the caredesk service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address the HTTP server binds to
    pub bind_addr: SocketAddr,
    /// Backing file for the patient store
    pub data_path: PathBuf,
    /// Premium classifier artifact loaded at startup
    pub model_path: PathBuf,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            data_path: PathBuf::from("patients.json"),
            model_path: PathBuf::from("model.json"),
        }
    }
}

impl ServiceConfig {
    /// Build a config from the environment, falling back to defaults.
    ///
    /// Recognized variables: `CAREDESK_ADDR`, `CAREDESK_DATA`,
    /// `CAREDESK_MODEL`.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();
        if let Ok(addr) = env::var("CAREDESK_ADDR") {
            config.bind_addr = addr
                .parse()
                .with_context(|| format!("invalid CAREDESK_ADDR: {addr}"))?;
        }
        if let Ok(path) = env::var("CAREDESK_DATA") {
            config.data_path = PathBuf::from(path);
        }
        if let Ok(path) = env::var("CAREDESK_MODEL") {
            config.model_path = PathBuf::from(path);
        }
        Ok(config)
    }
}
