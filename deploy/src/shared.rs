use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use crate::deployer::DeployError;

pub const DEFAULT_CONFIG_PATH: &str = "deploy.toml";

/// Static deployment configuration, loaded once at process start.
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    /// Compiler version the artifacts were built with.
    pub solidity: String,
    pub networks: BTreeMap<String, NetworkConfig>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NetworkConfig {
    pub url: String,
    /// Private keys funding this network, deployer first.
    pub accounts: Vec<String>,
}

pub fn config(path: &Path) -> Result<Config, DeployError> {
    dotenvy::dotenv().ok();
    let raw = std::fs::read_to_string(path).map_err(|err| {
        DeployError::Configuration(
            anyhow::Error::new(err).context(format!("reading config file {}", path.display())),
        )
    })?;
    let config = toml::from_str(&raw).map_err(|err| {
        DeployError::Configuration(
            anyhow::Error::new(err).context(format!("parsing config file {}", path.display())),
        )
    })?;
    Ok(config)
}

impl Config {
    pub fn network(&self, name: &str) -> Result<&NetworkConfig, DeployError> {
        self.networks.get(name).ok_or_else(|| {
            DeployError::Configuration(anyhow::anyhow!("network {name} is not configured"))
        })
    }
}

/// Log setup shared between the binaries. Diagnostics go to stderr so the
/// deployment output lines on stdout stay clean.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}
