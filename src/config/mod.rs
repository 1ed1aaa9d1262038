mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, path::Path};
use tracing::debug;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Loads the configuration and resolves the API key from the environment.
///
/// An explicit `CONFIG_PATH` must point at a readable file. Without it,
/// `config.yaml` is used when present and built-in defaults otherwise.
pub async fn load() -> Result<Config> {
    let config = match env::var("CONFIG_PATH") {
        Ok(path) => load_from(&path).await?,
        Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => load_from(DEFAULT_CONFIG_PATH).await?,
        Err(_) => {
            debug!("No {} found, using built-in defaults", DEFAULT_CONFIG_PATH);
            Config::default()
        }
    };

    with_api_key(config, env::var(API_KEY_ENV).ok())
}

pub async fn load_from(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    debug!("Loading configuration from: {}", path.display());

    let config_str = tokio::fs::read_to_string(path).await?;
    let config: Config = serde_yaml::from_str(&config_str)?;

    Ok(config)
}

/// Applies the secret from the hosting environment. The environment value
/// wins over the file; a blank result is rejected.
pub fn with_api_key(mut config: Config, env_key: Option<String>) -> Result<Config> {
    if let Some(key) = env_key.filter(|k| !k.trim().is_empty()) {
        config.llm.api_key = key;
    }

    if config.llm.api_key.trim().is_empty() {
        return Err(Error::config(format!(
            "API key is missing: set {} or llm.api_key",
            API_KEY_ENV
        )));
    }

    Ok(config)
}
