use std::fs;
use std::path::Path;

use anyhow::Context;
use vocab_config::Config;

/// Config file if given, defaults otherwise. Environment overrides win either way.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::new());
    };

    tracing::info!("Loading config from {}", path.display());
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let mut config: Config = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;

    config.apply_env();
    Ok(config)
}
