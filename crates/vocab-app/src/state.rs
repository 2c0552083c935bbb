use std::sync::Arc;

use anyhow::Context;
use vocab_config::Config;
use vocab_core::BrowserLauncher;
use vocab_dictionary::DictionaryService;

pub struct AppState {
    pub dictionary: DictionaryService,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let launcher = vocab_browser::launcher_for(&config.browser);
        tracing::debug!("Using {} browser backend", config.browser.backend);
        Self::with_launcher(config, launcher)
    }

    pub fn with_launcher(config: Config, launcher: Arc<dyn BrowserLauncher>) -> anyhow::Result<Self> {
        let dictionary = DictionaryService::new(&config, launcher)
            .context("Failed to set up dictionary service")?;

        Ok(Self { dictionary })
    }
}
