use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use self::browser::{Backend, BrowserConfig};
use self::dictionary::DictionaryConfig;
use self::translator::TranslatorConfig;

pub mod browser;
pub mod dictionary;
pub mod translator;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dictionary: DictionaryConfig,
    pub translator: TranslatorConfig,
    pub browser: BrowserConfig,
}

impl Config {
    /// Defaults with environment overrides applied
    pub fn new() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    pub fn apply_env(&mut self) {
        if let Ok(url) = env::var("VOCAB_DICTIONARY_URL") {
            self.dictionary.base_url = url;
        }

        if let Ok(url) = env::var("VOCAB_TRANSLATE_URL") {
            self.translator.base_url = url;
        }

        if let Ok(lang) = env::var("VOCAB_FROM_LANG") {
            self.translator.from_lang = lang;
        }

        if let Ok(lang) = env::var("VOCAB_TO_LANG") {
            self.translator.to_lang = lang;
        }

        if let Ok(backend) = env::var("VOCAB_BROWSER_BACKEND") {
            match Backend::from_str(&backend) {
                Ok(backend) => self.browser.backend = backend,
                Err(e) => tracing::warn!("Ignoring VOCAB_BROWSER_BACKEND: {e}"),
            }
        }

        if let Ok(path) = env::var("VOCAB_CHROME_PATH") {
            self.browser.executable = Some(path);
        }

        if let Some(capacity) = env::var("VOCAB_CACHE_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.dictionary.cache_capacity = Some(capacity);
        }

        if let Some(timeout) = env::var("VOCAB_NAV_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.dictionary.navigation_timeout_ms = timeout;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config: Config = serde_json::from_str(
            r#"{ "dictionary": { "cache_capacity": 64 }, "browser": { "backend": "http" } }"#,
        )
        .unwrap();

        assert_eq!(config.dictionary.cache_capacity, Some(64));
        assert_eq!(config.dictionary.navigation_timeout_ms, 15_000);
        assert_eq!(config.dictionary.definition_path, "/definition/english/");
        assert_eq!(config.browser.backend, Backend::Http);
        assert!(config.browser.headless);
        assert!(!config.browser.sandbox);
        assert_eq!(config.translator.from_lang, "en");
        assert_eq!(config.translator.to_lang, "vi");
    }

    #[test]
    fn backend_parses_loosely() {
        assert_eq!(Backend::from_str(" Chrome ").unwrap(), Backend::Chromium);
        assert_eq!(Backend::from_str("HTTP").unwrap(), Backend::Http);
        assert!(Backend::from_str("gecko").is_err());
    }
}
