use serde::{Deserialize, Serialize};

pub const LEGACY_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/89.0.4389.82 Safari/537.36";

fn default_base_url() -> String {
    "https://translate.google.com/".to_string()
}

fn default_from_lang() -> String {
    "en".to_string()
}

fn default_to_lang() -> String {
    "vi".to_string()
}

fn default_user_agent() -> String {
    LEGACY_USER_AGENT.to_string()
}

fn default_navigation_timeout_ms() -> u64 {
    30_000
}

fn default_output_selector() -> String {
    ".ryNqvb".to_string()
}

fn default_output_timeout_ms() -> u64 {
    5_000
}

fn default_settle_ms() -> u64 {
    1_000
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TranslatorConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_from_lang")]
    pub from_lang: String,
    #[serde(default = "default_to_lang")]
    pub to_lang: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_navigation_timeout_ms")]
    pub navigation_timeout_ms: u64,
    /// Marker holding the translated text
    #[serde(default = "default_output_selector")]
    pub output_selector: String,
    #[serde(default = "default_output_timeout_ms")]
    pub output_timeout_ms: u64,
    /// Extra delay after the output marker shows up
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            from_lang: default_from_lang(),
            to_lang: default_to_lang(),
            user_agent: default_user_agent(),
            navigation_timeout_ms: default_navigation_timeout_ms(),
            output_selector: default_output_selector(),
            output_timeout_ms: default_output_timeout_ms(),
            settle_ms: default_settle_ms(),
        }
    }
}
