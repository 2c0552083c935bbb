use serde::{Deserialize, Serialize};

pub const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/118.0.0.0 Safari/537.36";

fn default_base_url() -> String {
    "https://www.oxfordlearnersdictionaries.com".to_string()
}

fn default_definition_path() -> String {
    "/definition/english/".to_string()
}

fn default_search_path() -> String {
    "/search/english/".to_string()
}

fn default_user_agent() -> String {
    DESKTOP_USER_AGENT.to_string()
}

fn default_consent_cookie() -> Option<CookieConfig> {
    Some(CookieConfig {
        name: "cookieControl".to_string(),
        value: "false".to_string(),
    })
}

fn default_navigation_timeout_ms() -> u64 {
    15_000
}

fn default_search_settle_ms() -> u64 {
    2_000
}

fn default_result_navigation_timeout_ms() -> u64 {
    10_000
}

/// Cookie set on every dictionary page to suppress consent interstitials.
/// Scoped to the host of `base_url`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CookieConfig {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DictionaryConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_definition_path")]
    pub definition_path: String,
    #[serde(default = "default_search_path")]
    pub search_path: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_consent_cookie")]
    pub consent_cookie: Option<CookieConfig>,
    /// Direct navigation to the definition page
    #[serde(default = "default_navigation_timeout_ms")]
    pub navigation_timeout_ms: u64,
    /// Pause after loading search results, for dynamic content
    #[serde(default = "default_search_settle_ms")]
    pub search_settle_ms: u64,
    /// Navigation after activating the first search result
    #[serde(default = "default_result_navigation_timeout_ms")]
    pub result_navigation_timeout_ms: u64,
    /// Bound on cached entries. `None` keeps every successful lookup.
    #[serde(default)]
    pub cache_capacity: Option<usize>,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            definition_path: default_definition_path(),
            search_path: default_search_path(),
            user_agent: default_user_agent(),
            consent_cookie: default_consent_cookie(),
            navigation_timeout_ms: default_navigation_timeout_ms(),
            search_settle_ms: default_search_settle_ms(),
            result_navigation_timeout_ms: default_result_navigation_timeout_ms(),
            cache_capacity: None,
        }
    }
}
