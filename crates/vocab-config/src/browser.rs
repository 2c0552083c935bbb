use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

fn default_headless() -> bool {
    true
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Headless Chromium driven over CDP
    #[default]
    Chromium,
    /// Plain HTTP fetches, no script execution
    Http,
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chromium" | "chrome" => Ok(Backend::Chromium),
            "http" => Ok(Backend::Http),
            other => Err(format!("unknown browser backend: {other}")),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Chromium => write!(f, "chromium"),
            Backend::Http => write!(f, "http"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct BrowserConfig {
    pub backend: Backend,
    #[serde(default = "default_headless")]
    pub headless: bool,
    /// Most hosts running this lack sandbox support
    #[serde(default)]
    pub sandbox: bool,
    /// Chrome binary; autodetected when unset
    #[serde(default)]
    pub executable: Option<String>,
    /// Default timeout for individual page operations
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            headless: default_headless(),
            sandbox: false,
            executable: None,
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}
