use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    #[error("Failed to launch browser: {0}")]
    Launch(String),

    #[error("Navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("Page error: {0}")]
    Page(String),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("Invalid browser configuration: {0}")]
    Config(String),
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// Lookup completed but no valid entry was located
    #[error("Word not found in dictionary")]
    NotFound,

    #[error("Browser session could not start: {0}")]
    Initialization(#[source] BrowserError),

    #[error(transparent)]
    Fetch(#[from] BrowserError),

    #[error("Invalid selector {selector:?}: {reason}")]
    Selector { selector: String, reason: String },

    #[error("Invalid url {url:?}: {reason}")]
    Url { url: String, reason: String },
}
