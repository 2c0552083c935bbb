use std::sync::Arc;

use vocab_config::browser::{Backend, BrowserConfig};
use vocab_core::BrowserLauncher;

pub mod chromium;
mod html;
pub mod http;

pub use chromium::ChromiumLauncher;
pub use http::HttpLauncher;

/// Launcher for the configured backend
pub fn launcher_for(config: &BrowserConfig) -> Arc<dyn BrowserLauncher> {
    match config.backend {
        Backend::Chromium => Arc::new(ChromiumLauncher::new(config.clone())),
        Backend::Http => Arc::new(HttpLauncher::new(config.clone())),
    }
}
