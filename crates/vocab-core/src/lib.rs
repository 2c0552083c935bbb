pub mod browser;
pub mod cache;
pub mod error;
pub mod preprocess;

pub use browser::{Browser, BrowserLauncher, BrowserPage, PageCookie, PageOptions, ScopedPage};
pub use cache::WordCache;
pub use error::{BrowserError, LookupError};

#[cfg(test)]
mod tests;
