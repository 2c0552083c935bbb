use std::future::Future;
use std::ops::Deref;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::BrowserError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCookie {
    pub name: String,
    pub value: String,
    pub domain: String,
}

/// Per-page setup applied right after the page is opened
#[derive(Debug, Clone, Default)]
pub struct PageOptions {
    pub user_agent: String,
    pub cookie: Option<PageCookie>,
    /// Only documents and scripts are fetched when set
    pub block_heavy_resources: bool,
}

/// Starts a browser session
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    async fn launch(&self) -> Result<Arc<dyn Browser>, BrowserError>;

    /// Backend name for logs
    fn name(&self) -> &'static str;
}

/// Long-lived session shared by every lookup
#[async_trait]
pub trait Browser: Send + Sync {
    /// Open an isolated page configured with `options`
    async fn new_page(&self, options: &PageOptions) -> Result<Arc<dyn BrowserPage>, BrowserError>;

    async fn close(&self) -> Result<(), BrowserError>;
}

/// Short-lived tab. Wrap in [`ScopedPage`] so it is always closed.
#[async_trait]
pub trait BrowserPage: Send + Sync {
    async fn goto(&self, url: &str) -> Result<(), BrowserError>;

    async fn has_element(&self, selector: &str) -> Result<bool, BrowserError>;

    /// Absolute `href` of the first element matching `selector` that has one.
    /// The caller navigates to it, so the wait covers the whole load.
    async fn first_link(&self, selector: &str) -> Result<Option<String>, BrowserError>;

    /// Resolves once `selector` matches. Unbounded; callers apply the timeout.
    async fn wait_for_selector(&self, selector: &str) -> Result<(), BrowserError>;

    /// Full rendered document
    async fn content(&self) -> Result<String, BrowserError>;

    async fn close(&self) -> Result<(), BrowserError>;
}

/// Owns a page and closes it on every exit path.
///
/// The normal path calls [`ScopedPage::release`]. If the guard is dropped
/// unreleased (early return, cancelled future, panic) the close is scheduled
/// on the current runtime instead.
pub struct ScopedPage {
    page: Arc<dyn BrowserPage>,
    released: bool,
}

impl ScopedPage {
    pub fn new(page: Arc<dyn BrowserPage>) -> Self {
        Self {
            page,
            released: false,
        }
    }

    pub async fn release(mut self) {
        if let Err(e) = self.page.close().await {
            tracing::warn!("Failed to close page: {e}");
        }
        self.released = true;
    }
}

impl Deref for ScopedPage {
    type Target = dyn BrowserPage;

    fn deref(&self) -> &Self::Target {
        self.page.as_ref()
    }
}

impl Drop for ScopedPage {
    fn drop(&mut self) {
        if self.released {
            return;
        }

        let page = Arc::clone(&self.page);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                tracing::debug!("Page dropped without release, closing in background");
                handle.spawn(async move {
                    if let Err(e) = page.close().await {
                        tracing::warn!("Failed to close dropped page: {e}");
                    }
                });
            }
            Err(_) => tracing::error!("Page dropped outside a runtime, it could not be closed"),
        }
    }
}

/// Run a page operation with a deadline
pub async fn bounded<T, F>(limit: Duration, operation: F) -> Result<T, BrowserError>
where
    F: Future<Output = Result<T, BrowserError>>,
{
    tokio::time::timeout(limit, operation)
        .await
        .map_err(|_| BrowserError::Timeout(limit))?
}
