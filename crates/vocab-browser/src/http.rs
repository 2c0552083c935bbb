use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{COOKIE, USER_AGENT};
use url::Url;
use vocab_config::browser::BrowserConfig;
use vocab_core::{Browser, BrowserError, BrowserLauncher, BrowserPage, PageCookie, PageOptions};

use crate::html;

/// Plain HTTP session for hosts without Chrome.
///
/// Pages are fetched, never scripted: element queries run over the fetched
/// document and a click follows the link's `href`. Only documents are
/// downloaded, so heavy resources are never loaded.
pub struct HttpLauncher {
    config: BrowserConfig,
}

impl HttpLauncher {
    pub fn new(config: BrowserConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl BrowserLauncher for HttpLauncher {
    async fn launch(&self) -> Result<Arc<dyn Browser>, BrowserError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(self.config.request_timeout_ms))
            .build()
            .map_err(|e| BrowserError::Launch(e.to_string()))?;

        Ok(Arc::new(HttpBrowser { client }))
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

struct HttpBrowser {
    client: reqwest::Client,
}

#[async_trait]
impl Browser for HttpBrowser {
    async fn new_page(&self, options: &PageOptions) -> Result<Arc<dyn BrowserPage>, BrowserError> {
        Ok(Arc::new(HttpPage {
            client: self.client.clone(),
            user_agent: options.user_agent.clone(),
            cookie: options.cookie.clone(),
            document: Mutex::new(Document::default()),
        }))
    }

    async fn close(&self) -> Result<(), BrowserError> {
        Ok(())
    }
}

#[derive(Default)]
struct Document {
    url: Option<Url>,
    html: String,
}

struct HttpPage {
    client: reqwest::Client,
    user_agent: String,
    cookie: Option<PageCookie>,
    document: Mutex<Document>,
}

impl HttpPage {
    fn document(&self) -> MutexGuard<'_, Document> {
        self.document.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn html(&self) -> String {
        self.document().html.clone()
    }

    fn cookie_for(&self, url: &Url) -> Option<String> {
        self.cookie
            .as_ref()
            .filter(|cookie| cookie_matches(&cookie.domain, url))
            .map(|cookie| format!("{}={}", cookie.name, cookie.value))
    }
}

#[async_trait]
impl BrowserPage for HttpPage {
    async fn goto(&self, url: &str) -> Result<(), BrowserError> {
        let navigation_error = |reason: String| BrowserError::Navigation {
            url: url.to_string(),
            reason,
        };

        let target = Url::parse(url).map_err(|e| navigation_error(e.to_string()))?;
        let mut request = self
            .client
            .get(target.clone())
            .header(USER_AGENT, &self.user_agent);

        if let Some(cookie) = self.cookie_for(&target) {
            request = request.header(COOKIE, cookie);
        }

        let response = request
            .send()
            .await
            .map_err(|e| navigation_error(e.to_string()))?;

        let status = response.status();
        let final_url = response.url().clone();
        let body = response
            .text()
            .await
            .map_err(|e| navigation_error(e.to_string()))?;

        // error pages are kept, like a browser would show them
        if !status.is_success() {
            tracing::debug!("{url} answered {status}");
        }

        *self.document() = Document {
            url: Some(final_url),
            html: body,
        };

        Ok(())
    }

    async fn has_element(&self, selector: &str) -> Result<bool, BrowserError> {
        html::contains(&self.html(), selector)
    }

    async fn first_link(&self, selector: &str) -> Result<Option<String>, BrowserError> {
        let document = self.document();
        let link = html::first_link(&document.html, selector, document.url.as_ref())?;
        Ok(link.map(String::from))
    }

    async fn wait_for_selector(&self, selector: &str) -> Result<(), BrowserError> {
        if html::contains(&self.html(), selector)? {
            Ok(())
        } else {
            Err(BrowserError::Page(format!(
                "{selector} is not in the fetched document"
            )))
        }
    }

    async fn content(&self) -> Result<String, BrowserError> {
        Ok(self.html())
    }

    async fn close(&self) -> Result<(), BrowserError> {
        *self.document() = Document::default();
        Ok(())
    }
}

/// Domain match as browsers do it: exact host or a subdomain of it
fn cookie_matches(domain: &str, url: &Url) -> bool {
    let domain = domain.trim_start_matches('.');

    url.host_str().is_some_and(|host| {
        host == domain
            || host
                .strip_suffix(domain)
                .is_some_and(|rest| rest.ends_with('.'))
    })
}
