use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::Page;
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpBrowserConfig};
use chromiumoxide::cdp::browser_protocol::fetch::{
    ContinueRequestParams, EnableParams, EventRequestPaused, FailRequestParams, RequestPattern,
    RequestStage,
};
use chromiumoxide::cdp::browser_protocol::network::{
    CookieParam, ErrorReason, ResourceType, SetUserAgentOverrideParams,
};
use chromiumoxide::cdp::js_protocol::runtime::{ConsoleApiCalledType, EventConsoleApiCalled};
use futures_util::StreamExt;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use vocab_config::browser::BrowserConfig;
use vocab_core::{Browser, BrowserError, BrowserLauncher, BrowserPage, PageOptions};

const SELECTOR_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Headless Chromium over the DevTools protocol
pub struct ChromiumLauncher {
    config: BrowserConfig,
}

impl ChromiumLauncher {
    pub fn new(config: BrowserConfig) -> Self {
        Self { config }
    }

    fn cdp_config(&self) -> Result<CdpBrowserConfig, BrowserError> {
        let mut builder = CdpBrowserConfig::builder()
            .request_timeout(Duration::from_millis(self.config.request_timeout_ms));

        if !self.config.headless {
            builder = builder.with_head();
        }

        if !self.config.sandbox {
            // also passes --disable-setuid-sandbox
            builder = builder.no_sandbox();
        }

        if let Some(path) = &self.config.executable {
            builder = builder.chrome_executable(path);
        }

        builder.build().map_err(BrowserError::Config)
    }
}

#[async_trait]
impl BrowserLauncher for ChromiumLauncher {
    async fn launch(&self) -> Result<Arc<dyn Browser>, BrowserError> {
        let (browser, mut handler) = CdpBrowser::launch(self.cdp_config()?)
            .await
            .map_err(|e| BrowserError::Launch(e.to_string()))?;

        // the handler must be polled for the connection to make progress
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("CDP handler error: {e}");
                }
            }
            tracing::debug!("CDP handler finished");
        });

        tracing::info!("Chromium session started");

        Ok(Arc::new(ChromiumBrowser {
            browser: Mutex::new(browser),
            handler_task: StdMutex::new(Some(handler_task)),
        }))
    }

    fn name(&self) -> &'static str {
        "chromium"
    }
}

struct ChromiumBrowser {
    browser: Mutex<CdpBrowser>,
    handler_task: StdMutex<Option<JoinHandle<()>>>,
}

#[async_trait]
impl Browser for ChromiumBrowser {
    async fn new_page(&self, options: &PageOptions) -> Result<Arc<dyn BrowserPage>, BrowserError> {
        let page = self
            .browser
            .lock()
            .await
            .new_page("about:blank")
            .await
            .map_err(page_error)?;

        let page = ChromiumPage::new(page);
        if let Err(e) = page.configure(options).await {
            let _ = page.close().await;
            return Err(e);
        }

        Ok(Arc::new(page))
    }

    async fn close(&self) -> Result<(), BrowserError> {
        let mut browser = self.browser.lock().await;
        let closed = browser.close().await.map(|_| ()).map_err(page_error);

        if let Err(e) = browser.wait().await {
            tracing::debug!("Waiting for chromium to exit failed: {e}");
        }

        if let Some(task) = self
            .handler_task
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
        {
            task.abort();
        }

        closed
    }
}

struct ChromiumPage {
    page: Page,
    listeners: StdMutex<Vec<JoinHandle<()>>>,
}

impl ChromiumPage {
    fn new(page: Page) -> Self {
        Self {
            page,
            listeners: StdMutex::new(Vec::new()),
        }
    }

    async fn configure(&self, options: &PageOptions) -> Result<(), BrowserError> {
        self.page
            .set_user_agent(SetUserAgentOverrideParams::new(options.user_agent.clone()))
            .await
            .map_err(page_error)?;

        if let Some(cookie) = &options.cookie {
            let param = CookieParam::builder()
                .name(cookie.name.clone())
                .value(cookie.value.clone())
                .domain(cookie.domain.clone())
                .url(format!("https://{}/", cookie.domain))
                .path("/")
                .build()
                .map_err(BrowserError::Config)?;

            self.page.set_cookie(param).await.map_err(page_error)?;
        }

        self.log_console_errors().await?;

        if options.block_heavy_resources {
            self.block_heavy_resources().await?;
        }

        Ok(())
    }

    async fn log_console_errors(&self) -> Result<(), BrowserError> {
        let mut events = self
            .page
            .event_listener::<EventConsoleApiCalled>()
            .await
            .map_err(page_error)?;

        self.track(tokio::spawn(async move {
            while let Some(event) = events.next().await {
                if event.r#type != ConsoleApiCalledType::Error {
                    continue;
                }

                let text: Vec<String> = event
                    .args
                    .iter()
                    .filter_map(|arg| arg.value.as_ref())
                    .map(|value| value.to_string())
                    .collect();
                tracing::debug!("Page error: {}", text.join(" "));
            }
        }));

        Ok(())
    }

    /// Fail image, media, font and stylesheet requests. Documents and scripts pass.
    async fn block_heavy_resources(&self) -> Result<(), BrowserError> {
        let mut paused = self
            .page
            .event_listener::<EventRequestPaused>()
            .await
            .map_err(page_error)?;

        let page = self.page.clone();
        self.track(tokio::spawn(async move {
            while let Some(event) = paused.next().await {
                let heavy = matches!(
                    event.resource_type,
                    ResourceType::Image
                        | ResourceType::Media
                        | ResourceType::Font
                        | ResourceType::Stylesheet
                );

                let outcome = if heavy {
                    page.execute(FailRequestParams::new(
                        event.request_id.clone(),
                        ErrorReason::BlockedByClient,
                    ))
                    .await
                    .map(|_| ())
                } else {
                    page.execute(ContinueRequestParams::new(event.request_id.clone()))
                        .await
                        .map(|_| ())
                };

                if let Err(e) = outcome {
                    tracing::debug!("Request interception failed: {e}");
                }
            }
        }));

        self.page
            .execute(
                EnableParams::builder()
                    .pattern(
                        RequestPattern::builder()
                            .url_pattern("*")
                            .request_stage(RequestStage::Request)
                            .build(),
                    )
                    .build(),
            )
            .await
            .map_err(page_error)?;

        Ok(())
    }

    fn track(&self, task: JoinHandle<()>) {
        self.listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(task);
    }

    async fn evaluate_bool(&self, script: String) -> Result<bool, BrowserError> {
        self.page
            .evaluate(script)
            .await
            .map_err(page_error)?
            .into_value::<bool>()
            .map_err(page_error)
    }
}

#[async_trait]
impl BrowserPage for ChromiumPage {
    async fn goto(&self, url: &str) -> Result<(), BrowserError> {
        self.page
            .goto(url)
            .await
            .map(|_| ())
            .map_err(|e| BrowserError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            })
    }

    async fn has_element(&self, selector: &str) -> Result<bool, BrowserError> {
        self.evaluate_bool(format!(
            "document.querySelector({}) !== null",
            js_string(selector)?
        ))
        .await
    }

    async fn first_link(&self, selector: &str) -> Result<Option<String>, BrowserError> {
        // `el.href` is already resolved against the document url
        let script = format!(
            "Array.from(document.querySelectorAll({})).map(el => el.href).find(href => typeof href === 'string' && href.length > 0) ?? ''",
            js_string(selector)?
        );

        let href = self
            .page
            .evaluate(script)
            .await
            .map_err(page_error)?
            .into_value::<String>()
            .map_err(page_error)?;

        Ok(Some(href).filter(|href| !href.is_empty()))
    }

    async fn wait_for_selector(&self, selector: &str) -> Result<(), BrowserError> {
        loop {
            if self.has_element(selector).await? {
                return Ok(());
            }
            tokio::time::sleep(SELECTOR_POLL_INTERVAL).await;
        }
    }

    async fn content(&self) -> Result<String, BrowserError> {
        self.page.content().await.map_err(page_error)
    }

    async fn close(&self) -> Result<(), BrowserError> {
        for task in self
            .listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .drain(..)
        {
            task.abort();
        }

        self.page.clone().close().await.map_err(page_error)
    }
}

fn page_error(e: impl std::fmt::Display) -> BrowserError {
    BrowserError::Page(e.to_string())
}

fn js_string(value: &str) -> Result<String, BrowserError> {
    serde_json::to_string(value).map_err(page_error)
}
