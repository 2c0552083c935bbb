use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use scraper::{Html, Selector};
use url::Url;
use vocab_config::Config;
use vocab_core::{Browser, BrowserError, BrowserLauncher, BrowserPage, PageOptions};

pub const DICT: &str = "https://dict.test";
pub const TRANSLATE: &str = "https://translate.test/";

#[derive(Clone)]
pub enum Route {
    Page(&'static str),
    Fail,
    Hang,
}

/// Counters shared by a launcher and everything it creates
#[derive(Default)]
pub struct Stats {
    pub launches: AtomicUsize,
    pub browser_closes: AtomicUsize,
    pub opened: AtomicUsize,
    pub closed: AtomicUsize,
    pub visits: Mutex<Vec<String>>,
    pub options: Mutex<Vec<PageOptions>>,
}

impl Stats {
    pub fn launches(&self) -> usize {
        self.launches.load(Ordering::SeqCst)
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn visits(&self) -> Vec<String> {
        self.visits.lock().unwrap().clone()
    }
}

/// In-memory web served to fake pages; unknown urls get a 404 page
pub struct FakeLauncher {
    routes: Arc<HashMap<String, Route>>,
    pub stats: Arc<Stats>,
    fail_launch: bool,
    launch_delay: Duration,
}

impl FakeLauncher {
    pub fn new(routes: &[(&str, Route)]) -> Self {
        Self {
            routes: Arc::new(
                routes
                    .iter()
                    .map(|(url, route)| (url.to_string(), route.clone()))
                    .collect(),
            ),
            stats: Arc::new(Stats::default()),
            fail_launch: false,
            launch_delay: Duration::ZERO,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_launch: true,
            ..Self::new(&[])
        }
    }

    pub fn with_launch_delay(mut self, delay: Duration) -> Self {
        self.launch_delay = delay;
        self
    }
}

#[async_trait]
impl BrowserLauncher for FakeLauncher {
    async fn launch(&self) -> Result<Arc<dyn Browser>, BrowserError> {
        tokio::time::sleep(self.launch_delay).await;

        if self.fail_launch {
            return Err(BrowserError::Launch("no chrome here".to_string()));
        }

        self.stats.launches.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(FakeBrowser {
            routes: Arc::clone(&self.routes),
            stats: Arc::clone(&self.stats),
        }))
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

struct FakeBrowser {
    routes: Arc<HashMap<String, Route>>,
    stats: Arc<Stats>,
}

#[async_trait]
impl Browser for FakeBrowser {
    async fn new_page(&self, options: &PageOptions) -> Result<Arc<dyn BrowserPage>, BrowserError> {
        self.stats.opened.fetch_add(1, Ordering::SeqCst);
        self.stats.options.lock().unwrap().push(options.clone());

        Ok(Arc::new(FakePage {
            routes: Arc::clone(&self.routes),
            stats: Arc::clone(&self.stats),
            current: Mutex::new(("about:blank".to_string(), String::new())),
        }))
    }

    async fn close(&self) -> Result<(), BrowserError> {
        self.stats.browser_closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct FakePage {
    routes: Arc<HashMap<String, Route>>,
    stats: Arc<Stats>,
    current: Mutex<(String, String)>,
}

impl FakePage {
    fn html(&self) -> String {
        self.current.lock().unwrap().1.clone()
    }

    fn matches(&self, selector: &str) -> bool {
        let selector = Selector::parse(selector).unwrap();
        Html::parse_document(&self.html())
            .select(&selector)
            .next()
            .is_some()
    }

    fn first_href(&self, selector: &str) -> Option<String> {
        let selector = Selector::parse(selector).unwrap();
        let (base, html) = self.current.lock().unwrap().clone();
        let document = Html::parse_document(&html);
        let href = document
            .select(&selector)
            .find_map(|el| el.value().attr("href"))?
            .to_string();

        Url::parse(&base)
            .and_then(|base| base.join(&href))
            .ok()
            .map(String::from)
    }
}

#[async_trait]
impl BrowserPage for FakePage {
    async fn goto(&self, url: &str) -> Result<(), BrowserError> {
        self.stats.visits.lock().unwrap().push(url.to_string());

        let route = self.routes.get(url).cloned();
        let html = match route {
            Some(Route::Page(html)) => html,
            Some(Route::Fail) => {
                return Err(BrowserError::Navigation {
                    url: url.to_string(),
                    reason: "net::ERR_NAME_NOT_RESOLVED".to_string(),
                });
            }
            Some(Route::Hang) => std::future::pending().await,
            None => super::fixtures::NOT_FOUND_PAGE,
        };

        *self.current.lock().unwrap() = (url.to_string(), html.to_string());
        Ok(())
    }

    async fn has_element(&self, selector: &str) -> Result<bool, BrowserError> {
        Ok(self.matches(selector))
    }

    async fn first_link(&self, selector: &str) -> Result<Option<String>, BrowserError> {
        Ok(self.first_href(selector))
    }

    async fn wait_for_selector(&self, selector: &str) -> Result<(), BrowserError> {
        if self.matches(selector) {
            Ok(())
        } else {
            std::future::pending().await
        }
    }

    async fn content(&self) -> Result<String, BrowserError> {
        Ok(self.html())
    }

    async fn close(&self) -> Result<(), BrowserError> {
        self.stats.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Config pointing at the fake hosts with short timeouts
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.dictionary.base_url = DICT.to_string();
    config.dictionary.navigation_timeout_ms = 50;
    config.dictionary.search_settle_ms = 0;
    config.dictionary.result_navigation_timeout_ms = 50;
    config.translator.base_url = TRANSLATE.to_string();
    config.translator.navigation_timeout_ms = 50;
    config.translator.output_timeout_ms = 20;
    config.translator.settle_ms = 0;
    config
}

pub fn definition_url(slug: &str) -> String {
    format!("{DICT}/definition/english/{slug}")
}

pub fn search_url(query: &str) -> String {
    format!("{DICT}/search/english/?q={query}")
}

pub fn translate_url(text: &str, from: &str, to: &str) -> String {
    vocab_translator::translation_url(TRANSLATE, text, from, to)
        .unwrap()
        .to_string()
}
