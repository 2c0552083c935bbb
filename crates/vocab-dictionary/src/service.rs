use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use vocab_config::Config;
use vocab_config::dictionary::DictionaryConfig;
use vocab_config::translator::TranslatorConfig;
use vocab_core::browser::bounded;
use vocab_core::{
    Browser, BrowserError, BrowserLauncher, LookupError, PageCookie, PageOptions, ScopedPage,
    WordCache,
};
use vocab_translator::{
    LanguageCode, ProviderMetadata, TranslateError, Translation, Translator, extract_translation,
    translation_url,
};
use vocab_types::{TranslationResult, WordEntry};

use crate::markup::MarkupProfile;
use crate::parser::EntryParser;
use crate::urls::DictionaryUrls;

/// Dictionary lookups and translations over one shared browser session.
///
/// The session starts lazily on first use and lives until [`close`]. Every
/// lookup opens and releases its own page.
///
/// [`close`]: DictionaryService::close
pub struct DictionaryService {
    dictionary: DictionaryConfig,
    translator: TranslatorConfig,
    launcher: Arc<dyn BrowserLauncher>,
    session: Mutex<Option<Arc<dyn Browser>>>,
    cache: WordCache,
    markup: MarkupProfile,
    parser: EntryParser,
    urls: DictionaryUrls,
}

impl DictionaryService {
    pub fn new(config: &Config, launcher: Arc<dyn BrowserLauncher>) -> Result<Self, LookupError> {
        Self::with_markup(config, launcher, MarkupProfile::default())
    }

    pub fn with_markup(
        config: &Config,
        launcher: Arc<dyn BrowserLauncher>,
        markup: MarkupProfile,
    ) -> Result<Self, LookupError> {
        Ok(Self {
            dictionary: config.dictionary.clone(),
            translator: config.translator.clone(),
            launcher,
            session: Mutex::new(None),
            cache: WordCache::with_capacity(config.dictionary.cache_capacity),
            parser: EntryParser::new(&markup)?,
            urls: DictionaryUrls::new(&config.dictionary)?,
            markup,
        })
    }

    /// Start the shared session if it is not running yet
    pub async fn initialize(&self) -> Result<(), LookupError> {
        self.session().await.map(|_| ())
    }

    pub async fn is_initialized(&self) -> bool {
        self.session.lock().await.is_some()
    }

    pub fn cached(&self, word: &str) -> Option<WordEntry> {
        self.cache.get(word)
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Look up `word`. Never fails: errors come back as an entry with `error` set.
    pub async fn lookup_word(&self, word: &str) -> WordEntry {
        match self.try_lookup_word(word).await {
            Ok(entry) => entry,
            Err(LookupError::NotFound) => {
                tracing::info!("Word '{word}' not found in dictionary");
                WordEntry::not_found(word)
            }
            Err(e) => {
                tracing::error!("Error looking up word '{word}': {e}");
                WordEntry::failed(word, format!("Failed to look up word: {e}"))
            }
        }
    }

    /// Like [`lookup_word`](Self::lookup_word) but surfaces the failure kind
    pub async fn try_lookup_word(&self, word: &str) -> Result<WordEntry, LookupError> {
        if let Some(entry) = self.cache.get(word) {
            tracing::debug!("Using cached definition for '{word}'");
            return Ok(entry);
        }

        let browser = self.session().await?;
        let html = self.fetch_entry_page(browser.as_ref(), word).await?;
        let entry = self.parser.parse(&html, word)?;

        if !self.cache.insert(word, entry.clone()) {
            tracing::info!("No definitions found for '{word}', not caching");
        }

        Ok(entry)
    }

    /// Translate with the configured default languages filling in missing ones.
    /// Never fails: errors come back in `TranslationResult::error`.
    pub async fn translate_text(
        &self,
        text: &str,
        from: Option<&str>,
        to: Option<&str>,
    ) -> TranslationResult {
        let from = from.unwrap_or(&self.translator.from_lang).to_string();
        let to = to.unwrap_or(&self.translator.to_lang).to_string();

        match self.translate(text, from, to).await {
            Ok(translation) => TranslationResult::new(text, translation.text),
            Err(TranslateError::Empty) => TranslationResult::not_found(text),
            Err(e) => {
                tracing::error!("Error translating text: {e}");
                TranslationResult::failed(text, e.to_string())
            }
        }
    }

    /// Close the shared session. Safe to call repeatedly; a later lookup starts
    /// a fresh session.
    pub async fn close(&self) {
        let browser = self.session.lock().await.take();

        if let Some(browser) = browser {
            tracing::info!("Closing browser session");
            if let Err(e) = browser.close().await {
                tracing::error!("Error closing browser: {e}");
            }
        }
    }

    async fn session(&self) -> Result<Arc<dyn Browser>, LookupError> {
        // held across launch so concurrent first calls start one session
        let mut session = self.session.lock().await;

        if let Some(browser) = session.as_ref() {
            return Ok(Arc::clone(browser));
        }

        tracing::info!("Starting {} browser session", self.launcher.name());
        let browser = self
            .launcher
            .launch()
            .await
            .map_err(LookupError::Initialization)?;

        *session = Some(Arc::clone(&browser));
        Ok(browser)
    }

    async fn fetch_entry_page(
        &self,
        browser: &dyn Browser,
        word: &str,
    ) -> Result<String, LookupError> {
        let page = ScopedPage::new(browser.new_page(&self.dictionary_page_options()).await?);
        let html = self.load_entry(&page, word).await;
        page.release().await;
        html
    }

    /// Direct definition page first, site search when it has no entry
    async fn load_entry(&self, page: &ScopedPage, word: &str) -> Result<String, LookupError> {
        let url = self.urls.definition(word)?;
        tracing::info!("Looking up word '{word}' at {url}");

        if let Err(e) = bounded(
            millis(self.dictionary.navigation_timeout_ms),
            page.goto(url.as_str()),
        )
        .await
        {
            tracing::warn!("Navigation error for '{word}': {e}");
        }

        match page.has_element(&self.markup.entry).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::info!("No direct entry found for '{word}', trying search");
                if let Err(e) = self.search(page, word).await {
                    tracing::warn!("Search failed for '{word}': {e}");
                }
            }
            Err(e) => tracing::warn!("Error evaluating page for '{word}': {e}"),
        }

        Ok(page.content().await?)
    }

    async fn search(&self, page: &ScopedPage, word: &str) -> Result<(), BrowserError> {
        let url = self.urls.search(word);

        bounded(
            millis(self.dictionary.navigation_timeout_ms),
            page.goto(url.as_str()),
        )
        .await?;

        tokio::time::sleep(millis(self.dictionary.search_settle_ms)).await;

        let Some(link) = page.first_link(&self.markup.search_result_link).await? else {
            tracing::debug!("No search results to follow for '{word}'");
            return Ok(());
        };

        if let Err(e) = bounded(
            millis(self.dictionary.result_navigation_timeout_ms),
            page.goto(&link),
        )
        .await
        {
            tracing::info!("Navigation timeout after following result for '{word}': {e}");
        }

        Ok(())
    }

    fn dictionary_page_options(&self) -> PageOptions {
        let cookie = self
            .dictionary
            .consent_cookie
            .as_ref()
            .zip(self.urls.cookie_domain())
            .map(|(cookie, domain)| PageCookie {
                name: cookie.name.clone(),
                value: cookie.value.clone(),
                domain,
            });

        PageOptions {
            user_agent: self.dictionary.user_agent.clone(),
            cookie,
            block_heavy_resources: true,
        }
    }

    async fn load_translation(
        &self,
        page: &ScopedPage,
        url: &str,
    ) -> Result<String, BrowserError> {
        bounded(millis(self.translator.navigation_timeout_ms), page.goto(url)).await?;

        if let Err(e) = bounded(
            millis(self.translator.output_timeout_ms),
            page.wait_for_selector(&self.translator.output_selector),
        )
        .await
        {
            tracing::debug!("Translation output did not appear: {e}");
        }

        tokio::time::sleep(millis(self.translator.settle_ms)).await;

        page.content().await
    }
}

#[async_trait]
impl Translator for DictionaryService {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        let browser = self.session().await.map_err(browser_failure)?;
        let url = translation_url(&self.translator.base_url, text, &from, &to)?;

        let options = PageOptions {
            user_agent: self.translator.user_agent.clone(),
            cookie: None,
            block_heavy_resources: false,
        };
        let page = ScopedPage::new(browser.new_page(&options).await.map_err(browser_failure)?);
        let html = self.load_translation(&page, url.as_str()).await;
        page.release().await;

        let html = html.map_err(browser_failure)?;
        let translated = extract_translation(&html, &self.translator.output_selector)?;
        if translated.is_empty() {
            return Err(TranslateError::Empty);
        }

        Ok(Translation {
            text: translated,
            from,
            to,
            provider: self.metadata().name,
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "google-translate".to_string(),
        }
    }
}

fn browser_failure(e: impl std::fmt::Display) -> TranslateError {
    TranslateError::Browser(e.to_string())
}

fn millis(ms: u64) -> Duration {
    Duration::from_millis(ms)
}
