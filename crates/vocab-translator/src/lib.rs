use scraper::{Html, Selector};

pub type LanguageCode = String;

/// Translation provider interface
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate text from source to target language
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct Translation {
    pub text: String,
    pub from: LanguageCode,
    pub to: LanguageCode,
    pub provider: String,
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Invalid translation url: {0}")]
    InvalidUrl(String),

    #[error("Invalid output selector {0:?}")]
    InvalidSelector(String),

    /// The output marker was missing or empty
    #[error("Translation not found")]
    Empty,
}

/// Translation page url: `?sl=<from>&tl=<to>&text=<text>&op=translate`
pub fn translation_url(
    base_url: &str,
    text: &str,
    from: &str,
    to: &str,
) -> Result<url::Url, TranslateError> {
    let mut url =
        url::Url::parse(base_url).map_err(|e| TranslateError::InvalidUrl(e.to_string()))?;

    url.query_pairs_mut()
        .clear()
        .append_pair("sl", from)
        .append_pair("tl", to)
        .append_pair("text", text)
        .append_pair("op", "translate");

    Ok(url)
}

/// Trimmed text of every element matching `selector`, concatenated in
/// document order. Long inputs are split across several output spans.
pub fn extract_translation(html: &str, selector: &str) -> Result<String, TranslateError> {
    let selector = Selector::parse(selector)
        .map_err(|_| TranslateError::InvalidSelector(selector.to_string()))?;

    let document = Html::parse_document(html);
    let text: String = document
        .select(&selector)
        .flat_map(|el| el.text())
        .collect();

    Ok(text.trim().to_string())
}
