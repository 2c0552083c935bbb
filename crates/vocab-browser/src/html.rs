use scraper::{Html, Selector};
use url::Url;
use vocab_core::BrowserError;

fn selector(raw: &str) -> Result<Selector, BrowserError> {
    Selector::parse(raw).map_err(|e| BrowserError::Page(format!("invalid selector {raw:?}: {e}")))
}

pub fn contains(html: &str, raw: &str) -> Result<bool, BrowserError> {
    let selector = selector(raw)?;
    Ok(Html::parse_document(html).select(&selector).next().is_some())
}

/// `href` of the first match, resolved against `base`
pub fn first_link(html: &str, raw: &str, base: Option<&Url>) -> Result<Option<Url>, BrowserError> {
    let selector = selector(raw)?;
    let document = Html::parse_document(html);

    let Some(href) = document
        .select(&selector)
        .find_map(|el| el.value().attr("href"))
    else {
        return Ok(None);
    };

    let resolved = match base {
        Some(base) => base.join(href),
        None => Url::parse(href),
    };

    resolved
        .map(Some)
        .map_err(|e| BrowserError::Page(format!("bad link {href:?}: {e}")))
}
