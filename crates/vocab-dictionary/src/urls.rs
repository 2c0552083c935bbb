use url::Url;
use vocab_config::dictionary::DictionaryConfig;
use vocab_core::LookupError;
use vocab_core::preprocess::{DefaultPreprocessor, Preprocessor};

/// Builds definition and search urls for a query word
#[derive(Debug, Clone)]
pub struct DictionaryUrls {
    definition_base: Url,
    search_base: Url,
}

impl DictionaryUrls {
    pub fn new(config: &DictionaryConfig) -> Result<Self, LookupError> {
        let base = parse(&config.base_url)?;

        Ok(Self {
            definition_base: join(&base, &config.definition_path)?,
            search_base: join(&base, &config.search_path)?,
        })
    }

    /// `<definition_path>/<slug>`, e.g. `take off` -> `/definition/english/take-off`
    pub fn definition(&self, word: &str) -> Result<Url, LookupError> {
        let slug = DefaultPreprocessor.slug(word);
        let mut url = self.definition_base.clone();

        url.path_segments_mut()
            .map_err(|_| LookupError::Url {
                url: self.definition_base.to_string(),
                reason: "cannot be a base".to_string(),
            })?
            .pop_if_empty()
            .push(&slug);

        Ok(url)
    }

    pub fn search(&self, word: &str) -> Url {
        let mut url = self.search_base.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair("q", &DefaultPreprocessor.normalize(word));
        url
    }

    /// Host the consent cookie is scoped to
    pub fn cookie_domain(&self) -> Option<String> {
        self.definition_base.host_str().map(str::to_string)
    }
}

fn parse(raw: &str) -> Result<Url, LookupError> {
    Url::parse(raw).map_err(|e| LookupError::Url {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}

fn join(base: &Url, path: &str) -> Result<Url, LookupError> {
    base.join(path).map_err(|e| LookupError::Url {
        url: format!("{base}{path}"),
        reason: e.to_string(),
    })
}
