use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    /// Query form used by the dictionary site
    fn normalize(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // NFKC folds full-width and compatibility forms
        text.nfkc().collect::<String>().to_lowercase()
    }

    /// Path segment of a definition page: internal whitespace runs become hyphens
    fn slug(&self, text: &str) -> String {
        self.normalize(text)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}
