use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const NOT_FOUND_MESSAGE: &str = "Word not found in dictionary";
pub const TRANSLATION_NOT_FOUND: &str = "Translation not found";
pub const TRANSLATION_FAILED: &str = "Error: Could not translate text";

#[derive(Debug, Clone)]
pub enum AppEvent {
    Lookup {
        id: Uuid,
        word: String,
    },
    Translate {
        id: Uuid,
        text: String,
        from_lang: Option<String>,
        to_lang: Option<String>,
    },
    CacheStatus,
    ClearCache,
    ShowEntry(WordEntry),
    ShowTranslation(TranslationResult),
    ShowCacheSize(usize),
    Quit,
}

/// Result of a dictionary lookup.
///
/// Either a populated entry or an error-carrying one, never both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    pub word: String,
    #[serde(default)]
    pub part_of_speech: String,
    #[serde(default)]
    pub phonetic_spelling: String,
    #[serde(default)]
    pub definitions: Vec<String>,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(default)]
    pub idioms: Vec<Idiom>,
    #[serde(default)]
    pub pronunciations: Vec<Pronunciation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WordEntry {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            ..Default::default()
        }
    }

    /// Entry for a lookup that completed without locating a valid entry
    pub fn not_found(word: impl Into<String>) -> Self {
        Self::failed(word, NOT_FOUND_MESSAGE)
    }

    pub fn failed(word: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            error: Some(message.into()),
            ..Default::default()
        }
    }

    /// Only successful entries are worth caching
    pub fn is_success(&self) -> bool {
        self.error.is_none() && !self.definitions.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Idiom {
    pub name: String,
    pub definitions: Vec<String>,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    BrE,
    NAmE,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pronunciation {
    pub prefix: Region,
    pub ipa: Option<String>,
    pub audio: Option<String>,
}

impl Pronunciation {
    /// Builds a record only when at least one of ipa/audio is present
    pub fn new(prefix: Region, ipa: Option<String>, audio: Option<String>) -> Option<Self> {
        if ipa.is_none() && audio.is_none() {
            return None;
        }

        Some(Self { prefix, ipa, audio })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub original: String,
    pub translation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TranslationResult {
    pub fn new(original: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            translation: translation.into(),
            error: None,
        }
    }

    pub fn not_found(original: impl Into<String>) -> Self {
        Self::new(original, TRANSLATION_NOT_FOUND)
    }

    pub fn failed(original: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            translation: TRANSLATION_FAILED.to_string(),
            error: Some(error.into()),
        }
    }
}
