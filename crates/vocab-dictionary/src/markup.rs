use serde::{Deserialize, Serialize};
use vocab_types::Region;

/// Phonetic and audio markers scoped to one regional variant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionMarkup {
    pub region: Region,
    pub scope: String,
}

/// CSS selectors describing where a dictionary site keeps each field.
///
/// Fields holding a list are alternative strategies: every strategy is
/// scanned in order and the results are concatenated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkupProfile {
    pub entry: String,
    pub no_results: String,
    pub search_result_link: String,
    pub part_of_speech: String,
    pub phonetic: String,
    pub senses: Vec<String>,
    pub definition: String,
    pub examples: Vec<String>,
    pub idiom_group: String,
    pub idiom_names: Vec<String>,
    pub idiom_senses: Vec<String>,
    pub cefr: String,
    pub extra_examples: String,
    /// Order here is the order of `WordEntry::pronunciations`
    pub regions: Vec<RegionMarkup>,
    pub audio_attribute: String,
}

impl MarkupProfile {
    /// Oxford Learner's Dictionaries
    pub fn oxford() -> Self {
        Self {
            entry: ".entry".to_string(),
            no_results: ".water-no-results".to_string(),
            search_result_link: ".search-results a".to_string(),
            part_of_speech: ".pos".to_string(),
            phonetic: ".phon".to_string(),
            // single-sense, multi-sense and grouped-sense entries
            senses: vec![
                ".sense".to_string(),
                ".senseGroup".to_string(),
                ".sense_single".to_string(),
            ],
            definition: ".def".to_string(),
            examples: vec![".examples .x".to_string(), ".x-g .x".to_string()],
            idiom_group: ".idm-g".to_string(),
            idiom_names: vec![".idm".to_string(), ".idm-l".to_string()],
            idiom_senses: vec![".sense".to_string()],
            cefr: ".symbols-cefr".to_string(),
            extra_examples: r#".res-g [title="Extra examples"] .x-gs .x"#.to_string(),
            regions: vec![
                RegionMarkup {
                    region: Region::BrE,
                    scope: "[geo=br]".to_string(),
                },
                RegionMarkup {
                    region: Region::NAmE,
                    scope: "[geo=n_am]".to_string(),
                },
            ],
            audio_attribute: "data-src-mp3".to_string(),
        }
    }
}

impl Default for MarkupProfile {
    fn default() -> Self {
        Self::oxford()
    }
}
