use scraper::element_ref::Select;
use scraper::{ElementRef, Html, Selector};
use vocab_core::LookupError;
use vocab_types::{Idiom, Pronunciation, Region, WordEntry};

use crate::markup::MarkupProfile;

struct RegionSelectors {
    region: Region,
    phonetic: Selector,
    audio: Selector,
}

/// Compiled [`MarkupProfile`]. Extraction is pure: no network, no browser.
pub struct EntryParser {
    entry: Selector,
    no_results: Selector,
    part_of_speech: Selector,
    phonetic: Selector,
    senses: Vec<Selector>,
    definition: Selector,
    examples: Selector,
    idiom_group: Selector,
    idiom_names: Vec<Selector>,
    idiom_senses: Vec<Selector>,
    cefr: Selector,
    extra_examples: Selector,
    regions: Vec<RegionSelectors>,
    audio_attribute: String,
}

impl EntryParser {
    pub fn new(markup: &MarkupProfile) -> Result<Self, LookupError> {
        let regions = markup
            .regions
            .iter()
            .map(|r| {
                Ok(RegionSelectors {
                    region: r.region,
                    phonetic: compile(&format!("{} {}", r.scope, markup.phonetic))?,
                    audio: compile(&format!("{} [{}]", r.scope, markup.audio_attribute))?,
                })
            })
            .collect::<Result<Vec<_>, LookupError>>()?;

        Ok(Self {
            entry: compile(&markup.entry)?,
            no_results: compile(&markup.no_results)?,
            part_of_speech: compile(&markup.part_of_speech)?,
            phonetic: compile(&markup.phonetic)?,
            senses: compile_all(&markup.senses)?,
            definition: compile(&markup.definition)?,
            // one selector list so an example matched by two markers is kept once
            examples: compile(&markup.examples.join(", "))?,
            idiom_group: compile(&markup.idiom_group)?,
            idiom_names: compile_all(&markup.idiom_names)?,
            idiom_senses: compile_all(&markup.idiom_senses)?,
            cefr: compile(&markup.cefr)?,
            extra_examples: compile(&markup.extra_examples)?,
            regions,
            audio_attribute: markup.audio_attribute.clone(),
        })
    }

    /// Parse a captured page. Fails with [`LookupError::NotFound`] when the
    /// page has no entry region or carries the no-results marker.
    pub fn parse(&self, html: &str, word: &str) -> Result<WordEntry, LookupError> {
        let document = Html::parse_document(html);

        if !self.is_entry(&document) {
            return Err(LookupError::NotFound);
        }

        Ok(self.extract(&document, word))
    }

    pub fn is_entry(&self, document: &Html) -> bool {
        document.select(&self.entry).next().is_some()
            && document.select(&self.no_results).next().is_none()
    }

    pub fn extract(&self, document: &Html, word: &str) -> WordEntry {
        let root = document.root_element();
        let mut entry = WordEntry::new(word);

        entry.part_of_speech = first_text(root.select(&self.part_of_speech)).unwrap_or_default();
        entry.phonetic_spelling = first_text(root.select(&self.phonetic)).unwrap_or_default();

        self.collect_senses(
            root,
            &self.senses,
            true,
            &mut entry.definitions,
            &mut entry.examples,
        );

        entry.idioms = self.idioms(root);
        entry.level = first_text(root.select(&self.cefr));

        // duplicates of per-sense examples are kept; idiom blocks are not
        entry.examples.extend(
            root.select(&self.extra_examples)
                .filter(|el| !self.inside_idiom(*el))
                .map(text_of)
                .filter(|text| !text.is_empty()),
        );

        entry.pronunciations = self.pronunciations(root);

        entry
    }

    /// A container contributes at most one definition and only contributes
    /// examples when it has one.
    fn collect_senses(
        &self,
        scope: ElementRef<'_>,
        strategies: &[Selector],
        skip_idioms: bool,
        definitions: &mut Vec<String>,
        examples: &mut Vec<String>,
    ) {
        for strategy in strategies {
            for sense in scope.select(strategy) {
                if skip_idioms && self.inside_idiom(sense) {
                    continue;
                }

                let definition = joined_text(sense.select(&self.definition));
                if definition.is_empty() {
                    continue;
                }

                definitions.push(definition);
                examples.extend(non_empty_texts(sense.select(&self.examples)));
            }
        }
    }

    fn inside_idiom(&self, element: ElementRef<'_>) -> bool {
        element
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|ancestor| self.idiom_group.matches(&ancestor))
    }

    fn idioms(&self, root: ElementRef<'_>) -> Vec<Idiom> {
        let mut idioms = Vec::new();

        for group in root.select(&self.idiom_group) {
            let name = self
                .idiom_names
                .iter()
                .map(|selector| joined_text(group.select(selector)))
                .find(|name| !name.is_empty());

            let Some(name) = name else {
                continue;
            };

            let mut idiom = Idiom {
                name,
                ..Default::default()
            };
            self.collect_senses(
                group,
                &self.idiom_senses,
                false,
                &mut idiom.definitions,
                &mut idiom.examples,
            );
            idioms.push(idiom);
        }

        idioms
    }

    fn pronunciations(&self, root: ElementRef<'_>) -> Vec<Pronunciation> {
        self.regions
            .iter()
            .filter_map(|r| {
                let ipa = first_text(root.select(&r.phonetic));
                let audio = root
                    .select(&r.audio)
                    .next()
                    .and_then(|el| el.value().attr(&self.audio_attribute))
                    .map(str::trim)
                    .filter(|src| !src.is_empty())
                    .map(str::to_string);

                Pronunciation::new(r.region, ipa, audio)
            })
            .collect()
    }
}

fn compile(selector: &str) -> Result<Selector, LookupError> {
    Selector::parse(selector).map_err(|e| LookupError::Selector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

fn compile_all(selectors: &[String]) -> Result<Vec<Selector>, LookupError> {
    selectors.iter().map(|s| compile(s)).collect()
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Trimmed text of the first match, if non-empty
fn first_text(mut matches: Select<'_, '_>) -> Option<String> {
    matches
        .next()
        .map(text_of)
        .filter(|text| !text.is_empty())
}

/// Text of every match concatenated, then trimmed
fn joined_text(matches: Select<'_, '_>) -> String {
    matches
        .flat_map(|el| el.text())
        .collect::<String>()
        .trim()
        .to_string()
}

fn non_empty_texts<'a>(matches: Select<'a, 'a>) -> impl Iterator<Item = String> + 'a {
    matches.map(text_of).filter(|text| !text.is_empty())
}
