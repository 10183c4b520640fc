use crate::bitable::{RecordPage, RecordRow};
use std::collections::{BTreeMap, HashMap};

pub type LanguageMap = BTreeMap<String, String>;

/// Per-language `key -> text` maps built up page by page.
///
/// Every configured language has a map from the start, so a language without
/// a single translated row still yields an (empty) output file.
#[derive(Debug, Clone)]
pub struct TranslationTable {
    key_field: String,
    languages: Vec<String>,
    entries: HashMap<String, LanguageMap>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub rows: usize,
    pub skipped: usize,
}

impl TranslationTable {
    pub fn new(key_field: impl Into<String>, languages: Vec<String>) -> Self {
        let entries = languages
            .iter()
            .map(|lang| (lang.clone(), LanguageMap::new()))
            .collect();

        Self {
            key_field: key_field.into(),
            languages,
            entries,
        }
    }

    /// Folds one row in. Returns `false` if the row has no key and was dropped.
    ///
    /// Later rows overwrite earlier ones for the same `(language, key)`.
    pub fn merge_row(&mut self, row: &RecordRow) -> bool {
        let Some(key) = row.text(&self.key_field) else {
            return false;
        };

        for lang in &self.languages {
            if let Some(text) = row.text(lang) {
                if let Some(map) = self.entries.get_mut(lang) {
                    map.insert(key.clone(), text);
                }
            }
        }
        true
    }

    pub fn merge_page(&mut self, page: &RecordPage) -> MergeStats {
        let mut stats = MergeStats::default();
        for row in &page.rows {
            stats.rows += 1;
            if !self.merge_row(row) {
                stats.skipped += 1;
            }
        }
        stats
    }

    pub fn get(&self, lang: &str) -> Option<&LanguageMap> {
        self.entries.get(lang)
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// Languages with their maps, in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LanguageMap)> {
        self.languages
            .iter()
            .filter_map(|lang| self.entries.get(lang).map(|map| (lang.as_str(), map)))
    }
}
