use std::collections::HashMap;

use crate::core::{
    KnownWord,
    LanguagePair,
};

/// Read-through cache of the user's known words for one language pair, keyed
/// by the case-folded translated word. Rebuilt from every page snapshot and
/// extended locally as the reader accepts words; the word service stays the
/// source of truth.
#[derive(Debug, Clone)]
pub struct KnownWordIndex {
    languages: LanguagePair,
    words: HashMap<String, KnownWord>,
}

impl KnownWordIndex {
    pub fn new(languages: LanguagePair) -> Self {
        Self { languages, words: HashMap::new() }
    }

    pub fn from_snapshot(languages: LanguagePair, snapshot: &[KnownWord]) -> Self {
        let mut index = Self::new(languages);
        for word in snapshot {
            index.upsert(word.clone());
        }
        index
    }

    fn key(word: &str) -> String {
        word.to_lowercase()
    }

    pub fn languages(&self) -> &LanguagePair {
        &self.languages
    }

    pub fn lookup(&self, word: &str) -> Option<&KnownWord> {
        self.words.get(&Self::key(word))
    }

    /// The original-language form to display in place of `word`, if the
    /// reader asked for it to be substituted.
    pub fn substitution(&self, word: &str) -> Option<&str> {
        self.lookup(word).filter(|k| k.translate).map(|k| k.original_word.as_str())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(&Self::key(word))
    }

    /// Inserts or replaces the record for its translated word. Records for a
    /// different language pair are rejected.
    pub fn upsert(&mut self, record: KnownWord) -> bool {
        if record.original_language != self.languages.original
            || record.translated_language != self.languages.translated
        {
            log::debug!(
                "Skipping known word '{}' for pair {}->{}",
                record.translated_word,
                record.original_language,
                record.translated_language
            );
            return false;
        }
        self.words.insert(Self::key(&record.translated_word), record);
        true
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
