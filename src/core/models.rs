#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguagePair {
    pub original: String,   // Language of the source document (being learned)
    pub translated: String, // Reader's own language, shown by default
}

impl LanguagePair {
    pub fn new(original: impl Into<String>, translated: impl Into<String>) -> Self {
        Self { original: original.into(), translated: translated.into() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sentence {
    pub original: String,
    pub translated: String,
}

impl Sentence {
    pub fn new(original: impl Into<String>, translated: impl Into<String>) -> Self {
        Self { original: original.into(), translated: translated.into() }
    }

    /// Whitespace split of the translated text. Punctuation stays attached to
    /// its word, so "eats." and "eats" are different lookup keys.
    pub fn tokens(&self) -> Vec<&str> {
        self.translated.split_whitespace().collect()
    }

    pub fn token(&self, index: usize) -> Option<&str> {
        self.translated.split_whitespace().nth(index)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CandidateWord {
    pub word: String,        // Translated-language surface form found on the page
    pub translation: String, // Original-language form offered for substitution
    pub frequency: u32,
    pub handled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KnownWord {
    pub id: Option<String>, // Assigned by the word service, absent for local inserts
    pub original_word: String,
    pub translated_word: String,
    pub original_language: String,
    pub translated_language: String,
    pub translate: bool,
}

impl KnownWord {
    pub fn new(
        original_word: impl Into<String>,
        translated_word: impl Into<String>,
        languages: &LanguagePair,
        translate: bool,
    ) -> Self {
        Self {
            id: None,
            original_word: original_word.into(),
            translated_word: translated_word.into(),
            original_language: languages.original.clone(),
            translated_language: languages.translated.clone(),
            translate,
        }
    }

    pub fn from_candidate(candidate: &CandidateWord, languages: &LanguagePair, translate: bool) -> Self {
        Self::new(&candidate.translation, &candidate.word, languages, translate)
    }

    pub fn languages(&self) -> LanguagePair {
        LanguagePair::new(&self.original_language, &self.translated_language)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageContent {
    pub sentences: Vec<Sentence>,
    pub most_common_words: Vec<CandidateWord>,
    pub known_words: Vec<KnownWord>,
    pub languages: LanguagePair,
    pub total_pages: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: Option<String>,
    pub description: Option<String>,
    pub languages: LanguagePair,
    pub page_number: Option<u32>, // Last page the reader was on
}
