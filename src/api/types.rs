//! Wire shapes of the backend. Every endpoint gets its own DTO here and is
//! converted into the core model before it reaches the reading engine.

use serde::{
    Deserialize,
    Serialize,
};

use crate::core::{
    Book,
    CandidateWord,
    KnownWord,
    LanguagePair,
    PageContent,
    Sentence,
};

/// List and detail endpoints wrap their payload in `{ "data": ... }`.
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

#[derive(Debug, Default, Deserialize)]
pub struct ErrorDto {
    #[serde(default)]
    pub error: Option<String>,
}

/// `POST /api/words/translation` answers with a bare `{ "word": ... }`.
#[derive(Debug, Deserialize)]
pub struct TranslationDto {
    pub word: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginDto {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct SignupRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub username: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest<'a> {
    pub word: &'a str,
    pub original_language: &'a str,
    pub translated_language: &'a str,
}

#[derive(Debug, Serialize)]
pub struct UpdateTranslateRequest {
    pub translate: bool,
}

fn default_translate() -> bool {
    true
}

/// The words endpoints use `originalWord`/`translatedWord`, the page endpoint
/// sends the same record as `word`/`translation`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnownWordDto {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(alias = "word")]
    pub original_word: String,
    #[serde(alias = "translation")]
    pub translated_word: String,
    #[serde(default)]
    pub original_language: String,
    #[serde(default)]
    pub translated_language: String,
    #[serde(default = "default_translate")]
    pub translate: bool,
}

impl KnownWordDto {
    /// Page snapshots may omit the language fields; they inherit the page's pair.
    pub fn into_model(self, fallback: &LanguagePair) -> KnownWord {
        KnownWord {
            id: self.id,
            original_word: self.original_word,
            translated_word: self.translated_word,
            original_language: if self.original_language.is_empty() {
                fallback.original.clone()
            } else {
                self.original_language
            },
            translated_language: if self.translated_language.is_empty() {
                fallback.translated.clone()
            } else {
                self.translated_language
            },
            translate: self.translate,
        }
    }
}

impl From<&KnownWord> for KnownWordDto {
    fn from(word: &KnownWord) -> Self {
        Self {
            id: None,
            original_word: word.original_word.clone(),
            translated_word: word.translated_word.clone(),
            original_language: word.original_language.clone(),
            translated_language: word.translated_language.clone(),
            translate: word.translate,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SentenceDto {
    pub original: String,
    pub translated: String,
}

#[derive(Debug, Deserialize)]
pub struct CandidateDto {
    pub word: String,
    pub translation: String,
    #[serde(default)]
    pub frequency: u32,
    #[serde(default)]
    pub handled: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContentDto {
    #[serde(default)]
    pub translations: Vec<SentenceDto>,
    #[serde(default)]
    pub most_common_words: Vec<CandidateDto>,
    #[serde(default)]
    pub known_words: Vec<KnownWordDto>,
    pub original_language: String,
    pub translated_language: String,
    pub total_pages: u32,
}

impl From<PageContentDto> for PageContent {
    fn from(dto: PageContentDto) -> Self {
        let languages = LanguagePair::new(dto.original_language, dto.translated_language);
        PageContent {
            sentences: dto
                .translations
                .into_iter()
                .map(|s| Sentence { original: s.original, translated: s.translated })
                .collect(),
            most_common_words: dto
                .most_common_words
                .into_iter()
                .map(|c| CandidateWord {
                    word: c.word,
                    translation: c.translation,
                    frequency: c.frequency,
                    handled: c.handled,
                })
                .collect(),
            known_words: dto.known_words.into_iter().map(|k| k.into_model(&languages)).collect(),
            languages,
            total_pages: dto.total_pages,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub original_language: String,
    #[serde(default)]
    pub translated_language: String,
    #[serde(default)]
    pub page_number: Option<u32>,
}

impl From<BookDto> for Book {
    fn from(dto: BookDto) -> Self {
        Book {
            id: dto.id,
            title: dto.title,
            author: dto.author,
            description: dto.description,
            languages: LanguagePair::new(dto.original_language, dto.translated_language),
            page_number: dto.page_number,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_content_normalization() {
        let json = r#"{
            "translations": [{ "original": "Le chat mange.", "translated": "The cat eats." }],
            "mostCommonWords": [{ "word": "eats", "translation": "mange", "frequency": 3 }],
            "knownWords": [{ "word": "chat", "translation": "cat" }],
            "originalLanguage": "fr",
            "translatedLanguage": "en",
            "totalPages": 12
        }"#;

        let dto: PageContentDto = serde_json::from_str(json).unwrap();
        let page = PageContent::from(dto);

        assert_eq!(page.total_pages, 12);
        assert_eq!(page.sentences[0].translated, "The cat eats.");
        assert!(!page.most_common_words[0].handled);
        assert_eq!(page.most_common_words[0].frequency, 3);

        let known = &page.known_words[0];
        assert_eq!(known.original_word, "chat");
        assert_eq!(known.translated_word, "cat");
        assert_eq!(known.original_language, "fr");
        assert_eq!(known.translated_language, "en");
        assert!(known.translate);
    }

    #[test]
    fn test_known_word_list_shape() {
        let json = r#"{ "data": [{
            "_id": "abc123",
            "originalWord": "mange",
            "translatedWord": "eats",
            "originalLanguage": "fr",
            "translatedLanguage": "en",
            "translate": false
        }] }"#;

        let envelope: DataEnvelope<Vec<KnownWordDto>> = serde_json::from_str(json).unwrap();
        let pair = LanguagePair::new("fr", "en");
        let word = envelope.data.into_iter().next().unwrap().into_model(&pair);
        assert_eq!(word.id.as_deref(), Some("abc123"));
        assert!(!word.translate);
    }

    #[test]
    fn test_outgoing_known_word_keeps_translate_flag() {
        let pair = LanguagePair::new("fr", "en");
        let word = KnownWord::new("mange", "eats", &pair, false);
        let value = serde_json::to_value(KnownWordDto::from(&word)).unwrap();
        assert_eq!(value["translate"], serde_json::Value::Bool(false));
        assert_eq!(value["originalWord"], "mange");
        assert!(value.get("_id").is_none());
    }
}
