use crate::core::{
    Book,
    KnownWord,
    LanguagePair,
    PageContent,
    ReaderError,
};

pub mod client;
#[cfg(test)]
pub(crate) mod fake;
pub mod types;

pub use client::ApiClient;

/// Book catalogue and page content.
#[allow(async_fn_in_trait)]
pub trait BookService {
    async fn fetch_page(&self, book_id: &str, page: u32) -> Result<PageContent, ReaderError>;

    async fn list_books(&self) -> Result<Vec<Book>, ReaderError>;

    async fn book_details(&self, book_id: &str) -> Result<Book, ReaderError>;
}

/// The user's vocabulary store, which is the source of truth for known words.
#[allow(async_fn_in_trait)]
pub trait WordService {
    async fn add_known_word(&self, word: &KnownWord) -> Result<(), ReaderError>;

    /// Translates a single word from `source_lang` into `target_lang`.
    async fn translate_word(
        &self,
        word: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, ReaderError>;

    async fn list_known_words(&self, languages: &LanguagePair)
        -> Result<Vec<KnownWord>, ReaderError>;

    async fn delete_known_word(&self, id: &str) -> Result<(), ReaderError>;

    async fn update_known_word(&self, id: &str, translate: bool) -> Result<(), ReaderError>;
}
