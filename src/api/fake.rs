//! In-memory stand-in for the backend, with scripted failures.

use std::{
    collections::{
        HashMap,
        HashSet,
    },
    sync::{
        atomic::{
            AtomicBool,
            Ordering,
        },
        Mutex,
    },
};

use super::{
    BookService,
    WordService,
};
use crate::core::{
    Book,
    CandidateWord,
    KnownWord,
    LanguagePair,
    PageContent,
    ReaderError,
    Sentence,
};

pub(crate) fn pair() -> LanguagePair {
    LanguagePair::new("fr", "en")
}

pub(crate) fn sample_page(total_pages: u32) -> PageContent {
    PageContent {
        sentences: vec![
            Sentence::new("Le chat mange.", "The cat eats."),
            Sentence::new("Il dort.", "He sleeps."),
        ],
        most_common_words: vec![CandidateWord {
            word: "eats".to_string(),
            translation: "mange".to_string(),
            frequency: 3,
            handled: false,
        }],
        known_words: vec![KnownWord::new("chat", "cat", &pair(), true)],
        languages: pair(),
        total_pages,
    }
}

fn unavailable(what: &str) -> ReaderError {
    ReaderError::Api { status: 503, message: format!("{what} unavailable") }
}

#[derive(Default)]
pub(crate) struct FakeBackend {
    pages: Mutex<HashMap<u32, PageContent>>,
    stored: Mutex<Vec<KnownWord>>,
    added: Mutex<Vec<KnownWord>>,
    translations: Mutex<HashMap<String, String>>,
    failing_adds: Mutex<HashSet<String>>,
    failing_pages: Mutex<HashSet<u32>>,
    page_requests: Mutex<Vec<u32>>,
    translate_requests: Mutex<Vec<(String, String, String)>>,
    fail_translate: AtomicBool,
    next_id: Mutex<u32>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A book of `total` identical sample pages.
    pub fn with_pages(total: u32) -> Self {
        let backend = Self::new();
        for page in 1..=total {
            backend.set_page(page, sample_page(total));
        }
        backend
    }

    pub fn set_page(&self, page: u32, content: PageContent) {
        self.pages.lock().unwrap().insert(page, content);
    }

    pub fn set_translation(&self, word: &str, translation: &str) {
        self.translations.lock().unwrap().insert(word.to_string(), translation.to_string());
    }

    pub fn fail_add_for(&self, translated_word: &str) {
        self.failing_adds.lock().unwrap().insert(translated_word.to_string());
    }

    pub fn fail_page(&self, page: u32) {
        self.failing_pages.lock().unwrap().insert(page);
    }

    pub fn fail_translate(&self, fail: bool) {
        self.fail_translate.store(fail, Ordering::SeqCst);
    }

    pub fn added_words(&self) -> Vec<KnownWord> {
        self.added.lock().unwrap().clone()
    }

    pub fn stored_words(&self) -> Vec<KnownWord> {
        self.stored.lock().unwrap().clone()
    }

    pub fn page_requests(&self) -> Vec<u32> {
        self.page_requests.lock().unwrap().clone()
    }

    pub fn translate_requests(&self) -> Vec<(String, String, String)> {
        self.translate_requests.lock().unwrap().clone()
    }
}

impl BookService for FakeBackend {
    async fn fetch_page(&self, book_id: &str, page: u32) -> Result<PageContent, ReaderError> {
        self.page_requests.lock().unwrap().push(page);
        if self.failing_pages.lock().unwrap().contains(&page) {
            return Err(unavailable("page"));
        }

        let mut content = self.pages.lock().unwrap().get(&page).cloned().ok_or_else(|| {
            ReaderError::Api { status: 404, message: format!("{book_id}/{page} not found") }
        })?;

        // Server-side snapshot includes everything saved so far.
        content.known_words.extend(self.stored_words());
        Ok(content)
    }

    async fn list_books(&self) -> Result<Vec<Book>, ReaderError> {
        Ok(vec![Book {
            id: "book-1".to_string(),
            title: "Le Chat".to_string(),
            author: None,
            description: None,
            languages: pair(),
            page_number: Some(2),
        }])
    }

    async fn book_details(&self, book_id: &str) -> Result<Book, ReaderError> {
        self.list_books()
            .await?
            .into_iter()
            .find(|b| b.id == book_id)
            .ok_or_else(|| ReaderError::Api { status: 404, message: "no such book".to_string() })
    }
}

impl WordService for FakeBackend {
    async fn add_known_word(&self, word: &KnownWord) -> Result<(), ReaderError> {
        if self.failing_adds.lock().unwrap().contains(&word.translated_word) {
            return Err(unavailable("word service"));
        }

        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let mut stored = word.clone();
        stored.id = Some(format!("w{}", *next_id));

        self.added.lock().unwrap().push(word.clone());
        self.stored.lock().unwrap().push(stored);
        Ok(())
    }

    async fn translate_word(
        &self,
        word: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, ReaderError> {
        self.translate_requests.lock().unwrap().push((
            word.to_string(),
            source_lang.to_string(),
            target_lang.to_string(),
        ));
        if self.fail_translate.load(Ordering::SeqCst) {
            return Err(unavailable("translation"));
        }
        Ok(self.translations.lock().unwrap().get(word).cloned().unwrap_or_else(|| word.to_string()))
    }

    async fn list_known_words(
        &self,
        languages: &LanguagePair,
    ) -> Result<Vec<KnownWord>, ReaderError> {
        Ok(self.stored_words().into_iter().filter(|w| &w.languages() == languages).collect())
    }

    async fn delete_known_word(&self, id: &str) -> Result<(), ReaderError> {
        let mut stored = self.stored.lock().unwrap();
        let before = stored.len();
        stored.retain(|w| w.id.as_deref() != Some(id));
        if stored.len() == before {
            return Err(ReaderError::Api { status: 404, message: "word not found".to_string() });
        }
        Ok(())
    }

    async fn update_known_word(&self, id: &str, translate: bool) -> Result<(), ReaderError> {
        let mut stored = self.stored.lock().unwrap();
        match stored.iter_mut().find(|w| w.id.as_deref() == Some(id)) {
            Some(word) => {
                word.translate = translate;
                Ok(())
            }
            None => Err(ReaderError::Api { status: 404, message: "word not found".to_string() }),
        }
    }
}
