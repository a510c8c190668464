use crate::{
    api::WordService,
    core::{
        KnownWord,
        LanguagePair,
        ReaderError,
    },
};

/// The reader's known-word list for one language pair, as kept by the word
/// service. Every mutation goes to the service first and then reloads.
pub struct Vocabulary<W> {
    service: W,
    languages: LanguagePair,
    words: Vec<KnownWord>,
}

impl<W: WordService> Vocabulary<W> {
    pub async fn load(service: W, languages: LanguagePair) -> Result<Self, ReaderError> {
        let mut vocabulary = Self { service, languages, words: Vec::new() };
        vocabulary.reload().await?;
        Ok(vocabulary)
    }

    pub async fn reload(&mut self) -> Result<(), ReaderError> {
        self.words = self
            .service
            .list_known_words(&self.languages)
            .await
            .map_err(|e| ReaderError::fetch("known words", e))?;
        self.words.sort_by(|a, b| a.original_word.cmp(&b.original_word));
        Ok(())
    }

    pub fn service(&self) -> &W {
        &self.service
    }

    pub fn languages(&self) -> &LanguagePair {
        &self.languages
    }

    pub fn words(&self) -> &[KnownWord] {
        &self.words
    }

    pub fn get(&self, id: &str) -> Option<&KnownWord> {
        self.words.iter().find(|w| w.id.as_deref() == Some(id))
    }

    pub async fn add_word(
        &mut self,
        original_word: &str,
        translated_word: &str,
        translate: bool,
    ) -> Result<(), ReaderError> {
        let original_word = original_word.trim();
        let translated_word = translated_word.trim();
        if original_word.is_empty() || translated_word.is_empty() {
            return Err(ReaderError::Validation("both word forms are required".to_string()));
        }

        let word = KnownWord::new(original_word, translated_word, &self.languages, translate);
        self.service
            .add_known_word(&word)
            .await
            .map_err(|e| ReaderError::action("add word", e))?;
        log::info!("Added '{original_word}' -> '{translated_word}' (translate: {translate})");
        self.reload().await
    }

    pub async fn remove_word(&mut self, id: &str) -> Result<(), ReaderError> {
        self.service
            .delete_known_word(id)
            .await
            .map_err(|e| ReaderError::action("delete word", e))?;
        log::info!("Deleted known word {id}");
        self.reload().await
    }

    /// Flips the `translate` flag of a word and returns the new value.
    pub async fn toggle_translate(&mut self, id: &str) -> Result<bool, ReaderError> {
        let current = self
            .get(id)
            .map(|w| w.translate)
            .ok_or_else(|| ReaderError::Validation(format!("no known word with id {id}")))?;

        self.service
            .update_known_word(id, !current)
            .await
            .map_err(|e| ReaderError::action("update word", e))?;
        self.reload().await?;
        Ok(!current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{
        pair,
        FakeBackend,
    };

    #[tokio::test]
    async fn test_add_toggle_remove() {
        let mut vocabulary = Vocabulary::load(FakeBackend::new(), pair()).await.unwrap();
        assert!(vocabulary.words().is_empty());

        vocabulary.add_word(" mange ", "eats", false).await.unwrap();
        vocabulary.add_word("chat", "cat", true).await.unwrap();
        assert_eq!(vocabulary.words().len(), 2);
        assert_eq!(vocabulary.words()[0].original_word, "chat");

        let id = vocabulary.words()[1].id.clone().unwrap();
        assert!(!vocabulary.get(&id).unwrap().translate);
        assert!(vocabulary.toggle_translate(&id).await.unwrap());
        assert!(vocabulary.get(&id).unwrap().translate);

        vocabulary.remove_word(&id).await.unwrap();
        assert_eq!(vocabulary.words().len(), 1);
        assert!(vocabulary.get(&id).is_none());
    }

    #[tokio::test]
    async fn test_invalid_requests() {
        let mut vocabulary = Vocabulary::load(FakeBackend::new(), pair()).await.unwrap();

        assert!(vocabulary.add_word("", "eats", true).await.unwrap_err().is_validation());
        assert!(vocabulary.toggle_translate("missing").await.unwrap_err().is_validation());

        let err = vocabulary.remove_word("missing").await.unwrap_err();
        assert!(matches!(err, ReaderError::ActionFailure { .. }));
    }

    #[tokio::test]
    async fn test_other_pairs_are_not_listed() {
        let backend = FakeBackend::new();
        let german = LanguagePair::new("de", "en");
        backend.add_known_word(&KnownWord::new("Katze", "cat", &german, true)).await.unwrap();

        let vocabulary = Vocabulary::load(backend, pair()).await.unwrap();
        assert!(vocabulary.words().is_empty());
        assert_eq!(vocabulary.service().stored_words().len(), 1);
    }
}
