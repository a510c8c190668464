use super::known_words::KnownWordIndex;
use crate::{
    api::WordService,
    core::{
        BulkReport,
        CandidateWord,
        KnownWord,
        ReaderError,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriageDecision {
    /// Persist with `translate = true` and substitute on this page right away.
    Translate,
    /// Persist with `translate = false` so the word is never offered again.
    DontTranslate,
    /// Local only; the word may come back on a later page.
    Ignore,
}

/// One-shot gate over the page's frequent unknown words.
#[derive(Debug, Clone)]
pub struct TriageFlow {
    candidates: Vec<CandidateWord>,
    open: bool,
}

impl TriageFlow {
    /// Candidates the reader already classified (present in the known-word
    /// snapshot in either mode) are dropped before the gate is evaluated.
    pub fn new(candidates: Vec<CandidateWord>, index: &KnownWordIndex) -> Self {
        let candidates: Vec<CandidateWord> =
            candidates.into_iter().filter(|c| !index.contains(&c.word)).collect();
        let open = !candidates.is_empty() && candidates.iter().all(|c| !c.handled);
        Self { candidates, open }
    }

    pub fn closed() -> Self {
        Self { candidates: Vec::new(), open: false }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn candidates(&self) -> &[CandidateWord] {
        &self.candidates
    }

    pub fn pending(&self) -> impl Iterator<Item = &CandidateWord> {
        self.candidates.iter().filter(|c| !c.handled)
    }

    pub fn dismiss(&mut self) {
        self.open = false;
    }

    fn mark_handled(&mut self, word: &str) {
        for candidate in self.candidates.iter_mut().filter(|c| c.word == word) {
            candidate.handled = true;
        }
        if self.candidates.iter().all(|c| c.handled) {
            log::debug!("All common words handled, closing triage");
            self.open = false;
        }
    }

    async fn apply<W: WordService>(
        &mut self,
        candidate: &CandidateWord,
        decision: TriageDecision,
        words: &W,
        index: &mut KnownWordIndex,
    ) -> Result<(), ReaderError> {
        let languages = index.languages().clone();
        match decision {
            TriageDecision::Translate => {
                let record = KnownWord::from_candidate(candidate, &languages, true);
                // Optimistic: the index is a cache and is rebuilt on the next page load.
                // A failed save keeps its entry until then, even if the word is later ignored.
                index.upsert(record.clone());
                words.add_known_word(&record).await.map_err(|e| {
                    log::warn!("Failed to save '{}': {}", candidate.word, e);
                    ReaderError::action("process word", e)
                })?;
            }
            TriageDecision::DontTranslate => {
                let record = KnownWord::from_candidate(candidate, &languages, false);
                words.add_known_word(&record).await.map_err(|e| {
                    log::warn!("Failed to save '{}': {}", candidate.word, e);
                    ReaderError::action("process word", e)
                })?;
            }
            TriageDecision::Ignore => {}
        }

        self.mark_handled(&candidate.word);
        Ok(())
    }

    /// Classifies a single pending candidate. A failed save leaves the word
    /// pending so it can be retried.
    pub async fn decide<W: WordService>(
        &mut self,
        word: &str,
        decision: TriageDecision,
        words: &W,
        index: &mut KnownWordIndex,
    ) -> Result<(), ReaderError> {
        if !self.open {
            return Err(ReaderError::Validation("common words already dismissed".to_string()));
        }
        let candidate = self
            .pending()
            .find(|c| c.word == word)
            .cloned()
            .ok_or_else(|| ReaderError::Validation(format!("'{word}' is not a pending word")))?;

        self.apply(&candidate, decision, words, index).await
    }

    /// Applies `decision` to every pending candidate in order, then closes the
    /// gate. Failures do not stop the loop; what was saved stays saved. A
    /// closed gate persists nothing.
    pub async fn decide_all<W: WordService>(
        &mut self,
        decision: TriageDecision,
        words: &W,
        index: &mut KnownWordIndex,
    ) -> BulkReport {
        let mut report = BulkReport::default();
        if !self.open {
            log::debug!("Common words already closed, ignoring bulk {decision:?}");
            return report;
        }

        if decision != TriageDecision::Ignore {
            let pending: Vec<CandidateWord> = self.pending().cloned().collect();
            for candidate in pending {
                match self.apply(&candidate, decision, words, index).await {
                    Ok(()) => report.applied.push(candidate.word),
                    Err(e) => report.failed.push((candidate.word, e)),
                }
            }
        }

        self.open = false;
        report
    }
}
