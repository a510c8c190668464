use super::{
    known_words::KnownWordIndex,
    navigation::PageNavigator,
    resolution::{
        render_page,
        RenderedSentence,
    },
    selection::{
        Selection,
        SelectionState,
        ToggleAction,
    },
    triage::{
        TriageDecision,
        TriageFlow,
    },
};
use crate::{
    api::{
        BookService,
        WordService,
    },
    core::{
        BulkReport,
        PageContent,
        ReaderError,
        RequestTicket,
    },
};

/// Everything that belongs to one loaded page. Built wholesale from a page
/// response and thrown away on navigation.
#[derive(Debug, Clone)]
pub struct PageView {
    pub content: PageContent,
    pub index: KnownWordIndex,
    pub selection: SelectionState,
    pub triage: TriageFlow,
}

impl PageView {
    pub fn new(content: PageContent) -> Self {
        let index = KnownWordIndex::from_snapshot(content.languages.clone(), &content.known_words);
        let triage = TriageFlow::new(content.most_common_words.clone(), &index);
        Self { content, index, selection: SelectionState::new(), triage }
    }

    pub fn render(&self) -> Vec<RenderedSentence> {
        render_page(&self.content.sentences, &self.selection, &self.index)
    }

    fn is_valid_position(&self, sentence: usize, word: usize) -> bool {
        self.content.sentences.get(sentence).is_some_and(|s| s.token(word).is_some())
    }
}

/// A reading session over one book: the page navigator, the current page view
/// and the backend used for fetching pages and recording word decisions.
pub struct ReadingSession<S> {
    service: S,
    navigator: PageNavigator,
    view: Option<PageView>,
    error: Option<String>,
    notice: Option<String>,
}

impl<S: BookService + WordService> ReadingSession<S> {
    pub fn new(service: S, book_id: impl Into<String>) -> Self {
        Self {
            service,
            navigator: PageNavigator::new(book_id),
            view: None,
            error: None,
            notice: None,
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn navigator(&self) -> &PageNavigator {
        &self.navigator
    }

    pub fn view(&self) -> Option<&PageView> {
        self.view.as_ref()
    }

    /// Page-level load error. While set, nothing is rendered.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Transient message from the last failed action, cleared on read.
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    pub fn render(&self) -> Option<Vec<RenderedSentence>> {
        if self.error.is_some() {
            return None;
        }
        self.view.as_ref().map(PageView::render)
    }

    pub fn is_triage_open(&self) -> bool {
        self.view.as_ref().is_some_and(|v| v.triage.is_open())
    }

    /// First half of a page load: bounds check and ticket.
    pub fn begin_load(&self, page: u32) -> Result<RequestTicket, ReaderError> {
        self.navigator.request(page)
    }

    /// Second half of a page load. Responses for superseded tickets are
    /// dropped; an accepted page replaces the whole view.
    pub fn complete_load(
        &mut self,
        ticket: RequestTicket,
        result: Result<PageContent, ReaderError>,
    ) -> Result<bool, ReaderError> {
        if !self.navigator.is_current(&ticket) {
            log::warn!("Ignoring superseded response for page {}", ticket.page);
            return Ok(false);
        }

        match result {
            Ok(content) => {
                self.navigator.accept(&ticket, content.total_pages);
                let view = PageView::new(content);
                log::info!(
                    "Loaded page {} of {} ({} sentences, {} known words, {} common words)",
                    ticket.page,
                    view.content.total_pages,
                    view.content.sentences.len(),
                    view.index.len(),
                    view.triage.candidates().len()
                );
                self.view = Some(view);
                self.error = None;
                Ok(true)
            }
            Err(e) => {
                log::error!("Failed to load page {}: {}", ticket.page, e);
                let err = ReaderError::fetch("page content", e);
                self.error = Some(err.to_string());
                self.view = None;
                Err(err)
            }
        }
    }

    /// Loads `page`. Out-of-range pages are a silent no-op (`Ok(false)`).
    pub async fn go_to(&mut self, page: u32) -> Result<bool, ReaderError> {
        let ticket = match self.begin_load(page) {
            Ok(ticket) => ticket,
            Err(e) if e.is_validation() => {
                log::debug!("{e}");
                return Ok(false);
            }
            Err(e) => return Err(e),
        };

        let result = self.service.fetch_page(self.navigator.book_id(), page).await;
        self.complete_load(ticket, result)
    }

    pub async fn next(&mut self) -> Result<bool, ReaderError> {
        match self.navigator.next_page() {
            Some(page) => self.go_to(page).await,
            None => Ok(false),
        }
    }

    pub async fn previous(&mut self) -> Result<bool, ReaderError> {
        match self.navigator.previous_page() {
            Some(page) => self.go_to(page).await,
            None => Ok(false),
        }
    }

    fn interactive_view(&mut self) -> Option<&mut PageView> {
        match self.view.as_mut() {
            Some(view) if !view.triage.is_open() => Some(view),
            Some(_) => {
                log::debug!("Interaction ignored while common words are pending");
                None
            }
            None => None,
        }
    }

    /// Clicks the word at `(sentence, word)`. Ignored while the triage gate is
    /// open or for positions outside the page.
    pub fn click(&mut self, sentence: usize, word: usize) -> Option<Selection> {
        let view = self.interactive_view()?;
        if !view.is_valid_position(sentence, word) {
            log::debug!("Click outside the page at ({sentence}, {word})");
            return None;
        }
        Some(view.selection.click(sentence, word))
    }

    /// The "translate" control. On a selected word this fetches a one-word
    /// translation; a failed fetch leaves no override behind.
    pub async fn toggle_translate(&mut self) -> Result<Option<ToggleAction>, ReaderError> {
        let Some(view) = self.view.as_mut().filter(|v| !v.triage.is_open()) else {
            return Ok(None);
        };

        let action = view.selection.toggle();
        let ToggleAction::TranslateWord { sentence, word } = action else {
            return Ok(Some(action));
        };

        let Some(token) = view.content.sentences.get(sentence).and_then(|s| s.token(word)) else {
            return Ok(None);
        };
        let token = token.to_string();
        let languages = view.content.languages.clone();

        match self.service.translate_word(&token, &languages.translated, &languages.original).await
        {
            Ok(text) => {
                if let Some(view) = self.view.as_mut() {
                    view.selection.apply_override(sentence, word, text);
                }
                Ok(Some(action))
            }
            Err(e) => {
                log::warn!("Translation of '{token}' failed: {e}");
                let err = ReaderError::action("translate word", e);
                self.notice = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub async fn triage(&mut self, word: &str, decision: TriageDecision) -> Result<(), ReaderError> {
        let Some(view) = self.view.as_mut() else {
            return Err(ReaderError::Validation("no page loaded".to_string()));
        };
        let result = view.triage.decide(word, decision, &self.service, &mut view.index).await;
        if let Err(e) = &result {
            if !e.is_validation() {
                self.notice = Some(e.to_string());
            }
        }
        result
    }

    pub async fn triage_all(&mut self, decision: TriageDecision) -> BulkReport {
        let Some(view) = self.view.as_mut().filter(|v| v.triage.is_open()) else {
            return BulkReport::default();
        };
        let report = view.triage.decide_all(decision, &self.service, &mut view.index).await;
        if let Some(summary) = report.summary() {
            log::warn!("{summary}");
            self.notice = Some(summary);
        }
        report
    }

    pub fn dismiss_triage(&mut self) {
        if let Some(view) = self.view.as_mut() {
            view.triage.dismiss();
        }
    }
}
