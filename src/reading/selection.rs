/// Per-page selection: nothing, one word, or a whole sentence revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Idle,
    Word {
        sentence: usize,
        word: usize,
    },
    SentenceRevealed {
        sentence: usize,
    },
}

/// What a "toggle translate" press did, or what it still needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleAction {
    /// Revealed sentence flipped between original and rendered text.
    RevealToggled { showing_original: bool },
    /// No override yet for the selected word; the caller must fetch one.
    TranslateWord { sentence: usize, word: usize },
    /// The fetched override was dropped; default resolution applies again.
    OverrideCleared,
    /// Page-wide original text switched on or off.
    PageOriginalToggled { showing_original: bool },
}

#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    selection: Selection,
    override_text: Option<String>,
    sentence_original: bool,
    page_original: bool,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Advances the click state machine. Every transition drops the fetched
    /// single-word override.
    pub fn click(&mut self, sentence: usize, word: usize) -> Selection {
        let next = match self.selection {
            Selection::SentenceRevealed { sentence: s } if s == sentence => Selection::Idle,
            Selection::Word { sentence: s, word: w } if s == sentence && w == word => {
                Selection::SentenceRevealed { sentence }
            }
            _ => Selection::Word { sentence, word },
        };

        log::debug!("Selection {:?} -> {:?}", self.selection, next);
        self.override_text = None;
        self.sentence_original = matches!(next, Selection::SentenceRevealed { .. });
        self.selection = next;
        next
    }

    pub fn toggle(&mut self) -> ToggleAction {
        match self.selection {
            Selection::SentenceRevealed { .. } => {
                self.sentence_original = !self.sentence_original;
                ToggleAction::RevealToggled { showing_original: self.sentence_original }
            }
            Selection::Word { sentence, word } => {
                if self.override_text.take().is_some() {
                    ToggleAction::OverrideCleared
                } else {
                    ToggleAction::TranslateWord { sentence, word }
                }
            }
            Selection::Idle => {
                self.page_original = !self.page_original;
                ToggleAction::PageOriginalToggled { showing_original: self.page_original }
            }
        }
    }

    /// Stores a fetched translation, but only if the same word is still
    /// selected. Returns whether it was applied.
    pub fn apply_override(&mut self, sentence: usize, word: usize, text: String) -> bool {
        if self.selection != (Selection::Word { sentence, word }) {
            log::debug!("Dropping override for ({sentence}, {word}): selection moved");
            return false;
        }
        self.override_text = Some(text);
        true
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_selected_word(&self, sentence: usize, word: usize) -> bool {
        self.selection == Selection::Word { sentence, word }
    }

    pub fn is_revealed_sentence(&self, sentence: usize) -> bool {
        self.selection == Selection::SentenceRevealed { sentence }
    }

    /// True when this sentence should render as its original text block.
    pub fn shows_sentence_original(&self, sentence: usize) -> bool {
        self.page_original || (self.sentence_original && self.is_revealed_sentence(sentence))
    }

    pub fn page_original(&self) -> bool {
        self.page_original
    }

    pub fn override_for(&self, sentence: usize, word: usize) -> Option<&str> {
        if self.is_selected_word(sentence, word) {
            self.override_text.as_deref()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_cycle() {
        let mut state = SelectionState::new();
        assert_eq!(state.selection(), Selection::Idle);

        assert_eq!(state.click(0, 1), Selection::Word { sentence: 0, word: 1 });
        assert_eq!(state.click(0, 1), Selection::SentenceRevealed { sentence: 0 });
        assert!(state.shows_sentence_original(0));
        assert!(!state.shows_sentence_original(1));
        assert_eq!(state.click(0, 1), Selection::Idle);
        assert!(!state.shows_sentence_original(0));
    }

    #[test]
    fn test_click_other_words() {
        let mut state = SelectionState::new();
        state.click(0, 1);
        assert_eq!(state.click(0, 2), Selection::Word { sentence: 0, word: 2 });
        assert_eq!(state.click(3, 2), Selection::Word { sentence: 3, word: 2 });

        // Any word of a revealed sentence collapses it.
        state.click(3, 2);
        assert_eq!(state.click(3, 0), Selection::Idle);

        // A click in another sentence selects there instead.
        state.click(1, 0);
        state.click(1, 0);
        assert_eq!(state.click(2, 4), Selection::Word { sentence: 2, word: 4 });
    }

    #[test]
    fn test_toggle_on_word_requests_then_clears_override() {
        let mut state = SelectionState::new();
        state.click(0, 1);

        assert_eq!(state.toggle(), ToggleAction::TranslateWord { sentence: 0, word: 1 });
        assert!(state.apply_override(0, 1, "chat".to_string()));
        assert_eq!(state.override_for(0, 1), Some("chat"));
        assert_eq!(state.override_for(0, 2), None);

        assert_eq!(state.toggle(), ToggleAction::OverrideCleared);
        assert_eq!(state.override_for(0, 1), None);
    }

    #[test]
    fn test_any_transition_clears_override() {
        let mut state = SelectionState::new();
        state.click(0, 1);
        state.apply_override(0, 1, "chat".to_string());
        state.click(0, 2);
        state.click(0, 1);
        assert_eq!(state.override_for(0, 1), None);
    }

    #[test]
    fn test_late_override_dropped_after_selection_moves() {
        let mut state = SelectionState::new();
        state.click(0, 1);
        let ToggleAction::TranslateWord { sentence, word } = state.toggle() else {
            panic!("expected a translate request");
        };
        state.click(2, 0);
        assert!(!state.apply_override(sentence, word, "chat".to_string()));
        assert_eq!(state.override_for(2, 0), None);
    }

    #[test]
    fn test_toggle_in_revealed_sentence_keeps_state() {
        let mut state = SelectionState::new();
        state.click(1, 0);
        state.click(1, 0);

        assert_eq!(state.toggle(), ToggleAction::RevealToggled { showing_original: false });
        assert!(!state.shows_sentence_original(1));
        assert_eq!(state.selection(), Selection::SentenceRevealed { sentence: 1 });

        assert_eq!(state.toggle(), ToggleAction::RevealToggled { showing_original: true });
        assert!(state.shows_sentence_original(1));
    }

    #[test]
    fn test_toggle_when_idle_flips_page_original() {
        let mut state = SelectionState::new();
        assert_eq!(state.toggle(), ToggleAction::PageOriginalToggled { showing_original: true });
        assert!(state.shows_sentence_original(0));
        assert!(state.shows_sentence_original(7));

        state.reset();
        assert!(!state.page_original());
        assert_eq!(state.selection(), Selection::Idle);
    }
}
