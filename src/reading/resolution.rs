use super::{
    known_words::KnownWordIndex,
    selection::SelectionState,
};
use crate::core::Sentence;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    None,
    Selected,
    SentenceRevealed,
    Known,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedToken {
    pub display_text: String,
    pub is_known: bool,
    pub highlight: Highlight,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderedSentence {
    /// Whole sentence shown in the original language, no token resolution.
    Original { text: String, highlight: Highlight },
    Tokens(Vec<ResolvedToken>),
}

impl RenderedSentence {
    pub fn text(&self) -> String {
        match self {
            RenderedSentence::Original { text, .. } => text.clone(),
            RenderedSentence::Tokens(tokens) => tokens
                .iter()
                .map(|t| t.display_text.as_str())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

/// Resolves one token of the translated text. Override for the selected word
/// wins, then known-word substitution, then the raw token.
pub fn resolve_token(
    sentence_index: usize,
    word_index: usize,
    token: &str,
    selection: &SelectionState,
    index: &KnownWordIndex,
) -> ResolvedToken {
    let selected = selection.is_selected_word(sentence_index, word_index);

    let (display_text, is_known) =
        match selection.override_for(sentence_index, word_index) {
            Some(text) => (text.to_string(), false),
            None => match index.substitution(token) {
                Some(original) => (original.to_string(), true),
                None => (token.to_string(), false),
            },
        };

    let highlight = if selected {
        Highlight::Selected
    } else if selection.is_revealed_sentence(sentence_index) {
        Highlight::SentenceRevealed
    } else if is_known {
        Highlight::Known
    } else {
        Highlight::None
    };

    ResolvedToken { display_text, is_known, highlight }
}

pub fn render_sentence(
    sentence_index: usize,
    sentence: &Sentence,
    selection: &SelectionState,
    index: &KnownWordIndex,
) -> RenderedSentence {
    if selection.shows_sentence_original(sentence_index) {
        let highlight = if selection.is_revealed_sentence(sentence_index) {
            Highlight::SentenceRevealed
        } else {
            Highlight::None
        };
        return RenderedSentence::Original { text: sentence.original.clone(), highlight };
    }

    RenderedSentence::Tokens(
        sentence
            .tokens()
            .into_iter()
            .enumerate()
            .map(|(word_index, token)| {
                resolve_token(sentence_index, word_index, token, selection, index)
            })
            .collect(),
    )
}

pub fn render_page(
    sentences: &[Sentence],
    selection: &SelectionState,
    index: &KnownWordIndex,
) -> Vec<RenderedSentence> {
    sentences
        .iter()
        .enumerate()
        .map(|(i, sentence)| render_sentence(i, sentence, selection, index))
        .collect()
}
