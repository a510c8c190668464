pub mod known_words;
pub mod navigation;
pub mod resolution;
pub mod selection;
pub mod session;
pub mod triage;

pub use known_words::KnownWordIndex;
pub use navigation::PageNavigator;
pub use resolution::{
    Highlight,
    RenderedSentence,
    ResolvedToken,
};
pub use selection::{
    Selection,
    SelectionState,
    ToggleAction,
};
pub use session::{
    PageView,
    ReadingSession,
};
pub use triage::{
    TriageDecision,
    TriageFlow,
};
