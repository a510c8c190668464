pub mod errors;
pub mod http;
pub mod models;
pub mod sequence;

pub use errors::{
    BulkReport,
    ReaderError,
};
pub use models::{
    Book,
    CandidateWord,
    KnownWord,
    LanguagePair,
    PageContent,
    Sentence,
};
pub use sequence::{
    RequestSequence,
    RequestTicket,
};
