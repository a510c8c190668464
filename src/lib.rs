pub mod api;
pub mod core;
pub mod persistence;
pub mod reading;
pub mod settings;
pub mod vocabulary;

pub use api::{
    ApiClient,
    BookService,
    WordService,
};
pub use crate::core::ReaderError;
pub use reading::ReadingSession;
pub use settings::Settings;
pub use vocabulary::Vocabulary;
