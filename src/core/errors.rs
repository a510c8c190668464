use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReaderError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to load {what}")]
    FetchFailure {
        what: String,
        #[source]
        source: Box<ReaderError>,
    },

    #[error("Failed to {what}")]
    ActionFailure {
        what: String,
        #[source]
        source: Box<ReaderError>,
    },

    #[error("Ignored: {0}")]
    Validation(String),

    #[error("Not logged in")]
    MissingCredential,

    #[error("ReaderError: {0}")]
    Custom(String),
}

impl ReaderError {
    pub fn fetch(what: impl Into<String>, source: ReaderError) -> Self {
        ReaderError::FetchFailure { what: what.into(), source: Box::new(source) }
    }

    pub fn action(what: impl Into<String>, source: ReaderError) -> Self {
        ReaderError::ActionFailure { what: what.into(), source: Box::new(source) }
    }

    /// Validation failures are never shown to the user.
    pub fn is_validation(&self) -> bool {
        matches!(self, ReaderError::Validation(_))
    }
}

impl From<std::io::Error> for ReaderError {
    fn from(error: std::io::Error) -> Self {
        ReaderError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for ReaderError {
    fn from(error: reqwest::Error) -> Self {
        ReaderError::Reqwest(Box::new(error))
    }
}

/// Outcome of a best-effort bulk operation: every item is attempted, failures
/// are collected and reported once at the end.
#[derive(Debug, Default)]
pub struct BulkReport {
    pub applied: Vec<String>,
    pub failed: Vec<(String, ReaderError)>,
}

impl BulkReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn summary(&self) -> Option<String> {
        if self.failed.is_empty() {
            return None;
        }
        let words: Vec<&str> = self.failed.iter().map(|(w, _)| w.as_str()).collect();
        Some(format!(
            "Failed to process {} of {} words: {}",
            self.failed.len(),
            self.failed.len() + self.applied.len(),
            words.join(", ")
        ))
    }
}
