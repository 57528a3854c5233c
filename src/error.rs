//! Error types for the flashcard core.
//!
//! Storage failures are kept apart from lookup failures so callers can tell
//! "card does not exist" from "store unavailable".

use thiserror::Error;

/// Failures raised by a [`CardStore`](crate::database::CardStore).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("card collection is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Stored application state could not be read back.
    #[error("corrupt stored state: {0}")]
    CorruptState(String),

    /// The backing store could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Failures raised while asking the generation service for new cards.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The service itself failed (network, auth, quota...).
    #[error("generation service failed: {0}")]
    Service(String),

    /// The service answered, but not with a usable card list.
    #[error("malformed generation response: {0}")]
    MalformedResponse(String),
}

/// Failures while reading or writing export files.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum FlashcardError {
    /// Recall grades live in `0..=5`.
    #[error("quality must be between 0 and 5, got {0}")]
    InvalidQuality(i64),

    /// A card needs a front or a back.
    #[error("card has neither a front nor a back")]
    BlankCard,

    #[error("card {card_id} not found for owner {owner_id}")]
    CardNotFound { owner_id: String, card_id: String },

    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl FlashcardError {
    /// Returns `true` when the error came from the store rather than the request.
    pub fn is_storage(&self) -> bool {
        matches!(self, FlashcardError::Storage(_))
    }
}

pub type Result<T> = std::result::Result<T, FlashcardError>;
