pub mod clock;
pub mod config;
pub mod database;
pub mod error;
pub mod export;
pub mod generation;
pub mod models;
pub mod service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use database::{CardStore, MemoryCardStore, SqliteCardStore};
pub use error::{FlashcardError, Result, StoreError};
pub use models::{CardDraft, CardStatistics, Flashcard, Quality};
pub use service::FlashcardService;
