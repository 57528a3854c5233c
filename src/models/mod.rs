pub mod due;
pub mod flashcard;
pub mod quality;
pub mod sm2;
pub mod statistics;

pub use flashcard::{CardDraft, Flashcard};
pub use quality::Quality;
pub use statistics::CardStatistics;
