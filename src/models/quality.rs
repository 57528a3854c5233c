//! Recall quality grade used by the SM-2 scheduler.
//!
//! - 0: complete blackout
//! - 1: incorrect, answer recognised once shown
//! - 2: incorrect, answer felt easy once shown
//! - 3: correct with serious difficulty
//! - 4: correct after hesitation
//! - 5: perfect recall
use crate::error::FlashcardError;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quality(u8);

impl Quality {
    pub const MAX: u8 = 5;
    /// Lowest grade that counts as a successful recall.
    pub const PASSING: u8 = 3;

    pub fn new(grade: u8) -> Result<Self, FlashcardError> {
        if grade > Self::MAX {
            return Err(FlashcardError::InvalidQuality(i64::from(grade)));
        }
        Ok(Self(grade))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_passing(self) -> bool {
        self.0 >= Self::PASSING
    }

    /// Every valid grade, lowest first.
    pub fn all() -> impl Iterator<Item = Quality> {
        (0..=Self::MAX).map(Quality)
    }
}

impl TryFrom<i64> for Quality {
    type Error = FlashcardError;

    fn try_from(grade: i64) -> Result<Self, Self::Error> {
        u8::try_from(grade)
            .ok()
            .filter(|g| *g <= Self::MAX)
            .map(Quality)
            .ok_or(FlashcardError::InvalidQuality(grade))
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
