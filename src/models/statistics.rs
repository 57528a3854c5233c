//! Summary counts over an owner's card collection.
use super::{Flashcard, due::count_due};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CardStatistics {
    pub total_cards: usize,
    pub mastered: usize,
    pub due_for_review: usize,
    /// Cards that are neither mastered nor currently due.
    pub in_progress: usize,
    pub mastery_percentage: f64,
}

impl CardStatistics {
    pub fn from_cards(cards: &[Flashcard], now: DateTime<Utc>) -> Self {
        let total_cards = cards.len();
        let mastered = cards.iter().filter(|c| c.mastered).count();
        let due_for_review = count_due(cards, now);

        let mastery_percentage = if total_cards > 0 {
            mastered as f64 / total_cards as f64 * 100.0
        } else {
            0.0
        };

        Self {
            total_cards,
            mastered,
            due_for_review,
            in_progress: total_cards.saturating_sub(mastered + due_for_review),
            mastery_percentage,
        }
    }
}
