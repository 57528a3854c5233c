//! Selection of cards due for review.
use super::Flashcard;
use chrono::{DateTime, Utc};

/// Returns up to `limit` unmastered cards whose review time has passed.
///
/// Cards keep their collection order; there is no ranking by urgency.
/// A card without a readable `next_review` is always due.
pub fn due_cards(cards: &[Flashcard], limit: usize, now: DateTime<Utc>) -> Vec<Flashcard> {
    cards
        .iter()
        .filter(|card| card.is_due(now))
        .take(limit)
        .cloned()
        .collect()
}

pub fn count_due(cards: &[Flashcard], now: DateTime<Utc>) -> usize {
    cards.iter().filter(|card| card.is_due(now)).count()
}
