//! SM-2 (SuperMemo 2) spaced repetition algorithm implementation.
//!
//! The SM-2 algorithm calculates optimal review intervals based on recall quality:
//! - Each card has an easiness factor (EF) that adjusts based on performance
//! - Quality grades 0-2: Reset interval to 1 day and repetitions to 0
//! - Quality grades 3-5: Increase interval progressively (1 day → 6 days → EF multiplier)
//! - EF is adjusted after each review and has a minimum value of 1.3
//! - A card counts as mastered once it has 5+ consecutive successes and a 30+ day interval

use super::{Flashcard, Quality};
use chrono::{DateTime, Duration, Utc};

/// E-Factor never falls below this value.
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Intervals stop growing at roughly a century.
pub const MAX_INTERVAL_DAYS: u32 = 36_500;

pub const MASTERY_REPETITIONS: u32 = 5;
pub const MASTERY_INTERVAL_DAYS: u32 = 30;

/// Returns the updated E-Factor for a review of the given quality.
pub fn next_ease_factor(ease_factor: f64, quality: Quality) -> f64 {
    let miss = f64::from(Quality::MAX - quality.value());
    (ease_factor + (0.1 - miss * (0.08 + miss * 0.02))).max(MIN_EASE_FACTOR)
}

/// Returns `(interval_days, repetitions)` after a review.
///
/// `ease_factor` must already be the updated value.
pub fn next_interval(
    interval_days: u32,
    repetitions: u32,
    ease_factor: f64,
    quality: Quality,
) -> (u32, u32) {
    if !quality.is_passing() {
        // Failed recall restarts the learning cycle
        return (1, 0);
    }

    let interval = match repetitions {
        0 => 1,
        1 => 6,
        _ => ((f64::from(interval_days) * ease_factor).floor() as u32).clamp(1, MAX_INTERVAL_DAYS),
    };
    (interval, repetitions + 1)
}

pub fn is_mastered(repetitions: u32, interval_days: u32) -> bool {
    repetitions >= MASTERY_REPETITIONS && interval_days >= MASTERY_INTERVAL_DAYS
}

/// Applies one review to the card in place.
pub fn apply_review(card: &mut Flashcard, quality: Quality, now: DateTime<Utc>) {
    let previous_interval = card.interval_days;

    let ease_factor = next_ease_factor(card.ease_factor, quality);
    let (interval_days, repetitions) =
        next_interval(card.interval_days, card.repetitions, ease_factor, quality);

    card.ease_factor = ease_factor;
    card.interval_days = interval_days;
    card.repetitions = repetitions;
    card.last_reviewed = Some(now);
    card.next_review = Some(
        now.checked_add_signed(Duration::days(i64::from(interval_days)))
            .unwrap_or(DateTime::<Utc>::MAX_UTC),
    );
    card.mastered = is_mastered(repetitions, interval_days);

    tracing::debug!(
        card_id = %card.id,
        quality = quality.value(),
        previous_interval,
        interval_days,
        repetitions,
        ease_factor,
        mastered = card.mastered,
        "card reviewed"
    );
}

/// Calculates the card state after a review without touching the input.
pub fn review(card: &Flashcard, quality: Quality, now: DateTime<Utc>) -> Flashcard {
    let mut next = card.clone();
    apply_review(&mut next, quality, now);
    next
}

/// Interval each grade 0..=5 would produce, indexed by grade.
pub fn preview_intervals(card: &Flashcard) -> [u32; 6] {
    let mut intervals = [0; 6];
    for quality in Quality::all() {
        let ease_factor = next_ease_factor(card.ease_factor, quality);
        let (interval, _) = next_interval(card.interval_days, card.repetitions, ease_factor, quality);
        intervals[usize::from(quality.value())] = interval;
    }
    intervals
}
