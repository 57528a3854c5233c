//! Flashcard is a pair <front, back> plus its spaced repetition state.
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Starting ease factor for a fresh card.
pub const INITIAL_EASE_FACTOR: f64 = 2.5;
/// Starting interval, in days, for a fresh card.
pub const INITIAL_INTERVAL_DAYS: u32 = 1;

pub const DEFAULT_TOPIC: &str = "General";

/// Naive layouts accepted for stored timestamps, read as UTC.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: String,
    pub front: String,
    pub back: String,
    #[serde(default = "default_topic")]
    pub topic: String,
    #[serde(default = "default_topic")]
    pub subtopic: String,
    #[serde(default = "Utc::now", deserialize_with = "lenient_created_at")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "default_ease_factor")]
    pub ease_factor: f64,
    #[serde(default = "default_interval_days")]
    pub interval_days: u32,
    #[serde(default)]
    pub repetitions: u32,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub last_reviewed: Option<DateTime<Utc>>,
    /// `None` means the card is due right away.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub next_review: Option<DateTime<Utc>>,
    #[serde(default)]
    pub mastered: bool,
}

/// Content for a card that has not been scheduled yet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDraft {
    #[serde(default)]
    pub front: String,
    #[serde(default)]
    pub back: String,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub subtopic: Option<String>,
}

impl CardDraft {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
            topic: None,
            subtopic: None,
        }
    }

    pub fn with_topic(mut self, topic: impl Into<String>, subtopic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self.subtopic = Some(subtopic.into());
        self
    }

    pub fn is_blank(&self) -> bool {
        self.front.trim().is_empty() && self.back.trim().is_empty()
    }
}

impl Flashcard {
    /// Creates a new card that is due immediately.
    pub fn new(front: impl Into<String>, back: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            front: front.into(),
            back: back.into(),
            topic: default_topic(),
            subtopic: default_topic(),
            created_at: now,
            ease_factor: INITIAL_EASE_FACTOR,
            interval_days: INITIAL_INTERVAL_DAYS,
            repetitions: 0,
            last_reviewed: None,
            next_review: Some(now),
            mastered: false,
        }
    }

    pub fn from_draft(draft: CardDraft, now: DateTime<Utc>) -> Self {
        let mut card = Self::new(draft.front, draft.back, now);
        if let Some(topic) = draft.topic.filter(|t| !t.trim().is_empty()) {
            card.topic = topic;
        }
        if let Some(subtopic) = draft.subtopic.filter(|s| !s.trim().is_empty()) {
            card.subtopic = subtopic;
        }
        card
    }

    /// True when the card is unmastered and its review time has come.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        !self.mastered && self.next_review.is_none_or(|at| at <= now)
    }
}

fn default_topic() -> String {
    DEFAULT_TOPIC.to_string()
}

fn default_ease_factor() -> f64 {
    INITIAL_EASE_FACTOR
}

fn default_interval_days() -> u32 {
    INITIAL_INTERVAL_DAYS
}

/// Parses a stored timestamp, accepting RFC 3339 and naive date-times.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

/// Anything that is not a readable timestamp string becomes `None`.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(raw)) => {
            let parsed = parse_timestamp(&raw);
            if parsed.is_none() {
                tracing::warn!(value = %raw, "unreadable card timestamp, treating as unset");
            }
            parsed
        }
        Some(serde_json::Value::Null) | None => None,
        Some(other) => {
            tracing::warn!(value = %other, "non-string card timestamp, treating as unset");
            None
        }
    })
}

/// Like [`lenient_timestamp`], with the read time standing in for unreadable values.
fn lenient_created_at<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_timestamp(deserializer)?.unwrap_or_else(Utc::now))
}
