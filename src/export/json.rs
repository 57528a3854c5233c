//! JSON import/export module for card collections.
//! Saves an owner's cards to a file and loads card drafts or whole exports back.

use crate::error::ExportError;
use crate::models::{CardDraft, Flashcard};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Snapshot of one owner's collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardExport {
    pub owner_id: String,
    pub exported_at: DateTime<Utc>,
    pub cards: Vec<Flashcard>,
}

/// Exports an owner's cards to a JSON file at the specified path.
/// Returns an error if file creation or writing fails.
pub fn export_cards_to_path(
    owner_id: &str,
    cards: &[Flashcard],
    exported_at: DateTime<Utc>,
    path: &Path,
) -> Result<(), ExportError> {
    let export = CardExport {
        owner_id: owner_id.to_string(),
        exported_at,
        cards: cards.to_vec(),
    };
    let json_string = serde_json::to_string_pretty(&export)?;
    let mut file = File::create(path)?;
    file.write_all(json_string.as_bytes())?;

    tracing::info!(owner_id, cards = cards.len(), path = %path.display(), "exported cards");
    Ok(())
}

/// Imports a full export written by [`export_cards_to_path`].
pub fn import_export(path: &Path) -> Result<CardExport, ExportError> {
    let contents = read_file(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Imports a JSON array of `{front, back, topic, subtopic}` drafts.
/// Returns an error if the file doesn't exist or contains invalid JSON.
pub fn import_drafts(path: &Path) -> Result<Vec<CardDraft>, ExportError> {
    let contents = read_file(path)?;

    let drafts: Vec<CardDraft> = serde_json::from_str(&contents)?;

    tracing::info!(drafts = drafts.len(), path = %path.display(), "read card drafts");
    Ok(drafts)
}

fn read_file(path: &Path) -> Result<String, ExportError> {
    let mut file = File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn create_test_cards() -> Vec<Flashcard> {
        let now = Utc::now();
        vec![
            Flashcard::new("hello", "cześć", now),
            Flashcard::new("goodbye", "do widzenia", now),
        ]
    }

    #[test]
    fn test_export_cards_to_path() {
        let dir = tempfile::tempdir().unwrap();
        let test_file = dir.path().join("export.json");

        let result = export_cards_to_path("alice", &create_test_cards(), Utc::now(), &test_file);
        assert!(result.is_ok());

        assert!(fs::metadata(&test_file).is_ok(), "File should exist");
    }

    #[test]
    fn test_import_drafts() {
        let json_content = r#"[
  {
    "front": "test front",
    "back": "test back",
    "topic": "Testing"
  }
]"#;

        let dir = tempfile::tempdir().unwrap();
        let test_file = dir.path().join("drafts.json");
        fs::write(&test_file, json_content).unwrap();

        let drafts = import_drafts(&test_file).unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].front, "test front");
        assert_eq!(drafts[0].back, "test back");
        assert_eq!(drafts[0].topic.as_deref(), Some("Testing"));
        assert!(drafts[0].subtopic.is_none());
    }

    #[test]
    fn test_export_keeps_schedule() {
        let mut cards = create_test_cards();
        cards[0].repetitions = 3;
        cards[0].interval_days = 16;
        cards[0].ease_factor = 2.8;

        let dir = tempfile::tempdir().unwrap();
        let test_file = dir.path().join("roundtrip.json");
        let exported_at = Utc::now();

        export_cards_to_path("alice", &cards, exported_at, &test_file).unwrap();
        let imported = import_export(&test_file).unwrap();

        assert_eq!(imported.owner_id, "alice");
        assert_eq!(imported.exported_at, exported_at);
        assert_eq!(imported.cards, cards);
    }

    #[test]
    fn test_import_nonexistent_file() {
        let result = import_drafts(Path::new("nonexistent_file_xyz123.json"));
        assert!(matches!(result, Err(ExportError::Io(_))));
    }

    #[test]
    fn test_import_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let test_file = dir.path().join("invalid.json");
        fs::write(&test_file, "{ this is not valid json }").unwrap();

        let result = import_drafts(&test_file);
        assert!(matches!(result, Err(ExportError::Json(_))));
    }
}
