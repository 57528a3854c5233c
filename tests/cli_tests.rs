//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn flashcards(db: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("flashcards").unwrap();
    cmd.env_remove("FLASHCARDS_DB")
        .env_remove("FLASHCARDS_OWNER")
        .arg("--database")
        .arg(db);
    cmd
}

fn add_card(db: &Path, front: &str, back: &str) -> String {
    let output = flashcards(db)
        .args(["add", "--front", front, "--back", back])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    stdout
        .trim()
        .strip_prefix("Added card ")
        .expect("add prints the new card id")
        .to_string()
}

#[test]
fn review_cycle() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("cards.sqlite3");
    let id = add_card(&db, "cześć", "hello");

    flashcards(&db)
        .arg("due")
        .assert()
        .success()
        .stdout(predicate::str::contains("cześć"));

    flashcards(&db)
        .args(["review", &id, "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hello"))
        .stdout(predicate::str::contains("Next review in 1 day(s)"));

    flashcards(&db)
        .arg("due")
        .assert()
        .success()
        .stdout(predicate::str::contains("No cards due."));
}

#[test]
fn review_rejects_out_of_range_quality() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("cards.sqlite3");
    let id = add_card(&db, "front", "back");

    flashcards(&db)
        .args(["review", &id, "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("quality must be between 0 and 5, got 7"));

    flashcards(&db)
        .args(["review", &id, "-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("got -1"));
}

#[test]
fn review_unknown_card_fails() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("cards.sqlite3");

    flashcards(&db)
        .args(["review", "does-not-exist", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("card does-not-exist not found"));
}

#[test]
fn blank_cards_are_rejected() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("cards.sqlite3");

    flashcards(&db)
        .args(["add", "--front", " ", "--back", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("card has neither a front nor a back"));

    let drafts = dir.path().join("drafts.json");
    std::fs::write(
        &drafts,
        r#"[{"front": "", "back": ""}, {"front": "kot", "back": "cat"}]"#,
    )
    .unwrap();

    flashcards(&db)
        .arg("import")
        .arg(&drafts)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 cards"));
}

#[test]
fn owners_are_separate() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("cards.sqlite3");

    flashcards(&db)
        .args(["--owner", "alice", "add", "--front", "a", "--back", "b"])
        .assert()
        .success();

    flashcards(&db)
        .args(["--owner", "bob", "due"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No cards due."));

    flashcards(&db)
        .arg("owners")
        .assert()
        .success()
        .stdout(predicate::str::contains("alice"));
}

#[test]
fn import_stats_and_export() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("cards.sqlite3");
    let drafts = dir.path().join("drafts.json");
    std::fs::write(
        &drafts,
        r#"[{"front": "H2O", "back": "Water", "topic": "Chemistry"},
            {"front": "NaCl", "back": "Salt"}]"#,
    )
    .unwrap();

    flashcards(&db)
        .arg("import")
        .arg(&drafts)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 cards"));

    flashcards(&db)
        .args(["stats", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_cards\": 2"))
        .stdout(predicate::str::contains("\"due_for_review\": 2"));

    let export = dir.path().join("export.json");
    flashcards(&db)
        .arg("export")
        .arg(&export)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 cards"));

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&export).unwrap()).unwrap();
    assert_eq!(written["owner_id"], "default");
    assert_eq!(written["cards"].as_array().unwrap().len(), 2);
    assert_eq!(written["cards"][0]["topic"], "Chemistry");
}

#[test]
fn simulated_clock_advances_with_advance_day() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("cards.sqlite3");
    let config = dir.path().join("flashcards.toml");
    std::fs::write(&config, "clock = \"simulated\"\n").unwrap();

    let id = add_card(&db, "front", "back");

    flashcards(&db)
        .arg("--config")
        .arg(&config)
        .args(["review", &id, "4"])
        .assert()
        .success();

    flashcards(&db)
        .arg("--config")
        .arg(&config)
        .arg("due")
        .assert()
        .success()
        .stdout(predicate::str::contains("No cards due."));

    flashcards(&db).arg("advance-day").assert().success();

    flashcards(&db)
        .arg("--config")
        .arg(&config)
        .arg("due")
        .assert()
        .success()
        .stdout(predicate::str::contains(id.as_str()));
}

#[test]
fn missing_config_file_fails() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("cards.sqlite3");

    flashcards(&db)
        .args(["--config", "/nonexistent/flashcards.toml", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}
