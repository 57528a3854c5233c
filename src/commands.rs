//! Subcommand implementations.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use tutor_flashcards::config::{ClockMode, TutorConfig, load_config_from};
use tutor_flashcards::database::db;
use tutor_flashcards::export::json::{export_cards_to_path, import_drafts};
use tutor_flashcards::models::sm2::preview_intervals;
use tutor_flashcards::{
    CardDraft, Clock, FixedClock, Flashcard, FlashcardService, Quality, SqliteCardStore,
    SystemClock,
};

use crate::{Cli, Commands};

type Service = FlashcardService<SqliteCardStore, FixedClock>;

pub fn execute(cli: Cli) -> Result<()> {
    let mut config = load_config_from(cli.config.as_deref())?;
    if let Some(database) = cli.database {
        config.database_path = database;
    }
    let owner = cli.owner.unwrap_or_else(|| config.default_owner.clone());

    let store = SqliteCardStore::open(&config.database_path).with_context(|| {
        format!("failed to open database: {}", config.database_path.display())
    })?;

    let now = current_time(&config, &store)?;
    let service = FlashcardService::new(store, FixedClock::new(now));

    match cli.command {
        Commands::Add {
            front,
            back,
            topic,
            subtopic,
        } => {
            let draft = CardDraft {
                front,
                back,
                topic,
                subtopic,
            };
            let card = service.add_card(&owner, draft)?;
            println!("Added card {}", card.id);
        }
        Commands::List => list(&service, &owner)?,
        Commands::Due { limit } => due(&service, &owner, limit.unwrap_or(config.due_limit))?,
        Commands::Review { card_id, quality } => review(&service, &owner, &card_id, quality)?,
        Commands::Preview { card_id } => {
            let card = service.card(&owner, &card_id)?;
            for (grade, days) in preview_intervals(&card).iter().enumerate() {
                println!("{grade}: {days} day(s)");
            }
        }
        Commands::Stats { json } => {
            let stats = service.statistics(&owner)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Total cards:    {}", stats.total_cards);
                println!("Mastered:       {}", stats.mastered);
                println!("Due for review: {}", stats.due_for_review);
                println!("In progress:    {}", stats.in_progress);
                println!("Mastery:        {:.1}%", stats.mastery_percentage);
            }
        }
        Commands::Import { file } => {
            let drafts = import_drafts(&file)
                .with_context(|| format!("failed to import {}", file.display()))?;
            let added = service.add_cards(&owner, drafts)?;
            println!("Imported {} cards", added.len());
        }
        Commands::Export { file } => {
            let cards = service.cards(&owner)?;
            export_cards_to_path(&owner, &cards, service.clock().now(), &file)
                .with_context(|| format!("failed to export to {}", file.display()))?;
            println!("Exported {} cards to {}", cards.len(), file.display());
        }
        Commands::AdvanceDay => {
            let date = db::advance_day(service.store().connection())?;
            if config.clock != ClockMode::Simulated {
                tracing::warn!("advance-day only affects reviews when clock = \"simulated\"");
            }
            println!("Current date: {}", format_date(date));
        }
        Commands::Owners => {
            for owner in db::list_owners(service.store().connection())? {
                println!("{owner}");
            }
        }
    }

    Ok(())
}

fn current_time(config: &TutorConfig, store: &SqliteCardStore) -> Result<DateTime<Utc>> {
    Ok(match config.clock {
        ClockMode::System => SystemClock.now(),
        ClockMode::Simulated => db::get_current_date(store.connection())?,
    })
}

fn list(service: &Service, owner: &str) -> Result<()> {
    let cards = service.cards(owner)?;
    if cards.is_empty() {
        println!("No cards for {owner}.");
        return Ok(());
    }
    for card in &cards {
        println!(
            "{}  {}  [reps {}, every {}d, next {}{}]",
            card.id,
            card.front,
            card.repetitions,
            card.interval_days,
            next_review_label(card),
            if card.mastered { ", mastered" } else { "" }
        );
    }
    Ok(())
}

fn due(service: &Service, owner: &str, limit: usize) -> Result<()> {
    let cards = service.due_cards(owner, limit)?;
    if cards.is_empty() {
        println!("No cards due.");
        return Ok(());
    }
    for card in &cards {
        println!("{}  {}", card.id, card.front);
    }
    Ok(())
}

fn review(service: &Service, owner: &str, card_id: &str, quality: i64) -> Result<()> {
    let quality = Quality::try_from(quality)?;
    let card = service.review(owner, card_id, quality)?;

    println!("{}", card.back);
    println!(
        "Next review in {} day(s) ({})",
        card.interval_days,
        next_review_label(&card)
    );
    if card.mastered {
        println!("Mastered!");
    }
    Ok(())
}

fn next_review_label(card: &Flashcard) -> String {
    card.next_review
        .map(format_date)
        .unwrap_or_else(|| "now".to_string())
}

/// Formats a timestamp as YYYY-MM-DD
fn format_date(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}
