//! Review and due-card operations for an owner's flashcards.
//!
//! Every operation loads the owner's collection from the injected store,
//! works on it in memory and writes the whole collection back.

use crate::clock::Clock;
use crate::database::CardStore;
use crate::error::{FlashcardError, Result};
use crate::generation::{CardGenerator, GenerationRequest, parse_generated_cards};
use crate::models::{CardDraft, CardStatistics, Flashcard, Quality, due, sm2};

pub struct FlashcardService<S, C> {
    store: S,
    clock: C,
}

impl<S: CardStore, C: Clock> FlashcardService<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// All of an owner's cards in collection order.
    pub fn cards(&self, owner_id: &str) -> Result<Vec<Flashcard>> {
        Ok(self.store.load_cards(owner_id)?)
    }

    pub fn card(&self, owner_id: &str, card_id: &str) -> Result<Flashcard> {
        self.cards(owner_id)?
            .into_iter()
            .find(|card| card.id == card_id)
            .ok_or_else(|| not_found(owner_id, card_id))
    }

    /// Grades a card and persists the rescheduled collection.
    ///
    /// Unknown cards are reported as [`FlashcardError::CardNotFound`] and
    /// leave the store untouched.
    pub fn review(&self, owner_id: &str, card_id: &str, quality: Quality) -> Result<Flashcard> {
        let mut cards = self.store.load_cards(owner_id)?;

        let Some(card) = cards.iter_mut().find(|card| card.id == card_id) else {
            tracing::warn!(owner_id, card_id, "review of unknown card");
            return Err(not_found(owner_id, card_id));
        };

        sm2::apply_review(card, quality, self.clock.now());
        let updated = card.clone();

        self.store.save_cards(owner_id, &cards)?;
        Ok(updated)
    }

    /// Cards due for review now, at most `limit` of them.
    pub fn due_cards(&self, owner_id: &str, limit: usize) -> Result<Vec<Flashcard>> {
        let cards = self.store.load_cards(owner_id)?;
        Ok(due::due_cards(&cards, limit, self.clock.now()))
    }

    pub fn statistics(&self, owner_id: &str) -> Result<CardStatistics> {
        let cards = self.store.load_cards(owner_id)?;
        Ok(CardStatistics::from_cards(&cards, self.clock.now()))
    }

    pub fn add_card(&self, owner_id: &str, draft: CardDraft) -> Result<Flashcard> {
        if draft.is_blank() {
            return Err(FlashcardError::BlankCard);
        }
        self.add_cards(owner_id, vec![draft])?
            .into_iter()
            .next()
            .ok_or(FlashcardError::BlankCard)
    }

    /// Appends new cards, all due immediately. Blank drafts are skipped.
    pub fn add_cards(&self, owner_id: &str, drafts: Vec<CardDraft>) -> Result<Vec<Flashcard>> {
        let now = self.clock.now();
        let new_cards: Vec<Flashcard> = drafts
            .into_iter()
            .filter(|draft| !draft.is_blank())
            .map(|draft| Flashcard::from_draft(draft, now))
            .collect();

        if new_cards.is_empty() {
            return Ok(new_cards);
        }

        let mut cards = self.store.load_cards(owner_id)?;
        cards.extend(new_cards.iter().cloned());
        self.store.save_cards(owner_id, &cards)?;

        tracing::info!(owner_id, added = new_cards.len(), "added flashcards");
        Ok(new_cards)
    }

    /// Asks `generator` for cards on a topic and stores them.
    pub fn generate_cards<G: CardGenerator + ?Sized>(
        &self,
        owner_id: &str,
        generator: &G,
        request: &GenerationRequest,
    ) -> Result<Vec<Flashcard>> {
        let response = generator.generate(request)?;
        let drafts = parse_generated_cards(&response, request)?;
        tracing::debug!(
            topic = %request.topic,
            requested = request.count,
            received = drafts.len(),
            "generation response parsed"
        );
        self.add_cards(owner_id, drafts)
    }
}

fn not_found(owner_id: &str, card_id: &str) -> FlashcardError {
    FlashcardError::CardNotFound {
        owner_id: owner_id.to_string(),
        card_id: card_id.to_string(),
    }
}
