//! Persistence for card collections.
//!
//! A store maps an owner id to that owner's whole card collection. Every
//! change is a read-modify-write of the full collection.

pub mod db;
pub mod memory;

use crate::error::StoreError;
use crate::models::Flashcard;

pub use db::SqliteCardStore;
pub use memory::MemoryCardStore;

pub trait CardStore {
    /// Loads an owner's cards. An unknown owner has an empty collection.
    fn load_cards(&self, owner_id: &str) -> Result<Vec<Flashcard>, StoreError>;

    /// Replaces an owner's collection.
    fn save_cards(&self, owner_id: &str, cards: &[Flashcard]) -> Result<(), StoreError>;
}

impl<S: CardStore + ?Sized> CardStore for &S {
    fn load_cards(&self, owner_id: &str) -> Result<Vec<Flashcard>, StoreError> {
        (**self).load_cards(owner_id)
    }

    fn save_cards(&self, owner_id: &str, cards: &[Flashcard]) -> Result<(), StoreError> {
        (**self).save_cards(owner_id, cards)
    }
}
