//! In-process card store.
use super::CardStore;
use crate::error::StoreError;
use crate::models::Flashcard;
use std::cell::RefCell;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct MemoryCardStore {
    collections: RefCell<HashMap<String, Vec<Flashcard>>>,
}

impl MemoryCardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owners(&self) -> Vec<String> {
        let mut owners: Vec<_> = self.collections.borrow().keys().cloned().collect();
        owners.sort();
        owners
    }
}

impl CardStore for MemoryCardStore {
    fn load_cards(&self, owner_id: &str) -> Result<Vec<Flashcard>, StoreError> {
        Ok(self
            .collections
            .borrow()
            .get(owner_id)
            .cloned()
            .unwrap_or_default())
    }

    fn save_cards(&self, owner_id: &str, cards: &[Flashcard]) -> Result<(), StoreError> {
        self.collections
            .borrow_mut()
            .insert(owner_id.to_string(), cards.to_vec());
        Ok(())
    }
}
