use std::cell::{Cell, RefCell};

use crate::{card::Cards, card_repository::CardRepository, error::*};

/// Keeps the deck in memory and counts how many times it was saved.
#[derive(Debug, Default)]
pub struct MemoryCardRepository {
    cards: RefCell<Cards>,
    saves: Cell<usize>,
}

impl MemoryCardRepository {
    pub fn new<C: Into<Cards>>(cards: C) -> Self {
        Self {
            cards: RefCell::new(cards.into()),
            saves: Cell::new(0),
        }
    }

    /// Returns the last saved deck (or the initial one).
    pub fn cards(&self) -> Cards {
        self.cards.borrow().clone()
    }

    pub fn saves(&self) -> usize {
        self.saves.get()
    }
}

impl CardRepository for MemoryCardRepository {
    fn load(&self) -> Result<Cards> {
        Ok(self.cards.borrow().clone())
    }

    fn save(&self, cards: &Cards) -> Result<()> {
        *self.cards.borrow_mut() = cards.clone();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
