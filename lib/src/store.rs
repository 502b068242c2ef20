use chrono::Utc;
use log::{debug, trace};
use rand::Rng;

use crate::{
    card::{Card, CardId, Cards},
    card_repository::CardRepository,
    error::*,
    scheduler::DEFAULT_PRIORITY,
};

const ID_SUFFIX_LEN: usize = 5;
const ID_SUFFIX_CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Owns the deck and writes it back through its repository after every
/// mutation.
#[derive(Debug)]
pub struct CardStore<R: CardRepository> {
    repository: R,
    cards: Cards,
}

impl<R: CardRepository> CardStore<R> {
    pub fn open(repository: R) -> Result<Self> {
        let cards = repository.load()?;
        debug!("opened store with {} cards", cards.len());
        Ok(Self { repository, cards })
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Returns all cards in insertion order.
    pub fn all(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Card> {
        self.cards.find(id)
    }

    pub fn active(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|card| card.is_active())
    }

    /// Appends a new card. Fails if a card with the same front (ignoring
    /// case) already exists.
    pub fn add(&mut self, front: &str, back: &str) -> Result<CardId> {
        let (front, back) = (front.trim(), back.trim());
        if front.is_empty() || back.is_empty() {
            return Err(VocardError::EmptyText);
        }
        if self.cards.iter().any(|card| card.has_front(front)) {
            return Err(VocardError::DuplicateCard(front.to_owned()));
        }

        let id = self.generate_id();
        debug!("add card {:?} with id {}", front, id);
        self.cards.push(Card::new(id.clone(), front, back));
        self.save()?;

        Ok(id)
    }

    /// Removes the card with the given id. Unknown ids are ignored.
    pub fn remove(&mut self, id: &str) -> Result<Option<Card>> {
        match self.cards.position(id) {
            None => {
                debug!("cannot remove card {}: not found", id);
                Ok(None)
            }
            Some(pos) => {
                let card = self.cards.remove(pos);
                self.save()?;
                Ok(Some(card))
            }
        }
    }

    pub fn remove_all(&mut self) -> Result<usize> {
        let count = self.cards.len();
        self.cards.clear();
        self.save()?;
        Ok(count)
    }

    /// Applies `mutator` to the card with the given id then saves. Returns
    /// the updated card, or `None` when the id is unknown.
    pub fn update<F>(&mut self, id: &str, mutator: F) -> Result<Option<Card>>
    where
        F: FnOnce(&mut Card),
    {
        let card = match self.cards.find_mut(id) {
            Some(card) => card,
            None => {
                debug!("cannot update card {}: not found", id);
                return Ok(None);
            }
        };
        mutator(card);
        let card = card.clone();
        trace!("updated card: {:?}", card);
        self.save()?;
        Ok(Some(card))
    }

    /// Applies `mutator` to every card then saves once.
    pub fn update_all<F>(&mut self, mut mutator: F) -> Result<usize>
    where
        F: FnMut(&mut Card),
    {
        self.cards.iter_mut().for_each(&mut mutator);
        self.save()?;
        Ok(self.cards.len())
    }

    pub fn reset_priority(&mut self, id: &str) -> Result<Option<Card>> {
        self.update(id, |card| card.priority = DEFAULT_PRIORITY)
    }

    pub fn reset_all_priorities(&mut self) -> Result<usize> {
        self.update_all(|card| card.priority = DEFAULT_PRIORITY)
    }

    pub fn reset_errors(&mut self, id: &str) -> Result<Option<Card>> {
        self.update(id, |card| card.error_count = 0)
    }

    pub fn reset_all_errors(&mut self) -> Result<usize> {
        self.update_all(|card| card.error_count = 0)
    }

    pub fn set_archived(&mut self, id: &str, archived: bool) -> Result<Option<Card>> {
        self.update(id, |card| card.archived = archived)
    }

    pub fn toggle_archived(&mut self, id: &str) -> Result<Option<Card>> {
        self.update(id, |card| card.archived = !card.archived)
    }

    fn save(&self) -> Result<()> {
        self.repository.save(&self.cards)
    }

    /// Builds an id from the current timestamp in milliseconds and a short
    /// random base-36 suffix.
    fn generate_id(&self) -> CardId {
        let mut rng = rand::thread_rng();
        loop {
            let suffix: String = (0..ID_SUFFIX_LEN)
                .map(|_| ID_SUFFIX_CHARSET[rng.gen_range(0..ID_SUFFIX_CHARSET.len())] as char)
                .collect();
            let id = format!("{}{}", Utc::now().timestamp_millis(), suffix);
            if self.cards.find(&id).is_none() {
                return id;
            }
        }
    }
}
