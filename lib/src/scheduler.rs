//! Review scheduler module.
//!
//! This module picks the next card to review with a weighted random draw
//! and adjusts card priorities from the learner's verdicts.

use log::{debug, trace};
use rand::{rngs::ThreadRng, Rng};

use crate::{
    card::{Card, CardId},
    card_repository::CardRepository,
    error::*,
    store::CardStore,
};

/// Priority of a new (or reset) card.
pub const DEFAULT_PRIORITY: u32 = 20;
/// Lowest priority a card can reach.
pub const PRIORITY_FLOOR: u32 = 2;
/// Highest priority a card can reach.
pub const PRIORITY_CAP: u32 = 100;
/// Cards at or below this priority are considered mastered.
pub const MASTERED_THRESHOLD: u32 = 5;
/// Decrease applied to a known card above the mastered band.
pub const PRIORITY_STEP_DOWN: u32 = 1;
/// Increase applied to a forgotten card above the mastered band.
pub const PRIORITY_STEP_UP: u32 = 3;
/// Priority given to a mastered card that was forgotten.
pub const RELAPSE_PRIORITY: u32 = 10;

/// Represents the face of the current card shown to the learner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewState {
    /// Only the front is shown.
    Hidden,
    /// The back is shown, the learner can give a verdict.
    Revealed,
}

/// Applies the learner's verdict to the card.
///
/// A known card slowly decays towards the floor, or stays pinned there
/// once mastered. A forgotten card above the mastered band climbs by a
/// fixed step, while a mastered card that slipped jumps straight back to
/// [`RELAPSE_PRIORITY`]. The result never exceeds [`PRIORITY_CAP`].
pub fn apply_outcome(card: &mut Card, was_known: bool) {
    if was_known {
        if card.priority > MASTERED_THRESHOLD {
            card.priority = card
                .priority
                .saturating_sub(PRIORITY_STEP_DOWN)
                .max(PRIORITY_FLOOR);
        } else {
            card.priority = PRIORITY_FLOOR;
        }
    } else {
        if card.priority > MASTERED_THRESHOLD {
            card.priority = card.priority.saturating_add(PRIORITY_STEP_UP);
        } else {
            card.priority = RELAPSE_PRIORITY;
        }
        card.error_count = card.error_count.saturating_add(1);
    }

    card.priority = card.priority.min(PRIORITY_CAP);
}

/// Draws an active card with a probability proportional to its priority.
///
/// Active cards are walked in store order. Returns `None` only when no
/// card is active.
pub fn draw<'a, G>(cards: &'a [Card], rng: &mut G) -> Option<&'a Card>
where
    G: Rng + ?Sized,
{
    let mut active = cards.iter().filter(|card| card.is_active()).peekable();
    let first = *active.peek()?;

    let total_weight: u64 = cards
        .iter()
        .filter(|card| card.is_active())
        .map(|card| u64::from(card.priority))
        .sum();
    if total_weight == 0 {
        return Some(first);
    }

    let mut r = rng.gen_range(0..total_weight);
    trace!("draw {} out of {}", r, total_weight);

    for card in active {
        let weight = u64::from(card.priority);
        if r < weight {
            return Some(card);
        }
        r -= weight;
    }

    Some(first)
}

/// Drives a review session over a card store.
///
/// The scheduler does not own the store: callers pass it to every
/// operation. The random source is injectable so that draws can be made
/// reproducible.
#[derive(Debug)]
pub struct Scheduler<G: Rng = ThreadRng> {
    rng: G,
    session_count: u32,
    current: Option<CardId>,
    state: ReviewState,
}

impl Scheduler<ThreadRng> {
    pub fn new() -> Self {
        Self::with_rng(rand::thread_rng())
    }
}

impl Default for Scheduler<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Rng> Scheduler<G> {
    pub fn with_rng(rng: G) -> Self {
        Self {
            rng,
            session_count: 0,
            current: None,
            state: ReviewState::Hidden,
        }
    }

    /// Number of the card being reviewed in the current session.
    pub fn session_count(&self) -> u32 {
        self.session_count
    }

    pub fn state(&self) -> ReviewState {
        self.state
    }

    pub fn current<'a, R: CardRepository>(&self, store: &'a CardStore<R>) -> Option<&'a Card> {
        self.current.as_deref().and_then(|id| store.find_by_id(id))
    }

    /// Resets the session counter then draws the first card.
    pub fn start_session<R: CardRepository>(&mut self, store: &CardStore<R>) -> Result<Card> {
        debug!("start review session");
        self.session_count = 1;
        self.draw_next(store)
    }

    /// Draws the next card and shows its front.
    pub fn draw_next<R: CardRepository>(&mut self, store: &CardStore<R>) -> Result<Card> {
        self.state = ReviewState::Hidden;

        match draw(store.all(), &mut self.rng) {
            None => {
                debug!("no active card to draw");
                self.current = None;
                Err(VocardError::NoActiveCards)
            }
            Some(card) => {
                debug!("drew card {} ({:?})", card.id, card.front);
                self.current = Some(card.id.clone());
                Ok(card.clone())
            }
        }
    }

    /// Turns the current card over. Does nothing without a current card.
    pub fn flip(&mut self) -> ReviewState {
        if self.current.is_some() {
            self.state = match self.state {
                ReviewState::Hidden => ReviewState::Revealed,
                ReviewState::Revealed => ReviewState::Hidden,
            };
        }
        self.state
    }

    /// Records the verdict for the current card.
    ///
    /// Verdicts are only accepted once the card has been revealed,
    /// otherwise this is a no-op returning `None`. The caller is expected
    /// to call [`Scheduler::draw_next`] afterwards.
    pub fn answer<R: CardRepository>(
        &mut self,
        store: &mut CardStore<R>,
        was_known: bool,
    ) -> Result<Option<Card>> {
        if self.state != ReviewState::Revealed {
            debug!("ignore verdict on a hidden card");
            return Ok(None);
        }

        let id = match self.current.take() {
            Some(id) => id,
            None => return Ok(None),
        };
        self.state = ReviewState::Hidden;
        self.record_outcome(store, &id, was_known)
    }

    /// Applies the verdict to the card with the given id, saves it and
    /// bumps the session counter. Returns `None` if the card is gone.
    pub fn record_outcome<R: CardRepository>(
        &mut self,
        store: &mut CardStore<R>,
        id: &str,
        was_known: bool,
    ) -> Result<Option<Card>> {
        debug!("record outcome for card {}: known={}", id, was_known);
        let card = store.update(id, |card| apply_outcome(card, was_known))?;
        if card.is_some() {
            self.session_count += 1;
        }
        Ok(card)
    }
}
