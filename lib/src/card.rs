use serde::{Deserialize, Deserializer, Serialize};
use std::ops::{Deref, DerefMut};

use crate::scheduler::DEFAULT_PRIORITY;

pub type CardId = String;

/// Represents a term and its translation, plus the metadata used to
/// schedule it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    /// The foreign term. Older decks store it under `en`.
    #[serde(alias = "en")]
    pub front: String,
    /// The translation. Older decks store it under `ja`.
    #[serde(alias = "ja")]
    pub back: String,
    /// Draw weight. Missing in decks saved before weights existed.
    #[serde(default = "default_priority", deserialize_with = "priority_or_default")]
    pub priority: u32,
    /// How many times the card has been forgotten.
    #[serde(rename = "errors", default, deserialize_with = "null_as_default")]
    pub error_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub archived: bool,
}

fn default_priority() -> u32 {
    DEFAULT_PRIORITY
}

// Decks written by older versions may hold `null` where a number got lost.
fn priority_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Option::<u32>::deserialize(deserializer).map(|p| p.unwrap_or(DEFAULT_PRIORITY))
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Card {
    pub fn new<I, F, B>(id: I, front: F, back: B) -> Self
    where
        I: Into<CardId>,
        F: Into<String>,
        B: Into<String>,
    {
        Self {
            id: id.into(),
            front: front.into(),
            back: back.into(),
            priority: DEFAULT_PRIORITY,
            error_count: 0,
            archived: false,
        }
    }

    /// Active cards take part in the weighted draw.
    pub fn is_active(&self) -> bool {
        !self.archived
    }

    /// Compares fronts the way duplicates are detected: ignoring case.
    pub fn has_front(&self, front: &str) -> bool {
        self.front.to_lowercase() == front.to_lowercase()
    }
}

/// Cards kept in insertion order.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cards(pub Vec<Card>);

impl Cards {
    pub fn find(&self, id: &str) -> Option<&Card> {
        self.iter().find(|card| card.id == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Card> {
        self.iter_mut().find(|card| card.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.iter().position(|card| card.id == id)
    }
}

impl Deref for Cards {
    type Target = Vec<Card>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Cards {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<Card>> for Cards {
    fn from(cards: Vec<Card>) -> Self {
        Self(cards)
    }
}
