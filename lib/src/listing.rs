use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::{card::Card, error::*};

/// Order in which cards are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Newest first.
    Added,
    /// By front, ignoring case.
    Alpha,
    /// Highest priority first.
    Priority,
    /// Lowest priority first.
    PriorityAsc,
}

impl Default for SortMode {
    fn default() -> Self {
        Self::Added
    }
}

impl SortMode {
    pub const NAMES: [&'static str; 4] = ["added", "alpha", "priority", "priority-asc"];
}

impl FromStr for SortMode {
    type Err = VocardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "added" => Ok(Self::Added),
            "alpha" => Ok(Self::Alpha),
            "priority" => Ok(Self::Priority),
            "priority-asc" => Ok(Self::PriorityAsc),
            _ => Err(VocardError::ParseSortModeError(s.to_owned())),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Self::Added => "added",
            Self::Alpha => "alpha",
            Self::Priority => "priority",
            Self::PriorityAsc => "priority-asc",
        };
        write!(f, "{}", name)
    }
}

/// Which cards are listed, depending on their archived flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterMode {
    All,
    Active,
    Archived,
}

impl Default for FilterMode {
    fn default() -> Self {
        Self::Active
    }
}

impl FilterMode {
    pub const NAMES: [&'static str; 3] = ["all", "active", "archived"];

    pub fn accepts(&self, card: &Card) -> bool {
        match self {
            Self::All => true,
            Self::Active => !card.archived,
            Self::Archived => card.archived,
        }
    }
}

impl FromStr for FilterMode {
    type Err = VocardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "archived" => Ok(Self::Archived),
            _ => Err(VocardError::ParseFilterModeError(s.to_owned())),
        }
    }
}

/// Sorts cards given in insertion order. Sorts are stable.
pub fn sort_cards<'a, I>(cards: I, mode: SortMode) -> Vec<&'a Card>
where
    I: IntoIterator<Item = &'a Card>,
{
    let mut cards: Vec<_> = cards.into_iter().collect();
    match mode {
        SortMode::Added => cards.reverse(),
        SortMode::Alpha => cards.sort_by_cached_key(|card| card.front.to_lowercase()),
        SortMode::Priority => cards.sort_by(|a, b| b.priority.cmp(&a.priority)),
        SortMode::PriorityAsc => cards.sort_by_key(|card| card.priority),
    }
    cards
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Query {
    pub filter: FilterMode,
    pub search: Option<String>,
    pub sort: SortMode,
}

impl Query {
    /// Filters, searches then sorts the given cards.
    pub fn apply<'a>(&self, cards: &'a [Card]) -> Vec<&'a Card> {
        let search = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|search| !search.is_empty())
            .map(str::to_lowercase);

        let cards = cards
            .iter()
            .filter(|card| self.filter.accepts(card))
            .filter(|card| match &search {
                None => true,
                Some(search) => {
                    card.front.to_lowercase().contains(search)
                        || card.back.to_lowercase().contains(search)
                }
            });

        sort_cards(cards, self.sort)
    }
}

/// Lists the cards that were forgotten at least once.
pub fn missed(cards: &[Card], sort: SortMode) -> Vec<&Card> {
    sort_cards(cards.iter().filter(|card| card.error_count > 0), sort)
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub active: usize,
    pub archived: usize,
    pub missed: usize,
    pub total_errors: u64,
}

impl Stats {
    pub fn from_cards(cards: &[Card]) -> Self {
        cards.iter().fold(Self::default(), |mut stats, card| {
            stats.total += 1;
            if card.archived {
                stats.archived += 1;
            } else {
                stats.active += 1;
            }
            if card.error_count > 0 {
                stats.missed += 1;
            }
            stats.total_errors += u64::from(card.error_count);
            stats
        })
    }
}
