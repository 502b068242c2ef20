pub mod card;
pub mod card_repository;
pub mod error;
pub mod import;
pub mod listing;
pub mod local_card_repository;
pub mod memory_card_repository;
pub mod scheduler;
pub mod store;

pub use crate::{
    card::{Card, CardId, Cards},
    card_repository::CardRepository,
    error::{Result, VocardError},
    local_card_repository::LocalCardRepository,
    memory_card_repository::MemoryCardRepository,
    scheduler::{ReviewState, Scheduler},
    store::CardStore,
};
