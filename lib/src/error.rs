use std::{io, path::PathBuf, result};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VocardError {
    #[error("card {0:?} is already in the deck")]
    DuplicateCard(String),
    #[error("card front and back cannot be empty")]
    EmptyText,
    #[error("no active card to review")]
    NoActiveCards,
    #[error("cannot parse sort mode {0:?}")]
    ParseSortModeError(String),
    #[error("cannot parse filter mode {0:?}")]
    ParseFilterModeError(String),

    #[error("cannot read cards at {0:?}: {1}")]
    ReadCardsError(PathBuf, io::Error),
    #[error("cannot parse cards at {0:?}: {1}")]
    ParseCardsError(PathBuf, serde_json::Error),
    #[error("cannot write cards at {0:?}: {1}")]
    WriteCardsError(PathBuf, io::Error),
    #[error("cannot serialize cards at {0:?}: {1}")]
    SerializeCardsError(PathBuf, serde_json::Error),
}

pub type Result<T> = result::Result<T, VocardError>;
