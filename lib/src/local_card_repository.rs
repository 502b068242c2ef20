use log::{debug, trace};
use std::{
    fs,
    io::{BufWriter, Write},
    path::PathBuf,
};

use crate::{card::Cards, card_repository::CardRepository, error::*};

/// Stores the deck as a JSON array in a single file.
#[derive(Debug, Clone)]
pub struct LocalCardRepository {
    path: PathBuf,
}

impl LocalCardRepository {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl CardRepository for LocalCardRepository {
    fn load(&self) -> Result<Cards> {
        debug!("load cards from {:?}", self.path);

        if !self.path.exists() {
            debug!("cards file does not exist yet, starting with an empty deck");
            return Ok(Cards::default());
        }

        let buff =
            fs::read(&self.path).map_err(|e| VocardError::ReadCardsError(self.path.clone(), e))?;

        let cards = if buff.iter().all(u8::is_ascii_whitespace) {
            Cards::default()
        } else {
            serde_json::from_slice(&buff)
                .map_err(|e| VocardError::ParseCardsError(self.path.clone(), e))?
        };
        trace!("cards: {:?}", cards);

        Ok(cards)
    }

    fn save(&self, cards: &Cards) -> Result<()> {
        debug!("save {} cards to {:?}", cards.len(), self.path);

        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .map_err(|e| VocardError::WriteCardsError(self.path.clone(), e))?;
        }

        let file = fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .map_err(|e| VocardError::WriteCardsError(self.path.clone(), e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, cards)
            .map_err(|e| VocardError::SerializeCardsError(self.path.clone(), e))?;
        writer
            .flush()
            .map_err(|e| VocardError::WriteCardsError(self.path.clone(), e))
    }
}
