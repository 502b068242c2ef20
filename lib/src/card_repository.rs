use crate::{card::Cards, error::*};

/// Loads and saves a whole deck. The store calls `save` after every
/// mutation.
pub trait CardRepository {
    fn load(&self) -> Result<Cards>;
    fn save(&self, cards: &Cards) -> Result<()>;
}
