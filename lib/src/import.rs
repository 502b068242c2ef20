use lazy_static::lazy_static;
use log::{debug, trace};
use regex::Regex;
use serde::Serialize;

use crate::{card::CardId, card_repository::CardRepository, error::*, store::CardStore};

lazy_static! {
    static ref SEPARATOR: Regex = Regex::new(r",|\t| - |：").unwrap();
}

/// Parses a `front<sep>back` line, where the separator is a comma, a tab,
/// ` - ` or a full-width colon. Everything after the first separator is the
/// back, further separators are joined back with commas.
pub fn parse_line(line: &str) -> Option<(String, String)> {
    let mut parts = SEPARATOR.split(line);
    let front = parts.next()?.trim();
    let back = parts.collect::<Vec<_>>().join(",");
    let back = back.trim();

    if front.is_empty() || back.is_empty() {
        None
    } else {
        Some((front.to_owned(), back.to_owned()))
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub added: Vec<CardId>,
    /// Fronts that were already in the deck.
    pub duplicates: Vec<String>,
    /// Line numbers (1-based) that could not be parsed.
    pub invalid: Vec<usize>,
}

/// Adds one card per line of `text`. Blank lines are skipped, duplicates and
/// unparsable lines are reported instead of failing the import.
pub fn import<R: CardRepository>(store: &mut CardStore<R>, text: &str) -> Result<ImportReport> {
    let mut report = ImportReport::default();

    for (n, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        trace!("line {}: {:?}", n + 1, line);

        let (front, back) = match parse_line(line) {
            Some(pair) => pair,
            None => {
                report.invalid.push(n + 1);
                continue;
            }
        };

        match store.add(&front, &back) {
            Ok(id) => report.added.push(id),
            Err(VocardError::DuplicateCard(front)) => report.duplicates.push(front),
            Err(err) => return Err(err),
        }
    }

    debug!(
        "imported {} cards ({} duplicates, {} invalid lines)",
        report.added.len(),
        report.duplicates.len(),
        report.invalid.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_card_repository::MemoryCardRepository;

    fn pair(front: &str, back: &str) -> Option<(String, String)> {
        Some((front.to_owned(), back.to_owned()))
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("dog,犬"), pair("dog", "犬"));
        assert_eq!(parse_line("dog\t犬"), pair("dog", "犬"));
        assert_eq!(parse_line("dog - 犬"), pair("dog", "犬"));
        assert_eq!(parse_line("dog：犬"), pair("dog", "犬"));
        assert_eq!(parse_line("  run , 走る, 運営する "), pair("run", "走る, 運営する"));
        assert_eq!(parse_line("run\t走る - 運営する"), pair("run", "走る,運営する"));
        assert_eq!(parse_line("well-known,有名な"), pair("well-known", "有名な"));
    }

    #[test]
    fn test_parse_invalid_line() {
        assert_eq!(parse_line("dog"), None);
        assert_eq!(parse_line("dog,"), None);
        assert_eq!(parse_line(",犬"), None);
        assert_eq!(parse_line(""), None);
    }

    #[test]
    fn test_import() {
        let mut store = CardStore::open(MemoryCardRepository::default()).unwrap();
        store.add("Dog", "犬").unwrap();

        let report = import(&mut store, "cat,猫\n\ndog,いぬ\nbird\nfish - 魚\n").unwrap();

        assert_eq!(report.added.len(), 2);
        assert_eq!(report.duplicates, vec!["dog"]);
        assert_eq!(report.invalid, vec![4]);
        let fronts: Vec<_> = store.all().iter().map(|c| c.front.as_str()).collect();
        assert_eq!(fronts, vec!["Dog", "cat", "fish"]);
    }
}
