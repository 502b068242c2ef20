//! Card handlers module.
//!
//! This module contains all handlers related to the card management.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::{
    fs,
    io::{self, Read},
};
use vocard_lib::{
    listing::{self, FilterMode, Query, SortMode, Stats},
    CardRepository, CardStore, VocardError,
};

use crate::{
    card::{
        card_args::Target,
        card_views::{CardsView, ImportView, StatsView},
    },
    config::DeckConfig,
    output::PrinterService,
};

/// Adds a card.
pub fn add<R: CardRepository, P: PrinterService>(
    front: &str,
    back: &str,
    store: &mut CardStore<R>,
    printer: &mut P,
) -> Result<()> {
    info!(">> add card handler");

    match store.add(front, back) {
        Err(VocardError::DuplicateCard(front)) => {
            printer.print_str(format!("{:?} is already in your deck!", front))?
        }
        res => {
            let id = res.context("cannot add card")?;
            printer.print_str(format!("Card {} successfully added", id))?
        }
    }

    info!("<< add card handler");
    Ok(())
}

/// Reads the text to import from a file, or from the standard input.
pub fn read_import_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("cannot read import file {:?}", path))
        }
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("cannot read import from stdin")?;
            Ok(text)
        }
    }
}

/// Imports cards from text, one pair per line.
pub fn import<R: CardRepository, P: PrinterService>(
    text: &str,
    store: &mut CardStore<R>,
    printer: &mut P,
) -> Result<()> {
    info!(">> import cards handler");

    let report = vocard_lib::import::import(store, text).context("cannot import cards")?;
    printer.print(ImportView(report))?;

    info!("<< import cards handler");
    Ok(())
}

/// Lists cards. Sort and filter fall back to the deck defaults.
pub fn list<R: CardRepository, P: PrinterService>(
    sort: Option<SortMode>,
    filter: Option<FilterMode>,
    search: Option<&str>,
    config: &DeckConfig,
    store: &CardStore<R>,
    printer: &mut P,
) -> Result<()> {
    info!(">> list cards handler");

    let query = Query {
        sort: sort.unwrap_or(config.list_sort),
        filter: filter.unwrap_or(config.list_filter),
        search: search.map(ToOwned::to_owned),
    };
    debug!("query: {:?}", query);
    printer.print(CardsView(query.apply(store.all())))?;

    info!("<< list cards handler");
    Ok(())
}

/// Lists cards forgotten at least once.
pub fn missed<R: CardRepository, P: PrinterService>(
    sort: Option<SortMode>,
    config: &DeckConfig,
    store: &CardStore<R>,
    printer: &mut P,
) -> Result<()> {
    info!(">> list missed cards handler");

    let sort = sort.unwrap_or(config.list_sort);
    printer.print(CardsView(listing::missed(store.all(), sort)))?;

    info!("<< list missed cards handler");
    Ok(())
}

/// Shows deck statistics.
pub fn stats<R: CardRepository, P: PrinterService>(
    store: &CardStore<R>,
    printer: &mut P,
) -> Result<()> {
    info!(">> deck stats handler");
    printer.print(StatsView(Stats::from_cards(store.all())))?;
    info!("<< deck stats handler");
    Ok(())
}

/// Deletes a card.
pub fn delete<R: CardRepository, P: PrinterService>(
    id: &str,
    store: &mut CardStore<R>,
    printer: &mut P,
) -> Result<()> {
    info!(">> delete card handler");

    match store.remove(id).context("cannot delete card")? {
        Some(card) => printer.print_str(format!("Card {:?} successfully deleted", card.front))?,
        None => warn!("card {} not found, nothing to delete", id),
    }

    info!("<< delete card handler");
    Ok(())
}

/// Deletes all the cards, once confirmed.
pub fn delete_all<R: CardRepository, P: PrinterService>(
    confirmed: bool,
    store: &mut CardStore<R>,
    printer: &mut P,
) -> Result<()> {
    info!(">> delete all cards handler");

    if confirmed {
        let count = store.remove_all().context("cannot delete cards")?;
        printer.print_str(format!("{} cards successfully deleted", count))?;
    } else {
        printer.print_str("This deletes ALL the cards, run again with --yes to confirm")?;
    }

    info!("<< delete all cards handler");
    Ok(())
}

/// Resets card priorities to their default value.
pub fn reset_priority<R: CardRepository, P: PrinterService>(
    target: Target,
    store: &mut CardStore<R>,
    printer: &mut P,
) -> Result<()> {
    info!(">> reset priority handler");

    match target {
        Target::All => {
            let count = store
                .reset_all_priorities()
                .context("cannot reset priorities")?;
            printer.print_str(format!("Priority of {} cards successfully reset", count))?;
        }
        Target::One(id) => match store.reset_priority(id).context("cannot reset priority")? {
            Some(card) => printer.print_str(format!(
                "Priority of {:?} successfully reset to {}",
                card.front, card.priority
            ))?,
            None => warn!("card {} not found, nothing to reset", id),
        },
    }

    info!("<< reset priority handler");
    Ok(())
}

/// Resets card miss counters, which clears the missed list.
pub fn reset_errors<R: CardRepository, P: PrinterService>(
    target: Target,
    store: &mut CardStore<R>,
    printer: &mut P,
) -> Result<()> {
    info!(">> reset errors handler");

    match target {
        Target::All => {
            let count = store.reset_all_errors().context("cannot reset misses")?;
            printer.print_str(format!("Misses of {} cards successfully reset", count))?;
        }
        Target::One(id) => match store.reset_errors(id).context("cannot reset misses")? {
            Some(card) => {
                printer.print_str(format!("Misses of {:?} successfully reset", card.front))?
            }
            None => warn!("card {} not found, nothing to reset", id),
        },
    }

    info!("<< reset errors handler");
    Ok(())
}

/// Archives or unarchives a card.
pub fn archive<R: CardRepository, P: PrinterService>(
    id: &str,
    archived: bool,
    store: &mut CardStore<R>,
    printer: &mut P,
) -> Result<()> {
    info!(">> archive card handler");
    debug!("archived: {}", archived);

    match store
        .set_archived(id, archived)
        .context("cannot archive card")?
    {
        Some(card) if card.archived => {
            printer.print_str(format!("Card {:?} excluded from reviews", card.front))?
        }
        Some(card) => printer.print_str(format!("Card {:?} included in reviews", card.front))?,
        None => warn!("card {} not found, nothing to archive", id),
    }

    info!("<< archive card handler");
    Ok(())
}

#[cfg(test)]
mod tests {
    use termcolor::Buffer;
    use vocard_lib::MemoryCardRepository;

    use super::*;
    use crate::output::{OutputFmt, Printer};

    fn store() -> CardStore<MemoryCardRepository> {
        CardStore::open(MemoryCardRepository::default()).unwrap()
    }

    fn printer() -> Printer<Buffer> {
        Printer::new(Buffer::no_color(), OutputFmt::Plain)
    }

    fn output(printer: Printer<Buffer>) -> String {
        String::from_utf8(printer.into_inner().into_inner()).unwrap()
    }

    #[test]
    fn it_should_add_cards() {
        let mut store = store();
        let mut printer = printer();

        add("Dog", "犬", &mut store, &mut printer).unwrap();
        add("dog", "いぬ", &mut store, &mut printer).unwrap();

        assert_eq!(store.len(), 1);
        let output = output(printer);
        assert!(output.contains("successfully added"));
        assert!(output.contains("\"dog\" is already in your deck!"));
    }

    #[test]
    fn it_should_fail_on_empty_card() {
        let mut store = store();

        assert!(add(" ", "犬", &mut store, &mut printer()).is_err());
    }

    #[test]
    fn it_should_list_cards_as_json() {
        let mut store = store();
        store.add("Dog", "犬").unwrap();
        let id = store.add("Cat", "猫").unwrap();
        store.set_archived(&id, true).unwrap();
        let mut printer = Printer::new(Buffer::no_color(), OutputFmt::Json);

        list(
            None,
            Some(FilterMode::All),
            None,
            &DeckConfig::default(),
            &store,
            &mut printer,
        )
        .unwrap();

        let json: serde_json::Value = serde_json::from_str(&output(printer)).unwrap();
        let cards = json["response"].as_array().unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0]["front"], "Cat");
        assert_eq!(cards[0]["archived"], true);
        assert_eq!(cards[1]["front"], "Dog");
        assert_eq!(cards[1]["priority"], 20);
    }

    #[test]
    fn it_should_delete_all_once_confirmed() {
        let mut store = store();
        store.add("Dog", "犬").unwrap();

        delete_all(false, &mut store, &mut printer()).unwrap();
        assert_eq!(store.len(), 1);

        delete_all(true, &mut store, &mut printer()).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn it_should_ignore_unknown_ids() {
        let mut store = store();
        let mut printer = printer();

        delete("nope", &mut store, &mut printer).unwrap();
        reset_priority(Target::One("nope"), &mut store, &mut printer).unwrap();
        archive("nope", true, &mut store, &mut printer).unwrap();

        assert_eq!(store.repository().saves(), 0);
        assert!(output(printer).is_empty());
    }

    #[test]
    fn it_should_reset_errors() {
        let mut store = store();
        let id = store.add("Dog", "犬").unwrap();
        store.update(&id, |card| card.error_count = 3).unwrap();

        reset_errors(Target::All, &mut store, &mut printer()).unwrap();
        assert_eq!(store.find_by_id(&id).unwrap().error_count, 0);
    }
}
