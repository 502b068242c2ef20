//! Review handlers module.
//!
//! This module contains the interactive review session handler.

use anyhow::{Context, Result};
use log::{debug, info};
use rand::Rng;
use serde::Serialize;
use std::io::{BufRead, Write};
use termcolor::WriteColor;
use vocard_lib::{Card, CardRepository, CardStore, Scheduler, VocardError};

use crate::output::{PrintPlain, PrinterService};

/// Represents a line typed by the learner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Answer {
    Yes,
    No,
    Quit,
    Other,
}

impl From<&str> for Answer {
    fn from(line: &str) -> Self {
        match line.trim().to_lowercase().as_str() {
            "y" | "yes" | "k" | "known" => Self::Yes,
            "n" | "no" | "u" | "unknown" => Self::No,
            "q" | "quit" | "exit" => Self::Quit,
            _ => Self::Other,
        }
    }
}

/// Reads the next answer. The end of the input quits the session.
fn read_answer<I: BufRead>(input: &mut I) -> Result<Answer> {
    let mut line = String::new();
    let n = input
        .read_line(&mut line)
        .context("cannot read answer")?;
    if n == 0 {
        Ok(Answer::Quit)
    } else {
        Ok(Answer::from(line.as_str()))
    }
}

/// Represents the outcome of a review session.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewSummary {
    pub reviewed: usize,
    pub known: usize,
    pub unknown: usize,
}

impl PrintPlain for ReviewSummary {
    fn print_plain(&self, writer: &mut dyn WriteColor) -> Result<()> {
        writeln!(
            writer,
            "Reviewed {} cards: {} known, {} unknown",
            self.reviewed, self.known, self.unknown
        )?;
        Ok(())
    }
}

fn next_card<R, G>(store: &CardStore<R>, scheduler: &mut Scheduler<G>) -> Result<Option<Card>>
where
    R: CardRepository,
    G: Rng,
{
    match scheduler.draw_next(store) {
        Ok(card) => Ok(Some(card)),
        Err(VocardError::NoActiveCards) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Runs a review session: shows a front, reveals the back on <Enter>,
/// then records whether the learner knew it.
pub fn review<R, G, I, P>(
    count: Option<usize>,
    store: &mut CardStore<R>,
    scheduler: &mut Scheduler<G>,
    input: &mut I,
    printer: &mut P,
) -> Result<()>
where
    R: CardRepository,
    G: Rng,
    I: BufRead,
    P: PrinterService,
{
    info!(">> review handler");

    let mut card = match scheduler.start_session(store) {
        Ok(card) => card,
        Err(VocardError::NoActiveCards) => {
            printer.print_str(
                "No card to review! Add some with `vocard add` or unarchive archived ones.",
            )?;
            info!("<< review handler");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };
    let mut summary = ReviewSummary::default();
    let done = |summary: &ReviewSummary| {
        count
            .map(|count| summary.reviewed >= count)
            .unwrap_or(false)
    };
    // prompts only make sense to a human reading plain output
    let prompt = !printer.is_json();

    loop {
        if done(&summary) {
            break;
        }

        printer.print_str(format!(
            "#{} {}  (priority {})",
            scheduler.session_count(),
            card.front,
            card.priority
        ))?;
        if prompt {
            printer.print_str("Press <Enter> to reveal, q to quit")?;
        }
        if read_answer(input)? == Answer::Quit {
            break;
        }

        scheduler.flip();
        printer.print_str(format!("    {}", card.back))?;

        let was_known = loop {
            if prompt {
                printer.print_str("Did you know it? [y]es / [n]o / [q]uit")?;
            }
            match read_answer(input)? {
                Answer::Yes => break Some(true),
                Answer::No => break Some(false),
                Answer::Quit => break None,
                Answer::Other => continue,
            }
        };
        let was_known = match was_known {
            Some(was_known) => was_known,
            None => break,
        };

        if let Some(card) = scheduler
            .answer(store, was_known)
            .context("cannot record review outcome")?
        {
            debug!("card {} priority is now {}", card.id, card.priority);
            summary.reviewed += 1;
            if was_known {
                summary.known += 1;
            } else {
                summary.unknown += 1;
            }
        }

        if done(&summary) {
            break;
        }

        card = match next_card(store, scheduler)? {
            Some(card) => card,
            None => {
                printer.print_str("No card left to review.")?;
                break;
            }
        };
    }

    printer.print(summary)?;

    info!("<< review handler");
    Ok(())
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};
    use termcolor::Buffer;
    use vocard_lib::{Cards, MemoryCardRepository};

    use super::*;
    use crate::output::{OutputFmt, Printer};

    fn store(cards: Vec<Card>) -> CardStore<MemoryCardRepository> {
        CardStore::open(MemoryCardRepository::new(Cards(cards))).unwrap()
    }

    fn run(count: Option<usize>, store: &mut CardStore<MemoryCardRepository>, input: &str) -> String {
        run_with(OutputFmt::Plain, count, store, input)
    }

    fn run_with(
        fmt: OutputFmt,
        count: Option<usize>,
        store: &mut CardStore<MemoryCardRepository>,
        input: &str,
    ) -> String {
        let mut scheduler = Scheduler::with_rng(StdRng::seed_from_u64(5));
        let mut printer = Printer::new(Buffer::no_color(), fmt);
        review(count, store, &mut scheduler, &mut input.as_bytes(), &mut printer).unwrap();
        String::from_utf8(printer.into_inner().into_inner()).unwrap()
    }

    #[test]
    fn it_should_parse_answers() {
        assert_eq!(Answer::from("y\n"), Answer::Yes);
        assert_eq!(Answer::from(" No "), Answer::No);
        assert_eq!(Answer::from("q"), Answer::Quit);
        assert_eq!(Answer::from(""), Answer::Other);
    }

    #[test]
    fn it_should_review_cards() {
        let mut store = store(vec![Card::new("1", "Dog", "犬")]);

        // reveal, unknown, reveal, garbage then known, quit
        let output = run(None, &mut store, "\nn\n\nmaybe\ny\nq\n");

        let card = store.find_by_id("1").unwrap();
        assert_eq!(card.priority, 22);
        assert_eq!(card.error_count, 1);
        assert!(output.contains("#1 Dog  (priority 20)"));
        assert!(output.contains("    犬"));
        assert!(output.contains("#2 Dog  (priority 23)"));
        assert!(output.contains("#3 Dog  (priority 22)"));
        assert!(output.ends_with("Reviewed 2 cards: 1 known, 1 unknown\n"));
    }

    #[test]
    fn it_should_stop_after_count() {
        let mut store = store(vec![Card::new("1", "Dog", "犬")]);

        let output = run(Some(1), &mut store, "\ny\n\ny\n");

        assert_eq!(store.find_by_id("1").unwrap().priority, 19);
        assert!(output.ends_with("Reviewed 1 cards: 1 known, 0 unknown\n"));
    }

    #[test]
    fn it_should_not_review_with_zero_count() {
        let mut store = store(vec![Card::new("1", "Dog", "犬")]);

        let output = run(Some(0), &mut store, "\ny\n");

        assert_eq!(store.find_by_id("1").unwrap().priority, 20);
        assert_eq!(store.repository().saves(), 0);
        assert_eq!(output, "Reviewed 0 cards: 0 known, 0 unknown\n");
    }

    #[test]
    fn it_should_skip_prompts_in_json() {
        let mut store = store(vec![Card::new("1", "Dog", "犬")]);

        let output = run_with(OutputFmt::Json, Some(1), &mut store, "\nn\n");

        assert_eq!(store.find_by_id("1").unwrap().priority, 23);
        assert!(!output.contains("Press <Enter>"));
        assert!(!output.contains("Did you know it?"));
        let summary: serde_json::Value =
            serde_json::from_str(output.lines().last().unwrap()).unwrap();
        assert_eq!(summary["response"]["reviewed"], 1);
        assert_eq!(summary["response"]["unknown"], 1);
    }

    #[test]
    fn it_should_quit_at_end_of_input() {
        let mut store = store(vec![Card::new("1", "Dog", "犬")]);

        let output = run(None, &mut store, "\n");

        assert_eq!(store.find_by_id("1").unwrap().priority, 20);
        assert_eq!(store.repository().saves(), 0);
        assert!(output.ends_with("Reviewed 0 cards: 0 known, 0 unknown\n"));
    }

    #[test]
    fn it_should_warn_without_active_cards() {
        let mut archived = Card::new("1", "Dog", "犬");
        archived.archived = true;
        let mut store = store(vec![archived]);

        let output = run(None, &mut store, "");

        assert!(output.starts_with("No card to review!"));
    }
}
