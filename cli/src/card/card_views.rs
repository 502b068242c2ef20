//! Card views module.
//!
//! This module contains the printable representations of cards and of
//! the reports returned by card commands.

use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use termcolor::{Color, WriteColor};
use vocard_lib::{
    import::ImportReport,
    listing::Stats,
    scheduler::{MASTERED_THRESHOLD, PRIORITY_CAP},
    Card,
};

use crate::output::{Cell, PrintPlain, Row, Table};

impl Table for Card {
    fn head() -> Row {
        Row::new()
            .cell(Cell::new("ID").bold())
            .cell(Cell::new("FRONT").bold())
            .cell(Cell::new("BACK").bold())
            .cell(Cell::new("PRIORITY").bold())
            .cell(Cell::new("MISSES").bold())
            .cell(Cell::new("ARCHIVED").bold())
    }

    fn row(&self) -> Row {
        Row::new()
            .cell(Cell::new(&self.id).color(Color::Blue))
            .cell(Cell::new(&self.front).bold_if(!self.archived))
            .cell(Cell::new(&self.back))
            .cell(
                Cell::new(self.priority)
                    .color_if(Color::Green, self.priority <= MASTERED_THRESHOLD)
                    .color_if(Color::Red, self.priority >= PRIORITY_CAP),
            )
            .cell(Cell::new(self.error_count).color_if(Color::Red, self.error_count > 0))
            .cell(Cell::new(if self.archived { "yes" } else { "" }))
    }
}

/// Represents a list of cards.
#[derive(Debug, Serialize)]
pub struct CardsView<'a>(pub Vec<&'a Card>);

impl<'a> PrintPlain for CardsView<'a> {
    fn print_plain(&self, writer: &mut dyn WriteColor) -> Result<()> {
        if self.0.is_empty() {
            writeln!(writer, "No card found.")?;
            return Ok(());
        }
        Card::print(writer, self.0.iter().copied())
    }
}

/// Represents the deck statistics.
#[derive(Debug, Serialize)]
pub struct StatsView(pub Stats);

impl PrintPlain for StatsView {
    fn print_plain(&self, writer: &mut dyn WriteColor) -> Result<()> {
        let stats = &self.0;
        writeln!(writer, "Cards:    {}", stats.total)?;
        writeln!(writer, "Active:   {}", stats.active)?;
        writeln!(writer, "Archived: {}", stats.archived)?;
        writeln!(writer, "Missed:   {}", stats.missed)?;
        writeln!(writer, "Misses:   {}", stats.total_errors)?;
        Ok(())
    }
}

/// Represents the result of an import.
#[derive(Debug, Serialize)]
pub struct ImportView(pub ImportReport);

impl PrintPlain for ImportView {
    fn print_plain(&self, writer: &mut dyn WriteColor) -> Result<()> {
        let report = &self.0;
        if report.added.is_empty() {
            writeln!(writer, "No valid word found, check the format.")?;
        } else {
            writeln!(writer, "Successfully imported {} words.", report.added.len())?;
        }
        if !report.duplicates.is_empty() {
            writeln!(
                writer,
                "Skipped {} words already in the deck: {}",
                report.duplicates.len(),
                report.duplicates.join(", ")
            )?;
        }
        if !report.invalid.is_empty() {
            let lines: Vec<_> = report.invalid.iter().map(ToString::to_string).collect();
            writeln!(writer, "Skipped invalid lines: {}", lines.join(", "))?;
        }
        Ok(())
    }
}
