//! Review arguments module.
//!
//! This module provides subcommands, arguments and a command matcher
//! related to the review session.

use anyhow::{Context, Result};
use clap::{App, Arg, ArgMatches, SubCommand};
use log::{debug, info};

/// Represents the review commands.
#[derive(Debug, PartialEq, Eq)]
pub enum Cmd {
    /// Represents the review command, with an optional number of cards.
    Review(Option<usize>),
}

/// Represents the review command matcher.
pub fn matches(m: &ArgMatches) -> Result<Option<Cmd>> {
    info!(">> review command matcher");

    let cmd = if let Some(m) = m.subcommand_matches("review") {
        debug!("review command matched");
        let count = m
            .value_of("count")
            .map(str::parse::<usize>)
            .transpose()
            .context("cannot parse review count")?;
        debug!("count: {:?}", count);
        Some(Cmd::Review(count))
    } else {
        None
    };

    info!("<< review command matcher");
    Ok(cmd)
}

/// Represents the review subcommands.
pub fn subcmds<'a>() -> Vec<App<'a, 'a>> {
    vec![SubCommand::with_name("review")
        .aliases(&["drill", "play", "r"])
        .about("Starts a review session")
        .arg(
            Arg::with_name("count")
                .long("count")
                .short("n")
                .help("Stops after reviewing this number of cards")
                .value_name("N"),
        )]
}
