//! Deck arguments module.
//!
//! This module provides arguments related to the deck selection.

use clap::Arg;

/// Represents the deck name argument.
pub fn name_arg<'a>() -> Arg<'a, 'a> {
    Arg::with_name("deck")
        .long("deck")
        .short("d")
        .help("Selects a specific deck")
        .value_name("NAME")
}
