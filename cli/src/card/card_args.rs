//! Card arguments module.
//!
//! This module provides subcommands, arguments and a command matcher
//! related to the card management.

use anyhow::Result;
use clap::{App, Arg, ArgGroup, ArgMatches, SubCommand};
use log::{debug, info};
use vocard_lib::listing::{FilterMode, SortMode};

/// Represents the card(s) targeted by a reset command.
#[derive(Debug, PartialEq, Eq)]
pub enum Target<'a> {
    One(&'a str),
    All,
}

/// Represents the card commands.
#[derive(Debug, PartialEq, Eq)]
pub enum Cmd<'a> {
    /// Represents the add card command.
    Add(&'a str, &'a str),
    /// Represents the import cards command. Reads stdin without a path.
    Import(Option<&'a str>),
    /// Represents the list cards command.
    List {
        sort: Option<SortMode>,
        filter: Option<FilterMode>,
        search: Option<&'a str>,
    },
    /// Represents the list missed cards command.
    Missed(Option<SortMode>),
    /// Represents the deck stats command.
    Stats,
    /// Represents the delete card command.
    Delete(&'a str),
    /// Represents the delete all cards command, with its confirmation.
    DeleteAll(bool),
    /// Represents the reset priority command.
    ResetPriority(Target<'a>),
    /// Represents the reset errors command.
    ResetErrors(Target<'a>),
    /// Represents the archive and unarchive commands.
    Archive(&'a str, bool),
}

fn sort_arg<'a>() -> Arg<'a, 'a> {
    Arg::with_name("sort")
        .long("sort")
        .short("s")
        .help("Sorts the cards")
        .value_name("SORT")
        .possible_values(&SortMode::NAMES)
}

fn id_arg<'a>() -> Arg<'a, 'a> {
    Arg::with_name("id").help("Card identifier").value_name("ID")
}

fn target_args<'a>(cmd: App<'a, 'a>) -> App<'a, 'a> {
    cmd.arg(id_arg())
        .arg(
            Arg::with_name("all")
                .long("all")
                .short("a")
                .help("Targets all the cards"),
        )
        .group(ArgGroup::with_name("target").args(&["id", "all"]).required(true))
}

fn target<'a>(m: &'a ArgMatches) -> Target<'a> {
    match m.value_of("id") {
        Some(id) if !m.is_present("all") => Target::One(id),
        _ => Target::All,
    }
}

fn sort(m: &ArgMatches) -> Result<Option<SortMode>> {
    Ok(m.value_of("sort").map(str::parse::<SortMode>).transpose()?)
}

/// Represents the card command matcher.
pub fn matches<'a>(m: &'a ArgMatches) -> Result<Option<Cmd<'a>>> {
    info!(">> card command matcher");

    let cmd = if let Some(m) = m.subcommand_matches("add") {
        debug!("add command matched");
        let front = m.value_of("front").unwrap_or_default();
        let back = m.value_of("back").unwrap_or_default();
        debug!("front: {:?}, back: {:?}", front, back);
        Some(Cmd::Add(front, back))
    } else if let Some(m) = m.subcommand_matches("import") {
        debug!("import command matched");
        let path = m.value_of("path");
        debug!("path: {:?}", path);
        Some(Cmd::Import(path))
    } else if let Some(m) = m.subcommand_matches("list") {
        debug!("list command matched");
        let sort = sort(m)?;
        let filter = m
            .value_of("filter")
            .map(str::parse::<FilterMode>)
            .transpose()?;
        let search = m.value_of("search");
        debug!("sort: {:?}, filter: {:?}, search: {:?}", sort, filter, search);
        Some(Cmd::List {
            sort,
            filter,
            search,
        })
    } else if let Some(m) = m.subcommand_matches("missed") {
        debug!("missed command matched");
        Some(Cmd::Missed(sort(m)?))
    } else if m.subcommand_matches("stats").is_some() {
        debug!("stats command matched");
        Some(Cmd::Stats)
    } else if let Some(m) = m.subcommand_matches("delete") {
        debug!("delete command matched");
        Some(Cmd::Delete(m.value_of("id").unwrap_or_default()))
    } else if let Some(m) = m.subcommand_matches("delete-all") {
        debug!("delete all command matched");
        Some(Cmd::DeleteAll(m.is_present("yes")))
    } else if let Some(m) = m.subcommand_matches("reset-priority") {
        debug!("reset priority command matched");
        Some(Cmd::ResetPriority(target(m)))
    } else if let Some(m) = m.subcommand_matches("reset-errors") {
        debug!("reset errors command matched");
        Some(Cmd::ResetErrors(target(m)))
    } else if let Some(m) = m.subcommand_matches("archive") {
        debug!("archive command matched");
        Some(Cmd::Archive(m.value_of("id").unwrap_or_default(), true))
    } else if let Some(m) = m.subcommand_matches("unarchive") {
        debug!("unarchive command matched");
        Some(Cmd::Archive(m.value_of("id").unwrap_or_default(), false))
    } else {
        None
    };

    info!("<< card command matcher");
    Ok(cmd)
}

/// Represents the card subcommands.
pub fn subcmds<'a>() -> Vec<App<'a, 'a>> {
    vec![
        SubCommand::with_name("add")
            .aliases(&["new", "a"])
            .about("Adds a card")
            .arg(
                Arg::with_name("front")
                    .help("Term to learn")
                    .value_name("FRONT")
                    .required(true),
            )
            .arg(
                Arg::with_name("back")
                    .help("Translation of the term")
                    .value_name("BACK")
                    .required(true),
            ),
        SubCommand::with_name("import")
            .about("Imports cards, one \"front,back\" pair per line")
            .arg(
                Arg::with_name("path")
                    .help("File to import from, reads the standard input if omitted")
                    .value_name("PATH"),
            ),
        SubCommand::with_name("list")
            .aliases(&["lst", "l"])
            .about("Lists cards")
            .arg(sort_arg())
            .arg(
                Arg::with_name("filter")
                    .long("filter")
                    .short("f")
                    .help("Filters the cards by their archived flag")
                    .value_name("FILTER")
                    .possible_values(&FilterMode::NAMES),
            )
            .arg(
                Arg::with_name("search")
                    .long("search")
                    .short("q")
                    .help("Only lists cards containing the given text")
                    .value_name("TEXT"),
            ),
        SubCommand::with_name("missed")
            .aliases(&["misses", "m"])
            .about("Lists cards forgotten at least once")
            .arg(sort_arg()),
        SubCommand::with_name("stats").about("Shows deck statistics"),
        SubCommand::with_name("delete")
            .aliases(&["remove", "rm"])
            .about("Deletes a card")
            .arg(id_arg().required(true)),
        SubCommand::with_name("delete-all")
            .about("Deletes all the cards")
            .arg(
                Arg::with_name("yes")
                    .long("yes")
                    .short("y")
                    .help("Confirms the deletion"),
            ),
        target_args(
            SubCommand::with_name("reset-priority").about("Resets card priorities to default"),
        ),
        target_args(SubCommand::with_name("reset-errors").about("Resets card miss counters")),
        SubCommand::with_name("archive")
            .about("Excludes a card from reviews")
            .arg(id_arg().required(true)),
        SubCommand::with_name("unarchive")
            .about("Includes an archived card back in reviews")
            .arg(id_arg().required(true)),
    ]
}

#[cfg(test)]
mod tests {
    use clap::App;

    use super::*;

    macro_rules! matches_from {
        ($($arg:expr),*) => {
            App::new("vocard")
                .subcommands(subcmds())
                .get_matches_from(&["vocard", $($arg),*])
        };
    }

    #[test]
    fn it_should_match_cmds() {
        let arg = matches_from!["add", "Dog", "犬"];
        assert_eq!(Some(Cmd::Add("Dog", "犬")), matches(&arg).unwrap());

        let arg = matches_from!["import"];
        assert_eq!(Some(Cmd::Import(None)), matches(&arg).unwrap());

        let arg = matches_from!["list", "-s", "priority-asc", "--filter", "all", "-q", "do"];
        assert_eq!(
            Some(Cmd::List {
                sort: Some(SortMode::PriorityAsc),
                filter: Some(FilterMode::All),
                search: Some("do"),
            }),
            matches(&arg).unwrap()
        );

        let arg = matches_from!["list"];
        assert_eq!(
            Some(Cmd::List {
                sort: None,
                filter: None,
                search: None,
            }),
            matches(&arg).unwrap()
        );

        let arg = matches_from!["missed", "--sort", "alpha"];
        assert_eq!(Some(Cmd::Missed(Some(SortMode::Alpha))), matches(&arg).unwrap());

        let arg = matches_from!["delete-all"];
        assert_eq!(Some(Cmd::DeleteAll(false)), matches(&arg).unwrap());

        let arg = matches_from!["unarchive", "42"];
        assert_eq!(Some(Cmd::Archive("42", false)), matches(&arg).unwrap());
    }

    #[test]
    fn it_should_match_targets() {
        let arg = matches_from!["reset-priority", "42"];
        assert_eq!(
            Some(Cmd::ResetPriority(Target::One("42"))),
            matches(&arg).unwrap()
        );

        let arg = matches_from!["reset-errors", "--all"];
        assert_eq!(Some(Cmd::ResetErrors(Target::All)), matches(&arg).unwrap());
    }

    #[test]
    fn it_should_match_aliases() {
        macro_rules! get_matches_from {
            ($alias:expr) => {
                App::new("vocard")
                    .subcommands(subcmds())
                    .get_matches_from(&["vocard", $alias])
                    .subcommand_name()
                    .map(ToOwned::to_owned)
            };
        }

        assert_eq!(Some("list".to_owned()), get_matches_from!["lst"]);
        assert_eq!(Some("list".to_owned()), get_matches_from!["l"]);
        assert_eq!(Some("missed".to_owned()), get_matches_from!["misses"]);
        assert_eq!(Some("stats".to_owned()), get_matches_from!["stats"]);
    }
}
