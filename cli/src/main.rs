use anyhow::{Context, Result};
use clap::{App, AppSettings};
use log::debug;
use std::{env, io};
use vocard_lib::{CardStore, LocalCardRepository, Scheduler};

pub mod card;
pub mod config;
pub mod output;
pub mod review;

use crate::{
    card::{card_args, card_handlers},
    config::{config_args, deck_args, DeckConfig, DeserializedConfig},
    output::{output_args, StdoutPrinter},
    review::{review_args, review_handlers},
};

fn create_app<'a>() -> App<'a, 'a> {
    App::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .global_setting(AppSettings::GlobalVersion)
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(&config_args::path_arg())
        .arg(&deck_args::name_arg())
        .args(&output_args::args())
        .subcommands(card_args::subcmds())
        .subcommands(review_args::subcmds())
}

fn main() -> Result<()> {
    // init env logger
    let default_env_filter = env_logger::DEFAULT_FILTER_ENV;
    env_logger::init_from_env(env_logger::Env::default().filter_or(default_env_filter, "off"));

    // init app
    let app = create_app();
    let m = app.get_matches();

    // init entities and services
    let config = DeserializedConfig::from_opt_path(m.value_of("config"))?;
    let deck_config = DeckConfig::from_config_and_opt_deck_name(&config, m.value_of("deck"))?;
    let mut printer = StdoutPrinter::try_from(m.value_of("output"))?;
    debug!("store path: {:?}", deck_config.store_path);
    let mut store = CardStore::open(LocalCardRepository::new(deck_config.store_path.clone()))
        .with_context(|| format!("cannot open deck {:?}", deck_config.name))?;

    // check card commands
    if let Some(cmd) = card_args::matches(&m)? {
        return match cmd {
            card_args::Cmd::Add(front, back) => {
                card_handlers::add(front, back, &mut store, &mut printer)
            }
            card_args::Cmd::Import(path) => {
                let text = card_handlers::read_import_input(path)?;
                card_handlers::import(&text, &mut store, &mut printer)
            }
            card_args::Cmd::List {
                sort,
                filter,
                search,
            } => card_handlers::list(sort, filter, search, &deck_config, &store, &mut printer),
            card_args::Cmd::Missed(sort) => {
                card_handlers::missed(sort, &deck_config, &store, &mut printer)
            }
            card_args::Cmd::Stats => card_handlers::stats(&store, &mut printer),
            card_args::Cmd::Delete(id) => card_handlers::delete(id, &mut store, &mut printer),
            card_args::Cmd::DeleteAll(confirmed) => {
                card_handlers::delete_all(confirmed, &mut store, &mut printer)
            }
            card_args::Cmd::ResetPriority(target) => {
                card_handlers::reset_priority(target, &mut store, &mut printer)
            }
            card_args::Cmd::ResetErrors(target) => {
                card_handlers::reset_errors(target, &mut store, &mut printer)
            }
            card_args::Cmd::Archive(id, archived) => {
                card_handlers::archive(id, archived, &mut store, &mut printer)
            }
        };
    }

    // check review commands
    if let Some(review_args::Cmd::Review(count)) = review_args::matches(&m)? {
        let stdin = io::stdin();
        return review_handlers::review(
            count,
            &mut store,
            &mut Scheduler::new(),
            &mut stdin.lock(),
            &mut printer,
        );
    }

    Ok(())
}
