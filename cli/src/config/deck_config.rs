use anyhow::{anyhow, Context, Result};
use log::{debug, info, trace};
use std::{env, path::PathBuf};
use vocard_lib::listing::{FilterMode, SortMode};

use crate::config::*;

const DEFAULT_DECK_NAME: &str = "default";

/// Represents the user deck.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DeckConfig {
    /// Represents the name of the user deck.
    pub name: String,
    /// Makes this deck the default one.
    pub default: bool,
    /// Represents the file the cards are saved to.
    pub store_path: PathBuf,
    /// Represents the default sort of the list command.
    pub list_sort: SortMode,
    /// Represents the default filter of the list command.
    pub list_filter: FilterMode,
}

impl DeckConfig {
    /// Tries to create a deck from a config and an optional deck name.
    ///
    /// A config without any deck provides a built-in default deck.
    pub fn from_config_and_opt_deck_name(
        config: &DeserializedConfig,
        deck_name: Option<&str>,
    ) -> Result<DeckConfig> {
        info!(">> build deck from config and deck name");
        debug!("deck name: {:?}", deck_name.unwrap_or(DEFAULT_DECK_NAME));

        let builtin = DeserializedDeckConfig::default();
        let deck_name = deck_name.map(str::trim).filter(|name| !name.is_empty());
        let (name, deck) = match deck_name {
            Some(DEFAULT_DECK_NAME) | None if config.decks.is_empty() => {
                Ok((DEFAULT_DECK_NAME.to_owned(), &builtin))
            }
            Some(name) if config.decks.contains_key(name) => {
                Ok((name.to_owned(), &config.decks[name]))
            }
            Some(DEFAULT_DECK_NAME) | None => config
                .decks
                .iter()
                .find(|(_, deck)| deck.default.unwrap_or_default())
                .or_else(|| config.decks.get_key_value(DEFAULT_DECK_NAME))
                .or_else(|| {
                    // a single deck is the default one
                    if config.decks.len() == 1 {
                        config.decks.iter().next()
                    } else {
                        None
                    }
                })
                .map(|(name, deck)| (name.to_owned(), deck))
                .ok_or_else(|| anyhow!("cannot find default deck")),
            Some(name) => Err(anyhow!("cannot find deck {:?}", name)),
        }?;
        debug!("selected deck name: {:?}", name);
        trace!("deck: {:?}", deck);

        let store_path = match deck.store_path.as_ref() {
            Some(path) => shellexpand::full(path)
                .map(|path| PathBuf::from(path.into_owned()))
                .with_context(|| format!("cannot expand store path {:?}", path))?,
            None => default_data_dir().join(format!("{}.json", name)),
        };

        let deck_config = DeckConfig {
            name,
            default: deck.default.unwrap_or_default(),
            store_path,
            list_sort: deck.list_sort.unwrap_or_default(),
            list_filter: deck.list_filter.unwrap_or_default(),
        };
        trace!("deck config: {:?}", deck_config);

        info!("<< build deck from config and deck name");
        Ok(deck_config)
    }
}

/// Gets the directory decks are saved to when no store path is configured.
fn default_data_dir() -> PathBuf {
    if let Ok(dir) = env::var("XDG_DATA_HOME") {
        return PathBuf::from(dir).join("vocard");
    }

    let home_var = if cfg!(target_family = "windows") {
        "USERPROFILE"
    } else {
        "HOME"
    };
    env::var(home_var)
        .map(|home| PathBuf::from(home).join(".local").join("share").join("vocard"))
        .unwrap_or_else(|_| env::temp_dir().join("vocard"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(toml: &str) -> DeserializedConfig {
        DeserializedConfig::from_toml(toml).unwrap()
    }

    #[test]
    fn it_should_use_builtin_deck() {
        let deck = DeckConfig::from_config_and_opt_deck_name(&config(""), None).unwrap();

        assert_eq!(deck.name, "default");
        assert_eq!(deck.list_sort, SortMode::Added);
        assert_eq!(deck.list_filter, FilterMode::Active);
        assert!(deck.store_path.ends_with("default.json"));
    }

    #[test]
    fn it_should_select_default_deck() {
        let config = config(
            r#"
            [english]
            store-path = "/tmp/english.json"

            [german]
            default = true
            store-path = "/tmp/german.json"
            list-sort = "alpha"
            "#,
        );

        let deck = DeckConfig::from_config_and_opt_deck_name(&config, None).unwrap();
        assert_eq!(deck.name, "german");
        assert!(deck.default);
        assert_eq!(deck.store_path, PathBuf::from("/tmp/german.json"));
        assert_eq!(deck.list_sort, SortMode::Alpha);

        let deck = DeckConfig::from_config_and_opt_deck_name(&config, Some("english")).unwrap();
        assert_eq!(deck.name, "english");
        assert!(!deck.default);

        assert!(DeckConfig::from_config_and_opt_deck_name(&config, Some("french")).is_err());
    }

    #[test]
    fn it_should_select_single_deck() {
        let config = config(
            r#"
            [english]
            store-path = "/tmp/english.json"
            "#,
        );

        let deck = DeckConfig::from_config_and_opt_deck_name(&config, None).unwrap();
        assert_eq!(deck.name, "english");
    }

    #[test]
    fn it_should_select_deck_named_default() {
        let config = config(
            r#"
            [default]
            store-path = "/tmp/default.json"

            [english]
            store-path = "/tmp/english.json"
            "#,
        );

        let deck = DeckConfig::from_config_and_opt_deck_name(&config, Some("default")).unwrap();
        assert_eq!(deck.name, "default");
        assert_eq!(deck.store_path, PathBuf::from("/tmp/default.json"));

        let deck = DeckConfig::from_config_and_opt_deck_name(&config, None).unwrap();
        assert_eq!(deck.name, "default");
    }

    #[test]
    fn it_should_fail_on_unexpandable_store_path() {
        let config = config(
            r#"
            [english]
            store-path = "$VOCARD_UNDEFINED_DECK_DIR/english.json"
            "#,
        );

        let err = DeckConfig::from_config_and_opt_deck_name(&config, None).unwrap_err();
        assert!(err.to_string().contains("cannot expand store path"));
    }

    #[test]
    fn it_should_fail_without_default_deck() {
        let config = config(
            r#"
            [english]
            [german]
            "#,
        );

        assert!(DeckConfig::from_config_and_opt_deck_name(&config, None).is_err());
    }
}
