use serde::Deserialize;
use vocard_lib::listing::{FilterMode, SortMode};

/// Represents the user deck from the config file.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DeserializedDeckConfig {
    /// Makes this deck the default one. Defaults to false.
    pub default: Option<bool>,
    /// Represents the file the cards are saved to. Defaults to
    /// $XDG_DATA_HOME/vocard/<deck-name>.json.
    pub store_path: Option<String>,
    /// Represents the default sort of the list command. Defaults to added.
    pub list_sort: Option<SortMode>,
    /// Represents the default filter of the list command. Defaults to active.
    pub list_filter: Option<FilterMode>,
}
