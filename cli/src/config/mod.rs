pub mod config_args;
pub mod deck_args;

pub mod deserialized_config;
pub use deserialized_config::*;

pub mod deserialized_deck_config;
pub use deserialized_deck_config::*;

pub mod deck_config;
pub use deck_config::*;
