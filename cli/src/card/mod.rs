pub mod card_args;
pub mod card_handlers;
pub mod card_views;
