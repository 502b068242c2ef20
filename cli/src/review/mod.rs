pub mod review_args;
pub mod review_handlers;
