pub mod output_args;

pub mod printer_service;
pub use printer_service::*;

pub mod table;
pub use table::*;
