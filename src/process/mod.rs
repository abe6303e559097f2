// src/process/mod.rs
//! Wide sheet → tidy table.

pub mod columns;
pub mod date_parser;
pub mod raw_table;
pub mod reshape;
pub mod table;

pub use columns::disambiguate;
pub use date_parser::{PeriodParser, Quarter};
pub use raw_table::{Cell, RawSheet};
pub use reshape::{LongRow, LongTable, ReshapeEngine, DATE_COLUMN};
pub use table::{TidyRecord, TidyTable};
