//! Quarterly energy-trends spreadsheet → tidy, date-keyed CSV with a
//! schema drift check and a profiling report.

pub mod config;
pub mod error;
pub mod fetch;
pub mod history;
pub mod pipeline;
pub mod process;
pub mod profile;
pub mod schema;

pub use config::PipelineConfig;
pub use error::{EtlError, Result};
pub use pipeline::{run, run_snapshot, transform, RunOutcome, RunReport};
