// src/error.rs

use thiserror::Error;

/// Every way a snapshot run can fail.
///
/// A link that was already processed is *not* an error; see
/// [`crate::history::LinkStatus`].
#[derive(Debug, Error)]
pub enum EtlError {
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("no document link containing `{marker}` found on the source page")]
    NoLinkFound { marker: String },

    #[error("spreadsheet error: {0}")]
    Sheet(String),

    #[error("cannot convert period label {label:?} to a quarter-end date")]
    DateParse { label: String },

    #[error("column count mismatch: expected {expected}, found {found}")]
    ColumnCount { expected: usize, found: usize },

    #[error("{count} column(s) present in the previous snapshot are missing now: {missing:?}")]
    SchemaDrift { count: usize, missing: Vec<String> },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, EtlError>;
