//! Schema drift check between the prior snapshot and the current table.
//!
//! Drift is loss only: a column present before and missing now fails the
//! run, while newly added columns are accepted and just logged.

use std::collections::BTreeSet;
use tracing::{error, info};

use crate::error::{EtlError, Result};

pub fn reconcile(current: &BTreeSet<String>, prior: &BTreeSet<String>) -> Result<()> {
    info!("comparing column names with previous snapshot");

    let added: Vec<&String> = current.difference(prior).collect();
    if !added.is_empty() {
        info!(count = added.len(), columns = ?added, "new columns since previous snapshot");
    }

    let missing: Vec<String> = prior.difference(current).cloned().collect();
    if missing.is_empty() {
        return Ok(());
    }

    error!(
        "{} differences found between previous and current column names",
        missing.len()
    );
    Err(EtlError::SchemaDrift {
        count: missing.len(),
        missing,
    })
}
