use std::{
    collections::BTreeSet,
    fs::File,
    path::{Path, PathBuf},
};
use tracing::{info, warn};

use super::write::write_atomic;
use crate::error::Result;
use crate::process::TidyTable;

/// The previously accepted table, kept as a CSV file whose header is the
/// prior column set.
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl AsRef<Path>, file_name: &str) -> Self {
        Self {
            path: dir.as_ref().join(file_name),
        }
    }

    /// Column names of the prior snapshot, or `None` on a first run.
    pub fn load_prior(&self) -> Result<Option<BTreeSet<String>>> {
        if !self.path.is_file() {
            warn!(path = %self.path.display(), "no previous snapshot; skipping schema comparison");
            return Ok(None);
        }
        let file = File::open(&self.path)?;
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(file);
        let cols: BTreeSet<String> = rdr.headers()?.iter().map(str::to_string).collect();
        info!(path = %self.path.display(), columns = cols.len(), "loaded previous snapshot");
        Ok(Some(cols))
    }

    /// Replace the snapshot with `table`.
    pub fn publish(&self, table: &TidyTable) -> Result<()> {
        write_atomic(&self.path, |w| table.write_csv(w))?;
        info!(path = %self.path.display(), "updated latest snapshot");
        Ok(())
    }
}
