// src/history/mod.rs

pub mod state;

pub use state::LinkStatus;

use std::{
    collections::HashSet,
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};
use tracing::{info, warn};

use crate::error::Result;

/// Append-only log of document links already processed, one per line.
pub struct LinkHistory {
    path: PathBuf,
    seen: HashSet<String>,
}

impl LinkHistory {
    /// Open the log at `path`, creating an empty one if needed, and load
    /// every recorded link.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        if !path.is_file() {
            fs::File::create(&path)?;
        }

        let seen: HashSet<String> = fs::read_to_string(&path)?
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
        info!(path = %path.display(), links = seen.len(), "loaded link history");

        Ok(Self { path, seen })
    }

    /// Exact, whole-line match against the log.
    pub fn check(&self, link: &str) -> LinkStatus {
        info!("checking for new source document");
        if self.seen.contains(link.trim()) {
            warn!(link, "no new source document detected");
            LinkStatus::Duplicate
        } else {
            LinkStatus::New
        }
    }

    /// Append `link` to the log. Recording the same link twice is a no-op.
    pub fn record(&mut self, link: &str) -> Result<()> {
        let link = link.trim();
        if !self.seen.insert(link.to_string()) {
            return Ok(());
        }
        let mut f = OpenOptions::new().append(true).open(&self.path)?;
        writeln!(f, "{}", link)?;
        f.sync_all()?;
        info!(link, "recorded processed link");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
