// src/config.rs

use serde::Deserialize;
use std::{fs, path::Path, path::PathBuf};
use tracing::info;

use crate::error::{EtlError, Result};

pub const DEFAULT_PAGE_URL: &str =
    "https://www.gov.uk/government/statistics/oil-and-oil-products-section-3-energy-trends";

/// Settings for a single snapshot run.
///
/// Every field has a default, so a JSON override file only needs the keys it
/// changes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Page listing the downloadable documents.
    pub page_url: String,
    /// Substring that identifies the document link on that page.
    pub link_marker: String,
    /// Worksheet holding the quarterly series.
    pub sheet_name: String,
    /// Directory holding `snapshot_file` and `links_file`.
    pub state_dir: PathBuf,
    pub snapshot_file: String,
    pub links_file: String,
    pub reshape: ReshapeConfig,
    pub period: PeriodConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            page_url: DEFAULT_PAGE_URL.to_string(),
            link_marker: "ET_3.1_".to_string(),
            sheet_name: "Quarter".to_string(),
            state_dir: PathBuf::from("."),
            snapshot_file: "Latest_Version.csv".to_string(),
            links_file: "links.txt".to_string(),
            reshape: ReshapeConfig::default(),
            period: PeriodConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Load overrides from a JSON file; absent keys keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let cfg: PipelineConfig = serde_json::from_str(&text)
            .map_err(|e| EtlError::Config(format!("parsing {}: {}", path.display(), e)))?;
        cfg.validate()?;
        info!(path = %path.display(), "loaded pipeline config");
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.link_marker.is_empty() {
            return Err(EtlError::Config("link_marker must not be empty".into()));
        }
        if self.period.token_len < 2 {
            return Err(EtlError::Config(format!(
                "period.token_len must be at least 2, got {}",
                self.period.token_len
            )));
        }
        Ok(())
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.state_dir.join(&self.snapshot_file)
    }

    pub fn links_path(&self) -> PathBuf {
        self.state_dir.join(&self.links_file)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReshapeConfig {
    /// Non-data rows between the header row and the first metric row.
    pub header_skip: usize,
}

impl Default for ReshapeConfig {
    fn default() -> Self {
        Self { header_skip: 3 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PeriodConfig {
    /// Characters removed from a period label wherever they occur.
    pub strip_chars: Vec<char>,
    /// Length of the `YYYY` + quarter-digit token.
    pub token_len: usize,
}

impl Default for PeriodConfig {
    fn default() -> Self {
        Self {
            strip_chars: vec![' ', '\n', '\r', '\t'],
            token_len: 5,
        }
    }
}
