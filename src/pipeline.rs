// src/pipeline.rs

use reqwest::Client;
use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};
use tracing::{info, instrument, warn};

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::fetch::{download_document, fetch_document_links, file_stem, select_link};
use crate::history::{LinkHistory, LinkStatus};
use crate::process::{disambiguate, PeriodParser, RawSheet, ReshapeEngine, TidyTable};
use crate::profile::{profile, write_profile_csv, ProfileEntry};
use crate::schema::{reconcile, write_atomic, SnapshotStore};

/// What a successful run wrote.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub file_stem: String,
    pub data_path: PathBuf,
    pub profile_path: PathBuf,
    pub rows: usize,
    pub columns: usize,
    pub profile: Vec<ProfileEntry>,
}

#[derive(Debug)]
pub enum RunOutcome {
    Published(RunReport),
    /// The selected link is already in the link history; nothing was written.
    AlreadyProcessed { link: String },
}

/// Reshape, name and date the sheet.
pub fn transform(sheet: &RawSheet, config: &PipelineConfig) -> Result<TidyTable> {
    let long = ReshapeEngine::new(config.reshape.clone()).reshape(sheet)?;

    info!("adjusting column names");
    let names = disambiguate(&long.columns);

    info!("converting date format");
    let parser = PeriodParser::new(config.period.clone());
    TidyTable::build(&long, &parser, names)
}

/// Process one sheet end to end and publish the results.
///
/// The prior snapshot is read and compared before anything is written; the
/// data file, the profile and the new snapshot are only written once the
/// comparison passes.
#[instrument(level = "info", skip(sheet, config), fields(out = %output_dir.display()))]
pub fn run_snapshot(
    sheet: &RawSheet,
    file_stem: &str,
    output_dir: &Path,
    config: &PipelineConfig,
) -> Result<RunReport> {
    let table = transform(sheet, config)?;

    let store = SnapshotStore::new(&config.state_dir, &config.snapshot_file);
    if let Some(prior) = store.load_prior()? {
        let current: BTreeSet<String> = table.column_names().into_iter().collect();
        reconcile(&current, &prior)?;
    }

    let entries = profile(&table);

    let data_path = output_dir.join(format!("{}.csv", file_stem));
    let profile_path = output_dir.join(format!("{}_data_profiling.csv", file_stem));
    write_atomic(&data_path, |w| table.write_csv(w))?;
    write_atomic(&profile_path, |w| write_profile_csv(&entries, w))?;
    store.publish(&table)?;

    info!(
        data = %data_path.display(),
        profile = %profile_path.display(),
        "complete"
    );
    Ok(RunReport {
        file_stem: file_stem.to_string(),
        data_path,
        profile_path,
        rows: table.row_count(),
        columns: table.column_count(),
        profile: entries,
    })
}

/// Find the latest document, skip it if already processed, otherwise
/// download and publish it and record the link.
pub async fn run(client: &Client, output_dir: &Path, config: &PipelineConfig) -> Result<RunOutcome> {
    let links = fetch_document_links(client, &config.page_url).await?;
    let link = select_link(&links, &config.link_marker)?;
    let stem = file_stem(&link);

    let mut history = LinkHistory::open(config.links_path())?;
    let status: LinkStatus = history.check(&link);
    info!(link = %link, status = status.as_str(), "link history checked");
    if !status.is_new() {
        warn!(link = %link, "already processed; nothing to do");
        return Ok(RunOutcome::AlreadyProcessed { link });
    }

    let bytes = download_document(client, &link).await?;
    let sheet = RawSheet::from_xlsx(bytes, &config.sheet_name)?;
    let report = run_snapshot(&sheet, &stem, output_dir, config)?;

    history.record(&link)?;
    Ok(RunOutcome::Published(report))
}
