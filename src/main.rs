use anyhow::{bail, Context, Result};
use quarterly_etl::{run, PipelineConfig, RunOutcome};
use reqwest::Client;
use std::{env, fs, path::PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    // ─── 2) arguments & config ───────────────────────────────────────
    let mut args = env::args().skip(1);
    let output_dir = match args.next() {
        Some(p) => PathBuf::from(p),
        None => bail!("usage: quarterly-etl <OUTPUT_DIR> [CONFIG_JSON]"),
    };
    let config = match args.next() {
        Some(path) => PipelineConfig::from_json_file(&path)
            .with_context(|| format!("loading config {}", path))?,
        None => PipelineConfig::default(),
    };
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("creating output directory {}", output_dir.display()))?;

    // ─── 3) run one snapshot ─────────────────────────────────────────
    let client = Client::new();
    match run(&client, &output_dir, &config)
        .await
        .context("pipeline run failed")?
    {
        RunOutcome::Published(report) => info!(
            rows = report.rows,
            columns = report.columns,
            data = %report.data_path.display(),
            profile = %report.profile_path.display(),
            "all done"
        ),
        RunOutcome::AlreadyProcessed { link } => {
            warn!(link = %link, "no new source document; exiting")
        }
    }
    Ok(())
}
