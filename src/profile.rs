// src/profile.rs

use std::io::Write;
use tracing::info;

use crate::error::Result;
use crate::process::TidyTable;

pub const ROW_COUNT: &str = "Row Count";
pub const COLUMN_COUNT: &str = "Column Count";
pub const NULL_COUNT: &str = "Null Count";

/// One line of the profiling report.
///
/// Synthetic count rows only fill `max`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileEntry {
    pub field: String,
    pub max: Option<f64>,
    pub min: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

impl ProfileEntry {
    fn count(field: &str, n: usize) -> Self {
        Self {
            field: field.to_string(),
            max: Some(n as f64),
            min: None,
            mean: None,
            median: None,
        }
    }

    fn from_values(field: &str, mut values: Vec<f64>) -> Self {
        if values.is_empty() {
            return Self {
                field: field.to_string(),
                max: None,
                min: None,
                mean: None,
                median: None,
            };
        }
        values.sort_by(f64::total_cmp);
        let n = values.len();
        let mean = values.iter().sum::<f64>() / n as f64;
        let median = if n % 2 == 1 {
            values[n / 2]
        } else {
            (values[n / 2 - 1] + values[n / 2]) / 2.0
        };
        Self {
            field: field.to_string(),
            max: values.last().copied(),
            min: values.first().copied(),
            mean: Some(mean),
            median: Some(median),
        }
    }
}

/// Per-column max/min/mean/median (missing values skipped), followed by the
/// row, column and null counts.
pub fn profile(table: &TidyTable) -> Vec<ProfileEntry> {
    let mut entries: Vec<ProfileEntry> = table
        .metrics
        .iter()
        .enumerate()
        .map(|(idx, name)| ProfileEntry::from_values(name, table.column(idx).flatten().collect()))
        .collect();

    entries.push(ProfileEntry::count(ROW_COUNT, table.row_count()));
    entries.push(ProfileEntry::count(COLUMN_COUNT, table.column_count()));
    entries.push(ProfileEntry::count(NULL_COUNT, table.null_count()));

    info!(fields = table.metrics.len(), "compiled profile report");
    entries
}

/// `field,max,min,mean,median`; absent statistics are empty fields.
pub fn write_profile_csv<W: Write>(entries: &[ProfileEntry], writer: W) -> Result<()> {
    let fmt = |v: Option<f64>| v.map(|x| x.to_string()).unwrap_or_default();
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["field", "max", "min", "mean", "median"])?;
    for e in entries {
        wtr.write_record([
            e.field.clone(),
            fmt(e.max),
            fmt(e.min),
            fmt(e.mean),
            fmt(e.median),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
