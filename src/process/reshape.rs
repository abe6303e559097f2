use tracing::{debug, info};

use super::raw_table::{Cell, RawSheet};
use crate::config::ReshapeConfig;
use crate::error::{EtlError, Result};

/// Name given to the column holding the period labels after transposition.
pub const DATE_COLUMN: &str = "date";

/// One period of the transposed sheet, period label still raw.
#[derive(Debug, Clone, PartialEq)]
pub struct LongRow {
    pub period: String,
    pub values: Vec<Option<f64>>,
}

/// Transposed sheet: one row per period, one column per metric.
///
/// `columns[0]` is always [`DATE_COLUMN`]; `columns[1..]` are the metric
/// labels exactly as they appeared in the sheet, duplicates included.
#[derive(Debug, Clone, PartialEq)]
pub struct LongTable {
    pub columns: Vec<String>,
    pub rows: Vec<LongRow>,
}

impl LongTable {
    pub fn width(&self) -> usize {
        self.columns.len()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReshapeEngine {
    config: ReshapeConfig,
}

impl ReshapeEngine {
    pub fn new(config: ReshapeConfig) -> Self {
        Self { config }
    }

    /// Transpose the wide sheet into a [`LongTable`].
    ///
    /// Period columns with an empty header and metric rows with neither a
    /// label nor a value are dropped; everything else is kept in order.
    pub fn reshape(&self, sheet: &RawSheet) -> Result<LongTable> {
        let skip = self.config.header_skip;
        if sheet.height() < 1 + skip {
            return Err(EtlError::Sheet(format!(
                "sheet has {} rows, need at least {} (header + {} skipped)",
                sheet.height(),
                1 + skip,
                skip
            )));
        }

        // (source column index, period label)
        let header = &sheet.rows[0];
        let periods: Vec<(usize, String)> = header
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, c)| !c.is_empty())
            .map(|(j, c)| (j, c.as_label()))
            .collect();

        let metric_rows: Vec<&Vec<Cell>> = sheet.rows[1 + skip..]
            .iter()
            .filter(|row| !row.iter().all(Cell::is_empty))
            .collect();

        let mut columns = Vec::with_capacity(metric_rows.len() + 1);
        columns.push(DATE_COLUMN.to_string());
        columns.extend(
            metric_rows
                .iter()
                .map(|row| row.first().map(Cell::as_label).unwrap_or_default()),
        );

        let rows: Vec<LongRow> = periods
            .iter()
            .map(|(j, label)| LongRow {
                period: label.clone(),
                values: metric_rows
                    .iter()
                    .map(|row| row.get(*j).and_then(Cell::as_number))
                    .collect(),
            })
            .collect();

        debug!(periods = rows.len(), metrics = metric_rows.len(), "transposed");
        info!(
            rows = rows.len(),
            columns = columns.len(),
            "reshaped sheet into long form"
        );
        Ok(LongTable { columns, rows })
    }
}
