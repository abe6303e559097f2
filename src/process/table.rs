use chrono::NaiveDate;
use std::io::Write;
use tracing::info;

use super::date_parser::PeriodParser;
use super::reshape::{LongTable, DATE_COLUMN};
use crate::error::{EtlError, Result};

/// One period of the finished dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct TidyRecord {
    pub date: NaiveDate,
    pub values: Vec<Option<f64>>,
}

/// Rectangular dataset keyed by quarter-end date.
#[derive(Debug, Clone, PartialEq)]
pub struct TidyTable {
    /// Metric column names, `date` excluded.
    pub metrics: Vec<String>,
    pub records: Vec<TidyRecord>,
}

impl TidyTable {
    /// Parse every period label of `long` and attach the final column
    /// names. `names` covers all columns, `date` first.
    ///
    /// The first unparseable label aborts; no partial table is produced.
    pub fn build(long: &LongTable, parser: &PeriodParser, names: Vec<String>) -> Result<Self> {
        if names.len() != long.width() {
            return Err(EtlError::ColumnCount {
                expected: long.width(),
                found: names.len(),
            });
        }

        let records = long
            .rows
            .iter()
            .map(|row| {
                Ok(TidyRecord {
                    date: parser.parse(&row.period)?,
                    values: row.values.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let metrics = names.into_iter().skip(1).collect();
        info!(records = records.len(), "converted period labels to dates");
        Ok(Self { metrics, records })
    }

    pub fn column_names(&self) -> Vec<String> {
        std::iter::once(DATE_COLUMN.to_string())
            .chain(self.metrics.iter().cloned())
            .collect()
    }

    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    /// Columns including `date`.
    pub fn column_count(&self) -> usize {
        self.metrics.len() + 1
    }

    /// Values of metric column `idx`, in record order.
    pub fn column(&self, idx: usize) -> impl Iterator<Item = Option<f64>> + '_ {
        self.records
            .iter()
            .map(move |r| r.values.get(idx).copied().flatten())
    }

    pub fn null_count(&self) -> usize {
        self.records
            .iter()
            .map(|r| r.values.iter().filter(|v| v.is_none()).count())
            .sum()
    }

    /// Header plus one line per record; dates as `YYYY-MM-DD`, missing
    /// values as empty fields.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(self.column_names())?;
        for rec in &self.records {
            let mut line = Vec::with_capacity(self.column_count());
            line.push(rec.date.format("%Y-%m-%d").to_string());
            line.extend(
                rec.values
                    .iter()
                    .map(|v| v.map(|x| x.to_string()).unwrap_or_default()),
            );
            wtr.write_record(&line)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::reshape::LongRow;

    fn long() -> LongTable {
        LongTable {
            columns: vec!["date".into(), "Stocks [kt]".into(), "Crude".into()],
            rows: vec![
                LongRow {
                    period: "2019 1".into(),
                    values: vec![Some(1.5), None],
                },
                LongRow {
                    period: "2019\n2".into(),
                    values: vec![Some(2.0), Some(3.0)],
                },
            ],
        }
    }

    fn names() -> Vec<String> {
        vec![
            "date".into(),
            "Stocks [kt]".into(),
            "Stocks [kt] - Crude".into(),
        ]
    }

    #[test]
    fn builds_dated_records() {
        let table = TidyTable::build(&long(), &PeriodParser::default(), names()).unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 3);
        assert_eq!(
            table.records[1].date,
            NaiveDate::from_ymd_opt(2019, 6, 30).unwrap()
        );
        assert_eq!(table.null_count(), 1);
        assert_eq!(table.column(1).collect::<Vec<_>>(), vec![None, Some(3.0)]);
    }

    #[test]
    fn bad_label_aborts_whole_table() {
        let mut l = long();
        l.rows[1].period = "20195".into();
        let err = TidyTable::build(&l, &PeriodParser::default(), names()).unwrap_err();
        assert!(matches!(err, EtlError::DateParse { label } if label == "20195"));
    }

    #[test]
    fn name_count_must_match() {
        let err = TidyTable::build(&long(), &PeriodParser::default(), vec!["date".into()])
            .unwrap_err();
        assert!(matches!(
            err,
            EtlError::ColumnCount {
                expected: 3,
                found: 1
            }
        ));
    }

    #[test]
    fn csv_layout() {
        let table = TidyTable::build(&long(), &PeriodParser::default(), names()).unwrap();
        let mut buf = Vec::new();
        table.write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "date,Stocks [kt],Stocks [kt] - Crude\n2019-03-31,1.5,\n2019-06-30,2,3\n"
        );
    }
}
