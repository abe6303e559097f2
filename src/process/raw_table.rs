use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use chrono::{Datelike, NaiveDate};
use std::io::Cursor;
use tracing::{debug, info, warn};

use crate::error::{EtlError, Result};

/// One spreadsheet cell, reduced to what the reshape needs.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
    Date(NaiveDate),
    Empty,
}

impl Cell {
    /// Render the cell as a label (row name or period header).
    pub fn as_label(&self) -> String {
        match self {
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            Cell::Number(n) => n.to_string(),
            Cell::Text(s) => s.clone(),
            // `YYYY q`, the same shape as the sheet's text period headers
            Cell::Date(d) => format!("{} {}", d.year(), d.month0() / 3 + 1),
            Cell::Empty => String::new(),
        }
    }

    /// Numeric value of the cell; text that does not parse, and non-finite
    /// values such as `NaN` or `inf`, count as missing.
    pub fn as_number(&self) -> Option<f64> {
        let v = match self {
            Cell::Number(n) => Some(*n),
            Cell::Text(s) => s.trim().parse::<f64>().ok(),
            Cell::Date(_) | Cell::Empty => None,
        };
        v.filter(|x| x.is_finite())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) | Cell::Date(_) => false,
        }
    }
}

impl From<&Data> for Cell {
    fn from(d: &Data) -> Self {
        match d {
            Data::Float(f) => Cell::Number(*f),
            Data::Int(i) => Cell::Number(*i as f64),
            Data::String(s) => Cell::Text(s.clone()),
            Data::DateTime(dt) => match dt.as_datetime() {
                Some(ts) => Cell::Date(ts.date()),
                None => invalid_date(d),
            },
            Data::DateTimeIso(s) => {
                match s.get(..10).map(|p| NaiveDate::parse_from_str(p, "%Y-%m-%d")) {
                    Some(Ok(date)) => Cell::Date(date),
                    _ => invalid_date(d),
                }
            }
            _ => Cell::Empty,
        }
    }
}

/// A date cell calamine cannot convert; the text never parses as a period.
fn invalid_date(d: &Data) -> Cell {
    warn!(cell = %d, "unconvertible date cell");
    Cell::Text(format!("invalid date cell {}", d))
}

/// The wide source sheet.
///
/// Row 0 is the header row: cell 0 names the label axis and cells `1..`
/// hold the period labels. Metric rows follow after the configured
/// header-skip rows, each with its name in cell 0.
#[derive(Debug, Clone, Default)]
pub struct RawSheet {
    pub rows: Vec<Vec<Cell>>,
}

impl RawSheet {
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// Read `sheet_name` out of an in-memory `.xlsx` workbook.
    #[tracing::instrument(level = "info", skip(bytes), fields(len = bytes.len()))]
    pub fn from_xlsx(bytes: Vec<u8>, sheet_name: &str) -> Result<Self> {
        info!("reading source workbook");
        let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))
            .map_err(|e| EtlError::Sheet(format!("failed to open workbook: {}", e)))?;

        let range = workbook.worksheet_range(sheet_name).map_err(|e| {
            EtlError::Sheet(format!("failed to read sheet `{}`: {}", sheet_name, e))
        })?;

        let rows: Vec<Vec<Cell>> = range
            .rows()
            .map(|row| row.iter().map(Cell::from).collect())
            .collect();
        debug!(rows = rows.len(), width = range.width(), "sheet loaded");

        Ok(Self { rows })
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::PeriodParser;
    use calamine::{ExcelDateTime, ExcelDateTimeType};

    #[test]
    fn integral_numbers_render_without_fraction() {
        assert_eq!(Cell::Number(1999.0).as_label(), "1999");
        assert_eq!(Cell::Number(2.5).as_label(), "2.5");
        assert_eq!(Cell::Text("2004 Q4".into()).as_label(), "2004 Q4");
        assert_eq!(Cell::Empty.as_label(), "");
    }

    #[test]
    fn non_numeric_text_is_missing() {
        assert_eq!(Cell::Text(" 12.5 ".into()).as_number(), Some(12.5));
        assert_eq!(Cell::Text("[x]".into()).as_number(), None);
        assert_eq!(Cell::Empty.as_number(), None);
        assert!(Cell::Text("   ".into()).is_empty());
    }

    #[test]
    fn non_finite_text_is_missing() {
        for raw in ["NaN", "nan", "inf", "-infinity"] {
            assert_eq!(Cell::Text(raw.into()).as_number(), None, "{}", raw);
        }
        assert_eq!(Cell::Number(f64::NAN).as_number(), None);
    }

    #[test]
    fn date_cells_become_quarter_labels() {
        // serial 44651 is 2022-03-31
        let cell = Cell::from(&Data::DateTime(ExcelDateTime::new(
            44651.0,
            ExcelDateTimeType::DateTime,
            false,
        )));
        assert_eq!(cell, Cell::Date(NaiveDate::from_ymd_opt(2022, 3, 31).unwrap()));
        assert_eq!(cell.as_label(), "2022 1");
        assert_eq!(cell.as_number(), None);
        assert_eq!(
            PeriodParser::default().parse(&cell.as_label()).unwrap(),
            NaiveDate::from_ymd_opt(2022, 3, 31).unwrap()
        );

        let iso = Cell::from(&Data::DateTimeIso("2019-11-01T00:00:00".into()));
        assert_eq!(iso.as_label(), "2019 4");
    }

    #[test]
    fn unconvertible_date_fails_period_parsing() {
        let cell = Cell::from(&Data::DateTimeIso("sometime".into()));
        assert!(matches!(
            PeriodParser::default().parse(&cell.as_label()),
            Err(EtlError::DateParse { .. })
        ));
    }

    #[test]
    fn calamine_cells_map_to_cells() {
        assert_eq!(Cell::from(&Data::Int(3)), Cell::Number(3.0));
        assert_eq!(Cell::from(&Data::Float(1.5)), Cell::Number(1.5));
        assert_eq!(Cell::from(&Data::String("a".into())), Cell::Text("a".into()));
        assert_eq!(Cell::from(&Data::Bool(true)), Cell::Empty);
        assert_eq!(Cell::from(&Data::Empty), Cell::Empty);
    }

    #[test]
    fn garbage_bytes_are_a_sheet_error() {
        let err = RawSheet::from_xlsx(b"not a workbook".to_vec(), "Quarter").unwrap_err();
        assert!(matches!(err, EtlError::Sheet(_)));
    }
}
