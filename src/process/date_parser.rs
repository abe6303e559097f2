use chrono::NaiveDate;

use crate::config::PeriodConfig;
use crate::error::{EtlError, Result};

/// Calendar quarter, built from its digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    pub fn from_digit(c: char) -> Option<Self> {
        match c {
            '1' => Some(Quarter::Q1),
            '2' => Some(Quarter::Q2),
            '3' => Some(Quarter::Q3),
            '4' => Some(Quarter::Q4),
            _ => None,
        }
    }

    /// Last calendar day of this quarter in `year`.
    pub fn end_date(self, year: i32) -> Option<NaiveDate> {
        let (month, day) = match self {
            Quarter::Q1 => (3, 31),
            Quarter::Q2 => (6, 30),
            Quarter::Q3 => (9, 30),
            Quarter::Q4 => (12, 31),
        };
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

/// Turns labels like `"1999 1st Quarter"` into quarter-end dates.
#[derive(Debug, Clone)]
pub struct PeriodParser {
    config: PeriodConfig,
}

impl PeriodParser {
    pub fn new(config: PeriodConfig) -> Self {
        Self { config }
    }

    /// Strip the configured characters everywhere, keep the leading
    /// `YYYY` + digit token and map the digit to its quarter end.
    pub fn parse(&self, raw: &str) -> Result<NaiveDate> {
        let err = || EtlError::DateParse {
            label: raw.to_string(),
        };

        let cleaned: String = raw
            .chars()
            .filter(|c| !self.config.strip_chars.contains(c))
            .collect();
        let token: Vec<char> = cleaned.chars().take(self.config.token_len).collect();
        if token.len() < self.config.token_len {
            return Err(err());
        }

        let (year_part, quarter_part) = token.split_at(token.len() - 1);
        let quarter = Quarter::from_digit(quarter_part[0]).ok_or_else(err)?;
        let year_str: String = year_part.iter().collect();
        if !year_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(err());
        }
        let year: i32 = year_str.parse().map_err(|_| err())?;

        quarter.end_date(year).ok_or_else(err)
    }
}

impl Default for PeriodParser {
    fn default() -> Self {
        Self::new(PeriodConfig::default())
    }
}
