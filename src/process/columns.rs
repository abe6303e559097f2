use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::reshape::DATE_COLUMN;

/// A bracketed unit annotation such as `[kb/d]` anywhere in the label.
static UNIT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[.*\]").expect("unit pattern should compile"));

pub fn has_unit(label: &str) -> bool {
    UNIT_PATTERN.is_match(label)
}

/// Give every transposed column a readable name.
///
/// The sheet states a bracketed unit once on a group's first row and leaves
/// it implicit on the sub-rows below, so each unit-less label inherits the
/// last bracketed label seen before it and becomes `"<prefix> - <label>"`.
/// Labels seen before any bracketed one take the prefix `date`; the period
/// column itself is named `date` and therefore stays `date`.
pub fn disambiguate(columns: &[String]) -> Vec<String> {
    let mut last_prefix: Option<&str> = None;

    columns
        .iter()
        .map(|name| {
            if has_unit(name) {
                last_prefix = Some(name.as_str());
            }
            let prefix = last_prefix.unwrap_or(DATE_COLUMN);
            if prefix == name {
                name.clone()
            } else {
                let joined = format!("{} - {}", prefix, name);
                debug!(from = %name, to = %joined, "prefixed column");
                joined
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn unit_is_carried_down_to_sub_metrics() {
        let input = strings(&[
            "Production [kb/d]",
            "Crude",
            "NGLs",
            "Imports [kb/d]",
            "Pipeline",
        ]);
        assert_eq!(
            disambiguate(&input),
            strings(&[
                "Production [kb/d]",
                "Production [kb/d] - Crude",
                "Production [kb/d] - NGLs",
                "Imports [kb/d]",
                "Imports [kb/d] - Pipeline",
            ])
        );
    }

    #[test]
    fn period_column_stays_date() {
        let input = strings(&["date", "Indigenous production [kt]", "Crude oil"]);
        assert_eq!(
            disambiguate(&input),
            strings(&[
                "date",
                "Indigenous production [kt]",
                "Indigenous production [kt] - Crude oil",
            ])
        );
    }

    #[test]
    fn labels_before_any_unit_get_date_prefix() {
        let input = strings(&["date", "Notes", "Total [kt]"]);
        assert_eq!(
            disambiguate(&input),
            strings(&["date", "date - Notes", "Total [kt]"])
        );
    }

    #[test]
    fn repeated_sub_metric_names_separate_by_group() {
        let input = strings(&["Exports [kt]", "Crude", "Imports [kt]", "Crude"]);
        let out = disambiguate(&input);
        assert_eq!(out[1], "Exports [kt] - Crude");
        assert_eq!(out[3], "Imports [kt] - Crude");
    }

    #[test]
    fn empty_input() {
        assert!(disambiguate(&[]).is_empty());
    }
}
