//! Report period resolution for the CLI and other callers holding raw tags.

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::reporting::{DateRange, DateRangePreset};

/// Resolves a preset tag as the report views do: unknown tags mean
/// "this month", and `today` defaults to the local date.
pub fn resolve_date_range(tag: &str, today: Option<NaiveDate>) -> DateRange {
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    DateRangePreset::parse_lenient(tag).resolve(today)
}

/// One option of the period selector.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetOption {
    pub value: DateRangePreset,
    pub label: &'static str,
    pub range: DateRange,
}

/// All presets with their labels, resolved against `today`.
pub fn list_presets(today: NaiveDate) -> Vec<PresetOption> {
    DateRangePreset::ALL
        .iter()
        .map(|preset| PresetOption {
            value: *preset,
            label: preset.label(),
            range: preset.resolve(today),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_tags_leniently() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let r = resolve_date_range("last-quarter", Some(today));
        assert_eq!(r.to_string(), "2024-10-01..2024-12-31");

        let fallback = resolve_date_range("fiscal_year", Some(today));
        assert_eq!(fallback, DateRange::for_preset(DateRangePreset::ThisMonth, today));
    }

    #[test]
    fn lists_every_preset_in_selector_order() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let options = list_presets(today);
        assert_eq!(options.len(), 6);
        assert_eq!(options[0].label, "This Month");
        assert_eq!(options[0].range.to_string(), "2024-02-01..2024-02-29");

        let json = serde_json::to_value(&options[5]).unwrap();
        assert_eq!(json["value"], "last_year");
        assert_eq!(json["range"]["startDate"], "2023-01-01");
    }
}
