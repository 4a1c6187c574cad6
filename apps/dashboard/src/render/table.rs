use crate::selection::Selection;
use crate::store::{DependencyRow, ExporterRow};
use serde::Serialize;

/// One-row summary of the selected country at the selected year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryTable {
    pub country: String,
    pub import_pct: Option<f64>,
    pub import_value: Option<f64>,
    pub unit: &'static str,
}

impl SummaryTable {
    pub fn headers(&self) -> [String; 3] {
        [
            "Country".to_string(),
            "Import Percentage (%)".to_string(),
            format!("Import Value ({})", self.unit),
        ]
    }

    /// Formatted cells; missing values are blank.
    pub fn cells(&self) -> [String; 3] {
        [
            self.country.clone(),
            self.import_pct.map_or_else(String::new, |v| format!("{v:.1}")),
            self.import_value.map_or_else(String::new, |v| format!("{v:.0}")),
        ]
    }
}

pub fn summary_table(
    selection: &Selection,
    time_series: &[DependencyRow],
    breakdown: &[ExporterRow],
    partner: &str,
) -> SummaryTable {
    SummaryTable {
        country: selection.country.clone(),
        import_pct: time_series
            .iter()
            .find(|row| row.year == selection.year)
            .map(|row| row.import),
        import_value: breakdown
            .iter()
            .find(|row| row.partner == partner)
            .map(|row| row.import),
        unit: selection.commodity.unit(),
    }
}
