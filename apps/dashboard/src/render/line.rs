use crate::domain::{Rgb, FIRST_YEAR, LAST_YEAR};
use crate::store::DependencyRow;
use crate::Commodity;
use serde::Serialize;

pub const Y_BOUNDS: [f64; 2] = [0.0, 110.0];

/// Time series of one country's dependency with a bar at the selected year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineFigure {
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub points: Vec<(f64, f64)>,
    /// `(year, value)` of the highlighted year, present only when it has data.
    pub bar: Option<(f64, f64)>,
    pub color: Rgb,
    pub legend: Option<String>,
    pub y_label: String,
}

pub fn line_figure(
    rows: &[DependencyRow],
    commodity: Commodity,
    year: Option<i32>,
    partner: &str,
) -> LineFigure {
    let points = rows
        .iter()
        .map(|row| (f64::from(row.year), row.import))
        .collect();
    let bar = year.and_then(|year| {
        rows.iter()
            .find(|row| row.year == year)
            .map(|row| (f64::from(row.year), row.import))
    });

    LineFigure {
        x_bounds: [f64::from(FIRST_YEAR), f64::from(LAST_YEAR)],
        y_bounds: Y_BOUNDS,
        points,
        bar,
        color: commodity.line_color(),
        legend: rows.first().map(|row| row.country.clone()),
        y_label: format!("Dependency on {partner} in %"),
    }
}
