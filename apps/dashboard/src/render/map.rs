use crate::domain::Rgb;
use crate::query::MapRow;
use crate::Commodity;
use serde::Serialize;

/// Lower end of the colour scale, in percent.
pub const COLOR_LOW: f64 = 0.0;
/// Upper end of the colour scale, in percent.
pub const COLOR_HIGH: f64 = 100.0;

/// Maps a percentage linearly onto an 8-colour ramp over `[low, high]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMapper {
    palette: &'static [Rgb; 8],
    low: f64,
    high: f64,
}

impl ColorMapper {
    pub const fn new(palette: &'static [Rgb; 8]) -> Self {
        Self {
            palette,
            low: COLOR_LOW,
            high: COLOR_HIGH,
        }
    }

    /// Index of the bin `value` falls into. Out-of-range values saturate.
    pub fn bin(&self, value: f64) -> usize {
        let bins = self.palette.len();
        let scaled = ((value - self.low) / (self.high - self.low) * bins as f64).floor();
        if scaled <= 0.0 {
            0
        } else {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let bin = scaled as usize;
            bin.min(bins - 1)
        }
    }

    /// Fill colour for a value; `None` and NaN stay unfilled.
    pub fn color(&self, value: Option<f64>) -> Option<Rgb> {
        value
            .filter(|v| !v.is_nan())
            .map(|v| self.palette[self.bin(v)])
    }

    pub const fn palette(&self) -> &'static [Rgb; 8] {
        self.palette
    }

    /// Colour-bar ticks every 20 percent.
    pub fn ticks(&self) -> Vec<ColorBarTick> {
        (0..=5)
            .map(|step| {
                let value = self.low + (self.high - self.low) * f64::from(step) / 5.0;
                ColorBarTick {
                    value,
                    label: format!("{value:.0}%"),
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorBarTick {
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionFill {
    pub index: usize,
    pub country: String,
    pub import: Option<f64>,
    pub fill: Option<Rgb>,
}

/// A choropleth of every region for one commodity and year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapFigure {
    pub commodity: Commodity,
    pub regions: Vec<RegionFill>,
    /// Region drawn with the selection outline, if any.
    pub highlight: Option<usize>,
    pub palette: [Rgb; 8],
    pub ticks: Vec<ColorBarTick>,
    pub hover_label: String,
}

impl MapFigure {
    pub fn region(&self, index: usize) -> Option<&RegionFill> {
        self.regions.get(index)
    }

    /// Tooltip rows for the region under the pointer.
    pub fn tooltip(&self, index: usize) -> Option<[(String, String); 2]> {
        let region = self.region(index)?;
        let value = region
            .import
            .filter(|v| !v.is_nan())
            .map_or_else(|| "no data".to_string(), |v| format!("{v:.1} %"));
        Some([
            ("Country".to_string(), region.country.clone()),
            (self.hover_label.clone(), value),
        ])
    }
}

pub fn map_figure(
    rows: &[MapRow],
    commodity: Commodity,
    highlight: Option<usize>,
    partner: &str,
) -> MapFigure {
    let mapper = ColorMapper::new(commodity.palette());
    let regions = rows
        .iter()
        .map(|row| RegionFill {
            index: row.index,
            country: row.country.clone(),
            import: row.import,
            fill: mapper.color(row.import),
        })
        .collect();

    MapFigure {
        commodity,
        regions,
        highlight,
        palette: *mapper.palette(),
        ticks: mapper.ticks(),
        hover_label: hover_label(partner, commodity),
    }
}

/// Second tooltip row label, e.g. "Russian Natural Gas Import".
pub fn hover_label(partner: &str, commodity: Commodity) -> String {
    format!("{} {} Import", demonym(partner), commodity.label())
}

fn demonym(partner: &str) -> String {
    match partner {
        "Russia" => "Russian".to_string(),
        "Norway" => "Norwegian".to_string(),
        "United States" => "US".to_string(),
        "Algeria" => "Algerian".to_string(),
        "Qatar" => "Qatari".to_string(),
        other => other.to_string(),
    }
}
