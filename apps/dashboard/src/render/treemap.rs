//! Continent → partner treemap of one country's import breakdown.
//!
//! Cells are laid out with the squarified algorithm in a unit square and
//! shaded on a grey scale centred on the import-weighted average, so the
//! widget only has to scale rectangles to the terminal.

use crate::domain::Rgb;
use crate::store::ExporterRow;
use serde::Serialize;

/// Axis-aligned rectangle in unit space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UnitRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl UnitRect {
    pub const UNIT: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 1.0,
        height: 1.0,
    };

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreemapCell {
    pub label: String,
    /// Continent of a partner cell; `None` for the continents themselves.
    pub parent: Option<String>,
    pub value: f64,
    /// Value the shade is computed from.
    pub color_value: f64,
    pub color: Rgb,
    pub rect: UnitRect,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreemapFigure {
    pub continents: Vec<TreemapCell>,
    pub partners: Vec<TreemapCell>,
    /// Import-weighted average import, the centre of the grey scale.
    pub midpoint: Option<f64>,
}

impl TreemapFigure {
    pub fn is_empty(&self) -> bool {
        self.partners.is_empty()
    }
}

pub fn treemap_figure(rows: &[ExporterRow]) -> TreemapFigure {
    let leaves: Vec<&ExporterRow> = rows.iter().filter(|row| row.import > 0.0).collect();
    if leaves.is_empty() {
        return TreemapFigure {
            continents: Vec::new(),
            partners: Vec::new(),
            midpoint: None,
        };
    }

    // Group by continent, keeping first-seen order
    let mut groups: Vec<(String, Vec<&ExporterRow>)> = Vec::new();
    for row in leaves.iter().copied() {
        match groups.iter_mut().find(|(continent, _)| *continent == row.continent) {
            Some((_, members)) => members.push(row),
            None => groups.push((row.continent.clone(), vec![row])),
        }
    }

    let leaf_values: Vec<f64> = leaves.iter().map(|row| row.import).collect();
    let midpoint = weighted_average(&leaf_values);
    let shade = GreyScale::centred(&leaf_values, midpoint);

    let totals: Vec<f64> = groups
        .iter()
        .map(|(_, members)| members.iter().map(|row| row.import).sum())
        .collect();
    let continent_rects = squarify(&totals, UnitRect::UNIT);

    let mut continents = Vec::with_capacity(groups.len());
    let mut partners = Vec::with_capacity(leaves.len());
    for (((continent, members), total), rect) in groups.iter().zip(&totals).zip(continent_rects) {
        let values: Vec<f64> = members.iter().map(|row| row.import).collect();
        let color_value = weighted_average(&values);
        continents.push(TreemapCell {
            label: continent.clone(),
            parent: None,
            value: *total,
            color_value,
            color: shade.color(color_value),
            rect,
        });

        for (row, rect) in members.iter().zip(squarify(&values, rect)) {
            partners.push(TreemapCell {
                label: row.partner.clone(),
                parent: Some(continent.clone()),
                value: row.import,
                color_value: row.import,
                color: shade.color(row.import),
                rect,
            });
        }
    }

    TreemapFigure {
        continents,
        partners,
        midpoint: Some(midpoint),
    }
}

/// Average of `values` weighted by themselves.
fn weighted_average(values: &[f64]) -> f64 {
    let sum: f64 = values.iter().sum();
    if sum == 0.0 {
        return 0.0;
    }
    values.iter().map(|v| v * v).sum::<f64>() / sum
}

/// White-to-black scale over a range symmetric around a midpoint.
struct GreyScale {
    min: f64,
    max: f64,
}

impl GreyScale {
    fn centred(values: &[f64], midpoint: f64) -> Self {
        let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let half = (hi - midpoint).max(midpoint - lo);
        Self {
            min: midpoint - half,
            max: midpoint + half,
        }
    }

    fn color(&self, value: f64) -> Rgb {
        let t = if self.max > self.min {
            ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
        } else {
            0.5
        };
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let level = (255.0 * (1.0 - t)).round() as u8;
        Rgb(level, level, level)
    }
}

/// Squarified layout of `values` inside `rect`, returned in input order.
///
/// Each rectangle's area is proportional to its value; non-positive values
/// get an empty rectangle.
pub fn squarify(values: &[f64], rect: UnitRect) -> Vec<UnitRect> {
    let empty = UnitRect {
        x: rect.x,
        y: rect.y,
        width: 0.0,
        height: 0.0,
    };
    let mut out = vec![empty; values.len()];

    let mut order: Vec<usize> = (0..values.len()).filter(|&i| values[i] > 0.0).collect();
    order.sort_by(|&a, &b| values[b].total_cmp(&values[a]));

    let mut remaining = rect;
    let mut remaining_value: f64 = order.iter().map(|&i| values[i]).sum();
    let mut start = 0;

    while start < order.len() && remaining_value > 0.0 {
        let mut end = start + 1;
        let mut row_value = values[order[start]];
        while end < order.len() {
            let current = worst_ratio(&order[start..end], values, row_value, remaining, remaining_value);
            let next_value = row_value + values[order[end]];
            let next = worst_ratio(&order[start..=end], values, next_value, remaining, remaining_value);
            if next > current {
                break;
            }
            row_value = next_value;
            end += 1;
        }

        let share = row_value / remaining_value;
        let (row_rect, rest) = if remaining.width >= remaining.height {
            let width = remaining.width * share;
            (
                UnitRect { width, ..remaining },
                UnitRect {
                    x: remaining.x + width,
                    width: remaining.width - width,
                    ..remaining
                },
            )
        } else {
            let height = remaining.height * share;
            (
                UnitRect { height, ..remaining },
                UnitRect {
                    y: remaining.y + height,
                    height: remaining.height - height,
                    ..remaining
                },
            )
        };

        // Stack the row's cells along its short side
        let mut offset = 0.0;
        for &i in &order[start..end] {
            let part = values[i] / row_value;
            out[i] = if remaining.width >= remaining.height {
                let height = row_rect.height * part;
                let cell = UnitRect {
                    y: row_rect.y + offset,
                    height,
                    ..row_rect
                };
                offset += height;
                cell
            } else {
                let width = row_rect.width * part;
                let cell = UnitRect {
                    x: row_rect.x + offset,
                    width,
                    ..row_rect
                };
                offset += width;
                cell
            };
        }

        remaining = rest;
        remaining_value -= row_value;
        start = end;
    }

    out
}

fn worst_ratio(row: &[usize], values: &[f64], row_value: f64, rect: UnitRect, total: f64) -> f64 {
    let row_area = rect.area() * row_value / total;
    let side = rect.width.min(rect.height);
    if side <= 0.0 || row_area <= 0.0 {
        return f64::INFINITY;
    }
    let thickness = row_area / side;
    row.iter()
        .map(|&i| {
            let length = side * values[i] / row_value;
            (length / thickness).max(thickness / length)
        })
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::assert_close;

    fn exporter(continent: &str, partner: &str, import: f64) -> ExporterRow {
        ExporterRow {
            country: "Poland".to_string(),
            year: 2015,
            partner: partner.to_string(),
            continent: continent.to_string(),
            import,
        }
    }

    #[test]
    fn squarified_cells_tile_the_unit_square() {
        let values = [6.0, 6.0, 4.0, 3.0, 2.0, 2.0, 1.0];
        let total: f64 = values.iter().sum();
        let rects = squarify(&values, UnitRect::UNIT);

        let area: f64 = rects.iter().map(UnitRect::area).sum();
        assert_close(area, 1.0);
        for (value, rect) in values.iter().zip(&rects) {
            assert_close(rect.area(), value / total);
            assert!(rect.x >= 0.0 && rect.x + rect.width <= 1.0 + 1e-9);
            assert!(rect.y >= 0.0 && rect.y + rect.height <= 1.0 + 1e-9);
        }
    }

    #[test]
    fn squarify_keeps_input_order_and_skips_zero() {
        let rects = squarify(&[1.0, 0.0, 3.0], UnitRect::UNIT);
        assert_close(rects[0].area(), 0.25);
        assert_close(rects[1].area(), 0.0);
        assert_close(rects[2].area(), 0.75);
    }

    #[test]
    fn partners_nest_inside_their_continent() {
        let rows = [
            exporter("Europe", "Russia", 600.0),
            exporter("Europe", "Norway", 200.0),
            exporter("Africa", "Algeria", 150.0),
            exporter("Asia", "Qatar", 50.0),
        ];
        let figure = treemap_figure(&rows);

        assert_eq!(figure.continents.len(), 3);
        assert_eq!(figure.partners.len(), 4);
        for partner in &figure.partners {
            let parent = figure
                .continents
                .iter()
                .find(|c| Some(&c.label) == partner.parent.as_ref())
                .unwrap();
            let (outer, inner) = (parent.rect, partner.rect);
            assert!(inner.x >= outer.x && inner.y >= outer.y);
            assert!(inner.x + inner.width <= outer.x + outer.width + 1e-9);
            assert!(inner.y + inner.height <= outer.y + outer.height + 1e-9);
        }
        assert_close(figure.continents[0].rect.area(), 0.8);
    }

    #[test]
    fn grey_scale_is_centred_on_weighted_average() {
        let rows = [
            exporter("Europe", "Russia", 30.0),
            exporter("Europe", "Norway", 10.0),
        ];
        let figure = treemap_figure(&rows);

        // (30² + 10²) / 40
        assert_close(figure.midpoint.unwrap(), 25.0);
        let russia = &figure.partners[0];
        let norway = &figure.partners[1];
        assert!(russia.color.0 < norway.color.0);
        // Europe's shade sits exactly on the midpoint
        assert_eq!(figure.continents[0].color, Rgb(128, 128, 128));
    }

    #[test]
    fn single_partner_gets_mid_grey() {
        let figure = treemap_figure(&[exporter("Europe", "Russia", 42.0)]);
        assert_eq!(figure.partners[0].color, Rgb(128, 128, 128));
        assert_eq!(figure.partners[0].rect, UnitRect::UNIT);
    }

    #[test]
    fn empty_breakdown_yields_empty_figure() {
        let figure = treemap_figure(&[]);
        assert!(figure.is_empty());
        assert_eq!(figure.midpoint, None);
    }
}
