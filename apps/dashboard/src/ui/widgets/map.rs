//! Choropleth map drawn on a half-block canvas.

use crate::region::hit_test;
use crate::render::MapFigure;
use crate::store::GeoRegion;
use geo::Rect as GeoRect;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine, Painter, Shape};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub const BACKGROUND: Color = Color::Rgb(245, 245, 245);
const OUTLINE: Color = Color::Rgb(40, 40, 40);
const HIGHLIGHT: Color = Color::Rgb(220, 20, 60);

/// Maps terminal cells of the canvas area to lon/lat and back.
///
/// The canvas uses half-block pixels, two per cell vertically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapProjection {
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub area: Rect,
}

impl MapProjection {
    /// Fits `bounds` into `area`, padding the short axis so countries keep
    /// their shape (a cell is about twice as tall as it is wide).
    pub fn fit(bounds: GeoRect<f64>, area: Rect) -> Self {
        let pad_x = bounds.width().max(1.0) * 0.02;
        let pad_y = bounds.height().max(1.0) * 0.02;
        let (mut min_x, mut max_x) = (bounds.min().x - pad_x, bounds.max().x + pad_x);
        let (mut min_y, mut max_y) = (bounds.min().y - pad_y, bounds.max().y + pad_y);

        let lat_scale = ((min_y + max_y) / 2.0).to_radians().cos().max(0.2);
        let screen_ratio = f64::from(area.width.max(1)) / (f64::from(area.height.max(1)) * 2.0);
        let world_ratio = (max_x - min_x) * lat_scale / (max_y - min_y);

        if world_ratio < screen_ratio {
            let width = (max_y - min_y) * screen_ratio / lat_scale;
            let centre = (min_x + max_x) / 2.0;
            min_x = centre - width / 2.0;
            max_x = centre + width / 2.0;
        } else {
            let height = (max_x - min_x) * lat_scale / screen_ratio;
            let centre = (min_y + max_y) / 2.0;
            min_y = centre - height / 2.0;
            max_y = centre + height / 2.0;
        }

        Self {
            x_bounds: [min_x, max_x],
            y_bounds: [min_y, max_y],
            area,
        }
    }

    /// Canvas pixel grid size.
    pub fn resolution(&self) -> (usize, usize) {
        (
            usize::from(self.area.width),
            usize::from(self.area.height) * 2,
        )
    }

    /// World coordinates of a canvas pixel.
    pub fn pixel_to_world(&self, x: usize, y: usize) -> (f64, f64) {
        let (width, height) = self.resolution();
        let step_x = (self.x_bounds[1] - self.x_bounds[0]) / (width.max(2) - 1) as f64;
        let step_y = (self.y_bounds[1] - self.y_bounds[0]) / (height.max(2) - 1) as f64;
        (
            (x as f64).mul_add(step_x, self.x_bounds[0]),
            (y as f64).mul_add(-step_y, self.y_bounds[1]),
        )
    }

    /// World coordinates under a terminal cell, if it is on the canvas.
    pub fn cell_to_world(&self, column: u16, row: u16) -> Option<(f64, f64)> {
        if !crate::ui::layout::contains(self.area, column, row) {
            return None;
        }
        let x = usize::from(column - self.area.x);
        let y = usize::from(row - self.area.y) * 2;
        Some(self.pixel_to_world(x, y))
    }
}

/// Region row under a terminal cell.
pub fn region_at(
    projection: &MapProjection,
    regions: &[GeoRegion],
    column: u16,
    row: u16,
) -> Option<usize> {
    let (x, y) = projection.cell_to_world(column, row)?;
    hit_test(regions.iter().map(|r| &r.geometry), x, y)
}

/// Fills every canvas pixel whose centre falls inside a coloured region.
struct RegionFill<'a> {
    projection: MapProjection,
    regions: &'a [GeoRegion],
    figure: &'a MapFigure,
}

impl Shape for RegionFill<'_> {
    fn draw(&self, painter: &mut Painter<'_, '_>) {
        let (width, height) = self.projection.resolution();
        for y in 0..height {
            for x in 0..width {
                let (lon, lat) = self.projection.pixel_to_world(x, y);
                let Some(row) = hit_test(self.regions.iter().map(|r| &r.geometry), lon, lat)
                else {
                    continue;
                };
                let fill = self
                    .figure
                    .region(row)
                    .and_then(|region| region.fill)
                    .map_or(Color::White, Color::from);
                painter.paint(x, y, fill);
            }
        }
    }
}

fn outline_lines(region: &GeoRegion, color: Color) -> Vec<CanvasLine> {
    region
        .geometry
        .0
        .iter()
        .flat_map(|polygon| std::iter::once(polygon.exterior()).chain(polygon.interiors()))
        .flat_map(|ring| {
            ring.lines().map(move |edge| CanvasLine {
                x1: edge.start.x,
                y1: edge.start.y,
                x2: edge.end.x,
                y2: edge.end.y,
                color,
            })
        })
        .collect()
}

pub fn render_map(
    f: &mut Frame<'_>,
    area: Rect,
    canvas_area: Rect,
    figure: &MapFigure,
    regions: &[GeoRegion],
    bounds: Option<GeoRect<f64>>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray))
        .style(Style::default().bg(BACKGROUND));
    f.render_widget(block, area);

    let Some(bounds) = bounds else {
        let paragraph = Paragraph::new("No region boundaries loaded")
            .style(Style::default().fg(Color::DarkGray).bg(BACKGROUND))
            .alignment(ratatui::layout::Alignment::Center);
        f.render_widget(paragraph, canvas_area);
        return;
    };

    let projection = MapProjection::fit(bounds, canvas_area);
    let fill = RegionFill {
        projection,
        regions,
        figure,
    };
    let highlight = figure.highlight.and_then(|row| regions.get(row));

    let canvas = Canvas::default()
        .background_color(BACKGROUND)
        .marker(Marker::HalfBlock)
        .x_bounds(projection.x_bounds)
        .y_bounds(projection.y_bounds)
        .paint(|ctx| {
            ctx.draw(&fill);
            ctx.layer();
            for region in regions {
                for line in outline_lines(region, OUTLINE) {
                    ctx.draw(&line);
                }
            }
            if let Some(region) = highlight {
                ctx.layer();
                for line in outline_lines(region, HIGHLIGHT) {
                    ctx.draw(&line);
                }
            }
        });

    f.render_widget(canvas, canvas_area);
}

/// Vertical colour bar with percentage ticks.
pub fn render_color_bar(f: &mut Frame<'_>, area: Rect, figure: &MapFigure) {
    if area.height == 0 {
        return;
    }
    let rows = usize::from(area.height);
    let bins = figure.palette.len();
    let tick_row = |value: f64| -> usize {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let row = ((1.0 - value / 100.0) * (rows - 1) as f64).round() as usize;
        row.min(rows - 1)
    };

    let lines: Vec<TextLine<'_>> = (0..rows)
        .map(|row| {
            let value = 100.0 * (1.0 - (row as f64 + 0.5) / rows as f64);
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let bin = ((value / 100.0 * bins as f64) as usize).min(bins - 1);
            let label = figure
                .ticks
                .iter()
                .find(|tick| tick_row(tick.value) == row)
                .map_or_else(String::new, |tick| tick.label.clone());
            TextLine::from(vec![
                Span::styled("██", Style::default().fg(figure.palette[bin].into())),
                Span::styled(
                    format!(" {label}"),
                    Style::default().fg(Color::Black).add_modifier(Modifier::DIM),
                ),
            ])
        })
        .collect();

    f.render_widget(
        Paragraph::new(lines).style(Style::default().bg(BACKGROUND)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::demo_dataset;
    use crate::store::DatasetStore;
    use geo::{Contains, Coord, Point};

    #[test]
    fn projection_keeps_bounds_inside() {
        let bounds = GeoRect::new(Coord { x: -10.0, y: 35.0 }, Coord { x: 40.0, y: 70.0 });
        let projection = MapProjection::fit(bounds, Rect::new(2, 3, 60, 20));
        assert!(projection.x_bounds[0] <= -10.0 && projection.x_bounds[1] >= 40.0);
        assert!(projection.y_bounds[0] <= 35.0 && projection.y_bounds[1] >= 70.0);

        let top_left = projection.cell_to_world(2, 3).unwrap();
        assert!((top_left.0 - projection.x_bounds[0]).abs() < 1e-9);
        assert!((top_left.1 - projection.y_bounds[1]).abs() < 1e-9);
        assert!(projection.cell_to_world(1, 3).is_none());
        assert!(projection.cell_to_world(62, 3).is_none());
    }

    #[test]
    fn clicking_inside_a_region_finds_its_row() {
        let store = DatasetStore::from_demo(demo_dataset());
        let area = Rect::new(0, 0, 120, 40);
        let projection = MapProjection::fit(store.bounds().unwrap(), area);

        let poland = store
            .regions()
            .iter()
            .find(|r| r.country == "Poland")
            .unwrap();
        let found = (0..area.height)
            .flat_map(|row| (0..area.width).map(move |column| (column, row)))
            .any(|(column, row)| {
                let (x, y) = projection.cell_to_world(column, row).unwrap();
                poland.geometry.contains(&Point::new(x, y))
                    && region_at(&projection, store.regions(), column, row) == Some(poland.index)
            });
        assert!(found);
        assert_eq!(region_at(&projection, store.regions(), 0, 0), None);
    }

    #[test]
    fn outlines_follow_every_ring_edge() {
        let store = DatasetStore::from_demo(demo_dataset());
        let portugal = store
            .regions()
            .iter()
            .find(|r| r.country == "Portugal")
            .unwrap();
        let lines = outline_lines(portugal, OUTLINE);
        // Four vertices, closed into four edges
        assert_eq!(lines.len(), 4);
        assert_eq!((lines[0].x1, lines[0].y1), (-9.5, 37.0));
        assert_eq!((lines[3].x2, lines[3].y2), (-9.5, 37.0));
    }
}
