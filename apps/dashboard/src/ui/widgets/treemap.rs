use crate::domain::Rgb;
use crate::render::{TreemapFigure, UnitRect};
use crate::ui::widgets::map::BACKGROUND;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// Scales a unit-space rectangle onto terminal cells, snapping edges so
/// neighbouring cells share borders without gaps.
pub fn scale_rect(rect: UnitRect, area: Rect) -> Rect {
    let snap = |origin: u16, span: u16, t: f64| -> u16 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let offset = (t * f64::from(span)).round().clamp(0.0, f64::from(span)) as u16;
        origin + offset
    };
    let x0 = snap(area.x, area.width, rect.x);
    let x1 = snap(area.x, area.width, rect.x + rect.width);
    let y0 = snap(area.y, area.height, rect.y);
    let y1 = snap(area.y, area.height, rect.y + rect.height);
    Rect::new(x0, y0, x1 - x0, y1 - y0)
}

/// Position of `inner` relative to `outer`, both in unit space.
fn relative(inner: UnitRect, outer: UnitRect) -> UnitRect {
    if outer.width <= 0.0 || outer.height <= 0.0 {
        return UnitRect {
            width: 0.0,
            height: 0.0,
            ..inner
        };
    }
    UnitRect {
        x: (inner.x - outer.x) / outer.width,
        y: (inner.y - outer.y) / outer.height,
        width: inner.width / outer.width,
        height: inner.height / outer.height,
    }
}

fn text_color(fill: Rgb) -> Color {
    if fill.luminance() > 0.5 {
        Color::Black
    } else {
        Color::White
    }
}

pub fn render_treemap(f: &mut Frame<'_>, area: Rect, figure: &TreemapFigure, unit: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray))
        .style(Style::default().bg(BACKGROUND));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if figure.is_empty() {
        let paragraph = Paragraph::new("No exporters reported")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(paragraph, inner);
        return;
    }

    for continent in &figure.continents {
        let cell = scale_rect(continent.rect, inner);
        if cell.width == 0 || cell.height == 0 {
            continue;
        }
        let style = Style::default()
            .bg(continent.color.into())
            .fg(text_color(continent.color));
        f.render_widget(
            Paragraph::new(TextLine::from(Span::styled(
                continent.label.clone(),
                style.add_modifier(Modifier::BOLD),
            )))
            .style(style),
            cell,
        );

        // Partners fill the continent below its label row
        let body = Rect {
            y: cell.y + 1,
            height: cell.height.saturating_sub(1),
            ..cell
        };
        if body.height == 0 {
            continue;
        }
        for partner in figure
            .partners
            .iter()
            .filter(|p| p.parent.as_deref() == Some(continent.label.as_str()))
        {
            let rect = scale_rect(relative(partner.rect, continent.rect), body);
            if rect.width == 0 || rect.height == 0 {
                continue;
            }
            let style = Style::default()
                .bg(partner.color.into())
                .fg(text_color(partner.color));
            let lines = vec![
                TextLine::from(Span::styled(
                    partner.label.clone(),
                    style.add_modifier(Modifier::BOLD),
                )),
                TextLine::from(format!("{:.1} {unit}", partner.value)),
            ];
            f.render_widget(Paragraph::new(lines).style(style), rect);
        }
    }
}
