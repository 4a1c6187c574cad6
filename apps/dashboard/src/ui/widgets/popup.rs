use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::Buffer;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};
use ratatui::Frame;

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Places a `width`×`height` box next to the pointer, flipping left or up
/// when it would leave `screen`.
pub fn tooltip_rect(column: u16, row: u16, width: u16, height: u16, screen: Rect) -> Rect {
    let width = width.min(screen.width);
    let height = height.min(screen.height);
    let right = screen.x + screen.width;
    let bottom = screen.y + screen.height;

    let x = if column + 2 + width <= right {
        column + 2
    } else {
        column.saturating_sub(width + 1).max(screen.x)
    };
    let y = if row + 1 + height <= bottom {
        row + 1
    } else {
        row.saturating_sub(height).max(screen.y)
    };
    Rect::new(x, y, width, height)
}

pub struct ClearWidget;

impl Widget for ClearWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        ratatui::widgets::Clear.render(area, buf);
    }
}

/// Hover box listing `(name, value)` rows.
pub fn render_tooltip(f: &mut Frame<'_>, column: u16, row: u16, rows: &[(String, String)]) {
    let lines: Vec<TextLine<'_>> = rows
        .iter()
        .map(|(name, value)| {
            TextLine::from(vec![
                Span::styled(format!("{name}: "), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(value.clone()),
            ])
        })
        .collect();
    let width = rows
        .iter()
        .map(|(name, value)| name.chars().count() + value.chars().count() + 2)
        .max()
        .unwrap_or(0);
    let width = u16::try_from(width).unwrap_or(u16::MAX).saturating_add(2);
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);

    let area = tooltip_rect(column, row, width, height, f.area());
    f.render_widget(ClearWidget, area);
    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .style(Style::default().bg(Color::White).fg(Color::Black)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tooltip_flips_at_screen_edges() {
        let screen = Rect::new(0, 0, 80, 24);
        assert_eq!(tooltip_rect(10, 5, 20, 4, screen), Rect::new(12, 6, 20, 4));
        let flipped = tooltip_rect(75, 22, 20, 4, screen);
        assert_eq!(flipped, Rect::new(54, 18, 20, 4));
    }

    #[test]
    fn centered_rect_is_inside_area() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(60, 40, area);
        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 20);
        assert_eq!(popup.x, 20);
    }
}
