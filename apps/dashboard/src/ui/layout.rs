use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};

/// Rows shown by the country dropdown at most.
pub const DROPDOWN_ROWS: usize = 10;

/// Screen regions of the dashboard, shared by drawing and mouse hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardLayout {
    pub commodity: Rect,
    pub slider: Rect,
    pub country: Rect,
    pub map: Rect,
    pub map_canvas: Rect,
    pub color_bar: Rect,
    pub map_caption: Rect,
    pub table: Rect,
    pub table_caption: Rect,
    pub title: Rect,
    pub treemap: Rect,
    pub treemap_caption: Rect,
    pub line: Rect,
    pub line_caption: Rect,
    pub source: Rect,
    pub status: Rect,
    pub shortcuts: Rect,
}

impl DashboardLayout {
    pub fn new(area: Rect) -> Self {
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(10),   // Panels
                Constraint::Length(1), // Status line
                Constraint::Length(1), // Shortcuts hint
            ])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(outer[0]);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Controls
                Constraint::Min(6),    // Map
                Constraint::Length(1), // Map caption
                Constraint::Length(5), // Summary table
                Constraint::Length(1), // Table caption
            ])
            .split(columns[0]);

        let controls = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(40),
                Constraint::Min(16),
                Constraint::Length(24),
            ])
            .split(left[0]);

        let map_inner = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(4), Constraint::Length(7)])
            .split(left[1].inner(Margin::new(1, 1)));

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),      // Title
                Constraint::Percentage(55), // Treemap
                Constraint::Length(1),      // Treemap caption
                Constraint::Min(6),         // Line chart
                Constraint::Length(1),      // Line caption
                Constraint::Length(1),      // Source
            ])
            .split(columns[1]);

        Self {
            commodity: controls[0],
            slider: controls[1],
            country: controls[2],
            map: left[1],
            map_canvas: map_inner[0],
            color_bar: map_inner[1],
            map_caption: left[2],
            table: left[3],
            table_caption: left[4],
            title: right[0],
            treemap: right[1],
            treemap_caption: right[2],
            line: right[3],
            line_caption: right[4],
            source: right[5],
            status: outer[1],
            shortcuts: outer[2],
        }
    }

    /// Popup below the country selector listing up to `rows` entries.
    pub fn dropdown(&self, screen: Rect, rows: usize) -> Rect {
        let wanted = u16::try_from(rows.max(1)).unwrap_or(u16::MAX).saturating_add(3);
        let y = self.country.y + self.country.height;
        let available = screen.y.saturating_add(screen.height).saturating_sub(y);
        Rect {
            x: self.country.x,
            y,
            width: self.country.width,
            height: wanted.min(available),
        }
    }
}

/// Whether the cell at `(column, row)` lies inside `rect`.
pub const fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_stay_inside_screen() {
        let screen = Rect::new(0, 0, 160, 48);
        let layout = DashboardLayout::new(screen);
        for rect in [
            layout.commodity,
            layout.slider,
            layout.country,
            layout.map_canvas,
            layout.color_bar,
            layout.table,
            layout.treemap,
            layout.line,
            layout.status,
        ] {
            assert!(rect.x + rect.width <= screen.width);
            assert!(rect.y + rect.height <= screen.height);
        }
        assert_eq!(layout.status.y, 46);
        assert!(layout.map_canvas.width > layout.color_bar.width);
        assert!(layout.commodity.x < layout.slider.x && layout.slider.x < layout.country.x);
    }

    #[test]
    fn dropdown_hangs_below_selector() {
        let screen = Rect::new(0, 0, 160, 48);
        let layout = DashboardLayout::new(screen);
        let popup = layout.dropdown(screen, 8);
        assert_eq!(popup.y, layout.country.y + layout.country.height);
        assert_eq!(popup.height, 11);
        assert!(contains(popup, popup.x, popup.y));
        assert!(!contains(popup, popup.x + popup.width, popup.y));
    }
}
