use crate::app::state::{CountryPicker, YearSlider};
use crate::domain::{FIRST_YEAR, LAST_YEAR};
use crate::ui::widgets::popup::ClearWidget;
use crate::Commodity;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs};
use ratatui::Frame;

const DIVIDER: &str = "|";

fn control_block(title: &str, focused: bool) -> Block<'_> {
    let color = if focused { Color::Yellow } else { Color::Gray };
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}

pub fn render_commodity_tabs(f: &mut Frame<'_>, area: Rect, selected: Commodity, focused: bool) {
    let titles = Commodity::ALL
        .iter()
        .map(|commodity| TextLine::from(commodity.label()))
        .collect::<Vec<_>>();

    let tabs = Tabs::new(titles)
        .block(control_block("Dataset", focused))
        .select(selected.index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(selected.line_color().into())
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        )
        .divider(Span::raw(DIVIDER));

    f.render_widget(tabs, area);
}

/// Commodity tab under a column of the tabs' inner row.
///
/// Mirrors the tabs layout: one space of padding either side of each title
/// and a one-cell divider between them.
pub fn commodity_at(inner: Rect, column: u16) -> Option<Commodity> {
    if column >= inner.x + inner.width {
        return None;
    }
    let mut x = inner.x;
    for commodity in Commodity::ALL {
        let width = u16::try_from(commodity.label().len()).unwrap_or(u16::MAX) + 2;
        if column >= x && column < x + width {
            return Some(commodity);
        }
        x += width + 1;
    }
    None
}

pub fn render_year_slider(f: &mut Frame<'_>, area: Rect, slider: &YearSlider, committed: i32, focused: bool) {
    let block = control_block("Year", focused);
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.width < 8 {
        return;
    }

    let label = if slider.pending == committed {
        format!("{committed}")
    } else {
        format!("{} → {}", committed, slider.pending)
    };
    let label_width = u16::try_from(label.chars().count()).unwrap_or(0) + 1;
    let track = track_area(inner, label_width);

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let knob = (slider.ratio() * f64::from(track.width.saturating_sub(1))).round() as u16;
    let line: String = (0..track.width)
        .map(|i| if i == knob { '●' } else { '─' })
        .collect();

    let knob_color = if slider.dragging { Color::Yellow } else { Color::Cyan };
    let text = TextLine::from(vec![
        Span::styled(line, Style::default().fg(knob_color)),
        Span::raw(" "),
        Span::styled(label, Style::default().add_modifier(Modifier::BOLD)),
    ]);
    f.render_widget(Paragraph::new(text), inner);
}

fn track_area(inner: Rect, label_width: u16) -> Rect {
    Rect {
        width: inner.width.saturating_sub(label_width.max(12)),
        height: 1,
        ..inner
    }
}

/// Year under a column of the slider's inner row, if it is on the track.
pub fn slider_year_at(inner: Rect, column: u16) -> Option<i32> {
    let track = track_area(inner, 12);
    if track.width == 0 || column < track.x || column >= track.x + track.width {
        return None;
    }
    let span = f64::from(track.width.saturating_sub(1).max(1));
    let t = f64::from(column - track.x) / span;
    #[allow(clippy::cast_possible_truncation)]
    let year = FIRST_YEAR + (t * f64::from(LAST_YEAR - FIRST_YEAR)).round() as i32;
    Some(year.clamp(FIRST_YEAR, LAST_YEAR))
}

pub fn render_country_selector(f: &mut Frame<'_>, area: Rect, country: &str, focused: bool) {
    let text = TextLine::from(vec![
        Span::styled(country.to_string(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" ▾"),
    ]);
    f.render_widget(
        Paragraph::new(text).block(control_block("Country", focused)),
        area,
    );
}

pub fn render_country_dropdown(f: &mut Frame<'_>, area: Rect, picker: &CountryPicker, matches: &[&str]) {
    if area.height < 3 {
        return;
    }
    f.render_widget(ClearWidget, area);

    let block = Block::default()
        .title(format!(" Filter: {}_ ", picker.query))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if matches.is_empty() {
        f.render_widget(
            Paragraph::new("No match").style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }

    let visible = usize::from(inner.height);
    let offset = scroll_offset(matches.len(), visible, picker.cursor);
    let items: Vec<ListItem<'_>> = matches
        .iter()
        .skip(offset)
        .take(visible)
        .map(|country| ListItem::new(*country))
        .collect();

    let list = List::new(items).highlight_style(
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );
    let mut state = ListState::default().with_selected(Some(picker.cursor - offset));
    f.render_stateful_widget(list, inner, &mut state);
}

/// First visible row of a list scrolled just far enough to show `cursor`.
pub const fn scroll_offset(total: usize, visible: usize, cursor: usize) -> usize {
    if total <= visible || visible == 0 {
        return 0;
    }
    cursor.saturating_sub(visible - 1)
}

/// Match index under a row of the dropdown, accounting for scrolling.
pub fn dropdown_index_at(area: Rect, row: u16, cursor: usize, total: usize) -> Option<usize> {
    let inner_top = area.y + 1;
    let visible = usize::from(area.height.saturating_sub(2));
    if row < inner_top || usize::from(row - inner_top) >= visible {
        return None;
    }
    let index = scroll_offset(total, visible, cursor) + usize::from(row - inner_top);
    (index < total).then_some(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_hit_testing_follows_labels() {
        let inner = Rect::new(1, 1, 38, 1);
        assert_eq!(commodity_at(inner, 1), Some(Commodity::NaturalGas));
        // " Natural Gas " spans 13 cells, then the divider
        assert_eq!(commodity_at(inner, 14), None);
        assert_eq!(commodity_at(inner, 15), Some(Commodity::OilPetrol));
        assert_eq!(commodity_at(inner, 28), Some(Commodity::SolidFuel));
        assert_eq!(commodity_at(inner, 39), None);
    }

    #[test]
    fn slider_ends_map_to_year_range() {
        let inner = Rect::new(41, 1, 40, 1);
        let track = track_area(inner, 12);
        assert_eq!(slider_year_at(inner, track.x), Some(FIRST_YEAR));
        assert_eq!(slider_year_at(inner, track.x + track.width - 1), Some(LAST_YEAR));
        assert_eq!(slider_year_at(inner, track.x + track.width), None);
    }

    #[test]
    fn dropdown_rows_account_for_scroll() {
        let area = Rect::new(0, 3, 24, 7);
        assert_eq!(dropdown_index_at(area, 4, 0, 19), Some(0));
        assert_eq!(dropdown_index_at(area, 3, 0, 19), None);
        // cursor at 10 with 5 visible rows scrolls by 6
        assert_eq!(dropdown_index_at(area, 4, 10, 19), Some(6));
        assert_eq!(dropdown_index_at(area, 8, 0, 2), None);
    }
}
