use crate::render::SummaryTable;
use crate::ui::widgets::map::BACKGROUND;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

pub fn render_summary_table(f: &mut Frame<'_>, area: Rect, table: &SummaryTable, refreshed: &str) {
    let header = Row::new(
        table
            .headers()
            .into_iter()
            .map(|title| Cell::from(title).style(Style::default().add_modifier(Modifier::BOLD))),
    )
    .style(Style::default().fg(Color::Black))
    .bottom_margin(1);

    let row = Row::new(table.cells().into_iter().map(Cell::from))
        .style(Style::default().fg(Color::Black));

    let widget = Table::new(
        vec![row],
        [
            Constraint::Percentage(30),
            Constraint::Percentage(30),
            Constraint::Percentage(40),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Gray))
            .title_bottom(refreshed.to_string()),
    )
    .style(Style::default().bg(BACKGROUND));

    f.render_widget(widget, area);
}
