use crate::app::{App, Focus};
use crate::ui::layout::{DashboardLayout, DROPDOWN_ROWS};
use crate::ui::widgets::controls::{
    render_commodity_tabs, render_country_dropdown, render_country_selector, render_year_slider,
};
use crate::ui::widgets::line_chart::render_line_chart;
use crate::ui::widgets::map::{render_color_bar, render_map};
use crate::ui::widgets::popup::render_tooltip;
use crate::ui::widgets::table::render_summary_table;
use crate::ui::widgets::treemap::render_treemap;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub fn render_dashboard(app: &App, f: &mut Frame<'_>) {
    let layout = DashboardLayout::new(f.area());
    let controller = &app.controller;
    let selection = controller.selection();
    let partner = controller.settings().partner.as_str();

    render_commodity_tabs(
        f,
        layout.commodity,
        selection.commodity,
        app.focus == Focus::Commodity,
    );
    render_year_slider(
        f,
        layout.slider,
        &app.slider,
        selection.year,
        app.focus == Focus::Year,
    );
    render_country_selector(
        f,
        layout.country,
        controller.dropdown(),
        app.focus == Focus::Country,
    );

    render_map(
        f,
        layout.map,
        layout.map_canvas,
        controller.map(),
        controller.store().regions(),
        controller.store().bounds(),
    );
    render_color_bar(f, layout.color_bar, controller.map());
    render_caption(f, layout.map_caption, &format!("Energy product dependency on {partner}"));

    let refreshed = controller
        .table_refreshed_at()
        .map_or_else(String::new, |at| format!(" refreshed {} ", at.format("%H:%M:%S")));
    render_summary_table(f, layout.table, controller.table(), &refreshed);
    render_caption(f, layout.table_caption, "Energy product import of selected country");

    render_title(f, layout.title, partner);
    render_treemap(
        f,
        layout.treemap,
        controller.treemap(),
        selection.commodity.unit(),
    );
    render_caption(
        f,
        layout.treemap_caption,
        "Exporters of the energy product for chosen region",
    );
    render_line_chart(f, layout.line, controller.line());
    render_caption(
        f,
        layout.line_caption,
        &format!("Energy product dependency on {partner} over time"),
    );
    render_caption(f, layout.source, "Source: Eurostat");

    render_status(app, f, layout.status);
    render_shortcuts(f, layout.shortcuts);

    if let Some(hover) = app.hover {
        if let Some(rows) = controller.map().tooltip(hover.region) {
            render_tooltip(f, hover.column, hover.row, &rows);
        }
    }

    if app.picker.open {
        let matches = app.picker.matches(controller.store().countries());
        let area = layout.dropdown(f.area(), matches.len().min(DROPDOWN_ROWS));
        render_country_dropdown(f, area, &app.picker, &matches);
    }
}

fn render_title(f: &mut Frame<'_>, area: Rect, partner: &str) {
    let title = Paragraph::new(TextLine::from(Span::styled(
        format!(
            "DEPENDENCY OF EUROPEAN UNION ON ENERGY IMPORTS FROM {}",
            partner.to_uppercase()
        ),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(title, area);
}

fn render_caption(f: &mut Frame<'_>, area: Rect, text: &str) {
    let caption = Paragraph::new(Span::styled(
        text.to_string(),
        Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center);
    f.render_widget(caption, area);
}

fn render_status(app: &App, f: &mut Frame<'_>, area: Rect) {
    let (text, style) = match app.controller.notice() {
        Some(notice) => (notice, Style::default().fg(Color::Red)),
        None if app.status_message.is_empty() => (
            "Ready",
            Style::default().fg(Color::Gray),
        ),
        None => (app.status_message.as_str(), Style::default().fg(Color::Green)),
    };
    let focus = Span::styled(
        format!("[{}] ", app.focus.label()),
        Style::default().fg(Color::Yellow),
    );
    let paragraph = Paragraph::new(TextLine::from(vec![focus, Span::styled(text.to_string(), style)]));
    f.render_widget(paragraph, area);
}

fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let key = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let shortcuts = TextLine::from(vec![
        Span::styled("Tab", key),
        Span::raw(" focus  "),
        Span::styled("←/→", key),
        Span::raw(" change  "),
        Span::styled("Enter", key),
        Span::raw(" commit/open  "),
        Span::styled("1-3", key),
        Span::raw(" commodity  "),
        Span::styled("b", key),
        Span::raw(" last country  "),
        Span::styled("?", key),
        Span::raw(" help  "),
        Span::styled("q", key),
        Span::raw(" quit"),
    ]);
    f.render_widget(Paragraph::new(shortcuts).alignment(Alignment::Center), area);
}
