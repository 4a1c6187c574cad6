use crate::cli::CliArgs;
use crate::ui::widgets::popup::{centered_rect, ClearWidget};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

const KEYS: &[(&str, &str)] = &[
    ("Tab / Shift+Tab", "Move focus between dataset, year and country"),
    ("Left / Right", "Change dataset, or move the year slider"),
    ("PgUp / PgDn", "Move the year slider by five years"),
    ("Home / End", "Jump to the first or last year"),
    ("Enter", "Commit the year, or open the country list"),
    ("1 2 3", "Natural Gas, Oil Petrol, Solid Fuel"),
    ("b", "Back to the last country found on the map"),
    ("Esc", "Close a popup or clear the status line"),
    ("?  F1", "Toggle this help popup"),
    ("q", "Quit"),
];

const MOUSE: &[(&str, &str)] = &[
    ("Click map", "Select the country under the pointer"),
    ("Hover map", "Show the country and its dependency"),
    ("Drag slider", "Pick a year, applied on release"),
    ("Scroll slider", "Step the year"),
];

pub fn render_help_popup(f: &mut Frame<'_>, area: Rect) {
    let popup_area = centered_rect(80, 80, area);
    f.render_widget(ClearWidget, popup_area);

    let help_block = Block::default()
        .title("== Help & Keyboard Shortcuts ==")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let help_paragraph = Paragraph::new(Text::from(build_help_lines()))
        .block(help_block)
        .wrap(Wrap { trim: false });
    f.render_widget(help_paragraph, popup_area);

    let hint = Paragraph::new(Span::styled(
        "Press ? or Esc to close",
        Style::default().fg(Color::Gray),
    ))
    .alignment(Alignment::Center);
    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(2),
        width: popup_area.width,
        height: 1,
    };
    f.render_widget(hint, hint_area);
}

fn shortcut_line(key: &str, description: &str) -> TextLine<'static> {
    TextLine::from(vec![
        Span::styled(
            format!("  {key:<16}"),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw(description.to_string()),
    ])
}

fn build_help_lines() -> Vec<TextLine<'static>> {
    let heading = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![
        TextLine::from(Span::styled(
            "EU Energy Import Dependency",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        TextLine::from(Span::styled("Keyboard:", heading)),
    ];
    lines.extend(KEYS.iter().map(|(key, text)| shortcut_line(key, text)));
    lines.push(TextLine::from(""));
    lines.push(TextLine::from(Span::styled("Mouse:", heading)));
    lines.extend(MOUSE.iter().map(|(key, text)| shortcut_line(key, text)));
    lines.push(TextLine::from(""));
    lines.push(TextLine::from(Span::styled("Command line:", heading)));
    lines.extend(
        CliArgs::help_text()
            .lines()
            .map(|line| TextLine::from(Span::styled(line.to_string(), Style::default().fg(Color::Gray)))),
    );
    lines
}
