use crate::render::LineFigure;
use crate::ui::widgets::map::BACKGROUND;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition};
use ratatui::Frame;

pub fn render_line_chart(f: &mut Frame<'_>, area: Rect, figure: &LineFigure) {
    let color: Color = figure.color.into();
    let bar: Vec<(f64, f64)> = figure.bar.into_iter().collect();

    let mut datasets = vec![Dataset::default()
        .name(figure.legend.clone().unwrap_or_default())
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(&figure.points)];
    if !bar.is_empty() {
        datasets.push(
            Dataset::default()
                .marker(Marker::HalfBlock)
                .graph_type(GraphType::Bar)
                .style(Style::default().fg(color))
                .data(&bar),
        );
    }

    let x_labels: Vec<Span<'_>> = (0..=4)
        .map(|step| {
            let year = figure.x_bounds[0]
                + (figure.x_bounds[1] - figure.x_bounds[0]) * f64::from(step) / 4.0;
            Span::raw(format!("{year:.0}"))
        })
        .collect();
    let y_labels = vec![
        Span::raw("0"),
        Span::raw("50"),
        Span::raw(format!("{:.0}", figure.y_bounds[1])),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Gray)),
        )
        .style(Style::default().bg(BACKGROUND).fg(Color::Black))
        .legend_position(figure.legend.as_ref().map(|_| LegendPosition::TopRight))
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds(figure.x_bounds)
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(figure.y_label.clone())
                .style(Style::default().fg(Color::DarkGray))
                .bounds(figure.y_bounds)
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}
