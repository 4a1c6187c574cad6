use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use serde::Serialize;
use sqlx::SqlitePool;
use std::io::Stdout;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::app::{handle_key, handle_mouse, App};
use crate::controller::Controller;
use crate::db::queries::{count_dependencies, count_dependencies_by_commodity, count_regions};
use crate::selection::Selection;
use crate::ui;

/// Run without a terminal UI: print the current selection's figures and
/// an overview of the loaded dataset.
pub async fn run_headless(pool: &SqlitePool, controller: &Controller, json: bool) -> Result<()> {
    let report = build_headless_report(pool, controller).await?;

    if json {
        let json = serde_json::to_string_pretty(&report)?;
        println!("{json}");
    } else {
        render_headless_text(&report);
    }

    Ok(())
}

fn render_headless_text(report: &HeadlessReport) {
    let selection = &report.selection;
    println!("\nEnergy Import Dependency on {}", report.partner);
    println!("==============================");
    println!(
        "{} | {} | {}",
        selection.commodity.label(),
        selection.year,
        selection.country
    );

    let summary = &report.summary;
    println!(
        "Import percentage: {}",
        summary
            .import_pct
            .map_or_else(|| "n/a".to_string(), |v| format!("{v:.1} %"))
    );
    println!(
        "Import value: {}",
        summary
            .import_value
            .map_or_else(|| "n/a".to_string(), |v| format!("{v:.0} {}", summary.unit))
    );

    println!("\nExporters:");
    if report.exporters.is_empty() {
        println!("- (none reported)");
    }
    for exporter in &report.exporters {
        println!(
            "- {} ({}): {:.1} {}",
            exporter.partner, exporter.continent, exporter.value, summary.unit
        );
    }

    println!("\nDependency over time:");
    for (year, pct) in &report.time_series {
        println!("- {year:.0}: {pct:.1} %");
    }

    println!("\nDataset ({} rows)", report.total_rows);
    for (commodity, count) in &report.rows_by_commodity {
        println!("- {commodity}: {count} rows");
    }
    println!("Countries: {}", report.countries);
    println!("Regions: {}", report.regions);
}

async fn build_headless_report(pool: &SqlitePool, controller: &Controller) -> Result<HeadlessReport> {
    let total_rows = count_dependencies(pool).await?;
    let rows_by_commodity = count_dependencies_by_commodity(pool).await?;
    let regions = count_regions(pool).await?;

    let exporters = controller
        .treemap()
        .partners
        .iter()
        .map(|cell| HeadlessExporter {
            partner: cell.label.clone(),
            continent: cell.parent.clone().unwrap_or_default(),
            value: cell.value,
        })
        .collect();

    let table = controller.table();
    Ok(HeadlessReport {
        partner: controller.settings().partner.clone(),
        selection: controller.selection().clone(),
        summary: HeadlessSummary {
            import_pct: table.import_pct,
            import_value: table.import_value,
            unit: table.unit,
        },
        exporters,
        time_series: controller.line().points.clone(),
        total_rows,
        rows_by_commodity,
        countries: controller.store().countries().len(),
        regions,
    })
}

#[derive(Debug, Serialize)]
struct HeadlessReport {
    partner: String,
    selection: Selection,
    summary: HeadlessSummary,
    exporters: Vec<HeadlessExporter>,
    time_series: Vec<(f64, f64)>,
    total_rows: i64,
    rows_by_commodity: Vec<(String, i64)>,
    countries: usize,
    regions: i64,
}

#[derive(Debug, Serialize)]
struct HeadlessSummary {
    import_pct: Option<f64>,
    import_value: Option<f64>,
    unit: &'static str,
}

#[derive(Debug, Serialize)]
struct HeadlessExporter {
    partner: String,
    continent: String,
    value: f64,
}

/// Run the main application event loop
pub fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    while app.running {
        let frame = terminal
            .draw(|f| ui::ui(app, f))
            .map_err(|e| color_eyre::eyre::eyre!("Terminal draw error: {e}"))?;
        app.area = frame.area;

        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT))? {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => handle_key(app, key),
                Ok(Event::Mouse(mouse)) => handle_mouse(app, mouse),
                Ok(Event::Resize(width, height)) => {
                    debug!(width, height, "terminal resized");
                    app.hover = None;
                }
                Ok(_) => {}
                Err(e) => warn!(error = %e, "failed to read terminal event"),
            }
        }

        app.on_tick(Instant::now());
    }

    Ok(())
}
