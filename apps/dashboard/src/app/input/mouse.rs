use crate::app::state::{App, Focus, Hover};
use crate::controller::ControllerEvent;
use crate::ui::layout::{contains, DashboardLayout, DROPDOWN_ROWS};
use crate::ui::widgets::controls::{commodity_at, dropdown_index_at, slider_year_at};
use crate::ui::widgets::map::{region_at, MapProjection};
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Margin, Rect};

pub fn handle_mouse(app: &mut App, event: MouseEvent) {
    let layout = DashboardLayout::new(app.area);
    let (column, row) = (event.column, event.row);

    if app.picker.open {
        if let MouseEventKind::Down(MouseButton::Left) = event.kind {
            click_dropdown(app, &layout, column, row);
        }
        return;
    }
    if app.show_help {
        if let MouseEventKind::Down(_) = event.kind {
            app.show_help = false;
        }
        return;
    }

    match event.kind {
        MouseEventKind::Moved => update_hover(app, &layout, column, row),
        MouseEventKind::Down(MouseButton::Left) => {
            if contains(layout.map_canvas, column, row) {
                click_map(app, &layout, column, row);
            } else if contains(layout.slider, column, row) {
                app.focus = Focus::Year;
                if let Some(year) = slider_year_at(inner(layout.slider), column) {
                    app.slider.dragging = true;
                    app.slider.set(year);
                }
            } else if contains(layout.commodity, column, row) {
                app.focus = Focus::Commodity;
                if let Some(commodity) = commodity_at(inner(layout.commodity), column) {
                    app.set_commodity(commodity);
                }
            } else if contains(layout.country, column, row) {
                app.focus = Focus::Country;
                app.picker.open();
            }
        }
        MouseEventKind::Drag(MouseButton::Left) if app.slider.dragging => {
            // Past the track ends the knob sticks to the nearest year
            let track = inner(layout.slider);
            let column = column.clamp(track.x, track.x + track.width.saturating_sub(1));
            if let Some(year) = slider_year_at(track, column) {
                app.slider.set(year);
            }
        }
        MouseEventKind::Up(MouseButton::Left) if app.slider.dragging => app.commit_year(),
        MouseEventKind::ScrollUp if contains(layout.slider, column, row) => {
            app.slider.step(1);
            app.commit_year();
        }
        MouseEventKind::ScrollDown if contains(layout.slider, column, row) => {
            app.slider.step(-1);
            app.commit_year();
        }
        _ => {}
    }
}

fn inner(rect: Rect) -> Rect {
    rect.inner(Margin::new(1, 1))
}

fn projection(app: &App, layout: &DashboardLayout) -> Option<MapProjection> {
    let bounds = app.controller.store().bounds()?;
    Some(MapProjection::fit(bounds, layout.map_canvas))
}

fn click_map(app: &mut App, layout: &DashboardLayout, column: u16, row: u16) {
    let Some(projection) = projection(app, layout) else {
        return;
    };
    if let Some(index) = region_at(&projection, app.controller.store().regions(), column, row) {
        app.focus = Focus::Country;
        app.controller.dispatch(ControllerEvent::MapClicked(index));
        app.status_message.clear();
    }
}

fn update_hover(app: &mut App, layout: &DashboardLayout, column: u16, row: u16) {
    app.hover = projection(app, layout)
        .and_then(|projection| {
            region_at(&projection, app.controller.store().regions(), column, row)
        })
        .map(|region| Hover {
            column,
            row,
            region,
        });
}

fn click_dropdown(app: &mut App, layout: &DashboardLayout, column: u16, row: u16) {
    let total = app.picker.matches(app.controller.store().countries()).len();
    let area = layout.dropdown(app.area, total.min(DROPDOWN_ROWS));
    if !contains(area, column, row) {
        app.picker.close();
        return;
    }
    if let Some(index) = dropdown_index_at(area, row, app.picker.cursor, total) {
        app.picker.cursor = index;
        if let Some(country) = app.picker_choice() {
            app.choose_country(&country);
        }
    }
}
