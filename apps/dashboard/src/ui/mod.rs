// Terminal rendering for the dashboard
// Every panel is drawn from the controller's latest figures

pub mod layout;
pub mod screens;
pub mod widgets;

use crate::app::App;
use ratatui::layout::Margin;
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    screens::dashboard::render_dashboard(app, f);

    if app.show_help {
        screens::help::render_help_popup(f, f.area().inner(Margin::new(2, 1)));
    }
}
