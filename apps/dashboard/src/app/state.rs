use crate::controller::{Controller, ControllerEvent};
use crate::domain::{FIRST_YEAR, LAST_YEAR};
use crate::selection::clamp_year;
use crate::Commodity;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use ratatui::layout::Rect;
use std::time::{Duration, Instant};

/// Control that receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Commodity,
    Year,
    Country,
}

impl Focus {
    pub const ALL: [Self; 3] = [Self::Commodity, Self::Year, Self::Country];

    pub const fn index(self) -> usize {
        match self {
            Self::Commodity => 0,
            Self::Year => 1,
            Self::Country => 2,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Commodity => "Commodity",
            Self::Year => "Year",
            Self::Country => "Country",
        }
    }
}

/// Year slider with a pending value that is only committed on release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearSlider {
    pub pending: i32,
    pub dragging: bool,
}

impl YearSlider {
    pub const fn new(year: i32) -> Self {
        Self {
            pending: year,
            dragging: false,
        }
    }

    pub fn step(&mut self, delta: i32) {
        self.pending = clamp_year(self.pending + delta);
    }

    pub fn set(&mut self, year: i32) {
        self.pending = clamp_year(year);
    }

    /// Fraction of the track covered by the pending value.
    pub fn ratio(&self) -> f64 {
        f64::from(self.pending - FIRST_YEAR) / f64::from(LAST_YEAR - FIRST_YEAR)
    }
}

/// Country dropdown with type-to-filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountryPicker {
    pub open: bool,
    pub query: String,
    pub cursor: usize,
}

impl CountryPicker {
    pub fn open(&mut self) {
        self.open = true;
        self.query.clear();
        self.cursor = 0;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.query.clear();
        self.cursor = 0;
    }

    pub fn push(&mut self, c: char) {
        self.query.push(c);
        self.cursor = 0;
    }

    pub fn pop(&mut self) {
        self.query.pop();
        self.cursor = 0;
    }

    /// Countries matching the query, best match first. An empty query keeps
    /// the stored order.
    pub fn matches<'a>(&self, countries: &'a [String]) -> Vec<&'a str> {
        if self.query.is_empty() {
            return countries.iter().map(String::as_str).collect();
        }

        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<(i64, usize, &str)> = countries
            .iter()
            .enumerate()
            .filter_map(|(i, country)| {
                matcher
                    .fuzzy_match(country, &self.query)
                    .map(|score| (score, i, country.as_str()))
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        scored.into_iter().map(|(_, _, country)| country).collect()
    }
}

/// Region under the mouse pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hover {
    pub column: u16,
    pub row: u16,
    pub region: usize,
}

pub struct App {
    pub running: bool,
    pub controller: Controller,
    pub focus: Focus,
    pub slider: YearSlider,
    pub picker: CountryPicker,
    pub hover: Option<Hover>,
    pub show_help: bool,
    pub status_message: String,
    /// Size of the last drawn frame, used for mouse hit testing.
    pub area: Rect,
    refresh_interval: Duration,
    last_tick: Instant,
}

impl App {
    pub fn new(controller: Controller, refresh_interval: Duration) -> Self {
        let year = controller.selection().year;
        Self {
            running: true,
            controller,
            focus: Focus::Commodity,
            slider: YearSlider::new(year),
            picker: CountryPicker::default(),
            hover: None,
            show_help: false,
            status_message: String::new(),
            area: Rect::default(),
            refresh_interval,
            last_tick: Instant::now(),
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn set_commodity(&mut self, commodity: Commodity) {
        if self.controller.selection().commodity != commodity {
            self.controller
                .dispatch(ControllerEvent::CommodityChanged(commodity));
            self.status_message = format!("Showing {commodity}");
        }
    }

    /// Commits the slider's pending year if it differs from the selection.
    pub fn commit_year(&mut self) {
        self.slider.dragging = false;
        let year = self.slider.pending;
        if self.controller.selection().year != year {
            self.controller.dispatch(ControllerEvent::YearCommitted(year));
            self.status_message = format!("Year {year}");
        }
    }

    pub fn choose_country(&mut self, country: &str) {
        self.picker.close();
        self.controller.select_country(country);
    }

    /// Country under the picker cursor, if the filter matches anything.
    pub fn picker_choice(&self) -> Option<String> {
        self.picker
            .matches(self.controller.store().countries())
            .get(self.picker.cursor)
            .map(|country| (*country).to_string())
    }

    pub fn restore_last_valid_country(&mut self) {
        self.controller.restore_last_valid_country();
        self.status_message = format!("Back to {}", self.controller.dropdown());
    }

    /// Fires the table refresh once per refresh interval.
    pub fn on_tick(&mut self, now: Instant) {
        if now.duration_since(self.last_tick) >= self.refresh_interval {
            self.last_tick = now;
            self.controller.dispatch(ControllerEvent::Tick);
        }
    }

    pub const fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::controller::ControllerSettings;
    use crate::demo::demo_dataset;
    use crate::domain::{AGGREGATE_REGION, DEFAULT_PARTNER};
    use crate::selection::Selection;
    use crate::store::DatasetStore;

    pub(crate) fn demo_app() -> App {
        let controller = Controller::new(
            DatasetStore::from_demo(demo_dataset()),
            Selection::default(),
            ControllerSettings {
                partner: DEFAULT_PARTNER.to_string(),
                aggregate_region: AGGREGATE_REGION.to_string(),
            },
        );
        App::new(controller, Duration::from_millis(1000))
    }

    #[test]
    fn slider_clamps_pending_year() {
        let mut slider = YearSlider::new(2019);
        slider.step(5);
        assert_eq!(slider.pending, LAST_YEAR);
        slider.set(1900);
        assert_eq!(slider.pending, FIRST_YEAR);
        assert!(slider.ratio().abs() < f64::EPSILON);
    }

    #[test]
    fn picker_filters_fuzzily() {
        let countries: Vec<String> = ["Latvia", "Lithuania", "Poland", "Portugal"]
            .iter()
            .map(ToString::to_string)
            .collect();
        let mut picker = CountryPicker::default();
        assert_eq!(picker.matches(&countries).len(), 4);

        for c in "pol".chars() {
            picker.push(c);
        }
        assert_eq!(picker.matches(&countries).first(), Some(&"Poland"));

        picker.query = "xyz".to_string();
        assert!(picker.matches(&countries).is_empty());
    }

    #[test]
    fn pending_year_is_committed_once() {
        let mut app = demo_app();
        let repaints = app.controller.map_repaints();

        app.slider.step(-3);
        assert_eq!(app.controller.selection().year, 2020);
        app.commit_year();
        assert_eq!(app.controller.selection().year, 2017);
        app.commit_year();
        assert_eq!(app.controller.map_repaints(), repaints + 1);
    }

    #[test]
    fn tick_waits_for_refresh_interval() {
        let mut app = demo_app();
        assert_eq!(app.refresh_interval(), Duration::from_millis(1000));
        let start = Instant::now();
        let before = app.controller.table_refreshes();

        app.on_tick(start);
        app.on_tick(start + Duration::from_millis(900));
        assert_eq!(app.controller.table_refreshes(), before);

        app.on_tick(start + Duration::from_millis(1500));
        assert_eq!(app.controller.table_refreshes(), before + 1);

        // The interval restarts from the last refresh
        app.on_tick(start + Duration::from_millis(2400));
        assert_eq!(app.controller.table_refreshes(), before + 1);
        app.on_tick(start + Duration::from_millis(2500));
        assert_eq!(app.controller.table_refreshes(), before + 2);
    }
}
