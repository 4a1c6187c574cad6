//! Reactive controller: turns widget events into redraws.
//!
//! Events are processed strictly in FIFO order and every handler runs to
//! completion before the next one is taken off the queue. A handler computes
//! the next [`Selection`] and assigns it in a single statement before any
//! figure is rebuilt, so the periodic table refresh always reads a complete
//! snapshot.

use crate::query::{
    filter_by_country_and_year, filter_time_series, map_frame, region_index,
};
use crate::render::{
    line_figure, map_figure, summary_table, treemap_figure, LineFigure, MapFigure, SummaryTable,
    TreemapFigure,
};
use crate::selection::Selection;
use crate::store::DatasetStore;
use crate::Commodity;
use chrono::{DateTime, Local};
use std::collections::VecDeque;
use std::fmt;
use tracing::{debug, warn};

/// Where a country change came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountrySource {
    Dropdown,
    MapClick,
    /// Forced back to the aggregate region after clicking a region with no data.
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ControllerEvent {
    YearCommitted(i32),
    CommodityChanged(Commodity),
    CountryChanged {
        country: String,
        source: CountrySource,
    },
    MapClicked(usize),
    Tick,
}

impl fmt::Display for ControllerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::YearCommitted(year) => write!(f, "YearCommitted({year})"),
            Self::CommodityChanged(commodity) => write!(f, "CommodityChanged({commodity})"),
            Self::CountryChanged { country, source } => {
                write!(f, "CountryChanged({country}, {source:?})")
            }
            Self::MapClicked(row) => write!(f, "MapClicked({row})"),
            Self::Tick => write!(f, "Tick"),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PassState {
    Idle,
    Updating,
}

impl fmt::Display for PassState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Updating => write!(f, "Updating"),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PassEvent {
    BeginPass,
    FinishPass,
}

impl fmt::Display for PassEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BeginPass => write!(f, "BeginPass"),
            Self::FinishPass => write!(f, "FinishPass"),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct StateTransitionError {
    pub from: PassState,
    pub event: PassEvent,
}

impl fmt::Display for StateTransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid transition from {} with event {}",
            self.from, self.event
        )
    }
}

impl std::error::Error for StateTransitionError {}

struct NextState(PassState);

impl TryFrom<(PassState, PassEvent)> for NextState {
    type Error = StateTransitionError;

    fn try_from(value: (PassState, PassEvent)) -> Result<Self, Self::Error> {
        match value {
            (PassState::Idle, PassEvent::BeginPass) => Ok(Self(PassState::Updating)),
            (PassState::Updating, PassEvent::FinishPass) => Ok(Self(PassState::Idle)),
            (from, event) => Err(StateTransitionError { from, event }),
        }
    }
}

/// Tracks whether a render pass is in progress.
#[derive(Debug)]
pub struct RenderPassMachine {
    state: PassState,
}

impl RenderPassMachine {
    pub const fn new() -> Self {
        Self {
            state: PassState::Idle,
        }
    }

    pub const fn state(&self) -> PassState {
        self.state
    }

    pub fn process_event(&mut self, event: PassEvent) -> Result<(), StateTransitionError> {
        let next = NextState::try_from((self.state, event))?;
        self.state = next.0;
        Ok(())
    }
}

impl Default for RenderPassMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// Values the controller needs besides the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerSettings {
    pub partner: String,
    pub aggregate_region: String,
}

pub struct Controller {
    store: DatasetStore,
    settings: ControllerSettings,
    selection: Selection,
    /// Value shown by the country selector.
    dropdown: String,
    queue: VecDeque<ControllerEvent>,
    machine: RenderPassMachine,
    map: MapFigure,
    treemap: TreemapFigure,
    line: LineFigure,
    table: SummaryTable,
    table_refreshed_at: Option<DateTime<Local>>,
    table_refreshes: u64,
    map_repaints: u64,
    notice: Option<String>,
}

impl Controller {
    /// Builds every figure once for `selection`.
    pub fn new(store: DatasetStore, selection: Selection, settings: ControllerSettings) -> Self {
        let highlight = highlight_for(&store, &selection);
        let map = map_figure(
            &map_frame(&store, selection.commodity, selection.year),
            selection.commodity,
            highlight,
            &settings.partner,
        );
        let treemap = build_treemap(&store, &selection);
        let line = build_line(&store, &selection, &settings.partner);
        let table = build_table(&store, &selection, &settings.partner);

        debug!(?selection, "initial render");
        Self {
            dropdown: selection.country.clone(),
            store,
            settings,
            selection,
            queue: VecDeque::new(),
            machine: RenderPassMachine::new(),
            map,
            treemap,
            line,
            table,
            table_refreshed_at: Some(Local::now()),
            table_refreshes: 1,
            map_repaints: 1,
            notice: None,
        }
    }

    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    pub const fn store(&self) -> &DatasetStore {
        &self.store
    }

    pub const fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    pub fn dropdown(&self) -> &str {
        &self.dropdown
    }

    pub const fn map(&self) -> &MapFigure {
        &self.map
    }

    pub const fn treemap(&self) -> &TreemapFigure {
        &self.treemap
    }

    pub const fn line(&self) -> &LineFigure {
        &self.line
    }

    pub const fn table(&self) -> &SummaryTable {
        &self.table
    }

    pub const fn table_refreshed_at(&self) -> Option<DateTime<Local>> {
        self.table_refreshed_at
    }

    /// Number of summary table rebuilds so far, including the initial one.
    pub const fn table_refreshes(&self) -> u64 {
        self.table_refreshes
    }

    /// Number of full map repaints so far, including the initial one.
    pub const fn map_repaints(&self) -> u64 {
        self.map_repaints
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub const fn pass_state(&self) -> PassState {
        self.machine.state()
    }

    /// Queues `event` and drains the queue.
    pub fn dispatch(&mut self, event: ControllerEvent) {
        self.queue.push_back(event);
        self.drain();
    }

    /// Changes the country selector, firing a change event only when the value differs.
    pub fn select_country(&mut self, country: &str) {
        self.set_dropdown(country, CountrySource::Dropdown);
        self.drain();
    }

    /// Returns the selector to the last country that matched a map region.
    pub fn restore_last_valid_country(&mut self) {
        let country = self.selection.last_valid_country.clone();
        self.select_country(&country);
    }

    fn drain(&mut self) {
        while let Some(next) = self.queue.pop_front() {
            self.run_pass(next);
        }
    }

    fn run_pass(&mut self, event: ControllerEvent) {
        if let Err(e) = self.machine.process_event(PassEvent::BeginPass) {
            warn!(error = %e, %event, "dropping event");
            return;
        }
        debug!(%event, "handling event");

        self.handle(event);

        if let Err(e) = self.machine.process_event(PassEvent::FinishPass) {
            warn!(error = %e, "render pass did not finish cleanly");
        }
    }

    fn handle(&mut self, event: ControllerEvent) {
        match event {
            ControllerEvent::YearCommitted(year) => {
                self.notice = None;
                self.selection = self.selection.with_year(year);
                self.redraw_map();
                self.redraw_dependents();
            }
            ControllerEvent::CommodityChanged(commodity) => {
                self.notice = None;
                self.selection = self.selection.with_commodity(commodity);
                self.redraw_map();
                self.redraw_dependents();
            }
            ControllerEvent::CountryChanged { country, source } => {
                self.selection = match source {
                    CountrySource::Fallback => self.selection.with_fallback_country(&country),
                    CountrySource::Dropdown => {
                        self.notice = None;
                        self.selection.with_country(&country)
                    }
                    CountrySource::MapClick => self.selection.with_country(&country),
                };
                if self.selection.replot {
                    self.redraw_map();
                }
                self.redraw_dependents();
            }
            ControllerEvent::MapClicked(row) => self.handle_map_click(row),
            ControllerEvent::Tick => {
                self.table = build_table(&self.store, &self.selection, &self.settings.partner);
                self.table_refreshed_at = Some(Local::now());
                self.table_refreshes += 1;
            }
        }
    }

    fn handle_map_click(&mut self, row: usize) {
        let country = self
            .store
            .regions()
            .get(row)
            .map(|region| region.country.clone());

        match country {
            Some(country) if self.store.is_known_country(&country) => {
                self.map.highlight = Some(row);
                self.notice = None;
                self.set_dropdown(&country, CountrySource::MapClick);
            }
            other => {
                let name = other.unwrap_or_else(|| format!("region #{row}"));
                warn!(country = %name, "clicked region has no dependency data");
                let aggregate = self.settings.aggregate_region.clone();
                self.notice = Some(format!("No data for {name}; showing {aggregate}"));

                self.selection = self.selection.unmatched_region();
                self.dropdown.clone_from(&aggregate);
                self.queue.push_back(ControllerEvent::CountryChanged {
                    country: aggregate,
                    source: CountrySource::Fallback,
                });
            }
        }
    }

    fn set_dropdown(&mut self, country: &str, source: CountrySource) {
        if self.dropdown == country {
            return;
        }
        self.dropdown = country.to_string();
        self.queue.push_back(ControllerEvent::CountryChanged {
            country: country.to_string(),
            source,
        });
    }

    fn redraw_map(&mut self) {
        let highlight = highlight_for(&self.store, &self.selection);
        self.map = map_figure(
            &map_frame(&self.store, self.selection.commodity, self.selection.year),
            self.selection.commodity,
            highlight,
            &self.settings.partner,
        );
        self.map_repaints += 1;
        if self.selection.replot {
            self.selection = self.selection.after_map_repaint();
        }
    }

    fn redraw_dependents(&mut self) {
        self.treemap = build_treemap(&self.store, &self.selection);
        self.line = build_line(&self.store, &self.selection, &self.settings.partner);
    }
}

/// Highlight row for a fresh map: the selected country's region, unless a
/// replot was forced.
fn highlight_for(store: &DatasetStore, selection: &Selection) -> Option<usize> {
    if selection.replot {
        return None;
    }
    region_index(store, &selection.country).ok()
}

fn build_treemap(store: &DatasetStore, selection: &Selection) -> TreemapFigure {
    treemap_figure(&filter_by_country_and_year(
        store,
        selection.commodity,
        selection.year,
        &selection.country,
    ))
}

fn build_line(store: &DatasetStore, selection: &Selection, partner: &str) -> LineFigure {
    line_figure(
        &filter_time_series(store, selection.commodity, &selection.country),
        selection.commodity,
        Some(selection.year),
        partner,
    )
}

fn build_table(store: &DatasetStore, selection: &Selection, partner: &str) -> SummaryTable {
    summary_table(
        selection,
        &filter_time_series(store, selection.commodity, &selection.country),
        &filter_by_country_and_year(
            store,
            selection.commodity,
            selection.year,
            &selection.country,
        ),
        partner,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::demo_dataset;
    use crate::domain::{AGGREGATE_REGION, DEFAULT_PARTNER};

    fn controller() -> Controller {
        Controller::new(
            DatasetStore::from_demo(demo_dataset()),
            Selection::default(),
            ControllerSettings {
                partner: DEFAULT_PARTNER.to_string(),
                aggregate_region: AGGREGATE_REGION.to_string(),
            },
        )
    }

    fn row_of(controller: &Controller, country: &str) -> usize {
        region_index(controller.store(), country).unwrap()
    }

    #[test]
    fn initial_render_covers_every_artifact() {
        let controller = controller();
        assert_eq!(controller.map_repaints(), 1);
        assert_eq!(controller.map().regions.len(), controller.store().regions().len());
        assert!(!controller.treemap().is_empty());
        assert_eq!(controller.line().legend.as_deref(), Some(AGGREGATE_REGION));
        assert_eq!(controller.table().country, AGGREGATE_REGION);
        assert!(controller.table_refreshed_at().is_some());
        assert_eq!(controller.pass_state(), PassState::Idle);
    }

    #[test]
    fn year_and_commodity_redraw_the_map() {
        let mut controller = controller();
        controller.dispatch(ControllerEvent::YearCommitted(2015));
        controller.dispatch(ControllerEvent::CommodityChanged(Commodity::OilPetrol));

        assert_eq!(controller.map_repaints(), 3);
        assert_eq!(controller.selection().year, 2015);
        assert_eq!(controller.map().commodity, Commodity::OilPetrol);
        assert_eq!(controller.line().bar.map(|(x, _)| x), Some(2015.0));
    }

    #[test]
    fn dropdown_change_skips_map_repaint() {
        let mut controller = controller();
        controller.select_country("Poland");

        assert_eq!(controller.map_repaints(), 1);
        assert_eq!(controller.selection().country, "Poland");
        assert_eq!(controller.line().legend.as_deref(), Some("Poland"));
        // Same value again is not a change
        controller.select_country("Poland");
        assert_eq!(controller.selection().last_valid_country, "Poland");
    }

    #[test]
    fn known_click_moves_selector_to_that_country() {
        let mut controller = controller();
        for country in ["Poland", "Latvia", "Poland", "Germany"] {
            let row = row_of(&controller, country);
            controller.dispatch(ControllerEvent::MapClicked(row));
            assert_eq!(controller.dropdown(), country);
            assert_eq!(controller.selection().country, country);
            assert_eq!(controller.map().highlight, Some(row));
        }
        assert_eq!(controller.map_repaints(), 1);
    }

    #[test]
    fn unknown_clicks_settle_on_aggregate() {
        let mut controller = controller();
        controller.select_country("Poland");

        for country in ["Norway", "Ukraine"] {
            let repaints = controller.map_repaints();
            let row = row_of(&controller, country);
            controller.dispatch(ControllerEvent::MapClicked(row));

            assert_eq!(controller.dropdown(), AGGREGATE_REGION);
            assert_eq!(controller.selection().country, AGGREGATE_REGION);
            assert_eq!(controller.map_repaints(), repaints + 1);
            assert_eq!(controller.map().highlight, None);
            assert!(!controller.selection().replot);
            assert!(controller.notice().unwrap().contains(country));
        }
        assert_eq!(controller.selection().last_valid_country, "Poland");

        controller.restore_last_valid_country();
        assert_eq!(controller.dropdown(), "Poland");
    }

    #[test]
    fn later_changes_clear_the_unmatched_notice() {
        let mut controller = controller();
        let norway = row_of(&controller, "Norway");

        controller.dispatch(ControllerEvent::MapClicked(norway));
        assert!(controller.notice().is_some());
        controller.select_country("Poland");
        assert_eq!(controller.selection().country, "Poland");
        assert_eq!(controller.notice(), None);

        controller.dispatch(ControllerEvent::MapClicked(norway));
        controller.dispatch(ControllerEvent::CommodityChanged(Commodity::OilPetrol));
        assert_eq!(controller.notice(), None);

        controller.dispatch(ControllerEvent::MapClicked(norway));
        controller.dispatch(ControllerEvent::YearCommitted(2011));
        assert_eq!(controller.notice(), None);

        // The fallback itself keeps the notice it was raised with
        controller.dispatch(ControllerEvent::MapClicked(norway));
        assert!(controller.notice().unwrap().contains("Norway"));
        controller.dispatch(ControllerEvent::Tick);
        assert!(controller.notice().is_some());
    }

    #[test]
    fn out_of_range_click_is_an_unmatched_region() {
        let mut controller = controller();
        controller.dispatch(ControllerEvent::MapClicked(10_000));
        assert_eq!(controller.dropdown(), AGGREGATE_REGION);
        assert_eq!(controller.map_repaints(), 2);
    }

    #[test]
    fn replot_map_has_no_preselected_highlight() {
        let store = DatasetStore::from_demo(demo_dataset());
        let selection = Selection::default().with_country("Poland").unmatched_region();
        assert_eq!(highlight_for(&store, &selection), None);
        assert!(highlight_for(&store, &selection.after_map_repaint()).is_some());
    }

    #[test]
    fn tick_reads_latest_selection_without_changing_it() {
        let mut controller = controller();
        controller.select_country("Latvia");
        controller.dispatch(ControllerEvent::YearCommitted(2012));
        let before = controller.selection().clone();

        controller.dispatch(ControllerEvent::Tick);

        assert_eq!(controller.selection(), &before);
        assert_eq!(controller.table_refreshes(), 2);
        let table = controller.table();
        assert_eq!(table.country, "Latvia");
        let expected = filter_time_series(controller.store(), Commodity::NaturalGas, "Latvia")
            .into_iter()
            .find(|row| row.year == 2012)
            .map(|row| row.import);
        assert_eq!(table.import_pct, expected);
        assert!(table.import_value.is_some());
    }

    #[test]
    fn finishing_an_idle_pass_is_rejected() {
        let mut machine = RenderPassMachine::new();
        let err = machine.process_event(PassEvent::FinishPass).unwrap_err();
        assert_eq!(
            err,
            StateTransitionError {
                from: PassState::Idle,
                event: PassEvent::FinishPass,
            }
        );
        assert!(machine.process_event(PassEvent::BeginPass).is_ok());
        assert!(machine.process_event(PassEvent::BeginPass).is_err());
        assert_eq!(machine.state(), PassState::Updating);
    }
}
