use tracing::{debug, trace, warn};

use crate::core::{DatasetIndex, TradeRecord};
use crate::error::{TradeError, TradeResult};
use crate::interaction::{SessionPhase, ViewEvent};
use crate::render::{Presenter, YearBar};

use super::{ViewConfig, ViewSnapshot, ViewState};

/// Main orchestration facade consumed by host applications.
///
/// A session owns the loaded dataset and the view state, and drives a
/// presenter whenever the selection changes. `select_year` (and `dispatch`,
/// which routes to it) is the only path that mutates the view.
pub struct TradeSession<P: Presenter> {
    presenter: P,
    config: ViewConfig,
    dataset: DatasetIndex,
    view: ViewState,
    phase: SessionPhase,
}

impl<P: Presenter> TradeSession<P> {
    /// Builds the indexes, selects the initial year and draws the first scene.
    pub fn new(presenter: P, records: Vec<TradeRecord>, config: ViewConfig) -> TradeResult<Self> {
        config.validate()?;
        let (dataset, view) = prepare(records, config)?;
        debug!(
            records = dataset.records().len(),
            years = dataset.years().len(),
            selected_year = view.selected_year(),
            animated = config.is_animated(),
            "session created"
        );

        let mut session = Self {
            presenter,
            config,
            dataset,
            view,
            phase: SessionPhase::Idle,
        };
        session.draw_initial_scene()?;
        Ok(session)
    }

    /// Replaces the whole dataset with a fresh load and redraws from scratch.
    ///
    /// The current dataset and selection stay in place if the new records are
    /// rejected.
    pub fn reload(&mut self, records: Vec<TradeRecord>) -> TradeResult<()> {
        let (dataset, view) = prepare(records, self.config)?;
        self.dataset = dataset;
        self.view = view;
        debug!(
            records = self.dataset.records().len(),
            selected_year = self.view.selected_year(),
            "session reloaded"
        );
        self.draw_initial_scene()
    }

    /// Selects `year` and redraws the affected parts of the scene.
    ///
    /// Fails with `UnknownYear` before any presenter call when the year has no
    /// records; the current view is left unchanged in that case.
    pub fn select_year(&mut self, year: i32) -> TradeResult<()> {
        self.view.select_year(self.dataset.years(), year)?;

        let result = self.run_update(Self::redraw_selection);
        if let Err(err) = &result {
            warn!(year, error = %err, "redraw after year selection failed");
        }
        result
    }

    /// Routes an event from the rendering layer to its handler.
    pub fn dispatch(&mut self, event: ViewEvent) -> TradeResult<()> {
        trace!(?event, "dispatch view event");
        match event {
            ViewEvent::YearSelected { year } => self.select_year(year),
        }
    }

    #[must_use]
    pub fn current_view(&self) -> ViewSnapshot {
        self.view.current_view()
    }

    #[must_use]
    pub fn selected_year(&self) -> i32 {
        self.view.selected_year()
    }

    #[must_use]
    pub fn visible_records(&self) -> &[TradeRecord] {
        self.view.visible_records()
    }

    /// Phase between calls; always `Idle` here since updates hold `&mut self`.
    /// Presenters observe `Updating` through `Presenter::phase_changed`.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn config(&self) -> ViewConfig {
        self.config
    }

    #[must_use]
    pub fn dataset(&self) -> &DatasetIndex {
        &self.dataset
    }

    #[must_use]
    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    /// Bars for the year selector, year-descending.
    #[must_use]
    pub fn year_bars(&self) -> Vec<YearBar> {
        self.dataset
            .deficits()
            .entries()
            .iter()
            .map(|entry| YearBar::new(entry.year, entry.magnitude))
            .collect()
    }

    #[must_use]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    #[must_use]
    pub fn into_presenter(self) -> P {
        self.presenter
    }

    fn redraw_selection(&mut self) -> TradeResult<()> {
        self.presenter.highlight_selected_bar(self.view.selected_year())?;
        self.presenter.draw_scales(self.view.max_visible_imports())?;
        self.presenter.draw_bubbles(self.view.visible_records())
    }

    fn draw_initial_scene(&mut self) -> TradeResult<()> {
        self.run_update(Self::redraw_all)
    }

    /// Runs `update` inside an `Updating` phase and always returns to `Idle`.
    fn run_update(&mut self, update: fn(&mut Self) -> TradeResult<()>) -> TradeResult<()> {
        self.set_phase(SessionPhase::Updating);
        let result = update(self);
        self.set_phase(SessionPhase::Idle);
        result
    }

    fn set_phase(&mut self, phase: SessionPhase) {
        self.phase = phase;
        self.presenter.phase_changed(phase);
    }

    fn redraw_all(&mut self) -> TradeResult<()> {
        let bars = self.year_bars();
        self.presenter.draw_scales(self.view.max_visible_imports())?;
        self.presenter.draw_legend(self.dataset.continents())?;
        self.presenter.draw_bubbles(self.view.visible_records())?;
        self.presenter.draw_year_bars(&bars)?;
        self.presenter.highlight_selected_bar(self.view.selected_year())
    }
}

fn prepare(
    records: Vec<TradeRecord>,
    config: ViewConfig,
) -> TradeResult<(DatasetIndex, ViewState)> {
    let dataset = DatasetIndex::build(records)?;
    let initial_year = match config.default_year {
        Some(year) => year,
        None => dataset
            .years()
            .latest_year()
            .ok_or(TradeError::EmptyDataset)?,
    };
    let view = ViewState::new(dataset.years(), initial_year, config.top_k)?;
    Ok((dataset, view))
}
