use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{
    BandScale, LinearScale, Point, SqrtScale, TradeRecord, nice_domain, tick_increment,
};
use crate::error::{TradeError, TradeResult};
use crate::interaction::ViewEvent;
use crate::render::{
    BubblePose, CATEGORY10, CirclePrimitive, Color, LinePrimitive, Presenter, RectPrimitive,
    RenderFrame, Renderer, SceneLayout, TextHAlign, TextPrimitive, TransitionScheduler, YearBar,
    format_tick_label, reconcile,
};

const IMPORTS_TITLE: &str = "Imports (Millions of Dollars)";
const EXPORTS_TITLE: &str = "Exports (Millions of Dollars)";
const DOMAIN_KEY: &str = "domain";
const TICK_LABEL_GAP: f64 = 9.0;

/// One country marker in the retained scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BubbleNode {
    pub country: String,
    pub continent: String,
    pub color: Color,
    /// Last settled pose; what is drawn when no transition is in flight.
    pub resting: BubblePose,
    /// Pose the bubble is heading to.
    pub target: BubblePose,
    /// Set while the exit transition runs; the node is dropped when it ends.
    pub exiting: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub continent: String,
    pub color: Color,
}

/// One laid-out year bar in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarNode {
    pub bar: YearBar,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: Color,
}

impl BarNode {
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// Counts from the most recent bubble reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BubbleChangeStats {
    pub added: usize,
    pub moved: usize,
    pub removed: usize,
}

/// Headless reference presenter.
///
/// Keeps a retained scene (scales, legend, bubbles, bars), reconciles bubbles
/// by country on every redraw and animates changes on an explicit clock that
/// the host advances. `build_render_frame` materializes the scene at the
/// current clock.
#[derive(Debug, Clone)]
pub struct ScenePresenter {
    layout: SceneLayout,
    clock_ms: f64,
    axis_max: f64,
    axis_motion: TransitionScheduler<f64>,
    colors: IndexMap<String, Color>,
    legend: Vec<LegendEntry>,
    bubbles: IndexMap<String, BubbleNode>,
    bubble_motion: TransitionScheduler<BubblePose>,
    bars: Vec<BarNode>,
    year_scale: Option<BandScale<i32>>,
    magnitude_scale: Option<LinearScale>,
    selected_year: Option<i32>,
    last_changes: BubbleChangeStats,
}

impl ScenePresenter {
    pub fn new(layout: SceneLayout, transition_duration_ms: u64) -> TradeResult<Self> {
        layout.validate()?;
        Ok(Self {
            layout,
            clock_ms: 0.0,
            axis_max: 1.0,
            axis_motion: TransitionScheduler::new(transition_duration_ms),
            colors: IndexMap::new(),
            legend: Vec::new(),
            bubbles: IndexMap::new(),
            bubble_motion: TransitionScheduler::new(transition_duration_ms),
            bars: Vec::new(),
            year_scale: None,
            magnitude_scale: None,
            selected_year: None,
            last_changes: BubbleChangeStats::default(),
        })
    }

    #[must_use]
    pub fn layout(&self) -> &SceneLayout {
        &self.layout
    }

    #[must_use]
    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    /// Moves the scene clock forward and settles finished transitions.
    pub fn advance_to(&mut self, now_ms: f64) -> TradeResult<()> {
        if !now_ms.is_finite() || now_ms < self.clock_ms {
            return Err(TradeError::InvalidData(format!(
                "scene clock must be finite and monotonic (current={}, requested={now_ms})",
                self.clock_ms
            )));
        }
        self.clock_ms = now_ms;

        for (country, pose) in self.bubble_motion.drain_finished(now_ms) {
            let exited = match self.bubbles.get_mut(&country) {
                Some(node) if node.exiting => true,
                Some(node) => {
                    node.resting = pose;
                    false
                }
                None => false,
            };
            if exited {
                self.bubbles.shift_remove(&country);
                trace!(country = %country, "bubble exit finished");
            }
        }
        for (_, value) in self.axis_motion.drain_finished(now_ms) {
            self.axis_max = value;
        }
        Ok(())
    }

    /// `true` when no transition is in flight.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.bubble_motion.is_idle() && self.axis_motion.is_idle()
    }

    /// Axis domain upper bound shown at the current clock.
    #[must_use]
    pub fn displayed_axis_max(&self) -> f64 {
        self.axis_motion
            .sample(DOMAIN_KEY, self.clock_ms)
            .unwrap_or(self.axis_max)
    }

    /// Axis domain upper bound the scene is heading to.
    #[must_use]
    pub fn target_axis_max(&self) -> f64 {
        self.axis_motion
            .get(DOMAIN_KEY)
            .map_or(self.axis_max, |transition| transition.to)
    }

    /// Scatter scales at their target domain.
    pub fn scales(&self) -> TradeResult<(SqrtScale, SqrtScale)> {
        self.scales_for(self.target_axis_max())
    }

    #[must_use]
    pub fn legend(&self) -> &[LegendEntry] {
        &self.legend
    }

    #[must_use]
    pub fn color_for(&self, continent: &str) -> Option<Color> {
        self.colors.get(continent).copied()
    }

    #[must_use]
    pub fn bubble(&self, country: &str) -> Option<&BubbleNode> {
        self.bubbles.get(country)
    }

    pub fn bubbles(&self) -> impl Iterator<Item = &BubbleNode> + '_ {
        self.bubbles.values()
    }

    #[must_use]
    pub fn bubble_count(&self) -> usize {
        self.bubbles.len()
    }

    /// Pose of `country` at the current clock.
    #[must_use]
    pub fn bubble_pose(&self, country: &str) -> Option<BubblePose> {
        let node = self.bubbles.get(country)?;
        Some(
            self.bubble_motion
                .sample(country, self.clock_ms)
                .unwrap_or(node.resting),
        )
    }

    #[must_use]
    pub fn bubble_motion(&self) -> &TransitionScheduler<BubblePose> {
        &self.bubble_motion
    }

    #[must_use]
    pub fn last_changes(&self) -> BubbleChangeStats {
        self.last_changes
    }

    #[must_use]
    pub fn bars(&self) -> &[BarNode] {
        &self.bars
    }

    #[must_use]
    pub fn selected_year(&self) -> Option<i32> {
        self.selected_year
    }

    /// Click event of the year bar under a canvas point, if any.
    #[must_use]
    pub fn bar_event_at(&self, x: f64, y: f64) -> Option<ViewEvent> {
        self.bars
            .iter()
            .find(|node| node.contains(x, y))
            .map(|node| node.bar.on_click)
    }

    pub fn render<R: Renderer>(&self, renderer: &mut R) -> TradeResult<()> {
        let frame = self.build_render_frame()?;
        renderer.render(&frame)
    }

    /// Materializes the scene at the current clock.
    pub fn build_render_frame(&self) -> TradeResult<RenderFrame> {
        let mut frame = RenderFrame::new(self.layout.canvas);
        self.push_scatter_axes(&mut frame)?;
        self.push_legend(&mut frame);
        self.push_bubbles(&mut frame);
        self.push_year_bars(&mut frame);
        frame.validate()?;
        Ok(frame)
    }

    fn scales_for(&self, axis_max: f64) -> TradeResult<(SqrtScale, SqrtScale)> {
        let x_scale = SqrtScale::new((0.0, axis_max), (0.0, self.layout.plot_width()))?;
        let y_scale = SqrtScale::new((0.0, axis_max), (self.layout.plot_height(), 0.0))?;
        Ok((x_scale, y_scale))
    }

    /// Color for `continent`, appending a palette slot when it is outside the
    /// legend domain.
    fn assign_color(&mut self, continent: &str) -> Color {
        if let Some(color) = self.colors.get(continent) {
            return *color;
        }
        let color = CATEGORY10[self.colors.len() % CATEGORY10.len()];
        self.colors.insert(continent.to_owned(), color);
        color
    }

    fn bubble_target(&self, record: &TradeRecord) -> TradeResult<BubblePose> {
        let (x_scale, y_scale) = self.scales()?;
        let position = Point::new(x_scale.map(record.exports()), y_scale.map(record.imports()));
        if !position.is_finite() {
            return Err(TradeError::InvalidData(format!(
                "bubble position for `{}` is not finite",
                record.country()
            )));
        }
        Ok(BubblePose::visible_at(position))
    }

    fn push_scatter_axes(&self, frame: &mut RenderFrame) -> TradeResult<()> {
        let layout = &self.layout;
        let left = layout.margin_left;
        let top = layout.margin_top;
        let width = layout.plot_width();
        let height = layout.plot_height();
        let font = layout.font_size_px;

        let axis_max = self.displayed_axis_max();
        let (x_scale, y_scale) = self.scales_for(axis_max)?;
        let step = tick_step(0.0, axis_max, layout.axis_tick_count);

        for tick in x_scale.ticks(layout.axis_tick_count) {
            let x = left + x_scale.map(tick);
            frame.lines.push(LinePrimitive::new(
                x,
                top,
                x,
                top + height,
                1.0,
                layout.grid_color,
            ));
            frame.texts.push(TextPrimitive::new(
                format_tick_label(tick, step),
                x,
                top + height + TICK_LABEL_GAP,
                font,
                layout.text_color,
                TextHAlign::Center,
            ));
        }
        for tick in y_scale.ticks(layout.axis_tick_count) {
            let y = top + y_scale.map(tick);
            frame.lines.push(LinePrimitive::new(
                left,
                y,
                left + width,
                y,
                1.0,
                layout.grid_color,
            ));
            frame.texts.push(TextPrimitive::new(
                format_tick_label(tick, step),
                left - TICK_LABEL_GAP,
                y - font / 2.0,
                font,
                layout.text_color,
                TextHAlign::Right,
            ));
        }

        frame.lines.push(LinePrimitive::new(
            left,
            top + height,
            left + width,
            top + height,
            1.0,
            layout.axis_color,
        ));
        frame.lines.push(LinePrimitive::new(
            left,
            top,
            left,
            top + height,
            1.0,
            layout.axis_color,
        ));

        frame.texts.push(TextPrimitive::new(
            IMPORTS_TITLE,
            left + 6.0,
            top - 2.0 - font,
            font,
            layout.text_color,
            TextHAlign::Left,
        ));
        frame.texts.push(TextPrimitive::new(
            EXPORTS_TITLE,
            left + width - 2.0,
            top + height - 6.0 - font,
            font,
            layout.text_color,
            TextHAlign::Right,
        ));
        Ok(())
    }

    fn push_legend(&self, frame: &mut RenderFrame) {
        let layout = &self.layout;
        let x = layout.margin_left + 2.0 + layout.plot_width();
        for (index, entry) in self.legend.iter().enumerate() {
            let y = layout.margin_top + index as f64 * layout.legend_spacing_px;
            frame.rects.push(RectPrimitive::new(
                x,
                y,
                layout.legend_swatch_px,
                layout.legend_swatch_px,
                entry.color,
            ));
            if !entry.continent.is_empty() {
                frame.texts.push(TextPrimitive::new(
                    entry.continent.clone(),
                    x + layout.legend_swatch_px + 4.0,
                    y + layout.legend_swatch_px / 2.0 - layout.font_size_px / 2.0,
                    layout.font_size_px,
                    layout.text_color,
                    TextHAlign::Left,
                ));
            }
        }
    }

    fn push_bubbles(&self, frame: &mut RenderFrame) {
        let layout = &self.layout;
        for node in self.bubbles.values() {
            let pose = self
                .bubble_motion
                .sample(&node.country, self.clock_ms)
                .unwrap_or(node.resting);
            let opacity = pose.opacity.clamp(0.0, 1.0);
            let cx = layout.margin_left + pose.position.x;
            let cy = layout.margin_top + pose.position.y;

            frame.circles.push(CirclePrimitive::new(
                cx,
                cy,
                layout.bubble_radius,
                node.color.with_alpha(node.color.alpha * opacity),
            ));
            if !node.country.is_empty() {
                frame.texts.push(TextPrimitive::new(
                    node.country.clone(),
                    cx + layout.bubble_label_offset,
                    cy - layout.font_size_px / 2.0,
                    layout.font_size_px,
                    layout.text_color.with_alpha(layout.text_color.alpha * opacity),
                    TextHAlign::Left,
                ));
            }
        }
    }

    fn push_year_bars(&self, frame: &mut RenderFrame) {
        let layout = &self.layout;
        let font = layout.font_size_px;
        let panel_bottom = layout.year_panel_y + layout.year_panel_height;

        for node in &self.bars {
            frame.rects.push(RectPrimitive::new(
                node.x,
                node.y,
                node.width,
                node.height,
                node.color,
            ));
            frame.texts.push(TextPrimitive::new(
                node.bar.year.to_string(),
                layout.year_panel_x - TICK_LABEL_GAP,
                node.y + node.height / 2.0 - font / 2.0,
                font,
                layout.text_color,
                TextHAlign::Right,
            ));
        }

        if let Some(scale) = self.magnitude_scale {
            let (start, end) = scale.domain();
            let step = tick_step(start, end, layout.year_axis_tick_count);
            for tick in scale.ticks(layout.year_axis_tick_count) {
                let x = layout.year_panel_x + scale.map(tick);
                frame.texts.push(TextPrimitive::new(
                    format_tick_label(tick, step),
                    x,
                    panel_bottom + TICK_LABEL_GAP,
                    font,
                    layout.text_color,
                    TextHAlign::Center,
                ));
            }
            frame.lines.push(LinePrimitive::new(
                layout.year_panel_x,
                panel_bottom,
                layout.year_panel_x + layout.year_panel_width,
                panel_bottom,
                1.0,
                layout.axis_color,
            ));
        }
        if self.year_scale.is_some() {
            frame.lines.push(LinePrimitive::new(
                layout.year_panel_x,
                layout.year_panel_y,
                layout.year_panel_x,
                panel_bottom,
                1.0,
                layout.axis_color,
            ));
        }
    }
}

impl Presenter for ScenePresenter {
    fn draw_scales(&mut self, max_imports: f64) -> TradeResult<()> {
        if !max_imports.is_finite() {
            return Err(TradeError::InvalidData(
                "max imports must be finite".to_owned(),
            ));
        }
        let raw_max = if max_imports > 0.0 { max_imports } else { 1.0 };
        let (_, nice_max) = nice_domain(0.0, raw_max, self.layout.nice_tick_count);

        let resting = self.axis_max;
        let shown = self.axis_motion.schedule(DOMAIN_KEY, resting, nice_max, self.clock_ms);
        if !self.axis_motion.is_animated() {
            self.axis_max = shown;
        }
        debug!(max_imports, nice_max, "draw scales");
        Ok(())
    }

    fn draw_legend(&mut self, continents: &IndexSet<String>) -> TradeResult<()> {
        // The color domain is the legend; slots follow its order on every redraw.
        self.colors = continents
            .iter()
            .enumerate()
            .map(|(index, continent)| {
                (continent.clone(), CATEGORY10[index % CATEGORY10.len()])
            })
            .collect();
        self.legend = self
            .colors
            .iter()
            .map(|(continent, color)| LegendEntry {
                continent: continent.clone(),
                color: *color,
            })
            .collect();
        debug!(entries = self.legend.len(), "draw legend");
        Ok(())
    }

    fn draw_bubbles(&mut self, records: &[TradeRecord]) -> TradeResult<()> {
        let diff = reconcile(&self.bubbles, records);
        let origin = Point::default();
        let now = self.clock_ms;
        let animated = self.bubble_motion.is_animated();

        // Targets first so a bad position leaves the scene untouched.
        let mut entering = Vec::with_capacity(diff.added.len());
        for record in &diff.added {
            entering.push((*record, self.bubble_target(record)?));
        }
        let mut updating = Vec::with_capacity(diff.moved.len());
        for record in &diff.moved {
            updating.push((*record, self.bubble_target(record)?));
        }

        for (record, target) in entering {
            let color = self.assign_color(record.continent());
            let resting = BubblePose::visible_at(origin);
            let shown = self
                .bubble_motion
                .schedule(record.country(), resting, target, now);
            self.bubbles.insert(
                record.country().to_owned(),
                BubbleNode {
                    country: record.country().to_owned(),
                    continent: record.continent().to_owned(),
                    color,
                    resting: if animated { resting } else { shown },
                    target,
                    exiting: false,
                },
            );
        }

        for (record, target) in updating {
            let color = self.assign_color(record.continent());
            if let Some(node) = self.bubbles.get_mut(record.country()) {
                let shown = self
                    .bubble_motion
                    .schedule(record.country(), node.resting, target, now);
                node.continent = record.continent().to_owned();
                node.color = color;
                node.target = target;
                node.exiting = false;
                if !animated {
                    node.resting = shown;
                }
            }
        }

        let mut removed = 0;
        for country in &diff.removed {
            if !animated {
                self.bubble_motion.cancel(country, now);
                self.bubbles.shift_remove(country);
                removed += 1;
                continue;
            }
            if let Some(node) = self.bubbles.get_mut(country) {
                if node.exiting {
                    continue;
                }
                let target = BubblePose::new(origin, 0.0);
                self.bubble_motion.schedule(country, node.resting, target, now);
                node.target = target;
                node.exiting = true;
                removed += 1;
            }
        }

        self.last_changes = BubbleChangeStats {
            added: diff.added.len(),
            moved: diff.moved.len(),
            removed,
        };
        debug!(
            added = self.last_changes.added,
            moved = self.last_changes.moved,
            removed = self.last_changes.removed,
            animated,
            "draw bubbles"
        );
        Ok(())
    }

    fn draw_year_bars(&mut self, bars: &[YearBar]) -> TradeResult<()> {
        let layout = self.layout;
        let years: Vec<i32> = bars.iter().map(|bar| bar.year).collect();
        let year_scale = BandScale::new(
            years,
            (0.0, layout.year_panel_height),
            layout.year_band_padding,
        )?;

        let max_magnitude = bars.iter().map(|bar| bar.magnitude).fold(0.0, f64::max);
        let domain_max = if max_magnitude > 0.0 { max_magnitude } else { 1.0 };
        let magnitude_scale = LinearScale::new((0.0, domain_max), (layout.year_panel_width, 0.0))?;

        let mut nodes = Vec::with_capacity(bars.len());
        for bar in bars {
            let offset = year_scale.position(&bar.year).ok_or_else(|| {
                TradeError::InvalidData(format!("year {} has no band", bar.year))
            })?;
            nodes.push(BarNode {
                bar: *bar,
                x: layout.year_panel_x,
                y: layout.year_panel_y + offset,
                width: (layout.year_panel_width - magnitude_scale.map(bar.magnitude)).max(0.0),
                height: year_scale.bandwidth(),
                color: layout.default_bar_color,
            });
        }

        self.bars = nodes;
        self.year_scale = Some(year_scale);
        self.magnitude_scale = Some(magnitude_scale);
        self.selected_year = None;
        debug!(bars = self.bars.len(), "draw year bars");
        Ok(())
    }

    fn highlight_selected_bar(&mut self, selected_year: i32) -> TradeResult<()> {
        for node in &mut self.bars {
            node.color = if node.bar.year == selected_year {
                self.layout.selected_bar_color
            } else {
                self.layout.default_bar_color
            };
        }
        self.selected_year = Some(selected_year);
        trace!(selected_year, "highlight selected bar");
        Ok(())
    }
}

fn tick_step(start: f64, end: f64, count: usize) -> f64 {
    let increment = tick_increment(start.min(end), start.max(end), count);
    if increment < 0.0 {
        -1.0 / increment
    } else {
        increment
    }
}
