// File: crates/animchart-core/src/chart.rs
// Summary: Chart controller: owns the surfaces and per-chart state, drives reveal frames and answers pointer events.

use tracing::{debug, trace, warn};

use crate::animation::RevealAnimator;
use crate::color::Rgba;
use crate::config::{ChartConfig, ChartFamily, ChartKind, ClickValue, Dimension, HostMetrics, LineStyle};
use crate::error::{ChartError, ChartResult};
use crate::geometry::{Orientation, Point, Rect};
use crate::hit::{Hit, HitTester};
use crate::layout::{LayoutMetrics, LayoutNegotiator};
use crate::render::{axes, bar, line, pie, BarBuilder, Painter, PieLayout, Scene};
use crate::scale::{scale_for, ValueScale};
use crate::surface::DrawingContext;
use crate::text::TextMeasurer;
use crate::tooltip::TooltipPlacement;

/// Controller lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Building,
    Animating,
    /// Fully revealed; the final geometry is kept for hit testing.
    Idle,
    HitTesting,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Cursor {
    #[default]
    Default,
    Pointer,
}

/// Ticket for one scheduled frame callback. Tokens issued before a
/// rebuild or resize are stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameToken(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Schedule another frame.
    Continue,
    Done,
    /// Token predates the current build; nothing was drawn.
    Stale,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HoverOutcome {
    /// Empty when nothing is under the pointer.
    pub message: String,
    pub tooltip: TooltipPlacement,
    pub cursor: Cursor,
}

#[derive(Clone, Debug)]
pub enum ChartLayout {
    Cartesian { metrics: LayoutMetrics, scale: ValueScale },
    Pie(PieLayout),
}

impl ChartLayout {
    pub fn orientation(&self) -> Orientation {
        match self {
            ChartLayout::Cartesian { metrics, .. } => metrics.orientation,
            ChartLayout::Pie(_) => Orientation::Vertical,
        }
    }

    fn reveal_extent(&self) -> f32 {
        match self {
            ChartLayout::Cartesian { metrics, .. } => metrics.plot_extent(),
            ChartLayout::Pie(layout) => layout.reveal_extent(),
        }
    }

    fn plot(&self) -> Rect {
        match self {
            ChartLayout::Cartesian { metrics, .. } => metrics.plot_rect(),
            ChartLayout::Pie(layout) => {
                let (c, r) = (layout.center, layout.radius);
                Rect::from_ltrb(c.x - r, c.y - r, c.x + r, c.y + r)
            }
        }
    }
}

/// Mutable state of one chart build.
#[derive(Clone, Debug)]
pub struct RenderState {
    pub reveal: RevealAnimator,
    /// Running stacked top per category, reset every frame.
    pub stack_offsets: Vec<f32>,
    pub plot: Rect,
    pub bar_builder: BarBuilder,
    pub line_style: LineStyle,
    pub series_colors: Vec<Rgba>,
    pub line_colors: Vec<Rgba>,
}

#[derive(Clone, Debug)]
pub struct ChartState {
    pub layout: ChartLayout,
    pub render: RenderState,
}

impl ChartState {
    fn build(config: &ChartConfig, measurer: &dyn TextMeasurer, canvas: (f32, f32)) -> Self {
        let layout = match config.kind.family() {
            ChartFamily::Pie => ChartLayout::Pie(PieLayout::negotiate(config, measurer, canvas)),
            _ => {
                let range = scale_for(config);
                let metrics = LayoutNegotiator::negotiate(config, &range, measurer, canvas);
                let scale = metrics.value_scale(range);
                ChartLayout::Cartesian { metrics, scale }
            }
        };
        let render = RenderState {
            reveal: RevealAnimator::new(layout.reveal_extent()),
            stack_offsets: Vec::with_capacity(config.category_count()),
            plot: layout.plot(),
            bar_builder: config.bar_style().builder(),
            line_style: config.line_style(),
            series_colors: config.series_colors(),
            line_colors: config.line_colors(),
        };
        Self { layout, render }
    }

    /// Geometry at reveal `amount`, and whether nothing was clamped.
    fn scene(&mut self, config: &ChartConfig, amount: f32) -> (Scene, bool) {
        let render = &mut self.render;
        match &self.layout {
            ChartLayout::Cartesian { metrics, scale } if config.kind.family() == ChartFamily::Bar => {
                let (bars, bars_done) =
                    bar::build_bars(config, metrics, scale, render.bar_builder, amount, &mut render.stack_offsets);
                let overlay_series = config.overlay();
                let (overlay, overlay_done) =
                    line::build_line_series(overlay_series, metrics, scale, LineStyle::Normal, false, overlay_series.len(), amount);
                (Scene::Bars { bars, overlay }, bars_done && overlay_done)
            }
            ChartLayout::Cartesian { metrics, scale } => {
                let area = config.kind == ChartKind::Area;
                let (series, done) =
                    line::build_line_series(&config.data, metrics, scale, render.line_style, area, config.series_count(), amount);
                (Scene::Lines { series }, done)
            }
            ChartLayout::Pie(layout) => {
                let (slices, total) = pie::compute_slices(config.data.first().map_or(&[][..], Vec::as_slice));
                let amount = amount.min(layout.radius);
                let done = amount >= layout.radius;
                (Scene::Pie { slices, total, layout: layout.clone(), amount }, done)
            }
        }
    }
}

fn paint_scene<S: DrawingContext + ?Sized>(surface: &mut S, config: &ChartConfig, state: &ChartState, scene: &Scene) {
    let mut painter = Painter::new(surface, state.layout.orientation());
    let render = &state.render;
    match (&state.layout, scene) {
        (ChartLayout::Cartesian { metrics, .. }, Scene::Bars { bars, overlay }) => {
            axes::paint_frame(&mut painter, config, metrics);
            bar::paint_bars(&mut painter, bars, &render.series_colors, config.alpha);
            line::paint_lines(&mut painter, overlay, &render.line_colors, config.alpha);
            axes::paint_grid_and_axes(&mut painter, config, metrics);
        }
        (ChartLayout::Cartesian { metrics, .. }, Scene::Lines { series }) => {
            axes::paint_frame(&mut painter, config, metrics);
            line::paint_lines(&mut painter, series, &render.series_colors, config.alpha);
            axes::paint_grid_and_axes(&mut painter, config, metrics);
        }
        (ChartLayout::Pie(layout), Scene::Pie { slices, amount, .. }) => {
            axes::paint_background_and_title(&mut painter, config, 10.0);
            pie::paint_pie(&mut painter, config, layout, slices, &render.series_colors, *amount);
        }
        _ => {}
    }
}

/// One chart instance bound to a main surface and a tooltip overlay.
pub struct ChartController<S: DrawingContext> {
    config: ChartConfig,
    main: S,
    tooltip: S,
    width: Dimension,
    height: Dimension,
    host: HostMetrics,
    state: ChartState,
    /// Full-reveal geometry for hit testing.
    final_scene: Scene,
    phase: Phase,
    generation: u64,
    cursor: Cursor,
}

impl<S: DrawingContext> ChartController<S> {
    /// Validate `config`, size the main surface and lay the chart out.
    /// The first frame is drawn by [`Self::frame`].
    pub fn new(config: ChartConfig, main: S, tooltip: S, width: Dimension, height: Dimension, host: HostMetrics) -> ChartResult<Self> {
        let mut main = main;
        let (state, final_scene) = Self::prepare(&config, &mut main, width, height, host)?;
        Ok(Self {
            config,
            main,
            tooltip,
            width,
            height,
            host,
            state,
            final_scene,
            phase: Phase::Animating,
            generation: 1,
            cursor: Cursor::Default,
        })
    }

    fn prepare(config: &ChartConfig, main: &mut S, width: Dimension, height: Dimension, host: HostMetrics) -> ChartResult<(ChartState, Scene)> {
        if let Err(err) = config.validate() {
            warn!(field = err.field, reason = %err.reason, "chart build rejected");
            return Err(ChartError::Config(err));
        }
        let w = width.resolve(host.container_width).round().max(0.0) as u32;
        let h = height.resolve(host.window_height).round().max(0.0) as u32;
        main.resize(w, h)?;

        let mut state = ChartState::build(config, &*main, main.size());
        let (final_scene, _) = state.scene(config, f32::INFINITY);
        debug!(kind = ?config.kind, width = w, height = h, "chart built");
        Ok((state, final_scene))
    }

    pub fn frame_token(&self) -> FrameToken { FrameToken(self.generation) }

    /// Draw one reveal frame.
    pub fn frame(&mut self, token: FrameToken) -> FrameOutcome {
        if token.0 != self.generation {
            warn!(token = token.0, current = self.generation, "stale frame token ignored");
            return FrameOutcome::Stale;
        }
        if self.phase == Phase::Idle {
            return FrameOutcome::Done;
        }
        let amount = self.state.render.reveal.amount();
        let (scene, complete) = self.state.scene(&self.config, amount);
        if let Scene::Pie { amount: clamped, .. } = &scene {
            self.state.render.reveal.clamp_to(*clamped);
        }
        paint_scene(&mut self.main, &self.config, &self.state, &scene);
        trace!(amount, complete, "frame drawn");

        if self.state.render.reveal.finish_frame(complete) {
            FrameOutcome::Continue
        } else {
            self.phase = Phase::Idle;
            FrameOutcome::Done
        }
    }

    /// Draw frames until the reveal completes; returns the frame count.
    pub fn run_to_completion(&mut self) -> u32 {
        let token = self.frame_token();
        let mut frames = 1;
        while self.frame(token) == FrameOutcome::Continue {
            frames += 1;
        }
        frames
    }

    fn locate(&mut self, p: Point) -> Option<Hit> {
        let previous = self.phase;
        self.phase = Phase::HitTesting;
        let logical = self.state.layout.orientation().to_logical(p);
        let hit = HitTester::new(&self.config, &self.final_scene).locate(logical);
        self.phase = previous;
        hit
    }

    /// Hover at device point `p`: resolve the message, redraw the tooltip
    /// overlay and update the cursor affordance.
    pub fn pointer_move(&mut self, p: Point) -> ChartResult<HoverOutcome> {
        let hit = self.locate(p);
        let message = hit
            .as_ref()
            .map(|h| HitTester::new(&self.config, &self.final_scene).message(h))
            .unwrap_or_default();
        self.cursor = if hit.is_some() && self.config.on_click.is_some() { Cursor::Pointer } else { Cursor::Default };

        let (main_width, _) = self.main.size();
        let tooltip = TooltipPlacement::compute(&message, &self.tooltip, self.tooltip.size(), p, main_width);
        tooltip.render(&mut self.tooltip)?;
        Ok(HoverOutcome { message, tooltip, cursor: self.cursor })
    }

    pub fn pointer_leave(&mut self) -> TooltipPlacement {
        self.cursor = Cursor::Default;
        TooltipPlacement::hidden(self.tooltip.size())
    }

    /// Resolve a click and hand it to the configured handler.
    pub fn click(&mut self, p: Point) -> Option<ClickValue> {
        let hit = self.locate(p)?;
        let value = HitTester::new(&self.config, &self.final_scene).click_value(&hit);
        if let Some(handler) = &self.config.on_click {
            handler.call(&value);
        }
        Some(value)
    }

    /// Host size changed: lay out again and restart the reveal. On error
    /// the chart keeps its previous host, layout and frame token.
    pub fn resize(&mut self, host: HostMetrics) -> ChartResult<FrameToken> {
        let (state, final_scene) = Self::prepare(&self.config, &mut self.main, self.width, self.height, host)?;
        self.host = host;
        self.install(state, final_scene);
        Ok(self.frame_token())
    }

    /// Replace the configuration; in-flight frame tokens become stale.
    /// A rejected config leaves the current chart untouched.
    pub fn rebuild(&mut self, config: ChartConfig) -> ChartResult<FrameToken> {
        let (state, final_scene) = Self::prepare(&config, &mut self.main, self.width, self.height, self.host)?;
        self.config = config;
        self.install(state, final_scene);
        Ok(self.frame_token())
    }

    fn install(&mut self, state: ChartState, final_scene: Scene) {
        self.phase = Phase::Building;
        self.state = state;
        self.final_scene = final_scene;
        self.generation += 1;
        self.phase = Phase::Animating;
        self.cursor = Cursor::Default;
        debug!(generation = self.generation, "reveal restarted");
    }

    pub fn config(&self) -> &ChartConfig { &self.config }
    pub fn state(&self) -> &ChartState { &self.state }
    pub fn final_scene(&self) -> &Scene { &self.final_scene }
    pub fn phase(&self) -> Phase { self.phase }
    pub fn cursor(&self) -> Cursor { self.cursor }
    pub fn main(&self) -> &S { &self.main }
    pub fn tooltip(&self) -> &S { &self.tooltip }
    pub fn main_mut(&mut self) -> &mut S { &mut self.main }
    pub fn tooltip_mut(&mut self) -> &mut S { &mut self.tooltip }
}
