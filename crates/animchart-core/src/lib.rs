// File: crates/animchart-core/src/lib.rs
// Summary: Core library entry point; exports the chart engine, its configuration and the drawing seams.

pub mod animation;
pub mod chart;
pub mod color;
pub mod config;
pub mod error;
pub mod format;
pub mod geometry;
pub mod hit;
pub mod layout;
pub mod path;
pub mod render;
pub mod scale;
pub mod surface;
pub mod text;
pub mod tooltip;
pub mod types;

pub use animation::RevealAnimator;
pub use chart::{ChartController, ChartLayout, ChartState, Cursor, FrameOutcome, FrameToken, HoverOutcome, Phase, RenderState};
pub use color::Rgba;
pub use config::{
    BarStyle, ChartConfig, ChartFamily, ChartKind, ClickHandler, ClickValue, Dimension, HostMetrics, LabelOrientation,
    LineStyle, TextBlock, TitleAlignment, TooltipPattern,
};
pub use error::{ChartError, ChartResult, ConfigError};
pub use geometry::{Orientation, Point, Rect};
pub use hit::{Hit, HitLayer, HitTester};
pub use layout::{LayoutMetrics, LayoutNegotiator};
pub use path::{FlatPath, ShapePath};
pub use render::Scene;
pub use scale::{compute_tick_range, nice_number, ScaleRange, ValueScale};
pub use surface::{DrawOp, DrawingContext, Paint, RecordingSurface, TextAlign, TextStyle};
pub use text::{FixedAdvanceMeasurer, FontSpec, TextMeasurer};
pub use tooltip::TooltipPlacement;
