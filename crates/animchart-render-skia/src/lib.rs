// File: crates/animchart-render-skia/src/lib.rs
// Summary: Skia renderer crate: CPU raster surfaces and text shaping for animchart-core.

pub mod surface;
pub mod text;

pub use surface::SkiaSurface;
pub use text::TextShaper;

use animchart_core::{ChartConfig, ChartController, ChartResult, Dimension, HostMetrics};

/// Controller drawing onto a Skia main surface and tooltip overlay that
/// share one font collection.
pub fn skia_controller(
    config: ChartConfig,
    width: Dimension,
    height: Dimension,
    host: HostMetrics,
) -> ChartResult<ChartController<SkiaSurface>> {
    let shaper = TextShaper::new();
    let main = SkiaSurface::with_shaper(1, 1, shaper.clone())?;
    let tooltip = SkiaSurface::with_shaper(100, 25, shaper)?;
    ChartController::new(config, main, tooltip, width, height, host)
}
