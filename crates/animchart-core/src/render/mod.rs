// File: crates/animchart-core/src/render/mod.rs
// Summary: Shape renderer entry points: scene construction per chart family and painting through the orientation transform.

pub mod axes;
pub mod bar;
pub mod line;
pub mod pie;

use crate::color::Rgba;
use crate::config::{ChartConfig, ChartFamily};
use crate::geometry::{Orientation, Point};
use crate::path::ShapePath;
use crate::surface::{DrawingContext, Paint, TextStyle};

pub use bar::{BarBuilder, BarSlot, PlacedBar};
pub use line::{LinePoint, LineSeriesGeometry, MarkerPaint};
pub use pie::{PieLayout, PieSlice};

/// How a shape part is filled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FillRole {
    Solid,
    /// Light-to-color, left to right.
    Gradient,
    /// Color-to-light, left to right.
    InverseGradient,
    /// Stroked only; not part of the hit region.
    None,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShapePart {
    pub path: ShapePath,
    pub role: FillRole,
    /// Outline stroke width, if stroked.
    pub outline: Option<f32>,
}

impl ShapePart {
    pub fn filled(path: ShapePath, role: FillRole) -> Self { Self { path, role, outline: None } }
    pub fn outlined(path: ShapePath, role: FillRole, width: f32) -> Self { Self { path, role, outline: Some(width) } }
    pub fn is_hit_region(&self) -> bool { self.role != FillRole::None }
}

/// Draws logical-frame geometry onto a device surface.
pub struct Painter<'a, S: DrawingContext + ?Sized> {
    surface: &'a mut S,
    orientation: Orientation,
}

impl<'a, S: DrawingContext + ?Sized> Painter<'a, S> {
    pub fn new(surface: &'a mut S, orientation: Orientation) -> Self { Self { surface, orientation } }

    pub fn surface(&mut self) -> &mut S { self.surface }
    pub fn orientation(&self) -> Orientation { self.orientation }

    pub fn fill(&mut self, path: &ShapePath, paint: &Paint, alpha: f32) {
        let o = self.orientation;
        let flat = path.flatten().map(|p| o.to_device(p));
        let paint = match paint {
            Paint::LinearGradient { from, to, start, end } => {
                Paint::LinearGradient { from: o.to_device(*from), to: o.to_device(*to), start: *start, end: *end }
            }
            solid => solid.clone(),
        };
        self.surface.fill_path(&flat, &paint, alpha);
    }

    pub fn stroke(&mut self, path: &ShapePath, color: Rgba, width: f32) {
        let o = self.orientation;
        let flat = path.flatten().map(|p| o.to_device(p));
        self.surface.stroke_path(&flat, color, width);
    }

    pub fn line(&mut self, from: Point, to: Point, color: Rgba, width: f32) {
        let mut path = ShapePath::new();
        path.move_to(from).line_to(to);
        self.stroke(&path, color, width);
    }

    /// Text is placed in device coordinates.
    pub fn text(&mut self, text: &str, at: Point, style: &TextStyle) {
        if !text.is_empty() {
            self.surface.fill_text(text, at, style);
        }
    }

    pub fn measure(&self, text: &str, font: &crate::text::FontSpec) -> f32 { self.surface.measure(text, font) }

    /// Paint every part of a shape in `color`.
    pub fn shape(&mut self, parts: &[ShapePart], color: Rgba, light: Rgba, span: (Point, Point), alpha: f32) {
        for part in parts {
            let paint = match part.role {
                FillRole::Solid => Some(Paint::Solid(color)),
                FillRole::Gradient => Some(Paint::LinearGradient { from: span.0, to: span.1, start: light, end: color }),
                FillRole::InverseGradient => Some(Paint::LinearGradient { from: span.0, to: span.1, start: color, end: light }),
                FillRole::None => None,
            };
            if let Some(paint) = paint {
                self.fill(&part.path, &paint, alpha);
            }
            if let Some(width) = part.outline {
                self.stroke(&part.path, Rgba::BLACK, width);
            }
        }
    }
}

/// Geometry of one render pass; built at the current reveal for painting
/// and at full reveal for hit testing.
#[derive(Clone, Debug)]
pub enum Scene {
    Bars { bars: Vec<PlacedBar>, overlay: Vec<LineSeriesGeometry> },
    Lines { series: Vec<LineSeriesGeometry> },
    Pie { slices: Vec<PieSlice>, total: f64, layout: PieLayout, amount: f32 },
}

impl Scene {
    pub fn family(&self) -> ChartFamily {
        match self {
            Scene::Bars { .. } => ChartFamily::Bar,
            Scene::Lines { .. } => ChartFamily::Line,
            Scene::Pie { .. } => ChartFamily::Pie,
        }
    }
}

/// Sum of every series at `category`.
pub fn category_total(config: &ChartConfig, category: usize) -> f64 {
    config.data.iter().filter_map(|s| s.get(category)).sum()
}
