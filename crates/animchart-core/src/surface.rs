// File: crates/animchart-core/src/surface.rs
// Summary: Drawing-context seam implemented by raster backends, plus an in-memory recording surface.

use crate::color::Rgba;
use crate::error::{ChartError, ChartResult};
use crate::geometry::Point;
use crate::path::FlatPath;
use crate::text::{FixedAdvanceMeasurer, FontSpec, TextMeasurer};

#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    /// Two-stop linear gradient between device points.
    LinearGradient { from: Point, to: Point, start: Rgba, end: Rgba },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub font: FontSpec,
    pub color: Rgba,
    pub align: TextAlign,
    /// Clockwise rotation around the anchor, radians.
    pub rotation: f32,
}

impl TextStyle {
    pub fn new(font: FontSpec, color: Rgba) -> Self { Self { font, color, align: TextAlign::Left, rotation: 0.0 } }
    pub fn aligned(mut self, align: TextAlign) -> Self { self.align = align; self }
    pub fn rotated(mut self, rotation: f32) -> Self { self.rotation = rotation; self }
}

/// An immediate-mode 2D surface in device pixels. Text anchors sit on the
/// baseline.
pub trait DrawingContext: TextMeasurer {
    fn size(&self) -> (f32, f32);
    fn resize(&mut self, width: u32, height: u32) -> ChartResult<()>;
    fn clear(&mut self, color: Rgba);
    /// Fill with `alpha` applied on top of the paint's own alpha.
    fn fill_path(&mut self, path: &FlatPath, paint: &Paint, alpha: f32);
    fn stroke_path(&mut self, path: &FlatPath, color: Rgba, width: f32);
    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Clear(Rgba),
    Fill { path: FlatPath, paint: Paint, alpha: f32 },
    Stroke { path: FlatPath, color: Rgba, width: f32 },
    Text { text: String, at: Point, style: TextStyle },
}

/// Records draw calls since the last clear; measures text with a
/// fixed per-char advance so layouts are reproducible in tests.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    measurer: FixedAdvanceMeasurer,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, measurer: FixedAdvanceMeasurer::default(), ops: Vec::new() }
    }

    pub fn ops(&self) -> &[DrawOp] { &self.ops }

    pub fn texts(&self) -> impl Iterator<Item = (&str, Point)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, at, .. } => Some((text.as_str(), *at)),
            _ => None,
        })
    }

    pub fn fill_count(&self) -> usize { self.ops.iter().filter(|op| matches!(op, DrawOp::Fill { .. })).count() }
}

impl TextMeasurer for RecordingSurface {
    fn measure(&self, text: &str, font: &FontSpec) -> f32 { self.measurer.measure(text, font) }
}

impl DrawingContext for RecordingSurface {
    fn size(&self) -> (f32, f32) { (self.width as f32, self.height as f32) }

    fn resize(&mut self, width: u32, height: u32) -> ChartResult<()> {
        if width == 0 || height == 0 {
            return Err(ChartError::Surface(format!("zero-sized surface {width}x{height}")));
        }
        self.width = width;
        self.height = height;
        self.ops.clear();
        Ok(())
    }

    fn clear(&mut self, color: Rgba) {
        self.ops.clear();
        self.ops.push(DrawOp::Clear(color));
    }

    fn fill_path(&mut self, path: &FlatPath, paint: &Paint, alpha: f32) {
        self.ops.push(DrawOp::Fill { path: path.clone(), paint: paint.clone(), alpha });
    }

    fn stroke_path(&mut self, path: &FlatPath, color: Rgba, width: f32) {
        self.ops.push(DrawOp::Stroke { path: path.clone(), color, width });
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) {
        self.ops.push(DrawOp::Text { text: text.to_string(), at, style: style.clone() });
    }
}
