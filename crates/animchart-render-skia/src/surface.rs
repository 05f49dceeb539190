// File: crates/animchart-render-skia/src/surface.rs
// Summary: CPU raster surface implementing the core drawing context, with PNG and RGBA8 export.

use anyhow::{anyhow, Result};
use animchart_core::path::FlatPath;
use animchart_core::{ChartError, ChartResult, DrawingContext, FontSpec, Paint, Point, Rgba, TextMeasurer, TextStyle};
use skia_safe as skia;

use crate::text::TextShaper;

pub(crate) fn to_skia_color(c: Rgba) -> skia::Color { skia::Color::from_argb(c.a, c.r, c.g, c.b) }

fn to_skia_path(path: &FlatPath) -> skia::Path {
    let mut out = skia::Path::new();
    for contour in &path.contours {
        let mut points = contour.points.iter();
        let Some(first) = points.next() else { continue };
        out.move_to((first.x, first.y));
        for p in points {
            out.line_to((p.x, p.y));
        }
        if contour.closed {
            out.close();
        }
    }
    out
}

/// Headless N32 raster surface. Each chart keeps two: the main canvas
/// and the tooltip overlay.
pub struct SkiaSurface {
    surface: skia::Surface,
    shaper: TextShaper,
    width: u32,
    height: u32,
}

impl SkiaSurface {
    pub fn new(width: u32, height: u32) -> ChartResult<Self> { Self::with_shaper(width, height, TextShaper::new()) }

    /// Share one font collection between several surfaces.
    pub fn with_shaper(width: u32, height: u32, shaper: TextShaper) -> ChartResult<Self> {
        let surface = raster(width, height)?;
        Ok(Self { surface, shaper, width, height })
    }

    pub fn shaper(&self) -> &TextShaper { &self.shaper }

    pub fn encode_png(&mut self) -> Result<Vec<u8>> {
        let image = self.surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    pub fn write_png(&mut self, output_png_path: impl AsRef<std::path::Path>) -> Result<()> {
        let bytes = self.encode_png()?;
        if let Some(parent) = output_png_path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output_png_path, bytes)?;
        Ok(())
    }

    /// Unpremultiplied RGBA8 pixels, row-major; returns `(pixels, width, height, stride)`.
    pub fn to_rgba8(&mut self) -> Result<(Vec<u8>, u32, u32, usize)> {
        let stride = self.width as usize * 4;
        let mut pixels = vec![0u8; stride * self.height as usize];
        let info = skia::ImageInfo::new(
            (self.width as i32, self.height as i32),
            skia::ColorType::RGBA8888,
            skia::AlphaType::Unpremul,
            None,
        );
        if !self.surface.read_pixels(&info, &mut pixels, stride, (0, 0)) {
            return Err(anyhow!("read_pixels failed for {}x{}", self.width, self.height));
        }
        Ok((pixels, self.width, self.height, stride))
    }
}

fn raster(width: u32, height: u32) -> ChartResult<skia::Surface> {
    if width == 0 || height == 0 {
        return Err(ChartError::Surface(format!("zero-sized surface {width}x{height}")));
    }
    skia::surfaces::raster_n32_premul((width as i32, height as i32))
        .ok_or_else(|| ChartError::Surface(format!("failed to create raster surface {width}x{height}")))
}

impl TextMeasurer for SkiaSurface {
    fn measure(&self, text: &str, font: &FontSpec) -> f32 { self.shaper.measure_width(text, font) }
}

impl DrawingContext for SkiaSurface {
    fn size(&self) -> (f32, f32) { (self.width as f32, self.height as f32) }

    fn resize(&mut self, width: u32, height: u32) -> ChartResult<()> {
        if (width, height) == (self.width, self.height) {
            return Ok(());
        }
        self.surface = raster(width, height)?;
        self.width = width;
        self.height = height;
        tracing::trace!(width, height, "raster surface resized");
        Ok(())
    }

    fn clear(&mut self, color: Rgba) { self.surface.canvas().clear(to_skia_color(color)); }

    fn fill_path(&mut self, path: &FlatPath, paint: &Paint, alpha: f32) {
        let mut p = skia::Paint::default();
        p.set_anti_alias(true);
        p.set_style(skia::paint::Style::Fill);
        match paint {
            Paint::Solid(color) => {
                p.set_color(to_skia_color(*color));
                p.set_alpha_f(color.a as f32 / 255.0 * alpha.clamp(0.0, 1.0));
            }
            Paint::LinearGradient { from, to, start, end } => {
                let colors = [to_skia_color(*start), to_skia_color(*end)];
                let shader = skia::Shader::linear_gradient(
                    ((from.x, from.y), (to.x, to.y)),
                    &colors[..],
                    None,
                    skia::TileMode::Clamp,
                    None,
                    None,
                );
                p.set_shader(shader);
                p.set_alpha_f(alpha.clamp(0.0, 1.0));
            }
        }
        self.surface.canvas().draw_path(&to_skia_path(path), &p);
    }

    fn stroke_path(&mut self, path: &FlatPath, color: Rgba, width: f32) {
        let mut p = skia::Paint::default();
        p.set_anti_alias(true);
        p.set_style(skia::paint::Style::Stroke);
        p.set_stroke_width(width);
        p.set_color(to_skia_color(color));
        self.surface.canvas().draw_path(&to_skia_path(path), &p);
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) {
        if text.is_empty() {
            return;
        }
        let canvas = self.surface.canvas();
        self.shaper.draw(canvas, text, at.x, at.y, &style.font, style.color, style.align, style.rotation);
    }
}
