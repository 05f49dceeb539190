// File: crates/animchart-render-skia/src/text.rs
// Summary: Text shaper/renderer using Skia textlayout; measures and paints chart labels.

use animchart_core::{FontSpec, Rgba, TextAlign, TextMeasurer};
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextStyle};
use skia_safe as skia;

use crate::surface::to_skia_color;

#[derive(Clone)]
pub struct TextShaper {
    fonts: FontCollection,
}

impl Default for TextShaper {
    fn default() -> Self { Self::new() }
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        // Use system manager fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(font: &FontSpec, color: skia::Color) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(font.size.max(1.0));
        ts.set_color(color);
        if font.is_bold() {
            ts.set_font_style(skia::FontStyle::bold());
        }
        match font.family.trim() {
            "monospace" => ts.set_font_families(&["Roboto Mono", "Consolas", "Menlo", "DejaVu Sans Mono", "monospace"]),
            "serif" => ts.set_font_families(&["Times New Roman", "Georgia", "DejaVu Serif", "serif"]),
            "" | "sans-serif" => {
                ts.set_font_families(&["Segoe UI", "Arial", "Helvetica", "Roboto", "DejaVu Sans", "sans-serif"])
            }
            family => ts.set_font_families(&[family, "DejaVu Sans", "sans-serif"]),
        };
        ts
    }

    pub fn layout(&self, text: &str, font: &FontSpec, color: skia::Color) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(skia::textlayout::TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        builder.push_style(&Self::make_style(font, color));
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    pub fn measure_width(&self, text: &str, font: &FontSpec) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        // width of the longest line
        self.layout(text, font, skia::Color::TRANSPARENT).longest_line()
    }

    /// Paint `text` with its baseline at `(x, y)`, rotated clockwise by
    /// `rotation` radians around that anchor.
    #[allow(clippy::too_many_arguments)]
    pub fn draw(
        &self,
        canvas: &skia::Canvas,
        text: &str,
        x: f32,
        y: f32,
        font: &FontSpec,
        color: Rgba,
        align: TextAlign,
        rotation: f32,
    ) {
        let mut p = self.layout(text, font, to_skia_color(color));
        let width = p.longest_line();
        let dx = match align {
            TextAlign::Left => 0.0,
            TextAlign::Center => -width / 2.0,
            TextAlign::Right => -width,
        };
        // Paragraph draws from top-left
        let dy = -p.alphabetic_baseline();
        if rotation == 0.0 {
            p.paint(canvas, (x + dx, y + dy));
            return;
        }
        canvas.save();
        canvas.translate((x, y));
        canvas.rotate(rotation.to_degrees(), None);
        p.paint(canvas, (dx, dy));
        canvas.restore();
    }
}

impl TextMeasurer for TextShaper {
    fn measure(&self, text: &str, font: &FontSpec) -> f32 { self.measure_width(text, font) }
}
