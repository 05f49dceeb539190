// File: crates/animchart-core/src/tooltip.rs
// Summary: Tooltip overlay sizing, placement next to the pointer, and drawing.

use crate::color::Rgba;
use crate::error::ChartResult;
use crate::format::split_lines;
use crate::geometry::Point;
use crate::surface::{DrawingContext, TextStyle};
use crate::text::{FontSpec, TextMeasurer};
use crate::types::{TOOLTIP_GAP, TOOLTIP_LINE_HEIGHT};

#[derive(Clone, Debug, PartialEq)]
pub struct TooltipLine {
    pub text: String,
    pub at: Point,
}

/// Where the overlay goes, in main-surface pixels, and what it shows.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipPlacement {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub lines: Vec<TooltipLine>,
    pub visible: bool,
}

impl TooltipPlacement {
    pub fn hidden(current: (f32, f32)) -> Self {
        Self { left: 0.0, top: 0.0, width: current.0, height: current.1, lines: Vec::new(), visible: false }
    }

    /// Size the overlay to hug `message` and park it above the pointer,
    /// never past the right edge of a main surface `main_width` wide.
    pub fn compute(message: &str, measurer: &dyn TextMeasurer, current: (f32, f32), pointer: Point, main_width: f32) -> Self {
        if message.is_empty() {
            return Self::hidden(current);
        }
        let font = FontSpec::tooltip();
        let parts = split_lines(message);
        let (mut width, mut height) = current;
        let mut gap = TOOLTIP_GAP;
        let lines = if parts.len() == 1 {
            let text_width = measurer.measure(message, &font);
            width = text_width + 20.0;
            vec![TooltipLine { text: message.to_string(), at: Point::new(width / 2.0 - text_width / 2.0, 15.0) }]
        } else {
            let rows = (parts.len() - 1) as f32 * TOOLTIP_LINE_HEIGHT;
            height = 25.0 + rows;
            gap += rows;
            let widest = parts.iter().map(|l| measurer.measure(l, &font)).fold(0.0, f32::max);
            if width <= widest {
                width = widest + 20.0;
            }
            let x = width / 2.0 - widest / 2.0;
            parts
                .iter()
                .enumerate()
                .map(|(i, l)| TooltipLine { text: (*l).to_string(), at: Point::new(x, 15.0 + i as f32 * TOOLTIP_LINE_HEIGHT) })
                .collect()
        };

        let mut left = pointer.x;
        let overflow = left + width - main_width;
        if overflow > 0.0 {
            left -= overflow;
        }
        Self { left, top: pointer.y - gap, width, height, lines, visible: true }
    }

    /// Resize the overlay surface and draw the lines onto it.
    pub fn render<S: DrawingContext + ?Sized>(&self, surface: &mut S) -> ChartResult<()> {
        if !self.visible {
            return Ok(());
        }
        surface.resize(self.width.ceil().max(1.0) as u32, self.height.ceil().max(1.0) as u32)?;
        surface.clear(Rgba::WHITE);
        let style = TextStyle::new(FontSpec::tooltip(), Rgba::BLACK);
        for line in &self.lines {
            surface.fill_text(&line.text, line.at, &style);
        }
        Ok(())
    }
}
