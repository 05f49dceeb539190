// File: crates/animchart-core/src/layout.rs
// Summary: Layout negotiation: reserved space for labels, legends and title, and the resulting plot frame.

use tracing::debug;

use crate::color::Rgba;
use crate::config::{ChartConfig, LabelOrientation};
use crate::format::tick_label;
use crate::geometry::{Orientation, Rect};
use crate::scale::{ScaleRange, ValueScale};
use crate::text::{FontSpec, TextMeasurer};
use crate::types::{LEGEND_CHIP_PADDING, LEGEND_PREFIX, LEGEND_ROW_RESERVE};

#[derive(Clone, Debug, PartialEq)]
pub struct LegendChip {
    pub text: String,
    pub color: Rgba,
    pub x: f32,
    pub row: usize,
    pub width: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LegendPacking {
    pub chips: Vec<LegendChip>,
    pub rows: usize,
}

impl LegendPacking {
    /// Space reserved above the plot, one fixed reserve per row.
    pub fn reserve(&self) -> f32 {
        if self.chips.is_empty() { 0.0 } else { self.rows as f32 * LEGEND_ROW_RESERVE }
    }
}

/// Series chips then overlay-line chips, each `(text, color)`.
pub fn legend_entries(config: &ChartConfig) -> Vec<(String, Rgba)> {
    let mut entries = Vec::new();
    if let Some(legend) = &config.legend {
        entries.extend(legend.iter().cloned().zip(config.series_colors()));
    }
    if let Some(line_legend) = &config.line_legend {
        entries.extend(line_legend.iter().cloned().zip(config.line_colors()));
    }
    entries
}

/// Greedy left-to-right packing, wrapping when the next chip would pass
/// `limit`. A row always takes at least one chip. Layout and drawing both
/// use this single pass.
pub fn pack_legend(entries: &[(String, Rgba)], measurer: &dyn TextMeasurer, start_x: f32, limit: f32) -> LegendPacking {
    let font = FontSpec::legend();
    let mut chips = Vec::with_capacity(entries.len());
    let mut x = start_x;
    let mut row = 0;
    let mut row_used = false;
    for (text, color) in entries {
        let width = measurer.measure(text, &font) + LEGEND_CHIP_PADDING;
        if row_used && x + width > limit {
            x = start_x;
            row += 1;
        }
        chips.push(LegendChip { text: format!("{LEGEND_PREFIX}{text}"), color: *color, x, row, width });
        x += width;
        row_used = true;
    }
    let rows = if chips.is_empty() { 0 } else { row + 1 };
    LegendPacking { chips, rows }
}

/// Footprint of one category label below the axis for the given orientation.
pub fn x_label_space(label: &str, orientation: LabelOrientation, horizontal_chart: bool, font: &FontSpec, measurer: &dyn TextMeasurer) -> f32 {
    let width = measurer.measure(label, font);
    if horizontal_chart {
        return width + 10.0;
    }
    match orientation {
        LabelOrientation::Horizontal => font.size + 20.0,
        LabelOrientation::HalfDiagonal | LabelOrientation::Diagonal => width * orientation.angle().sin() + 20.0,
        LabelOrientation::Vertical => width + 10.0,
    }
}

/// Space accounting for bar and line charts.
///
/// All quantities live in the logical frame; for horizontal charts the frame
/// is rotated through [`Orientation`] and `real_width`/`real_height` are the
/// logical extents (device height and width respectively).
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutMetrics {
    pub orientation: Orientation,
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub real_width: f32,
    pub real_height: f32,
    /// Y-axis label column, y-legend included.
    pub h_step: f32,
    pub y_legend_space: f32,
    /// Bottom reserve: category labels plus x-legend.
    pub step: f32,
    pub x_label_space: f32,
    pub x_legend_space: f32,
    /// Logical space above the plot for the title and legend.
    pub title_space: f32,
    pub legend_space: f32,
    /// Device y of the first legend row.
    pub legend_y: f32,
    pub legend: LegendPacking,
    pub gap: f32,
    pub tick_init: f32,
    pub tick_step: f32,
    pub baseline: f32,
    pub tick_labels: Vec<String>,
    pub category_count: usize,
}

impl LayoutMetrics {
    pub fn slot_width(&self) -> f32 { (self.real_width - self.h_step) / self.category_count.max(1) as f32 }

    /// Width shared by one category's bars for `series` series.
    pub fn group_width(&self, series: usize) -> f32 {
        let n = self.category_count.max(1) as f32;
        ((self.real_width - self.h_step - self.gap * (1.0 + (series as f32).sqrt())) / n).max(0.0)
    }

    pub fn slot_x(&self, category: usize) -> f32 { self.h_step + category as f32 * self.slot_width() }

    /// Center of a category group.
    pub fn middle_x(&self, category: usize, series: usize) -> f32 { self.slot_x(category) + self.group_width(series) / 2.0 }

    pub fn tick_y(&self, i: usize) -> f32 { i as f32 * self.tick_step + self.tick_init + self.title_space + self.legend_space }

    pub fn plot_top(&self) -> f32 { self.title_space + self.legend_space }

    /// Vertical extent the reveal sweeps.
    pub fn plot_extent(&self) -> f32 { self.real_height - self.step - self.title_space - self.legend_space }

    pub fn plot_rect(&self) -> Rect { Rect::from_ltrb(self.h_step - 10.0, self.plot_top(), self.real_width, self.baseline) }

    pub fn value_scale(&self, range: ScaleRange) -> ValueScale { ValueScale::new(self.baseline, self.tick_step, range) }
}

pub struct LayoutNegotiator;

impl LayoutNegotiator {
    /// Pure function of its inputs; calling it twice yields equal metrics.
    pub fn negotiate(config: &ChartConfig, range: &ScaleRange, measurer: &dyn TextMeasurer, canvas: (f32, f32)) -> LayoutMetrics {
        let (canvas_width, canvas_height) = canvas;
        let horizontal = config.kind.is_horizontal();
        let pattern = config.tooltip_pattern.as_ref();

        // y label column
        let y_font = config.y_label_font();
        let tick_labels: Vec<String> = range.ticks().map(|v| tick_label(v, pattern)).collect();
        let y_legend_space = config.y_legend.as_ref().map_or(0.0, |b| 20.0 + b.font.size);
        let tick_column = if config.show_ticks {
            tick_labels.iter().map(|l| measurer.measure(l, &y_font)).fold(0.0, f32::max) + 20.0
        } else {
            20.0
        };
        let h_step = tick_column + y_legend_space;

        // bottom reserve
        let x_font = config.x_label_font();
        let category_count = config.category_count();
        let x_label_space = (0..category_count)
            .map(|i| x_label_space(config.label(i), config.label_orientation, horizontal, &x_font, measurer))
            .fold(0.0, f32::max);
        let x_legend_space = config.x_legend.as_ref().map_or(0.0, |b| 20.0 + b.font.size);
        let step = x_label_space + x_legend_space;

        let title_reserve = config.title.as_ref().map_or(10.0, |t| 20.0 + t.font.size);
        let entries = legend_entries(config);

        let (orientation, real_width, real_height, title_space, legend_space, legend) = if horizontal {
            let real_height = canvas_width;
            let legend = pack_legend(&entries, measurer, step, real_height);
            let mut real_width = canvas_height - h_step / 2.0 - legend.reserve();
            if config.title.is_some() {
                real_width -= title_reserve;
            }
            let orientation = Orientation::Horizontal { width: canvas_width, height: canvas_height };
            // one row along the value axis whatever the wrapping
            let legend_space = if legend.chips.is_empty() { 0.0 } else { LEGEND_ROW_RESERVE };
            (orientation, real_width, real_height, 10.0, legend_space, legend)
        } else {
            let legend = pack_legend(&entries, measurer, h_step, canvas_width);
            let reserve = legend.reserve();
            (Orientation::Vertical, canvas_width, canvas_height, title_reserve, reserve, legend)
        };

        let gap = (real_width / 10.0 - 10.0).max(0.0);
        let tick_init = real_height / 12.0;
        let tick_count = range.tick_count.max(1) as f32;
        let tick_step = (real_height - step - title_space - legend_space - tick_init) / tick_count;
        let baseline = real_height - step;

        let metrics = LayoutMetrics {
            orientation,
            canvas_width,
            canvas_height,
            real_width,
            real_height,
            h_step,
            y_legend_space,
            step,
            x_label_space,
            x_legend_space,
            title_space,
            legend_space,
            legend_y: title_reserve + 20.0,
            legend,
            gap,
            tick_init,
            tick_step,
            baseline,
            tick_labels,
            category_count,
        };
        debug!(
            h_step = metrics.h_step,
            step = metrics.step,
            title = metrics.title_space,
            legend = metrics.legend_space,
            tick_step = metrics.tick_step,
            baseline = metrics.baseline,
            horizontal,
            "layout negotiated"
        );
        metrics
    }
}
