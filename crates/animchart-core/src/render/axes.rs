// File: crates/animchart-core/src/render/axes.rs
// Summary: Chart furniture: background, title, legends, tick and category labels, grid and axis lines.

use std::f32::consts::FRAC_PI_2;

use crate::config::{ChartConfig, LabelOrientation, TitleAlignment};
use crate::geometry::Point;
use crate::layout::LayoutMetrics;
use crate::render::Painter;
use crate::surface::{DrawingContext, TextAlign, TextStyle};
use crate::text::FontSpec;
use crate::types::LEGEND_ROW_HEIGHT;

const GRID_WIDTH: f32 = 0.2;
const AXIS_WIDTH: f32 = 2.0;

/// Clear to the background and draw the title. `left` is the x of a
/// left-aligned title.
pub fn paint_background_and_title<S: DrawingContext + ?Sized>(painter: &mut Painter<'_, S>, config: &ChartConfig, left: f32) {
    painter.surface().clear(config.background);
    let Some(title) = &config.title else { return };
    let (width, _) = painter.surface().size();
    let w = painter.measure(&title.text, &title.font);
    let x = match title.alignment {
        TitleAlignment::Left => left,
        TitleAlignment::Right => width - w - 10.0,
        TitleAlignment::Center => width / 2.0 - w / 2.0,
    };
    let title_space = 20.0 + title.font.size;
    painter.text(&title.text, Point::new(x, 20.0 + title_space / 2.0), &TextStyle::new(title.font.clone(), title.color));
}

/// Everything drawn under the data: background, title, legends and labels.
pub fn paint_frame<S: DrawingContext + ?Sized>(painter: &mut Painter<'_, S>, config: &ChartConfig, m: &LayoutMetrics) {
    paint_background_and_title(painter, config, m.h_step);
    paint_axis_legends(painter, config, m);
    paint_legend_chips(painter, config, m);
    if config.show_ticks {
        paint_ticks(painter, config, m);
    }
    paint_category_labels(painter, config, m);
}

/// Grid and axis lines, drawn over the data.
pub fn paint_grid_and_axes<S: DrawingContext + ?Sized>(painter: &mut Painter<'_, S>, config: &ChartConfig, m: &LayoutMetrics) {
    if config.show_grid_y {
        for i in 0..m.tick_labels.len() {
            let y = m.tick_y(i);
            painter.line(Point::new(m.h_step - 10.0, y), Point::new(m.real_width - 10.0, y), config.color_grid_y, GRID_WIDTH);
        }
    }
    if config.show_grid_x {
        let series = config.series_count();
        for i in 0..m.category_count {
            let x = m.middle_x(i, series);
            painter.line(Point::new(x, 10.0 + m.plot_top()), Point::new(x, m.baseline), config.color_grid_x, GRID_WIDTH);
        }
    }

    let axis_x = m.h_step - 10.0;
    painter.line(Point::new(axis_x, m.plot_top()), Point::new(axis_x, m.baseline), config.color_y_axis, AXIS_WIDTH);
    let x_end = if m.orientation.is_horizontal() { m.real_width } else { m.real_width - 5.0 };
    painter.line(Point::new(axis_x, m.baseline), Point::new(x_end, m.baseline), config.color_x_axis, AXIS_WIDTH);
}

fn paint_axis_legends<S: DrawingContext + ?Sized>(painter: &mut Painter<'_, S>, config: &ChartConfig, m: &LayoutMetrics) {
    let (width, height) = painter.surface().size();
    let horizontal = m.orientation.is_horizontal();

    if let Some(legend) = &config.x_legend {
        let style = TextStyle::new(legend.font.clone(), legend.color);
        if horizontal {
            let style = style.aligned(TextAlign::Center).rotated(-FRAC_PI_2);
            painter.text(&legend.text, Point::new(10.0 + legend.font.size, height / 2.0), &style);
        } else {
            let w = painter.measure(&legend.text, &legend.font);
            painter.text(&legend.text, Point::new(m.real_width / 2.0 - w / 2.0, m.real_height - legend.font.size), &style);
        }
    }

    if let Some(legend) = &config.y_legend {
        let style = TextStyle::new(legend.font.clone(), legend.color).aligned(TextAlign::Center);
        if horizontal {
            painter.text(&legend.text, Point::new(width / 2.0, height - 10.0), &style);
        } else {
            let style = style.rotated(-FRAC_PI_2);
            painter.text(&legend.text, Point::new(10.0 + legend.font.size, m.real_height / 2.0), &style);
        }
    }
}

fn paint_legend_chips<S: DrawingContext + ?Sized>(painter: &mut Painter<'_, S>, config: &ChartConfig, m: &LayoutMetrics) {
    let font = FontSpec::legend();
    for chip in &m.legend.chips {
        let y = m.legend_y + chip.row as f32 * LEGEND_ROW_HEIGHT;
        let style = TextStyle::new(font.clone(), chip.color.with_alpha(config.alpha));
        painter.text(&chip.text, Point::new(chip.x, y), &style);
    }
}

fn paint_ticks<S: DrawingContext + ?Sized>(painter: &mut Painter<'_, S>, config: &ChartConfig, m: &LayoutMetrics) {
    let font = config.y_label_font();
    let color = config.y_label_color();
    let (width, height) = painter.surface().size();
    for (i, label) in m.tick_labels.iter().enumerate() {
        let y = m.tick_y(i);
        if m.orientation.is_horizontal() {
            let style = TextStyle::new(font.clone(), color).aligned(TextAlign::Center);
            painter.text(label, Point::new(width - y, height - m.h_step + 15.0 + font.size), &style);
        } else {
            let w = painter.measure(label, &font);
            painter.text(label, Point::new(m.h_step - 15.0 - w, y), &TextStyle::new(font.clone(), color));
        }
        painter.line(Point::new(m.h_step - 15.0, y), Point::new(m.h_step - 10.0, y), color, AXIS_WIDTH);
    }
}

fn paint_category_labels<S: DrawingContext + ?Sized>(painter: &mut Painter<'_, S>, config: &ChartConfig, m: &LayoutMetrics) {
    let font = config.x_label_font();
    let color = config.x_label_color();
    let series = config.series_count();
    let (_, height) = painter.surface().size();

    for i in 0..m.category_count {
        let label = config.label(i);
        if label.is_empty() {
            continue;
        }
        let middle = m.middle_x(i, series);
        if m.orientation.is_horizontal() {
            let style = TextStyle::new(font.clone(), color).aligned(TextAlign::Right);
            painter.text(label, Point::new(m.step - 8.0, height - middle + font.size / 3.0), &style);
            continue;
        }

        let w = painter.measure(label, &font);
        let tx = middle - w / 2.0;
        let (ty, dy) = match config.label_orientation {
            LabelOrientation::Horizontal => {
                let at = Point::new(tx, m.real_height - m.step / 2.0 - m.x_legend_space / 4.0);
                painter.text(label, at, &TextStyle::new(font.clone(), color));
                continue;
            }
            LabelOrientation::Vertical => (m.real_height - m.step / 2.0 - m.x_legend_space / 2.0, w / 2.0 + 6.0),
            LabelOrientation::Diagonal => (m.real_height - m.step / 2.0 - m.x_legend_space / 2.0 - 5.0, 16.0),
            LabelOrientation::HalfDiagonal => (m.real_height - m.step + 10.0, 16.0),
        };
        // text rotated by -theta about (tx, ty), drawn centered at local (0, dy)
        let theta = config.label_orientation.angle();
        let at = Point::new(tx + dy * theta.sin(), ty + dy * theta.cos());
        let style = TextStyle::new(font.clone(), color).aligned(TextAlign::Center).rotated(-theta);
        painter.text(label, at, &style);
    }
}
