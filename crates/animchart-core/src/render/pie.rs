// File: crates/animchart-core/src/render/pie.rs
// Summary: Pie slices, radius negotiation, wedge paths and leader-line labels.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use tracing::debug;

use crate::color::Rgba;
use crate::config::ChartConfig;
use crate::format::round_to;
use crate::geometry::Point;
use crate::path::ShapePath;
use crate::render::Painter;
use crate::surface::{DrawingContext, Paint, TextStyle};
use crate::text::{FontSpec, TextMeasurer};
use crate::types::{PIE_LEADER, PIE_LEADER_BEND};

const SLICE_OUTLINE: f32 = 1.0;
const FALLBACK_RADIUS: f32 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PieSlice {
    pub index: usize,
    pub value: f64,
    /// Share of the total, rounded to two decimals.
    pub percent: f64,
    pub start_angle: f32,
    pub end_angle: f32,
    pub mid_angle: f32,
}

/// Slices in data order with their angles, plus the total. The last slice
/// always ends at exactly `TAU`; a zero total yields no slices.
pub fn compute_slices(values: &[f64]) -> (Vec<PieSlice>, f64) {
    let total: f64 = values.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return (Vec::new(), total.max(0.0));
    }
    let mut slices = Vec::with_capacity(values.len());
    let mut position = 0.0f64;
    for (index, &value) in values.iter().enumerate() {
        let fraction = value / total;
        let start_angle = (std::f64::consts::TAU * position) as f32;
        position += fraction;
        let end_angle = if index + 1 == values.len() { TAU } else { (std::f64::consts::TAU * position) as f32 };
        slices.push(PieSlice {
            index,
            value,
            percent: round_to(value * 100.0 / total, 2),
            start_angle,
            end_angle,
            mid_angle: start_angle + (end_angle - start_angle).abs() / 2.0,
        });
    }
    (slices, total)
}

/// Angle in `[0, TAU)` of `p` around `c`, clockwise from +x in screen space.
pub fn screen_angle(c: Point, p: Point) -> f32 {
    let a = (p.y - c.y).atan2(p.x - c.x);
    if a < 0.0 { a + TAU } else { a }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PieLayout {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub center: Point,
    /// Full radius; the reveal grows towards it.
    pub radius: f32,
    pub title_space: f32,
    pub label_font: FontSpec,
    pub max_label_width: f32,
}

impl PieLayout {
    pub fn negotiate(config: &ChartConfig, measurer: &dyn TextMeasurer, canvas: (f32, f32)) -> Self {
        let (w, h) = canvas;
        let title_space = config.title.as_ref().map_or(0.0, |t| 20.0 + t.font.size);
        let label_font = config.x_label_font();
        let max_label_width = config
            .labels
            .iter()
            .flatten()
            .map(|l| measurer.measure(l, &label_font) + 5.0)
            .fold(0.0, f32::max);
        let across = w - 2.0 * max_label_width - 2.0 * PIE_LEADER - 20.0;
        let down = h - title_space - label_font.size - 2.0 * PIE_LEADER - 20.0;
        let mut radius = across.min(down) / 2.0;
        if radius < 0.0 {
            radius = FALLBACK_RADIUS;
        }
        let layout = Self {
            canvas_width: w,
            canvas_height: h,
            center: Point::new(w / 2.0, (h + title_space) / 2.0),
            radius,
            title_space,
            label_font,
            max_label_width,
        };
        debug!(radius = layout.radius, cx = layout.center.x, cy = layout.center.y, "pie layout negotiated");
        layout
    }

    /// Distance the reveal must cover.
    pub fn reveal_extent(&self) -> f32 { self.canvas_height - self.title_space }

    /// Wedge at `radius`; a lone slice is a full disc without spokes.
    pub fn wedge(&self, slice: &PieSlice, radius: f32, lone: bool) -> ShapePath {
        let mut path = ShapePath::new();
        if !lone {
            path.move_to(self.center);
        }
        path.arc(self.center, radius, slice.start_angle, slice.end_angle, false);
        if !lone {
            path.line_to(self.center);
        }
        path.close();
        path
    }

    /// Slice under `p` at full radius.
    pub fn hit<'a>(&self, slices: &'a [PieSlice], p: Point) -> Option<&'a PieSlice> {
        if self.center.distance(p) > self.radius {
            return None;
        }
        let angle = screen_angle(self.center, p);
        slices.iter().find(|s| angle >= s.start_angle && angle <= s.end_angle)
    }
}

/// Leader line from the rim, and where its label goes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Leader {
    pub rim: Point,
    pub elbow: Point,
    pub end: Point,
    /// Label starts at the end and runs away from the pie.
    pub write_from: bool,
}

pub fn leader(center: Point, radius: f32, mid: f32, lone: bool) -> Leader {
    let rim = Point::new(center.x + radius * mid.cos(), center.y + radius * mid.sin());
    let elbow = Point::new(rim.x + PIE_LEADER * mid.cos(), rim.y + PIE_LEADER * mid.sin());
    let (bend, write_from) = if (mid - PI).abs() < f32::EPSILON {
        (0.0, false)
    } else if (mid - TAU).abs() < f32::EPSILON {
        (0.0, !lone)
    } else if mid <= FRAC_PI_2 {
        (PIE_LEADER_BEND, true)
    } else if mid <= 3.0 * FRAC_PI_2 {
        (-PIE_LEADER_BEND, false)
    } else {
        (PIE_LEADER_BEND, true)
    };
    Leader { rim, elbow, end: elbow.offset(bend, 0.0), write_from }
}

/// Slices at radius `amount`, each with its leader and label.
pub fn paint_pie<S: DrawingContext + ?Sized>(
    painter: &mut Painter<'_, S>,
    config: &ChartConfig,
    layout: &PieLayout,
    slices: &[PieSlice],
    colors: &[Rgba],
    amount: f32,
) {
    let lone = slices.len() == 1;
    let span = (Point::new(0.0, 0.0), Point::new(layout.canvas_width, layout.canvas_height));
    for slice in slices {
        let color = colors.get(slice.index).copied().unwrap_or(Rgba::BLACK);
        let wedge = layout.wedge(slice, amount, lone);
        let paint = Paint::LinearGradient { from: span.0, to: span.1, start: Rgba::PIE_GRADIENT_START, end: color };
        painter.fill(&wedge, &paint, 1.0);
        painter.stroke(&wedge, Rgba::WHITE, SLICE_OUTLINE);

        let Some(label) = config.labels.as_ref().and_then(|l| l.get(slice.index)) else {
            continue;
        };
        let leader = leader(layout.center, amount, slice.mid_angle, lone);
        let mut path = ShapePath::new();
        path.move_to(leader.rim).line_to(leader.elbow).line_to(leader.end);
        painter.stroke(&path, color, SLICE_OUTLINE);

        let font = &layout.label_font;
        let y = leader.end.y + font.size / 2.0;
        let x = if leader.write_from {
            leader.end.x + 5.0
        } else {
            leader.end.x - (painter.measure(label, font) + 5.0)
        };
        painter.text(label, Point::new(x, y), &TextStyle::new(font.clone(), color));
    }
}
