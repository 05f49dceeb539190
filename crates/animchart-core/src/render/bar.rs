// File: crates/animchart-core/src/render/bar.rs
// Summary: Bar geometry with reveal clamping, stack offsets and the five bar style builders.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_8, PI, TAU};

use crate::color::Rgba;
use crate::config::{BarStyle, ChartConfig};
use crate::geometry::Point;
use crate::layout::LayoutMetrics;
use crate::path::ShapePath;
use crate::render::{FillRole, Painter, ShapePart};
use crate::scale::ValueScale;
use crate::surface::DrawingContext;
use crate::types::{CORNER_RADIUS, NARROW_CORNER_RADIUS};

/// Control-point ratio approximating a quarter ellipse with a cubic.
const KAPPA: f32 = 0.552_284_8;

/// Everything a style builder needs to place one bar segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarSlot {
    pub x: f32,
    pub width: f32,
    /// Top edge after reveal clamping.
    pub top: f32,
    /// Bottom edge: the axis line, or the previous segment's top when stacked.
    pub base: f32,
    pub corner_radius: f32,
    pub stacked: bool,
    /// Outermost segment of its category (always true for grouped bars).
    pub topmost: bool,
    /// No bar in the chart is clamped by the reveal any more.
    pub settled: bool,
    pub series_count: usize,
    pub gap: f32,
    /// Top of the next series' bar in the same group, grouped charts only.
    pub next_top: Option<f32>,
}

impl BarSlot {
    pub fn center_x(&self) -> f32 { self.x + self.width / 2.0 }
    pub fn height(&self) -> f32 { (self.base - self.top).max(0.0) }
}

/// Style path builder, chosen once per chart build.
pub type BarBuilder = fn(&BarSlot) -> Vec<ShapePart>;

impl BarStyle {
    pub fn builder(self) -> BarBuilder {
        match self {
            BarStyle::Normal => flat_bar,
            BarStyle::Glass => glass_bar,
            BarStyle::Cylinder => cylinder_bar,
            BarStyle::Dome => dome_bar,
            BarStyle::Parallelepiped => parallelepiped_bar,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlacedBar {
    pub series: usize,
    pub category: usize,
    pub value: f64,
    pub slot: BarSlot,
    pub parts: Vec<ShapePart>,
}

impl PlacedBar {
    pub fn contains(&self, p: Point) -> bool {
        self.parts.iter().filter(|part| part.is_hit_region()).any(|part| part.path.contains(p))
    }
}

/// Build every bar at reveal amount `reveal`. `stack_offsets` holds one
/// running top per category and is reset here. Returns the bars in paint
/// order and whether no bar needed clamping.
pub fn build_bars(
    config: &ChartConfig,
    metrics: &LayoutMetrics,
    scale: &ValueScale,
    builder: BarBuilder,
    reveal: f32,
    stack_offsets: &mut Vec<f32>,
) -> (Vec<PlacedBar>, bool) {
    let series = config.series_count();
    let categories = config.category_count();
    let stacked = config.kind.is_stacked();
    let baseline = metrics.baseline;
    let revealed = baseline - reveal;

    stack_offsets.clear();
    stack_offsets.resize(categories, baseline);

    // pass 1: clamped tops, so grouped bars can look at their neighbour
    let mut complete = true;
    let mut tops = vec![vec![(0.0f32, CORNER_RADIUS); categories]; series];
    for k in 0..series {
        for i in 0..categories {
            let value = if stacked { config.data[..=k].iter().map(|s| s[i]).sum() } else { config.data[k][i] };
            let natural = scale.to_px(value);
            let mut top = if revealed <= natural {
                natural
            } else {
                complete = false;
                revealed
            };
            let mut radius = CORNER_RADIUS;
            if top + 2.0 > baseline {
                top = baseline - 1.0;
                radius = 1.0;
            }
            tops[k][i] = (top, radius);
        }
    }

    // pass 2: shapes
    let group = metrics.group_width(series);
    let width = if stacked { group } else { group / series.max(1) as f32 };
    let mut bars = Vec::with_capacity(series * categories);
    for k in 0..series {
        for i in 0..categories {
            let (top, corner_radius) = tops[k][i];
            let x = if stacked { metrics.slot_x(i) } else { metrics.slot_x(i) + k as f32 * width };
            let next_top = (!stacked && k + 1 < series).then(|| tops[k + 1][i].0);
            let slot = BarSlot {
                x,
                width,
                top,
                base: stack_offsets[i],
                corner_radius,
                stacked,
                topmost: !stacked || k + 1 == series,
                settled: complete,
                series_count: series,
                gap: metrics.gap,
                next_top,
            };
            if stacked {
                stack_offsets[i] = top;
            }
            bars.push(PlacedBar { series: k, category: i, value: config.data[k][i], slot, parts: builder(&slot) });
        }
    }
    (bars, complete)
}

pub fn paint_bars<S: DrawingContext + ?Sized>(painter: &mut Painter<'_, S>, bars: &[PlacedBar], colors: &[Rgba], alpha: f32) {
    for bar in bars {
        let color = colors.get(bar.series).copied().unwrap_or(Rgba::BLACK);
        let light = color.luminance(1.3);
        let s = &bar.slot;
        let span = (Point::new(s.x, s.top), Point::new(s.x + s.width, s.top));
        painter.shape(&bar.parts, color, light, span, alpha);
    }
}

pub fn flat_bar(s: &BarSlot) -> Vec<ShapePart> {
    let path = ShapePath::polygon(&[
        Point::new(s.x, s.top),
        Point::new(s.x + s.width, s.top),
        Point::new(s.x + s.width, s.base),
        Point::new(s.x, s.base),
    ]);
    vec![ShapePart::filled(path, FillRole::Solid)]
}

/// Rounded-top rectangle; only the outermost stacked segment is rounded.
pub fn glass_bar(s: &BarSlot) -> Vec<ShapePart> {
    let mut r = s.corner_radius;
    if r >= CORNER_RADIUS && s.width <= 2.0 * CORNER_RADIUS * s.series_count as f32 {
        r = NARROW_CORNER_RADIUS;
    }
    let r = r.min(s.width / 2.0).min(s.height()).max(0.0);
    let (x, w, top, base) = (s.x, s.width, s.top, s.base);

    let mut path = ShapePath::new();
    if s.topmost {
        path.move_to((x + r, top))
            .line_to((x + w - r, top))
            .arc((x + w - r, top + r), r, -FRAC_PI_2, 0.0, false)
            .line_to((x + w, base))
            .line_to((x, base))
            .line_to((x, top + r))
            .arc((x + r, top + r), r, PI, PI + FRAC_PI_2, false)
            .close();
    } else {
        path = ShapePath::polygon(&[Point::new(x, top), Point::new(x + w, top), Point::new(x + w, base), Point::new(x, base)]);
    }
    vec![ShapePart::outlined(path, FillRole::Gradient, 1.0)]
}

/// Radius and center offset of the arcs that fake an ellipse across the bar.
fn lens(width: f32) -> (f32, f32) {
    let radius = width / 2.0 / FRAC_PI_8.sin();
    (radius, radius * FRAC_PI_8.cos())
}

/// Cylinder: body between two shallow arcs plus a lens-shaped cap.
pub fn cylinder_bar(s: &BarSlot) -> Vec<ShapePart> {
    let (r, rc) = lens(s.width);
    let cx = s.center_x();
    let (a3, a5, a11, a13) = (3.0 * FRAC_PI_8, 5.0 * FRAC_PI_8, 11.0 * FRAC_PI_8, 13.0 * FRAC_PI_8);

    let mut body = ShapePath::new();
    body.arc((cx, s.top - rc), r, a3, a5, false)
        .line_to((s.x, s.base))
        .arc((cx, s.base - rc), r, a5, a3, true)
        .line_to((s.x + s.width, s.top))
        .close();

    let mut cap = ShapePath::new();
    cap.arc((cx, s.top + rc), r, a11, a13, false).arc((cx, s.top - rc), r, a3, a5, false).close();

    let mut rim = ShapePath::new();
    rim.arc((cx, s.top + rc), r, a11, a13, false);

    vec![
        ShapePart::outlined(body, FillRole::InverseGradient, 1.0),
        ShapePart::filled(cap, FillRole::Gradient),
        ShapePart::outlined(rim, FillRole::None, 1.0),
    ]
}

/// Dome: semicircular cap, or a half ellipse when the bar is shorter than
/// its half width. Inner stacked segments get a shallow convex joint.
/// A stacked column keeps a flat top until the reveal has settled.
pub fn dome_bar(s: &BarSlot) -> Vec<ShapePart> {
    let (r, rc) = lens(s.width);
    let cx = s.center_x();
    let (x, w, top, base) = (s.x, s.width, s.top, s.base);
    let (a3, a5, a11, a13) = (3.0 * FRAC_PI_8, 5.0 * FRAC_PI_8, 11.0 * FRAC_PI_8, 13.0 * FRAC_PI_8);
    let top_radius = w / 2.0;
    let h = s.height();

    let mut path = ShapePath::new();
    if !s.topmost {
        path.arc((cx, top + rc), r, a13, a11, true)
            .line_to((x, base))
            .arc((cx, base - rc), r, a5, a3, true)
            .close();
    } else if s.stacked && !s.settled {
        path.move_to((x, top))
            .line_to((x, base))
            .arc((cx, base - rc), r, a5, a3, true)
            .line_to((x + w, top))
            .close();
    } else if top_radius <= h {
        path.arc((cx, top + top_radius), top_radius, TAU, PI, true)
            .line_to((x, base))
            .arc((cx, base - rc), r, a5, a3, true)
            .line_to((x + w, top + top_radius))
            .close();
    } else {
        let (ox, oy) = (w / 2.0 * KAPPA, h * KAPPA);
        let xm = x + w / 2.0;
        path.move_to((x, base))
            .cubic_to((x, base - oy), (xm - ox, top), (xm, top))
            .cubic_to((xm + ox, top), (x + w, base - oy), (x + w, base))
            .arc((cx, base - rc), r, a3, a5, false)
            .close();
    }
    vec![ShapePart::outlined(path, FillRole::InverseGradient, 1.0)]
}

/// Isometric box: front, top face skewed by `gap / 4`, and a side face.
///
/// In grouped charts the side face is hidden behind a taller neighbour and
/// cut at a shorter neighbour's top.
pub fn parallelepiped_bar(s: &BarSlot) -> Vec<ShapePart> {
    let p = s.gap / 4.0;
    let (x, w, top, base) = (s.x, s.width, s.top, s.base);

    let front = ShapePath::polygon(&[
        Point::new(x, top + p),
        Point::new(x + w, top + p),
        Point::new(x + w, base + p),
        Point::new(x, base + p),
    ]);
    let cover = ShapePath::polygon(&[
        Point::new(x, top + p),
        Point::new(x + p, top),
        Point::new(x + w + p, top),
        Point::new(x + w, top + p),
    ]);

    let mut parts = vec![
        ShapePart::outlined(front, FillRole::Gradient, 0.5),
        ShapePart::outlined(cover, FillRole::InverseGradient, 0.5),
    ];

    let side_bottom = match s.next_top {
        Some(next_top) if next_top <= top => None,
        Some(next_top) => Some(next_top),
        None => Some(base + p),
    };
    if let Some(bottom) = side_bottom {
        let side = ShapePath::polygon(&[
            Point::new(x + w + p, top),
            Point::new(x + w + p, bottom - p),
            Point::new(x + w, bottom),
            Point::new(x + w, top + p),
        ]);
        parts.push(ShapePart::outlined(side, FillRole::InverseGradient, 0.5));
    }
    parts
}
