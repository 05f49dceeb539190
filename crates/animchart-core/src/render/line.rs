// File: crates/animchart-core/src/render/line.rs
// Summary: Line and area geometry: clamped points, gap-shortened segments and the marker shapes.

use std::f32::consts::PI;

use crate::color::Rgba;
use crate::config::LineStyle;
use crate::geometry::Point;
use crate::layout::LayoutMetrics;
use crate::path::ShapePath;
use crate::render::Painter;
use crate::scale::ValueScale;
use crate::surface::{DrawingContext, Paint};

/// Default marker radius; `normal` lines and areas use the small one.
pub const MARKER_RADIUS: f32 = 3.0;
pub const SMALL_MARKER_RADIUS: f32 = 2.0;
const SEGMENT_WIDTH: f32 = 2.0;
const MARKER_STROKE_WIDTH: f32 = 1.0;
const AREA_OUTLINE_LUMINANCE: f32 = 1.3;
/// Extra pointer slack around a marker when hit testing.
const MARKER_HIT_SLACK: f32 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerPaint {
    Fill,
    Stroke,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinePoint {
    pub category: usize,
    pub value: f64,
    pub center: Point,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LineSeriesGeometry {
    pub series: usize,
    pub points: Vec<LinePoint>,
    /// Segments between consecutive markers, already shortened.
    pub segments: Vec<(Point, Point)>,
    pub area: Option<ShapePath>,
    pub markers: Vec<ShapePath>,
    pub marker_paint: MarkerPaint,
    pub radius: f32,
}

impl LineSeriesGeometry {
    /// Index of the point whose marker holds `p`.
    pub fn hit(&self, p: Point) -> Option<usize> {
        self.points
            .iter()
            .zip(&self.markers)
            .position(|(pt, marker)| marker.contains(p) || pt.center.distance(p) <= self.radius + MARKER_HIT_SLACK)
    }
}

/// Marker radius for a line style; areas always use the small dot.
pub fn marker_radius(style: LineStyle, area: bool) -> f32 {
    if area || style == LineStyle::Normal { SMALL_MARKER_RADIUS } else { MARKER_RADIUS }
}

pub fn marker_paint(style: LineStyle) -> MarkerPaint {
    match style {
        LineStyle::Normal | LineStyle::SolidDot => MarkerPaint::Fill,
        LineStyle::HollowDot | LineStyle::BowDot | LineStyle::AnchorDot | LineStyle::StarDot => MarkerPaint::Stroke,
    }
}

pub fn marker_path(style: LineStyle, c: Point, radius: f32) -> ShapePath {
    match style {
        LineStyle::Normal | LineStyle::SolidDot | LineStyle::HollowDot => ShapePath::circle(c, radius),
        LineStyle::BowDot => {
            let d = 4.0;
            let mut path = ShapePath::new();
            path.move_to(c)
                .line_to((c.x - d, c.y - d))
                .line_to((c.x + d, c.y - d))
                .line_to((c.x - d, c.y + d))
                .line_to((c.x + d, c.y + d))
                .line_to(c);
            path
        }
        LineStyle::AnchorDot => {
            let d = 8.0;
            let h = 3f32.sqrt() * d / 6.0;
            let mut path = ShapePath::new();
            path.move_to((c.x - d / 2.0, c.y + h))
                .line_to((c.x, c.y - 2.0 * h))
                .line_to((c.x + d / 2.0, c.y + h))
                .line_to((c.x - d / 2.0, c.y + h));
            path
        }
        LineStyle::StarDot => star(c, 5.0, 5, 0.5),
    }
}

/// `points`-pointed star of outer radius `r` and inset ratio `m`, first tip up.
fn star(c: Point, r: f32, points: usize, m: f32) -> ShapePath {
    let mut path = ShapePath::new();
    path.move_to((c.x, c.y - r));
    for j in 1..=2 * points {
        let angle = j as f32 * PI / points as f32;
        let len = if j % 2 == 1 { r * m } else { r };
        path.line_to((c.x + len * angle.sin(), c.y - len * angle.cos()));
    }
    path
}

/// Segment between two markers, pulled in by `space` at both ends along
/// its own direction. `None` when the markers overlap.
fn shortened(a: Point, b: Point, space: f32) -> Option<(Point, Point)> {
    let len = a.distance(b);
    if len <= 2.0 * space {
        return None;
    }
    let (ux, uy) = ((b.x - a.x) / len, (b.y - a.y) / len);
    Some((a.offset(ux * space, uy * space), b.offset(-ux * space, -uy * space)))
}

/// Geometry for every series in `values`, points centered in a group sized
/// for `group_series` series. Returns whether no point needed clamping.
pub fn build_line_series(
    values: &[Vec<f64>],
    metrics: &LayoutMetrics,
    scale: &ValueScale,
    style: LineStyle,
    area: bool,
    group_series: usize,
    reveal: f32,
) -> (Vec<LineSeriesGeometry>, bool) {
    let baseline = metrics.baseline;
    let revealed = baseline - reveal;
    let radius = marker_radius(style, area);
    let space = radius + 2.0;
    let mut complete = true;

    let series = values
        .iter()
        .enumerate()
        .map(|(k, data)| {
            let points: Vec<LinePoint> = data
                .iter()
                .enumerate()
                .map(|(i, &value)| {
                    let natural = scale.to_px(value);
                    let mut y = if revealed <= natural {
                        natural
                    } else {
                        complete = false;
                        revealed
                    };
                    if y + 2.0 > baseline {
                        y = baseline - 1.0;
                    }
                    LinePoint { category: i, value, center: Point::new(metrics.middle_x(i, group_series), y) }
                })
                .collect();

            let segments = points.windows(2).filter_map(|w| shortened(w[0].center, w[1].center, space)).collect();
            let area_path = match (area, points.first(), points.last()) {
                (true, Some(first), Some(last)) => {
                    let mut outline: Vec<Point> = points.iter().map(|p| p.center).collect();
                    outline.push(Point::new(last.center.x, baseline));
                    outline.push(Point::new(first.center.x, baseline));
                    Some(ShapePath::polygon(&outline))
                }
                _ => None,
            };
            let markers = points.iter().map(|p| marker_path(style, p.center, radius)).collect();
            LineSeriesGeometry { series: k, points, segments, area: area_path, markers, marker_paint: marker_paint(style), radius }
        })
        .collect();
    (series, complete)
}

/// Area fill first (at `alpha`) with a lighter outline, then segments,
/// then markers at full opacity.
pub fn paint_lines<S: DrawingContext + ?Sized>(painter: &mut Painter<'_, S>, series: &[LineSeriesGeometry], colors: &[Rgba], alpha: f32) {
    for geometry in series {
        let color = colors.get(geometry.series).copied().unwrap_or(Rgba::BLACK);
        if let Some(area) = &geometry.area {
            painter.fill(area, &Paint::Solid(color), alpha);
            painter.stroke(area, color.luminance(AREA_OUTLINE_LUMINANCE), MARKER_STROKE_WIDTH);
        }
        for &(a, b) in &geometry.segments {
            painter.line(a, b, color, SEGMENT_WIDTH);
        }
        for marker in &geometry.markers {
            match geometry.marker_paint {
                MarkerPaint::Fill => painter.fill(marker, &Paint::Solid(color), 1.0),
                MarkerPaint::Stroke => painter.stroke(marker, color, MARKER_STROKE_WIDTH),
            }
        }
    }
}

