// File: crates/animchart-core/src/path.rs
// Summary: Renderer-agnostic path value with canvas-style arcs, flattening and point containment.

use std::f32::consts::TAU;

use crate::geometry::{Point, Rect};

const ARC_TOLERANCE: f32 = 0.25;
const BEZIER_STEPS: usize = 16;
const MAX_ARC_STEPS: usize = 512;

#[derive(Clone, Debug, PartialEq)]
pub enum PathCmd {
    MoveTo(Point),
    LineTo(Point),
    QuadTo(Point, Point),
    CubicTo(Point, Point, Point),
    /// Canvas `arc()` semantics: connects from the current point to the arc start.
    Arc { center: Point, radius: f32, start: f32, end: f32, ccw: bool },
    Close,
}

/// A geometric path built once per shape. Painting and hit testing both
/// consume it; neither mutates it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShapePath {
    cmds: Vec<PathCmd>,
}

impl ShapePath {
    pub fn new() -> Self { Self::default() }

    pub fn move_to(&mut self, p: impl Into<Point>) -> &mut Self { self.cmds.push(PathCmd::MoveTo(p.into())); self }
    pub fn line_to(&mut self, p: impl Into<Point>) -> &mut Self { self.cmds.push(PathCmd::LineTo(p.into())); self }
    pub fn quad_to(&mut self, c: impl Into<Point>, p: impl Into<Point>) -> &mut Self {
        self.cmds.push(PathCmd::QuadTo(c.into(), p.into()));
        self
    }
    pub fn cubic_to(&mut self, c1: impl Into<Point>, c2: impl Into<Point>, p: impl Into<Point>) -> &mut Self {
        self.cmds.push(PathCmd::CubicTo(c1.into(), c2.into(), p.into()));
        self
    }
    pub fn arc(&mut self, center: impl Into<Point>, radius: f32, start: f32, end: f32, ccw: bool) -> &mut Self {
        self.cmds.push(PathCmd::Arc { center: center.into(), radius: radius.max(0.0), start, end, ccw });
        self
    }
    pub fn close(&mut self) -> &mut Self { self.cmds.push(PathCmd::Close); self }

    /// Closed polygon through `points`.
    pub fn polygon(points: &[Point]) -> Self {
        let mut path = ShapePath::new();
        if let Some((first, rest)) = points.split_first() {
            path.move_to(*first);
            for p in rest {
                path.line_to(*p);
            }
            path.close();
        }
        path
    }

    pub fn rect(r: Rect) -> Self {
        Self::polygon(&[
            Point::new(r.left, r.top),
            Point::new(r.right, r.top),
            Point::new(r.right, r.bottom),
            Point::new(r.left, r.bottom),
        ])
    }

    pub fn circle(center: Point, radius: f32) -> Self {
        let mut path = ShapePath::new();
        path.arc(center, radius, 0.0, TAU, false).close();
        path
    }

    pub fn commands(&self) -> &[PathCmd] { &self.cmds }
    pub fn is_empty(&self) -> bool { self.cmds.is_empty() }

    /// Flatten curves and arcs into polylines.
    pub fn flatten(&self) -> FlatPath {
        let mut out = FlatPath::default();
        let mut current: Vec<Point> = Vec::new();
        let mut start = Point::default();

        for cmd in &self.cmds {
            match *cmd {
                PathCmd::MoveTo(p) => {
                    out.push_open(std::mem::take(&mut current));
                    current.push(p);
                    start = p;
                }
                PathCmd::LineTo(p) => {
                    if current.is_empty() {
                        start = p;
                    }
                    current.push(p);
                }
                PathCmd::QuadTo(c, p) => {
                    let p0 = current.last().copied().unwrap_or(c);
                    if current.is_empty() {
                        current.push(p0);
                        start = p0;
                    }
                    for i in 1..=BEZIER_STEPS {
                        let t = i as f32 / BEZIER_STEPS as f32;
                        let mt = 1.0 - t;
                        current.push(Point::new(
                            mt * mt * p0.x + 2.0 * mt * t * c.x + t * t * p.x,
                            mt * mt * p0.y + 2.0 * mt * t * c.y + t * t * p.y,
                        ));
                    }
                }
                PathCmd::CubicTo(c1, c2, p) => {
                    let p0 = current.last().copied().unwrap_or(c1);
                    if current.is_empty() {
                        current.push(p0);
                        start = p0;
                    }
                    for i in 1..=BEZIER_STEPS {
                        let t = i as f32 / BEZIER_STEPS as f32;
                        let mt = 1.0 - t;
                        let (a, b, cc, d) = (mt * mt * mt, 3.0 * mt * mt * t, 3.0 * mt * t * t, t * t * t);
                        current.push(Point::new(
                            a * p0.x + b * c1.x + cc * c2.x + d * p.x,
                            a * p0.y + b * c1.y + cc * c2.y + d * p.y,
                        ));
                    }
                }
                PathCmd::Arc { center, radius, start: a0, end: a1, ccw } => {
                    let sweep = arc_sweep(a0, a1, ccw);
                    let steps = arc_steps(radius, sweep);
                    for i in 0..=steps {
                        let a = a0 + sweep * i as f32 / steps as f32;
                        let p = Point::new(center.x + radius * a.cos(), center.y + radius * a.sin());
                        if i == 0 && current.is_empty() {
                            start = p;
                        }
                        current.push(p);
                    }
                }
                PathCmd::Close => {
                    if !current.is_empty() {
                        out.contours.push(Contour { points: std::mem::take(&mut current), closed: true });
                        current.push(start);
                    }
                }
            }
        }
        out.push_open(current);
        out
    }

    /// Nonzero-winding containment, every subpath implicitly closed.
    pub fn contains(&self, p: Point) -> bool { self.flatten().contains(p) }

    pub fn bounds(&self) -> Option<Rect> { self.flatten().bounds() }
}

/// Sweep in radians following canvas rules: clockwise sweeps are in
/// `[0, 2π]`, counter-clockwise ones in `[-2π, 0]`.
fn arc_sweep(start: f32, end: f32, ccw: bool) -> f32 {
    if !ccw {
        let d = end - start;
        if d >= TAU { TAU } else { d.rem_euclid(TAU) }
    } else {
        let d = start - end;
        if d >= TAU { -TAU } else { -d.rem_euclid(TAU) }
    }
}

fn arc_steps(radius: f32, sweep: f32) -> usize {
    if radius <= ARC_TOLERANCE || sweep == 0.0 {
        return 1;
    }
    let per_step = (2.0 * (1.0 - ARC_TOLERANCE / radius).acos()).max(0.01);
    ((sweep.abs() / per_step).ceil() as usize).clamp(1, MAX_ARC_STEPS)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Contour {
    pub points: Vec<Point>,
    pub closed: bool,
}

/// Polylines produced by [`ShapePath::flatten`], ready for a raster backend.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlatPath {
    pub contours: Vec<Contour>,
}

impl FlatPath {
    fn push_open(&mut self, points: Vec<Point>) {
        // a lone point left by a trailing Close or MoveTo draws nothing
        if points.len() > 1 {
            self.contours.push(Contour { points, closed: false });
        }
    }

    pub fn is_empty(&self) -> bool { self.contours.is_empty() }

    pub fn map(&self, f: impl Fn(Point) -> Point) -> FlatPath {
        FlatPath {
            contours: self
                .contours
                .iter()
                .map(|c| Contour { points: c.points.iter().map(|p| f(*p)).collect(), closed: c.closed })
                .collect(),
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        let mut winding = 0i32;
        for contour in &self.contours {
            let pts = &contour.points;
            if pts.len() < 3 {
                continue;
            }
            for i in 0..pts.len() {
                let a = pts[i];
                let b = pts[(i + 1) % pts.len()];
                if a.y <= p.y {
                    if b.y > p.y && cross(a, b, p) > 0.0 {
                        winding += 1;
                    }
                } else if b.y <= p.y && cross(a, b, p) < 0.0 {
                    winding -= 1;
                }
            }
        }
        winding != 0
    }

    pub fn bounds(&self) -> Option<Rect> {
        let mut pts = self.contours.iter().flat_map(|c| c.points.iter());
        let first = pts.next()?;
        let mut r = Rect::from_ltrb(first.x, first.y, first.x, first.y);
        for p in pts {
            r = r.union(&Rect::from_ltrb(p.x, p.y, p.x, p.y));
        }
        Some(r)
    }
}

#[inline]
fn cross(a: Point, b: Point, p: Point) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (p.x - a.x) * (b.y - a.y)
}
