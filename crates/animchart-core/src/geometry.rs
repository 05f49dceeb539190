// File: crates/animchart-core/src/geometry.rs
// Summary: Lightweight geometry helpers for pixel math and the horizontal-chart transform.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self { Self { x, y } }
    pub fn distance(self, other: Point) -> f32 { (other.x - self.x).hypot(other.y - self.y) }
    pub fn offset(self, dx: f32, dy: f32) -> Self { Self::new(self.x + dx, self.y + dy) }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self { Self::new(x, y) }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub const fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }
    pub fn width(&self) -> f32 { self.right - self.left }
    pub fn height(&self) -> f32 { self.bottom - self.top }
    pub fn center(&self) -> Point { Point::new((self.left + self.right) * 0.5, (self.top + self.bottom) * 0.5) }
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }
    /// Smallest rect holding both.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect::from_ltrb(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }
}

/// Maps the logical plot frame to device pixels.
///
/// Horizontal bar charts are laid out as vertical ones in a logical frame
/// whose x runs along the device's bottom-to-top axis and whose y runs along
/// the device's right-to-left axis: `device = (W - y, H - x)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Orientation {
    Vertical,
    Horizontal { width: f32, height: f32 },
}

impl Orientation {
    pub fn is_horizontal(&self) -> bool { matches!(self, Orientation::Horizontal { .. }) }

    pub fn to_device(&self, p: Point) -> Point {
        match *self {
            Orientation::Vertical => p,
            Orientation::Horizontal { width, height } => Point::new(width - p.y, height - p.x),
        }
    }

    pub fn to_logical(&self, p: Point) -> Point {
        match *self {
            Orientation::Vertical => p,
            Orientation::Horizontal { width, height } => Point::new(height - p.y, width - p.x),
        }
    }
}
