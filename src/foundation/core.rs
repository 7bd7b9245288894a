use std::ops::{Add, Div, Mul, Sub};

pub use kurbo::Vec2;

/// Integer 2D point, used for both canvas space and raster space.
///
/// Canvas coordinates are unbounded in principle; `i64` keeps `raster * view_scale` exact at
/// the largest supported zoom-out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "[i64; 2]", into = "[i64; 2]")]
pub struct V2i {
    /// Horizontal coordinate, growing to the right.
    pub x: i64,
    /// Vertical coordinate, growing downwards.
    pub y: i64,
}

impl V2i {
    /// Origin.
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Build a point from its coordinates.
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Lossy conversion into a floating point vector.
    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x as f64, self.y as f64)
    }

    /// Squared euclidean length.
    pub fn length_squared(self) -> i64 {
        self.x * self.x + self.y * self.y
    }
}

impl From<[i64; 2]> for V2i {
    fn from([x, y]: [i64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<V2i> for [i64; 2] {
    fn from(p: V2i) -> Self {
        [p.x, p.y]
    }
}

impl Add for V2i {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for V2i {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<i64> for V2i {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self {
        Self::new(self.x.saturating_mul(rhs), self.y.saturating_mul(rhs))
    }
}

/// Truncating division, rounding toward zero on both axes.
impl Div<i64> for V2i {
    type Output = Self;

    fn div(self, rhs: i64) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

/// Axis-aligned integer rectangle.
///
/// `left <= right` and `top <= bottom` hold for rectangles built from points. Scan regions
/// treat `right`/`bottom` as exclusive after clipping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    /// Left edge.
    pub left: i64,
    /// Top edge.
    pub top: i64,
    /// Right edge.
    pub right: i64,
    /// Bottom edge.
    pub bottom: i64,
}

impl Rect {
    /// Build a rectangle from its four edges.
    pub const fn new(left: i64, top: i64, right: i64, bottom: i64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Build a rectangle from its top-left and bottom-right corners.
    pub const fn from_corners(top_left: V2i, bot_right: V2i) -> Self {
        Self::new(top_left.x, top_left.y, bot_right.x, bot_right.y)
    }

    /// Top-left corner.
    pub const fn top_left(self) -> V2i {
        V2i::new(self.left, self.top)
    }

    /// Bottom-right corner.
    pub const fn bot_right(self) -> V2i {
        V2i::new(self.right, self.bottom)
    }

    /// Horizontal extent (may be negative for a malformed rectangle).
    pub const fn width(self) -> i64 {
        self.right - self.left
    }

    /// Vertical extent (may be negative for a malformed rectangle).
    pub const fn height(self) -> i64 {
        self.bottom - self.top
    }

    /// `width * height`.
    pub const fn area(self) -> i64 {
        self.width() * self.height()
    }

    /// `true` when the half-open region `[left, right) x [top, bottom)` holds no pixel.
    pub const fn is_empty(self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }

    /// Inclusive containment test.
    pub const fn contains(self, p: V2i) -> bool {
        self.left <= p.x && p.x <= self.right && self.top <= p.y && p.y <= self.bottom
    }

    /// Intersection with `other`; the result may be empty.
    pub fn clip_to(self, other: Rect) -> Rect {
        Rect::new(
            self.left.max(other.left),
            self.top.max(other.top),
            self.right.min(other.right),
            self.bottom.min(other.bottom),
        )
    }
}

/// Floating point RGB color, channels nominally in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct Rgb {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
}

impl Rgb {
    /// Build a color from its channels.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// Visible raster dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Build a viewport.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Center pixel, `size / 2` with truncation.
    pub fn center(self) -> V2i {
        V2i::new(i64::from(self.width) / 2, i64::from(self.height) / 2)
    }

    /// The viewport as a half-open pixel rectangle anchored at the origin.
    pub fn rect(self) -> Rect {
        Rect::new(0, 0, i64::from(self.width), i64::from(self.height))
    }

    /// Number of pixels covered.
    pub fn pixel_count(self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
