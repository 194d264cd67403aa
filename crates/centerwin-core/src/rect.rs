/// A rectangle in virtual-screen coordinates: top-left origin plus size.
///
/// Used for monitor bounds and work areas. Coordinates may be negative
/// on multi-monitor setups where a display sits left of or above the
/// primary one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a rectangle from Win32-style edges.
    pub fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    /// Returns the top-left position that centers `size` inside this rectangle.
    ///
    /// Uses floor division. A window larger than the rectangle gets a
    /// position before the origin; the result is never clamped.
    pub fn center_of(&self, size: Size) -> (i32, i32) {
        let x = self.x + (self.width - size.width).div_euclid(2);
        let y = self.y + (self.height - size.height).div_euclid(2);
        (x, y)
    }
}

/// The outer size of a window at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Whether both dimensions are positive, i.e. the window has laid out.
    pub fn is_settled(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}
