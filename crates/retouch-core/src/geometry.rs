//! Canvas-space geometry: points, rectangles, crop handles and cursors.
//!
//! All coordinates are canvas pixels with the origin at the top-left corner.
//! The display canvas is always sized to the source image, so canvas
//! coordinates map 1:1 to source pixels.

use std::ops::Sub;

use serde::{Deserialize, Serialize};

/// A position in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Neither coordinate is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Integer dimensions of a canvas or bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Axis-aligned rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle covering a whole canvas.
    pub fn full(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width as f64, size.height as f64)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// True when both extents are positive.
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Inclusive point-in-rectangle test. A degenerate rectangle contains nothing.
    pub fn contains(&self, p: Point) -> bool {
        if !self.has_area() {
            return false;
        }
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Clamp the rectangle into `bounds`.
    ///
    /// The origin is pulled inside the canvas; an edge sticking out past the
    /// far side shrinks the extent instead of shifting the origin.
    pub fn clamp_to(&mut self, bounds: Size) {
        let (w, h) = (bounds.width as f64, bounds.height as f64);

        self.x = self.x.clamp(0.0, w);
        if self.right() > w {
            self.width = w - self.x;
        }
        self.y = self.y.clamp(0.0, h);
        if self.bottom() > h {
            self.height = h - self.y;
        }

        self.width = self.width.max(0.0);
        self.height = self.height.max(0.0);
    }

    /// Snap outward to whole pixels inside `bounds`.
    ///
    /// Returns `None` when nothing of the rectangle survives.
    pub fn to_pixel_rect(&self, bounds: Size) -> Option<PixelRect> {
        if !self.has_area() {
            return None;
        }
        let (w, h) = (bounds.width as f64, bounds.height as f64);
        let left = self.x.floor().clamp(0.0, w);
        let top = self.y.floor().clamp(0.0, h);
        let right = self.right().ceil().clamp(0.0, w);
        let bottom = self.bottom().ceil().clamp(0.0, h);

        if right <= left || bottom <= top {
            return None;
        }
        Some(PixelRect {
            x: left as u32,
            y: top as u32,
            width: (right - left) as u32,
            height: (bottom - top) as u32,
        })
    }
}

/// Whole-pixel region of a bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// One of the eight draggable control points of the crop rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handle {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
    North,
    South,
    West,
    East,
}

impl Handle {
    /// Hit-test order: corners first, then edge midpoints. First match wins.
    pub const ALL: [Handle; 8] = [
        Handle::NorthWest,
        Handle::NorthEast,
        Handle::SouthWest,
        Handle::SouthEast,
        Handle::North,
        Handle::South,
        Handle::West,
        Handle::East,
    ];

    /// Short compass name (`"nw"`, `"e"`, ...).
    pub fn name(self) -> &'static str {
        match self {
            Handle::NorthWest => "nw",
            Handle::NorthEast => "ne",
            Handle::SouthWest => "sw",
            Handle::SouthEast => "se",
            Handle::North => "n",
            Handle::South => "s",
            Handle::West => "w",
            Handle::East => "e",
        }
    }

    /// Where the handle sits on `rect`.
    pub fn anchor(self, rect: &Rect) -> Point {
        let mid_x = rect.x + rect.width / 2.0;
        let mid_y = rect.y + rect.height / 2.0;
        match self {
            Handle::NorthWest => Point::new(rect.x, rect.y),
            Handle::NorthEast => Point::new(rect.right(), rect.y),
            Handle::SouthWest => Point::new(rect.x, rect.bottom()),
            Handle::SouthEast => Point::new(rect.right(), rect.bottom()),
            Handle::North => Point::new(mid_x, rect.y),
            Handle::South => Point::new(mid_x, rect.bottom()),
            Handle::West => Point::new(rect.x, mid_y),
            Handle::East => Point::new(rect.right(), mid_y),
        }
    }

    /// Whether dragging this handle moves the left edge.
    pub fn moves_left(self) -> bool {
        matches!(self, Handle::NorthWest | Handle::SouthWest | Handle::West)
    }

    /// Whether dragging this handle moves the top edge.
    pub fn moves_top(self) -> bool {
        matches!(self, Handle::NorthWest | Handle::NorthEast | Handle::North)
    }

    /// Whether dragging this handle moves the right edge.
    pub fn moves_right(self) -> bool {
        matches!(self, Handle::NorthEast | Handle::SouthEast | Handle::East)
    }

    /// Whether dragging this handle moves the bottom edge.
    pub fn moves_bottom(self) -> bool {
        matches!(self, Handle::SouthWest | Handle::SouthEast | Handle::South)
    }

    pub fn cursor(self) -> Cursor {
        match self {
            Handle::NorthWest | Handle::SouthEast => Cursor::NwseResize,
            Handle::NorthEast | Handle::SouthWest => Cursor::NeswResize,
            Handle::North | Handle::South => Cursor::NsResize,
            Handle::West | Handle::East => Cursor::EwResize,
        }
    }
}

/// Find the handle under `p`.
///
/// Each handle owns a `handle_size` square centered on its anchor (the same
/// square that gets drawn); the test is strict on all sides. Degenerate
/// rectangles have no handles.
pub fn handle_at(rect: &Rect, p: Point, handle_size: f64) -> Option<Handle> {
    if !rect.has_area() {
        return None;
    }
    let half = handle_size / 2.0;
    Handle::ALL.into_iter().find(|handle| {
        let a = handle.anchor(rect);
        p.x > a.x - half && p.x < a.x + half && p.y > a.y - half && p.y < a.y + half
    })
}

/// Pointer glyph shown over the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cursor {
    #[default]
    Default,
    Crosshair,
    Move,
    NwseResize,
    NeswResize,
    NsResize,
    EwResize,
}

impl Cursor {
    /// CSS `cursor` keyword.
    pub fn css_name(self) -> &'static str {
        match self {
            Cursor::Default => "default",
            Cursor::Crosshair => "crosshair",
            Cursor::Move => "move",
            Cursor::NwseResize => "nwse-resize",
            Cursor::NeswResize => "nesw-resize",
            Cursor::NsResize => "ns-resize",
            Cursor::EwResize => "ew-resize",
        }
    }
}

/// Cursor feedback for a hovering pointer: handle glyph, then move, then crosshair.
pub fn cursor_at(rect: &Rect, p: Point, handle_size: f64) -> Cursor {
    if let Some(handle) = handle_at(rect, p, handle_size) {
        handle.cursor()
    } else if rect.contains(p) {
        Cursor::Move
    } else {
        Cursor::Crosshair
    }
}

/// Map a pointer position from client (page) space to canvas pixels.
///
/// `element` is the canvas element's bounding box on the page; the canvas
/// may be displayed scaled by CSS. A zero-sized element leaves the scale at 1.
pub fn client_to_canvas(client: Point, element: &Rect, canvas: Size) -> Point {
    let scale_x = if element.width > 0.0 {
        canvas.width as f64 / element.width
    } else {
        1.0
    };
    let scale_y = if element.height > 0.0 {
        canvas.height as f64 / element.height
    } else {
        1.0
    };
    Point::new(
        (client.x - element.x) * scale_x,
        (client.y - element.y) * scale_y,
    )
}
