/// Field coordinates, tile conversion and rectangle tests.

use crate::config::{HARPOON_REACH, HARPOON_THICKNESS, TILE_SIZE};

/// A position on the play field, in field units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A grid cell coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tile {
    pub x: i32,
    pub y: i32,
}

impl Tile {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Field position of the tile's top-left corner.
    pub fn origin(self) -> Vec2 {
        Vec2::new((self.x * TILE_SIZE) as f32, (self.y * TILE_SIZE) as f32)
    }
}

/// The tile containing a field position (floor division, so positions just
/// left of or above the field map to negative tiles).
pub fn to_tile(pos: Vec2) -> Tile {
    let size = TILE_SIZE as f32;
    Tile::new((pos.x / size).floor() as i32, (pos.y / size).floor() as i32)
}

/// Axis-aligned rectangle with non-negative extent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Build a rectangle from a corner and a signed extent; a negative width
    /// or height grows the rectangle left or up instead.
    pub fn normalized(x: f32, y: f32, w: f32, h: f32) -> Self {
        let (x, w) = if w < 0.0 { (x + w, -w) } else { (x, w) };
        let (y, h) = if h < 0.0 { (y + h, -h) } else { (y, h) };
        Self { x, y, w, h }
    }

    /// One-tile square whose top-left corner is `pos`.
    pub fn tile_square(pos: Vec2) -> Self {
        let size = TILE_SIZE as f32;
        Self::new(pos.x, pos.y, size, size)
    }

    /// Strict overlap: rectangles that only share an edge do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

/// Hit region of a harpoon thrown from the player at `pos` along `aim`.
///
/// The beam starts at the centre of the player's tile and reaches
/// `HARPOON_REACH` units along whichever axis `aim` points; a horizontal
/// aim wins if both components are set.
pub fn harpoon_rect(pos: Vec2, aim: Vec2) -> Rect {
    let half = (TILE_SIZE / 2) as f32;
    let cx = pos.x + half;
    let cy = pos.y + half;
    let side = HARPOON_THICKNESS / 2.0;
    if aim.x != 0.0 {
        Rect::normalized(cx, cy - side, aim.x * HARPOON_REACH, HARPOON_THICKNESS)
    } else {
        Rect::normalized(cx - side, cy, HARPOON_THICKNESS, aim.y * HARPOON_REACH)
    }
}
