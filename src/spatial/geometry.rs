//! Coordinate arithmetic and per-axis tiling against canvas bounds

use std::ops::{Add, Sub};

/// Signed pixel coordinate, also used for relative offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coord {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
}

impl Coord {
    /// Create a coordinate from its components
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared distance from the origin
    pub const fn norm_squared(self) -> i64 {
        let x = self.x as i64;
        let y = self.y as i64;
        x * x + y * y
    }

    /// Check whether the coordinate lies in `[0, width) x [0, height)`
    pub const fn within(self, width: usize, height: usize) -> bool {
        self.x >= 0 && self.y >= 0 && (self.x as usize) < width && (self.y as usize) < height
    }

    /// Row-major `(row, col)` index pair, if both components are non-negative
    pub const fn to_index(self) -> Option<(usize, usize)> {
        if self.x < 0 || self.y < 0 {
            None
        } else {
            Some((self.y as usize, self.x as usize))
        }
    }

    /// Coordinate of the `index`-th position of a row-major raster of `width` columns
    pub const fn from_raster_index(index: usize, width: usize) -> Self {
        if width == 0 {
            return Self::new(0, 0);
        }
        Self::new((index % width) as i32, (index / width) as i32)
    }
}

impl Add for Coord {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Coord {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Independent horizontal and vertical wrap-around flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tiling {
    /// Wrap along x
    pub horizontal: bool,
    /// Wrap along y
    pub vertical: bool,
}

impl Default for Tiling {
    fn default() -> Self {
        Self::BOTH
    }
}

impl Tiling {
    /// Wrap on both axes
    pub const BOTH: Self = Self {
        horizontal: true,
        vertical: true,
    };

    /// No wrapping at all
    pub const NONE: Self = Self {
        horizontal: false,
        vertical: false,
    };
}

// Wraps a single component into [0, extent); fails if out of range and not tiled.
const fn wrap_axis(value: &mut i32, tiled: bool, extent: usize) -> bool {
    let extent = extent as i32;
    if extent <= 0 {
        return false;
    }
    if *value >= 0 && *value < extent {
        return true;
    }
    if !tiled {
        return false;
    }
    *value = value.rem_euclid(extent);
    true
}

/// Bring `point` into `[0, width) x [0, height)`
///
/// Each tiled axis is wrapped modulo its extent. An out-of-range component on
/// an untiled axis makes the call fail; the point may then hold a partially
/// wrapped value and must be discarded by the caller.
pub const fn wrap_or_clip(point: &mut Coord, tiling: Tiling, width: usize, height: usize) -> bool {
    wrap_axis(&mut point.x, tiling.horizontal, width)
        && wrap_axis(&mut point.y, tiling.vertical, height)
}
