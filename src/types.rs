//! Shared geometry primitives and the per-agent intent vector.
//!
//! All coordinates are in tile units: tile `(x, y)` covers the half-open
//! square `[x, x+1) x [y, y+1)`. Agents and pickups are axis-aligned boxes
//! with sub-tile `f64` positions; projectiles are points.

use std::ops::{Add, Mul, Sub};

/// Agents are identified by their registration index, which never changes
/// for the lifetime of a match.
pub type AgentId = u32;

/// A 2D point/vector in tile units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (*other - *self).length()
    }

    /// Unit-length copy, or zero if the vector is (near) zero.
    pub fn normalized(&self) -> Point {
        let len = self.length();
        if len < 1e-9 {
            Point::default()
        } else {
            Point::new(self.x / len, self.y / len)
        }
    }

    /// The tile containing this point.
    pub fn tile(&self) -> (i32, i32) {
        (self.x.floor() as i32, self.y.floor() as i32)
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// An axis-aligned box: top-left corner plus size, both in tile units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub position: Point,
    pub size: Point,
}

impl Bounds {
    pub fn new(position: Point, size: Point) -> Self {
        Bounds { position, size }
    }

    /// Square bounds anchored at a tile corner.
    pub fn at_tile(tile: (i32, i32), side: f64) -> Self {
        Bounds::new(
            Point::new(tile.0 as f64, tile.1 as f64),
            Point::new(side, side),
        )
    }

    pub fn center(&self) -> Point {
        self.position + self.size * 0.5
    }

    /// Strict intersection test. A zero-area box overlaps nothing,
    /// including itself.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        let min_x = self.position.x.max(other.position.x);
        let min_y = self.position.y.max(other.position.y);
        let max_x = (self.position.x + self.size.x).min(other.position.x + other.size.x);
        let max_y = (self.position.y + self.size.y).min(other.position.y + other.size.y);
        max_x - min_x > 0.0 && max_y - min_y > 0.0
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.position.x
            && point.x < self.position.x + self.size.x
            && point.y >= self.position.y
            && point.y < self.position.y + self.size.y
    }

    /// Tiles covered by this box as half-open `x0..x1`, `y0..y1` ranges.
    pub fn covered_tiles(&self) -> (i32, i32, i32, i32) {
        let x0 = self.position.x.floor() as i32;
        let y0 = self.position.y.floor() as i32;
        let x1 = (self.position.x + self.size.x).ceil() as i32;
        let y1 = (self.position.y + self.size.y).ceil() as i32;
        (x0, x1, y0, y1)
    }
}

/// Samples the segment `from -> to` into an ordered run of points, dense
/// enough that no tile crossing can be skipped (at least
/// `config::SAMPLES_PER_TILE` samples per tile of travel). Both endpoints
/// are always included.
pub fn sample_segment(from: Point, to: Point) -> Vec<Point> {
    let delta = to - from;
    let span = delta.x.abs().max(delta.y.abs());
    let steps = ((span * crate::config::SAMPLES_PER_TILE).ceil() as usize).max(1);
    (0..=steps)
        .map(|i| from + delta * (i as f64 / steps as f64))
        .collect()
}

/// One agent's decoded input for a single step. Human intents arrive from
/// the input collaborator; AI intents are computed by the decision
/// procedure and any supplied intent is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Intent {
    /// Desired movement direction; normalized before use, zero means hold.
    pub move_dir: Point,
    /// World-space aim point (crosshair).
    pub aim: Point,
    pub fire: bool,
}

impl Intent {
    pub fn idle() -> Self {
        Intent::default()
    }
}
