//! Planar coordinate type and the geometric primitives the engine needs.
//!
//! Positions are plain Cartesian `f64` pairs in "length units" — the same
//! units edge lengths and agent speeds are expressed in.  The engine never
//! needs geographic projections; an editor that works in lat/lon is expected
//! to project before loading a map.

/// A 2-D position or displacement in length units.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Vec2) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Linear interpolation from `self` to `other`; `t` is clamped to [0, 1].
    pub fn lerp(self, other: Vec2, t: f64) -> Vec2 {
        let t = t.clamp(0.0, 1.0);
        Vec2 {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// Shortest distance from `self` to the segment `a`–`b`.
    ///
    /// Degenerate segments (`a == b`) fall back to point distance.  Used to
    /// map beacons onto their nearest road edge.
    pub fn segment_distance(self, a: Vec2, b: Vec2) -> f64 {
        let abx = b.x - a.x;
        let aby = b.y - a.y;
        let len2 = abx * abx + aby * aby;
        if len2 == 0.0 {
            return self.distance(a);
        }
        let t = (((self.x - a.x) * abx + (self.y - a.y) * aby) / len2).clamp(0.0, 1.0);
        self.distance(Vec2 {
            x: a.x + abx * t,
            y: a.y + aby * t,
        })
    }
}

impl std::fmt::Display for Vec2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}
