//! 2-D points built from a pair of dimensions.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::error::{Error, Result};
use crate::geom::dim::Dim;

/// An (x, y) point. Both coordinates are [`Dim`]s, so a point carries its
/// display units around like any other measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pt {
    /// X coordinate.
    pub x: Dim,
    /// Y coordinate.
    pub y: Dim,
}

impl Pt {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: Dim, y: Dim) -> Self {
        Self { x, y }
    }

    /// Creates a point from millimetre coordinates.
    #[must_use]
    pub const fn mm(x: f64, y: f64) -> Self {
        Self::new(Dim::mm(x), Dim::mm(y))
    }

    /// Creates a point from mil coordinates.
    #[must_use]
    pub fn mil(x: f64, y: f64) -> Self {
        Self::new(Dim::mil(x), Dim::mil(y))
    }

    /// Creates a point from inch coordinates.
    #[must_use]
    pub fn inch(x: f64, y: f64) -> Self {
        Self::new(Dim::inch(x), Dim::inch(y))
    }

    /// Creates `(x, 0)` with the zero matching x's display unit.
    #[must_use]
    pub fn xy0(x: Dim) -> Self {
        Self::new(x, x.zero_like())
    }

    /// Creates `(0, y)` with the zero matching y's display unit.
    #[must_use]
    pub fn x0y(y: Dim) -> Self {
        Self::new(y.zero_like(), y)
    }

    /// The origin, in millimetres.
    #[must_use]
    pub const fn origin() -> Self {
        Self::mm(0.0, 0.0)
    }

    /// Reflects over the X axis (negates y).
    #[must_use]
    pub fn reflect_x(&self) -> Self {
        Self::new(self.x, -self.y)
    }

    /// Reflects over the Y axis (negates x).
    #[must_use]
    pub fn reflect_y(&self) -> Self {
        Self::new(-self.x, self.y)
    }

    /// Swizzles two corners into a guaranteed (lower-left, upper-right)
    /// pair.
    ///
    /// Fails if the two points share an x or y coordinate, since then they
    /// do not span a rectangle.
    pub fn rectify(&self, other: Pt) -> Result<(Pt, Pt)> {
        if self.x == other.x || self.y == other.y {
            return Err(Error::geometry("points do not form a rectangle"));
        }
        let ll = Pt::new(self.x.min(other.x), self.y.min(other.y));
        let ur = Pt::new(self.x.max(other.x), self.y.max(other.y));
        Ok((ll, ur))
    }

    /// True if the rectangle defined by `self` and `other` strictly
    /// contains the origin. Used to check that a pad surrounds its own
    /// drill hole.
    pub fn spans_origin(&self, other: Pt) -> Result<bool> {
        let (ll, ur) = self.rectify(other)?;
        Ok(ll.x.as_mm() < 0.0 && ll.y.as_mm() < 0.0 && ur.x.as_mm() > 0.0 && ur.y.as_mm() > 0.0)
    }

    /// True if both points share the same x coordinate.
    #[must_use]
    pub fn aligned_x(&self, other: Pt) -> bool {
        self.x == other.x
    }

    /// True if both points share the same y coordinate.
    #[must_use]
    pub fn aligned_y(&self, other: Pt) -> bool {
        self.y == other.y
    }

    /// True if the segment to `other` is axis-parallel.
    #[must_use]
    pub fn orthonormal(&self, other: Pt) -> bool {
        self.aligned_x(other) || self.aligned_y(other)
    }

    /// Euclidean distance, carrying x's display unit.
    #[must_use]
    pub fn dist(&self, other: Pt) -> Dim {
        let dx = (self.x - other.x).as_mm();
        let dy = (self.y - other.y).as_mm();
        Dim::mm(dx.hypot(dy)).display_as(self.x.unit())
    }

    /// The smaller span of the rectangle defined by the two corners.
    pub fn min_span(&self, other: Pt) -> Result<Dim> {
        let (ll, ur) = self.rectify(other)?;
        Ok((ur.x - ll.x).min(ur.y - ll.y))
    }

    /// Rotates about the origin by `theta` radians.
    #[must_use]
    pub fn rotate(&self, theta: f64) -> Self {
        let (s, c) = theta.sin_cos();
        Self::new(self.x * c - self.y * s, self.x * s + self.y * c)
    }

    /// A row of `count` points starting at `start`, advancing by `step`.
    #[must_use]
    pub fn row(start: Pt, step: Pt, count: usize) -> Vec<Pt> {
        (0..count).map(|i| start + step * i as f64).collect()
    }

    /// A grid of `nx` columns by `ny` rows starting at `origin`, with the
    /// cell pitch given per axis by `step`. Column-major order.
    #[must_use]
    pub fn grid(origin: Pt, step: Pt, nx: usize, ny: usize) -> Vec<Pt> {
        let mut pts = Vec::with_capacity(nx * ny);
        for i in 0..nx {
            let head = origin + Pt::xy0(step.x) * i as f64;
            pts.extend(Self::row(head, Pt::x0y(step.y), ny));
        }
        pts
    }
}

impl PartialOrd for Pt {
    /// Componentwise order: a point compares smaller only when neither
    /// coordinate is larger. Points in mixed quadrants are unordered.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let x = self.x.partial_cmp(&other.x)?;
        let y = self.y.partial_cmp(&other.y)?;
        match (x, y) {
            (Ordering::Equal, o) | (o, Ordering::Equal) => Some(o),
            (a, b) if a == b => Some(a),
            _ => None,
        }
    }
}

impl fmt::Display for Pt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Pt {
    type Output = Pt;
    fn add(self, rhs: Pt) -> Pt {
        Pt::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Pt {
    type Output = Pt;
    fn sub(self, rhs: Pt) -> Pt {
        Pt::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Pt {
    type Output = Pt;
    fn neg(self) -> Pt {
        Pt::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Pt {
    type Output = Pt;
    fn mul(self, rhs: f64) -> Pt {
        Pt::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Pt {
    type Output = Pt;
    fn div(self, rhs: f64) -> Pt {
        Pt::new(self.x / rhs, self.y / rhs)
    }
}

/// Dim helpers used by rectify/min_span. `f64::min` semantics are fine
/// here since dimension values are never NaN in practice.
trait DimMinMax {
    fn min(self, other: Dim) -> Dim;
    fn max(self, other: Dim) -> Dim;
}

impl DimMinMax for Dim {
    fn min(self, other: Dim) -> Dim {
        if other < self { other.display_as(self.unit()) } else { self }
    }
    fn max(self, other: Dim) -> Dim {
        if other > self { other.display_as(self.unit()) } else { self }
    }
}
