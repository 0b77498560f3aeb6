//! Copper flash shapes.
//!
//! Apertures follow the Gerber vocabulary: the standard circle, rectangle,
//! obround and regular-polygon shapes, plus macro apertures built from
//! primitive strokes. Backends accept whatever subset they can express and
//! refuse the rest at render time.

use crate::error::{Error, Result};
use crate::geom::{Dim, Pt};

/// A copper flash shape, dimensioned but not yet located.
#[derive(Debug, Clone, PartialEq)]
pub enum Aperture {
    /// A round flash.
    Circle { diameter: Dim },
    /// An axis-aligned rectangle.
    Rectangle { x: Dim, y: Dim },
    /// A stadium shape: a rectangle with semicircular short ends.
    Obround { x: Dim, y: Dim },
    /// A regular polygon inscribed in `diameter`, first vertex at
    /// `rotation` degrees.
    Polygon {
        diameter: Dim,
        vertices: u32,
        rotation: f64,
    },
    /// An aperture macro.
    Macro(Vec<MacroPrimitive>),
}

impl Aperture {
    /// A circle of positive diameter.
    pub fn circle(diameter: Dim) -> Result<Self> {
        if !diameter.is_positive() {
            return Err(Error::geometry("circle aperture needs a positive diameter"));
        }
        Ok(Self::Circle { diameter })
    }

    /// A rectangle with positive sides.
    pub fn rectangle(x: Dim, y: Dim) -> Result<Self> {
        if !x.is_positive() || !y.is_positive() {
            return Err(Error::geometry("rectangle aperture needs positive sides"));
        }
        Ok(Self::Rectangle { x, y })
    }

    /// A square with a positive side.
    pub fn square(side: Dim) -> Result<Self> {
        Self::rectangle(side, side)
    }

    /// An obround with positive sides.
    pub fn obround(x: Dim, y: Dim) -> Result<Self> {
        if !x.is_positive() || !y.is_positive() {
            return Err(Error::geometry("obround aperture needs positive sides"));
        }
        Ok(Self::Obround { x, y })
    }

    /// A regular polygon, 3 to 12 vertices, positive circumdiameter.
    pub fn polygon(diameter: Dim, vertices: u32, rotation: f64) -> Result<Self> {
        if !diameter.is_positive() {
            return Err(Error::geometry("polygon aperture needs a positive diameter"));
        }
        if !(3..=12).contains(&vertices) {
            return Err(Error::geometry("polygon aperture needs 3 to 12 vertices"));
        }
        Ok(Self::Polygon {
            diameter,
            vertices,
            rotation,
        })
    }

    /// True for circles.
    #[must_use]
    pub const fn is_circle(&self) -> bool {
        matches!(self, Self::Circle { .. })
    }

    /// True for rectangles with equal sides.
    #[must_use]
    pub fn is_square(&self) -> bool {
        matches!(self, Self::Rectangle { x, y } if x == y)
    }

    /// True for shapes most CAD formats express natively as a pin pad:
    /// circles and squares.
    #[must_use]
    pub fn is_simple(&self) -> bool {
        self.is_circle() || self.is_square()
    }

    /// Pen thickness of the shape: the diameter of a circle, the smaller
    /// side of a rectangle or obround. Polygon and macro apertures have no
    /// single thickness.
    #[must_use]
    pub fn thickness(&self) -> Option<Dim> {
        match self {
            Self::Circle { diameter } => Some(*diameter),
            Self::Rectangle { x, y } | Self::Obround { x, y } => {
                Some(if x < y { *x } else { *y })
            }
            Self::Polygon { .. } | Self::Macro(_) => None,
        }
    }

    /// Overall (x, y) extent. `None` for macro apertures, whose extent
    /// depends on the primitives.
    #[must_use]
    pub fn extent(&self) -> Option<(Dim, Dim)> {
        match self {
            Self::Circle { diameter } => Some((*diameter, *diameter)),
            Self::Rectangle { x, y } | Self::Obround { x, y } => Some((*x, *y)),
            Self::Polygon { diameter, .. } => Some((*diameter, *diameter)),
            Self::Macro(_) => None,
        }
    }

    /// Grows the shape uniformly by `bloat` on every edge. Macro and
    /// polygon apertures cannot be bloated.
    pub fn bloat(&self, bloat: Dim) -> Result<Self> {
        let grow = bloat * 2.0;
        match self {
            Self::Circle { diameter } => Self::circle(*diameter + grow),
            Self::Rectangle { x, y } => Self::rectangle(*x + grow, *y + grow),
            Self::Obround { x, y } => Self::obround(*x + grow, *y + grow),
            Self::Polygon { .. } => Err(Error::geometry("cannot bloat a polygon aperture")),
            Self::Macro(_) => Err(Error::geometry("cannot bloat a macro aperture")),
        }
    }

    /// A short shape name for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Circle { .. } => "circle",
            Self::Rectangle { .. } => "rectangle",
            Self::Obround { .. } => "obround",
            Self::Polygon { .. } => "polygon",
            Self::Macro(_) => "macro",
        }
    }
}

/// One stroke of an aperture macro, after the Gerber AM primitives.
#[derive(Debug, Clone, PartialEq)]
pub enum MacroPrimitive {
    Comment(String),
    Circle {
        exposure: bool,
        diameter: Dim,
        centre: Pt,
    },
    VectorLine {
        exposure: bool,
        width: Dim,
        start: Pt,
        end: Pt,
        rotation: f64,
    },
    CenterLine {
        exposure: bool,
        x: Dim,
        y: Dim,
        centre: Pt,
        rotation: f64,
    },
    LowerLeftLine {
        exposure: bool,
        x: Dim,
        y: Dim,
        lower_left: Pt,
        rotation: f64,
    },
    Outline {
        exposure: bool,
        vertices: Vec<Pt>,
        rotation: f64,
    },
    Polygon {
        exposure: bool,
        vertices: u32,
        centre: Pt,
        diameter: Dim,
        rotation: f64,
    },
    Moire {
        centre: Pt,
        outer_diameter: Dim,
        ring_thickness: Dim,
        ring_gap: Dim,
        max_rings: u32,
        crosshair_thickness: Dim,
        crosshair_length: Dim,
        rotation: f64,
    },
    Thermal {
        centre: Pt,
        outer_diameter: Dim,
        inner_diameter: Dim,
        gap: Dim,
        rotation: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_reject_non_positive_sizes() {
        assert!(Aperture::circle(Dim::mm(0.0)).is_err());
        assert!(Aperture::rectangle(Dim::mm(1.0), Dim::mm(-1.0)).is_err());
        assert!(Aperture::obround(Dim::mm(0.0), Dim::mm(1.0)).is_err());
        assert!(Aperture::polygon(Dim::mm(1.0), 2, 0.0).is_err());
    }

    #[test]
    fn squareness() {
        assert!(Aperture::square(Dim::mm(1.0)).unwrap().is_square());
        assert!(!Aperture::rectangle(Dim::mm(1.0), Dim::mm(2.0))
            .unwrap()
            .is_square());
        assert!(!Aperture::circle(Dim::mm(1.0)).unwrap().is_square());
    }

    #[test]
    fn thickness_is_smaller_side() {
        let a = Aperture::obround(Dim::mm(2.0), Dim::mm(0.5)).unwrap();
        assert_eq!(a.thickness(), Some(Dim::mm(0.5)));
        let c = Aperture::circle(Dim::mm(1.2)).unwrap();
        assert_eq!(c.thickness(), Some(Dim::mm(1.2)));
    }

    #[test]
    fn bloat_grows_both_sides() {
        let a = Aperture::rectangle(Dim::mm(1.0), Dim::mm(2.0)).unwrap();
        let b = a.bloat(Dim::mm(0.1)).unwrap();
        assert_eq!(b, Aperture::rectangle(Dim::mm(1.2), Dim::mm(2.2)).unwrap());
    }
}
