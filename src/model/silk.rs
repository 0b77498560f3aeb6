//! Silkscreen artwork and keep-out regions.

use crate::error::{Error, Result};
use crate::geom::{Dim, Pt};

/// A piece of silkscreen artwork.
#[derive(Debug, Clone, PartialEq)]
pub enum Silk {
    /// Text drawn on silk. Most backends place only the reference
    /// designator; free text survives as a comment where it cannot be
    /// drawn.
    Text {
        loc: Pt,
        text: String,
        pen: Dim,
        size: Dim,
        rotation: f64,
    },
    /// A straight stroke.
    Line { start: Pt, end: Pt, pen: Dim },
    /// A circular arc swept anticlockwise from `start_angle` through
    /// `arc_angle`, both in degrees.
    Arc {
        centre: Pt,
        radius: Dim,
        start_angle: f64,
        arc_angle: f64,
        pen: Dim,
    },
}

impl Silk {
    /// A text item with a positive pen and size.
    pub fn text(loc: Pt, text: impl Into<String>, pen: Dim, size: Dim) -> Result<Self> {
        if !pen.is_positive() {
            return Err(Error::geometry("silk pen width must be positive"));
        }
        if !size.is_positive() {
            return Err(Error::geometry("silk text size must be positive"));
        }
        Ok(Self::Text {
            loc,
            text: text.into(),
            pen,
            size,
            rotation: 0.0,
        })
    }

    /// A line with a positive pen.
    pub fn line(start: Pt, end: Pt, pen: Dim) -> Result<Self> {
        if !pen.is_positive() {
            return Err(Error::geometry("silk pen width must be positive"));
        }
        Ok(Self::Line { start, end, pen })
    }

    /// An arc with a positive pen and radius; angles must lie in
    /// 0 to 360 degrees.
    pub fn arc(centre: Pt, radius: Dim, start_angle: f64, arc_angle: f64, pen: Dim) -> Result<Self> {
        if !pen.is_positive() {
            return Err(Error::geometry("silk pen width must be positive"));
        }
        if !radius.is_positive() {
            return Err(Error::geometry("silk arc radius must be positive"));
        }
        if !(0.0..=360.0).contains(&start_angle) || !(0.0..=360.0).contains(&arc_angle) {
            return Err(Error::geometry("silk arc angles must lie in 0 to 360 degrees"));
        }
        Ok(Self::Arc {
            centre,
            radius,
            start_angle,
            arc_angle,
            pen,
        })
    }

    /// The four lines of an axis-aligned box.
    pub fn box_outline(corner1: Pt, corner2: Pt, pen: Dim) -> Result<Vec<Self>> {
        let (ll, ur) = corner1.rectify(corner2)?;
        let lr = Pt::new(ur.x, ll.y);
        let ul = Pt::new(ll.x, ur.y);
        Ok(vec![
            Self::line(ll, lr, pen)?,
            Self::line(lr, ur, pen)?,
            Self::line(ur, ul, pen)?,
            Self::line(ul, ll, pen)?,
        ])
    }
}

/// The reference-designator text of a footprint.
#[derive(Debug, Clone, PartialEq)]
pub struct RefDes {
    pub loc: Pt,
    pub pen: Dim,
    pub size: Dim,
    pub rotation: f64,
}

impl RefDes {
    /// A refdes with a positive pen and size.
    pub fn new(loc: Pt, pen: Dim, size: Dim) -> Result<Self> {
        if !pen.is_positive() || !size.is_positive() {
            return Err(Error::geometry("refdes pen and size must be positive"));
        }
        Ok(Self {
            loc,
            pen,
            size,
            rotation: 0.0,
        })
    }
}

/// An axis-aligned keep-out rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct KeepOutRect {
    pub ll: Pt,
    pub ur: Pt,
}

impl KeepOutRect {
    /// A keep-out from any two opposite corners.
    pub fn new(corner1: Pt, corner2: Pt) -> Result<Self> {
        let (ll, ur) = corner1.rectify(corner2)?;
        Ok(Self { ll, ur })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_pen_enforced() {
        assert!(Silk::line(Pt::origin(), Pt::mm(1.0, 0.0), Dim::mm(0.0)).is_err());
        assert!(Silk::text(Pt::origin(), "x", Dim::mil(10.0), Dim::mm(0.0)).is_err());
    }

    #[test]
    fn arc_angle_range_enforced() {
        assert!(Silk::arc(Pt::origin(), Dim::mm(1.0), 0.0, 180.0, Dim::mil(10.0)).is_ok());
        assert!(Silk::arc(Pt::origin(), Dim::mm(1.0), -10.0, 90.0, Dim::mil(10.0)).is_err());
        assert!(Silk::arc(Pt::origin(), Dim::mm(1.0), 0.0, 361.0, Dim::mil(10.0)).is_err());
    }

    #[test]
    fn box_outline_closes() {
        let lines = Silk::box_outline(Pt::mm(1.0, 1.0), Pt::mm(-1.0, -1.0), Dim::mil(10.0))
            .unwrap();
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn keepout_rectifies_corners() {
        let k = KeepOutRect::new(Pt::mm(2.0, -1.0), Pt::mm(-2.0, 1.0)).unwrap();
        assert_eq!(k.ll, Pt::mm(-2.0, -1.0));
        assert_eq!(k.ur, Pt::mm(2.0, 1.0));
    }
}
