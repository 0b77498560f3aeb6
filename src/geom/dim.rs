//! Linear dimension carrying a preferred display unit.
//!
//! The canonical representation is always millimetres; the display unit is
//! used only for presentation and for coercing bare numbers in mixed-operand
//! arithmetic. Because of that, arithmetic never unit-scales the stored
//! value.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::error::{Error, Result};
use crate::rules::rack;

/// Millimetres per mil (1/1000 inch).
pub const MM_PER_MIL: f64 = 0.0254;

/// Display unit for a [`Dim`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unit {
    /// Millimetres.
    #[default]
    Mm,
    /// Mils (thousandths of an inch).
    Mil,
    /// Inches.
    Inch,
}

impl Unit {
    /// Parses a unit keyword. Accepts `mm`, `mil`, `thou`, `inch`, `in`.
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "mm" => Ok(Self::Mm),
            "mil" | "thou" => Ok(Self::Mil),
            "inch" | "in" => Ok(Self::Inch),
            other => Err(Error::value(format!(
                "'{other}' is not a valid display unit"
            ))),
        }
    }

    /// Returns the unit keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mm => "mm",
            Self::Mil => "mil",
            Self::Inch => "inch",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A linear dimension: canonical millimetre value plus display unit.
///
/// Arithmetic between two `Dim`s yields a result carrying the *left*
/// operand's display unit. Arithmetic with a bare `f64` interprets the
/// number in the left operand's display unit before combining. Equality
/// and ordering compare canonical millimetre values only.
#[derive(Debug, Clone, Copy)]
pub struct Dim {
    mm: f64,
    unit: Unit,
}

impl Dim {
    /// Constructs from millimetres.
    #[must_use]
    pub const fn mm(v: f64) -> Self {
        Self { mm: v, unit: Unit::Mm }
    }

    /// Constructs from mils.
    #[must_use]
    pub fn mil(v: f64) -> Self {
        Self {
            mm: v * MM_PER_MIL,
            unit: Unit::Mil,
        }
    }

    /// Constructs from inches.
    #[must_use]
    pub fn inch(v: f64) -> Self {
        Self {
            mm: v * MM_PER_MIL * 1000.0,
            unit: Unit::Inch,
        }
    }

    /// Constructs from a value expressed in the given display unit.
    #[must_use]
    pub fn with_unit(v: f64, unit: Unit) -> Self {
        match unit {
            Unit::Mm => Self::mm(v),
            Unit::Mil => Self::mil(v),
            Unit::Inch => Self::inch(v),
        }
    }

    /// Constructs from a `#NN` / `#letter` standard drill designator.
    pub fn from_drill_code(code: &str) -> Result<Self> {
        rack::reference_drill(code).ok_or_else(|| Error::drill_not_found(code))
    }

    /// Constructs from a string of the form `<number><optional unit>` or a
    /// drill designator.
    ///
    /// A bare number is accepted only when `default_unit` supplies the unit.
    pub fn parse(s: &str, default_unit: Option<Unit>) -> Result<Self> {
        let s = s.trim();
        if s.starts_with('#') {
            return Self::from_drill_code(s);
        }
        let digits_end = s
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(s.len());
        let (num, rest) = s.split_at(digits_end);
        let v: f64 = num
            .parse()
            .map_err(|_| Error::value(format!("'{s}' not convertible to a dimension")))?;
        let rest = rest.trim();
        let unit = if rest.is_empty() {
            default_unit.ok_or_else(|| {
                Error::value(format!("'{s}' has no unit and no default unit applies"))
            })?
        } else {
            Unit::parse(rest)
                .map_err(|_| Error::value(format!("'{s}' not convertible to a dimension")))?
        };
        Ok(Self::with_unit(v, unit))
    }

    /// Canonical value in millimetres.
    #[must_use]
    pub const fn as_mm(&self) -> f64 {
        self.mm
    }

    /// Value in mils.
    #[must_use]
    pub fn as_mil(&self) -> f64 {
        self.mm / MM_PER_MIL
    }

    /// Value in inches.
    #[must_use]
    pub fn as_inch(&self) -> f64 {
        self.as_mil() / 1000.0
    }

    /// Value in centimils (1/100,000 inch), the gEDA/PCB file unit.
    #[must_use]
    pub fn centimils(&self) -> i64 {
        (self.as_mil() * 100.0).round() as i64
    }

    /// The display unit tag.
    #[must_use]
    pub const fn unit(&self) -> Unit {
        self.unit
    }

    /// Returns the same canonical value retagged with another display unit.
    #[must_use]
    pub const fn display_as(&self, unit: Unit) -> Self {
        Self { mm: self.mm, unit }
    }

    /// A zero with the same display unit.
    #[must_use]
    pub const fn zero_like(&self) -> Self {
        Self { mm: 0.0, unit: self.unit }
    }

    /// Returns `(self - other, self + other)`.
    #[must_use]
    pub fn minus_plus(&self, other: Dim) -> (Dim, Dim) {
        (*self - other, *self + other)
    }

    /// Absolute value, same display unit.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self {
            mm: self.mm.abs(),
            unit: self.unit,
        }
    }

    /// True for values greater than zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.mm > 0.0
    }

    fn display_value(&self) -> f64 {
        match self.unit {
            Unit::Mm => self.mm,
            Unit::Mil => self.as_mil(),
            Unit::Inch => self.as_inch(),
        }
    }
}

impl fmt::Display for Dim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Round away float noise before display; dimensions are never
        // meaningful below a hundred-thousandth of a unit.
        let v = (self.display_value() * 1e5).round() / 1e5;
        write!(f, "{} {}", v, self.unit)
    }
}

impl PartialEq for Dim {
    fn eq(&self, other: &Self) -> bool {
        self.mm == other.mm
    }
}

impl PartialOrd for Dim {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.mm.partial_cmp(&other.mm)
    }
}

impl Add for Dim {
    type Output = Dim;
    fn add(self, rhs: Dim) -> Dim {
        Dim {
            mm: self.mm + rhs.mm,
            unit: self.unit,
        }
    }
}

impl Sub for Dim {
    type Output = Dim;
    fn sub(self, rhs: Dim) -> Dim {
        Dim {
            mm: self.mm - rhs.mm,
            unit: self.unit,
        }
    }
}

impl Add<f64> for Dim {
    type Output = Dim;
    fn add(self, rhs: f64) -> Dim {
        self + Dim::with_unit(rhs, self.unit)
    }
}

impl Sub<f64> for Dim {
    type Output = Dim;
    fn sub(self, rhs: f64) -> Dim {
        self - Dim::with_unit(rhs, self.unit)
    }
}

impl Mul<f64> for Dim {
    type Output = Dim;
    fn mul(self, rhs: f64) -> Dim {
        Dim {
            mm: self.mm * rhs,
            unit: self.unit,
        }
    }
}

impl Div<f64> for Dim {
    type Output = Dim;
    fn div(self, rhs: f64) -> Dim {
        Dim {
            mm: self.mm / rhs,
            unit: self.unit,
        }
    }
}

impl Neg for Dim {
    type Output = Dim;
    fn neg(self) -> Dim {
        Dim {
            mm: -self.mm,
            unit: self.unit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn unit_round_trips_preserve_canonical_value() {
        let a = Dim::mm(1.27);
        assert!((Dim::mil(a.as_mil()).as_mm() - 1.27).abs() < EPS);
        assert!((Dim::inch(a.as_inch()).as_mm() - 1.27).abs() < EPS);

        let b = Dim::mil(100.0);
        assert!((Dim::mm(b.as_mm()).as_mil() - 100.0).abs() < EPS);
    }

    #[test]
    fn arithmetic_takes_left_operand_unit() {
        let a = Dim::mil(100.0);
        let b = Dim::mm(1.0);
        let c = a + b;
        assert_eq!(c.unit(), Unit::Mil);
        assert!((c.as_mm() - (2.54 + 1.0)).abs() < EPS);
    }

    #[test]
    fn scalar_operand_coerced_into_left_unit() {
        let a = Dim::mil(10.0);
        let b = a + 5.0;
        assert!((b.as_mil() - 15.0).abs() < EPS);

        let c = Dim::mm(1.0) - 0.5;
        assert!((c.as_mm() - 0.5).abs() < EPS);
    }

    #[test]
    fn comparison_is_on_canonical_millimetres() {
        assert_eq!(Dim::mil(1000.0), Dim::inch(1.0));
        assert!(Dim::mm(1.0) < Dim::mil(100.0));
        assert!(Dim::inch(0.1) > Dim::mm(2.0));
    }

    #[test]
    fn parse_number_with_unit() {
        assert_eq!(Dim::parse("2.54mm", None).unwrap(), Dim::mm(2.54));
        assert_eq!(Dim::parse("100 mil", None).unwrap(), Dim::mil(100.0));
        assert_eq!(Dim::parse("0.1in", None).unwrap(), Dim::inch(0.1));
        assert_eq!(Dim::parse("10", Some(Unit::Mil)).unwrap(), Dim::mil(10.0));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Dim::parse("10", None).is_err());
        assert!(Dim::parse("abc", None).is_err());
        assert!(Dim::parse("10furlong", None).is_err());
    }

    #[test]
    fn parse_drill_designator() {
        let d = Dim::parse("#60", None).unwrap();
        assert!((d.as_inch() - 0.040).abs() < EPS);
        assert!(Dim::parse("#999", None).is_err());
    }

    #[test]
    fn centimils_is_rounded_integer() {
        assert_eq!(Dim::mil(10.0).centimils(), 1000);
        assert_eq!(Dim::mm(0.65).centimils(), 2559);
    }

    #[test]
    fn display_uses_display_unit() {
        assert_eq!(Dim::mil(10.0).to_string(), "10 mil");
        assert_eq!(Dim::mm(0.65).to_string(), "0.65 mm");
        assert!(Dim::mm(1.0).display_as(Unit::Inch).to_string().contains("inch"));
    }

    #[test]
    fn minus_plus() {
        let (lo, hi) = Dim::mm(10.0).minus_plus(Dim::mm(1.0));
        assert_eq!(lo, Dim::mm(9.0));
        assert_eq!(hi, Dim::mm(11.0));
    }
}
