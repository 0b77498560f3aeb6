//! Keyword-parameter language.
//!
//! Footprint generators are driven by a small parameter language of the
//! form `keyword [= value [, value]*] ...`, for example:
//!
//! ```text
//! pins=8, padlen=1mm, padwidth=0.4mm, pitch=0.65mm, span=6mm, pkglen=5mm
//! ```
//!
//! [`lexer`] tokenises the string, [`parser`] validates it against the
//! generator's declared keyword specifications and yields a [`ParamMap`]
//! of typed values.

pub mod lexer;
pub mod parser;

use std::fmt;

use crate::geom::Dim;

pub use parser::{parse, KwSpec, KwSpecs, ParamMap};

/// A parsed parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A dimensioned value: the number carried an explicit unit or drill
    /// designator, or a default unit applied.
    Dim(Dim),
    /// A bare number where no unit applies (counts, ratios).
    Num(f64),
    /// Text, quoted or bare.
    Text(String),
}

impl Value {
    /// Returns the dimension, if this is one.
    #[must_use]
    pub const fn as_dim(&self) -> Option<Dim> {
        match self {
            Self::Dim(d) => Some(*d),
            _ => None,
        }
    }

    /// Returns the bare number, if this is one.
    #[must_use]
    pub const fn as_num(&self) -> Option<f64> {
        match self {
            Self::Num(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the text, if this is one.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dim(d) => d.fmt(f),
            Self::Num(n) => n.fmt(f),
            Self::Text(s) => f.write_str(s),
        }
    }
}
