//! Dimension and point algebra.
//!
//! All linear measurements are [`dim::Dim`] values: canonically stored in
//! millimetres, tagged with a display unit that survives arithmetic.
//! [`point::Pt`] builds the 2-D vector algebra on top of that.

pub mod dim;
pub mod point;

pub use dim::{Dim, Unit};
pub use point::Pt;
