//! Backend-neutral footprint model.
//!
//! Generators build a [`Footprint`] out of these types; backends
//! serialise it. Everything here is CAD-format-agnostic: locations are
//! conventional mathematics coordinates (y up), dimensions carry their
//! display units, and mask or paste openings may remain symbolic
//! ([`Overlay::Derived`]) until a backend resolves them.

pub mod aperture;
pub mod footprint;
pub mod pin;
pub mod silk;

pub use aperture::{Aperture, MacroPrimitive};
pub use footprint::Footprint;
pub use pin::{
    CompLand, DrawnShape, Land, Overlay, PinGeometry, PinSpec, PlatedHole, SmtPad,
    ThermalPolygon, ThermalVia, ThruPin,
};
pub use silk::{KeepOutRect, RefDes, Silk};
