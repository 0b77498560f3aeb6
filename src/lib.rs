//! landgen: compiles keyword parameter strings into PCB land patterns
//!
//! A footprint is produced in three stages:
//!
//! 1. A [`generators`] plugin parses a parameter string such as
//!    `pins=8, padlen=1mm, padwidth=0.4mm, pitch=0.65mm, span=6mm, pkglen=5mm`
//!    against its declared keywords.
//! 2. The generator assembles a CAD-neutral [`model::Footprint`] from the
//!    parameters, the active design [`rules`] and the drill rack.
//! 3. A [`render`] backend serialises the model into one CAD text format.
//!
//! # Modules
//!
//! - [`geom`]: dimension and point algebra
//! - [`rules`]: design-rule dictionary and drill racks
//! - [`params`]: the keyword-parameter language
//! - [`model`]: the backend-neutral footprint model
//! - [`generators`]: footprint families
//! - [`render`]: output backends (gEDA PCB, KiCad)
//! - [`config`]: rules/rack configuration files
//! - [`error`]: error types

pub mod config;
pub mod error;
pub mod generators;
pub mod geom;
pub mod model;
pub mod params;
pub mod render;
pub mod rules;

pub use error::{ConfigError, Error, Result};
pub use generators::{Generator, GeneratorRegistry};
pub use geom::{Dim, Pt, Unit};
pub use model::Footprint;
pub use render::{Backend, BackendRegistry};
pub use rules::{DrillRack, RulesDictionary};
