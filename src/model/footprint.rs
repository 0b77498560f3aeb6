//! The assembled footprint.

use crate::error::{Error, Result};
use crate::model::pin::PinSpec;
use crate::model::silk::{KeepOutRect, RefDes, Silk};

/// A complete footprint: pins, silk artwork, comments and keep-outs,
/// ready for a backend to serialise.
#[derive(Debug, Clone)]
pub struct Footprint {
    pub name: String,
    pub description: String,
    pub refdes: RefDes,
    pins: Vec<PinSpec>,
    pub silk: Vec<Silk>,
    pub comments: Vec<String>,
    pub keepouts: Vec<KeepOutRect>,
}

impl Footprint {
    /// An empty footprint.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>, refdes: RefDes) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            refdes,
            pins: Vec::new(),
            silk: Vec::new(),
            comments: Vec::new(),
            keepouts: Vec::new(),
        }
    }

    /// Adds a pin; pin numbers must be unique within the footprint.
    pub fn add_pin(&mut self, pin: PinSpec) -> Result<()> {
        if self.pins.iter().any(|p| p.number == pin.number) {
            return Err(Error::DuplicatePin { number: pin.number });
        }
        self.pins.push(pin);
        Ok(())
    }

    /// Adds pins in order, enforcing number uniqueness.
    pub fn add_pins(&mut self, pins: impl IntoIterator<Item = PinSpec>) -> Result<()> {
        for pin in pins {
            self.add_pin(pin)?;
        }
        Ok(())
    }

    /// The pins, in insertion order.
    #[must_use]
    pub fn pins(&self) -> &[PinSpec] {
        &self.pins
    }
}
