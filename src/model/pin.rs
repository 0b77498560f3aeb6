//! Pin geometry: lands, holes, masks and their compositions.
//!
//! A pin's copper is described by [`Land`]s; the solder mask and paste
//! stencil openings are [`Overlay`]s that are either drawn explicitly or
//! derived from the owning land at render time. [`ThruPin`] models a
//! drilled pin whose component-side land normally mirrors the solder side,
//! [`SmtPad`] a single surface pad, and [`ThermalPolygon`] a large pad
//! with stitching vias.

use crate::error::{Error, Result};
use crate::geom::{Dim, Pt};
use crate::model::aperture::Aperture;

/// A mask or paste opening.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Overlay {
    /// No opening on this layer.
    #[default]
    None,
    /// Opening derived from the owning land, grown by `bloat` on every
    /// edge. A zero bloat copies the land outline exactly.
    Derived { bloat: Dim },
    /// An explicitly drawn opening.
    Drawn { aperture: Aperture, loc: Pt },
}

impl Overlay {
    /// Resolves the opening against its owning land's aperture. `None`
    /// for layers with no opening.
    pub fn resolve(&self, land: &Aperture) -> Result<Option<Aperture>> {
        match self {
            Self::None => Ok(None),
            Self::Derived { bloat } => land.bloat(*bloat).map(Some),
            Self::Drawn { aperture, .. } => Ok(Some(aperture.clone())),
        }
    }
}

/// A located copper flash with its clearance to surrounding copper.
#[derive(Debug, Clone, PartialEq)]
pub struct Land {
    pub aperture: Aperture,
    pub clearance: Dim,
    pub loc: Pt,
}

impl Land {
    /// A land from an existing aperture, at `loc`.
    #[must_use]
    pub const fn new(aperture: Aperture, clearance: Dim, loc: Pt) -> Self {
        Self {
            aperture,
            clearance,
            loc,
        }
    }

    /// A round land centred at `loc`.
    pub fn circle(diameter: Dim, clearance: Dim, loc: Pt) -> Result<Self> {
        Ok(Self::new(Aperture::circle(diameter)?, clearance, loc))
    }

    /// A square land centred at `loc`.
    pub fn square(side: Dim, clearance: Dim, loc: Pt) -> Result<Self> {
        Ok(Self::new(Aperture::square(side)?, clearance, loc))
    }

    /// A rectangular land centred at `loc`.
    pub fn rectangle(x: Dim, y: Dim, clearance: Dim, loc: Pt) -> Result<Self> {
        Ok(Self::new(Aperture::rectangle(x, y)?, clearance, loc))
    }

    /// An obround land centred at `loc`.
    pub fn obround(x: Dim, y: Dim, clearance: Dim, loc: Pt) -> Result<Self> {
        Ok(Self::new(Aperture::obround(x, y)?, clearance, loc))
    }
}

/// A plated-through hole, located relative to the pin origin.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatedHole {
    pub diameter: Dim,
    pub offset: Pt,
    /// Slot length for plated slots; `None` for a round hole.
    pub slot: Option<Dim>,
    /// Mask covers the hole entirely.
    pub tented: bool,
}

impl PlatedHole {
    /// A round hole of positive diameter.
    pub fn round(diameter: Dim) -> Result<Self> {
        if !diameter.is_positive() {
            return Err(Error::geometry("plated hole needs a positive diameter"));
        }
        Ok(Self {
            diameter,
            offset: Pt::origin(),
            slot: None,
            tented: false,
        })
    }
}

/// The component-side land of a [`ThruPin`]: either linked to the solder
/// side or drawn separately.
#[derive(Debug, Clone, PartialEq)]
pub enum CompLand {
    /// Mirrors the solder-side land.
    Linked,
    /// A separately drawn component-side land.
    Distinct(Land),
}

/// A drilled pin.
///
/// The component-side land links to the solder side until it is set to
/// something different; setting it back to an equal land restores the
/// link, so symmetry survives round trips through the setters.
#[derive(Debug, Clone, PartialEq)]
pub struct ThruPin {
    hole: PlatedHole,
    solder_land: Land,
    comp_land: CompLand,
    solder_mask: Overlay,
    comp_mask: Overlay,
}

impl ThruPin {
    /// A pin from explicit parts, with the same mask opening on both sides.
    #[must_use]
    pub fn new(hole: PlatedHole, solder_land: Land, mask: Overlay) -> Self {
        Self {
            hole,
            solder_land,
            comp_land: CompLand::Linked,
            comp_mask: mask.clone(),
            solder_mask: mask,
        }
    }

    /// A symmetric round pin.
    pub fn circle(drill: Dim, diameter: Dim, clearance: Dim, mask: Overlay) -> Result<Self> {
        let hole = PlatedHole::round(drill)?;
        let land = Land::circle(diameter, clearance, Pt::origin())?;
        Ok(Self::new(hole, land, mask))
    }

    /// A symmetric square pin, the usual pin-1 marker.
    pub fn square(drill: Dim, side: Dim, clearance: Dim, mask: Overlay) -> Result<Self> {
        let hole = PlatedHole::round(drill)?;
        let land = Land::square(side, clearance, Pt::origin())?;
        Ok(Self::new(hole, land, mask))
    }

    /// A pin with the solder-side land stretched into an obround offset by
    /// `stretch` from the hole, and a round component-side land of the
    /// obround's smaller extent.
    pub fn obround_solder(
        drill: Dim,
        x: Dim,
        y: Dim,
        stretch: Pt,
        clearance: Dim,
        mask: Overlay,
    ) -> Result<Self> {
        let hole = PlatedHole::round(drill)?;
        let solder = Land::obround(x, y, clearance, stretch)?;
        let round = if x < y { x } else { y };
        let comp = Land::circle(round, clearance, Pt::origin())?;
        let mut pin = Self::new(hole, solder, mask);
        pin.set_comp_land(comp);
        Ok(pin)
    }

    /// The hole.
    #[must_use]
    pub const fn hole(&self) -> &PlatedHole {
        &self.hole
    }

    /// The solder-side land.
    #[must_use]
    pub const fn solder_land(&self) -> &Land {
        &self.solder_land
    }

    /// The component-side land, resolving the link.
    #[must_use]
    pub fn comp_land(&self) -> &Land {
        match &self.comp_land {
            CompLand::Linked => &self.solder_land,
            CompLand::Distinct(land) => land,
        }
    }

    /// The solder-side mask opening.
    #[must_use]
    pub const fn solder_mask(&self) -> &Overlay {
        &self.solder_mask
    }

    /// The component-side mask opening.
    #[must_use]
    pub const fn comp_mask(&self) -> &Overlay {
        &self.comp_mask
    }

    /// True while both sides share one land.
    #[must_use]
    pub const fn symmetric(&self) -> bool {
        matches!(self.comp_land, CompLand::Linked)
    }

    /// Replaces the solder-side land. A linked component side keeps
    /// following it.
    pub fn set_solder_land(&mut self, land: Land) {
        self.solder_land = land;
    }

    /// Replaces the component-side land. Setting a land equal to the
    /// solder side re-establishes the link.
    pub fn set_comp_land(&mut self, land: Land) {
        if land == self.solder_land {
            self.comp_land = CompLand::Linked;
        } else {
            self.comp_land = CompLand::Distinct(land);
        }
    }

    /// Sets both mask openings.
    pub fn set_masks(&mut self, solder: Overlay, comp: Overlay) {
        self.solder_mask = solder;
        self.comp_mask = comp;
    }
}

/// A surface-mount pad.
#[derive(Debug, Clone, PartialEq)]
pub struct SmtPad {
    pub land: Land,
    pub paste: Overlay,
    pub mask: Overlay,
    pub on_back: bool,
}

impl SmtPad {
    /// A pad from a land, with paste copying the land and no mask opening.
    #[must_use]
    pub fn new(land: Land) -> Self {
        Self {
            land,
            paste: Overlay::Derived {
                bloat: Dim::mm(0.0),
            },
            mask: Overlay::None,
            on_back: false,
        }
    }

    /// An obround pad with a derived mask opening of `mask_bloat`.
    pub fn obround(clearance: Dim, x: Dim, y: Dim, mask_bloat: Dim) -> Result<Self> {
        let mut pad = Self::new(Land::obround(x, y, clearance, Pt::origin())?);
        pad.mask = Overlay::Derived { bloat: mask_bloat };
        Ok(pad)
    }

    /// A rectangular pad with a derived mask opening of `mask_bloat`.
    pub fn rectangle(clearance: Dim, x: Dim, y: Dim, mask_bloat: Dim) -> Result<Self> {
        let mut pad = Self::new(Land::rectangle(x, y, clearance, Pt::origin())?);
        pad.mask = Overlay::Derived { bloat: mask_bloat };
        Ok(pad)
    }

    /// A round pad with a derived mask opening of `mask_bloat`.
    pub fn circle(clearance: Dim, diameter: Dim, mask_bloat: Dim) -> Result<Self> {
        let mut pad = Self::new(Land::circle(diameter, clearance, Pt::origin())?);
        pad.mask = Overlay::Derived { bloat: mask_bloat };
        Ok(pad)
    }
}

/// A stitching via inside a thermal pad.
#[derive(Debug, Clone, PartialEq)]
pub struct ThermalVia {
    pub loc: Pt,
    pub drill: Dim,
}

/// An explicitly drawn shape on a mask or paste layer.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawnShape {
    pub aperture: Aperture,
    pub loc: Pt,
}

/// A large heat-sink pad with stitching vias and explicitly drawn mask and
/// paste openings.
#[derive(Debug, Clone, PartialEq)]
pub struct ThermalPolygon {
    pub land: Land,
    pub vias: Vec<ThermalVia>,
    pub masks: Vec<DrawnShape>,
    pub pastes: Vec<DrawnShape>,
    /// Copper on the back side under the vias, if any.
    pub back_land: Option<Land>,
}

impl ThermalPolygon {
    /// A rectangular thermal pad centred on the pin origin.
    ///
    /// `mask` gives the drawn anti-mask extent; `vias` gives a stitching
    /// grid as (columns, rows, drill), spread evenly over the copper.
    pub fn rectangle(
        x: Dim,
        y: Dim,
        clearance: Dim,
        mask: Option<(Dim, Dim)>,
        vias: Option<(usize, usize, Dim)>,
    ) -> Result<Self> {
        let land = Land::rectangle(x, y, clearance, Pt::origin())?;
        let masks = match mask {
            Some((mx, my)) => vec![DrawnShape {
                aperture: Aperture::rectangle(mx, my)?,
                loc: Pt::origin(),
            }],
            None => Vec::new(),
        };
        let vias = match vias {
            Some((nx, ny, drill)) => {
                if nx == 0 || ny == 0 {
                    return Err(Error::geometry("thermal via grid needs at least one via"));
                }
                if !drill.is_positive() {
                    return Err(Error::geometry("thermal via drill must be positive"));
                }
                let ll = Pt::new(-x / 2.0, -y / 2.0);
                let step = Pt::new(x / nx as f64, y / ny as f64);
                let first = ll + step / 2.0;
                Pt::grid(first, step, nx, ny)
                    .into_iter()
                    .map(|loc| ThermalVia { loc, drill })
                    .collect()
            }
            None => Vec::new(),
        };
        Ok(Self {
            land,
            vias,
            masks,
            pastes: Vec::new(),
            back_land: None,
        })
    }
}

/// Pin geometry: any of the three pin families.
#[derive(Debug, Clone, PartialEq)]
pub enum PinGeometry {
    Thru(ThruPin),
    Smt(SmtPad),
    Thermal(ThermalPolygon),
}

/// A numbered pin placed in the footprint.
#[derive(Debug, Clone, PartialEq)]
pub struct PinSpec {
    pub loc: Pt,
    pub number: u32,
    pub geometry: PinGeometry,
    /// Rotation about the pin location, degrees.
    pub rotation: f64,
    name: Option<String>,
}

impl PinSpec {
    /// A pin named by its number.
    #[must_use]
    pub const fn new(loc: Pt, number: u32, geometry: PinGeometry) -> Self {
        Self {
            loc,
            number,
            geometry,
            rotation: 0.0,
            name: None,
        }
    }

    /// A pin with an explicit name.
    #[must_use]
    pub fn named(loc: Pt, number: u32, geometry: PinGeometry, name: impl Into<String>) -> Self {
        Self {
            loc,
            number,
            geometry,
            rotation: 0.0,
            name: Some(name.into()),
        }
    }

    /// The pin name, defaulting to the number.
    #[must_use]
    pub fn name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| self.number.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_pin() -> ThruPin {
        ThruPin::circle(
            Dim::inch(0.035),
            Dim::mil(60.0),
            Dim::mil(8.0),
            Overlay::Derived {
                bloat: Dim::mil(4.0),
            },
        )
        .unwrap()
    }

    #[test]
    fn new_pin_is_symmetric() {
        let pin = round_pin();
        assert!(pin.symmetric());
        assert_eq!(pin.comp_land(), pin.solder_land());
    }

    #[test]
    fn distinct_comp_land_breaks_symmetry() {
        let mut pin = round_pin();
        let square = Land::square(Dim::mil(60.0), Dim::mil(8.0), Pt::origin()).unwrap();
        pin.set_comp_land(square.clone());
        assert!(!pin.symmetric());
        assert_eq!(pin.comp_land(), &square);
    }

    #[test]
    fn equal_comp_land_restores_symmetry() {
        let mut pin = round_pin();
        let square = Land::square(Dim::mil(60.0), Dim::mil(8.0), Pt::origin()).unwrap();
        pin.set_comp_land(square);
        pin.set_comp_land(pin.solder_land().clone());
        assert!(pin.symmetric());
    }

    #[test]
    fn linked_comp_land_follows_solder_land() {
        let mut pin = round_pin();
        let bigger = Land::circle(Dim::mil(70.0), Dim::mil(8.0), Pt::origin()).unwrap();
        pin.set_solder_land(bigger.clone());
        assert!(pin.symmetric());
        assert_eq!(pin.comp_land(), &bigger);
    }

    #[test]
    fn obround_solder_pin_is_asymmetric() {
        let pin = ThruPin::obround_solder(
            Dim::inch(0.035),
            Dim::mil(60.0),
            Dim::mil(100.0),
            Pt::mil(0.0, 20.0),
            Dim::mil(8.0),
            Overlay::Derived {
                bloat: Dim::mil(4.0),
            },
        )
        .unwrap();
        assert!(!pin.symmetric());
        assert!(pin.comp_land().aperture.is_circle());
        assert_eq!(pin.solder_land().loc, Pt::mil(0.0, 20.0));
    }

    #[test]
    fn derived_overlay_resolves_against_land() {
        let land = Aperture::circle(Dim::mil(60.0)).unwrap();
        let mask = Overlay::Derived {
            bloat: Dim::mil(4.0),
        };
        let opened = mask.resolve(&land).unwrap().unwrap();
        assert_eq!(opened, Aperture::circle(Dim::mil(68.0)).unwrap());
        assert_eq!(Overlay::None.resolve(&land).unwrap(), None);
    }

    #[test]
    fn thermal_rectangle_spreads_vias() {
        let t = ThermalPolygon::rectangle(
            Dim::mm(4.0),
            Dim::mm(4.0),
            Dim::mm(0.2),
            Some((Dim::mm(3.6), Dim::mm(3.6))),
            Some((2, 2, Dim::mm(0.3))),
        )
        .unwrap();
        assert_eq!(t.vias.len(), 4);
        assert_eq!(t.masks.len(), 1);
        assert_eq!(t.vias[0].loc, Pt::mm(-1.0, -1.0));
        assert_eq!(t.vias[3].loc, Pt::mm(1.0, 1.0));
    }

    #[test]
    fn pin_name_defaults_to_number() {
        let pin = PinSpec::new(Pt::origin(), 7, PinGeometry::Thru(round_pin()));
        assert_eq!(pin.name(), "7");
        let named = PinSpec::named(Pt::origin(), 9, PinGeometry::Thru(round_pin()), "THRM");
        assert_eq!(named.name(), "THRM");
    }
}
