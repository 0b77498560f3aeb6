//! Two-pad through-hole generator: axial and radial discretes.

use crate::error::{Error, Result};
use crate::geom::{Dim, Pt, Unit};
use crate::model::{Footprint, Overlay, PinGeometry, PinSpec, RefDes, Silk, ThruPin};
use crate::params::{self, KwSpec, KwSpecs};
use crate::render::WarnSink;
use crate::rules::{DrillRack, RulesDictionary};

use super::{standard_comments, Generator};

/// Two round through-hole pads on a horizontal centreline, with an
/// optional silk body rectangle between them.
pub struct Th2PadGenerator;

fn kwspecs() -> KwSpecs {
    let mut s = KwSpecs::new();
    s.insert("desc", KwSpec::required(None));
    s.insert("spacing", KwSpec::required(Some(Unit::Mil)));
    s.insert("drill", KwSpec::required(Some(Unit::Inch)));
    s.insert("dia", KwSpec::optional(Some(Unit::Mil)));
    s.insert("annulus", KwSpec::optional(Some(Unit::Mil)));
    s.insert("artwidth", KwSpec::optional(Some(Unit::Mil)));
    s.insert("artlen", KwSpec::optional(Some(Unit::Mil)));
    s
}

impl Generator for Th2PadGenerator {
    fn name(&self) -> &'static str {
        "th2pad"
    }

    fn helptext(&self) -> &'static str {
        "Through-hole, two-pad components.\n\
         th2pad desc=<s> dia=<mils> spacing=<mils> drill=<size, inches> artwidth=<mils> artlen=<mils>\n\
         th2pad desc=<s> annulus=[<mils>|lhsa|shsa|asa] spacing=<mils> drill=<size, inches> artwidth=<mils> artlen=<mils>\n\
         desc is a description string.\n\
         One of dia, pad diameter in mils, or annulus must be specified.\n\
         Annulus is size in mils over the drill chosen from the rack;\n\
         it may also name a dimensioned rule.\n\
         Spacing is the distance in mils between the two pad drill centres.\n\
         Drill size is in fractional inches, or a #NN designator; a drill\n\
         rack in force rounds it up to a stocked size.\n\
         artwidth/artlen give an optional silk rectangle; length is\n\
         calculated when artlen is omitted.\n\
         Rules referenced: maskrelief, minspace, minsilk, refdessize."
    }

    fn generate(
        &self,
        name: &str,
        params: &str,
        rules: &RulesDictionary,
        rack: &DrillRack,
        _warn: &mut WarnSink,
    ) -> Result<Footprint> {
        let p = params::parse(params, &kwspecs())?;
        let drill = rack.lookup(p.dim("drill")?);
        let diameter = if p.contains("dia") {
            p.dim("dia")?
        } else if p.contains("annulus") {
            let annulus = rules.symb(p.single("annulus")?)?;
            drill + annulus * 2.0
        } else {
            return Err(Error::syntax("Must specify one of 'dia' or 'annulus'."));
        };
        let maskrelief = rules.dim("maskrelief")?;
        let clearance = rules.dim("minspace")?;

        let geometry = PinGeometry::Thru(ThruPin::circle(
            drill,
            diameter,
            clearance,
            Overlay::Derived { bloat: maskrelief },
        )?);
        let halfwidth = p.dim("spacing")? / 2.0;
        let pin1 = PinSpec::new(Pt::xy0(-halfwidth), 1, geometry.clone());
        let pin2 = PinSpec::new(Pt::xy0(halfwidth), 2, geometry);

        let silkw = rules.dim("minsilk")?;
        let mut silk = Vec::new();
        let mut awhalf = Dim::mil(0.0);
        if let Some(artwidth) = p.opt_dim("artwidth")? {
            awhalf = artwidth / 2.0;
            let alhalf = match p.opt_dim("artlen")? {
                Some(artlen) => artlen / 2.0,
                None => halfwidth - (diameter + maskrelief + silkw * 1.5),
            };
            silk = Silk::box_outline(
                Pt::new(alhalf, awhalf),
                Pt::new(-alhalf, -awhalf),
                silkw,
            )?;
        }

        let comments = standard_comments(
            self.name(),
            &p,
            rules,
            &["maskrelief", "minspace", "minsilk", "refdessize"],
        );
        let silky = awhalf + Dim::mil(20.0);
        let refdes = RefDes::new(Pt::x0y(silky), silkw, rules.dim("refdessize")?)?;
        let mut fp = Footprint::new(name, p.text("desc")?, refdes);
        fp.add_pins([pin1, pin2])?;
        fp.silk = silk;
        fp.comments = comments;
        Ok(fp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(params: &str) -> Result<Footprint> {
        let rules = RulesDictionary::default_rules();
        let rack = DrillRack::default_rack();
        let mut sink = |_: &str| {};
        Th2PadGenerator.generate("R-400", params, &rules, &rack, &mut sink)
    }

    #[test]
    fn explicit_diameter_pads() {
        let fp = generate("desc=\"0.25W axial resistor\", spacing=400, drill=#60, dia=60")
            .unwrap();
        assert_eq!(fp.pins().len(), 2);
        assert_eq!(fp.description, "0.25W axial resistor");
        let p1 = &fp.pins()[0];
        let p2 = &fp.pins()[1];
        assert_eq!(p1.loc, Pt::mil(-200.0, 0.0));
        assert_eq!(p2.loc, Pt::mil(200.0, 0.0));
        match &p1.geometry {
            PinGeometry::Thru(t) => {
                // #60 is 0.040"; the default rack rounds up to 0.042".
                assert_eq!(t.hole().diameter, Dim::inch(0.042));
                assert!(t.symmetric());
            }
            other => panic!("expected through pin, got {other:?}"),
        }
    }

    #[test]
    fn annulus_diameter_follows_racked_drill() {
        let fp = generate("desc='cap', spacing=200, drill=0.036, annulus=10").unwrap();
        match &fp.pins()[0].geometry {
            PinGeometry::Thru(t) => {
                // 0.036" racks to 0.038"; 38 mil + 2*10 mil annulus.
                let dia = t.solder_land().aperture.thickness().unwrap();
                assert_eq!(dia, Dim::mil(58.0));
            }
            other => panic!("expected through pin, got {other:?}"),
        }
    }

    #[test]
    fn symbolic_annulus_resolves_through_rules() {
        let mut rules = RulesDictionary::default_rules();
        rules.set_dim("lhsa", Dim::mil(25.0));
        let rack = DrillRack::null();
        let mut sink = |_: &str| {};
        let fp = Th2PadGenerator
            .generate(
                "C-200",
                "desc='cap', spacing=200, drill=0.040, annulus=lhsa",
                &rules,
                &rack,
                &mut sink,
            )
            .unwrap();
        match &fp.pins()[0].geometry {
            PinGeometry::Thru(t) => {
                let dia = t.solder_land().aperture.thickness().unwrap();
                assert_eq!(dia, Dim::mil(90.0));
            }
            other => panic!("expected through pin, got {other:?}"),
        }
    }

    #[test]
    fn one_of_dia_or_annulus_required() {
        let err = generate("desc='r', spacing=400, drill=#60").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Parameter syntax error: Must specify one of 'dia' or 'annulus'."
        );
    }

    #[test]
    fn bare_annulus_keyword_is_a_clean_error() {
        let err = generate("desc='r' spacing=400 drill=#60 annulus").unwrap_err();
        assert!(err.to_string().contains("'annulus' given without a value"));
    }

    #[test]
    fn silk_box_only_with_artwidth() {
        let bare = generate("desc='r', spacing=400, drill=#60, dia=60").unwrap();
        assert!(bare.silk.is_empty());
        let boxed =
            generate("desc='r', spacing=400, drill=#60, dia=60, artwidth=100").unwrap();
        assert_eq!(boxed.silk.len(), 4);
        // Refdes rides above the artwork.
        assert_eq!(boxed.refdes.loc, Pt::mil(0.0, 70.0));
    }
}
