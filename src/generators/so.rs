//! SO, TSSOP, HSOP gull-wing family generator.

use crate::error::{Error, Result};
use crate::geom::{Dim, Pt, Unit};
use crate::model::{Footprint, PinGeometry, PinSpec, RefDes, Silk, SmtPad, ThermalPolygon};
use crate::params::{self, KwSpec, KwSpecs, ParamMap, Value};
use crate::render::WarnSink;
use crate::rules::{DrillRack, RulesDictionary};

use super::{dil_layout, standard_comments, Generator};

/// Small-outline package generator: two facing rows of gull-wing pads,
/// optionally with an exposed thermal pad and stitching vias.
pub struct SoGenerator;

fn kwspecs() -> KwSpecs {
    let mut s = KwSpecs::new();
    s.insert("pins", KwSpec::required(None));
    s.insert("padlen", KwSpec::required(Some(Unit::Mm)));
    s.insert("padwidth", KwSpec::required(Some(Unit::Mm)));
    s.insert("pitch", KwSpec::required(Some(Unit::Mm)));
    s.insert("span", KwSpec::required(Some(Unit::Mm)));
    s.insert("pkglen", KwSpec::required(Some(Unit::Mm)));
    s.insert("thermal", KwSpec::optional_multi(Some(Unit::Mm)));
    s.insert("thermalexp", KwSpec::optional_multi(Some(Unit::Mm)));
    s.insert("vias", KwSpec::optional_multi(None));
    s.insert("viadrill", KwSpec::optional(Some(Unit::Mm)));
    s.insert("clearance", KwSpec::optional(Some(Unit::Mm)));
    s.insert("mask", KwSpec::optional(Some(Unit::Mm)));
    s
}

impl Generator for SoGenerator {
    fn name(&self) -> &'static str {
        "so"
    }

    fn helptext(&self) -> &'static str {
        "SO, TSSOP, HSOP family.\n\
         Default dimensions are mm.\n\
         pins=<n> -- number of gull-wing pins.\n\
         padlen=<dim> -- length of pin pads.\n\
         padwidth=<dim> -- width of pin pads.\n\
         pitch=<dim> -- distance between pin centrelines.\n\
         span=<dim> -- wing-span of pin pads, tip-to-tip.\n\
         pkglen=<dim> -- length of package (for silk).\n\
         thermal=<width>,<length> -- thermal pad, assigned number <pins>+1.\n\
         thermalexp=<width>,<length> -- thermal pad exposure.\n\
         vias=<nw>,<nl> -- number of stitching vias across width/length.\n\
         viadrill=<dim> -- drill size for vias.\n\
         clearance=<dim> -- optional pad clearance.\n\
         mask=<dim> -- optional mask relief."
    }

    fn generate(
        &self,
        name: &str,
        params: &str,
        rules: &RulesDictionary,
        _rack: &DrillRack,
        warn: &mut WarnSink,
    ) -> Result<Footprint> {
        let p = params::parse(params, &kwspecs())?;
        let pins = pin_count(&p)?;
        let padlen = p.dim("padlen")?;
        let padwidth = p.dim("padwidth")?;
        let pitch = p.dim("pitch")?;
        let span = p.dim("span")?;
        let pkglen = p.dim("pkglen")?;
        let mask = match p.opt_dim("mask")? {
            Some(m) => m,
            None => rules.dim("maskrelief")?,
        };
        let clearance = match p.opt_dim("clearance")? {
            Some(c) => c,
            None => rules.dim("minspace")?,
        };

        let geometry =
            PinGeometry::Smt(SmtPad::obround(clearance, padlen, padwidth, mask)?);
        let mut pin_specs = dil_layout(pins, span - padwidth, pitch, geometry, None)?;

        if p.contains("thermal") {
            let (cu_x, cu_y) = dim_pair(&p, "thermal")?;
            let exposure = if p.contains("thermalexp") {
                Some(dim_pair(&p, "thermalexp")?)
            } else {
                warn("No thermal anti-mask specified.");
                None
            };
            let vias = if p.contains("vias") {
                let (nx, ny) = via_counts(&p)?;
                let drill = p
                    .opt_dim("viadrill")?
                    .ok_or_else(|| Error::syntax("No via drill specified."))?;
                Some((nx, ny, drill))
            } else {
                None
            };
            let thermal = ThermalPolygon::rectangle(cu_x, cu_y, clearance, exposure, vias)?;
            pin_specs.push(PinSpec::named(
                Pt::origin(),
                pins + 1,
                PinGeometry::Thermal(thermal),
                "THRM",
            ));
        }

        // Silk body outline inset past the pads, with the pin-1 end marked
        // by a semicircular notch.
        let silkwidth = rules.dim("minsilk")?;
        let silkx = (span / 2.0 - padlen) - silkwidth;
        let silky = pkglen / 2.0;
        let mut silk = Silk::box_outline(Pt::new(silkx, silky), Pt::new(-silkx, -silky), silkwidth)?;
        silk.push(Silk::arc(
            Pt::x0y(silky),
            silkx / 5.0,
            0.0,
            180.0,
            silkwidth,
        )?);

        let comments = standard_comments(
            self.name(),
            &p,
            rules,
            &["maskrelief", "minspace", "minsilk", "refdessize"],
        );
        let refdes = RefDes::new(Pt::origin(), rules.dim("minsilk")?, rules.dim("refdessize")?)?;
        let mut fp = Footprint::new(name, "", refdes);
        fp.add_pins(pin_specs)?;
        fp.silk = silk;
        fp.comments = comments;
        Ok(fp)
    }
}

fn pin_count(p: &ParamMap) -> Result<u32> {
    let n = p.num("pins")?;
    if n.fract() != 0.0 || n <= 0.0 {
        return Err(Error::value("'pins' must be a positive integer"));
    }
    let n = n as u32;
    if n % 2 != 0 {
        return Err(Error::syntax("Must have even number of pins."));
    }
    Ok(n)
}

fn dim_pair(p: &ParamMap, name: &str) -> Result<(Dim, Dim)> {
    let values = p.values(name);
    let dims: Vec<Dim> = values.iter().filter_map(Value::as_dim).collect();
    if dims.len() != 2 || values.len() != 2 {
        return Err(Error::syntax(format!(
            "'{name}' needs a width,length dimension pair"
        )));
    }
    Ok((dims[0], dims[1]))
}

fn via_counts(p: &ParamMap) -> Result<(usize, usize)> {
    let values = p.values("vias");
    let counts: Vec<usize> = values
        .iter()
        .filter_map(Value::as_num)
        .filter(|n| n.fract() == 0.0 && *n > 0.0)
        .map(|n| n as usize)
        .collect();
    if counts.len() != 2 || values.len() != 2 {
        return Err(Error::syntax(
            "Expected width,length count for drill field.",
        ));
    }
    Ok((counts[0], counts[1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARAMS: &str = "pins=8, padlen=1mm, padwidth=0.4mm, pitch=0.65mm, span=6mm, pkglen=5mm";

    fn generate(params: &str) -> Result<(Footprint, Vec<String>)> {
        let rules = RulesDictionary::default_rules();
        let rack = DrillRack::default_rack();
        let mut warnings = Vec::new();
        let mut sink = |w: &str| warnings.push(w.to_string());
        let fp = SoGenerator.generate("SO8", params, &rules, &rack, &mut sink)?;
        Ok((fp, warnings))
    }

    #[test]
    fn eight_pin_body() {
        let (fp, warnings) = generate(PARAMS).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(fp.pins().len(), 8);
        // All pins share one SMT geometry.
        let first = &fp.pins()[0].geometry;
        assert!(fp.pins().iter().all(|p| p.geometry == *first));
        assert!(matches!(first, PinGeometry::Smt(_)));
        // Pins 1 and 5 sit point-symmetric about the origin.
        let p1 = fp.pins().iter().find(|p| p.number == 1).unwrap();
        let p5 = fp.pins().iter().find(|p| p.number == 5).unwrap();
        assert_eq!(p5.loc, -p1.loc);
        // Box plus the pin-1 arc.
        assert_eq!(fp.silk.len(), 5);
        assert!(fp.comments.iter().any(|c| c == "Generator: so"));
    }

    #[test]
    fn odd_pin_count_rejected() {
        let err = generate("pins=7, padlen=1mm, padwidth=0.4mm, pitch=0.65mm, span=6mm, pkglen=5mm")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Parameter syntax error: Must have even number of pins."
        );
    }

    #[test]
    fn missing_required_keyword_is_named() {
        let err = generate("pins=8, padlen=1mm").unwrap_err();
        assert_eq!(err.to_string(), "Required keyword 'padwidth' missing");
    }

    #[test]
    fn thermal_pad_appends_extra_pin() {
        let params = format!("{PARAMS}, thermal=3mm,3mm, thermalexp=2.6mm,2.6mm, vias=2,2, viadrill=0.3mm");
        let (fp, warnings) = generate(&params).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(fp.pins().len(), 9);
        let thrm = fp.pins().iter().find(|p| p.number == 9).unwrap();
        assert_eq!(thrm.name(), "THRM");
        match &thrm.geometry {
            PinGeometry::Thermal(t) => {
                assert_eq!(t.vias.len(), 4);
                assert_eq!(t.masks.len(), 1);
            }
            other => panic!("expected thermal geometry, got {other:?}"),
        }
    }

    #[test]
    fn thermal_without_exposure_warns() {
        let params = format!("{PARAMS}, thermal=3mm,3mm");
        let (fp, warnings) = generate(&params).unwrap();
        assert_eq!(warnings, vec!["No thermal anti-mask specified.".to_string()]);
        assert_eq!(fp.pins().len(), 9);
    }

    #[test]
    fn vias_without_drill_rejected() {
        let params = format!("{PARAMS}, thermal=3mm,3mm, thermalexp=2.6mm,2.6mm, vias=2,2");
        let err = generate(&params).unwrap_err();
        assert!(err.to_string().contains("No via drill specified."));
    }
}
