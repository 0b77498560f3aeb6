//! Mounting-hole generator.

use crate::error::{Error, Result};
use crate::geom::{Dim, Pt, Unit};
use crate::model::{Footprint, Overlay, PinGeometry, PinSpec, RefDes, ThruPin};
use crate::params::{self, KwSpec, KwSpecs};
use crate::render::WarnSink;
use crate::rules::{DrillRack, RulesDictionary};

use super::{standard_comments, Generator};

/// A single drilled pad for hardware: mounting screws, standoffs, rivets.
pub struct HoleGenerator;

/// Close-fit and free-fit clearance drills for metric machine screws.
fn metric_screw(name: &str) -> Option<(Dim, Dim)> {
    let (close, free) = match name {
        "M1.0" | "M1" => (1.05, 1.2),
        "M1.1" => (1.15, 1.3),
        "M1.2" => (1.3, 1.5),
        "M1.4" => (1.5, 1.7),
        "M1.6" => (1.7, 2.0),
        "M1.8" => (1.9, 2.2),
        "M2.0" | "M2" => (2.2, 2.6),
        "M2.2" => (2.4, 2.8),
        "M2.5" => (2.7, 3.1),
        "M3.0" | "M3" => (3.2, 3.6),
        "M3.5" => (3.7, 4.2),
        "M4.0" | "M4" => (4.3, 4.8),
        "M4.5" => (4.8, 5.3),
        "M5.0" | "M5" => (5.3, 5.8),
        _ => return None,
    };
    Some((Dim::mm(close), Dim::mm(free)))
}

fn kwspecs() -> KwSpecs {
    let mut s = KwSpecs::new();
    s.insert("pad", KwSpec::required(Some(Unit::Mm)));
    s.insert("drill", KwSpec::optional(Some(Unit::Mm)));
    s.insert("screw", KwSpec::optional(None));
    s.insert("fit", KwSpec::optional(None));
    s
}

impl Generator for HoleGenerator {
    fn name(&self) -> &'static str {
        "hole"
    }

    fn helptext(&self) -> &'static str {
        "Holes for hardware.\n\
         specify one of:\n\
           drill=<size> ; explicit dimension\n\
           screw=\"Mn.n\" ; metric screw clearance\n\
         specify pad size:\n\
           pad=<size>\n\
         optionally:\n\
           fit=\"free\" ; the default\n\
           fit=\"close\""
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
        let fit = match p.opt_text("fit")? {
            None => "free",
            Some(f @ ("free" | "close")) => f,
            Some(_) => {
                return Err(Error::value("fit must be one of: \"free\",\"close\"."))
            }
        };
        let drill = match p.opt_dim("drill")? {
            Some(d) => d,
            None => {
                let screw = p
                    .opt_text("screw")?
                    .ok_or_else(|| Error::syntax("Expected one of 'drill' or 'screw'."))?;
                let (close, free) = metric_screw(screw).ok_or_else(|| {
                    Error::value(format!("drill '{screw}' not found."))
                })?;
                if fit == "free" {
                    free
                } else {
                    close
                }
            }
        };
        let maskrelief = rules.dim("maskrelief")?;
        let clearance = rules.dim("minspace")?;
        let racked = rack.lookup(drill);

        let geometry = PinGeometry::Thru(ThruPin::circle(
            racked,
            p.dim("pad")?,
            clearance,
            Overlay::Derived { bloat: maskrelief },
        )?);
        let comments = standard_comments(
            self.name(),
            &p,
            rules,
            &["maskrelief", "minspace", "refdessize"],
        );
        let refdes = RefDes::new(Pt::mm(0.0, 2.0), rules.dim("minsilk")?, rules.dim("refdessize")?)?;
        let mut fp = Footprint::new(name, "Screw hole.", refdes);
        fp.add_pin(PinSpec::new(Pt::origin(), 1, geometry))?;
        fp.comments = comments;
        Ok(fp)
    }
}
