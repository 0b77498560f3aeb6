//! Footprint generators.
//!
//! A [`Generator`] turns a parameter string into a [`Footprint`] using
//! the active design rules and drill rack. The shipped generators cover
//! the small-outline gull-wing family (`so`), two-pad axial or radial
//! through-hole parts (`th2pad`) and single mounting holes (`hole`).

pub mod hole;
pub mod so;
pub mod th2pad;

use chrono::Local;
use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::geom::{Dim, Pt};
use crate::model::{Footprint, PinGeometry, PinSpec};
use crate::params::ParamMap;
use crate::render::WarnSink;
use crate::rules::{DrillRack, RulesDictionary};

pub use hole::HoleGenerator;
pub use so::SoGenerator;
pub use th2pad::Th2PadGenerator;

impl std::fmt::Debug for dyn Generator + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("name", &self.name())
            .finish()
    }
}

/// One footprint family.
pub trait Generator {
    /// The generator name used on the command line.
    fn name(&self) -> &'static str;

    /// Usage text: one line per accepted keyword.
    fn helptext(&self) -> &'static str;

    /// Builds a footprint from a parameter string.
    fn generate(
        &self,
        name: &str,
        params: &str,
        rules: &RulesDictionary,
        rack: &DrillRack,
        warn: &mut WarnSink,
    ) -> Result<Footprint>;
}

/// Name lookup for generators.
#[derive(Default)]
pub struct GeneratorRegistry {
    generators: IndexMap<&'static str, Box<dyn Generator>>,
}

impl GeneratorRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry of shipped generators.
    #[must_use]
    pub fn builtin() -> Self {
        let mut r = Self::new();
        r.register(Box::new(SoGenerator));
        r.register(Box::new(Th2PadGenerator));
        r.register(Box::new(HoleGenerator));
        r
    }

    /// Registers a generator under its own name.
    pub fn register(&mut self, generator: Box<dyn Generator>) {
        self.generators.insert(generator.name(), generator);
    }

    /// Finds a generator by name.
    pub fn get(&self, name: &str) -> Result<&dyn Generator> {
        self.generators
            .get(name)
            .map(Box::as_ref)
            .ok_or_else(|| Error::UnknownGenerator {
                name: name.to_string(),
            })
    }

    /// Registered generator names.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.generators.keys().copied()
    }
}

/// Places `pins` pins in two facing columns `width` apart.
///
/// Pins number down the left column 1 to `pins`/2 and back up the right
/// column, so pin 1 faces pin `pins` across the top row. `pin1_geometry`
/// substitutes a distinct first-pin land when given.
pub fn dil_layout(
    pins: u32,
    width: Dim,
    pitch: Dim,
    geometry: PinGeometry,
    pin1_geometry: Option<PinGeometry>,
) -> Result<Vec<PinSpec>> {
    let per_side = column_count(pins)?;
    let (x_left, x_right) = column_x(width);
    let y_top = pitch * f64::from(per_side - 1) / 2.0;
    let mut out = Vec::with_capacity(pins as usize);
    for i in 0..per_side {
        let y = y_top - pitch * f64::from(i);
        let geo = if i == 0 {
            pin1_geometry.clone().unwrap_or_else(|| geometry.clone())
        } else {
            geometry.clone()
        };
        out.push(PinSpec::new(Pt::new(x_left, y), i + 1, geo));
    }
    for i in 0..per_side {
        let y = y_top - pitch * f64::from(i);
        out.push(PinSpec::new(Pt::new(x_right, y), pins - i, geometry.clone()));
    }
    Ok(out)
}

/// Places `pins` pins in two facing columns with odd numbers down the
/// left column and even numbers down the right, connector style.
pub fn alternating_layout(
    pins: u32,
    width: Dim,
    pitch: Dim,
    geometry: PinGeometry,
) -> Result<Vec<PinSpec>> {
    let per_side = column_count(pins)?;
    let (x_left, x_right) = column_x(width);
    let y_top = pitch * f64::from(per_side - 1) / 2.0;
    let mut out = Vec::with_capacity(pins as usize);
    for i in 0..per_side {
        let y = y_top - pitch * f64::from(i);
        out.push(PinSpec::new(Pt::new(x_left, y), 2 * i + 1, geometry.clone()));
        out.push(PinSpec::new(Pt::new(x_right, y), 2 * i + 2, geometry.clone()));
    }
    Ok(out)
}

fn column_count(pins: u32) -> Result<u32> {
    if pins == 0 || pins % 2 != 0 {
        return Err(Error::value("must have an even number of pins"));
    }
    Ok(pins / 2)
}

fn column_x(width: Dim) -> (Dim, Dim) {
    let x_right = width / 2.0;
    (-x_right, x_right)
}

/// The standard provenance comment block: tool and date, optional
/// copyright and license rules, the generator name, the parameters as
/// parsed, and the rule values the generator consulted.
#[must_use]
pub fn standard_comments(
    generator: &str,
    params: &ParamMap,
    rules: &RulesDictionary,
    rule_list: &[&str],
) -> Vec<String> {
    let mut out = Vec::new();
    out.push(format!(
        "Generated by landgen {}",
        Local::now().format("%Y-%m-%d")
    ));
    for name in ["copyright", "license"] {
        if let Ok(text) = rules.text(name) {
            out.push(text.to_string());
        }
    }
    out.push(format!("Generator: {generator}"));
    out.push("Parameters:".to_string());
    for (kw, values) in params.iter() {
        let disp: Vec<String> = values.iter().map(ToString::to_string).collect();
        out.push(format!("  {}={}", kw, disp.join(", ")));
    }
    out.push("Rules:".to_string());
    for name in rule_list {
        if let Ok(value) = rules.get(name) {
            out.push(format!("  {name} = {value}"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SmtPad;
    use crate::params::{parse, KwSpec, KwSpecs};

    fn geometry() -> PinGeometry {
        PinGeometry::Smt(
            SmtPad::obround(Dim::mil(8.0), Dim::mm(1.0), Dim::mm(0.4), Dim::mil(4.0)).unwrap(),
        )
    }

    #[test]
    fn dil_layout_places_facing_columns() {
        let pins = dil_layout(8, Dim::mm(5.6), Dim::mm(0.65), geometry(), None).unwrap();
        assert_eq!(pins.len(), 8);
        // Four per column.
        assert_eq!(pins.iter().filter(|p| p.loc.x < Dim::mm(0.0)).count(), 4);
        assert_eq!(pins.iter().filter(|p| p.loc.x > Dim::mm(0.0)).count(), 4);
        // Pin 1 and pin 8 share the top row on opposite sides.
        let p1 = pins.iter().find(|p| p.number == 1).unwrap();
        let p8 = pins.iter().find(|p| p.number == 8).unwrap();
        assert_eq!(p1.loc.y, p8.loc.y);
        assert_eq!(p1.loc.x, -p8.loc.x);
        // All locations distinct.
        for (i, a) in pins.iter().enumerate() {
            for b in &pins[i + 1..] {
                assert_ne!(a.loc, b.loc);
            }
        }
        // Pins 1 and 5 are point-symmetric about the origin.
        let p5 = pins.iter().find(|p| p.number == 5).unwrap();
        assert_eq!(p5.loc, -p1.loc);
    }

    #[test]
    fn dil_layout_rejects_odd_counts() {
        assert!(dil_layout(7, Dim::mm(5.0), Dim::mm(1.0), geometry(), None).is_err());
        assert!(dil_layout(0, Dim::mm(5.0), Dim::mm(1.0), geometry(), None).is_err());
    }

    #[test]
    fn alternating_layout_interleaves_numbers() {
        let pins = alternating_layout(6, Dim::mm(2.54), Dim::mm(2.54), geometry()).unwrap();
        let p1 = pins.iter().find(|p| p.number == 1).unwrap();
        let p2 = pins.iter().find(|p| p.number == 2).unwrap();
        assert_eq!(p1.loc.y, p2.loc.y);
        assert!(p1.loc.x < p2.loc.x);
        let p3 = pins.iter().find(|p| p.number == 3).unwrap();
        assert!(p3.loc.y < p1.loc.y);
        assert_eq!(p3.loc.x, p1.loc.x);
    }

    #[test]
    fn builtin_registry_knows_the_shipped_generators() {
        let r = GeneratorRegistry::builtin();
        let names: Vec<&str> = r.names().collect();
        assert_eq!(names, vec!["so", "th2pad", "hole"]);
        assert!(r.get("so").is_ok());
        let err = r.get("dip").unwrap_err();
        assert_eq!(err.to_string(), "Unknown generator: dip");
    }

    #[test]
    fn standard_comments_cover_provenance() {
        let mut specs = KwSpecs::new();
        specs.insert("pins", KwSpec::required(None));
        let params = parse("pins=8", &specs).unwrap();
        let mut rules = RulesDictionary::default_rules();
        rules.set_text("copyright", "(c) 2026 nobody");
        let comments = standard_comments("so", &params, &rules, &["minspace"]);
        assert!(comments[0].starts_with("Generated by landgen "));
        assert!(comments.contains(&"(c) 2026 nobody".to_string()));
        assert!(comments.contains(&"Generator: so".to_string()));
        assert!(comments.contains(&"  pins=8".to_string()));
        assert!(comments.contains(&"  minspace = 8 mil".to_string()));
    }
}
