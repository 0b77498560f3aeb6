//! Drill racks: standard drill size catalogues.
//!
//! A rack rounds requested drill sizes up to the nearest manufacturable
//! standard size; it never produces a hole smaller than requested. Symbolic
//! names ("machscrew6") and the fixed reference table of numbered and
//! lettered drills (`#1`..`#80`, `#A`..`#Z`) resolve through the same
//! lookup path.

use indexmap::IndexMap;
use tracing::warn;

use crate::error::{Error, Result};
use crate::geom::Dim;

/// Resolves a `#NN` / `#letter` drill designator against the fixed
/// reference table. Sizes are the standard fractional-inch values.
#[must_use]
pub fn reference_drill(code: &str) -> Option<Dim> {
    let inches = match code {
        "#80" => 0.0135,
        "#79" => 0.0145,
        "#78" => 0.016,
        "#77" => 0.018,
        "#76" => 0.020,
        "#75" => 0.021,
        "#74" => 0.0225,
        "#73" => 0.024,
        "#72" => 0.025,
        "#71" => 0.026,
        "#70" => 0.028,
        "#69" => 0.0292,
        "#68" => 0.031,
        "#67" => 0.032,
        "#66" => 0.033,
        "#65" => 0.035,
        "#64" => 0.036,
        "#63" => 0.037,
        "#62" => 0.038,
        "#61" => 0.039,
        "#60" => 0.040,
        "#59" => 0.041,
        "#58" => 0.042,
        "#57" => 0.043,
        "#56" => 0.0465,
        "#55" => 0.052,
        "#54" => 0.055,
        "#53" => 0.0595,
        "#52" => 0.0635,
        "#51" => 0.067,
        "#50" => 0.070,
        "#49" => 0.073,
        "#48" => 0.076,
        "#47" => 0.0785,
        "#46" => 0.081,
        "#45" => 0.082,
        "#44" => 0.086,
        "#43" => 0.089,
        "#42" => 0.0935,
        "#41" => 0.096,
        "#40" => 0.098,
        "#39" => 0.0995,
        "#38" => 0.1015,
        "#37" => 0.104,
        "#36" => 0.1065,
        "#35" => 0.110,
        "#34" => 0.111,
        "#33" => 0.113,
        "#32" => 0.116,
        "#31" => 0.120,
        "#30" => 0.1285,
        "#29" => 0.136,
        "#28" => 0.1405,
        "#27" => 0.144,
        "#26" => 0.147,
        "#25" => 0.1495,
        "#24" => 0.152,
        "#23" => 0.154,
        "#22" => 0.157,
        "#21" => 0.159,
        "#20" => 0.161,
        "#19" => 0.166,
        "#18" => 0.1695,
        "#17" => 0.173,
        "#16" => 0.177,
        "#15" => 0.180,
        "#14" => 0.182,
        "#13" => 0.185,
        "#12" => 0.189,
        "#11" => 0.191,
        "#10" => 0.1935,
        "#9" => 0.196,
        "#8" => 0.199,
        "#7" => 0.201,
        "#6" => 0.204,
        "#5" => 0.2055,
        "#4" => 0.209,
        "#3" => 0.213,
        "#2" => 0.221,
        "#1" => 0.228,
        "#A" => 0.234,
        "#B" => 0.238,
        "#C" => 0.242,
        "#D" => 0.246,
        "#E" => 0.250,
        "#F" => 0.257,
        "#G" => 0.261,
        "#H" => 0.266,
        "#I" => 0.272,
        "#J" => 0.277,
        "#K" => 0.281,
        "#L" => 0.290,
        "#M" => 0.295,
        "#N" => 0.302,
        "#O" => 0.316,
        "#P" => 0.323,
        "#Q" => 0.332,
        "#R" => 0.339,
        "#S" => 0.348,
        "#T" => 0.358,
        "#U" => 0.368,
        "#V" => 0.377,
        "#W" => 0.386,
        "#X" => 0.397,
        "#Y" => 0.404,
        "#Z" => 0.413,
        _ => return None,
    };
    Some(Dim::inch(inches))
}

/// An ordered catalogue of standard drill sizes plus symbolic names.
///
/// `lookup` maps a requested size to the smallest rack entry at least as
/// large, or passes the size through unchanged when nothing in the rack is
/// large enough. The null variant holds no entries and refuses insertions,
/// modelling "no drill standardisation in force".
#[derive(Debug, Clone)]
pub struct DrillRack {
    drills: Vec<Dim>,
    symbolic: IndexMap<String, Dim>,
    null: bool,
}

impl DrillRack {
    /// Creates a rack from a drill list (sorted here) and symbolic table.
    #[must_use]
    pub fn new(mut drills: Vec<Dim>, symbolic: IndexMap<String, Dim>) -> Self {
        drills.sort_by(|a, b| a.as_mm().total_cmp(&b.as_mm()));
        Self {
            drills,
            symbolic,
            null: false,
        }
    }

    /// Creates an empty, mutable rack.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new(), IndexMap::new())
    }

    /// Creates the null rack: no standardisation, insertions refused.
    #[must_use]
    pub fn null() -> Self {
        Self {
            drills: Vec::new(),
            symbolic: IndexMap::new(),
            null: true,
        }
    }

    /// The built-in default rack.
    #[must_use]
    pub fn default_rack() -> Self {
        let drills = [
            0.020, 0.025, 0.035, 0.038, 0.042, 0.052, 0.060, 0.086, 0.125, 0.152,
        ]
        .iter()
        .map(|&v| Dim::inch(v))
        .collect();
        let mut symbolic = IndexMap::new();
        symbolic.insert("machscrew6".to_string(), Dim::inch(0.152));
        Self::new(drills, symbolic)
    }

    /// True for the null rack.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        self.null
    }

    /// The rack's drill sizes, ascending.
    #[must_use]
    pub fn drills(&self) -> &[Dim] {
        &self.drills
    }

    /// Adds a drill size, keeping the list sorted. Adding an existing size
    /// is a no-op; the null rack refuses with a non-fatal advisory.
    pub fn add_drill(&mut self, drill: Dim) {
        if self.null {
            warn!(size = %drill, "cannot add drill to the null rack");
            return;
        }
        if self.drills.iter().any(|d| *d == drill) {
            return;
        }
        let at = self.drills.partition_point(|d| *d < drill);
        self.drills.insert(at, drill);
    }

    /// Adds a symbolic drill name; the null rack refuses with an advisory.
    pub fn add_symbolic(&mut self, name: impl Into<String>, drill: Dim) {
        if self.null {
            warn!("cannot add symbolic drill to the null rack");
            return;
        }
        self.symbolic.insert(name.into(), drill);
    }

    /// Maps a requested size to the smallest rack entry that is at least
    /// as large, or returns the size unchanged if the rack has nothing
    /// large enough.
    #[must_use]
    pub fn lookup(&self, size: Dim) -> Dim {
        self.drills
            .iter()
            .find(|d| **d >= size)
            .copied()
            .unwrap_or(size)
    }

    /// Resolves a drill by name: `#`-designators through the reference
    /// table first, then the rack's own symbolic table, then rounds the
    /// result up through [`Self::lookup`].
    pub fn lookup_name(&self, name: &str) -> Result<Dim> {
        let size = if name.starts_with('#') {
            reference_drill(name).ok_or_else(|| Error::drill_not_found(name))?
        } else {
            *self
                .symbolic
                .get(name)
                .ok_or_else(|| Error::drill_not_found(name))?
        };
        Ok(self.lookup(size))
    }
}

impl Default for DrillRack {
    fn default() -> Self {
        Self::default_rack()
    }
}
