//! Rules and rack configuration files.
//!
//! Both files are JSON. A rules file overlays the built-in defaults:
//!
//! ```json
//! {
//!   "dimensions": { "minspace": "10 mil", "lhsa": "25 mil" },
//!   "text": { "copyright": "(c) 2026 Example Co" }
//! }
//! ```
//!
//! A rack file replaces the default rack outright:
//!
//! ```json
//! {
//!   "drills": ["0.020 inch", "0.035 inch", "0.042 inch"],
//!   "symbolic": { "machscrew6": "0.152 inch" }
//! }
//! ```
//!
//! Dimension strings take the parameter-language spelling: a number with
//! a unit suffix (`mm`, `mil`, `thou`, `inch`, `in`).

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;
use crate::geom::Dim;
use crate::rules::{DrillRack, RulesDictionary};

/// On-disk rules file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RulesFile {
    /// Dimensioned rules, keyed by rule name.
    #[serde(default)]
    pub dimensions: IndexMap<String, String>,
    /// Text rules, keyed by rule name.
    #[serde(default)]
    pub text: IndexMap<String, String>,
}

/// On-disk rack file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RackFile {
    /// Stocked drill sizes.
    #[serde(default)]
    pub drills: Vec<String>,
    /// Symbolic drill names.
    #[serde(default)]
    pub symbolic: IndexMap<String, String>,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ConfigError::ParseError {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_dim(name: &str, value: &str) -> Result<Dim, ConfigError> {
    Dim::parse(value, None).map_err(|e| ConfigError::ValidationError {
        message: format!("'{name}': {e}"),
    })
}

/// Loads a rules file and overlays it on the built-in defaults.
pub fn load_rules(path: &Path) -> Result<RulesDictionary, ConfigError> {
    let file: RulesFile = read_json(path)?;
    let mut rules = RulesDictionary::default_rules();
    for (name, value) in &file.dimensions {
        rules.set_dim(name, parse_dim(name, value)?);
    }
    for (name, value) in &file.text {
        rules.set_text(name, value);
    }
    debug!(path = %path.display(), "loaded rules file");
    Ok(rules)
}

/// Loads a rack file as a complete replacement rack.
pub fn load_rack(path: &Path) -> Result<DrillRack, ConfigError> {
    let file: RackFile = read_json(path)?;
    let mut drills = Vec::with_capacity(file.drills.len());
    for value in &file.drills {
        drills.push(parse_dim("drills", value)?);
    }
    let mut symbolic = IndexMap::new();
    for (name, value) in &file.symbolic {
        symbolic.insert(name.clone(), parse_dim(name, value)?);
    }
    debug!(path = %path.display(), drills = drills.len(), "loaded rack file");
    Ok(DrillRack::new(drills, symbolic))
}
