//! Design-rule dictionary.
//!
//! Generators parameterise themselves against named design rules
//! (clearances, mask reliefs, silk widths) rather than hard-coded numbers.
//! Standard rule names consumed by the shipped generators: `minspace`,
//! `minannulus`, `mindrill`, `maskrelief`, `minsilk`, `refdessize`; plus
//! generator-specific names such as `annulus_hs`. The optional `copyright`
//! and `license` text rules end up in generated footprint comments.

pub mod rack;

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::geom::Dim;
use crate::params::Value;

pub use rack::DrillRack;

/// A rule value: either a measurement or free text.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleValue {
    /// A dimensioned rule (clearance, relief, width...).
    Dim(Dim),
    /// A text rule (copyright line, license line...).
    Text(String),
}

impl std::fmt::Display for RuleValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dim(d) => d.fmt(f),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Name-to-value dictionary of design rules.
///
/// Lookup on a missing name fails with a rule-not-found error naming the
/// missing key; generators are expected to surface that message verbatim.
#[derive(Debug, Clone, Default)]
pub struct RulesDictionary {
    rules: IndexMap<String, RuleValue>,
}

impl RulesDictionary {
    /// Creates an empty dictionary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in default rule set.
    #[must_use]
    pub fn default_rules() -> Self {
        let mut r = Self::new();
        r.set_dim("minspace", Dim::mil(8.0));
        r.set_dim("minannulus", Dim::mil(10.0));
        r.set_dim("mindrill", Dim::inch(0.020));
        r.set_dim("maskrelief", Dim::mil(4.0));
        r.set_dim("minsilk", Dim::mil(10.0));
        r.set_dim("refdessize", Dim::mil(40.0));
        r.set_dim("annulus_hs", Dim::mil(15.0));
        r
    }

    /// Sets a dimensioned rule.
    pub fn set_dim(&mut self, name: impl Into<String>, value: Dim) {
        self.rules.insert(name.into(), RuleValue::Dim(value));
    }

    /// Sets a text rule.
    pub fn set_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.rules.insert(name.into(), RuleValue::Text(value.into()));
    }

    /// Looks up a rule, failing with a message that names the missing key.
    pub fn get(&self, name: &str) -> Result<&RuleValue> {
        self.rules
            .get(name)
            .ok_or_else(|| Error::rule_not_found(name))
    }

    /// Looks up a rule that must be a measurement.
    pub fn dim(&self, name: &str) -> Result<Dim> {
        match self.get(name)? {
            RuleValue::Dim(d) => Ok(*d),
            RuleValue::Text(_) => Err(Error::value(format!(
                "rule '{name}' is text where a dimension was expected"
            ))),
        }
    }

    /// Looks up a rule that must be text.
    pub fn text(&self, name: &str) -> Result<&str> {
        match self.get(name)? {
            RuleValue::Text(s) => Ok(s),
            RuleValue::Dim(_) => Err(Error::value(format!(
                "rule '{name}' is a dimension where text was expected"
            ))),
        }
    }

    /// Resolves a parameter value that may be either a measurement or a
    /// symbolic rule name.
    ///
    /// Generators can accept `annulus=12mil` and `annulus=lhsa` through the
    /// same code path: a dimension passes through unmolested, a string is
    /// resolved against the dictionary.
    pub fn symb(&self, value: &Value) -> Result<Dim> {
        match value {
            Value::Dim(d) => Ok(*d),
            Value::Text(name) => self.dim(name),
            Value::Num(n) => Err(Error::value(format!(
                "bare number {n} where a dimension or rule name was expected"
            ))),
        }
    }

    /// True if the rule exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Iterates rules in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleValue)> {
        self.rules.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_rule_names_the_key() {
        let rules = RulesDictionary::new();
        let err = rules.get("minspace").unwrap_err();
        assert_eq!(err.to_string(), "Required rule 'minspace' not found");
    }

    #[test]
    fn default_rules_present() {
        let rules = RulesDictionary::default_rules();
        assert_eq!(rules.dim("minspace").unwrap(), Dim::mil(8.0));
        assert_eq!(rules.dim("refdessize").unwrap(), Dim::mil(40.0));
    }

    #[test]
    fn symb_passes_dims_through() {
        let rules = RulesDictionary::default_rules();
        let d = rules.symb(&Value::Dim(Dim::mil(12.0))).unwrap();
        assert_eq!(d, Dim::mil(12.0));
    }

    #[test]
    fn symb_resolves_names() {
        let mut rules = RulesDictionary::new();
        rules.set_dim("lhsa", Dim::mil(25.0));
        let d = rules.symb(&Value::Text("lhsa".to_string())).unwrap();
        assert_eq!(d, Dim::mil(25.0));
        assert!(rules.symb(&Value::Text("nope".to_string())).is_err());
    }

    #[test]
    fn dim_rejects_text_rule() {
        let mut rules = RulesDictionary::new();
        rules.set_text("copyright", "(c) nobody");
        assert!(rules.dim("copyright").is_err());
        assert_eq!(rules.text("copyright").unwrap(), "(c) nobody");
    }
}
