//! Keyword-parameter parser and validation.
//!
//! A generator declares its keywords as a [`KwSpecs`] table; [`parse`]
//! checks the parameter string against that table and produces a
//! [`ParamMap`] of typed values.
//!
//! Assignments are separated by whitespace; a comma after an assignment
//! is also accepted. Within an assignment a comma continues the value
//! list, so `abc=1,2 def=3` gives `abc` two values, and in
//! `pins=8, padlen=1mm` the comma separates two assignments because a
//! fresh `keyword=` follows it.
//!
//! Bare numbers in a value list are coerced to dimensions only when the
//! keyword declares a default unit. The unit used is the consensus of any
//! explicitly-dimensioned values in the same list when they all agree,
//! and the declared default otherwise: `pitch=10mil,20mil` yields mils
//! even when the default is millimetres, while `pitch=10,20mm` yields
//! two millimetre values.

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::geom::{Dim, Unit};
use crate::params::lexer::{lex, Token};
use crate::params::Value;

/// Declaration of one keyword a generator accepts.
#[derive(Debug, Clone, Copy)]
pub struct KwSpec {
    /// Default unit for bare numbers. `None` means values of this keyword
    /// are dimensionless (or text) and bare numbers stay bare.
    pub unit: Option<Unit>,
    /// The keyword must be present.
    pub required: bool,
    /// The keyword accepts a comma-separated value list.
    pub multi: bool,
}

impl KwSpec {
    /// A required single-valued keyword.
    #[must_use]
    pub const fn required(unit: Option<Unit>) -> Self {
        Self {
            unit,
            required: true,
            multi: false,
        }
    }

    /// An optional single-valued keyword.
    #[must_use]
    pub const fn optional(unit: Option<Unit>) -> Self {
        Self {
            unit,
            required: false,
            multi: false,
        }
    }

    /// An optional multi-valued keyword.
    #[must_use]
    pub const fn optional_multi(unit: Option<Unit>) -> Self {
        Self {
            unit,
            required: false,
            multi: true,
        }
    }
}

/// A generator's keyword declaration table.
pub type KwSpecs = IndexMap<&'static str, KwSpec>;

enum Raw {
    Dim(Dim),
    Bare(f64),
    Text(String),
}

/// Parsed, validated parameters: keyword to value list, in source order.
#[derive(Debug, Clone, Default)]
pub struct ParamMap {
    entries: IndexMap<String, Vec<Value>>,
}

impl ParamMap {
    /// True if the keyword appeared, with or without values.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Value list for a keyword, empty if absent.
    #[must_use]
    pub fn values(&self, name: &str) -> &[Value] {
        self.entries.get(name).map_or(&[], Vec::as_slice)
    }

    /// A required single value of any type. Fails for an absent keyword
    /// and for a keyword given without a value.
    pub fn single(&self, name: &str) -> Result<&Value> {
        match self.entries.get(name) {
            Some(vals) => vals.first().ok_or_else(|| {
                Error::syntax(format!("keyword '{name}' given without a value"))
            }),
            None => Err(Error::RequiredKeyword {
                keyword: name.to_string(),
            }),
        }
    }

    /// A required single dimension.
    pub fn dim(&self, name: &str) -> Result<Dim> {
        match self.single(name)? {
            Value::Dim(d) => Ok(*d),
            other => Err(Error::value(format!(
                "keyword '{name}' needs a dimension, got {other}"
            ))),
        }
    }

    /// An optional single dimension.
    pub fn opt_dim(&self, name: &str) -> Result<Option<Dim>> {
        if self.contains(name) {
            self.dim(name).map(Some)
        } else {
            Ok(None)
        }
    }

    /// A required bare number.
    pub fn num(&self, name: &str) -> Result<f64> {
        match self.single(name)? {
            Value::Num(n) => Ok(*n),
            other => Err(Error::value(format!(
                "keyword '{name}' needs a bare number, got {other}"
            ))),
        }
    }

    /// An optional bare number.
    pub fn opt_num(&self, name: &str) -> Result<Option<f64>> {
        if self.contains(name) {
            self.num(name).map(Some)
        } else {
            Ok(None)
        }
    }

    /// A required text value.
    pub fn text(&self, name: &str) -> Result<&str> {
        match self.single(name)? {
            Value::Text(s) => Ok(s),
            other => Err(Error::value(format!(
                "keyword '{name}' needs text, got {other}"
            ))),
        }
    }

    /// An optional text value.
    pub fn opt_text(&self, name: &str) -> Result<Option<&str>> {
        if self.contains(name) {
            self.text(name).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Iterates keywords and their value lists in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Value])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

/// Parses and validates a parameter string against a keyword table.
pub fn parse(input: &str, specs: &KwSpecs) -> Result<ParamMap> {
    let tokens = lex(input);
    let mut raw: IndexMap<String, Vec<Raw>> = IndexMap::new();
    let mut i = 0;
    while i < tokens.len() {
        let kw = match &tokens[i] {
            Token::Word(w) => w.clone(),
            other => {
                return Err(Error::syntax(format!(
                    "expected a keyword, found {other}"
                )))
            }
        };
        i += 1;
        if !specs.contains_key(kw.as_str()) {
            return Err(Error::InvalidKeyword { keyword: kw });
        }
        if raw.contains_key(&kw) {
            return Err(Error::syntax(format!("keyword '{kw}' given more than once")));
        }
        let mut vals = Vec::new();
        if matches!(tokens.get(i), Some(Token::Equals)) {
            i += 1;
            loop {
                let v = match tokens.get(i) {
                    Some(Token::Dim(d)) => Raw::Dim(*d),
                    Some(Token::Num(n)) => Raw::Bare(*n),
                    Some(Token::Drill(code)) => Raw::Dim(Dim::from_drill_code(code)?),
                    Some(Token::Quoted(s) | Token::Word(s)) => Raw::Text(s.clone()),
                    Some(other) => {
                        return Err(Error::syntax(format!(
                            "expected a value for '{kw}', found {other}"
                        )))
                    }
                    None => {
                        return Err(Error::syntax(format!("missing value for '{kw}'")))
                    }
                };
                i += 1;
                vals.push(v);
                if matches!(tokens.get(i), Some(Token::Comma)) {
                    i += 1;
                    // A comma followed by a fresh assignment (or nothing)
                    // separates assignments rather than continuing the list.
                    if i >= tokens.len() || starts_assignment(&tokens[i..]) {
                        break;
                    }
                } else {
                    break;
                }
            }
        } else if matches!(tokens.get(i), Some(Token::Comma)) {
            // Valueless keyword followed by a separating comma.
            i += 1;
        }
        raw.insert(kw, vals);
    }

    for (name, spec) in specs {
        if spec.required && !raw.contains_key(*name) {
            return Err(Error::RequiredKeyword {
                keyword: (*name).to_string(),
            });
        }
    }

    tracing::debug!(keywords = raw.len(), "parsed parameter string");

    let mut entries = IndexMap::new();
    for (name, vals) in raw {
        let spec = &specs[name.as_str()];
        if !spec.multi && vals.len() > 1 {
            return Err(Error::syntax(format!(
                "keyword '{name}' takes a single value"
            )));
        }
        entries.insert(name, resolve(vals, spec));
    }
    Ok(ParamMap { entries })
}

fn starts_assignment(tokens: &[Token]) -> bool {
    matches!(tokens, [Token::Word(_), Token::Equals, ..])
}

/// Applies unit consensus and the declared default unit to a value list.
fn resolve(vals: Vec<Raw>, spec: &KwSpec) -> Vec<Value> {
    let mut consensus: Option<Unit> = None;
    let mut disagree = false;
    for v in &vals {
        if let Raw::Dim(d) = v {
            match consensus {
                None if !disagree => consensus = Some(d.unit()),
                Some(u) if u != d.unit() => {
                    consensus = None;
                    disagree = true;
                }
                _ => {}
            }
        }
    }
    let fill = if spec.unit.is_some() {
        consensus.or(spec.unit)
    } else {
        None
    };
    vals.into_iter()
        .map(|v| match v {
            Raw::Dim(d) => Value::Dim(d),
            Raw::Bare(n) => match fill {
                Some(u) => Value::Dim(Dim::with_unit(n, u)),
                None => Value::Num(n),
            },
            Raw::Text(s) => Value::Text(s),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specs() -> KwSpecs {
        let mut s = KwSpecs::new();
        s.insert("pins", KwSpec::required(None));
        s.insert("pitch", KwSpec::optional_multi(Some(Unit::Mm)));
        s.insert("desc", KwSpec::optional(None));
        s.insert("silk", KwSpec::optional(Some(Unit::Mil)));
        s
    }

    #[test]
    fn parses_basic_assignments() {
        let p = parse("pins=8, pitch=0.65mm", &specs()).unwrap();
        assert_eq!(p.num("pins").unwrap(), 8.0);
        assert_eq!(p.values("pitch"), &[Value::Dim(Dim::mm(0.65))]);
    }

    #[test]
    fn assignments_separate_on_whitespace_or_comma() {
        let p = parse("pins=8 pitch=0.65mm", &specs()).unwrap();
        assert_eq!(p.num("pins").unwrap(), 8.0);

        // "abc=1,2 def=3" style: the comma continues a value list, the
        // comma before a fresh assignment separates assignments.
        let q = parse("pitch=1,2 pins=3, desc=x", &specs()).unwrap();
        assert_eq!(q.values("pitch").len(), 2);
        assert_eq!(q.num("pins").unwrap(), 3.0);
        assert_eq!(q.text("desc").unwrap(), "x");
    }

    #[test]
    fn valueless_keyword_fails_typed_access() {
        let p = parse("pins=2 desc", &specs()).unwrap();
        assert!(p.contains("desc"));
        assert!(p.values("desc").is_empty());
        let err = p.text("desc").unwrap_err();
        assert!(err.to_string().contains("'desc' given without a value"));
    }

    #[test]
    fn missing_required_keyword_is_named() {
        let err = parse("pitch=1mm", &specs()).unwrap_err();
        assert_eq!(err.to_string(), "Required keyword 'pins' missing");
    }

    #[test]
    fn undeclared_keyword_is_named() {
        let err = parse("pins=8, bogus=1", &specs()).unwrap_err();
        assert_eq!(err.to_string(), "Invalid keyword 'bogus' present");
    }

    #[test]
    fn consensus_unit_beats_declared_default() {
        // Both values mil: bare numbers would follow them; here all are
        // explicit and stay mils despite the mm default.
        let p = parse("pins=2, pitch=10mil,20mil", &specs()).unwrap();
        let dims: Vec<Dim> = p
            .values("pitch")
            .iter()
            .filter_map(Value::as_dim)
            .collect();
        assert_eq!(dims, vec![Dim::mil(10.0), Dim::mil(20.0)]);
        assert_eq!(dims[0].unit(), Unit::Mil);
    }

    #[test]
    fn bare_numbers_follow_unit_consensus() {
        let p = parse("pins=2, pitch=10,20mm", &specs()).unwrap();
        let dims: Vec<Dim> = p
            .values("pitch")
            .iter()
            .filter_map(Value::as_dim)
            .collect();
        assert_eq!(dims, vec![Dim::mm(10.0), Dim::mm(20.0)]);
        assert_eq!(dims[0].unit(), Unit::Mm);
    }

    #[test]
    fn bare_numbers_fall_back_to_declared_unit() {
        let p = parse("pins=2, silk=12", &specs()).unwrap();
        assert_eq!(p.dim("silk").unwrap(), Dim::mil(12.0));
    }

    #[test]
    fn bare_numbers_stay_bare_without_declared_unit() {
        let p = parse("pins=8", &specs()).unwrap();
        assert_eq!(p.values("pins"), &[Value::Num(8.0)]);
    }

    #[test]
    fn keyword_in_value_position_is_text() {
        let p = parse("pins=2, desc=axial", &specs()).unwrap();
        assert_eq!(p.text("desc").unwrap(), "axial");
    }

    #[test]
    fn non_keyword_where_keyword_expected() {
        let err = parse("=8", &specs()).unwrap_err();
        assert!(err.to_string().contains("expected a keyword"));
        assert!(err.to_string().contains("'='"));
    }

    #[test]
    fn repeated_keyword_rejected() {
        assert!(parse("pins=2, pins=4", &specs()).is_err());
    }

    #[test]
    fn single_valued_keyword_rejects_lists() {
        assert!(parse("pins=2, silk=1,2", &specs()).is_err());
    }

    #[test]
    fn drill_designators_resolve_to_dimensions() {
        let mut s = specs();
        s.insert("drill", KwSpec::optional(Some(Unit::Inch)));
        let p = parse("pins=2, drill=#60", &s).unwrap();
        assert_eq!(p.dim("drill").unwrap(), Dim::inch(0.040));
    }
}
