//! Tokeniser for the keyword-parameter language.
//!
//! Patterns are tried in a fixed order and the first match wins, so
//! `10mil` lexes as one dimensioned number rather than a number and a
//! word. An unterminated quoted string is taken to run to the end of the
//! line rather than aborting the lex; the parser reports any damage in
//! context.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::geom::{Dim, Unit};

/// One token of parameter text.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// An identifier: a keyword or a bare string value.
    Word(String),
    /// A number with an explicit unit suffix.
    Dim(Dim),
    /// A bare number.
    Num(f64),
    /// A `#NN` / `#letter` drill designator, unresolved.
    Drill(String),
    /// A quoted string, quotes stripped.
    Quoted(String),
    /// `=`
    Equals,
    /// `,`
    Comma,
    /// Anything unrecognisable.
    Bad(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Word(w) => write!(f, "'{w}'"),
            Self::Dim(d) => write!(f, "'{d}'"),
            Self::Num(n) => write!(f, "'{n}'"),
            Self::Drill(d) => write!(f, "'{d}'"),
            Self::Quoted(s) => write!(f, "\"{s}\""),
            Self::Equals => f.write_str("'='"),
            Self::Comma => f.write_str("','"),
            Self::Bad(s) => write!(f, "'{s}'"),
        }
    }
}

struct Patterns {
    word: Regex,
    float: Regex,
    int: Regex,
    drill: Regex,
    dquote: Regex,
    squote: Regex,
    unterminated: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        word: Regex::new(r"^[A-Za-z][A-Za-z0-9_]*").unwrap(),
        float: Regex::new(r"^([0-9]*\.[0-9]+)(?:\s*(mm|mil|inch|in)\b)?").unwrap(),
        int: Regex::new(r"^([0-9]+)(?:\s*(mm|mil|inch|in)\b)?").unwrap(),
        drill: Regex::new(r"^#(?:[0-9]+|[A-Z])").unwrap(),
        dquote: Regex::new(r#"^"([^"\n]*)""#).unwrap(),
        squote: Regex::new(r"^'([^'\n]*)'").unwrap(),
        unterminated: Regex::new(r#"^["']([^\n]*)"#).unwrap(),
    })
}

fn number(caps: &regex::Captures<'_>) -> Token {
    // The digits always parse; the pattern guarantees it.
    let v: f64 = caps[1].parse().unwrap_or(0.0);
    match caps.get(2) {
        Some(u) => {
            // The unit alternation only admits spellings Unit::parse accepts.
            let unit = Unit::parse(u.as_str()).unwrap_or_default();
            Token::Dim(Dim::with_unit(v, unit))
        }
        None => Token::Num(v),
    }
}

/// Tokenises a parameter string. Never fails; unrecognisable input becomes
/// [`Token::Bad`] for the parser to report in context.
#[must_use]
pub fn lex(input: &str) -> Vec<Token> {
    let p = patterns();
    let mut out = Vec::new();
    let mut rest = input;
    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }
        if let Some(m) = p.word.find(rest) {
            out.push(Token::Word(m.as_str().to_string()));
            rest = &rest[m.end()..];
        } else if let Some(c) = p.float.captures(rest) {
            out.push(number(&c));
            rest = &rest[c.get(0).map_or(0, |m| m.end())..];
        } else if let Some(c) = p.int.captures(rest) {
            out.push(number(&c));
            rest = &rest[c.get(0).map_or(0, |m| m.end())..];
        } else if let Some(m) = p.drill.find(rest) {
            out.push(Token::Drill(m.as_str().to_string()));
            rest = &rest[m.end()..];
        } else if let Some(c) = p.dquote.captures(rest) {
            out.push(Token::Quoted(c[1].to_string()));
            rest = &rest[c.get(0).map_or(0, |m| m.end())..];
        } else if let Some(c) = p.squote.captures(rest) {
            out.push(Token::Quoted(c[1].to_string()));
            rest = &rest[c.get(0).map_or(0, |m| m.end())..];
        } else if let Some(c) = p.unterminated.captures(rest) {
            out.push(Token::Quoted(c[1].to_string()));
            rest = &rest[c.get(0).map_or(0, |m| m.end())..];
        } else if let Some(tail) = rest.strip_prefix('=') {
            out.push(Token::Equals);
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix(',') {
            out.push(Token::Comma);
            rest = tail;
        } else {
            let end = rest
                .find(|c: char| c.is_whitespace() || c == '=' || c == ',')
                .unwrap_or(rest.len());
            out.push(Token::Bad(rest[..end].to_string()));
            rest = &rest[end..];
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_and_structure() {
        let toks = lex("pins=8, pitch=0.65mm");
        assert_eq!(
            toks,
            vec![
                Token::Word("pins".to_string()),
                Token::Equals,
                Token::Num(8.0),
                Token::Comma,
                Token::Word("pitch".to_string()),
                Token::Equals,
                Token::Dim(Dim::mm(0.65)),
            ]
        );
    }

    #[test]
    fn units_attach_to_numbers() {
        assert_eq!(lex("10mil"), vec![Token::Dim(Dim::mil(10.0))]);
        assert_eq!(lex("10 mil"), vec![Token::Dim(Dim::mil(10.0))]);
        assert_eq!(lex(".5in"), vec![Token::Dim(Dim::inch(0.5))]);
    }

    #[test]
    fn unit_lookalike_words_stay_separate() {
        // "mindrill" starts with "mi" but is not a unit suffix.
        let toks = lex("10 mindrill");
        assert_eq!(
            toks,
            vec![Token::Num(10.0), Token::Word("mindrill".to_string())]
        );
    }

    #[test]
    fn drill_designators() {
        assert_eq!(lex("#60"), vec![Token::Drill("#60".to_string())]);
        assert_eq!(lex("#A"), vec![Token::Drill("#A".to_string())]);
    }

    #[test]
    fn quoted_strings() {
        assert_eq!(
            lex("desc=\"0.25W resistor\""),
            vec![
                Token::Word("desc".to_string()),
                Token::Equals,
                Token::Quoted("0.25W resistor".to_string()),
            ]
        );
        assert_eq!(lex("'single'"), vec![Token::Quoted("single".to_string())]);
    }

    #[test]
    fn unterminated_string_runs_to_end_of_line() {
        assert_eq!(
            lex("\"no closing"),
            vec![Token::Quoted("no closing".to_string())]
        );
    }

    #[test]
    fn garbage_becomes_bad_tokens() {
        let toks = lex("pins @!$ 8");
        assert_eq!(
            toks,
            vec![
                Token::Word("pins".to_string()),
                Token::Bad("@!$".to_string()),
                Token::Num(8.0),
            ]
        );
    }
}
