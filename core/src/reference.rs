use std::{fmt, str::FromStr};

use itertools::Itertools;
use thiserror::Error;

/// A dotted token path wrapped in braces, e.g. `{referenceColors.neutral.900}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference(Vec<String>);
impl Reference {
    pub fn new(segments: Vec<String>) -> Self {
        Self(segments)
    }
    pub fn segments(&self) -> &[String] {
        &self.0
    }
    pub fn parse(input: &str) -> Result<Self, ReferenceError> {
        reference_parser::reference(input).map_err(|err| ReferenceError {
            input: input.to_string(),
            message: err.to_string(),
        })
    }
}
impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.0.iter().join("."))
    }
}
impl FromStr for Reference {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[derive(Debug, Error)]
#[error("Invalid reference `{input}`: {message}")]
pub struct ReferenceError {
    input: String,
    message: String,
}

peg::parser! {
  grammar reference_parser() for str {
    rule _ = quiet!{[' ' | '\n' | '\t']*}

    rule segment() -> String = s:$((!['.' | '}' | '{'] [_])+) { s.to_string() }

    pub(crate) rule reference() -> Reference = _ "{" v:(segment() ++ ".") "}" _ { Reference(v) }
  }
}

#[test]
fn test() {
    assert_eq!(
        Reference::parse("{hello.world}").unwrap(),
        Reference::new(vec!["hello".to_string(), "world".to_string()])
    );
    assert_eq!(
        Reference::parse(" {referenceColors.neutral.900} ").unwrap(),
        Reference::new(vec![
            "referenceColors".to_string(),
            "neutral".to_string(),
            "900".to_string()
        ])
    );
    assert_eq!(
        Reference::parse("{single}").unwrap().segments(),
        &["single".to_string()]
    );
    assert!(Reference::parse("{}").is_err());
    assert!(Reference::parse("{a..b}").is_err());
    assert!(Reference::parse("a.b").is_err());
    assert!(Reference::parse("{a.b").is_err());
    assert!(Reference::parse("#ff00ff").is_err());

    let reference: Reference = "{brand.primary}".parse().unwrap();
    assert_eq!(reference.to_string(), "{brand.primary}");
}
