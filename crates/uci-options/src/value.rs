//! Typed option values.
//!
//! Engine options come in three kinds. Values are kept as a closed union so the
//! validator can match exhaustively instead of probing a dynamic type.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::OptionError;

/// The value kind an option definition declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Int,
    Bool,
    String,
}

impl ValueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Int => "int",
            ValueKind::Bool => "bool",
            ValueKind::String => "string",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single option value.
///
/// Deserializes untagged, so `Threads = 4`, `Ponder = true` and
/// `"Debug Log File" = ""` in TOML or JSON map onto the matching variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Int(i64),
    Bool(bool),
    String(String),
}

impl OptionValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            OptionValue::Int(_) => ValueKind::Int,
            OptionValue::Bool(_) => ValueKind::Bool,
            OptionValue::String(_) => ValueKind::String,
        }
    }

    /// Parse the textual form of a value for an option of the given kind.
    ///
    /// Booleans accept only `true` / `false` (the tokens the engine prints),
    /// integers accept an optional sign and decimal digits, strings are taken
    /// verbatim.
    pub fn parse_as(kind: ValueKind, name: &str, raw: &str) -> Result<Self, OptionError> {
        let parse_err = || OptionError::Parse {
            name: name.to_string(),
            expected: kind,
            raw: raw.to_string(),
        };
        match kind {
            ValueKind::Int => {
                raw.trim().parse::<i64>().map(OptionValue::Int).map_err(|_| parse_err())
            }
            ValueKind::Bool => match raw.trim() {
                "true" => Ok(OptionValue::Bool(true)),
                "false" => Ok(OptionValue::Bool(false)),
                _ => Err(parse_err()),
            },
            ValueKind::String => Ok(OptionValue::String(raw.to_string())),
        }
    }
}

/// Renders the `<Value>` token of a `setoption` command.
impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Int(v) => write!(f, "{v}"),
            OptionValue::Bool(v) => f.write_str(if *v { "true" } else { "false" }),
            OptionValue::String(v) => f.write_str(v),
        }
    }
}

impl From<i64> for OptionValue {
    fn from(v: i64) -> Self {
        OptionValue::Int(v)
    }
}

impl From<i32> for OptionValue {
    fn from(v: i32) -> Self {
        OptionValue::Int(i64::from(v))
    }
}

impl From<bool> for OptionValue {
    fn from(v: bool) -> Self {
        OptionValue::Bool(v)
    }
}

impl From<&str> for OptionValue {
    fn from(v: &str) -> Self {
        OptionValue::String(v.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(v: String) -> Self {
        OptionValue::String(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_wire_tokens() {
        assert_eq!(OptionValue::Int(-42).to_string(), "-42");
        assert_eq!(OptionValue::Bool(true).to_string(), "true");
        assert_eq!(OptionValue::Bool(false).to_string(), "false");
        assert_eq!(OptionValue::from("log.txt").to_string(), "log.txt");
    }

    #[test]
    fn parse_as_respects_kind() {
        assert_eq!(
            OptionValue::parse_as(ValueKind::Int, "Hash", " 256 ").unwrap(),
            OptionValue::Int(256)
        );
        assert_eq!(
            OptionValue::parse_as(ValueKind::Bool, "Ponder", "true").unwrap(),
            OptionValue::Bool(true)
        );
        assert_eq!(
            OptionValue::parse_as(ValueKind::String, "Debug Log File", "a b").unwrap(),
            OptionValue::from("a b")
        );

        let err = OptionValue::parse_as(ValueKind::Bool, "Ponder", "yes").unwrap_err();
        assert!(matches!(err, OptionError::Parse { expected: ValueKind::Bool, .. }));
        assert!(OptionValue::parse_as(ValueKind::Int, "Threads", "four").is_err());
    }

    #[test]
    fn untagged_deserialization_picks_variant() {
        let v: Vec<OptionValue> = serde_json::from_str(r#"[4, false, "x"]"#).unwrap();
        assert_eq!(v, vec![OptionValue::Int(4), OptionValue::Bool(false), OptionValue::from("x")]);
    }
}
