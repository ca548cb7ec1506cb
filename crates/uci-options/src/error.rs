//! Error types for option validation and resolution.

use crate::value::ValueKind;

/// Which side of an inclusive range a value fell outside of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    TooSmall,
    TooLarge,
}

impl Bound {
    fn describe(self) -> &'static str {
        match self {
            Bound::TooSmall => "too small",
            Bound::TooLarge => "too large",
        }
    }
}

/// Rejection of a single `name = value` pair.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionError {
    /// No definition exists for this name
    #[error("unknown option '{name}'")]
    UnknownOption { name: String },

    /// Value kind differs from the definition
    #[error("invalid type for option '{name}': expected {expected}, got {actual}")]
    TypeMismatch {
        name: String,
        expected: ValueKind,
        actual: ValueKind,
    },

    /// Numeric value outside the declared bounds
    #[error(
        "value {value} for option '{name}' is {}, select a value in the range ({}, {})",
        .bound.describe(),
        fmt_bound(.min),
        fmt_bound(.max)
    )]
    OutOfRange {
        name: String,
        value: i64,
        min: Option<i64>,
        max: Option<i64>,
        bound: Bound,
    },

    /// Text could not be read as the option's kind
    #[error("cannot parse '{raw}' as {expected} for option '{name}'")]
    Parse {
        name: String,
        expected: ValueKind,
        raw: String,
    },
}

fn fmt_bound(b: &Option<i64>) -> String {
    b.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Failure of the dependency resolver.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// `Threads` is changing but there is no hash size to re-assert after it
    #[error("thread count changes but no current hash size is known")]
    MissingHash,
}
