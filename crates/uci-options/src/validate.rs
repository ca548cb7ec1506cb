//! Per-entry type and range checks.

use crate::error::{Bound, OptionError};
use crate::table::RestrictionTable;
use crate::value::OptionValue;

/// Check `name = value` against its definition in `table`.
///
/// Integer bounds are only consulted when the definition declares a lower
/// bound; an upper bound without a lower bound is not enforced.
pub fn validate(
    table: &RestrictionTable,
    name: &str,
    value: &OptionValue,
) -> Result<(), OptionError> {
    let Some(def) = table.lookup(name) else {
        return Err(OptionError::UnknownOption { name: name.to_string() });
    };

    if value.kind() != def.kind {
        return Err(OptionError::TypeMismatch {
            name: name.to_string(),
            expected: def.kind,
            actual: value.kind(),
        });
    }

    if let (&OptionValue::Int(v), Some(min)) = (value, def.min) {
        let out_of_range = |bound| OptionError::OutOfRange {
            name: name.to_string(),
            value: v,
            min: def.min,
            max: def.max,
            bound,
        };
        if v < min {
            return Err(out_of_range(Bound::TooSmall));
        }
        if def.max.is_some_and(|max| v > max) {
            return Err(out_of_range(Bound::TooLarge));
        }
    }

    Ok(())
}
