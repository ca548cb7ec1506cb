//! Cross-option rules applied to a merged batch before anything is sent.
//!
//! Two rules live here:
//!
//! - Strength mode. Stockfish plays with whichever of `Skill Level` and
//!   `UCI_Elo` was last selected through `UCI_LimitStrength`. When a caller
//!   changes exactly one of the two and says nothing about the flag, the flag
//!   is set to match: `false` for a skill level, `true` for a rating.
//! - Threads before Hash. Changing `Threads` makes the engine resize its hash
//!   table, so `Hash` is always emitted right after `Threads`, re-sending the
//!   current size when the caller did not change it.

use crate::error::ResolveError;
use crate::store::Parameters;
use crate::table::{OPT_ELO, OPT_HASH, OPT_LIMIT_STRENGTH, OPT_SKILL_LEVEL, OPT_THREADS};
use crate::value::OptionValue;

/// Values to apply and the order to emit them in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub values: Parameters,
    /// Every key of `values` exactly once.
    pub order: Vec<String>,
}

impl Resolution {
    /// `(name, value)` pairs in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> + '_ {
        self.order.iter().filter_map(|name| self.values.get(name).map(|v| (name.as_str(), v)))
    }
}

/// Apply the cross-option rules.
///
/// `requested` is what the caller asked for; `pending` is that request merged
/// onto the current store. Inference looks only at `requested`, the values
/// come from `pending`.
pub fn resolve(
    requested: &Parameters,
    mut pending: Parameters,
) -> Result<Resolution, ResolveError> {
    let has_skill = requested.contains_key(OPT_SKILL_LEVEL);
    let has_elo = requested.contains_key(OPT_ELO);
    if has_skill != has_elo && !requested.contains_key(OPT_LIMIT_STRENGTH) {
        log::debug!("inferring {OPT_LIMIT_STRENGTH}={has_elo}");
        pending.insert(OPT_LIMIT_STRENGTH.to_string(), OptionValue::Bool(has_elo));
    }

    let threads_and_hash = match pending.remove(OPT_THREADS) {
        Some(threads) => {
            let hash = pending.remove(OPT_HASH).ok_or(ResolveError::MissingHash)?;
            Some((threads, hash))
        }
        None => None,
    };

    let mut order: Vec<String> = pending.keys().cloned().collect();
    if let Some((threads, hash)) = threads_and_hash {
        order.push(OPT_THREADS.to_string());
        order.push(OPT_HASH.to_string());
        pending.insert(OPT_THREADS.to_string(), threads);
        pending.insert(OPT_HASH.to_string(), hash);
    }

    Ok(Resolution { values: pending, order })
}
