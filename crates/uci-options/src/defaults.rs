//! Default Stockfish parameters applied when a session is not given its own.

use crate::store::Parameters;
use crate::table::{
    OPT_CHESS960, OPT_CONTEMPT, OPT_DEBUG_LOG_FILE, OPT_ELO, OPT_HASH, OPT_LIMIT_STRENGTH,
    OPT_MIN_SPLIT_DEPTH, OPT_MINIMUM_THINKING_TIME, OPT_MOVE_OVERHEAD, OPT_MULTI_PV, OPT_PONDER,
    OPT_SKILL_LEVEL, OPT_SLOW_MOVER, OPT_THREADS,
};
use crate::value::OptionValue;

/// Build a fresh copy of the default parameter set.
pub fn default_parameters() -> Parameters {
    [
        (OPT_DEBUG_LOG_FILE, OptionValue::from("")),
        (OPT_CONTEMPT, OptionValue::Int(0)),
        (OPT_MIN_SPLIT_DEPTH, OptionValue::Int(0)),
        (OPT_THREADS, OptionValue::Int(1)),
        (OPT_PONDER, OptionValue::Bool(false)),
        (OPT_HASH, OptionValue::Int(16)),
        (OPT_MULTI_PV, OptionValue::Int(1)),
        (OPT_SKILL_LEVEL, OptionValue::Int(20)),
        (OPT_MOVE_OVERHEAD, OptionValue::Int(10)),
        (OPT_MINIMUM_THINKING_TIME, OptionValue::Int(20)),
        (OPT_SLOW_MOVER, OptionValue::Int(100)),
        (OPT_CHESS960, OptionValue::Bool(false)),
        (OPT_LIMIT_STRENGTH, OptionValue::Bool(false)),
        (OPT_ELO, OptionValue::Int(1350)),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), value))
    .collect()
}
