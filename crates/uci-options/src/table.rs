//! Restriction table: the registry of known engine options.
//!
//! The table is immutable static data. Callers reach it through
//! [`RestrictionTable::stockfish`] and only ever read from it.

use crate::value::ValueKind;

pub const OPT_DEBUG_LOG_FILE: &str = "Debug Log File";
pub const OPT_THREADS: &str = "Threads";
pub const OPT_HASH: &str = "Hash";
pub const OPT_PONDER: &str = "Ponder";
pub const OPT_MULTI_PV: &str = "MultiPV";
pub const OPT_SKILL_LEVEL: &str = "Skill Level";
pub const OPT_MOVE_OVERHEAD: &str = "Move Overhead";
pub const OPT_SLOW_MOVER: &str = "Slow Mover";
pub const OPT_CHESS960: &str = "UCI_Chess960";
pub const OPT_LIMIT_STRENGTH: &str = "UCI_LimitStrength";
pub const OPT_ELO: &str = "UCI_Elo";
pub const OPT_CONTEMPT: &str = "Contempt";
pub const OPT_MIN_SPLIT_DEPTH: &str = "Min Split Depth";
pub const OPT_MINIMUM_THINKING_TIME: &str = "Minimum Thinking Time";
pub const OPT_SHOW_WDL: &str = "UCI_ShowWDL";

/// Type and bounds of one option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionDefinition {
    pub name: &'static str,
    pub kind: ValueKind,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl OptionDefinition {
    pub const fn int(name: &'static str, min: i64, max: i64) -> Self {
        Self {
            name,
            kind: ValueKind::Int,
            min: Some(min),
            max: Some(max),
        }
    }

    pub const fn check(name: &'static str) -> Self {
        Self {
            name,
            kind: ValueKind::Bool,
            min: None,
            max: None,
        }
    }

    pub const fn string(name: &'static str) -> Self {
        Self {
            name,
            kind: ValueKind::String,
            min: None,
            max: None,
        }
    }
}

#[derive(Debug)]
pub struct RestrictionTable {
    definitions: &'static [OptionDefinition],
}

static STOCKFISH: RestrictionTable = RestrictionTable {
    definitions: &[
        OptionDefinition::string(OPT_DEBUG_LOG_FILE),
        OptionDefinition::int(OPT_THREADS, 1, 1024),
        OptionDefinition::int(OPT_HASH, 1, 2048),
        OptionDefinition::check(OPT_PONDER),
        OptionDefinition::int(OPT_MULTI_PV, 1, 500),
        OptionDefinition::int(OPT_SKILL_LEVEL, 0, 20),
        OptionDefinition::int(OPT_MOVE_OVERHEAD, 0, 5000),
        OptionDefinition::int(OPT_SLOW_MOVER, 10, 1000),
        OptionDefinition::check(OPT_CHESS960),
        OptionDefinition::check(OPT_LIMIT_STRENGTH),
        OptionDefinition::int(OPT_ELO, 1320, 3190),
        OptionDefinition::int(OPT_CONTEMPT, -100, 100),
        OptionDefinition::int(OPT_MIN_SPLIT_DEPTH, 0, 12),
        OptionDefinition::int(OPT_MINIMUM_THINKING_TIME, 0, 5000),
        OptionDefinition::check(OPT_SHOW_WDL),
    ],
};

impl RestrictionTable {
    /// A table over caller-supplied definitions. Names must be unique.
    pub const fn new(definitions: &'static [OptionDefinition]) -> Self {
        Self { definitions }
    }

    /// The Stockfish option set.
    pub fn stockfish() -> &'static RestrictionTable {
        &STOCKFISH
    }

    pub fn lookup(&self, name: &str) -> Option<&OptionDefinition> {
        self.definitions.iter().find(|d| d.name == name)
    }

    pub fn definitions(&self) -> &[OptionDefinition] {
        self.definitions
    }
}

/// Stockfish major releases and their publication dates.
pub const STOCKFISH_RELEASES: &[(&str, &str)] = &[
    ("16.0", "2023-06-30"),
    ("15.1", "2022-12-04"),
    ("15.0", "2022-04-18"),
    ("14.1", "2021-10-28"),
    ("14.0", "2021-07-02"),
    ("13.0", "2021-02-19"),
    ("12.0", "2020-09-02"),
    ("11.0", "2020-01-18"),
    ("10.0", "2018-11-29"),
];

/// Release date for a version such as `"15.1"`. A bare major (`"16"`) matches `"16.0"`.
pub fn release_date(version: &str) -> Option<&'static str> {
    let version = version.trim();
    let normalized =
        if version.contains('.') { version.to_string() } else { format!("{version}.0") };
    STOCKFISH_RELEASES.iter().find(|(v, _)| *v == normalized).map(|(_, date)| *date)
}
