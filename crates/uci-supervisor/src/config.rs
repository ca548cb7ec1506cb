//! Supervisor configuration file.
//!
//! ```toml
//! [engine]
//! path = "/usr/bin/stockfish"
//! depth = 18
//!
//! [options]
//! Threads = 4
//! Hash = 256
//! "Skill Level" = 12
//! ```
//!
//! `[options]` is applied as an update on top of the default parameters.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use uci_options::{OptionError, OptionValue, Parameters, RestrictionTable};

use crate::engine::{DEFAULT_DEPTH, DEFAULT_NUM_NODES, EngineConfig};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SupervisorConfig {
    pub engine: EngineSection,
    #[serde(default)]
    pub options: Parameters,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineSection {
    pub path: PathBuf,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default = "default_depth")]
    pub depth: u32,
    #[serde(default = "default_num_nodes")]
    pub num_nodes: u64,
    #[serde(default = "default_true")]
    pub turn_perspective: bool,
    #[serde(default)]
    pub debug_view: bool,
}

fn default_depth() -> u32 {
    DEFAULT_DEPTH
}

fn default_num_nodes() -> u64 {
    DEFAULT_NUM_NODES
}

fn default_true() -> bool {
    true
}

impl SupervisorConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Engine configuration that starts from the defaults and applies
    /// `[options]` as one update on top of them.
    pub fn into_engine_config(self) -> EngineConfig {
        EngineConfig {
            path: self.engine.path,
            args: self.engine.args,
            depth: self.engine.depth,
            num_nodes: self.engine.num_nodes,
            turn_perspective: self.engine.turn_perspective,
            debug_view: self.engine.debug_view,
            parameters: None,
            overrides: self.options,
        }
    }
}

/// Parse a `Name=Value` assignment, reading the value as the option's kind.
pub fn parse_option_assignment(
    table: &RestrictionTable,
    spec: &str,
) -> Result<(String, OptionValue), OptionError> {
    let (name, raw) = spec.split_once('=').unwrap_or((spec, ""));
    let name = name.trim();
    let def = table
        .lookup(name)
        .ok_or_else(|| OptionError::UnknownOption { name: name.to_string() })?;
    let value = OptionValue::parse_as(def.kind, name, raw)?;
    Ok((name.to_string(), value))
}
