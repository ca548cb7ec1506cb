//! Parameter store: the last values known to have been applied to the engine.

use std::collections::BTreeMap;

use crate::defaults::default_parameters;
use crate::error::OptionError;
use crate::table::RestrictionTable;
use crate::validate::validate;
use crate::value::OptionValue;

/// Option name to value, ordered by name.
pub type Parameters = BTreeMap<String, OptionValue>;

#[derive(Debug, Clone)]
pub struct ParameterStore {
    table: &'static RestrictionTable,
    values: Parameters,
}

impl ParameterStore {
    /// Seed a store from `initial`. Every entry must validate against `table`.
    pub fn new(
        table: &'static RestrictionTable,
        initial: Parameters,
    ) -> Result<Self, OptionError> {
        for (name, value) in &initial {
            validate(table, name, value)?;
        }
        Ok(Self { table, values: initial })
    }

    pub fn with_defaults(table: &'static RestrictionTable) -> Result<Self, OptionError> {
        Self::new(table, default_parameters())
    }

    pub fn table(&self) -> &'static RestrictionTable {
        self.table
    }

    /// Independent copy of the current values.
    pub fn snapshot(&self) -> Parameters {
        self.values.clone()
    }

    /// Replace the stored value of every key in `changes`.
    ///
    /// Callers validate and resolve the whole batch first; nothing is checked here.
    pub fn commit(&mut self, changes: Parameters) {
        self.values.extend(changes);
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
