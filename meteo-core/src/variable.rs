//! Named numeric weather variables.

use std::collections::HashMap;

use crate::error::{EntryKind, MeteoError, Result};

/// Mapping from variable name to value. Names are unique; defining an existing
/// name overwrites it.
#[derive(Debug, Clone, Default)]
pub struct VariableStore {
    variables: HashMap<String, f64>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `name`, returning the value it replaced.
    pub fn define(&mut self, name: impl Into<String>, value: f64) -> Option<f64> {
        self.variables.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Result<f64> {
        self.variables
            .get(name)
            .copied()
            .ok_or_else(|| MeteoError::not_found(EntryKind::Variable, name))
    }

    /// Delete `name`, returning the value it held.
    pub fn remove(&mut self, name: &str) -> Result<f64> {
        self.variables
            .remove(name)
            .ok_or_else(|| MeteoError::not_found(EntryKind::Variable, name))
    }

    /// Every `(name, value)` pair sorted by name, or `None` when nothing is defined.
    pub fn list(&self) -> Option<Vec<(&str, f64)>> {
        if self.variables.is_empty() {
            return None;
        }

        let mut pairs: Vec<(&str, f64)> =
            self.variables.iter().map(|(name, value)| (name.as_str(), *value)).collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));
        Some(pairs)
    }

    /// The backing map, suitable for handing to the exporters.
    pub fn as_map(&self) -> &HashMap<String, f64> {
        &self.variables
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for VariableStore {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self { variables: iter.into_iter().map(|(k, v)| (k.into(), v)).collect() }
    }
}
