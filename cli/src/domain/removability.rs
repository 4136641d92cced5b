//! Per-cycle removability table.
//!
//! Built fresh every cycle from the runtime inventory and then adjusted by
//! the liveness classifier. Pure data, no I/O.

use std::collections::BTreeMap;

use netjanitor_common::{NetworkName, is_janitor_network};

/// Network name → removable flag for one reconciliation cycle.
///
/// Only names following the janitor's naming convention can ever hold
/// `true`; everything else the runtime reports is recorded as `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemovabilityTable {
    entries: BTreeMap<String, bool>,
}

impl RemovabilityTable {
    /// Seed the table from a runtime inventory. Janitor-owned names start as
    /// removal candidates, all others are pinned to `false`.
    pub fn seed<I, S>(inventory: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = inventory
            .into_iter()
            .map(|name| {
                let name = name.into();
                let candidate = is_janitor_network(&name);
                (name, candidate)
            })
            .collect();
        Self { entries }
    }

    /// Mark a job network as removable, overriding any earlier decision.
    ///
    /// Returns `false` (and leaves the table unchanged) when the name does
    /// not follow the naming convention.
    pub fn mark_removable(&mut self, name: &NetworkName) -> bool {
        if !is_janitor_network(name.as_str()) {
            return false;
        }
        self.entries.insert(name.as_str().to_string(), true);
        true
    }

    /// Mark a job network as in use.
    pub fn mark_kept(&mut self, name: &NetworkName) {
        self.entries.insert(name.as_str().to_string(), false);
    }

    /// Current decision for `name`, if the table knows it.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<bool> {
        self.entries.get(name).copied()
    }

    /// Names to remove this cycle, in sorted order.
    pub fn removable(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, removable)| **removable)
            .map(|(name, _)| name.as_str())
    }

    /// Names that must stay this cycle, in sorted order.
    pub fn kept(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, removable)| !**removable)
            .map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
