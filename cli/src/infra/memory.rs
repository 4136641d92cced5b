//! In-memory `NetworkRuntime` for tests and local experiments.

use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use anyhow::Result;

use crate::application::ports::NetworkRuntime;

#[derive(Debug, Default)]
struct State {
    networks: BTreeSet<String>,
    refused: BTreeSet<String>,
    listing_fails: bool,
    remove_requests: Vec<String>,
}

/// A container runtime that only exists in memory.
///
/// Removal of an unknown network fails the way `docker network rm` does.
#[derive(Debug, Default)]
pub struct InMemoryRuntime {
    state: Mutex<State>,
}

impl InMemoryRuntime {
    pub fn with_networks<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let runtime = Self::default();
        runtime.lock().networks = names.into_iter().map(Into::into).collect();
        runtime
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_network(&self, name: impl Into<String>) {
        self.lock().networks.insert(name.into());
    }

    /// Make `list_networks` fail until called again with `false`.
    pub fn fail_listing(&self, fail: bool) {
        self.lock().listing_fails = fail;
    }

    /// Make removal of `name` fail, e.g. a network with active endpoints.
    pub fn refuse_removal(&self, name: impl Into<String>) {
        self.lock().refused.insert(name.into());
    }

    /// Networks currently present, sorted.
    #[must_use]
    pub fn networks(&self) -> Vec<String> {
        self.lock().networks.iter().cloned().collect()
    }

    /// Every `remove_network` call in order, successful or not.
    #[must_use]
    pub fn remove_requests(&self) -> Vec<String> {
        self.lock().remove_requests.clone()
    }
}

impl NetworkRuntime for InMemoryRuntime {
    async fn list_networks(&self) -> Result<Vec<String>> {
        let state = self.lock();
        if state.listing_fails {
            anyhow::bail!("Cannot connect to the container runtime");
        }
        Ok(state.networks.iter().cloned().collect())
    }

    async fn remove_network(&self, name: &str) -> Result<()> {
        let mut state = self.lock();
        state.remove_requests.push(name.to_string());
        if state.refused.contains(name) {
            anyhow::bail!("error while removing network: network {name} has active endpoints");
        }
        if !state.networks.remove(name) {
            anyhow::bail!("Error: No such network: {name}");
        }
        Ok(())
    }
}
