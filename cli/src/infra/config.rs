//! Loads the optional YAML config file.

use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::config::ConfigLayer;

/// Read a YAML config file into a [`ConfigLayer`].
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid YAML for the
/// config schema. A missing file is an error.
pub fn load_config_file(path: &Path) -> Result<ConfigLayer> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(ConfigLayer::default());
    }
    serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
}
