//! # Rules Configuration
//!
//! Loads a [`RulesConfig`] from YAML and turns it into [`NameRules`].
//!
//! ```yaml
//! organisation_policy: permissive
//! extra_country_codes:
//!   - XK
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use mxn_core::{NameRules, RulesConfig};

/// Resolve the rules to validate against.
///
/// With no path the default rules apply. A given path must exist and hold a
/// valid configuration.
pub fn load_rules(path: Option<&Path>) -> Result<NameRules> {
    let Some(path) = path else {
        tracing::debug!("no rules config given; using defaults");
        return Ok(NameRules::default());
    };
    let config = load_config(path)?;
    tracing::info!(
        path = %path.display(),
        policy = ?config.organisation_policy,
        extra_country_codes = config.extra_country_codes.len(),
        "loaded rules config"
    );
    config
        .into_rules()
        .with_context(|| format!("invalid rules config {}", path.display()))
}

/// Read and deserialize a rules file without building rules from it.
pub fn load_config(path: &Path) -> Result<RulesConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read rules config {}", path.display()))?;
    // An empty document deserializes as unit, not as an empty mapping.
    if content.trim().is_empty() {
        return Ok(RulesConfig::default());
    }
    serde_yaml::from_str(&content)
        .with_context(|| format!("failed to parse rules config {}", path.display()))
}
