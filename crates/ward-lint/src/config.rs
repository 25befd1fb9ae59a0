// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Lint options.

use serde::Deserialize;
use thiserror::Error;
use ward_model::CancellationFlag;

/// Options for lint.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LintOpts {
    /// Include rules matching these patterns (e.g., "dispose/*")
    pub rules: Vec<String>,
    /// Exclude rules matching these patterns
    pub excludes: Vec<String>,
    pub disposal: DisposalConfig,
    pub depth: ReachabilityDepth,
    #[serde(skip)]
    pub cancel: CancellationFlag,
}

impl Default for LintOpts {
    fn default() -> Self {
        Self {
            rules: Vec::new(),
            excludes: Vec::new(),
            disposal: DisposalConfig::default(),
            depth: ReachabilityDepth::OneHop,
            cancel: CancellationFlag::new(),
        }
    }
}

impl LintOpts {
    /// Parse options from JSON. Missing keys take their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let opts: LintOpts = serde_json::from_str(text)?;
        opts.validate()?;
        Ok(opts)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.disposal.capability.trim().is_empty() {
            return Err(ConfigError::invalid("disposal.capability", "must not be empty"));
        }
        if self.disposal.method.trim().is_empty() {
            return Err(ConfigError::invalid("disposal.method", "must not be empty"));
        }
        if self.depth == ReachabilityDepth::Bounded(0) {
            return Err(ConfigError::invalid("depth", "bounded depth must be at least 1"));
        }
        Ok(())
    }
}

/// Which contract marks a type as disposable, and what its release
/// method is called.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisposalConfig {
    pub capability: String,
    pub method: String,
}

impl Default for DisposalConfig {
    fn default() -> Self {
        Self {
            capability: "System.IDisposable".to_string(),
            method: "Dispose".to_string(),
        }
    }
}

/// How far from the disposal method to look for release calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReachabilityDepth {
    /// The disposal method and the same-type methods it calls directly.
    #[default]
    OneHop,
    /// Follow same-type calls up to this many hops.
    Bounded(u32),
}

impl ReachabilityDepth {
    pub fn hops(self) -> u32 {
        match self {
            ReachabilityDepth::OneHop => 1,
            ReachabilityDepth::Bounded(n) => n,
        }
    }
}

/// Error loading lint options.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid lint config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: &'static str) -> Self {
        ConfigError::Invalid { field, reason }
    }
}
