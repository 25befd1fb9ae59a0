// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Field synthesis options.

use serde::Deserialize;
use thiserror::Error;

/// How synthesized fields look.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SynthesisConfig {
    /// Prepended to the capitalized parameter name. Empty means the field
    /// takes the lower-camel parameter name.
    pub field_prefix: String,
    pub readonly: bool,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            field_prefix: "m".to_string(),
            readonly: true,
        }
    }
}

impl SynthesisConfig {
    /// Parse options from JSON. Missing keys take their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: SynthesisConfig = serde_json::from_str(text)?;
        let prefix = &config.field_prefix;
        let bad = match prefix.chars().next() {
            Some(first) if first.is_ascii_digit() => Some(first),
            _ => prefix.chars().find(|c| !(c.is_alphanumeric() || *c == '_')),
        };
        if let Some(bad) = bad {
            return Err(ConfigError::InvalidPrefix {
                prefix: config.field_prefix,
                bad,
            });
        }
        Ok(config)
    }
}

/// Error loading synthesis options.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid synthesis config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("field prefix `{prefix}` cannot start an identifier (`{bad}`)")]
    InvalidPrefix { prefix: String, bad: char },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SynthesisConfig::from_json("{}").unwrap();
        assert_eq!(config, SynthesisConfig::default());
        assert_eq!(config.field_prefix, "m");
        assert!(config.readonly);
    }

    #[test]
    fn overrides() {
        let config =
            SynthesisConfig::from_json(r#"{ "field_prefix": "_", "readonly": false }"#).unwrap();
        assert_eq!(config.field_prefix, "_");
        assert!(!config.readonly);
    }

    #[test]
    fn rejects_bad_prefixes() {
        assert!(matches!(
            SynthesisConfig::from_json(r#"{ "field_prefix": "m-" }"#),
            Err(ConfigError::InvalidPrefix { bad: '-', .. })
        ));
        assert!(matches!(
            SynthesisConfig::from_json(r#"{ "field_prefix": "1m" }"#),
            Err(ConfigError::InvalidPrefix { bad: '1', .. })
        ));
        assert!(matches!(
            SynthesisConfig::from_json(r#"{ "prefix": "m" }"#),
            Err(ConfigError::Parse(_))
        ));
    }
}
