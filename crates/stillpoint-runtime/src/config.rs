#![forbid(unsafe_code)]

//! Scroll-spy tuning as data.
//!
//! The lookahead bias and the overlap tie-break are observed behaviours of
//! the page rather than hard requirements, so both live here instead of being
//! baked into the classifier.
//!
//! # Loading
//!
//! ```toml
//! # stillpoint.toml
//! lookahead_bias = 72.0
//! match_policy = "first_declared"
//! ```
//!
//! ```rust,ignore
//! let config = ScrollSpyConfig::from_toml_file("stillpoint.toml")?;
//! let config = ScrollSpyConfig::from_json_str(r#"{"lookahead_bias": 64.0}"#)?;
//! ```

#[cfg(feature = "policy-config")]
use std::path::Path;

#[cfg(feature = "policy-config")]
use serde::{Deserialize, Serialize};

use stillpoint_layout::{DEFAULT_LOOKAHEAD_BIAS, MatchPolicy};

/// Scroll observer configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "policy-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "policy-config", serde(default))]
pub struct ScrollSpyConfig {
    /// Pixels added to the raw scroll distance before classification.
    /// Default: 100.
    pub lookahead_bias: f64,
    /// Overlap tie-break. Default: first declared wins.
    pub match_policy: MatchPolicy,
}

impl Default for ScrollSpyConfig {
    fn default() -> Self {
        Self {
            lookahead_bias: DEFAULT_LOOKAHEAD_BIAS,
            match_policy: MatchPolicy::FirstDeclared,
        }
    }
}

impl ScrollSpyConfig {
    #[must_use]
    pub fn with_lookahead_bias(mut self, bias: f64) -> Self {
        self.lookahead_bias = bias;
        self
    }

    #[must_use]
    pub fn with_match_policy(mut self, policy: MatchPolicy) -> Self {
        self.match_policy = policy;
        self
    }

    /// Load from a TOML string and validate.
    #[cfg(feature = "policy-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        config.validated()
    }

    #[cfg(feature = "policy-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string and validate.
    #[cfg(feature = "policy-config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        config.validated()
    }

    #[cfg(feature = "policy-config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Validation problems; empty means the config is usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !self.lookahead_bias.is_finite() {
            errors.push(format!(
                "lookahead_bias must be finite, got {}",
                self.lookahead_bias
            ));
        } else if self.lookahead_bias < 0.0 {
            errors.push(format!(
                "lookahead_bias must be >= 0, got {}",
                self.lookahead_bias
            ));
        }
        errors
    }

    /// `self` if valid, otherwise [`ConfigError::Validation`].
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// One JSONL line for structured logs.
    #[must_use]
    pub fn to_jsonl(&self) -> String {
        let policy = match self.match_policy {
            MatchPolicy::FirstDeclared => "first_declared",
            MatchPolicy::LastDeclared => "last_declared",
        };
        format!(
            r#"{{"schema":"scrollspy-config-v1","lookahead_bias":{},"match_policy":"{}"}}"#,
            self.lookahead_bias, policy
        )
    }
}

/// Errors loading a [`ScrollSpyConfig`].
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    #[cfg(feature = "policy-config")]
    Toml(toml::de::Error),
    #[cfg(feature = "policy-config")]
    Json(serde_json::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "policy-config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "policy-config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => write!(f, "validation errors: {}", errors.join("; ")),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "policy-config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "policy-config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
