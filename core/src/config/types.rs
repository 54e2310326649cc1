//! Configuration types for the route table
//!
//! Core only accepts fully resolved, validated configuration.
//! All discovery, loading, and merging happens in the CLI layer.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};

/// Upper bound on navigation history entries
pub const MAX_HISTORY_LIMIT: usize = 1000;

fn default_true() -> bool {
    true
}

fn default_max_history() -> usize {
    50
}

/// Resolved settings for matching URLs and keeping navigation history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeskConfig {
    /// Prefix the console is mounted under, e.g. `/admin`
    #[serde(default)]
    pub base_path: Option<String>,
    /// Treat `/questions/` and `/questions` as different paths
    #[serde(default)]
    pub strict_trailing_slash: bool,
    /// Compare literal path segments case-sensitively
    #[serde(default = "default_true")]
    pub case_sensitive: bool,
    /// Keep a back-stack of mounted URLs
    #[serde(default = "default_true")]
    pub enable_history: bool,
    /// Maximum number of history entries
    #[serde(default = "default_max_history")]
    pub max_history: usize,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            base_path: None,
            strict_trailing_slash: false,
            case_sensitive: true,
            enable_history: true,
            max_history: default_max_history(),
        }
    }
}

impl DeskConfig {
    /// Set the mount prefix
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }

    /// Require exact trailing-slash matches
    pub fn with_strict_trailing_slash(mut self, strict: bool) -> Self {
        self.strict_trailing_slash = strict;
        self
    }

    /// Choose whether literal segments compare case-sensitively
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Disable navigation history
    pub fn without_history(mut self) -> Self {
        self.enable_history = false;
        self
    }

    /// Set maximum history size
    pub fn with_max_history(mut self, max_history: usize) -> Self {
        self.max_history = max_history;
        self
    }

    /// Parse a JSON document and validate it
    pub fn from_json(content: &str) -> Result<Self> {
        let config: DeskConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if let Some(base) = &self.base_path {
            if !base.starts_with('/') || (base.len() > 1 && base.ends_with('/')) {
                return Err(ConfigError::InvalidValue {
                    field: "base_path".to_string(),
                    value: base.clone(),
                });
            }
        }

        if self.max_history > MAX_HISTORY_LIMIT {
            return Err(ConfigError::InvalidValue {
                field: "max_history".to_string(),
                value: self.max_history.to_string(),
            });
        }

        Ok(())
    }

    /// Effective base path, ignoring a bare `/`
    pub fn mount_prefix(&self) -> Option<&str> {
        self.base_path.as_deref().filter(|base| *base != "/")
    }
}
