//! Collection configuration via `subdoc.toml`
//!
//! A default file can be written on first use. To change settings, edit
//! the file and reload it with [`SubdocConfig::from_file`].

use serde::{Deserialize, Serialize};
use std::path::Path;
use subdoc_core::{Error, Result, MAX_OPERATIONS};
use tracing::info;

/// Config file name.
pub const CONFIG_FILE_NAME: &str = "subdoc.toml";

/// What `mutate_in` does with the whole document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreSemantics {
    /// The document must exist
    #[default]
    Replace,
    /// A missing document starts as `{}`
    Upsert,
    /// The document must not exist; it starts as `{}`
    Insert,
}

/// Collection configuration loaded from `subdoc.toml`.
///
/// # Example
///
/// ```toml
/// max_operations = 16
/// require_cas = false
/// store_semantics = "replace"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubdocConfig {
    /// Operations allowed in one batch, `1..=16`.
    #[serde(default = "default_max_operations")]
    pub max_operations: usize,
    /// Reject mutation batches that carry no CAS.
    #[serde(default)]
    pub require_cas: bool,
    /// Default document handling for `mutate_in`.
    #[serde(default)]
    pub store_semantics: StoreSemantics,
}

fn default_max_operations() -> usize {
    MAX_OPERATIONS
}

impl Default for SubdocConfig {
    fn default() -> Self {
        Self {
            max_operations: default_max_operations(),
            require_cas: false,
            store_semantics: StoreSemantics::default(),
        }
    }
}

impl SubdocConfig {
    /// Check that every setting is in range.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if `max_operations` is outside `1..=16`.
    pub fn validate(&self) -> Result<()> {
        if self.max_operations == 0 || self.max_operations > MAX_OPERATIONS {
            return Err(Error::InvalidConfig(format!(
                "max_operations must be between 1 and {}, got {}",
                MAX_OPERATIONS, self.max_operations
            )));
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Sub-document collection configuration
#
# Maximum operations in one lookup or mutation batch (1-16, default 16)
max_operations = 16

# Reject mutation batches that do not carry a CAS (default: false)
require_cas = false

# Whole-document handling for mutations:
#   "replace" = the document must already exist (default)
#   "upsert"  = a missing document is created as {}
#   "insert"  = the document must not exist yet; it is created as {}
store_semantics = "replace"
"#
    }

    /// Parse and validate config from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SubdocConfig = toml::from_str(content)
            .map_err(|e| Error::InvalidConfig(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Internal(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: SubdocConfig = toml::from_str(&content).map_err(|e| {
            Error::InvalidConfig(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        info!(
            target: "subdoc::config",
            path = %path.display(),
            max_operations = config.max_operations,
            require_cas = config.require_cas,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                Error::Internal(format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Internal(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            Error::Internal(format!(
                "Failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }
}
