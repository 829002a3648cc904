//! Configuration system for yamlsmith.
//!
//! This module provides the configuration structure for yamlsmith with sensible defaults
//! and support for serialization/deserialization via serde. Configuration can be loaded
//! from TOML files and merged with command-line arguments.
//!
//! # Example
//!
//! ```
//! use yamlsmith::config::Config;
//!
//! // Use default configuration
//! let config = Config::default();
//! assert_eq!(config.indent, 2);
//! assert!(!config.follow_alias);
//!
//! // Create custom configuration
//! let custom = Config {
//!     indent: 4,
//!     ..Config::default()
//! };
//! assert_eq!(custom.encoder_options().indent, 4);
//! ```

use crate::document::encoder::EncoderOptions;
use crate::navigator::NavigationPrefs;
use crate::printer::PrinterOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for yamlsmith.
///
/// # Fields
///
/// * `indent` - Number of spaces per indentation level in output (default: 2)
/// * `unwrap_scalar` - Print plain string results without quotes (default: true)
/// * `print_document_separators` - Emit `---` between results of different documents (default: true)
/// * `follow_alias` - Resolve aliases and merge keys while traversing (default: false)
/// * `auto_create` - Create missing keys along assignment targets (default: true)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Number of spaces per indentation level
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// Print plain string results without quotes
    #[serde(default = "default_true")]
    pub unwrap_scalar: bool,

    /// Emit `---` when results move to another document
    #[serde(default = "default_true")]
    pub print_document_separators: bool,

    /// Resolve aliases and merge keys while traversing
    #[serde(default)]
    pub follow_alias: bool,

    /// Create missing keys along assignment targets
    #[serde(default = "default_true")]
    pub auto_create: bool,
}

/// Returns the default indentation size.
fn default_indent() -> usize {
    2
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indent: default_indent(),
            unwrap_scalar: true,
            print_document_separators: true,
            follow_alias: false,
            auto_create: true,
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/yamlsmith/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("yamlsmith");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Loads configuration from a specific file, falling back to defaults.
    ///
    /// A malformed file is reported with a warning.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "could not read config file, using defaults");
                return Self::default();
            }
        };
        match toml::from_str(&contents) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "invalid config file, using defaults");
                Self::default()
            }
        }
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&config_path)
    }

    /// Saves configuration to a specific file.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    pub fn navigation_prefs(&self) -> NavigationPrefs {
        NavigationPrefs {
            follow_alias: self.follow_alias,
            auto_create: self.auto_create,
        }
    }

    pub fn encoder_options(&self) -> EncoderOptions {
        EncoderOptions {
            indent: self.indent,
        }
    }

    pub fn printer_options(&self) -> PrinterOptions {
        PrinterOptions {
            encoder: self.encoder_options(),
            unwrap_scalar: self.unwrap_scalar,
            print_document_separators: self.print_document_separators,
        }
    }
}
