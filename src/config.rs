//! Configuration file support.
//!
//! An optional TOML file can replace the built-in category table and list
//! files that must stay where they are:
//!
//! ```toml
//! [[categories]]
//! name = "Images"
//! extensions = [".png", "jpg"]
//!
//! [exclude]
//! filenames = ["desktop.ini"]
//! extensions = ["part"]
//! patterns = ["*.crdownload"]
//! regex = ["^~\\$"]
//! ```
//!
//! When `categories` is absent the default table is used. Exclusion rules are
//! matched against the file name only, since organizing never descends into
//! subdirectories.

use crate::category_table::{CategoryTable, TableError, normalize_extension};
use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the current directory.
pub const LOCAL_CONFIG_FILE: &str = ".foldersortrc.toml";

/// Errors that can occur while loading configuration.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    ConfigNotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    ConfigInvalid(String),
    /// Invalid glob pattern provided.
    InvalidGlobPattern(String),
    /// Invalid regex pattern provided with the actual error reason.
    InvalidRegexPattern { pattern: String, reason: String },
    /// The configured categories do not form a valid table.
    InvalidTable(TableError),
    /// IO error while reading configuration.
    IoError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigNotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::ConfigInvalid(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::InvalidGlobPattern(pattern) => {
                write!(f, "Invalid glob pattern '{}'", pattern)
            }
            ConfigError::InvalidRegexPattern { pattern, reason } => {
                write!(f, "Invalid regex pattern '{}': {}", pattern, reason)
            }
            ConfigError::InvalidTable(e) => write!(f, "Invalid category table: {}", e),
            ConfigError::IoError(msg) => write!(f, "IO error reading configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<TableError> for ConfigError {
    fn from(e: TableError) -> Self {
        ConfigError::InvalidTable(e)
    }
}

/// Deserialized configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Replacement category table, in lookup order.
    #[serde(default)]
    pub categories: Option<Vec<CategorySpec>>,

    /// Files to leave in place.
    #[serde(default)]
    pub exclude: ExcludeRules,
}

/// One `[[categories]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySpec {
    pub name: String,
    #[serde(default)]
    pub extensions: Vec<String>,
}

/// Rules for leaving files out of organization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExcludeRules {
    /// Exact filenames to exclude (e.g., "desktop.ini").
    #[serde(default)]
    pub filenames: Vec<String>,

    /// File extensions to exclude, with or without the dot.
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Glob patterns matched against the file name (e.g., "*.crdownload").
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Regex patterns matched against the file name.
    #[serde(default)]
    pub regex: Vec<String>,
}

impl Config {
    /// Load configuration from a file, with fallback to defaults.
    ///
    /// Attempts to load configuration in the following order:
    /// 1. If `config_path` is provided, load from that file
    /// 2. Look for `.foldersortrc.toml` in the current directory
    /// 3. Look for `~/.config/foldersort/config.toml` in home directory
    /// 4. Fall back to default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is explicitly provided but cannot be read,
    /// or if any discovered file is malformed.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("foldersort")
                .join("config.toml");
            if home_config.exists() {
                return Self::load_from_file(&home_config);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigNotFound` if file does not exist.
    /// Returns `ConfigError::ConfigInvalid` if TOML parsing fails.
    /// Returns `ConfigError::IoError` if file cannot be read.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))
    }

    /// Builds the category table: the configured one, or the default.
    pub fn category_table(&self) -> Result<CategoryTable, ConfigError> {
        match &self.categories {
            Some(specs) => Ok(CategoryTable::new(
                specs
                    .iter()
                    .map(|spec| (spec.name.clone(), spec.extensions.clone())),
            )?),
            None => Ok(CategoryTable::default()),
        }
    }

    /// Compile exclusion rules into matchers.
    ///
    /// # Errors
    ///
    /// Returns an error if any regex or glob patterns are invalid.
    pub fn compile_filters(&self) -> Result<CompiledFilters, ConfigError> {
        CompiledFilters::new(&self.exclude)
    }
}

/// Pre-compiled exclusion rules.
#[derive(Debug, Clone, Default)]
pub struct CompiledFilters {
    filenames: HashSet<String>,
    extensions: HashSet<String>,
    patterns: Vec<Pattern>,
    regexes: Vec<Regex>,
}

impl CompiledFilters {
    fn new(rules: &ExcludeRules) -> Result<Self, ConfigError> {
        let patterns = rules
            .patterns
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|_| ConfigError::InvalidGlobPattern(pattern.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let regexes = rules
            .regex
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| ConfigError::InvalidRegexPattern {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            filenames: rules.filenames.iter().cloned().collect(),
            extensions: rules
                .extensions
                .iter()
                .filter_map(|ext| normalize_extension(ext))
                .collect(),
            patterns,
            regexes,
        })
    }

    /// Whether a file with this name and (normalized) extension must stay put.
    pub fn is_excluded(&self, file_name: &str, extension: Option<&str>) -> bool {
        if self.filenames.contains(file_name) {
            return true;
        }

        if let Some(ext) = extension
            && self.extensions.contains(ext)
        {
            return true;
        }

        if self.patterns.iter().any(|p| p.matches(file_name)) {
            return true;
        }

        self.regexes.iter().any(|r| r.is_match(file_name))
    }

    pub fn is_empty(&self) -> bool {
        self.filenames.is_empty()
            && self.extensions.is_empty()
            && self.patterns.is_empty()
            && self.regexes.is_empty()
    }
}
