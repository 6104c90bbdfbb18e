//! Loading endgame tables from disk.
//!
//! A registry is described by a TOML file listing one table per entry:
//!
//! ```toml
//! [[tables]]
//! name = "kqk"
//! pieces = "kKQ"
//! data = "tables/kqk.json"
//! ```
//!
//! Each data file is a JSON array of strings and nulls. Relative data paths
//! are resolved against the directory holding the config file.

use std::path::{Path, PathBuf};

use flywheel_engine::Position;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::table::{EndgameError, EndgameLookup, EndgameTable};

/// One `[[tables]]` entry of the registry config.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct TableConfig {
    /// Display name, reported with each hit.
    pub name: String,
    /// FEN letters in canonical config order.
    pub pieces: String,
    /// Path to the JSON data file.
    pub data: PathBuf,
}

/// The registry config file.
#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    #[serde(default)]
    pub tables: Vec<TableConfig>,
}

impl RegistryConfig {
    /// Parses a registry config from TOML text.
    pub fn parse(text: &str) -> Result<Self, EndgameError> {
        Ok(toml::from_str(text)?)
    }
}

/// Reads one table's JSON data file.
pub fn load_table(pieces: &str, path: &Path) -> Result<EndgameTable, EndgameError> {
    let content = std::fs::read_to_string(path)?;
    let data: Vec<Option<String>> = serde_json::from_str(&content)?;
    debug!(pieces, path = %path.display(), entries = data.len(), "read endgame data");
    EndgameTable::new(pieces, data)
}

/// An ordered set of named endgame tables.
///
/// Probing tries each table in order and returns the first hit.
#[derive(Debug, Clone, Default)]
pub struct EndgameRegistry {
    tables: Vec<(String, EndgameTable)>,
}

impl EndgameRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every table listed in a TOML config file.
    pub fn load(config_path: &Path) -> Result<Self, EndgameError> {
        let text = std::fs::read_to_string(config_path)?;
        let config = RegistryConfig::parse(&text)?;
        let base = config_path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_config(&config, base)
    }

    /// Loads the tables of `config`, resolving relative paths against `base`.
    pub fn from_config(config: &RegistryConfig, base: &Path) -> Result<Self, EndgameError> {
        let mut registry = Self::new();
        for entry in &config.tables {
            let path = base.join(&entry.data);
            let table = load_table(&entry.pieces, &path)?;
            info!(name = %entry.name, pieces = %entry.pieces, "loaded endgame table");
            registry.insert(entry.name.clone(), table);
        }
        Ok(registry)
    }

    /// Appends a table, tried after those already present.
    pub fn insert(&mut self, name: impl Into<String>, table: EndgameTable) {
        self.tables.push((name.into(), table));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Names of the loaded tables, in probing order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|(name, _)| name.as_str())
    }

    /// Returns the first table hit for the position with the table's name.
    pub fn probe(&self, position: &Position) -> Result<Option<(&str, EndgameLookup)>, EndgameError> {
        for (name, table) in &self.tables {
            if let Some(hit) = table.probe(position)? {
                return Ok(Some((name.as_str(), hit)));
            }
        }
        Ok(None)
    }
}
