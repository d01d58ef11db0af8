//! Typed session configuration.
//!
//! The configuration is one JSON document holding category rules, document
//! type profiles, column width tables, numeric precision and display
//! attributes. It is deserialized and validated once, when a session starts,
//! so a missing key fails at load time instead of midway through a document.
//!
//! ```
//! use tablepage::config::TablesConfig;
//!
//! let config = TablesConfig::builtin().unwrap();
//! let paper = config.document_type("paper").unwrap();
//! assert_eq!(paper.default_columns, 2);
//! ```

mod profile;

pub use profile::{ColumnWidthTable, DocumentTypeProfile};

use crate::error::{Error, Result};
use profile::{RawDocumentType, RawWidthProfile};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Configuration shipped with the crate.
const BUILTIN_CONFIG: &str = include_str!("../../config/tables.json");

/// Rule used to classify a table from its column names.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryRule {
    /// Category name
    pub name: String,

    /// Keywords searched in the column names
    pub keywords: Vec<String>,

    /// Coordinate-like column patterns (e.g. "x (m)")
    #[serde(default)]
    pub coordinate_patterns: Vec<String>,

    /// Patterns selecting the columns to highlight when the category wins
    #[serde(default)]
    pub highlight_columns: Vec<String>,
}

/// Decimal precision per numeric value type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NumberFormat {
    decimal_places: BTreeMap<String, u32>,

    /// Identifier columns that are never rounded
    pub exclude_columns: Vec<String>,
}

impl NumberFormat {
    /// Decimal places configured for a value type.
    pub fn decimal_places(&self, value_type: &str) -> Result<u32> {
        self.decimal_places
            .get(value_type)
            .copied()
            .ok_or_else(|| Error::UnknownValueType(value_type.to_string()))
    }
}

/// Attributes of the emitted figure markup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DisplayConfig {
    /// CSS classes appended to every figure
    pub figure_classes: Vec<String>,

    /// Word used in split captions ("Parte" → "Loads (Parte 2)")
    pub part_label: String,

    /// Caption prefix for tables without a title ("Tabla" → "Tabla 3")
    pub untitled_label: String,

    /// Extension of artifact files produced by the renderer
    pub image_extension: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    default_category: String,
    categories: Vec<CategoryRule>,
    document_types: BTreeMap<String, RawDocumentType>,
    width_profiles: BTreeMap<String, RawWidthProfile>,
    number_format: NumberFormat,
    display: DisplayConfig,
}

/// Resolved configuration for one document session.
#[derive(Debug, Clone, PartialEq)]
pub struct TablesConfig {
    /// Category returned when no rule scores
    pub default_category: String,

    /// Category rules in priority order
    pub categories: Vec<CategoryRule>,

    /// Numeric precision settings
    pub number_format: NumberFormat,

    /// Figure markup settings
    pub display: DisplayConfig,

    document_types: BTreeMap<String, DocumentTypeProfile>,
}

impl TablesConfig {
    /// Load the configuration shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_CONFIG)
    }

    /// Parse and validate a configuration document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawConfig = serde_json::from_str(json)?;
        Self::resolve(raw)
    }

    /// Read, parse and validate a configuration file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    fn resolve(raw: RawConfig) -> Result<Self> {
        if raw.default_category.trim().is_empty() {
            return Err(Error::Config("default_category is empty".into()));
        }

        let mut seen = HashSet::new();
        for rule in &raw.categories {
            if !seen.insert(rule.name.as_str()) {
                return Err(Error::Config(format!(
                    "category '{}' is defined twice",
                    rule.name
                )));
            }
        }

        if raw.display.image_extension.trim().is_empty() {
            return Err(Error::Config("display.image_extension is empty".into()));
        }

        let document_types = profile::resolve_profiles(raw.document_types, &raw.width_profiles)?;
        log::debug!(
            "Loaded tables configuration: {} categories, {} document types",
            raw.categories.len(),
            document_types.len()
        );

        Ok(Self {
            default_category: raw.default_category,
            categories: raw.categories,
            number_format: raw.number_format,
            display: raw.display,
            document_types,
        })
    }

    /// Profile of a document type.
    pub fn document_type(&self, name: &str) -> Result<&DocumentTypeProfile> {
        self.document_types
            .get(name)
            .ok_or_else(|| Error::UnknownDocumentType {
                name: name.to_string(),
                known: self
                    .document_types
                    .keys()
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    /// Names of all configured document types.
    pub fn document_type_names(&self) -> impl Iterator<Item = &str> {
        self.document_types.keys().map(String::as_str)
    }
}
