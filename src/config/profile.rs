//! Document type profiles and column width tables.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Widths (inches) for one layout-column count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnWidthTable {
    /// Width of one layout column
    pub single: f64,
    /// Gutter between two layout columns
    pub gap: f64,
    /// Width spanning two layout columns
    pub double: f64,
    /// Width spanning three layout columns
    pub triple: f64,
}

impl ColumnWidthTable {
    /// Build a table, deriving `double` and `triple` from `single` and `gap`.
    pub fn new(single: f64, gap: f64) -> Self {
        Self {
            single,
            gap,
            double: single * 2.0 + gap,
            triple: single * 3.0 + gap * 2.0,
        }
    }

    /// Width for a whole number of spanned layout columns (1..=3).
    pub fn whole(&self, span: u8) -> Option<f64> {
        match span {
            1 => Some(self.single),
            2 => Some(self.double),
            3 => Some(self.triple),
            _ => None,
        }
    }
}

/// Page geometry and output settings of one document type.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentTypeProfile {
    /// Profile name ("paper", "report", "book", ...)
    pub name: String,
    /// Layout columns used when a request does not override them
    pub default_columns: u8,
    /// Directory name under `results/` for this document type
    pub output_dir: String,
    /// Usable page width in inches
    pub total_width: f64,
    widths: BTreeMap<u8, ColumnWidthTable>,
}

impl DocumentTypeProfile {
    /// Width table for a layout-column count, if configured.
    pub fn widths(&self, layout_columns: u8) -> Option<&ColumnWidthTable> {
        self.widths.get(&layout_columns)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawDocumentType {
    default_columns: u8,
    output_dir: String,
    width_profile: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawWidthProfile {
    total_width: f64,
    columns: BTreeMap<u8, RawColumnWidths>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawColumnWidths {
    single: f64,
    gap: f64,
    double: Option<f64>,
    triple: Option<f64>,
}

/// Tolerance when checking configured widths against the page width.
const WIDTH_EPSILON: f64 = 1e-6;

pub(crate) fn resolve_profiles(
    document_types: BTreeMap<String, RawDocumentType>,
    width_profiles: &BTreeMap<String, RawWidthProfile>,
) -> Result<BTreeMap<String, DocumentTypeProfile>> {
    if document_types.is_empty() {
        return Err(Error::Config("no document types configured".into()));
    }

    let mut profiles = BTreeMap::new();
    for (name, raw) in document_types {
        let width_profile = width_profiles.get(&raw.width_profile).ok_or_else(|| {
            Error::Config(format!(
                "document type '{}' references unknown width profile '{}'",
                name, raw.width_profile
            ))
        })?;
        if !(1..=3).contains(&raw.default_columns) {
            return Err(Error::Config(format!(
                "document type '{}': default_columns must be 1, 2 or 3 (got {})",
                name, raw.default_columns
            )));
        }
        if raw.output_dir.trim().is_empty() {
            return Err(Error::Config(format!(
                "document type '{}': output_dir is empty",
                name
            )));
        }

        let total_width = width_profile.total_width;
        if !(total_width > 0.0) {
            return Err(Error::Config(format!(
                "width profile '{}': total_width must be positive",
                raw.width_profile
            )));
        }

        let mut widths = BTreeMap::new();
        for (&count, cols) in &width_profile.columns {
            let context = format!("width profile '{}', {} column(s)", raw.width_profile, count);
            if !(1..=3).contains(&count) {
                return Err(Error::Config(format!("{}: unsupported column count", context)));
            }
            if !(cols.single > 0.0) || !(cols.gap >= 0.0) {
                return Err(Error::Config(format!(
                    "{}: single must be positive and gap non-negative",
                    context
                )));
            }
            let mut table = ColumnWidthTable::new(cols.single, cols.gap);
            if let Some(double) = cols.double {
                table.double = double;
            }
            if let Some(triple) = cols.triple {
                table.triple = triple;
            }
            for span in 1..=count {
                let width = table.whole(span).unwrap_or(table.single);
                if width > total_width + WIDTH_EPSILON {
                    return Err(Error::Config(format!(
                        "{}: {}-column width {} exceeds total_width {}",
                        context, span, width, total_width
                    )));
                }
            }
            widths.insert(count, table);
        }

        profiles.insert(
            name.clone(),
            DocumentTypeProfile {
                name,
                default_columns: raw.default_columns,
                output_dir: raw.output_dir,
                total_width,
                widths,
            },
        );
    }
    Ok(profiles)
}
