//! Table preprocessing before pagination.
//!
//! [`preprocess`] runs a fixed sequence of steps on a copy of the input:
//!
//! 1. filter rows
//! 2. sort rows
//! 3. keep the first `n_rows`
//! 4. normalize the index (meaningful index names become a column)
//! 5. flatten hierarchical column labels
//! 6. move the `Node` column first and make it text
//! 7. hide columns
//!
//! Hiding comes last so hidden columns can still drive filtering and sorting.

mod filter;
mod format;
mod sort;

pub use filter::FilterCondition;
pub use format::format_numeric;
pub use sort::{SortDirection, SortKey};

use crate::error::Result;
use crate::model::{ColumnLabel, DataFrame, Index, Value};

/// Index names worth keeping as a column (matched as substrings).
pub const VALUABLE_INDEX_NAMES: &[&str] = &["node", "case", "element", "foundation", "support"];

/// Column promoted to the first position.
pub const NODE_COLUMN: &str = "Node";

/// Options for [`preprocess`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreprocessOptions {
    /// Column names or case-insensitive substrings to hide
    pub hide_columns: Vec<String>,

    /// Row filters
    pub filter_by: Vec<FilterCondition>,

    /// Sort keys, most significant first
    pub sort_by: Vec<SortKey>,

    /// Keep only the first rows
    pub n_rows: Option<usize>,
}

impl PreprocessOptions {
    /// Create new options (no-op pipeline).
    pub fn new() -> Self {
        Self::default()
    }

    /// Hide a column (exact name or substring).
    pub fn hide(mut self, pattern: impl Into<String>) -> Self {
        self.hide_columns.push(pattern.into());
        self
    }

    /// Add a row filter.
    pub fn filter(mut self, condition: FilterCondition) -> Self {
        self.filter_by.push(condition);
        self
    }

    /// Add a sort key.
    pub fn sort(mut self, key: SortKey) -> Self {
        self.sort_by.push(key);
        self
    }

    /// Keep the first `n` rows.
    pub fn with_rows(mut self, n: usize) -> Self {
        self.n_rows = Some(n);
        self
    }
}

/// Run the preprocessing pipeline on a copy of `frame`.
pub fn preprocess(frame: &DataFrame, options: &PreprocessOptions) -> Result<DataFrame> {
    let mut out = if options.filter_by.is_empty() {
        frame.clone()
    } else {
        filter::filter_rows(frame, &options.filter_by)
    };

    if !options.sort_by.is_empty() {
        out = sort::sort_rows(&out, &options.sort_by)?;
    }

    if let Some(n) = options.n_rows {
        out = out.head(n);
    }

    normalize_index(&mut out);

    if out.columns().iter().any(ColumnLabel::is_hierarchical) {
        out.map_columns(ColumnLabel::flattened);
    }

    promote_node_column(&mut out);

    if !options.hide_columns.is_empty() {
        out = hide_columns(&out, &options.hide_columns);
    }

    Ok(out)
}

fn normalize_index(frame: &mut DataFrame) {
    let Index::Labeled { name, labels } = frame.index().clone() else {
        return;
    };
    frame.set_index(Index::Ordinal);

    let Some(name) = name else {
        return;
    };
    let lower = name.to_lowercase();
    if VALUABLE_INDEX_NAMES.iter().any(|v| lower.contains(v)) {
        log::debug!("Keeping index '{}' as a column", name);
        frame.insert_column(0, ColumnLabel::new(name), labels);
    }
}

fn promote_node_column(frame: &mut DataFrame) {
    let Some(position) = frame.column_position(NODE_COLUMN) else {
        return;
    };
    if position != 0 {
        let mut order: Vec<usize> = (0..frame.column_count()).collect();
        order.remove(position);
        order.insert(0, position);
        *frame = frame.take_columns(&order);
    }
    frame.map_column(0, |cell| match cell {
        Value::Text(_) => cell.clone(),
        other => Value::Text(other.to_string()),
    });
}

fn hide_columns(frame: &DataFrame, patterns: &[String]) -> DataFrame {
    let patterns: Vec<(&str, String)> = patterns
        .iter()
        .map(String::as_str)
        .filter(|p| !p.is_empty())
        .map(|p| (p, p.to_lowercase()))
        .collect();

    let visible: Vec<usize> = frame
        .column_names()
        .iter()
        .enumerate()
        .filter(|(_, name)| {
            let lower = name.to_lowercase();
            !patterns
                .iter()
                .any(|(exact, folded)| *exact == name.as_str() || lower.contains(folded.as_str()))
        })
        .map(|(i, _)| i)
        .collect();
    frame.take_columns(&visible)
}
