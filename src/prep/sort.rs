//! Stable multi-key row sorting.

use crate::error::{Error, Result};
use crate::model::{DataFrame, Value};
use std::cmp::Ordering;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Smallest first
    #[default]
    Ascending,
    /// Largest first
    Descending,
}

impl SortDirection {
    /// Parse a direction token for `column`.
    ///
    /// Accepts `asc`, `ascending`, `up`, `true`, `1` and `desc`,
    /// `descending`, `down`, `false`, `0` in any case.
    pub fn parse(token: &str, column: &str) -> Result<Self> {
        match token.trim().to_lowercase().as_str() {
            "asc" | "ascending" | "up" | "true" | "1" => Ok(SortDirection::Ascending),
            "desc" | "descending" | "down" | "false" | "0" => Ok(SortDirection::Descending),
            _ => Err(Error::InvalidSortDirection {
                column: column.to_string(),
                token: token.to_string(),
            }),
        }
    }
}

/// One sort key: a column and a direction token.
///
/// The token is kept verbatim and validated when the sort runs, so a bad
/// token is reported together with its column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    /// Column display name
    pub column: String,
    /// Direction token (see [`SortDirection::parse`])
    pub direction: String,
}

impl SortKey {
    /// Sort key with an explicit direction token.
    pub fn new(column: impl Into<String>, direction: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: direction.into(),
        }
    }

    /// Ascending sort key.
    pub fn asc(column: impl Into<String>) -> Self {
        Self::new(column, "asc")
    }

    /// Descending sort key.
    pub fn desc(column: impl Into<String>) -> Self {
        Self::new(column, "desc")
    }
}

/// Sort rows by the given keys. Ties keep their original relative order and
/// nulls go last whatever the direction.
pub(crate) fn sort_rows(frame: &DataFrame, keys: &[SortKey]) -> Result<DataFrame> {
    let mut resolved = Vec::with_capacity(keys.len());
    for key in keys {
        let position = frame
            .column_position(&key.column)
            .ok_or_else(|| Error::ColumnNotFound(key.column.clone()))?;
        let direction = SortDirection::parse(&key.direction, &key.column)?;
        resolved.push((position, direction));
    }

    let rows = frame.rows();
    let mut order: Vec<usize> = (0..rows.len()).collect();
    // `sort_by` is stable.
    order.sort_by(|&a, &b| {
        for &(position, direction) in &resolved {
            let ord = compare_cells(&rows[a][position], &rows[b][position], direction);
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    });

    Ok(frame.take_rows(&order))
}

fn compare_cells(a: &Value, b: &Value, direction: SortDirection) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ord = a.sort_cmp(b);
            match direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        }
    }
}
