//! DataFrame types.

use super::Value;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator used when flattening hierarchical column labels.
pub const LEVEL_SEPARATOR: &str = " | ";

/// A column label, possibly hierarchical (one part per level).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLabel {
    parts: Vec<String>,
}

impl ColumnLabel {
    /// Create a single-level label.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            parts: vec![name.into()],
        }
    }

    /// Create a hierarchical label from its levels, outermost first.
    pub fn hierarchical<S: Into<String>>(parts: impl IntoIterator<Item = S>) -> Self {
        Self {
            parts: parts.into_iter().map(Into::into).collect(),
        }
    }

    /// Label levels, outermost first.
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Check if the label has more than one level.
    pub fn is_hierarchical(&self) -> bool {
        self.parts.len() > 1
    }

    /// Display name: non-empty levels joined with [`LEVEL_SEPARATOR`].
    pub fn name(&self) -> String {
        self.parts
            .iter()
            .filter(|p| !p.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(LEVEL_SEPARATOR)
    }

    /// Collapse the label into a single level.
    pub fn flattened(&self) -> Self {
        Self::new(self.name())
    }
}

impl fmt::Display for ColumnLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl From<&str> for ColumnLabel {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ColumnLabel {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Row index of a table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum Index {
    /// Plain 0..n ordinal index
    #[default]
    Ordinal,
    /// Explicit row labels with an optional index name
    Labeled {
        name: Option<String>,
        labels: Vec<Value>,
    },
}

/// An in-memory table: ordered columns, a row index and rows of cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataFrame {
    columns: Vec<ColumnLabel>,
    index: Index,
    rows: Vec<Vec<Value>>,
}

impl DataFrame {
    /// Create an empty table with the given columns.
    pub fn new<C: Into<ColumnLabel>>(columns: impl IntoIterator<Item = C>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            index: Index::Ordinal,
            rows: Vec::new(),
        }
    }

    /// Create a table from columns and rows, checking every row's width.
    pub fn from_rows<C: Into<ColumnLabel>>(
        columns: impl IntoIterator<Item = C>,
        rows: Vec<Vec<Value>>,
    ) -> Result<Self> {
        let mut frame = Self::new(columns);
        for row in rows {
            frame.push_row(row)?;
        }
        Ok(frame)
    }

    /// Append a row.
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(Error::RaggedRow {
                row: self.rows.len(),
                found: row.len(),
                expected: self.columns.len(),
            });
        }
        if let Index::Labeled { labels, .. } = &mut self.index {
            labels.push(Value::Int(self.rows.len() as i64));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Attach a labelled index.
    pub fn with_index(mut self, name: Option<&str>, labels: Vec<Value>) -> Result<Self> {
        if labels.len() != self.rows.len() {
            return Err(Error::IndexLength {
                labels: labels.len(),
                rows: self.rows.len(),
            });
        }
        self.index = Index::Labeled {
            name: name.map(str::to_string),
            labels,
        };
        Ok(self)
    }

    /// Column labels.
    pub fn columns(&self) -> &[ColumnLabel] {
        &self.columns
    }

    /// Column display names.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(ColumnLabel::name).collect()
    }

    /// Row index.
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Rows in order.
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Check if the table has no rows or no columns.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    /// Position of the column whose display name equals `name`.
    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name() == name)
    }

    /// Cells of one column, top to bottom.
    pub fn column_values(&self, position: usize) -> impl Iterator<Item = &Value> + '_ {
        self.rows.iter().map(move |row| &row[position])
    }

    /// Get a single cell.
    pub fn cell(&self, row: usize, column: usize) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Copy of rows `start..end` (clamped to the table length).
    pub fn slice(&self, start: usize, end: usize) -> Self {
        let end = end.min(self.rows.len());
        let start = start.min(end);
        Self {
            columns: self.columns.clone(),
            index: match &self.index {
                Index::Ordinal => Index::Ordinal,
                Index::Labeled { name, labels } => Index::Labeled {
                    name: name.clone(),
                    labels: labels[start..end].to_vec(),
                },
            },
            rows: self.rows[start..end].to_vec(),
        }
    }

    /// Copy of the first `n` rows.
    pub fn head(&self, n: usize) -> Self {
        self.slice(0, n)
    }

    /// Copy of the given rows, in the given order.
    pub fn take_rows(&self, positions: &[usize]) -> Self {
        Self {
            columns: self.columns.clone(),
            index: match &self.index {
                Index::Ordinal => Index::Ordinal,
                Index::Labeled { name, labels } => Index::Labeled {
                    name: name.clone(),
                    labels: positions.iter().map(|&p| labels[p].clone()).collect(),
                },
            },
            rows: positions.iter().map(|&p| self.rows[p].clone()).collect(),
        }
    }

    /// Copy of the given columns, in the given order.
    pub fn take_columns(&self, positions: &[usize]) -> Self {
        Self {
            columns: positions.iter().map(|&p| self.columns[p].clone()).collect(),
            index: self.index.clone(),
            rows: self
                .rows
                .iter()
                .map(|row| positions.iter().map(|&p| row[p].clone()).collect())
                .collect(),
        }
    }

    /// Stack tables with identical columns on top of each other.
    pub fn concat(frames: &[DataFrame]) -> Result<Self> {
        let Some(first) = frames.first() else {
            return Ok(Self::new(Vec::<ColumnLabel>::new()));
        };
        let mut out = Self::new(first.columns.clone());
        out.index = first.index.clone();
        for (i, frame) in frames.iter().enumerate() {
            if frame.columns != out.columns {
                return Err(Error::Config(format!(
                    "cannot concatenate tables with columns {:?} and {:?}",
                    out.column_names(),
                    frame.column_names()
                )));
            }
            out.rows.extend(frame.rows.iter().cloned());
            if i == 0 {
                continue;
            }
            out.index = match (std::mem::take(&mut out.index), &frame.index) {
                (Index::Labeled { name, mut labels }, Index::Labeled { name: next, labels: more })
                    if &name == next =>
                {
                    labels.extend(more.iter().cloned());
                    Index::Labeled { name, labels }
                }
                _ => Index::Ordinal,
            };
        }
        if let Index::Labeled { labels, .. } = &out.index {
            if labels.len() != out.rows.len() {
                out.index = Index::Ordinal;
            }
        }
        Ok(out)
    }

    pub(crate) fn set_index(&mut self, index: Index) {
        self.index = index;
    }

    pub(crate) fn insert_column(&mut self, position: usize, label: ColumnLabel, values: Vec<Value>) {
        self.columns.insert(position, label);
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.insert(position, value);
        }
    }

    pub(crate) fn map_columns(&mut self, f: impl FnMut(&ColumnLabel) -> ColumnLabel) {
        self.columns = self.columns.iter().map(f).collect();
    }

    pub(crate) fn map_column(&mut self, position: usize, mut f: impl FnMut(&Value) -> Value) {
        for row in &mut self.rows {
            row[position] = f(&row[position]);
        }
    }
}
