//! Error types for tablepage library.

use std::io;
use thiserror::Error;

/// Result type alias for tablepage operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while paginating and laying out tables.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when creating output directories or writing artifacts.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The configuration document is not valid JSON or misses a field.
    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// The configuration parsed but is incomplete or inconsistent.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Document type not present in the configuration.
    #[error("Unknown document type '{name}' (known: {known})")]
    UnknownDocumentType { name: String, known: String },

    /// Numeric value-type not present in the number format configuration.
    #[error("No decimal precision configured for value type '{0}'")]
    UnknownValueType(String),

    /// The table has no rows or no columns.
    #[error("Table '{0}' is empty")]
    EmptyTable(String),

    /// A row does not have one cell per column.
    #[error("Row {row} has {found} cells but the table has {expected} columns")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    /// Index labels do not line up with the table rows.
    #[error("Index has {labels} labels but the table has {rows} rows")]
    IndexLength { labels: usize, rows: usize },

    /// A column referenced by a sort key does not exist.
    #[error("Column '{0}' not found in table")]
    ColumnNotFound(String),

    /// Sort direction token outside the accepted vocabulary.
    #[error("Invalid sort direction '{token}' for column '{column}'")]
    InvalidSortDirection { column: String, token: String },

    /// `max_rows` is neither a positive number nor a list of positive numbers.
    #[error("Invalid max_rows: {0}")]
    InvalidMaxRows(String),

    /// Requested column span is zero, negative or not finite.
    #[error("Invalid column span: {0}")]
    InvalidColumnSpan(String),

    /// Requested column span is wider than the document layout.
    #[error(
        "Requested {requested} columns but layout only has {layout} columns for document_type '{document_type}'"
    )]
    ColumnSpanExceedsLayout {
        requested: f64,
        layout: u8,
        document_type: String,
    },

    /// Error reported by the image-rendering collaborator.
    #[error("Rendering error: {0}")]
    Render(String),
}
