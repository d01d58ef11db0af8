//! Result of paginating one table.

use crate::model::TableCounter;
use std::path::PathBuf;

/// Outcome of one chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkReport {
    /// Cross-reference id
    pub id: String,

    /// Figure caption
    pub caption: String,

    /// Rows in the chunk
    pub rows: usize,

    /// Width in inches
    pub width_inches: f64,

    /// Artifact written by the backend, `None` when rendering failed
    pub artifact: Option<PathBuf>,

    /// Backend error text when rendering failed
    pub error: Option<String>,
}

impl ChunkReport {
    /// Whether the chunk was rendered.
    pub fn is_rendered(&self) -> bool {
        self.artifact.is_some()
    }
}

/// Fragment, counter and artifacts produced for one logical table.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutput {
    /// Markdown to splice into the document
    pub fragment: String,

    /// Counter after this table
    pub counter: TableCounter,

    /// Artifacts written, in chunk order
    pub artifacts: Vec<PathBuf>,

    /// Category used for styling
    pub category: String,

    /// Highlighted columns
    pub highlight_columns: Vec<String>,

    /// Per-chunk outcome
    pub chunks: Vec<ChunkReport>,
}

impl RenderOutput {
    /// Number of chunks the table was split into.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Number of chunks replaced by fallback text.
    pub fn failed_count(&self) -> usize {
        self.chunks.iter().filter(|c| !c.is_rendered()).count()
    }

    /// Cross-reference ids in chunk order.
    pub fn ids(&self) -> Vec<&str> {
        self.chunks.iter().map(|c| c.id.as_str()).collect()
    }
}
