//! Table rendering backends.
//!
//! Rasterizing a chunk is delegated to a [`TableImageRenderer`]. The crate
//! ships [`PipeTableWriter`], which writes each chunk as a Markdown pipe
//! table; image backends implement the same trait.

use crate::error::{Error, Result};
use crate::model::{DataFrame, Value};
use std::path::{Path, PathBuf};

/// Everything a backend needs to render one chunk.
#[derive(Debug, Clone, Copy)]
pub struct ChunkJob<'a> {
    /// Rows of the chunk
    pub frame: &'a DataFrame,

    /// Table title, if any
    pub title: Option<&'a str>,

    /// Caption shown under the figure
    pub caption: &'a str,

    /// Color palette name
    pub palette: Option<&'a str>,

    /// Columns to emphasize
    pub highlight_columns: &'a [String],

    /// Detected or requested table category
    pub category: &'a str,

    /// Visual style name
    pub layout_style: &'a str,

    /// Document type the table belongs to
    pub document_type: &'a str,

    /// Target width in inches
    pub width_inches: f64,

    /// Position of the chunk in its table, from 0
    pub index: usize,

    /// Number of chunks in the table
    pub total: usize,

    /// Where the artifact should be written
    pub target: &'a Path,
}

/// Trait for table rendering backends.
///
/// Implementations write one artifact per call and return its path.
/// Failures are reported as errors; the caller turns them into a textual
/// fallback and carries on with the next chunk.
pub trait TableImageRenderer: Send + Sync {
    /// Name of this backend.
    fn name(&self) -> &str;

    /// Extension of the produced files, without the dot. `None` uses the
    /// configured image extension.
    fn file_extension(&self) -> Option<&str> {
        None
    }

    /// Render one chunk.
    fn render_chunk(&self, job: &ChunkJob<'_>) -> Result<PathBuf>;
}

/// Backend writing chunks as Markdown pipe tables.
#[derive(Debug, Clone, Default)]
pub struct PipeTableWriter {
    _private: (),
}

impl PipeTableWriter {
    /// Create a new pipe-table writer.
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Render a chunk to a string.
    pub fn to_pipe_table(&self, job: &ChunkJob<'_>) -> String {
        let mut output = String::new();
        output.push_str(&format!("<!-- {} -->\n\n", job.caption));
        render_table_markdown(&mut output, job.frame, job.highlight_columns);
        output
    }
}

impl TableImageRenderer for PipeTableWriter {
    fn name(&self) -> &str {
        "pipe-table"
    }

    fn file_extension(&self) -> Option<&str> {
        Some("md")
    }

    fn render_chunk(&self, job: &ChunkJob<'_>) -> Result<PathBuf> {
        if job.frame.column_count() == 0 {
            return Err(Error::Render(format!(
                "chunk {} of '{}' has no columns",
                job.index + 1,
                job.caption
            )));
        }
        std::fs::write(job.target, self.to_pipe_table(job))?;
        Ok(job.target.to_path_buf())
    }
}

fn render_table_markdown(output: &mut String, frame: &DataFrame, highlight: &[String]) {
    let names = frame.column_names();

    output.push('|');
    for name in &names {
        let name = escape_cell(name);
        if highlight.iter().any(|h| h == &name) {
            output.push_str(&format!(" **{}** |", name));
        } else {
            output.push_str(&format!(" {} |", name));
        }
    }
    output.push('\n');

    // Separator, numbers right-aligned
    output.push('|');
    for position in 0..names.len() {
        let numeric = frame.column_values(position).any(Value::is_numeric)
            && frame
                .column_values(position)
                .all(|v| v.is_numeric() || v.is_null());
        output.push_str(if numeric { " ---: |" } else { " --- |" });
    }
    output.push('\n');

    for row in frame.rows() {
        output.push('|');
        for cell in row {
            output.push_str(&format!(" {} |", escape_cell(&cell.to_string())));
        }
        output.push('\n');
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('\n', " ").replace('|', "\\|").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job<'a>(frame: &'a DataFrame, highlight: &'a [String], target: &'a Path) -> ChunkJob<'a> {
        ChunkJob {
            frame,
            title: Some("Loads"),
            caption: "Loads",
            palette: None,
            highlight_columns: highlight,
            category: "forces",
            layout_style: "corporate",
            document_type: "report",
            width_inches: 6.5,
            index: 0,
            total: 1,
            target,
        }
    }

    #[test]
    fn test_pipe_table_layout() {
        let frame = DataFrame::from_rows(
            ["Node", "Load (kN)"],
            vec![vec!["1".into(), 12.5.into()], vec!["2|b".into(), Value::Null]],
        )
        .unwrap();
        let highlight = vec!["Load (kN)".to_string()];
        let writer = PipeTableWriter::new();
        let text = writer.to_pipe_table(&job(&frame, &highlight, Path::new("unused")));

        assert!(text.contains("| Node | **Load (kN)** |\n"));
        assert!(text.contains("| --- | ---: |\n"));
        assert!(text.contains("| 1 | 12.5 |\n"));
        assert!(text.contains("| 2\\|b |  |\n"));
    }

    #[test]
    fn test_writes_artifact() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("table_1.md");
        let frame = DataFrame::from_rows(["a"], vec![vec![1.into()]]).unwrap();
        let path = PipeTableWriter::new()
            .render_chunk(&job(&frame, &[], &target))
            .unwrap();
        assert_eq!(path, target);
        assert!(std::fs::read_to_string(&path).unwrap().contains("| a |"));
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("missing").join("table_1.md");
        let frame = DataFrame::from_rows(["a"], vec![vec![1.into()]]).unwrap();
        let err = PipeTableWriter::new()
            .render_chunk(&job(&frame, &[], &target))
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
