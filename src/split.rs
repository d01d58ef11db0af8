//! Row-contiguous table splitting.
//!
//! A table that does not fit on one page is cut into chunks. Chunks are
//! copies of consecutive row ranges; concatenated in order they give back the
//! original table.

use crate::error::{Error, Result};
use crate::model::DataFrame;

/// Row budget per chunk.
#[derive(Debug, Clone, PartialEq)]
pub enum MaxRows {
    /// Every chunk holds at most `floor(n)` rows.
    Uniform(f64),
    /// Exact chunk lengths in order; leftover rows form one extra chunk.
    Custom(Vec<f64>),
}

impl MaxRows {
    /// Validate and interpret a JSON value (a number or a list of numbers).
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Number(n) => n
                .as_f64()
                .map(MaxRows::Uniform)
                .ok_or_else(|| Error::InvalidMaxRows(format!("unrepresentable number {}", n))),
            serde_json::Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_f64().ok_or_else(|| {
                        Error::InvalidMaxRows(format!("list entry {} is not a number", item))
                    })
                })
                .collect::<Result<Vec<_>>>()
                .map(MaxRows::Custom),
            other => Err(Error::InvalidMaxRows(format!(
                "expected a number or a list of numbers, got {}",
                other
            ))),
        }
    }
}

impl From<usize> for MaxRows {
    fn from(n: usize) -> Self {
        MaxRows::Uniform(n as f64)
    }
}

impl From<i32> for MaxRows {
    fn from(n: i32) -> Self {
        MaxRows::Uniform(f64::from(n))
    }
}

impl From<Vec<i32>> for MaxRows {
    fn from(sizes: Vec<i32>) -> Self {
        MaxRows::Custom(sizes.into_iter().map(f64::from).collect())
    }
}

impl From<Vec<usize>> for MaxRows {
    fn from(sizes: Vec<usize>) -> Self {
        MaxRows::Custom(sizes.into_iter().map(|n| n as f64).collect())
    }
}

/// A contiguous row range of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    /// Position of the chunk in the split, from 0
    pub ordinal: usize,
    /// First row (inclusive) in the source table
    pub start: usize,
    /// Last row (exclusive) in the source table
    pub end: usize,
    /// Copy of the rows
    pub frame: DataFrame,
}

impl Chunk {
    fn new(frame: &DataFrame, ordinal: usize, start: usize, end: usize) -> Self {
        Self {
            ordinal,
            start,
            end,
            frame: frame.slice(start, end),
        }
    }

    /// Number of rows in the chunk.
    pub fn row_count(&self) -> usize {
        self.end - self.start
    }
}

/// Split `frame` into ordered chunks.
pub fn split(frame: &DataFrame, max_rows: &MaxRows) -> Result<Vec<Chunk>> {
    let total = frame.row_count();
    let chunks = match max_rows {
        MaxRows::Uniform(n) => {
            let size = chunk_length(*n)?;
            if total <= size {
                vec![Chunk::new(frame, 0, 0, total)]
            } else {
                (0..total)
                    .step_by(size)
                    .enumerate()
                    .map(|(i, start)| Chunk::new(frame, i, start, (start + size).min(total)))
                    .collect()
            }
        }
        MaxRows::Custom(sizes) if sizes.is_empty() => vec![Chunk::new(frame, 0, 0, total)],
        MaxRows::Custom(sizes) => {
            let mut chunks = Vec::new();
            let mut start = 0;
            for &n in sizes {
                if start >= total {
                    break;
                }
                let end = (start + chunk_length(n)?).min(total);
                chunks.push(Chunk::new(frame, chunks.len(), start, end));
                start = end;
            }
            if start < total || chunks.is_empty() {
                // The remainder chunk is not capped.
                chunks.push(Chunk::new(frame, chunks.len(), start, total));
            }
            chunks
        }
    };

    log::debug!(
        "Split {} rows into {} chunk(s): {:?}",
        total,
        chunks.len(),
        chunks.iter().map(Chunk::row_count).collect::<Vec<_>>()
    );
    Ok(chunks)
}

/// Concatenate chunks back into one table.
pub fn reassemble(chunks: &[Chunk]) -> Result<DataFrame> {
    let frames: Vec<DataFrame> = chunks.iter().map(|c| c.frame.clone()).collect();
    DataFrame::concat(&frames)
}

fn chunk_length(n: f64) -> Result<usize> {
    if !n.is_finite() || n < 1.0 {
        return Err(Error::InvalidMaxRows(format!(
            "chunk size must be at least 1, got {}",
            n
        )));
    }
    Ok(n.floor() as usize)
}
