//! Table width from the document layout.
//!
//! Widths are in inches. A table spans one or more layout columns of its
//! document type; whole spans use the configured single/double/triple widths
//! and fractional spans interpolate between them.

use crate::config::TablesConfig;
use crate::error::{Error, Result};

/// Span used when none is requested.
pub const DEFAULT_SPAN: f64 = 1.0;

/// Width used for an empty explicit width list.
pub const FALLBACK_LIST_WIDTH: f64 = 6.5;

/// How wide a table should be.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnSpan {
    /// Number of layout columns to span (may be fractional, e.g. 1.5)
    Span(f64),
    /// Explicit widths in inches, one per chunk
    Widths(Vec<f64>),
}

impl ColumnSpan {
    /// Explicit width for chunk `index`, if the list has one.
    pub fn width_for_chunk(&self, index: usize) -> Option<f64> {
        match self {
            ColumnSpan::Widths(widths) => widths.get(index).copied(),
            ColumnSpan::Span(_) => None,
        }
    }
}

impl From<f64> for ColumnSpan {
    fn from(span: f64) -> Self {
        ColumnSpan::Span(span)
    }
}

impl From<u8> for ColumnSpan {
    fn from(span: u8) -> Self {
        ColumnSpan::Span(f64::from(span))
    }
}

impl From<Vec<f64>> for ColumnSpan {
    fn from(widths: Vec<f64>) -> Self {
        ColumnSpan::Widths(widths)
    }
}

/// Computes table widths from the configured width profiles.
#[derive(Debug, Clone, Copy)]
pub struct ColumnWidthCalculator<'a> {
    config: &'a TablesConfig,
}

impl<'a> ColumnWidthCalculator<'a> {
    /// Create a calculator over a resolved configuration.
    pub fn new(config: &'a TablesConfig) -> Self {
        Self { config }
    }

    /// Width in inches of a table spanning `span` layout columns of a
    /// document laid out in `layout_columns` columns.
    pub fn calculate_width(
        &self,
        document_type: &str,
        layout_columns: u8,
        span: Option<&ColumnSpan>,
    ) -> Result<f64> {
        let profile = self.config.document_type(document_type)?;

        let span = match span {
            None => DEFAULT_SPAN,
            Some(ColumnSpan::Widths(widths)) => {
                return Ok(widths.first().copied().unwrap_or(FALLBACK_LIST_WIDTH))
            }
            Some(ColumnSpan::Span(span)) => *span,
        };
        check_span(span)?;

        let Some(table) = profile.widths(layout_columns) else {
            log::debug!(
                "No width table for {} layout columns in '{}', using full width",
                layout_columns,
                document_type
            );
            return Ok(profile.total_width);
        };

        if span.fract() == 0.0 {
            if let Some(width) = table.whole(span as u8).filter(|_| span <= 3.0) {
                return Ok(width.min(profile.total_width));
            }
        }

        let whole = span.floor();
        let fraction = span - whole;
        let width = whole * table.single
            + (whole - 1.0).max(0.0) * table.gap
            + fraction * (table.single + table.gap);
        Ok(width.min(profile.total_width))
    }

    /// Reject numeric spans wider than the layout. Width lists skip the
    /// layout check but every entry must be positive.
    pub fn validate_columns(
        &self,
        document_type: &str,
        layout_columns: u8,
        span: Option<&ColumnSpan>,
    ) -> Result<()> {
        self.config.document_type(document_type)?;
        let span = match span {
            None => return Ok(()),
            Some(ColumnSpan::Widths(widths)) => {
                return widths.iter().try_for_each(|w| check_width(*w));
            }
            Some(ColumnSpan::Span(span)) => span,
        };
        check_span(*span)?;
        if *span > f64::from(layout_columns) {
            return Err(Error::ColumnSpanExceedsLayout {
                requested: *span,
                layout: layout_columns,
                document_type: document_type.to_string(),
            });
        }
        Ok(())
    }
}

fn check_span(span: f64) -> Result<()> {
    if !span.is_finite() || span <= 0.0 {
        return Err(Error::InvalidColumnSpan(format!(
            "span must be a positive number, got {}",
            span
        )));
    }
    Ok(())
}

fn check_width(width: f64) -> Result<()> {
    if !width.is_finite() || width <= 0.0 {
        return Err(Error::InvalidColumnSpan(format!(
            "explicit width must be a positive number of inches, got {}",
            width
        )));
    }
    Ok(())
}

/// Format a width for markup: two decimals with trailing zeros removed.
///
/// ```
/// use tablepage::layout::width_string;
///
/// assert_eq!(width_string(3.10), "3.1");
/// assert_eq!(width_string(6.0), "6");
/// assert_eq!(width_string(4.8), "4.8");
/// ```
pub fn width_string(width: f64) -> String {
    let formatted = format!("{:.2}", width);
    if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        formatted
    }
}
