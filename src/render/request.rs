//! Per-table render requests.

use crate::layout::ColumnSpan;
use crate::model::DataFrame;
use crate::prep::{FilterCondition, PreprocessOptions, SortKey};
use crate::split::MaxRows;

/// Default visual style.
pub const DEFAULT_LAYOUT_STYLE: &str = "corporate";

/// Default document type.
pub const DEFAULT_DOCUMENT_TYPE: &str = "report";

/// Default numeric value type for rounding.
pub const DEFAULT_VALUE_TYPE: &str = "general_numeric";

/// One logical table to paginate.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    /// Table data
    pub frame: DataFrame,

    /// Title used for captions and file names
    pub title: Option<String>,

    /// Color palette name passed to the backend
    pub palette: Option<String>,

    /// Columns to highlight; `None` runs category detection
    pub highlight_columns: Option<Vec<String>>,

    /// Category passed to the backend when highlights are given explicitly
    pub category: Option<String>,

    /// Row budget per chunk; `None` keeps the table whole
    pub max_rows: Option<MaxRows>,

    /// Visual style name
    pub layout_style: String,

    /// Document type ("paper", "report", "book", ...)
    pub document_type: String,

    /// Layout columns to span, or explicit widths per chunk
    pub column_span: Option<ColumnSpan>,

    /// Layout-column count overriding the document type default
    pub layout_columns: Option<u8>,

    /// Numeric value type selecting the rounding precision
    pub value_type: String,

    /// Filtering, sorting, truncation and hiding
    pub preprocess: PreprocessOptions,
}

impl RenderRequest {
    /// Create a request for `frame` with default settings.
    pub fn new(frame: DataFrame) -> Self {
        Self {
            frame,
            title: None,
            palette: None,
            highlight_columns: None,
            category: None,
            max_rows: None,
            layout_style: DEFAULT_LAYOUT_STYLE.to_string(),
            document_type: DEFAULT_DOCUMENT_TYPE.to_string(),
            column_span: None,
            layout_columns: None,
            value_type: DEFAULT_VALUE_TYPE.to_string(),
            preprocess: PreprocessOptions::default(),
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the color palette.
    pub fn with_palette(mut self, palette: impl Into<String>) -> Self {
        self.palette = Some(palette.into());
        self
    }

    /// Highlight these columns and skip category detection.
    pub fn with_highlight_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.highlight_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Set the category reported when highlights are explicit.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Split the table into chunks.
    pub fn with_max_rows(mut self, max_rows: impl Into<MaxRows>) -> Self {
        self.max_rows = Some(max_rows.into());
        self
    }

    /// Set the visual style.
    pub fn with_layout_style(mut self, style: impl Into<String>) -> Self {
        self.layout_style = style.into();
        self
    }

    /// Set the document type.
    pub fn with_document_type(mut self, document_type: impl Into<String>) -> Self {
        self.document_type = document_type.into();
        self
    }

    /// Set the column span or explicit widths.
    pub fn with_column_span(mut self, span: impl Into<ColumnSpan>) -> Self {
        self.column_span = Some(span.into());
        self
    }

    /// Override the layout-column count.
    pub fn with_layout_columns(mut self, columns: u8) -> Self {
        self.layout_columns = Some(columns);
        self
    }

    /// Set the numeric value type.
    pub fn with_value_type(mut self, value_type: impl Into<String>) -> Self {
        self.value_type = value_type.into();
        self
    }

    /// Replace the preprocessing options.
    pub fn with_preprocess(mut self, options: PreprocessOptions) -> Self {
        self.preprocess = options;
        self
    }

    /// Hide a column (exact name or substring).
    pub fn hide(mut self, pattern: impl Into<String>) -> Self {
        self.preprocess = self.preprocess.hide(pattern);
        self
    }

    /// Add a row filter.
    pub fn filter(mut self, condition: FilterCondition) -> Self {
        self.preprocess = self.preprocess.filter(condition);
        self
    }

    /// Add a sort key.
    pub fn sort(mut self, key: SortKey) -> Self {
        self.preprocess = self.preprocess.sort(key);
        self
    }

    /// Keep the first `n` rows.
    pub fn with_rows(mut self, n: usize) -> Self {
        self.preprocess = self.preprocess.with_rows(n);
        self
    }

    /// Title for messages.
    pub(crate) fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("untitled")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let frame = DataFrame::new(["a"]);
        let request = RenderRequest::new(frame)
            .with_title("Loads")
            .with_max_rows(25)
            .with_document_type("paper")
            .with_column_span(1.5)
            .with_highlight_columns(["a"])
            .sort(SortKey::desc("a"))
            .with_rows(10);

        assert_eq!(request.title.as_deref(), Some("Loads"));
        assert_eq!(request.max_rows, Some(MaxRows::Uniform(25.0)));
        assert_eq!(request.document_type, "paper");
        assert_eq!(request.column_span, Some(ColumnSpan::Span(1.5)));
        assert_eq!(request.highlight_columns, Some(vec!["a".to_string()]));
        assert_eq!(request.preprocess.sort_by.len(), 1);
        assert_eq!(request.preprocess.n_rows, Some(10));
        assert_eq!(request.layout_style, DEFAULT_LAYOUT_STYLE);
        assert_eq!(request.value_type, DEFAULT_VALUE_TYPE);
    }
}
