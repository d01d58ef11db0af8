//! Table pagination and figure markup.
//!
//! [`TablePaginator::render`] takes one [`RenderRequest`] and the running
//! [`TableCounter`] and returns the Markdown fragment for the table, the
//! advanced counter and the artifacts written by the backend.
//!
//! # Example
//!
//! ```no_run
//! use tablepage::config::TablesConfig;
//! use tablepage::model::{DataFrame, TableCounter};
//! use tablepage::render::{PipeTableWriter, RenderRequest, TablePaginator};
//!
//! fn main() -> tablepage::Result<()> {
//!     let config = TablesConfig::builtin()?;
//!     let writer = PipeTableWriter::new();
//!     let paginator = TablePaginator::new(&config, &writer, ".");
//!
//!     let frame = DataFrame::from_rows(["Node", "Fx (kN)"], vec![vec!["1".into(), 2.5.into()]])?;
//!     let request = RenderRequest::new(frame).with_title("Reactions").with_max_rows(25);
//!     let output = paginator.render(&request, TableCounter::new())?;
//!     println!("{}", output.fragment);
//!     Ok(())
//! }
//! ```

mod backend;
pub mod markdown;
mod paths;
mod request;
mod result;

pub use backend::{ChunkJob, PipeTableWriter, TableImageRenderer};
pub use paths::{OutputDirs, FIGURES_DIR, RESULTS_DIR, TABLES_DIR};
pub use request::{RenderRequest, DEFAULT_DOCUMENT_TYPE, DEFAULT_LAYOUT_STYLE, DEFAULT_VALUE_TYPE};
pub use result::{ChunkReport, RenderOutput};

use crate::config::TablesConfig;
use crate::detect::detect;
use crate::error::{Error, Result};
use crate::layout::{width_string, ColumnWidthCalculator};
use crate::model::TableCounter;
use crate::prep::{format_numeric, preprocess};
use crate::split::{split, Chunk, MaxRows};
use std::path::PathBuf;

/// Splits tables into chunks, renders them and assembles the markup.
pub struct TablePaginator<'a> {
    config: &'a TablesConfig,
    renderer: &'a dyn TableImageRenderer,
    base_dir: PathBuf,
    output_dirs: Option<OutputDirs>,
}

impl<'a> TablePaginator<'a> {
    /// Create a paginator writing below `base_dir/results/<document type>/`.
    pub fn new(
        config: &'a TablesConfig,
        renderer: &'a dyn TableImageRenderer,
        base_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            config,
            renderer,
            base_dir: base_dir.into(),
            output_dirs: None,
        }
    }

    /// Use fixed directories instead of the per-document-type layout.
    pub fn with_output_dirs(mut self, dirs: OutputDirs) -> Self {
        self.output_dirs = Some(dirs);
        self
    }

    /// Directories used for a document type.
    pub fn output_dirs(&self, document_type: &str) -> Result<OutputDirs> {
        match &self.output_dirs {
            Some(dirs) => Ok(dirs.clone()),
            None => {
                let profile = self.config.document_type(document_type)?;
                Ok(OutputDirs::for_document(&self.base_dir, profile))
            }
        }
    }

    /// Paginate one table.
    ///
    /// The counter is advanced by the number of chunks before anything is
    /// rendered and is never rolled back. A chunk the backend fails on is
    /// replaced by fallback text; errors raised before rendering starts are
    /// returned.
    pub fn render(&self, request: &RenderRequest, counter: TableCounter) -> Result<RenderOutput> {
        if request.frame.is_empty() {
            return Err(Error::EmptyTable(request.display_title().to_string()));
        }

        let profile = self.config.document_type(&request.document_type)?;
        let layout_columns = request.layout_columns.unwrap_or(profile.default_columns);

        let frame = preprocess(&request.frame, &request.preprocess)?;
        let frame = format_numeric(&frame, &self.config.number_format, &request.value_type)?;
        if frame.is_empty() {
            return Err(Error::EmptyTable(request.display_title().to_string()));
        }

        let (category, highlight_columns) = match &request.highlight_columns {
            Some(columns) => (
                request
                    .category
                    .clone()
                    .unwrap_or_else(|| self.config.default_category.clone()),
                columns.clone(),
            ),
            None => {
                let detection = detect(&frame, &self.config.default_category, &self.config.categories);
                log::debug!(
                    "Detected category '{}' for '{}'",
                    detection.category,
                    request.display_title()
                );
                (detection.category, detection.highlight_columns)
            }
        };

        let calculator = ColumnWidthCalculator::new(self.config);
        let span = request.column_span.as_ref();
        calculator.validate_columns(&request.document_type, layout_columns, span)?;
        let base_width = calculator.calculate_width(&request.document_type, layout_columns, span)?;

        let chunks = match &request.max_rows {
            Some(max_rows) => split(&frame, max_rows)?,
            None => split(&frame, &MaxRows::Custom(Vec::new()))?,
        };
        let total = chunks.len();

        let dirs = self.output_dirs(&request.document_type)?;
        dirs.ensure()?;

        // Reserve every chunk number up front.
        let base = counter.advance(1);
        let counter = counter.advance(total as u32);
        log::debug!(
            "Rendering '{}' as {} chunk(s), tables {}..={}",
            request.display_title(),
            total,
            base,
            counter
        );

        let extension = self
            .renderer
            .file_extension()
            .unwrap_or(self.config.display.image_extension.as_str());

        let mut output = RenderOutput {
            fragment: String::new(),
            counter,
            artifacts: Vec::new(),
            category,
            highlight_columns,
            chunks: Vec::with_capacity(total),
        };

        for chunk in &chunks {
            let width = span
                .and_then(|s| s.width_for_chunk(chunk.ordinal))
                .unwrap_or(base_width);
            let report = self.render_chunk(
                request,
                chunk,
                total,
                base,
                width,
                extension,
                &dirs,
                &mut output,
            );
            output.chunks.push(report);
        }

        Ok(output)
    }

    #[allow(clippy::too_many_arguments)]
    fn render_chunk(
        &self,
        request: &RenderRequest,
        chunk: &Chunk,
        total: usize,
        base: TableCounter,
        width: f64,
        extension: &str,
        dirs: &OutputDirs,
        output: &mut RenderOutput,
    ) -> ChunkReport {
        let title = request.title.as_deref();
        let label = markdown::chunk_label(base, chunk.ordinal);
        let id = markdown::table_id(base, chunk.ordinal);
        let caption = markdown::caption(title, &self.config.display, base, chunk.ordinal, total);
        let target = dirs
            .tables
            .join(markdown::artifact_file_name(&label, title, extension));

        let rendered = {
            let job = ChunkJob {
                frame: &chunk.frame,
                title,
                caption: &caption,
                palette: request.palette.as_deref(),
                highlight_columns: &output.highlight_columns,
                category: &output.category,
                layout_style: &request.layout_style,
                document_type: &request.document_type,
                width_inches: width,
                index: chunk.ordinal,
                total,
                target: &target,
            };
            self.renderer.render_chunk(&job)
        };

        let mut report = ChunkReport {
            id,
            caption,
            rows: chunk.row_count(),
            width_inches: width,
            artifact: None,
            error: None,
        };

        match rendered {
            Ok(path) => {
                let reference = dirs.relative_reference(&path);
                output.fragment.push_str(&markdown::figure(
                    &report.caption,
                    &reference,
                    &report.id,
                    &width_string(width),
                    &self.config.display.figure_classes,
                ));
                output.artifacts.push(path.clone());
                report.artifact = Some(path);
            }
            Err(e) => {
                log::warn!(
                    "Backend '{}' failed on {} ({}): {}",
                    self.renderer.name(),
                    report.id,
                    request.display_title(),
                    e
                );
                output.fragment.push_str(&markdown::fallback(title, &e.to_string()));
                report.error = Some(e.to_string());
            }
        }
        report
    }
}
