//! Document session: the running counter and accumulated markup.

use crate::config::TablesConfig;
use crate::error::Result;
use crate::model::TableCounter;
use crate::render::{PipeTableWriter, RenderOutput, RenderRequest, TableImageRenderer, TablePaginator};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One run of document generation.
///
/// The session owns the table counter, so consecutive tables get
/// consecutive numbers and split tables reserve one number per chunk.
///
/// # Example
///
/// ```no_run
/// use tablepage::model::DataFrame;
/// use tablepage::render::RenderRequest;
/// use tablepage::session::DocumentSession;
///
/// fn main() -> tablepage::Result<()> {
///     let mut session = DocumentSession::builtin("build")?;
///     session.add_text("# Results");
///
///     let frame = DataFrame::from_rows(["Node", "X (m)"], vec![vec!["1".into(), 0.0.into()]])?;
///     session.add_table(&RenderRequest::new(frame).with_title("Nodes"))?;
///     session.write_to("build/results/report/document.md")?;
///     Ok(())
/// }
/// ```
pub struct DocumentSession {
    config: TablesConfig,
    renderer: Arc<dyn TableImageRenderer>,
    base_dir: PathBuf,
    counter: TableCounter,
    content: String,
    artifacts: Vec<PathBuf>,
}

impl DocumentSession {
    /// Start a session.
    pub fn new(
        config: TablesConfig,
        renderer: Arc<dyn TableImageRenderer>,
        base_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            config,
            renderer,
            base_dir: base_dir.into(),
            counter: TableCounter::new(),
            content: String::new(),
            artifacts: Vec::new(),
        }
    }

    /// Start a session with the built-in configuration and the pipe-table
    /// backend.
    pub fn builtin(base_dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self::new(
            TablesConfig::builtin()?,
            Arc::new(PipeTableWriter::new()),
            base_dir,
        ))
    }

    /// Append free text.
    pub fn add_text(&mut self, text: &str) {
        if !self.content.is_empty() && !self.content.ends_with('\n') {
            self.content.push('\n');
        }
        self.content.push_str(text);
        self.content.push('\n');
    }

    /// Paginate a table and append its markup.
    ///
    /// On error nothing is appended and the counter is unchanged.
    pub fn add_table(&mut self, request: &RenderRequest) -> Result<RenderOutput> {
        let paginator = TablePaginator::new(&self.config, self.renderer.as_ref(), &self.base_dir);
        let output = paginator.render(request, self.counter)?;

        self.counter = output.counter;
        self.content.push_str(&output.fragment);
        self.artifacts.extend(output.artifacts.iter().cloned());
        Ok(output)
    }

    /// Markup accumulated so far.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Number of the last table emitted.
    pub fn counter(&self) -> TableCounter {
        self.counter
    }

    /// Every artifact written in this session.
    pub fn artifacts(&self) -> &[PathBuf] {
        &self.artifacts
    }

    /// Session configuration.
    pub fn config(&self) -> &TablesConfig {
        &self.config
    }

    /// Forget the content, artifacts and counter. Files on disk are kept.
    pub fn reset(&mut self) {
        log::debug!("Resetting session at table {}", self.counter);
        self.counter = TableCounter::new();
        self.content.clear();
        self.artifacts.clear();
    }

    /// Write the accumulated markup to `path`, creating parent directories.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, &self.content)?;
        Ok(())
    }
}
