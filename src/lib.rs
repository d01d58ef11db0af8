//! # tablepage
//!
//! Table pagination and layout widths for generated documents.
//!
//! This library prepares tabular data for print: it cleans the table, guesses
//! what kind of data it holds, splits it into page-sized chunks, works out how
//! wide each chunk should be on the page and emits cross-referenced figure
//! markup for every chunk.
//!
//! ## Quick Start
//!
//! ```no_run
//! use tablepage::{DataFrame, RenderRequest, Tablepage};
//!
//! fn main() -> tablepage::Result<()> {
//!     let mut session = Tablepage::new().with_base_dir("build").session()?;
//!
//!     let frame = DataFrame::from_rows(
//!         ["Node", "Fx (kN)", "Fy (kN)"],
//!         vec![vec!["1".into(), 12.5.into(), (-3.25).into()]],
//!     )?;
//!     let output = session.add_table(
//!         &RenderRequest::new(frame)
//!             .with_title("Reactions")
//!             .with_max_rows(25)
//!             .with_document_type("paper")
//!             .with_column_span(2.0),
//!     )?;
//!
//!     println!("{}", output.fragment);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Preprocessing**: filter, stable multi-key sort, truncate, hide columns
//! - **Category detection**: weighted keyword and coordinate-pattern rules
//! - **Chunking**: uniform or custom row budgets per page
//! - **Layout widths**: whole and fractional spans over 1 to 3 page columns
//! - **Pluggable backends**: any [`render::TableImageRenderer`]

pub mod config;
pub mod detect;
pub mod error;
pub mod layout;
pub mod model;
pub mod prep;
pub mod render;
pub mod session;
pub mod split;

// Re-export commonly used types
pub use config::{CategoryRule, DocumentTypeProfile, TablesConfig};
pub use detect::{detect, Detection};
pub use error::{Error, Result};
pub use layout::{width_string, ColumnSpan, ColumnWidthCalculator};
pub use model::{ColumnLabel, DataFrame, Index, TableCounter, Value};
pub use prep::{preprocess, FilterCondition, PreprocessOptions, SortDirection, SortKey};
pub use render::{
    OutputDirs, PipeTableWriter, RenderOutput, RenderRequest, TableImageRenderer, TablePaginator,
};
pub use session::DocumentSession;
pub use split::{split, Chunk, MaxRows};

use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Load and validate a configuration file.
///
/// # Example
///
/// ```no_run
/// let config = tablepage::load_config("config/tables.json").unwrap();
/// println!("{:?}", config.document_type_names().collect::<Vec<_>>());
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<TablesConfig> {
    TablesConfig::from_path(path)
}

/// Split a table into chunks without rendering anything.
pub fn paginate(frame: &DataFrame, max_rows: impl Into<MaxRows>) -> Result<Vec<Chunk>> {
    split(frame, &max_rows.into())
}

/// Builder for document sessions.
///
/// # Example
///
/// ```no_run
/// use tablepage::Tablepage;
///
/// let session = Tablepage::new()
///     .with_config_file("tables.json")
///     .with_base_dir("out")
///     .session()?;
/// # Ok::<(), tablepage::Error>(())
/// ```
pub struct Tablepage {
    config: Option<TablesConfig>,
    config_file: Option<PathBuf>,
    renderer: Option<Arc<dyn TableImageRenderer>>,
    base_dir: PathBuf,
}

impl Tablepage {
    /// Create a new builder (built-in configuration, pipe-table backend,
    /// current directory).
    pub fn new() -> Self {
        Self {
            config: None,
            config_file: None,
            renderer: None,
            base_dir: PathBuf::from("."),
        }
    }

    /// Use an already loaded configuration.
    pub fn with_config(mut self, config: TablesConfig) -> Self {
        self.config = Some(config);
        self.config_file = None;
        self
    }

    /// Load the configuration from a file when the session starts.
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self.config = None;
        self
    }

    /// Set the rendering backend.
    pub fn with_renderer(mut self, renderer: Arc<dyn TableImageRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Set the directory holding `results/`.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    /// Resolve the configuration and start a session.
    pub fn session(self) -> Result<DocumentSession> {
        let config = match (self.config, self.config_file) {
            (Some(config), _) => config,
            (None, Some(path)) => TablesConfig::from_path(path)?,
            (None, None) => TablesConfig::builtin()?,
        };
        let renderer: Arc<dyn TableImageRenderer> = match self.renderer {
            Some(renderer) => renderer,
            None => Arc::new(PipeTableWriter::new()),
        };
        Ok(DocumentSession::new(config, renderer, self.base_dir))
    }
}

impl Default for Tablepage {
    fn default() -> Self {
        Self::new()
    }
}
