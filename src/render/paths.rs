//! Output directory layout and artifact references.

use crate::config::DocumentTypeProfile;
use crate::error::Result;
use std::path::{Component, Path, PathBuf};

/// Root directory for generated documents, below the session base directory.
pub const RESULTS_DIR: &str = "results";

/// Directory name for table artifacts.
pub const TABLES_DIR: &str = "tables";

/// Directory name for figure artifacts.
pub const FIGURES_DIR: &str = "figures";

/// Directories used while generating one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDirs {
    /// Directory the document is compiled from; artifact references are
    /// relative to it
    pub execution: PathBuf,

    /// Directory receiving table artifacts
    pub tables: PathBuf,

    /// Directory receiving figure artifacts
    pub figures: PathBuf,
}

impl OutputDirs {
    /// Explicit directories.
    pub fn new(
        execution: impl Into<PathBuf>,
        tables: impl Into<PathBuf>,
        figures: impl Into<PathBuf>,
    ) -> Self {
        Self {
            execution: execution.into(),
            tables: tables.into(),
            figures: figures.into(),
        }
    }

    /// Standard layout `<base>/results/<output_dir>/{tables,figures}`.
    pub fn for_document(base: impl AsRef<Path>, profile: &DocumentTypeProfile) -> Self {
        let execution = base.as_ref().join(RESULTS_DIR).join(&profile.output_dir);
        Self {
            tables: execution.join(TABLES_DIR),
            figures: execution.join(FIGURES_DIR),
            execution,
        }
    }

    /// Create every directory. Existing directories are fine.
    pub fn ensure(&self) -> Result<()> {
        for dir in [&self.execution, &self.tables, &self.figures] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    /// Last component of the tables directory.
    pub fn tables_dir_name(&self) -> String {
        self.tables
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| TABLES_DIR.to_string())
    }

    /// Reference to `artifact` as written in the document: relative to the
    /// execution directory with `/` separators, or `<tables>/<file>` when no
    /// relative path exists.
    pub fn relative_reference(&self, artifact: &Path) -> String {
        if let Some(relative) = relative_path(artifact, &self.execution) {
            return join_forward(&relative);
        }
        let file_name = artifact
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        log::debug!(
            "No relative path from {} to {}",
            self.execution.display(),
            artifact.display()
        );
        format!("{}/{}", self.tables_dir_name(), file_name)
    }
}

/// Path of `target` relative to `base`, or `None` when the two do not share
/// a root (different drives, one absolute and one relative, or `..` left in
/// the base).
fn relative_path(target: &Path, base: &Path) -> Option<PathBuf> {
    let target: Vec<Component> = target.components().filter(|c| *c != Component::CurDir).collect();
    let base: Vec<Component> = base.components().filter(|c| *c != Component::CurDir).collect();

    if target.first().map(is_root) != base.first().map(is_root) {
        return None;
    }
    if let (Some(Component::Prefix(a)), Some(Component::Prefix(b))) = (target.first(), base.first()) {
        if a != b {
            return None;
        }
    }

    let common = target
        .iter()
        .zip(base.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut out = PathBuf::new();
    for component in &base[common..] {
        match component {
            Component::Normal(_) => out.push(".."),
            _ => return None,
        }
    }
    for component in &target[common..] {
        out.push(component.as_os_str());
    }
    Some(out)
}

fn is_root(component: &Component) -> bool {
    matches!(component, Component::Prefix(_) | Component::RootDir)
}

fn join_forward(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
