//! Integration tests for table pagination.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tablepage::error::{Error, Result};
use tablepage::render::{ChunkJob, OutputDirs, RenderRequest, TableImageRenderer, TablePaginator};
use tablepage::{DataFrame, DocumentSession, TableCounter, TablesConfig, Value};

/// Mock renderer recording every job.
struct MockRenderer {
    jobs: Mutex<Vec<String>>,
    fail_all: bool,
}

impl MockRenderer {
    fn new() -> Self {
        Self {
            jobs: Mutex::new(Vec::new()),
            fail_all: false,
        }
    }

    fn failing() -> Self {
        Self {
            jobs: Mutex::new(Vec::new()),
            fail_all: true,
        }
    }
}

impl TableImageRenderer for MockRenderer {
    fn name(&self) -> &str {
        "mock"
    }

    fn render_chunk(&self, job: &ChunkJob<'_>) -> Result<PathBuf> {
        self.jobs.lock().unwrap().push(format!(
            "{}:{}:{}",
            job.caption,
            job.frame.row_count(),
            job.category
        ));
        if self.fail_all {
            return Err(Error::Render("rasterizer unavailable".into()));
        }
        std::fs::write(job.target, b"png")?;
        Ok(job.target.to_path_buf())
    }
}

fn loads(rows: usize) -> DataFrame {
    DataFrame::from_rows(
        ["Node", "Load (kN)", "Reaction (kN)"],
        (0..rows)
            .map(|i| {
                vec![
                    Value::Int(i as i64 + 1),
                    Value::Float(i as f64 * 1.2345),
                    Value::Float(-(i as f64)),
                ]
            })
            .collect(),
    )
    .unwrap()
}

#[test]
fn test_three_chunks_from_counter_four() {
    let tmp = tempfile::tempdir().unwrap();
    let config = TablesConfig::builtin().unwrap();
    let renderer = MockRenderer::new();
    let paginator = TablePaginator::new(&config, &renderer, tmp.path());

    let request = RenderRequest::new(loads(75))
        .with_title("Cargas")
        .with_max_rows(25);
    let output = paginator
        .render(&request, TableCounter::starting_at(4))
        .unwrap();

    assert_eq!(output.ids(), vec!["tbl-5", "tbl-5-2", "tbl-5-3"]);
    assert_eq!(output.counter, TableCounter::starting_at(7));
    assert_eq!(output.category, "forces");
    assert_eq!(
        renderer.jobs.lock().unwrap().clone(),
        vec![
            "Cargas (Parte 1):25:forces",
            "Cargas (Parte 2):25:forces",
            "Cargas (Parte 3):25:forces",
        ]
    );
    for artifact in &output.artifacts {
        assert!(artifact.exists());
    }
}

#[test]
fn test_single_chunk_uses_title_and_counter() {
    let tmp = tempfile::tempdir().unwrap();
    let config = TablesConfig::builtin().unwrap();
    let renderer = MockRenderer::new();
    let paginator = TablePaginator::new(&config, &renderer, tmp.path());

    let request = RenderRequest::new(loads(10))
        .with_title("Cargas")
        .with_document_type("paper")
        .with_column_span(1.5);
    let output = paginator.render(&request, TableCounter::new()).unwrap();

    assert_eq!(
        output.fragment,
        "\n\n![Cargas](tables/table_1_cargas.png){#tbl-1 width=4.8in .quarto-figure-center}\n\n"
    );
    assert!(tmp
        .path()
        .join("results/paper/tables/table_1_cargas.png")
        .exists());
}

#[test]
fn test_failing_renderer_keeps_counter() {
    let tmp = tempfile::tempdir().unwrap();
    let config = TablesConfig::builtin().unwrap();
    let renderer = MockRenderer::failing();
    let paginator = TablePaginator::new(&config, &renderer, tmp.path());

    let request = RenderRequest::new(loads(30))
        .with_title("Cargas")
        .with_max_rows(20);
    let output = paginator
        .render(&request, TableCounter::starting_at(2))
        .unwrap();

    assert_eq!(output.counter.value(), 4);
    assert!(output.artifacts.is_empty());
    assert_eq!(output.failed_count(), 2);
    assert_eq!(
        output.fragment.matches("**Table: Cargas**").count(),
        2
    );
    assert!(output.fragment.contains("Error: Rendering error: rasterizer unavailable"));
}

#[test]
fn test_explicit_highlights_skip_detection() {
    let tmp = tempfile::tempdir().unwrap();
    let config = TablesConfig::builtin().unwrap();
    let renderer = MockRenderer::new();
    let paginator = TablePaginator::new(&config, &renderer, tmp.path());

    let request = RenderRequest::new(loads(3)).with_highlight_columns(["Node"]);
    let output = paginator.render(&request, TableCounter::new()).unwrap();

    assert_eq!(output.category, "general");
    assert_eq!(output.highlight_columns, vec!["Node"]);
}

#[test]
fn test_reference_falls_back_to_tables_dir_name() {
    let tmp = tempfile::tempdir().unwrap();
    let config = TablesConfig::builtin().unwrap();
    let renderer = MockRenderer::new();

    // Relative tables dir against an absolute execution dir: no relative path.
    let tables = PathBuf::from(format!("scratch-{}", std::process::id()));
    let dirs = OutputDirs::new(tmp.path(), &tables, tmp.path().join("figures"));
    let paginator = TablePaginator::new(&config, &renderer, tmp.path()).with_output_dirs(dirs);

    let output = paginator
        .render(&RenderRequest::new(loads(2)), TableCounter::new())
        .unwrap();
    std::fs::remove_dir_all(&tables).unwrap();

    let expected = format!("]({}/table_1.png)", tables.display());
    assert!(output.fragment.contains(&expected), "{}", output.fragment);
}

#[test]
fn test_session_threads_counter() {
    let tmp = tempfile::tempdir().unwrap();
    let config = TablesConfig::builtin().unwrap();
    let mut session = DocumentSession::new(config, Arc::new(MockRenderer::new()), tmp.path());

    session
        .add_table(&RenderRequest::new(loads(50)).with_max_rows(vec![30, 10]))
        .unwrap();
    let second = session.add_table(&RenderRequest::new(loads(5))).unwrap();

    assert_eq!(second.ids(), vec!["tbl-4"]);
    assert_eq!(session.counter().value(), 4);
    assert_eq!(session.artifacts().len(), 4);
}
