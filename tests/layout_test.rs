//! Integration tests for splitting, widths, detection and preprocessing.

use tablepage::split::reassemble;
use tablepage::{
    detect, preprocess, split, ColumnSpan, ColumnWidthCalculator, DataFrame, Error,
    FilterCondition, MaxRows, PreprocessOptions, SortKey, TablesConfig, Value,
};

fn rows(n: usize) -> DataFrame {
    DataFrame::from_rows(
        ["id", "value"],
        (0..n)
            .map(|i| vec![Value::Int(i as i64), Value::Float(i as f64 / 3.0)])
            .collect(),
    )
    .unwrap()
}

fn sizes(frame: &DataFrame, max_rows: MaxRows) -> Vec<usize> {
    split(frame, &max_rows)
        .unwrap()
        .iter()
        .map(|c| c.row_count())
        .collect()
}

// ==================== Splitting ====================

#[test]
fn test_split_at_total_rows_is_identity() {
    let frame = rows(42);
    let chunks = split(&frame, &MaxRows::from(42)).unwrap();
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].frame, frame);
}

#[test]
fn test_split_partitions_table() {
    let frame = rows(97);
    for max_rows in [
        MaxRows::from(1),
        MaxRows::from(10),
        MaxRows::from(96),
        MaxRows::from(500),
        MaxRows::Uniform(7.5),
        MaxRows::from(vec![30, 20]),
        MaxRows::from(vec![50, 50, 50]),
    ] {
        let chunks = split(&frame, &max_rows).unwrap();
        let total: usize = chunks.iter().map(|c| c.row_count()).sum();
        assert_eq!(total, 97, "{:?}", max_rows);

        for pair in chunks.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert_eq!(reassemble(&chunks).unwrap(), frame);
    }
}

#[test]
fn test_uniform_split_150_by_25() {
    assert_eq!(sizes(&rows(150), MaxRows::from(25)), vec![25; 6]);
}

#[test]
fn test_custom_split_sizes() {
    assert_eq!(
        sizes(&rows(130), MaxRows::from(vec![30, 20, 20, 20, 20, 20])),
        vec![30, 20, 20, 20, 20, 20]
    );
    // Leftover rows past the list become one uncapped chunk.
    assert_eq!(
        sizes(&rows(150), MaxRows::from(vec![30, 20, 20, 20, 20, 20])),
        vec![30, 20, 20, 20, 20, 20, 20]
    );
    assert_eq!(
        sizes(&rows(205), MaxRows::from(vec![100, 100])),
        vec![100, 100, 5]
    );
    assert_eq!(sizes(&rows(250), MaxRows::from(vec![10])), vec![10, 240]);
}

#[test]
fn test_max_rows_from_json_rejects_other_types() {
    for value in [
        serde_json::json!("25"),
        serde_json::json!(null),
        serde_json::json!({"rows": 25}),
        serde_json::json!(true),
    ] {
        assert!(matches!(
            MaxRows::from_json(&value),
            Err(Error::InvalidMaxRows(_))
        ));
    }
}

// ==================== Widths ====================

#[test]
fn test_width_continuity_on_paper() {
    let config = TablesConfig::builtin().unwrap();
    let calc = ColumnWidthCalculator::new(&config);
    let widths = config.document_type("paper").unwrap().widths(2).copied().unwrap();

    let width = |span: f64| {
        calc.calculate_width("paper", 2, Some(&ColumnSpan::Span(span)))
            .unwrap()
    };
    assert_eq!(width(1.0), widths.single);
    assert_eq!(width(2.0), widths.double);
    assert!((width(1.5) - (widths.single + 0.5 * (widths.single + widths.gap))).abs() < 1e-9);
}

#[test]
fn test_widths_within_page() {
    let config = TablesConfig::builtin().unwrap();
    let calc = ColumnWidthCalculator::new(&config);
    for doc in ["paper", "report", "book"] {
        let total = config.document_type(doc).unwrap().total_width;
        for layout in 1..=3u8 {
            for step in 1..=12 {
                let span = ColumnSpan::Span(step as f64 * 0.25);
                let w = calc.calculate_width(doc, layout, Some(&span)).unwrap();
                assert!(w > 0.0 && w <= total + 1e-9, "{} {} {:?} -> {}", doc, layout, span, w);
            }
        }
    }
}

#[test]
fn test_span_wider_than_layout_rejected() {
    let config = TablesConfig::builtin().unwrap();
    let calc = ColumnWidthCalculator::new(&config);
    let err = calc
        .validate_columns("paper", 1, Some(&ColumnSpan::Span(2.0)))
        .unwrap_err();
    assert!(matches!(
        err,
        Error::ColumnSpanExceedsLayout { layout: 1, .. }
    ));
}

// ==================== Detection ====================

#[test]
fn test_coordinate_columns_detected() {
    let config = TablesConfig::builtin().unwrap();
    let frame = DataFrame::new(["X (m)", "Y (m)", "Z (m)"]);
    let detection = detect(&frame, &config.default_category, &config.categories);
    assert_eq!(detection.category, "nodes");
    assert_eq!(detection.highlight_columns, vec!["X (m)", "Y (m)", "Z (m)"]);
}

#[test]
fn test_unmatched_columns_use_default() {
    let config = TablesConfig::builtin().unwrap();
    let frame = DataFrame::new(["Comment", "Owner"]);
    let detection = detect(&frame, &config.default_category, &config.categories);
    assert_eq!(detection.category, config.default_category);
    assert!(detection.highlight_columns.is_empty());
}

// ==================== Preprocessing ====================

#[test]
fn test_zone_then_load_sort() {
    let frame = DataFrame::from_rows(
        ["Zone", "Load_kN", "Tag"],
        vec![
            vec!["B".into(), 4.into(), "b-low".into()],
            vec!["A".into(), 8.into(), "a-high-1".into()],
            vec!["B".into(), 9.into(), "b-high".into()],
            vec!["A".into(), 2.into(), "a-low".into()],
            vec!["A".into(), 8.into(), "a-high-2".into()],
        ],
    )
    .unwrap();

    let options = PreprocessOptions::new()
        .sort(SortKey::new("Zone", "asc"))
        .sort(SortKey::new("Load_kN", "desc"));
    let out = preprocess(&frame, &options).unwrap();
    let tags: Vec<String> = out.column_values(2).map(|v| v.to_string()).collect();
    assert_eq!(tags, vec!["a-high-1", "a-high-2", "a-low", "b-high", "b-low"]);
}

#[test]
fn test_bad_direction_names_column() {
    let frame = rows(3);
    let options = PreprocessOptions::new().sort(SortKey::new("value", "upward"));
    let err = preprocess(&frame, &options).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid sort direction 'upward' for column 'value'"
    );
}

#[test]
fn test_hiding_does_not_affect_filtering() {
    let frame = rows(10);
    let options = PreprocessOptions::new()
        .filter(FilterCondition::any_of("id", vec![Value::Int(2), Value::Int(5)]))
        .hide("id");
    let out = preprocess(&frame, &options).unwrap();
    assert_eq!(out.column_names(), vec!["value"]);
    assert_eq!(out.row_count(), 2);
}

#[test]
fn test_input_left_untouched() {
    let frame = rows(5);
    let before = frame.clone();
    let options = PreprocessOptions::new().sort(SortKey::desc("id")).with_rows(2);
    let _ = preprocess(&frame, &options).unwrap();
    assert_eq!(frame, before);
}
