//! Row filtering.

use crate::model::{DataFrame, Value};

/// Keep rows whose `column` matches one of `values`.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCondition {
    /// Column display name
    pub column: String,
    /// Accepted values (OR-ed)
    pub values: Vec<Value>,
}

impl FilterCondition {
    /// Match a single value.
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            values: vec![value.into()],
        }
    }

    /// Match any of several values.
    pub fn any_of<V: Into<Value>>(column: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        Self {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// Apply filter conditions: OR within a column, AND across columns.
pub(crate) fn filter_rows(frame: &DataFrame, conditions: &[FilterCondition]) -> DataFrame {
    // Group values by column, keeping first-seen column order.
    let mut grouped: Vec<(&str, Vec<&Value>)> = Vec::new();
    for condition in conditions {
        match grouped.iter_mut().find(|(c, _)| *c == condition.column) {
            Some((_, values)) => values.extend(condition.values.iter()),
            None => grouped.push((&condition.column, condition.values.iter().collect())),
        }
    }

    let mut current = frame.clone();
    for (column, values) in grouped {
        let Some(position) = current.column_position(column) else {
            log::debug!("Filter column '{}' not found, skipping", column);
            continue;
        };

        let cells: Vec<&Value> = current.column_values(position).collect();
        let mut keep = vec![false; cells.len()];
        for value in values {
            let mask = match value {
                Value::Text(wanted) => text_mask(&cells, wanted),
                other => cells.iter().map(|cell| cell.loose_eq(other)).collect(),
            };
            for (k, m) in keep.iter_mut().zip(mask) {
                *k |= m;
            }
        }

        let positions: Vec<usize> = keep
            .iter()
            .enumerate()
            .filter_map(|(i, &k)| k.then_some(i))
            .collect();
        log::debug!(
            "Filter on '{}' kept {} of {} rows",
            column,
            positions.len(),
            cells.len()
        );
        current = current.take_rows(&positions);
    }
    current
}

/// Exact text match; falls back to case-insensitive substring when nothing
/// in the column matches exactly.
fn text_mask(cells: &[&Value], wanted: &str) -> Vec<bool> {
    let exact: Vec<bool> = cells.iter().map(|c| c.to_string() == wanted).collect();
    if exact.iter().any(|&m| m) {
        return exact;
    }
    let needle = wanted.to_lowercase();
    cells
        .iter()
        .map(|c| !c.is_null() && c.to_string().to_lowercase().contains(&needle))
        .collect()
}
