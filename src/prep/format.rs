//! Numeric column formatting.

use crate::config::NumberFormat;
use crate::error::{Error, Result};
use crate::model::{DataFrame, Value};
use regex::Regex;

/// Coerce numeric-looking text columns, then round numeric columns to the
/// precision configured for `value_type`. Identifier columns are left alone.
pub fn format_numeric(frame: &DataFrame, format: &NumberFormat, value_type: &str) -> Result<DataFrame> {
    let decimals = format.decimal_places(value_type)?;
    let excluded = ExcludedColumns::new(&format.exclude_columns)?;
    let coerced = coerce_numeric_columns(frame, &excluded);
    Ok(round_numeric_columns(&coerced, decimals, &excluded))
}

/// Column-name matcher for identifier columns.
struct ExcludedColumns {
    patterns: Vec<Regex>,
}

impl ExcludedColumns {
    fn new(names: &[String]) -> Result<Self> {
        let patterns = names
            .iter()
            .filter(|n| !n.trim().is_empty())
            .map(|n| {
                Regex::new(&format!(r"(?i)\b{}\b", regex::escape(n.trim())))
                    .map_err(|e| Error::Config(format!("bad exclude column '{}': {}", n, e)))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    fn matches(&self, column: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(column))
    }
}

fn coerce_numeric_columns(frame: &DataFrame, excluded: &ExcludedColumns) -> DataFrame {
    let mut out = frame.clone();
    for (position, name) in frame.column_names().iter().enumerate() {
        if excluded.matches(name) {
            continue;
        }
        let mut has_text = false;
        let convertible = frame.column_values(position).all(|cell| match cell {
            Value::Text(s) => {
                has_text = true;
                parse_number(s).is_some()
            }
            other => other.is_null() || other.is_numeric(),
        });
        if has_text && convertible {
            log::debug!("Coercing text column '{}' to numbers", name);
            out.map_column(position, |cell| match cell {
                Value::Text(s) => parse_number(s).unwrap_or(Value::Null),
                other => other.clone(),
            });
        }
    }
    out
}

fn round_numeric_columns(frame: &DataFrame, decimals: u32, excluded: &ExcludedColumns) -> DataFrame {
    let factor = 10f64.powi(decimals as i32);
    let mut out = frame.clone();
    for (position, name) in frame.column_names().iter().enumerate() {
        if excluded.matches(name) || !is_numeric_column(frame, position) {
            continue;
        }
        out.map_column(position, |cell| match cell {
            Value::Float(v) if v.is_finite() => Value::Float((v * factor).round() / factor),
            other => other.clone(),
        });
    }
    out
}

/// A column is numeric when it has at least one number and nothing but
/// numbers and nulls.
fn is_numeric_column(frame: &DataFrame, position: usize) -> bool {
    let mut any = false;
    for cell in frame.column_values(position) {
        if cell.is_numeric() {
            any = true;
        } else if !cell.is_null() {
            return false;
        }
    }
    any
}

/// Parse a cell such as `"1,250.5"` or `" 42 "`.
fn parse_number(text: &str) -> Option<Value> {
    let cleaned: String = text.trim().chars().filter(|&c| c != ',').collect();
    if cleaned.is_empty() || cleaned == "-" {
        return None;
    }
    if let Ok(i) = cleaned.parse::<i64>() {
        return Some(Value::Int(i));
    }
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(Value::Float)
}
