//! Running table counter.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of the last table emitted in a document session.
///
/// The counter is a plain value: pagination calls take it in and hand the
/// advanced value back, so there is no hidden shared state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TableCounter(u32);

impl TableCounter {
    /// Counter at session start (no table emitted yet).
    pub fn new() -> Self {
        Self(0)
    }

    /// Counter positioned after table `value`.
    pub fn starting_at(value: u32) -> Self {
        Self(value)
    }

    /// Current value.
    pub fn value(self) -> u32 {
        self.0
    }

    /// Advance by `n` tables and return the new counter.
    pub fn advance(self, n: u32) -> Self {
        Self(self.0 + n)
    }
}

impl fmt::Display for TableCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
