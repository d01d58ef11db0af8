//! Table model types.
//!
//! A [`DataFrame`] is the input of every pagination call. It is owned by the
//! caller and never mutated in place: each pipeline stage works on a copy.

mod counter;
mod frame;
mod value;

pub use counter::TableCounter;
pub use frame::{ColumnLabel, DataFrame, Index, LEVEL_SEPARATOR};
pub use value::Value;
