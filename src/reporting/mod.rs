//! Report period selection.

mod date_range;

pub use date_range::{DateRange, DateRangePreset};
