//! Calendar grid and date-range selection helpers.
//!
//! # Responsibility
//! - Generate the month grid the tracker's calendar sheet renders.
//! - Run the two-tap range selection state machine and preset shortcuts.
//!
//! # Invariants
//! - All functions are pure over `NaiveDate`; time-of-day never enters the
//!   comparison.
//! - Ranges are inclusive on both ends with `start <= end`.

pub mod grid;
pub mod range;

pub use grid::month_grid;
pub use range::{default_range, DateRange, RangePreset, RangeSelection};
