//! # availability-engine
//!
//! Weekly availability intervals for study scheduling.
//!
//! Everything here is a pure, synchronous transform over plain data: no I/O,
//! no logging, no shared state. Callers load an [`AvailabilitySet`], pass it
//! through these functions, and persist the result themselves.
//!
//! ## Modules
//!
//! - [`timecodec`] — parse `"13:00"` / `"1pm"` into minute-of-day and format back
//! - [`merge`] — merge-on-insert keeping each day sorted, disjoint and non-touching
//! - [`overlap`] — pairwise overlap windows and per-classmate summaries
//! - [`containment`] — does a window fit inside one stored interval
//! - [`weekly`] — seven-day display projection and index-addressed listing
//! - [`error`] — error types

pub mod containment;
pub mod day;
pub mod error;
pub mod interval;
pub mod merge;
pub mod overlap;
pub mod timecodec;
pub mod weekly;

pub use containment::{ensure_fits_within, fits_within};
pub use day::Day;
pub use error::AvailabilityError;
pub use interval::{AvailabilitySet, Interval};
pub use merge::merge_insert;
pub use overlap::{intersect, overlap_summary, OverlapRecord, OverlapSummary};
pub use timecodec::{format12, format24, normalize_day, parse, TimePoint};
pub use weekly::{listing, project, remove_listed};
