//! Growth charts: weight, height, head circumference and BMI against age.
//!
//! Per-visit points are deduplicated by visit and sorted by age, then
//! shaped either as per-metric lines for one child (gaps stay gaps) or as
//! an age-indexed table with one column per metric per child (lines
//! bridge nulls). Left and right axis domains are derived from what ends
//! up plotted.

mod aggregate;
mod axis;
mod types;

pub use aggregate::*;
pub use axis::*;
pub use types::*;

// ── Tests ──────────────────────────────────────────────────────────────────
