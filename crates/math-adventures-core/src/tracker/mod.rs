//! Performance tracking for a practice session.
//!
//! The tracker owns the append-only trial log and derives accuracy and
//! pacing statistics from it, both all-time and over a recent window.

mod performance;
mod summary;
mod trial;

pub use performance::{PerformanceTracker, WindowSummary};
pub use summary::SessionSummary;
pub use trial::{TrialRecord, UNPARSEABLE_ANSWER};
