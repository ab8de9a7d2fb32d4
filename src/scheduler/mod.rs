//! Cron-based publication scheduling.
//!
//! This module drives the scheduled-post state machine:
//! - A tick job runs every minute, scans the store for due pending posts
//!   and drives each through credential resolution, media upload and feed
//!   publication, with per-post isolated failure handling.
//! - A daily retention job prunes published posts (and failed posts past
//!   the configured retention window).
//!
//! # Guarantees
//!
//! - Ticks never overlap; a tick that outlives its minute causes the next
//!   firing to be skipped with a warning.
//! - Each post is persisted immediately after its outcome is known, so a
//!   crash loses at most the post currently mid-flight.
//! - A store write failure halts the remainder of the tick instead of
//!   letting the in-memory and on-disk views diverge.

pub mod publication;
pub use publication::{PublicationScheduler, TickRunner};

/// Result of one tick, used by logs and tests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub published: usize,
    pub failed: usize,
    /// True when the tick was skipped because the previous one still ran
    pub skipped: bool,
    /// True when a persistence failure aborted the scan early
    pub halted: bool,
}

impl TickSummary {
    pub fn skipped() -> Self {
        Self {
            skipped: true,
            ..Self::default()
        }
    }
}
