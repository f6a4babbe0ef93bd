//! Facet extraction and dashboard counts.
//!
//! [`distinct_sources`] feeds the source selector; [`SignupStats`] backs the
//! summary strip (total signups, signups today, distinct states).

use crate::types::SignupRecord;
use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

/// Every `how_heard_about_us` value present in `records`, without
/// duplicates. Ordered lexically so the same input always yields the same
/// selector contents.
pub fn distinct_sources(records: &[SignupRecord]) -> BTreeSet<String> {
    records
        .iter()
        .filter_map(|r| r.how_heard_about_us.clone())
        .collect()
}

/// Summary counts over the full (unfiltered) record set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SignupStats {
    pub total: usize,
    /// Records created on `now`'s calendar date in the display offset.
    pub today: usize,
    /// Number of distinct state codes.
    pub states: usize,
}

impl SignupStats {
    pub fn compute(records: &[SignupRecord], now: DateTime<Utc>, offset: FixedOffset) -> Self {
        let today = now.with_timezone(&offset).date_naive();
        Self {
            total: records.len(),
            today: records
                .iter()
                .filter(|r| r.created_at.with_timezone(&offset).date_naive() == today)
                .count(),
            states: records.iter().map(|r| r.state.as_str()).collect::<HashSet<_>>().len(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
