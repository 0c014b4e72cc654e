// src/harvest/mod.rs
//
// The harvest pipeline: fetch → locate → reconcile → normalize, driven
// per state by the fallback orchestrator, fanned out over states by the
// aggregator.

pub mod aggregate;
pub mod fetch;
pub mod locate;
pub mod orchestrate;
pub mod record;
pub mod schema;

use chrono::{DateTime, FixedOffset};

use crate::error::StageError;
use crate::registry::State;
use self::record::Record;

/// Outcome for one state. Success always holds at least one record;
/// an extraction that came back structurally fine but empty counts as a
/// failure of that source, not a zero-row success.
pub enum HarvestResult {
    Success {
        state: &'static State,
        records: Vec<Record>,
        source_used: &'static str,
        /// Body rows discarded for column-count mismatch on the winning
        /// source. Surfaced rather than silently swallowed.
        dropped_rows: usize,
    },
    Failure {
        state: &'static State,
        /// Every source tried, with the stage that broke it.
        attempts: Vec<(&'static str, StageError)>,
    },
}

impl HarvestResult {
    pub fn state(&self) -> &'static State {
        match self {
            HarvestResult::Success { state, .. } => state,
            HarvestResult::Failure { state, .. } => state,
        }
    }

    pub fn record_count(&self) -> usize {
        match self {
            HarvestResult::Success { records, .. } => records.len(),
            HarvestResult::Failure { .. } => 0,
        }
    }
}

/// One run's worth of per-state results. Read-only once built.
pub struct Dataset {
    pub results: Vec<HarvestResult>,
    pub total_record_count: usize,
    pub generated_at: DateTime<FixedOffset>,
}

/// Malaysia time; upstream timestamps and object keys both use it.
pub fn myt() -> FixedOffset {
    FixedOffset::east_opt(8 * 3600).expect("fixed UTC+8 offset")
}
