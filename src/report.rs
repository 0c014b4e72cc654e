// src/report.rs
//
// The run's user-visible outcome: per-state counts, cause chains for
// every failed state, and the upload/trigger result. Printed as JSON at
// the end of a run; never a bare error with no context.

use serde::Serialize;

use crate::harvest::{Dataset, HarvestResult};
use crate::publish::{PublishOutcome, TriggerOutcome};
use crate::specs::DatasetSpec;

#[derive(Serialize)]
pub struct StateReport {
    pub state: String,
    pub ok: bool,
    pub records: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub dropped_rows: usize,
    /// One "source: stage error" line per attempted source, failures only.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

#[derive(Serialize)]
pub struct UploadReport {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize)]
pub struct TriggerReport {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize)]
pub struct RunReport {
    pub dataset: String,
    pub generated_at: String,
    pub states_processed: usize,
    pub states_succeeded: usize,
    pub states_failed: usize,
    pub rows_scraped: usize,
    pub rows_dropped: usize,
    pub states: Vec<StateReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload: Option<UploadReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger: Option<TriggerReport>,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

impl RunReport {
    pub fn new(dataset: &Dataset, spec: &DatasetSpec) -> Self {
        let states: Vec<StateReport> = dataset
            .results
            .iter()
            .map(|result| match result {
                HarvestResult::Success {
                    state,
                    records,
                    source_used,
                    dropped_rows,
                } => StateReport {
                    state: s!(state.name),
                    ok: true,
                    records: records.len(),
                    source: Some(s!(*source_used)),
                    dropped_rows: *dropped_rows,
                    errors: Vec::new(),
                },
                HarvestResult::Failure { state, attempts } => StateReport {
                    state: s!(state.name),
                    ok: false,
                    records: 0,
                    source: None,
                    dropped_rows: 0,
                    errors: attempts
                        .iter()
                        .map(|(id, e)| format!("{id}: {e}"))
                        .collect(),
                },
            })
            .collect();

        let states_succeeded = states.iter().filter(|s| s.ok).count();

        Self {
            dataset: s!(spec.name),
            generated_at: dataset.generated_at.to_rfc3339(),
            states_processed: states.len(),
            states_succeeded,
            states_failed: states.len() - states_succeeded,
            rows_scraped: dataset.total_record_count,
            rows_dropped: states.iter().map(|s| s.dropped_rows).sum(),
            states,
            upload: None,
            trigger: None,
        }
    }

    pub fn with_publish(mut self, outcome: &PublishOutcome) -> Self {
        self.upload = Some(match &outcome.upload {
            Ok(receipt) => UploadReport {
                ok: true,
                bucket: Some(receipt.bucket.clone()),
                object_key: Some(receipt.key.clone()),
                error: None,
            },
            Err(e) => UploadReport {
                ok: false,
                bucket: None,
                object_key: None,
                error: Some(e.to_string()),
            },
        });
        self.trigger = Some(match &outcome.trigger {
            TriggerOutcome::NotAttempted => TriggerReport {
                status: "not_attempted",
                detail: None,
                error: None,
            },
            TriggerOutcome::Triggered(submission) => TriggerReport {
                status: "ok",
                detail: Some(submission.0.clone()),
                error: None,
            },
            TriggerOutcome::Failed(e) => TriggerReport {
                status: "failed",
                detail: None,
                error: Some(e.to_string()),
            },
        });
        self
    }
}
