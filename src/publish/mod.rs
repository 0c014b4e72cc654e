// src/publish/mod.rs
//
// Upload the encoded dataset, then (only on success) start the
// migration job. A failed upload must never be followed by a trigger:
// the job would migrate absent or stale data.

pub mod store;
pub mod trigger;

use chrono::{DateTime, FixedOffset};

use crate::config::publish::PublishConfig;
use crate::error::PublishError;
use crate::specs::DatasetSpec;

use store::ObjectStore;
use trigger::{JobSubmission, JobTrigger};

/// Where the uploaded object ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    pub bucket: String,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TriggerOutcome {
    /// Upload failed, so the trigger was never attempted.
    NotAttempted,
    Triggered(JobSubmission),
    Failed(PublishError),
}

pub struct PublishOutcome {
    pub upload: Result<UploadReceipt, PublishError>,
    pub trigger: TriggerOutcome,
}

/// Object key: `{folder}/{stem}_{timestamp}.csv`, unique per run and
/// matching what the migration job is configured to pick up.
pub fn object_key(cfg: &PublishConfig, spec: &DatasetSpec, now: DateTime<FixedOffset>) -> String {
    format!(
        "{}/{}_{}.csv",
        cfg.folder.trim_end_matches('/'),
        spec.file_stem,
        now.format("%Y%m%d%H%M%S")
    )
}

/// Upload, then trigger. Strictly sequential, no internal retries;
/// retry policy belongs to the collaborators behind the traits.
pub fn publish(
    csv_text: &str,
    object_store: &dyn ObjectStore,
    job_trigger: &dyn JobTrigger,
    cfg: &PublishConfig,
    spec: &DatasetSpec,
    now: DateTime<FixedOffset>,
) -> PublishOutcome {
    let key = object_key(cfg, spec, now);
    logf!("[OBS] uploading CSV to bucket={}, key={}", cfg.bucket, key);

    if let Err(e) = object_store.put(&cfg.bucket, &key, csv_text, "text/csv") {
        loge!("[OBS] upload failed, not starting migration job: {e}");
        return PublishOutcome {
            upload: Err(e),
            trigger: TriggerOutcome::NotAttempted,
        };
    }
    logf!("[OBS] upload successful");

    let trigger = match job_trigger.start(&cfg.job_name(spec)) {
        Ok(submission) => TriggerOutcome::Triggered(submission),
        Err(e) => {
            loge!("[CDM] {e}");
            TriggerOutcome::Failed(e)
        }
    };

    PublishOutcome {
        upload: Ok(UploadReceipt {
            bucket: cfg.bucket.clone(),
            key,
        }),
        trigger,
    }
}
