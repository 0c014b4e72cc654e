// tests/publish_gate.rs
//
// The ordering guarantee: the migration job is started only after the
// dataset is safely uploaded. A failed upload must leave the trigger
// untouched.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::TimeZone;
use serde_json::json;

use water_harvest::config::publish::PublishConfig;
use water_harvest::error::PublishError;
use water_harvest::harvest::myt;
use water_harvest::publish::store::ObjectStore;
use water_harvest::publish::trigger::{JobSubmission, JobTrigger};
use water_harvest::publish::{self, TriggerOutcome};
use water_harvest::specs::DatasetKind;

struct MockStore {
    fail: bool,
    calls: AtomicUsize,
    last_key: Mutex<Option<String>>,
}

impl MockStore {
    fn new(fail: bool) -> Self {
        Self {
            fail,
            calls: AtomicUsize::new(0),
            last_key: Mutex::new(None),
        }
    }
}

impl ObjectStore for MockStore {
    fn put(
        &self,
        _bucket: &str,
        key: &str,
        _content: &str,
        _content_type: &str,
    ) -> Result<(), PublishError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        *self.last_key.lock().unwrap() = Some(key.to_string());
        if self.fail {
            return Err(PublishError::Upload {
                status: 403,
                code: "AccessDenied".into(),
                message: "token expired".into(),
            });
        }
        Ok(())
    }
}

struct MockTrigger {
    fail: bool,
    calls: AtomicUsize,
    last_job: Mutex<Option<String>>,
}

impl MockTrigger {
    fn new(fail: bool) -> Self {
        Self {
            fail,
            calls: AtomicUsize::new(0),
            last_job: Mutex::new(None),
        }
    }
}

impl JobTrigger for MockTrigger {
    fn start(&self, job_name: &str) -> Result<JobSubmission, PublishError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        *self.last_job.lock().unwrap() = Some(job_name.to_string());
        if self.fail {
            return Err(PublishError::Trigger {
                status: 500,
                body: "cluster busy".into(),
            });
        }
        Ok(JobSubmission(json!({ "submissions": [{ "job-name": job_name }] })))
    }
}

fn cfg() -> PublishConfig {
    PublishConfig {
        obs_endpoint: "https://obs.example".into(),
        bucket: "nahrim-raw".into(),
        folder: "waterlevel/raw".into(),
        token: "tok".into(),
        project_id: "proj".into(),
        cluster_id: "cluster".into(),
        cdm_endpoint: "https://cdm.example".into(),
        job_override: None,
    }
}

fn fixed_now() -> chrono::DateTime<chrono::FixedOffset> {
    myt().with_ymd_and_hms(2026, 8, 7, 10, 30, 0).unwrap()
}

#[test]
fn failed_upload_never_triggers() {
    let store = MockStore::new(true);
    let trigger = MockTrigger::new(false);
    let spec = DatasetKind::WaterLevel.spec();

    let outcome = publish::publish("a,b\n1,2\n", &store, &trigger, &cfg(), spec, fixed_now());

    assert!(outcome.upload.is_err());
    assert_eq!(outcome.trigger, TriggerOutcome::NotAttempted);
    assert_eq!(store.calls.load(Ordering::Relaxed), 1);
    assert_eq!(trigger.calls.load(Ordering::Relaxed), 0);
}

#[test]
fn successful_upload_triggers_default_job_once() {
    let store = MockStore::new(false);
    let trigger = MockTrigger::new(false);
    let spec = DatasetKind::WaterLevel.spec();

    let outcome = publish::publish("a,b\n1,2\n", &store, &trigger, &cfg(), spec, fixed_now());

    let receipt = outcome.upload.unwrap();
    assert_eq!(receipt.bucket, "nahrim-raw");
    assert_eq!(
        receipt.key,
        "waterlevel/raw/waterlevel_jps_20260807103000.csv"
    );
    assert!(matches!(outcome.trigger, TriggerOutcome::Triggered(_)));
    assert_eq!(trigger.calls.load(Ordering::Relaxed), 1);
    assert_eq!(
        trigger.last_job.lock().unwrap().as_deref(),
        Some("waterlevel_functiongraph_trigger")
    );
}

#[test]
fn job_override_wins_over_dataset_default() {
    let store = MockStore::new(false);
    let trigger = MockTrigger::new(false);
    let spec = DatasetKind::DamLevel.spec();
    let mut cfg = cfg();
    cfg.job_override = Some("empangan_nightly".into());

    let _ = publish::publish("a\n1\n", &store, &trigger, &cfg, spec, fixed_now());

    assert_eq!(
        trigger.last_job.lock().unwrap().as_deref(),
        Some("empangan_nightly")
    );
}

#[test]
fn trigger_failure_still_reports_successful_upload() {
    let store = MockStore::new(false);
    let trigger = MockTrigger::new(true);
    let spec = DatasetKind::Rainfall.spec();

    let outcome = publish::publish("a\n1\n", &store, &trigger, &cfg(), spec, fixed_now());

    assert!(outcome.upload.is_ok());
    assert!(matches!(outcome.trigger, TriggerOutcome::Failed(_)));
    assert_eq!(trigger.calls.load(Ordering::Relaxed), 1);
}
