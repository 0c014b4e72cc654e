// src/publish/trigger.rs
use serde_json::{Value, json};

use crate::config::publish::PublishConfig;
use crate::error::PublishError;

/// What the migration scheduler answered when a job was started.
#[derive(Debug, Clone, PartialEq)]
pub struct JobSubmission(pub Value);

/// Narrow seam over the migration-job scheduler.
pub trait JobTrigger {
    fn start(&self, job_name: &str) -> Result<JobSubmission, PublishError>;
}

/// DataArts Migration (CDM) start-job call:
/// `PUT {endpoint}/v1.1/{project}/clusters/{cluster}/cdm/job/{name}/start`.
pub struct CdmTrigger {
    client: reqwest::blocking::Client,
    endpoint: String,
    project_id: String,
    cluster_id: String,
    token: String,
}

impl CdmTrigger {
    pub fn new(cfg: &PublishConfig) -> Result<Self, PublishError> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| PublishError::Net(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: cfg.cdm_endpoint.trim_end_matches('/').to_string(),
            project_id: cfg.project_id.clone(),
            cluster_id: cfg.cluster_id.clone(),
            token: cfg.token.clone(),
        })
    }
}

impl JobTrigger for CdmTrigger {
    fn start(&self, job_name: &str) -> Result<JobSubmission, PublishError> {
        let url = format!(
            "{}/v1.1/{}/clusters/{}/cdm/job/{}/start",
            self.endpoint, self.project_id, self.cluster_id, job_name
        );
        logf!("[CDM] starting job '{job_name}' via {url}");

        // No job variables yet; the scheduler wants the key present anyway.
        let body = json!({ "variables": {} });

        let resp = self
            .client
            .put(&url)
            .header("Content-Type", "application/json;charset=utf-8")
            .header("X-Auth-Token", &self.token)
            .body(body.to_string())
            .send()
            .map_err(|e| PublishError::Net(e.to_string()))?;

        let status = resp.status().as_u16();
        let text = resp.text().unwrap_or_default();
        logf!("[CDM] response status={status}");

        if status != 200 {
            return Err(PublishError::Trigger { status, body: text });
        }

        // Job submission info, or the raw body when it isn't JSON.
        let value =
            serde_json::from_str(&text).unwrap_or_else(|_| json!({ "raw_body": text }));
        Ok(JobSubmission(value))
    }
}
