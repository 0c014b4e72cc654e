// src/config/publish.rs
use std::env;

use super::consts::*;
use crate::error::PublishError;
use crate::specs::DatasetSpec;

/// Everything the publish leg needs, read once from the environment.
/// Token acquisition happens outside this process (the scheduler injects
/// a short-lived IAM token); we only carry it.
#[derive(Clone, Debug)]
pub struct PublishConfig {
    pub obs_endpoint: String,
    pub bucket: String,
    pub folder: String,
    pub token: String,
    pub project_id: String,
    pub cluster_id: String,
    pub cdm_endpoint: String,
    pub job_override: Option<String>,
}

fn required(name: &'static str) -> Result<String, PublishError> {
    env::var(name).map_err(|_| PublishError::Config(format!("{name} must be set")))
}

impl PublishConfig {
    pub fn from_env() -> Result<Self, PublishError> {
        Ok(Self {
            obs_endpoint: required(ENV_OBS_ENDPOINT)?,
            bucket: required(ENV_OBS_BUCKET)?,
            folder: required(ENV_OBS_FOLDER)?,
            token: required(ENV_IAM_TOKEN)?,
            project_id: required(ENV_PROJECT_ID)?,
            cluster_id: required(ENV_CDM_CLUSTER_ID)?,
            cdm_endpoint: env::var(ENV_CDM_ENDPOINT)
                .unwrap_or_else(|_| s!(DEFAULT_CDM_ENDPOINT)),
            job_override: env::var(ENV_CDM_JOB_NAME).ok(),
        })
    }

    /// Job to start for a dataset: the env override when present, the
    /// dataset's default otherwise.
    pub fn job_name(&self, spec: &DatasetSpec) -> String {
        self.job_override
            .clone()
            .unwrap_or_else(|| s!(spec.default_job))
    }
}
