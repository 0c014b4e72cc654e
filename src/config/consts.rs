// src/config/consts.rs

// Net
pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
pub const MAX_ATTEMPTS: u32 = 3;

// Concurrency
pub const WORKERS: usize = 4;
pub const REQUEST_PAUSE_MS: u64 = 200; // be polite, these are public servers
pub const JITTER_MS: u64 = 150; // extra 0..150 ms

// Publish environment
pub const ENV_OBS_ENDPOINT: &str = "OBS_ENDPOINT";
pub const ENV_OBS_BUCKET: &str = "OBS_BUCKET";
pub const ENV_OBS_FOLDER: &str = "OBS_FOLDER";
pub const ENV_CDM_ENDPOINT: &str = "CDM_ENDPOINT";
pub const ENV_CDM_CLUSTER_ID: &str = "CDM_CLUSTER_ID";
pub const ENV_CDM_JOB_NAME: &str = "CDM_JOB_NAME";
pub const ENV_PROJECT_ID: &str = "PROJECT_ID";
pub const ENV_IAM_TOKEN: &str = "IAM_TOKEN";

pub const DEFAULT_CDM_ENDPOINT: &str =
    "https://cdm.my-kualalumpur-1.alphaedge.tmone.com.my";
