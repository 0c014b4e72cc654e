// src/publish/store.rs
use crate::config::publish::PublishConfig;
use crate::error::PublishError;

/// Narrow seam over the object store. Production PUTs over HTTP; tests
/// substitute a recording impl.
pub trait ObjectStore {
    fn put(
        &self,
        bucket: &str,
        key: &str,
        content: &str,
        content_type: &str,
    ) -> Result<(), PublishError>;
}

/// OBS-compatible HTTP store: `PUT {endpoint}/{bucket}/{key}`,
/// authenticated with the run's IAM token.
pub struct HttpObjectStore {
    client: reqwest::blocking::Client,
    endpoint: String,
    token: String,
}

impl HttpObjectStore {
    pub fn new(cfg: &PublishConfig) -> Result<Self, PublishError> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| PublishError::Net(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: cfg.obs_endpoint.trim_end_matches('/').to_string(),
            token: cfg.token.clone(),
        })
    }
}

impl ObjectStore for HttpObjectStore {
    fn put(
        &self,
        bucket: &str,
        key: &str,
        content: &str,
        content_type: &str,
    ) -> Result<(), PublishError> {
        let url = format!("{}/{}/{}", self.endpoint, bucket, key);
        let resp = self
            .client
            .put(&url)
            .header("X-Auth-Token", &self.token)
            .header("Content-Type", content_type)
            .body(content.to_string())
            .send()
            .map_err(|e| PublishError::Net(e.to_string()))?;

        let status = resp.status().as_u16();
        if status >= 300 {
            let code = resp
                .headers()
                .get("x-obs-error-code")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_string();
            let body = resp.text().unwrap_or_default();
            let message: String = body.chars().take(200).collect();
            return Err(PublishError::Upload {
                status,
                code,
                message,
            });
        }
        Ok(())
    }
}
