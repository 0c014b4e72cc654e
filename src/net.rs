// src/net.rs
use std::time::Duration;

use thiserror::Error;

use crate::config::consts::USER_AGENT;

/// Transport-level failure: connect, TLS, timeout, read. Status handling
/// is not this layer's business; a response with any status is `Ok`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct NetError(pub String);

pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// The one seam the harvest pipeline talks to the network through.
/// Production uses [`HttpClient`]; tests script this trait.
pub trait Transport: Send + Sync {
    fn get(
        &self,
        url: &str,
        params: &[(String, String)],
        timeout: Duration,
    ) -> Result<HttpResponse, NetError>;
}

/// reqwest-backed client. The upstream sites sit behind HTTPS and some of
/// them sniff for browser user agents, hence the canned UA string.
pub struct HttpClient {
    client: reqwest::blocking::Client,
}

impl HttpClient {
    pub fn new() -> Result<Self, NetError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| NetError(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Transport for HttpClient {
    fn get(
        &self,
        url: &str,
        params: &[(String, String)],
        timeout: Duration,
    ) -> Result<HttpResponse, NetError> {
        let mut req = self.client.get(url).timeout(timeout);
        if !params.is_empty() {
            req = req.query(params);
        }
        let resp = req.send().map_err(|e| NetError(e.to_string()))?;
        let status = resp.status().as_u16();
        let body = resp.text().map_err(|e| NetError(e.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}
