// src/harvest/fetch.rs
use std::time::Duration;

use crate::error::StageError;
use crate::net::Transport;

/// One bounded-retry fetch for a (state, source) pair.
///
/// Transient trouble (connect/timeout errors and 5xx answers) is retried
/// up to `max_attempts`, each attempt under the same timeout. A definitive
/// 4xx is surfaced immediately: the page is gone, retrying cannot help.
pub fn fetch_document(
    transport: &dyn Transport,
    url: &str,
    params: &[(String, String)],
    timeout: Duration,
    max_attempts: u32,
) -> Result<String, StageError> {
    let mut last = StageError::TransientNetwork(s!("no attempt made"));

    for attempt in 1..=max_attempts {
        match transport.get(url, params, timeout) {
            Ok(resp) if (200..300).contains(&resp.status) => return Ok(resp.body),
            Ok(resp) if (400..500).contains(&resp.status) => {
                return Err(StageError::PermanentHttp {
                    status: resp.status,
                });
            }
            Ok(resp) => {
                last = StageError::TransientNetwork(format!("HTTP {}", resp.status));
            }
            Err(e) => {
                last = StageError::TransientNetwork(e.to_string());
            }
        }
        if attempt < max_attempts {
            logw!("attempt {attempt} failed for {url}: {last}");
        }
    }

    Err(StageError::Exhausted {
        attempts: max_attempts,
        last: last.to_string(),
    })
}
