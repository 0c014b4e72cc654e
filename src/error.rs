// src/error.rs
use thiserror::Error;

/// Failure of one stage of the fetch→locate→reconcile→normalize chain,
/// for one (state, source) attempt. Every variant is recorded against the
/// source that produced it; none of them aborts the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StageError {
    /// Connect/read/timeout failure, or a 5xx. Retried by the fetcher.
    #[error("network: {0}")]
    TransientNetwork(String),

    /// Definitive 4xx answer. Not retried.
    #[error("HTTP {status}")]
    PermanentHttp { status: u16 },

    /// Retry budget spent without a usable response.
    #[error("gave up after {attempts} attempts: {last}")]
    Exhausted { attempts: u32, last: String },

    /// The document contained no table at all.
    #[error("no data table found")]
    TableNotFound,

    /// Table present but its header/row structure is unusable.
    #[error("malformed table: {0}")]
    MalformedTable(String),

    /// Table (or JSON row array) present and well-formed, zero usable
    /// data rows. `dropped` counts rows discarded for column-count
    /// mismatch, so "legitimately empty" and "all rows dirty" stay
    /// distinguishable in the report.
    #[error("no usable data rows ({dropped} dropped)")]
    EmptyTable { dropped: usize },

    /// JSON body that did not decode, or decoded into the wrong shape.
    #[error("bad payload: {0}")]
    BadPayload(String),

    /// The state has no identifier for this source (e.g. Sabah has no
    /// SPAN dam page).
    #[error("state has no {0} identifier")]
    NoSourceCode(&'static str),
}

/// Failure of the upload or trigger leg of publishing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublishError {
    #[error("upload failed: status={status} {code}: {message}")]
    Upload {
        status: u16,
        code: String,
        message: String,
    },

    #[error("trigger failed: status={status}: {body}")]
    Trigger { status: u16, body: String },

    #[error("network: {0}")]
    Net(String),

    #[error("publish config: {0}")]
    Config(String),
}
