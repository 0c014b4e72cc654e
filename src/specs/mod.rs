// src/specs/mod.rs
//
// Declarative descriptions of every dataset we harvest: which endpoints
// serve it, in what order to try them, and how each endpoint's table (or
// JSON body) is shaped. The pipeline stages interpret these; nothing in
// here does I/O.

mod damlevel;
mod rainfall;
mod waterlevel;
mod waterquality;

use crate::error::StageError;
use crate::registry::State;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DatasetKind {
    WaterLevel,
    Rainfall,
    DamLevel,
    WaterQuality,
}

impl DatasetKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "waterlevel" | "water-level" => Some(Self::WaterLevel),
            "rainfall" => Some(Self::Rainfall),
            "damlevel" | "dam-level" | "empangan" => Some(Self::DamLevel),
            "waterquality" | "water-quality" => Some(Self::WaterQuality),
            _ => None,
        }
    }

    pub fn spec(self) -> &'static DatasetSpec {
        match self {
            Self::WaterLevel => &waterlevel::SPEC,
            Self::Rainfall => &rainfall::SPEC,
            Self::DamLevel => &damlevel::SPEC,
            Self::WaterQuality => &waterquality::SPEC,
        }
    }
}

/// Which of a state's identifiers an endpoint needs.
#[derive(Clone, Copy, Debug)]
pub enum StateCode {
    Name,
    JpsCode,
    SpanId,
    EqmsId,
}

/// How to build the request for one (state, source) pair.
pub enum Endpoint {
    /// Identifier interpolated into the URL path at `{}`.
    Path {
        template: &'static str,
        code: StateCode,
    },
    /// Identifier passed as a query parameter next to fixed ones.
    Query {
        base: &'static str,
        state_param: &'static str,
        code: StateCode,
        extra: &'static [(&'static str, &'static str)],
    },
}

impl Endpoint {
    /// Resolve the state's identifier for this endpoint, or report which
    /// kind of identifier was missing.
    fn state_code(&self, code: StateCode, state: &State) -> Result<String, StageError> {
        match code {
            StateCode::Name => Ok(s!(state.name)),
            StateCode::JpsCode => Ok(s!(state.code)),
            StateCode::SpanId => state
                .span_id
                .map(|id| id.to_string())
                .ok_or(StageError::NoSourceCode("SPAN")),
            StateCode::EqmsId => state
                .eqms_id
                .map(|id| id.to_string())
                .ok_or(StageError::NoSourceCode("MyEQMS")),
        }
    }

    /// Build `(url, query_params)` for a state.
    pub fn build(&self, state: &State) -> Result<(String, Vec<(String, String)>), StageError> {
        match self {
            Endpoint::Path { template, code } => {
                let id = self.state_code(*code, state)?;
                Ok((template.replacen("{}", &id, 1), Vec::new()))
            }
            Endpoint::Query {
                base,
                state_param,
                code,
                extra,
            } => {
                let id = self.state_code(*code, state)?;
                let mut params = vec![(s!(*state_param), id)];
                params.extend(extra.iter().map(|(k, v)| (s!(*k), s!(*v))));
                Ok((s!(*base), params))
            }
        }
    }
}

/// Header arrangement of an HTML source's table.
#[derive(Clone, Copy, Debug)]
pub enum HeaderLayout {
    /// First row is the header.
    Single,
    /// Two header rows: `prefix` leading labels and `suffix` trailing
    /// labels from the first, the variable-width date block from the
    /// second. The widths are fixed business columns, never inferred.
    Dual { prefix: usize, suffix: usize },
    /// One flat `<th>` run where a group label sits between the leading
    /// labels and the trailing pair, and the date block follows at the
    /// end: schema order is `[0..prefix]`, the date block, then the
    /// `tail` columns that precede it.
    TheadGrouped {
        prefix: usize,
        skip: usize,
        tail: usize,
    },
}

/// Parsing rules for one HTML source.
pub struct HtmlRules {
    /// A table qualifies when its flattened text contains all of these.
    pub hint_tokens: &'static [&'static str],
    pub layout: HeaderLayout,
    /// Drop body rows whose first cell is not a bare row number. The
    /// legacy pages repeat header/nav rows inside the body.
    pub numeric_first_cell: bool,
    /// Cells whose background color encodes a status label, and the
    /// derived column each feeds.
    pub status_cells: &'static [(usize, &'static str)],
}

/// What the endpoint answers with.
pub enum Payload {
    Html(HtmlRules),
    /// JSON object carrying an array of row objects under `field`.
    JsonRows { field: &'static str },
}

/// One upstream endpoint able to serve a dataset for a state.
pub struct SourceSpec {
    pub id: &'static str,
    pub endpoint: Endpoint,
    pub payload: Payload,
    pub timeout_secs: u64,
}

/// A dataset and its fallback chain, in priority order.
pub struct DatasetSpec {
    pub kind: DatasetKind,
    pub name: &'static str,
    /// Object key stem: `{folder}/{file_stem}_{timestamp}.csv`.
    pub file_stem: &'static str,
    /// Migration job started after a successful upload, unless overridden.
    pub default_job: &'static str,
    pub sources: &'static [SourceSpec],
    /// Header emitted when a run produced no records at all. Downstream
    /// jobs require a header line even on an empty day.
    pub minimal_columns: &'static [&'static str],
}
