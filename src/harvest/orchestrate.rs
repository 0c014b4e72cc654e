// src/harvest/orchestrate.rs
//
// Per-state fallback driver. Sources are tried strictly in configured
// order; the first one producing at least one record wins and later
// sources are never touched. Partial rows are never merged across
// sources.

use std::time::Duration;

use crate::config::consts::MAX_ATTEMPTS;
use crate::error::StageError;
use crate::net::Transport;
use crate::registry::State;
use crate::specs::{DatasetSpec, Payload, SourceSpec};

use super::fetch::fetch_document;
use super::locate::locate_table;
use super::record::{self, Record};
use super::schema;
use super::HarvestResult;

/// Where the fallback chain stands for one state.
enum ChainState {
    Pending,
    Trying(usize),
    Succeeded,
    Failed,
}

/// Drive the fallback chain for one state to completion.
pub fn harvest_state(
    transport: &dyn Transport,
    spec: &DatasetSpec,
    state: &'static State,
) -> HarvestResult {
    let mut attempts: Vec<(&'static str, StageError)> = Vec::new();
    let mut chain = ChainState::Pending;
    let mut won: Option<(Vec<Record>, &'static str, usize)> = None;

    loop {
        chain = match chain {
            ChainState::Pending => ChainState::Trying(0),

            ChainState::Trying(i) => match spec.sources.get(i) {
                None => ChainState::Failed,
                Some(source) => match try_source(transport, source, state) {
                    Ok((records, dropped)) => {
                        logf!(
                            "{}: {} rows via {}{}",
                            state.name,
                            records.len(),
                            source.id,
                            if dropped > 0 {
                                format!(" ({dropped} dropped)")
                            } else {
                                s!()
                            }
                        );
                        won = Some((records, source.id, dropped));
                        ChainState::Succeeded
                    }
                    Err(e) => {
                        logw!("{}: {} failed: {e}", state.name, source.id);
                        attempts.push((source.id, e));
                        ChainState::Trying(i + 1)
                    }
                },
            },

            ChainState::Succeeded => {
                let (records, source_used, dropped_rows) =
                    won.take().unwrap_or((Vec::new(), "", 0));
                return HarvestResult::Success {
                    state,
                    records,
                    source_used,
                    dropped_rows,
                };
            }

            ChainState::Failed => {
                loge!(
                    "{}: every source failed: {}",
                    state.name,
                    attempts
                        .iter()
                        .map(|(id, e)| format!("{id}: {e}"))
                        .collect::<Vec<_>>()
                        .join("; ")
                );
                return HarvestResult::Failure { state, attempts };
            }
        };
    }
}

/// Run one source's fetch → locate → reconcile → normalize chain.
/// Any stage failure, or a structurally valid but empty extraction,
/// fails the source as a whole.
fn try_source(
    transport: &dyn Transport,
    source: &SourceSpec,
    state: &'static State,
) -> Result<(Vec<Record>, usize), StageError> {
    let (url, params) = source.endpoint.build(state)?;
    let body = fetch_document(
        transport,
        &url,
        &params,
        Duration::from_secs(source.timeout_secs),
        MAX_ATTEMPTS,
    )?;

    match &source.payload {
        Payload::JsonRows { field } => {
            let records = record::records_from_json(&body, field, state)?;
            Ok((records, 0))
        }
        Payload::Html(rules) => {
            let table = locate_table(&body, rules.hint_tokens)?;
            let shape = schema::reconcile(table, rules)?;
            let (rows, dropped) = schema::validate_rows(&shape, rules);
            if rows.is_empty() {
                return Err(StageError::EmptyTable { dropped });
            }
            let records = rows
                .iter()
                .map(|cells| record::normalize(cells, &shape.schema, state, rules))
                .collect();
            Ok((records, dropped))
        }
    }
}
