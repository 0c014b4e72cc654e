// src/harvest/aggregate.rs
//
// Fan the per-state orchestrator out over a bounded worker pool and
// collect one HarvestResult per requested state. Workers share only the
// result channel; the collector owns everything it has received, so a
// cancelled run keeps its partial results.

use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
        mpsc,
    },
    thread,
    time::Duration,
};

use chrono::Utc;

use crate::config::consts::{JITTER_MS, REQUEST_PAUSE_MS};
use crate::net::Transport;
use crate::progress::Progress;
use crate::registry::State;
use crate::specs::DatasetSpec;

use super::{Dataset, HarvestResult, myt, orchestrate};

/// Harvest every requested state. One result per state, in request
/// order, no matter how individual states fared.
pub fn harvest_all(
    transport: Arc<dyn Transport>,
    spec: &'static DatasetSpec,
    states: Vec<&'static State>,
    workers: usize,
    mut progress: Option<&mut dyn Progress>,
) -> Dataset {
    let total = states.len();
    if let Some(p) = progress.as_deref_mut() {
        p.begin(total);
    }

    let workers = workers.min(total).max(1);
    let states_arc = Arc::new(states);
    let cursor = Arc::new(AtomicUsize::new(0));
    let (res_tx, res_rx) = mpsc::channel::<(usize, HarvestResult)>();

    for _ in 0..workers {
        let states = Arc::clone(&states_arc);
        let cursor = Arc::clone(&cursor);
        let tx = res_tx.clone();
        let transport = Arc::clone(&transport);

        thread::spawn(move || {
            loop {
                let i = cursor.fetch_add(1, Ordering::Relaxed);
                if i >= states.len() {
                    break;
                }
                let result = orchestrate::harvest_state(transport.as_ref(), spec, states[i]);
                if tx.send((i, result)).is_err() {
                    break; // collector gone, run cancelled
                }
                let jitter = (i as u64 * 37) % JITTER_MS.max(1);
                thread::sleep(Duration::from_millis(REQUEST_PAUSE_MS + jitter)); // be polite
            }
        });
    }
    drop(res_tx); // collector is sole receiver now

    let mut indexed: Vec<(usize, HarvestResult)> = Vec::with_capacity(total);
    for _ in 0..total {
        match res_rx.recv() {
            Ok((i, result)) => {
                if let Some(p) = progress.as_deref_mut() {
                    match &result {
                        HarvestResult::Success { state, records, .. } => {
                            p.item_done(state.name, records.len())
                        }
                        HarvestResult::Failure { state, .. } => p.item_failed(state.name),
                    }
                }
                indexed.push((i, result));
            }
            Err(_) => break, // workers ended early; keep what we have
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    // Deterministic output: request order, not completion order.
    indexed.sort_by_key(|(i, _)| *i);
    let results: Vec<HarvestResult> = indexed.into_iter().map(|(_, r)| r).collect();
    let total_record_count = results.iter().map(|r| r.record_count()).sum();

    Dataset {
        results,
        total_record_count,
        generated_at: Utc::now().with_timezone(&myt()),
    }
}
