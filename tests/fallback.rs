// tests/fallback.rs
//
// Fallback-chain behavior against a scripted transport: priority order,
// first-success short-circuit, permanent-failure handling, and the
// aggregate invariants.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use water_harvest::error::StageError;
use water_harvest::harvest::{HarvestResult, aggregate, orchestrate};
use water_harvest::net::{HttpResponse, NetError, Transport};
use water_harvest::registry;
use water_harvest::specs::DatasetKind;

struct Route {
    needle: &'static str,
    status: u16,
    body: String,
}

struct ScriptedTransport {
    routes: Vec<Route>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    fn new(routes: Vec<Route>) -> Self {
        Self {
            routes,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn count(&self, needle: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.contains(needle))
            .count()
    }
}

impl Transport for ScriptedTransport {
    fn get(
        &self,
        url: &str,
        _params: &[(String, String)],
        _timeout: Duration,
    ) -> Result<HttpResponse, NetError> {
        self.calls.lock().unwrap().push(url.to_string());
        for route in &self.routes {
            if url.contains(route.needle) {
                return Ok(HttpResponse {
                    status: route.status,
                    body: route.body.clone(),
                });
            }
        }
        Ok(HttpResponse {
            status: 404,
            body: String::new(),
        })
    }
}

/// A minimal water-level page: one table, three columns.
fn water_page(rows: &[[&str; 3]]) -> String {
    let body: String = rows
        .iter()
        .map(|r| format!("<tr><td>{}</td><td>{}</td><td>{}</td></tr>", r[0], r[1], r[2]))
        .collect();
    format!(
        "<html><body><table>\
         <tr><th>Bil</th><th>ID Stesen</th><th>Nama Stesen</th></tr>{body}\
         </table></body></html>"
    )
}

/// A page whose table carries a header but no usable data row (the one
/// body row is short).
fn empty_page() -> String {
    "<html><table>\
     <tr><th>Bil</th><th>ID Stesen</th><th>Nama Stesen</th></tr>\
     <tr><td>1</td><td>only-two</td></tr>\
     </table></html>"
        .to_string()
}

#[test]
fn johor_row_normalizes_with_state_metadata() {
    let spec = DatasetKind::WaterLevel.spec();
    let johor = registry::resolve("Johor").unwrap();
    let t = ScriptedTransport::new(vec![Route {
        needle: "waterleveldata/Johor",
        status: 200,
        body: water_page(&[["1", "J01", "Sungai X"]]),
    }]);

    match orchestrate::harvest_state(&t, spec, johor) {
        HarvestResult::Success {
            records,
            source_used,
            ..
        } => {
            assert_eq!(records.len(), 1);
            assert_eq!(source_used, "waterlevel-legacy");
            let rec = &records[0];
            assert_eq!(rec.get("state_code"), Some("JHR"));
            assert_eq!(rec.get("state_name"), Some("Johor"));
            assert_eq!(rec.get("Bil"), Some("1"));
            assert_eq!(rec.get("ID Stesen"), Some("J01"));
            assert_eq!(rec.get("Nama Stesen"), Some("Sungai X"));
        }
        HarvestResult::Failure { attempts, .. } => {
            panic!("expected success, got failures: {attempts:?}")
        }
    }

    // First source won: the query endpoint was never touched.
    assert_eq!(t.count("aras-air"), 0);
}

#[test]
fn kedah_falls_back_after_permanent_404() {
    let spec = DatasetKind::WaterLevel.spec();
    let kedah = registry::resolve("Kedah").unwrap();
    let t = ScriptedTransport::new(vec![
        Route {
            needle: "waterleveldata/Kedah",
            status: 404,
            body: String::new(),
        },
        Route {
            needle: "aras-air",
            status: 200,
            body: water_page(&[["1", "K01", "Sungai Muda"], ["2", "K02", "Sungai Kedah"]]),
        },
    ]);

    match orchestrate::harvest_state(&t, spec, kedah) {
        HarvestResult::Success {
            records,
            source_used,
            ..
        } => {
            assert_eq!(records.len(), 2);
            assert_eq!(source_used, "waterlevel-query");
        }
        HarvestResult::Failure { attempts, .. } => {
            panic!("expected success, got failures: {attempts:?}")
        }
    }

    // 404 is definitive: exactly one hit on the legacy page, no retries.
    assert_eq!(t.count("waterleveldata"), 1);
    assert_eq!(t.count("aras-air"), 1);
}

#[test]
fn perlis_empty_everywhere_fails_with_reason_per_source() {
    let spec = DatasetKind::WaterLevel.spec();
    let perlis = registry::resolve("Perlis").unwrap();
    let t = ScriptedTransport::new(vec![
        Route {
            needle: "waterleveldata/Perlis",
            status: 200,
            body: empty_page(),
        },
        Route {
            needle: "aras-air",
            status: 200,
            body: empty_page(),
        },
    ]);

    match orchestrate::harvest_state(&t, spec, perlis) {
        HarvestResult::Failure { attempts, .. } => {
            assert_eq!(attempts.len(), 2);
            assert_eq!(attempts[0].0, "waterlevel-legacy");
            assert_eq!(attempts[1].0, "waterlevel-query");
            for (_, err) in &attempts {
                assert!(
                    matches!(err, StageError::EmptyTable { dropped: 1 }),
                    "want EmptyTable with the short row counted, got {err}"
                );
            }
        }
        HarvestResult::Success { .. } => panic!("expected failure"),
    }
}

#[test]
fn dataset_keeps_failure_entries_and_counts_totals() {
    let spec = DatasetKind::WaterLevel.spec();
    let states = vec![
        registry::resolve("Johor").unwrap(),
        registry::resolve("Kedah").unwrap(),
        registry::resolve("Perlis").unwrap(),
    ];
    let t = Arc::new(ScriptedTransport::new(vec![
        Route {
            needle: "waterleveldata/Johor",
            status: 200,
            body: water_page(&[["1", "J01", "Sungai X"]]),
        },
        Route {
            needle: "waterleveldata/Kedah",
            status: 200,
            body: water_page(&[["1", "K01", "Sungai Muda"], ["2", "K02", "Sungai Kedah"]]),
        },
        // Perlis: both sources 404 (default route).
    ]));

    let dataset = aggregate::harvest_all(
        t.clone() as Arc<dyn Transport>,
        spec,
        states.clone(),
        2,
        None,
    );

    assert_eq!(dataset.results.len(), 3, "one entry per requested state");
    assert_eq!(dataset.total_record_count, 3);

    // Request order, not completion order.
    let order: Vec<&str> = dataset.results.iter().map(|r| r.state().code).collect();
    assert_eq!(order, vec!["JHR", "KDH", "PLS"]);

    match &dataset.results[2] {
        HarvestResult::Failure { attempts, .. } => {
            assert_eq!(attempts.len(), 2);
            assert!(matches!(
                attempts[0].1,
                StageError::PermanentHttp { status: 404 }
            ));
        }
        HarvestResult::Success { .. } => panic!("Perlis should have failed"),
    }

    // Same states, reversed request order: same total.
    let t2 = Arc::new(ScriptedTransport::new(vec![
        Route {
            needle: "waterleveldata/Johor",
            status: 200,
            body: water_page(&[["1", "J01", "Sungai X"]]),
        },
        Route {
            needle: "waterleveldata/Kedah",
            status: 200,
            body: water_page(&[["1", "K01", "Sungai Muda"], ["2", "K02", "Sungai Kedah"]]),
        },
    ]));
    let reversed: Vec<_> = states.into_iter().rev().collect();
    let dataset2 =
        aggregate::harvest_all(t2 as Arc<dyn Transport>, spec, reversed, 2, None);
    assert_eq!(dataset2.total_record_count, dataset.total_record_count);
}
