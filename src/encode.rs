// src/encode.rs
//
// Dataset → CSV text. Column order is deterministic: the two metadata
// columns first, then every other column in first-seen order across the
// successful records. Never resorted, never dependent on which state
// finished first (results arrive already in request order).

use crate::csv;
use crate::harvest::{Dataset, HarvestResult};
use crate::harvest::record::{Record, STATE_CODE_COL, STATE_NAME_COL};
use crate::specs::DatasetSpec;

fn success_records(dataset: &Dataset) -> impl Iterator<Item = &Record> {
    dataset.results.iter().filter_map(|r| match r {
        HarvestResult::Success { records, .. } => Some(records.iter()),
        HarvestResult::Failure { .. } => None,
    })
    .flatten()
}

/// Union of field keys over all successful records, first-seen order,
/// metadata pinned to the front. With zero successful records, the
/// dataset's fixed minimal schema: downstream jobs require a header
/// line even when there is no data.
fn columns(dataset: &Dataset, spec: &DatasetSpec) -> Vec<String> {
    let mut cols: Vec<String> = vec![s!(STATE_CODE_COL), s!(STATE_NAME_COL)];
    let mut any = false;

    for record in success_records(dataset) {
        any = true;
        for (key, _) in record.fields() {
            if !cols.iter().any(|c| c == key) {
                cols.push(key.clone());
            }
        }
    }

    if !any {
        return spec.minimal_columns.iter().map(|c| s!(*c)).collect();
    }
    cols
}

/// Serialize the dataset. Header line always present.
pub fn encode(dataset: &Dataset, spec: &DatasetSpec) -> String {
    let cols = columns(dataset, spec);

    let rows: Vec<Vec<String>> = success_records(dataset)
        .map(|record| {
            cols.iter()
                .map(|c| record.get(c).map(|v| s!(v)).unwrap_or_default())
                .collect()
        })
        .collect();

    csv::rows_to_string(Some(&cols), &rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harvest::{Dataset, HarvestResult, myt};
    use crate::harvest::record::Record;
    use crate::registry;
    use crate::specs::DatasetKind;
    use chrono::Utc;

    fn dataset(results: Vec<HarvestResult>) -> Dataset {
        let total_record_count = results.iter().map(|r| r.record_count()).sum();
        Dataset {
            results,
            total_record_count,
            generated_at: Utc::now().with_timezone(&myt()),
        }
    }

    fn success(state: &str, source: &'static str, rows: &[&[(&str, &str)]]) -> HarvestResult {
        let state = registry::resolve(state).unwrap();
        let records = rows
            .iter()
            .map(|fields| {
                let mut rec = Record::tagged(state);
                for (k, v) in *fields {
                    rec.push(k, s!(*v));
                }
                rec
            })
            .collect();
        HarvestResult::Success {
            state,
            records,
            source_used: source,
            dropped_rows: 0,
        }
    }

    #[test]
    fn metadata_pinned_then_first_seen_order() {
        let ds = dataset(vec![
            success("JHR", "a", &[&[("Bil.", "1"), ("Nama", "X")]]),
            success("KDH", "a", &[&[("Bil.", "1"), ("Extra", "e"), ("Nama", "Y")]]),
        ]);
        let text = encode(&ds, DatasetKind::WaterLevel.spec());
        let parsed = csv::parse_rows(&text);
        assert_eq!(
            parsed[0],
            vec![
                s!("state_code"),
                s!("state_name"),
                s!("Bil."),
                s!("Nama"),
                s!("Extra")
            ]
        );
        // Kedah's record lacks nothing; Johor's lacks Extra → empty cell.
        assert_eq!(parsed[1], vec![s!("JHR"), s!("Johor"), s!("1"), s!("X"), s!("")]);
        assert_eq!(parsed[2][4], s!("e"));
    }

    #[test]
    fn zero_success_emits_minimal_header_only() {
        let perlis = registry::resolve("Perlis").unwrap();
        let ds = dataset(vec![HarvestResult::Failure {
            state: perlis,
            attempts: vec![],
        }]);
        let spec = DatasetKind::Rainfall.spec();
        let text = encode(&ds, spec);
        let parsed = csv::parse_rows(&text);
        assert_eq!(parsed.len(), 1, "header only, no data rows");
        let expect: Vec<String> = spec.minimal_columns.iter().map(|c| s!(*c)).collect();
        assert_eq!(parsed[0], expect);
    }

    #[test]
    fn awkward_values_round_trip() {
        let ds = dataset(vec![success(
            "JHR",
            "a",
            &[&[("Nama", "Sg. \"Besar\", hulu"), ("Catatan", "baris\nbaru")]],
        )]);
        let text = encode(&ds, DatasetKind::WaterLevel.spec());
        let parsed = csv::parse_rows(&text);
        assert_eq!(parsed[1][2], s!("Sg. \"Besar\", hulu"));
        assert_eq!(parsed[1][3], s!("baris\nbaru"));
    }
}
