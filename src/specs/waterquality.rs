// src/specs/waterquality.rs
//
// Continuous river water quality index (CRWQI) from the DOE MyEQMS public
// API. JSON rather than HTML; row objects arrive under "crwqi" and their
// keys become the columns.

use super::*;

pub static SPEC: DatasetSpec = DatasetSpec {
    kind: DatasetKind::WaterQuality,
    name: "waterquality",
    file_stem: "waterquality_myeqms",
    default_job: "waterquality_functiongraph_trigger",
    sources: &[SourceSpec {
        id: "waterquality-myeqms",
        endpoint: Endpoint::Query {
            base: "https://eqms.doe.gov.my/api3/publicportalrqims/crwqi",
            state_param: "stateid",
            code: StateCode::EqmsId,
            extra: &[],
        },
        payload: Payload::JsonRows { field: "crwqi" },
        timeout_secs: 30,
    }],
    minimal_columns: &["state_code", "state_name"],
};
