// src/specs/waterlevel.rs
//
// River water levels from JPS publicinfobanjir. The retired per-state page
// still answers for some states, so it stays first in the chain; the
// current query endpoint backs it up.

use super::*;

pub static SPEC: DatasetSpec = DatasetSpec {
    kind: DatasetKind::WaterLevel,
    name: "waterlevel",
    file_stem: "waterlevel_jps",
    default_job: "waterlevel_functiongraph_trigger",
    sources: &[
        SourceSpec {
            id: "waterlevel-legacy",
            endpoint: Endpoint::Path {
                template: "https://publicinfobanjir.water.gov.my/waterleveldata/{}",
                code: StateCode::Name,
            },
            payload: Payload::Html(HtmlRules {
                hint_tokens: &["Bil.", "ID Stesen"],
                layout: HeaderLayout::Single,
                numeric_first_cell: true,
                status_cells: &[],
            }),
            timeout_secs: 30,
        },
        SourceSpec {
            id: "waterlevel-query",
            endpoint: Endpoint::Query {
                base: "https://publicinfobanjir.water.gov.my/aras-air/data-paras-air/aras-air-data/",
                state_param: "state",
                code: StateCode::JpsCode,
                extra: &[("district", "ALL"), ("station", "ALL"), ("lang", "en")],
            },
            payload: Payload::Html(HtmlRules {
                hint_tokens: &["No.", "Station ID"],
                layout: HeaderLayout::Single,
                numeric_first_cell: true,
                status_cells: &[],
            }),
            timeout_secs: 60,
        },
    ],
    minimal_columns: &[
        "state_code",
        "state_name",
        "No.",
        "Station ID",
        "Station Name",
        "District",
        "Main Basin",
        "Sub River Basin",
        "Last Updated",
        "Water Level (m) (Graph)",
        "Threshold Normal",
        "Threshold Alert",
        "Threshold Warning",
        "Threshold Danger",
    ],
};
