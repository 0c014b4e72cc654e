// src/specs/rainfall.rs
//
// Daily rainfall from JPS publicinfobanjir. The legacy page frames a
// variable-width block of per-day columns with fixed station columns,
// split across two header rows; the search endpoint serves the same data
// with one flat <th> run where the date block trails a group label.

use super::*;

pub static SPEC: DatasetSpec = DatasetSpec {
    kind: DatasetKind::Rainfall,
    name: "rainfall",
    file_stem: "rainfall_trend",
    default_job: "rainfall_functiongraph_trigger",
    sources: &[
        SourceSpec {
            id: "rainfall-legacy",
            endpoint: Endpoint::Path {
                template: "https://publicinfobanjir.water.gov.my/rainfalldata/{}",
                code: StateCode::Name,
            },
            payload: Payload::Html(HtmlRules {
                hint_tokens: &["Bil.", "ID Stesen"],
                // Bil., ID Stesen, Nama Stesen, Daerah, Kemaskini Terakhir
                // up front; Taburan Hujan dari Tengah Malam and Jumlah 1 Jam
                // at the tail; dates in between from the second header row.
                layout: HeaderLayout::Dual {
                    prefix: 5,
                    suffix: 2,
                },
                numeric_first_cell: false,
                status_cells: &[],
            }),
            timeout_secs: 5,
        },
        SourceSpec {
            id: "rainfall-query",
            endpoint: Endpoint::Query {
                base: "https://publicinfobanjir.water.gov.my/wp-content/themes/shapely/agency/searchresultrainfall.php",
                state_param: "state",
                code: StateCode::JpsCode,
                extra: &[
                    ("district", "ALL"),
                    ("station", "ALL"),
                    ("loginStatus", "0"),
                    ("language", "1"),
                ],
            },
            payload: Payload::Html(HtmlRules {
                hint_tokens: &["No.", "Station ID"],
                // th order: No., Station ID, Station, District, Last
                // Updated, the "Daily Rainfall" group label, Rainfall from
                // Midnight, Total 1 Hour, then the date columns.
                layout: HeaderLayout::TheadGrouped {
                    prefix: 5,
                    skip: 1,
                    tail: 2,
                },
                numeric_first_cell: false,
                status_cells: &[],
            }),
            timeout_secs: 60,
        },
    ],
    minimal_columns: &[
        "state_code",
        "state_name",
        "Bil.",
        "ID Stesen",
        "Nama Stesen",
        "Daerah",
        "Kemaskini Terakhir",
        "Taburan Hujan dari Tengah Malam",
        "Jumlah 1 Jam",
    ],
};
