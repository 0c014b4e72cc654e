// src/specs/damlevel.rs
//
// Dam/reservoir storage from the SPAN war room. Single source; the page
// color-codes yesterday's and today's storage level in cells 6 and 7,
// which become two derived category columns.

use super::*;

pub static SPEC: DatasetSpec = DatasetSpec {
    kind: DatasetKind::DamLevel,
    name: "damlevel",
    file_stem: "empangan",
    default_job: "demlevel_functiongraph_trigger",
    sources: &[SourceSpec {
        id: "damlevel-span",
        endpoint: Endpoint::Path {
            template: "https://warroom.span.gov.my/warroom/main/empangan/{}",
            code: StateCode::SpanId,
        },
        payload: Payload::Html(HtmlRules {
            hint_tokens: &["Empangan"],
            layout: HeaderLayout::Single,
            numeric_first_cell: false,
            status_cells: &[
                (6, "Kategori Simpanan Semalam"),
                (7, "Kategori Simpanan Semasa"),
            ],
        }),
        timeout_secs: 60,
    }],
    minimal_columns: &[
        "state_code",
        "state_name",
        "Kategori Simpanan Semalam",
        "Kategori Simpanan Semasa",
    ],
};
