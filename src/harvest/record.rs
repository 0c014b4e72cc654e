// src/harvest/record.rs
//
// Row → record normalization: zip cells against the schema, inject state
// metadata up front, derive status labels from color-coded cells.

use serde_json::Value;

use crate::error::StageError;
use crate::registry::State;
use crate::specs::HtmlRules;

use super::schema::Cell;

/// Metadata columns carried by every record, pinned to the front.
pub const STATE_CODE_COL: &str = "state_code";
pub const STATE_NAME_COL: &str = "state_name";

/// Storage-level color keys as SPAN paints them, in the order the war
/// room legend lists them.
const COLOR_LABELS: &[(&str, &str)] = &[
    ("green", "Paras Normal"),
    ("orange", "Paras Waspada"),
    ("yellow", "Paras Amaran"),
    ("red", "Paras Kritikal"),
];

/// One normalized row: an ordered column → value mapping. Field order is
/// meaningful; the CSV column order derives from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    /// Start a record tagged with the state it was harvested for.
    pub fn tagged(state: &State) -> Self {
        Self {
            fields: vec![
                (s!(STATE_CODE_COL), s!(state.code)),
                (s!(STATE_NAME_COL), s!(state.name)),
            ],
        }
    }

    pub fn push(&mut self, column: &str, value: String) {
        self.fields.push((s!(column), value));
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_str())
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }
}

/// Map one validated row of cells to a record.
pub fn normalize(cells: &[Cell], schema: &[String], state: &'static State, rules: &HtmlRules) -> Record {
    let mut rec = Record::tagged(state);
    for (column, cell) in schema.iter().zip(cells) {
        rec.push(column, cell.text.clone());
    }
    for (idx, column) in rules.status_cells {
        let label = cells.get(*idx).and_then(storage_category).unwrap_or("");
        rec.push(column, s!(label));
    }
    rec
}

/// Status label for a color-coded cell. Unknown or absent colors yield
/// nothing, never an error.
fn storage_category(cell: &Cell) -> Option<&'static str> {
    let style = cell.style.as_deref()?.to_ascii_lowercase();
    COLOR_LABELS
        .iter()
        .find(|(color, _)| {
            style.contains(&format!("background:{color}"))
                || style.contains(&format!("background-color:{color}"))
        })
        .map(|(_, label)| *label)
}

/// Records from a JSON row array (the water-quality API). Each row
/// object's keys become columns in payload order, after the metadata.
pub fn records_from_json(
    body: &str,
    field: &str,
    state: &'static State,
) -> Result<Vec<Record>, StageError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| StageError::BadPayload(e.to_string()))?;

    if let Some(err) = value.get("error") {
        return Err(StageError::BadPayload(format!("API error: {err}")));
    }

    let rows = value
        .get(field)
        .and_then(Value::as_array)
        .ok_or_else(|| StageError::BadPayload(format!("missing '{field}' array")))?;

    if rows.is_empty() {
        return Err(StageError::EmptyTable { dropped: 0 });
    }

    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        let obj = row
            .as_object()
            .ok_or_else(|| StageError::BadPayload(s!("row is not an object")))?;
        let mut rec = Record::tagged(state);
        for (key, val) in obj {
            rec.push(key, json_scalar(val));
        }
        records.push(rec);
    }
    Ok(records)
}

fn json_scalar(v: &Value) -> String {
    match v {
        Value::Null => s!(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
