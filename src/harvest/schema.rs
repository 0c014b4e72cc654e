// src/harvest/schema.rs
//
// Header reconciliation: merge one or two header rows into a single
// ordered column list, then sieve the body rows against it.

use crate::core::{html, sanitize};
use crate::error::StageError;
use crate::specs::{HeaderLayout, HtmlRules};

/// One body cell: flattened text plus the style string that may encode a
/// status color (taken from an inner <span> when present, the cell tag
/// otherwise).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub style: Option<String>,
}

/// A located table reduced to schema + raw body rows, not yet validated.
pub struct TableShape {
    pub schema: Vec<String>,
    pub data_rows: Vec<Vec<Cell>>,
}

fn build_cell(block: &str) -> Cell {
    let inner = html::inner_after_open_tag(block);
    let text = html::strip_tags(sanitize::normalize_entities(&inner));
    let style = html::element_blocks_ci(&inner, "span")
        .first()
        .and_then(|span| html::open_tag_attr(span, "style"))
        .or_else(|| html::open_tag_attr(block, "style"));
    Cell { text, style }
}

fn row_cells(row: &str) -> Vec<Cell> {
    html::cell_blocks(row).iter().map(|b| build_cell(b)).collect()
}

fn cell_texts(cells: &[Cell]) -> Vec<String> {
    cells.iter().map(|c| c.text.clone()).collect()
}

/// Merge the table's header row(s) into an ordered column list per the
/// source's declared layout, and split off the body rows.
pub fn reconcile(table: &str, rules: &HtmlRules) -> Result<TableShape, StageError> {
    let rows: Vec<&str> = html::row_blocks(table);

    match rules.layout {
        HeaderLayout::Single => {
            if rows.len() < 2 {
                return Err(StageError::MalformedTable(format!(
                    "expected a header row and at least one data row, found {} row(s)",
                    rows.len()
                )));
            }
            let schema = cell_texts(&row_cells(rows[0]));
            Ok(TableShape {
                schema,
                data_rows: body_rows(&rows[1..]),
            })
        }

        HeaderLayout::Dual { prefix, suffix } => {
            if rows.len() < 3 {
                return Err(StageError::MalformedTable(format!(
                    "expected 2 header rows and at least one data row, found {} row(s)",
                    rows.len()
                )));
            }
            let top = cell_texts(&row_cells(rows[0]));
            let bottom = cell_texts(&row_cells(rows[1]));
            if top.len() < prefix + suffix {
                return Err(StageError::MalformedTable(format!(
                    "first header row has {} cells, need at least {}",
                    top.len(),
                    prefix + suffix
                )));
            }
            // Fixed station columns frame a variable-width block of
            // per-day columns supplied wholesale by the second row.
            let mut schema = top[..prefix].to_vec();
            schema.extend(bottom);
            schema.extend(top[top.len() - suffix..].iter().cloned());
            Ok(TableShape {
                schema,
                data_rows: body_rows(&rows[2..]),
            })
        }

        HeaderLayout::TheadGrouped { prefix, skip, tail } => {
            let ths: Vec<String> = html::element_blocks_ci(table, "th")
                .iter()
                .map(|b| build_cell(b).text)
                .collect();
            if ths.len() < prefix + skip + tail {
                return Err(StageError::MalformedTable(format!(
                    "header has {} cells, need at least {}",
                    ths.len(),
                    prefix + skip + tail
                )));
            }
            // th order on the page: leading labels, one group label (not a
            // column), the trailing pair, then the date block. Schema order
            // puts the dates between the leads and the trailing pair.
            let mut schema = ths[..prefix].to_vec();
            schema.extend(ths[prefix + skip + tail..].iter().cloned());
            schema.extend(ths[prefix + skip..prefix + skip + tail].iter().cloned());

            // Body rows are the ones carrying no <th> at all.
            let data: Vec<&str> = rows
                .into_iter()
                .filter(|r| html::element_blocks_ci(r, "th").is_empty())
                .collect();
            if data.is_empty() {
                return Err(StageError::MalformedTable(s!(
                    "no data rows under the header"
                )));
            }
            Ok(TableShape {
                schema,
                data_rows: body_rows(&data),
            })
        }
    }
}

/// Extract cells row by row, silently skipping rows with no cells at all
/// (spacers and decorative rows, not data).
fn body_rows(rows: &[&str]) -> Vec<Vec<Cell>> {
    rows.iter()
        .map(|r| row_cells(r))
        .filter(|cells| !cells.is_empty())
        .collect()
}

/// Keep rows whose cell count matches the schema exactly; count the ones
/// dropped for a mismatch. Rows failing the numeric-first-cell rule are
/// repeated header/nav furniture and are skipped without counting.
pub fn validate_rows(shape: &TableShape, rules: &HtmlRules) -> (Vec<Vec<Cell>>, usize) {
    let width = shape.schema.len();
    let mut kept = Vec::with_capacity(shape.data_rows.len());
    let mut dropped = 0usize;

    for row in &shape.data_rows {
        if rules.numeric_first_cell {
            let first = row.first().map(|c| c.text.as_str()).unwrap_or("");
            if first.is_empty() || !first.chars().all(|c| c.is_ascii_digit()) {
                continue;
            }
        }
        if row.len() == width {
            kept.push(row.clone());
        } else {
            dropped += 1;
        }
    }

    (kept, dropped)
}
