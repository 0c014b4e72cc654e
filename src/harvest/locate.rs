// src/harvest/locate.rs
use crate::core::{html, sanitize};
use crate::error::StageError;

/// Pick the data table out of a document whose layout we don't control.
///
/// Scan tables in document order and take the first whose flattened text
/// carries every hint token. When nothing matches, fall back to the last
/// table: on these pages the header/nav tables come first and the content
/// table last. No tables at all is a typed failure.
pub fn locate_table<'a>(doc: &'a str, hint_tokens: &[&str]) -> Result<&'a str, StageError> {
    let tables = html::element_blocks_ci(doc, "table");
    if tables.is_empty() {
        return Err(StageError::TableNotFound);
    }

    for table in &tables {
        let text = html::strip_tags(sanitize::normalize_entities(table));
        if hint_tokens.iter().all(|tok| text.contains(tok)) {
            return Ok(table);
        }
    }

    Ok(tables[tables.len() - 1])
}

#[cfg(test)]
mod tests {
    use super::*;

    const HINTS: &[&str] = &["Bil.", "ID Stesen"];

    #[test]
    fn picks_first_table_matching_all_hints() {
        let doc = "<table><tr><td>nav</td></tr></table>\
                   <table id=x><tr><th>Bil.</th><th>ID Stesen</th></tr></table>\
                   <table><tr><td>footer</td></tr></table>";
        let table = locate_table(doc, HINTS).unwrap();
        assert!(table.contains("id=x"));
    }

    #[test]
    fn partial_hint_match_does_not_count() {
        let doc = "<table><tr><td>Bil. only</td></tr></table>\
                   <table id=last><tr><td>tail</td></tr></table>";
        let table = locate_table(doc, HINTS).unwrap();
        assert!(table.contains("id=last"), "falls back to the last table");
    }

    #[test]
    fn no_tables_is_not_found() {
        assert_eq!(
            locate_table("<div>nothing here</div>", HINTS).unwrap_err(),
            StageError::TableNotFound
        );
    }

    #[test]
    fn hints_survive_entities_and_markup() {
        let doc = "<table><tr><th><b>Bil.</b></th><th>ID&nbsp;Stesen</th></tr></table>";
        assert!(locate_table(doc, HINTS).is_ok());
    }
}
