// src/core/html.rs
//
// Tag-scanning helpers over raw HTML text. Deliberately not a DOM: the
// upstream pages are static server-rendered tables, and positional scanning
// is enough to pull them apart.

/// ASCII-only lowercasing. Leaves byte offsets intact so that positions
/// found in the lowered copy index the original string.
pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// Position of the next `<tag` opening, requiring a non-alphanumeric
/// follower so `<th` does not match `<thead`.
fn find_tag_open(lc: &str, tag: &str, from: usize) -> Option<usize> {
    let pat = format!("<{tag}");
    let mut pos = from;
    while let Some(i) = lc.get(pos..)?.find(&pat) {
        let at = pos + i;
        match lc.as_bytes().get(at + pat.len()) {
            Some(b) if (*b as char).is_ascii_alphanumeric() => pos = at + pat.len(),
            _ => return Some(at),
        }
    }
    None
}

/// `<tag …>…</tag>` block starting at or after `from`, located in the
/// lowered copy. Returns the byte range of the whole block including both
/// tags; offsets are valid in the original string.
fn next_element(lc: &str, tag: &str, from: usize) -> Option<(usize, usize)> {
    let close = format!("</{tag}>");
    let start = find_tag_open(lc, tag, from)?;
    let open_end = lc[start..].find('>')? + start + 1;
    let end_rel = lc[open_end..].find(&close)?;
    Some((start, open_end + end_rel + close.len()))
}

/// All `<tag>` blocks of a document, in document order. Nested occurrences
/// are reported too (each opening pairs with its nearest close).
pub fn element_blocks_ci<'a>(s: &'a str, tag: &str) -> Vec<&'a str> {
    let lc = to_lower(s);
    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some((b_start, b_end)) = next_element(&lc, tag, pos) {
        out.push(&s[b_start..b_end]);
        pos = b_start + 1 + tag.len();
    }
    out
}

/// `<tr>` blocks of a table block.
pub fn row_blocks(table: &str) -> Vec<&str> {
    element_blocks_ci(table, "tr")
}

/// `<th>`/`<td>` blocks of a row, interleaved in document order.
pub fn cell_blocks(row: &str) -> Vec<&str> {
    let lc = to_lower(row);
    let mut out = Vec::new();
    let mut pos = 0usize;
    loop {
        let td = next_element(&lc, "td", pos);
        let th = next_element(&lc, "th", pos);
        let block = match (td, th) {
            (Some(a), Some(b)) => {
                if a.0 <= b.0 {
                    a
                } else {
                    b
                }
            }
            (Some(a), None) => a,
            (None, Some(b)) => b,
            (None, None) => break,
        };
        out.push(&row[block.0..block.1]);
        pos = block.1;
    }
    out
}

/// Content between a block's opening tag and its closing tag.
pub fn inner_after_open_tag(block: &str) -> String {
    if let Some(oe) = block.find('>') {
        if let Some(cs) = block.rfind('<') {
            if cs > oe {
                return block[oe + 1..cs].to_string();
            }
        }
    }
    s!()
}

/// Value of an attribute on a block's opening tag. Handles single, double
/// and no quoting.
pub fn open_tag_attr(block: &str, name: &str) -> Option<String> {
    let open_end = block.find('>')?;
    let open = &block[..open_end];
    let lc = to_lower(open);
    let pat = format!("{name}=");
    let i = lc.find(&pat)?;
    let rest = &open[i + pat.len()..];
    match rest.chars().next()? {
        '"' => rest[1..].find('"').map(|j| rest[1..1 + j].to_string()),
        '\'' => rest[1..].find('\'').map(|j| rest[1..1 + j].to_string()),
        _ => Some(rest.split_whitespace().next().unwrap_or("").to_string()),
    }
}

/// Drop all tags, then collapse whitespace.
pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    super::sanitize::normalize_ws(&out)
}
