//! Document comparison and dry-run unified diff support for `patrons diff`.
//!
//! Comment lines (leading `--`) are ignored when deciding whether the roster
//! changed, so header wording can change without forcing a rewrite.

use similar::TextDiff;

use patrons_renderer::COMMENT_MARKER;

/// Lines of `document` that are not comments, after CRLF normalisation.
pub fn significant_lines(document: &str) -> Vec<String> {
    normalize_line_endings(document)
        .split('\n')
        .filter(|line| !line.starts_with(COMMENT_MARKER))
        .map(str::to_string)
        .collect()
}

/// `true` when both documents agree on every non-comment line.
pub fn documents_match(existing: &str, rendered: &str) -> bool {
    significant_lines(existing) == significant_lines(rendered)
}

/// Unified diff of `existing` → `rendered`, or `None` when they match.
///
/// `label` names the file in the `---`/`+++` headers.
pub fn unified_diff(existing: &str, rendered: &str, label: &str) -> Option<String> {
    let existing = normalize_line_endings(existing);
    let rendered = normalize_line_endings(rendered);
    if existing == rendered {
        return None;
    }
    let old_header = format!("a/{label}");
    let new_header = format!("b/{label}");
    Some(
        TextDiff::from_lines(&existing, &rendered)
            .unified_diff()
            .header(&old_header, &new_header)
            .context_radius(3)
            .to_string(),
    )
}

pub(crate) fn normalize_line_endings(content: &str) -> String {
    content.replace("\r\n", "\n")
}
