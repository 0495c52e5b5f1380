//! Recover entry names from a previously rendered document.
//!
//! This reads the renderer's own output format back with a pattern match,
//! not a Lua parser.

use std::sync::OnceLock;

use regex::Regex;

use crate::escape::lua_unescape;

static NAME_FIELD: OnceLock<Option<Regex>> = OnceLock::new();

fn name_field() -> Option<&'static Regex> {
    NAME_FIELD
        .get_or_init(|| Regex::new(r#"name = "((?:[^"\\]|\\.)*)""#).ok())
        .as_ref()
}

/// Every `name = "..."` value in `document`, unescaped, in document order.
pub fn extract_names(document: &str) -> Vec<String> {
    let Some(re) = name_field() else {
        return Vec::new();
    };
    re.captures_iter(document)
        .filter_map(|caps| caps.get(1))
        .map(|m| lua_unescape(m.as_str()))
        .collect()
}
