//! Lua double-quoted string literal escaping.

/// Escape `raw` for embedding between double quotes in Lua source.
///
/// Backslash, double quote, newline, carriage return and tab become their
/// two-character escapes. NUL bytes are dropped.
pub fn lua_escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => {}
            other => out.push(other),
        }
    }
    out
}

/// Inverse of [`lua_escape`] for the escapes it produces.
///
/// Unknown escapes keep the escaped character; a trailing lone backslash is kept.
pub fn lua_unescape(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

pub(crate) fn lua_escape_filter(
    value: &tera::Value,
    _args: &std::collections::HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let raw = tera::try_get_value!("lua_escape", "value", String, value);
    Ok(tera::Value::String(lua_escape(&raw)))
}
