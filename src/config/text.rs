// src/config/text.rs

//! Line-level helpers for the pacman.conf format

/// Drop everything from the first `#` onward and trim what is left
pub fn strip_comment(line: &str) -> &str {
    let content = match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    };
    content.trim()
}

/// Return the inner name, untrimmed, if `line` is a `[section]` header
pub fn section_name(line: &str) -> Option<&str> {
    line.strip_prefix('[').and_then(|rest| rest.strip_suffix(']'))
}

/// Split a line on the first `=` into a trimmed key and value
///
/// A line without `=` is a bare key (e.g. `Color`) and gets an empty value.
pub fn split_key_value(line: &str) -> (&str, &str) {
    match line.split_once('=') {
        Some((key, value)) => (key.trim(), value.trim()),
        None => (line.trim(), ""),
    }
}

/// Split a value into owned, whitespace-separated words
pub fn split_words(value: &str) -> Vec<String> {
    value.split_whitespace().map(str::to_string).collect()
}
