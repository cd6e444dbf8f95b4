use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

fn entity_regex() -> &'static Regex {
    static ENTITY_REGEX: OnceLock<Regex> = OnceLock::new();
    ENTITY_REGEX.get_or_init(|| Regex::new(r"^&\p{Alphabetic}+;").expect("Invalid entity regex"))
}

/// Escape `&`, `<` and `>` unconditionally. Used for code, where nothing
/// in the source may be read as markup.
pub fn escape_minimal(text: &str) -> Cow<'_, str> {
    html_escape::encode_text(text)
}

/// Escape `<` and `>`, and every `&` that does not already start a named
/// entity such as `&copy;`.
///
/// Running it over its own output changes nothing.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.char_indices() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' if entity_regex().is_match(&text[i..]) => out.push('&'),
            '&' => out.push_str("&amp;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape a value for a double-quoted attribute.
pub fn escape_attribute(text: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(text)
}
