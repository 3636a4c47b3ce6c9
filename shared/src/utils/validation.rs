//! Input sanitizing and code-format validation

/// Escape the characters that carry meaning in HTML
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '/' => escaped.push_str("&#x2F;"),
            '\\' => escaped.push_str("&#x5C;"),
            '`' => escaped.push_str("&#96;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Trim surrounding whitespace, then HTML-escape
pub fn sanitize(value: &str) -> String {
    escape_html(value.trim())
}

/// True when `value` is made only of ASCII digits and its length is within `[min, max]`
pub fn is_numeric_with_length(value: &str, min: usize, max: usize) -> bool {
    let len = value.len();
    len >= min && len <= max && value.bytes().all(|b| b.is_ascii_digit())
}
