//! Single-pass HTML entity escaping for `<pre>` display blocks.
//!
//! Not idempotent: `&amp;` becomes `&amp;amp;`. Escape raw text exactly once.

/// Escape `& < > " '`.
pub fn escape_html(text: &str) -> String {
    escape_with(text, true)
}

/// Escape `& < >` only; quotes stay literal so copied source keeps them.
pub fn escape_html_markup(text: &str) -> String {
    escape_with(text, false)
}

fn escape_with(text: &str, quotes: bool) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if quotes => out.push_str("&quot;"),
            '\'' if quotes => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}
