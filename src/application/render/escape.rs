/// Replace the five reserved markup characters with their named entities.
///
/// Single left-to-right pass; every other character is copied as-is. The
/// function is deliberately not idempotent: a second pass re-encodes the `&`
/// of every entity produced by the first, so callers must escape exactly once.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}
