//! Block-scoped stylesheet fragments built from a block's custom CSS.
//!
//! The author's CSS is nested inside a rule keyed by the block id, so its
//! selectors only match inside that block's container. Braces outside strings
//! and comments are balanced so the fragment cannot close the scoping rule.
//! Comments are stripped and `<` is neutralised so it cannot end the
//! surrounding `<style>` element. Statements that can load scripts or remote
//! stylesheets are dropped.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use tracing::debug;

pub const BLOCK_ID_ATTRIBUTE: &str = "data-block-id";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedStyle {
    rule: String,
}

impl ScopedStyle {
    /// Build the scoped rule for `block_id`, or `None` when nothing usable remains.
    pub fn for_block(block_id: &str, custom_css: Option<&str>) -> Option<Self> {
        let css = custom_css?.trim();
        if css.is_empty() {
            return None;
        }

        let body = sanitize_stylesheet(css);
        if body.trim().is_empty() {
            debug!(
                target = "application::render::style",
                block_id, "custom CSS dropped entirely by sanitiser"
            );
            return None;
        }

        let rule = format!("{} {{ {} }}", selector_for(block_id), body.trim());
        Some(Self { rule })
    }

    pub fn rule(&self) -> &str {
        &self.rule
    }
}

impl fmt::Display for ScopedStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rule)
    }
}

/// Attribute selector matching the wrapper of `block_id`.
pub fn selector_for(block_id: &str) -> String {
    let mut escaped = String::with_capacity(block_id.len());
    for ch in block_id.chars() {
        match ch {
            '"' | '\\' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            '<' => escaped.push_str("\\3c "),
            '\n' | '\r' | '\u{c}' => escaped.push(' '),
            _ => escaped.push(ch),
        }
    }
    format!("[{BLOCK_ID_ATTRIBUTE}=\"{escaped}\"]")
}

/// Statement text collected between structural delimiters.
#[derive(Default)]
struct Segment {
    text: String,
    malformed: bool,
}

impl Segment {
    /// Append the segment to `out` when it is safe; reports whether it was kept.
    fn flush_into(&mut self, out: &mut String) -> bool {
        let Segment { text, malformed } = std::mem::take(self);
        let keep = !malformed && is_safe_statement(&text);
        if keep {
            push_neutralised(out, &text);
        }
        keep
    }
}

/// Walks the stylesheet the way a CSS tokenizer does, so delimiters inside
/// strings, comments and escapes never count as structure.
fn sanitize_stylesheet(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let mut segment = Segment::default();
    let mut depth: usize = 0;
    let mut chars = css.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                skip_comment(&mut chars);
                segment.text.push(' ');
            }
            '"' | '\'' => consume_string(ch, &mut chars, &mut segment),
            '\\' => {
                // an escaped delimiter is part of an identifier
                if let Some(escaped) = chars.next() {
                    segment.text.push('\\');
                    segment.text.push(escaped);
                }
            }
            ';' => {
                if segment.flush_into(&mut out) {
                    out.push(';');
                }
            }
            '{' => {
                segment.flush_into(&mut out);
                out.push('{');
                depth += 1;
            }
            '}' => {
                segment.flush_into(&mut out);
                // A stray closing brace would end the scoping rule. The space
                // keeps its neighbours from fusing into `/*`.
                if depth > 0 {
                    out.push('}');
                    depth -= 1;
                } else {
                    out.push(' ');
                }
            }
            _ => segment.text.push(ch),
        }
    }

    segment.flush_into(&mut out);
    for _ in 0..depth {
        out.push_str(" }");
    }
    out
}

fn skip_comment(chars: &mut Peekable<Chars<'_>>) {
    while let Some(ch) = chars.next() {
        if ch == '*' && chars.peek() == Some(&'/') {
            chars.next();
            return;
        }
    }
}

fn consume_string(quote: char, chars: &mut Peekable<Chars<'_>>, segment: &mut Segment) {
    segment.text.push(quote);
    while let Some(ch) = chars.next() {
        match ch {
            c if c == quote => {
                segment.text.push(c);
                return;
            }
            '\\' => {
                if let Some(escaped) = chars.next() {
                    segment.text.push('\\');
                    segment.text.push(escaped);
                }
            }
            '\n' | '\r' | '\u{c}' => {
                // A raw newline ends the string as a bad string; the
                // declaration carrying it is invalid anyway.
                segment.text.push(ch);
                segment.malformed = true;
                return;
            }
            _ => segment.text.push(ch),
        }
    }
    // Close a string left open at the end so the scope's braces stay structural.
    segment.text.push(quote);
}

fn push_neutralised(out: &mut String, segment: &str) {
    for ch in segment.chars() {
        if ch == '<' {
            out.push_str("\\3c ");
        } else {
            out.push(ch);
        }
    }
}

fn is_safe_statement(statement: &str) -> bool {
    let lower = statement.to_ascii_lowercase();

    const FORBIDDEN_SUBSTRINGS: [&str; 7] = [
        "expression(",
        "javascript:",
        "vbscript:",
        "-moz-binding",
        "behavior:",
        "behaviour:",
        "@import",
    ];

    if FORBIDDEN_SUBSTRINGS
        .iter()
        .any(|needle| lower.contains(needle))
    {
        return false;
    }

    !contains_unsafe_url(&lower)
}

fn contains_unsafe_url(lower: &str) -> bool {
    let mut offset = 0;

    while let Some(start) = lower[offset..].find("url(") {
        let open = offset + start + 4;
        let rest = &lower[open..];
        let Some(close_rel) = rest.find(')') else {
            // unterminated url(, treat as unsafe
            return true;
        };
        let close = open + close_rel;
        let target = lower[open..close]
            .trim_matches(|c: char| c.is_whitespace() || c == '\'')
            .trim_matches('"');

        if is_unsafe_url(target) {
            return true;
        }
        offset = close + 1;
    }

    false
}

/// True for URL schemes that may execute script or read local resources.
pub fn is_unsafe_url(url: &str) -> bool {
    let lower = normalize_url(url).to_ascii_lowercase();
    if lower.starts_with("data:image/") {
        return false;
    }

    lower.starts_with("javascript:")
        || lower.starts_with("vbscript:")
        || lower.starts_with("data:")
        || lower.starts_with("file:")
        || lower.contains("javascript:")
        || lower.contains("vbscript:")
}

/// URL as a browser parses it: C0 controls and spaces trimmed from both
/// ends, tabs and line breaks removed everywhere.
pub fn normalize_url(url: &str) -> String {
    url.trim_matches(|c: char| c <= ' ')
        .chars()
        .filter(|c| !matches!(c, '\t' | '\n' | '\r'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(block_id: &str, css: &str) -> Option<String> {
        ScopedStyle::for_block(block_id, Some(css)).map(|style| style.rule().to_string())
    }

    #[test]
    fn wraps_declarations_in_block_selector() {
        assert_eq!(
            rule("blk_1", "padding: 2rem; color: #222;").as_deref(),
            Some("[data-block-id=\"blk_1\"] { padding: 2rem; color: #222; }")
        );
    }

    #[test]
    fn nested_rules_stay_inside_scope() {
        let css = rule("hero", ".title { font-size: 3rem } & a:hover { color: red }")
            .expect("rule");
        assert!(css.starts_with("[data-block-id=\"hero\"] { "));
        assert!(css.ends_with(" }"));
        assert!(css.contains(".title { font-size: 3rem }"));
    }

    /// Brace depth as a browser sees it, skipping strings and comments.
    fn assert_scope_holds(css: &str) {
        let mut depth = 0i32;
        let mut opened = false;
        let mut chars = css.char_indices().peekable();
        while let Some((idx, ch)) = chars.next() {
            match ch {
                '/' if matches!(chars.peek(), Some((_, '*'))) => {
                    chars.next();
                    while let Some((_, c)) = chars.next() {
                        if c == '*' && matches!(chars.peek(), Some((_, '/'))) {
                            chars.next();
                            break;
                        }
                    }
                }
                '"' | '\'' => {
                    while let Some((_, c)) = chars.next() {
                        if c == '\\' {
                            chars.next();
                        } else if c == ch || c == '\n' {
                            break;
                        }
                    }
                }
                '\\' => {
                    chars.next();
                }
                '{' => {
                    depth += 1;
                    opened = true;
                }
                '}' => depth -= 1,
                _ => {}
            }
            if opened && idx + 1 < css.len() {
                assert!(depth > 0, "scope closed early at {idx}: {css}");
            }
        }
        assert_eq!(depth, 0, "unbalanced: {css}");
    }

    #[test]
    fn stray_closing_braces_cannot_escape_scope() {
        let css = rule("b", "} body { display: none } .x {").expect("rule");
        assert!(css.starts_with("[data-block-id=\"b\"] {"));
        assert!(css.ends_with('}'));
        assert_scope_holds(&css);
    }

    #[test]
    fn braces_inside_strings_do_not_count() {
        let css = rule("b", r#"x: "{" } body { display: none }"#).expect("rule");
        assert_eq!(
            css,
            r#"[data-block-id="b"] { x: "{"   body { display: none } }"#
        );
        assert_scope_holds(&css);

        let css = rule("b", "content: '}'; } body { display: none }").expect("rule");
        assert_scope_holds(&css);
    }

    #[test]
    fn comments_are_stripped_and_cannot_hide_braces() {
        let css = rule("b", "/* { */ } body { display: none }").expect("rule");
        assert_eq!(css, "[data-block-id=\"b\"] { body { display: none } }");
        assert_scope_holds(&css);

        let css = rule("b", "color: red; /* } */ margin: 0 /* unterminated {").expect("rule");
        assert!(!css.contains("/*"));
        assert_scope_holds(&css);

        let css = rule("b", "a/}*x{ color: red }").expect("rule");
        assert!(!css.contains("/*"));
        assert_scope_holds(&css);
    }

    #[test]
    fn escaped_and_unterminated_delimiters_stay_opaque() {
        let css = rule("b", r".a\{ { color: red } } body { display: none }").expect("rule");
        assert_scope_holds(&css);

        let css = rule("b", "content: \"} body { display: none }").expect("rule");
        assert_scope_holds(&css);

        // a raw newline ends the string and invalidates its declaration
        let css = rule("b", "content: \"x\n} body { display: none }").expect("rule");
        assert!(!css.contains("content"));
        assert_scope_holds(&css);
    }

    #[test]
    fn cannot_close_style_element() {
        let css = rule("b", "color: red; </style><script>alert(1)</script>").expect("rule");
        assert!(!css.contains('<'));
        assert!(css.contains("\\3c /style>"));
    }

    #[test]
    fn drops_script_bearing_statements() {
        let css = rule(
            "b",
            "color: red; background: url('javascript:alert(1)'); width: expression(1); @import url(https://evil.test/x.css); margin: 0",
        )
        .expect("rule");
        assert_eq!(css, "[data-block-id=\"b\"] { color: red; margin: 0 }");
    }

    #[test]
    fn keeps_safe_urls() {
        let css = rule("b", "background: url('https://cdn.example.com/bg.png')").expect("rule");
        assert!(css.contains("https://cdn.example.com/bg.png"));
        let css = rule("b", "background: url(data:image/svg+xml,%3Csvg%3E)").expect("rule");
        assert!(css.contains("data:image/svg+xml"));
    }

    #[test]
    fn empty_or_fully_unsafe_css_emits_nothing() {
        assert!(ScopedStyle::for_block("b", None).is_none());
        assert!(ScopedStyle::for_block("b", Some("   ")).is_none());
        assert!(rule("b", "background: url(javascript:alert(1));").is_none());
    }

    #[test]
    fn escapes_block_id_in_selector() {
        assert_eq!(selector_for("a\"b\\c"), "[data-block-id=\"a\\\"b\\\\c\"]");
        assert_eq!(selector_for("x<y"), "[data-block-id=\"x\\3c y\"]");
    }

    #[test]
    fn detects_unsafe_urls() {
        assert!(is_unsafe_url("javascript:alert(1)"));
        assert!(is_unsafe_url("  JavaScript:alert(1)"));
        assert!(is_unsafe_url("data:text/html;base64,AAAA"));
        assert!(is_unsafe_url("file:///etc/passwd"));
        assert!(!is_unsafe_url("data:image/png;base64,AAAA"));
        assert!(!is_unsafe_url("https://example.com/shop"));
        assert!(!is_unsafe_url("/collections/summer"));
    }

    #[test]
    fn controls_and_line_breaks_cannot_hide_a_scheme() {
        assert!(is_unsafe_url("java\tscript:alert(1)"));
        assert!(is_unsafe_url("java\nscript:alert(1)"));
        assert!(is_unsafe_url("java\r\nscript:alert(1)"));
        assert!(is_unsafe_url("\x01javascript:alert(1)"));
        assert!(is_unsafe_url("\x00 \x1fvbscript:msgbox"));
        assert!(is_unsafe_url("da\tta:text/html,x"));
        assert_eq!(normalize_url(" \x01/shop\t/new\n "), "/shop/new");
    }

    #[test]
    fn css_urls_with_hidden_schemes_are_dropped() {
        assert!(rule("b", "background: url('java\tscript:alert(1)')").is_none());
    }
}
