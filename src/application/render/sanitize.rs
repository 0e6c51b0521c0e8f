//! Optional second pass over interpolated fallback markup.
//!
//! Off by default: interpolation already escapes every substituted value and
//! the template text itself is authored markup. Deployments that do not trust
//! template authors can enable `render.sanitize_fallback` to strip scripts,
//! event handlers, and unsafe URLs from the final markup.

use std::borrow::Cow;
use std::collections::HashSet;

use ammonia::Builder as AmmoniaBuilder;

use super::style::is_unsafe_url;

pub(crate) fn build_fallback_sanitizer() -> AmmoniaBuilder<'static> {
    let mut builder = AmmoniaBuilder::default();

    let tags: HashSet<&'static str> = HashSet::from([
        "a",
        "article",
        "aside",
        "blockquote",
        "br",
        "button",
        "div",
        "em",
        "figcaption",
        "figure",
        "footer",
        "h1",
        "h2",
        "h3",
        "h4",
        "h5",
        "h6",
        "header",
        "hr",
        "i",
        "img",
        "li",
        "ol",
        "p",
        "picture",
        "section",
        "small",
        "source",
        "span",
        "strong",
        "sub",
        "sup",
        "table",
        "tbody",
        "td",
        "th",
        "thead",
        "tr",
        "u",
        "ul",
        "video",
    ]);
    builder.tags(tags);

    let generic: HashSet<&'static str> = HashSet::from([
        "class",
        "id",
        "title",
        "lang",
        "dir",
        "role",
        "style",
        "aria-hidden",
        "aria-label",
        "aria-expanded",
    ]);
    builder.generic_attributes(generic);
    builder.add_generic_attribute_prefixes(&["data-"]);

    builder.add_tag_attributes("a", &["target", "href"]);
    builder.add_tag_attributes(
        "img",
        &["src", "srcset", "sizes", "alt", "width", "height", "loading", "decoding"],
    );
    builder.add_tag_attributes("source", &["src", "srcset", "type", "media"]);
    builder.add_tag_attributes(
        "video",
        &["src", "poster", "controls", "muted", "loop", "playsinline", "autoplay"],
    );
    builder.add_tag_attributes("button", &["type"]);
    builder.add_tag_attributes("th", &["colspan", "rowspan", "scope"]);
    builder.add_tag_attributes("td", &["colspan", "rowspan"]);

    builder.attribute_filter(|_element, attribute, value| {
        if attribute.eq_ignore_ascii_case("style") {
            sanitize_style_attribute(value).map(Cow::Owned)
        } else {
            Some(Cow::Borrowed(value))
        }
    });

    builder.add_url_schemes(["http", "https", "mailto", "tel"].iter().copied());

    builder
}

fn sanitize_style_attribute(value: &str) -> Option<String> {
    let declarations: Vec<&str> = value
        .split(';')
        .map(str::trim)
        .filter(|decl| !decl.is_empty() && is_safe_declaration(decl))
        .collect();

    if declarations.is_empty() {
        None
    } else {
        Some(declarations.join("; "))
    }
}

fn is_safe_declaration(decl: &str) -> bool {
    let lower = decl.to_ascii_lowercase();
    if ["expression(", "-moz-binding", "behavior:", "@import"]
        .iter()
        .any(|needle| lower.contains(needle))
    {
        return false;
    }

    match (lower.find("url("), lower.rfind(')')) {
        (Some(open), Some(close)) if close > open => !is_unsafe_url(
            lower[open + 4..close]
                .trim_matches(|c: char| c.is_whitespace() || c == '\'' || c == '"'),
        ),
        (Some(_), _) => false,
        _ => !is_unsafe_url(&lower),
    }
}
