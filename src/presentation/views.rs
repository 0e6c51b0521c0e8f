use askama::Template;
use tracing::error;

use crate::application::render::{RenderError, ScopedStyle, escape};

/// Render a leaf template, mapping askama failures onto the block's slug.
pub fn render_template<T: Template>(slug: &str, template: T) -> Result<String, RenderError> {
    template
        .render()
        .map_err(|err| RenderError::template(slug, &err))
}

#[derive(Template)]
#[template(path = "blocks/wrapper.html")]
struct BlockWrapperTemplate<'a> {
    block_id: &'a str,
    slug: &'a str,
    class: &'a str,
    style_rule: Option<&'a str>,
    inner: &'a str,
}

/// Wrap inner block markup in the identifying container.
///
/// `inner` is trusted markup produced by a renderer, interpolation, or a
/// placeholder; every other value is escaped.
pub fn render_block_wrapper(
    block_id: &str,
    slug: &str,
    class: &str,
    style: Option<&ScopedStyle>,
    inner: &str,
) -> String {
    let template = BlockWrapperTemplate {
        block_id,
        slug,
        class,
        style_rule: style.map(ScopedStyle::rule),
        inner,
    };
    match template.render() {
        Ok(html) => html,
        Err(err) => {
            error!(
                target = "presentation::views::render_block_wrapper",
                block_id,
                slug,
                error = %err,
                "wrapper template failed; emitting plain wrapper"
            );
            let style = style
                .map(|style| {
                    format!(
                        r#"<style data-block-style="{}">{}</style>"#,
                        escape(block_id),
                        style.rule()
                    )
                })
                .unwrap_or_default();
            format!(
                r#"{style}<section class="{}" data-block-id="{}" data-template-slug="{}">{inner}</section>"#,
                escape(class),
                escape(block_id),
                escape(slug),
            )
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    NotImplemented,
    Failed,
}

impl PlaceholderKind {
    fn label(self) -> &'static str {
        match self {
            PlaceholderKind::NotImplemented => "Template not implemented",
            PlaceholderKind::Failed => "Template failed to render",
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            PlaceholderKind::NotImplemented => "not-implemented",
            PlaceholderKind::Failed => "failed",
        }
    }
}

#[derive(Template)]
#[template(path = "blocks/placeholder.html")]
struct PlaceholderTemplate<'a> {
    kind: &'static str,
    label: &'static str,
    name: &'a str,
}

/// Visible notice naming the template that could not be rendered.
pub fn render_placeholder(kind: PlaceholderKind, template_name: &str) -> String {
    let template = PlaceholderTemplate {
        kind: kind.as_str(),
        label: kind.label(),
        name: template_name,
    };
    template.render().unwrap_or_else(|err| {
        error!(
            target = "presentation::views::render_placeholder",
            error = %err,
            "placeholder template failed; emitting plain notice"
        );
        format!("<p>{}: {}</p>", kind.label(), escape(template_name))
    })
}

#[derive(Template)]
#[template(path = "landing_page.html")]
pub struct LandingPageTemplate<'a> {
    pub title: &'a str,
    pub landing_page_id: Option<&'a str>,
    /// Concatenated block wrappers; already escaped where needed.
    pub body: &'a str,
}
