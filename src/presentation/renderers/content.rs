use askama::Template;
use serde::Deserialize;

use crate::application::render::{
    RegistryError, RenderContext, RenderError, RendererRegistry, TypedRenderer,
};
use crate::presentation::views::render_template;

use super::paragraphs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextWidth {
    Wide,
    Full,
    #[default]
    #[serde(other)]
    Narrow,
}

impl TextWidth {
    fn as_str(self) -> &'static str {
        match self {
            TextWidth::Narrow => "narrow",
            TextWidth::Wide => "wide",
            TextWidth::Full => "full",
        }
    }
}

/// Plain author text. Markup in `body` is escaped, never interpreted.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RichTextConfig {
    pub title: String,
    pub body: String,
    pub width: TextWidth,
}

impl Default for RichTextConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            body: "Tell your story here.".to_string(),
            width: TextWidth::Narrow,
        }
    }
}

#[derive(Template)]
#[template(path = "blocks/rich_text.html")]
struct RichTextTemplate<'a> {
    title: &'a str,
    paragraphs: Vec<String>,
    width: &'static str,
}

fn render_rich_text(config: &RichTextConfig, ctx: &RenderContext<'_>) -> Result<String, RenderError> {
    render_template(
        ctx.slug,
        RichTextTemplate {
            title: &config.title,
            paragraphs: paragraphs(&config.body),
            width: config.width.as_str(),
        },
    )
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CountdownConfig {
    pub title: String,
    /// Target instant, passed through to the client untouched.
    pub ends_at: String,
    pub expired_message: String,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            title: "Sale ends in".to_string(),
            ends_at: String::new(),
            expired_message: "This offer has ended.".to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "blocks/countdown.html")]
struct CountdownTemplate<'a> {
    title: &'a str,
    ends_at: Option<&'a str>,
    expired_message: &'a str,
}

fn render_countdown(config: &CountdownConfig, ctx: &RenderContext<'_>) -> Result<String, RenderError> {
    let ends_at = Some(config.ends_at.trim()).filter(|value| !value.is_empty());
    render_template(
        ctx.slug,
        CountdownTemplate {
            title: &config.title,
            ends_at,
            expired_message: &config.expired_message,
        },
    )
}

pub(super) fn register(registry: &mut RendererRegistry) -> Result<(), RegistryError> {
    registry.register(
        &["rich-text", "text-block"],
        TypedRenderer::<RichTextConfig, _>::new(render_rich_text),
    )?;
    registry.register(
        &["countdown-timer", "countdown"],
        TypedRenderer::<CountdownConfig, _>::new(render_countdown),
    )?;
    Ok(())
}
