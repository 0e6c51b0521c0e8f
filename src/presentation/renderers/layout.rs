use askama::Template;
use serde::Deserialize;

use crate::application::render::{
    RegistryError, RenderContext, RenderError, RendererRegistry, TypedRenderer,
};
use crate::presentation::views::render_template;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpacerSize {
    Small,
    Large,
    #[default]
    #[serde(other)]
    Medium,
}

impl SpacerSize {
    fn as_str(self) -> &'static str {
        match self {
            SpacerSize::Small => "small",
            SpacerSize::Medium => "medium",
            SpacerSize::Large => "large",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpacerConfig {
    pub size: SpacerSize,
}

#[derive(Template)]
#[template(path = "blocks/spacer.html")]
struct SpacerTemplate {
    size: &'static str,
}

fn render_spacer(config: &SpacerConfig, ctx: &RenderContext<'_>) -> Result<String, RenderError> {
    render_template(
        ctx.slug,
        SpacerTemplate {
            size: config.size.as_str(),
        },
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DividerStyle {
    Dashed,
    Dotted,
    #[default]
    #[serde(other)]
    Solid,
}

impl DividerStyle {
    fn as_str(self) -> &'static str {
        match self {
            DividerStyle::Solid => "solid",
            DividerStyle::Dashed => "dashed",
            DividerStyle::Dotted => "dotted",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DividerConfig {
    pub style: DividerStyle,
}

#[derive(Template)]
#[template(path = "blocks/divider.html")]
struct DividerTemplate {
    style: &'static str,
}

fn render_divider(config: &DividerConfig, ctx: &RenderContext<'_>) -> Result<String, RenderError> {
    render_template(
        ctx.slug,
        DividerTemplate {
            style: config.style.as_str(),
        },
    )
}

pub(super) fn register(registry: &mut RendererRegistry) -> Result<(), RegistryError> {
    registry.register(&["spacer"], TypedRenderer::<SpacerConfig, _>::new(render_spacer))?;
    registry.register(&["divider"], TypedRenderer::<DividerConfig, _>::new(render_divider))?;
    Ok(())
}
