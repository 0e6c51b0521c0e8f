use askama::Template;
use serde::Deserialize;

use crate::application::render::{
    RegistryError, RenderContext, RenderError, RendererRegistry, TypedRenderer,
};
use crate::presentation::views::render_template;

use super::{css_url, optional_url, safe_url};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Right,
    #[default]
    #[serde(other)]
    Center,
}

impl Alignment {
    fn as_str(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroBannerConfig {
    pub headline: String,
    pub subheadline: String,
    pub cta_text: String,
    pub cta_url: String,
    pub background_image: String,
    pub alignment: Alignment,
    pub overlay: bool,
}

impl Default for HeroBannerConfig {
    fn default() -> Self {
        Self {
            headline: "Welcome to our store".to_string(),
            subheadline: "Discover products picked just for you.".to_string(),
            cta_text: "Shop now".to_string(),
            cta_url: "/collections/all".to_string(),
            background_image: String::new(),
            alignment: Alignment::Center,
            overlay: true,
        }
    }
}

#[derive(Template)]
#[template(path = "blocks/hero_banner.html")]
struct HeroBannerTemplate<'a> {
    headline: &'a str,
    subheadline: &'a str,
    cta_text: &'a str,
    cta_url: String,
    background_image: Option<String>,
    alignment: &'static str,
    overlay: bool,
}

fn render_hero_banner(
    config: &HeroBannerConfig,
    ctx: &RenderContext<'_>,
) -> Result<String, RenderError> {
    render_template(
        ctx.slug,
        HeroBannerTemplate {
            headline: &config.headline,
            subheadline: &config.subheadline,
            cta_text: &config.cta_text,
            cta_url: safe_url(&config.cta_url),
            background_image: css_url(&config.background_image),
            alignment: config.alignment.as_str(),
            overlay: config.overlay,
        },
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImagePosition {
    Left,
    #[default]
    #[serde(other)]
    Right,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroSplitConfig {
    pub headline: String,
    pub subheadline: String,
    pub cta_text: String,
    pub cta_url: String,
    pub image_url: String,
    pub image_alt: String,
    pub image_position: ImagePosition,
}

impl Default for HeroSplitConfig {
    fn default() -> Self {
        Self {
            headline: "Made for every day".to_string(),
            subheadline: "Quality essentials, shipped fast.".to_string(),
            cta_text: "Explore the collection".to_string(),
            cta_url: "/collections/all".to_string(),
            image_url: String::new(),
            image_alt: String::new(),
            image_position: ImagePosition::Right,
        }
    }
}

#[derive(Template)]
#[template(path = "blocks/hero_split.html")]
struct HeroSplitTemplate<'a> {
    headline: &'a str,
    subheadline: &'a str,
    cta_text: &'a str,
    cta_url: String,
    image_url: Option<String>,
    image_alt: &'a str,
    image_first: bool,
}

fn render_hero_split(
    config: &HeroSplitConfig,
    ctx: &RenderContext<'_>,
) -> Result<String, RenderError> {
    render_template(
        ctx.slug,
        HeroSplitTemplate {
            headline: &config.headline,
            subheadline: &config.subheadline,
            cta_text: &config.cta_text,
            cta_url: safe_url(&config.cta_url),
            image_url: optional_url(&config.image_url),
            image_alt: &config.image_alt,
            image_first: config.image_position == ImagePosition::Left,
        },
    )
}

pub(super) fn register(registry: &mut RendererRegistry) -> Result<(), RegistryError> {
    registry.register(
        &["hero-banner", "hero"],
        TypedRenderer::<HeroBannerConfig, _>::new(render_hero_banner),
    )?;
    registry.alias("hero-banner", "hero-centered")?;
    registry.register(
        &["hero-split", "hero-image-right"],
        TypedRenderer::<HeroSplitConfig, _>::new(render_hero_split),
    )?;
    Ok(())
}
