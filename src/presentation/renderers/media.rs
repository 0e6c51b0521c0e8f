use askama::Template;
use serde::Deserialize;

use crate::application::render::{
    RegistryError, RenderContext, RenderError, RendererRegistry, TypedRenderer,
};
use crate::presentation::views::render_template;

use super::{display_text, optional_url};

const MIN_COLUMNS: u8 = 1;
const MAX_COLUMNS: u8 = 6;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GalleryImage {
    pub url: String,
    #[serde(deserialize_with = "display_text")]
    pub alt: String,
    #[serde(deserialize_with = "display_text")]
    pub caption: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageGalleryConfig {
    pub title: String,
    pub images: Vec<GalleryImage>,
    pub columns: u8,
}

impl Default for ImageGalleryConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            images: Vec::new(),
            columns: 3,
        }
    }
}

struct ImageView<'a> {
    url: String,
    alt: &'a str,
    caption: &'a str,
}

#[derive(Template)]
#[template(path = "blocks/image_gallery.html")]
struct ImageGalleryTemplate<'a> {
    title: &'a str,
    images: Vec<ImageView<'a>>,
    columns: u8,
}

fn render_image_gallery(
    config: &ImageGalleryConfig,
    ctx: &RenderContext<'_>,
) -> Result<String, RenderError> {
    let images = config
        .images
        .iter()
        .filter_map(|image| {
            optional_url(&image.url).map(|url| ImageView {
                url,
                alt: &image.alt,
                caption: &image.caption,
            })
        })
        .collect();

    render_template(
        ctx.slug,
        ImageGalleryTemplate {
            title: &config.title,
            images,
            columns: config.columns.clamp(MIN_COLUMNS, MAX_COLUMNS),
        },
    )
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoEmbedConfig {
    pub title: String,
    /// Embeddable player URL. Only `https://` sources are framed.
    pub video_url: String,
    pub caption: String,
    pub autoplay: bool,
}

impl Default for VideoEmbedConfig {
    fn default() -> Self {
        Self {
            title: "Watch the story".to_string(),
            video_url: String::new(),
            caption: String::new(),
            autoplay: false,
        }
    }
}

#[derive(Template)]
#[template(path = "blocks/video_embed.html")]
struct VideoEmbedTemplate<'a> {
    title: &'a str,
    source: Option<&'a str>,
    caption: &'a str,
    autoplay: bool,
}

fn embeddable_source(url: &str) -> Option<&str> {
    let trimmed = url.trim();
    let scheme_ok = trimmed
        .get(..8)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("https://"));
    (scheme_ok && trimmed.len() > 8).then_some(trimmed)
}

fn render_video_embed(
    config: &VideoEmbedConfig,
    ctx: &RenderContext<'_>,
) -> Result<String, RenderError> {
    render_template(
        ctx.slug,
        VideoEmbedTemplate {
            title: &config.title,
            source: embeddable_source(&config.video_url),
            caption: &config.caption,
            autoplay: config.autoplay,
        },
    )
}

pub(super) fn register(registry: &mut RendererRegistry) -> Result<(), RegistryError> {
    registry.register(
        &["image-gallery", "gallery"],
        TypedRenderer::<ImageGalleryConfig, _>::new(render_image_gallery),
    )?;
    registry.register(
        &["video-embed", "video"],
        TypedRenderer::<VideoEmbedConfig, _>::new(render_video_embed),
    )?;
    Ok(())
}
