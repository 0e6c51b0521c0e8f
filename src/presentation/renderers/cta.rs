use askama::Template;
use serde::Deserialize;

use crate::application::render::{
    RegistryError, RenderContext, RenderError, RendererRegistry, TypedRenderer,
};
use crate::presentation::views::render_template;

use super::{LinkView, optional_url, safe_url};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CtaVariant {
    Secondary,
    #[default]
    #[serde(other)]
    Primary,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CtaBannerConfig {
    pub headline: String,
    pub description: String,
    pub button_text: String,
    pub button_url: String,
    pub secondary_button_text: String,
    pub secondary_button_url: String,
    pub variant: CtaVariant,
}

impl Default for CtaBannerConfig {
    fn default() -> Self {
        Self {
            headline: "Ready to get started?".to_string(),
            description: String::new(),
            button_text: "Shop now".to_string(),
            button_url: "/collections/all".to_string(),
            secondary_button_text: String::new(),
            secondary_button_url: String::new(),
            variant: CtaVariant::Primary,
        }
    }
}

#[derive(Template)]
#[template(path = "blocks/cta_banner.html")]
struct CtaBannerTemplate<'a> {
    headline: &'a str,
    description: &'a str,
    button_text: &'a str,
    button_url: String,
    secondary: Option<LinkView<'a>>,
    variant: &'static str,
}

fn render_cta_banner(
    config: &CtaBannerConfig,
    ctx: &RenderContext<'_>,
) -> Result<String, RenderError> {
    let secondary = (!config.secondary_button_text.trim().is_empty()).then(|| LinkView {
        text: &config.secondary_button_text,
        url: safe_url(&config.secondary_button_url),
    });
    let variant = match config.variant {
        CtaVariant::Primary => "primary",
        CtaVariant::Secondary => "secondary",
    };
    render_template(
        ctx.slug,
        CtaBannerTemplate {
            headline: &config.headline,
            description: &config.description,
            button_text: &config.button_text,
            button_url: safe_url(&config.button_url),
            secondary,
            variant,
        },
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Success,
    Warning,
    Promo,
    #[default]
    #[serde(other)]
    Info,
}

impl Tone {
    fn as_str(self) -> &'static str {
        match self {
            Tone::Info => "info",
            Tone::Success => "success",
            Tone::Warning => "warning",
            Tone::Promo => "promo",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnnouncementBarConfig {
    pub message: String,
    pub link_text: String,
    pub link_url: String,
    pub tone: Tone,
    pub dismissible: bool,
}

impl Default for AnnouncementBarConfig {
    fn default() -> Self {
        Self {
            message: "Free shipping on orders over $50".to_string(),
            link_text: String::new(),
            link_url: String::new(),
            tone: Tone::Info,
            dismissible: false,
        }
    }
}

#[derive(Template)]
#[template(path = "blocks/announcement_bar.html")]
struct AnnouncementBarTemplate<'a> {
    message: &'a str,
    link: Option<LinkView<'a>>,
    tone: &'static str,
    dismissible: bool,
}

fn render_announcement_bar(
    config: &AnnouncementBarConfig,
    ctx: &RenderContext<'_>,
) -> Result<String, RenderError> {
    let link = optional_url(&config.link_url).map(|url| {
        let text = if config.link_text.trim().is_empty() {
            "Learn more"
        } else {
            config.link_text.as_str()
        };
        LinkView { text, url }
    });
    render_template(
        ctx.slug,
        AnnouncementBarTemplate {
            message: &config.message,
            link,
            tone: config.tone.as_str(),
            dismissible: config.dismissible,
        },
    )
}

pub(super) fn register(registry: &mut RendererRegistry) -> Result<(), RegistryError> {
    registry.register(
        &["cta-banner", "call-to-action"],
        TypedRenderer::<CtaBannerConfig, _>::new(render_cta_banner),
    )?;
    registry.register(
        &["announcement-bar", "banner"],
        TypedRenderer::<AnnouncementBarConfig, _>::new(render_announcement_bar),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::application::render::decode_config;

    #[test]
    fn cta_secondary_button_is_optional() {
        let config = json!({ "variant": "secondary" });
        let ctx = RenderContext::new("b", "cta-banner", &config);
        let html = render_cta_banner(&decode_config(&ctx), &ctx).expect("renders");
        assert!(html.contains("cta-banner--secondary"));
        assert_eq!(html.matches("<a ").count(), 1);

        let config = json!({
            "secondaryButtonText": "Compare plans",
            "secondaryButtonUrl": "vbscript:msgbox"
        });
        let ctx = RenderContext::new("b", "cta-banner", &config);
        let html = render_cta_banner(&decode_config(&ctx), &ctx).expect("renders");
        assert_eq!(html.matches("<a ").count(), 2);
        assert!(html.contains("Compare plans"));
        assert!(!html.contains("vbscript"));
    }

    #[test]
    fn announcement_link_defaults_its_text() {
        let config = json!({ "message": "Sale ends Sunday", "linkUrl": "/sale", "tone": "promo" });
        let ctx = RenderContext::new("b", "banner", &config);
        let html = render_announcement_bar(&decode_config(&ctx), &ctx).expect("renders");
        assert!(html.contains("announcement-bar--promo"));
        assert!(html.contains(r#"href="/sale""#));
        assert!(html.contains("Learn more"));
        assert!(!html.contains("announcement-bar__dismiss"));
    }

    #[test]
    fn link_label_is_escaped_and_anchor_needs_a_url() {
        let config = json!({ "message": "Hi", "linkText": "<b>Shop</b>", "linkUrl": "" });
        let ctx = RenderContext::new("b", "announcement-bar", &config);
        let html = render_announcement_bar(&decode_config(&ctx), &ctx).expect("renders");
        assert!(!html.contains("<a "));

        let config = json!({ "message": "Hi", "linkText": "<b>Shop</b>", "linkUrl": "/shop" });
        let ctx = RenderContext::new("b", "announcement-bar", &config);
        let html = render_announcement_bar(&decode_config(&ctx), &ctx).expect("renders");
        assert!(html.contains("&lt;b&gt;Shop&lt;/b&gt;"));
        assert!(!html.contains("<b>"));
    }
}
