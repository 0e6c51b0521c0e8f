use askama::Template;
use serde::Deserialize;

use crate::application::render::{
    RegistryError, RenderContext, RenderError, RendererRegistry, TypedRenderer,
};
use crate::presentation::views::render_template;

use super::display_text;

const MAX_COLUMNS: u8 = 4;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Feature {
    pub icon: String,
    #[serde(deserialize_with = "display_text")]
    pub title: String,
    #[serde(deserialize_with = "display_text")]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeatureGridConfig {
    pub title: String,
    pub subtitle: String,
    pub columns: u8,
    pub features: Vec<Feature>,
}

impl Default for FeatureGridConfig {
    fn default() -> Self {
        let feature = |icon: &str, title: &str, description: &str| Feature {
            icon: icon.to_string(),
            title: title.to_string(),
            description: description.to_string(),
        };
        Self {
            title: "Why shop with us".to_string(),
            subtitle: String::new(),
            columns: 3,
            features: vec![
                feature("🚚", "Free shipping", "On every order over $50."),
                feature("↩", "Easy returns", "30 days, no questions asked."),
                feature("🔒", "Secure checkout", "Your payment details stay private."),
            ],
        }
    }
}

#[derive(Template)]
#[template(path = "blocks/feature_grid.html")]
struct FeatureGridTemplate<'a> {
    title: &'a str,
    subtitle: &'a str,
    columns: u8,
    features: &'a [Feature],
}

fn render_feature_grid(
    config: &FeatureGridConfig,
    ctx: &RenderContext<'_>,
) -> Result<String, RenderError> {
    render_template(
        ctx.slug,
        FeatureGridTemplate {
            title: &config.title,
            subtitle: &config.subtitle,
            columns: config.columns.clamp(1, MAX_COLUMNS),
            features: &config.features,
        },
    )
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeatureChecklistConfig {
    pub title: String,
    pub items: Vec<String>,
    pub icon: String,
}

impl Default for FeatureChecklistConfig {
    fn default() -> Self {
        Self {
            title: "What's included".to_string(),
            items: vec![
                "Lifetime warranty".to_string(),
                "Carbon-neutral delivery".to_string(),
                "Support from real people".to_string(),
            ],
            icon: "✓".to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "blocks/feature_checklist.html")]
struct FeatureChecklistTemplate<'a> {
    title: &'a str,
    items: Vec<&'a str>,
    icon: &'a str,
}

fn render_feature_checklist(
    config: &FeatureChecklistConfig,
    ctx: &RenderContext<'_>,
) -> Result<String, RenderError> {
    let items = config
        .items
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .collect();
    render_template(
        ctx.slug,
        FeatureChecklistTemplate {
            title: &config.title,
            items,
            icon: &config.icon,
        },
    )
}

pub(super) fn register(registry: &mut RendererRegistry) -> Result<(), RegistryError> {
    registry.register(
        &["feature-grid", "features-3col"],
        TypedRenderer::<FeatureGridConfig, _>::new(render_feature_grid),
    )?;
    registry.register(
        &["feature-checklist", "feature-list"],
        TypedRenderer::<FeatureChecklistConfig, _>::new(render_feature_checklist),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::application::render::decode_config;

    fn grid(config: serde_json::Value) -> String {
        let ctx = RenderContext::new("b", "feature-grid", &config);
        render_feature_grid(&decode_config(&ctx), &ctx).expect("grid renders")
    }

    #[test]
    fn columns_are_clamped() {
        assert!(grid(json!({ "columns": 9 })).contains("feature-grid--cols-4"));
        assert!(grid(json!({ "columns": 0 })).contains("feature-grid--cols-1"));
        assert!(grid(json!({})).contains("feature-grid--cols-3"));
    }

    #[test]
    fn renders_one_card_per_feature() {
        let html = grid(json!({
            "features": [
                { "title": "Fast" },
                { "title": "Kind", "description": "To <everyone>" }
            ]
        }));
        assert_eq!(html.matches("feature-grid__item\"").count(), 2);
        assert!(html.contains("Fast"));
        assert!(!html.contains("<everyone>"));
    }

    #[test]
    fn checklist_skips_blank_items() {
        let config = json!({ "items": ["One", "  ", "Two"] });
        let ctx = RenderContext::new("b", "feature-list", &config);
        let html = render_feature_checklist(&decode_config(&ctx), &ctx).expect("renders");
        assert_eq!(html.matches("<li").count(), 2);
    }
}
