use askama::Template;
use serde::Deserialize;

use crate::application::render::{
    RegistryError, RenderContext, RenderError, RendererRegistry, TypedRenderer,
};
use crate::presentation::views::render_template;

use super::{display_text, safe_url};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PricingPlan {
    #[serde(deserialize_with = "display_text")]
    pub name: String,
    #[serde(deserialize_with = "display_text")]
    pub price: String,
    #[serde(deserialize_with = "display_text")]
    pub period: String,
    #[serde(deserialize_with = "display_text")]
    pub description: String,
    pub features: Vec<String>,
    #[serde(deserialize_with = "display_text")]
    pub cta_text: String,
    pub cta_url: String,
    pub highlighted: bool,
    #[serde(deserialize_with = "display_text")]
    pub badge: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PricingTableConfig {
    pub title: String,
    pub subtitle: String,
    pub currency: String,
    pub plans: Vec<PricingPlan>,
}

impl Default for PricingTableConfig {
    fn default() -> Self {
        Self {
            title: "Choose your plan".to_string(),
            subtitle: String::new(),
            currency: "$".to_string(),
            plans: vec![
                PricingPlan {
                    name: "Starter".to_string(),
                    price: "9".to_string(),
                    period: "month".to_string(),
                    features: vec!["One box a month".to_string()],
                    cta_text: "Subscribe".to_string(),
                    ..PricingPlan::default()
                },
                PricingPlan {
                    name: "Plus".to_string(),
                    price: "19".to_string(),
                    period: "month".to_string(),
                    features: vec![
                        "Two boxes a month".to_string(),
                        "Free shipping".to_string(),
                    ],
                    cta_text: "Subscribe".to_string(),
                    highlighted: true,
                    badge: "Most popular".to_string(),
                    ..PricingPlan::default()
                },
            ],
        }
    }
}

struct PlanView<'a> {
    name: &'a str,
    price: &'a str,
    period: &'a str,
    description: &'a str,
    features: &'a [String],
    cta_text: &'a str,
    cta_url: String,
    highlighted: bool,
    badge: &'a str,
}

#[derive(Template)]
#[template(path = "blocks/pricing_table.html")]
struct PricingTableTemplate<'a> {
    title: &'a str,
    subtitle: &'a str,
    currency: &'a str,
    plans: Vec<PlanView<'a>>,
}

fn render_pricing_table(
    config: &PricingTableConfig,
    ctx: &RenderContext<'_>,
) -> Result<String, RenderError> {
    let plans = config
        .plans
        .iter()
        .map(|plan| PlanView {
            name: &plan.name,
            price: &plan.price,
            period: &plan.period,
            description: &plan.description,
            features: &plan.features,
            cta_text: &plan.cta_text,
            cta_url: safe_url(&plan.cta_url),
            highlighted: plan.highlighted,
            badge: &plan.badge,
        })
        .collect();

    render_template(
        ctx.slug,
        PricingTableTemplate {
            title: &config.title,
            subtitle: &config.subtitle,
            currency: &config.currency,
            plans,
        },
    )
}

pub(super) fn register(registry: &mut RendererRegistry) -> Result<(), RegistryError> {
    registry.register(
        &["pricing-table", "pricing"],
        TypedRenderer::<PricingTableConfig, _>::new(render_pricing_table),
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::application::render::decode_config;

    fn pricing(config: serde_json::Value) -> String {
        let ctx = RenderContext::new("b", "pricing", &config);
        render_pricing_table(&decode_config(&ctx), &ctx).expect("pricing renders")
    }

    #[test]
    fn highlights_selected_plan() {
        let html = pricing(json!({
            "currency": "€",
            "plans": [
                { "name": "Basic", "price": 5 },
                { "name": "Pro", "price": "12.50", "highlighted": true, "features": ["All of Basic"] }
            ]
        }));
        assert_eq!(html.matches("pricing-table__plan--highlighted").count(), 1);
        assert!(html.contains("€5"));
        assert!(html.contains("€12.50"));
        assert!(html.contains("All of Basic"));
    }

    #[test]
    fn defaults_show_sample_plans() {
        let html = pricing(json!(null));
        assert!(html.contains("Starter"));
        assert!(html.contains("Most popular"));
    }
}
