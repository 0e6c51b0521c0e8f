//! Product recommendations are resolved by the storefront client. The server
//! only emits a loading shell carrying the query as data attributes.

use askama::Template;
use serde::Deserialize;

use crate::application::render::{
    RegistryError, RenderContext, RenderError, RendererRegistry, TypedRenderer,
};
use crate::presentation::views::render_template;

const MIN_LIMIT: u8 = 1;
const MAX_LIMIT: u8 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    Related,
    Complementary,
    BestSellers,
    #[default]
    #[serde(other)]
    Personalized,
}

impl Strategy {
    fn as_str(self) -> &'static str {
        match self {
            Strategy::Personalized => "personalized",
            Strategy::Related => "related",
            Strategy::Complementary => "complementary",
            Strategy::BestSellers => "best-sellers",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductRecommendationsConfig {
    pub title: String,
    pub strategy: Strategy,
    pub limit: u8,
    /// Anchor product for `related` and `complementary` strategies.
    pub product_id: String,
}

impl Default for ProductRecommendationsConfig {
    fn default() -> Self {
        Self {
            title: "You may also like".to_string(),
            strategy: Strategy::Personalized,
            limit: 4,
            product_id: String::new(),
        }
    }
}

#[derive(Template)]
#[template(path = "blocks/product_recommendations.html")]
struct ProductRecommendationsTemplate<'a> {
    title: &'a str,
    strategy: &'static str,
    limit: u8,
    product_id: Option<&'a str>,
    skeletons: Vec<u8>,
}

fn render_product_recommendations(
    config: &ProductRecommendationsConfig,
    ctx: &RenderContext<'_>,
) -> Result<String, RenderError> {
    let limit = config.limit.clamp(MIN_LIMIT, MAX_LIMIT);
    let product_id = Some(config.product_id.trim()).filter(|id| !id.is_empty());
    render_template(
        ctx.slug,
        ProductRecommendationsTemplate {
            title: &config.title,
            strategy: config.strategy.as_str(),
            limit,
            product_id,
            skeletons: (0..limit).collect(),
        },
    )
}

pub(super) fn register(registry: &mut RendererRegistry) -> Result<(), RegistryError> {
    registry.register(
        &["product-recommendations", "recommended-products"],
        TypedRenderer::<ProductRecommendationsConfig, _>::new(render_product_recommendations),
    )
}
