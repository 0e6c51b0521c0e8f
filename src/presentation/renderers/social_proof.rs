use askama::Template;
use serde::Deserialize;

use crate::application::render::{
    RegistryError, RenderContext, RenderError, RendererRegistry, TypedRenderer,
};
use crate::presentation::views::render_template;

use super::{display_text, optional_url};

const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Testimonial {
    #[serde(deserialize_with = "display_text")]
    pub quote: String,
    #[serde(deserialize_with = "display_text")]
    pub author: String,
    #[serde(deserialize_with = "display_text")]
    pub role: String,
    pub avatar_url: String,
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TestimonialGridConfig {
    pub title: String,
    pub testimonials: Vec<Testimonial>,
}

impl Default for TestimonialGridConfig {
    fn default() -> Self {
        Self {
            title: "What our customers say".to_string(),
            testimonials: vec![Testimonial {
                quote: "Exactly what I was looking for.".to_string(),
                author: "A happy customer".to_string(),
                rating: Some(5.0),
                ..Testimonial::default()
            }],
        }
    }
}

struct TestimonialView<'a> {
    quote: &'a str,
    author: &'a str,
    role: &'a str,
    avatar_url: Option<String>,
    rating: Option<RatingView>,
}

struct RatingView {
    value: u8,
    filled: String,
    empty: String,
}

impl RatingView {
    /// Round and clamp to whole stars in `0..=5`. Non-finite ratings are dropped.
    fn from_rating(rating: f64) -> Option<Self> {
        if !rating.is_finite() {
            return None;
        }
        let value = rating.round().clamp(0.0, f64::from(MAX_RATING)) as u8;
        Some(Self {
            value,
            filled: "★".repeat(usize::from(value)),
            empty: "☆".repeat(usize::from(MAX_RATING - value)),
        })
    }
}

#[derive(Template)]
#[template(path = "blocks/testimonial_grid.html")]
struct TestimonialGridTemplate<'a> {
    title: &'a str,
    testimonials: Vec<TestimonialView<'a>>,
    max_rating: u8,
}

fn render_testimonial_grid(
    config: &TestimonialGridConfig,
    ctx: &RenderContext<'_>,
) -> Result<String, RenderError> {
    let testimonials = config
        .testimonials
        .iter()
        .filter(|item| !item.quote.trim().is_empty())
        .map(|item| TestimonialView {
            quote: item.quote.trim(),
            author: &item.author,
            role: &item.role,
            avatar_url: optional_url(&item.avatar_url),
            rating: item.rating.and_then(RatingView::from_rating),
        })
        .collect();

    render_template(
        ctx.slug,
        TestimonialGridTemplate {
            title: &config.title,
            testimonials,
            max_rating: MAX_RATING,
        },
    )
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Stat {
    #[serde(deserialize_with = "display_text")]
    pub value: String,
    #[serde(deserialize_with = "display_text")]
    pub label: String,
    #[serde(deserialize_with = "display_text")]
    pub prefix: String,
    #[serde(deserialize_with = "display_text")]
    pub suffix: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatsCounterConfig {
    pub title: String,
    pub stats: Vec<Stat>,
}

impl Default for StatsCounterConfig {
    fn default() -> Self {
        let stat = |value: &str, suffix: &str, label: &str| Stat {
            value: value.to_string(),
            label: label.to_string(),
            prefix: String::new(),
            suffix: suffix.to_string(),
        };
        Self {
            title: String::new(),
            stats: vec![
                stat("10", "k+", "Orders shipped"),
                stat("4.9", "", "Average rating"),
                stat("24", "/7", "Support"),
            ],
        }
    }
}

#[derive(Template)]
#[template(path = "blocks/stats_counter.html")]
struct StatsCounterTemplate<'a> {
    title: &'a str,
    stats: &'a [Stat],
}

fn render_stats_counter(
    config: &StatsCounterConfig,
    ctx: &RenderContext<'_>,
) -> Result<String, RenderError> {
    render_template(
        ctx.slug,
        StatsCounterTemplate {
            title: &config.title,
            stats: &config.stats,
        },
    )
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Logo {
    #[serde(deserialize_with = "display_text")]
    pub name: String,
    pub image_url: String,
    pub href: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogoCloudConfig {
    pub title: String,
    pub logos: Vec<Logo>,
    pub grayscale: bool,
}

impl Default for LogoCloudConfig {
    fn default() -> Self {
        Self {
            title: "As featured in".to_string(),
            logos: Vec::new(),
            grayscale: true,
        }
    }
}

struct LogoView<'a> {
    name: &'a str,
    image_url: Option<String>,
    href: Option<String>,
}

#[derive(Template)]
#[template(path = "blocks/logo_cloud.html")]
struct LogoCloudTemplate<'a> {
    title: &'a str,
    logos: Vec<LogoView<'a>>,
    grayscale: bool,
}

fn render_logo_cloud(
    config: &LogoCloudConfig,
    ctx: &RenderContext<'_>,
) -> Result<String, RenderError> {
    let logos = config
        .logos
        .iter()
        .map(|logo| LogoView {
            name: &logo.name,
            image_url: optional_url(&logo.image_url),
            href: optional_url(&logo.href),
        })
        .filter(|logo| logo.image_url.is_some() || !logo.name.trim().is_empty())
        .collect();

    render_template(
        ctx.slug,
        LogoCloudTemplate {
            title: &config.title,
            logos,
            grayscale: config.grayscale,
        },
    )
}

pub(super) fn register(registry: &mut RendererRegistry) -> Result<(), RegistryError> {
    registry.register(
        &["testimonial-grid", "testimonials"],
        TypedRenderer::<TestimonialGridConfig, _>::new(render_testimonial_grid),
    )?;
    registry.register(
        &["stats-counter", "stats"],
        TypedRenderer::<StatsCounterConfig, _>::new(render_stats_counter),
    )?;
    registry.register(
        &["logo-cloud", "brand-logos"],
        TypedRenderer::<LogoCloudConfig, _>::new(render_logo_cloud),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::application::render::decode_config;

    #[test]
    fn ratings_are_clamped_to_five_stars() {
        assert_eq!(RatingView::from_rating(9.0).map(|r| r.value), Some(5));
        assert_eq!(RatingView::from_rating(-3.0).map(|r| r.value), Some(0));
        assert_eq!(RatingView::from_rating(3.6).map(|r| r.value), Some(4));
        assert!(RatingView::from_rating(f64::NAN).is_none());

        let three = RatingView::from_rating(3.0).expect("rating");
        assert_eq!(three.filled, "★★★");
        assert_eq!(three.empty, "☆☆");
    }

    #[test]
    fn testimonials_render_rating_label() {
        let config = json!({
            "testimonials": [{ "quote": "Love it", "author": "Sam", "rating": 12 }]
        });
        let ctx = RenderContext::new("b", "testimonials", &config);
        let html = render_testimonial_grid(&decode_config(&ctx), &ctx).expect("renders");
        assert!(html.contains("Rated 5 out of 5"));
        assert!(html.contains("Love it"));
    }

    #[test]
    fn stat_values_accept_numbers() {
        let config = json!({ "stats": [{ "value": 120, "suffix": "+", "label": "Stores" }] });
        let ctx = RenderContext::new("b", "stats", &config);
        let html = render_stats_counter(&decode_config(&ctx), &ctx).expect("renders");
        assert!(html.contains("120"));
        assert!(html.contains("Stores"));
    }

    #[test]
    fn logos_without_image_or_name_are_skipped() {
        let config = json!({
            "logos": [
                { "name": "Acme", "imageUrl": "https://cdn.example/acme.svg", "href": "javascript:x" },
                { "name": " " }
            ]
        });
        let ctx = RenderContext::new("b", "logo-cloud", &config);
        let html = render_logo_cloud(&decode_config(&ctx), &ctx).expect("renders");
        assert_eq!(html.matches("<img").count(), 1);
        assert!(!html.contains("javascript"));
        assert!(html.contains("logo-cloud--grayscale"));
    }
}
