//! Built-in leaf renderers.
//!
//! Each renderer owns a typed configuration struct where every field has a
//! default, and renders through an auto-escaping template. URL fields pass
//! through [`safe_url`] before reaching an attribute.

mod commerce;
mod content;
mod cta;
mod faq;
mod features;
mod forms;
mod hero;
mod layout;
mod media;
mod pricing;
mod social_proof;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::application::render::{
    RegistryError, RendererRegistry, is_unsafe_url, normalize_url, value_to_text,
};

pub use commerce::ProductRecommendationsConfig;
pub use content::{CountdownConfig, RichTextConfig};
pub use cta::{AnnouncementBarConfig, CtaBannerConfig};
pub use faq::FaqAccordionConfig;
pub use features::{FeatureChecklistConfig, FeatureGridConfig};
pub use forms::{ContactFormConfig, NewsletterSignupConfig};
pub use hero::{HeroBannerConfig, HeroSplitConfig};
pub use layout::{DividerConfig, SpacerConfig};
pub use media::{ImageGalleryConfig, VideoEmbedConfig};
pub use pricing::PricingTableConfig;
pub use social_proof::{LogoCloudConfig, StatsCounterConfig, TestimonialGridConfig};

/// Register every built-in renderer with its canonical slug and aliases.
pub fn register_builtin(registry: &mut RendererRegistry) -> Result<(), RegistryError> {
    hero::register(registry)?;
    features::register(registry)?;
    cta::register(registry)?;
    faq::register(registry)?;
    social_proof::register(registry)?;
    pricing::register(registry)?;
    forms::register(registry)?;
    media::register(registry)?;
    content::register(registry)?;
    commerce::register(registry)?;
    layout::register(registry)?;
    Ok(())
}

/// Optional secondary link handed to a template.
///
/// `text` borrows the author's label and is escaped by the template. `url`
/// has already been through [`safe_url`] or [`optional_url`], so templates
/// may place it in an `href` as is. Renderers wrap it in an `Option` and pass
/// `None` when there is nothing to link, so the template skips the anchor.
pub(crate) struct LinkView<'a> {
    pub text: &'a str,
    pub url: String,
}

/// Attribute-safe form of an author-supplied URL. Blank and script-capable
/// values collapse to `#`.
pub fn safe_url(url: &str) -> String {
    let normalized = normalize_url(url);
    if normalized.is_empty() || is_unsafe_url(&normalized) {
        "#".to_string()
    } else {
        normalized
    }
}

/// Like [`safe_url`] but keeps "no URL" distinguishable from a rejected one.
pub(crate) fn optional_url(url: &str) -> Option<String> {
    let normalized = normalize_url(url);
    (!normalized.is_empty()).then(|| safe_url(&normalized))
}

/// URL usable inside a CSS `url('...')` in a style attribute.
pub(crate) fn css_url(url: &str) -> Option<String> {
    optional_url(url).filter(|url| {
        url != "#" && !url.contains(['\'', '"', '(', ')', '\\', '\n', '\r', ';'])
    })
}

/// Accept strings, numbers, and booleans for display fields.
pub(crate) fn display_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => String::new(),
        other => value_to_text(&other),
    })
}

/// Split author text into paragraphs on blank lines.
pub(crate) fn paragraphs(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .split("\n\n")
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
        .map(str::to_string)
        .collect()
}
