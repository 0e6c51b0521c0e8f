//! Shared domain enumerations aligned with the authoring system's records.

use serde::{Deserialize, Serialize};

/// Classification tag carried by a template descriptor.
///
/// Informational only: dispatch never branches on the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateCategory {
    Hero,
    Feature,
    Cta,
    Testimonial,
    Pricing,
    Faq,
    Form,
    Media,
    Content,
    Commerce,
    Layout,
    #[default]
    #[serde(other)]
    Other,
}

impl TemplateCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            TemplateCategory::Hero => "hero",
            TemplateCategory::Feature => "feature",
            TemplateCategory::Cta => "cta",
            TemplateCategory::Testimonial => "testimonial",
            TemplateCategory::Pricing => "pricing",
            TemplateCategory::Faq => "faq",
            TemplateCategory::Form => "form",
            TemplateCategory::Media => "media",
            TemplateCategory::Content => "content",
            TemplateCategory::Commerce => "commerce",
            TemplateCategory::Layout => "layout",
            TemplateCategory::Other => "other",
        }
    }
}
