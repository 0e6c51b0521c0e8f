use askama::Template;
use serde::Deserialize;

use crate::application::render::{
    RegistryError, RenderContext, RenderError, RendererRegistry, TypedRenderer,
};
use crate::presentation::views::render_template;

use super::{display_text, paragraphs};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FaqItem {
    #[serde(deserialize_with = "display_text")]
    pub question: String,
    #[serde(deserialize_with = "display_text")]
    pub answer: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FaqAccordionConfig {
    pub title: String,
    pub faqs: Vec<FaqItem>,
    /// Expand the first entry on load.
    pub open_first: bool,
}

impl Default for FaqAccordionConfig {
    fn default() -> Self {
        Self {
            title: "Frequently asked questions".to_string(),
            faqs: vec![FaqItem {
                question: "How long does shipping take?".to_string(),
                answer: "Most orders arrive within 3 to 5 business days.".to_string(),
            }],
            open_first: true,
        }
    }
}

struct FaqEntryView<'a> {
    question: &'a str,
    answer: Vec<String>,
    open: bool,
}

#[derive(Template)]
#[template(path = "blocks/faq_accordion.html")]
struct FaqAccordionTemplate<'a> {
    title: &'a str,
    entries: Vec<FaqEntryView<'a>>,
}

fn render_faq_accordion(
    config: &FaqAccordionConfig,
    ctx: &RenderContext<'_>,
) -> Result<String, RenderError> {
    let entries = config
        .faqs
        .iter()
        .filter(|item| !item.question.trim().is_empty())
        .enumerate()
        .map(|(index, item)| FaqEntryView {
            question: item.question.trim(),
            answer: paragraphs(&item.answer),
            open: config.open_first && index == 0,
        })
        .collect();

    render_template(
        ctx.slug,
        FaqAccordionTemplate {
            title: &config.title,
            entries,
        },
    )
}

pub(super) fn register(registry: &mut RendererRegistry) -> Result<(), RegistryError> {
    registry.register(
        &["faq-accordion", "faq"],
        TypedRenderer::<FaqAccordionConfig, _>::new(render_faq_accordion),
    )
}
