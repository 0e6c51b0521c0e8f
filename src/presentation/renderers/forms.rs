//! Capture forms. Submission is handled outside the page; these renderers only
//! emit markup that attributes each submission to its landing page.

use askama::Template;
use regex::Regex;
use serde::Deserialize;
use tracing::warn;

use crate::application::render::{
    RegistryError, RenderContext, RenderError, RendererRegistry, TypedRenderer,
};
use crate::presentation::views::render_template;

use super::{display_text, optional_url};

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewsletterSignupConfig {
    pub headline: String,
    pub description: String,
    pub placeholder: String,
    pub button_text: String,
    pub action: String,
    pub consent_text: String,
}

impl Default for NewsletterSignupConfig {
    fn default() -> Self {
        Self {
            headline: "Join our newsletter".to_string(),
            description: "New arrivals and members-only offers, once a week.".to_string(),
            placeholder: "you@example.com".to_string(),
            button_text: "Subscribe".to_string(),
            action: String::new(),
            consent_text: String::new(),
        }
    }
}

#[derive(Template)]
#[template(path = "blocks/newsletter_signup.html")]
struct NewsletterSignupTemplate<'a> {
    block_id: &'a str,
    headline: &'a str,
    description: &'a str,
    placeholder: &'a str,
    button_text: &'a str,
    action: Option<String>,
    consent_text: &'a str,
    landing_page_id: Option<&'a str>,
}

fn render_newsletter_signup(
    config: &NewsletterSignupConfig,
    ctx: &RenderContext<'_>,
) -> Result<String, RenderError> {
    render_template(
        ctx.slug,
        NewsletterSignupTemplate {
            block_id: ctx.block_id,
            headline: &config.headline,
            description: &config.description,
            placeholder: &config.placeholder,
            button_text: &config.button_text,
            action: optional_url(&config.action),
            consent_text: &config.consent_text,
            landing_page_id: ctx.landing_page_id,
        },
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Email,
    Tel,
    Url,
    Number,
    Textarea,
    #[default]
    #[serde(other)]
    Text,
}

impl FieldType {
    fn input_type(self) -> &'static str {
        match self {
            FieldType::Email => "email",
            FieldType::Tel => "tel",
            FieldType::Url => "url",
            FieldType::Number => "number",
            FieldType::Text | FieldType::Textarea => "text",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormField {
    #[serde(deserialize_with = "display_text")]
    pub name: String,
    #[serde(deserialize_with = "display_text")]
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub required: bool,
    #[serde(deserialize_with = "display_text")]
    pub placeholder: String,
    /// Client-side validation pattern; dropped when it does not compile.
    pub pattern: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactFormConfig {
    pub title: String,
    pub description: String,
    pub submit_text: String,
    pub action: String,
    pub fields: Vec<FormField>,
}

impl Default for ContactFormConfig {
    fn default() -> Self {
        let field = |name: &str, label: &str, field_type: FieldType, required: bool| FormField {
            name: name.to_string(),
            label: label.to_string(),
            field_type,
            required,
            ..FormField::default()
        };
        Self {
            title: "Get in touch".to_string(),
            description: String::new(),
            submit_text: "Send".to_string(),
            action: String::new(),
            fields: vec![
                field("name", "Name", FieldType::Text, true),
                field("email", "Email", FieldType::Email, true),
                field("message", "Message", FieldType::Textarea, false),
            ],
        }
    }
}

struct FieldView<'a> {
    id: String,
    name: &'a str,
    label: &'a str,
    input_type: &'static str,
    multiline: bool,
    required: bool,
    placeholder: &'a str,
    pattern: Option<&'a str>,
}

#[derive(Template)]
#[template(path = "blocks/contact_form.html")]
struct ContactFormTemplate<'a> {
    title: &'a str,
    description: &'a str,
    submit_text: &'a str,
    action: Option<String>,
    fields: Vec<FieldView<'a>>,
    landing_page_id: Option<&'a str>,
}

/// Keep `pattern` only when it compiles. A bad pattern disables validation
/// for that one field; the form still renders.
fn validated_pattern<'a>(ctx: &RenderContext<'_>, field: &'a FormField) -> Option<&'a str> {
    let pattern = field.pattern.as_deref()?.trim();
    if pattern.is_empty() {
        return None;
    }
    match Regex::new(pattern) {
        Ok(_) => Some(pattern),
        Err(err) => {
            warn!(
                target = "presentation::renderers::forms",
                block_id = ctx.block_id,
                slug = ctx.slug,
                field = %field.name,
                error = %err,
                "invalid field pattern; validation skipped for field"
            );
            None
        }
    }
}

fn render_contact_form(
    config: &ContactFormConfig,
    ctx: &RenderContext<'_>,
) -> Result<String, RenderError> {
    let fields = config
        .fields
        .iter()
        .filter(|field| !field.name.trim().is_empty())
        .map(|field| FieldView {
            id: format!("{}-{}", ctx.block_id, field.name.trim()),
            name: field.name.trim(),
            label: if field.label.is_empty() {
                field.name.trim()
            } else {
                &field.label
            },
            input_type: field.field_type.input_type(),
            multiline: field.field_type == FieldType::Textarea,
            required: field.required,
            placeholder: &field.placeholder,
            pattern: validated_pattern(ctx, field),
        })
        .collect();

    render_template(
        ctx.slug,
        ContactFormTemplate {
            title: &config.title,
            description: &config.description,
            submit_text: &config.submit_text,
            action: optional_url(&config.action),
            fields,
            landing_page_id: ctx.landing_page_id,
        },
    )
}

pub(super) fn register(registry: &mut RendererRegistry) -> Result<(), RegistryError> {
    registry.register(
        &["newsletter-signup", "email-capture"],
        TypedRenderer::<NewsletterSignupConfig, _>::new(render_newsletter_signup),
    )?;
    registry.register(
        &["contact-form", "lead-form"],
        TypedRenderer::<ContactFormConfig, _>::new(render_contact_form),
    )?;
    Ok(())
}
