use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Read-only inputs handed to a renderer for one block.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub block_id: &'a str,
    pub slug: &'a str,
    /// Untyped configuration document; never mutated by the pipeline.
    pub config: &'a Value,
    /// Owning page, forwarded to renderers that attribute submissions.
    pub landing_page_id: Option<&'a str>,
}

impl<'a> RenderContext<'a> {
    pub fn new(block_id: &'a str, slug: &'a str, config: &'a Value) -> Self {
        Self {
            block_id,
            slug,
            config,
            landing_page_id: None,
        }
    }

    pub fn with_landing_page_id(mut self, landing_page_id: Option<&'a str>) -> Self {
        self.landing_page_id = landing_page_id;
        self
    }
}

/// Which branch of the dispatcher produced a block's inner content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderPath {
    /// A registered renderer handled the slug.
    Compiled,
    /// No renderer; the template's own markup was interpolated.
    Interpolated,
    /// Neither a renderer nor markup exists; a notice was emitted.
    Placeholder,
    /// The renderer failed and a notice was emitted in its place.
    Failed,
}

impl RenderPath {
    pub fn as_str(self) -> &'static str {
        match self {
            RenderPath::Compiled => "compiled",
            RenderPath::Interpolated => "interpolated",
            RenderPath::Placeholder => "placeholder",
            RenderPath::Failed => "failed",
        }
    }
}

/// Wrapped output for one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedBlock {
    pub block_id: String,
    /// Slug as resolved for dispatch, mirrored in `data-template-slug`.
    pub slug: String,
    pub path: RenderPath,
    /// Wrapper markup, including the scoped style rule when present.
    pub html: String,
}

/// Failures raised by individual renderers. The dispatcher converts these
/// into visible placeholders; they never abort a page.
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    #[error("template rendering failed for `{slug}`: {message}")]
    Template { slug: String, message: String },
}

impl RenderError {
    pub fn template(slug: impl Into<String>, error: &askama::Error) -> Self {
        Self::Template {
            slug: slug.into(),
            message: error.to_string(),
        }
    }
}

/// A renderer bound to one or more slugs in the registry.
///
/// Implementations must be pure: the same context yields the same markup.
pub trait BlockRenderer: Send + Sync {
    fn render(&self, ctx: &RenderContext<'_>) -> Result<String, RenderError>;
}

impl<F> BlockRenderer for F
where
    F: Fn(&RenderContext<'_>) -> Result<String, RenderError> + Send + Sync,
{
    fn render(&self, ctx: &RenderContext<'_>) -> Result<String, RenderError> {
        self(ctx)
    }
}
