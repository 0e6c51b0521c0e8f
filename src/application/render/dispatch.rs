//! Per-block orchestration: resolve a renderer, fall back, then wrap.
//!
//! `BlockDispatcher::render` never fails. Every degraded case (unknown slug,
//! failing renderer, malformed configuration) becomes visible content inside
//! the normal wrapper so the rest of the page still renders.

use std::sync::Arc;

use ammonia::Builder as AmmoniaBuilder;
use metrics::counter;
use tracing::{error, info, trace};

use crate::domain::blocks::Block;
use crate::presentation::views::{self, PlaceholderKind};

use super::config::RenderPipelineConfig;
use super::interpolate::interpolate;
use super::registry::RendererRegistry;
use super::sanitize::build_fallback_sanitizer;
use super::style::ScopedStyle;
use super::types::{RenderContext, RenderPath, RenderedBlock};

pub const METRIC_BLOCKS_RENDERED: &str = "storefront_blocks_rendered_total";

pub struct BlockDispatcher {
    registry: Arc<RendererRegistry>,
    config: RenderPipelineConfig,
    sanitizer: Option<AmmoniaBuilder<'static>>,
}

impl BlockDispatcher {
    pub fn new(registry: Arc<RendererRegistry>, config: RenderPipelineConfig) -> Self {
        let sanitizer = config.sanitize_fallback.then(build_fallback_sanitizer);
        Self {
            registry,
            config,
            sanitizer,
        }
    }

    pub fn registry(&self) -> &RendererRegistry {
        &self.registry
    }

    pub fn config(&self) -> &RenderPipelineConfig {
        &self.config
    }

    /// Render one block into its wrapper. Pure in `block` and the registry.
    pub fn render(&self, block: &Block, landing_page_id: Option<&str>) -> RenderedBlock {
        let slug = block.slug();
        let (path, inner) = self.render_inner(block, landing_page_id);

        let class = self.wrapper_class(block);
        let style = ScopedStyle::for_block(&block.id, block.custom_css.as_deref());
        let html = views::render_block_wrapper(&block.id, slug, &class, style.as_ref(), &inner);

        trace!(
            target = "application::render::dispatch",
            block_id = %block.id,
            slug,
            category = block.template_ref.category.as_str(),
            path = path.as_str(),
            "block rendered"
        );
        counter!(METRIC_BLOCKS_RENDERED, "path" => path.as_str()).increment(1);

        RenderedBlock {
            block_id: block.id.clone(),
            slug: slug.to_string(),
            path,
            html,
        }
    }

    fn render_inner(&self, block: &Block, landing_page_id: Option<&str>) -> (RenderPath, String) {
        let slug = block.slug();
        let template = &block.template_ref;

        if let Some(renderer) = self.registry.resolve(slug) {
            let ctx = RenderContext::new(&block.id, slug, &block.config)
                .with_landing_page_id(landing_page_id);
            return match renderer.render(&ctx) {
                Ok(html) => (RenderPath::Compiled, html),
                Err(err) => {
                    error!(
                        target = "application::render::dispatch",
                        block_id = %block.id,
                        slug,
                        error = %err,
                        "block renderer failed"
                    );
                    (
                        RenderPath::Failed,
                        views::render_placeholder(PlaceholderKind::Failed, &template.name),
                    )
                }
            };
        }

        if let Some(code) = template.component_code.as_deref() {
            let html = interpolate(code, &block.config);
            let html = match &self.sanitizer {
                Some(sanitizer) => sanitizer.clean(&html).to_string(),
                None => html,
            };
            return (RenderPath::Interpolated, html);
        }

        info!(
            target = "application::render::dispatch",
            block_id = %block.id,
            slug,
            template = %template.name,
            category = template.category.as_str(),
            "no renderer or fallback markup for template"
        );
        (
            RenderPath::Placeholder,
            views::render_placeholder(PlaceholderKind::NotImplemented, &template.name),
        )
    }

    fn wrapper_class(&self, block: &Block) -> String {
        let visibility = self.config.visibility.classes(
            block.hide_on_mobile,
            block.hide_on_tablet,
            block.hide_on_desktop,
            block.custom_classes.as_deref(),
        );
        if visibility.is_empty() {
            self.config.wrapper_class.clone()
        } else {
            format!("{} {}", self.config.wrapper_class, visibility)
        }
    }
}
