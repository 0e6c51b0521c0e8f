//! Page composition: an ordered fold of the dispatcher over a page's blocks.

use std::time::Instant;

use askama::Template;
use metrics::histogram;
use serde::Serialize;
use tracing::{debug, error};

use crate::domain::blocks::LandingPage;
use crate::presentation::views::LandingPageTemplate;

use super::dispatch::BlockDispatcher;
use super::escape::escape;
use super::types::{RenderPath, RenderedBlock};

pub const METRIC_PAGE_RENDER_MS: &str = "storefront_blocks_page_render_ms";

const DEFAULT_PAGE_TITLE: &str = "Landing page";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedPage {
    pub landing_page_id: Option<String>,
    pub title: Option<String>,
    /// Per-block results, in page order.
    pub blocks: Vec<RenderedBlock>,
    /// Concatenated block wrappers, in page order.
    pub html: String,
}

impl RenderedPage {
    /// Number of blocks that rendered through the given path.
    pub fn count(&self, path: RenderPath) -> usize {
        self.blocks.iter().filter(|block| block.path == path).count()
    }

    /// Blocks that degraded to a visible notice.
    pub fn degraded(&self) -> impl Iterator<Item = &RenderedBlock> {
        self.blocks
            .iter()
            .filter(|block| matches!(block.path, RenderPath::Placeholder | RenderPath::Failed))
    }

    /// Full HTML document around the composed blocks.
    pub fn document(&self) -> String {
        let title = self.title.as_deref().unwrap_or(DEFAULT_PAGE_TITLE);
        let template = LandingPageTemplate {
            title,
            landing_page_id: self.landing_page_id.as_deref(),
            body: &self.html,
        };
        template.render().unwrap_or_else(|err| {
            error!(
                target = "application::render::page",
                error = %err,
                "document template failed; emitting minimal document"
            );
            format!(
                "<!DOCTYPE html><html><head><title>{}</title></head><body>{}</body></html>",
                escape(title),
                self.html
            )
        })
    }
}

/// Render every block of `page` in order. Never aborts on a bad block.
pub fn compose_page(dispatcher: &BlockDispatcher, page: &LandingPage) -> RenderedPage {
    let started = Instant::now();
    let landing_page_id = page.id.as_deref();

    let blocks: Vec<RenderedBlock> = page
        .blocks
        .iter()
        .map(|block| dispatcher.render(block, landing_page_id))
        .collect();

    let html = blocks
        .iter()
        .map(|block| block.html.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_PAGE_RENDER_MS).record(elapsed_ms);
    debug!(
        target = "application::render::page",
        landing_page_id,
        blocks = blocks.len(),
        elapsed_ms,
        "landing page composed"
    );

    RenderedPage {
        landing_page_id: page.id.clone(),
        title: page.title.clone(),
        blocks,
        html,
    }
}
