//! Block rendering pipeline.
//!
//! Everything here is synchronous and pure: a block plus the immutable
//! registry fully determine its markup. Degraded blocks render as visible
//! notices instead of errors so one bad block never costs the whole page.

mod config;
mod dispatch;
mod escape;
mod interpolate;
mod page;
mod registry;
mod sanitize;
mod style;
mod types;
mod visibility;

pub use config::{
    DEFAULT_WRAPPER_CLASS, RenderConfigError, RenderPipelineConfig, active_render_config,
    configure_render_pipeline,
};
pub use dispatch::BlockDispatcher;
pub use escape::escape;
pub use interpolate::{interpolate, tokens};
pub(crate) use interpolate::value_to_text;
pub use page::{RenderedPage, compose_page};
pub use registry::{
    RegistryEntry, RegistryError, RendererRegistry, TypedRenderer, block_registry, decode_config,
};
pub use style::{BLOCK_ID_ATTRIBUTE, ScopedStyle, is_unsafe_url, normalize_url, selector_for};
pub use types::{BlockRenderer, RenderContext, RenderError, RenderPath, RenderedBlock};
pub use visibility::{
    DEFAULT_DESKTOP_HIDE, DEFAULT_MOBILE_HIDE, DEFAULT_TABLET_HIDE, VisibilityClasses,
    visibility_classes,
};

/// Metric names emitted by the pipeline.
pub mod metric_names {
    pub use super::dispatch::METRIC_BLOCKS_RENDERED;
    pub use super::page::METRIC_PAGE_RENDER_MS;
    pub use super::registry::METRIC_CONFIG_FALLBACK;
}
