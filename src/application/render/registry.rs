//! Slug → renderer lookup table.
//!
//! Several slugs may share one renderer (aliases); each slug maps to exactly
//! one renderer. Lookups are exact and case-sensitive.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use metrics::counter;
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

use super::types::{BlockRenderer, RenderContext, RenderError};

pub const METRIC_CONFIG_FALLBACK: &str = "storefront_blocks_config_fallback_total";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("slug `{slug}` is already registered")]
    DuplicateSlug { slug: String },
    #[error("slug `{slug}` is not registered")]
    UnknownSlug { slug: String },
    #[error("slug must not be blank")]
    BlankSlug,
    #[error("a renderer must be registered under at least one slug")]
    NoSlugs,
}

/// Slugs sharing one renderer, in registration order. The first is canonical.
#[derive(Debug, Clone, Copy)]
pub struct RegistryEntry<'a> {
    pub slugs: &'a [String],
}

impl<'a> RegistryEntry<'a> {
    pub fn canonical(&self) -> &'a str {
        self.slugs.first().map(String::as_str).unwrap_or_default()
    }

    pub fn aliases(&self) -> &'a [String] {
        self.slugs.get(1..).unwrap_or_default()
    }
}

#[derive(Default)]
pub struct RendererRegistry {
    renderers: Vec<Arc<dyn BlockRenderer>>,
    slugs_by_renderer: Vec<Vec<String>>,
    index: HashMap<String, usize>,
}

impl RendererRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with every built-in leaf renderer.
    pub fn with_builtin_renderers() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        crate::presentation::renderers::register_builtin(&mut registry)?;
        Ok(registry)
    }

    /// Bind `renderer` to every slug in `slugs`. Nothing is registered when
    /// any slug is blank or already taken.
    pub fn register<R>(&mut self, slugs: &[&str], renderer: R) -> Result<(), RegistryError>
    where
        R: BlockRenderer + 'static,
    {
        if slugs.is_empty() {
            return Err(RegistryError::NoSlugs);
        }
        for (position, slug) in slugs.iter().enumerate() {
            self.check_available(slug)?;
            if slugs[..position].contains(slug) {
                return Err(RegistryError::DuplicateSlug {
                    slug: (*slug).to_string(),
                });
            }
        }

        let id = self.renderers.len();
        self.renderers.push(Arc::new(renderer));
        self.slugs_by_renderer
            .push(slugs.iter().map(|slug| (*slug).to_string()).collect());
        for slug in slugs {
            self.index.insert((*slug).to_string(), id);
        }
        Ok(())
    }

    /// Bind `alias` to the renderer already registered under `existing`.
    pub fn alias(&mut self, existing: &str, alias: &str) -> Result<(), RegistryError> {
        let id = *self
            .index
            .get(existing)
            .ok_or_else(|| RegistryError::UnknownSlug {
                slug: existing.to_string(),
            })?;
        self.check_available(alias)?;
        self.slugs_by_renderer[id].push(alias.to_string());
        self.index.insert(alias.to_string(), id);
        Ok(())
    }

    pub fn resolve(&self, slug: &str) -> Option<&dyn BlockRenderer> {
        self.index
            .get(slug)
            .map(|&id| self.renderers[id].as_ref())
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.index.contains_key(slug)
    }

    /// True when both slugs resolve to the same renderer.
    pub fn shares_renderer(&self, left: &str, right: &str) -> bool {
        match (self.index.get(left), self.index.get(right)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Number of registered slugs, aliases included.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Every registered slug, sorted.
    pub fn slugs(&self) -> Vec<&str> {
        let mut slugs: Vec<&str> = self.index.keys().map(String::as_str).collect();
        slugs.sort_unstable();
        slugs
    }

    /// Renderers with their slugs, in registration order.
    pub fn entries(&self) -> impl Iterator<Item = RegistryEntry<'_>> {
        self.slugs_by_renderer
            .iter()
            .map(|slugs| RegistryEntry { slugs })
    }

    fn check_available(&self, slug: &str) -> Result<(), RegistryError> {
        if slug.trim().is_empty() {
            return Err(RegistryError::BlankSlug);
        }
        if self.index.contains_key(slug) {
            return Err(RegistryError::DuplicateSlug {
                slug: slug.to_string(),
            });
        }
        Ok(())
    }
}

/// Adapts a function over a typed configuration struct into a [`BlockRenderer`].
///
/// The untyped document is decoded here, at the registry boundary. A document
/// that does not fit the schema falls back to `C::default()`, so absent or
/// malformed configuration degrades to placeholder content.
pub struct TypedRenderer<C, F> {
    render: F,
    _config: PhantomData<fn() -> C>,
}

impl<C, F> TypedRenderer<C, F>
where
    C: DeserializeOwned + Default,
    F: Fn(&C, &RenderContext<'_>) -> Result<String, RenderError> + Send + Sync,
{
    pub fn new(render: F) -> Self {
        Self {
            render,
            _config: PhantomData,
        }
    }
}

impl<C, F> BlockRenderer for TypedRenderer<C, F>
where
    C: DeserializeOwned + Default,
    F: Fn(&C, &RenderContext<'_>) -> Result<String, RenderError> + Send + Sync,
{
    fn render(&self, ctx: &RenderContext<'_>) -> Result<String, RenderError> {
        let config = decode_config::<C>(ctx);
        (self.render)(&config, ctx)
    }
}

/// Decode a block's configuration into `C`, defaulting on mismatch.
pub fn decode_config<C>(ctx: &RenderContext<'_>) -> C
where
    C: DeserializeOwned + Default,
{
    if ctx.config.is_null() {
        return C::default();
    }

    match C::deserialize(ctx.config) {
        Ok(config) => config,
        Err(error) => {
            warn!(
                target = "application::render::registry",
                block_id = ctx.block_id,
                slug = ctx.slug,
                error = %error,
                "block configuration does not match renderer schema; using defaults"
            );
            counter!(METRIC_CONFIG_FALLBACK, "slug" => ctx.slug.to_string()).increment(1);
            C::default()
        }
    }
}

static BLOCK_REGISTRY: Lazy<Arc<RendererRegistry>> = Lazy::new(|| {
    Arc::new(
        RendererRegistry::with_builtin_renderers()
            .expect("built-in renderer slugs must be unique"),
    )
});

/// Access the shared registry of built-in renderers, built on first use.
pub fn block_registry() -> Arc<RendererRegistry> {
    Arc::clone(&BLOCK_REGISTRY)
}
