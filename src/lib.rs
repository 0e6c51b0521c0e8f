//! Landing-page block composition for the storefront.
//!
//! A landing page is an ordered list of [`domain::blocks::Block`]s. Each block
//! names a template slug; [`application::render::BlockDispatcher`] resolves the
//! slug against the renderer registry, falls back to escaped interpolation of
//! the block's own component code, and wraps the result with responsive
//! visibility classes and a scoped stylesheet.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
