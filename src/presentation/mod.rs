//! HTML surface: askama views and the built-in block renderers.

pub mod renderers;
pub mod views;
