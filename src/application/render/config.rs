use once_cell::sync::OnceCell;
use thiserror::Error;

use super::visibility::VisibilityClasses;

pub const DEFAULT_WRAPPER_CLASS: &str = "landing-block";

/// Presentation knobs shared by every dispatcher built from settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPipelineConfig {
    /// Class always present on the block wrapper, ahead of visibility classes.
    pub wrapper_class: String,
    pub visibility: VisibilityClasses,
    /// Run interpolated fallback markup through the HTML sanitiser.
    pub sanitize_fallback: bool,
}

impl Default for RenderPipelineConfig {
    fn default() -> Self {
        Self {
            wrapper_class: DEFAULT_WRAPPER_CLASS.to_string(),
            visibility: VisibilityClasses::default(),
            sanitize_fallback: false,
        }
    }
}

impl From<&crate::config::RenderSettings> for RenderPipelineConfig {
    fn from(settings: &crate::config::RenderSettings) -> Self {
        Self {
            wrapper_class: settings.wrapper_class.clone(),
            visibility: VisibilityClasses {
                mobile: settings.visibility.mobile.clone(),
                tablet: settings.visibility.tablet.clone(),
                desktop: settings.visibility.desktop.clone(),
            },
            sanitize_fallback: settings.sanitize_fallback,
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderConfigError {
    #[error("render pipeline already configured")]
    AlreadyConfigured,
}

static RENDER_PIPELINE_CONFIG: OnceCell<RenderPipelineConfig> = OnceCell::new();

/// Install the process-wide pipeline configuration. May only succeed once.
pub fn configure_render_pipeline(config: RenderPipelineConfig) -> Result<(), RenderConfigError> {
    RENDER_PIPELINE_CONFIG
        .set(config)
        .map_err(|_| RenderConfigError::AlreadyConfigured)
}

pub fn active_render_config() -> RenderPipelineConfig {
    RENDER_PIPELINE_CONFIG.get().cloned().unwrap_or_default()
}
