//! Configuration layer: typed settings with layered precedence (file → env → CLI).

mod cli;

use std::str::FromStr;

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

use crate::application::render::{
    DEFAULT_DESKTOP_HIDE, DEFAULT_MOBILE_HIDE, DEFAULT_TABLET_HIDE, DEFAULT_WRAPPER_CLASS,
};

pub use cli::{CliArgs, Command, GlobalOverrides, RenderArgs, TemplatesArgs};

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "storefront-blocks";
const ENV_PREFIX: &str = "STOREFRONT_BLOCKS";

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub render: RenderSettings,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone)]
pub struct RenderSettings {
    pub wrapper_class: String,
    pub visibility: VisibilitySettings,
    pub sanitize_fallback: bool,
}

/// Class fragments emitted for each hide flag.
#[derive(Debug, Clone)]
pub struct VisibilitySettings {
    pub mobile: String,
    pub tablet: String,
    pub desktop: String,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.apply_overrides(&cli.overrides);

    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    logging: RawLoggingSettings,
    render: RawRenderSettings,
}

impl RawSettings {
    fn apply_overrides(&mut self, overrides: &GlobalOverrides) {
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
        if let Some(sanitize) = overrides.sanitize_fallback {
            self.render.sanitize_fallback = Some(sanitize);
        }
        if let Some(class) = overrides.wrapper_class.as_ref() {
            self.render.wrapper_class = Some(class.clone());
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings { logging, render } = raw;

        let logging = build_logging_settings(logging)?;
        let render = build_render_settings(render)?;

        Ok(Self { logging, render })
    }
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_render_settings(render: RawRenderSettings) -> Result<RenderSettings, LoadError> {
    let wrapper_class = match render.wrapper_class {
        Some(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Err(LoadError::invalid(
                    "render.wrapper_class",
                    "class must not be empty",
                ));
            }
            if trimmed.chars().any(char::is_whitespace) {
                return Err(LoadError::invalid(
                    "render.wrapper_class",
                    "class must be a single token",
                ));
            }
            trimmed.to_string()
        }
        None => DEFAULT_WRAPPER_CLASS.to_string(),
    };

    let RawVisibilitySettings {
        mobile,
        tablet,
        desktop,
    } = render.visibility;
    let visibility = VisibilitySettings {
        mobile: class_fragment(mobile, DEFAULT_MOBILE_HIDE, "render.visibility.mobile")?,
        tablet: class_fragment(tablet, DEFAULT_TABLET_HIDE, "render.visibility.tablet")?,
        desktop: class_fragment(desktop, DEFAULT_DESKTOP_HIDE, "render.visibility.desktop")?,
    };

    Ok(RenderSettings {
        wrapper_class,
        visibility,
        sanitize_fallback: render.sanitize_fallback.unwrap_or(false),
    })
}

fn class_fragment(
    value: Option<String>,
    default: &str,
    key: &'static str,
) -> Result<String, LoadError> {
    match value {
        Some(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                Err(LoadError::invalid(key, "class fragment must not be empty"))
            } else {
                Ok(trimmed.to_string())
            }
        }
        None => Ok(default.to_string()),
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawRenderSettings {
    wrapper_class: Option<String>,
    visibility: RawVisibilitySettings,
    sanitize_fallback: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawVisibilitySettings {
    mobile: Option<String>,
    tablet: Option<String>,
    desktop: Option<String>,
}

/// Resolve configuration using the supplied CLI arguments, returning both for downstream use.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}
