use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

use crate::{
    application::render::{RegistryError, RenderConfigError},
    config::LoadError,
    infra::error::InfraError,
};

/// Flattened error chain for operator-facing output.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub source: &'static str,
    pub messages: Vec<String>,
}

impl ErrorReport {
    pub fn from_error(source: &'static str, error: &dyn StdError) -> Self {
        let mut messages = Vec::new();
        messages.push(error.to_string());
        let mut current = error.source();
        while let Some(inner) = current {
            messages.push(inner.to_string());
            current = inner.source();
        }
        Self { source, messages }
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut messages = self.messages.iter();
        if let Some(first) = messages.next() {
            write!(f, "{first}")?;
        }
        for cause in messages {
            write!(f, "\n  caused by: {cause}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] LoadError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    RenderConfig(#[from] RenderConfigError),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }

    /// Process exit status for the binary, following sysexits conventions.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Config(_) | AppError::RenderConfig(_) => 78,
            AppError::Infra(InfraError::Input { .. }) => 65,
            AppError::Infra(InfraError::Io(_)) => 74,
            AppError::Infra(InfraError::Telemetry(_)) => 70,
            AppError::Registry(_) | AppError::Unexpected(_) => 70,
        }
    }

    pub fn presentation_message(&self) -> &'static str {
        match self {
            AppError::Config(_) | AppError::RenderConfig(_) => "Configuration is invalid",
            AppError::Infra(InfraError::Input { .. }) => "Landing page document could not be read",
            AppError::Infra(InfraError::Io(_)) => "I/O failure",
            AppError::Infra(InfraError::Telemetry(_)) => "Logging subsystem could not start",
            AppError::Registry(_) => "Renderer registry is inconsistent",
            AppError::Unexpected(_) => "Unexpected error occurred",
        }
    }

    pub fn report(&self) -> ErrorReport {
        ErrorReport::from_error("application::error::AppError", self)
    }
}
