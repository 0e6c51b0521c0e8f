//! Landing page documents on disk.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::domain::blocks::{Block, LandingPage};

use super::error::InfraError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Toml,
}

impl DocumentFormat {
    /// `.toml` selects TOML; every other extension is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => DocumentFormat::Toml,
            _ => DocumentFormat::Json,
        }
    }
}

/// A page document may be a full page record or a bare list of blocks.
#[derive(Deserialize)]
#[serde(untagged)]
enum PageDocument {
    Page(LandingPage),
    Blocks(Vec<Block>),
}

impl From<PageDocument> for LandingPage {
    fn from(document: PageDocument) -> Self {
        match document {
            PageDocument::Page(page) => page,
            PageDocument::Blocks(blocks) => LandingPage {
                blocks,
                ..LandingPage::default()
            },
        }
    }
}

pub fn load_landing_page(path: &Path) -> Result<LandingPage, InfraError> {
    let text = fs::read_to_string(path).map_err(|err| InfraError::input(path, err))?;
    let format = DocumentFormat::from_path(path);
    let page = parse_landing_page(&text, format).map_err(|err| InfraError::input(path, err))?;

    debug!(
        target = "infra::input",
        path = %path.display(),
        blocks = page.blocks.len(),
        "landing page document loaded"
    );
    Ok(page)
}

pub fn parse_landing_page(
    text: &str,
    format: DocumentFormat,
) -> Result<LandingPage, Box<dyn std::error::Error + Send + Sync>> {
    let document: PageDocument = match format {
        DocumentFormat::Json => serde_json::from_str(text)?,
        DocumentFormat::Toml => toml::from_str(text)?,
    };
    Ok(document.into())
}
