//! HtmlRenderer trait for abstracting the HTML-to-PDF engine.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::path::Path;
use thiserror::Error;

/// Error type for the export stage.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    #[error("Rendering backend '{backend}' failed: {message}")]
    Backend { backend: String, message: String },

    #[error("Rendered artifact is not a valid PDF: {0}")]
    InvalidArtifact(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::Io(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSize {
    #[default]
    A4,
    A3,
    A5,
    Letter,
    Legal,
}

impl PageSize {
    pub fn as_str(self) -> &'static str {
        match self {
            PageSize::A4 => "A4",
            PageSize::A3 => "A3",
            PageSize::A5 => "A5",
            PageSize::Letter => "Letter",
            PageSize::Legal => "Legal",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Portrait => "Portrait",
            Orientation::Landscape => "Landscape",
        }
    }
}

/// Page setup handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub page_size: PageSize,
    pub orientation: Orientation,
    pub margin_mm: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            orientation: Orientation::Portrait,
            margin_mm: 10,
        }
    }
}

/// A trait for rendering HTML into a paginated document.
///
/// The renderer writes into a path owned by the caller; it must not keep a
/// reference to that path after returning.
#[async_trait]
pub trait HtmlRenderer: Send + Sync + Debug {
    async fn render_to_file(
        &self,
        html: &str,
        output: &Path,
        options: &RenderOptions,
    ) -> Result<(), ExportError>;

    /// Returns a human-readable name for this renderer (for logging/debugging).
    fn name(&self) -> &'static str;
}
