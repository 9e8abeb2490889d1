use crate::dialect::Dialect;
use crate::document::RenderedHtml;
use crate::export::{DocumentExporter, ExportArtifact};
use crate::i18n::LocalizationTable;
use crate::presentation::PresentationOptions;
use crate::subtype::DocumentSubtype;
use std::sync::Arc;
use transform2pdf_traits::Transformer;

/// Shared, read-only state for all conversions. Created once by the
/// `PipelineBuilder`.
pub struct PipelineContext {
    pub transformer: Arc<dyn Transformer>,
    pub exporter: DocumentExporter,
    pub localization: Arc<LocalizationTable>,
    pub presentation: PresentationOptions,
}

/// One document to convert, with optional per-request overrides.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    pub content: String,
    pub file_name: String,
    pub language: Option<String>,
    pub show_ids: Option<bool>,
    pub dialect: Option<Dialect>,
}

impl ConversionRequest {
    pub fn new(content: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            file_name: file_name.into(),
            language: None,
            show_ids: None,
            dialect: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_show_ids(mut self, show_ids: bool) -> Self {
        self.show_ids = Some(show_ids);
        self
    }

    /// Skips root element classification.
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = Some(dialect);
        self
    }
}

/// Result of [`render_html`](super::ConversionPipeline::render_html).
#[derive(Debug, Clone)]
pub struct HtmlPreview {
    pub dialect: Dialect,
    pub subtype: DocumentSubtype,
    pub language: String,
    pub html: RenderedHtml,
}

/// Result of [`convert`](super::ConversionPipeline::convert). The PDF is
/// removed when the artifact is dropped.
#[derive(Debug)]
pub struct Conversion {
    pub dialect: Dialect,
    pub subtype: DocumentSubtype,
    pub language: String,
    pub artifact: ExportArtifact,
}
