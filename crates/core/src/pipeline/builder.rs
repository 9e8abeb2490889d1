use super::context::PipelineContext;
use super::orchestrator::ConversionPipeline;
use crate::error::PipelineError;
use crate::export::DocumentExporter;
use crate::i18n::LocalizationTable;
use crate::presentation::PresentationOptions;
use std::path::PathBuf;
use std::sync::Arc;
use transform2pdf_traits::{HtmlRenderer, RenderOptions, Transformer};

/// A builder for creating a `ConversionPipeline`.
#[derive(Default)]
pub struct PipelineBuilder {
    transformer: Option<Arc<dyn Transformer>>,
    renderer: Option<Arc<dyn HtmlRenderer>>,
    localization: Option<Arc<LocalizationTable>>,
    work_dir: Option<PathBuf>,
    render_options: RenderOptions,
    default_language: Option<String>,
    show_ids: bool,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// The XSLT engine used for both the structural and the presentation step.
    pub fn with_transformer(mut self, transformer: Arc<dyn Transformer>) -> Self {
        self.transformer = Some(transformer);
        self
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn HtmlRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Replaces the embedded translation tables.
    pub fn with_localization(mut self, localization: Arc<LocalizationTable>) -> Self {
        self.localization = Some(localization);
        self
    }

    /// Directory for PDF artifacts. Defaults to the system temp directory.
    pub fn with_work_dir(mut self, work_dir: impl Into<PathBuf>) -> Self {
        self.work_dir = Some(work_dir.into());
        self
    }

    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    pub fn with_default_language(mut self, language: impl Into<String>) -> Self {
        self.default_language = Some(language.into());
        self
    }

    pub fn with_show_ids(mut self, show_ids: bool) -> Self {
        self.show_ids = show_ids;
        self
    }

    pub fn build(self) -> Result<ConversionPipeline, PipelineError> {
        let transformer = self.transformer.ok_or_else(|| {
            PipelineError::Config(
                "No transformer has been configured. Use `with_transformer`.".to_string(),
            )
        })?;
        let renderer = self.renderer.ok_or_else(|| {
            PipelineError::Config(
                "No HTML renderer has been configured. Use `with_renderer`.".to_string(),
            )
        })?;

        let mut localization = match self.localization {
            Some(localization) => localization,
            None => LocalizationTable::embedded()?,
        };
        if let Some(language) = self.default_language
            && language != localization.default_language()
        {
            let table = LocalizationTable::clone(&localization).with_default_language(&language)?;
            localization = Arc::new(table);
        }

        let work_dir = self.work_dir.unwrap_or_else(std::env::temp_dir);
        std::fs::create_dir_all(&work_dir)?;

        log::info!(
            "Pipeline ready: transformer={}, renderer={}, languages=[{}], default='{}'.",
            transformer.name(),
            renderer.name(),
            localization.languages().collect::<Vec<_>>().join(", "),
            localization.default_language()
        );

        let exporter = DocumentExporter::new(renderer, work_dir).with_options(self.render_options);
        Ok(ConversionPipeline::new(PipelineContext {
            transformer,
            exporter,
            localization,
            presentation: PresentationOptions {
                show_ids: self.show_ids,
            },
        }))
    }
}
