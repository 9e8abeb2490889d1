use super::builder::PipelineBuilder;
use super::context::{Conversion, ConversionRequest, HtmlPreview, PipelineContext};
use super::stage::{Stage, StageTrace};
use crate::dialect::{Classification, DialectClassifier};
use crate::document::SourceDocument;
use crate::error::{ClassificationError, PipelineError};
use crate::i18n::LocalizationTable;
use crate::normalizer::StructuralNormalizer;
use crate::presentation::{PresentationOptions, PresentationRenderer};
use crate::subtype::SubtypeResolver;
use log::info;
use std::sync::Arc;

/// The conversion pipeline. Cheap to clone; every clone shares one context.
#[derive(Clone)]
pub struct ConversionPipeline {
    context: Arc<PipelineContext>,
}

impl ConversionPipeline {
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    pub(super) fn new(context: PipelineContext) -> Self {
        Self {
            context: Arc::new(context),
        }
    }

    pub fn context(&self) -> &PipelineContext {
        &self.context
    }

    pub fn localization(&self) -> &LocalizationTable {
        &self.context.localization
    }

    /// Renders the document to HTML without exporting it.
    pub async fn render_html(
        &self,
        request: &ConversionRequest,
    ) -> Result<HtmlPreview, PipelineError> {
        let mut trace = StageTrace::start(&request.file_name);
        let result = self.run_to_html(request, &mut trace).await;
        if let Err(err) = &result {
            trace.fail(err);
        }
        result
    }

    /// Runs the full conversion. The returned artifact owns the PDF file.
    pub async fn convert(&self, request: ConversionRequest) -> Result<Conversion, PipelineError> {
        let mut trace = StageTrace::start(&request.file_name);
        match self.run_to_pdf(&request, &mut trace).await {
            Ok(mut conversion) => {
                info!(
                    "Converted '{}' ({}, {}) to '{}' in {:.2?}.",
                    request.file_name,
                    conversion.dialect,
                    conversion.subtype,
                    conversion.artifact.file_name(),
                    trace.elapsed()
                );
                // Reaches `Cleaned` when the artifact is consumed or dropped.
                conversion.artifact.attach_trace(trace);
                Ok(conversion)
            }
            Err(err) => {
                trace.fail(&err);
                Err(err)
            }
        }
    }

    async fn run_to_pdf(
        &self,
        request: &ConversionRequest,
        trace: &mut StageTrace,
    ) -> Result<Conversion, PipelineError> {
        let preview = self.run_to_html(request, trace).await?;
        let artifact = self
            .context
            .exporter
            .export(&preview.html, &request.file_name)
            .await?;
        trace.advance(Stage::Exported);

        Ok(Conversion {
            dialect: preview.dialect,
            subtype: preview.subtype,
            language: preview.language,
            artifact,
        })
    }

    async fn run_to_html(
        &self,
        request: &ConversionRequest,
        trace: &mut StageTrace,
    ) -> Result<HtmlPreview, PipelineError> {
        let context = &*self.context;
        let source = SourceDocument::parse(request.content.as_str())?;

        let classification = match request.dialect {
            Some(dialect) => {
                info!("Using dialect override {} for <{}>.", dialect, source.root_element());
                Classification::for_dialect(dialect).ok_or_else(|| {
                    ClassificationError::Unrecognized {
                        root_element: source.root_element().to_string(),
                    }
                })?
            }
            None => DialectClassifier::classify(source.root_element())?,
        };
        trace.advance(Stage::Classified);

        let canonical = StructuralNormalizer::new(context.transformer.as_ref())
            .normalize(&source, classification.stylesheet)
            .await?;
        trace.advance(Stage::Normalized);

        let subtype = SubtypeResolver::resolve(&canonical, &source)?;
        trace.advance(Stage::SubtypeResolved);

        let language = request
            .language
            .as_deref()
            .unwrap_or_else(|| context.localization.default_language());
        let labels = context.localization.label_set(language, subtype)?;
        trace.advance(Stage::Localized);

        let options = PresentationOptions {
            show_ids: request.show_ids.unwrap_or(context.presentation.show_ids),
        };
        let html = PresentationRenderer::new(context.transformer.as_ref())
            .render(&canonical, subtype, &labels, options)
            .await?;
        trace.advance(Stage::Rendered);

        Ok(HtmlPreview {
            dialect: classification.dialect,
            subtype,
            language: labels.language().to_string(),
            html,
        })
    }
}
