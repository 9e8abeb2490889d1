//! HTML presentation of XR documents.
//!
//! The presentation stylesheet is the most parameter-sensitive step: a label
//! set built for the wrong subtype renders without complaint but with the
//! wrong labels. [`PresentationRenderer`] therefore refuses mismatched
//! parameters instead of passing them on.

use crate::document::{CanonicalDocument, RenderedHtml};
use crate::error::PipelineError;
use crate::i18n::{LabelSet, ORDER_OVERRIDE_KEYS};
use crate::subtype::DocumentSubtype;
use log::debug;
use transform2pdf_traits::{Stylesheet, TransformError, TransformParams, Transformer};

pub const PARAM_IS_ORDER: &str = "isOrder";
pub const PARAM_SHOW_IDS: &str = "showIds";
pub const PARAM_I18N: &str = "i18n";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PresentationOptions {
    /// Show the internal business term ids (BT-1, BG-22, ...) next to labels.
    pub show_ids: bool,
}

pub struct PresentationRenderer<'a> {
    transformer: &'a dyn Transformer,
}

impl<'a> PresentationRenderer<'a> {
    pub fn new(transformer: &'a dyn Transformer) -> Self {
        Self { transformer }
    }

    /// Builds the named stylesheet parameters.
    pub fn params(
        subtype: DocumentSubtype,
        labels: &LabelSet,
        options: PresentationOptions,
    ) -> Result<TransformParams, PipelineError> {
        if labels.subtype() != subtype {
            return Err(PipelineError::ParameterMismatch(format!(
                "label set was built for a {} document but the document is {}",
                labels.subtype(),
                subtype
            )));
        }
        if let Some(missing) = ORDER_OVERRIDE_KEYS.iter().find(|k| labels.get(k).is_none()) {
            return Err(PipelineError::ParameterMismatch(format!(
                "label set '{}' has no label for '{}'",
                labels.language(),
                missing
            )));
        }

        Ok(TransformParams::new()
            .with(PARAM_IS_ORDER, subtype.is_order())
            .with(PARAM_SHOW_IDS, options.show_ids)
            .with(PARAM_I18N, labels.as_map().clone()))
    }

    pub async fn render(
        &self,
        canonical: &CanonicalDocument,
        subtype: DocumentSubtype,
        labels: &LabelSet,
        options: PresentationOptions,
    ) -> Result<RenderedHtml, PipelineError> {
        let params = Self::params(subtype, labels, options)?;

        debug!(
            "Rendering {} document as HTML ({} labels, language '{}').",
            subtype,
            labels.len(),
            labels.language()
        );
        let html = self
            .transformer
            .apply(Stylesheet::XrToHtml, canonical.as_str(), &params)
            .await?;

        if html.trim().is_empty() {
            return Err(TransformError::EmptyOutput {
                stylesheet: Stylesheet::XrToHtml.id().to_string(),
            }
            .into());
        }
        Ok(RenderedHtml::new(html))
    }
}
