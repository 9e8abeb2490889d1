//! Structural normalization: source dialect to the intermediate XR format.

use crate::document::{CanonicalDocument, SourceDocument};
use log::debug;
use transform2pdf_traits::{Stylesheet, TransformError, TransformParams, Transformer};

pub struct StructuralNormalizer<'a> {
    transformer: &'a dyn Transformer,
}

impl<'a> StructuralNormalizer<'a> {
    pub fn new(transformer: &'a dyn Transformer) -> Self {
        Self { transformer }
    }

    /// Applies `stylesheet` once. Failures are returned as they are; the
    /// transforms are deterministic so there is nothing to retry.
    pub async fn normalize(
        &self,
        source: &SourceDocument,
        stylesheet: Stylesheet,
    ) -> Result<CanonicalDocument, TransformError> {
        if !stylesheet.is_structural() {
            return Err(TransformError::Engine {
                stylesheet: stylesheet.id().to_string(),
                message: "not a structural stylesheet".to_string(),
            });
        }

        debug!(
            "Normalizing <{}> with '{}' via {}.",
            source.root_element(),
            stylesheet,
            self.transformer.name()
        );
        let xml = self
            .transformer
            .apply(stylesheet, source.content(), &TransformParams::new())
            .await?;

        if xml.trim().is_empty() {
            return Err(TransformError::EmptyOutput {
                stylesheet: stylesheet.id().to_string(),
            });
        }
        Ok(CanonicalDocument::new(xml, stylesheet))
    }
}
