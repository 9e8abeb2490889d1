//! # transform2pdf-core
//!
//! Rendering of European e-invoices and orders (UBL 2.1, UN/CEFACT CII and
//! CIO) as PDF through a two-stage XSLT pipeline.
//!
//! - **dialect**: Root element classification into a source dialect
//! - **normalizer**: Structural transform into the intermediate XR format
//! - **subtype**: Order vs. invoice detection from the document type code
//! - **i18n**: Localized label tables with order overrides
//! - **presentation**: XR to HTML with named stylesheet parameters
//! - **export**: HTML to PDF into scoped temporary artifacts
//! - **pipeline**: The orchestrated conversion
//! - **error**: Error types for the pipeline
//!
//! ## Design Principle
//!
//! This crate does not run XSLT or lay out HTML itself and has no async
//! runtime. The engines are injected through the [`Transformer`] and
//! [`HtmlRenderer`] ports from `transform2pdf-traits`.

pub use transform2pdf_traits as traits;

pub mod dialect;
pub mod document;
pub mod error;
pub mod export;
pub mod i18n;
pub mod normalizer;
pub mod pipeline;
pub mod presentation;
pub mod subtype;

pub use dialect::{Classification, Dialect, DialectClassifier};
pub use document::{CanonicalDocument, RenderedHtml, SourceDocument};
pub use error::{ClassificationError, ErrorKind, LocalizationError, PipelineError};
pub use export::{DocumentExporter, ExportArtifact, artifact_file_name, display_file_name};
pub use i18n::{LabelSet, LocalizationTable};
pub use normalizer::StructuralNormalizer;
pub use pipeline::{
    Conversion, ConversionPipeline, ConversionRequest, HtmlPreview, PipelineBuilder, Stage,
};
pub use presentation::{PresentationOptions, PresentationRenderer};
pub use subtype::{DocumentSubtype, SubtypeResolver, TypeCode};

// Re-export the ports
pub use traits::{
    ExportError, HtmlRenderer, Orientation, PageSize, ParamValue, RenderOptions, ResourceError,
    ResourceProvider, Stylesheet, TransformError, TransformParams, Transformer,
};
