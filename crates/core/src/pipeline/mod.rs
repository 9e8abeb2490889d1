//! Conversion pipeline orchestration.
//!
//! - [`PipelineBuilder`]: Fluent builder wiring the ports into a pipeline
//! - [`ConversionPipeline`]: Runs classification, both transforms and the export
//! - [`Stage`]: The states a single conversion passes through
//!
//! # Example
//!
//! ```ignore
//! use transform2pdf_core::pipeline::{ConversionPipeline, ConversionRequest};
//!
//! let pipeline = ConversionPipeline::builder()
//!     .with_transformer(transformer)
//!     .with_renderer(renderer)
//!     .build()?;
//!
//! let conversion = pipeline
//!     .convert(ConversionRequest::new(xml, "invoice.xml"))
//!     .await?;
//! conversion.artifact.persist("invoice.pdf")?;
//! ```

mod builder;
pub mod context;
mod orchestrator;
pub mod stage;

pub use builder::PipelineBuilder;
pub use context::{Conversion, ConversionRequest, HtmlPreview, PipelineContext};
pub use orchestrator::ConversionPipeline;
pub use stage::{Stage, StageTrace};
