//! Port traits for the transform2pdf pipeline.
//!
//! The pipeline never talks to an XSLT processor, a PDF engine or the
//! filesystem directly. It goes through the traits defined here so that the
//! concrete engines can be swapped out (or replaced by test doubles):
//!
//! - [`Transformer`]: applies a [`Stylesheet`] to XML text
//! - [`HtmlRenderer`]: renders HTML into a fixed-layout file
//! - [`ResourceProvider`]: loads stylesheets and translation tables

pub mod render;
pub mod resource;
pub mod transform;

pub use render::{ExportError, HtmlRenderer, Orientation, PageSize, RenderOptions};
pub use resource::{InMemoryResourceProvider, ResourceError, ResourceProvider, SharedResourceData};
pub use transform::{ParamValue, Stylesheet, TransformError, TransformParams, Transformer};
