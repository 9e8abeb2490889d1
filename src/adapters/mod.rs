//! Concrete engines behind the `Transformer` and `HtmlRenderer` ports.

pub mod saxon;
pub mod wkhtmltopdf;

pub use saxon::SaxonTransformer;
pub use wkhtmltopdf::WkHtmlToPdfRenderer;
