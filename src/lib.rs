//! # transform2pdf
//!
//! Renders XRechnung e-invoices and orders (UBL 2.1 Invoice/CreditNote,
//! UN/CEFACT CII and CIO) as PDF.
//!
//! The conversion itself lives in `transform2pdf-core`. This crate provides
//! the platform pieces:
//! - **adapters**: Saxon (XSLT 3) and wkhtmltopdf run as child processes
//! - **config**: File and environment configuration
//! - **server**: The HTTP service

pub mod adapters;
pub mod config;
pub mod server;

pub use config::AppConfig;
pub use transform2pdf_core::{
    Conversion, ConversionPipeline, ConversionRequest, Dialect, DocumentSubtype, HtmlPreview,
    PipelineError,
};

use adapters::{SaxonTransformer, WkHtmlToPdfRenderer};
use std::path::Path;
use std::sync::Arc;
use transform2pdf_core::LocalizationTable;
use transform2pdf_resource::FilesystemResourceProvider;
use transform2pdf_traits::ResourceProvider;

/// Wires the configured engines and translation tables into a pipeline.
pub fn build_pipeline(config: &AppConfig) -> Result<ConversionPipeline, PipelineError> {
    std::fs::create_dir_all(&config.work_dir)?;

    let stylesheets: Arc<dyn ResourceProvider> =
        Arc::new(FilesystemResourceProvider::new(&config.stylesheet_dir));
    let transformer = SaxonTransformer::new(
        config.saxon.program.clone(),
        config.saxon.args.clone(),
        stylesheets,
        &config.work_dir,
    );
    let renderer =
        WkHtmlToPdfRenderer::new(config.renderer.program.clone(), config.renderer.args.clone());

    let mut builder = ConversionPipeline::builder()
        .with_transformer(Arc::new(transformer))
        .with_renderer(Arc::new(renderer))
        .with_work_dir(&config.work_dir)
        .with_render_options(config.render_options())
        .with_default_language(&config.default_language)
        .with_show_ids(config.show_ids);

    if let Some(path) = &config.translations {
        builder = builder.with_localization(Arc::new(load_translations(path)?));
    }
    builder.build()
}

/// Loads a translation file through a provider rooted at its directory.
pub fn load_translations(path: &Path) -> Result<LocalizationTable, PipelineError> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| PipelineError::Config(format!("Invalid translations path '{}'", path.display())))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let provider = FilesystemResourceProvider::new(dir);
    Ok(LocalizationTable::from_provider(&provider, file_name)?)
}
