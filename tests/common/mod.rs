#![allow(dead_code)]

pub mod fixtures;
pub mod pdf_assertions;

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use transform2pdf::{AppConfig, ConversionPipeline};
use transform2pdf_core::{
    ExportError, HtmlRenderer, ParamValue, RenderOptions, Stylesheet, TransformError,
    TransformParams, Transformer,
};

pub const XR_NS: &str = "urn:ce.eu:en16931:2017:xoev-de:kosit:standard:xrechnung-1";

/// Transformer double. Structural stylesheets yield a small XR document,
/// the presentation stylesheet yields HTML echoing its parameters.
#[derive(Debug, Default)]
pub struct StubTransformer {
    calls: Mutex<Vec<(Stylesheet, TransformParams)>>,
    fail_on: Option<Stylesheet>,
}

impl StubTransformer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(stylesheet: Stylesheet) -> Self {
        Self {
            fail_on: Some(stylesheet),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<(Stylesheet, TransformParams)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn stylesheets(&self) -> Vec<Stylesheet> {
        self.calls().into_iter().map(|(s, _)| s).collect()
    }

    /// Parameters of the last presentation call.
    pub fn presentation_params(&self) -> Option<TransformParams> {
        self.calls()
            .into_iter()
            .rev()
            .find(|(s, _)| *s == Stylesheet::XrToHtml)
            .map(|(_, p)| p)
    }
}

#[async_trait]
impl Transformer for StubTransformer {
    async fn apply(
        &self,
        stylesheet: Stylesheet,
        _source: &str,
        params: &TransformParams,
    ) -> Result<String, TransformError> {
        self.calls.lock().unwrap().push((stylesheet, params.clone()));

        if self.fail_on == Some(stylesheet) {
            return Err(TransformError::Engine {
                stylesheet: stylesheet.id().to_string(),
                message: "XTDE0045: stub failure".to_string(),
            });
        }

        if stylesheet.is_structural() {
            return Ok(format!(
                r#"<xr:invoice xmlns:xr="{XR_NS}"><xr:Invoice_number>1</xr:Invoice_number></xr:invoice>"#
            ));
        }

        let is_order = matches!(params.get("isOrder"), Some(ParamValue::Bool(true)));
        let title = match params.get("i18n") {
            Some(ParamValue::Map(labels)) => labels.get("bt1").cloned().unwrap_or_default(),
            _ => String::new(),
        };
        Ok(format!(
            "<html><body data-order=\"{is_order}\"><h1>{title}</h1></body></html>"
        ))
    }

    fn name(&self) -> &'static str {
        "StubTransformer"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Pdf,
    NotAPdf,
    Fail,
}

/// Renderer double writing a one page PDF (or garbage, or nothing).
#[derive(Debug)]
pub struct StubRenderer {
    mode: RenderMode,
    outputs: Mutex<Vec<PathBuf>>,
}

impl StubRenderer {
    pub fn new(mode: RenderMode) -> Self {
        Self {
            mode,
            outputs: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.outputs.lock().unwrap().len()
    }

    /// Paths the renderer was asked to write.
    pub fn outputs(&self) -> Vec<PathBuf> {
        self.outputs.lock().unwrap().clone()
    }
}

#[async_trait]
impl HtmlRenderer for StubRenderer {
    async fn render_to_file(
        &self,
        _html: &str,
        output: &Path,
        _options: &RenderOptions,
    ) -> Result<(), ExportError> {
        self.outputs.lock().unwrap().push(output.to_path_buf());
        match self.mode {
            RenderMode::Pdf => pdf_assertions::write_single_page_pdf(output)?,
            RenderMode::NotAPdf => std::fs::write(output, "<html>oops</html>")?,
            RenderMode::Fail => {
                return Err(ExportError::Backend {
                    backend: "stub".to_string(),
                    message: "renderer crashed".to_string(),
                });
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "StubRenderer"
    }
}

/// A pipeline wired with the given doubles, writing into `work_dir`.
pub fn pipeline_with(
    transformer: Arc<StubTransformer>,
    renderer: Arc<StubRenderer>,
    work_dir: &Path,
) -> ConversionPipeline {
    ConversionPipeline::builder()
        .with_transformer(transformer)
        .with_renderer(renderer)
        .with_work_dir(work_dir)
        .build()
        .unwrap()
}

/// Scratch directories for one test.
pub struct TestDirs {
    pub root: tempfile::TempDir,
}

impl TestDirs {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(root.path().join("uploads")).unwrap();
        std::fs::create_dir_all(root.path().join("work")).unwrap();
        Self { root }
    }

    pub fn uploads(&self) -> PathBuf {
        self.root.path().join("uploads")
    }

    pub fn work(&self) -> PathBuf {
        self.root.path().join("work")
    }

    pub fn config(&self) -> AppConfig {
        AppConfig {
            upload_dir: self.uploads(),
            work_dir: self.work(),
            ..AppConfig::default()
        }
    }
}
