//! XSLT 3 transforms through an external Saxon process.

use async_trait::async_trait;
use log::debug;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use tempfile::TempPath;
use tokio::process::Command;
use transform2pdf_core::{
    ParamValue, ResourceProvider, Stylesheet, TransformError, TransformParams, Transformer,
};

/// Runs `<program> <args> -s:<source> -xsl:<stylesheet> -o:<output> ?name=expr...`.
///
/// Stylesheets are looked up through a [`ResourceProvider`] that can resolve
/// them to files, normally a `FilesystemResourceProvider` rooted at the
/// stylesheet directory.
#[derive(Debug, Clone)]
pub struct SaxonTransformer {
    program: String,
    args: Vec<String>,
    stylesheets: Arc<dyn ResourceProvider>,
    scratch_dir: PathBuf,
}

impl SaxonTransformer {
    pub fn new(
        program: impl Into<String>,
        args: Vec<String>,
        stylesheets: Arc<dyn ResourceProvider>,
        scratch_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            program: program.into(),
            args,
            stylesheets,
            scratch_dir: scratch_dir.into(),
        }
    }

    pub fn stylesheet_path(&self, stylesheet: Stylesheet) -> Result<PathBuf, TransformError> {
        let file_name = stylesheet.file_name();
        self.stylesheets
            .resolve(&file_name)
            .ok_or(TransformError::StylesheetNotFound(file_name))
    }

    fn scratch_file(&self, prefix: &str, suffix: &str) -> Result<TempPath, TransformError> {
        Ok(tempfile::Builder::new()
            .prefix(prefix)
            .suffix(suffix)
            .tempfile_in(&self.scratch_dir)?
            .into_temp_path())
    }

    /// Full argument list for one invocation.
    pub fn command_args(
        &self,
        source: &Path,
        stylesheet: &Path,
        output: &Path,
        params: &TransformParams,
    ) -> Vec<String> {
        let mut args = self.args.clone();
        args.push(format!("-s:{}", source.display()));
        args.push(format!("-xsl:{}", stylesheet.display()));
        args.push(format!("-o:{}", output.display()));
        args.extend(param_args(params));
        args
    }
}

/// Renders stylesheet parameters as Saxon `?name=expression` arguments.
pub fn param_args(params: &TransformParams) -> Vec<String> {
    params
        .iter()
        .map(|(name, value)| format!("?{}={}", name, xpath_literal(value)))
        .collect()
}

fn xpath_literal(value: &ParamValue) -> String {
    match value {
        ParamValue::Bool(true) => "true()".to_string(),
        ParamValue::Bool(false) => "false()".to_string(),
        ParamValue::String(s) => quote(s),
        ParamValue::Map(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}:{}", quote(k), quote(v)))
                .collect();
            format!("map{{{}}}", entries.join(","))
        }
    }
}

/// XPath string literal; an apostrophe is escaped by doubling it.
fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

#[async_trait]
impl Transformer for SaxonTransformer {
    async fn apply(
        &self,
        stylesheet: Stylesheet,
        source: &str,
        params: &TransformParams,
    ) -> Result<String, TransformError> {
        let xsl = self.stylesheet_path(stylesheet)?;
        let input = self.scratch_file("t2p-src-", ".xml")?;
        let output = self.scratch_file("t2p-out-", ".out")?;
        tokio::fs::write(&input, source).await?;

        let args = self.command_args(&input, &xsl, &output, params);
        debug!("Running {} for '{}' with {} parameters.", self.program, stylesheet, params.len());

        let result = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| TransformError::Engine {
                stylesheet: stylesheet.id().to_string(),
                message: format!("Failed to execute '{}': {}", self.program, e),
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(TransformError::Engine {
                stylesheet: stylesheet.id().to_string(),
                message: format!("{} ({})", stderr.trim(), result.status),
            });
        }

        Ok(tokio::fs::read_to_string(&output).await?)
    }

    fn name(&self) -> &'static str {
        "SaxonTransformer"
    }
}
