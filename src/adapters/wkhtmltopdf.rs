//! HTML to PDF through an external `wkhtmltopdf` process.

use async_trait::async_trait;
use log::debug;
use std::path::Path;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use transform2pdf_core::{ExportError, HtmlRenderer, RenderOptions};

const BACKEND: &str = "wkhtmltopdf";

/// Pipes the HTML into `<program> <args> <page options> - <output>`.
#[derive(Debug, Clone)]
pub struct WkHtmlToPdfRenderer {
    program: String,
    args: Vec<String>,
}

impl WkHtmlToPdfRenderer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn command_args(&self, options: &RenderOptions, output: &Path) -> Vec<String> {
        let margin = format!("{}mm", options.margin_mm);
        let mut args = self.args.clone();
        args.extend([
            "--page-size".to_string(),
            options.page_size.as_str().to_string(),
            "--orientation".to_string(),
            options.orientation.as_str().to_string(),
        ]);
        for side in ["top", "right", "bottom", "left"] {
            args.push(format!("--margin-{side}"));
            args.push(margin.clone());
        }
        args.push("-".to_string());
        args.push(output.display().to_string());
        args
    }

    fn backend_error(message: impl Into<String>) -> ExportError {
        ExportError::Backend {
            backend: BACKEND.to_string(),
            message: message.into(),
        }
    }
}

#[async_trait]
impl HtmlRenderer for WkHtmlToPdfRenderer {
    async fn render_to_file(
        &self,
        html: &str,
        output: &Path,
        options: &RenderOptions,
    ) -> Result<(), ExportError> {
        let args = self.command_args(options, output);
        debug!("Running {} {}", self.program, args.join(" "));

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Self::backend_error(format!("Failed to execute '{}': {}", self.program, e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(html.as_bytes())
                .await
                .map_err(|e| Self::backend_error(format!("Failed to write HTML: {e}")))?;
            // Closing stdin signals end of input.
            drop(stdin);
        }

        let result = child
            .wait_with_output()
            .await
            .map_err(|e| Self::backend_error(e.to_string()))?;
        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(Self::backend_error(format!(
                "{} ({})",
                stderr.trim(),
                result.status
            )));
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "WkHtmlToPdfRenderer"
    }
}
