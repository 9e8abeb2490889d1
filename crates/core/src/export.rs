//! HTML to PDF export with scoped artifacts.
//!
//! The PDF is written to a temporary path owned by the returned
//! [`ExportArtifact`]. Dropping the artifact removes the file, whether the
//! caller delivered it, failed while delivering it, or never got that far.

use crate::document::RenderedHtml;
use crate::pipeline::{Stage, StageTrace};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempPath;
use transform2pdf_traits::{ExportError, HtmlRenderer, RenderOptions};

const ARTIFACT_PREFIX: &str = "transform2pdf-";
const FALLBACK_NAME: &str = "document";

/// The upload's base name without its extension.
fn input_stem(input: &str) -> String {
    let base = Path::new(input)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match base.rfind('.') {
        Some(idx) if idx > 0 => base[..idx].to_string(),
        _ => base,
    }
}

/// Derives the delivered file name from the uploaded one: `invoice.xml`
/// becomes `invoice.pdf`. Characters outside `[A-Za-z0-9._-]` are replaced,
/// so the result is safe in any header or filesystem.
pub fn artifact_file_name(input: &str) -> String {
    let stem = input_stem(input);
    let sanitized: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let sanitized = sanitized.trim_matches('.');

    if sanitized.is_empty() {
        format!("{FALLBACK_NAME}.pdf")
    } else {
        format!("{sanitized}.pdf")
    }
}

/// Like [`artifact_file_name`], but only the extension is substituted.
/// Control characters are dropped.
pub fn display_file_name(input: &str) -> String {
    let stem: String = input_stem(input).chars().filter(|c| !c.is_control()).collect();
    let stem = stem.trim();
    if stem.is_empty() || stem.chars().all(|c| c == '.') {
        format!("{FALLBACK_NAME}.pdf")
    } else {
        format!("{stem}.pdf")
    }
}

/// Runs blocking file work on the runtime's blocking pool.
pub async fn run_blocking<T, F>(work: F) -> Result<T, ExportError>
where
    F: FnOnce() -> Result<T, ExportError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ExportError::Io(format!("blocking task failed: {e}")))?
}

/// A rendered PDF on disk. Removed when dropped unless persisted.
#[derive(Debug)]
pub struct ExportArtifact {
    path: TempPath,
    file_name: String,
    display_name: String,
    page_count: usize,
    cleanup: CleanupTrace,
}

/// Moves an attached trace to [`Stage::Cleaned`] when dropped. Declared after
/// the path, so the file is already gone by then.
#[derive(Debug, Default)]
struct CleanupTrace(Option<StageTrace>);

impl Drop for CleanupTrace {
    fn drop(&mut self) {
        if let Some(trace) = self.0.as_mut() {
            trace.advance(Stage::Cleaned);
        }
    }
}

impl ExportArtifact {
    /// The name to deliver the file under.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The unsanitized download name, for `filename*`.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Hands over the trace of the run that produced this artifact. Only a
    /// trace that reached [`Stage::Exported`] is kept.
    pub fn attach_trace(&mut self, trace: StageTrace) {
        if trace.current() == Stage::Exported {
            self.cleanup = CleanupTrace(Some(trace));
        }
    }

    /// The stage of the attached trace, if any.
    pub fn stage(&self) -> Option<Stage> {
        self.cleanup.0.as_ref().map(StageTrace::current)
    }

    /// Reads the PDF and removes the file.
    pub fn into_bytes(self) -> Result<Vec<u8>, ExportError> {
        let bytes = std::fs::read(&self.path)?;
        self.path.close()?;
        Ok(bytes)
    }

    /// [`ExportArtifact::into_bytes`] on the blocking pool.
    pub async fn read(self) -> Result<Vec<u8>, ExportError> {
        run_blocking(move || self.into_bytes()).await
    }

    /// Moves the PDF to `dest`. The artifact is no longer scoped afterwards.
    pub fn persist(mut self, dest: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
        self.cleanup.0 = None;
        let dest = dest.as_ref().to_path_buf();
        if let Err(err) = self.path.persist(&dest) {
            // Rename fails across filesystems; fall back to a copy. The temp
            // file is removed when `err.path` drops.
            std::fs::copy(&err.path, &dest)?;
        }
        Ok(dest)
    }
}

pub struct DocumentExporter {
    renderer: Arc<dyn HtmlRenderer>,
    work_dir: PathBuf,
    options: RenderOptions,
}

impl DocumentExporter {
    pub fn new(renderer: Arc<dyn HtmlRenderer>, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            renderer,
            work_dir: work_dir.into(),
            options: RenderOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn renderer_name(&self) -> &'static str {
        self.renderer.name()
    }

    /// Renders `html` and verifies the result is a loadable PDF with pages.
    pub async fn export(
        &self,
        html: &RenderedHtml,
        input_name: &str,
    ) -> Result<ExportArtifact, ExportError> {
        let path = tempfile::Builder::new()
            .prefix(ARTIFACT_PREFIX)
            .suffix(".pdf")
            .tempfile_in(&self.work_dir)?
            .into_temp_path();

        debug!(
            "Rendering {} bytes of HTML to '{}' via {}.",
            html.len(),
            path.display(),
            self.renderer.name()
        );
        self.renderer
            .render_to_file(html.as_str(), &path, &self.options)
            .await?;

        // On failure the path is dropped, and the file removed, off the runtime.
        let (path, page_count) =
            run_blocking(move || verify_pdf(&path).map(|pages| (path, pages))).await?;
        let file_name = artifact_file_name(input_name);
        info!("Exported '{}' ({} pages).", file_name, page_count);

        Ok(ExportArtifact {
            path,
            file_name,
            display_name: display_file_name(input_name),
            page_count,
            cleanup: CleanupTrace::default(),
        })
    }
}

/// Returns the page count of the PDF at `path`.
fn verify_pdf(path: &Path) -> Result<usize, ExportError> {
    let metadata = std::fs::metadata(path)?;
    if metadata.len() == 0 {
        return Err(ExportError::InvalidArtifact("renderer produced an empty file".to_string()));
    }

    let doc = lopdf::Document::load(path).map_err(|e| ExportError::InvalidArtifact(e.to_string()))?;
    let pages = doc.get_pages().len();
    if pages == 0 {
        return Err(ExportError::InvalidArtifact("document has no pages".to_string()));
    }
    Ok(pages)
}
