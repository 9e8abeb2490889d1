use super::AppState;
use super::error::{Result, ServerError};
use axum::{
    Json,
    extract::{
        Multipart, Query, State, multipart::MultipartRejection, rejection::QueryRejection,
    },
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::path::Path;
use tempfile::TempPath;
use transform2pdf_core::{ConversionRequest, Dialect, ExportArtifact, PipelineError};

/// Multipart field carrying the document.
pub const UPLOAD_FIELD: &str = "file";

const DEFAULT_UPLOAD_NAME: &str = "document.xml";

/// Optional per-request overrides.
#[derive(Debug, Default, Deserialize)]
pub struct ConvertQuery {
    pub lang: Option<String>,
    pub show_ids: Option<bool>,
    pub dialect: Option<String>,
}

/// An uploaded document. The file in the upload directory lives as long as
/// this value.
struct Upload {
    file_name: String,
    content: String,
    _file: TempPath,
}

async fn receive_upload(mut multipart: Multipart, upload_dir: &Path) -> Result<Upload> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field
            .file_name()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_UPLOAD_NAME)
            .to_string();
        let bytes = field.bytes().await?;

        let file = tempfile::Builder::new()
            .prefix("upload-")
            .suffix(".xml")
            .tempfile_in(upload_dir)?
            .into_temp_path();
        tokio::fs::write(&file, &bytes).await?;
        log::debug!("Stored upload '{}' ({} bytes) at '{}'.", file_name, bytes.len(), file.display());

        let content = tokio::fs::read(&file).await?;
        let content = String::from_utf8(content).map_err(|_| {
            PipelineError::MalformedXml(format!("'{file_name}' is not UTF-8 encoded text"))
        })?;

        return Ok(Upload {
            file_name,
            content,
            _file: file,
        });
    }
    Err(ServerError::MissingFile)
}

fn conversion_request(upload: &Upload, query: &ConvertQuery) -> Result<ConversionRequest> {
    let mut request = ConversionRequest::new(upload.content.as_str(), upload.file_name.as_str());
    if let Some(lang) = query.lang.as_deref().filter(|l| !l.is_empty()) {
        request = request.with_language(lang);
    }
    if let Some(show_ids) = query.show_ids {
        request = request.with_show_ids(show_ids);
    }
    if let Some(name) = query.dialect.as_deref().filter(|d| !d.is_empty()) {
        let dialect = Dialect::from_name(name)
            .ok_or_else(|| ServerError::InvalidRequest(format!("Unknown dialect '{name}'")))?;
        request = request.with_dialect(dialect);
    }
    Ok(request)
}

/// `attachment` disposition with an ASCII `filename` and, when the original
/// name is not plain ASCII, an RFC 5987 `filename*`.
pub fn content_disposition(artifact: &ExportArtifact) -> String {
    let ascii = artifact.file_name();
    let display = artifact.display_name();
    if display == ascii {
        format!("attachment; filename=\"{ascii}\"")
    } else {
        format!(
            "attachment; filename=\"{ascii}\"; filename*=UTF-8''{}",
            urlencoding::encode(display)
        )
    }
}

/// `POST /upload`: converts the uploaded document and returns the PDF.
pub async fn upload(
    State(state): State<AppState>,
    query: std::result::Result<Query<ConvertQuery>, QueryRejection>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Response> {
    let Query(query) = query?;
    let upload = receive_upload(multipart?, &state.config.upload_dir).await?;
    let request = conversion_request(&upload, &query)?;

    let conversion = state.pipeline.convert(request).await?;
    let file_name = conversion.artifact.file_name().to_string();
    let disposition = content_disposition(&conversion.artifact);
    let pdf = conversion.artifact.read().await.map_err(PipelineError::from)?;

    log::info!("Sending '{}' ({} bytes) for upload '{}'.", file_name, pdf.len(), upload.file_name);
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        pdf,
    )
        .into_response())
}

/// `POST /html`: returns the rendered HTML instead of a PDF.
pub async fn html(
    State(state): State<AppState>,
    query: std::result::Result<Query<ConvertQuery>, QueryRejection>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Html<String>> {
    let Query(query) = query?;
    let upload = receive_upload(multipart?, &state.config.upload_dir).await?;
    let request = conversion_request(&upload, &query)?;

    let preview = state.pipeline.render_html(&request).await?;
    Ok(Html(preview.html.into_string()))
}

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let context = state.pipeline.context();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "transformer": context.transformer.name(),
        "renderer": context.exporter.renderer_name(),
    }))
}

pub async fn languages(State(state): State<AppState>) -> Json<Value> {
    let localization = state.pipeline.localization();
    Json(json!({
        "default": localization.default_language(),
        "languages": localization.languages().collect::<Vec<_>>(),
    }))
}
