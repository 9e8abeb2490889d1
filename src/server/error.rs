use axum::{
    Json,
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use transform2pdf_core::{ErrorKind, PipelineError};

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("No file uploaded. Send the document in the multipart field 'file'.")]
    MissingFile,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid multipart body: {0}")]
    Multipart(#[from] MultipartError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Pipeline(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            Self::MissingFile | Self::InvalidRequest(_) | Self::Multipart(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Pipeline(_) | Self::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Pipeline(e) => e.kind(),
            _ => ErrorKind::Exception,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Pipeline(e) => e.client_message(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("Conversion failed: {}", self);
        } else {
            log::warn!("Rejected request: {}", self);
        }

        let body = Json(json!({
            "error": self.kind().as_str(),
            "message": self.message(),
        }));

        (status, body).into_response()
    }
}

impl From<QueryRejection> for ServerError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl From<MultipartRejection> for ServerError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;
