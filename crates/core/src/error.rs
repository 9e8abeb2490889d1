//! Error types for all pipeline operations.

use thiserror::Error;
use transform2pdf_traits::{ExportError, ResourceError, TransformError};

/// Shown to clients whose document could not be classified.
pub const UNRECOGNIZED_FORMAT_HINT: &str =
    "Is it a UBL 2.1 or UN/CEFACT 2016b XML file or PDF you are trying to open?";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassificationError {
    #[error("File format not recognized: unsupported root element '{root_element}'")]
    Unrecognized { root_element: String },
}

impl ClassificationError {
    pub fn hint(&self) -> &'static str {
        UNRECOGNIZED_FORMAT_HINT
    }
}

#[derive(Error, Debug, Clone)]
pub enum LocalizationError {
    #[error("Unknown language: '{0}'")]
    UnknownLanguage(String),

    #[error("Translation table '{language}' is missing key '{key}'")]
    MissingKey { language: String, key: String },

    #[error("Invalid translation data: {0}")]
    InvalidData(String),

    #[error("Failed to load translation table: {0}")]
    Resource(#[from] ResourceError),
}

/// The error kinds exposed to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UnrecognizedFormat,
    Exception,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::UnrecognizedFormat => "File format not recognized",
            ErrorKind::Exception => "Exception",
        }
    }
}

/// The main error enum for a conversion run.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Classification(#[from] ClassificationError),
    #[error("Malformed XML: {0}")]
    MalformedXml(String),
    #[error(transparent)]
    Transform(#[from] TransformError),
    #[error("Presentation parameters do not match: {0}")]
    ParameterMismatch(String),
    #[error(transparent)]
    Localization(#[from] LocalizationError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::Classification(_) => ErrorKind::UnrecognizedFormat,
            _ => ErrorKind::Exception,
        }
    }

    /// The message shown to clients. Classification failures carry a hint
    /// instead of the technical message.
    pub fn client_message(&self) -> String {
        match self {
            PipelineError::Classification(e) => e.hint().to_string(),
            other => other.to_string(),
        }
    }

    /// Whether the client can fix the failure by sending different input.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PipelineError::Classification(_)
                | PipelineError::MalformedXml(_)
                | PipelineError::Localization(LocalizationError::UnknownLanguage(_))
        )
    }
}
