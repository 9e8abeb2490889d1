//! Transformer trait for abstracting the XSLT engine.
//!
//! Both pipeline stages that touch XSLT (structural normalization and HTML
//! presentation) call through [`Transformer::apply`]. Applying a stylesheet is
//! treated as a pure function of `(stylesheet, source, params)`, so a single
//! transformer instance can be shared between concurrent requests.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fmt::{self, Debug};
use thiserror::Error;

/// Error type for stylesheet applications.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    #[error("Stylesheet not found: {0}")]
    StylesheetNotFound(String),

    #[error("Transform '{stylesheet}' failed: {message}")]
    Engine { stylesheet: String, message: String },

    #[error("Transform '{stylesheet}' produced no output")]
    EmptyOutput { stylesheet: String },

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for TransformError {
    fn from(err: std::io::Error) -> Self {
        TransformError::Io(err.to_string())
    }
}

/// The stylesheets known to the pipeline.
///
/// The first four normalize a source dialect into the intermediate XR format,
/// the last one renders XR into HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stylesheet {
    CiiToXr,
    CioToXr,
    UblToXr,
    UblCreditNoteToXr,
    XrToHtml,
}

impl Stylesheet {
    pub const ALL: [Stylesheet; 5] = [
        Stylesheet::CiiToXr,
        Stylesheet::CioToXr,
        Stylesheet::UblToXr,
        Stylesheet::UblCreditNoteToXr,
        Stylesheet::XrToHtml,
    ];

    /// Stable identifier, used in logs and error messages.
    pub fn id(self) -> &'static str {
        match self {
            Stylesheet::CiiToXr => "cii-xr",
            Stylesheet::CioToXr => "cio-xr",
            Stylesheet::UblToXr => "ubl-xr",
            Stylesheet::UblCreditNoteToXr => "ubl-creditnote-xr",
            Stylesheet::XrToHtml => "xrechnung-html.uni",
        }
    }

    /// File name relative to the stylesheet directory.
    pub fn file_name(self) -> String {
        format!("{}.xsl", self.id())
    }

    /// Whether this stylesheet produces the intermediate XR format.
    pub fn is_structural(self) -> bool {
        !matches!(self, Stylesheet::XrToHtml)
    }
}

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A single stylesheet parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Bool(bool),
    String(String),
    /// A string-to-string map (passed to XSLT 3 engines as `map(*)`).
    Map(BTreeMap<String, String>),
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::String(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::String(value.to_string())
    }
}

impl From<BTreeMap<String, String>> for ParamValue {
    fn from(value: BTreeMap<String, String>) -> Self {
        ParamValue::Map(value)
    }
}

/// Named stylesheet parameters, kept in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformParams {
    params: BTreeMap<String, ParamValue>,
}

impl TransformParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets a parameter, replacing any previous value under the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.params.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// A trait for applying XSLT stylesheets.
///
/// # Implementations
///
/// - `SaxonTransformer` (in the `transform2pdf` crate): runs an external
///   XSLT 3 processor
/// - test doubles returning canned XML/HTML
#[async_trait]
pub trait Transformer: Send + Sync + Debug {
    /// Applies `stylesheet` to `source` and returns the serialized result.
    async fn apply(
        &self,
        stylesheet: Stylesheet,
        source: &str,
        params: &TransformParams,
    ) -> Result<String, TransformError>;

    /// Returns a human-readable name for this transformer (for logging/debugging).
    fn name(&self) -> &'static str;
}
