//! The documents flowing through the pipeline.

use crate::error::PipelineError;
use crate::subtype::{self, TypeCode};
use transform2pdf_traits::{Stylesheet, TransformError};

fn parse_options<'a>() -> roxmltree::ParsingOptions<'a> {
    let mut options = roxmltree::ParsingOptions::default();
    options.allow_dtd = true;
    options
}

/// Parses `text` for read-only inspection. A leading byte order mark is skipped.
pub(crate) fn parse_xml(text: &str) -> Result<roxmltree::Document<'_>, roxmltree::Error> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    roxmltree::Document::parse_with_options(text, parse_options())
}

/// The uploaded XML, as received.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    content: String,
    root_element: String,
}

impl SourceDocument {
    /// Parses `content` and records the local name of its root element.
    pub fn parse(content: impl Into<String>) -> Result<Self, PipelineError> {
        let content = content.into();
        let root_element = {
            let doc = parse_xml(&content).map_err(|e| PipelineError::MalformedXml(e.to_string()))?;
            doc.root_element().tag_name().name().to_string()
        };
        Ok(Self {
            content,
            root_element,
        })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn root_element(&self) -> &str {
        &self.root_element
    }

    pub fn type_code(&self) -> Option<TypeCode> {
        // Already known to be well-formed.
        subtype::find_type_code(&self.content).ok().flatten()
    }
}

/// A document in the intermediate XR format, output of a structural transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalDocument {
    xml: String,
    produced_by: Stylesheet,
}

impl CanonicalDocument {
    pub fn new(xml: impl Into<String>, produced_by: Stylesheet) -> Self {
        Self {
            xml: xml.into(),
            produced_by,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.xml
    }

    pub fn produced_by(&self) -> Stylesheet {
        self.produced_by
    }

    /// Reads `rsm:ExchangedDocument/ram:TypeCode`.
    ///
    /// Output that is not well-formed XML is a failure of the stylesheet
    /// that produced it.
    pub fn type_code(&self) -> Result<Option<TypeCode>, TransformError> {
        subtype::find_type_code(&self.xml).map_err(|e| TransformError::Engine {
            stylesheet: self.produced_by.id().to_string(),
            message: format!("output is not well-formed XML: {e}"),
        })
    }
}

/// HTML produced by the presentation stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedHtml(String);

impl RenderedHtml {
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
