//! Order vs. invoice detection.
//!
//! Orders are recognized by their document type code (UNTDID 1001): `220`
//! (order) and `231` (purchase order response). Every other code, and a
//! missing code, yields a standard invoice/credit-note rendering.

use crate::document::{self, CanonicalDocument, SourceDocument};
use crate::error::PipelineError;
use log::{info, warn};
use std::fmt;

pub const RSM_NS: &str = "urn:un:unece:uncefact:data:standard:CrossIndustryInvoice:100";
pub const RAM_NS: &str =
    "urn:un:unece:uncefact:data:standard:ReusableAggregateBusinessInformationEntity:100";

pub const CIO_RSM_NS: &str = "urn:un:unece:uncefact:data:SCRDMCCBDACIOMessageStructure:100";
pub const CIO_RAM_NS: &str =
    "urn:un:unece:uncefact:data:standard:ReusableAggregateBusinessInformationEntity:128";

/// The namespaces bound to the `rsm` and `ram` prefixes by one message family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeCodeNamespaces {
    pub family: &'static str,
    pub rsm: &'static str,
    pub ram: &'static str,
}

/// Namespace pairs searched for `rsm:ExchangedDocument/ram:TypeCode`, in order.
pub const TYPE_CODE_NAMESPACES: [TypeCodeNamespaces; 2] = [
    TypeCodeNamespaces {
        family: "CII",
        rsm: RSM_NS,
        ram: RAM_NS,
    },
    TypeCodeNamespaces {
        family: "CIO",
        rsm: CIO_RSM_NS,
        ram: CIO_RAM_NS,
    },
];

pub const ORDER_TYPE_CODES: [u32; 2] = [220, 231];

/// The raw (trimmed) content of a `TypeCode` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeCode(String);

impl TypeCode {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_string())
    }

    /// Like [`TypeCode::new`], but `None` for blank content.
    pub fn parse(text: &str) -> Option<Self> {
        let code = Self::new(text);
        (!code.0.is_empty()).then_some(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn numeric(&self) -> Option<u32> {
        self.0.parse().ok()
    }

    pub fn is_order(&self) -> bool {
        self.numeric()
            .is_some_and(|code| ORDER_TYPE_CODES.contains(&code))
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DocumentSubtype {
    #[default]
    Standard,
    Order,
}

impl DocumentSubtype {
    pub fn from_type_code(code: Option<&TypeCode>) -> Self {
        match code {
            Some(code) if code.is_order() => DocumentSubtype::Order,
            _ => DocumentSubtype::Standard,
        }
    }

    pub fn is_order(self) -> bool {
        matches!(self, DocumentSubtype::Order)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentSubtype::Standard => "standard",
            DocumentSubtype::Order => "order",
        }
    }
}

impl fmt::Display for DocumentSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Finds the first `rsm:ExchangedDocument/ram:TypeCode` in document order,
/// trying each pair of [`TYPE_CODE_NAMESPACES`].
pub fn find_type_code(xml: &str) -> Result<Option<TypeCode>, roxmltree::Error> {
    let doc = document::parse_xml(xml)?;
    for namespaces in &TYPE_CODE_NAMESPACES {
        let code = doc
            .descendants()
            .filter(|n| n.has_tag_name((namespaces.rsm, "ExchangedDocument")))
            .flat_map(|n| n.children())
            .find(|n| n.has_tag_name((namespaces.ram, "TypeCode")))
            .and_then(|n| n.text())
            .and_then(TypeCode::parse);
        if let Some(code) = code {
            info!("TypeCode {code} found under the {} namespaces.", namespaces.family);
            return Ok(Some(code));
        }
    }
    Ok(None)
}

pub struct SubtypeResolver;

impl SubtypeResolver {
    /// Decides the subtype of a normalized document.
    ///
    /// The type code is looked up in the canonical document first and in the
    /// source document second. A document without any type code is rendered
    /// as a standard document.
    pub fn resolve(
        canonical: &CanonicalDocument,
        source: &SourceDocument,
    ) -> Result<DocumentSubtype, PipelineError> {
        let code = match canonical.type_code()? {
            Some(code) => Some(code),
            None => source.type_code(),
        };

        let subtype = DocumentSubtype::from_type_code(code.as_ref());
        match &code {
            Some(code) => info!("TypeCode {code} resolved to {subtype} document."),
            None => warn!("No TypeCode found; rendering as {subtype} document."),
        }
        Ok(subtype)
    }
}

pub fn resolve(
    canonical: &CanonicalDocument,
    source: &SourceDocument,
) -> Result<DocumentSubtype, PipelineError> {
    SubtypeResolver::resolve(canonical, source)
}
