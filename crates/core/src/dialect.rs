//! Source dialect detection.
//!
//! Classification looks only at the root element name. The rules form an
//! ordered table and the first matching rule wins; the order matters because
//! `CrossIndustryInvoice` also contains `Invoice`.

use crate::error::ClassificationError;
use std::fmt;
use transform2pdf_traits::Stylesheet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// UN/CEFACT Cross Industry Invoice.
    Cii,
    /// UN/CEFACT Cross Industry Order.
    Cio,
    /// UBL 2.1 Invoice.
    UblInvoice,
    /// UBL 2.1 CreditNote.
    UblCreditNote,
    Unrecognized,
}

struct DispatchRule {
    needle: &'static str,
    dialect: Dialect,
    stylesheet: Stylesheet,
}

const DISPATCH_TABLE: [DispatchRule; 4] = [
    DispatchRule {
        needle: "CrossIndustryInvoice",
        dialect: Dialect::Cii,
        stylesheet: Stylesheet::CiiToXr,
    },
    DispatchRule {
        needle: "SCRDMCCBDACIOMessageStructure",
        dialect: Dialect::Cio,
        stylesheet: Stylesheet::CioToXr,
    },
    DispatchRule {
        needle: "Invoice",
        dialect: Dialect::UblInvoice,
        stylesheet: Stylesheet::UblToXr,
    },
    DispatchRule {
        needle: "CreditNote",
        dialect: Dialect::UblCreditNote,
        stylesheet: Stylesheet::UblCreditNoteToXr,
    },
];

impl Dialect {
    /// Classifies a root element name. Never fails; unknown names map to
    /// [`Dialect::Unrecognized`].
    pub fn classify(root_element: &str) -> Dialect {
        DISPATCH_TABLE
            .iter()
            .find(|rule| root_element.contains(rule.needle))
            .map(|rule| rule.dialect)
            .unwrap_or(Dialect::Unrecognized)
    }

    /// The structural stylesheet that normalizes this dialect into XR.
    pub fn stylesheet(self) -> Option<Stylesheet> {
        DISPATCH_TABLE
            .iter()
            .find(|rule| rule.dialect == self)
            .map(|rule| rule.stylesheet)
    }

    /// Parses a user-supplied dialect override.
    pub fn from_name(name: &str) -> Option<Dialect> {
        match name.trim().to_ascii_lowercase().as_str() {
            "cii" => Some(Dialect::Cii),
            "cio" => Some(Dialect::Cio),
            "ubl" | "ubl-invoice" => Some(Dialect::UblInvoice),
            "ubl-creditnote" | "ubl-cn" | "creditnote" => Some(Dialect::UblCreditNote),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::Cii => "CII",
            Dialect::Cio => "CIO",
            Dialect::UblInvoice => "UBL-Invoice",
            Dialect::UblCreditNote => "UBL-CreditNote",
            Dialect::Unrecognized => "Unrecognized",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A successful classification: the dialect and its structural stylesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub dialect: Dialect,
    pub stylesheet: Stylesheet,
}

impl Classification {
    /// Builds the classification for a known dialect, `None` for
    /// [`Dialect::Unrecognized`].
    pub fn for_dialect(dialect: Dialect) -> Option<Self> {
        dialect
            .stylesheet()
            .map(|stylesheet| Classification { dialect, stylesheet })
    }
}

/// Entry point used by the pipeline.
pub struct DialectClassifier;

impl DialectClassifier {
    /// Classifies `root_element`, turning an unrecognized name into an error.
    pub fn classify(root_element: &str) -> Result<Classification, ClassificationError> {
        let classification = Classification::for_dialect(Dialect::classify(root_element))
            .ok_or_else(|| ClassificationError::Unrecognized {
                root_element: root_element.to_string(),
            })?;
        log::info!(
            "Root element <{}> classified as {}.",
            root_element,
            classification.dialect
        );
        Ok(classification)
    }
}

pub fn classify(root_element: &str) -> Result<Classification, ClassificationError> {
    DialectClassifier::classify(root_element)
}
