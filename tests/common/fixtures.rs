#![allow(dead_code)]

pub const RSM_NS: &str = "urn:un:unece:uncefact:data:standard:CrossIndustryInvoice:100";
pub const RAM_NS: &str =
    "urn:un:unece:uncefact:data:standard:ReusableAggregateBusinessInformationEntity:100";

/// A CII document with the given `ExchangedDocument/TypeCode`.
pub fn cii_document(type_code: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rsm:CrossIndustryInvoice xmlns:rsm="{RSM_NS}" xmlns:ram="{RAM_NS}">
  <rsm:ExchangedDocumentContext>
    <ram:GuidelineSpecifiedDocumentContextParameter>
      <ram:ID>urn:cen.eu:en16931:2017#compliant#urn:xeinkauf.de:kosit:xrechnung_3.0</ram:ID>
    </ram:GuidelineSpecifiedDocumentContextParameter>
  </rsm:ExchangedDocumentContext>
  <rsm:ExchangedDocument>
    <ram:ID>R-2024-0042</ram:ID>
    <ram:TypeCode>{type_code}</ram:TypeCode>
  </rsm:ExchangedDocument>
</rsm:CrossIndustryInvoice>"#
    )
}

pub fn cii_invoice() -> String {
    cii_document("380")
}

pub fn cii_order() -> String {
    cii_document("220")
}

/// A CII document without any `TypeCode`.
pub fn cii_without_type_code() -> String {
    format!(
        r#"<rsm:CrossIndustryInvoice xmlns:rsm="{RSM_NS}" xmlns:ram="{RAM_NS}">
  <rsm:ExchangedDocument><ram:ID>R-1</ram:ID></rsm:ExchangedDocument>
</rsm:CrossIndustryInvoice>"#
    )
}

pub const CIO_RSM_NS: &str = "urn:un:unece:uncefact:data:SCRDMCCBDACIOMessageStructure:100";
pub const CIO_RAM_NS: &str =
    "urn:un:unece:uncefact:data:standard:ReusableAggregateBusinessInformationEntity:128";

/// An Order-X (CIO) message with the given `ExchangedDocument/TypeCode`.
pub fn cio_document(type_code: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rsm:SCRDMCCBDACIOMessageStructure xmlns:rsm="{CIO_RSM_NS}" xmlns:ram="{CIO_RAM_NS}">
  <rsm:ExchangedDocumentContext>
    <ram:GuidelineSpecifiedDocumentContextParameter>
      <ram:ID>urn:order-x.eu:1p0:extended</ram:ID>
    </ram:GuidelineSpecifiedDocumentContextParameter>
  </rsm:ExchangedDocumentContext>
  <rsm:ExchangedDocument>
    <ram:ID>PO-77</ram:ID>
    <ram:TypeCode>{type_code}</ram:TypeCode>
  </rsm:ExchangedDocument>
</rsm:SCRDMCCBDACIOMessageStructure>"#
    )
}

pub fn cio_order() -> String {
    cio_document("220")
}

pub fn cio_order_response() -> String {
    cio_document("231")
}

pub fn ubl_invoice() -> String {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<Invoice xmlns="urn:oasis:names:specification:ubl:schema:xsd:Invoice-2"
         xmlns:cbc="urn:oasis:names:specification:ubl:schema:xsd:CommonBasicComponents-2">
  <cbc:ID>INV-2024-17</cbc:ID>
  <cbc:InvoiceTypeCode>380</cbc:InvoiceTypeCode>
</Invoice>"#
        .to_string()
}

pub fn ubl_credit_note() -> String {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<CreditNote xmlns="urn:oasis:names:specification:ubl:schema:xsd:CreditNote-2"
            xmlns:cbc="urn:oasis:names:specification:ubl:schema:xsd:CommonBasicComponents-2">
  <cbc:ID>CN-5</cbc:ID>
  <cbc:CreditNoteTypeCode>381</cbc:CreditNoteTypeCode>
</CreditNote>"#
        .to_string()
}

/// Well-formed XML that is none of the supported dialects.
pub fn unsupported_document() -> String {
    r#"<Catalogue xmlns="urn:oasis:names:specification:ubl:schema:xsd:Catalogue-2"/>"#.to_string()
}
