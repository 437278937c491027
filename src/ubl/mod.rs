//! CIUS-RO UBL 2.1 document generation.
//!
//! Serializes a validated [`crate::core::Invoice`] into the namespaced XML
//! document the national platform accepts. Generation only — parsing of
//! platform responses belongs to the transport collaborator.
//!
//! # Example
//!
//! ```no_run
//! use efactura::core::Invoice;
//! use efactura::ubl;
//!
//! let invoice: Invoice = todo!(); // build via InvoiceBuilder
//! let xml = ubl::to_ubl_xml(&invoice).unwrap();
//! ```

mod document;
pub(crate) mod xml_utils;

pub use document::to_ubl_xml;

/// CIUS-RO specification identifier (BT-24).
pub const CIUS_RO_CUSTOMIZATION_ID: &str =
    "urn:cen.eu:en16931:2017#compliant#urn:efactura.mfinante.ro:CIUS-RO:1.0.1";

/// UBL syntax version emitted on every document.
pub const UBL_VERSION_ID: &str = "2.1";

/// UBL 2.1 namespace URIs.
pub mod ubl_ns {
    pub const INVOICE: &str = "urn:oasis:names:specification:ubl:schema:xsd:Invoice-2";
    pub const CREDIT_NOTE: &str = "urn:oasis:names:specification:ubl:schema:xsd:CreditNote-2";
    pub const CAC: &str =
        "urn:oasis:names:specification:ubl:schema:xsd:CommonAggregateComponents-2";
    pub const CBC: &str = "urn:oasis:names:specification:ubl:schema:xsd:CommonBasicComponents-2";
}
