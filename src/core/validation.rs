//! Business-rule validation.
//!
//! The chain is an explicit ordered sequence of checks returning the first
//! failure; the order is part of the public contract so callers always see
//! the same, single actionable message for a given invoice.

use rust_decimal_macros::dec;

use super::cif;
use super::counties;
use super::error::ValidationError;
use super::types::*;

/// Stable rule identifiers carried by [`ValidationError`].
pub mod rules {
    /// Invoice number must not be empty.
    pub const NUMBER_EMPTY: &str = "BR-RO-001";
    /// Party registration name must not be empty.
    pub const PARTY_NAME_EMPTY: &str = "BR-RO-010";
    /// Party tax identifier must not be empty.
    pub const PARTY_ID_EMPTY: &str = "BR-RO-011";
    /// Address street must not be empty.
    pub const STREET_EMPTY: &str = "BR-RO-012";
    /// Address city must not be empty.
    pub const CITY_EMPTY: &str = "BR-RO-013";
    /// Invoice must have at least one line.
    pub const NO_LINES: &str = "BR-RO-020";
    /// Line item name must not be empty.
    pub const LINE_NAME_EMPTY: &str = "BR-RO-021";
    /// Line quantity must not be zero.
    pub const LINE_QUANTITY_ZERO: &str = "BR-RO-022";
    /// Line unit price must not be negative.
    pub const LINE_PRICE_NEGATIVE: &str = "BR-RO-023";
    /// Line tax rate must be between 0 and 100.
    pub const LINE_TAX_RATE_RANGE: &str = "BR-RO-024";
    /// Invoice number exceeds the length ceiling.
    pub const NUMBER_TOO_LONG: &str = "BR-RO-L001";
    /// Party name exceeds the length ceiling.
    pub const PARTY_NAME_TOO_LONG: &str = "BR-RO-L010";
    /// Street exceeds the length ceiling.
    pub const STREET_TOO_LONG: &str = "BR-RO-L011";
    /// City exceeds the length ceiling.
    pub const CITY_TOO_LONG: &str = "BR-RO-L012";
    /// Postal code exceeds the length ceiling.
    pub const POSTAL_CODE_TOO_LONG: &str = "BR-RO-L013";
    /// Line name exceeds the length ceiling.
    pub const LINE_NAME_TOO_LONG: &str = "BR-RO-L020";
    /// Line description exceeds the length ceiling.
    pub const LINE_DESCRIPTION_TOO_LONG: &str = "BR-RO-L021";
    /// Invoice number must contain at least one digit.
    pub const NUMBER_NO_DIGIT: &str = "BR-RO-030";
    /// Domestic address must carry a county.
    pub const COUNTY_MISSING: &str = "BR-RO-040";
    /// Domestic county could not be normalized.
    pub const COUNTY_UNKNOWN: &str = "BR-RO-041";
    /// Supplier tax identifier is not a structurally valid CIF.
    pub const SUPPLIER_CIF_FORMAT: &str = "BR-RO-050";
    /// Currency code must be a 3-letter ISO 4217 code.
    pub const CURRENCY_FORMAT: &str = "BR-RO-060";
}

/// Field length ceilings, one named rule each.
pub mod limits {
    pub const INVOICE_NUMBER: usize = 30;
    pub const PARTY_NAME: usize = 200;
    pub const STREET: usize = 150;
    pub const CITY: usize = 100;
    pub const POSTAL_CODE: usize = 20;
    pub const LINE_NAME: usize = 200;
    pub const LINE_DESCRIPTION: usize = 300;
}

/// Whether a zero quantity fails validation. The sign of non-zero
/// quantities is always meaningful and never restricted here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZeroQuantityPolicy {
    Reject,
    Allow,
}

impl ZeroQuantityPolicy {
    /// Default policy for a document kind. Both kinds currently reject;
    /// kept per-kind so compliance profiles that admit zero-quantity
    /// informational lines can relax one without the other.
    pub fn for_kind(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::Invoice | DocumentKind::CreditNote => Self::Reject,
        }
    }
}

/// Validate an invoice, stopping at the first failed rule.
pub fn validate(invoice: &Invoice) -> Result<(), ValidationError> {
    validate_with_policy(invoice, ZeroQuantityPolicy::for_kind(invoice.kind))
}

/// Validate with an explicit zero-quantity policy.
pub fn validate_with_policy(
    invoice: &Invoice,
    zero_quantity: ZeroQuantityPolicy,
) -> Result<(), ValidationError> {
    // 1. Structural completeness. Issue date presence is guaranteed by the
    // type system (NaiveDate is always a valid date).
    if invoice.number.trim().is_empty() {
        return Err(ValidationError::new(
            rules::NUMBER_EMPTY,
            "number",
            "invoice number must not be empty",
        ));
    }
    check_party_structure(&invoice.supplier, "supplier")?;
    check_party_structure(&invoice.customer, "customer")?;

    // 2. Lines.
    if invoice.lines.is_empty() {
        return Err(ValidationError::new(
            rules::NO_LINES,
            "lines",
            "invoice must have at least one line",
        ));
    }
    for (i, line) in invoice.lines.iter().enumerate() {
        check_line(line, i, zero_quantity)?;
    }

    // 3. Length ceilings.
    check_lengths(invoice)?;

    // 4. Invoice number must identify a sequence position.
    if !invoice.number.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new(
            rules::NUMBER_NO_DIGIT,
            "number",
            "invoice number must contain at least one digit",
        ));
    }

    // 5./6. County: required and normalizable for domestic addresses,
    // passed through untouched otherwise.
    check_county(&invoice.supplier, "supplier")?;
    check_county(&invoice.customer, "customer")?;

    // 7. Supplier identifier shape (checksum validation is a strict opt-in
    // via `cif::validate`).
    if !cif::is_valid_format(&invoice.supplier.tax_id) {
        return Err(ValidationError::new(
            rules::SUPPLIER_CIF_FORMAT,
            "supplier.tax_id",
            format!(
                "'{}' is not a valid CIF (optional RO prefix plus 2-10 digits)",
                invoice.supplier.tax_id
            ),
        ));
    }

    // 8. Currency shape.
    let currency = &invoice.currency_code;
    if currency.len() != 3 || !currency.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(ValidationError::new(
            rules::CURRENCY_FORMAT,
            "currency_code",
            format!("currency code '{currency}' must be a 3-letter ISO 4217 code"),
        ));
    }

    Ok(())
}

fn check_party_structure(party: &Party, prefix: &str) -> Result<(), ValidationError> {
    if party.name.trim().is_empty() {
        return Err(ValidationError::new(
            rules::PARTY_NAME_EMPTY,
            format!("{prefix}.name"),
            "registration name must not be empty",
        ));
    }
    if party.tax_id.trim().is_empty() {
        return Err(ValidationError::new(
            rules::PARTY_ID_EMPTY,
            format!("{prefix}.tax_id"),
            "tax identifier must not be empty",
        ));
    }
    if party.address.street.trim().is_empty() {
        return Err(ValidationError::new(
            rules::STREET_EMPTY,
            format!("{prefix}.address.street"),
            "street must not be empty",
        ));
    }
    if party.address.city.trim().is_empty() {
        return Err(ValidationError::new(
            rules::CITY_EMPTY,
            format!("{prefix}.address.city"),
            "city must not be empty",
        ));
    }
    Ok(())
}

fn check_line(
    line: &InvoiceLine,
    index: usize,
    zero_quantity: ZeroQuantityPolicy,
) -> Result<(), ValidationError> {
    let prefix = format!("lines[{index}]");

    if line.name.trim().is_empty() {
        return Err(ValidationError::new(
            rules::LINE_NAME_EMPTY,
            format!("{prefix}.name"),
            "item name must not be empty",
        ));
    }
    if zero_quantity == ZeroQuantityPolicy::Reject && line.quantity.is_zero() {
        return Err(ValidationError::new(
            rules::LINE_QUANTITY_ZERO,
            format!("{prefix}.quantity"),
            "quantity must not be zero",
        ));
    }
    if line.unit_price.is_sign_negative() && !line.unit_price.is_zero() {
        return Err(ValidationError::new(
            rules::LINE_PRICE_NEGATIVE,
            format!("{prefix}.unit_price"),
            "unit price must not be negative",
        ));
    }
    if line.tax_rate < dec!(0) || line.tax_rate > dec!(100) {
        return Err(ValidationError::new(
            rules::LINE_TAX_RATE_RANGE,
            format!("{prefix}.tax_rate"),
            format!("tax rate {} must be between 0 and 100", line.tax_rate),
        ));
    }
    Ok(())
}

fn check_lengths(invoice: &Invoice) -> Result<(), ValidationError> {
    check_len(
        &invoice.number,
        limits::INVOICE_NUMBER,
        rules::NUMBER_TOO_LONG,
        "number",
    )?;

    for (party, prefix) in [(&invoice.supplier, "supplier"), (&invoice.customer, "customer")] {
        check_len(
            &party.name,
            limits::PARTY_NAME,
            rules::PARTY_NAME_TOO_LONG,
            format!("{prefix}.name"),
        )?;
        check_len(
            &party.address.street,
            limits::STREET,
            rules::STREET_TOO_LONG,
            format!("{prefix}.address.street"),
        )?;
        check_len(
            &party.address.city,
            limits::CITY,
            rules::CITY_TOO_LONG,
            format!("{prefix}.address.city"),
        )?;
        if let Some(postal) = &party.address.postal_code {
            check_len(
                postal,
                limits::POSTAL_CODE,
                rules::POSTAL_CODE_TOO_LONG,
                format!("{prefix}.address.postal_code"),
            )?;
        }
    }

    for (i, line) in invoice.lines.iter().enumerate() {
        check_len(
            &line.name,
            limits::LINE_NAME,
            rules::LINE_NAME_TOO_LONG,
            format!("lines[{i}].name"),
        )?;
        if let Some(description) = &line.description {
            check_len(
                description,
                limits::LINE_DESCRIPTION,
                rules::LINE_DESCRIPTION_TOO_LONG,
                format!("lines[{i}].description"),
            )?;
        }
    }
    Ok(())
}

fn check_len(
    value: &str,
    limit: usize,
    rule: &'static str,
    field: impl Into<String>,
) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len > limit {
        return Err(ValidationError::new(
            rule,
            field,
            format!("length {len} exceeds the limit of {limit} characters"),
        ));
    }
    Ok(())
}

fn check_county(party: &Party, prefix: &str) -> Result<(), ValidationError> {
    if !party.address.is_domestic() {
        return Ok(());
    }
    let Some(county) = party.address.county.as_deref() else {
        return Err(ValidationError::new(
            rules::COUNTY_MISSING,
            format!("{prefix}.address.county"),
            "county is required for RO addresses",
        ));
    };
    if counties::normalize_county(county).is_none() {
        return Err(ValidationError::new(
            rules::COUNTY_UNKNOWN,
            format!("{prefix}.address.county"),
            format!("county '{county}' is not a recognized Romanian county"),
        ));
    }
    Ok(())
}
