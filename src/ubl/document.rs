use rust_decimal::Decimal;

use super::xml_utils::{XmlWriter, format_number};
use super::{CIUS_RO_CUSTOMIZATION_ID, UBL_VERSION_ID, ubl_ns};
use crate::core::{cif, counties};
use crate::core::{
    Address, DocumentKind, EfacturaError, Invoice, InvoiceLine, Party, TaxCategory,
    classify, compute_totals, round2, validate, DOMESTIC_CURRENCY,
};

/// Element names and conventions that switch with the document kind.
/// Selected once at build start; the assembly below never re-inspects the
/// type code.
struct KindSyntax {
    root_tag: &'static str,
    root_ns: &'static str,
    type_code_tag: &'static str,
    line_tag: &'static str,
    quantity_tag: &'static str,
    /// Credit notes restate line quantities with the opposite sign.
    quantity_sign: i64,
}

static INVOICE_SYNTAX: KindSyntax = KindSyntax {
    root_tag: "ubl:Invoice",
    root_ns: ubl_ns::INVOICE,
    type_code_tag: "cbc:InvoiceTypeCode",
    line_tag: "cac:InvoiceLine",
    quantity_tag: "cbc:InvoicedQuantity",
    quantity_sign: 1,
};

static CREDIT_NOTE_SYNTAX: KindSyntax = KindSyntax {
    root_tag: "ubl:CreditNote",
    root_ns: ubl_ns::CREDIT_NOTE,
    type_code_tag: "cbc:CreditNoteTypeCode",
    line_tag: "cac:CreditNoteLine",
    quantity_tag: "cbc:CreditedQuantity",
    quantity_sign: -1,
};

fn syntax(kind: DocumentKind) -> &'static KindSyntax {
    match kind {
        DocumentKind::Invoice => &INVOICE_SYNTAX,
        DocumentKind::CreditNote => &CREDIT_NOTE_SYNTAX,
    }
}

/// Generate the CIUS-RO UBL document for an invoice.
///
/// Validates first (§ rule chain, first failure wins), aggregates the tax
/// groups, then assembles the tree. The input is borrowed immutably; the
/// caller gets either a complete document or exactly one failure.
pub fn to_ubl_xml(invoice: &Invoice) -> Result<String, EfacturaError> {
    validate(invoice)?;

    let totals = compute_totals(invoice);
    let kind = syntax(invoice.kind);
    let currency = invoice.currency_code.as_str();
    let mut w = XmlWriter::new()?;

    w.open_with(
        kind.root_tag,
        &[
            ("xmlns:ubl", kind.root_ns),
            ("xmlns:cac", ubl_ns::CAC),
            ("xmlns:cbc", ubl_ns::CBC),
        ],
    )?;

    w.leaf("cbc:UBLVersionID", UBL_VERSION_ID)?;
    w.leaf("cbc:CustomizationID", CIUS_RO_CUSTOMIZATION_ID)?;
    w.leaf("cbc:ID", &invoice.number)?;
    w.leaf("cbc:IssueDate", &invoice.issue_date.to_string())?;
    if let Some(due) = &invoice.due_date {
        w.leaf("cbc:DueDate", &due.to_string())?;
    }
    w.leaf(kind.type_code_tag, &invoice.kind.code().to_string())?;
    w.leaf("cbc:DocumentCurrencyCode", currency)?;
    if currency != DOMESTIC_CURRENCY {
        w.leaf("cbc:TaxCurrencyCode", DOMESTIC_CURRENCY)?;
    }

    if let Some(reference) = &invoice.preceding_reference {
        w.open("cac:BillingReference")?;
        w.open("cac:InvoiceDocumentReference")?;
        w.leaf("cbc:ID", reference)?;
        w.close("cac:InvoiceDocumentReference")?;
        w.close("cac:BillingReference")?;
    }

    write_party(&mut w, &invoice.supplier, "cac:AccountingSupplierParty")?;
    write_party(&mut w, &invoice.customer, "cac:AccountingCustomerParty")?;

    if let Some(iban) = &invoice.payment_iban {
        w.open("cac:PaymentMeans")?;
        w.leaf("cbc:PaymentMeansCode", "30")?;
        w.open("cac:PayeeFinancialAccount")?;
        w.leaf("cbc:ID", iban)?;
        w.close("cac:PayeeFinancialAccount")?;
        w.close("cac:PaymentMeans")?;
    }

    w.open("cac:TaxTotal")?;
    w.amount("cbc:TaxAmount", totals.tax_total, currency)?;
    for group in &totals.groups {
        w.open("cac:TaxSubtotal")?;
        w.amount("cbc:TaxableAmount", group.taxable_amount, currency)?;
        w.amount("cbc:TaxAmount", group.tax_amount, currency)?;
        write_tax_category(&mut w, "cac:TaxCategory", group.category, group.rate)?;
        w.close("cac:TaxSubtotal")?;
    }
    w.close("cac:TaxTotal")?;

    // Foreign-currency documents restate the tax total in RON.
    if let Some(tax_ron) = totals.tax_total_ron {
        w.open("cac:TaxTotal")?;
        w.amount("cbc:TaxAmount", tax_ron, DOMESTIC_CURRENCY)?;
        w.close("cac:TaxTotal")?;
    }

    w.open("cac:LegalMonetaryTotal")?;
    w.amount("cbc:LineExtensionAmount", totals.taxable_total, currency)?;
    w.amount("cbc:TaxExclusiveAmount", totals.taxable_total, currency)?;
    w.amount("cbc:TaxInclusiveAmount", totals.gross_total, currency)?;
    w.amount("cbc:PayableAmount", totals.gross_total, currency)?;
    w.close("cac:LegalMonetaryTotal")?;

    for (i, line) in invoice.lines.iter().enumerate() {
        write_line(&mut w, line, i, kind, invoice.supplier.vat_payer, currency)?;
    }

    w.close(kind.root_tag)?;
    w.into_string()
}

fn write_party(w: &mut XmlWriter, party: &Party, wrapper: &str) -> Result<(), EfacturaError> {
    w.open(wrapper)?;
    w.open("cac:Party")?;

    write_address(w, &party.address)?;

    // The tax-identification block only exists for registered VAT payers,
    // and carries the prefixed identifier.
    if party.vat_payer {
        w.open("cac:PartyTaxScheme")?;
        w.leaf("cbc:CompanyID", &cif::prefixed(&party.tax_id))?;
        w.open("cac:TaxScheme")?;
        w.leaf("cbc:ID", "VAT")?;
        w.close("cac:TaxScheme")?;
        w.close("cac:PartyTaxScheme")?;
    }

    // The legal-entity block always uses the raw, unprefixed identifier —
    // the registry form, not the VAT form.
    w.open("cac:PartyLegalEntity")?;
    w.leaf("cbc:RegistrationName", &party.name)?;
    w.leaf("cbc:CompanyID", cif::strip(&party.tax_id))?;
    if let Some(register) = &party.trade_register {
        w.leaf("cbc:CompanyLegalForm", register)?;
    }
    w.close("cac:PartyLegalEntity")?;

    w.close("cac:Party")?;
    w.close(wrapper)?;
    Ok(())
}

fn write_address(w: &mut XmlWriter, address: &Address) -> Result<(), EfacturaError> {
    w.open("cac:PostalAddress")?;
    w.leaf("cbc:StreetName", &address.street)?;
    w.leaf("cbc:CityName", &city_label(address))?;
    if let Some(postal) = &address.postal_code {
        w.leaf("cbc:PostalZone", postal)?;
    }
    if address.is_domestic() {
        // Validation guarantees the county resolves for domestic addresses.
        if let Some(code) = address.county.as_deref().and_then(counties::normalize_county) {
            w.leaf("cbc:CountrySubentity", code)?;
        }
    } else if let Some(county) = &address.county {
        w.leaf("cbc:CountrySubentity", county)?;
    }
    w.open("cac:Country")?;
    w.leaf("cbc:IdentificationCode", &address.country_code)?;
    w.close("cac:Country")?;
    w.close("cac:PostalAddress")?;
    Ok(())
}

/// City label for serialization. Capital-district addresses fold the sector
/// number into the district-qualified label the platform expects.
fn city_label(address: &Address) -> String {
    if address.is_domestic() {
        let sector = counties::extract_sector(&address.city)
            .or_else(|| address.county.as_deref().and_then(counties::extract_sector));
        if let Some(n) = sector {
            return format!("SECTOR{n}");
        }
    }
    address.city.clone()
}

fn write_tax_category(
    w: &mut XmlWriter,
    tag: &str,
    category: TaxCategory,
    rate: Decimal,
) -> Result<(), EfacturaError> {
    w.open(tag)?;
    w.leaf("cbc:ID", category.code())?;
    w.leaf("cbc:Percent", &format_number(rate))?;
    if let Some(code) = category.exemption_reason_code() {
        w.leaf("cbc:TaxExemptionReasonCode", code)?;
    }
    w.open("cac:TaxScheme")?;
    w.leaf("cbc:ID", "VAT")?;
    w.close("cac:TaxScheme")?;
    w.close(tag)?;
    Ok(())
}

fn write_line(
    w: &mut XmlWriter,
    line: &InvoiceLine,
    index: usize,
    kind: &KindSyntax,
    supplier_is_vat_payer: bool,
    currency: &str,
) -> Result<(), EfacturaError> {
    let sign = Decimal::from(kind.quantity_sign);

    w.open(kind.line_tag)?;
    match &line.id {
        Some(id) => w.leaf("cbc:ID", id)?,
        None => w.leaf("cbc:ID", &(index + 1).to_string())?,
    }
    w.quantity(kind.quantity_tag, line.quantity * sign, &line.unit_code)?;
    w.amount("cbc:LineExtensionAmount", line.extension() * sign, currency)?;

    w.open("cac:Item")?;
    if let Some(description) = &line.description {
        w.leaf("cbc:Description", description)?;
    }
    w.leaf("cbc:Name", &line.name)?;
    write_tax_category(
        w,
        "cac:ClassifiedTaxCategory",
        classify(supplier_is_vat_payer, round2(line.tax_rate)),
        line.tax_rate,
    )?;
    w.close("cac:Item")?;

    w.open("cac:Price")?;
    w.amount("cbc:PriceAmount", line.unit_price, currency)?;
    w.close("cac:Price")?;

    w.close(kind.line_tag)?;
    Ok(())
}
