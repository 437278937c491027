use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::totals::round2;

/// Domestic currency (ISO 4217).
pub const DOMESTIC_CURRENCY: &str = "RON";

/// Domestic country code (ISO 3166-1 alpha-2).
pub const DOMESTIC_COUNTRY: &str = "RO";

/// Default unit of measure (UN/CEFACT Rec 20, "one").
pub const DEFAULT_UNIT: &str = "C62";

/// The top-level document to be submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Invoice number (must contain at least one digit).
    pub number: String,
    /// Issue date.
    pub issue_date: NaiveDate,
    /// Payment due date.
    pub due_date: Option<NaiveDate>,
    /// Document kind (UNTDID 1001 subset).
    pub kind: DocumentKind,
    /// Invoice currency code (ISO 4217, e.g. "RON").
    pub currency_code: String,
    /// IBAN for the payment-means block. Omitted entirely when absent.
    pub payment_iban: Option<String>,
    /// Supplier (seller).
    pub supplier: Party,
    /// Customer (buyer).
    pub customer: Party,
    /// Invoice lines, in input order.
    pub lines: Vec<InvoiceLine>,
    /// Number of the preceding invoice a credit note corrects.
    pub preceding_reference: Option<String>,
    /// Conversion rate to RON for foreign-currency documents.
    /// The RON tax restatement uses this; absent means 1:1.
    pub exchange_rate: Option<Decimal>,
}

/// Supplier or customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Party {
    /// Legal registration name.
    pub name: String,
    /// CIF/CUI — accepted with or without the "RO" prefix.
    pub tax_id: String,
    /// Trade register number (e.g. "J40/1234/2020").
    pub trade_register: Option<String>,
    /// Whether the party is registered for VAT purposes.
    /// Non-payers get no tax-identification block in the output.
    pub vat_payer: bool,
    /// Postal address.
    pub address: Address,
}

/// Postal address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    /// Street and number.
    pub street: String,
    /// City or locality.
    pub city: String,
    /// Postal code.
    pub postal_code: Option<String>,
    /// County (județ). Required for domestic addresses, where it must
    /// normalize to an ISO 3166-2:RO code; passed through verbatim otherwise.
    pub county: Option<String>,
    /// Country code (ISO 3166-1 alpha-2).
    pub country_code: String,
}

impl Address {
    /// True when the address is in the domestic jurisdiction.
    pub fn is_domestic(&self) -> bool {
        self.country_code == DOMESTIC_COUNTRY
    }
}

/// Invoice line item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceLine {
    /// Explicit line identifier; positional (1-based) when absent.
    pub id: Option<String>,
    /// Item name.
    pub name: String,
    /// Item description.
    pub description: Option<String>,
    /// Invoiced quantity. Signed — negative quantities are credit/return
    /// lines; zero is rejected by validation.
    pub quantity: Decimal,
    /// Net unit price (non-negative).
    pub unit_price: Decimal,
    /// Unit of measure (UN/CEFACT Rec 20).
    pub unit_code: String,
    /// VAT rate percentage, 0–100.
    pub tax_rate: Decimal,
}

impl InvoiceLine {
    /// Unrounded extension amount (quantity × unit price).
    pub fn raw_extension(&self) -> Decimal {
        self.quantity * self.unit_price
    }

    /// Disclosed extension amount — rounded once.
    pub fn extension(&self) -> Decimal {
        round2(self.raw_extension())
    }

    /// Disclosed line tax amount, derived from the rounded extension.
    pub fn tax_amount(&self) -> Decimal {
        round2(self.extension() * self.tax_rate / dec!(100))
    }

    /// Extension plus tax.
    pub fn gross_amount(&self) -> Decimal {
        self.extension() + self.tax_amount()
    }
}

/// UNTDID 1001 — document kinds relevant to e-Factura submission.
///
/// The kind switches the root/line/quantity element names in the output and
/// the quantity-sign convention for credit notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    /// 380 — Commercial invoice.
    Invoice,
    /// 381 — Credit note.
    CreditNote,
}

impl DocumentKind {
    /// UNTDID 1001 numeric code.
    pub fn code(&self) -> u16 {
        match self {
            Self::Invoice => 380,
            Self::CreditNote => 381,
        }
    }

    /// Parse from UNTDID 1001 numeric code.
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            380 => Some(Self::Invoice),
            381 => Some(Self::CreditNote),
            _ => None,
        }
    }
}

/// UNTDID 5305 — tax category classification per group/line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxCategory {
    /// S — Standard rate.
    Standard,
    /// Z — Zero rated.
    ZeroRated,
    /// O — Not subject to VAT (supplier is not a registered VAT payer).
    NotSubject,
}

impl TaxCategory {
    /// UNTDID 5305 code letter.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Standard => "S",
            Self::ZeroRated => "Z",
            Self::NotSubject => "O",
        }
    }

    /// VATEX exemption reason code, for categories that require one.
    pub fn exemption_reason_code(&self) -> Option<&'static str> {
        match self {
            Self::NotSubject => Some("VATEX-EU-O"),
            _ => None,
        }
    }
}

/// One VAT subtotal — all lines sharing an effective rate.
///
/// Built fresh by [`super::totals::compute_totals`] for each call and
/// discarded with the returned [`Totals`]; never stored on the invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxGroup {
    /// Rate keyed to its 2-decimal equivalence class.
    pub rate: Decimal,
    /// Category classification for the group.
    pub category: TaxCategory,
    /// Taxable amount, rounded once per group.
    pub taxable_amount: Decimal,
    /// Tax amount, rounded once per group.
    pub tax_amount: Decimal,
}

/// Computed document totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of rounded line extensions.
    pub taxable_total: Decimal,
    /// Sum of group tax amounts.
    pub tax_total: Decimal,
    /// taxable_total + tax_total.
    pub gross_total: Decimal,
    /// Tax total restated in RON, for foreign-currency documents only.
    pub tax_total_ron: Option<Decimal>,
    /// VAT groups, ordered by rate.
    pub groups: Vec<TaxGroup>,
}
