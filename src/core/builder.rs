use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::EfacturaError;
use super::types::*;
use super::validation;

/// Builder for constructing validated invoices.
///
/// ```
/// use efactura::core::*;
/// use rust_decimal_macros::dec;
/// use chrono::NaiveDate;
///
/// let invoice = InvoiceBuilder::new("FAC-2024-001", NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
///     .supplier(
///         PartyBuilder::new(
///             "Serv Soft SRL",
///             "18547290",
///             AddressBuilder::new("Str. Memorandumului 28", "Cluj-Napoca")
///                 .county("Cluj")
///                 .build(),
///         )
///         .vat_payer(true)
///         .build(),
///     )
///     .customer(
///         PartyBuilder::new(
///             "Client Impex SRL",
///             "14399840",
///             AddressBuilder::new("Bd. Unirii 10", "Sector 3").county("Bucuresti").build(),
///         )
///         .build(),
///     )
///     .add_line(LineBuilder::new("Consultanta", dec!(10), dec!(150)).tax_rate(dec!(19)).build())
///     .build();
/// assert!(invoice.is_ok());
/// ```
pub struct InvoiceBuilder {
    number: String,
    issue_date: NaiveDate,
    due_date: Option<NaiveDate>,
    kind: DocumentKind,
    currency_code: String,
    payment_iban: Option<String>,
    supplier: Option<Party>,
    customer: Option<Party>,
    lines: Vec<InvoiceLine>,
    preceding_reference: Option<String>,
    exchange_rate: Option<Decimal>,
}

impl InvoiceBuilder {
    pub fn new(number: impl Into<String>, issue_date: NaiveDate) -> Self {
        Self {
            number: number.into(),
            issue_date,
            due_date: None,
            kind: DocumentKind::Invoice,
            currency_code: DOMESTIC_CURRENCY.to_string(),
            payment_iban: None,
            supplier: None,
            customer: None,
            lines: Vec::new(),
            preceding_reference: None,
            exchange_rate: None,
        }
    }

    pub fn due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    pub fn kind(mut self, kind: DocumentKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn currency(mut self, code: impl Into<String>) -> Self {
        self.currency_code = code.into();
        self
    }

    pub fn payment_iban(mut self, iban: impl Into<String>) -> Self {
        self.payment_iban = Some(iban.into());
        self
    }

    pub fn supplier(mut self, party: Party) -> Self {
        self.supplier = Some(party);
        self
    }

    pub fn customer(mut self, party: Party) -> Self {
        self.customer = Some(party);
        self
    }

    pub fn add_line(mut self, line: InvoiceLine) -> Self {
        self.lines.push(line);
        self
    }

    pub fn preceding_reference(mut self, number: impl Into<String>) -> Self {
        self.preceding_reference = Some(number.into());
        self
    }

    pub fn exchange_rate(mut self, rate: Decimal) -> Self {
        self.exchange_rate = Some(rate);
        self
    }

    /// Build the invoice and run the business-rule chain on it.
    pub fn build(self) -> Result<Invoice, EfacturaError> {
        let invoice = self.assemble()?;
        validation::validate(&invoice)?;
        Ok(invoice)
    }

    /// Build without validation — useful for tests or for data that will be
    /// corrected downstream before serialization.
    pub fn build_unchecked(self) -> Result<Invoice, EfacturaError> {
        self.assemble()
    }

    fn assemble(self) -> Result<Invoice, EfacturaError> {
        let supplier = self
            .supplier
            .ok_or_else(|| EfacturaError::Builder("supplier is required".into()))?;
        let customer = self
            .customer
            .ok_or_else(|| EfacturaError::Builder("customer is required".into()))?;

        Ok(Invoice {
            number: self.number,
            issue_date: self.issue_date,
            due_date: self.due_date,
            kind: self.kind,
            currency_code: self.currency_code,
            payment_iban: self.payment_iban,
            supplier,
            customer,
            lines: self.lines,
            preceding_reference: self.preceding_reference,
            exchange_rate: self.exchange_rate,
        })
    }
}

/// Builder for Party (supplier/customer).
pub struct PartyBuilder {
    name: String,
    tax_id: String,
    trade_register: Option<String>,
    vat_payer: bool,
    address: Address,
}

impl PartyBuilder {
    pub fn new(name: impl Into<String>, tax_id: impl Into<String>, address: Address) -> Self {
        Self {
            name: name.into(),
            tax_id: tax_id.into(),
            trade_register: None,
            vat_payer: false,
            address,
        }
    }

    pub fn trade_register(mut self, number: impl Into<String>) -> Self {
        self.trade_register = Some(number.into());
        self
    }

    pub fn vat_payer(mut self, vat_payer: bool) -> Self {
        self.vat_payer = vat_payer;
        self
    }

    pub fn build(self) -> Party {
        Party {
            name: self.name,
            tax_id: self.tax_id,
            trade_register: self.trade_register,
            vat_payer: self.vat_payer,
            address: self.address,
        }
    }
}

/// Builder for Address. Country defaults to RO.
pub struct AddressBuilder {
    street: String,
    city: String,
    postal_code: Option<String>,
    county: Option<String>,
    country_code: String,
}

impl AddressBuilder {
    pub fn new(street: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            street: street.into(),
            city: city.into(),
            postal_code: None,
            county: None,
            country_code: DOMESTIC_COUNTRY.to_string(),
        }
    }

    pub fn postal_code(mut self, code: impl Into<String>) -> Self {
        self.postal_code = Some(code.into());
        self
    }

    pub fn county(mut self, county: impl Into<String>) -> Self {
        self.county = Some(county.into());
        self
    }

    pub fn country(mut self, code: impl Into<String>) -> Self {
        self.country_code = code.into();
        self
    }

    pub fn build(self) -> Address {
        Address {
            street: self.street,
            city: self.city,
            postal_code: self.postal_code,
            county: self.county,
            country_code: self.country_code,
        }
    }
}

/// Builder for InvoiceLine. Unit defaults to C62, tax rate to 19%.
pub struct LineBuilder {
    id: Option<String>,
    name: String,
    description: Option<String>,
    quantity: Decimal,
    unit_price: Decimal,
    unit_code: String,
    tax_rate: Decimal,
}

impl LineBuilder {
    pub fn new(name: impl Into<String>, quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
            quantity,
            unit_price,
            unit_code: DEFAULT_UNIT.to_string(),
            tax_rate: Decimal::new(19, 0),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn unit(mut self, code: impl Into<String>) -> Self {
        self.unit_code = code.into();
        self
    }

    pub fn tax_rate(mut self, rate: Decimal) -> Self {
        self.tax_rate = rate;
        self
    }

    pub fn build(self) -> InvoiceLine {
        InvoiceLine {
            id: self.id,
            name: self.name,
            description: self.description,
            quantity: self.quantity,
            unit_price: self.unit_price,
            unit_code: self.unit_code,
            tax_rate: self.tax_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn defaults() {
        let line = LineBuilder::new("Item", dec!(1), dec!(10)).build();
        assert_eq!(line.unit_code, DEFAULT_UNIT);
        assert_eq!(line.tax_rate, dec!(19));

        let address = AddressBuilder::new("Str. X 1", "Oras").build();
        assert_eq!(address.country_code, DOMESTIC_COUNTRY);
    }

    #[test]
    fn missing_supplier_is_a_builder_error() {
        let result = InvoiceBuilder::new(
            "FAC-1",
            chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
        .build();
        assert!(matches!(result, Err(EfacturaError::Builder(_))));
    }
}
