use chrono::NaiveDate;
use efactura::core::*;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn supplier() -> Party {
    PartyBuilder::new(
        "Serv Soft SRL",
        "RO18547290",
        AddressBuilder::new("Str. Memorandumului 28", "Cluj-Napoca")
            .county("Cluj")
            .postal_code("400114")
            .build(),
    )
    .vat_payer(true)
    .trade_register("J12/1000/2005")
    .build()
}

fn customer() -> Party {
    PartyBuilder::new(
        "Client Impex SRL",
        "14399840",
        AddressBuilder::new("Bd. Unirii 10", "Sector 3")
            .county("Bucuresti")
            .build(),
    )
    .build()
}

fn line(name: &str, quantity: rust_decimal::Decimal, price: rust_decimal::Decimal, rate: rust_decimal::Decimal) -> InvoiceLine {
    LineBuilder::new(name, quantity, price).tax_rate(rate).build()
}

// --- Totals ---

#[test]
fn two_rates_end_to_end() {
    let invoice = InvoiceBuilder::new("FAC-2024-001", date(2024, 6, 15))
        .supplier(supplier())
        .customer(customer())
        .add_line(line("Consultanta", dec!(1), dec!(100), dec!(19)))
        .add_line(line("Dezvoltare", dec!(1), dec!(100), dec!(19)))
        .add_line(line("Carte tehnica", dec!(1), dec!(100), dec!(9)))
        .build()
        .unwrap();

    let totals = compute_totals(&invoice);

    assert_eq!(totals.groups.len(), 2);
    // Groups are ordered by rate.
    assert_eq!(totals.groups[0].rate, dec!(9));
    assert_eq!(totals.groups[0].taxable_amount, dec!(100.00));
    assert_eq!(totals.groups[0].tax_amount, dec!(9.00));
    assert_eq!(totals.groups[1].rate, dec!(19));
    assert_eq!(totals.groups[1].taxable_amount, dec!(200.00));
    assert_eq!(totals.groups[1].tax_amount, dec!(38.00));

    assert_eq!(totals.taxable_total, dec!(300.00));
    assert_eq!(totals.tax_total, dec!(47.00));
    assert_eq!(totals.gross_total, dec!(347.00));
    assert_eq!(totals.tax_total_ron, None);
}

#[test]
fn group_tax_sums_to_grand_total() {
    let invoice = InvoiceBuilder::new("FAC-2024-002", date(2024, 6, 15))
        .supplier(supplier())
        .customer(customer())
        .add_line(line("A", dec!(3), dec!(33.33), dec!(19)))
        .add_line(line("B", dec!(7), dec!(14.99), dec!(9)))
        .add_line(line("C", dec!(1), dec!(0.01), dec!(5)))
        .build()
        .unwrap();

    let totals = compute_totals(&invoice);
    let group_sum: rust_decimal::Decimal = totals.groups.iter().map(|g| g.tax_amount).sum();
    assert_eq!(group_sum, totals.tax_total);
    assert_eq!(totals.taxable_total + totals.tax_total, totals.gross_total);
}

#[test]
fn rate_scale_noise_merges_into_one_group() {
    let invoice = InvoiceBuilder::new("FAC-2024-003", date(2024, 6, 15))
        .supplier(supplier())
        .customer(customer())
        .add_line(line("A", dec!(1), dec!(50), dec!(19.0)))
        .add_line(line("B", dec!(1), dec!(50), dec!(19.00)))
        .add_line(line("C", dec!(1), dec!(50), dec!(19.001)))
        .build()
        .unwrap();

    let totals = compute_totals(&invoice);
    assert_eq!(totals.groups.len(), 1);
    assert_eq!(totals.groups[0].taxable_amount, dec!(150.00));
}

#[test]
fn cent_distinct_rates_stay_apart() {
    let invoice = InvoiceBuilder::new("FAC-2024-004", date(2024, 6, 15))
        .supplier(supplier())
        .customer(customer())
        .add_line(line("A", dec!(1), dec!(100), dec!(19.004)))
        .add_line(line("B", dec!(1), dec!(100), dec!(19.006)))
        .build()
        .unwrap();

    assert_eq!(compute_totals(&invoice).groups.len(), 2);
}

#[test]
fn negative_quantity_line_amounts() {
    let returned = line("Retur marfa", dec!(-2), dec!(100), dec!(19));
    assert_eq!(returned.raw_extension(), dec!(-200));
    assert_eq!(returned.extension(), dec!(-200.00));
    assert_eq!(returned.tax_amount(), dec!(-38.00));
    assert_eq!(returned.gross_amount(), dec!(-238.00));

    let invoice = InvoiceBuilder::new("FAC-2024-005", date(2024, 6, 15))
        .supplier(supplier())
        .customer(customer())
        .add_line(returned)
        .build()
        .unwrap();

    let totals = compute_totals(&invoice);
    assert_eq!(totals.taxable_total, dec!(-200.00));
    assert_eq!(totals.tax_total, dec!(-38.00));
    assert_eq!(totals.gross_total, dec!(-238.00));
}

#[test]
fn non_vat_payer_groups_are_not_subject() {
    let mut non_payer = supplier();
    non_payer.vat_payer = false;

    let invoice = InvoiceBuilder::new("FAC-2024-006", date(2024, 6, 15))
        .supplier(non_payer)
        .customer(customer())
        .add_line(line("Servicii", dec!(1), dec!(500), dec!(0)))
        .build()
        .unwrap();

    let totals = compute_totals(&invoice);
    assert_eq!(totals.groups.len(), 1);
    assert_eq!(totals.groups[0].category, TaxCategory::NotSubject);
    assert_eq!(totals.tax_total, dec!(0.00));
}

#[test]
fn foreign_currency_restates_tax_in_ron() {
    let invoice = InvoiceBuilder::new("FAC-2024-007", date(2024, 6, 15))
        .currency("EUR")
        .exchange_rate(dec!(4.9752))
        .supplier(supplier())
        .customer(customer())
        .add_line(line("Consultanta", dec!(1), dec!(100), dec!(19)))
        .build()
        .unwrap();

    let totals = compute_totals(&invoice);
    assert_eq!(totals.tax_total, dec!(19.00));
    // 19 × 4.9752 = 94.5288 → 94.53
    assert_eq!(totals.tax_total_ron, Some(dec!(94.53)));
}

#[test]
fn foreign_currency_without_rate_restates_one_to_one() {
    let invoice = InvoiceBuilder::new("FAC-2024-008", date(2024, 6, 15))
        .currency("EUR")
        .supplier(supplier())
        .customer(customer())
        .add_line(line("Consultanta", dec!(1), dec!(100), dec!(19)))
        .build()
        .unwrap();

    assert_eq!(compute_totals(&invoice).tax_total_ron, Some(dec!(19.00)));
}

// --- Model ---

#[test]
fn builder_does_not_mutate_input_semantics() {
    let invoice = InvoiceBuilder::new("FAC-2024-009", date(2024, 6, 15))
        .supplier(supplier())
        .customer(customer())
        .add_line(line("A", dec!(2), dec!(10.005), dec!(19)))
        .build()
        .unwrap();

    // Two computations over the same borrow agree — nothing is cached or
    // mutated on the invoice.
    let first = compute_totals(&invoice);
    let second = compute_totals(&invoice);
    assert_eq!(first.gross_total, second.gross_total);
    assert_eq!(invoice.lines[0].unit_price, dec!(10.005));
}

#[test]
fn document_kind_codes() {
    assert_eq!(DocumentKind::Invoice.code(), 380);
    assert_eq!(DocumentKind::CreditNote.code(), 381);
    assert_eq!(DocumentKind::from_code(380), Some(DocumentKind::Invoice));
    assert_eq!(DocumentKind::from_code(381), Some(DocumentKind::CreditNote));
    assert_eq!(DocumentKind::from_code(384), None);
}

#[test]
fn serde_round_trip() {
    let invoice = InvoiceBuilder::new("FAC-2024-010", date(2024, 6, 15))
        .due_date(date(2024, 7, 15))
        .payment_iban("RO49AAAA1B31007593840000")
        .supplier(supplier())
        .customer(customer())
        .add_line(line("Consultanta", dec!(10), dec!(150), dec!(19)))
        .build()
        .unwrap();

    let json = serde_json::to_string(&invoice).unwrap();
    let back: Invoice = serde_json::from_str(&json).unwrap();

    assert_eq!(back.number, invoice.number);
    assert_eq!(back.lines[0].unit_price, invoice.lines[0].unit_price);
    assert_eq!(back.supplier.tax_id, invoice.supplier.tax_id);
    assert_eq!(
        compute_totals(&back).gross_total,
        compute_totals(&invoice).gross_total
    );
}
