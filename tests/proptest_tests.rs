//! Property-based tests for tax aggregation and document generation.

#![cfg(feature = "ubl")]

use chrono::NaiveDate;
use efactura::core::*;
use efactura::ubl;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn supplier() -> Party {
    PartyBuilder::new(
        "Serv Soft SRL",
        "18547290",
        AddressBuilder::new("Str. Memorandumului 28", "Cluj-Napoca")
            .county("Cluj")
            .build(),
    )
    .vat_payer(true)
    .build()
}

fn customer() -> Party {
    PartyBuilder::new(
        "Client Impex SRL",
        "14399840",
        AddressBuilder::new("Bd. Unirii 10", "Otopeni")
            .county("Ilfov")
            .build(),
    )
    .build()
}

fn build_invoice(lines: Vec<InvoiceLine>) -> Invoice {
    let mut builder = InvoiceBuilder::new("FAC-2024-PROP", date(2024, 6, 15))
        .supplier(supplier())
        .customer(customer());
    for line in lines {
        builder = builder.add_line(line);
    }
    builder.build().unwrap()
}

// ── Strategies ──────────────────────────────────────────────────────────────

/// Price between 0.01 and 99999.99, expressed in cents.
fn arb_price() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Signed quantity, -50 to 50, never zero.
fn arb_quantity() -> impl Strategy<Value = Decimal> {
    (1i64..=50i64, prop::bool::ANY).prop_map(|(q, negate)| {
        let q = Decimal::from(q);
        if negate { -q } else { q }
    })
}

/// Romanian VAT rates plus float-noise variants of the standard rate.
fn arb_rate() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        Just(dec!(0)),
        Just(dec!(5)),
        Just(dec!(9)),
        Just(dec!(19)),
        Just(dec!(19.0)),
        Just(dec!(19.001)),
        Just(dec!(21)),
    ]
}

fn arb_line() -> impl Strategy<Value = InvoiceLine> {
    (arb_quantity(), arb_price(), arb_rate()).prop_map(|(quantity, price, rate)| {
        LineBuilder::new("Pozitie", quantity, price)
            .tax_rate(rate)
            .build()
    })
}

fn arb_lines() -> impl Strategy<Value = Vec<InvoiceLine>> {
    prop::collection::vec(arb_line(), 1..=8)
}

// ── Properties ──────────────────────────────────────────────────────────────

proptest! {
    /// The disclosed grand tax total always equals the sum of the group tax
    /// amounts, and the gross total always closes the sum.
    #[test]
    fn totals_are_internally_consistent(lines in arb_lines()) {
        let invoice = build_invoice(lines);
        let totals = compute_totals(&invoice);

        let group_tax: Decimal = totals.groups.iter().map(|g| g.tax_amount).sum();
        prop_assert_eq!(group_tax, totals.tax_total);
        prop_assert_eq!(totals.taxable_total + totals.tax_total, totals.gross_total);
    }

    /// One group per distinct 2-decimal rate class, in ascending rate order.
    #[test]
    fn groups_partition_by_rounded_rate(lines in arb_lines()) {
        let invoice = build_invoice(lines);
        let totals = compute_totals(&invoice);

        let mut distinct: Vec<Decimal> = invoice
            .lines
            .iter()
            .map(|l| round2(l.tax_rate))
            .collect();
        distinct.sort();
        distinct.dedup();

        prop_assert_eq!(totals.groups.len(), distinct.len());
        for (group, rate) in totals.groups.iter().zip(distinct) {
            prop_assert_eq!(round2(group.rate), rate);
        }
    }

    /// Every disclosed amount is already at 2-decimal scale — rounding it
    /// again changes nothing.
    #[test]
    fn disclosed_amounts_are_rounded_once(lines in arb_lines()) {
        let invoice = build_invoice(lines);
        let totals = compute_totals(&invoice);

        prop_assert_eq!(round2(totals.taxable_total), totals.taxable_total);
        prop_assert_eq!(round2(totals.tax_total), totals.tax_total);
        prop_assert_eq!(round2(totals.gross_total), totals.gross_total);
        for group in &totals.groups {
            prop_assert_eq!(round2(group.taxable_amount), group.taxable_amount);
            prop_assert_eq!(round2(group.tax_amount), group.tax_amount);
        }
    }

    /// Generated invoices validate and serialize, and the document carries
    /// one line block per input line.
    #[test]
    fn generated_invoices_serialize(lines in arb_lines()) {
        let line_count = lines.len();
        let invoice = build_invoice(lines);
        let xml = ubl::to_ubl_xml(&invoice).unwrap();

        prop_assert_eq!(xml.matches("<cac:InvoiceLine>").count(), line_count);
        prop_assert_eq!(xml.matches("<cac:TaxSubtotal>").count(), compute_totals(&invoice).groups.len());
    }

    /// CIF checksum: appending the computed check digit round-trips through
    /// the validator, and any other digit fails.
    #[test]
    fn cif_check_digit_is_unique(body in 1_000u32..=99_999_999u32) {
        let body = body.to_string();
        let mut valid_count = 0;
        for check in 0..10 {
            if cif::validate(&format!("{body}{check}")) {
                valid_count += 1;
            }
        }
        prop_assert_eq!(valid_count, 1);
    }
}
