//! Tax aggregation and document totals.
//!
//! Lines are grouped by their tax rate's 2-decimal equivalence class —
//! rounding the *key* merges float-noise duplicates (19.0 vs 19.00000001)
//! while keeping genuinely different cent-rates apart. Raw extensions
//! accumulate unrounded per bucket; each bucket is rounded exactly once, so
//! the sum of group tax amounts equals the disclosed grand total with no
//! cross-bucket cent drift.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use super::types::*;

/// Commercial rounding: half away from zero, 2 fractional digits.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Classify a tax rate given the supplier's VAT registration status.
pub fn classify(supplier_is_vat_payer: bool, rate: Decimal) -> TaxCategory {
    if !supplier_is_vat_payer {
        TaxCategory::NotSubject
    } else if rate < dec!(0.01) {
        TaxCategory::ZeroRated
    } else {
        TaxCategory::Standard
    }
}

/// Group lines into per-rate tax buckets, ordered by rate.
///
/// An empty line set still yields one synthetic zero-rate group so the
/// tax-summary block is always structurally present.
pub fn aggregate_lines(lines: &[InvoiceLine], supplier_is_vat_payer: bool) -> Vec<TaxGroup> {
    let mut buckets: BTreeMap<Decimal, Decimal> = BTreeMap::new();
    for line in lines {
        let key = round2(line.tax_rate);
        *buckets.entry(key).or_insert(Decimal::ZERO) += line.raw_extension();
    }
    if buckets.is_empty() {
        buckets.insert(Decimal::ZERO, Decimal::ZERO);
    }

    buckets
        .into_iter()
        .map(|(rate, raw_taxable)| {
            let taxable_amount = round2(raw_taxable);
            let tax_amount = round2(taxable_amount * rate / dec!(100));
            TaxGroup {
                rate,
                category: classify(supplier_is_vat_payer, rate),
                taxable_amount,
                tax_amount,
            }
        })
        .collect()
}

/// Compute the document totals: tax groups plus the grand amounts.
///
/// The taxable total sums the individually rounded line extensions, matching
/// the per-line disclosed amounts; the tax total sums the group amounts.
pub fn compute_totals(invoice: &Invoice) -> Totals {
    let groups = aggregate_lines(&invoice.lines, invoice.supplier.vat_payer);

    let taxable_total = round2(invoice.lines.iter().map(InvoiceLine::extension).sum());
    let tax_total: Decimal = groups.iter().map(|g| g.tax_amount).sum();
    let gross_total = round2(taxable_total + tax_total);

    let tax_total_ron = if invoice.currency_code == DOMESTIC_CURRENCY {
        None
    } else {
        let rate = invoice.exchange_rate.unwrap_or(Decimal::ONE);
        Some(round2(tax_total * rate))
    };

    Totals {
        taxable_total,
        tax_total,
        gross_total,
        tax_total_ron,
        groups,
    }
}
