//! # efactura
//!
//! Romanian e-invoicing core: turns a normalized invoice into a CIUS-RO
//! compliant UBL 2.1 document, with tax aggregation, county normalization,
//! and CIF/CNP identifier validation.
//!
//! All monetary values use [`rust_decimal::Decimal`] — never floating point.
//! Rounding is commercial (half away from zero, 2 decimals) and applied
//! exactly once per disclosed total.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use efactura::core::*;
//! use rust_decimal_macros::dec;
//!
//! let invoice = InvoiceBuilder::new("FAC-2024-001", NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
//!     .supplier(
//!         PartyBuilder::new(
//!             "Serv Soft SRL",
//!             "18547290",
//!             AddressBuilder::new("Str. Memorandumului 28", "Cluj-Napoca")
//!                 .county("Cluj")
//!                 .build(),
//!         )
//!         .vat_payer(true)
//!         .build(),
//!     )
//!     .customer(
//!         PartyBuilder::new(
//!             "Client Impex SRL",
//!             "14399840",
//!             AddressBuilder::new("Bd. Unirii 10", "Sector 3")
//!                 .county("Bucuresti")
//!                 .build(),
//!         )
//!         .build(),
//!     )
//!     .add_line(
//!         LineBuilder::new("Dezvoltare software", dec!(10), dec!(150))
//!             .tax_rate(dec!(19))
//!             .build(),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let totals = compute_totals(&invoice);
//! assert_eq!(totals.gross_total, dec!(1785.00));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Invoice types, business-rule validation, tax aggregation, CIF/CNP |
//! | `ubl` (default) | CIUS-RO UBL 2.1 document generation |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "ubl")]
pub mod ubl;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
