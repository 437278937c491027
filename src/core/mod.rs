//! Core invoice types, validation, tax aggregation and identifier checks.
//!
//! The semantic model for Romanian e-invoicing: builders produce an
//! [`Invoice`], the rule chain validates it, and the aggregator derives the
//! tax groups and totals the document layer serializes.

mod builder;
pub mod cif;
pub mod cnp;
pub mod counties;
mod error;
mod totals;
mod types;
mod validation;

pub use builder::*;
pub use error::*;
pub use totals::{aggregate_lines, classify, compute_totals, round2};
pub use types::*;
pub use validation::{limits, rules, validate, validate_with_policy, ZeroQuantityPolicy};
