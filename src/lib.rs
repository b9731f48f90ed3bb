//! # fv-invoice
//!
//! Sales invoice core: products taxed by category, excise surcharges,
//! identity-based line merging, and sequential `FV-<year>-<nnnn>` numbering.
//!
//! All monetary values use [`rust_decimal::Decimal`] — never floating point.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use fv_invoice::core::*;
//! use rust_decimal_macros::dec;
//!
//! let numbering = InvoiceNumberSequence::new("FV-", 2025);
//! let mut invoice = Invoice::new(&numbering);
//!
//! invoice.add_product(&Arc::new(Product::tax_free("Owoce", dec!(200)).unwrap())).unwrap();
//! invoice.add_product(&Arc::new(Product::dairy("Maslanka", dec!(100)).unwrap())).unwrap();
//! invoice.add_product(&Arc::new(Product::other("Wino", dec!(10)).unwrap())).unwrap();
//!
//! assert_eq!(invoice.net_total(), dec!(310));
//! assert_eq!(invoice.tax_total(), dec!(10.30));
//! assert_eq!(invoice.gross_total(), dec!(320.30));
//! assert!(invoice.print().ends_with("Liczba pozycji: 3"));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Products, invoices, numbering |

#[cfg(feature = "core")]
pub mod core;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
