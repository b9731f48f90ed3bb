//! Core invoice types, taxation rules, and numbering.
//!
//! Products carry their tax rate and excise from a [`ProductCategory`];
//! an [`Invoice`] aggregates shared products by instance and computes
//! exact decimal totals.

mod error;
mod invoice;
mod numbering;
mod product;

pub use error::*;
pub use invoice::*;
pub use numbering::*;
pub use product::*;
