//! Price lookup by vehicle category.
//!
//! Prices come from static configuration, are loaded once at start-up and
//! never change while the process runs.

pub mod error;
pub mod table;


pub use error::PricingError;
pub use table::PriceTable;
