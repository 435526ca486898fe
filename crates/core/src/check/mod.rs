//! Pollution-check records.
//!
//! A check is submitted as loosely typed form input, validated into a
//! [`ValidatedCheck`], then priced and dated into a [`PollutionCheck`].

pub mod types;
pub mod validation;


pub use types::*;
pub use validation::{CheckForm, ValidationErrors};
