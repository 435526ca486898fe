//! Core business logic for PUC Desk.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `check` - Pollution-check records and form validation
//! - `pricing` - Price table lookup by vehicle category
//! - `expiry` - Calendar-month expiry calculation
//! - `reports` - Reporting windows, summaries and report charts
//! - `chart` - Pie chart rendering to embeddable PNG data URIs

pub mod chart;
pub mod check;
pub mod expiry;
pub mod pricing;
pub mod reports;
