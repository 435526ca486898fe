//! Pollution-check reports.
//!
//! This module provides pure business logic for date-range reports:
//! - Converting local calendar dates into a UTC query window
//! - The aggregate summary returned by storage
//! - The pie charts drawn from a summary

pub mod charts;
pub mod error;
pub mod types;
pub mod window;


pub use charts::ReportCharts;
pub use error::ReportError;
pub use types::*;
pub use window::ReportWindow;
