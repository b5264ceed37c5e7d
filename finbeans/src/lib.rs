//! # finbeans
//!
//! Self-describing immutable value types and overnight swap-leg
//! definitions.
//!
//! This crate is a **façade** that re-exports the public items of the
//! workspace crates. Application code should depend on this crate rather
//! than the individual `fin-*` crates.
//!
//! ```rust
//! use finbeans::beans::Bean;
//! use finbeans::swap::OvernightRateSwapLeg;
//!
//! let names: Vec<_> = OvernightRateSwapLeg::meta_bean().property_names().collect();
//! assert_eq!(names, ["accrualPeriods", "paymentPeriods", "calculation"]);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core aliases, the error type and text helpers.
pub use fin_core as core;

/// Meta-beans, builders and structural services.
pub use fin_beans as beans;

/// Frequencies, day counts, calendars and schedules.
pub use fin_time as time;

/// Swap-leg beans, definitions and expansion.
pub use fin_swap as swap;

pub use fin_core::{Error, Result};
