//! # fin-core
//!
//! Core types and error definitions for finbeans.
//!
//! This crate provides the foundational building blocks shared across all
//! other crates in the workspace – numeric type aliases, the error hierarchy
//! with its `ensure!` / `fail!` macros, and the text helpers used by every
//! value type that has a canonical string form.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` / `fail!` macros.
pub mod errors;

/// Parsing and formatting of canonical text forms.
pub mod utilities;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the library.
pub type Real = f64;

/// A rate expressed as a decimal (e.g. 0.05 = 5 %).
pub type Rate = Real;

/// A spread over a reference rate.
pub type Spread = Real;

/// A year fraction.
pub type Time = Real;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
