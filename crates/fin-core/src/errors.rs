//! Error types for finbeans.
//!
//! The whole workspace reports failures through a single `thiserror`-derived
//! enum.  Bean construction and introspection failures each get a dedicated
//! variant carrying the bean and property involved; collaborator code (date
//! generation, accrual and payment period assembly) uses the general-purpose
//! variants and the `ensure!` / `fail!` macros defined here.

use thiserror::Error;

/// The top-level error type used throughout finbeans.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// General runtime error.
    #[error("{0}")]
    Runtime(String),

    /// Precondition violated.
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// Date-related error.
    #[error("date error: {0}")]
    Date(String),

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A required property was not set when a bean was built.
    #[error("{bean}: required property '{field}' was not set")]
    Validation {
        /// The bean being built.
        bean: &'static str,
        /// The first missing property, in declaration order.
        field: &'static str,
    },

    /// Generic access by a property name the bean does not declare.
    #[error("unknown property '{property}' on {bean}")]
    UnknownProperty {
        /// The bean that was queried.
        bean: &'static str,
        /// The unrecognised property name.
        property: String,
    },

    /// A generic write supplied a value of the wrong type.
    #[error("property '{property}' expects {expected}, got {actual}")]
    TypeMismatch {
        /// The property being written.
        property: &'static str,
        /// The declared value type.
        expected: &'static str,
        /// The runtime type of the supplied value.
        actual: &'static str,
    },

    /// A write was attempted against an immutable bean.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Text could not be converted into a property's declared type.
    #[error("cannot parse '{text}' for property '{property}': {reason}")]
    Parse {
        /// The property being written.
        property: &'static str,
        /// The offending text.
        text: String,
        /// Why the conversion failed.
        reason: String,
    },
}

impl Error {
    /// Shorthand for an [`Error::InvalidArgument`] built from any message.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }
}

/// Shorthand `Result` type used throughout finbeans.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use fin_core::{ensure, errors::Error};
/// fn positive(x: f64) -> fin_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use fin_core::{fail, errors::Error};
/// fn always_err() -> fin_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_names_field() {
        let err = Error::Validation {
            bean: "OvernightRateSwapLeg",
            field: "calculation",
        };
        assert_eq!(
            err.to_string(),
            "OvernightRateSwapLeg: required property 'calculation' was not set"
        );
    }

    #[test]
    fn parse_message_carries_text() {
        let err = Error::Parse {
            property: "frequency",
            text: "7X".into(),
            reason: "unknown unit".into(),
        };
        assert!(err.to_string().contains("'7X'"));
        assert!(err.to_string().contains("frequency"));
    }

    #[test]
    fn ensure_macro_returns_precondition() {
        fn check(x: i32) -> Result<i32> {
            ensure!(x >= 0, "negative: {x}");
            Ok(x)
        }
        assert_eq!(check(-2), Err(Error::Precondition("negative: -2".into())));
    }
}
