//! # fin-swap
//!
//! The overnight rate swap leg and everything needed to resolve it.
//!
//! * [`OvernightRateSwapLeg`] is an immutable bean of three definitions:
//!   a [`PeriodicSchedule`] (accrual dates), a [`PaymentSchedule`] and an
//!   [`OvernightRateCalculation`].
//! * [`LegExpander`] combines the three into an [`ExpandedSwapLeg`] holding
//!   the resolved [`PaymentPeriod`]s.
//!
//! Both legs are [`Bean`](fin_beans::Bean)s: their properties can be read and
//! written by name, and every definition type has a canonical text form
//! accepted by the builders' string setters.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Resolved accrual periods.
pub mod accrual;

/// The overnight rate calculation.
pub mod calculation;

/// Currencies and notionals.
pub mod currency;

/// The expanded leg bean.
pub mod expanded;

/// Leg expansion and its collaborator traits.
pub mod expansion;

/// Overnight indices.
pub mod index;

/// Notional exchange flags.
pub mod notional_exchange;

/// Resolved payment periods.
pub mod payment_period;

/// Payment schedule definition.
pub mod payment_schedule;

/// Accrual schedule definition.
pub mod periodic_schedule;

/// The overnight rate swap leg bean and the `SwapLeg` trait.
pub mod swap_leg;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use accrual::RateAccrualPeriod;
pub use calculation::{
    OvernightAccrualMethod, OvernightRateCalculation, OvernightRateCalculationBuilder,
};
pub use currency::{Currency, Notional};
pub use expanded::{ExpandedSwapLeg, ExpandedSwapLegBuilder};
pub use expansion::{
    AccrualPeriodCalculator, AccrualScheduleSource, LegExpander, PaymentPeriodAssembler,
    StandardCollaborators,
};
pub use index::OvernightIndex;
pub use notional_exchange::NotionalExchange;
pub use payment_period::PaymentPeriod;
pub use payment_schedule::{CompoundingMethod, PaymentRelativeTo, PaymentSchedule};
pub use periodic_schedule::PeriodicSchedule;
pub use swap_leg::{OvernightRateSwapLeg, OvernightRateSwapLegBuilder, SwapLeg};
