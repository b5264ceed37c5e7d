//! # fin-time
//!
//! Frequencies, day counts, business-day conventions and calendars, and
//! accrual schedule generation.  Dates are [`chrono::NaiveDate`].
//!
//! Every type here that can appear inside a bean property has a canonical
//! `Display` / `FromStr` pair and a [`StableHash`](fin_beans::StableHash).

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Business-day adjustment conventions.
pub mod business_day_convention;

/// Holiday calendars and business-day adjustment.
pub mod calendar;

/// Day-count conventions.
pub mod day_counter;

/// Payment / accrual frequency.
pub mod frequency;

/// `Schedule` — an ordered sequence of accrual periods.
pub mod schedule;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use business_day_convention::BusinessDayConvention;
pub use calendar::{BusinessDayAdjustment, Calendar, HolidayCalendar};
pub use chrono::NaiveDate;
pub use day_counter::DayCount;
pub use frequency::Frequency;
pub use schedule::{DateGeneration, Schedule, ScheduleBuilder, SchedulePeriod};
