//! The payment schedule of a swap leg: how accrual periods roll up into
//! payments.

use crate::accrual::RateAccrualPeriod;
use crate::payment_period::PaymentPeriod;
use fin_beans::{HashCombiner, StableHash};
use fin_core::ensure;
use fin_core::errors::{Error, Result};
use fin_core::utilities::data_formatters::write_record;
use fin_core::utilities::data_parsers::parse_record;
use fin_time::{Calendar, Frequency, Schedule};
use std::fmt;
use std::str::FromStr;

/// Compounding applied when a payment period spans several accrual periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompoundingMethod {
    /// No compounding: the accrual amounts are summed.
    #[default]
    None,
    /// Straight compounding of rate plus spread.
    Straight,
    /// Flat compounding: the spread is not compounded.
    Flat,
}

impl fmt::Display for CompoundingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CompoundingMethod::None => "None",
            CompoundingMethod::Straight => "Straight",
            CompoundingMethod::Flat => "Flat",
        })
    }
}

impl FromStr for CompoundingMethod {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(CompoundingMethod::None),
            "straight" => Ok(CompoundingMethod::Straight),
            "flat" => Ok(CompoundingMethod::Flat),
            _ => Err(Error::invalid(format!("unknown compounding method '{s}'"))),
        }
    }
}

impl StableHash for CompoundingMethod {
    fn stable_hash(&self) -> u64 {
        self.to_string().stable_hash()
    }
}

/// The base date of a payment: the start or the end of its period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaymentRelativeTo {
    /// Pay relative to the start of the payment period.
    PeriodStart,
    /// Pay relative to the end of the payment period.
    #[default]
    PeriodEnd,
}

impl fmt::Display for PaymentRelativeTo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PaymentRelativeTo::PeriodStart => "PeriodStart",
            PaymentRelativeTo::PeriodEnd => "PeriodEnd",
        })
    }
}

impl FromStr for PaymentRelativeTo {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "periodstart" => Ok(PaymentRelativeTo::PeriodStart),
            "periodend" => Ok(PaymentRelativeTo::PeriodEnd),
            _ => Err(Error::invalid(format!("unknown payment base '{s}'"))),
        }
    }
}

impl StableHash for PaymentRelativeTo {
    fn stable_hash(&self) -> u64 {
        self.to_string().stable_hash()
    }
}

/// Defines the payment periods of a leg from its accrual periods.
///
/// Text form:
/// `PaymentSchedule{paymentFrequency=3M, paymentRelativeTo=PeriodEnd,
/// paymentOffsetDays=2, compoundingMethod=None}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaymentSchedule {
    payment_frequency: Frequency,
    payment_relative_to: PaymentRelativeTo,
    payment_offset_days: i32,
    compounding_method: CompoundingMethod,
}

impl PaymentSchedule {
    /// Pay every `payment_frequency` at period end, without offset or
    /// compounding.
    pub fn of(payment_frequency: Frequency) -> Self {
        Self {
            payment_frequency,
            payment_relative_to: PaymentRelativeTo::PeriodEnd,
            payment_offset_days: 0,
            compounding_method: CompoundingMethod::None,
        }
    }

    /// Set the payment base date.
    pub fn with_relative_to(mut self, relative_to: PaymentRelativeTo) -> Self {
        self.payment_relative_to = relative_to;
        self
    }

    /// Set the payment offset in business days (may be negative).
    pub fn with_offset_days(mut self, days: i32) -> Self {
        self.payment_offset_days = days;
        self
    }

    /// Set the compounding method.
    pub fn with_compounding(mut self, method: CompoundingMethod) -> Self {
        self.compounding_method = method;
        self
    }

    /// The payment frequency.
    pub fn payment_frequency(&self) -> Frequency {
        self.payment_frequency
    }

    /// The payment base date.
    pub fn payment_relative_to(&self) -> PaymentRelativeTo {
        self.payment_relative_to
    }

    /// Business days between the base date and the payment date.
    pub fn payment_offset_days(&self) -> i32 {
        self.payment_offset_days
    }

    /// Compounding across accrual periods.
    pub fn compounding_method(&self) -> CompoundingMethod {
        self.compounding_method
    }

    /// Group `accrual_periods` into payment periods.
    ///
    /// Each group holds as many consecutive accrual periods as fit in one
    /// payment period (a `Term` payment frequency takes them all).  Payment
    /// dates are shifted by the offset in business days of the schedule's
    /// calendar.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if the payment frequency has zero length
    /// or is not a whole multiple of the schedule's frequency.
    pub fn create_payment_periods(
        &self,
        accrual_periods: Vec<RateAccrualPeriod>,
        schedule: &Schedule,
    ) -> Result<Vec<PaymentPeriod>> {
        ensure!(
            !accrual_periods.is_empty(),
            "cannot create payment periods without accrual periods"
        );
        if self.payment_frequency.is_zero_length() {
            return Err(Error::invalid(format!(
                "payment frequency {} must have a positive length",
                self.payment_frequency
            )));
        }
        let group = if self.payment_frequency.is_term() {
            accrual_periods.len()
        } else {
            match schedule.frequency() {
                Some(f) if f.is_term() => accrual_periods.len(),
                Some(f) => f.periods_in(&self.payment_frequency)?,
                None => 1,
            }
        };
        if group == 0 {
            return Err(Error::invalid(format!(
                "payment frequency {} groups no accrual periods",
                self.payment_frequency
            )));
        }
        let calendar = schedule.calendar();
        accrual_periods
            .chunks(group)
            .map(|chunk| {
                let base = match self.payment_relative_to {
                    PaymentRelativeTo::PeriodStart => chunk[0].start_date(),
                    PaymentRelativeTo::PeriodEnd => chunk[chunk.len() - 1].end_date(),
                };
                let payment_date = calendar.advance_business_days(base, self.payment_offset_days);
                PaymentPeriod::of(payment_date, chunk.to_vec(), self.compounding_method)
            })
            .collect()
    }
}

impl fmt::Display for PaymentSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_record(
            f,
            "PaymentSchedule",
            [
                ("paymentFrequency", &self.payment_frequency as &dyn fmt::Display),
                ("paymentRelativeTo", &self.payment_relative_to as &dyn fmt::Display),
                ("paymentOffsetDays", &self.payment_offset_days as &dyn fmt::Display),
                ("compoundingMethod", &self.compounding_method as &dyn fmt::Display),
            ],
        )
    }
}

/// Only `paymentFrequency` is required; other entries take their defaults.
impl FromStr for PaymentSchedule {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let rec = parse_record(s, Some("PaymentSchedule"))?;
        let mut schedule = PaymentSchedule::of(rec.parse("paymentFrequency")?);
        if rec.get("paymentRelativeTo").is_some() {
            schedule = schedule.with_relative_to(rec.parse("paymentRelativeTo")?);
        }
        if rec.get("paymentOffsetDays").is_some() {
            schedule = schedule.with_offset_days(rec.parse("paymentOffsetDays")?);
        }
        if rec.get("compoundingMethod").is_some() {
            schedule = schedule.with_compounding(rec.parse("compoundingMethod")?);
        }
        Ok(schedule)
    }
}

impl StableHash for PaymentSchedule {
    fn stable_hash(&self) -> u64 {
        HashCombiner::for_type("PaymentSchedule")
            .add_value(&self.payment_frequency)
            .add_value(&self.payment_relative_to)
            .add_value(&self.payment_offset_days)
            .add_value(&self.compounding_method)
            .finish()
    }
}
