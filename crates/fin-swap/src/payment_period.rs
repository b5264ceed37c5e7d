//! `PaymentPeriod` — one payment of an expanded leg.

use crate::accrual::RateAccrualPeriod;
use crate::currency::{Currency, Notional};
use crate::payment_schedule::CompoundingMethod;
use chrono::NaiveDate;
use fin_beans::{HashCombiner, ImmutableList, StableHash};
use fin_core::ensure;
use fin_core::errors::Result;
use fin_core::utilities::data_formatters::write_record;
use std::fmt;

/// A payment made on one date, covering one or more consecutive accrual
/// periods.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentPeriod {
    payment_date: NaiveDate,
    accrual_periods: ImmutableList<RateAccrualPeriod>,
    compounding_method: CompoundingMethod,
}

impl PaymentPeriod {
    /// A payment on `payment_date` for `accrual_periods`.
    ///
    /// # Errors
    /// Fails if `accrual_periods` is empty or not in date order.
    pub fn of(
        payment_date: NaiveDate,
        accrual_periods: Vec<RateAccrualPeriod>,
        compounding_method: CompoundingMethod,
    ) -> Result<Self> {
        ensure!(
            !accrual_periods.is_empty(),
            "a payment period needs at least one accrual period"
        );
        ensure!(
            accrual_periods
                .windows(2)
                .all(|w| w[0].end_date() <= w[1].start_date()),
            "accrual periods of a payment period must be in date order"
        );
        Ok(Self {
            payment_date,
            accrual_periods: ImmutableList::from(accrual_periods),
            compounding_method,
        })
    }

    /// The payment date.
    pub fn payment_date(&self) -> NaiveDate {
        self.payment_date
    }

    /// The accrual periods paid, in order (never empty).
    pub fn accrual_periods(&self) -> &[RateAccrualPeriod] {
        &self.accrual_periods
    }

    /// How the accrual periods are compounded.
    pub fn compounding_method(&self) -> CompoundingMethod {
        self.compounding_method
    }

    /// Start of the first accrual period.
    pub fn start_date(&self) -> NaiveDate {
        self.accrual_periods[0].start_date()
    }

    /// End of the last accrual period.
    pub fn end_date(&self) -> NaiveDate {
        self.accrual_periods[self.accrual_periods.len() - 1].end_date()
    }

    /// Notional of the first accrual period.
    pub fn notional(&self) -> Notional {
        self.accrual_periods[0].notional()
    }

    /// Currency of the payment.
    pub fn currency(&self) -> Currency {
        self.notional().currency()
    }
}

impl fmt::Display for PaymentPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_record(
            f,
            "PaymentPeriod",
            [
                ("paymentDate", &self.payment_date as &dyn fmt::Display),
                ("accrualPeriods", &self.accrual_periods as &dyn fmt::Display),
                ("compoundingMethod", &self.compounding_method as &dyn fmt::Display),
            ],
        )
    }
}

impl StableHash for PaymentPeriod {
    fn stable_hash(&self) -> u64 {
        HashCombiner::for_type("PaymentPeriod")
            .add_value(&self.payment_date)
            .add_value(&self.accrual_periods)
            .add_value(&self.compounding_method)
            .finish()
    }
}
