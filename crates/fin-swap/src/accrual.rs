//! `RateAccrualPeriod` — one resolved accrual period of an overnight leg.

use crate::calculation::{OvernightAccrualMethod, OvernightRateCalculation};
use crate::currency::Notional;
use crate::index::OvernightIndex;
use chrono::NaiveDate;
use fin_beans::{HashCombiner, StableHash};
use fin_core::utilities::data_formatters::write_record;
use fin_core::{Real, Spread, Time};
use fin_time::SchedulePeriod;
use std::fmt;

/// A single accrual period with its year fraction and rate observation
/// settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateAccrualPeriod {
    period: SchedulePeriod,
    year_fraction: Time,
    notional: Notional,
    index: OvernightIndex,
    accrual_method: OvernightAccrualMethod,
    rate_cut_off_days: u32,
    gearing: Real,
    spread: Spread,
}

impl RateAccrualPeriod {
    /// Resolve `period` against `calculation`; the year fraction uses the
    /// calculation's day count.
    pub fn from_period(period: &SchedulePeriod, calculation: &OvernightRateCalculation) -> Self {
        Self {
            period: *period,
            year_fraction: period.year_fraction(calculation.day_count()),
            notional: calculation.notional(),
            index: calculation.index(),
            accrual_method: calculation.accrual_method(),
            rate_cut_off_days: calculation.rate_cut_off_days(),
            gearing: calculation.gearing(),
            spread: calculation.spread(),
        }
    }

    /// Adjusted start date.
    pub fn start_date(&self) -> NaiveDate {
        self.period.start()
    }

    /// Adjusted end date.
    pub fn end_date(&self) -> NaiveDate {
        self.period.end()
    }

    /// Unadjusted start date.
    pub fn unadjusted_start_date(&self) -> NaiveDate {
        self.period.unadjusted_start()
    }

    /// Unadjusted end date.
    pub fn unadjusted_end_date(&self) -> NaiveDate {
        self.period.unadjusted_end()
    }

    /// The underlying schedule period.
    pub fn schedule_period(&self) -> &SchedulePeriod {
        &self.period
    }

    /// Year fraction under the calculation's day count.
    pub fn year_fraction(&self) -> Time {
        self.year_fraction
    }

    /// The notional accrued on.
    pub fn notional(&self) -> Notional {
        self.notional
    }

    /// The observed index.
    pub fn index(&self) -> OvernightIndex {
        self.index
    }

    /// How fixings are combined.
    pub fn accrual_method(&self) -> OvernightAccrualMethod {
        self.accrual_method
    }

    /// The rate cut-off in days.
    pub fn rate_cut_off_days(&self) -> u32 {
        self.rate_cut_off_days
    }

    /// Multiplier applied to the index rate.
    pub fn gearing(&self) -> Real {
        self.gearing
    }

    /// Spread added to the geared rate.
    pub fn spread(&self) -> Spread {
        self.spread
    }
}

impl fmt::Display for RateAccrualPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (start, end) = (self.start_date(), self.end_date());
        let (unadjusted_start, unadjusted_end) =
            (self.unadjusted_start_date(), self.unadjusted_end_date());
        write_record(
            f,
            "RateAccrualPeriod",
            [
                ("startDate", &start as &dyn fmt::Display),
                ("endDate", &end as &dyn fmt::Display),
                ("unadjustedStartDate", &unadjusted_start as &dyn fmt::Display),
                ("unadjustedEndDate", &unadjusted_end as &dyn fmt::Display),
                ("yearFraction", &self.year_fraction as &dyn fmt::Display),
                ("notional", &self.notional as &dyn fmt::Display),
                ("index", &self.index as &dyn fmt::Display),
                ("accrualMethod", &self.accrual_method as &dyn fmt::Display),
                ("rateCutOffDays", &self.rate_cut_off_days as &dyn fmt::Display),
                ("gearing", &self.gearing as &dyn fmt::Display),
                ("spread", &self.spread as &dyn fmt::Display),
            ],
        )
    }
}

impl StableHash for RateAccrualPeriod {
    fn stable_hash(&self) -> u64 {
        HashCombiner::for_type("RateAccrualPeriod")
            .add_value(&self.period.start())
            .add_value(&self.period.end())
            .add_value(&self.period.unadjusted_start())
            .add_value(&self.period.unadjusted_end())
            .add_value(&self.year_fraction)
            .add_value(&self.notional)
            .add_value(&self.index)
            .add_value(&self.accrual_method)
            .add_value(&self.rate_cut_off_days)
            .add_value(&self.gearing)
            .add_value(&self.spread)
            .finish()
    }
}
