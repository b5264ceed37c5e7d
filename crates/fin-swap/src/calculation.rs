//! The overnight rate calculation of a swap leg.

use crate::accrual::RateAccrualPeriod;
use crate::currency::Notional;
use crate::index::OvernightIndex;
use fin_beans::{HashCombiner, StableHash};
use fin_core::errors::{Error, Result};
use fin_core::utilities::data_formatters::write_record;
use fin_core::utilities::data_parsers::parse_record;
use fin_core::{ensure, Real, Spread};
use fin_time::{DayCount, Schedule};
use std::fmt;
use std::str::FromStr;

/// How daily overnight fixings are combined over an accrual period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OvernightAccrualMethod {
    /// Daily compounding of the fixings.
    #[default]
    Compounded,
    /// Arithmetic average of the fixings.
    Averaged,
}

impl fmt::Display for OvernightAccrualMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OvernightAccrualMethod::Compounded => "Compounded",
            OvernightAccrualMethod::Averaged => "Averaged",
        })
    }
}

impl FromStr for OvernightAccrualMethod {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compounded" => Ok(OvernightAccrualMethod::Compounded),
            "averaged" => Ok(OvernightAccrualMethod::Averaged),
            _ => Err(Error::invalid(format!("unknown overnight accrual method '{s}'"))),
        }
    }
}

impl StableHash for OvernightAccrualMethod {
    fn stable_hash(&self) -> u64 {
        self.to_string().stable_hash()
    }
}

/// Defines how the floating amount of an overnight leg is calculated:
/// notional, index, day count, fixing aggregation, gearing and spread.
///
/// Text form:
/// `OvernightRateCalculation{notional=Notional{..}, index=GBP-SONIA, dayCount=Act/365F, accrualMethod=Compounded, rateCutOffDays=0, gearing=1, spread=0}`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OvernightRateCalculation {
    notional: Notional,
    index: OvernightIndex,
    day_count: DayCount,
    accrual_method: OvernightAccrualMethod,
    rate_cut_off_days: u32,
    gearing: Real,
    spread: Spread,
}

impl OvernightRateCalculation {
    /// A calculation with the defaults: the index's day count, compounded
    /// fixings, no rate cut-off, gearing 1 and no spread.
    pub fn of(notional: Notional, index: OvernightIndex) -> Self {
        Self {
            notional,
            index,
            day_count: index.day_count(),
            accrual_method: OvernightAccrualMethod::Compounded,
            rate_cut_off_days: 0,
            gearing: 1.0,
            spread: 0.0,
        }
    }

    /// Begin a calculation with non-default settings.
    pub fn builder(notional: Notional, index: OvernightIndex) -> OvernightRateCalculationBuilder {
        OvernightRateCalculationBuilder {
            calculation: Self::of(notional, index),
        }
    }

    /// The notional.
    pub fn notional(&self) -> Notional {
        self.notional
    }

    /// The overnight index.
    pub fn index(&self) -> OvernightIndex {
        self.index
    }

    /// The accrual day count.
    pub fn day_count(&self) -> DayCount {
        self.day_count
    }

    /// How fixings are combined.
    pub fn accrual_method(&self) -> OvernightAccrualMethod {
        self.accrual_method
    }

    /// Number of days before the period end after which the rate is fixed.
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

    /// One accrual period per period of `schedule`.
    pub fn create_accrual_periods(&self, schedule: &Schedule) -> Result<Vec<RateAccrualPeriod>> {
        Ok(schedule
            .periods()
            .iter()
            .map(|period| RateAccrualPeriod::from_period(period, self))
            .collect())
    }
}

impl fmt::Display for OvernightRateCalculation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_record(
            f,
            "OvernightRateCalculation",
            [
                ("notional", &self.notional as &dyn fmt::Display),
                ("index", &self.index as &dyn fmt::Display),
                ("dayCount", &self.day_count as &dyn fmt::Display),
                ("accrualMethod", &self.accrual_method as &dyn fmt::Display),
                ("rateCutOffDays", &self.rate_cut_off_days as &dyn fmt::Display),
                ("gearing", &self.gearing as &dyn fmt::Display),
                ("spread", &self.spread as &dyn fmt::Display),
            ],
        )
    }
}

/// Missing entries other than `notional` and `index` take their defaults.
impl FromStr for OvernightRateCalculation {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let rec = parse_record(s, Some("OvernightRateCalculation"))?;
        let mut builder = Self::builder(rec.parse("notional")?, rec.parse("index")?);
        if rec.get("dayCount").is_some() {
            builder = builder.with_day_count(rec.parse("dayCount")?);
        }
        if rec.get("accrualMethod").is_some() {
            builder = builder.with_accrual_method(rec.parse("accrualMethod")?);
        }
        if rec.get("rateCutOffDays").is_some() {
            builder = builder.with_rate_cut_off_days(rec.parse("rateCutOffDays")?);
        }
        if rec.get("gearing").is_some() {
            builder = builder.with_gearing(rec.parse("gearing")?);
        }
        if rec.get("spread").is_some() {
            builder = builder.with_spread(rec.parse("spread")?);
        }
        builder.build()
    }
}

impl StableHash for OvernightRateCalculation {
    fn stable_hash(&self) -> u64 {
        HashCombiner::for_type("OvernightRateCalculation")
            .add_value(&self.notional)
            .add_value(&self.index)
            .add_value(&self.day_count)
            .add_value(&self.accrual_method)
            .add_value(&self.rate_cut_off_days)
            .add_value(&self.gearing)
            .add_value(&self.spread)
            .finish()
    }
}

/// Builder for [`OvernightRateCalculation`].
#[derive(Debug, Clone)]
pub struct OvernightRateCalculationBuilder {
    calculation: OvernightRateCalculation,
}

impl OvernightRateCalculationBuilder {
    /// Override the index's day count.
    pub fn with_day_count(mut self, day_count: DayCount) -> Self {
        self.calculation.day_count = day_count;
        self
    }

    /// Set how fixings are combined.
    pub fn with_accrual_method(mut self, method: OvernightAccrualMethod) -> Self {
        self.calculation.accrual_method = method;
        self
    }

    /// Set the rate cut-off.
    pub fn with_rate_cut_off_days(mut self, days: u32) -> Self {
        self.calculation.rate_cut_off_days = days;
        self
    }

    /// Set the gearing.
    pub fn with_gearing(mut self, gearing: Real) -> Self {
        self.calculation.gearing = gearing;
        self
    }

    /// Set the spread.
    pub fn with_spread(mut self, spread: Spread) -> Self {
        self.calculation.spread = spread;
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<OvernightRateCalculation> {
        let c = self.calculation;
        ensure!(c.gearing.is_finite(), "gearing must be finite, got {}", c.gearing);
        ensure!(c.spread.is_finite(), "spread must be finite, got {}", c.spread);
        Ok(c)
    }
}
