//! `PeriodicSchedule` — the accrual schedule definition of a swap leg.

use chrono::NaiveDate;
use fin_beans::{HashCombiner, StableHash};
use fin_core::errors::{Error, Result};
use fin_core::utilities::data_formatters::write_record;
use fin_core::utilities::data_parsers::{parse_iso_date, parse_record};
use fin_time::{BusinessDayAdjustment, DateGeneration, Frequency, Schedule, ScheduleBuilder};
use std::fmt;
use std::str::FromStr;

/// A regular schedule between two dates, described by its frequency,
/// business-day adjustment and generation rule.
///
/// Text form:
/// `PeriodicSchedule{startDate=2024-01-15, endDate=2025-01-15, frequency=3M, businessDayAdjustment=BusinessDayAdjustment{..}, rule=Backward}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PeriodicSchedule {
    start_date: NaiveDate,
    end_date: NaiveDate,
    frequency: Frequency,
    business_day_adjustment: BusinessDayAdjustment,
    rule: DateGeneration,
}

impl PeriodicSchedule {
    /// A schedule from `start_date` to `end_date` with backward generation.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] unless `start_date < end_date` and the
    /// frequency has a positive length.
    pub fn of(
        start_date: NaiveDate,
        end_date: NaiveDate,
        frequency: Frequency,
        business_day_adjustment: BusinessDayAdjustment,
    ) -> Result<Self> {
        if start_date >= end_date {
            return Err(Error::invalid(format!(
                "schedule start {start_date} must be before end {end_date}"
            )));
        }
        if frequency.is_zero_length() {
            return Err(Error::invalid(format!(
                "schedule frequency {frequency} must have a positive length"
            )));
        }
        Ok(Self {
            start_date,
            end_date,
            frequency,
            business_day_adjustment,
            rule: DateGeneration::Backward,
        })
    }

    /// Set the date-generation rule.
    pub fn with_rule(mut self, rule: DateGeneration) -> Self {
        self.rule = rule;
        self
    }

    /// Unadjusted start date.
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Unadjusted end date.
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// The period frequency.
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// The adjustment applied to every generated date.
    pub fn business_day_adjustment(&self) -> BusinessDayAdjustment {
        self.business_day_adjustment
    }

    /// The date-generation rule.
    pub fn rule(&self) -> DateGeneration {
        self.rule
    }

    /// Start date after business-day adjustment.
    pub fn adjusted_start_date(&self) -> NaiveDate {
        self.business_day_adjustment.adjust(self.start_date)
    }

    /// End date after business-day adjustment.
    pub fn adjusted_end_date(&self) -> NaiveDate {
        self.business_day_adjustment.adjust(self.end_date)
    }

    /// Generate the concrete schedule.
    pub fn create_schedule(&self) -> Result<Schedule> {
        ScheduleBuilder::new(self.start_date, self.end_date, self.frequency)
            .with_adjustment(self.business_day_adjustment)
            .with_rule(self.rule)
            .build()
    }
}

impl fmt::Display for PeriodicSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_record(
            f,
            "PeriodicSchedule",
            [
                ("startDate", &self.start_date as &dyn fmt::Display),
                ("endDate", &self.end_date as &dyn fmt::Display),
                ("frequency", &self.frequency as &dyn fmt::Display),
                ("businessDayAdjustment", &self.business_day_adjustment as &dyn fmt::Display),
                ("rule", &self.rule as &dyn fmt::Display),
            ],
        )
    }
}

/// `businessDayAdjustment` and `rule` are optional.
impl FromStr for PeriodicSchedule {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let rec = parse_record(s, Some("PeriodicSchedule"))?;
        let adjustment = match rec.get("businessDayAdjustment") {
            Some(_) => rec.parse("businessDayAdjustment")?,
            None => BusinessDayAdjustment::NONE,
        };
        let schedule = PeriodicSchedule::of(
            parse_iso_date(rec.require("startDate")?)?,
            parse_iso_date(rec.require("endDate")?)?,
            rec.parse("frequency")?,
            adjustment,
        )?;
        Ok(match rec.get("rule") {
            Some(_) => schedule.with_rule(rec.parse("rule")?),
            None => schedule,
        })
    }
}

impl StableHash for PeriodicSchedule {
    fn stable_hash(&self) -> u64 {
        HashCombiner::for_type("PeriodicSchedule")
            .add_value(&self.start_date)
            .add_value(&self.end_date)
            .add_value(&self.frequency)
            .add_value(&self.business_day_adjustment)
            .add_value(&self.rule)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fin_time::{BusinessDayConvention, HolidayCalendar};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn start_must_precede_end() {
        let err = PeriodicSchedule::of(
            date(2024, 6, 1),
            date(2024, 6, 1),
            Frequency::P3M,
            BusinessDayAdjustment::NONE,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn zero_length_frequency_is_rejected() {
        for frequency in [Frequency::Days(0), Frequency::Weeks(0), Frequency::Months(0)] {
            let err = PeriodicSchedule::of(
                date(2024, 1, 15),
                date(2024, 7, 15),
                frequency,
                BusinessDayAdjustment::NONE,
            )
            .unwrap_err();
            assert!(matches!(err, Error::InvalidArgument(_)));
        }
    }

    #[test]
    fn adjusted_dates_and_schedule() {
        // 2022-10-01 is a Saturday.
        let adj =
            BusinessDayAdjustment::of(BusinessDayConvention::Following, HolidayCalendar::SatSun);
        let ps = PeriodicSchedule::of(date(2022, 10, 1), date(2023, 4, 1), Frequency::P3M, adj)
            .unwrap();
        assert_eq!(ps.adjusted_start_date(), date(2022, 10, 3));
        assert_eq!(ps.adjusted_end_date(), date(2023, 4, 3));
        let schedule = ps.create_schedule().unwrap();
        assert_eq!(schedule.period_count(), 2);
        assert_eq!(schedule.start_date(), ps.adjusted_start_date());
        assert_eq!(schedule.end_date(), ps.adjusted_end_date());
    }

    #[test]
    fn text_form_round_trips() {
        let adj = BusinessDayAdjustment::of(
            BusinessDayConvention::ModifiedFollowing,
            HolidayCalendar::SatSun,
        );
        let ps = PeriodicSchedule::of(date(2024, 1, 15), date(2025, 1, 15), Frequency::P6M, adj)
            .unwrap()
            .with_rule(DateGeneration::Forward);
        assert_eq!(ps.to_string().parse::<PeriodicSchedule>().unwrap(), ps);

        let short: PeriodicSchedule = "PeriodicSchedule{startDate=2024-01-15, endDate=2025-01-15, frequency=12M}"
            .parse()
            .unwrap();
        assert_eq!(short.rule(), DateGeneration::Backward);
        assert_eq!(short.business_day_adjustment(), BusinessDayAdjustment::NONE);
    }
}
