//! `Schedule` — an ordered sequence of accrual periods.
//!
//! A schedule is generated from a start date, end date and frequency by
//! [`ScheduleBuilder`]: unadjusted dates are rolled forward or backward
//! from one end of the term, then each date is moved to a business day by
//! a [`BusinessDayAdjustment`].

use crate::calendar::{BusinessDayAdjustment, HolidayCalendar};
use crate::day_counter::DayCount;
use crate::frequency::Frequency;
use chrono::NaiveDate;
use fin_beans::StableHash;
use fin_core::errors::{Error, Result};
use fin_core::{ensure, Time};
use std::fmt;
use std::str::FromStr;

/// Date generation rule for schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DateGeneration {
    /// Dates generated backward from the end date; any stub is at the front.
    #[default]
    Backward,
    /// Dates generated forward from the start date; any stub is at the back.
    Forward,
}

impl fmt::Display for DateGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DateGeneration::Backward => "Backward",
            DateGeneration::Forward => "Forward",
        })
    }
}

impl FromStr for DateGeneration {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "backward" => Ok(DateGeneration::Backward),
            "forward" => Ok(DateGeneration::Forward),
            _ => Err(Error::invalid(format!("unknown date generation rule '{s}'"))),
        }
    }
}

impl StableHash for DateGeneration {
    fn stable_hash(&self) -> u64 {
        self.to_string().stable_hash()
    }
}

/// One period of a schedule: adjusted and unadjusted boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SchedulePeriod {
    start: NaiveDate,
    end: NaiveDate,
    unadjusted_start: NaiveDate,
    unadjusted_end: NaiveDate,
}

impl SchedulePeriod {
    /// A period with explicit adjusted and unadjusted boundaries.
    pub fn new(
        start: NaiveDate,
        end: NaiveDate,
        unadjusted_start: NaiveDate,
        unadjusted_end: NaiveDate,
    ) -> Self {
        Self {
            start,
            end,
            unadjusted_start,
            unadjusted_end,
        }
    }

    /// A period whose boundaries need no adjustment.
    pub fn unadjusted(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(start, end, start, end)
    }

    /// Adjusted start date.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Adjusted end date.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Start date before business-day adjustment.
    pub fn unadjusted_start(&self) -> NaiveDate {
        self.unadjusted_start
    }

    /// End date before business-day adjustment.
    pub fn unadjusted_end(&self) -> NaiveDate {
        self.unadjusted_end
    }

    /// Calendar days from start to end.
    pub fn length_in_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Year fraction of the adjusted period.
    pub fn year_fraction(&self, day_count: DayCount) -> Time {
        day_count.year_fraction(self.start, self.end)
    }
}

/// An ordered, non-empty sequence of contiguous accrual periods.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    periods: Vec<SchedulePeriod>,
    frequency: Option<Frequency>,
    calendar: HolidayCalendar,
}

impl Schedule {
    /// Build a schedule from explicit, already adjusted dates.
    ///
    /// Requires at least two strictly increasing dates.  The schedule has no
    /// frequency and uses [`HolidayCalendar::NoHolidays`].
    pub fn from_dates(dates: Vec<NaiveDate>) -> Result<Self> {
        if dates.len() < 2 {
            return Err(Error::InvalidArgument(format!(
                "a schedule needs at least 2 dates, got {}",
                dates.len()
            )));
        }
        if let Some(w) = dates.windows(2).find(|w| w[0] >= w[1]) {
            return Err(Error::InvalidArgument(format!(
                "schedule dates must be strictly increasing: {} then {}",
                w[0], w[1]
            )));
        }
        let periods = dates
            .windows(2)
            .map(|w| SchedulePeriod::unadjusted(w[0], w[1]))
            .collect();
        Ok(Self {
            periods,
            frequency: None,
            calendar: HolidayCalendar::NoHolidays,
        })
    }

    /// Replace the calendar used for business-day arithmetic on this schedule.
    pub fn with_calendar(mut self, calendar: HolidayCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    /// All periods, in order.
    pub fn periods(&self) -> &[SchedulePeriod] {
        &self.periods
    }

    /// The `i`-th period.
    pub fn period(&self, i: usize) -> Option<&SchedulePeriod> {
        self.periods.get(i)
    }

    /// Number of periods (at least one).
    pub fn period_count(&self) -> usize {
        self.periods.len()
    }

    /// Return `true` if the schedule is a single period.
    pub fn is_single_period(&self) -> bool {
        self.periods.len() == 1
    }

    /// The adjusted period boundaries: `period_count() + 1` dates.
    pub fn dates(&self) -> Vec<NaiveDate> {
        std::iter::once(self.start_date())
            .chain(self.periods.iter().map(SchedulePeriod::end))
            .collect()
    }

    /// Adjusted start of the first period.
    pub fn start_date(&self) -> NaiveDate {
        self.periods[0].start
    }

    /// Adjusted end of the last period.
    pub fn end_date(&self) -> NaiveDate {
        self.periods[self.periods.len() - 1].end
    }

    /// The generating frequency, if the schedule was generated from one.
    pub fn frequency(&self) -> Option<Frequency> {
        self.frequency
    }

    /// The calendar of the schedule's business-day adjustment.
    pub fn calendar(&self) -> HolidayCalendar {
        self.calendar
    }
}

/// Builder for [`Schedule`].
///
/// Defaults: no business-day adjustment and [`DateGeneration::Backward`].
#[derive(Debug, Clone)]
pub struct ScheduleBuilder {
    start: NaiveDate,
    end: NaiveDate,
    frequency: Frequency,
    adjustment: BusinessDayAdjustment,
    rule: DateGeneration,
}

impl ScheduleBuilder {
    /// Begin building a schedule.
    pub fn new(start: NaiveDate, end: NaiveDate, frequency: Frequency) -> Self {
        Self {
            start,
            end,
            frequency,
            adjustment: BusinessDayAdjustment::NONE,
            rule: DateGeneration::Backward,
        }
    }

    /// Set the business-day adjustment applied to every date.
    pub fn with_adjustment(mut self, adjustment: BusinessDayAdjustment) -> Self {
        self.adjustment = adjustment;
        self
    }

    /// Set the date-generation rule.
    pub fn with_rule(mut self, rule: DateGeneration) -> Self {
        self.rule = rule;
        self
    }

    /// Build the `Schedule`.
    pub fn build(&self) -> Result<Schedule> {
        ensure!(
            self.start < self.end,
            "start date {} must be before end date {}",
            self.start,
            self.end
        );
        if self.frequency.is_zero_length() {
            return Err(Error::invalid(format!(
                "cannot generate a schedule with frequency {}",
                self.frequency
            )));
        }

        let unadjusted = self.unadjusted_dates()?;
        let last = unadjusted.len() - 1;
        let mut bounds: Vec<(NaiveDate, NaiveDate)> = Vec::with_capacity(unadjusted.len());
        for (i, unadj) in unadjusted.into_iter().enumerate() {
            let adj = self.adjustment.adjust(unadj);
            match bounds.last() {
                // Collapsed onto the previous date: the term end wins.
                Some(&(_, prev)) if adj <= prev => {
                    if i == last && bounds.len() > 1 {
                        bounds.pop();
                        bounds.push((unadj, adj));
                    }
                }
                _ => bounds.push((unadj, adj)),
            }
        }
        if bounds.len() < 2 {
            return Err(Error::Date(format!(
                "schedule {} to {} collapses to a single date after adjustment",
                self.start, self.end
            )));
        }

        let periods: Vec<_> = bounds
            .windows(2)
            .map(|w| SchedulePeriod::new(w[0].1, w[1].1, w[0].0, w[1].0))
            .collect();
        tracing::debug!(
            start = %self.start,
            end = %self.end,
            frequency = %self.frequency,
            rule = %self.rule,
            periods = periods.len(),
            "schedule generated"
        );
        Ok(Schedule {
            periods,
            frequency: Some(self.frequency),
            calendar: self.adjustment.calendar(),
        })
    }

    fn unadjusted_dates(&self) -> Result<Vec<NaiveDate>> {
        if self.frequency.is_term() {
            return Ok(vec![self.start, self.end]);
        }
        let mut dates = Vec::new();
        match self.rule {
            DateGeneration::Forward => {
                dates.push(self.start);
                for n in 1.. {
                    let next = self.frequency.advance(self.start, n)?;
                    if next >= self.end {
                        break;
                    }
                    dates.push(next);
                }
                dates.push(self.end);
            }
            DateGeneration::Backward => {
                dates.push(self.end);
                for n in 1.. {
                    let prev = self.frequency.advance(self.end, -n)?;
                    if prev <= self.start {
                        break;
                    }
                    dates.push(prev);
                }
                dates.push(self.start);
                dates.reverse();
            }
        }
        Ok(dates)
    }
}
