//! `Calendar` trait, the built-in holiday calendars, and
//! [`BusinessDayAdjustment`].
//!
//! A calendar knows which dates are business days and can adjust dates
//! according to a [`BusinessDayConvention`].

use crate::business_day_convention::BusinessDayConvention;
use chrono::{Datelike, Days, NaiveDate, Weekday};
use fin_beans::{HashCombiner, StableHash};
use fin_core::errors::Error;
use fin_core::utilities::data_formatters::write_record;
use fin_core::utilities::data_parsers::parse_record;
use std::fmt;
use std::str::FromStr;

/// A financial calendar.
pub trait Calendar: fmt::Debug + Send + Sync {
    /// Human-readable name.
    fn name(&self) -> &str;

    /// Return `true` if `date` is a business day in this calendar.
    fn is_business_day(&self, date: NaiveDate) -> bool;

    /// Return `true` if `date` is a holiday (non-business) day.
    fn is_holiday(&self, date: NaiveDate) -> bool {
        !self.is_business_day(date)
    }

    /// Return `true` if `date` falls on a Saturday or Sunday.
    fn is_weekend(&self, date: NaiveDate) -> bool {
        matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Return the last business day of the month containing `date`.
    fn end_of_month(&self, date: NaiveDate) -> NaiveDate {
        self.adjust(last_day_of_month(date), BusinessDayConvention::Preceding)
    }

    /// Adjust `date` according to the given business-day convention.
    fn adjust(&self, mut date: NaiveDate, convention: BusinessDayConvention) -> NaiveDate {
        match convention {
            BusinessDayConvention::Unadjusted => date,
            BusinessDayConvention::Following => {
                while self.is_holiday(date) {
                    date = date + Days::new(1);
                }
                date
            }
            BusinessDayConvention::ModifiedFollowing => {
                let adjusted = self.adjust(date, BusinessDayConvention::Following);
                if adjusted.month() != date.month() {
                    self.adjust(date, BusinessDayConvention::Preceding)
                } else {
                    adjusted
                }
            }
            BusinessDayConvention::Preceding => {
                while self.is_holiday(date) {
                    date = date - Days::new(1);
                }
                date
            }
            BusinessDayConvention::ModifiedPreceding => {
                let adjusted = self.adjust(date, BusinessDayConvention::Preceding);
                if adjusted.month() != date.month() {
                    self.adjust(date, BusinessDayConvention::Following)
                } else {
                    adjusted
                }
            }
            BusinessDayConvention::Nearest => {
                if self.is_business_day(date) {
                    return date;
                }
                let fwd = self.adjust(date, BusinessDayConvention::Following);
                let bwd = self.adjust(date, BusinessDayConvention::Preceding);
                if (fwd - date) <= (date - bwd) {
                    fwd
                } else {
                    bwd
                }
            }
            BusinessDayConvention::EndOfMonth => self.end_of_month(date),
        }
    }

    /// Advance `date` by `n` business days (backwards if `n < 0`).
    fn advance_business_days(&self, mut date: NaiveDate, n: i32) -> NaiveDate {
        let mut remaining = n.unsigned_abs();
        while remaining > 0 {
            date = if n > 0 {
                date + Days::new(1)
            } else {
                date - Days::new(1)
            };
            if self.is_business_day(date) {
                remaining -= 1;
            }
        }
        date
    }

    /// Count the business days between `d1` (exclusive) and `d2`
    /// (inclusive).  Negative if `d2 < d1`.
    fn business_days_between(&self, d1: NaiveDate, d2: NaiveDate) -> i32 {
        let (start, end, sign) = if d2 >= d1 { (d1, d2, 1) } else { (d2, d1, -1) };
        let count = start
            .iter_days()
            .skip(1)
            .take_while(|d| *d <= end)
            .filter(|d| self.is_business_day(*d))
            .count();
        sign * count as i32
    }
}

fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let first = date.with_day(1).unwrap_or(date);
    first
        .checked_add_months(chrono::Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

// ── Built-in calendars ────────────────────────────────────────────────────────

/// The holiday calendars available to schedule definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HolidayCalendar {
    /// Every day is a business day.
    #[default]
    NoHolidays,
    /// Saturdays and Sundays are holidays; there are no other holidays.
    SatSun,
}

impl Calendar for HolidayCalendar {
    fn name(&self) -> &str {
        match self {
            HolidayCalendar::NoHolidays => "NoHolidays",
            HolidayCalendar::SatSun => "SatSun",
        }
    }

    fn is_business_day(&self, date: NaiveDate) -> bool {
        match self {
            HolidayCalendar::NoHolidays => true,
            HolidayCalendar::SatSun => !self.is_weekend(date),
        }
    }
}

impl fmt::Display for HolidayCalendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HolidayCalendar {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NOHOLIDAYS" | "NULL" => Ok(HolidayCalendar::NoHolidays),
            "SATSUN" | "WEEKENDSONLY" => Ok(HolidayCalendar::SatSun),
            _ => Err(Error::invalid(format!("unknown holiday calendar '{s}'"))),
        }
    }
}

impl StableHash for HolidayCalendar {
    fn stable_hash(&self) -> u64 {
        self.name().stable_hash()
    }
}

// ── Business-day adjustment ───────────────────────────────────────────────────

/// A business-day convention paired with the calendar it applies to.
///
/// Text form: `BusinessDayAdjustment{convention=ModifiedFollowing, calendar=SatSun}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BusinessDayAdjustment {
    convention: BusinessDayConvention,
    calendar: HolidayCalendar,
}

impl BusinessDayAdjustment {
    /// No adjustment.
    pub const NONE: BusinessDayAdjustment = BusinessDayAdjustment {
        convention: BusinessDayConvention::Unadjusted,
        calendar: HolidayCalendar::NoHolidays,
    };

    /// Pair `convention` with `calendar`.
    pub fn of(convention: BusinessDayConvention, calendar: HolidayCalendar) -> Self {
        Self {
            convention,
            calendar,
        }
    }

    /// The convention.
    pub fn convention(&self) -> BusinessDayConvention {
        self.convention
    }

    /// The calendar.
    pub fn calendar(&self) -> HolidayCalendar {
        self.calendar
    }

    /// Adjust `date`.
    pub fn adjust(&self, date: NaiveDate) -> NaiveDate {
        self.calendar.adjust(date, self.convention)
    }
}

impl fmt::Display for BusinessDayAdjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_record(
            f,
            "BusinessDayAdjustment",
            [
                ("convention", &self.convention as &dyn fmt::Display),
                ("calendar", &self.calendar as &dyn fmt::Display),
            ],
        )
    }
}

impl FromStr for BusinessDayAdjustment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rec = parse_record(s, Some("BusinessDayAdjustment"))?;
        Ok(Self {
            convention: rec.parse("convention")?,
            calendar: rec.parse("calendar")?,
        })
    }
}

impl StableHash for BusinessDayAdjustment {
    fn stable_hash(&self) -> u64 {
        HashCombiner::for_type("BusinessDayAdjustment")
            .add_value(&self.convention)
            .add_value(&self.calendar)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn no_holidays_always_business() {
        let cal = HolidayCalendar::NoHolidays;
        assert!(cal.is_business_day(date(2023, 12, 25)));
        assert!(cal.is_business_day(date(2023, 9, 2)));
    }

    #[test]
    fn sat_sun_saturday() {
        let cal = HolidayCalendar::SatSun;
        // 2023-09-02 is a Saturday
        assert!(!cal.is_business_day(date(2023, 9, 2)));
        assert!(cal.is_business_day(date(2023, 9, 4)));
    }

    #[test]
    fn adjust_following_and_preceding() {
        let cal = HolidayCalendar::SatSun;
        let sat = date(2023, 9, 2);
        assert_eq!(
            cal.adjust(sat, BusinessDayConvention::Following),
            date(2023, 9, 4)
        );
        assert_eq!(
            cal.adjust(sat, BusinessDayConvention::Preceding),
            date(2023, 9, 1)
        );
    }

    #[test]
    fn modified_following_stays_in_month() {
        // 2023-09-30 is a Saturday; Following would leave September.
        let cal = HolidayCalendar::SatSun;
        assert_eq!(
            cal.adjust(date(2023, 9, 30), BusinessDayConvention::ModifiedFollowing),
            date(2023, 9, 29)
        );
    }

    #[test]
    fn business_days_between() {
        let cal = HolidayCalendar::SatSun;
        // Monday to Friday: Tue, Wed, Thu, Fri
        assert_eq!(cal.business_days_between(date(2023, 9, 4), date(2023, 9, 8)), 4);
        assert_eq!(cal.business_days_between(date(2023, 9, 8), date(2023, 9, 4)), -4);
    }

    #[test]
    fn adjustment_text_form() {
        let adj = BusinessDayAdjustment::of(
            BusinessDayConvention::ModifiedFollowing,
            HolidayCalendar::SatSun,
        );
        let text = adj.to_string();
        assert_eq!(
            text,
            "BusinessDayAdjustment{convention=ModifiedFollowing, calendar=SatSun}"
        );
        assert_eq!(text.parse::<BusinessDayAdjustment>().unwrap(), adj);
        assert_eq!(BusinessDayAdjustment::default(), BusinessDayAdjustment::NONE);
    }
}
