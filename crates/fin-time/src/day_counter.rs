//! Day-count conventions.
//!
//! A day count computes the **year fraction** between two dates, used when
//! accruing interest over a period.

use chrono::{Datelike, NaiveDate};
use fin_beans::StableHash;
use fin_core::errors::Error;
use fin_core::{Real, Time};
use std::fmt;
use std::str::FromStr;

/// A convention for counting the fraction of a year between two dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayCount {
    /// Actual/360: `actual_days / 360`.
    Act360,
    /// Actual/365 (Fixed): `actual_days / 365`.
    Act365F,
    /// 30/360 (bond basis): every month counts 30 days.
    Thirty360,
}

impl DayCount {
    /// Every convention, in declaration order.
    pub const ALL: [DayCount; 3] = [DayCount::Act360, DayCount::Act365F, DayCount::Thirty360];

    /// Canonical name (e.g. `"Act/365F"`).
    pub fn name(&self) -> &'static str {
        match self {
            DayCount::Act360 => "Act/360",
            DayCount::Act365F => "Act/365F",
            DayCount::Thirty360 => "30/360",
        }
    }

    /// Number of days between `d1` and `d2` according to this convention.
    pub fn day_count(&self, d1: NaiveDate, d2: NaiveDate) -> i64 {
        match self {
            DayCount::Act360 | DayCount::Act365F => (d2 - d1).num_days(),
            DayCount::Thirty360 => {
                let mut dd1 = d1.day() as i64;
                let mut dd2 = d2.day() as i64;
                if dd1 == 31 {
                    dd1 = 30;
                }
                if dd2 == 31 && dd1 == 30 {
                    dd2 = 30;
                }
                360 * (d2.year() as i64 - d1.year() as i64)
                    + 30 * (d2.month() as i64 - d1.month() as i64)
                    + (dd2 - dd1)
            }
        }
    }

    /// Fraction of a year between `d1` and `d2`.
    pub fn year_fraction(&self, d1: NaiveDate, d2: NaiveDate) -> Time {
        let days = self.day_count(d1, d2) as Real;
        match self {
            DayCount::Act360 | DayCount::Thirty360 => days / 360.0,
            DayCount::Act365F => days / 365.0,
        }
    }
}

impl fmt::Display for DayCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses the canonical name, ignoring case, plus the long forms
/// `Actual/360`, `Actual/365 (Fixed)` and `30/360 (Bond Basis)`.
impl FromStr for DayCount {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ACT/360" | "ACTUAL/360" => Ok(DayCount::Act360),
            "ACT/365F" | "ACT/365 (FIXED)" | "ACTUAL/365 (FIXED)" => Ok(DayCount::Act365F),
            "30/360" | "30/360 (BOND BASIS)" => Ok(DayCount::Thirty360),
            _ => Err(Error::invalid(format!("unknown day count '{s}'"))),
        }
    }
}

impl StableHash for DayCount {
    fn stable_hash(&self) -> u64 {
        self.name().stable_hash()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn actual_360_year_fraction() {
        let yf = DayCount::Act360.year_fraction(date(2023, 1, 1), date(2023, 7, 1));
        assert_abs_diff_eq!(yf, 181.0 / 360.0, epsilon = 1e-12);
    }

    #[test]
    fn thirty_360_caps_day_31() {
        let dc = DayCount::Thirty360;
        assert_eq!(dc.day_count(date(2023, 1, 31), date(2023, 3, 31)), 60);
        assert_eq!(dc.day_count(date(2023, 1, 15), date(2024, 1, 15)), 360);
    }

    #[test]
    fn parse_long_names() {
        assert_eq!(
            "Actual/365 (Fixed)".parse::<DayCount>().unwrap(),
            DayCount::Act365F
        );
        for dc in DayCount::ALL {
            assert_eq!(dc.to_string().parse::<DayCount>().unwrap(), dc);
        }
        assert!("Act/Act".parse::<DayCount>().is_err());
    }
}
