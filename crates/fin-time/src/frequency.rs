//! `Frequency` — how often accrual or payment periods recur.

use chrono::{Days, Months, NaiveDate};
use fin_beans::{HashCombiner, StableHash};
use fin_core::errors::{Error, Result};
use fin_core::utilities::data_parsers::parse_period_string;
use std::fmt;
use std::str::FromStr;

/// Accrual / payment frequency.
///
/// A frequency is either a fixed calendar period (days, weeks or months) or
/// [`Frequency::Term`], meaning a single period covering the whole term.
///
/// Text form: `1D`, `2W`, `3M`, `12M`, `Term`.  Years are accepted on input
/// and normalised to months (`1Y` parses as `12M`); a leading `P` is
/// accepted too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    /// Every `n` days.
    Days(u32),
    /// Every `n` weeks.
    Weeks(u32),
    /// Every `n` months.
    Months(u32),
    /// Once, over the whole term.
    Term,
}

impl Frequency {
    /// Daily.
    pub const P1D: Frequency = Frequency::Days(1);
    /// Weekly.
    pub const P1W: Frequency = Frequency::Weeks(1);
    /// Monthly.
    pub const P1M: Frequency = Frequency::Months(1);
    /// Quarterly.
    pub const P3M: Frequency = Frequency::Months(3);
    /// Semi-annual.
    pub const P6M: Frequency = Frequency::Months(6);
    /// Annual.
    pub const P12M: Frequency = Frequency::Months(12);

    /// Return `true` for [`Frequency::Term`].
    pub fn is_term(&self) -> bool {
        matches!(self, Frequency::Term)
    }

    /// Return `true` for a fixed period of length zero, such as `0M`.
    ///
    /// Such a frequency never advances a date, so it cannot generate a
    /// schedule or group periods.
    pub fn is_zero_length(&self) -> bool {
        matches!(
            self,
            Frequency::Days(0) | Frequency::Weeks(0) | Frequency::Months(0)
        )
    }

    /// The length in months, for month-based frequencies.
    pub fn months(&self) -> Option<u32> {
        match self {
            Frequency::Months(n) => Some(*n),
            _ => None,
        }
    }

    /// The length in days, for day- and week-based frequencies.
    pub fn days(&self) -> Option<u32> {
        match self {
            Frequency::Days(n) => Some(*n),
            Frequency::Weeks(n) => Some(7 * n),
            _ => None,
        }
    }

    /// Number of periods per year.  `None` for [`Frequency::Term`] and for
    /// periods that do not divide a year evenly.
    pub fn periods_per_year(&self) -> Option<u32> {
        match self {
            Frequency::Months(n) if *n > 0 && 12 % n == 0 => Some(12 / n),
            Frequency::Weeks(n) if *n > 0 && 52 % n == 0 => Some(52 / n),
            Frequency::Days(n) if *n > 0 && 364 % n == 0 => Some(364 / n),
            _ => None,
        }
    }

    /// Move `date` by `n` whole periods (backwards if `n < 0`).
    ///
    /// Month arithmetic clamps to the end of the month, so 31 January plus
    /// one month is the last day of February.
    pub fn advance(&self, date: NaiveDate, n: i32) -> Result<NaiveDate> {
        let overflow = || Error::Date(format!("cannot move {date} by {n} x {self}"));
        let steps = n.unsigned_abs();
        let moved = match self {
            Frequency::Term => return Err(Error::invalid("a Term frequency has no period length")),
            Frequency::Months(m) => {
                let months = Months::new(m.checked_mul(steps).ok_or_else(overflow)?);
                if n >= 0 {
                    date.checked_add_months(months)
                } else {
                    date.checked_sub_months(months)
                }
            }
            Frequency::Days(_) | Frequency::Weeks(_) => {
                let per = u64::from(self.days().unwrap_or(0));
                let days = Days::new(per * u64::from(steps));
                if n >= 0 {
                    date.checked_add_days(days)
                } else {
                    date.checked_sub_days(days)
                }
            }
        };
        moved.ok_or_else(overflow)
    }

    /// How many periods of `self` make up one period of `longer`.
    ///
    /// Fails unless both are month-based, or both day/week-based, and
    /// `longer` is a positive whole multiple of `self`.
    pub fn periods_in(&self, longer: &Frequency) -> Result<usize> {
        if self.is_zero_length() || longer.is_zero_length() {
            return Err(Error::invalid(format!(
                "cannot divide {longer} into periods of {self}"
            )));
        }
        let ratio = match (self, longer) {
            (Frequency::Months(a), Frequency::Months(b)) if b % a == 0 => b / a,
            (short, long) => match (short.days(), long.days()) {
                (Some(a), Some(b)) if b % a == 0 => b / a,
                _ => {
                    return Err(Error::invalid(format!(
                        "{longer} is not a whole multiple of {self}"
                    )))
                }
            },
        };
        Ok(ratio as usize)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Days(n) => write!(f, "{n}D"),
            Frequency::Weeks(n) => write!(f, "{n}W"),
            Frequency::Months(n) => write!(f, "{n}M"),
            Frequency::Term => f.write_str("Term"),
        }
    }
}

impl FromStr for Frequency {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("term") {
            return Ok(Frequency::Term);
        }
        let (length, unit) =
            parse_period_string(s).ok_or_else(|| Error::invalid(format!("bad frequency '{s}'")))?;
        let length = u32::try_from(length)
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| Error::invalid(format!("frequency '{s}' must be positive")))?;
        Ok(match unit {
            'D' => Frequency::Days(length),
            'W' => Frequency::Weeks(length),
            'M' => Frequency::Months(length),
            _ => Frequency::Months(length.saturating_mul(12)),
        })
    }
}

impl StableHash for Frequency {
    fn stable_hash(&self) -> u64 {
        let mut h = HashCombiner::for_type("Frequency");
        match self {
            Frequency::Days(n) => h.add(1).add_value(n),
            Frequency::Weeks(n) => h.add(2).add_value(n),
            Frequency::Months(n) => h.add(3).add_value(n),
            Frequency::Term => h.add(4),
        };
        h.finish()
    }
}
