//! Business-day convention.

use fin_beans::StableHash;
use fin_core::errors::Error;
use std::fmt;
use std::str::FromStr;

/// How to adjust a date that falls on a non-business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BusinessDayConvention {
    /// Choose the first business day after the given holiday.
    Following,
    /// Choose the first business day after the given holiday unless it belongs
    /// to a different month; in that case choose the first business day before
    /// the holiday.
    ModifiedFollowing,
    /// Choose the first business day before the given holiday.
    Preceding,
    /// Choose the first business day before the given holiday unless it belongs
    /// to a different month; in that case choose the first business day after
    /// the holiday.
    ModifiedPreceding,
    /// Do not adjust (keep the original date).
    #[default]
    Unadjusted,
    /// Choose the nearest business day.  In case of a tie, use the following
    /// convention.
    Nearest,
    /// End of month: choose the last business day of the same month.
    EndOfMonth,
}

impl BusinessDayConvention {
    /// Every convention, in declaration order.
    pub const ALL: [BusinessDayConvention; 7] = [
        BusinessDayConvention::Following,
        BusinessDayConvention::ModifiedFollowing,
        BusinessDayConvention::Preceding,
        BusinessDayConvention::ModifiedPreceding,
        BusinessDayConvention::Unadjusted,
        BusinessDayConvention::Nearest,
        BusinessDayConvention::EndOfMonth,
    ];

    /// The canonical name.
    pub fn name(&self) -> &'static str {
        match self {
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::ModifiedFollowing => "ModifiedFollowing",
            BusinessDayConvention::Preceding => "Preceding",
            BusinessDayConvention::ModifiedPreceding => "ModifiedPreceding",
            BusinessDayConvention::Unadjusted => "Unadjusted",
            BusinessDayConvention::Nearest => "Nearest",
            BusinessDayConvention::EndOfMonth => "EndOfMonth",
        }
    }
}

impl fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses the canonical name; case, spaces, `-` and `_` are ignored, so
/// `"Modified Following"` is accepted too.
impl FromStr for BusinessDayConvention {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(&key))
            .ok_or_else(|| Error::invalid(format!("unknown business day convention '{s}'")))
    }
}

impl StableHash for BusinessDayConvention {
    fn stable_hash(&self) -> u64 {
        self.name().stable_hash()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_spaced_names() {
        assert_eq!(
            "Modified Following".parse::<BusinessDayConvention>().unwrap(),
            BusinessDayConvention::ModifiedFollowing
        );
        assert_eq!(
            "following".parse::<BusinessDayConvention>().unwrap(),
            BusinessDayConvention::Following
        );
        assert!("Sideways".parse::<BusinessDayConvention>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for c in BusinessDayConvention::ALL {
            assert_eq!(c.to_string().parse::<BusinessDayConvention>().unwrap(), c);
        }
    }
}
