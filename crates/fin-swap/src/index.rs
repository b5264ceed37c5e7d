//! Overnight rate indices.
//!
//! Indices are looked up by name in a fixed table of known indices.  The
//! name is the canonical text form, so `"GBP-SONIA".parse()` yields the
//! sterling overnight index.

use crate::currency::Currency;
use fin_beans::StableHash;
use fin_core::errors::Error;
use fin_time::DayCount;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// An overnight interest rate index such as `GBP-SONIA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OvernightIndex {
    name: &'static str,
    currency: Currency,
    day_count: DayCount,
    publication_lag_days: u32,
}

impl OvernightIndex {
    /// Sterling Overnight Index Average.
    pub const GBP_SONIA: OvernightIndex =
        OvernightIndex::new("GBP-SONIA", Currency::GBP, DayCount::Act365F, 0);
    /// US Federal Funds effective rate.
    pub const USD_FED_FUND: OvernightIndex =
        OvernightIndex::new("USD-FED-FUND", Currency::USD, DayCount::Act360, 1);
    /// Euro Overnight Index Average.
    pub const EUR_EONIA: OvernightIndex =
        OvernightIndex::new("EUR-EONIA", Currency::EUR, DayCount::Act360, 0);
    /// Swiss Franc Tom-Next Indexed Swaps rate.
    pub const CHF_TOIS: OvernightIndex =
        OvernightIndex::new("CHF-TOIS", Currency::CHF, DayCount::Act360, 0);
    /// Tokyo Overnight Average Rate.
    pub const JPY_TONAR: OvernightIndex =
        OvernightIndex::new("JPY-TONAR", Currency::JPY, DayCount::Act365F, 1);

    /// Every known index.
    pub const KNOWN: [OvernightIndex; 5] = [
        OvernightIndex::GBP_SONIA,
        OvernightIndex::USD_FED_FUND,
        OvernightIndex::EUR_EONIA,
        OvernightIndex::CHF_TOIS,
        OvernightIndex::JPY_TONAR,
    ];

    const fn new(
        name: &'static str,
        currency: Currency,
        day_count: DayCount,
        publication_lag_days: u32,
    ) -> Self {
        Self {
            name,
            currency,
            day_count,
            publication_lag_days,
        }
    }

    /// Look up a known index by name (case-insensitive).
    pub fn of(name: &str) -> fin_core::Result<Self> {
        KNOWN_INDICES
            .get(name.trim().to_ascii_uppercase().as_str())
            .copied()
            .ok_or_else(|| Error::invalid(format!("unknown overnight index '{name}'")))
    }

    /// The index name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The currency of the index.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// The day count the index is quoted on.
    pub fn day_count(&self) -> DayCount {
        self.day_count
    }

    /// Business days between the fixing date and its publication.
    pub fn publication_lag_days(&self) -> u32 {
        self.publication_lag_days
    }
}

static KNOWN_INDICES: LazyLock<HashMap<&'static str, OvernightIndex>> = LazyLock::new(|| {
    OvernightIndex::KNOWN
        .into_iter()
        .map(|index| (index.name, index))
        .collect()
});

impl fmt::Display for OvernightIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl FromStr for OvernightIndex {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OvernightIndex::of(s)
    }
}

impl StableHash for OvernightIndex {
    fn stable_hash(&self) -> u64 {
        self.name.stable_hash()
    }
}
