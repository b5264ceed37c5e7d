//! Which notional exchanges an expanded leg makes.

use fin_beans::StableHash;
use fin_core::errors::Error;
use std::fmt;
use std::str::FromStr;

/// Flags for the initial, intermediate and final exchange of notional.
///
/// Text form: `NoExchange`, or the set flags joined by `+`
/// (`Initial+Intermediate+Final`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NotionalExchange {
    initial: bool,
    intermediate: bool,
    final_: bool,
}

impl NotionalExchange {
    /// No notional is exchanged.
    pub const NO_EXCHANGE: NotionalExchange = NotionalExchange::of(false, false, false);

    /// Notional exchanged at the start and at the end.
    pub const INITIAL_AND_FINAL: NotionalExchange = NotionalExchange::of(true, false, true);

    /// Build from the three flags.
    pub const fn of(initial: bool, intermediate: bool, final_: bool) -> Self {
        Self {
            initial,
            intermediate,
            final_,
        }
    }

    /// Exchange at the start of the leg.
    pub fn initial(&self) -> bool {
        self.initial
    }

    /// Exchange whenever the notional changes.
    pub fn intermediate(&self) -> bool {
        self.intermediate
    }

    /// Exchange at the end of the leg.
    pub fn is_final(&self) -> bool {
        self.final_
    }

    /// Return `true` if no flag is set.
    pub fn is_none(&self) -> bool {
        !(self.initial || self.intermediate || self.final_)
    }
}

impl fmt::Display for NotionalExchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return f.write_str("NoExchange");
        }
        let flags = [
            (self.initial, "Initial"),
            (self.intermediate, "Intermediate"),
            (self.final_, "Final"),
        ];
        let parts: Vec<&str> = flags.iter().filter(|(on, _)| *on).map(|(_, n)| *n).collect();
        f.write_str(&parts.join("+"))
    }
}

impl FromStr for NotionalExchange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("NoExchange") {
            return Ok(Self::NO_EXCHANGE);
        }
        let mut exchange = Self::NO_EXCHANGE;
        for flag in s.split('+') {
            match flag.trim().to_ascii_lowercase().as_str() {
                "initial" => exchange.initial = true,
                "intermediate" => exchange.intermediate = true,
                "final" => exchange.final_ = true,
                _ => return Err(Error::invalid(format!("unknown notional exchange '{s}'"))),
            }
        }
        Ok(exchange)
    }
}

impl StableHash for NotionalExchange {
    fn stable_hash(&self) -> u64 {
        (u64::from(self.initial) << 2 | u64::from(self.intermediate) << 1 | u64::from(self.final_))
            .stable_hash()
    }
}
