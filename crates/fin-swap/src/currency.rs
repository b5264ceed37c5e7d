//! `Currency` and `Notional`.

use fin_beans::{HashCombiner, StableHash};
use fin_core::errors::Error;
use fin_core::utilities::data_formatters::write_record;
use fin_core::utilities::data_parsers::parse_record;
use fin_core::Real;
use std::fmt;
use std::str::FromStr;

/// An ISO-4217 style three-letter currency code.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Currency([u8; 3]);

impl Currency {
    /// Pound sterling.
    pub const GBP: Currency = Currency(*b"GBP");
    /// US dollar.
    pub const USD: Currency = Currency(*b"USD");
    /// Euro.
    pub const EUR: Currency = Currency(*b"EUR");
    /// Swiss franc.
    pub const CHF: Currency = Currency(*b"CHF");
    /// Japanese yen.
    pub const JPY: Currency = Currency(*b"JPY");

    /// The three-letter code.
    pub fn code(&self) -> &str {
        // Only ASCII letters are ever stored.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Debug for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Currency({})", self.code())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Parses three ASCII letters, upper-casing them.
impl FromStr for Currency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().as_bytes();
        match code {
            [a, b, c] if code.iter().all(u8::is_ascii_alphabetic) => Ok(Currency([
                a.to_ascii_uppercase(),
                b.to_ascii_uppercase(),
                c.to_ascii_uppercase(),
            ])),
            _ => Err(Error::invalid(format!("invalid currency code '{s}'"))),
        }
    }
}

impl StableHash for Currency {
    fn stable_hash(&self) -> u64 {
        self.code().stable_hash()
    }
}

/// An amount of money in a currency.
///
/// Text form: `Notional{currency=GBP, amount=1000000}`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Notional {
    currency: Currency,
    amount: Real,
}

impl Notional {
    /// A notional of `amount` in `currency`.
    ///
    /// # Errors
    /// Fails if `amount` is not finite.
    pub fn of(currency: Currency, amount: Real) -> fin_core::Result<Self> {
        fin_core::ensure!(amount.is_finite(), "notional amount must be finite, got {amount}");
        Ok(Self { currency, amount })
    }

    /// The currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// The amount.
    pub fn amount(&self) -> Real {
        self.amount
    }
}

impl fmt::Display for Notional {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_record(
            f,
            "Notional",
            [
                ("currency", &self.currency as &dyn fmt::Display),
                ("amount", &self.amount as &dyn fmt::Display),
            ],
        )
    }
}

impl FromStr for Notional {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rec = parse_record(s, Some("Notional"))?;
        Notional::of(rec.parse("currency")?, rec.parse("amount")?)
    }
}

impl StableHash for Notional {
    fn stable_hash(&self) -> u64 {
        HashCombiner::for_type("Notional")
            .add_value(&self.currency)
            .add_value(&self.amount)
            .finish()
    }
}
