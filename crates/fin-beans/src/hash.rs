//! Run-stable hashing.
//!
//! `std`'s default hasher is randomly keyed per process, so bean hash codes
//! are computed with [`StableHash`] instead: every primitive has a fixed
//! hash, and aggregates fold their parts with the order-sensitive rule
//! `hash += hash * 31 + part` (wrapping).

use chrono::{Datelike, NaiveDate};
use std::sync::Arc;

/// Multiplier of the running multiply-and-add combination.
pub const HASH_MULTIPLIER: u64 = 31;

/// A hash code that depends only on the value, never on the process.
pub trait StableHash {
    /// The hash code of `self`.
    fn stable_hash(&self) -> u64;
}

/// Running, order-sensitive hash accumulator.
///
/// # Example
/// ```
/// use fin_beans::{HashCombiner, StableHash};
///
/// let mut a = HashCombiner::for_type("Pair");
/// a.add_value(&1_i32).add_value(&2_i32);
/// let mut b = HashCombiner::for_type("Pair");
/// b.add_value(&2_i32).add_value(&1_i32);
/// assert_ne!(a.finish(), b.finish());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCombiner(u64);

impl HashCombiner {
    /// Start from an explicit seed.
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Start from the hash of a type name.
    pub fn for_type(type_name: &str) -> Self {
        Self(type_name.stable_hash())
    }

    /// Fold one already-computed hash into the running value.
    pub fn add(&mut self, part: u64) -> &mut Self {
        self.0 = self
            .0
            .wrapping_add(self.0.wrapping_mul(HASH_MULTIPLIER).wrapping_add(part));
        self
    }

    /// Fold the hash of `value` into the running value.
    pub fn add_value<T: StableHash + ?Sized>(&mut self, value: &T) -> &mut Self {
        self.add(value.stable_hash())
    }

    /// The accumulated hash.
    pub fn finish(&self) -> u64 {
        self.0
    }
}

// ── Primitive impls ───────────────────────────────────────────────────────────

impl StableHash for str {
    fn stable_hash(&self) -> u64 {
        self.bytes().fold(0u64, |h, b| {
            h.wrapping_mul(HASH_MULTIPLIER).wrapping_add(u64::from(b))
        })
    }
}

impl StableHash for String {
    fn stable_hash(&self) -> u64 {
        self.as_str().stable_hash()
    }
}

impl StableHash for bool {
    fn stable_hash(&self) -> u64 {
        if *self {
            1231
        } else {
            1237
        }
    }
}

macro_rules! stable_hash_int {
    ($($t:ty),*) => {
        $(
            impl StableHash for $t {
                fn stable_hash(&self) -> u64 {
                    *self as u64
                }
            }
        )*
    };
}

stable_hash_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl StableHash for f64 {
    fn stable_hash(&self) -> u64 {
        // 0.0 == -0.0, so both must hash alike.
        if *self == 0.0 {
            0.0f64.to_bits()
        } else {
            self.to_bits()
        }
    }
}

impl StableHash for NaiveDate {
    fn stable_hash(&self) -> u64 {
        self.num_days_from_ce() as u64
    }
}

// ── Composite impls ───────────────────────────────────────────────────────────

impl<T: StableHash> StableHash for Option<T> {
    fn stable_hash(&self) -> u64 {
        self.as_ref().map_or(0, StableHash::stable_hash)
    }
}

impl<T: StableHash> StableHash for [T] {
    fn stable_hash(&self) -> u64 {
        self.iter().fold(1u64, |h, item| {
            h.wrapping_mul(HASH_MULTIPLIER)
                .wrapping_add(item.stable_hash())
        })
    }
}

impl<T: StableHash> StableHash for Vec<T> {
    fn stable_hash(&self) -> u64 {
        self.as_slice().stable_hash()
    }
}

impl<T: StableHash + ?Sized> StableHash for &T {
    fn stable_hash(&self) -> u64 {
        (**self).stable_hash()
    }
}

impl<T: StableHash + ?Sized> StableHash for Box<T> {
    fn stable_hash(&self) -> u64 {
        (**self).stable_hash()
    }
}

impl<T: StableHash + ?Sized> StableHash for Arc<T> {
    fn stable_hash(&self) -> u64 {
        (**self).stable_hash()
    }
}
