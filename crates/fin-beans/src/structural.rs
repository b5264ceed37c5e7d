//! Equality, hashing and rendering derived from a bean's descriptor table.
//!
//! These are the bodies behind [`impl_structural!`](crate::impl_structural);
//! they can also be called directly.

use crate::bean::{Bean, BeanBuilder};
use crate::hash::HashCombiner;
use std::fmt;

/// Marker rendered for an unset builder slot.
pub const UNSET: &str = "<unset>";

/// Property-by-property equality of two beans of the same type.
pub fn bean_equals<B: Bean>(a: &B, b: &B) -> bool {
    if std::ptr::eq(a, b) {
        return true;
    }
    B::meta_bean()
        .meta_properties()
        .iter()
        .all(|p| p.get(a).value_eq(p.get(b)))
}

/// The stable hash of `bean`: the hash of the bean name, folded with every
/// property hash in declaration order.
pub fn bean_hash<B: Bean>(bean: &B) -> u64 {
    let meta = B::meta_bean();
    let mut hash = HashCombiner::for_type(meta.bean_name());
    for p in meta.meta_properties() {
        hash.add(p.get(bean).value_hash());
    }
    hash.finish()
}

/// Write `Name{a=.., b=..}`.
pub fn write_bean<B: Bean>(bean: &B, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let meta = B::meta_bean();
    write!(f, "{}{{", meta.bean_name())?;
    for (i, p) in meta.meta_properties().iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}={}", p.name(), p.get(bean))?;
    }
    f.write_str("}")
}

/// Write `Name.Builder{a=.., b=<unset>}`.
pub fn write_builder<T: BeanBuilder>(builder: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let meta = <T::Bean as Bean>::meta_bean();
    write!(f, "{}.Builder{{", meta.bean_name())?;
    for (i, p) in meta.meta_properties().iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        match p.builder_get(builder) {
            Some(value) => write!(f, "{}={}", p.name(), value)?,
            None => write!(f, "{}={}", p.name(), UNSET)?,
        }
    }
    f.write_str("}")
}
