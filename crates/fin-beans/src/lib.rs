//! # fin-beans
//!
//! Self-describing immutable value types ("beans") without runtime
//! reflection.
//!
//! Every bean type owns a process-wide [`MetaBean`]: an ordered table of
//! [`MetaProperty`] descriptors built once on first use.  Each descriptor
//! carries the property name, its declared value type and plain `fn`
//! accessors, which is enough to drive
//!
//! * generic reads and writes by property name,
//! * the mutable builder (fresh construction, copy-with, string setters),
//! * structural equality, stable hashing and canonical rendering.
//!
//! A bean implements [`Bean`], its builder implements [`BeanBuilder`], and
//! [`impl_structural!`] derives the comparison, hashing and `Display` impls
//! from the descriptor table.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// `Bean` / `BeanBuilder` traits and the property binding.
pub mod bean;

/// Order-sensitive, run-stable hashing.
pub mod hash;

/// Immutable shared list used for sequence-valued properties.
pub mod list;

/// Per-type metadata (`MetaBean`).
pub mod meta_bean;

/// Property descriptors (`MetaProperty`).
pub mod property;

/// Process-wide meta-bean registry.
pub mod registry;

/// Equality, hashing and rendering derived from the descriptor table.
pub mod structural;

/// Type-erased property values.
pub mod value;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use bean::{require, Bean, BeanBuilder, Property};
pub use hash::{HashCombiner, StableHash};
pub use list::ImmutableList;
pub use meta_bean::{DynMetaBean, MetaBean};
pub use property::MetaProperty;
pub use value::{PropertyType, PropertyValue};

/// Derive `PartialEq`, `Hash`, [`StableHash`] and `Display` for a bean, and
/// `Display` for its builder, from the bean's descriptor table.
///
/// `Eq` is left to the bean author since it depends on the field types.
#[macro_export]
macro_rules! impl_structural {
    ($bean:ty, $builder:ty) => {
        impl ::std::cmp::PartialEq for $bean {
            fn eq(&self, other: &Self) -> bool {
                $crate::structural::bean_equals(self, other)
            }
        }

        impl ::std::hash::Hash for $bean {
            fn hash<H: ::std::hash::Hasher>(&self, state: &mut H) {
                state.write_u64($crate::structural::bean_hash(self));
            }
        }

        impl $crate::hash::StableHash for $bean {
            fn stable_hash(&self) -> u64 {
                $crate::structural::bean_hash(self)
            }
        }

        impl ::std::fmt::Display for $bean {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                $crate::structural::write_bean(self, f)
            }
        }

        impl ::std::fmt::Display for $builder {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                $crate::structural::write_builder(self, f)
            }
        }
    };
}
