//! Type-erased property values.
//!
//! Generic access by name hands out `&dyn PropertyValue`; generic writes take
//! `Box<dyn PropertyValue>` and are type-checked by downcasting against the
//! declared type of the target property.

use crate::hash::StableHash;
use std::any::{type_name, Any};
use std::fmt;

/// The capabilities every property type must provide.
///
/// Blanket-implemented, so any `Clone + PartialEq + StableHash + Debug +
/// Display` type that is `Send + Sync + 'static` qualifies.
pub trait PropertyType:
    Any + Clone + PartialEq + StableHash + fmt::Debug + fmt::Display + Send + Sync
{
}

impl<T> PropertyType for T where
    T: Any + Clone + PartialEq + StableHash + fmt::Debug + fmt::Display + Send + Sync
{
}

/// Object-safe view of a property value.
pub trait PropertyValue: Any + fmt::Debug + Send + Sync + 'static {
    /// Borrow as `Any`, for downcasting to the concrete type.
    fn as_any(&self) -> &dyn Any;

    /// Convert into `Box<dyn Any>`, for downcasting by value.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    /// Borrow as `Display` (the value's canonical rendering).
    fn as_display(&self) -> &dyn fmt::Display;

    /// Clone into a new box.
    fn clone_value(&self) -> Box<dyn PropertyValue>;

    /// Structural equality with another erased value; values of different
    /// concrete types are never equal.
    fn value_eq(&self, other: &dyn PropertyValue) -> bool;

    /// The value's [`StableHash`].
    fn value_hash(&self) -> u64;

    /// The concrete type name, for diagnostics.
    fn value_type_name(&self) -> &'static str;
}

impl<T: PropertyType> PropertyValue for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn as_display(&self) -> &dyn fmt::Display {
        self
    }

    fn clone_value(&self) -> Box<dyn PropertyValue> {
        Box::new(self.clone())
    }

    fn value_eq(&self, other: &dyn PropertyValue) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn value_hash(&self) -> u64 {
        self.stable_hash()
    }

    fn value_type_name(&self) -> &'static str {
        type_name::<T>()
    }
}

impl dyn PropertyValue {
    /// Downcast to a concrete reference.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Return `true` if the concrete type is `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

impl fmt::Display for dyn PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_display().fmt(f)
    }
}
