//! The `Bean` and `BeanBuilder` traits.
//!
//! A bean is an immutable aggregate whose fields are all described by its
//! [`MetaBean`].  Its builder is a separate mutable type holding one
//! `Option<T>` slot per property.  Every generic operation (by-name reads and
//! writes, string setters) is a default method delegating to the meta-bean,
//! so a bean author only writes the typed accessors, the descriptor table and
//! `build`.

use crate::meta_bean::MetaBean;
use crate::property::MetaProperty;
use crate::value::{PropertyType, PropertyValue};
use fin_core::errors::{Error, Result};
use std::fmt;

/// An immutable, self-describing value type.
pub trait Bean: Sized + Send + Sync + 'static {
    /// The mutable builder of this bean.
    type Builder: BeanBuilder<Bean = Self>;

    /// The process-wide metadata of this bean type.
    ///
    /// Repeated calls, from any thread, return the same object.
    fn meta_bean() -> &'static MetaBean<Self>;

    /// A builder seeded with a copy of every property of `self`.
    fn to_builder(&self) -> Self::Builder {
        Self::Builder::from_bean(self)
    }

    /// Bind `self` to the property called `name`.
    fn property(&self, name: &str) -> Result<Property<'_, Self>> {
        let meta_property = Self::meta_bean().meta_property(name)?;
        Ok(Property {
            bean: self,
            meta_property,
        })
    }
}

/// The mutable builder of bean `Self::Bean`.
///
/// `build` borrows the builder, which stays usable afterwards; each call
/// produces a new independent bean.
pub trait BeanBuilder: Default + Send + 'static {
    /// The bean this builder produces.
    type Bean: Bean<Builder = Self>;

    /// A builder whose slots hold copies of the properties of `bean`.
    fn from_bean(bean: &Self::Bean) -> Self;

    /// Validate the slots and build a new bean.
    ///
    /// Fails with [`Error::Validation`] naming the first unset property in
    /// declaration order.
    fn build(&self) -> Result<Self::Bean>;

    /// Read a slot by property name; `Ok(None)` if unset.
    fn get(&self, name: &str) -> Result<Option<&dyn PropertyValue>> {
        <Self::Bean as Bean>::meta_bean().builder_get(self, name)
    }

    /// Write a slot by property name, checking `value` against the declared
    /// type.
    fn set<T: PropertyType>(&mut self, name: &str, value: T) -> Result<&mut Self> {
        self.set_boxed(name, Box::new(value))
    }

    /// Write a slot by property name from an already type-erased value.
    fn set_boxed(&mut self, name: &str, value: Box<dyn PropertyValue>) -> Result<&mut Self> {
        <Self::Bean as Bean>::meta_bean().builder_set(self, name, value)?;
        Ok(self)
    }

    /// Parse `text` into the declared type of `name` and write the slot.
    fn set_string(&mut self, name: &str, text: &str) -> Result<&mut Self> {
        <Self::Bean as Bean>::meta_bean().builder_set_string(self, name, text)?;
        Ok(self)
    }

    /// Apply every `(name, value)` pair in order, stopping at the first error.
    /// Pairs applied before the error stay applied.
    fn set_all<'a, I>(&mut self, values: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (&'a str, Box<dyn PropertyValue>)>,
    {
        for (name, value) in values {
            self.set_boxed(name, value)?;
        }
        Ok(self)
    }
}

/// Clone the value out of a required builder slot.
///
/// Used by `build` implementations; reports [`Error::Validation`] when the
/// slot is unset.
pub fn require<T: Clone>(slot: &Option<T>, bean: &'static str, field: &'static str) -> Result<T> {
    slot.clone().ok_or(Error::Validation { bean, field })
}

// ── Property binding ──────────────────────────────────────────────────────────

/// A bean paired with one of its property descriptors.
pub struct Property<'a, B: Bean> {
    bean: &'a B,
    meta_property: &'static MetaProperty<B>,
}

impl<'a, B: Bean> Property<'a, B> {
    /// The property name.
    pub fn name(&self) -> &'static str {
        self.meta_property.name()
    }

    /// The bound bean.
    pub fn bean(&self) -> &'a B {
        self.bean
    }

    /// The descriptor.
    pub fn meta_property(&self) -> &'static MetaProperty<B> {
        self.meta_property
    }

    /// The property value.
    pub fn get(&self) -> &'a dyn PropertyValue {
        self.meta_property.get(self.bean)
    }

    /// The canonical text of the property value.
    pub fn get_string(&self) -> String {
        self.meta_property.get_string(self.bean)
    }
}

impl<B: Bean> Clone for Property<'_, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: Bean> Copy for Property<'_, B> {}

impl<B: Bean> fmt::Debug for Property<'_, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("bean", &self.meta_property.bean_name())
            .field("name", &self.name())
            .field("value", &self.get())
            .finish()
    }
}
