//! Property descriptors.
//!
//! A [`MetaProperty`] describes one named, typed field of a bean.  It is
//! created once, inside the bean's meta-bean, from three plain accessor
//! functions: one reading the field of a finished bean and two reaching the
//! matching `Option<T>` slot of the builder.  The declared type `T` is erased
//! behind a private access trait so that all descriptors of a bean fit in one
//! ordered table.

use crate::bean::Bean;
use crate::value::{PropertyType, PropertyValue};
use fin_core::errors::{Error, Result};
use std::any::{type_name, TypeId};
use std::fmt::{self, Display};
use std::str::FromStr;

/// Reads the field of a finished bean.
pub type BeanGetter<B, T> = fn(&B) -> &T;

/// Reads a builder slot.
pub type SlotGetter<B, T> = fn(&<B as Bean>::Builder) -> &Option<T>;

/// Reaches a builder slot for writing.
pub type SlotSetter<B, T> = fn(&mut <B as Bean>::Builder) -> &mut Option<T>;

type Parser<T> = fn(&str) -> std::result::Result<T, String>;

/// Type-erased access to one property of bean `B`.
pub(crate) trait PropertyAccess<B: Bean>: Send + Sync {
    fn get<'a>(&self, bean: &'a B) -> &'a dyn PropertyValue;

    fn builder_get<'a>(&self, builder: &'a B::Builder) -> Option<&'a dyn PropertyValue>;

    fn builder_set(
        &self,
        builder: &mut B::Builder,
        property: &'static str,
        value: Box<dyn PropertyValue>,
    ) -> Result<()>;

    fn builder_set_string(
        &self,
        builder: &mut B::Builder,
        property: &'static str,
        text: &str,
    ) -> Result<()>;

    fn has_string_form(&self) -> bool;
}

struct TypedAccess<B: Bean, T> {
    get: BeanGetter<B, T>,
    slot: SlotGetter<B, T>,
    slot_mut: SlotSetter<B, T>,
    parse: Option<Parser<T>>,
}

impl<B: Bean, T: PropertyType> PropertyAccess<B> for TypedAccess<B, T> {
    fn get<'a>(&self, bean: &'a B) -> &'a dyn PropertyValue {
        (self.get)(bean)
    }

    fn builder_get<'a>(&self, builder: &'a B::Builder) -> Option<&'a dyn PropertyValue> {
        (self.slot)(builder)
            .as_ref()
            .map(|v| v as &dyn PropertyValue)
    }

    fn builder_set(
        &self,
        builder: &mut B::Builder,
        property: &'static str,
        value: Box<dyn PropertyValue>,
    ) -> Result<()> {
        let actual = value.value_type_name();
        let typed = value
            .into_any()
            .downcast::<T>()
            .map_err(|_| Error::TypeMismatch {
                property,
                expected: type_name::<T>(),
                actual,
            })?;
        *(self.slot_mut)(builder) = Some(*typed);
        Ok(())
    }

    fn builder_set_string(
        &self,
        builder: &mut B::Builder,
        property: &'static str,
        text: &str,
    ) -> Result<()> {
        let parse = self.parse.ok_or_else(|| Error::Parse {
            property,
            text: text.to_string(),
            reason: format!("{} has no string form", type_name::<T>()),
        })?;
        let value = parse(text).map_err(|reason| Error::Parse {
            property,
            text: text.to_string(),
            reason,
        })?;
        *(self.slot_mut)(builder) = Some(value);
        Ok(())
    }

    fn has_string_form(&self) -> bool {
        self.parse.is_some()
    }
}

fn parse_with_from_str<T>(text: &str) -> std::result::Result<T, String>
where
    T: FromStr,
    T::Err: Display,
{
    text.parse::<T>().map_err(|e| e.to_string())
}

/// Describes one named, typed property of bean `B`.
pub struct MetaProperty<B: Bean> {
    name: &'static str,
    bean_name: &'static str,
    value_type_name: &'static str,
    value_type_id: TypeId,
    access: Box<dyn PropertyAccess<B>>,
}

impl<B: Bean> MetaProperty<B> {
    /// Describe a property whose type has a canonical `FromStr` / `Display`
    /// pair, enabling string-based setters.
    pub fn of<T>(
        bean_name: &'static str,
        name: &'static str,
        get: BeanGetter<B, T>,
        slot: SlotGetter<B, T>,
        slot_mut: SlotSetter<B, T>,
    ) -> Self
    where
        T: PropertyType + FromStr,
        T::Err: Display,
    {
        Self::with_parser(bean_name, name, get, slot, slot_mut, Some(parse_with_from_str::<T>))
    }

    /// Describe a property whose type has no string form; string-based
    /// setters report [`Error::Parse`].
    pub fn without_string_form<T: PropertyType>(
        bean_name: &'static str,
        name: &'static str,
        get: BeanGetter<B, T>,
        slot: SlotGetter<B, T>,
        slot_mut: SlotSetter<B, T>,
    ) -> Self {
        Self::with_parser(bean_name, name, get, slot, slot_mut, None)
    }

    fn with_parser<T: PropertyType>(
        bean_name: &'static str,
        name: &'static str,
        get: BeanGetter<B, T>,
        slot: SlotGetter<B, T>,
        slot_mut: SlotSetter<B, T>,
        parse: Option<Parser<T>>,
    ) -> Self {
        Self {
            name,
            bean_name,
            value_type_name: type_name::<T>(),
            value_type_id: TypeId::of::<T>(),
            access: Box::new(TypedAccess {
                get,
                slot,
                slot_mut,
                parse,
            }),
        }
    }

    /// The property name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The name of the declaring bean.
    pub fn bean_name(&self) -> &'static str {
        self.bean_name
    }

    /// The declared value type, as reported by `std::any::type_name`.
    pub fn value_type_name(&self) -> &'static str {
        self.value_type_name
    }

    /// The declared value type.
    pub fn value_type_id(&self) -> TypeId {
        self.value_type_id
    }

    /// Return `true` if string-based setters are supported.
    pub fn has_string_form(&self) -> bool {
        self.access.has_string_form()
    }

    /// Read the property of a finished bean.
    pub fn get<'a>(&self, bean: &'a B) -> &'a dyn PropertyValue {
        self.access.get(bean)
    }

    /// The canonical text of the property value of `bean`.
    pub fn get_string(&self, bean: &B) -> String {
        self.get(bean).to_string()
    }

    /// Read the builder slot; `None` if unset.
    pub fn builder_get<'a>(&self, builder: &'a B::Builder) -> Option<&'a dyn PropertyValue> {
        self.access.builder_get(builder)
    }

    /// Return `true` if the builder slot is set.
    pub fn is_set(&self, builder: &B::Builder) -> bool {
        self.builder_get(builder).is_some()
    }

    /// Write the builder slot, checking the value against the declared type.
    pub fn builder_set(
        &self,
        builder: &mut B::Builder,
        value: Box<dyn PropertyValue>,
    ) -> Result<()> {
        tracing::trace!(bean = self.bean_name, property = self.name, "generic property write");
        self.access.builder_set(builder, self.name, value)
    }

    /// Parse `text` into the declared type and write the builder slot.
    pub fn builder_set_string(&self, builder: &mut B::Builder, text: &str) -> Result<()> {
        tracing::trace!(bean = self.bean_name, property = self.name, text, "string property write");
        self.access.builder_set_string(builder, self.name, text)
    }
}

impl<B: Bean> fmt::Debug for MetaProperty<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetaProperty")
            .field("bean", &self.bean_name)
            .field("name", &self.name)
            .field("type", &self.value_type_name)
            .finish()
    }
}

impl<B: Bean> fmt::Display for MetaProperty<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.bean_name, self.name)
    }
}
