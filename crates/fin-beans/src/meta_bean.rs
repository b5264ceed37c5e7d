//! Per-type metadata.
//!
//! A [`MetaBean`] owns the ordered [`MetaProperty`] table of one bean type
//! together with a name index built once at construction.  Bean types keep
//! their meta-bean in a `static LazyLock` and hand it out through
//! [`Bean::meta_bean`].

use crate::bean::{Bean, BeanBuilder};
use crate::property::MetaProperty;
use crate::value::PropertyValue;
use fin_core::errors::{Error, Result};
use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;

/// The metadata of bean type `B`.
pub struct MetaBean<B: Bean> {
    bean_name: &'static str,
    properties: Vec<MetaProperty<B>>,
    index: HashMap<&'static str, usize>,
}

impl<B: Bean> MetaBean<B> {
    /// Create the metadata from the properties in declaration order.
    ///
    /// Property names must be unique; a later duplicate shadows nothing and
    /// is rejected by a debug assertion.
    pub fn new(bean_name: &'static str, properties: Vec<MetaProperty<B>>) -> Self {
        let mut index = HashMap::with_capacity(properties.len());
        for (i, property) in properties.iter().enumerate() {
            let previous = index.insert(property.name(), i);
            debug_assert!(
                previous.is_none(),
                "duplicate property '{}' on {bean_name}",
                property.name()
            );
        }
        tracing::debug!(
            bean = bean_name,
            properties = properties.len(),
            "meta-bean created"
        );
        Self {
            bean_name,
            properties,
            index,
        }
    }

    /// The bean name.
    pub fn bean_name(&self) -> &'static str {
        self.bean_name
    }

    /// The `TypeId` of `B`.
    pub fn bean_type(&self) -> TypeId {
        TypeId::of::<B>()
    }

    /// All property descriptors, in declaration order.
    pub fn meta_properties(&self) -> &[MetaProperty<B>] {
        &self.properties
    }

    /// All property names, in declaration order.
    pub fn property_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.properties.iter().map(MetaProperty::name)
    }

    /// Return `true` if `name` is a declared property.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Resolve a property by name.
    pub fn meta_property(&self, name: &str) -> Result<&MetaProperty<B>> {
        self.index
            .get(name)
            .map(|&i| &self.properties[i])
            .ok_or_else(|| Error::UnknownProperty {
                bean: self.bean_name,
                property: name.to_string(),
            })
    }

    /// A fresh builder with every property unset.
    pub fn builder(&self) -> B::Builder {
        B::Builder::default()
    }

    /// Read a property of `bean` by name.
    pub fn get<'a>(&self, bean: &'a B, name: &str) -> Result<&'a dyn PropertyValue> {
        Ok(self.meta_property(name)?.get(bean))
    }

    /// Beans are immutable: once `name` is resolved this always fails with
    /// [`Error::UnsupportedOperation`].
    pub fn set(&self, _bean: &B, name: &str, _value: Box<dyn PropertyValue>) -> Result<()> {
        let property = self.meta_property(name)?;
        Err(Error::UnsupportedOperation(format!(
            "{} is immutable; property '{}' cannot be set",
            self.bean_name,
            property.name()
        )))
    }

    /// Read a builder slot by name; `Ok(None)` if unset.
    pub fn builder_get<'a>(
        &self,
        builder: &'a B::Builder,
        name: &str,
    ) -> Result<Option<&'a dyn PropertyValue>> {
        Ok(self.meta_property(name)?.builder_get(builder))
    }

    /// Write a builder slot by name, checking the value's type.
    pub fn builder_set(
        &self,
        builder: &mut B::Builder,
        name: &str,
        value: Box<dyn PropertyValue>,
    ) -> Result<()> {
        self.meta_property(name)?.builder_set(builder, value)
    }

    /// Parse `text` into the declared type of `name` and write the slot.
    pub fn builder_set_string(
        &self,
        builder: &mut B::Builder,
        name: &str,
        text: &str,
    ) -> Result<()> {
        self.meta_property(name)?.builder_set_string(builder, text)
    }

    /// The first property, in declaration order, whose builder slot is unset.
    pub fn first_unset(&self, builder: &B::Builder) -> Option<&'static str> {
        self.properties
            .iter()
            .find(|p| !p.is_set(builder))
            .map(MetaProperty::name)
    }
}

impl<B: Bean> fmt::Debug for MetaBean<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetaBean")
            .field("bean", &self.bean_name)
            .field("properties", &self.properties)
            .finish()
    }
}

// ── Object-safe view ──────────────────────────────────────────────────────────

/// Type-independent view of a meta-bean, as stored in the registry.
pub trait DynMetaBean: Send + Sync {
    /// The bean name.
    fn bean_name(&self) -> &'static str;

    /// The `TypeId` of the bean type.
    fn bean_type(&self) -> TypeId;

    /// All property names, in declaration order.
    fn property_names(&self) -> Vec<&'static str>;

    /// The declared value type of `name`, if declared.
    fn property_type_name(&self, name: &str) -> Option<&'static str>;
}

impl<B: Bean> DynMetaBean for MetaBean<B> {
    fn bean_name(&self) -> &'static str {
        self.bean_name
    }

    fn bean_type(&self) -> TypeId {
        TypeId::of::<B>()
    }

    fn property_names(&self) -> Vec<&'static str> {
        MetaBean::property_names(self).collect()
    }

    fn property_type_name(&self, name: &str) -> Option<&'static str> {
        self.meta_property(name)
            .ok()
            .map(MetaProperty::value_type_name)
    }
}

impl fmt::Debug for dyn DynMetaBean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynMetaBean")
            .field("bean", &self.bean_name())
            .field("properties", &self.property_names())
            .finish()
    }
}
