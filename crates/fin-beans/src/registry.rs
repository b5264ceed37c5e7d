//! Process-wide registry of meta-beans, keyed by bean name.
//!
//! Bean types publish their meta-bean here on first access (see
//! [`publish`]); afterwards it can be found by name without knowing the
//! concrete type.

use crate::bean::Bean;
use crate::meta_bean::{DynMetaBean, MetaBean};
use std::collections::HashMap;
use std::sync::{LazyLock, Once, PoisonError, RwLock};

static REGISTRY: LazyLock<RwLock<HashMap<&'static str, &'static dyn DynMetaBean>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Register `meta` under its bean name.
///
/// Idempotent: registering a name a second time keeps the first entry.
pub fn register(meta: &'static dyn DynMetaBean) {
    let mut map = REGISTRY.write().unwrap_or_else(PoisonError::into_inner);
    let name = meta.bean_name();
    if map.contains_key(name) {
        return;
    }
    map.insert(name, meta);
    tracing::debug!(bean = name, "meta-bean registered");
}

/// Find the meta-bean registered under `bean_name`.
pub fn lookup(bean_name: &str) -> Option<&'static dyn DynMetaBean> {
    REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(bean_name)
        .copied()
}

/// All registered bean names, sorted.
pub fn registered_names() -> Vec<&'static str> {
    let mut names: Vec<_> = REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .keys()
        .copied()
        .collect();
    names.sort_unstable();
    names
}

/// Force `cell` and register its meta-bean exactly once.
///
/// Intended as the body of [`Bean::meta_bean`]:
///
/// ```ignore
/// static META: LazyLock<MetaBean<Leg>> = LazyLock::new(|| MetaBean::new("Leg", vec![/* .. */]));
/// static PUBLISHED: Once = Once::new();
///
/// fn meta_bean() -> &'static MetaBean<Self> {
///     registry::publish(&META, &PUBLISHED)
/// }
/// ```
pub fn publish<B: Bean>(
    cell: &'static LazyLock<MetaBean<B>>,
    published: &'static Once,
) -> &'static MetaBean<B> {
    let meta: &'static MetaBean<B> = LazyLock::force(cell);
    published.call_once(|| register(meta));
    meta
}
