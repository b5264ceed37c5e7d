//! Integration tests for the bean machinery, driven by a small `Quote` bean
//! declared below the same way library beans are declared.

use fin_beans::registry;
use fin_beans::{
    impl_structural, require, Bean, BeanBuilder, ImmutableList, MetaBean, MetaProperty,
    PropertyValue, StableHash,
};
use fin_core::Error;
use proptest::prelude::*;
use std::sync::{LazyLock, Once};

// ───────────────────────────── test bean ─────────────────────────────

#[derive(Debug, Clone)]
struct Quote {
    ticker: String,
    price: f64,
    tags: ImmutableList<String>,
}

#[derive(Debug, Clone, Default)]
struct QuoteBuilder {
    ticker: Option<String>,
    price: Option<f64>,
    tags: Option<ImmutableList<String>>,
}

static META: LazyLock<MetaBean<Quote>> = LazyLock::new(|| {
    MetaBean::new(
        "Quote",
        vec![
            MetaProperty::of(
                "Quote",
                "ticker",
                |q: &Quote| &q.ticker,
                |b: &QuoteBuilder| &b.ticker,
                |b: &mut QuoteBuilder| &mut b.ticker,
            ),
            MetaProperty::of(
                "Quote",
                "price",
                |q: &Quote| &q.price,
                |b: &QuoteBuilder| &b.price,
                |b: &mut QuoteBuilder| &mut b.price,
            ),
            MetaProperty::without_string_form(
                "Quote",
                "tags",
                |q: &Quote| &q.tags,
                |b: &QuoteBuilder| &b.tags,
                |b: &mut QuoteBuilder| &mut b.tags,
            ),
        ],
    )
});
static PUBLISHED: Once = Once::new();

impl Bean for Quote {
    type Builder = QuoteBuilder;

    fn meta_bean() -> &'static MetaBean<Self> {
        registry::publish(&META, &PUBLISHED)
    }
}

impl BeanBuilder for QuoteBuilder {
    type Bean = Quote;

    fn from_bean(bean: &Quote) -> Self {
        Self {
            ticker: Some(bean.ticker.clone()),
            price: Some(bean.price),
            tags: Some(bean.tags.clone()),
        }
    }

    fn build(&self) -> fin_core::Result<Quote> {
        Ok(Quote {
            ticker: require(&self.ticker, "Quote", "ticker")?,
            price: require(&self.price, "Quote", "price")?,
            tags: require(&self.tags, "Quote", "tags")?,
        })
    }
}

impl_structural!(Quote, QuoteBuilder);

fn quote(ticker: &str, price: f64) -> Quote {
    let mut b = QuoteBuilder::default();
    b.set("ticker", ticker.to_string())
        .unwrap()
        .set("price", price)
        .unwrap()
        .set("tags", ImmutableList::from(vec!["fx".to_string()]))
        .unwrap();
    b.build().unwrap()
}

// ───────────────────────────── metadata ─────────────────────────────

#[test]
fn meta_bean_is_a_singleton() {
    let a = Quote::meta_bean();
    let b = Quote::meta_bean();
    assert!(std::ptr::eq(a, b));
    assert_eq!(a.bean_name(), "Quote");
}

#[test]
fn property_names_keep_declaration_order() {
    let names: Vec<_> = Quote::meta_bean().property_names().collect();
    assert_eq!(names, ["ticker", "price", "tags"]);
}

#[test]
fn unknown_property_is_rejected() {
    let q = quote("EURUSD", 1.08);
    let err = Quote::meta_bean().get(&q, "doesNotExist").unwrap_err();
    assert_eq!(
        err,
        Error::UnknownProperty {
            bean: "Quote",
            property: "doesNotExist".into(),
        }
    );
    assert!(q.property("doesNotExist").is_err());
    assert!(!Quote::meta_bean().contains("doesNotExist"));
}

#[test]
fn descriptor_reports_declared_type() {
    let price = Quote::meta_bean().meta_property("price").unwrap();
    assert_eq!(price.name(), "price");
    assert_eq!(price.bean_name(), "Quote");
    assert_eq!(price.value_type_id(), std::any::TypeId::of::<f64>());
    assert!(price.has_string_form());
    assert!(!Quote::meta_bean()
        .meta_property("tags")
        .unwrap()
        .has_string_form());
}

#[test]
fn registry_finds_published_meta_bean() {
    Quote::meta_bean();
    let dynamic = registry::lookup("Quote").expect("Quote is published");
    assert_eq!(dynamic.property_names(), vec!["ticker", "price", "tags"]);
    assert_eq!(dynamic.property_type_name("price"), Some("f64"));
    assert_eq!(dynamic.property_type_name("missing"), None);
    assert!(registry::registered_names().contains(&"Quote"));
    assert!(registry::lookup("NoSuchBean").is_none());
}

// ───────────────────────────── generic access ─────────────────────────────

#[test]
fn generic_get_matches_typed_field() {
    let q = quote("EURUSD", 1.08);
    let value = Quote::meta_bean().get(&q, "ticker").unwrap();
    assert_eq!(value.downcast_ref::<String>(), Some(&q.ticker));
    let bound = q.property("price").unwrap();
    assert_eq!(bound.name(), "price");
    assert_eq!(bound.get_string(), "1.08");
}

#[test]
fn set_on_bean_is_unsupported() {
    let q = quote("EURUSD", 1.08);
    let err = Quote::meta_bean()
        .set(&q, "price", Box::new(2.0_f64))
        .unwrap_err();
    assert!(matches!(err, Error::UnsupportedOperation(_)));
    // The name is resolved before the write is refused.
    let err = Quote::meta_bean()
        .set(&q, "nope", Box::new(2.0_f64))
        .unwrap_err();
    assert!(matches!(err, Error::UnknownProperty { .. }));
}

#[test]
fn builder_set_checks_type() {
    let mut b = QuoteBuilder::default();
    let err = b.set("price", String::from("high")).unwrap_err();
    match err {
        Error::TypeMismatch {
            property,
            expected,
            actual,
        } => {
            assert_eq!(property, "price");
            assert_eq!(expected, "f64");
            assert!(actual.contains("String"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(b.get("price").unwrap().is_none());
}

#[test]
fn set_string_parses_declared_type() {
    let mut b = QuoteBuilder::default();
    b.set_string("price", "1.25").unwrap();
    assert_eq!(
        b.get("price").unwrap().and_then(|v| v.downcast_ref::<f64>()),
        Some(&1.25)
    );

    let err = b.set_string("price", "abc").unwrap_err();
    assert!(matches!(err, Error::Parse { property: "price", .. }));

    let err = b.set_string("tags", "[fx]").unwrap_err();
    assert!(matches!(err, Error::Parse { property: "tags", .. }));
}

#[test]
fn set_all_stops_at_first_error() {
    let mut b = QuoteBuilder::default();
    let values: Vec<(&str, Box<dyn PropertyValue>)> = vec![
        ("ticker", Box::new(String::from("GBPUSD"))),
        ("price", Box::new(String::from("oops"))),
        ("tags", Box::new(ImmutableList::<String>::empty())),
    ];
    assert!(b.set_all(values).is_err());
    assert!(b.get("ticker").unwrap().is_some());
    assert!(b.get("tags").unwrap().is_none());
}

// ───────────────────────────── builder ─────────────────────────────

#[test]
fn build_names_first_missing_field() {
    let mut b = QuoteBuilder::default();
    assert_eq!(
        b.build().unwrap_err(),
        Error::Validation {
            bean: "Quote",
            field: "ticker"
        }
    );
    b.set("ticker", String::from("X")).unwrap();
    assert_eq!(
        b.build().unwrap_err(),
        Error::Validation {
            bean: "Quote",
            field: "price"
        }
    );
    assert_eq!(Quote::meta_bean().first_unset(&b), Some("price"));
}

#[test]
fn copy_round_trip_is_equal_but_distinct() {
    let q = quote("EURUSD", 1.08);
    let copy = q.to_builder().build().unwrap();
    assert_eq!(copy, q);
    assert!(!std::ptr::eq(&copy, &q));
    assert_eq!(copy.stable_hash(), q.stable_hash());
}

#[test]
fn builder_changes_do_not_leak_into_built_bean() {
    let mut b = quote("EURUSD", 1.08).to_builder();
    let first = b.build().unwrap();
    b.set("price", 9.99).unwrap();
    let second = b.build().unwrap();
    assert_eq!(first.price, 1.08);
    assert_eq!(second.price, 9.99);
    assert_ne!(first, second);
}

// ───────────────────────────── rendering ─────────────────────────────

#[test]
fn bean_rendering_lists_every_property() {
    let q = quote("EURUSD", 1.5);
    let text = q.to_string();
    assert_eq!(text, "Quote{ticker=EURUSD, price=1.5, tags=[fx]}");
    assert_eq!(text, q.to_string());
}

#[test]
fn builder_rendering_marks_unset_slots() {
    let mut b = QuoteBuilder::default();
    b.set("price", 2.0).unwrap();
    assert_eq!(
        b.to_string(),
        "Quote.Builder{ticker=<unset>, price=2, tags=<unset>}"
    );
}

// ───────────────────────────── properties ─────────────────────────────

fn quote_strategy() -> impl Strategy<Value = Quote> {
    (
        "[A-Z]{3,6}",
        -1.0e6f64..1.0e6,
        prop::collection::vec("[a-z]{1,4}", 0..4),
    )
        .prop_map(|(ticker, price, tags)| Quote {
            ticker,
            price,
            tags: ImmutableList::from(tags),
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn equal_quotes_hash_alike(a in quote_strategy(), b in quote_strategy()) {
        prop_assert_eq!(a == b, b == a);
        if a == b {
            prop_assert_eq!(a.stable_hash(), b.stable_hash());
        }
        let copy = a.to_builder().build().unwrap();
        prop_assert!(copy == a);
        prop_assert_eq!(copy.stable_hash(), a.stable_hash());
    }

    #[test]
    fn equality_is_transitive(a in quote_strategy()) {
        let b = a.to_builder().build().unwrap();
        let c = b.to_builder().build().unwrap();
        prop_assert!(a == b && b == c && a == c);
    }
}

#[test]
fn concurrent_first_access_yields_one_meta_bean() {
    let handles: Vec<_> = (0..8)
        .map(|_| std::thread::spawn(|| Quote::meta_bean() as *const MetaBean<Quote> as usize))
        .collect();
    let addresses: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(addresses.windows(2).all(|w| w[0] == w[1]));
}
