//! Data parsing helpers.
//!
//! Provides functions to parse dates, tenors, and the record text form
//! `Name{key=value, key=value}` that value types use as their canonical
//! string representation.

use crate::errors::{Error, Result};
use chrono::NaiveDate;
use std::fmt::Display;
use std::str::FromStr;

/// Parse a period string like `"3M"`, `"1Y"`, `"30D"`, `"2W"`.
///
/// Returns `(length, unit_char)` on success, with the unit upper-cased.
/// A leading ISO-8601 `P` (as in `"P3M"`) is accepted.
///
/// # Errors
/// Returns `None` if the string cannot be parsed.
pub fn parse_period_string(s: &str) -> Option<(i32, char)> {
    let s = s.trim();
    let s = s.strip_prefix(['P', 'p']).unwrap_or(s);
    if s.is_empty() {
        return None;
    }
    let unit_char = s.chars().last()?;
    if !matches!(unit_char, 'D' | 'd' | 'W' | 'w' | 'M' | 'm' | 'Y' | 'y') {
        return None;
    }
    let num_str = &s[..s.len() - 1];
    let length: i32 = num_str.parse().ok()?;
    Some((length, unit_char.to_ascii_uppercase()))
}

/// Parse a date string in ISO 8601 format (`YYYY-MM-DD`).
pub fn parse_iso_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| Error::Date(format!("invalid ISO date '{}': {e}", s.trim())))
}

/// The `key=value` entries of a record parsed by [`parse_record`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordFields<'a> {
    name: &'a str,
    entries: Vec<(&'a str, &'a str)>,
}

impl<'a> RecordFields<'a> {
    /// The record name (the text before `{`).
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` if the record has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The raw text of `key`, if present.
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }

    /// The raw text of `key`, failing if it is absent.
    pub fn require(&self, key: &str) -> Result<&'a str> {
        self.get(key).ok_or_else(|| {
            Error::InvalidArgument(format!("{}: missing entry '{key}'", self.name))
        })
    }

    /// Parse the value of `key` with the target type's `FromStr`.
    pub fn parse<T>(&self, key: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        let raw = self.require(key)?;
        raw.parse::<T>().map_err(|e| {
            Error::InvalidArgument(format!("{}: bad value for '{key}': {e}", self.name))
        })
    }
}

/// Parse the record text form `Name{key=value, key=value}`.
///
/// Entries are split on commas that are not nested inside braces, so a value
/// may itself be a record.  When `expected_name` is given the record name
/// must match it.
///
/// # Example
/// ```
/// use fin_core::utilities::data_parsers::parse_record;
///
/// let rec = parse_record("Notional{currency=GBP, amount=1000000}", Some("Notional")).unwrap();
/// assert_eq!(rec.get("currency"), Some("GBP"));
/// assert_eq!(rec.parse::<f64>("amount").unwrap(), 1_000_000.0);
/// ```
pub fn parse_record<'a>(text: &'a str, expected_name: Option<&str>) -> Result<RecordFields<'a>> {
    let text = text.trim();
    let open = text
        .find('{')
        .ok_or_else(|| Error::InvalidArgument(format!("'{text}' is not a record: missing '{{'")))?;
    let body = text[open + 1..]
        .strip_suffix('}')
        .ok_or_else(|| Error::InvalidArgument(format!("'{text}' is not a record: missing '}}'")))?;
    let name = text[..open].trim();
    if let Some(expected) = expected_name {
        if name != expected {
            return Err(Error::InvalidArgument(format!(
                "expected a {expected} record, found '{name}'"
            )));
        }
    }

    let mut entries = Vec::new();
    for part in split_top_level(body) {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let (key, value) = part.split_once('=').ok_or_else(|| {
            Error::InvalidArgument(format!("{name}: entry '{part}' is not key=value"))
        })?;
        entries.push((key.trim(), value.trim()));
    }
    Ok(RecordFields { name, entries })
}

fn split_top_level(body: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in body.char_indices() {
        match c {
            '{' | '[' => depth += 1,
            '}' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&body[start..]);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utilities::data_formatters::write_record;
    use proptest::prelude::*;

    #[test]
    fn test_parse_period() {
        assert_eq!(parse_period_string("3M"), Some((3, 'M')));
        assert_eq!(parse_period_string("1Y"), Some((1, 'Y')));
        assert_eq!(parse_period_string("30D"), Some((30, 'D')));
        assert_eq!(parse_period_string("2W"), Some((2, 'W')));
        assert_eq!(parse_period_string("P6M"), Some((6, 'M')));
        assert_eq!(parse_period_string(""), None);
        assert_eq!(parse_period_string("abc"), None);
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(
            parse_iso_date("2023-06-15").unwrap(),
            NaiveDate::from_ymd_opt(2023, 6, 15).unwrap()
        );
        assert!(parse_iso_date("bad").is_err());
    }

    #[test]
    fn test_parse_record_nested() {
        let rec = parse_record("Outer{a=1, inner=Inner{x=2, y=3}, b=z}", None).unwrap();
        assert_eq!(rec.name(), "Outer");
        assert_eq!(rec.len(), 3);
        assert_eq!(rec.get("inner"), Some("Inner{x=2, y=3}"));
        assert_eq!(rec.get("b"), Some("z"));
    }

    #[test]
    fn test_parse_record_wrong_name() {
        assert!(parse_record("Other{a=1}", Some("Expected")).is_err());
        assert!(parse_record("NoBraces", None).is_err());
        assert!(parse_record("Bad{novalue}", None).is_err());
    }

    #[test]
    fn test_record_missing_key() {
        let rec = parse_record("R{a=1}", None).unwrap();
        assert!(rec.require("b").is_err());
        assert!(rec.parse::<i32>("a").is_ok());
    }

    fn value() -> impl Strategy<Value = String> {
        prop_oneof![
            "[A-Za-z0-9.-]{1,10}",
            ("[A-Za-z0-9.-]{1,6}", "[A-Za-z0-9.-]{1,6}")
                .prop_map(|(x, y)| format!("Inner{{x={x}, y={y}}}")),
            prop::collection::vec("[0-9]{1,3}", 0..4)
                .prop_map(|v| format!("[{}]", v.join(", "))),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn written_records_parse_back(
            name in "[A-Z][A-Za-z]{0,12}",
            fields in prop::collection::btree_map("[a-z][A-Za-z]{0,8}", value(), 0..6),
        ) {
            let mut text = String::new();
            write_record(
                &mut text,
                &name,
                fields.iter().map(|(k, v)| (k.as_str(), v as &dyn Display)),
            )
            .unwrap();

            let rec = parse_record(&text, Some(&name)).unwrap();
            prop_assert_eq!(rec.name(), name.as_str());
            prop_assert_eq!(rec.len(), fields.len());
            for (key, value) in &fields {
                prop_assert_eq!(rec.get(key), Some(value.as_str()));
            }
        }

        #[test]
        fn period_strings_parse(
            length in 1i32..1000,
            unit in prop::sample::select(vec!['D', 'W', 'M', 'Y']),
        ) {
            let text = format!("P{length}{}", unit.to_ascii_lowercase());
            prop_assert_eq!(parse_period_string(&text), Some((length, unit)));
        }
    }
}
