//! Data formatting helpers.
//!
//! Provides the writer for the record text form `Name{key=value, ...}`
//! shared by bean rendering and by the canonical `Display` of value types,
//! plus a percentage formatter for rates.

use crate::Rate;
use std::fmt::{self, Display, Write};

/// Format a rate as a percentage string (e.g. `0.05` → `"5.000000 %"`).
pub fn format_rate(r: Rate) -> String {
    format!("{:.6} %", r * 100.0)
}

/// Write `name{k1=v1, k2=v2}` to `out`.
///
/// # Example
/// ```
/// use fin_core::utilities::data_formatters::write_record;
///
/// let mut s = String::new();
/// write_record(&mut s, "Notional", [
///     ("currency", &"GBP" as &dyn std::fmt::Display),
///     ("amount", &100.5 as &dyn std::fmt::Display),
/// ]).unwrap();
/// assert_eq!(s, "Notional{currency=GBP, amount=100.5}");
/// ```
pub fn write_record<'a, W, I>(out: &mut W, name: &str, fields: I) -> fmt::Result
where
    W: Write + ?Sized,
    I: IntoIterator<Item = (&'a str, &'a dyn Display)>,
{
    out.write_str(name)?;
    out.write_char('{')?;
    for (i, (key, value)) in fields.into_iter().enumerate() {
        if i > 0 {
            out.write_str(", ")?;
        }
        write!(out, "{key}={value}")?;
    }
    out.write_char('}')
}

/// Join displayable items as `[a, b, c]`.
pub fn format_list<T: Display>(items: &[T]) -> String {
    let mut s = String::with_capacity(items.len() * 16 + 2);
    s.push('[');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            s.push_str(", ");
        }
        let _ = write!(s, "{item}");
    }
    s.push(']');
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(0.05), "5.000000 %");
    }

    #[test]
    fn test_write_record_empty() {
        let mut s = String::new();
        write_record(&mut s, "Empty", std::iter::empty()).unwrap();
        assert_eq!(s, "Empty{}");
    }

    #[test]
    fn test_format_list() {
        assert_eq!(format_list(&[1, 2, 3]), "[1, 2, 3]");
        assert_eq!(format_list::<i32>(&[]), "[]");
    }
}
