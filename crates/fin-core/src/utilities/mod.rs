//! Text helpers shared by every value type with a canonical string form.

pub mod data_formatters;
pub mod data_parsers;
