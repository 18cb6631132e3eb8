//! Name and flag resolution for table records.

use crate::data::CountryRecord;

/// Translation used when the host does not ask for one.
pub const DEFAULT_TRANSLATION: &str = "eng";

/// Flag shown for a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag<'a> {
	/// Glyph or asset reference taken from the record.
	Asset(&'a str),
	/// The record is absent or carries no flag.
	Missing,
}

impl<'a> Flag<'a> {
	#[must_use]
	pub fn asset(self) -> Option<&'a str> {
		match self {
			Flag::Asset(asset) => Some(asset),
			Flag::Missing => None,
		}
	}
}

/// Name of `record` under `translation`, falling back to the common name.
#[must_use]
pub fn resolve_name<'a>(record: &'a CountryRecord, translation: &str) -> &'a str {
	record
		.name
		.get(translation)
		.unwrap_or(record.name.common.as_str())
}

/// Flag of `record`, or [`Flag::Missing`] when either the record or its
/// flag is absent.
#[must_use]
pub fn resolve_flag(record: Option<&CountryRecord>) -> Flag<'_> {
	match record.and_then(|record| record.flag.as_deref()) {
		Some(asset) => Flag::Asset(asset),
		None => Flag::Missing,
	}
}

/// Uppercased first character of a display name, as used by the jump index.
#[must_use]
pub fn first_letter(name: &str) -> Option<String> {
	name.chars().next().map(|ch| ch.to_uppercase().collect())
}
