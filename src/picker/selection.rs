use serde::Serialize;

use crate::data::{CountryRecord, LocalizedNames};
use crate::resolve::resolve_name;

/// Payload handed to the host when a row is picked.
///
/// Mirrors the record minus its flag; callers already hold the code and can
/// look the flag up themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
	pub code: String,
	/// Name resolved under the picker's translation.
	pub name: String,
	pub names: LocalizedNames,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub region: Option<String>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub calling_code: Vec<String>,
}

impl Selection {
	pub(crate) fn from_record(code: &str, record: &CountryRecord, translation: &str) -> Self {
		Self {
			code: code.to_string(),
			name: resolve_name(record, translation).to_string(),
			names: record.name.clone(),
			region: record.region.clone(),
			calling_code: record.calling_code.clone(),
		}
	}
}
