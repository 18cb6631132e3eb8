use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use indexmap::IndexMap;
use serde::Deserialize;

use super::record::CountryRecord;
use crate::error::DataError;

const COUNTRIES_JSON: &str = include_str!("../../data/countries.json");
const STATES_JSON: &str = include_str!("../../data/states.json");

/// Which of the bundled reference tables a picker draws from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionKind {
	#[default]
	Countries,
	States,
}

impl RegionKind {
	/// Return the bundled table for this kind.
	#[must_use]
	pub fn table(self) -> &'static RegionTable {
		match self {
			RegionKind::Countries => countries(),
			RegionKind::States => states(),
		}
	}

	/// Whether rows of this kind render a flag column.
	#[must_use]
	pub fn shows_flags(self) -> bool {
		matches!(self, RegionKind::Countries)
	}

	#[must_use]
	pub fn as_str(self) -> &'static str {
		match self {
			RegionKind::Countries => "countries",
			RegionKind::States => "states",
		}
	}
}

impl fmt::Display for RegionKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for RegionKind {
	type Err = DataError;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value.trim().to_ascii_lowercase().as_str() {
			"countries" | "country" => Ok(RegionKind::Countries),
			"states" | "state" => Ok(RegionKind::States),
			other => Err(DataError::UnknownRegion(other.to_string())),
		}
	}
}

/// Code-keyed lookup table. Iteration order is the reference order of the
/// source document and doubles as the default candidate list.
#[derive(Debug, Clone)]
pub struct RegionTable {
	kind: RegionKind,
	records: IndexMap<String, CountryRecord>,
}

impl RegionTable {
	/// Parse a JSON array of records into a table.
	pub fn from_json(kind: RegionKind, json: &str) -> Result<Self, DataError> {
		let records: Vec<CountryRecord> =
			serde_json::from_str(json).map_err(|source| DataError::Parse { kind, source })?;
		Self::from_records(kind, records)
	}

	/// Build a table from already materialized records.
	pub fn from_records(
		kind: RegionKind,
		records: impl IntoIterator<Item = CountryRecord>,
	) -> Result<Self, DataError> {
		let mut table = IndexMap::new();
		for record in records {
			if !is_valid_code(&record.code) {
				return Err(DataError::InvalidCode { code: record.code });
			}
			if table.contains_key(&record.code) {
				return Err(DataError::DuplicateCode {
					kind,
					code: record.code,
				});
			}
			table.insert(record.code.clone(), record);
		}
		Ok(Self {
			kind,
			records: table,
		})
	}

	#[must_use]
	pub fn kind(&self) -> RegionKind {
		self.kind
	}

	#[must_use]
	pub fn get(&self, code: &str) -> Option<&CountryRecord> {
		self.records.get(code)
	}

	#[must_use]
	pub fn contains(&self, code: &str) -> bool {
		self.records.contains_key(code)
	}

	/// Every known code in reference order.
	pub fn codes(&self) -> impl Iterator<Item = &str> {
		self.records.keys().map(String::as_str)
	}

	/// The candidate list used when the host does not supply one.
	#[must_use]
	pub fn default_candidates(&self) -> Vec<String> {
		self.records.keys().cloned().collect()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.records.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}
}

fn is_valid_code(code: &str) -> bool {
	code.len() == 2 && code.bytes().all(|byte| byte.is_ascii_uppercase())
}

/// The bundled country table.
pub fn countries() -> &'static RegionTable {
	static COUNTRIES: OnceLock<RegionTable> = OnceLock::new();
	COUNTRIES.get_or_init(|| {
		RegionTable::from_json(RegionKind::Countries, COUNTRIES_JSON)
			.unwrap_or_else(|error| panic!("bundled country table is invalid: {error}"))
	})
}

/// The bundled state table.
pub fn states() -> &'static RegionTable {
	static STATES: OnceLock<RegionTable> = OnceLock::new();
	STATES.get_or_init(|| {
		RegionTable::from_json(RegionKind::States, STATES_JSON)
			.unwrap_or_else(|error| panic!("bundled state table is invalid: {error}"))
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::data::LocalizedNames;

	#[test]
	fn bundled_tables_parse() {
		let countries = countries();
		assert_eq!(countries.kind(), RegionKind::Countries);
		assert!(countries.len() > 240);
		let france = countries.get("FR").expect("France is bundled");
		assert_eq!(france.name.common, "France");
		assert_eq!(france.flag.as_deref(), Some("🇫🇷"));

		let states = states();
		assert_eq!(states.len(), 51);
		assert!(states.get("CA").is_some_and(|record| record.flag.is_none()));
	}

	#[test]
	fn every_bundled_country_has_a_flag() {
		assert!(countries().codes().all(|code| {
			countries()
				.get(code)
				.is_some_and(|record| record.flag.is_some())
		}));
	}

	#[test]
	fn default_candidates_follow_reference_order() {
		let candidates = countries().default_candidates();
		assert_eq!(candidates.first().map(String::as_str), Some("AD"));
		assert_eq!(candidates.last().map(String::as_str), Some("ZW"));
	}

	#[test]
	fn rejects_duplicate_codes() {
		let records = [
			CountryRecord::new("FR", LocalizedNames::common("France")),
			CountryRecord::new("FR", LocalizedNames::common("France again")),
		];
		let error = RegionTable::from_records(RegionKind::Countries, records).unwrap_err();
		assert!(matches!(error, DataError::DuplicateCode { code, .. } if code == "FR"));
	}

	#[test]
	fn rejects_malformed_codes() {
		let records = [CountryRecord::new("fra", LocalizedNames::common("France"))];
		let error = RegionTable::from_records(RegionKind::Countries, records).unwrap_err();
		assert!(matches!(error, DataError::InvalidCode { code } if code == "fra"));
	}

	#[test]
	fn parse_errors_name_the_table() {
		let error = RegionTable::from_json(RegionKind::States, "{").unwrap_err();
		assert!(error.to_string().starts_with("failed to parse states table"));
	}

	#[test]
	fn region_kind_parses_loosely() {
		assert_eq!("States".parse::<RegionKind>().unwrap(), RegionKind::States);
		assert_eq!(" country ".parse::<RegionKind>().unwrap(), RegionKind::Countries);
		assert!("planets".parse::<RegionKind>().is_err());
	}
}
