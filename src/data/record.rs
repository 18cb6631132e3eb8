use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Translation key holding the fallback name of every record.
pub const COMMON_NAME_KEY: &str = "common";

/// Display names of a record, keyed by translation code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedNames {
	/// Name used whenever the requested translation is missing.
	pub common: String,
	#[serde(flatten)]
	pub translations: BTreeMap<String, String>,
}

impl LocalizedNames {
	/// Build a name set holding only the common name.
	pub fn common(name: impl Into<String>) -> Self {
		Self {
			common: name.into(),
			translations: BTreeMap::new(),
		}
	}

	/// Add a translated name, returning the updated set.
	pub fn with(mut self, translation: impl Into<String>, name: impl Into<String>) -> Self {
		self.translations.insert(translation.into(), name.into());
		self
	}

	/// Look up the name for `translation` without falling back.
	#[must_use]
	pub fn get(&self, translation: &str) -> Option<&str> {
		if translation == COMMON_NAME_KEY {
			return Some(&self.common);
		}
		self.translations.get(translation).map(String::as_str)
	}
}

/// One immutable entry of a reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRecord {
	pub code: String,
	pub name: LocalizedNames,
	/// Flag glyph rendered beside the name. State tables carry none.
	#[serde(default)]
	pub flag: Option<String>,
	#[serde(default)]
	pub region: Option<String>,
	#[serde(default)]
	pub calling_code: Vec<String>,
}

impl CountryRecord {
	pub fn new(code: impl Into<String>, name: LocalizedNames) -> Self {
		Self {
			code: code.into(),
			name,
			flag: None,
			region: None,
			calling_code: Vec::new(),
		}
	}

	pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
		self.flag = Some(flag.into());
		self
	}
}
