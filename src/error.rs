use thiserror::Error;

use crate::data::RegionKind;

/// Errors raised while loading a reference table.
#[derive(Debug, Error)]
pub enum DataError {
	/// The JSON document could not be parsed into records.
	#[error("failed to parse {kind} table: {source}")]
	Parse {
		kind: RegionKind,
		#[source]
		source: serde_json::Error,
	},

	/// A record carried a key that is not a two-letter uppercase code.
	#[error("'{code}' is not a two-letter uppercase code")]
	InvalidCode { code: String },

	/// The same code was listed twice in one table.
	#[error("code '{code}' appears more than once in the {kind} table")]
	DuplicateCode { kind: RegionKind, code: String },

	/// A region name did not match any known table.
	#[error("unknown region '{0}', expected 'countries' or 'states'")]
	UnknownRegion(String),
}

/// Errors raised when a picker is assembled from its builder.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PickerBuildError {
	/// The host never supplied the required change handler.
	#[error("a change handler is required to build a picker")]
	MissingChangeHandler,
}

/// Errors raised while parsing picker options from text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionsError {
	#[error("unknown animation '{0}', expected slide, fade or none")]
	UnknownAnimation(String),
}

/// Errors raised while parsing style definitions or overrides.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StyleError {
	#[error("unknown style element '{0}'")]
	UnknownElement(String),

	#[error("invalid colour '{value}': {reason}")]
	InvalidColour { value: String, reason: String },

	#[error("unknown modifier '{0}'")]
	UnknownModifier(String),
}
