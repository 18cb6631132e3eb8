use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::OptionsError;

/// How the modal appears when the picker opens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationMode {
	Slide,
	Fade,
	#[default]
	None,
}

impl AnimationMode {
	#[must_use]
	pub fn as_str(self) -> &'static str {
		match self {
			AnimationMode::Slide => "slide",
			AnimationMode::Fade => "fade",
			AnimationMode::None => "none",
		}
	}
}

impl fmt::Display for AnimationMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for AnimationMode {
	type Err = OptionsError;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value.trim().to_ascii_lowercase().as_str() {
			"slide" => Ok(AnimationMode::Slide),
			"fade" => Ok(AnimationMode::Fade),
			"none" => Ok(AnimationMode::None),
			other => Err(OptionsError::UnknownAnimation(other.to_string())),
		}
	}
}

/// Modal presentation hints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Presentation {
	/// Leave the host screen visible around the modal.
	pub transparent: bool,
	pub animation: AnimationMode,
}

/// Content of the button that opens the picker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TriggerContent {
	/// Flag and name of the host's current code.
	#[default]
	Flag,
	/// Host-supplied text replacing the flag.
	Label(String),
}

/// Display and behaviour switches for a picker instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerOptions {
	/// Show an explicit close control in the modal header.
	pub closeable: bool,
	/// Show the filter input.
	pub filterable: bool,
	pub filter_placeholder: String,
	/// Give the filter input focus whenever the modal opens.
	pub auto_focus_filter: bool,
	/// Ignore open requests.
	pub disabled: bool,
	pub presentation: Presentation,
	pub trigger: TriggerContent,
	/// Text of the close control.
	pub close_label: String,
}

impl Default for PickerOptions {
	fn default() -> Self {
		Self {
			closeable: false,
			filterable: false,
			filter_placeholder: "Filter".to_string(),
			auto_focus_filter: true,
			disabled: false,
			presentation: Presentation::default(),
			trigger: TriggerContent::default(),
			close_label: "✕".to_string(),
		}
	}
}
