//! Themes and per-instance style resolution.
//!
//! Built-in themes are TOML documents bundled into the binary. A picker
//! resolves its [`PickerStyles`] once at construction by patching the chosen
//! [`Theme`] with the host's [`StyleOverrides`]; no style state is shared
//! between instances.

mod loader;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use ratatui::style::{Modifier, Style};
use serde::{Deserialize, Serialize};

pub use loader::{parse_color, parse_modifier};

use crate::error::StyleError;

/// Styled parts of the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StyleElement {
	Trigger,
	Header,
	CloseButton,
	Filter,
	Placeholder,
	CountryName,
	RowHighlight,
	MatchHighlight,
	Letter,
	Empty,
	Modal,
}

const ELEMENT_COUNT: usize = 11;

impl StyleElement {
	pub const ALL: [StyleElement; ELEMENT_COUNT] = [
		StyleElement::Trigger,
		StyleElement::Header,
		StyleElement::CloseButton,
		StyleElement::Filter,
		StyleElement::Placeholder,
		StyleElement::CountryName,
		StyleElement::RowHighlight,
		StyleElement::MatchHighlight,
		StyleElement::Letter,
		StyleElement::Empty,
		StyleElement::Modal,
	];

	#[must_use]
	pub fn as_str(self) -> &'static str {
		match self {
			StyleElement::Trigger => "trigger",
			StyleElement::Header => "header",
			StyleElement::CloseButton => "close_button",
			StyleElement::Filter => "filter",
			StyleElement::Placeholder => "placeholder",
			StyleElement::CountryName => "country_name",
			StyleElement::RowHighlight => "row_highlight",
			StyleElement::MatchHighlight => "match_highlight",
			StyleElement::Letter => "letter",
			StyleElement::Empty => "empty",
			StyleElement::Modal => "modal",
		}
	}

	fn slot(self) -> usize {
		self as usize
	}
}

impl fmt::Display for StyleElement {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for StyleElement {
	type Err = StyleError;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		let key = loader::normalise_key(value);
		StyleElement::ALL
			.into_iter()
			.find(|element| element.as_str() == key)
			.ok_or_else(|| StyleError::UnknownElement(value.to_string()))
	}
}

/// One complete style per [`StyleElement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Theme {
	styles: [Style; ELEMENT_COUNT],
}

impl Theme {
	#[must_use]
	pub fn get(&self, element: StyleElement) -> Style {
		self.styles[element.slot()]
	}

	#[must_use]
	pub fn with(mut self, element: StyleElement, style: Style) -> Self {
		self.styles[element.slot()] = style;
		self
	}
}

/// Textual style definition shared by theme documents and config files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleSpec {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub fg: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub bg: Option<String>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub modifiers: Vec<String>,
}

impl StyleSpec {
	/// Parse colours and modifiers into a ratatui [`Style`].
	pub fn to_style(&self) -> Result<Style, StyleError> {
		let mut style = Style::new();
		if let Some(fg) = &self.fg {
			style = style.fg(parse_color(fg)?);
		}
		if let Some(bg) = &self.bg {
			style = style.bg(parse_color(bg)?);
		}
		let modifiers = self
			.modifiers
			.iter()
			.map(|modifier| parse_modifier(modifier))
			.collect::<Result<Vec<Modifier>, _>>()?;
		for modifier in modifiers {
			style = style.add_modifier(modifier);
		}
		Ok(style)
	}
}

/// Partial styles a host layers on top of the theme.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleOverrides {
	patches: BTreeMap<StyleElement, Style>,
}

impl StyleOverrides {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Parse overrides keyed by element name, as found in config files.
	pub fn from_specs<'s, I, K>(specs: I) -> Result<Self, StyleError>
	where
		I: IntoIterator<Item = (K, &'s StyleSpec)>,
		K: AsRef<str>,
	{
		let mut overrides = Self::new();
		for (name, spec) in specs {
			let element: StyleElement = name.as_ref().parse()?;
			overrides = overrides.set(element, spec.to_style()?);
		}
		Ok(overrides)
	}

	/// Layer `style` onto `element`, merging with any earlier patch.
	#[must_use]
	pub fn set(mut self, element: StyleElement, style: Style) -> Self {
		let patch = self.patches.entry(element).or_default();
		*patch = patch.patch(style);
		self
	}

	#[must_use]
	pub fn get(&self, element: StyleElement) -> Option<Style> {
		self.patches.get(&element).copied()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.patches.is_empty()
	}
}

/// Fully resolved styles of one picker instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerStyles {
	resolved: Theme,
}

impl PickerStyles {
	#[must_use]
	pub fn resolve(theme: &Theme, overrides: &StyleOverrides) -> Self {
		let resolved = StyleElement::ALL
			.into_iter()
			.fold(*theme, |resolved, element| match overrides.get(element) {
				Some(patch) => resolved.with(element, theme.get(element).patch(patch)),
				None => resolved,
			});
		Self { resolved }
	}

	#[must_use]
	pub fn get(&self, element: StyleElement) -> Style {
		self.resolved.get(element)
	}
}

impl Default for PickerStyles {
	fn default() -> Self {
		Self::resolve(&default_theme(), &StyleOverrides::default())
	}
}

/// The theme marked as default among the built-ins.
#[must_use]
pub fn default_theme() -> Theme {
	loader::builtin_themes().default_theme()
}

/// Look up a built-in theme by name or alias, ignoring case.
#[must_use]
pub fn by_name(name: &str) -> Option<Theme> {
	loader::builtin_themes().get(name)
}

/// Canonical names of the built-in themes, sorted.
#[must_use]
pub fn names() -> Vec<String> {
	loader::builtin_themes().names()
}
