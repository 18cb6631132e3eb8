use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use anyhow::{Context, Result, bail};
use include_dir::{Dir, File, include_dir};
use ratatui::style::{Color, Modifier};
use serde::Deserialize;

use super::{StyleElement, StyleSpec, Theme};
use crate::error::StyleError;

const BUILTIN_THEME_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/tui/style/themes");

pub(super) struct BuiltinThemes {
	entries: Vec<ThemeEntry>,
	default_index: usize,
}

struct ThemeEntry {
	name: String,
	aliases: Vec<String>,
	theme: Theme,
}

impl BuiltinThemes {
	pub(super) fn default_theme(&self) -> Theme {
		self.entries[self.default_index].theme
	}

	pub(super) fn get(&self, name: &str) -> Option<Theme> {
		let wanted = normalise_key(name);
		self.entries
			.iter()
			.find(|entry| {
				normalise_key(&entry.name) == wanted
					|| entry.aliases.iter().any(|alias| normalise_key(alias) == wanted)
			})
			.map(|entry| entry.theme)
	}

	pub(super) fn names(&self) -> Vec<String> {
		let mut names: Vec<String> = self.entries.iter().map(|entry| entry.name.clone()).collect();
		names.sort_unstable_by_key(|name| name.to_ascii_lowercase());
		names
	}
}

pub(super) fn builtin_themes() -> &'static BuiltinThemes {
	static BUILTINS: OnceLock<BuiltinThemes> = OnceLock::new();
	BUILTINS.get_or_init(|| {
		load_builtin_themes(&BUILTIN_THEME_DIR)
			.unwrap_or_else(|error| panic!("failed to load built-in themes: {error:#}"))
	})
}

#[derive(Debug, Deserialize)]
struct ThemeConfig {
	name: String,
	#[serde(default)]
	aliases: Vec<String>,
	#[serde(default)]
	default: bool,
	styles: BTreeMap<String, StyleSpec>,
}

impl ThemeConfig {
	fn into_entry(self, context: &str) -> Result<(ThemeEntry, bool)> {
		let mut styles = BTreeMap::new();
		for (key, spec) in &self.styles {
			let element: StyleElement = key.parse().with_context(|| format!("{context}.styles"))?;
			let style = spec
				.to_style()
				.with_context(|| format!("{context}.styles.{element}"))?;
			styles.insert(element, style);
		}

		let mut theme = Theme::default();
		for element in StyleElement::ALL {
			let Some(style) = styles.remove(&element) else {
				bail!("{context}: missing style for `{element}`");
			};
			theme = theme.with(element, style);
		}

		let aliases = self
			.aliases
			.into_iter()
			.map(|alias| alias.trim().to_string())
			.filter(|alias| !alias.is_empty())
			.collect();

		Ok((
			ThemeEntry {
				name: self.name,
				aliases,
				theme,
			},
			self.default,
		))
	}
}

fn load_builtin_themes(dir: &Dir) -> Result<BuiltinThemes> {
	let mut entries: Vec<ThemeEntry> = Vec::new();
	let mut default_index: Option<usize> = None;

	let mut files: Vec<_> = dir.files().collect();
	files.sort_by(|a, b| a.path().cmp(b.path()));

	for file in files {
		let (entry, is_default) = parse_theme_document(file)?;
		if is_default {
			if let Some(existing) = default_index {
				bail!(
					"multiple built-in themes are marked as default (`{}` and `{}`)",
					entries[existing].name,
					entry.name
				);
			}
			default_index = Some(entries.len());
		}
		entries.push(entry);
	}

	if entries.is_empty() {
		bail!("no built-in theme definitions were found");
	}

	Ok(BuiltinThemes {
		entries,
		default_index: default_index.unwrap_or(0),
	})
}

fn parse_theme_document(file: &File) -> Result<(ThemeEntry, bool)> {
	let path = file.path();
	let contents = file
		.contents_utf8()
		.with_context(|| format!("{path:?} is not valid UTF-8"))?;

	let config: ThemeConfig = toml::from_str(contents)
		.with_context(|| format!("failed to parse built-in theme definition in {path:?}"))?;

	config.into_entry(&format!("{path:?}"))
}

/// Parse a colour written as a name, `#rgb`, `#rrggbb`, `rgb(r, g, b)`,
/// `ansi(n)` or a bare palette index.
pub fn parse_color(input: &str) -> Result<Color, StyleError> {
	let value = input.trim();

	if let Some(hex) = value.strip_prefix('#') {
		return parse_hex_colour(hex).map_err(|reason| invalid_colour(input, reason));
	}

	if let Some(body) = value.strip_prefix("rgb(").and_then(|s| s.strip_suffix(')')) {
		return parse_rgb_triplet(body).map_err(|reason| invalid_colour(input, reason));
	}

	if let Some(body) = value
		.strip_prefix("ansi(")
		.and_then(|s| s.strip_suffix(')'))
	{
		let index: u8 = body
			.trim()
			.parse()
			.map_err(|_| invalid_colour(input, format!("invalid ANSI colour index `{body}`")))?;
		return Ok(Color::Indexed(index));
	}

	if let Ok(index) = value.parse::<u8>() {
		return Ok(Color::Indexed(index));
	}

	match normalise_key(value).as_ref() {
		"reset" | "none" | "default" => Ok(Color::Reset),
		"black" => Ok(Color::Black),
		"red" => Ok(Color::Red),
		"green" => Ok(Color::Green),
		"yellow" => Ok(Color::Yellow),
		"blue" => Ok(Color::Blue),
		"magenta" => Ok(Color::Magenta),
		"cyan" => Ok(Color::Cyan),
		"gray" | "grey" => Ok(Color::Gray),
		"dark_gray" | "dark_grey" => Ok(Color::DarkGray),
		"light_red" => Ok(Color::LightRed),
		"light_green" => Ok(Color::LightGreen),
		"light_yellow" => Ok(Color::LightYellow),
		"light_blue" => Ok(Color::LightBlue),
		"light_magenta" => Ok(Color::LightMagenta),
		"light_cyan" => Ok(Color::LightCyan),
		"white" => Ok(Color::White),
		_ => Err(invalid_colour(input, "unknown colour name".to_string())),
	}
}

fn invalid_colour(value: &str, reason: String) -> StyleError {
	StyleError::InvalidColour {
		value: value.to_string(),
		reason,
	}
}

fn parse_hex_colour(hex: &str) -> Result<Color, String> {
	if !hex.is_ascii() {
		return Err("hex colours must be ASCII".to_string());
	}
	let expanded = match hex.len() {
		3 => {
			let mut expanded = String::with_capacity(6);
			for ch in hex.chars() {
				expanded.push(ch);
				expanded.push(ch);
			}
			Cow::Owned(expanded)
		}
		6 => Cow::Borrowed(hex),
		_ => return Err("hex colours must be 3 or 6 characters long".to_string()),
	};

	let component = |range: std::ops::Range<usize>, name: &str| {
		u8::from_str_radix(&expanded[range], 16)
			.map_err(|_| format!("invalid {name} component in `#{hex}`"))
	};

	Ok(Color::Rgb(
		component(0..2, "red")?,
		component(2..4, "green")?,
		component(4..6, "blue")?,
	))
}

fn parse_rgb_triplet(body: &str) -> Result<Color, String> {
	let components = body.split(',').map(str::trim).collect::<Vec<_>>();

	if components.len() != 3 {
		return Err(format!(
			"expected three components for rgb() colour, found {}",
			components.len()
		));
	}

	let r = parse_rgb_component(components[0], 'r')?;
	let g = parse_rgb_component(components[1], 'g')?;
	let b = parse_rgb_component(components[2], 'b')?;

	Ok(Color::Rgb(r, g, b))
}

fn parse_rgb_component(value: &str, component: char) -> Result<u8, String> {
	value
		.parse::<u8>()
		.map_err(|_| format!("invalid {component}-component `{value}`"))
}

/// Parse a text modifier such as `bold` or `strikethrough`.
pub fn parse_modifier(input: &str) -> Result<Modifier, StyleError> {
	match normalise_key(input).as_ref() {
		"bold" => Ok(Modifier::BOLD),
		"dim" => Ok(Modifier::DIM),
		"italic" => Ok(Modifier::ITALIC),
		"underline" | "underlined" => Ok(Modifier::UNDERLINED),
		"slow_blink" | "slowblink" => Ok(Modifier::SLOW_BLINK),
		"rapid_blink" | "rapidblink" | "fast_blink" => Ok(Modifier::RAPID_BLINK),
		"reversed" | "reverse" | "invert" | "inverted" => Ok(Modifier::REVERSED),
		"hidden" => Ok(Modifier::HIDDEN),
		"crossed_out" | "crossedout" | "strikethrough" => Ok(Modifier::CROSSED_OUT),
		_ => Err(StyleError::UnknownModifier(input.to_string())),
	}
}

pub(super) fn normalise_key(value: &str) -> String {
	value
		.trim()
		.to_ascii_lowercase()
		.chars()
		.map(|ch| match ch {
			'-' | ' ' => '_',
			other => other,
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn colours_parse_in_every_notation() {
		assert_eq!(parse_color("#fff"), Ok(Color::Rgb(255, 255, 255)));
		assert_eq!(parse_color("#2e3440"), Ok(Color::Rgb(0x2e, 0x34, 0x40)));
		assert_eq!(parse_color("rgb(1, 2, 3)"), Ok(Color::Rgb(1, 2, 3)));
		assert_eq!(parse_color("ansi(166)"), Ok(Color::Indexed(166)));
		assert_eq!(parse_color("42"), Ok(Color::Indexed(42)));
		assert_eq!(parse_color("Dark Gray"), Ok(Color::DarkGray));
		assert_eq!(parse_color("default"), Ok(Color::Reset));
	}

	#[test]
	fn bad_colours_report_the_input() {
		for input in ["#12", "#gggggg", "rgb(1,2)", "rgb(1,2,300)", "ansi(999)", "chartreuse"] {
			match parse_color(input) {
				Err(StyleError::InvalidColour { value, .. }) => assert_eq!(value, input),
				other => panic!("{input} parsed as {other:?}"),
			}
		}
	}

	#[test]
	fn modifiers_accept_aliases() {
		assert_eq!(parse_modifier("Underline"), Ok(Modifier::UNDERLINED));
		assert_eq!(parse_modifier("strike-through"), Err(StyleError::UnknownModifier("strike-through".to_string())));
		assert_eq!(parse_modifier("crossed-out"), Ok(Modifier::CROSSED_OUT));
	}

	#[test]
	fn bundled_themes_define_every_element() {
		let builtins = builtin_themes();
		assert_eq!(builtins.entries.len(), 3);
		assert_eq!(builtins.entries[builtins.default_index].name, "slate");
	}

	#[test]
	fn second_default_theme_is_rejected() {
		use include_dir::DirEntry;

		let slate = BUILTIN_THEME_DIR
			.get_file("slate.toml")
			.and_then(|file| file.contents_utf8())
			.expect("slate theme");
		let twin = slate
			.replacen("name = \"slate\"", "name = \"twin\"", 1)
			.replacen("aliases = [\"dark\"]", "aliases = []", 1);
		let entries = [
			DirEntry::File(File::new("slate.toml", slate.as_bytes())),
			DirEntry::File(File::new("twin.toml", twin.as_bytes())),
		];
		let dir = Dir::new("themes", &entries);

		let error = load_builtin_themes(&dir).err().expect("two defaults");
		assert!(error.to_string().contains("(`slate` and `twin`)"));
	}

	#[test]
	fn incomplete_theme_is_rejected() {
		let config: ThemeConfig = toml::from_str(
			r##"
name = "partial"

[styles.header]
fg = "blue"
"##,
		)
		.expect("valid toml");
		let error = config.into_entry("partial").err().expect("missing styles");
		assert!(format!("{error:#}").contains("missing style for `trigger`"));
	}
}
