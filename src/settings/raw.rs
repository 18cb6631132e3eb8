use std::collections::BTreeMap;

use anyhow::{Context, Result, anyhow, bail};
use flagpick::data::{RegionKind, RegionTable};
use flagpick::picker::{AnimationMode, PickerOptions, Presentation, TriggerContent};
use flagpick::resolve::DEFAULT_TRANSLATION;
use flagpick::tui::style::{self, StyleElement, StyleOverrides, StyleSpec, parse_color};
use ratatui::style::Style;
use serde::Deserialize;

use super::resolved::ResolvedConfig;
use crate::cli::CliArgs;

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
	picker: PickerSection,
	styles: BTreeMap<String, StyleSpec>,
}

/// Picker options as they are read from disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct PickerSection {
	region: Option<String>,
	countries: Option<Vec<String>>,
	exclude: Option<Vec<String>>,
	translation: Option<String>,
	current: Option<String>,
	closeable: Option<bool>,
	filterable: Option<bool>,
	filter_placeholder: Option<String>,
	placeholder_color: Option<String>,
	auto_focus: Option<bool>,
	disabled: Option<bool>,
	transparent: Option<bool>,
	animation: Option<String>,
	trigger_label: Option<String>,
	close_label: Option<String>,
	theme: Option<String>,
}

impl RawConfig {
	/// Apply CLI overrides on top of the raw configuration values.
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		let picker = &mut self.picker;
		if let Some(region) = cli.region {
			picker.region = Some(RegionKind::from(region).as_str().to_string());
		}
		if let Some(translation) = cli.translation.clone() {
			picker.translation = Some(translation);
		}
		if let Some(current) = cli.current.clone() {
			picker.current = Some(current);
		}
		if let Some(codes) = &cli.only {
			picker.countries = Some(codes.clone());
		}
		if let Some(codes) = &cli.exclude {
			picker.exclude = Some(codes.clone());
		}
		if cli.no_filter {
			picker.filterable = Some(false);
		}
		if cli.no_close {
			picker.closeable = Some(false);
		}
		if cli.no_autofocus {
			picker.auto_focus = Some(false);
		}
		if cli.disabled {
			picker.disabled = Some(true);
		}
		if cli.transparent {
			picker.transparent = Some(true);
		}
		if let Some(animation) = cli.animation {
			picker.animation = Some(AnimationMode::from(animation).as_str().to_string());
		}
		if let Some(theme) = cli.theme.clone() {
			picker.theme = Some(theme);
		}
	}

	/// Convert the raw configuration into a [`ResolvedConfig`], validating
	/// codes, theme and styles and filling defaults where required.
	pub(super) fn resolve(self) -> Result<ResolvedConfig> {
		let PickerSection {
			region,
			countries,
			exclude,
			translation,
			current,
			closeable,
			filterable,
			filter_placeholder,
			placeholder_color,
			auto_focus,
			disabled,
			transparent,
			animation,
			trigger_label,
			close_label,
			theme,
		} = self.picker;

		let kind = match region {
			Some(region) => region.parse::<RegionKind>()?,
			None => RegionKind::Countries,
		};
		let table = kind.table();

		let candidates = countries
			.map(|codes| sanitize_codes(table, codes, "picker.countries"))
			.transpose()?;
		let exclude = exclude
			.map(|codes| sanitize_codes(table, codes, "picker.exclude"))
			.transpose()?
			.unwrap_or_default();
		let current = current
			.map(|code| {
				sanitize_codes(table, vec![code], "picker.current")
					.map(|codes| codes.into_iter().next())
			})
			.transpose()?
			.flatten();

		let translation = translation
			.map(|value| value.trim().to_ascii_lowercase())
			.filter(|value| !value.is_empty())
			.unwrap_or_else(|| DEFAULT_TRANSLATION.to_string());

		let theme_name = theme;
		let theme = match &theme_name {
			Some(name) => style::by_name(name).ok_or_else(|| {
				anyhow!(
					"unknown theme '{name}', expected one of: {}",
					style::names().join(", ")
				)
			})?,
			None => style::default_theme(),
		};

		let animation = match animation {
			Some(value) => value.parse::<AnimationMode>()?,
			None => AnimationMode::None,
		};

		let mut overrides = StyleOverrides::from_specs(&self.styles)
			.context("invalid [styles] entry in configuration")?;
		if let Some(colour) = placeholder_color {
			let colour = parse_color(&colour).context("invalid picker.placeholder_color")?;
			overrides = overrides.set(StyleElement::Placeholder, Style::new().fg(colour));
		}

		let defaults = PickerOptions::default();
		let options = PickerOptions {
			closeable: closeable.unwrap_or(true),
			filterable: filterable.unwrap_or(true),
			filter_placeholder: filter_placeholder.unwrap_or(defaults.filter_placeholder),
			auto_focus_filter: auto_focus.unwrap_or(defaults.auto_focus_filter),
			disabled: disabled.unwrap_or(false),
			presentation: Presentation {
				transparent: transparent.unwrap_or(false),
				animation,
			},
			trigger: trigger_label.map_or(TriggerContent::Flag, TriggerContent::Label),
			close_label: close_label.unwrap_or(defaults.close_label),
		};

		Ok(ResolvedConfig {
			kind,
			candidates,
			exclude,
			translation,
			current,
			options,
			theme_name,
			theme,
			overrides,
		})
	}
}

/// Uppercase, trim and validate codes against `table`, dropping blanks.
fn sanitize_codes(table: &RegionTable, codes: Vec<String>, key: &str) -> Result<Vec<String>> {
	let mut cleaned = Vec::with_capacity(codes.len());
	for code in codes {
		let code = code.trim().to_ascii_uppercase();
		if code.is_empty() {
			continue;
		}
		if !table.contains(&code) {
			bail!("unknown {} code '{code}' in {key}", table.kind());
		}
		cleaned.push(code);
	}
	Ok(cleaned)
}
