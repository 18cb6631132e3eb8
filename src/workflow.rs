use anyhow::{Context, Result};
use flagpick::picker::{CountryPicker, PickerBuilder, Selection};
use flagpick::tui::{self, PickerStyles};
use log::info;

use crate::settings::ResolvedConfig;

/// Coordinates building and running the interactive picker.
pub(crate) struct PickerWorkflow {
	builder: PickerBuilder<'static>,
	styles: PickerStyles,
}

impl PickerWorkflow {
	pub(crate) fn from_config(config: ResolvedConfig) -> Self {
		let styles = PickerStyles::resolve(&config.theme, &config.overrides);
		let builder = PickerFactory::build(config);
		Self { builder, styles }
	}

	pub(crate) fn run(self) -> Result<Option<Selection>> {
		let selection = tui::run(self.builder, self.styles).context("picker session failed")?;
		match &selection {
			Some(selection) => info!("session ended with {}", selection.code),
			None => info!("session ended without a selection"),
		}
		Ok(selection)
	}
}

/// Helper for translating resolved configuration into a [`PickerBuilder`].
struct PickerFactory {
	builder: PickerBuilder<'static>,
}

impl PickerFactory {
	fn build(config: ResolvedConfig) -> PickerBuilder<'static> {
		let ResolvedConfig {
			kind,
			candidates,
			exclude,
			translation,
			current,
			options,
			..
		} = config;

		Self {
			builder: CountryPicker::builder(kind.table())
				.exclude(exclude)
				.translation(translation)
				.options(options),
		}
		.with_candidates(candidates)
		.with_current(current)
		.finish()
	}

	fn with_candidates(mut self, candidates: Option<Vec<String>>) -> Self {
		if let Some(codes) = candidates {
			self.builder = self.builder.candidates(codes);
		}
		self
	}

	fn with_current(mut self, current: Option<String>) -> Self {
		if let Some(code) = current {
			self.builder = self.builder.current(code);
		}
		self
	}

	fn finish(self) -> PickerBuilder<'static> {
		self.builder
	}
}
