use super::options::PickerOptions;
use super::selection::Selection;
use super::{ChangeHandler, CloseHandler, CountryPicker, Handlers};
use crate::data::RegionTable;
use crate::error::PickerBuildError;
use crate::resolve::DEFAULT_TRANSLATION;

/// Collects construction-time configuration for a [`CountryPicker`].
pub struct PickerBuilder<'a> {
	table: &'a RegionTable,
	candidates: Option<Vec<String>>,
	exclusions: Vec<String>,
	translation: String,
	current: Option<String>,
	options: PickerOptions,
	on_change: Option<ChangeHandler>,
	on_close: Option<CloseHandler>,
}

impl<'a> PickerBuilder<'a> {
	pub(super) fn new(table: &'a RegionTable) -> Self {
		Self {
			table,
			candidates: None,
			exclusions: Vec::new(),
			translation: DEFAULT_TRANSLATION.to_string(),
			current: None,
			options: PickerOptions::default(),
			on_change: None,
			on_close: None,
		}
	}

	/// Restrict the selectable codes. Defaults to every code of the table.
	pub fn candidates<I, S>(mut self, codes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.candidates = Some(codes.into_iter().map(Into::into).collect());
		self
	}

	pub fn exclude<I, S>(mut self, codes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.exclusions = codes.into_iter().map(Into::into).collect();
		self
	}

	pub fn translation(mut self, translation: impl Into<String>) -> Self {
		self.translation = translation.into();
		self
	}

	/// Code currently chosen by the host, shown on the default trigger.
	pub fn current(mut self, code: impl Into<String>) -> Self {
		self.current = Some(code.into());
		self
	}

	pub fn options(mut self, options: PickerOptions) -> Self {
		self.options = options;
		self
	}

	pub fn on_change(mut self, handler: impl FnMut(&Selection) + 'static) -> Self {
		self.on_change = Some(Box::new(handler));
		self
	}

	pub fn on_close(mut self, handler: impl FnMut() + 'static) -> Self {
		self.on_close = Some(Box::new(handler));
		self
	}

	/// Derive the working list and assemble the picker.
	pub fn build(self) -> Result<CountryPicker<'a>, PickerBuildError> {
		let on_change = self
			.on_change
			.ok_or(PickerBuildError::MissingChangeHandler)?;
		let candidates = self
			.candidates
			.unwrap_or_else(|| self.table.default_candidates());

		Ok(CountryPicker::assemble(
			self.table,
			candidates,
			self.exclusions,
			self.translation,
			self.current,
			self.options,
			Handlers {
				on_change,
				on_close: self.on_close,
			},
		))
	}
}
