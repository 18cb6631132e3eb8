//! Picker controller.
//!
//! [`CountryPicker`] owns everything a picker instance needs between user
//! events: whether the modal is visible, the working list (candidates minus
//! exclusions, sorted by display name), the currently displayed subset, the
//! filter text and the letter index. It renders nothing itself; the
//! [`tui`](crate::tui) layer drives it and draws its state.

mod builder;
mod options;
mod selection;
mod viewport;

use std::collections::HashSet;

use log::{debug, warn};

pub use builder::PickerBuilder;
pub use options::{AnimationMode, PickerOptions, Presentation, TriggerContent};
pub use selection::Selection;
pub use viewport::Viewport;

use crate::data::RegionTable;
use crate::filter::FilterEngine;
use crate::letters::LetterIndex;
use crate::resolve::{Flag, first_letter, resolve_flag, resolve_name};

pub(crate) type ChangeHandler = Box<dyn FnMut(&Selection)>;
pub(crate) type CloseHandler = Box<dyn FnMut()>;

pub(crate) struct Handlers {
	pub(crate) on_change: ChangeHandler,
	pub(crate) on_close: Option<CloseHandler>,
}

/// Whether the modal is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Visibility {
	#[default]
	Closed,
	Open,
}

/// Where a jump-to-letter request landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpTarget {
	/// Position of the first matching row in the display list.
	pub index: usize,
	/// Scroll offset issued for that row.
	pub offset: usize,
}

pub struct CountryPicker<'a> {
	table: &'a RegionTable,
	translation: String,
	candidates: Vec<String>,
	exclusions: Vec<String>,
	current: Option<String>,
	options: PickerOptions,
	visibility: Visibility,
	working: Vec<String>,
	display: Vec<String>,
	filter: String,
	letters: LetterIndex,
	engine: FilterEngine,
	viewport: Viewport,
	scroll_offset: usize,
	handlers: Handlers,
}

impl<'a> CountryPicker<'a> {
	/// Start configuring a picker over `table`.
	pub fn builder(table: &'a RegionTable) -> PickerBuilder<'a> {
		PickerBuilder::new(table)
	}

	pub(crate) fn assemble(
		table: &'a RegionTable,
		candidates: Vec<String>,
		exclusions: Vec<String>,
		translation: String,
		current: Option<String>,
		options: PickerOptions,
		handlers: Handlers,
	) -> Self {
		let mut picker = Self {
			table,
			translation,
			candidates,
			exclusions,
			current,
			options,
			visibility: Visibility::Closed,
			working: Vec::new(),
			display: Vec::new(),
			filter: String::new(),
			letters: LetterIndex::default(),
			engine: FilterEngine::default(),
			viewport: Viewport::default(),
			scroll_offset: 0,
			handlers,
		};
		picker.rebuild();
		picker
	}

	/// Show the modal. Returns `false` when the picker is disabled.
	pub fn open(&mut self) -> bool {
		if self.options.disabled {
			debug!("ignoring open request on a disabled picker");
			return false;
		}
		self.visibility = Visibility::Open;
		debug!("picker opened with {} entries", self.working.len());
		true
	}

	/// Explicit close control: hide the modal, reset the filter and notify
	/// the host's close handler.
	pub fn close(&mut self) {
		self.reset();
		debug!("picker closed");
		if let Some(on_close) = self.handlers.on_close.as_mut() {
			on_close();
		}
	}

	/// Host-initiated dismissal. Same reset as [`close`](Self::close) without
	/// the close notification.
	pub fn request_close(&mut self) {
		self.reset();
		debug!("picker dismissed");
	}

	/// Pick `code`: close the modal, clear the filter, then hand the resolved
	/// record to the host's change handler.
	pub fn select(&mut self, code: &str) -> Option<Selection> {
		let selection = self
			.table
			.get(code)
			.map(|record| Selection::from_record(code, record, &self.translation));
		self.reset();

		let Some(selection) = selection else {
			warn!("ignoring selection of unknown code '{code}'");
			return None;
		};
		debug!("selected {} ({})", selection.code, selection.name);
		(self.handlers.on_change)(&selection);
		Some(selection)
	}

	/// Replace the filter text and recompute the display list. A blank query
	/// shows the whole working list. Scrolls back to the top.
	pub fn update_filter(&mut self, text: &str) {
		self.filter = text.to_string();
		self.display = if text.trim().is_empty() {
			self.working.clone()
		} else {
			self.engine.search(text)
		};
		self.scroll_offset = 0;
		debug!(
			"filter {:?} shows {} of {} entries",
			self.filter,
			self.display.len(),
			self.working.len()
		);
	}

	/// Scroll to the first displayed row whose name starts with `letter`.
	/// Leaves the scroll position untouched when no row matches.
	pub fn jump_to(&mut self, letter: &str) -> Option<JumpTarget> {
		let wanted = first_letter(letter)?;
		let index = self.display.iter().position(|code| {
			self.name_of(code)
				.and_then(first_letter)
				.is_some_and(|found| found == wanted)
		})?;
		let offset = self.viewport.offset_for(index, self.display.len());
		self.scroll_offset = offset;
		Some(JumpTarget { index, offset })
	}

	/// Replace the candidate list. Re-derives the working list through the
	/// same exclude-then-sort pipeline used at construction. Returns `false`
	/// when the list is unchanged.
	pub fn set_candidates<I, S>(&mut self, codes: I) -> bool
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let codes: Vec<String> = codes.into_iter().map(Into::into).collect();
		if codes == self.candidates {
			return false;
		}
		self.candidates = codes;
		self.rebuild();
		true
	}

	/// Replace the exclusion list. Returns `false` when it is unchanged.
	pub fn set_exclusions<I, S>(&mut self, codes: I) -> bool
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let codes: Vec<String> = codes.into_iter().map(Into::into).collect();
		if codes == self.exclusions {
			return false;
		}
		self.exclusions = codes;
		self.rebuild();
		true
	}

	/// Switch translation, re-sorting the working list under the new names.
	pub fn set_translation(&mut self, translation: impl Into<String>) -> bool {
		let translation = translation.into();
		if translation == self.translation {
			return false;
		}
		self.translation = translation;
		self.rebuild();
		true
	}

	pub fn set_current(&mut self, code: Option<String>) {
		self.current = code;
	}

	pub fn set_disabled(&mut self, disabled: bool) {
		self.options.disabled = disabled;
	}

	/// Record the list geometry measured by the renderer.
	pub fn set_viewport(&mut self, viewport: Viewport) {
		self.viewport = viewport;
	}

	fn reset(&mut self) {
		self.visibility = Visibility::Closed;
		self.filter.clear();
		self.display = self.working.clone();
		self.scroll_offset = 0;
	}

	fn rebuild(&mut self) {
		self.working = derive_working_list(
			self.table,
			&self.candidates,
			&self.exclusions,
			&self.translation,
		);
		let table = self.table;
		let translation = self.translation.as_str();
		let named: Vec<(&str, &str)> = self
			.working
			.iter()
			.filter_map(|code| {
				let record = table.get(code)?;
				Some((code.as_str(), resolve_name(record, translation)))
			})
			.collect();
		self.engine = FilterEngine::index(named.iter().copied());
		self.letters = LetterIndex::build(named.iter().map(|(_, name)| *name));
		self.filter.clear();
		self.display = self.working.clone();
		self.scroll_offset = 0;
	}

	/// Display name of `code` under the active translation.
	#[must_use]
	pub fn name_of(&self, code: &str) -> Option<&'a str> {
		let table = self.table;
		table
			.get(code)
			.map(|record| resolve_name(record, &self.translation))
	}

	#[must_use]
	pub fn flag_of(&self, code: &str) -> Flag<'a> {
		let table = self.table;
		resolve_flag(table.get(code))
	}

	#[must_use]
	pub fn is_open(&self) -> bool {
		self.visibility == Visibility::Open
	}

	#[must_use]
	pub fn visibility(&self) -> Visibility {
		self.visibility
	}

	#[must_use]
	pub fn filter_text(&self) -> &str {
		&self.filter
	}

	/// Whether the letter sidebar should be shown.
	#[must_use]
	pub fn letters_visible(&self) -> bool {
		self.filter.trim().is_empty()
	}

	#[must_use]
	pub fn display_list(&self) -> &[String] {
		&self.display
	}

	#[must_use]
	pub fn working_list(&self) -> &[String] {
		&self.working
	}

	#[must_use]
	pub fn letter_index(&self) -> &LetterIndex {
		&self.letters
	}

	/// Scroll offset issued by the last filter update or jump.
	#[must_use]
	pub fn scroll_offset(&self) -> usize {
		self.scroll_offset
	}

	#[must_use]
	pub fn viewport(&self) -> Viewport {
		self.viewport
	}

	#[must_use]
	pub fn options(&self) -> &PickerOptions {
		&self.options
	}

	#[must_use]
	pub fn translation(&self) -> &str {
		&self.translation
	}

	#[must_use]
	pub fn current(&self) -> Option<&str> {
		self.current.as_deref()
	}

	#[must_use]
	pub fn table(&self) -> &'a RegionTable {
		self.table
	}
}

/// Candidates minus exclusions and duplicates, stably sorted by display name.
fn derive_working_list(
	table: &RegionTable,
	candidates: &[String],
	exclusions: &[String],
	translation: &str,
) -> Vec<String> {
	let excluded: HashSet<&str> = exclusions.iter().map(String::as_str).collect();
	let mut seen = HashSet::new();
	let mut named: Vec<(&str, &str)> = Vec::with_capacity(candidates.len());

	for code in candidates.iter().map(String::as_str) {
		if excluded.contains(code) || !seen.insert(code) {
			continue;
		}
		debug_assert!(
			table.contains(code),
			"unknown code '{code}' in candidate list"
		);
		let Some(record) = table.get(code) else {
			warn!("skipping unknown code '{code}' in candidate list");
			continue;
		};
		named.push((code, resolve_name(record, translation)));
	}

	named.sort_by(|a, b| a.1.cmp(b.1));
	named.into_iter().map(|(code, _)| code.to_string()).collect()
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use super::*;
	use crate::data::{CountryRecord, LocalizedNames, RegionKind};
	use crate::error::PickerBuildError;

	fn fixture() -> &'static RegionTable {
		use std::sync::OnceLock;
		static TABLE: OnceLock<RegionTable> = OnceLock::new();
		TABLE.get_or_init(|| {
			let records = [
				("US", "United States", "Vereinigte Staaten", "🇺🇸"),
				("FR", "France", "Frankreich", "🇫🇷"),
				("DE", "Germany", "Deutschland", "🇩🇪"),
				("FI", "Finland", "Finnland", "🇫🇮"),
				("GB", "United Kingdom", "Vereinigtes Königreich", "🇬🇧"),
				("AT", "Austria", "Österreich", "🇦🇹"),
			]
			.into_iter()
			.map(|(code, common, deu, flag)| {
				CountryRecord::new(code, LocalizedNames::common(common).with("deu", deu))
					.with_flag(flag)
			});
			RegionTable::from_records(RegionKind::Countries, records).expect("fixture table")
		})
	}

	type Recorded = Rc<RefCell<Vec<Selection>>>;

	fn picker_with<'a>(builder: PickerBuilder<'a>) -> (CountryPicker<'a>, Recorded) {
		let recorded: Recorded = Rc::default();
		let sink = Rc::clone(&recorded);
		let picker = builder
			.on_change(move |selection| sink.borrow_mut().push(selection.clone()))
			.build()
			.expect("picker");
		(picker, recorded)
	}

	fn picker() -> (CountryPicker<'static>, Recorded) {
		picker_with(CountryPicker::builder(fixture()))
	}

	#[test]
	fn working_list_excludes_and_sorts() {
		let (picker, _) = picker_with(
			CountryPicker::builder(fixture())
				.candidates(["US", "FR", "DE"])
				.exclude(["DE"]),
		);
		assert_eq!(picker.working_list(), ["FR", "US"]);
		assert_eq!(picker.display_list(), ["FR", "US"]);
		assert_eq!(picker.letter_index().letters(), ["F", "U"]);
	}

	#[test]
	fn working_list_drops_duplicates() {
		let (picker, _) = picker_with(
			CountryPicker::builder(fixture()).candidates(["FR", "US", "FR", "AT", "US"]),
		);
		assert_eq!(picker.working_list(), ["AT", "FR", "US"]);
	}

	#[test]
	fn default_candidates_cover_the_whole_table() {
		let (picker, _) = picker();
		assert_eq!(
			picker.working_list(),
			["AT", "FI", "FR", "DE", "GB", "US"]
		);
	}

	#[test]
	fn translation_drives_sort_order() {
		let (picker, _) = picker_with(CountryPicker::builder(fixture()).translation("deu"));
		assert_eq!(
			picker.working_list(),
			["DE", "FI", "FR", "US", "GB", "AT"]
		);
		assert_eq!(picker.name_of("AT"), Some("Österreich"));
		assert_eq!(picker.letter_index().letters(), ["D", "F", "V", "Ö"]);
	}

	#[test]
	fn equal_names_keep_candidate_order() {
		use std::sync::OnceLock;
		static TABLE: OnceLock<RegionTable> = OnceLock::new();
		let table = TABLE.get_or_init(|| {
			let records = [("CG", "Congo"), ("CD", "Congo"), ("CM", "Cameroon")]
				.into_iter()
				.map(|(code, name)| CountryRecord::new(code, LocalizedNames::common(name)));
			RegionTable::from_records(RegionKind::Countries, records).expect("tie table")
		});

		let (picker, _) = picker_with(CountryPicker::builder(table).candidates(["CG", "CD", "CM"]));
		assert_eq!(picker.working_list(), ["CM", "CG", "CD"]);

		let (picker, _) = picker_with(CountryPicker::builder(table).candidates(["CD", "CM", "CG"]));
		assert_eq!(picker.working_list(), ["CM", "CD", "CG"]);
	}

	#[test]
	fn missing_change_handler_is_rejected() {
		let result = CountryPicker::builder(fixture()).build();
		assert_eq!(result.err(), Some(PickerBuildError::MissingChangeHandler));
	}

	#[test]
	fn open_and_close_toggle_visibility() {
		let closes = Rc::new(RefCell::new(0));
		let counter = Rc::clone(&closes);
		let (mut picker, _) = picker_with(
			CountryPicker::builder(fixture()).on_close(move || *counter.borrow_mut() += 1),
		);

		assert_eq!(picker.visibility(), Visibility::Closed);
		assert!(picker.open());
		assert!(picker.is_open());

		picker.update_filter("fra");
		picker.close();
		assert!(!picker.is_open());
		assert_eq!(picker.filter_text(), "");
		assert_eq!(picker.display_list(), picker.working_list());
		assert_eq!(*closes.borrow(), 1);
	}

	#[test]
	fn dismissal_skips_the_close_handler() {
		let closes = Rc::new(RefCell::new(0));
		let counter = Rc::clone(&closes);
		let (mut picker, _) = picker_with(
			CountryPicker::builder(fixture()).on_close(move || *counter.borrow_mut() += 1),
		);

		picker.open();
		picker.update_filter("ger");
		picker.request_close();
		assert!(!picker.is_open());
		assert_eq!(picker.filter_text(), "");
		assert_eq!(*closes.borrow(), 0);
	}

	#[test]
	fn disabled_picker_ignores_open() {
		let options = PickerOptions {
			disabled: true,
			..PickerOptions::default()
		};
		let (mut picker, _) = picker_with(CountryPicker::builder(fixture()).options(options));
		assert!(!picker.open());
		assert!(!picker.is_open());

		picker.set_disabled(false);
		assert!(picker.open());
	}

	#[test]
	fn select_closes_and_emits_resolved_record() {
		let (mut picker, recorded) =
			picker_with(CountryPicker::builder(fixture()).translation("deu"));
		picker.open();
		picker.update_filter("frank");

		let selection = picker.select("FR").expect("known code");
		assert_eq!(selection.name, "Frankreich");
		assert!(!picker.is_open());
		assert_eq!(picker.filter_text(), "");
		assert_eq!(picker.display_list(), picker.working_list());

		let recorded = recorded.borrow();
		assert_eq!(recorded.len(), 1);
		assert_eq!(recorded[0].code, "FR");
		assert_eq!(recorded[0].names.common, "France");
	}

	#[test]
	fn selecting_an_unknown_code_still_closes() {
		let (mut picker, recorded) = picker();
		picker.open();
		picker.update_filter("uni");
		assert!(picker.select("ZZ").is_none());
		assert!(!picker.is_open());
		assert_eq!(picker.filter_text(), "");
		assert!(recorded.borrow().is_empty());
	}

	#[test]
	fn empty_filter_restores_working_list() {
		let (mut picker, _) = picker();
		picker.update_filter("united");
		assert_ne!(picker.display_list(), picker.working_list());
		picker.update_filter("");
		assert_eq!(picker.display_list(), picker.working_list());
		assert!(picker.letters_visible());
	}

	#[test]
	fn filter_ranks_prefix_matches_first() {
		let (mut picker, _) = picker();
		picker.update_filter("Fra");
		assert_eq!(picker.display_list().first().map(String::as_str), Some("FR"));
		for code in picker.display_list() {
			assert!(picker.working_list().contains(code));
		}
	}

	#[test]
	fn unmatched_filter_empties_display_but_keeps_index() {
		let (mut picker, _) =
			picker_with(CountryPicker::builder(fixture()).candidates(["US", "FR"]));
		picker.update_filter("zzz");
		assert!(picker.display_list().is_empty());
		assert!(!picker.letters_visible());
		assert_eq!(picker.letter_index().letters(), ["F", "U"]);
	}

	#[test]
	fn filter_updates_scroll_back_to_top() {
		let (mut picker, _) = picker();
		picker.set_viewport(Viewport::new(1, 2));
		picker.jump_to("U").expect("jump");
		assert!(picker.scroll_offset() > 0);
		picker.update_filter("a");
		assert_eq!(picker.scroll_offset(), 0);
	}

	#[test]
	fn jump_clamps_to_end_of_list() {
		let (mut picker, _) = picker();
		picker.set_viewport(Viewport::new(1, 4));

		let target = picker.jump_to("U").expect("letter is indexed");
		assert_eq!(target.index, 4);
		let total = picker.display_list().len();
		assert_eq!(target.offset, total - 4);
		assert_eq!(picker.scroll_offset(), target.offset);

		let target = picker.jump_to("f").expect("lowercase letters are accepted");
		assert_eq!(target, JumpTarget { index: 1, offset: 1 });
	}

	#[test]
	fn jump_to_missing_letter_is_a_no_op() {
		let (mut picker, _) = picker();
		picker.set_viewport(Viewport::new(1, 2));
		picker.jump_to("G").expect("jump");
		let before = picker.scroll_offset();

		assert_eq!(picker.jump_to("Q"), None);
		assert_eq!(picker.scroll_offset(), before);
	}

	#[test]
	fn candidate_changes_rerun_the_pipeline() {
		let (mut picker, _) = picker_with(
			CountryPicker::builder(fixture())
				.candidates(["US", "FR"])
				.exclude(["GB"]),
		);
		picker.update_filter("fr");

		assert!(picker.set_candidates(["GB", "US", "AT", "DE"]));
		assert_eq!(picker.working_list(), ["AT", "DE", "US"]);
		assert_eq!(picker.display_list(), picker.working_list());
		assert_eq!(picker.filter_text(), "");
		assert_eq!(picker.letter_index().letters(), ["A", "G", "U"]);

		assert!(!picker.set_candidates(["GB", "US", "AT", "DE"]));
	}

	#[test]
	fn exclusion_and_translation_changes_rebuild() {
		let (mut picker, _) = picker();
		assert!(picker.set_exclusions(["US", "GB"]));
		assert_eq!(picker.working_list(), ["AT", "FI", "FR", "DE"]);
		assert!(!picker.set_exclusions(["US", "GB"]));

		assert!(picker.set_translation("deu"));
		assert_eq!(picker.working_list(), ["DE", "FI", "FR", "AT"]);
		assert!(!picker.set_translation("deu"));
	}

	#[test]
	fn flags_and_names_resolve_through_the_picker() {
		let (picker, _) = picker();
		assert_eq!(picker.flag_of("FR"), Flag::Asset("🇫🇷"));
		assert_eq!(picker.flag_of("ZZ"), Flag::Missing);
		assert_eq!(picker.name_of("ZZ"), None);
	}

	#[cfg(debug_assertions)]
	#[test]
	#[should_panic(expected = "unknown code")]
	fn unknown_candidates_fail_fast_in_debug_builds() {
		let _ = picker_with(CountryPicker::builder(fixture()).candidates(["FR", "XX"]));
	}
}
