//! Interactive picker view: owns a [`CountryPicker`] and translates terminal
//! events into controller operations.

use log::debug;
use ratatui::Frame;
use ratatui::crossterm::event::{
	KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::TableState;

use crate::data::RegionKind;
use crate::picker::{CountryPicker, JumpTarget, Viewport};
use crate::resolve::first_letter;
use crate::tui::components::{
	Animation, ModalLayout, letter_at, max_sidebar_offset, offset_showing, point_in_rect,
	render_chrome, render_rows, render_sidebar, render_trigger,
};
use crate::tui::input::{FilterInput, InputLook};
use crate::tui::style::{PickerStyles, StyleElement};

/// Rows moved by one mouse wheel notch.
const WHEEL_STEP: isize = 3;

/// Which part of the modal receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
	Filter,
	List,
}

pub struct PickerView<'a> {
	picker: CountryPicker<'a>,
	styles: PickerStyles,
	input: FilterInput<'static>,
	focus: Focus,
	table_state: TableState,
	animation: Animation,
	trigger_area: Rect,
	layout: Option<ModalLayout>,
	sidebar_offset: usize,
	/// Scroll the sidebar to the highlighted row's letter on the next draw.
	sidebar_follow: bool,
}

impl<'a> PickerView<'a> {
	pub fn new(picker: CountryPicker<'a>, styles: PickerStyles) -> Self {
		Self {
			picker,
			styles,
			input: FilterInput::default(),
			focus: Focus::List,
			table_state: TableState::default(),
			animation: Animation::default(),
			trigger_area: Rect::default(),
			layout: None,
			sidebar_offset: 0,
			sidebar_follow: false,
		}
	}

	#[must_use]
	pub fn picker(&self) -> &CountryPicker<'a> {
		&self.picker
	}

	/// Mutable access for host-driven updates such as new candidates.
	pub fn picker_mut(&mut self) -> &mut CountryPicker<'a> {
		&mut self.picker
	}

	#[must_use]
	pub fn styles(&self) -> &PickerStyles {
		&self.styles
	}

	#[must_use]
	pub fn focus(&self) -> Focus {
		self.focus
	}

	#[must_use]
	pub fn is_open(&self) -> bool {
		self.picker.is_open()
	}

	/// Code under the row highlight.
	#[must_use]
	pub fn highlighted(&self) -> Option<&str> {
		self.table_state
			.selected()
			.and_then(|index| self.picker.display_list().get(index))
			.map(String::as_str)
	}

	/// Open the modal, resetting focus and highlighting the current code.
	pub fn open(&mut self) -> bool {
		if !self.picker.open() {
			return false;
		}
		let options = self.picker.options();
		self.focus = if options.filterable && options.auto_focus_filter {
			Focus::Filter
		} else {
			Focus::List
		};
		self.animation.start(options.presentation.animation);
		self.input.clear();

		let current = self
			.picker
			.current()
			.and_then(|code| self.picker.display_list().iter().position(|entry| entry == code));
		self.table_state = TableState::default().with_selected(current.or(Some(0)));
		self.sidebar_offset = 0;
		self.sidebar_follow = true;
		true
	}

	/// Advance the open animation by one frame.
	pub fn tick(&mut self) {
		self.animation.tick();
	}

	/// Handle a key press. Returns `true` when the picker consumed it.
	pub fn handle_key(&mut self, key: KeyEvent) -> bool {
		if !self.picker.is_open() {
			return match key.code {
				KeyCode::Enter | KeyCode::Char(' ') => self.open(),
				_ => false,
			};
		}

		let control = key.modifiers.contains(KeyModifiers::CONTROL);
		let plain = !key
			.modifiers
			.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
		match key.code {
			KeyCode::Esc => {
				self.picker.request_close();
				self.after_close();
			}
			KeyCode::Char('w') if control && self.picker.options().closeable => {
				self.picker.close();
				self.after_close();
			}
			KeyCode::Tab | KeyCode::BackTab if self.picker.options().filterable => {
				self.focus = match self.focus {
					Focus::Filter => Focus::List,
					Focus::List => Focus::Filter,
				};
			}
			KeyCode::Enter => self.select_highlighted(),
			KeyCode::Up => self.move_by(-1),
			KeyCode::Down => self.move_by(1),
			KeyCode::PageUp => self.move_by(-self.page_size()),
			KeyCode::PageDown => self.move_by(self.page_size()),
			KeyCode::Home if self.focus == Focus::List => self.move_to(0),
			KeyCode::End if self.focus == Focus::List => {
				self.move_to(self.picker.display_list().len().saturating_sub(1));
			}
			KeyCode::Char(ch) if self.focus == Focus::List && plain && ch.is_alphabetic() => {
				self.jump_to(&ch.to_string());
			}
			_ if self.focus == Focus::Filter => {
				if self.input.input(key) {
					self.picker.update_filter(self.input.text());
					self.reset_list_position();
				}
			}
			_ => return false,
		}
		true
	}

	/// Handle a mouse event. Returns `true` when the picker consumed it.
	pub fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
		let (column, row) = (mouse.column, mouse.row);
		if !self.picker.is_open() {
			return match mouse.kind {
				MouseEventKind::Down(MouseButton::Left)
					if point_in_rect(column, row, self.trigger_area) =>
				{
					self.open()
				}
				_ => false,
			};
		}

		let Some(layout) = self.layout else {
			return false;
		};
		if let Some(sidebar) = layout.sidebar.filter(|sidebar| point_in_rect(column, row, *sidebar))
			&& matches!(mouse.kind, MouseEventKind::ScrollUp | MouseEventKind::ScrollDown)
		{
			let delta = if mouse.kind == MouseEventKind::ScrollUp { -1 } else { 1 };
			self.scroll_sidebar(sidebar, delta);
			return true;
		}
		match mouse.kind {
			MouseEventKind::Down(MouseButton::Left) => {
				if layout.close.is_some_and(|close| point_in_rect(column, row, close)) {
					self.picker.close();
					self.after_close();
				} else if let Some(sidebar) = layout.sidebar
					&& point_in_rect(column, row, sidebar)
				{
					if let Some(letter) = letter_at(sidebar, self.picker.letter_index(), self.sidebar_offset, row) {
						let letter = letter.to_string();
						self.jump_to(&letter);
					}
				} else if point_in_rect(column, row, layout.list) {
					let index = self.table_state.offset() + usize::from(row - layout.list.y);
					if index < self.picker.display_list().len() {
						self.table_state.select(Some(index));
						self.select_highlighted();
					}
				} else if layout.filter.is_some_and(|filter| point_in_rect(column, row, filter)) {
					self.focus = Focus::Filter;
				} else if !point_in_rect(column, row, layout.modal) {
					self.picker.request_close();
					self.after_close();
				}
				true
			}
			MouseEventKind::ScrollUp if point_in_rect(column, row, layout.modal) => {
				self.move_by(-WHEEL_STEP);
				true
			}
			MouseEventKind::ScrollDown if point_in_rect(column, row, layout.modal) => {
				self.move_by(WHEEL_STEP);
				true
			}
			_ => false,
		}
	}

	/// Draw the trigger button into `area`.
	pub fn draw_trigger(&mut self, frame: &mut Frame, area: Rect) {
		self.trigger_area = render_trigger(frame, area, &self.picker, &self.styles);
	}

	/// Draw the modal over `area` when open.
	pub fn draw_modal(&mut self, frame: &mut Frame, area: Rect) {
		if !self.picker.is_open() {
			self.layout = None;
			return;
		}
		if self.input.text() != self.picker.filter_text() {
			self.input.set_text(self.picker.filter_text());
			self.reset_list_position();
		}

		let layout = ModalLayout::compute(
			area,
			self.picker.options(),
			self.picker.letters_visible(),
			&self.animation,
		);
		self.picker
			.set_viewport(Viewport::new(1, usize::from(layout.list.height)));

		let title = match self.picker.table().kind() {
			RegionKind::Countries => "Select a country",
			RegionKind::States => "Select a state",
		};
		render_chrome(frame, &layout, title, self.picker.options(), &self.styles);

		if let Some(filter) = layout.filter {
			let options = self.picker.options();
			let look = InputLook {
				style: self.styles.get(StyleElement::Filter),
				placeholder: &options.filter_placeholder,
				placeholder_style: self.styles.get(StyleElement::Placeholder),
				focused: self.focus == Focus::Filter,
			};
			self.input.render(frame, filter, look);
		}

		render_rows(
			frame,
			layout.list,
			&self.picker,
			&self.styles,
			&mut self.table_state,
		);
		if let Some(sidebar) = layout.sidebar {
			if self.sidebar_follow
				&& let Some(position) = self.highlighted_letter_position()
			{
				self.sidebar_offset = offset_showing(self.sidebar_offset, sidebar.height, position);
			}
			self.sidebar_offset = self
				.sidebar_offset
				.min(max_sidebar_offset(self.picker.letter_index(), sidebar.height));
			render_sidebar(
				frame,
				sidebar,
				self.picker.letter_index(),
				self.sidebar_offset,
				&self.styles,
			);
		}
		self.sidebar_follow = false;

		let modifier = self.animation.modifier();
		if !modifier.is_empty() {
			frame
				.buffer_mut()
				.set_style(layout.modal, Style::new().add_modifier(modifier));
		}
		self.layout = Some(layout);
	}

	fn select_highlighted(&mut self) {
		let Some(code) = self.highlighted().map(str::to_string) else {
			return;
		};
		self.picker.select(&code);
		self.after_close();
	}

	fn jump_to(&mut self, letter: &str) {
		if !self.picker.letters_visible() {
			return;
		}
		if let Some(JumpTarget { index, offset }) = self.picker.jump_to(letter) {
			debug!("jumped to '{letter}' at row {index}");
			self.table_state.select(Some(index));
			*self.table_state.offset_mut() = offset;
			self.sidebar_follow = true;
		}
	}

	fn scroll_sidebar(&mut self, sidebar: Rect, delta: isize) {
		let max = max_sidebar_offset(self.picker.letter_index(), sidebar.height);
		self.sidebar_offset = self.sidebar_offset.saturating_add_signed(delta).min(max);
	}

	/// Position in the letter index of the highlighted row's first letter.
	fn highlighted_letter_position(&self) -> Option<usize> {
		let name = self.picker.name_of(self.highlighted()?)?;
		let letter = first_letter(name)?;
		self.picker
			.letter_index()
			.letters()
			.iter()
			.position(|candidate| *candidate == letter)
	}

	fn move_by(&mut self, delta: isize) {
		let current = self.table_state.selected().unwrap_or(0);
		self.move_to(current.saturating_add_signed(delta));
	}

	fn move_to(&mut self, index: usize) {
		let len = self.picker.display_list().len();
		if len == 0 {
			self.table_state.select(None);
			return;
		}
		self.table_state.select(Some(index.min(len - 1)));
		self.sidebar_follow = true;
	}

	fn page_size(&self) -> isize {
		isize::try_from(self.picker.viewport().visible_height.max(1)).unwrap_or(1)
	}

	fn reset_list_position(&mut self) {
		let first = (!self.picker.display_list().is_empty()).then_some(0);
		self.table_state = TableState::default()
			.with_selected(first)
			.with_offset(self.picker.scroll_offset());
		self.sidebar_follow = true;
	}

	fn after_close(&mut self) {
		self.input.clear();
		self.focus = Focus::List;
		self.table_state = TableState::default();
		self.layout = None;
		self.sidebar_offset = 0;
		self.sidebar_follow = false;
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use ratatui::Terminal;
	use ratatui::backend::TestBackend;
	use ratatui::buffer::Buffer;

	use super::*;
	use crate::data::countries;
	use crate::picker::{PickerOptions, Selection};

	const CODES: [&str; 6] = ["US", "FR", "DE", "FI", "GB", "AT"];

	struct Harness {
		view: PickerView<'static>,
		terminal: Terminal<TestBackend>,
		selections: Rc<RefCell<Vec<Selection>>>,
		closes: Rc<RefCell<usize>>,
	}

	impl Harness {
		fn new(options: PickerOptions) -> Self {
			Self::sized(Some(&CODES), options, 30, 8)
		}

		fn sized(codes: Option<&[&str]>, options: PickerOptions, width: u16, height: u16) -> Self {
			let selections: Rc<RefCell<Vec<Selection>>> = Rc::default();
			let closes = Rc::new(RefCell::new(0));
			let sink = Rc::clone(&selections);
			let counter = Rc::clone(&closes);
			let mut builder = CountryPicker::builder(countries()).options(options);
			if let Some(codes) = codes {
				builder = builder.candidates(codes.iter().copied());
			}
			let picker = builder
				.on_change(move |selection| sink.borrow_mut().push(selection.clone()))
				.on_close(move || *counter.borrow_mut() += 1)
				.build()
				.expect("picker");
			Self {
				view: PickerView::new(picker, PickerStyles::default()),
				terminal: Terminal::new(TestBackend::new(width, height)).expect("terminal"),
				selections,
				closes,
			}
		}

		fn draw(&mut self) {
			let view = &mut self.view;
			self.terminal
				.draw(|frame| {
					let area = frame.area();
					view.draw_trigger(frame, Rect { height: 1, ..area });
					view.draw_modal(frame, area);
				})
				.expect("draw");
		}

		fn key(&mut self, code: KeyCode) -> bool {
			let consumed = self.view.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
			self.draw();
			consumed
		}

		fn type_text(&mut self, text: &str) {
			for ch in text.chars() {
				self.key(KeyCode::Char(ch));
			}
		}

		fn click(&mut self, column: u16, row: u16) -> bool {
			let consumed = self.view.handle_mouse(MouseEvent {
				kind: MouseEventKind::Down(MouseButton::Left),
				column,
				row,
				modifiers: KeyModifiers::NONE,
			});
			self.draw();
			consumed
		}

		fn buffer(&self) -> &Buffer {
			self.terminal.backend().buffer()
		}

		fn row_text(&self, y: u16) -> String {
			let buffer = self.buffer();
			(0..buffer.area.width)
				.map(|x| buffer[(x, y)].symbol())
				.collect()
		}
	}

	fn searchable() -> PickerOptions {
		PickerOptions {
			closeable: true,
			filterable: true,
			..PickerOptions::default()
		}
	}

	#[test]
	fn enter_on_trigger_opens_the_modal() {
		let mut harness = Harness::new(searchable());
		harness.draw();
		assert!(harness.key(KeyCode::Enter));
		assert!(harness.view.is_open());
		assert_eq!(harness.view.focus(), Focus::Filter);
		assert!(harness.row_text(1).contains("Select a country"));
		assert!(harness.row_text(3).contains("Austria"));
	}

	#[test]
	fn closed_view_leaves_other_keys_to_the_host() {
		let mut harness = Harness::new(searchable());
		assert!(!harness.key(KeyCode::Char('q')));
		assert!(!harness.view.is_open());
	}

	#[test]
	fn typing_filters_and_enter_selects_top_match() {
		let mut harness = Harness::new(searchable());
		harness.view.open();
		harness.type_text("fran");
		assert_eq!(harness.view.picker().filter_text(), "fran");
		assert_eq!(harness.view.highlighted(), Some("FR"));
		assert!(!harness.view.picker().letters_visible());

		harness.key(KeyCode::Enter);
		assert!(!harness.view.is_open());
		let selections = harness.selections.borrow();
		assert_eq!(selections.len(), 1);
		assert_eq!(selections[0].code, "FR");
		assert_eq!(harness.view.picker().filter_text(), "");
	}

	#[test]
	fn escape_dismisses_without_close_notification() {
		let mut harness = Harness::new(searchable());
		harness.view.open();
		harness.key(KeyCode::Esc);
		assert!(!harness.view.is_open());
		assert_eq!(*harness.closes.borrow(), 0);
		assert!(harness.selections.borrow().is_empty());
	}

	#[test]
	fn letter_keys_jump_when_list_has_focus() {
		let mut harness = Harness::new(searchable());
		harness.view.open();
		harness.draw();
		harness.key(KeyCode::Tab);
		assert_eq!(harness.view.focus(), Focus::List);

		harness.key(KeyCode::Char('u'));
		assert_eq!(harness.view.highlighted(), Some("GB"));
		assert_eq!(harness.view.picker().filter_text(), "");

		harness.key(KeyCode::Char('q'));
		assert_eq!(harness.view.highlighted(), Some("GB"));
	}

	#[test]
	fn arrows_move_within_bounds() {
		let mut harness = Harness::new(PickerOptions::default());
		harness.view.open();
		harness.draw();
		harness.key(KeyCode::Up);
		assert_eq!(harness.view.highlighted(), Some("AT"));
		harness.key(KeyCode::Down);
		harness.key(KeyCode::Down);
		assert_eq!(harness.view.highlighted(), Some("FR"));
		harness.key(KeyCode::PageDown);
		harness.key(KeyCode::PageDown);
		assert_eq!(harness.view.highlighted(), Some("US"));
	}

	#[test]
	fn clicking_close_control_notifies_host() {
		let mut harness = Harness::new(searchable());
		harness.view.open();
		harness.draw();
		let close = harness
			.view
			.layout
			.and_then(|layout| layout.close)
			.expect("close control");
		assert!(harness.click(close.x + 1, close.y));
		assert!(!harness.view.is_open());
		assert_eq!(*harness.closes.borrow(), 1);
	}

	#[test]
	fn clicking_a_row_selects_it() {
		let mut harness = Harness::new(searchable());
		harness.view.open();
		harness.draw();
		let list = harness.view.layout.map(|layout| layout.list).expect("layout");
		assert!(harness.click(list.x + 3, list.y + 1));
		let selections = harness.selections.borrow();
		assert_eq!(selections.first().map(|s| s.code.as_str()), Some("FI"));
	}

	#[test]
	fn clicking_a_sidebar_letter_jumps() {
		let mut harness = Harness::new(searchable());
		harness.view.open();
		harness.draw();
		let sidebar = harness
			.view
			.layout
			.and_then(|layout| layout.sidebar)
			.expect("sidebar while unfiltered");
		assert_eq!(harness.row_text(sidebar.y).trim_end().chars().last(), Some('│'));
		harness.click(sidebar.x + 1, sidebar.y + 2);
		assert_eq!(harness.view.highlighted(), Some("DE"));
		assert!(harness.view.is_open());
	}

	#[test]
	fn every_sidebar_letter_is_reachable_by_mouse() {
		let mut harness = Harness::sized(None, searchable(), 80, 24);
		harness.view.open();
		harness.draw();
		let sidebar = harness
			.view
			.layout
			.and_then(|layout| layout.sidebar)
			.expect("sidebar while unfiltered");
		let letters = harness.view.picker().letter_index().letters().to_vec();
		assert!(letters.len() > usize::from(sidebar.height));

		for letter in &letters {
			let mut row = None;
			for _ in 0..=letters.len() {
				row = (sidebar.y..sidebar.bottom())
					.find(|&y| harness.buffer()[(sidebar.x + 1, y)].symbol() == letter.as_str());
				if row.is_some() {
					break;
				}
				harness.view.handle_mouse(MouseEvent {
					kind: MouseEventKind::ScrollDown,
					column: sidebar.x + 1,
					row: sidebar.y,
					modifiers: KeyModifiers::NONE,
				});
				harness.draw();
			}
			let row = row.unwrap_or_else(|| panic!("letter {letter} never shown"));
			harness.click(sidebar.x + 1, row);
			let highlighted = harness.view.highlighted().expect("highlighted row");
			let name = harness.view.picker().name_of(highlighted).expect("name");
			assert_eq!(first_letter(name).as_deref(), Some(letter.as_str()));
			assert!(harness.view.is_open());
		}
	}

	#[test]
	fn sidebar_follows_keyboard_navigation() {
		let mut harness = Harness::sized(None, PickerOptions::default(), 80, 24);
		harness.view.open();
		harness.draw();
		harness.key(KeyCode::End);
		let sidebar = harness
			.view
			.layout
			.and_then(|layout| layout.sidebar)
			.expect("sidebar");
		let last = harness
			.view
			.picker()
			.letter_index()
			.letters()
			.last()
			.cloned()
			.expect("letters");
		assert_eq!(
			harness.buffer()[(sidebar.x + 1, sidebar.bottom() - 1)].symbol(),
			last.as_str()
		);
		harness.key(KeyCode::Home);
		assert_eq!(harness.buffer()[(sidebar.x + 1, sidebar.y)].symbol(), "A");
	}

	#[test]
	fn disabled_trigger_stays_closed() {
		let options = PickerOptions {
			disabled: true,
			..searchable()
		};
		let mut harness = Harness::new(options);
		harness.draw();
		assert!(!harness.click(1, 0));
		assert!(!harness.key(KeyCode::Enter));
		assert!(!harness.view.is_open());
	}

	#[test]
	fn host_candidate_updates_clear_the_input() {
		let mut harness = Harness::new(searchable());
		harness.view.open();
		harness.type_text("ger");
		harness.view.picker_mut().set_candidates(["FR", "DE"]);
		harness.draw();
		assert_eq!(harness.view.picker().filter_text(), "");
		assert_eq!(harness.view.highlighted(), Some("FR"));
	}
}
