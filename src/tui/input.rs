//! Single-line filter input backed by `tui-textarea`.

use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use tui_textarea::TextArea;

/// Styling bundle for [`FilterInput::render`].
pub struct InputLook<'p> {
	pub style: Style,
	pub placeholder: &'p str,
	pub placeholder_style: Style,
	pub focused: bool,
}

/// Text field feeding the picker filter.
pub struct FilterInput<'a> {
	textarea: TextArea<'a>,
}

impl Default for FilterInput<'_> {
	fn default() -> Self {
		Self::new("")
	}
}

impl<'a> FilterInput<'a> {
	pub fn new(initial: &str) -> Self {
		let mut textarea = TextArea::new(vec![initial.to_string()]);
		textarea.set_cursor_line_style(Style::default());
		textarea.move_cursor(tui_textarea::CursorMove::End);
		Self { textarea }
	}

	/// Current text of the input.
	#[must_use]
	pub fn text(&self) -> &str {
		self.textarea
			.lines()
			.first()
			.map(String::as_str)
			.unwrap_or_default()
	}

	/// Feed a key to the text area. Returns `true` when the text changed.
	///
	/// Newlines are swallowed so the input stays on one line.
	pub fn input(&mut self, key: KeyEvent) -> bool {
		if matches!(key.code, KeyCode::Enter)
			|| (key.code == KeyCode::Char('m') && key.modifiers.contains(KeyModifiers::CONTROL))
		{
			return false;
		}
		let before = self.text().to_string();
		self.textarea.input(key);
		self.text() != before
	}

	pub fn clear(&mut self) {
		*self = Self::new("");
	}

	pub fn set_text(&mut self, text: &str) {
		*self = Self::new(text);
	}

	/// Render with `style`, showing the cursor only while focused. The
	/// placeholder is drawn while the text is empty.
	pub fn render(&mut self, frame: &mut Frame, area: Rect, look: InputLook<'_>) {
		let InputLook {
			style,
			placeholder,
			placeholder_style,
			focused,
		} = look;
		self.textarea.set_style(style);
		self.textarea.set_placeholder_text(placeholder);
		self.textarea.set_placeholder_style(placeholder_style);
		let cursor = if focused {
			style.add_modifier(Modifier::REVERSED)
		} else {
			style
		};
		self.textarea.set_cursor_style(cursor);
		frame.render_widget(&self.textarea, area);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn key(code: KeyCode) -> KeyEvent {
		KeyEvent::new(code, KeyModifiers::NONE)
	}

	#[test]
	fn typing_reports_changes() {
		let mut input = FilterInput::default();
		assert!(input.input(key(KeyCode::Char('f'))));
		assert!(input.input(key(KeyCode::Char('r'))));
		assert_eq!(input.text(), "fr");
		assert!(input.input(key(KeyCode::Backspace)));
		assert_eq!(input.text(), "f");
	}

	#[test]
	fn enter_never_splits_the_line() {
		let mut input = FilterInput::new("fra");
		assert!(!input.input(key(KeyCode::Enter)));
		assert_eq!(input.text(), "fra");
		assert!(!input.input(key(KeyCode::Left)));
	}

	#[test]
	fn clear_resets_text() {
		let mut input = FilterInput::new("ger");
		input.clear();
		assert_eq!(input.text(), "");
	}
}
