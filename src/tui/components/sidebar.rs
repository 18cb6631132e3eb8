use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::letters::LetterIndex;
use crate::tui::style::{PickerStyles, StyleElement};

pub const SIDEBAR_WIDTH: u16 = 3;

/// Draw one letter per row starting at the `offset`-th letter, top-aligned.
pub fn render_sidebar(
	frame: &mut Frame,
	area: Rect,
	letters: &LetterIndex,
	offset: usize,
	styles: &PickerStyles,
) {
	if area.width == 0 || area.height == 0 {
		return;
	}
	let style = styles.get(StyleElement::Letter);
	let lines: Vec<Line<'_>> = letters
		.iter()
		.skip(offset)
		.take(usize::from(area.height))
		.map(|letter| Line::styled(letter, style))
		.collect();
	frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// Letter drawn at terminal row `row` of a sidebar occupying `area` and
/// scrolled by `offset`.
#[must_use]
pub fn letter_at(area: Rect, letters: &LetterIndex, offset: usize, row: u16) -> Option<&str> {
	if row < area.y || row >= area.bottom() {
		return None;
	}
	letters
		.letters()
		.get(offset + usize::from(row - area.y))
		.map(String::as_str)
}

/// Largest offset that still fills a sidebar of `height` rows.
#[must_use]
pub fn max_sidebar_offset(letters: &LetterIndex, height: u16) -> usize {
	letters.len().saturating_sub(usize::from(height))
}

/// Smallest change to `offset` that keeps letter number `position` inside a
/// sidebar of `height` rows.
#[must_use]
pub fn offset_showing(offset: usize, height: u16, position: usize) -> usize {
	let height = usize::from(height.max(1));
	if position < offset {
		position
	} else if position >= offset + height {
		position + 1 - height
	} else {
		offset
	}
}
