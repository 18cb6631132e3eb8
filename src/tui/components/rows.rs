use std::mem;

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::text::{Line, Span};
use ratatui::style::Style;
use ratatui::widgets::{Cell, HighlightSpacing, Paragraph, Row, Table, TableState};
use unicode_truncate::UnicodeTruncateStr;
use unicode_width::UnicodeWidthStr;

use crate::filter::highlight_indices;
use crate::picker::CountryPicker;
use crate::resolve::Flag;
use crate::tui::style::{PickerStyles, StyleElement};

pub const HIGHLIGHT_SYMBOL: &str = "▶ ";
/// Flag glyphs are two cells wide; state rows keep the column blank.
pub const FLAG_COLUMN_WIDTH: u16 = 2;
const COLUMN_SPACING: u16 = 1;
const EMPTY_MESSAGE: &str = "No matches";

/// Render the display list into `area`, keeping `state` in range.
pub fn render_rows(
	frame: &mut Frame,
	area: Rect,
	picker: &CountryPicker<'_>,
	styles: &PickerStyles,
	state: &mut TableState,
) {
	if area.width == 0 || area.height == 0 {
		return;
	}

	let display = picker.display_list();
	if display.is_empty() {
		let message = Paragraph::new(Span::styled(EMPTY_MESSAGE, styles.get(StyleElement::Empty)));
		frame.render_widget(message, area);
		return;
	}

	let name_width = area
		.width
		.saturating_sub(FLAG_COLUMN_WIDTH + COLUMN_SPACING)
		.saturating_sub(u16::try_from(HIGHLIGHT_SYMBOL.width()).unwrap_or(0));
	let query = picker.filter_text();
	let name_style = styles.get(StyleElement::CountryName);
	let match_style = styles.get(StyleElement::MatchHighlight);

	let rows: Vec<Row<'_>> = display
		.iter()
		.map(|code| {
			let name = picker.name_of(code).unwrap_or(code.as_str());
			let flag = match picker.flag_of(code) {
				Flag::Asset(asset) => Cell::from(asset.to_string()),
				Flag::Missing => Cell::from(" ".repeat(usize::from(FLAG_COLUMN_WIDTH))),
			};
			let indices = highlight_indices(query, name);
			let line = highlight_line(name, indices, usize::from(name_width), name_style, match_style);
			Row::new([flag, Cell::from(line)])
		})
		.collect();

	if state.selected().is_none_or(|selected| selected >= display.len()) {
		state.select(Some(0));
	}

	let widths = [Constraint::Length(FLAG_COLUMN_WIDTH), Constraint::Fill(1)];
	let table = Table::new(rows, widths)
		.column_spacing(COLUMN_SPACING)
		.highlight_spacing(HighlightSpacing::Always)
		.row_highlight_style(styles.get(StyleElement::RowHighlight))
		.highlight_symbol(HIGHLIGHT_SYMBOL);
	frame.render_stateful_widget(table, area, state);
}

/// Split `text` into spans, styling the characters at `indices` with
/// `highlight`. Text wider than `max_width` is cut with an ellipsis.
#[must_use]
pub fn highlight_line(
	text: &str,
	indices: Option<Vec<usize>>,
	max_width: usize,
	base: Style,
	highlight: Style,
) -> Line<'static> {
	let (display_text, indices) = truncate_with_highlight(text, indices, max_width);

	let Some(mut sorted_indices) = indices.filter(|indices| !indices.is_empty()) else {
		return Line::from(Span::styled(display_text, base));
	};
	sorted_indices.sort_unstable();
	let mut next = sorted_indices.into_iter().peekable();
	let mut buffer = String::new();
	let mut highlighted = false;
	let mut spans = Vec::new();

	for (idx, ch) in display_text.chars().enumerate() {
		while next.peek().is_some_and(|&pending| pending < idx) {
			next.next();
		}
		let should_highlight = next.peek().copied() == Some(idx);
		if should_highlight != highlighted {
			if !buffer.is_empty() {
				let style = if highlighted { base.patch(highlight) } else { base };
				spans.push(Span::styled(mem::take(&mut buffer), style));
			}
			highlighted = should_highlight;
		}
		buffer.push(ch);
	}

	if !buffer.is_empty() {
		let style = if highlighted { base.patch(highlight) } else { base };
		spans.push(Span::styled(buffer, style));
	}

	Line::from(spans)
}

fn truncate_with_highlight(
	text: &str,
	indices: Option<Vec<usize>>,
	max_width: usize,
) -> (String, Option<Vec<usize>>) {
	if max_width == 0 {
		return (String::new(), None);
	}
	if text.width() <= max_width {
		return (text.to_string(), indices);
	}

	let ellipsis = "…";
	let ellipsis_width = ellipsis.width();
	if max_width <= ellipsis_width {
		return (ellipsis.to_string(), None);
	}

	let (slice, _) = text.unicode_truncate(max_width - ellipsis_width);
	let limit = slice.chars().count();
	let mut truncated = slice.to_string();
	truncated.push_str(ellipsis);
	let indices = indices.and_then(|indices| {
		let kept: Vec<usize> = indices.into_iter().filter(|&idx| idx < limit).collect();
		(!kept.is_empty()).then_some(kept)
	});
	(truncated, indices)
}
