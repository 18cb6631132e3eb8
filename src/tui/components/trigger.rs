use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::data::RegionKind;
use crate::picker::{CountryPicker, TriggerContent};
use crate::resolve::Flag;
use crate::tui::style::{PickerStyles, StyleElement};

const TRIGGER_ARROW: &str = "▾";

/// Text shown on the trigger button.
#[must_use]
pub fn trigger_text(picker: &CountryPicker<'_>) -> String {
	let body = match &picker.options().trigger {
		TriggerContent::Label(label) => label.clone(),
		TriggerContent::Flag => match picker.current().and_then(|code| {
			picker.name_of(code).map(|name| (picker.flag_of(code), name))
		}) {
			Some((Flag::Asset(flag), name)) => format!("{flag} {name}"),
			Some((Flag::Missing, name)) => name.to_string(),
			None => match picker.table().kind() {
				RegionKind::Countries => "Select a country".to_string(),
				RegionKind::States => "Select a state".to_string(),
			},
		},
	};
	format!(" {body} {TRIGGER_ARROW} ")
}

/// Draw the trigger at the top-left of `area`, returning the clickable rect.
pub fn render_trigger(
	frame: &mut Frame,
	area: Rect,
	picker: &CountryPicker<'_>,
	styles: &PickerStyles,
) -> Rect {
	if area.width == 0 || area.height == 0 {
		return Rect::default();
	}

	let text = trigger_text(picker);
	let mut style = styles.get(StyleElement::Trigger);
	if picker.options().disabled {
		style = style.add_modifier(Modifier::DIM);
	}

	let width = u16::try_from(text.width()).unwrap_or(u16::MAX).min(area.width);
	let rect = Rect {
		x: area.x,
		y: area.y,
		width,
		height: 1,
	};
	frame.render_widget(Paragraph::new(Line::from(Span::styled(text, style))), rect);
	rect
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::data::{countries, states};
	use crate::picker::PickerOptions;

	#[test]
	fn trigger_shows_flag_and_name_of_current_code() {
		let picker = CountryPicker::builder(countries())
			.current("FR")
			.on_change(|_| {})
			.build()
			.expect("picker");
		assert_eq!(trigger_text(&picker), " 🇫🇷 France ▾ ");
	}

	#[test]
	fn trigger_falls_back_to_prompt() {
		let picker = CountryPicker::builder(states())
			.on_change(|_| {})
			.build()
			.expect("picker");
		assert_eq!(trigger_text(&picker), " Select a state ▾ ");
	}

	#[test]
	fn custom_label_replaces_flag() {
		let options = PickerOptions {
			trigger: TriggerContent::Label("Country".to_string()),
			..PickerOptions::default()
		};
		let picker = CountryPicker::builder(countries())
			.current("FR")
			.options(options)
			.on_change(|_| {})
			.build()
			.expect("picker");
		assert_eq!(trigger_text(&picker), " Country ▾ ");
	}
}
