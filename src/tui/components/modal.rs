use ratatui::Frame;
use ratatui::layout::{Margin, Rect};
use ratatui::style::Modifier;
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use super::sidebar::SIDEBAR_WIDTH;
use crate::picker::{AnimationMode, PickerOptions};
use crate::tui::style::{PickerStyles, StyleElement};

/// Frames an open animation takes to settle.
pub const ANIMATION_FRAMES: u16 = 6;
/// Gap left around a transparent modal so the host screen shows through.
const TRANSPARENT_MARGIN: Margin = Margin {
	horizontal: 4,
	vertical: 1,
};

/// Progress of the modal's open animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Animation {
	mode: AnimationMode,
	frame: u16,
}

impl Default for Animation {
	fn default() -> Self {
		Self {
			mode: AnimationMode::None,
			frame: ANIMATION_FRAMES,
		}
	}
}

impl Animation {
	/// Restart from the first frame. `None` settles immediately.
	pub fn start(&mut self, mode: AnimationMode) {
		self.mode = mode;
		self.frame = match mode {
			AnimationMode::None => ANIMATION_FRAMES,
			AnimationMode::Slide | AnimationMode::Fade => 0,
		};
	}

	/// Advance one frame. Returns whether the animation is still running.
	pub fn tick(&mut self) -> bool {
		if self.frame < ANIMATION_FRAMES {
			self.frame += 1;
		}
		self.is_running()
	}

	#[must_use]
	pub fn is_running(&self) -> bool {
		self.frame < ANIMATION_FRAMES
	}

	/// Rows of a `full`-height modal visible at the current frame.
	#[must_use]
	pub fn visible_height(&self, full: u16) -> u16 {
		if self.mode != AnimationMode::Slide || !self.is_running() {
			return full;
		}
		let shown = u32::from(full) * u32::from(self.frame + 1) / u32::from(ANIMATION_FRAMES + 1);
		u16::try_from(shown).unwrap_or(full).max(1).min(full)
	}

	/// Extra modifier applied to the modal at the current frame.
	#[must_use]
	pub fn modifier(&self) -> Modifier {
		if self.mode == AnimationMode::Fade && self.is_running() {
			Modifier::DIM
		} else {
			Modifier::empty()
		}
	}
}

/// Screen regions of an open modal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModalLayout {
	pub modal: Rect,
	pub title: Rect,
	pub close: Option<Rect>,
	pub filter: Option<Rect>,
	pub list: Rect,
	pub sidebar: Option<Rect>,
}

impl ModalLayout {
	/// Split `area` for a modal with the given options.
	#[must_use]
	pub fn compute(
		area: Rect,
		options: &PickerOptions,
		show_sidebar: bool,
		animation: &Animation,
	) -> Self {
		let outer = if options.presentation.transparent {
			area.inner(TRANSPARENT_MARGIN)
		} else {
			area
		};
		let height = animation.visible_height(outer.height);
		let modal = Rect {
			y: outer.bottom().saturating_sub(height),
			height,
			..outer
		};

		let inner = modal.inner(Margin {
			horizontal: 1,
			vertical: 1,
		});
		let mut rows = inner;
		let mut header = take_row(&mut rows);

		let close = options.closeable.then(|| {
			let width = close_width(&options.close_label).min(header.width);
			let rect = Rect {
				x: header.right().saturating_sub(width),
				width,
				..header
			};
			header.width = header.width.saturating_sub(width);
			rect
		});
		let filter = options.filterable.then(|| take_row(&mut rows));

		let (list, sidebar) = if show_sidebar && rows.width > SIDEBAR_WIDTH + 1 {
			let list = Rect {
				width: rows.width - SIDEBAR_WIDTH,
				..rows
			};
			let sidebar = Rect {
				x: list.right(),
				width: SIDEBAR_WIDTH,
				..rows
			};
			(list, Some(sidebar))
		} else {
			(rows, None)
		};

		Self {
			modal,
			title: header,
			close,
			filter,
			list,
			sidebar,
		}
	}
}

fn take_row(rows: &mut Rect) -> Rect {
	let height = rows.height.min(1);
	let row = Rect { height, ..*rows };
	rows.y = rows.y.saturating_add(height);
	rows.height -= height;
	row
}

fn close_width(label: &str) -> u16 {
	u16::try_from(label.width()).unwrap_or(u16::MAX).saturating_add(2)
}

/// Clear the modal region and draw its border, title and close control.
pub fn render_chrome(
	frame: &mut Frame,
	layout: &ModalLayout,
	title: &str,
	options: &PickerOptions,
	styles: &PickerStyles,
) {
	if layout.modal.width == 0 || layout.modal.height == 0 {
		return;
	}
	let modal_style = styles.get(StyleElement::Modal);
	let block = Block::default()
		.borders(Borders::ALL)
		.border_set(ratatui::symbols::border::ROUNDED)
		.border_style(modal_style.patch(styles.get(StyleElement::Header)))
		.style(modal_style);

	frame.render_widget(Clear, layout.modal);
	frame.render_widget(block, layout.modal);
	frame.render_widget(
		Paragraph::new(Span::styled(title.to_string(), styles.get(StyleElement::Header))),
		layout.title,
	);
	if let Some(close) = layout.close {
		let label = format!(" {} ", options.close_label);
		frame.render_widget(
			Paragraph::new(Span::styled(label, styles.get(StyleElement::CloseButton))),
			close,
		);
	}
}
