//! Widgets drawn by the picker view.

/// Modal frame, header and open animation.
pub mod modal;
/// Country rows with match highlighting.
pub mod rows;
/// Alphabetical jump sidebar.
pub mod sidebar;
/// Button that opens the picker.
pub mod trigger;

use ratatui::layout::Rect;

pub use modal::{ANIMATION_FRAMES, Animation, ModalLayout, render_chrome};
pub use rows::{FLAG_COLUMN_WIDTH, HIGHLIGHT_SYMBOL, render_rows};
pub use sidebar::{SIDEBAR_WIDTH, letter_at, max_sidebar_offset, offset_showing, render_sidebar};
pub use trigger::{render_trigger, trigger_text};

/// Check if a point (column, row) is inside a rectangle.
#[must_use]
pub fn point_in_rect(column: u16, row: u16, area: Rect) -> bool {
	if area.width == 0 || area.height == 0 {
		return false;
	}
	let inside_x = column >= area.x && column < area.x.saturating_add(area.width);
	let inside_y = row >= area.y && row < area.y.saturating_add(area.height);
	inside_x && inside_y
}
