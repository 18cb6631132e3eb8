/// Geometry of the rendered list, reported by the renderer on layout.
///
/// Only the jump-to-letter offset math depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
	/// Height of one row in scroll units.
	pub row_height: usize,
	/// Height of the visible part of the list in scroll units.
	pub visible_height: usize,
}

impl Default for Viewport {
	fn default() -> Self {
		Self {
			row_height: 1,
			visible_height: 0,
		}
	}
}

impl Viewport {
	pub fn new(row_height: usize, visible_height: usize) -> Self {
		Self {
			row_height,
			visible_height,
		}
	}

	/// Offset that brings row `index` to the top, clamped so a list of
	/// `rows` entries never scrolls past its end.
	#[must_use]
	pub fn offset_for(&self, index: usize, rows: usize) -> usize {
		let offset = index.saturating_mul(self.row_height);
		let total = rows.saturating_mul(self.row_height);
		offset.min(total.saturating_sub(self.visible_height))
	}
}
