//! Approximate matching of filter queries against display names.
//!
//! The engine is indexed once over `(code, name)` pairs and answers ranked
//! code lists for non-empty queries. Matching is delegated to `frizbee`.

use frizbee::{Config, match_indices, match_list};

/// Longest query prefix considered while matching.
pub const MAX_PATTERN_LEN: usize = 32;

/// Builds fuzzy matching options for the provided query.
pub fn config_for_query(query: &str) -> Config {
	let length = query.chars().count();
	let mut allowed_typos: u16 = match length {
		0 | 1 => 0,
		2..=4 => 1,
		5..=7 => 2,
		8..=12 => 3,
		_ => 4,
	};
	if let Ok(max_reasonable) = u16::try_from(length.saturating_sub(1)) {
		allowed_typos = allowed_typos.min(max_reasonable);
	}

	Config {
		prefilter: true,
		max_typos: Some(allowed_typos),
		sort: false,
		..Config::default()
	}
}

/// Character positions of `text` matched by `query`, for highlighting.
#[must_use]
pub fn highlight_indices(query: &str, text: &str) -> Option<Vec<usize>> {
	let needle = bounded_query(query)?;
	if text.is_empty() {
		return None;
	}
	let config = config_for_query(&needle);
	let matched = match_indices(&needle, text, &config)?;
	Some(char_positions(text, &matched.indices))
}

/// Map byte offsets reported by the matcher onto char positions of `text`.
fn char_positions(text: &str, byte_offsets: &[usize]) -> Vec<usize> {
	let mut positions: Vec<usize> = byte_offsets
		.iter()
		.filter_map(|&offset| {
			text.char_indices()
				.take_while(|&(start, _)| start <= offset)
				.count()
				.checked_sub(1)
		})
		.collect();
	positions.sort_unstable();
	positions.dedup();
	positions
}

fn bounded_query(query: &str) -> Option<String> {
	let trimmed = query.trim();
	if trimmed.is_empty() {
		return None;
	}
	Some(trimmed.chars().take(MAX_PATTERN_LEN).collect())
}

#[derive(Debug, Clone)]
struct FilterEntry {
	code: String,
	name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RankedMatch {
	index: usize,
	score: u16,
}

/// Fuzzy index over the display names of a working list.
#[derive(Debug, Clone, Default)]
pub struct FilterEngine {
	entries: Vec<FilterEntry>,
}

impl FilterEngine {
	/// Index `(code, display name)` pairs, preserving their order.
	pub fn index<I, C, N>(items: I) -> Self
	where
		I: IntoIterator<Item = (C, N)>,
		C: Into<String>,
		N: Into<String>,
	{
		let entries = items
			.into_iter()
			.map(|(code, name)| FilterEntry {
				code: code.into(),
				name: name.into(),
			})
			.collect();
		Self { entries }
	}

	/// Codes whose names match `query`, best match first. Ties keep index
	/// order. A blank query matches nothing.
	#[must_use]
	pub fn search(&self, query: &str) -> Vec<String> {
		self.ranked(query)
			.into_iter()
			.map(|ranked| self.entries[ranked.index].code.clone())
			.collect()
	}

	fn ranked(&self, query: &str) -> Vec<RankedMatch> {
		let Some(needle) = bounded_query(query) else {
			return Vec::new();
		};
		if self.entries.is_empty() {
			return Vec::new();
		}

		let config = config_for_query(&needle);
		let haystacks: Vec<&str> = self.entries.iter().map(|entry| entry.name.as_str()).collect();
		let mut ranked: Vec<RankedMatch> = match_list(&needle, &haystacks, &config)
			.into_iter()
			.filter(|entry| entry.score > 0)
			.map(|entry| RankedMatch {
				index: entry.index as usize,
				score: entry.score,
			})
			.filter(|entry| entry.index < self.entries.len())
			.collect();
		ranked.sort_unstable_by(|a, b| b.score.cmp(&a.score).then_with(|| a.index.cmp(&b.index)));
		ranked
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
