//! Alphabetical jump index for the fast-scroll sidebar.

use std::collections::BTreeSet;

use crate::resolve::first_letter;

/// Sorted, distinct first letters of the names in a working list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterIndex {
	letters: Vec<String>,
}

impl LetterIndex {
	/// Collect the uppercased first letter of every name.
	pub fn build<'a, I>(names: I) -> Self
	where
		I: IntoIterator<Item = &'a str>,
	{
		let letters: BTreeSet<String> = names.into_iter().filter_map(first_letter).collect();
		Self {
			letters: letters.into_iter().collect(),
		}
	}

	#[must_use]
	pub fn letters(&self) -> &[String] {
		&self.letters
	}

	#[must_use]
	pub fn contains(&self, letter: &str) -> bool {
		self.letters.iter().any(|candidate| candidate == letter)
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.letters.iter().map(String::as_str)
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.letters.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.letters.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn letters_are_distinct_and_sorted() {
		let index = LetterIndex::build(["United States", "France", "Finland", "germany"]);
		insta::assert_debug_snapshot!(index.letters(), @r###"
		[
		    "F",
		    "G",
		    "U",
		]
		"###);
	}

	#[test]
	fn empty_names_are_skipped() {
		let index = LetterIndex::build(["", "Chad"]);
		assert_eq!(index.letters(), ["C"]);
		assert!(index.contains("C"));
		assert!(!index.contains("c"));
	}

	#[test]
	fn empty_list_has_no_letters() {
		assert!(LetterIndex::build(std::iter::empty()).is_empty());
	}
}
