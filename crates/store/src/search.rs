//! Search predicate and the derived filtered index.

use regex::{Regex, RegexBuilder};

#[derive(Debug, Clone)]
enum Matcher {
	Exact(String),
	Regex(Regex),
}

/// A compiled search predicate over a variant's display strings.
///
/// Exact queries match when the whole display string equals the pattern.
/// Regex queries match when the expression is found anywhere in it.
#[derive(Debug, Clone)]
pub struct SearchQuery {
	pattern: String,
	case_insensitive: bool,
	matcher: Matcher,
}

impl SearchQuery {
	/// Compiles a query. Only regex patterns can fail.
	pub fn new(pattern: &str, is_regex: bool, case_insensitive: bool) -> Result<Self, regex::Error> {
		let matcher = if is_regex {
			Matcher::Regex(RegexBuilder::new(pattern).case_insensitive(case_insensitive).build()?)
		} else if case_insensitive {
			Matcher::Exact(pattern.to_lowercase())
		} else {
			Matcher::Exact(pattern.to_owned())
		};
		Ok(Self {
			pattern: pattern.to_owned(),
			case_insensitive,
			matcher,
		})
	}

	/// Returns the pattern as given.
	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	pub fn is_regex(&self) -> bool {
		matches!(self.matcher, Matcher::Regex(_))
	}

	pub fn is_case_insensitive(&self) -> bool {
		self.case_insensitive
	}

	/// Tests one display string against the query.
	pub fn matches(&self, display: &str) -> bool {
		match &self.matcher {
			Matcher::Regex(re) => re.is_match(display),
			Matcher::Exact(expected) if self.case_insensitive => display.to_lowercase() == *expected,
			Matcher::Exact(expected) => display == expected,
		}
	}
}

/// Ascending primary indices matching the active query.
///
/// `None` means no filter is in effect. A rebuild in which every row matches
/// also yields `None`, so "matches everything" and "no filter" cannot be told
/// apart by readers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchIndex {
	indices: Option<Vec<usize>>,
}

impl SearchIndex {
	/// Rebuilds from scratch over `len` rows.
	pub fn rebuild(&mut self, len: usize, mut is_match: impl FnMut(usize) -> bool) {
		let hits: Vec<usize> = (0..len).filter(|&i| is_match(i)).collect();
		self.indices = (hits.len() != len).then_some(hits);
	}

	/// Drops the filter.
	pub fn reset(&mut self) {
		self.indices = None;
	}

	/// Returns true if a narrowing filter is in effect.
	pub fn is_active(&self) -> bool {
		self.indices.is_some()
	}

	/// Returns true if primary row `index` passes the filter.
	///
	/// With no filter every in-range row passes; range checking against the
	/// store is the caller's job.
	pub fn contains(&self, index: usize) -> bool {
		match &self.indices {
			Some(hits) => hits.binary_search(&index).is_ok(),
			None => true,
		}
	}

	/// Number of rows in the filtered view, given the primary length.
	pub fn len(&self, total: usize) -> usize {
		self.indices.as_ref().map_or(total, Vec::len)
	}

	/// Maps a filtered position to its primary index.
	pub fn to_primary(&self, filtered: usize, total: usize) -> Option<usize> {
		match &self.indices {
			Some(hits) => hits.get(filtered).copied(),
			None => (filtered < total).then_some(filtered),
		}
	}

	/// Maps a primary index to its filtered position.
	pub fn to_filtered(&self, primary: usize, total: usize) -> Option<usize> {
		match &self.indices {
			Some(hits) => hits.binary_search(&primary).ok(),
			None => (primary < total).then_some(primary),
		}
	}

	/// Returns a copy of the active index list.
	pub fn snapshot(&self) -> Option<Vec<usize>> {
		self.indices.clone()
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case("^a", true, false, "apple", true)]
	#[case("^a", true, false, "banana", false)]
	#[case("AN", true, true, "banana", true)]
	#[case("apple", false, false, "apple", true)]
	#[case("apple", false, false, "apples", false)]
	#[case("APPLE", false, true, "Apple", true)]
	#[case("APPLE", false, false, "Apple", false)]
	fn query_matching(
		#[case] pattern: &str,
		#[case] regex: bool,
		#[case] insensitive: bool,
		#[case] display: &str,
		#[case] expected: bool,
	) {
		let query = SearchQuery::new(pattern, regex, insensitive).unwrap();
		assert_eq!(query.matches(display), expected);
	}

	#[test]
	fn invalid_regex_is_reported() {
		assert!(SearchQuery::new("(", true, false).is_err());
		assert!(SearchQuery::new("(", false, false).is_ok());
	}

	#[test]
	fn full_match_collapses_to_inactive() {
		let mut index = SearchIndex::default();
		index.rebuild(3, |_| true);
		assert!(!index.is_active());
		assert_eq!(index.len(3), 3);

		index.rebuild(3, |i| i != 1);
		assert_eq!(index.snapshot(), Some(vec![0, 2]));
		assert_eq!(index.len(3), 2);
		assert!(!index.contains(1));
		assert_eq!(index.to_primary(1, 3), Some(2));
		assert_eq!(index.to_primary(2, 3), None);
		assert_eq!(index.to_filtered(2, 3), Some(1));
		assert_eq!(index.to_filtered(1, 3), None);
	}

	#[test]
	fn empty_rows_never_activate_the_filter() {
		let mut index = SearchIndex::default();
		index.rebuild(0, |_| false);
		assert!(!index.is_active());
	}
}
