//! Typed change notifications.

use std::ops::Range;

use crate::Container;

/// Discriminant of a [`ChangeEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeKind {
	Addition,
	Removal,
	Replacement,
	Clear,
	BulkUpdate,
	Search,
	Visibility,
}

/// One store state transition, delivered to every subscriber.
///
/// All indices are positions in the primary (unfiltered) sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeEvent<P> {
	/// Elements were appended. The span is always contiguous.
	Addition { indices: Range<usize> },
	/// The element at `index` was removed.
	Removal { index: usize, removed: Container<P> },
	/// The element at `index` was replaced; `previous` is the old value.
	Replacement { index: usize, previous: Container<P> },
	/// The store was emptied.
	Clear,
	/// A batch committed; anything may have changed.
	BulkUpdate,
	/// The search predicate changed and the filtered view was rebuilt.
	Search,
	/// Visibility of one row, or of every row when `index` is `None`, changed.
	Visibility { index: Option<usize> },
}

impl<P> ChangeEvent<P> {
	pub fn kind(&self) -> ChangeKind {
		match self {
			Self::Addition { .. } => ChangeKind::Addition,
			Self::Removal { .. } => ChangeKind::Removal,
			Self::Replacement { .. } => ChangeKind::Replacement,
			Self::Clear => ChangeKind::Clear,
			Self::BulkUpdate => ChangeKind::BulkUpdate,
			Self::Search => ChangeKind::Search,
			Self::Visibility { .. } => ChangeKind::Visibility,
		}
	}

	/// Returns the single affected index, if the event carries exactly one.
	pub fn affected_index(&self) -> Option<usize> {
		match self {
			Self::Addition { indices } if indices.len() == 1 => Some(indices.start),
			Self::Removal { index, .. } | Self::Replacement { index, .. } => Some(*index),
			Self::Visibility { index } => *index,
			_ => None,
		}
	}

	/// Returns the affected span, if the event carries one.
	pub fn affected_indices(&self) -> Option<Range<usize>> {
		match self {
			Self::Addition { indices } => Some(indices.clone()),
			Self::Removal { index, .. } | Self::Replacement { index, .. } => Some(*index..*index + 1),
			Self::Visibility { index: Some(index) } => Some(*index..*index + 1),
			_ => None,
		}
	}

	/// Returns the replaced element for [`ChangeEvent::Replacement`].
	pub fn previous(&self) -> Option<&Container<P>> {
		match self {
			Self::Replacement { previous, .. } => Some(previous),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn kind_names_match_wire_tags() {
		assert_eq!(ChangeKind::BulkUpdate.to_string(), "BULK_UPDATE");
		assert_eq!(ChangeKind::Addition.to_string(), "ADDITION");
	}

	#[test]
	fn affected_index_is_only_reported_for_single_rows() {
		let one: ChangeEvent<u8> = ChangeEvent::Addition { indices: 3..4 };
		let many: ChangeEvent<u8> = ChangeEvent::Addition { indices: 3..6 };
		assert_eq!(one.affected_index(), Some(3));
		assert_eq!(many.affected_index(), None);
		assert_eq!(many.affected_indices(), Some(3..6));
		assert_eq!(ChangeEvent::<u8>::Clear.affected_indices(), None);
	}

	#[test]
	fn previous_only_on_replacement() {
		let ev = ChangeEvent::Replacement {
			index: 1,
			previous: Container::new(7u8),
		};
		assert_eq!(ev.previous().map(|c| *c.payload()), Some(7));
		let ev = ChangeEvent::Removal {
			index: 1,
			removed: Container::new(7u8),
		};
		assert!(ev.previous().is_none());
	}
}
