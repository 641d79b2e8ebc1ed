use roster_store::ChangeEvent;

/// Minimal redraw a list or grid widget must perform.
///
/// Row numbers are primary (unfiltered) store indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RedrawInstruction {
	/// Rows `first..=last` were inserted.
	RowsInserted { first: usize, last: usize },
	RowDeleted(usize),
	RowUpdated(usize),
	/// Anything may have changed; redraw everything.
	FullRefresh,
}

/// A widget that can apply redraw instructions.
pub trait RedrawTarget {
	fn rows_inserted(&mut self, first: usize, last: usize);
	fn row_deleted(&mut self, row: usize);
	fn row_updated(&mut self, row: usize);
	fn refresh(&mut self);
}

impl RedrawInstruction {
	/// Forwards this instruction to `target`.
	pub fn apply_to(self, target: &mut impl RedrawTarget) {
		match self {
			Self::RowsInserted { first, last } => target.rows_inserted(first, last),
			Self::RowDeleted(row) => target.row_deleted(row),
			Self::RowUpdated(row) => target.row_updated(row),
			Self::FullRefresh => target.refresh(),
		}
	}
}

/// Maps one store event to the redraw it requires.
pub fn translate<P>(event: &ChangeEvent<P>) -> RedrawInstruction {
	match event {
		ChangeEvent::Addition { indices } if !indices.is_empty() => RedrawInstruction::RowsInserted {
			first: indices.start,
			last: indices.end - 1,
		},
		ChangeEvent::Removal { index, .. } => RedrawInstruction::RowDeleted(*index),
		ChangeEvent::Replacement { index, .. } => RedrawInstruction::RowUpdated(*index),
		ChangeEvent::Visibility { index: Some(index) } => RedrawInstruction::RowUpdated(*index),
		_ => RedrawInstruction::FullRefresh,
	}
}

/// Collapses a queued burst.
///
/// Any full refresh swallows the whole burst. Otherwise consecutive updates
/// of the same row merge, and insertions that extend the previous one merge
/// into a single span.
pub fn coalesce(pending: Vec<RedrawInstruction>) -> Vec<RedrawInstruction> {
	if pending.contains(&RedrawInstruction::FullRefresh) {
		return vec![RedrawInstruction::FullRefresh];
	}
	let mut out: Vec<RedrawInstruction> = Vec::with_capacity(pending.len());
	for next in pending {
		match (out.last_mut(), next) {
			(Some(RedrawInstruction::RowUpdated(prev)), RedrawInstruction::RowUpdated(row)) if *prev == row => {}
			(
				Some(RedrawInstruction::RowsInserted { last, .. }),
				RedrawInstruction::RowsInserted {
					first: next_first,
					last: next_last,
				},
			) if next_first == *last + 1 => *last = next_last,
			_ => out.push(next),
		}
	}
	out
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use roster_store::Container;
	use rstest::rstest;

	use super::*;
	use super::RedrawInstruction::*;

	#[rstest]
	#[case(ChangeEvent::Addition { indices: 2..3 }, RowsInserted { first: 2, last: 2 })]
	#[case(ChangeEvent::Addition { indices: 2..6 }, RowsInserted { first: 2, last: 5 })]
	#[case(ChangeEvent::Removal { index: 4, removed: Container::new(0) }, RowDeleted(4))]
	#[case(ChangeEvent::Replacement { index: 1, previous: Container::new(0) }, RowUpdated(1))]
	#[case(ChangeEvent::Visibility { index: Some(7) }, RowUpdated(7))]
	#[case(ChangeEvent::Visibility { index: None }, FullRefresh)]
	#[case(ChangeEvent::Clear, FullRefresh)]
	#[case(ChangeEvent::BulkUpdate, FullRefresh)]
	#[case(ChangeEvent::Search, FullRefresh)]
	fn translation(#[case] event: ChangeEvent<i32>, #[case] expected: RedrawInstruction) {
		assert_eq!(translate(&event), expected);
	}

	#[test]
	fn full_refresh_swallows_burst() {
		assert_eq!(coalesce(vec![RowDeleted(1), FullRefresh, RowUpdated(0)]), vec![FullRefresh]);
	}

	#[test]
	fn repeated_row_updates_merge() {
		assert_eq!(
			coalesce(vec![RowUpdated(1), RowUpdated(1), RowUpdated(2), RowUpdated(1)]),
			vec![RowUpdated(1), RowUpdated(2), RowUpdated(1)]
		);
	}

	#[test]
	fn adjacent_insertions_merge() {
		assert_eq!(
			coalesce(vec![
				RowsInserted { first: 3, last: 3 },
				RowsInserted { first: 4, last: 6 },
				RowsInserted { first: 0, last: 0 },
			]),
			vec![RowsInserted { first: 3, last: 6 }, RowsInserted { first: 0, last: 0 }]
		);
	}

	#[test]
	fn order_is_preserved_across_kinds() {
		let burst = vec![RowsInserted { first: 0, last: 0 }, RowDeleted(0), RowsInserted { first: 0, last: 0 }];
		assert_eq!(coalesce(burst.clone()), burst);
	}
}
