use tracing::{debug, warn};

use super::ContainerStore;
use crate::{Capability, ChangeEvent, Container, SearchQuery, StoreError, StoreVariant};

impl<V: StoreVariant> ContainerStore<V> {
	/// Sets the search predicate and rebuilds the filtered view.
	///
	/// `None` or an empty pattern clears the search. A [`ChangeEvent::Search`]
	/// fires in every successful case, including clearing an already empty
	/// search. An invalid regex leaves the previous search in place.
	///
	/// Inside a batch the rebuild waits for the batch to commit.
	pub fn search(&mut self, pattern: Option<&str>, is_regex: bool) -> Result<(), StoreError> {
		self.require(Capability::Search)?;
		match pattern.filter(|p| !p.is_empty()) {
			None => {
				self.query = None;
				self.filter.reset();
			}
			Some(pattern) => {
				let query =
					SearchQuery::new(pattern, is_regex, self.case_insensitive).inspect_err(|e| {
						warn!(store = self.id.get(), pattern, error = %e, "Invalid search pattern");
					})?;
				self.query = Some(query);
				if !self.is_updating() {
					self.refilter();
				}
			}
		}
		self.fire(ChangeEvent::Search);
		Ok(())
	}

	/// Equivalent to `search(None, false)`.
	pub fn clear_search(&mut self) -> Result<(), StoreError> {
		self.search(None, false)
	}

	/// The active query, if any.
	pub fn search_query(&self) -> Option<&SearchQuery> {
		self.query.as_ref()
	}

	/// Returns true if the filtered view is narrower than the store.
	pub fn is_filtered(&self) -> bool {
		self.filter.is_active()
	}

	/// Returns true if committed row `index` is part of the filtered view.
	pub fn matches_filter(&self, index: usize) -> bool {
		index < self.primary.len() && self.filter.contains(index)
	}

	/// Number of rows in the filtered view.
	pub fn count_filtered(&self) -> usize {
		self.filter.len(self.primary.len())
	}

	/// Container at filtered position `index`, or `None` past the end.
	pub fn get_filtered(&self, index: usize) -> Option<&Container<V::Payload>> {
		let primary = self.filtered_to_primary(index)?;
		self.primary.get(primary).map(|slot| &slot.container)
	}

	/// Filtered position of the first matching container with an equal payload.
	pub fn index_of_filtered(&self, container: &Container<V::Payload>) -> Option<usize> {
		self.iter_filtered().position(|c| c == container)
	}

	/// Primary index behind filtered position `index`.
	pub fn filtered_to_primary(&self, index: usize) -> Option<usize> {
		self.filter.to_primary(index, self.primary.len())
	}

	/// Filtered position of primary row `index`.
	pub fn primary_to_filtered(&self, index: usize) -> Option<usize> {
		self.filter.to_filtered(index, self.primary.len())
	}

	/// Snapshot of the filtered primary indices; `None` when unfiltered.
	pub fn filtered_indices(&self) -> Option<Vec<usize>> {
		self.filter.snapshot()
	}

	/// Iterates the filtered view in order.
	pub fn iter_filtered(&self) -> impl Iterator<Item = &Container<V::Payload>> {
		self.primary
			.iter()
			.enumerate()
			.filter(|(i, _)| self.filter.contains(*i))
			.map(|(_, slot)| &slot.container)
	}

	/// Rebuilds the filtered view from the committed rows.
	pub(super) fn refilter(&mut self) {
		let Some(query) = &self.query else {
			self.filter.reset();
			return;
		};
		let variant = &self.variant;
		let rows = &self.primary;
		self.filter.rebuild(rows.len(), |i| variant.matches(rows[i].container.payload(), query));
		debug!(
			store = self.id.get(),
			rows = rows.len(),
			matched = self.filter.len(rows.len()),
			"Rebuilt search index"
		);
	}
}
