use super::ContainerStore;
use crate::{Capability, ChangeEvent, StoreError, StoreVariant};

impl<V: StoreVariant> ContainerStore<V> {
	/// Shows or hides one row. Fires [`ChangeEvent::Visibility`] when the flag
	/// actually changes; returns whether it did.
	pub fn set_visible(&mut self, index: usize, visible: bool) -> Result<bool, StoreError> {
		self.require(Capability::Visibility)?;
		self.check_index(index)?;
		let slot = &mut self.rows_mut()[index];
		if slot.visible == visible {
			return Ok(false);
		}
		slot.visible = visible;
		self.fire(ChangeEvent::Visibility { index: Some(index) });
		Ok(true)
	}

	/// Shows or hides every row and fires one whole-overlay
	/// [`ChangeEvent::Visibility`].
	pub fn set_all_visible(&mut self, visible: bool) -> Result<(), StoreError> {
		self.require(Capability::Visibility)?;
		for slot in self.rows_mut() {
			slot.visible = visible;
		}
		self.fire(ChangeEvent::Visibility { index: None });
		Ok(())
	}

	pub fn is_visible(&self, index: usize) -> Result<bool, StoreError> {
		self.slot(index).map(|slot| slot.visible)
	}

	pub fn count_visible(&self) -> usize {
		self.rows().iter().filter(|slot| slot.visible).count()
	}

	/// Ascending indices of visible rows.
	///
	/// Independent of the search filter; intersect with
	/// [`filtered_indices`](Self::filtered_indices) for rows that are both.
	pub fn visible_indices(&self) -> Vec<usize> {
		self.rows()
			.iter()
			.enumerate()
			.filter_map(|(i, slot)| slot.visible.then_some(i))
			.collect()
	}
}
