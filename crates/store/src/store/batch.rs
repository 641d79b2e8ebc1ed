use tracing::debug;

use super::ContainerStore;
use crate::{ChangeEvent, StoreVariant};

impl<V: StoreVariant> ContainerStore<V> {
	/// Opens a batch. Calling this while a batch is open does nothing.
	pub fn start_update(&mut self) {
		if self.shadow.is_none() {
			self.shadow = Some(self.primary.clone());
		}
	}

	/// Returns true while a batch is open.
	pub fn is_updating(&self) -> bool {
		self.shadow.is_some()
	}

	/// Commits the open batch: the shadow rows become the live rows and the
	/// filter is rebuilt once. With `notify`, subscribers then receive a
	/// single [`ChangeEvent::BulkUpdate`].
	///
	/// Returns false if no batch was open.
	pub fn finish_update(&mut self, notify: bool) -> bool {
		let Some(shadow) = self.shadow.take() else {
			return false;
		};
		let before = self.primary.len();
		self.primary = shadow;
		debug!(store = self.id.get(), before, after = self.primary.len(), notify, "Committed batch");
		self.refilter();
		if notify {
			self.fire(ChangeEvent::BulkUpdate);
		}
		true
	}

	/// Runs `f` inside a batch and commits it with notification.
	///
	/// When a batch is already open `f` joins it and nothing is committed here.
	pub fn batch<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
		if self.is_updating() {
			return f(self);
		}
		self.start_update();
		let out = f(self);
		self.finish_update(true);
		out
	}
}
