//! Stored elements and the store identity they point back to.

use std::num::NonZeroU64;
use std::sync::atomic::{AtomicU64, Ordering};

/// Opaque identity of one [`ContainerStore`](crate::ContainerStore).
///
/// Containers record the id of the store that accepted them instead of a
/// pointer, so a container never keeps its store alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StoreId(NonZeroU64);

impl StoreId {
	pub(crate) fn next() -> Self {
		static NEXT: AtomicU64 = AtomicU64::new(1);
		let raw = NEXT.fetch_add(1, Ordering::Relaxed);
		Self(NonZeroU64::new(raw).unwrap_or(NonZeroU64::MIN))
	}

	/// Returns the raw numeric id.
	pub fn get(self) -> u64 {
		self.0.get()
	}
}

/// One stored element: a payload plus the id of its owning store.
///
/// Equality compares payloads only. Two containers holding equal payloads are
/// the same element as far as [`ContainerStore::index_of`] and friends are
/// concerned, regardless of which store owns them.
///
/// [`ContainerStore::index_of`]: crate::ContainerStore::index_of
#[derive(Debug, Clone)]
pub struct Container<P> {
	payload: P,
	owner: Option<StoreId>,
}

impl<P> Container<P> {
	/// Creates an unowned container.
	pub fn new(payload: P) -> Self {
		Self { payload, owner: None }
	}

	/// Returns the wrapped payload.
	pub fn payload(&self) -> &P {
		&self.payload
	}

	/// Returns the payload mutably.
	///
	/// Only reachable for containers the caller owns outright (detached copies
	/// or containers not yet added), so it cannot bypass store notifications.
	pub fn payload_mut(&mut self) -> &mut P {
		&mut self.payload
	}

	/// Consumes the container, returning its payload.
	pub fn into_payload(self) -> P {
		self.payload
	}

	/// Returns the owning store, if any.
	pub fn owner(&self) -> Option<StoreId> {
		self.owner
	}

	/// Returns true if `store` currently owns this container.
	pub fn is_owned_by(&self, store: StoreId) -> bool {
		self.owner == Some(store)
	}

	pub(crate) fn adopt(&mut self, store: StoreId) {
		self.owner = Some(store);
	}

	/// Strips the owner in place.
	pub fn detach(&mut self) {
		self.owner = None;
	}
}

impl<P: Clone> Container<P> {
	/// Returns a copy with no owner.
	pub fn detached(&self) -> Self {
		Self {
			payload: self.payload.clone(),
			owner: None,
		}
	}
}

impl<P: PartialEq> PartialEq for Container<P> {
	fn eq(&self, other: &Self) -> bool {
		self.payload == other.payload
	}
}

impl<P: Eq> Eq for Container<P> {}

impl<P> From<P> for Container<P> {
	fn from(payload: P) -> Self {
		Self::new(payload)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn store_ids_are_unique() {
		let a = StoreId::next();
		let b = StoreId::next();
		assert_ne!(a, b);
	}

	#[test]
	fn equality_ignores_owner() {
		let mut owned = Container::new("x");
		owned.adopt(StoreId::next());
		assert_eq!(owned, Container::new("x"));
		assert_ne!(owned, Container::new("y"));
	}

	#[test]
	fn detached_copy_drops_owner_only() {
		let id = StoreId::next();
		let mut c = Container::new(String::from("apple"));
		c.adopt(id);
		let copy = c.detached();
		assert!(c.is_owned_by(id));
		assert_eq!(copy.owner(), None);
		assert_eq!(copy.payload(), "apple");
	}
}
