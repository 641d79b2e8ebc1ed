//! Subscriber registry and synchronous dispatch.

use std::sync::Arc;

use crate::ChangeEvent;

/// Receives store change notifications.
///
/// Delivery is synchronous on the mutating thread and happens only after the
/// store's own state is consistent. A panicking observer is not isolated: the
/// panic unwinds through the mutating call and later observers miss the event.
pub trait Observer<P>: Send + Sync {
	fn on_change(&self, event: &ChangeEvent<P>);
}

impl<P, F> Observer<P> for F
where
	F: Fn(&ChangeEvent<P>) + Send + Sync,
{
	fn on_change(&self, event: &ChangeEvent<P>) {
		self(event)
	}
}

/// Identity-keyed set of observers.
pub(crate) struct Subscribers<P> {
	observers: Vec<Arc<dyn Observer<P>>>,
}

impl<P> Default for Subscribers<P> {
	fn default() -> Self {
		Self { observers: Vec::new() }
	}
}

fn same<P>(a: &Arc<dyn Observer<P>>, b: &Arc<dyn Observer<P>>) -> bool {
	std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

impl<P> Subscribers<P> {
	/// Adds `observer`; returns false if it was already subscribed.
	pub(crate) fn insert(&mut self, observer: Arc<dyn Observer<P>>) -> bool {
		if self.observers.iter().any(|o| same(o, &observer)) {
			return false;
		}
		self.observers.push(observer);
		true
	}

	/// Removes `observer`; returns false if it was not subscribed.
	pub(crate) fn remove(&mut self, observer: &Arc<dyn Observer<P>>) -> bool {
		let before = self.observers.len();
		self.observers.retain(|o| !same(o, observer));
		self.observers.len() != before
	}

	pub(crate) fn len(&self) -> usize {
		self.observers.len()
	}

	pub(crate) fn dispatch(&self, event: &ChangeEvent<P>) {
		for observer in &self.observers {
			observer.on_change(event);
		}
	}
}
