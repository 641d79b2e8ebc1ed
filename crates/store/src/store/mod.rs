//! The observable container store.

mod batch;
mod search;
mod visibility;


use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::observer::Subscribers;
use crate::{
	Capability, CapabilitySet, ChangeEvent, ConfigRegistry, Container, Observer, SearchIndex,
	SearchQuery, StoreConfig, StoreError, StoreId, StoreVariant,
};

/// One row: the container plus its visibility flag.
#[derive(Debug, Clone)]
struct Slot<P> {
	container: Container<P>,
	visible: bool,
}

impl<P> Slot<P> {
	fn new(container: Container<P>) -> Self {
		Self {
			container,
			visible: true,
		}
	}
}

/// Ordered, observable collection of [`Container`]s.
///
/// Rows keep insertion order. Between [`start_update`](Self::start_update)
/// and [`finish_update`](Self::finish_update) every mutation lands on a shadow
/// copy that replaces the live rows in one step when the batch closes; no
/// events are delivered while a batch is open.
///
/// Element reads (`get`, `len`, `index_of`, ...) see the rows being edited,
/// so a batch can read its own writes. Filtered accessors always describe the
/// last committed rows. Every index in events and element accessors is a
/// position in the unfiltered sequence.
pub struct ContainerStore<V: StoreVariant> {
	id: StoreId,
	variant: V,
	capabilities: CapabilitySet,
	case_insensitive: bool,
	removal_allowed: bool,
	primary: Vec<Slot<V::Payload>>,
	shadow: Option<Vec<Slot<V::Payload>>>,
	query: Option<SearchQuery>,
	filter: SearchIndex,
	subscribers: Subscribers<V::Payload>,
}

impl<V: StoreVariant> ContainerStore<V> {
	/// Creates an empty store with default settings.
	pub fn new(variant: V) -> Self {
		Self::with_config(variant, &StoreConfig::default())
	}

	/// Creates an empty store with explicit settings.
	pub fn with_config(variant: V, config: &StoreConfig) -> Self {
		let capabilities = variant.capabilities() & config.capability_mask();
		Self {
			id: StoreId::next(),
			variant,
			capabilities,
			case_insensitive: config.case_insensitive,
			removal_allowed: config.removal_allowed,
			primary: Vec::new(),
			shadow: None,
			query: None,
			filter: SearchIndex::default(),
			subscribers: Subscribers::default(),
		}
	}

	/// Creates an empty store using the settings registered for the variant.
	pub fn from_registry(variant: V, registry: &ConfigRegistry) -> Self {
		let config = registry.config_for(&variant);
		Self::with_config(variant, &config)
	}

	pub fn id(&self) -> StoreId {
		self.id
	}

	pub fn variant(&self) -> &V {
		&self.variant
	}

	/// Capabilities fixed at construction.
	pub fn capabilities(&self) -> CapabilitySet {
		self.capabilities
	}

	pub fn supports(&self, capability: Capability) -> bool {
		self.capabilities.contains(capability.as_set())
	}

	pub fn removal_allowed(&self) -> bool {
		self.removal_allowed
	}

	pub fn set_removal_allowed(&mut self, allowed: bool) {
		self.removal_allowed = allowed;
	}

	/// Wraps a payload using the variant's factory.
	pub fn new_container(&self, payload: V::Payload) -> Container<V::Payload> {
		self.variant.new_container(payload)
	}

	/// Number of rows.
	pub fn len(&self) -> usize {
		self.rows().len()
	}

	pub fn is_empty(&self) -> bool {
		self.rows().is_empty()
	}

	/// Returns the container at `index`.
	pub fn get(&self, index: usize) -> Result<&Container<V::Payload>, StoreError> {
		self.slot(index).map(|slot| &slot.container)
	}

	/// Iterates containers in order.
	pub fn iter(&self) -> impl Iterator<Item = &Container<V::Payload>> {
		self.rows().iter().map(|slot| &slot.container)
	}

	/// Returns true if a container with an equal payload is stored.
	pub fn contains(&self, container: &Container<V::Payload>) -> bool {
		self.index_of(container).is_some()
	}

	/// Position of the first container with an equal payload.
	pub fn index_of(&self, container: &Container<V::Payload>) -> Option<usize> {
		self.rows().iter().position(|slot| slot.container == *container)
	}

	/// Detached copies of every container, in order.
	pub fn get_all(&self) -> Vec<Container<V::Payload>> {
		self.rows().iter().map(|slot| slot.container.detached()).collect()
	}

	/// Appends a container and takes ownership of it.
	///
	/// Outside a batch this fires [`ChangeEvent::Addition`] for the new row.
	pub fn add(&mut self, mut container: Container<V::Payload>) {
		container.adopt(self.id);
		self.rows_mut().push(Slot::new(container));
		if self.is_updating() {
			return;
		}
		let index = self.primary.len() - 1;
		trace!(store = self.id.get(), index, "add");
		self.refilter();
		self.fire(ChangeEvent::Addition { indices: index..index + 1 });
	}

	/// Wraps `payload` with the variant's factory and appends it.
	pub fn add_payload(&mut self, payload: V::Payload) {
		let container = self.new_container(payload);
		self.add(container);
	}

	/// Appends every container as one change.
	///
	/// Outside a batch this fires a single [`ChangeEvent::Addition`] covering
	/// the appended span and no [`ChangeEvent::BulkUpdate`]. Nothing fires
	/// when `containers` is empty.
	pub fn add_all<I>(&mut self, containers: I)
	where
		I: IntoIterator<Item = Container<V::Payload>>,
	{
		let outer = self.is_updating();
		self.start_update();
		let start = self.len();
		for mut container in containers {
			container.adopt(self.id);
			self.rows_mut().push(Slot::new(container));
		}
		let end = self.len();
		if outer {
			return;
		}
		self.finish_update(false);
		trace!(store = self.id.get(), start, end, "add_all");
		if start < end {
			self.fire(ChangeEvent::Addition { indices: start..end });
		}
	}

	/// Replaces the container at `index`, returning the detached previous one.
	///
	/// Outside a batch this fires [`ChangeEvent::Replacement`].
	pub fn set(
		&mut self,
		index: usize,
		mut container: Container<V::Payload>,
	) -> Result<Container<V::Payload>, StoreError> {
		self.check_index(index)?;
		container.adopt(self.id);
		let slot = &mut self.rows_mut()[index];
		let mut previous = std::mem::replace(&mut slot.container, container);
		previous.detach();
		if !self.is_updating() {
			trace!(store = self.id.get(), index, "set");
			self.refilter();
			self.fire(ChangeEvent::Replacement {
				index,
				previous: previous.clone(),
			});
		}
		Ok(previous)
	}

	/// Removes the container at `index`.
	///
	/// Returns `Ok(None)` without touching anything when removal is disabled.
	/// Outside a batch this fires [`ChangeEvent::Removal`].
	pub fn remove(&mut self, index: usize) -> Result<Option<Container<V::Payload>>, StoreError> {
		if !self.removal_allowed {
			trace!(store = self.id.get(), index, "remove ignored: removal disabled");
			return Ok(None);
		}
		self.check_index(index)?;
		let mut removed = self.rows_mut().remove(index).container;
		removed.detach();
		if !self.is_updating() {
			trace!(store = self.id.get(), index, "remove");
			self.refilter();
			self.fire(ChangeEvent::Removal {
				index,
				removed: removed.clone(),
			});
		}
		Ok(Some(removed))
	}

	/// Empties the rows and drops the search query.
	///
	/// Subscribers stay attached and receive [`ChangeEvent::Clear`]. Inside a
	/// batch only the shadow rows are emptied; the batch stays open and its
	/// commit reports the change.
	pub fn clear(&mut self) {
		self.rows_mut().clear();
		self.query = None;
		if !self.is_updating() {
			self.filter.reset();
		}
		trace!(store = self.id.get(), updating = self.is_updating(), "clear");
		self.fire(ChangeEvent::Clear);
	}

	/// Registers an observer; returns false if it was already registered.
	pub fn subscribe(&mut self, observer: Arc<dyn Observer<V::Payload>>) -> bool {
		self.subscribers.insert(observer)
	}

	/// Unregisters an observer; returns false if it was not registered.
	pub fn unsubscribe(&mut self, observer: &Arc<dyn Observer<V::Payload>>) -> bool {
		self.subscribers.remove(observer)
	}

	pub fn subscriber_count(&self) -> usize {
		self.subscribers.len()
	}

	fn rows(&self) -> &Vec<Slot<V::Payload>> {
		self.shadow.as_ref().unwrap_or(&self.primary)
	}

	fn rows_mut(&mut self) -> &mut Vec<Slot<V::Payload>> {
		self.shadow.as_mut().unwrap_or(&mut self.primary)
	}

	fn slot(&self, index: usize) -> Result<&Slot<V::Payload>, StoreError> {
		let rows = self.rows();
		rows.get(index).ok_or(StoreError::IndexOutOfRange {
			index,
			len: rows.len(),
		})
	}

	fn check_index(&self, index: usize) -> Result<(), StoreError> {
		self.slot(index).map(|_| ())
	}

	fn require(&self, capability: Capability) -> Result<(), StoreError> {
		if self.supports(capability) {
			Ok(())
		} else {
			Err(StoreError::Unsupported(capability))
		}
	}

	fn fire(&self, event: ChangeEvent<V::Payload>) {
		if self.is_updating() {
			return;
		}
		self.subscribers.dispatch(&event);
	}
}

impl<V: StoreVariant> fmt::Debug for ContainerStore<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ContainerStore")
			.field("id", &self.id)
			.field("variant", &self.variant.name())
			.field("len", &self.primary.len())
			.field("updating", &self.is_updating())
			.field("filtered", &self.filter.is_active())
			.field("subscribers", &self.subscribers.len())
			.finish()
	}
}
