use serde::Deserialize;

/// A feature a store variant may declare beyond plain ordered storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, strum::Display, strum::EnumIter)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Capability {
	/// Predicate-based filtering through [`ContainerStore::search`](crate::ContainerStore::search).
	Search,
	/// Per-row boolean visibility overlay.
	Visibility,
}

bitflags::bitflags! {
	/// The set of capabilities a store was constructed with.
	///
	/// Fixed at construction and queried through
	/// [`ContainerStore::capabilities`](crate::ContainerStore::capabilities)
	/// instead of probing the store's type at every call site.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct CapabilitySet: u8 {
		/// Search filtering.
		const SEARCH = 1 << 0;
		/// Visibility overlay.
		const VISIBILITY = 1 << 1;
	}
}

impl Capability {
	/// Returns the bitflag for this capability.
	pub const fn as_set(self) -> CapabilitySet {
		match self {
			Self::Search => CapabilitySet::SEARCH,
			Self::Visibility => CapabilitySet::VISIBILITY,
		}
	}
}

impl From<Capability> for CapabilitySet {
	fn from(cap: Capability) -> Self {
		cap.as_set()
	}
}

impl FromIterator<Capability> for CapabilitySet {
	fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
		let mut set = CapabilitySet::empty();
		for cap in iter {
			set |= cap.as_set();
		}
		set
	}
}

#[cfg(test)]
mod tests {
	use strum::IntoEnumIterator;

	use super::*;

	#[test]
	fn every_capability_maps_to_a_distinct_flag() {
		let all: CapabilitySet = Capability::iter().collect();
		assert_eq!(all, CapabilitySet::all());
		assert_eq!(Capability::iter().count(), all.bits().count_ones() as usize);
	}

	#[test]
	fn display_is_kebab_case() {
		assert_eq!(Capability::Search.to_string(), "search");
		assert_eq!(Capability::Visibility.to_string(), "visibility");
	}
}
