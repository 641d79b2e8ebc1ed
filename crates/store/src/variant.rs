//! Extension points for specialised stores.

use std::borrow::Cow;
use std::fmt;

use crate::{CapabilitySet, Container, SearchQuery};

/// Describes one kind of store: its payload type, how payloads are wrapped
/// and displayed, and which optional features it supports.
pub trait StoreVariant {
	type Payload: Clone + PartialEq + fmt::Debug;

	/// Stable name, used as the key for per-variant configuration.
	fn name(&self) -> &str;

	/// Capabilities this variant supports. Configuration can only narrow them.
	fn capabilities(&self) -> CapabilitySet {
		CapabilitySet::all()
	}

	/// Wraps a payload in a new, unowned container.
	fn new_container(&self, payload: Self::Payload) -> Container<Self::Payload> {
		Container::new(payload)
	}

	/// Text a search query is tested against.
	fn display<'a>(&self, payload: &'a Self::Payload) -> Cow<'a, str>;

	/// Search predicate. Defaults to testing [`display`](Self::display).
	fn matches(&self, payload: &Self::Payload, query: &SearchQuery) -> bool {
		query.matches(&self.display(payload))
	}
}

/// Plain string rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextVariant;

impl StoreVariant for TextVariant {
	type Payload = String;

	fn name(&self) -> &str {
		"text"
	}

	fn display<'a>(&self, payload: &'a String) -> Cow<'a, str> {
		Cow::Borrowed(payload)
	}
}
