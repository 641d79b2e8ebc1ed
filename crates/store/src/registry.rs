use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::{ConfigError, StoreConfig, StoreConfigDocument, StoreVariant};

/// Shared cache of store configurations keyed by variant name.
///
/// Owned by whoever builds stores and passed to them explicitly; cloning
/// yields another handle to the same cache. Entries live until
/// [`invalidate`](Self::invalidate) or [`clear`](Self::clear).
#[derive(Debug, Default, Clone)]
pub struct ConfigRegistry {
	inner: Arc<RwLock<HashMap<String, Arc<StoreConfig>>>>,
}

impl ConfigRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Seeds the registry from a multi-store document, replacing existing keys.
	pub fn load_document(&self, doc: StoreConfigDocument) {
		let mut guard = self.inner.write();
		for (key, config) in doc.stores {
			guard.insert(key, Arc::new(config));
		}
	}

	/// Upserts one entry.
	pub fn insert(&self, key: impl Into<String>, config: StoreConfig) -> Arc<StoreConfig> {
		let config = Arc::new(config);
		self.inner.write().insert(key.into(), Arc::clone(&config));
		config
	}

	/// Returns a cached entry.
	pub fn get(&self, key: &str) -> Option<Arc<StoreConfig>> {
		self.inner.read().get(key).cloned()
	}

	/// Returns a cached entry or a [`ConfigError::Missing`].
	pub fn require(&self, key: &str) -> Result<Arc<StoreConfig>, ConfigError> {
		self.get(key).ok_or_else(|| ConfigError::Missing(key.to_owned()))
	}

	/// Returns the cached entry for `key`, running `loader` on a miss.
	///
	/// A failed load caches nothing.
	pub fn get_or_load(
		&self,
		key: &str,
		loader: impl FnOnce(&str) -> Result<StoreConfig, ConfigError>,
	) -> Result<Arc<StoreConfig>, ConfigError> {
		if let Some(hit) = self.get(key) {
			return Ok(hit);
		}
		let loaded = loader(key)?;
		debug!(key, "Loaded store config");
		let mut guard = self.inner.write();
		// Another handle may have raced us; first insert wins.
		Ok(Arc::clone(guard.entry(key.to_owned()).or_insert_with(|| Arc::new(loaded))))
	}

	/// Config for `variant`, falling back to defaults when none is registered.
	pub fn config_for<V: StoreVariant>(&self, variant: &V) -> Arc<StoreConfig> {
		self.get(variant.name()).unwrap_or_default()
	}

	/// Drops one entry; returns true if it existed.
	pub fn invalidate(&self, key: &str) -> bool {
		self.inner.write().remove(key).is_some()
	}

	/// Drops every entry.
	pub fn clear(&self) {
		self.inner.write().clear();
	}

	/// Returns cached keys sorted by name.
	pub fn keys(&self) -> Vec<String> {
		let mut keys: Vec<_> = self.inner.read().keys().cloned().collect();
		keys.sort();
		keys
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;

	use super::*;
	use crate::TextVariant;

	#[test]
	fn get_or_load_runs_loader_once() {
		let registry = ConfigRegistry::new();
		let calls = Cell::new(0);
		let load = |_: &str| {
			calls.set(calls.get() + 1);
			StoreConfig::from_toml_str("removal-allowed = false")
		};

		let first = registry.get_or_load("text", load).unwrap();
		let second = registry.get_or_load("text", load).unwrap();
		assert_eq!(calls.get(), 1);
		assert!(Arc::ptr_eq(&first, &second));
		assert!(!second.removal_allowed);
	}

	#[test]
	fn failed_load_is_not_cached() {
		let registry = ConfigRegistry::new();
		let err = registry
			.get_or_load("text", |key| Err(ConfigError::Missing(key.to_owned())))
			.unwrap_err();
		assert!(matches!(err, ConfigError::Missing(key) if key == "text"));
		assert!(registry.get("text").is_none());
	}

	#[test]
	fn handles_share_state_and_lifecycle() {
		let registry = ConfigRegistry::new();
		let other = registry.clone();
		registry.insert("b", StoreConfig::default());
		other.insert("a", StoreConfig::default());
		assert_eq!(registry.keys(), vec!["a".to_owned(), "b".to_owned()]);

		assert!(registry.invalidate("a"));
		assert!(!other.invalidate("a"));
		assert!(other.require("a").is_err());

		other.clear();
		assert!(registry.keys().is_empty());
	}

	#[test]
	fn config_for_falls_back_to_defaults() {
		let registry = ConfigRegistry::new();
		assert_eq!(*registry.config_for(&TextVariant), StoreConfig::default());

		registry.load_document(
			StoreConfigDocument::from_toml_str("[stores.text]\ncase-insensitive = true").unwrap(),
		);
		assert!(registry.config_for(&TextVariant).case_insensitive);
	}
}
