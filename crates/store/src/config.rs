//! Store configuration loaded from TOML.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::debug;

use crate::{Capability, CapabilitySet, ConfigError};

/// Per-store settings.
///
/// ```toml
/// removal-allowed = false
/// case-insensitive = true
/// capabilities = ["search"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct StoreConfig {
	/// Whether [`ContainerStore::remove`](crate::ContainerStore::remove) may remove rows.
	pub removal_allowed: bool,
	/// Whether search queries ignore case.
	pub case_insensitive: bool,
	/// Narrows the variant's capabilities. `None` keeps all of them.
	pub capabilities: Option<Vec<Capability>>,
}

impl Default for StoreConfig {
	fn default() -> Self {
		Self {
			removal_allowed: true,
			case_insensitive: false,
			capabilities: None,
		}
	}
}

impl StoreConfig {
	/// Parses a single store's settings.
	pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(src)?)
	}

	/// Capability mask to intersect with the variant's own set.
	pub fn capability_mask(&self) -> CapabilitySet {
		match &self.capabilities {
			Some(caps) => caps.iter().copied().collect(),
			None => CapabilitySet::all(),
		}
	}
}

/// A document holding settings for several variants, keyed by variant name.
///
/// ```toml
/// [stores.text]
/// removal-allowed = false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfigDocument {
	pub stores: BTreeMap<String, StoreConfig>,
}

impl StoreConfigDocument {
	pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
		let doc: Self = toml::from_str(src)?;
		debug!(stores = doc.stores.len(), "Parsed store config document");
		Ok(doc)
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn empty_document_yields_defaults() {
		let cfg = StoreConfig::from_toml_str("").unwrap();
		assert_eq!(cfg, StoreConfig::default());
		assert_eq!(cfg.capability_mask(), CapabilitySet::all());
	}

	#[test]
	fn parses_all_fields() {
		let cfg = StoreConfig::from_toml_str(
			r#"
			removal-allowed = false
			case-insensitive = true
			capabilities = ["visibility"]
			"#,
		)
		.unwrap();
		assert!(!cfg.removal_allowed);
		assert!(cfg.case_insensitive);
		assert_eq!(cfg.capability_mask(), CapabilitySet::VISIBILITY);
	}

	#[test]
	fn rejects_unknown_keys_and_capabilities() {
		assert!(StoreConfig::from_toml_str("sorted = true").is_err());
		assert!(StoreConfig::from_toml_str(r#"capabilities = ["color"]"#).is_err());
	}

	#[test]
	fn document_keys_by_variant_name() {
		let doc = StoreConfigDocument::from_toml_str(
			r#"
			[stores.text]
			removal-allowed = false

			[stores.logs]
			case-insensitive = true
			"#,
		)
		.unwrap();
		assert_eq!(doc.stores.keys().collect::<Vec<_>>(), vec!["logs", "text"]);
		assert!(!doc.stores["text"].removal_allowed);
		assert!(doc.stores["logs"].removal_allowed);
	}
}
