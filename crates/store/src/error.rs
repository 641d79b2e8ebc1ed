//! Error types for store operations.

use thiserror::Error;

use crate::Capability;

/// Errors returned by [`ContainerStore`](crate::ContainerStore) operations.
///
/// Policy outcomes (removal disabled, a position missing from the filtered
/// view) are reported as `None` rather than as errors.
#[derive(Debug, Error)]
pub enum StoreError {
	/// A primary index was past the end of the store.
	#[error("index {index} out of range for store of length {len}")]
	IndexOutOfRange {
		/// The offending index.
		index: usize,
		/// Store length at the time of the call.
		len: usize,
	},

	/// A regex search pattern failed to compile.
	#[error("invalid search pattern: {0}")]
	InvalidPattern(#[from] regex::Error),

	/// The store was constructed without the required capability.
	#[error("store does not support {0}")]
	Unsupported(Capability),
}

/// Errors produced while loading a [`StoreConfig`](crate::StoreConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
	/// The document is not valid TOML or does not match the config schema.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// A loader could not produce a config for the requested key.
	#[error("no store config available for '{0}'")]
	Missing(String),
}
