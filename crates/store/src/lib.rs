//! Observable, ordered in-process collection backing list and grid displays.
//!
//! A [`ContainerStore`] keeps [`Container`]s in insertion order together with
//! a per-row visibility overlay, a search-derived filtered view, and a
//! shadow copy for atomic batch edits. Every externally visible state change
//! is reported to subscribed [`Observer`]s as a typed [`ChangeEvent`].

/// Capability flags fixed at store construction.
pub mod capability;
/// TOML store configuration.
pub mod config;
/// Containers and store identity.
pub mod container;
/// Error types.
pub mod error;
/// Change notifications.
pub mod event;
/// Observer trait and subscriber set.
pub mod observer;
/// Injectable cache of per-variant configuration.
pub mod registry;
/// Search predicates and the filtered index.
pub mod search;
mod store;
/// Variant plug-points.
pub mod variant;

pub use capability::{Capability, CapabilitySet};
pub use config::{StoreConfig, StoreConfigDocument};
pub use container::{Container, StoreId};
pub use error::{ConfigError, StoreError};
pub use event::{ChangeEvent, ChangeKind};
pub use observer::Observer;
pub use registry::ConfigRegistry;
pub use search::{SearchIndex, SearchQuery};
pub use store::ContainerStore;
pub use variant::{StoreVariant, TextVariant};
