//! UI adapter for [`roster_store::ContainerStore`] change events.
//!
//! Events are translated into [`RedrawInstruction`]s synchronously, queued,
//! and handed to the UI on its next tick so bursts collapse into the fewest
//! redraws.

/// Deferred, coalescing observer.
pub mod adapter;
/// Event to redraw translation.
pub mod instruction;

pub use adapter::ViewAdapter;
pub use instruction::{RedrawInstruction, RedrawTarget, coalesce, translate};
