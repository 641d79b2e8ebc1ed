use std::sync::Arc;

use parking_lot::Mutex;
use roster_store::{ChangeEvent, Observer};
use tokio::sync::Notify;
use tracing::{debug, trace};

use crate::instruction::{RedrawInstruction, RedrawTarget, coalesce, translate};

#[derive(Default)]
struct Queue {
	pending: Vec<RedrawInstruction>,
	closed: bool,
}

#[derive(Default)]
struct AdapterInner {
	queue: Mutex<Queue>,
	wake: Notify,
}

/// Store observer that defers redraws to the UI's next tick.
///
/// Subscribing is synchronous and cheap: each event is translated and queued.
/// The UI side calls [`drain`](Self::drain) on its own tick, or awaits
/// [`tick`](Self::tick). Cloning yields another handle to the same queue.
#[derive(Clone, Default)]
pub struct ViewAdapter {
	inner: Arc<AdapterInner>,
}

impl ViewAdapter {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns this adapter as a store observer.
	pub fn observer<P: 'static>(&self) -> Arc<dyn Observer<P>> {
		Arc::new(self.clone())
	}

	/// Number of queued, not yet coalesced instructions.
	pub fn pending_len(&self) -> usize {
		self.inner.queue.lock().pending.len()
	}

	/// Takes everything queued since the last tick, coalesced.
	pub fn drain(&self) -> Vec<RedrawInstruction> {
		let pending = std::mem::take(&mut self.inner.queue.lock().pending);
		if pending.is_empty() {
			return pending;
		}
		let queued = pending.len();
		let out = coalesce(pending);
		debug!(queued, emitted = out.len(), "Coalesced redraw tick");
		out
	}

	/// Drains into `target`, returning how many instructions were applied.
	pub fn flush_into(&self, target: &mut impl RedrawTarget) -> usize {
		let batch = self.drain();
		let n = batch.len();
		for instruction in batch {
			instruction.apply_to(target);
		}
		n
	}

	/// Waits for the next non-empty tick.
	///
	/// Returns `None` once the adapter is closed and nothing remains queued.
	pub async fn tick(&self) -> Option<Vec<RedrawInstruction>> {
		loop {
			let notified = self.inner.wake.notified();
			let batch = self.drain();
			if !batch.is_empty() {
				return Some(batch);
			}
			if self.inner.queue.lock().closed {
				return None;
			}
			notified.await;
		}
	}

	/// Applies ticks to `target` until the adapter is closed.
	pub async fn run(&self, target: &mut impl RedrawTarget) {
		while let Some(batch) = self.tick().await {
			for instruction in batch {
				instruction.apply_to(target);
			}
		}
	}

	/// Stops [`tick`](Self::tick) once the queue is drained. Later events are
	/// dropped.
	pub fn close(&self) {
		self.inner.queue.lock().closed = true;
		self.inner.wake.notify_waiters();
	}
}

impl<P> Observer<P> for ViewAdapter {
	fn on_change(&self, event: &ChangeEvent<P>) {
		let instruction = translate(event);
		let mut queue = self.inner.queue.lock();
		if queue.closed {
			return;
		}
		trace!(kind = %event.kind(), ?instruction, "Queued redraw");
		let was_idle = queue.pending.is_empty();
		queue.pending.push(instruction);
		drop(queue);
		if was_idle {
			self.inner.wake.notify_one();
		}
	}
}
