//! Listener lists with scoped subscription handles.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use slab::Slab;

type Listener<E> = Arc<dyn Fn(&E) + Send + Sync>;
type Listeners<E> = Mutex<Slab<Listener<E>>>;

/// A list of callbacks notified on [`EventSource::emit`].
///
/// Listeners run on the emitting thread, after the list lock is released, so a
/// listener may subscribe or unsubscribe without deadlocking.
pub struct EventSource<E> {
	listeners: Arc<Listeners<E>>,
}

impl<E> Default for EventSource<E> {
	fn default() -> Self {
		Self {
			listeners: Arc::new(Mutex::new(Slab::new())),
		}
	}
}

impl<E: 'static> EventSource<E> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `listener` until the returned handle is released or dropped.
	#[must_use = "dropping the subscription unsubscribes immediately"]
	pub fn subscribe(&self, listener: impl Fn(&E) + Send + Sync + 'static) -> Subscription {
		let key = self.listeners.lock().insert(Arc::new(listener));
		let weak: Weak<Listeners<E>> = Arc::downgrade(&self.listeners);
		Subscription {
			release: Some(Box::new(move || {
				if let Some(listeners) = weak.upgrade() {
					listeners.lock().try_remove(key);
				}
			})),
		}
	}

	pub fn emit(&self, event: &E) {
		let snapshot: Vec<Listener<E>> = self.listeners.lock().iter().map(|(_, l)| l.clone()).collect();
		for listener in snapshot {
			listener(event);
		}
	}

	pub fn listener_count(&self) -> usize {
		self.listeners.lock().len()
	}
}

/// Keeps one listener registered. Released at most once: by
/// [`Subscription::unsubscribe`] or on drop, whichever comes first.
pub struct Subscription {
	release: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
	/// Removes the listener. Returns false if it was already removed.
	pub fn unsubscribe(&mut self) -> bool {
		match self.release.take() {
			Some(release) => {
				release();
				true
			}
			None => false,
		}
	}

	pub fn is_active(&self) -> bool {
		self.release.is_some()
	}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		self.unsubscribe();
	}
}

impl std::fmt::Debug for Subscription {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Subscription").field("active", &self.is_active()).finish()
	}
}
