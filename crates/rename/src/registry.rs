//! Shared view models keyed by session.
//!
//! Every view showing a session must bind the same view model instance. The
//! registry holds an immutable snapshot behind an [`ArcSwap`]; lookups are
//! lock-free and insertions publish a new snapshot with a compare-and-swap.
//! Factories run outside any lock. When two callers race, the loser's value is
//! dropped and both receive the winner.

use std::any::{Any, TypeId};
use std::sync::{Arc, Weak};

use arc_swap::ArcSwap;
use quill_primitives::SessionId;
use rustc_hash::FxHashMap as HashMap;

use crate::events::Subscription;
use crate::session::{RenameService, RenameSession, SessionEvent};

type Key = (SessionId, TypeId);

#[derive(Clone)]
struct Entry {
	session: Weak<RenameSession>,
	value: Arc<dyn Any + Send + Sync>,
}

impl Entry {
	fn is_live(&self) -> bool {
		self.session.upgrade().is_some_and(|s| !s.is_ended())
	}
}

#[derive(Clone, Default)]
struct Snapshot {
	entries: HashMap<Key, Entry>,
}

/// Session-scoped cache of view models, one per (session, view model type).
#[derive(Default)]
pub struct ViewModelRegistry {
	snap: ArcSwap<Snapshot>,
}

impl ViewModelRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Evicts a session's view models as soon as it ends.
	///
	/// The registry is held weakly; dropping it leaves a harmless listener
	/// until the subscription is released.
	#[must_use = "dropping the subscription stops eviction"]
	pub fn track(self: &Arc<Self>, service: &RenameService) -> Subscription {
		let registry = Arc::downgrade(self);
		service.subscribe(move |event| {
			if let SessionEvent::Ended(id, _) = *event
				&& let Some(registry) = registry.upgrade()
			{
				registry.evict(id);
			}
		})
	}

	/// Returns the cached view model of type `V` for `session`.
	pub fn get<V: Any + Send + Sync>(&self, session: SessionId) -> Option<Arc<V>> {
		let snap = self.snap.load();
		let entry = snap.entries.get(&(session, TypeId::of::<V>()))?;
		entry.value.clone().downcast::<V>().ok()
	}

	/// Returns the view model of type `V` for `session`, creating it with
	/// `factory` if absent.
	///
	/// Callers racing on the same key may each run their factory; only one
	/// result is published and every caller receives it. Factories must be
	/// free of side effects beyond building the value.
	pub fn get_or_insert_with<V, F>(&self, session: &Arc<RenameSession>, factory: F) -> Arc<V>
	where
		V: Any + Send + Sync,
		F: FnOnce(&Arc<RenameSession>) -> V,
	{
		match self.try_get_or_insert_with(session, |s| Ok::<_, std::convert::Infallible>(factory(s))) {
			Ok(value) => value,
			Err(never) => match never {},
		}
	}

	/// Fallible form of [`Self::get_or_insert_with`].
	///
	/// A factory error is returned unchanged and nothing is cached.
	pub fn try_get_or_insert_with<V, E, F>(&self, session: &Arc<RenameSession>, factory: F) -> Result<Arc<V>, E>
	where
		V: Any + Send + Sync,
		F: FnOnce(&Arc<RenameSession>) -> Result<V, E>,
	{
		let key = (session.id(), TypeId::of::<V>());
		if let Some(existing) = self.get::<V>(key.0) {
			return Ok(existing);
		}

		let created = Arc::new(factory(session)?);

		loop {
			let cur = self.snap.load_full();
			if let Some(existing) = cur.entries.get(&key).and_then(|e| e.value.clone().downcast::<V>().ok()) {
				tracing::trace!(session = %key.0, "view model creation lost race");
				return Ok(existing);
			}

			let mut next = (*cur).clone();
			next.entries.retain(|_, entry| entry.is_live());
			next.entries.insert(
				key,
				Entry {
					session: Arc::downgrade(session),
					value: created.clone(),
				},
			);

			let prev = self.snap.compare_and_swap(&cur, Arc::new(next));
			if Arc::ptr_eq(&prev, &cur) {
				tracing::trace!(session = %key.0, "view model created");
				return Ok(created);
			}
		}
	}

	/// Drops every view model of `session`. Returns how many were removed.
	pub fn evict(&self, session: SessionId) -> usize {
		self.remove_where(|(id, _), _| *id == session)
	}

	/// Drops view models whose session has ended or been released.
	pub fn sweep(&self) -> usize {
		self.remove_where(|_, entry| !entry.is_live())
	}

	fn remove_where(&self, mut pred: impl FnMut(&Key, &Entry) -> bool) -> usize {
		loop {
			let cur = self.snap.load_full();
			let removed = cur.entries.iter().filter(|&(k, e)| pred(k, e)).count();
			if removed == 0 {
				return 0;
			}

			let mut next = (*cur).clone();
			next.entries.retain(|k, e| !pred(k, e));

			let prev = self.snap.compare_and_swap(&cur, Arc::new(next));
			if Arc::ptr_eq(&prev, &cur) {
				tracing::trace!(removed, "view models evicted");
				return removed;
			}
		}
	}

	pub fn len(&self) -> usize {
		self.snap.load().entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl std::fmt::Debug for ViewModelRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ViewModelRegistry").field("len", &self.len()).finish()
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Barrier;
	use std::sync::atomic::{AtomicUsize, Ordering};

	use quill_primitives::{TextSpan, WorkspaceId};

	use super::*;
	use crate::view_model::{DashboardViewModel, FlyoutViewModel};

	fn started(service: &RenameService) -> Arc<RenameSession> {
		service.start(WorkspaceId(1), TextSpan::new(4, 3), "foo").unwrap()
	}

	#[test]
	fn same_session_yields_same_instance() {
		let service = RenameService::new();
		let registry = ViewModelRegistry::new();
		let session = started(&service);

		let a = registry.get_or_insert_with(&session, |s| FlyoutViewModel::new(s, TextSpan::new(0, 3)));
		let b = registry.get_or_insert_with(&session, |s| FlyoutViewModel::new(s, TextSpan::new(1, 1)));
		assert!(Arc::ptr_eq(&a, &b));
		assert_eq!(b.starting_selection(), TextSpan::new(0, 3), "first creator wins");
	}

	#[test]
	fn types_are_cached_independently() {
		let service = RenameService::new();
		let registry = ViewModelRegistry::new();
		let session = started(&service);

		registry.get_or_insert_with(&session, |s| FlyoutViewModel::new(s, TextSpan::default()));
		registry.get_or_insert_with(&session, DashboardViewModel::new);
		assert_eq!(registry.len(), 2);
		assert!(registry.get::<DashboardViewModel>(session.id()).is_some());
	}

	#[test]
	fn factory_error_caches_nothing() {
		let service = RenameService::new();
		let registry = ViewModelRegistry::new();
		let session = started(&service);

		let err = registry
			.try_get_or_insert_with::<DashboardViewModel, _, _>(&session, |_| Err("boom"))
			.unwrap_err();
		assert_eq!(err, "boom");
		assert!(registry.is_empty());
	}

	#[test]
	fn tracked_registry_evicts_on_session_end() {
		let service = RenameService::new();
		let registry = Arc::new(ViewModelRegistry::new());
		let _tracking = registry.track(&service);

		let session = started(&service);
		registry.get_or_insert_with(&session, DashboardViewModel::new);
		assert_eq!(registry.len(), 1);

		service.commit().unwrap();
		assert!(registry.is_empty());
	}

	#[test]
	fn sweep_drops_ended_and_released_sessions() {
		let service = RenameService::new();
		let registry = ViewModelRegistry::new();

		let ended = started(&service);
		registry.get_or_insert_with(&ended, DashboardViewModel::new);
		service.cancel().unwrap();
		assert_eq!(registry.sweep(), 1);
		assert!(registry.get::<DashboardViewModel>(ended.id()).is_none());

		let live = started(&service);
		registry.get_or_insert_with(&live, DashboardViewModel::new);
		assert_eq!(registry.sweep(), 0);
		assert!(registry.get::<DashboardViewModel>(live.id()).is_some());
	}

	#[test]
	fn registry_does_not_keep_sessions_alive() {
		let service = RenameService::new();
		let registry = ViewModelRegistry::new();
		let session = started(&service);
		let vm = registry.get_or_insert_with(&session, DashboardViewModel::new);

		service.cancel().unwrap();
		drop(session);
		assert!(vm.session().is_none());
	}

	#[test]
	fn concurrent_creation_converges_on_one_instance() {
		let service = RenameService::new();
		let registry = Arc::new(ViewModelRegistry::new());
		let session = started(&service);
		let barrier = Arc::new(Barrier::new(8));
		let created = Arc::new(AtomicUsize::new(0));

		let handles: Vec<_> = (0..8)
			.map(|_| {
				let (registry, session, barrier, created) =
					(registry.clone(), session.clone(), barrier.clone(), created.clone());
				std::thread::spawn(move || {
					barrier.wait();
					registry.get_or_insert_with(&session, |s| {
						created.fetch_add(1, Ordering::SeqCst);
						DashboardViewModel::new(s)
					})
				})
			})
			.collect();

		let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
		let published = registry.get::<DashboardViewModel>(session.id()).unwrap();
		assert!(results.iter().all(|vm| Arc::ptr_eq(vm, &published)));
		assert!((1..=8).contains(&created.load(Ordering::SeqCst)));
		assert_eq!(registry.len(), 1);
	}
}
