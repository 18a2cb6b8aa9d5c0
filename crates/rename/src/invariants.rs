use std::sync::Arc;

use quill_primitives::{TextSpan, WorkspaceId};

use crate::adornment::AdornmentLayer;
use crate::manager::tests::{TestView, provider};
use crate::overlay::Overlay;
use crate::view::TextView;
use crate::view_model::FlyoutViewModel;

/// Must keep at most one rename overlay on a view's surface.
///
/// - Enforced in: `AdornmentManager::recompute`
/// - Failure symptom: Stacked flyouts after repeated session changes.
#[cfg_attr(test, test)]
pub(crate) fn test_single_overlay_per_view() {
	let provider = provider();
	let mut manager = provider.attach(TestView::new(1, &[100]), AdornmentLayer::new());
	for round in 0..3 {
		provider
			.service()
			.start(WorkspaceId(1), TextSpan::new(round, 1), "x")
			.unwrap();
		manager.pump();
		manager.recompute();
		assert_eq!(manager.surface().len(), 1);
		provider.service().cancel().unwrap();
		manager.pump();
		assert!(manager.surface().is_empty());
	}
}

/// Must bind every view of a session to the same view model.
///
/// - Enforced in: `ViewModelRegistry::try_get_or_insert_with`
/// - Failure symptom: Typing in one view's flyout is not reflected in another.
#[cfg_attr(test, test)]
pub(crate) fn test_shared_view_model() {
	let provider = provider();
	provider
		.service()
		.start(WorkspaceId(1), TextSpan::new(0, 3), "abc")
		.unwrap();

	let managers: Vec<_> = (0..4)
		.map(|id| provider.attach(TestView::new(id, &[100 + id]), AdornmentLayer::new()))
		.collect();
	let models: Vec<Arc<FlyoutViewModel>> = managers
		.iter()
		.filter_map(|m| match m.surface().overlays().next() {
			Some(Overlay::Flyout(f)) => Some(f.view_model().clone()),
			_ => None,
		})
		.collect();

	assert_eq!(models.len(), 4);
	assert!(models.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
}

/// Must show nothing on views outside the session's workspace.
///
/// - Enforced in: `AdornmentManager::shows_workspace`
/// - Failure symptom: Rename UI appears in an unrelated project's editor.
#[cfg_attr(test, test)]
pub(crate) fn test_workspace_scoping() {
	let provider = provider();
	provider
		.service()
		.start(WorkspaceId(2), TextSpan::new(0, 3), "abc")
		.unwrap();
	let inside = provider.attach(TestView::new(1, &[200]), AdornmentLayer::new());
	let outside = provider.attach(TestView::new(2, &[100]), AdornmentLayer::new());
	assert_eq!(inside.surface().len(), 1);
	assert!(outside.surface().is_empty());
}

/// Must not show the inline flyout on a view without aggregate focus.
///
/// - Enforced in: `AdornmentManager::build_overlay`
/// - Failure symptom: Flyouts open in background splits and steal input.
#[cfg_attr(test, test)]
pub(crate) fn test_flyout_requires_focus() {
	let provider = provider();
	provider
		.service()
		.start(WorkspaceId(1), TextSpan::new(0, 3), "abc")
		.unwrap();
	let view = TestView::new(1, &[100]);
	view.set_focus(false);
	let manager = provider.attach(view, AdornmentLayer::new());
	assert!(manager.surface().is_empty());
}

/// Must release each subscription exactly once, however many times the
/// manager is disposed.
///
/// - Enforced in: `AdornmentManager::dispose`, `Subscription::unsubscribe`
/// - Failure symptom: Another view's listener is removed, or a leaked listener
///   keeps a closed view alive.
#[cfg_attr(test, test)]
pub(crate) fn test_dispose_idempotent() {
	let provider = provider();
	let view = TestView::new(1, &[100]);
	let _other = provider.attach(TestView::new(2, &[100]), AdornmentLayer::new());
	let baseline = provider.service().listener_count();
	let mut manager = provider.attach(view.clone(), AdornmentLayer::new());

	view.close();
	manager.pump();
	manager.dispose();
	drop(manager);

	assert_eq!(provider.service().listener_count(), baseline);
	assert_eq!(view.closed().listener_count(), 0);
}

/// Must rebase the flyout selection onto the identifier, selecting the whole
/// identifier when the view selection is empty.
///
/// - Enforced in: `identifier_selection`
/// - Failure symptom: The flyout opens with the wrong characters highlighted.
#[cfg_attr(test, test)]
pub(crate) fn test_identifier_relative_selection() {
	use crate::view_model::identifier_selection;

	let original = TextSpan::new(10, 5);
	assert_eq!(identifier_selection(original, TextSpan::empty(13)), TextSpan::new(0, 5));
	assert_eq!(identifier_selection(original, TextSpan::new(12, 2)), TextSpan::new(2, 2));
}

/// Must show nothing while no session is active.
///
/// - Enforced in: `AdornmentManager::recompute`
/// - Failure symptom: A stale flyout lingers after commit or cancel.
#[cfg_attr(test, test)]
pub(crate) fn test_no_session_no_overlay() {
	let provider = provider();
	let mut manager = provider.attach(TestView::new(1, &[100]), AdornmentLayer::new());
	manager.recompute();
	assert!(manager.surface().is_empty());
}
