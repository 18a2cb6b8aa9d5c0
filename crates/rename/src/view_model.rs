//! Per-session state backing the rename overlays.
//!
//! A view model is shared by every view showing its session. It holds the
//! session weakly: once the service lets go of an ended session, nothing here
//! keeps it alive.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

use quill_primitives::{SessionId, TextSpan};

use crate::session::RenameSession;

/// Selection to show inside the flyout's identifier box, relative to the
/// identifier's start.
///
/// An empty view selection selects the whole identifier. Otherwise the view
/// selection is shifted by the identifier's start, clamping at zero when the
/// selection begins before the identifier.
pub fn identifier_selection(original: TextSpan, selection: TextSpan) -> TextSpan {
	if selection.is_empty() {
		TextSpan::new(0, original.length)
	} else {
		TextSpan::new(selection.start.saturating_sub(original.start), selection.length)
	}
}

#[derive(Debug, Default)]
struct Attachments(AtomicUsize);

impl Attachments {
	fn attach(&self) {
		self.0.fetch_add(1, Ordering::AcqRel);
	}

	fn detach(&self) {
		self.0.fetch_sub(1, Ordering::AcqRel);
	}

	fn count(&self) -> usize {
		self.0.load(Ordering::Acquire)
	}
}

/// Backs the inline flyout.
#[derive(Debug)]
pub struct FlyoutViewModel {
	session: Weak<RenameSession>,
	session_id: SessionId,
	identifier: String,
	starting_selection: TextSpan,
	attachments: Attachments,
}

impl FlyoutViewModel {
	/// Captures the identifier and the selection of the view that first showed
	/// the session.
	pub fn new(session: &Arc<RenameSession>, starting_selection: TextSpan) -> Self {
		Self {
			session: Arc::downgrade(session),
			session_id: session.id(),
			identifier: session.identifier().to_string(),
			starting_selection,
			attachments: Attachments::default(),
		}
	}

	pub fn session_id(&self) -> SessionId {
		self.session_id
	}

	pub fn session(&self) -> Option<Arc<RenameSession>> {
		self.session.upgrade()
	}

	pub fn identifier(&self) -> &str {
		&self.identifier
	}

	pub fn starting_selection(&self) -> TextSpan {
		self.starting_selection
	}

	/// Number of live overlays bound to this view model.
	pub fn attached_overlays(&self) -> usize {
		self.attachments.count()
	}

	pub(crate) fn attach(&self) {
		self.attachments.attach();
	}

	pub(crate) fn detach(&self) {
		self.attachments.detach();
	}
}

/// Backs the dashboard panel.
#[derive(Debug)]
pub struct DashboardViewModel {
	session: Weak<RenameSession>,
	session_id: SessionId,
	identifier: String,
	attachments: Attachments,
}

impl DashboardViewModel {
	pub fn new(session: &Arc<RenameSession>) -> Self {
		Self {
			session: Arc::downgrade(session),
			session_id: session.id(),
			identifier: session.identifier().to_string(),
			attachments: Attachments::default(),
		}
	}

	pub fn session_id(&self) -> SessionId {
		self.session_id
	}

	pub fn session(&self) -> Option<Arc<RenameSession>> {
		self.session.upgrade()
	}

	pub fn identifier(&self) -> &str {
		&self.identifier
	}

	pub fn attached_overlays(&self) -> usize {
		self.attachments.count()
	}

	pub(crate) fn attach(&self) {
		self.attachments.attach();
	}

	pub(crate) fn detach(&self) {
		self.attachments.detach();
	}
}
