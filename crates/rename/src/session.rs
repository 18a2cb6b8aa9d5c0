//! Rename sessions and the service that owns the active one.

use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;
use quill_primitives::{SessionId, TextSpan, WorkspaceId};

use crate::error::{RenameError, Result};
use crate::events::{EventSource, Subscription};

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEndReason {
	Committed,
	Cancelled,
}

/// One in-progress rename.
///
/// Shared by the service, the view models, and any view showing it. Once
/// ended, a session never becomes active again.
#[derive(Debug)]
pub struct RenameSession {
	id: SessionId,
	workspace: WorkspaceId,
	trigger_span: TextSpan,
	identifier: String,
	ended: OnceLock<SessionEndReason>,
}

impl RenameSession {
	fn new(workspace: WorkspaceId, trigger_span: TextSpan, identifier: String) -> Self {
		Self {
			id: SessionId::next(),
			workspace,
			trigger_span,
			identifier,
			ended: OnceLock::new(),
		}
	}

	pub fn id(&self) -> SessionId {
		self.id
	}

	/// The workspace whose buffers are being renamed.
	pub fn workspace(&self) -> WorkspaceId {
		self.workspace
	}

	/// Span of the identifier the rename was started on.
	pub fn trigger_span(&self) -> TextSpan {
		self.trigger_span
	}

	/// Identifier text at the time the rename was started.
	pub fn identifier(&self) -> &str {
		&self.identifier
	}

	pub fn end_reason(&self) -> Option<SessionEndReason> {
		self.ended.get().copied()
	}

	pub fn is_ended(&self) -> bool {
		self.ended.get().is_some()
	}
}

/// Emitted whenever the active session changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
	Started(SessionId),
	Ended(SessionId, SessionEndReason),
}

impl SessionEvent {
	pub fn session(&self) -> SessionId {
		match *self {
			Self::Started(id) | Self::Ended(id, _) => id,
		}
	}
}

/// Owns the active rename session.
///
/// At most one session is active at a time, which also bounds every workspace
/// to at most one. Events are emitted on the caller's thread after the state
/// lock is released.
#[derive(Default)]
pub struct RenameService {
	active: Mutex<Option<Arc<RenameSession>>>,
	events: EventSource<SessionEvent>,
}

impl RenameService {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn active_session(&self) -> Option<Arc<RenameSession>> {
		self.active.lock().clone()
	}

	/// Notifies `listener` of every session start and end.
	#[must_use = "dropping the subscription unsubscribes immediately"]
	pub fn subscribe(&self, listener: impl Fn(&SessionEvent) + Send + Sync + 'static) -> Subscription {
		self.events.subscribe(listener)
	}

	pub fn listener_count(&self) -> usize {
		self.events.listener_count()
	}

	/// Starts a rename of `identifier` at `trigger_span` in `workspace`.
	///
	/// # Errors
	///
	/// [`RenameError::SessionAlreadyActive`] if another session has not ended.
	pub fn start(&self, workspace: WorkspaceId, trigger_span: TextSpan, identifier: impl Into<String>) -> Result<Arc<RenameSession>> {
		let session = {
			let mut active = self.active.lock();
			if let Some(current) = active.as_ref() {
				return Err(RenameError::SessionAlreadyActive { active: current.id });
			}
			let session = Arc::new(RenameSession::new(workspace, trigger_span, identifier.into()));
			*active = Some(session.clone());
			session
		};

		tracing::debug!(session = %session.id, %workspace, span = ?trigger_span, "rename started");
		self.events.emit(&SessionEvent::Started(session.id));
		Ok(session)
	}

	/// Ends the active session, applying the rename.
	pub fn commit(&self) -> Result<Arc<RenameSession>> {
		self.end(SessionEndReason::Committed)
	}

	/// Ends the active session, discarding the rename.
	pub fn cancel(&self) -> Result<Arc<RenameSession>> {
		self.end(SessionEndReason::Cancelled)
	}

	fn end(&self, reason: SessionEndReason) -> Result<Arc<RenameSession>> {
		let session = self.active.lock().take().ok_or(RenameError::NoActiveSession)?;
		if session.ended.set(reason).is_err() {
			return Err(RenameError::SessionEnded { session: session.id });
		}

		tracing::debug!(session = %session.id, ?reason, "rename ended");
		self.events.emit(&SessionEvent::Ended(session.id, reason));
		Ok(session)
	}
}

impl std::fmt::Debug for RenameService {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RenameService")
			.field("active", &self.active.lock().as_ref().map(|s| s.id))
			.field("listeners", &self.events.listener_count())
			.finish()
	}
}
