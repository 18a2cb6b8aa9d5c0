//! What the manager needs from an editor view and its host.

use quill_primitives::{BufferId, TextSpan, ViewId, WorkspaceId};

use crate::events::EventSource;

/// Raised once when a view closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewClosed(pub ViewId);

/// An open editor view.
///
/// The manager reads these properties only while recomputing, which always
/// happens on the view's own context.
pub trait TextView {
	fn id(&self) -> ViewId;

	/// True if the view or any of its child widgets holds keyboard focus.
	fn has_aggregate_focus(&self) -> bool;

	/// The primary selection, in buffer coordinates.
	fn primary_selection(&self) -> TextSpan;

	/// Every buffer the view displays. Projection views show more than one.
	fn buffers(&self) -> Vec<BufferId>;

	/// Fires once when the view closes.
	fn closed(&self) -> &EventSource<ViewClosed>;
}

/// Resolves the workspace a buffer belongs to.
pub trait WorkspaceMap: Send + Sync {
	fn workspace_for_buffer(&self, buffer: BufferId) -> Option<WorkspaceId>;
}

impl<F> WorkspaceMap for F
where
	F: Fn(BufferId) -> Option<WorkspaceId> + Send + Sync,
{
	fn workspace_for_buffer(&self, buffer: BufferId) -> Option<WorkspaceId> {
		self(buffer)
	}
}
