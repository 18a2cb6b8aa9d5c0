//! Core types shared by the rename and snippet crates: identifiers, spans, and edits.

/// Atomic, validated text edit lists.
pub mod edit;
/// Identifier types for sessions, workspaces, buffers, and views.
pub mod ids;
/// Start/length text spans measured in characters.
pub mod span;

pub use edit::{EditError, EditList, TextEdit};
pub use ids::{BufferId, SessionId, ViewId, WorkspaceId};
pub use ropey::{Rope, RopeSlice};
pub use span::{CharIdx, CharLen, TextSpan};
