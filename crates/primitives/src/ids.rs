use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

macro_rules! define_id {
	($(#[$meta:meta])* $name:ident, $prefix:literal) => {
		$(#[$meta])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
		pub struct $name(pub u64);

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				write!(f, concat!($prefix, "#{}"), self.0)
			}
		}
	};
}

define_id!(
	/// Identity of one rename session.
	///
	/// Allocated by [`SessionId::next`]; never reused within a process.
	SessionId,
	"session"
);
define_id!(
	/// Identity of a workspace (the unit a rename session is scoped to).
	WorkspaceId,
	"workspace"
);
define_id!(
	/// Identity of a text buffer displayed by one or more views.
	BufferId,
	"buffer"
);
define_id!(
	/// Identity of an open editor view.
	ViewId,
	"view"
);

static NEXT_SESSION: AtomicU64 = AtomicU64::new(1);

impl SessionId {
	/// Returns a fresh, process-unique session id.
	pub fn next() -> Self {
		Self(NEXT_SESSION.fetch_add(1, Ordering::Relaxed))
	}
}
