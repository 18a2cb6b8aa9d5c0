//! Adornment surfaces: the per-view layer overlays are installed on.

use quill_primitives::TextSpan;

use crate::overlay::Overlay;

/// Where an adornment is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Positioning {
	/// Fixed to the viewport. Text edits never remove it.
	ViewportRelative,
	/// Tied to a span; removed when an edit touches the span.
	TextRelative(TextSpan),
}

/// Runs exactly once when the surface removes an adornment.
pub type Teardown = Box<dyn FnOnce(Overlay)>;

/// The adornment layer of one view.
pub trait AdornmentSurface {
	fn add(&mut self, overlay: Overlay, positioning: Positioning, teardown: Teardown);

	/// Removes every adornment, running each teardown callback.
	fn remove_all(&mut self);
}

struct Entry {
	overlay: Overlay,
	positioning: Positioning,
	teardown: Teardown,
}

/// In-memory [`AdornmentSurface`].
///
/// Dropping the layer removes what is left on it.
#[derive(Default)]
pub struct AdornmentLayer {
	entries: Vec<Entry>,
}

impl AdornmentLayer {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn overlays(&self) -> impl Iterator<Item = &Overlay> {
		self.entries.iter().map(|e| &e.overlay)
	}

	pub fn positionings(&self) -> impl Iterator<Item = Positioning> + '_ {
		self.entries.iter().map(|e| e.positioning)
	}

	/// Removes text-relative adornments whose span intersects `edited`.
	pub fn on_text_changed(&mut self, edited: TextSpan) {
		let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
			.into_iter()
			.partition(|e| matches!(e.positioning, Positioning::TextRelative(span) if span.intersects(edited)));
		self.entries = kept;
		for entry in removed {
			(entry.teardown)(entry.overlay);
		}
	}
}

impl AdornmentSurface for AdornmentLayer {
	fn add(&mut self, overlay: Overlay, positioning: Positioning, teardown: Teardown) {
		self.entries.push(Entry {
			overlay,
			positioning,
			teardown,
		});
	}

	fn remove_all(&mut self) {
		for entry in std::mem::take(&mut self.entries) {
			(entry.teardown)(entry.overlay);
		}
	}
}

impl Drop for AdornmentLayer {
	fn drop(&mut self) {
		self.remove_all();
	}
}

impl std::fmt::Debug for AdornmentLayer {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list()
			.entries(self.entries.iter().map(|e| (e.overlay.session_id(), e.positioning)))
			.finish()
	}
}
