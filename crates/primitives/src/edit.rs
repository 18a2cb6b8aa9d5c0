//! Ordered, non-overlapping edit lists applied as a single unit.

use smallvec::SmallVec;
use thiserror::Error;

use crate::Rope;
use crate::span::{CharIdx, TextSpan};

/// Replaces the text under `span` with `replacement`.
///
/// A zero-length span with non-empty replacement is an insertion; an empty
/// replacement is a deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
	pub span: TextSpan,
	pub replacement: String,
}

impl TextEdit {
	pub fn new(span: TextSpan, replacement: impl Into<String>) -> Self {
		Self {
			span,
			replacement: replacement.into(),
		}
	}

	/// Inserts `text` at `pos` without removing anything.
	pub fn insert(pos: CharIdx, text: impl Into<String>) -> Self {
		Self::new(TextSpan::empty(pos), text)
	}

	/// Signed change in document length caused by this edit.
	pub fn len_delta(&self) -> isize {
		self.replacement.chars().count() as isize - self.span.length as isize
	}
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
	#[error("overlapping edits at {first:?} and {second:?}")]
	Overlapping { first: TextSpan, second: TextSpan },
	#[error("edit {span:?} out of bounds for document of {len} chars")]
	OutOfBounds { span: TextSpan, len: usize },
}

/// A validated edit list: sorted by position with no two spans overlapping.
///
/// Two insertions at the same position are rejected as well, since their
/// relative order would be ambiguous.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EditList {
	edits: SmallVec<[TextEdit; 1]>,
}

impl EditList {
	/// An empty list. Applying it leaves the document untouched.
	pub fn empty() -> Self {
		Self::default()
	}

	/// A list holding one edit.
	pub fn single(edit: TextEdit) -> Self {
		let mut edits = SmallVec::new();
		edits.push(edit);
		Self { edits }
	}

	/// Sorts and validates `edits`.
	pub fn new(edits: impl IntoIterator<Item = TextEdit>) -> Result<Self, EditError> {
		let mut edits: SmallVec<[TextEdit; 1]> = edits.into_iter().collect();
		edits.sort_by_key(|edit| (edit.span.start, edit.span.end()));
		for pair in edits.windows(2) {
			let (prev, next) = (&pair[0], &pair[1]);
			let same_point = prev.span.start == next.span.start && (prev.span.is_empty() || next.span.is_empty());
			if next.span.start < prev.span.end() || same_point {
				return Err(EditError::Overlapping {
					first: prev.span,
					second: next.span,
				});
			}
		}
		Ok(Self { edits })
	}

	pub fn is_empty(&self) -> bool {
		self.edits.is_empty()
	}

	pub fn len(&self) -> usize {
		self.edits.len()
	}

	pub fn iter(&self) -> impl Iterator<Item = &TextEdit> {
		self.edits.iter()
	}

	pub fn as_slice(&self) -> &[TextEdit] {
		&self.edits
	}

	/// Checks every span against a document of `len_chars` characters.
	pub fn validate_bounds(&self, len_chars: usize) -> Result<(), EditError> {
		match self.edits.iter().find(|edit| edit.span.end() > len_chars) {
			Some(edit) => Err(EditError::OutOfBounds {
				span: edit.span,
				len: len_chars,
			}),
			None => Ok(()),
		}
	}

	/// Applies all edits to `doc`, or none of them.
	///
	/// Bounds are checked up front; edits are then applied back to front so
	/// earlier spans stay valid in original coordinates.
	pub fn apply(&self, doc: &mut Rope) -> Result<(), EditError> {
		self.validate_bounds(doc.len_chars())?;
		for edit in self.edits.iter().rev() {
			if !edit.span.is_empty() {
				doc.remove(edit.span.start..edit.span.end());
			}
			if !edit.replacement.is_empty() {
				doc.insert(edit.span.start, &edit.replacement);
			}
		}
		Ok(())
	}

	/// Maps a pre-edit position to its post-edit location.
	///
	/// Positions inside a replaced span move to the end of its replacement.
	pub fn map_pos(&self, pos: CharIdx) -> CharIdx {
		let mut delta: isize = 0;
		for edit in &self.edits {
			if edit.span.end() <= pos && !(edit.span.is_empty() && edit.span.start == pos) {
				delta += edit.len_delta();
			} else if edit.span.start <= pos {
				let end = edit.span.start as isize + edit.replacement.chars().count() as isize;
				return (end + delta).max(0) as CharIdx;
			} else {
				break;
			}
		}
		(pos as isize + delta).max(0) as CharIdx
	}
}

impl IntoIterator for EditList {
	type Item = TextEdit;
	type IntoIter = smallvec::IntoIter<[TextEdit; 1]>;

	fn into_iter(self) -> Self::IntoIter {
		self.edits.into_iter()
	}
}
