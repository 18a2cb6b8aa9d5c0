/// A position in the text, measured in characters (not bytes).
pub type CharIdx = usize;

/// A length or count in the text, measured in characters (not bytes).
///
/// Kept distinct from [`CharIdx`] so call sites read as either a position or a
/// distance.
pub type CharLen = usize;

/// A half-open text span `[start, start + length)`.
///
/// Unlike a selection range there is no direction: a span only records where the
/// text begins and how many characters it covers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextSpan {
	/// First character covered by the span.
	pub start: CharIdx,
	/// Number of characters covered.
	pub length: CharLen,
}

impl TextSpan {
	/// Creates a span from a start position and a length.
	pub const fn new(start: CharIdx, length: CharLen) -> Self {
		Self { start, length }
	}

	/// Creates a span covering `[start, end)`.
	///
	/// `end` values before `start` produce an empty span at `start`.
	pub fn from_bounds(start: CharIdx, end: CharIdx) -> Self {
		Self {
			start,
			length: end.saturating_sub(start),
		}
	}

	/// Creates a zero-length span at `pos`.
	pub const fn empty(pos: CharIdx) -> Self {
		Self::new(pos, 0)
	}

	/// Exclusive end of the span.
	#[inline]
	pub const fn end(&self) -> CharIdx {
		self.start + self.length
	}

	/// Returns true for zero-length spans.
	#[inline]
	pub const fn is_empty(&self) -> bool {
		self.length == 0
	}

	/// Returns true if `pos` lies inside the span (end excluded).
	pub fn contains(&self, pos: CharIdx) -> bool {
		pos >= self.start && pos < self.end()
	}

	/// Returns true if `other` lies entirely within this span.
	pub fn contains_span(&self, other: TextSpan) -> bool {
		other.start >= self.start && other.end() <= self.end()
	}

	/// Returns true if the two spans share at least one character.
	///
	/// Empty spans never overlap anything; use [`Self::intersects`] for
	/// boundary contact.
	pub fn overlaps(&self, other: TextSpan) -> bool {
		self.start.max(other.start) < self.end().min(other.end())
	}

	/// Returns true if the spans overlap or touch.
	pub fn intersects(&self, other: TextSpan) -> bool {
		self.start <= other.end() && other.start <= self.end()
	}

	/// Returns this span shifted right by `delta` characters.
	pub const fn shifted(self, delta: CharLen) -> Self {
		Self::new(self.start + delta, self.length)
	}
}

impl From<std::ops::Range<CharIdx>> for TextSpan {
	fn from(range: std::ops::Range<CharIdx>) -> Self {
		Self::from_bounds(range.start, range.end)
	}
}

impl From<TextSpan> for std::ops::Range<CharIdx> {
	fn from(span: TextSpan) -> Self {
		span.start..span.end()
	}
}
