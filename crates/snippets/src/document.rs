use std::sync::Arc;

use quill_primitives::{EditError, EditList, Rope};
use quill_syntax::{MemberSyntaxFacts, NormalizeOptions, Parse, SyntaxFacts};

/// A document as seen by snippet providers: text plus the language services and
/// whitespace conventions of its host.
#[derive(Clone)]
pub struct Document {
	text: Rope,
	facts: Arc<dyn SyntaxFacts>,
	formatting: NormalizeOptions,
}

impl Document {
	/// A document in the member-declaration language with default formatting.
	pub fn new(text: &str) -> Self {
		Self {
			text: Rope::from(text),
			facts: Arc::new(MemberSyntaxFacts),
			formatting: NormalizeOptions::default(),
		}
	}

	pub fn with_formatting(mut self, formatting: NormalizeOptions) -> Self {
		self.formatting = formatting;
		self
	}

	pub fn with_syntax_facts(mut self, facts: Arc<dyn SyntaxFacts>) -> Self {
		self.facts = facts;
		self
	}

	pub fn text(&self) -> &Rope {
		&self.text
	}

	pub fn len_chars(&self) -> usize {
		self.text.len_chars()
	}

	pub fn syntax_facts(&self) -> &dyn SyntaxFacts {
		&*self.facts
	}

	pub fn formatting(&self) -> &NormalizeOptions {
		&self.formatting
	}

	pub fn parse(&self) -> Parse {
		quill_syntax::parse(&self.text.to_string())
	}

	/// Applies `edits` as a unit; on error the text is unchanged.
	pub fn apply(&mut self, edits: &EditList) -> Result<(), EditError> {
		edits.apply(&mut self.text)
	}
}

impl std::fmt::Debug for Document {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Document")
			.field("len_chars", &self.text.len_chars())
			.field("formatting", &self.formatting)
			.finish_non_exhaustive()
	}
}
