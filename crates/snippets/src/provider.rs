use async_trait::async_trait;
use quill_primitives::{CharIdx, TextSpan};
use quill_syntax::{SyntaxFacts, SyntaxNode};
use tokio_util::sync::CancellationToken;

use crate::document::Document;
use crate::error::Result;

/// A tab stop the host cycles through after insertion. Every span in `spans`
/// holds `text` and is edited together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetPlaceholder {
	pub text: String,
	pub spans: Vec<TextSpan>,
}

/// The strategy a concrete snippet kind supplies.
///
/// Only [`Self::synthesize`] and [`Self::container_predicate`] carry behavior
/// every snippet must define. The remaining hooks have defaults that suit
/// single-construct snippets.
#[async_trait]
pub trait SnippetProvider: Send + Sync {
	/// Short name typed by the user, e.g. `prop`.
	fn identifier(&self) -> &'static str;

	/// Human readable description shown in completion lists.
	fn description(&self) -> &'static str;

	/// Builds the construct to insert at `position`.
	///
	/// Implementations that do real work should poll `cancel` and return
	/// [`SnippetError::Cancelled`](crate::SnippetError::Cancelled) when it fires.
	async fn synthesize(&self, document: &Document, position: CharIdx, cancel: &CancellationToken) -> Result<SyntaxNode>;

	/// Whether `node` is the kind of construct this snippet produces.
	///
	/// Must accept every node [`Self::synthesize`] returns once it has been
	/// rendered and re-parsed.
	fn container_predicate(&self, facts: &dyn SyntaxFacts, node: &SyntaxNode) -> bool;

	/// Whether the snippet may be offered at `position`.
	fn is_valid_location(&self, document: &Document, position: CharIdx) -> bool {
		position <= document.len_chars() && document.syntax_facts().is_member_context(&document.parse().root, position)
	}

	/// Placeholders within the inserted `node`, whose text starts at `base`.
	fn placeholders(&self, node: &SyntaxNode, base: CharIdx) -> Vec<SnippetPlaceholder> {
		let _ = (node, base);
		Vec::new()
	}

	/// Caret position after insertion. Defaults to the end of the construct.
	fn caret(&self, node: &SyntaxNode, base: CharIdx) -> CharIdx {
		node.span(base).end()
	}
}
