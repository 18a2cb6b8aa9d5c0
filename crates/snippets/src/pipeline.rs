use quill_primitives::{CharIdx, EditList, TextEdit, TextSpan};
use tokio_util::sync::CancellationToken;

use crate::document::Document;
use crate::error::{Result, SnippetError};
use crate::provider::{SnippetPlaceholder, SnippetProvider};

/// Everything the host needs to start a snippet session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetChange {
	/// Edits to apply, in pre-edit coordinates.
	pub edits: EditList,
	/// Caret position after the edits are applied.
	pub caret: Option<CharIdx>,
	/// Placeholders in post-edit coordinates.
	pub placeholders: Vec<SnippetPlaceholder>,
}

impl SnippetChange {
	pub fn is_empty(&self) -> bool {
		self.edits.is_empty()
	}
}

fn cancelled(provider: &dyn SnippetProvider, stage: &'static str) -> Result<EditList> {
	tracing::debug!(snippet = provider.identifier(), stage, "snippet generation cancelled");
	Ok(EditList::empty())
}

/// Runs `provider` at `position` and returns the edits that insert its construct.
///
/// Synthesis failure is returned as an error. Cancellation at any stage returns
/// an empty list; `document` is only ever read.
pub async fn generate(
	provider: &dyn SnippetProvider,
	document: &Document,
	position: CharIdx,
	cancel: &CancellationToken,
) -> Result<EditList> {
	if position > document.len_chars() {
		return Err(SnippetError::PositionOutOfBounds {
			position,
			len: document.len_chars(),
		});
	}

	if cancel.is_cancelled() {
		return cancelled(provider, "synthesize");
	}
	let synthesized = tokio::select! {
		biased;
		_ = cancel.cancelled() => None,
		result = provider.synthesize(document, position, cancel) => Some(result),
	};
	let node = match synthesized {
		None | Some(Err(SnippetError::Cancelled)) => return cancelled(provider, "synthesize"),
		Some(result) => result?,
	};

	if cancel.is_cancelled() {
		return cancelled(provider, "format");
	}
	let text = node.normalize_whitespace(document.formatting()).full_text();

	if cancel.is_cancelled() {
		return cancelled(provider, "emit");
	}
	tracing::trace!(snippet = provider.identifier(), position, len = text.len(), "snippet generated");
	Ok(EditList::single(TextEdit::insert(position, text)))
}

/// Generates the snippet and locates the inserted construct for the host.
///
/// The edits are applied to a scratch copy of the text, which is re-parsed; the
/// node accepted by the provider's container predicate that lies inside the
/// inserted text supplies caret and placeholders. If no such node is found the
/// caret falls back to the end of the insertion.
pub async fn get_snippet(
	provider: &dyn SnippetProvider,
	document: &Document,
	position: CharIdx,
	cancel: &CancellationToken,
) -> Result<SnippetChange> {
	let edits = generate(provider, document, position, cancel).await?;
	if edits.is_empty() {
		return Ok(SnippetChange::default());
	}

	let mut scratch = document.clone();
	scratch.apply(&edits)?;
	let inserted = TextSpan::from_bounds(position, edits.map_pos(position));

	let parse = scratch.parse();
	let facts = document.syntax_facts();
	let found = parse
		.root
		.descendants(0)
		.into_iter()
		.find(|(full, node)| inserted.contains_span(node.span(full.start)) && provider.container_predicate(facts, node));

	let Some((full, node)) = found else {
		tracing::warn!(
			snippet = provider.identifier(),
			position,
			"inserted snippet not found after re-parse"
		);
		return Ok(SnippetChange {
			caret: Some(inserted.end()),
			edits,
			placeholders: Vec::new(),
		});
	};

	Ok(SnippetChange {
		caret: Some(provider.caret(node, full.start)),
		placeholders: provider.placeholders(node, full.start),
		edits,
	})
}

#[cfg(test)]
mod tests;
