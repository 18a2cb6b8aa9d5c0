use quill_syntax::{MemberSyntaxFacts, SyntaxFacts, make, parse};
use tokio_util::sync::CancellationToken;

use crate::document::Document;
use crate::pipeline::{generate, get_snippet};
use crate::prop::PropSnippetProvider;
use crate::provider::SnippetProvider;

/// Must accept the construct the provider itself generates, once rendered and
/// re-parsed, and reject other member shapes.
///
/// - Enforced in: `PropSnippetProvider::container_predicate`
/// - Failure symptom: Caret and placeholders fall back to the end of the
///   insertion instead of landing on the property.
#[cfg_attr(test, tokio::test)]
pub(crate) async fn test_container_predicate_self_consistent() {
	let provider = PropSnippetProvider;
	let document = Document::new("");
	let cancel = CancellationToken::new();

	let edits = generate(&provider, &document, 0, &cancel).await.unwrap();
	let mut scratch = document.clone();
	scratch.apply(&edits).unwrap();

	let parsed = parse(&scratch.text().to_string());
	assert!(parsed.is_ok(), "{:?}", parsed.errors);
	let facts = MemberSyntaxFacts;
	let accepted = parsed
		.root
		.descendants(0)
		.into_iter()
		.filter(|(_, node)| provider.container_predicate(&facts, node))
		.count();
	assert_eq!(accepted, 1);

	let field = make::field(&["private"], "int", "count");
	assert!(!provider.container_predicate(&facts, &field));
	assert!(facts.is_field_declaration(&field));
}

/// Must return an empty result and leave the document untouched when
/// cancelled.
///
/// - Enforced in: `generate`
/// - Failure symptom: A cancelled snippet still inserts text.
#[cfg_attr(test, tokio::test)]
pub(crate) async fn test_cancellation_purity() {
	let document = Document::new("class C { }");
	let before = document.text().to_string();
	let cancel = CancellationToken::new();
	cancel.cancel();

	let change = get_snippet(&PropSnippetProvider, &document, 9, &cancel).await.unwrap();
	assert!(change.is_empty());
	assert_eq!(change.caret, None);
	assert_eq!(document.text().to_string(), before);
}

/// Must emit exactly one insertion at the requested position.
///
/// - Enforced in: `generate`
/// - Failure symptom: Snippet text lands away from the caret or replaces code.
#[cfg_attr(test, tokio::test)]
pub(crate) async fn test_single_insertion_at_position() {
	let document = Document::new("class C { }");
	let edits = generate(&PropSnippetProvider, &document, 9, &CancellationToken::new())
		.await
		.unwrap();
	let only: Vec<_> = edits.iter().collect();
	assert_eq!(only.len(), 1);
	assert_eq!(only[0].span.start, 9);
	assert!(only[0].span.is_empty());
}
