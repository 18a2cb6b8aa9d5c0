use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use quill_syntax::{MemberSyntaxFacts, SyntaxFacts, SyntaxKind, SyntaxNode, make, parse};

use super::*;
use crate::{PropSnippetProvider, SnippetRegistry};

const PROP_TEXT: &str = "public int MyProperty { get; set; }";

/// Never finishes synthesizing unless cancelled.
struct StalledProvider {
	started: Arc<AtomicUsize>,
}

#[async_trait]
impl SnippetProvider for StalledProvider {
	fn identifier(&self) -> &'static str {
		"stalled"
	}

	fn description(&self) -> &'static str {
		"never completes"
	}

	async fn synthesize(&self, _: &Document, _: CharIdx, _: &CancellationToken) -> Result<SyntaxNode> {
		self.started.fetch_add(1, Ordering::SeqCst);
		std::future::pending().await
	}

	fn container_predicate(&self, _: &dyn SyntaxFacts, _: &SyntaxNode) -> bool {
		false
	}
}

struct FailingProvider;

#[async_trait]
impl SnippetProvider for FailingProvider {
	fn identifier(&self) -> &'static str {
		"failing"
	}

	fn description(&self) -> &'static str {
		"always fails"
	}

	async fn synthesize(&self, _: &Document, _: CharIdx, _: &CancellationToken) -> Result<SyntaxNode> {
		Err(SnippetError::Synthesis {
			identifier: "failing",
			reason: "no type information".into(),
		})
	}

	fn container_predicate(&self, facts: &dyn SyntaxFacts, node: &SyntaxNode) -> bool {
		facts.is_field_declaration(node)
	}
}

/// Reports cancellation itself instead of being raced out.
struct CooperativeProvider;

#[async_trait]
impl SnippetProvider for CooperativeProvider {
	fn identifier(&self) -> &'static str {
		"cooperative"
	}

	fn description(&self) -> &'static str {
		"checks the token"
	}

	async fn synthesize(&self, _: &Document, _: CharIdx, cancel: &CancellationToken) -> Result<SyntaxNode> {
		cancel.cancel();
		Err(SnippetError::Cancelled)
	}

	fn container_predicate(&self, facts: &dyn SyntaxFacts, node: &SyntaxNode) -> bool {
		facts.is_field_declaration(node)
	}
}

#[tokio::test]
async fn prop_in_empty_document_is_one_insertion() {
	let doc = Document::new("");
	let edits = generate(&PropSnippetProvider, &doc, 0, &CancellationToken::new()).await.unwrap();

	assert_eq!(edits.len(), 1);
	let edit = &edits.as_slice()[0];
	assert_eq!(edit.span, TextSpan::empty(0));
	assert_eq!(edit.replacement, PROP_TEXT);
}

#[tokio::test]
async fn inserted_text_satisfies_container_predicate() {
	let doc = Document::new("");
	let edits = generate(&PropSnippetProvider, &doc, 0, &CancellationToken::new()).await.unwrap();
	let parsed = parse(&edits.as_slice()[0].replacement);
	assert!(parsed.is_ok(), "{:?}", parsed.errors);

	let facts = MemberSyntaxFacts;
	let node = parsed.root.child_nodes().next().unwrap();
	assert!(PropSnippetProvider.container_predicate(&facts, node));

	let field = make::field(&["private"], "int", "_value");
	assert!(!PropSnippetProvider.container_predicate(&facts, &field));
}

#[tokio::test]
async fn insertion_lands_at_requested_position() {
	let src = "class C\n{\n    \n}";
	let mut doc = Document::new(src);
	let position = src.find("    ").unwrap() + 4;
	let edits = generate(&PropSnippetProvider, &doc, position, &CancellationToken::new()).await.unwrap();
	doc.apply(&edits).unwrap();
	assert_eq!(doc.text().to_string(), format!("class C\n{{\n    {PROP_TEXT}\n}}"));
	assert!(doc.parse().is_ok());
}

#[tokio::test]
async fn interface_members_omit_public() {
	let src = "interface IShape {  }";
	let doc = Document::new(src);
	let position = src.find('{').unwrap() + 2;
	let edits = generate(&PropSnippetProvider, &doc, position, &CancellationToken::new()).await.unwrap();
	assert_eq!(edits.as_slice()[0].replacement, "int MyProperty { get; set; }");
}

#[tokio::test]
async fn cancelled_before_start_yields_nothing() {
	let doc = Document::new("class C { }");
	let before = doc.text().to_string();
	let cancel = CancellationToken::new();
	cancel.cancel();

	let edits = generate(&PropSnippetProvider, &doc, 9, &cancel).await.unwrap();
	assert!(edits.is_empty());
	assert_eq!(doc.text().to_string(), before);
}

#[tokio::test]
async fn cancelled_mid_synthesis_yields_nothing() {
	let started = Arc::new(AtomicUsize::new(0));
	let provider = StalledProvider {
		started: started.clone(),
	};
	let doc = Document::new("class C { }");
	let before = doc.text().to_string();
	let cancel = CancellationToken::new();

	let trigger = cancel.clone();
	tokio::spawn(async move {
		tokio::task::yield_now().await;
		trigger.cancel();
	});

	let edits = generate(&provider, &doc, 9, &cancel).await.unwrap();
	assert!(edits.is_empty());
	assert_eq!(started.load(Ordering::SeqCst), 1, "synthesis had begun");
	assert_eq!(doc.text().to_string(), before);
}

#[tokio::test]
async fn provider_reported_cancellation_is_not_an_error() {
	let doc = Document::new("");
	let change = get_snippet(&CooperativeProvider, &doc, 0, &CancellationToken::new()).await.unwrap();
	assert!(change.is_empty());
	assert_eq!(change.caret, None);
}

#[tokio::test]
async fn synthesis_failure_surfaces_without_edits() {
	let doc = Document::new("");
	let err = generate(&FailingProvider, &doc, 0, &CancellationToken::new()).await.unwrap_err();
	assert!(matches!(err, SnippetError::Synthesis { identifier: "failing", .. }));
}

#[tokio::test]
async fn position_past_end_is_rejected() {
	let doc = Document::new("abc");
	let err = generate(&PropSnippetProvider, &doc, 4, &CancellationToken::new()).await.unwrap_err();
	assert!(matches!(err, SnippetError::PositionOutOfBounds { position: 4, len: 3 }));
}

#[tokio::test]
async fn snippet_change_reports_caret_and_placeholders() {
	let src = "class C\n{\n    \n}";
	let doc = Document::new(src);
	let position = src.find("    ").unwrap() + 4;
	let change = get_snippet(&PropSnippetProvider, &doc, position, &CancellationToken::new()).await.unwrap();

	assert_eq!(change.caret, Some(position + PROP_TEXT.len()));
	assert_eq!(change.placeholders, vec![
		SnippetPlaceholder {
			text: "int".into(),
			spans: vec![TextSpan::new(position + 7, 3)],
		},
		SnippetPlaceholder {
			text: "MyProperty".into(),
			spans: vec![TextSpan::new(position + 11, 10)],
		},
	]);
}

#[tokio::test]
async fn unrecognized_insertion_falls_back_to_end_caret() {
	struct Mislabelled;

	#[async_trait]
	impl SnippetProvider for Mislabelled {
		fn identifier(&self) -> &'static str {
			"mislabelled"
		}

		fn description(&self) -> &'static str {
			"predicate disagrees with output"
		}

		async fn synthesize(&self, _: &Document, _: CharIdx, _: &CancellationToken) -> Result<SyntaxNode> {
			Ok(make::field(&[], "int", "x"))
		}

		fn container_predicate(&self, facts: &dyn SyntaxFacts, node: &SyntaxNode) -> bool {
			facts.is_property_declaration(node)
		}
	}

	let doc = Document::new("");
	let change = get_snippet(&Mislabelled, &doc, 0, &CancellationToken::new()).await.unwrap();
	assert_eq!(change.edits.len(), 1);
	assert_eq!(change.caret, Some("int x;".len()));
	assert!(change.placeholders.is_empty());
}

#[tokio::test]
async fn registry_filters_by_location_and_name() {
	let registry = SnippetRegistry::with_builtins();
	let src = "class C { }";
	let doc = Document::new(src);

	let ids = |pos| {
		registry
			.available_at(&doc, pos)
			.into_iter()
			.map(|p| p.identifier())
			.collect::<Vec<_>>()
	};
	assert_eq!(ids(9), vec!["prop"]);
	assert!(ids(3).is_empty(), "class header is not a member context");

	let change = registry.snippet("prop", &doc, 9, &CancellationToken::new()).await.unwrap();
	assert_eq!(change.edits.len(), 1);

	let err = registry.snippet("ctor", &doc, 9, &CancellationToken::new()).await.unwrap_err();
	assert!(matches!(err, SnippetError::UnknownSnippet(name) if name == "ctor"));
}

#[test]
fn registry_replaces_same_identifier() {
	let mut registry = SnippetRegistry::with_builtins();
	registry.register(Arc::new(PropSnippetProvider));
	assert_eq!(registry.available_at(&Document::new(""), 0).len(), 1);
	assert!(registry.get("prop").is_some());
	assert_eq!(SyntaxKind::PropertyDeclaration, make::property(&[], "int", "P", &["get"]).kind);
}

#[test]
fn registry_offers_nothing_inside_comments() {
	let registry = SnippetRegistry::with_builtins();
	let src = "class C {\n    // fields\n} // note";
	let doc = Document::new(src);
	let offered = |pos| registry.available_at(&doc, pos).len();

	assert_eq!(offered(src.len()), 0, "end of trailing comment");
	assert_eq!(offered(src.find("fields").unwrap()), 0, "inside body comment");
	assert_eq!(offered(src.find("// fields").unwrap()), 1, "before the slashes");
}
