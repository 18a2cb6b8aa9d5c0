use async_trait::async_trait;
use quill_primitives::{CharIdx, TextSpan};
use quill_syntax::{SyntaxElement, SyntaxFacts, SyntaxKind, SyntaxNode, make};
use tokio_util::sync::CancellationToken;

use crate::document::Document;
use crate::error::{Result, SnippetError};
use crate::provider::{SnippetPlaceholder, SnippetProvider};

const PROPERTY_TYPE: &str = "int";
const PROPERTY_NAME: &str = "MyProperty";

/// `prop`: an auto-implemented property with a getter and setter.
///
/// Members of an interface are implicitly public, so the `public` modifier is
/// omitted there.
#[derive(Debug, Default, Clone, Copy)]
pub struct PropSnippetProvider;

#[async_trait]
impl SnippetProvider for PropSnippetProvider {
	fn identifier(&self) -> &'static str {
		"prop"
	}

	fn description(&self) -> &'static str {
		"property"
	}

	async fn synthesize(&self, document: &Document, position: CharIdx, cancel: &CancellationToken) -> Result<SyntaxNode> {
		let parse = document.parse();
		if cancel.is_cancelled() {
			return Err(SnippetError::Cancelled);
		}

		let facts = document.syntax_facts();
		let in_interface = facts
			.containing_type(&parse.root, position)
			.is_some_and(|ty| facts.is_interface_declaration(ty));
		let modifiers: &[&str] = if in_interface { &[] } else { &["public"] };

		Ok(make::property(modifiers, PROPERTY_TYPE, PROPERTY_NAME, &["get", "set"]))
	}

	fn container_predicate(&self, facts: &dyn SyntaxFacts, node: &SyntaxNode) -> bool {
		facts.is_property_declaration(node)
	}

	fn placeholders(&self, node: &SyntaxNode, base: CharIdx) -> Vec<SnippetPlaceholder> {
		let mut out = Vec::new();
		let mut offset = base;
		for child in &node.children {
			match child {
				SyntaxElement::Node(ty) if ty.kind == SyntaxKind::TypeRef => {
					out.push(SnippetPlaceholder {
						text: ty.tokens().iter().map(|t| t.text.as_str()).collect(),
						spans: vec![ty.span(offset)],
					});
				}
				SyntaxElement::Token(name) if name.kind == SyntaxKind::Ident => {
					let start = offset + name.leading.chars().count();
					out.push(SnippetPlaceholder {
						text: name.text.clone(),
						spans: vec![TextSpan::new(start, name.text_len())],
					});
				}
				_ => {}
			}
			offset += child.full_len();
		}
		out
	}
}
