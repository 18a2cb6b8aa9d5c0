//! Constructors for synthesized nodes.
//!
//! Nodes built here carry no trivia; callers normalize them with
//! [`SyntaxNode::normalize_whitespace`] before rendering.

use smallvec::SmallVec;

use crate::kind::{SyntaxKind, is_keyword};
use crate::tree::{SyntaxElement, SyntaxNode, Token};

fn word(text: &str) -> SyntaxElement {
	let kind = if is_keyword(text) {
		SyntaxKind::Keyword
	} else {
		SyntaxKind::Ident
	};
	SyntaxElement::Token(Token::new(kind, text))
}

fn punct(kind: SyntaxKind, text: &str) -> SyntaxElement {
	SyntaxElement::Token(Token::new(kind, text))
}

/// A type reference such as `int` or `string?`.
pub fn type_ref(name: &str) -> SyntaxNode {
	let (base, nullable) = match name.strip_suffix('?') {
		Some(base) => (base, true),
		None => (name, false),
	};
	let mut children = Vec::new();
	for (i, segment) in base.split('.').enumerate() {
		if i > 0 {
			children.push(punct(SyntaxKind::Dot, "."));
		}
		children.push(word(segment));
	}
	if nullable {
		children.push(punct(SyntaxKind::Question, "?"));
	}
	SyntaxNode::new(SyntaxKind::TypeRef, children)
}

/// An accessor list with bodiless accessors, e.g. `{ get; set; }`.
pub fn accessor_list(accessors: &[&str]) -> SyntaxNode {
	let mut children = vec![punct(SyntaxKind::OpenBrace, "{")];
	for accessor in accessors {
		let mut parts: SmallVec<[SyntaxElement; 3]> = accessor.split_whitespace().map(word).collect();
		parts.push(punct(SyntaxKind::Semicolon, ";"));
		children.push(SyntaxElement::Node(SyntaxNode::new(
			SyntaxKind::AccessorDeclaration,
			parts.into_vec(),
		)));
	}
	children.push(punct(SyntaxKind::CloseBrace, "}"));
	SyntaxNode::new(SyntaxKind::AccessorList, children)
}

/// An auto-property declaration.
pub fn property(modifiers: &[&str], ty: &str, name: &str, accessors: &[&str]) -> SyntaxNode {
	let mut children: Vec<SyntaxElement> = modifiers.iter().copied().map(word).collect();
	children.push(SyntaxElement::Node(type_ref(ty)));
	children.push(SyntaxElement::Token(Token::new(SyntaxKind::Ident, name)));
	children.push(SyntaxElement::Node(accessor_list(accessors)));
	SyntaxNode::new(SyntaxKind::PropertyDeclaration, children)
}

/// A field declaration without initializer.
pub fn field(modifiers: &[&str], ty: &str, name: &str) -> SyntaxNode {
	let mut children: Vec<SyntaxElement> = modifiers.iter().copied().map(word).collect();
	children.push(SyntaxElement::Node(type_ref(ty)));
	children.push(SyntaxElement::Token(Token::new(SyntaxKind::Ident, name)));
	children.push(punct(SyntaxKind::Semicolon, ";"));
	SyntaxNode::new(SyntaxKind::FieldDeclaration, children)
}
