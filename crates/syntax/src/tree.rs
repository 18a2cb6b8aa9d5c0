use quill_primitives::{CharIdx, CharLen, TextSpan};

use crate::kind::SyntaxKind;

/// A lexed token with the trivia (whitespace and comments) around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
	pub kind: SyntaxKind,
	pub text: String,
	pub leading: String,
	pub trailing: String,
}

impl Token {
	pub fn new(kind: SyntaxKind, text: impl Into<String>) -> Self {
		Self {
			kind,
			text: text.into(),
			leading: String::new(),
			trailing: String::new(),
		}
	}

	/// Length of the token text alone.
	pub fn text_len(&self) -> CharLen {
		self.text.chars().count()
	}

	/// Length including leading and trailing trivia.
	pub fn full_len(&self) -> CharLen {
		self.leading.chars().count() + self.text_len() + self.trailing.chars().count()
	}

	pub fn is_keyword(&self, word: &str) -> bool {
		self.kind == SyntaxKind::Keyword && self.text == word
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxElement {
	Node(SyntaxNode),
	Token(Token),
}

impl SyntaxElement {
	pub fn full_len(&self) -> CharLen {
		match self {
			SyntaxElement::Node(node) => node.full_len(),
			SyntaxElement::Token(token) => token.full_len(),
		}
	}
}

/// An interior node. Children are kept in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
	pub kind: SyntaxKind,
	pub children: Vec<SyntaxElement>,
}

impl SyntaxNode {
	pub fn new(kind: SyntaxKind, children: Vec<SyntaxElement>) -> Self {
		Self { kind, children }
	}

	/// Source text including all trivia.
	pub fn full_text(&self) -> String {
		let mut out = String::new();
		self.write_full_text(&mut out);
		out
	}

	fn write_full_text(&self, out: &mut String) {
		for child in &self.children {
			match child {
				SyntaxElement::Node(node) => node.write_full_text(out),
				SyntaxElement::Token(token) => {
					out.push_str(&token.leading);
					out.push_str(&token.text);
					out.push_str(&token.trailing);
				}
			}
		}
	}

	pub fn full_len(&self) -> CharLen {
		self.children.iter().map(SyntaxElement::full_len).sum()
	}

	pub fn child_nodes(&self) -> impl Iterator<Item = &SyntaxNode> {
		self.children.iter().filter_map(|child| match child {
			SyntaxElement::Node(node) => Some(node),
			SyntaxElement::Token(_) => None,
		})
	}

	pub fn child_tokens(&self) -> impl Iterator<Item = &Token> {
		self.children.iter().filter_map(|child| match child {
			SyntaxElement::Token(token) => Some(token),
			SyntaxElement::Node(_) => None,
		})
	}

	pub fn child_node(&self, kind: SyntaxKind) -> Option<&SyntaxNode> {
		self.child_nodes().find(|node| node.kind == kind)
	}

	/// All tokens beneath this node in source order.
	pub fn tokens(&self) -> Vec<&Token> {
		let mut out = Vec::new();
		self.collect_tokens(&mut out);
		out
	}

	fn collect_tokens<'a>(&'a self, out: &mut Vec<&'a Token>) {
		for child in &self.children {
			match child {
				SyntaxElement::Node(node) => node.collect_tokens(out),
				SyntaxElement::Token(token) => out.push(token),
			}
		}
	}

	/// Pre-order walk yielding every node with its full span, for a tree rooted at
	/// `base`.
	pub fn descendants(&self, base: CharIdx) -> Vec<(TextSpan, &SyntaxNode)> {
		let mut out = Vec::new();
		self.collect_descendants(base, &mut out);
		out
	}

	fn collect_descendants<'a>(&'a self, base: CharIdx, out: &mut Vec<(TextSpan, &'a SyntaxNode)>) {
		out.push((TextSpan::new(base, self.full_len()), self));
		let mut offset = base;
		for child in &self.children {
			if let SyntaxElement::Node(node) = child {
				node.collect_descendants(offset, out);
			}
			offset += child.full_len();
		}
	}

	/// Every token with the span of its text (trivia excluded).
	pub fn token_spans(&self, base: CharIdx) -> Vec<(TextSpan, &Token)> {
		let mut offset = base;
		self.tokens()
			.into_iter()
			.map(|token| {
				let start = offset + token.leading.chars().count();
				offset += token.full_len();
				(TextSpan::new(start, token.text_len()), token)
			})
			.collect()
	}

	/// Span of this node's text with the outer trivia trimmed.
	pub fn span(&self, base: CharIdx) -> TextSpan {
		let spans = self.token_spans(base);
		match (spans.first(), spans.last()) {
			(Some((first, _)), Some((last, _))) => TextSpan::from_bounds(first.start, last.end()),
			_ => TextSpan::empty(base),
		}
	}

	/// First identifier token directly owned by this node.
	pub fn identifier(&self) -> Option<&Token> {
		self.child_tokens().find(|token| token.kind == SyntaxKind::Ident)
	}

	/// Innermost-last chain of nodes whose text span covers `pos`.
	///
	/// A position at a node's end boundary counts as inside it.
	pub fn ancestors_at(&self, pos: CharIdx) -> Vec<(TextSpan, &SyntaxNode)> {
		self.descendants(0)
			.into_iter()
			.filter(|(full, node)| {
				let span = node.span(full.start);
				span.start <= pos && pos <= span.end()
			})
			.collect()
	}
}
