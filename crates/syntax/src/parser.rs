use quill_primitives::CharIdx;
use thiserror::Error;

use crate::kind::{ACCESSOR_KEYWORDS, MODIFIERS, PREDEFINED_TYPES, SyntaxKind, TYPE_KEYWORDS};
use crate::lexer::tokenize;
use crate::tree::{SyntaxElement, SyntaxNode, Token};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
	#[error("expected {expected} at {offset}, found {found:?}")]
	Expected {
		expected: &'static str,
		found: String,
		offset: CharIdx,
	},
	#[error("unexpected {found:?} at {offset}")]
	Unexpected { found: String, offset: CharIdx },
}

/// Result of parsing: a lossless tree plus any recovered errors.
#[derive(Debug, Clone)]
pub struct Parse {
	pub root: SyntaxNode,
	pub errors: Vec<ParseError>,
}

impl Parse {
	pub fn is_ok(&self) -> bool {
		self.errors.is_empty()
	}
}

/// Parses a compilation unit.
///
/// Parsing never fails outright; malformed input is wrapped in
/// [`SyntaxKind::Error`] nodes and reported in [`Parse::errors`].
pub fn parse(text: &str) -> Parse {
	let mut parser = Parser {
		tokens: tokenize(text),
		pos: 0,
		offset: 0,
		errors: Vec::new(),
	};
	let root = parser.compilation_unit();
	Parse {
		root,
		errors: parser.errors,
	}
}

struct Parser {
	tokens: Vec<Token>,
	pos: usize,
	/// Char offset of the start of the current token's leading trivia.
	offset: CharIdx,
	errors: Vec<ParseError>,
}

impl Parser {
	fn current(&self) -> &Token {
		// tokenize always ends with Eof, and bump never moves past it
		&self.tokens[self.pos.min(self.tokens.len() - 1)]
	}

	fn nth(&self, n: usize) -> &Token {
		&self.tokens[(self.pos + n).min(self.tokens.len() - 1)]
	}

	fn at(&self, kind: SyntaxKind) -> bool {
		self.current().kind == kind
	}

	fn at_keyword_in(&self, words: &[&str]) -> bool {
		let token = self.current();
		token.kind == SyntaxKind::Keyword && words.contains(&token.text.as_str())
	}

	fn text_offset(&self) -> CharIdx {
		self.offset + self.current().leading.chars().count()
	}

	fn bump(&mut self) -> SyntaxElement {
		let token = self.current().clone();
		if token.kind != SyntaxKind::Eof {
			self.offset += token.full_len();
			self.pos += 1;
		}
		SyntaxElement::Token(token)
	}

	fn expect(&mut self, kind: SyntaxKind, expected: &'static str, out: &mut Vec<SyntaxElement>) -> bool {
		if self.at(kind) {
			out.push(self.bump());
			true
		} else {
			self.errors.push(ParseError::Expected {
				expected,
				found: self.current().text.clone(),
				offset: self.text_offset(),
			});
			false
		}
	}

	fn error_node(&mut self) -> SyntaxElement {
		self.errors.push(ParseError::Unexpected {
			found: self.current().text.clone(),
			offset: self.text_offset(),
		});
		SyntaxElement::Node(SyntaxNode::new(SyntaxKind::Error, vec![self.bump()]))
	}

	fn compilation_unit(&mut self) -> SyntaxNode {
		let mut children = Vec::new();
		while !self.at(SyntaxKind::Eof) {
			children.push(self.item());
		}
		children.push(self.bump());
		SyntaxNode::new(SyntaxKind::CompilationUnit, children)
	}

	fn item(&mut self) -> SyntaxElement {
		let mut n = 0;
		while self.nth(n).kind == SyntaxKind::Keyword && MODIFIERS.contains(&self.nth(n).text.as_str()) {
			n += 1;
		}
		let head = self.nth(n);
		if head.kind == SyntaxKind::Keyword && TYPE_KEYWORDS.contains(&head.text.as_str()) {
			return SyntaxElement::Node(self.type_declaration());
		}
		if is_type_start(head) {
			return SyntaxElement::Node(self.member());
		}
		self.error_node()
	}

	fn modifiers(&mut self, out: &mut Vec<SyntaxElement>) {
		while self.at_keyword_in(MODIFIERS) {
			out.push(self.bump());
		}
	}

	fn type_declaration(&mut self) -> SyntaxNode {
		let mut children = Vec::new();
		self.modifiers(&mut children);
		children.push(self.bump());
		self.expect(SyntaxKind::Ident, "type name", &mut children);
		if self.expect(SyntaxKind::OpenBrace, "'{'", &mut children) {
			while !self.at(SyntaxKind::CloseBrace) && !self.at(SyntaxKind::Eof) {
				children.push(self.item());
			}
			self.expect(SyntaxKind::CloseBrace, "'}'", &mut children);
		}
		SyntaxNode::new(SyntaxKind::TypeDeclaration, children)
	}

	fn member(&mut self) -> SyntaxNode {
		let mut children = Vec::new();
		self.modifiers(&mut children);
		children.push(SyntaxElement::Node(self.type_ref()));
		self.expect(SyntaxKind::Ident, "member name", &mut children);

		let kind = if self.at(SyntaxKind::OpenBrace) {
			children.push(SyntaxElement::Node(self.accessor_list()));
			if self.at(SyntaxKind::Equals) {
				children.push(SyntaxElement::Node(self.initializer()));
				self.expect(SyntaxKind::Semicolon, "';'", &mut children);
			}
			SyntaxKind::PropertyDeclaration
		} else {
			if self.at(SyntaxKind::Equals) {
				children.push(SyntaxElement::Node(self.initializer()));
			}
			self.expect(SyntaxKind::Semicolon, "';'", &mut children);
			SyntaxKind::FieldDeclaration
		};
		SyntaxNode::new(kind, children)
	}

	fn type_ref(&mut self) -> SyntaxNode {
		let mut children = vec![self.bump()];
		while self.at(SyntaxKind::Dot) && self.nth(1).kind == SyntaxKind::Ident {
			children.push(self.bump());
			children.push(self.bump());
		}
		if self.at(SyntaxKind::Question) {
			children.push(self.bump());
		}
		SyntaxNode::new(SyntaxKind::TypeRef, children)
	}

	fn accessor_list(&mut self) -> SyntaxNode {
		let mut children = vec![self.bump()];
		while !self.at(SyntaxKind::CloseBrace) && !self.at(SyntaxKind::Eof) {
			if self.at_keyword_in(MODIFIERS) || self.at_keyword_in(ACCESSOR_KEYWORDS) {
				let mut accessor = Vec::new();
				self.modifiers(&mut accessor);
				if self.at_keyword_in(ACCESSOR_KEYWORDS) {
					accessor.push(self.bump());
				} else {
					self.expect(SyntaxKind::Keyword, "accessor", &mut accessor);
				}
				self.expect(SyntaxKind::Semicolon, "';'", &mut accessor);
				children.push(SyntaxElement::Node(SyntaxNode::new(SyntaxKind::AccessorDeclaration, accessor)));
			} else {
				children.push(self.error_node());
			}
		}
		self.expect(SyntaxKind::CloseBrace, "'}'", &mut children);
		SyntaxNode::new(SyntaxKind::AccessorList, children)
	}

	fn initializer(&mut self) -> SyntaxNode {
		let mut children = vec![self.bump()];
		while !matches!(
			self.current().kind,
			SyntaxKind::Semicolon | SyntaxKind::CloseBrace | SyntaxKind::Eof
		) {
			children.push(self.bump());
		}
		SyntaxNode::new(SyntaxKind::Initializer, children)
	}
}

fn is_type_start(token: &Token) -> bool {
	token.kind == SyntaxKind::Ident
		|| (token.kind == SyntaxKind::Keyword && PREDEFINED_TYPES.contains(&token.text.as_str()))
}
