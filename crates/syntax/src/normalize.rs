use crate::kind::SyntaxKind;
use crate::tree::{SyntaxElement, SyntaxNode, Token};

/// Host whitespace conventions applied by [`SyntaxNode::normalize_whitespace`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
	pub indent: String,
	pub eol: String,
}

impl Default for NormalizeOptions {
	fn default() -> Self {
		Self {
			indent: "    ".into(),
			eol: "\n".into(),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sep {
	None,
	Space,
	Line(usize),
}

struct Layout {
	seps: Vec<Sep>,
	prev: Option<SyntaxKind>,
	forced: Option<Sep>,
}

impl Layout {
	fn push(&mut self, kind: SyntaxKind) {
		let sep = match (self.forced.take(), self.prev) {
			(_, None) => Sep::None,
			(_, Some(_)) if kind == SyntaxKind::Eof => Sep::None,
			(Some(sep), _) => sep,
			(None, Some(prev)) => default_sep(prev, kind),
		};
		self.seps.push(sep);
		self.prev = Some(kind);
	}

	fn node(&mut self, node: &SyntaxNode, depth: usize) {
		match node.kind {
			SyntaxKind::CompilationUnit => {
				for child in &node.children {
					self.forced = Some(Sep::Line(depth));
					self.element(child, depth);
				}
			}
			SyntaxKind::TypeDeclaration => {
				let mut in_body = false;
				for child in &node.children {
					match child {
						SyntaxElement::Token(token) if token.kind == SyntaxKind::OpenBrace => {
							self.forced = Some(Sep::Line(depth));
							self.push(token.kind);
							in_body = true;
						}
						SyntaxElement::Token(token) if token.kind == SyntaxKind::CloseBrace => {
							self.forced = Some(Sep::Line(depth));
							self.push(token.kind);
						}
						_ if in_body => {
							self.forced = Some(Sep::Line(depth + 1));
							self.element(child, depth + 1);
						}
						_ => self.element(child, depth),
					}
				}
			}
			_ => {
				for child in &node.children {
					self.element(child, depth);
				}
			}
		}
	}

	fn element(&mut self, element: &SyntaxElement, depth: usize) {
		match element {
			SyntaxElement::Node(node) => self.node(node, depth),
			SyntaxElement::Token(token) => self.push(token.kind),
		}
	}
}

fn default_sep(prev: SyntaxKind, next: SyntaxKind) -> Sep {
	use SyntaxKind::*;
	match (prev, next) {
		(OpenParen | Dot, _) => Sep::None,
		(_, Semicolon | Comma | CloseParen | Question | Dot) => Sep::None,
		_ => Sep::Space,
	}
}

impl SyntaxNode {
	/// Returns a copy with all trivia replaced by canonical spacing.
	///
	/// Members of a type body go on their own lines, indented one level per
	/// nesting depth; braces of a type declaration sit on their own lines; accessor
	/// lists stay on the member's line. Comments are dropped. The result has no
	/// leading or trailing whitespace.
	pub fn normalize_whitespace(&self, opts: &NormalizeOptions) -> SyntaxNode {
		let mut layout = Layout {
			seps: Vec::new(),
			prev: None,
			forced: None,
		};
		layout.node(self, 0);

		let mut out = self.clone();
		let mut seps = layout.seps.into_iter();
		out.for_each_token_mut(&mut |token| {
			token.trailing.clear();
			token.leading = match seps.next().unwrap_or(Sep::None) {
				Sep::None => String::new(),
				Sep::Space => " ".into(),
				Sep::Line(depth) => format!("{}{}", opts.eol, opts.indent.repeat(depth)),
			};
		});
		out
	}

	fn for_each_token_mut(&mut self, f: &mut impl FnMut(&mut Token)) {
		for child in &mut self.children {
			match child {
				SyntaxElement::Node(node) => node.for_each_token_mut(f),
				SyntaxElement::Token(token) => f(token),
			}
		}
	}
}
