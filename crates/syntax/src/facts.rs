use quill_primitives::CharIdx;

use crate::kind::SyntaxKind;
use crate::tree::SyntaxNode;

/// Language-specific predicates over syntax nodes.
///
/// Snippet providers ask these questions instead of matching node kinds
/// directly, so one provider can serve every language that supplies facts.
pub trait SyntaxFacts: Send + Sync {
	fn is_property_declaration(&self, node: &SyntaxNode) -> bool;
	fn is_field_declaration(&self, node: &SyntaxNode) -> bool;
	fn is_type_declaration(&self, node: &SyntaxNode) -> bool;

	/// True when `node` declares an interface.
	fn is_interface_declaration(&self, node: &SyntaxNode) -> bool;

	/// True when `pos` lies between the braces of a type declaration in `root`
	/// (or at the top level, which accepts members directly), outside any
	/// comment.
	fn is_member_context(&self, root: &SyntaxNode, pos: CharIdx) -> bool;

	/// The innermost type declaration whose body contains `pos`.
	fn containing_type<'a>(&self, root: &'a SyntaxNode, pos: CharIdx) -> Option<&'a SyntaxNode>;
}

/// [`SyntaxFacts`] for the member-declaration language parsed by this crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct MemberSyntaxFacts;

impl MemberSyntaxFacts {
	/// Body span of a type declaration: just after `{` up to the start of `}`.
	fn body_bounds(node: &SyntaxNode, base: CharIdx) -> Option<(CharIdx, CharIdx)> {
		let spans = node.token_spans(base);
		let open = spans.iter().find(|(_, t)| t.kind == SyntaxKind::OpenBrace)?.0;
		let close = spans
			.iter()
			.rev()
			.find(|(_, t)| t.kind == SyntaxKind::CloseBrace)
			.map(|(span, _)| span.start)
			.unwrap_or_else(|| base + node.full_len());
		Some((open.end(), close))
	}

	/// True if `pos` is inside a member that is itself not a type declaration.
	fn inside_member(root: &SyntaxNode, pos: CharIdx) -> bool {
		root.descendants(0).into_iter().any(|(full, node)| {
			matches!(
				node.kind,
				SyntaxKind::PropertyDeclaration | SyntaxKind::FieldDeclaration | SyntaxKind::Error
			) && {
				let span = node.span(full.start);
				span.start < pos && pos < span.end()
			}
		})
	}

	/// True if `pos` lies inside a `//` comment: after its first slash and no
	/// later than the end of its line.
	fn inside_comment(root: &SyntaxNode, pos: CharIdx) -> bool {
		let mut offset = 0;
		for token in root.tokens() {
			let trailing_start = offset + token.leading.chars().count() + token.text_len();
			if comment_covers(&token.leading, offset, pos) || comment_covers(&token.trailing, trailing_start, pos) {
				return true;
			}
			offset += token.full_len();
		}
		false
	}
}

fn comment_covers(trivia: &str, base: CharIdx, pos: CharIdx) -> bool {
	let chars: Vec<char> = trivia.chars().collect();
	let mut i = 0;
	while i + 1 < chars.len() {
		if chars[i] == '/' && chars[i + 1] == '/' {
			let end = chars[i..].iter().position(|&c| c == '\n').map_or(chars.len(), |n| i + n);
			if base + i < pos && pos <= base + end {
				return true;
			}
			i = end;
		} else {
			i += 1;
		}
	}
	false
}

impl SyntaxFacts for MemberSyntaxFacts {
	fn is_property_declaration(&self, node: &SyntaxNode) -> bool {
		node.kind == SyntaxKind::PropertyDeclaration
	}

	fn is_field_declaration(&self, node: &SyntaxNode) -> bool {
		node.kind == SyntaxKind::FieldDeclaration
	}

	fn is_type_declaration(&self, node: &SyntaxNode) -> bool {
		node.kind == SyntaxKind::TypeDeclaration
	}

	fn is_interface_declaration(&self, node: &SyntaxNode) -> bool {
		node.kind == SyntaxKind::TypeDeclaration && node.child_tokens().any(|t| t.is_keyword("interface"))
	}

	fn is_member_context(&self, root: &SyntaxNode, pos: CharIdx) -> bool {
		if pos > root.full_len() || Self::inside_member(root, pos) || Self::inside_comment(root, pos) {
			return false;
		}
		let in_type_header = root.descendants(0).into_iter().any(|(full, node)| {
			node.kind == SyntaxKind::TypeDeclaration && {
				let span = node.span(full.start);
				let body_start = Self::body_bounds(node, full.start).map_or(span.end(), |(start, _)| start);
				span.start < pos && pos < body_start
			}
		});
		!in_type_header
	}

	fn containing_type<'a>(&self, root: &'a SyntaxNode, pos: CharIdx) -> Option<&'a SyntaxNode> {
		root.descendants(0)
			.into_iter()
			.filter(|(full, node)| {
				node.kind == SyntaxKind::TypeDeclaration
					&& Self::body_bounds(node, full.start).is_some_and(|(start, end)| start <= pos && pos <= end)
			})
			.last()
			.map(|(_, node)| node)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::parse;

	fn first(root: &SyntaxNode, kind: SyntaxKind) -> SyntaxNode {
		root.descendants(0)
			.into_iter()
			.find(|(_, n)| n.kind == kind)
			.map(|(_, n)| n.clone())
			.unwrap()
	}

	#[test]
	fn distinguishes_properties_from_fields() {
		let root = parse("int A { get; } int b;").root;
		let facts = MemberSyntaxFacts;
		let prop = first(&root, SyntaxKind::PropertyDeclaration);
		let field = first(&root, SyntaxKind::FieldDeclaration);
		assert!(facts.is_property_declaration(&prop));
		assert!(!facts.is_property_declaration(&field));
		assert!(facts.is_field_declaration(&field));
	}

	#[test]
	fn finds_innermost_containing_type() {
		let src = "class Outer { interface Inner { } }";
		let root = parse(src).root;
		let facts = MemberSyntaxFacts;
		let inner_pos = src.find("{ }").unwrap() + 1;
		let ty = facts.containing_type(&root, inner_pos).unwrap();
		assert!(facts.is_interface_declaration(ty));

		let outer_pos = src.find('{').unwrap() + 1;
		let ty = facts.containing_type(&root, outer_pos).unwrap();
		assert!(!facts.is_interface_declaration(ty));
		assert!(facts.containing_type(&root, 0).is_none());
	}

	#[test]
	fn member_context_excludes_headers_and_member_interiors() {
		let src = "class C { int x; }";
		let root = parse(src).root;
		let facts = MemberSyntaxFacts;
		assert!(facts.is_member_context(&root, 0));
		assert!(!facts.is_member_context(&root, 3), "inside class header");
		assert!(facts.is_member_context(&root, 9), "start of body");
		assert!(!facts.is_member_context(&root, 13), "inside field");
		assert!(facts.is_member_context(&root, 16), "after field");
		assert!(facts.is_member_context(&root, src.len()));
	}

	#[test]
	fn member_context_excludes_comments() {
		let src = "class C {\n    // note\n    int x;\n} // tail";
		let root = parse(src).root;
		let facts = MemberSyntaxFacts;
		let comment = src.find("// note").unwrap();
		assert!(facts.is_member_context(&root, comment), "before the slashes");
		assert!(!facts.is_member_context(&root, comment + 2), "inside comment");
		assert!(!facts.is_member_context(&root, comment + 7), "end of comment line");
		assert!(facts.is_member_context(&root, comment + 8), "next line");
		assert!(!facts.is_member_context(&root, src.len()), "trailing comment at end of input");
	}
}
