//! Syntax trees for a small member-declaration language.
//!
//! The language covers what snippet generation needs to reason about: type
//! declarations (`class`, `struct`, `interface`) holding property and field
//! members. Trees are lossless: every token keeps its leading and trailing
//! trivia, so [`SyntaxNode::full_text`] reproduces the parsed input exactly.

mod facts;
mod kind;
mod lexer;
pub mod make;
mod normalize;
mod parser;
mod tree;

pub use facts::{MemberSyntaxFacts, SyntaxFacts};
pub use kind::SyntaxKind;
pub use lexer::tokenize;
pub use normalize::NormalizeOptions;
pub use parser::{Parse, ParseError, parse};
pub use tree::{SyntaxElement, SyntaxNode, Token};
