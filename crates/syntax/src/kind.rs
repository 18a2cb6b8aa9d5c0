/// Kinds of tokens and nodes in the member-declaration language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
	// Tokens
	Ident,
	Keyword,
	Number,
	StringLit,
	OpenBrace,
	CloseBrace,
	OpenParen,
	CloseParen,
	Semicolon,
	Comma,
	Equals,
	Question,
	Dot,
	Unknown,
	Eof,

	// Nodes
	CompilationUnit,
	TypeDeclaration,
	PropertyDeclaration,
	FieldDeclaration,
	AccessorList,
	AccessorDeclaration,
	TypeRef,
	Initializer,
	Error,
}

impl SyntaxKind {
	/// True for kinds produced by the lexer rather than the parser.
	pub fn is_token(self) -> bool {
		(self as u8) <= (SyntaxKind::Eof as u8)
	}
}

pub(crate) const MODIFIERS: &[&str] = &[
	"public", "private", "protected", "internal", "static", "readonly", "virtual", "override", "abstract", "sealed",
	"required",
];

pub(crate) const TYPE_KEYWORDS: &[&str] = &["class", "struct", "interface"];

pub(crate) const ACCESSOR_KEYWORDS: &[&str] = &["get", "set", "init"];

pub(crate) const PREDEFINED_TYPES: &[&str] =
	&["int", "long", "short", "byte", "bool", "string", "char", "double", "float", "decimal", "object"];

pub(crate) fn is_keyword(word: &str) -> bool {
	MODIFIERS.contains(&word)
		|| TYPE_KEYWORDS.contains(&word)
		|| ACCESSOR_KEYWORDS.contains(&word)
		|| PREDEFINED_TYPES.contains(&word)
}
