use crate::kind::{SyntaxKind, is_keyword};
use crate::tree::Token;

/// Splits `text` into tokens, attaching trivia.
///
/// Trailing trivia runs to the end of the line (spaces, tabs, a `//` comment and
/// the newline); everything else before a token is leading trivia. The stream
/// always ends with an [`SyntaxKind::Eof`] token carrying any final trivia, so
/// concatenating every token's full text reproduces `text`.
pub fn tokenize(text: &str) -> Vec<Token> {
	let chars: Vec<char> = text.chars().collect();
	let mut pos = 0;
	let mut tokens = Vec::new();

	loop {
		let leading = take_leading(&chars, &mut pos);
		if pos >= chars.len() {
			let mut eof = Token::new(SyntaxKind::Eof, "");
			eof.leading = leading;
			tokens.push(eof);
			return tokens;
		}

		let (kind, text) = lex_one(&chars, &mut pos);
		let mut token = Token::new(kind, text);
		token.leading = leading;
		token.trailing = take_trailing(&chars, &mut pos);
		tokens.push(token);
	}
}

fn take_leading(chars: &[char], pos: &mut usize) -> String {
	let start = *pos;
	loop {
		match chars.get(*pos) {
			Some(c) if c.is_whitespace() => *pos += 1,
			Some('/') if chars.get(*pos + 1) == Some(&'/') => skip_line_comment(chars, pos),
			_ => break,
		}
	}
	chars[start..*pos].iter().collect()
}

fn take_trailing(chars: &[char], pos: &mut usize) -> String {
	let start = *pos;
	while matches!(chars.get(*pos), Some(' ' | '\t')) {
		*pos += 1;
	}
	if chars.get(*pos) == Some(&'/') && chars.get(*pos + 1) == Some(&'/') {
		skip_line_comment(chars, pos);
	}
	if chars.get(*pos) == Some(&'\r') && chars.get(*pos + 1) == Some(&'\n') {
		*pos += 2;
	} else if chars.get(*pos) == Some(&'\n') {
		*pos += 1;
	}
	chars[start..*pos].iter().collect()
}

fn skip_line_comment(chars: &[char], pos: &mut usize) {
	while let Some(c) = chars.get(*pos) {
		if *c == '\n' || *c == '\r' {
			break;
		}
		*pos += 1;
	}
}

fn lex_one(chars: &[char], pos: &mut usize) -> (SyntaxKind, String) {
	let start = *pos;
	let c = chars[start];
	*pos += 1;

	let kind = match c {
		'{' => SyntaxKind::OpenBrace,
		'}' => SyntaxKind::CloseBrace,
		'(' => SyntaxKind::OpenParen,
		')' => SyntaxKind::CloseParen,
		';' => SyntaxKind::Semicolon,
		',' => SyntaxKind::Comma,
		'=' => SyntaxKind::Equals,
		'?' => SyntaxKind::Question,
		'.' => SyntaxKind::Dot,
		'"' => {
			while let Some(&next) = chars.get(*pos) {
				*pos += 1;
				if next == '"' {
					break;
				}
				if next == '\\' {
					*pos += 1;
				}
			}
			*pos = (*pos).min(chars.len());
			SyntaxKind::StringLit
		}
		c if c.is_ascii_digit() => {
			while chars.get(*pos).is_some_and(|c| c.is_ascii_alphanumeric() || *c == '.') {
				*pos += 1;
			}
			SyntaxKind::Number
		}
		c if c == '_' || c.is_alphabetic() => {
			while chars.get(*pos).is_some_and(|c| *c == '_' || c.is_alphanumeric()) {
				*pos += 1;
			}
			let word: String = chars[start..*pos].iter().collect();
			return if is_keyword(&word) {
				(SyntaxKind::Keyword, word)
			} else {
				(SyntaxKind::Ident, word)
			};
		}
		_ => SyntaxKind::Unknown,
	};

	(kind, chars[start..*pos].iter().collect())
}
