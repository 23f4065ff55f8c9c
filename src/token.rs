// src/token.rs

//! Token kinds and the `Token` value produced by the scanner.

use serde::{Serialize, Serializer};
use std::fmt;

/// The closed set of token kinds.
///
/// The display names returned by [`TokenKind::name`] are stable and meant to
/// be matched on by consumers (the CLI prints them verbatim).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `;`
    Semicolon,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Multiply,
    /// `=`
    Equal,
    /// `"`
    DQuote,
    /// `'`
    SQuote,
    /// A maximal run of ASCII letters.
    Text,
    /// A maximal run of ASCII digits.
    Number,
    /// End of input. Returned forever once reached.
    Eof,
    /// A rune that fits no other class.
    Illegal,
}

impl TokenKind {
    /// Every kind, in declaration order.
    pub const ALL: [TokenKind; 11] = [
        TokenKind::Semicolon,
        TokenKind::Plus,
        TokenKind::Minus,
        TokenKind::Multiply,
        TokenKind::Equal,
        TokenKind::DQuote,
        TokenKind::SQuote,
        TokenKind::Text,
        TokenKind::Number,
        TokenKind::Eof,
        TokenKind::Illegal,
    ];

    /// Stable upper-case name of the kind.
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Multiply => "MULTIPLY",
            TokenKind::Equal => "EQUAL",
            TokenKind::DQuote => "DQUOTE",
            TokenKind::SQuote => "SQUOTE",
            TokenKind::Text => "TEXT",
            TokenKind::Number => "NUMBER",
            TokenKind::Eof => "EOF",
            TokenKind::Illegal => "ILLEGAL",
        }
    }

    /// Maps one of the seven single-character symbols to its kind.
    pub fn from_punctuation(c: char) -> Option<TokenKind> {
        match c {
            ';' => Some(TokenKind::Semicolon),
            '+' => Some(TokenKind::Plus),
            '-' => Some(TokenKind::Minus),
            '*' => Some(TokenKind::Multiply),
            '=' => Some(TokenKind::Equal),
            '"' => Some(TokenKind::DQuote),
            '\'' => Some(TokenKind::SQuote),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for TokenKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// A classified lexeme.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Token {
    kind: TokenKind,
    lexeme: String,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
        }
    }

    pub fn eof() -> Self {
        Token::new(TokenKind::Eof, String::new())
    }

    pub fn illegal() -> Self {
        Token::new(TokenKind::Illegal, String::new())
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The exact input text of the token. Empty for `EOF` and `ILLEGAL`.
    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.kind, self.lexeme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test_log::test]
    fn names_are_unique() {
        let names: HashSet<&str> = TokenKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(names.len(), TokenKind::ALL.len());
    }

    #[test_log::test]
    fn punctuation_lookup_covers_all_seven_symbols() {
        let expected = [
            (';', TokenKind::Semicolon),
            ('+', TokenKind::Plus),
            ('-', TokenKind::Minus),
            ('*', TokenKind::Multiply),
            ('=', TokenKind::Equal),
            ('"', TokenKind::DQuote),
            ('\'', TokenKind::SQuote),
        ];
        for (c, kind) in expected {
            assert_eq!(TokenKind::from_punctuation(c), Some(kind), "symbol {:?}", c);
        }
        assert_eq!(TokenKind::from_punctuation('/'), None);
        assert_eq!(TokenKind::from_punctuation('a'), None);
    }

    #[test_log::test]
    fn display_formats() {
        assert_eq!(TokenKind::DQuote.to_string(), "DQUOTE");
        assert_eq!(Token::new(TokenKind::Text, "var").to_string(), "TEXT(\"var\")");
        assert_eq!(Token::eof().to_string(), "EOF(\"\")");
    }

    #[test_log::test]
    fn serializes_kind_as_stable_name() {
        let json = serde_json::to_string(&Token::new(TokenKind::Number, "23")).unwrap();
        assert_eq!(json, r#"{"kind":"NUMBER","lexeme":"23"}"#);
    }
}
