// src/scanner/mod.rs

//! The scanner: turns a character stream into [`Token`]s one call at a time.
//!
//! Whitespace is skipped, digits and letters are consumed as maximal runs,
//! the seven punctuation symbols become single-character tokens, and every
//! other rune is reported as `ILLEGAL`. Scanning never fails; once the source
//! runs dry every further call returns `EOF`.

use crate::source::ReaderSource;
use crate::token::{Token, TokenKind};
use log::{debug, trace};
use std::io::Read;
use std::iter::Fuse;

/// Classification of the rune that starts a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuneClass {
    Digit(char),
    Letter(char),
    Punctuation(TokenKind, char),
    Exhausted,
    Other(char),
}

impl RuneClass {
    fn of(rune: Option<char>) -> Self {
        match rune {
            None => RuneClass::Exhausted,
            Some(c) if is_digit(c) => RuneClass::Digit(c),
            Some(c) if is_letter(c) => RuneClass::Letter(c),
            Some(c) => match TokenKind::from_punctuation(c) {
                Some(kind) => RuneClass::Punctuation(kind, c),
                None => RuneClass::Other(c),
            },
        }
    }
}

#[inline]
fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

#[inline]
fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

#[inline]
fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// Single-consumer scanner over any character source.
///
/// The scanner owns one slot of pushback; the source only ever moves forward.
#[derive(Debug)]
pub struct Scanner<I: Iterator<Item = char>> {
    source: Fuse<I>,
    pushback: Option<char>,
}

impl<I: Iterator<Item = char>> Scanner<I> {
    pub fn new<S>(source: S) -> Self
    where
        S: IntoIterator<IntoIter = I>,
    {
        Scanner {
            source: source.into_iter().fuse(),
            pushback: None,
        }
    }

    /// Returns the next token. After `EOF` has been returned, keeps returning `EOF`.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        let token = match RuneClass::of(self.read()) {
            RuneClass::Digit(c) => self.read_run(c, is_digit, TokenKind::Number),
            RuneClass::Letter(c) => self.read_run(c, is_letter, TokenKind::Text),
            RuneClass::Punctuation(kind, c) => Token::new(kind, c),
            RuneClass::Exhausted => Token::eof(),
            RuneClass::Other(c) => {
                debug!("illegal rune {:?} (U+{:04X})", c, c as u32);
                Token::illegal()
            }
        };

        trace!("scanned {}", token);
        token
    }

    fn read(&mut self) -> Option<char> {
        self.pushback.take().or_else(|| self.source.next())
    }

    fn unread(&mut self, c: char) {
        debug_assert!(self.pushback.is_none(), "pushback slot already occupied");
        self.pushback = Some(c);
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.read() {
            if !is_whitespace(c) {
                self.unread(c);
                return;
            }
        }
    }

    /// Consumes a maximal run of runes matching `belongs`, starting with `first`.
    /// The rune that ends the run is pushed back.
    fn read_run(&mut self, first: char, belongs: fn(char) -> bool, kind: TokenKind) -> Token {
        let mut lexeme = String::from(first);
        while let Some(c) = self.read() {
            if belongs(c) {
                lexeme.push(c);
            } else {
                self.unread(c);
                break;
            }
        }
        Token::new(kind, lexeme)
    }
}

impl<R: Read> Scanner<ReaderSource<R>> {
    /// Scans UTF-8 text pulled from `reader`.
    pub fn from_reader(reader: R) -> Self {
        Scanner::new(ReaderSource::new(reader))
    }
}

impl<'a> From<&'a str> for Scanner<std::str::Chars<'a>> {
    fn from(input: &'a str) -> Self {
        Scanner::new(input.chars())
    }
}

/// Yields tokens up to, but not including, `EOF`.
impl<I: Iterator<Item = char>> Iterator for Scanner<I> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        if token.is_eof() {
            None
        } else {
            Some(token)
        }
    }
}

impl<I: Iterator<Item = char>> std::iter::FusedIterator for Scanner<I> {}

/// Scans `input` to completion. The last token is always `EOF`.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut scanner = Scanner::from(input);
    let mut tokens = Vec::new();
    loop {
        let token = scanner.next_token();
        let done = token.is_eof();
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}
