// src/lib.rs

//! `runescan`: a small lexical scanner.
//!
//! Characters go in, `(kind, lexeme)` tokens come out, one per call to
//! [`Scanner::next_token`]. Anything the scanner cannot classify becomes an
//! `ILLEGAL` token; scanning itself never fails.
//!
//! ```
//! use runescan::{tokenize, Token, TokenKind};
//!
//! let tokens = tokenize("var age = 2 * 3");
//! assert_eq!(tokens[2], Token::new(TokenKind::Equal, "="));
//! assert!(tokens.last().unwrap().is_eof());
//! ```

pub mod config;
pub mod scanner;
pub mod source;
pub mod token;

pub use scanner::{tokenize, Scanner};
pub use source::{ReaderSource, REPLACEMENT_CHARACTER};
pub use token::{Token, TokenKind};
