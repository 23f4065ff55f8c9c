// src/source/mod.rs

//! Character sources for the scanner.
//!
//! The scanner accepts any `Iterator<Item = char>`; pushback lives in the
//! scanner, so a source only has to answer "next rune, or exhausted".
//! [`ReaderSource`] adapts a byte reader by decoding UTF-8 as it goes.

mod utf8;

pub use utf8::REPLACEMENT_CHARACTER;

use log::{trace, warn};
use std::io::{self, BufReader, Read};
use utf8::{Utf8DecodeResult, Utf8Decoder};

/// Yields the `char`s of a UTF-8 byte stream.
///
/// Malformed sequences come out as [`REPLACEMENT_CHARACTER`]. A read error
/// ends the stream; once ended, the reader is never polled again.
#[derive(Debug)]
pub struct ReaderSource<R> {
    bytes: io::Bytes<BufReader<R>>,
    decoder: Utf8Decoder,
    /// A byte that broke a multi-byte sequence and still has to be decoded.
    carry: Option<u8>,
    finished: bool,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        ReaderSource {
            bytes: BufReader::new(reader).bytes(),
            decoder: Utf8Decoder::default(),
            carry: None,
            finished: false,
        }
    }

    fn next_byte(&mut self) -> Option<u8> {
        if let Some(byte) = self.carry.take() {
            return Some(byte);
        }
        if self.finished {
            return None;
        }
        match self.bytes.next() {
            Some(Ok(byte)) => Some(byte),
            Some(Err(e)) => {
                warn!("read error, treating as end of input: {}", e);
                self.finished = true;
                None
            }
            None => {
                trace!("reader exhausted");
                self.finished = true;
                None
            }
        }
    }
}

impl<R: Read> Iterator for ReaderSource<R> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        loop {
            let Some(byte) = self.next_byte() else {
                if self.decoder.in_progress() {
                    warn!("input ended mid utf8 sequence");
                    self.decoder.reset();
                    return Some(REPLACEMENT_CHARACTER);
                }
                return None;
            };

            let was_in_progress = self.decoder.in_progress();
            match self.decoder.decode(byte) {
                Utf8DecodeResult::Decoded(c) => return Some(c),
                Utf8DecodeResult::NeedsMoreBytes => continue,
                Utf8DecodeResult::InvalidSequence => {
                    if was_in_progress {
                        // `byte` may start something valid on its own.
                        self.carry = Some(byte);
                    }
                    return Some(REPLACEMENT_CHARACTER);
                }
            }
        }
    }
}
