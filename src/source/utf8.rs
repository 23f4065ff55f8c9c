// src/source/utf8.rs

//! Incremental UTF-8 decoder.
//! Bytes are fed one at a time; a `char` comes out once a sequence completes.

use log::warn;
use std::str;

/// Unicode replacement character (U+FFFD).
/// Emitted in place of any byte sequence that does not decode.
pub const REPLACEMENT_CHARACTER: char = '\u{FFFD}';

// --- Lead/continuation byte ranges (RFC 3629) ---
const UTF8_ASCII_MAX: u8 = 0x7F;
const UTF8_CONT_MIN: u8 = 0x80;
const UTF8_CONT_MAX: u8 = 0xBF;
const UTF8_2_BYTE_MIN: u8 = 0xC2; // 0xC0, 0xC1 only ever start overlong forms
const UTF8_2_BYTE_MAX: u8 = 0xDF;
const UTF8_3_BYTE_MIN: u8 = 0xE0;
const UTF8_3_BYTE_MAX: u8 = 0xEF;
const UTF8_4_BYTE_MIN: u8 = 0xF0;
const UTF8_4_BYTE_MAX: u8 = 0xF4;

/// Outcome of feeding a single byte to the decoder.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Utf8DecodeResult {
    Decoded(char),
    /// The sequence is broken. The decoder has been reset.
    InvalidSequence,
    /// Byte buffered; the sequence is not complete yet.
    NeedsMoreBytes,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Utf8Decoder {
    buffer: [u8; 4],
    len: usize,
    expected: usize,
}

impl Utf8Decoder {
    #[inline]
    pub(crate) fn reset(&mut self) {
        self.len = 0;
        self.expected = 0;
    }

    /// True while a multi-byte sequence is partially buffered.
    #[inline]
    pub(crate) fn in_progress(&self) -> bool {
        self.len > 0
    }

    pub(crate) fn decode(&mut self, byte: u8) -> Utf8DecodeResult {
        if self.len == 0 {
            return self.decode_first_byte(byte);
        }
        self.decode_continuation_byte(byte)
    }

    fn decode_first_byte(&mut self, byte: u8) -> Utf8DecodeResult {
        let expected = match byte {
            0x00..=UTF8_ASCII_MAX => return Utf8DecodeResult::Decoded(byte as char),
            UTF8_2_BYTE_MIN..=UTF8_2_BYTE_MAX => 2,
            UTF8_3_BYTE_MIN..=UTF8_3_BYTE_MAX => 3,
            UTF8_4_BYTE_MIN..=UTF8_4_BYTE_MAX => 4,
            // 0x80..=0xC1 and 0xF5..=0xFF never start a sequence.
            _ => {
                warn!("invalid utf8 start byte: {:X?}", byte);
                self.reset();
                return Utf8DecodeResult::InvalidSequence;
            }
        };
        self.buffer[0] = byte;
        self.len = 1;
        self.expected = expected;
        Utf8DecodeResult::NeedsMoreBytes
    }

    fn decode_continuation_byte(&mut self, byte: u8) -> Utf8DecodeResult {
        if !(UTF8_CONT_MIN..=UTF8_CONT_MAX).contains(&byte) {
            // The buffered prefix is dead; the caller decides what to do with `byte`.
            self.reset();
            return Utf8DecodeResult::InvalidSequence;
        }

        self.buffer[self.len] = byte;
        self.len += 1;

        if self.len != self.expected {
            return Utf8DecodeResult::NeedsMoreBytes;
        }

        // `from_utf8` rejects overlong forms, surrogates and scalars past U+10FFFF.
        let decoded = str::from_utf8(&self.buffer[..self.len])
            .ok()
            .and_then(|s| s.chars().next());
        self.reset();

        match decoded {
            Some(c) => Utf8DecodeResult::Decoded(c),
            None => Utf8DecodeResult::InvalidSequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_all(bytes: &[u8]) -> Vec<Utf8DecodeResult> {
        let mut decoder = Utf8Decoder::default();
        bytes.iter().map(|&b| decoder.decode(b)).collect()
    }

    #[test_log::test]
    fn ascii_decodes_immediately() {
        assert_eq!(decode_all(b"a"), vec![Utf8DecodeResult::Decoded('a')]);
    }

    #[test_log::test]
    fn multibyte_sequence_completes_on_last_byte() {
        let results = decode_all("é".as_bytes());
        assert_eq!(
            results,
            vec![
                Utf8DecodeResult::NeedsMoreBytes,
                Utf8DecodeResult::Decoded('é')
            ]
        );

        let results = decode_all("🦀".as_bytes());
        assert_eq!(results.last(), Some(&Utf8DecodeResult::Decoded('🦀')));
    }

    #[test_log::test]
    fn lone_continuation_byte_is_invalid() {
        assert_eq!(decode_all(&[0x80]), vec![Utf8DecodeResult::InvalidSequence]);
    }

    #[test_log::test]
    fn overlong_and_surrogate_forms_are_rejected() {
        // Overlong '/' (0x2F) as three bytes.
        assert_eq!(
            decode_all(&[0xE0, 0x80, 0xAF]).last(),
            Some(&Utf8DecodeResult::InvalidSequence)
        );
        // U+D800 encoded directly.
        assert_eq!(
            decode_all(&[0xED, 0xA0, 0x80]).last(),
            Some(&Utf8DecodeResult::InvalidSequence)
        );
    }

    #[test_log::test]
    fn interrupted_sequence_resets_decoder() {
        let mut decoder = Utf8Decoder::default();
        assert_eq!(decoder.decode(0xC3), Utf8DecodeResult::NeedsMoreBytes);
        assert!(decoder.in_progress());
        assert_eq!(decoder.decode(b'a'), Utf8DecodeResult::InvalidSequence);
        assert!(!decoder.in_progress());
        assert_eq!(decoder.decode(b'a'), Utf8DecodeResult::Decoded('a'));
    }
}
