// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Turns a byte stream into [`Key`]s, one per call.
//!
//! ## Classification
//!
//! The first byte decides the strategy:
//!
//! ```text
//! first byte      strategy           ends when
//! ─────────────────────────────────────────────────────────────────────────────
//! 110xxxxx        Unicode (2 bytes)  expected length reached, or source closed
//! 1110xxxx        Unicode (3 bytes)  "
//! 11110xxx        Unicode (4 bytes)  "
//! anything else   Named              source has no byte ready, or length bound hit
//! ```
//!
//! Named keys have no length prefix or terminator. A terminal writes all the bytes of
//! `ESC [ 1 5 ~` at once, so they are all readable back to back, and a single key like
//! `a` is followed by [`ReadByte::Pending`]. The decoder keeps reading until the source
//! runs dry.
//!
//! ## Malformed input
//!
//! Nothing is rejected. A sequence cut short by the source closing becomes a key made
//! of the bytes that did arrive. Continuation bytes are not checked for the `10xxxxxx`
//! marker; [`Utf8Char::as_char`] does that on demand.

use crate::{ByteSource, Key, KeySequence, NamedKey, ReadByte, Utf8Char,
            utf8_multibyte_len};

/// How many bytes the Unicode path reads after the lead byte.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Utf8Policy {
    /// Read exactly the number of continuation bytes the lead byte announces. Two
    /// characters typed back to back decode as two keys.
    #[default]
    ExpectedLength,
    /// `libqwerty` behavior: keep reading until 4 bytes are buffered or the source has
    /// nothing ready. Two quickly typed 2-byte characters come back as one 4-byte key.
    FillBuffer,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeOptions {
    pub utf8_policy: Utf8Policy,
    /// Upper bound on the bytes gathered into one named key. Extra bytes stay in the
    /// source and start the next key.
    pub max_sequence_len: usize,
    /// How many times to re-poll a source that is [`ReadByte::Pending`] while a UTF-8
    /// continuation byte is still expected. Only used by
    /// [`Utf8Policy::ExpectedLength`].
    pub pending_retries: u32,
}

/// Matches the longest entries in the keycode table with plenty of room to spare.
pub const DEFAULT_MAX_SEQUENCE_LEN: usize = 16;

pub const DEFAULT_PENDING_RETRIES: u32 = 64;

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            utf8_policy: Utf8Policy::default(),
            max_sequence_len: DEFAULT_MAX_SEQUENCE_LEN,
            pending_retries: DEFAULT_PENDING_RETRIES,
        }
    }
}

/// Stateless key decoder. Holds only its options, so one instance can be shared by
/// reference and used against any number of sources.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyDecoder {
    options: DecodeOptions,
}

impl KeyDecoder {
    #[must_use]
    pub fn new(options: DecodeOptions) -> Self { Self { options } }

    #[must_use]
    pub fn options(&self) -> DecodeOptions { self.options }

    /// Pull bytes from `source` until one key is assembled.
    ///
    /// Returns `None` without consuming anything if the source has no byte on the very
    /// first read. That means "no key available", not a key press.
    pub fn decode_next_key(&self, source: &mut impl ByteSource) -> Option<Key> {
        let first_byte = match source.next_byte() {
            ReadByte::Byte(byte) => byte,
            ReadByte::Pending | ReadByte::Closed => return None,
        };

        let key = match utf8_multibyte_len(first_byte) {
            Some(expected_len) => {
                Key::Unicode(self.gather_utf8(first_byte, expected_len, source))
            }
            None => Key::Named(self.gather_named(first_byte, source)),
        };

        tracing::trace!(?key, bytes = ?key.bytes(), "decoded key");

        Some(key)
    }

    /// Iterator that decodes keys until the source yields none.
    pub fn keys<'a, S: ByteSource>(&'a self, source: &'a mut S) -> Keys<'a, S> {
        Keys {
            decoder: self,
            source,
        }
    }

    fn gather_utf8(
        &self,
        lead: u8,
        expected_len: usize,
        source: &mut impl ByteSource,
    ) -> Utf8Char {
        let mut utf8 = Utf8Char::from_lead(lead);

        match self.options.utf8_policy {
            Utf8Policy::ExpectedLength => {
                while utf8.len() < expected_len {
                    let Some(byte) = self.next_continuation(source) else {
                        break;
                    };
                    utf8.push(byte);
                }
            }
            Utf8Policy::FillBuffer => {
                while !utf8.is_full() {
                    let ReadByte::Byte(byte) = source.next_byte() else {
                        break;
                    };
                    utf8.push(byte);
                }
            }
        }

        if utf8.len() < expected_len {
            tracing::debug!(
                bytes = ?utf8.as_bytes(),
                expected_len,
                "truncated UTF-8 sequence"
            );
        }

        utf8
    }

    /// The next byte of a UTF-8 sequence that is known to be incomplete. Spins briefly
    /// on [`ReadByte::Pending`] since the rest of the character is usually in flight.
    fn next_continuation(&self, source: &mut impl ByteSource) -> Option<u8> {
        for _ in 0..=self.options.pending_retries {
            match source.next_byte() {
                ReadByte::Byte(byte) => return Some(byte),
                ReadByte::Closed => return None,
                ReadByte::Pending => std::hint::spin_loop(),
            }
        }
        None
    }

    fn gather_named(&self, first_byte: u8, source: &mut impl ByteSource) -> NamedKey {
        let max_len = self.options.max_sequence_len.max(1);
        let mut sequence = KeySequence::new();
        sequence.push(first_byte);

        while sequence.len() < max_len {
            let ReadByte::Byte(byte) = source.next_byte() else {
                break;
            };
            sequence.push(byte);
        }

        NamedKey::new(sequence)
    }
}

/// Decode one key with [`DecodeOptions::default`].
pub fn decode_next_key(source: &mut impl ByteSource) -> Option<Key> {
    KeyDecoder::default().decode_next_key(source)
}

/// Returned by [`KeyDecoder::keys`].
#[derive(Debug)]
pub struct Keys<'a, S> {
    decoder: &'a KeyDecoder,
    source: &'a mut S,
}

impl<S: ByteSource> Iterator for Keys<'_, S> {
    type Item = Key;

    fn next(&mut self) -> Option<Key> { self.decoder.decode_next_key(&mut *self.source) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{KeyCode, PRINTABLE_ASCII_MAX, PRINTABLE_ASCII_MIN, ScriptedByteSource,
                SliceByteSource, SpecialKey, UNICODE_KEY_ID};
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn test_printable_ascii_decodes_to_its_byte_value() {
        for byte in PRINTABLE_ASCII_MIN..=PRINTABLE_ASCII_MAX {
            let bytes = [byte];
            let mut source = SliceByteSource::new(&bytes);
            let key = decode_next_key(&mut source).unwrap();

            let Key::Named(named) = &key else {
                panic!("expected named key for {byte:#04x}, got {key:?}");
            };
            assert_eq!(named.legacy_id(), u32::from(byte));
            assert_eq!(named.bytes(), &[byte]);
            assert_eq!(key.code(), Some(KeyCode::Char(char::from(byte))));
        }
    }

    #[test_case(&[0xC3, 0xA9], 'é' ; "two bytes")]
    #[test_case(&[0xE2, 0x82, 0xAC], '€' ; "three bytes")]
    #[test_case(&[0xF0, 0x9F, 0x98, 0x80], '😀' ; "four bytes")]
    fn test_utf8_bytes_are_kept_verbatim(bytes: &[u8], expected: char) {
        let mut source = SliceByteSource::new(bytes);
        let key = decode_next_key(&mut source).unwrap();

        let Key::Unicode(utf8) = &key else {
            panic!("expected unicode key, got {key:?}");
        };
        assert_eq!(utf8.as_bytes(), bytes);
        assert_eq!(utf8.as_char(), Some(expected));
        assert_eq!(key.legacy_id(), UNICODE_KEY_ID);
    }

    #[test]
    fn test_exhausted_source_yields_no_key_and_consumes_nothing() {
        let mut closed = SliceByteSource::new(b"");
        assert_eq!(decode_next_key(&mut closed), None);
        assert_eq!(closed.consumed(), 0);

        let mut idle = SliceByteSource::pending_when_drained(b"");
        assert_eq!(decode_next_key(&mut idle), None);
        assert_eq!(idle.consumed(), 0);
    }

    #[test_case(b"\x1b[A", SpecialKey::Up, 0x4_427D ; "up")]
    #[test_case(b"\x1b[B", SpecialKey::Down, 0x4_427E ; "down")]
    #[test_case(b"\x1b[C", SpecialKey::Right, 0x4_427F ; "right")]
    #[test_case(b"\x1b[D", SpecialKey::Left, 0x4_4280 ; "left")]
    #[test_case(b"\x1b[5~", SpecialKey::PageUp, 0x10A3_89E6 ; "page up")]
    #[test_case(b"\x1b[3~", SpecialKey::Delete, 0x10A3_8216 ; "delete")]
    #[test_case(b"\x1bOP", SpecialKey::F1, 0x4_3DDC ; "f1")]
    #[test_case(b"\x1b[24~", SpecialKey::F12, 0x7FDD_E45E ; "f12")]
    #[test_case(b"\x1b", SpecialKey::Escape, 0x1B ; "escape")]
    #[test_case(b"\n", SpecialKey::Return, 0x0A ; "return")]
    fn test_escape_sequences(bytes: &[u8], expected: SpecialKey, legacy_id: u32) {
        let mut source = SliceByteSource::pending_when_drained(bytes);
        let key = decode_next_key(&mut source).unwrap();

        assert_eq!(key.code(), Some(KeyCode::Special(expected)));
        assert_eq!(key.legacy_id(), legacy_id);
        assert_eq!(key.legacy_id(), KeyCode::Special(expected).legacy_id());
        assert_eq!(source.consumed(), bytes.len());
    }

    #[test]
    fn test_decoding_is_stateless() {
        let bytes = b"\x1b[15~";
        let decoder = KeyDecoder::default();
        let first = decoder.decode_next_key(&mut SliceByteSource::new(bytes));
        let second = decoder.decode_next_key(&mut SliceByteSource::new(bytes));
        assert_eq!(first, second);
        assert_eq!(first.unwrap().code(), Some(KeyCode::Special(SpecialKey::F5)));
    }

    #[test]
    fn test_named_key_stops_at_pending() {
        // The terminal delivered 'a', then later 'b'.
        let mut source = ScriptedByteSource::new([
            ReadByte::Byte(b'a'),
            ReadByte::Pending,
            ReadByte::Byte(b'b'),
        ]);
        let decoder = KeyDecoder::default();

        assert_eq!(
            decoder.decode_next_key(&mut source),
            Some(Key::from(KeyCode::Char('a')))
        );
        assert_eq!(
            decoder.decode_next_key(&mut source),
            Some(Key::from(KeyCode::Char('b')))
        );
        assert_eq!(decoder.decode_next_key(&mut source), None);
    }

    #[test]
    fn test_truncated_escape_sequence_is_best_effort() {
        let mut source = SliceByteSource::new(b"\x1b[");
        let key = decode_next_key(&mut source).unwrap();
        assert_eq!(key.bytes(), b"\x1b[");
        assert_eq!(key.code(), None);
        assert_eq!(key.legacy_id(), 2791);
    }

    #[test]
    fn test_unknown_sequence_keeps_raw_bytes() {
        let mut source = SliceByteSource::new(b"\x1b[1;5A");
        let key = decode_next_key(&mut source).unwrap();
        assert_eq!(key.bytes(), b"\x1b[1;5A");
        assert_eq!(key.code(), None);
    }

    #[test]
    fn test_max_sequence_len_leaves_rest_in_source() {
        let decoder = KeyDecoder::new(DecodeOptions {
            max_sequence_len: 3,
            ..DecodeOptions::default()
        });
        let mut source = SliceByteSource::new(b"\x1b[Axy");

        let first = decoder.decode_next_key(&mut source).unwrap();
        assert_eq!(first.code(), Some(KeyCode::Special(SpecialKey::Up)));
        assert_eq!(source.remaining(), b"xy");

        let second = decoder.decode_next_key(&mut source).unwrap();
        assert_eq!(second.bytes(), b"xy");
    }

    #[test]
    fn test_zero_max_sequence_len_still_reads_one_byte() {
        let decoder = KeyDecoder::new(DecodeOptions {
            max_sequence_len: 0,
            ..DecodeOptions::default()
        });
        let mut source = SliceByteSource::new(b"ab");
        let keys: Vec<Key> = decoder.keys(&mut source).collect();
        assert_eq!(
            keys,
            vec![Key::from(KeyCode::Char('a')), Key::from(KeyCode::Char('b'))]
        );
    }

    #[test]
    fn test_expected_length_splits_back_to_back_characters() {
        let mut source = SliceByteSource::new("éü".as_bytes());
        let decoder = KeyDecoder::default();
        let chars: Vec<Option<char>> =
            decoder.keys(&mut source).map(|key| key.as_char()).collect();
        assert_eq!(chars, vec![Some('é'), Some('ü')]);
    }

    #[test]
    fn test_fill_buffer_glues_back_to_back_characters() {
        let decoder = KeyDecoder::new(DecodeOptions {
            utf8_policy: Utf8Policy::FillBuffer,
            ..DecodeOptions::default()
        });
        let mut source = SliceByteSource::new("éü".as_bytes());
        let key = decoder.decode_next_key(&mut source).unwrap();
        assert_eq!(key.bytes(), "éü".as_bytes());
        assert_eq!(key.as_char(), None);
        assert_eq!(decoder.decode_next_key(&mut source), None);
    }

    #[test]
    fn test_fill_buffer_stops_when_source_is_idle() {
        let decoder = KeyDecoder::new(DecodeOptions {
            utf8_policy: Utf8Policy::FillBuffer,
            ..DecodeOptions::default()
        });
        let mut source = SliceByteSource::pending_when_drained(&[0xC3, 0xA9]);
        let key = decoder.decode_next_key(&mut source).unwrap();
        assert_eq!(key.as_char(), Some('é'));
    }

    #[test]
    fn test_expected_length_waits_for_pending_continuation() {
        let mut source = ScriptedByteSource::new([
            ReadByte::Byte(0xE2),
            ReadByte::Pending,
            ReadByte::Byte(0x82),
            ReadByte::Pending,
            ReadByte::Pending,
            ReadByte::Byte(0xAC),
        ]);
        let key = decode_next_key(&mut source).unwrap();
        assert_eq!(key.as_char(), Some('€'));
    }

    #[test]
    fn test_expected_length_gives_up_after_retries() {
        let decoder = KeyDecoder::new(DecodeOptions {
            pending_retries: 1,
            ..DecodeOptions::default()
        });
        let mut source = ScriptedByteSource::new([
            ReadByte::Byte(0xC3),
            ReadByte::Pending,
            ReadByte::Pending,
            ReadByte::Byte(0xA9),
        ]);
        let key = decoder.decode_next_key(&mut source).unwrap();
        assert_eq!(key.bytes(), &[0xC3]);
        assert_eq!(key.as_char(), None);

        // The late continuation byte is left for the next call.
        let next = decoder.decode_next_key(&mut source).unwrap();
        assert_eq!(next.bytes(), &[0xA9]);
    }

    #[test]
    fn test_truncated_utf8_when_source_closes() {
        let mut source = SliceByteSource::new(&[0xF0, 0x9F]);
        let key = decode_next_key(&mut source).unwrap();
        assert_eq!(key.bytes(), &[0xF0, 0x9F]);
        assert!(matches!(key, Key::Unicode(_)));
    }

    #[test_case(0xA9 ; "stray continuation")]
    #[test_case(0xF8 ; "reserved")]
    #[test_case(0xFF ; "reserved max")]
    fn test_non_lead_high_bytes_are_named(byte: u8) {
        let bytes = [byte];
        let mut source = SliceByteSource::new(&bytes);
        let key = decode_next_key(&mut source).unwrap();
        assert!(matches!(key, Key::Named(_)));
        assert_eq!(key.legacy_id(), u32::from(byte));
    }

    #[test]
    fn test_keys_iterator_over_replayed_session() {
        let mut source = ScriptedByteSource::new([
            ReadByte::Byte(b'h'),
            ReadByte::Pending,
            ReadByte::Byte(0x1B),
            ReadByte::Byte(b'['),
            ReadByte::Byte(b'B'),
            ReadByte::Pending,
            ReadByte::Byte(0xC3),
            ReadByte::Byte(0xA9),
            ReadByte::Byte(0x7F),
            ReadByte::Closed,
        ]);
        let decoder = KeyDecoder::default();
        let keys: Vec<String> = decoder.keys(&mut source).map(|it| it.to_string()).collect();
        assert_eq!(keys, vec!["'h'", "Down", "'é'", "Backspace"]);
    }
}
