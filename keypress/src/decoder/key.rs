// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{KeyCode, KeySequence, UNICODE_KEY_ID, UTF8_MAX_LEN, fold_legacy_id};
use std::fmt::{Display, Formatter};

/// One logical key press, as produced by [`KeyDecoder::decode_next_key`].
///
/// A key is either a named key (identified by the raw bytes the terminal sent) or a
/// Unicode character (kept as its raw UTF-8 encoding).
///
/// [`KeyDecoder::decode_next_key`]: crate::KeyDecoder::decode_next_key
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Named(NamedKey),
    Unicode(Utf8Char),
}

impl Key {
    /// Table entry for a named key. `None` for Unicode keys and for named keys whose
    /// bytes are not in the table.
    #[must_use]
    pub fn code(&self) -> Option<KeyCode> {
        match self {
            Key::Named(named) => named.code(),
            Key::Unicode(_) => None,
        }
    }

    /// The character typed, for printable ASCII and valid Unicode keys.
    #[must_use]
    pub fn as_char(&self) -> Option<char> {
        match self {
            Key::Named(named) => match named.code() {
                Some(KeyCode::Char(ch)) => Some(ch),
                _ => None,
            },
            Key::Unicode(utf8) => utf8.as_char(),
        }
    }

    /// `libqwerty` compatible numeric identity. Unicode keys report
    /// [`UNICODE_KEY_ID`].
    #[must_use]
    pub fn legacy_id(&self) -> u32 {
        match self {
            Key::Named(named) => named.legacy_id(),
            Key::Unicode(_) => UNICODE_KEY_ID,
        }
    }

    /// The raw bytes this key was decoded from.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        match self {
            Key::Named(named) => named.bytes(),
            Key::Unicode(utf8) => utf8.as_bytes(),
        }
    }
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self { Key::Named(NamedKey::from(code)) }
}

impl Display for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (self, self.code(), self.as_char()) {
            (Key::Named(_), Some(code), _) => write!(f, "{code}"),
            (Key::Unicode(_), _, Some(ch)) => write!(f, "'{ch}'"),
            _ => write!(f, "{}", HexBytes(self.bytes())),
        }
    }
}

/// A key from the closed, enumerable set: printable ASCII, control keys, navigation
/// and function keys. Also used for byte runs that are not in the table, so callers
/// can still inspect them.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NamedKey {
    sequence: KeySequence,
}

impl NamedKey {
    #[must_use]
    pub fn new(sequence: KeySequence) -> Self { Self { sequence } }

    #[must_use]
    pub fn bytes(&self) -> &[u8] { &self.sequence }

    #[must_use]
    pub fn code(&self) -> Option<KeyCode> { KeyCode::from_sequence(&self.sequence) }

    #[must_use]
    pub fn is_recognized(&self) -> bool { self.code().is_some() }

    #[must_use]
    pub fn legacy_id(&self) -> u32 { fold_legacy_id(&self.sequence) }
}

impl From<KeyCode> for NamedKey {
    fn from(code: KeyCode) -> Self { Self::new(code.sequence()) }
}

impl From<&[u8]> for NamedKey {
    fn from(bytes: &[u8]) -> Self { Self::new(KeySequence::from_slice(bytes)) }
}

/// Raw UTF-8 bytes of one Unicode key press, at most [`UTF8_MAX_LEN`] of them.
///
/// The bytes are stored as received. A truncated or malformed sequence is kept as is;
/// [`Utf8Char::as_char`] returns `None` for those.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Utf8Char {
    buffer: [u8; UTF8_MAX_LEN],
    len: usize,
}

impl Utf8Char {
    /// Start a character from its lead byte.
    #[must_use]
    pub fn from_lead(lead: u8) -> Self {
        let mut buffer = [0; UTF8_MAX_LEN];
        buffer[0] = lead;
        Self { buffer, len: 1 }
    }

    /// `None` if `bytes` is empty or longer than [`UTF8_MAX_LEN`].
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.is_empty() || bytes.len() > UTF8_MAX_LEN {
            return None;
        }
        let mut buffer = [0; UTF8_MAX_LEN];
        buffer[..bytes.len()].copy_from_slice(bytes);
        Some(Self {
            buffer,
            len: bytes.len(),
        })
    }

    /// Appends `byte`. Returns `false` (and drops the byte) when full.
    pub fn push(&mut self, byte: u8) -> bool {
        if self.is_full() {
            return false;
        }
        self.buffer[self.len] = byte;
        self.len += 1;
        true
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] { &self.buffer[..self.len] }

    #[must_use]
    pub fn len(&self) -> usize { self.len }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.len == 0 }

    #[must_use]
    pub fn is_full(&self) -> bool { self.len == UTF8_MAX_LEN }

    /// Decodes the bytes if they form exactly one valid Unicode scalar value.
    #[must_use]
    pub fn as_char(&self) -> Option<char> {
        let text = std::str::from_utf8(self.as_bytes()).ok()?;
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Some(ch),
            _ => None,
        }
    }
}

impl From<char> for Utf8Char {
    fn from(ch: char) -> Self {
        let mut buffer = [0; UTF8_MAX_LEN];
        let len = ch.encode_utf8(&mut buffer).len();
        Self { buffer, len }
    }
}

/// One line describing a key: kind, raw bytes, name and legacy id.
///
/// ```text
/// named    0x1B 0x5B 0x41            Up            279165
/// unicode  0xC3 0xA9                 'é'           1431193923
/// ```
#[derive(Debug, Clone, Copy)]
pub struct KeyReport<'a>(pub &'a Key);

impl Display for KeyReport<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let key = self.0;
        let kind = match key {
            Key::Named(_) => "named",
            Key::Unicode(_) => "unicode",
        };
        let name = match (key.code(), key.as_char()) {
            (Some(code), _) => code.to_string(),
            (None, Some(ch)) => format!("'{ch}'"),
            (None, None) => "?".to_string(),
        };
        let hex = HexBytes(key.bytes()).to_string();
        write!(f, "{kind:<8} {hex:<25} {name:<13} {}", key.legacy_id())
    }
}

/// Formats bytes as `0x1B 0x5B 0x41`.
struct HexBytes<'a>(&'a [u8]);

impl Display for HexBytes<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, byte) in self.0.iter().enumerate() {
            if index > 0 {
                write!(f, " ")?;
            }
            write!(f, "0x{byte:02X}")?;
        }
        Ok(())
    }
}
