// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The closed set of named keys and the byte sequences terminals send for them.
//!
//! | Key                 | Canonical      | Aliases                                  |
//! | :------------------ | :------------- | :--------------------------------------- |
//! | Up/Down/Right/Left  | `ESC [ A..D`   | `ESC O A..D` (application cursor mode)   |
//! | Home                | `ESC [ 1 ~`    | `ESC [ H`, `ESC O H`, `ESC [ 7 ~`        |
//! | End                 | `ESC [ 4 ~`    | `ESC [ F`, `ESC O F`, `ESC [ 8 ~`        |
//! | Insert / Delete     | `ESC [ 2/3 ~`  |                                          |
//! | Page Up / Down      | `ESC [ 5/6 ~`  |                                          |
//! | F1-F4               | `ESC O P..S`   | `ESC [ 11..14 ~` (vt220)                 |
//! | F5-F12              | `ESC [ n ~`    |                                          |
//! | Escape              | `0x1B`         |                                          |
//! | Tab                 | `0x09`         |                                          |
//! | Backspace           | `0x7F`         | `0x08`                                   |
//! | Return              | `0x0A`         | `0x0D`                                   |
//! | Printable ASCII     | `0x20..=0x7E`  |                                          |
//!
//! Lookup is by exact sequence. The canonical sequences are the ones whose
//! [`fold_legacy_id`] matches the `libqwerty` key codes.

use crate::{CONTROL_BACKSPACE, CONTROL_CARRIAGE_RETURN, CONTROL_DELETE,
            CONTROL_LINE_FEED, CONTROL_TAB, ANSI_ESC, PRINTABLE_ASCII_MAX,
            PRINTABLE_ASCII_MIN, SEQ_ARROW_DOWN, SEQ_ARROW_LEFT, SEQ_ARROW_RIGHT,
            SEQ_ARROW_UP, SEQ_DELETE, SEQ_END, SEQ_END_CSI_F, SEQ_END_RXVT,
            SEQ_END_SS3_F, SEQ_F1, SEQ_F1_VT220, SEQ_F2, SEQ_F2_VT220, SEQ_F3,
            SEQ_F3_VT220, SEQ_F4, SEQ_F4_VT220, SEQ_F5, SEQ_F6, SEQ_F7, SEQ_F8,
            SEQ_F9, SEQ_F10, SEQ_F11, SEQ_F12, SEQ_HOME, SEQ_HOME_CSI_H,
            SEQ_HOME_RXVT, SEQ_HOME_SS3_H, SEQ_INSERT, SEQ_PAGE_DOWN, SEQ_PAGE_UP,
            SEQ_SS3_ARROW_DOWN, SEQ_SS3_ARROW_LEFT, SEQ_SS3_ARROW_RIGHT,
            SEQ_SS3_ARROW_UP, fold_legacy_id};
use smallvec::SmallVec;
use std::fmt::{Display, Formatter};
use strum::IntoEnumIterator as _;
use strum_macros::{Display as StrumDisplay, EnumCount, EnumIter, IntoStaticStr};

/// Number of bytes a [`KeySequence`] holds before spilling to the heap. The longest
/// sequence in the table (`ESC [ 2 4 ~`) is 5 bytes.
pub const KEY_SEQUENCE_INLINE_CAP: usize = 8;

/// The literal ordered bytes of a named key.
pub type KeySequence = SmallVec<[u8; KEY_SEQUENCE_INLINE_CAP]>;

/// Keys that are not printable ASCII: navigation cluster, function keys and the control
/// characters for Escape, Tab, Backspace and Return.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, EnumCount, IntoStaticStr, StrumDisplay,
)]
pub enum SpecialKey {
    Up,
    Down,
    Right,
    Left,
    PageUp,
    PageDown,
    Home,
    End,
    Insert,
    Delete,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    Escape,
    Tab,
    Backspace,
    Return,
}

impl SpecialKey {
    /// The sequence whose legacy id matches `libqwerty`.
    #[must_use]
    pub const fn canonical_sequence(self) -> &'static [u8] {
        match self {
            SpecialKey::Up => SEQ_ARROW_UP,
            SpecialKey::Down => SEQ_ARROW_DOWN,
            SpecialKey::Right => SEQ_ARROW_RIGHT,
            SpecialKey::Left => SEQ_ARROW_LEFT,
            SpecialKey::PageUp => SEQ_PAGE_UP,
            SpecialKey::PageDown => SEQ_PAGE_DOWN,
            SpecialKey::Home => SEQ_HOME,
            SpecialKey::End => SEQ_END,
            SpecialKey::Insert => SEQ_INSERT,
            SpecialKey::Delete => SEQ_DELETE,
            SpecialKey::F1 => SEQ_F1,
            SpecialKey::F2 => SEQ_F2,
            SpecialKey::F3 => SEQ_F3,
            SpecialKey::F4 => SEQ_F4,
            SpecialKey::F5 => SEQ_F5,
            SpecialKey::F6 => SEQ_F6,
            SpecialKey::F7 => SEQ_F7,
            SpecialKey::F8 => SEQ_F8,
            SpecialKey::F9 => SEQ_F9,
            SpecialKey::F10 => SEQ_F10,
            SpecialKey::F11 => SEQ_F11,
            SpecialKey::F12 => SEQ_F12,
            SpecialKey::Escape => &[ANSI_ESC],
            SpecialKey::Tab => &[CONTROL_TAB],
            SpecialKey::Backspace => &[CONTROL_DELETE],
            SpecialKey::Return => &[CONTROL_LINE_FEED],
        }
    }

    /// Other sequences terminals commonly send for the same key.
    #[must_use]
    pub const fn alias_sequences(self) -> &'static [&'static [u8]] {
        match self {
            SpecialKey::Up => &[SEQ_SS3_ARROW_UP],
            SpecialKey::Down => &[SEQ_SS3_ARROW_DOWN],
            SpecialKey::Right => &[SEQ_SS3_ARROW_RIGHT],
            SpecialKey::Left => &[SEQ_SS3_ARROW_LEFT],
            SpecialKey::Home => &[SEQ_HOME_CSI_H, SEQ_HOME_SS3_H, SEQ_HOME_RXVT],
            SpecialKey::End => &[SEQ_END_CSI_F, SEQ_END_SS3_F, SEQ_END_RXVT],
            SpecialKey::F1 => &[SEQ_F1_VT220],
            SpecialKey::F2 => &[SEQ_F2_VT220],
            SpecialKey::F3 => &[SEQ_F3_VT220],
            SpecialKey::F4 => &[SEQ_F4_VT220],
            SpecialKey::Backspace => &[&[CONTROL_BACKSPACE]],
            SpecialKey::Return => &[&[CONTROL_CARRIAGE_RETURN]],
            SpecialKey::PageUp
            | SpecialKey::PageDown
            | SpecialKey::Insert
            | SpecialKey::Delete
            | SpecialKey::F5
            | SpecialKey::F6
            | SpecialKey::F7
            | SpecialKey::F8
            | SpecialKey::F9
            | SpecialKey::F10
            | SpecialKey::F11
            | SpecialKey::F12
            | SpecialKey::Escape
            | SpecialKey::Tab => &[],
        }
    }

    /// Canonical sequence first, then the aliases.
    pub fn sequences(self) -> impl Iterator<Item = &'static [u8]> {
        std::iter::once(self.canonical_sequence())
            .chain(self.alias_sequences().iter().copied())
    }

    #[must_use]
    pub fn from_sequence(bytes: &[u8]) -> Option<Self> {
        SpecialKey::iter().find(|key| key.sequences().any(|it| it == bytes))
    }
}

/// Semantic identity of a named key.
///
/// [`KeyCode::Char`] is only produced for printable ASCII (`' '..='~'`). Everything
/// that is not in the table stays an unrecognized [`NamedKey`] with its raw bytes.
///
/// [`NamedKey`]: crate::NamedKey
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Special(SpecialKey),
    Char(char),
}

impl KeyCode {
    /// Exact lookup of `bytes` against canonical and alias sequences.
    #[must_use]
    pub fn from_sequence(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [byte @ PRINTABLE_ASCII_MIN..=PRINTABLE_ASCII_MAX] => {
                Some(KeyCode::Char(char::from(*byte)))
            }
            _ => SpecialKey::from_sequence(bytes).map(KeyCode::Special),
        }
    }

    /// The canonical bytes for this key.
    #[must_use]
    pub fn sequence(&self) -> KeySequence {
        match self {
            KeyCode::Special(key) => KeySequence::from_slice(key.canonical_sequence()),
            KeyCode::Char(ch) => {
                let mut buf = [0_u8; 4];
                KeySequence::from_slice(ch.encode_utf8(&mut buf).as_bytes())
            }
        }
    }

    /// `libqwerty` compatible numeric identity of the canonical sequence.
    #[must_use]
    pub fn legacy_id(&self) -> u32 { fold_legacy_id(&self.sequence()) }

    /// Every entry in the table: special keys, then printable ASCII in byte order.
    pub fn all() -> impl Iterator<Item = KeyCode> {
        SpecialKey::iter().map(KeyCode::Special).chain(
            (PRINTABLE_ASCII_MIN..=PRINTABLE_ASCII_MAX)
                .map(|byte| KeyCode::Char(char::from(byte))),
        )
    }
}

impl From<SpecialKey> for KeyCode {
    fn from(key: SpecialKey) -> Self { KeyCode::Special(key) }
}

impl Display for KeyCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyCode::Special(key) => write!(f, "{key}"),
            KeyCode::Char(' ') => write!(f, "Space"),
            KeyCode::Char(ch) => write!(f, "'{ch}'"),
        }
    }
}
