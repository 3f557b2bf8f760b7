// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! UTF-8 lead byte constants used to classify the first byte of a key press.
//!
//! ## UTF-8 Encoding Structure
//!
//! | Bytes | First byte | Continuation bytes | Bit pattern                          |
//! | ----- | ---------- | ------------------ | ------------------------------------ |
//! | 1     | 00-7F      | -                  | 0xxxxxxx                             |
//! | 2     | C0-DF      | 80-BF              | 110xxxxx 10xxxxxx                    |
//! | 3     | E0-EF      | 80-BF (x2)         | 1110xxxx 10xxxxxx 10xxxxxx           |
//! | 4     | F0-F7      | 80-BF (x3)         | 11110xxx 10xxxxxx 10xxxxxx 10xxxxxx  |
//!
//! The decoder only looks at the lead byte: the high bits select the Unicode path and
//! tell it how many continuation bytes to expect. Continuation bytes themselves are
//! stored as received and only validated when the caller asks for a [`char`].
//!
//! ```rust
//! # use r3bl_keypress::{UTF8_2BYTE_LEAD_MASK, UTF8_2BYTE_LEAD_PATTERN};
//! let first_byte = 0xC3; // Start of 'é' (0xC3 0xA9).
//! assert_eq!(first_byte & UTF8_2BYTE_LEAD_MASK, UTF8_2BYTE_LEAD_PATTERN);
//! ```

// ============================================================================
// UTF-8 lead byte masks (high bits of the first byte of a sequence)
// ============================================================================

/// Keeps the top 3 bits of a lead byte.
pub const UTF8_2BYTE_LEAD_MASK: u8 = 0b1110_0000;

/// Top 3 bits of a 2-byte lead: `110xxxxx`.
pub const UTF8_2BYTE_LEAD_PATTERN: u8 = 0b1100_0000;

/// Keeps the top 4 bits of a lead byte.
pub const UTF8_3BYTE_LEAD_MASK: u8 = 0b1111_0000;

/// Top 4 bits of a 3-byte lead: `1110xxxx`.
pub const UTF8_3BYTE_LEAD_PATTERN: u8 = 0b1110_0000;

/// Keeps the top 5 bits of a lead byte.
pub const UTF8_4BYTE_LEAD_MASK: u8 = 0b1111_1000;

/// Top 5 bits of a 4-byte lead: `11110xxx`.
pub const UTF8_4BYTE_LEAD_PATTERN: u8 = 0b1111_0000;

// ============================================================================
// UTF-8 continuation bytes
// ============================================================================

/// Continuation byte validation mask (C0 hex).
///
/// `byte & 0b1100_0000` equals [`UTF8_CONTINUATION_PATTERN`] for valid continuation
/// bytes.
pub const UTF8_CONTINUATION_MASK: u8 = 0b1100_0000;

/// Continuation byte expected pattern (80 hex).
pub const UTF8_CONTINUATION_PATTERN: u8 = 0b1000_0000;

/// Longest UTF-8 encoding of a single Unicode scalar value.
pub const UTF8_MAX_LEN: usize = 4;

/// Returns the total length of the UTF-8 sequence started by `first_byte`, or `None`
/// if `first_byte` is not a multi-byte lead (ASCII, a stray continuation byte, or one
/// of the reserved bytes `F8`-`FF`).
#[must_use]
pub const fn utf8_multibyte_len(first_byte: u8) -> Option<usize> {
    if first_byte & UTF8_4BYTE_LEAD_MASK == UTF8_4BYTE_LEAD_PATTERN {
        Some(4)
    } else if first_byte & UTF8_3BYTE_LEAD_MASK == UTF8_3BYTE_LEAD_PATTERN {
        Some(3)
    } else if first_byte & UTF8_2BYTE_LEAD_MASK == UTF8_2BYTE_LEAD_PATTERN {
        Some(2)
    } else {
        None
    }
}

/// Returns `true` if `byte` has the `10xxxxxx` continuation marker.
#[must_use]
pub const fn is_utf8_continuation(byte: u8) -> bool {
    byte & UTF8_CONTINUATION_MASK == UTF8_CONTINUATION_PATTERN
}
