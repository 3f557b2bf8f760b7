// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Numeric key identities compatible with `libqwerty`'s `qw_keycode_t`.
//!
//! A named key is identified by its raw byte sequence (see [`NamedKey`]). Programs that
//! persisted or hard coded the old integer codes can still get them: each byte is folded
//! into a running `u32` by multiplying the total by `1000` when the byte is greater than
//! `100` and by `100` otherwise, then adding the byte. Arithmetic wraps, so long
//! sequences like `ESC [ 1 5 ~` (F5) land on the same values the C `unsigned int` did.
//!
//! ```text
//! ESC [ A  →  27 → 27*100+91 = 2791 → 2791*100+65 = 279165 (0x4427D)
//! ```
//!
//! The fold is not injective in general. The unit tests check that it is collision free
//! over every canonical and alias sequence in the keycode table.
//!
//! [`NamedKey`]: crate::NamedKey

/// Identity reported for keys that are Unicode codepoints rather than named keys. The
/// bytes spell `"UNIC"`.
pub const UNICODE_KEY_ID: u32 = 0x554E_4943;

/// Fold `bytes` into a legacy numeric key identity.
#[must_use]
pub fn fold_legacy_id(bytes: &[u8]) -> u32 {
    bytes.iter().fold(0_u32, |acc, &byte| {
        let shift = if byte > 100 { 1000 } else { 100 };
        acc.wrapping_mul(shift).wrapping_add(u32::from(byte))
    })
}
