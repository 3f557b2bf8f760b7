// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! VT100 / xterm input sequence constants for the keys in the keycode table.
//!
//! # Sequence Formats
//!
//! - `CSI` = `ESC [` (0x1B 0x5B), eg: `ESC [ A` for Up, `ESC [ 5 ~` for Page Up.
//! - `SS3` = `ESC O` (0x1B 0x4F), eg: `ESC O P` for F1, `ESC O A` for Up when the
//!   terminal is in application cursor mode.
//!
//! ## Function Keys (CSI n~)
//! - F1-F4: codes 11-14 (vt220), usually sent as `SS3 P/Q/R/S` instead
//! - F5: code 15
//! - F6-F10: codes 17-21
//! - F11-F12: codes 23-24

// ==================== Sequence Components ====================

/// ESC byte (27 in decimal, 0x1B in hex)
pub const ANSI_ESC: u8 = 0x1B;

/// CSI bracket byte: `[` (91 in decimal, 0x5B in hex)
pub const ANSI_CSI_BRACKET: u8 = b'[';

/// SS3 'O' byte: Second byte of SS3 sequences (0x4F)
pub const ANSI_SS3_O: u8 = b'O';

// ==================== Control Characters ====================

/// Horizontal tab (0x09).
pub const CONTROL_TAB: u8 = 0x09;

/// Line feed (0x0A). What Enter sends when the line discipline maps CR to NL.
pub const CONTROL_LINE_FEED: u8 = 0x0A;

/// Carriage return (0x0D). What Enter sends when `ICRNL` is off (full raw mode).
pub const CONTROL_CARRIAGE_RETURN: u8 = 0x0D;

/// Backspace as sent by most terminals (DEL, 0x7F).
pub const CONTROL_DELETE: u8 = 0x7F;

/// Backspace as sent by some terminals (BS, 0x08).
pub const CONTROL_BACKSPACE: u8 = 0x08;

// ==================== Printable ASCII ====================

/// First printable ASCII byte (space).
pub const PRINTABLE_ASCII_MIN: u8 = 0x20;

/// Last printable ASCII byte (`~`).
pub const PRINTABLE_ASCII_MAX: u8 = 0x7E;

// ==================== Sequences ====================

/// CSI A: Up arrow.
pub const SEQ_ARROW_UP: &[u8] = &[ANSI_ESC, ANSI_CSI_BRACKET, b'A'];
/// CSI B: Down arrow.
pub const SEQ_ARROW_DOWN: &[u8] = &[ANSI_ESC, ANSI_CSI_BRACKET, b'B'];
/// CSI C: Right arrow.
pub const SEQ_ARROW_RIGHT: &[u8] = &[ANSI_ESC, ANSI_CSI_BRACKET, b'C'];
/// CSI D: Left arrow.
pub const SEQ_ARROW_LEFT: &[u8] = &[ANSI_ESC, ANSI_CSI_BRACKET, b'D'];

/// SS3 A: Up arrow (application cursor mode).
pub const SEQ_SS3_ARROW_UP: &[u8] = &[ANSI_ESC, ANSI_SS3_O, b'A'];
/// SS3 B: Down arrow (application cursor mode).
pub const SEQ_SS3_ARROW_DOWN: &[u8] = &[ANSI_ESC, ANSI_SS3_O, b'B'];
/// SS3 C: Right arrow (application cursor mode).
pub const SEQ_SS3_ARROW_RIGHT: &[u8] = &[ANSI_ESC, ANSI_SS3_O, b'C'];
/// SS3 D: Left arrow (application cursor mode).
pub const SEQ_SS3_ARROW_LEFT: &[u8] = &[ANSI_ESC, ANSI_SS3_O, b'D'];

/// CSI 1~: Home.
pub const SEQ_HOME: &[u8] = &[ANSI_ESC, ANSI_CSI_BRACKET, b'1', b'~'];
/// CSI H: Home (xterm).
pub const SEQ_HOME_CSI_H: &[u8] = &[ANSI_ESC, ANSI_CSI_BRACKET, b'H'];
/// SS3 H: Home (application mode).
pub const SEQ_HOME_SS3_H: &[u8] = &[ANSI_ESC, ANSI_SS3_O, b'H'];
/// CSI 7~: Home (rxvt).
pub const SEQ_HOME_RXVT: &[u8] = &[ANSI_ESC, ANSI_CSI_BRACKET, b'7', b'~'];

/// CSI 4~: End.
pub const SEQ_END: &[u8] = &[ANSI_ESC, ANSI_CSI_BRACKET, b'4', b'~'];
/// CSI F: End (xterm).
pub const SEQ_END_CSI_F: &[u8] = &[ANSI_ESC, ANSI_CSI_BRACKET, b'F'];
/// SS3 F: End (application mode).
pub const SEQ_END_SS3_F: &[u8] = &[ANSI_ESC, ANSI_SS3_O, b'F'];
/// CSI 8~: End (rxvt).
pub const SEQ_END_RXVT: &[u8] = &[ANSI_ESC, ANSI_CSI_BRACKET, b'8', b'~'];

/// CSI 2~: Insert.
pub const SEQ_INSERT: &[u8] = &[ANSI_ESC, ANSI_CSI_BRACKET, b'2', b'~'];
/// CSI 3~: Delete.
pub const SEQ_DELETE: &[u8] = &[ANSI_ESC, ANSI_CSI_BRACKET, b'3', b'~'];
/// CSI 5~: Page Up.
pub const SEQ_PAGE_UP: &[u8] = &[ANSI_ESC, ANSI_CSI_BRACKET, b'5', b'~'];
/// CSI 6~: Page Down.
pub const SEQ_PAGE_DOWN: &[u8] = &[ANSI_ESC, ANSI_CSI_BRACKET, b'6', b'~'];

/// SS3 P: F1.
pub const SEQ_F1: &[u8] = &[ANSI_ESC, ANSI_SS3_O, b'P'];
/// SS3 Q: F2.
pub const SEQ_F2: &[u8] = &[ANSI_ESC, ANSI_SS3_O, b'Q'];
/// SS3 R: F3.
pub const SEQ_F3: &[u8] = &[ANSI_ESC, ANSI_SS3_O, b'R'];
/// SS3 S: F4.
pub const SEQ_F4: &[u8] = &[ANSI_ESC, ANSI_SS3_O, b'S'];

/// CSI 11~: F1 (vt220).
pub const SEQ_F1_VT220: &[u8] = &[ANSI_ESC, ANSI_CSI_BRACKET, b'1', b'1', b'~'];
/// CSI 12~: F2 (vt220).
pub const SEQ_F2_VT220: &[u8] = &[ANSI_ESC, ANSI_CSI_BRACKET, b'1', b'2', b'~'];
/// CSI 13~: F3 (vt220).
pub const SEQ_F3_VT220: &[u8] = &[ANSI_ESC, ANSI_CSI_BRACKET, b'1', b'3', b'~'];
/// CSI 14~: F4 (vt220).
pub const SEQ_F4_VT220: &[u8] = &[ANSI_ESC, ANSI_CSI_BRACKET, b'1', b'4', b'~'];

/// CSI 15~: F5.
pub const SEQ_F5: &[u8] = &[ANSI_ESC, ANSI_CSI_BRACKET, b'1', b'5', b'~'];
/// CSI 17~: F6.
pub const SEQ_F6: &[u8] = &[ANSI_ESC, ANSI_CSI_BRACKET, b'1', b'7', b'~'];
/// CSI 18~: F7.
pub const SEQ_F7: &[u8] = &[ANSI_ESC, ANSI_CSI_BRACKET, b'1', b'8', b'~'];
/// CSI 19~: F8.
pub const SEQ_F8: &[u8] = &[ANSI_ESC, ANSI_CSI_BRACKET, b'1', b'9', b'~'];
/// CSI 20~: F9.
pub const SEQ_F9: &[u8] = &[ANSI_ESC, ANSI_CSI_BRACKET, b'2', b'0', b'~'];
/// CSI 21~: F10.
pub const SEQ_F10: &[u8] = &[ANSI_ESC, ANSI_CSI_BRACKET, b'2', b'1', b'~'];
/// CSI 23~: F11.
pub const SEQ_F11: &[u8] = &[ANSI_ESC, ANSI_CSI_BRACKET, b'2', b'3', b'~'];
/// CSI 24~: F12.
pub const SEQ_F12: &[u8] = &[ANSI_ESC, ANSI_CSI_BRACKET, b'2', b'4', b'~'];
