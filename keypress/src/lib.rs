// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words termios cfmakeraw libqwerty

//! # `r3bl_keypress`
//!
//! Read one key press at a time from a terminal, without waiting for Enter and without
//! echo, and tell which key it was.
//!
//! ## Two kinds of key
//!
//! Every key press decodes into a [`Key`]:
//!
//! - [`Key::Named`]: printable ASCII, control keys (Escape, Tab, Backspace, Return) and
//!   escape sequences for arrows, Home/End, PageUp/PageDown, Insert/Delete and F1-F12.
//!   [`Key::code`] looks the bytes up in the keycode table ([`KeyCode`],
//!   [`SpecialKey`]).
//! - [`Key::Unicode`]: one multi-byte UTF-8 character, kept as raw bytes in a
//!   [`Utf8Char`].
//!
//! Byte runs that are not in the table still come back as [`Key::Named`] with
//! [`NamedKey::is_recognized`] returning `false`.
//!
//! ## Layers
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ Keyboard          open / poll_key / wait_for_key / close     │
//! ├───────────────────────────────┬──────────────────────────────┤
//! │ KeyDecoder                    │ TerminalSession<B>           │
//! │   bytes → Key                 │   raw mode, restored once    │
//! ├───────────────────────────────┼──────────────────────────────┤
//! │ ByteSource                    │ TerminalModeBackend          │
//! │   TtyByteSource (unix)        │   UnixTermiosBackend (unix)  │
//! │   ConsoleByteSource (windows) │   ConsoleBackend (windows)   │
//! │   SliceByteSource (replay)    │                              │
//! └───────────────────────────────┴──────────────────────────────┘
//! ```
//!
//! The decoder never touches the terminal. It only pulls bytes from a [`ByteSource`],
//! which can say "no byte right now" ([`ReadByte::Pending`]) apart from "no bytes ever
//! again" ([`ReadByte::Closed`]). That is how an escape sequence's end is found: the
//! terminal writes all of its bytes at once.
//!
//! ## Quick start
//!
//! ```no_run
//! use r3bl_keypress::{Keyboard, KeyboardConfig, SpecialKey, KeyCode};
//!
//! let mut keyboard = Keyboard::open(KeyboardConfig::default())?;
//! while let Some(key) = keyboard.wait_for_key() {
//!     if key.code() == Some(KeyCode::Special(SpecialKey::Escape)) {
//!         break;
//!     }
//! }
//! keyboard.close()?;
//! # Ok::<(), miette::Report>(())
//! ```
//!
//! Decoding recorded bytes needs no terminal at all:
//!
//! ```
//! use r3bl_keypress::{KeyDecoder, SliceByteSource, SpecialKey, KeyCode};
//!
//! let mut source = SliceByteSource::new(b"\x1b[A");
//! let key = KeyDecoder::default().decode_next_key(&mut source).unwrap();
//! assert_eq!(key.code(), Some(KeyCode::Special(SpecialKey::Up)));
//! ```
//!
//! ## Legacy ids
//!
//! [`Key::legacy_id`] reproduces the numeric key codes of the C `libqwerty` library,
//! eg `Up == 279165`, so logs and tables keyed on those numbers keep working. A
//! key's identity is its byte sequence; the number is only a compatibility view.

// Enforce strict error handling in production library code only. Tests are allowed to
// use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach modules (re-exported below to provide clean public API).
pub mod clap_config;
pub mod constants;
pub mod decoder;
pub mod keyboard;
pub mod keycode;
pub mod log;
pub mod terminal_raw_mode;

// Re-export stable public API using glob imports for ergonomic, flat API surface.
pub use clap_config::*;
pub use constants::*;
pub use decoder::*;
pub use keyboard::*;
pub use keycode::*;
pub use log::*;
pub use terminal_raw_mode::*;
