// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Windows raw mode and input using Crossterm.
//!
//! The Windows console delivers key events, not bytes. [`ConsoleByteSource`] turns each
//! key press back into the VT byte sequence a Unix terminal would have sent, so the
//! same [`KeyDecoder`] works on both platforms.
//!
//! [`KeyDecoder`]: crate::KeyDecoder

use crate::{ByteSource, KeyCode, RawModeFlavor, ReadByte, SpecialKey,
            TerminalModeBackend, TerminalModeErrorCouldNot};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use std::{collections::VecDeque, time::Duration};

/// Raw mode through [`crossterm::terminal::enable_raw_mode()`], which clears
/// `ENABLE_LINE_INPUT`, `ENABLE_ECHO_INPUT` and `ENABLE_PROCESSED_INPUT` with
/// `SetConsoleMode()`. Both [`RawModeFlavor`]s map to this one console mode.
#[derive(Debug, Default)]
pub struct ConsoleBackend {
    flavor: RawModeFlavor,
}

impl ConsoleBackend {
    /// # Errors
    ///
    /// Never fails; the signature matches the Unix backend.
    pub fn new(flavor: RawModeFlavor) -> miette::Result<Self> { Ok(Self { flavor }) }

    #[must_use]
    pub fn flavor(&self) -> RawModeFlavor { self.flavor }

    /// # Errors
    ///
    /// Never fails; the signature matches the Unix backend.
    pub fn byte_source(&self) -> miette::Result<ConsoleByteSource> {
        Ok(ConsoleByteSource::default())
    }
}

impl TerminalModeBackend for ConsoleBackend {
    type Saved = ();

    fn enter_raw_mode(&mut self) -> miette::Result<()> {
        crossterm::terminal::enable_raw_mode()
            .map_err(|source| TerminalModeErrorCouldNot::ConsoleMode { source })?;
        tracing::debug!(flavor = ?self.flavor, "console raw mode enabled");
        Ok(())
    }

    fn restore_mode(&mut self, (): ()) -> miette::Result<()> {
        crossterm::terminal::disable_raw_mode()
            .map_err(|source| TerminalModeErrorCouldNot::ConsoleMode { source })?;
        tracing::debug!("console prior mode restored");
        Ok(())
    }
}

/// Console key presses, re-encoded as VT bytes and handed out one at a time.
#[derive(Debug, Default)]
pub struct ConsoleByteSource {
    queued: VecDeque<u8>,
    closed: bool,
}

impl ConsoleByteSource {
    /// Pulls ready console events until one produces bytes or none are left.
    fn refill(&mut self) -> ReadByte {
        loop {
            match event::poll(Duration::ZERO) {
                Ok(false) => return ReadByte::Pending,
                Ok(true) => {}
                Err(err) => return self.fail(&err),
            }
            match event::read() {
                Ok(Event::Key(key_event)) => {
                    self.queued.extend(vt_bytes_for(&key_event));
                    if let Some(byte) = self.queued.pop_front() {
                        return ReadByte::Byte(byte);
                    }
                }
                Ok(_) => {}
                Err(err) => return self.fail(&err),
            }
        }
    }

    fn fail(&mut self, err: &std::io::Error) -> ReadByte {
        tracing::warn!(%err, "console read failed, treating as closed");
        self.closed = true;
        ReadByte::Closed
    }
}

impl ByteSource for ConsoleByteSource {
    fn next_byte(&mut self) -> ReadByte {
        if let Some(byte) = self.queued.pop_front() {
            return ReadByte::Byte(byte);
        }
        if self.closed {
            return ReadByte::Closed;
        }
        self.refill()
    }

    fn is_closed(&self) -> bool { self.closed && self.queued.is_empty() }
}

/// The bytes a VT terminal sends for `key_event`. Releases and keys with no VT
/// equivalent produce nothing.
fn vt_bytes_for(key_event: &KeyEvent) -> Vec<u8> {
    use crossterm::event::KeyCode as ConsoleKeyCode;

    if key_event.kind == KeyEventKind::Release {
        return Vec::new();
    }
    let special = match key_event.code {
        ConsoleKeyCode::Char(ch) => {
            let mut buffer = [0; 4];
            return ch.encode_utf8(&mut buffer).as_bytes().to_vec();
        }
        ConsoleKeyCode::Up => SpecialKey::Up,
        ConsoleKeyCode::Down => SpecialKey::Down,
        ConsoleKeyCode::Right => SpecialKey::Right,
        ConsoleKeyCode::Left => SpecialKey::Left,
        ConsoleKeyCode::PageUp => SpecialKey::PageUp,
        ConsoleKeyCode::PageDown => SpecialKey::PageDown,
        ConsoleKeyCode::Home => SpecialKey::Home,
        ConsoleKeyCode::End => SpecialKey::End,
        ConsoleKeyCode::Insert => SpecialKey::Insert,
        ConsoleKeyCode::Delete => SpecialKey::Delete,
        ConsoleKeyCode::Esc => SpecialKey::Escape,
        ConsoleKeyCode::Tab => SpecialKey::Tab,
        ConsoleKeyCode::Backspace => SpecialKey::Backspace,
        ConsoleKeyCode::Enter => SpecialKey::Return,
        ConsoleKeyCode::F(number) => match function_key(number) {
            Some(special) => special,
            None => return Vec::new(),
        },
        _ => return Vec::new(),
    };
    KeyCode::Special(special).sequence().to_vec()
}

fn function_key(number: u8) -> Option<SpecialKey> {
    Some(match number {
        1 => SpecialKey::F1,
        2 => SpecialKey::F2,
        3 => SpecialKey::F3,
        4 => SpecialKey::F4,
        5 => SpecialKey::F5,
        6 => SpecialKey::F6,
        7 => SpecialKey::F7,
        8 => SpecialKey::F8,
        9 => SpecialKey::F9,
        10 => SpecialKey::F10,
        11 => SpecialKey::F11,
        12 => SpecialKey::F12,
        _ => return None,
    })
}
