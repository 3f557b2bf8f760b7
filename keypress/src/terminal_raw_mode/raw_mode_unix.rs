// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Unix/Linux/macOS raw mode using rustix's safe termios API, plus the non-blocking
//! byte source that reads from the same terminal.
//!
//! Termios settings belong to the terminal device, but `O_NONBLOCK` belongs to one open
//! file description. The backend opens `/dev/tty` itself so the flag stays off the
//! description that stdin and stdout share; otherwise a write to stdout could fail with
//! `EAGAIN` while raw mode is on. Stdin is used only when `/dev/tty` cannot be opened,
//! and then that caveat applies.

use crate::{ByteSource, RawModeFlavor, ReadByte, TerminalModeBackend,
            TerminalModeErrorCouldNot};
use rustix::{fd::{AsFd, BorrowedFd, OwnedFd},
             fs::{OFlags, fcntl_getfl, fcntl_setfl},
             io::Errno,
             termios::{self, LocalModes, OptionalActions, SpecialCodeIndex, Termios}};
use std::{fs::File, io};

/// `VMIN`: a read returns as soon as one byte is available.
pub const VMIN_KEYSTROKE: u8 = 1;
/// `VTIME`: no inter-byte timer.
pub const VTIME_KEYSTROKE: u8 = 0;

/// The terminal whose mode is changed and whose bytes are read.
///
/// Normally a fresh open of `/dev/tty`, which also works when stdin is redirected (for
/// example `echo data | keypress`). Tests hand in a PTY slave directly.
#[derive(Debug)]
pub enum TerminalFd {
    Stdin(io::Stdin),
    DevTty(File),
    Owned(OwnedFd),
}

impl AsFd for TerminalFd {
    fn as_fd(&self) -> BorrowedFd<'_> {
        match self {
            TerminalFd::Stdin(stdin) => stdin.as_fd(),
            TerminalFd::DevTty(file) => file.as_fd(),
            TerminalFd::Owned(fd) => fd.as_fd(),
        }
    }
}

impl TerminalFd {
    /// `/dev/tty`, or stdin if that cannot be opened and stdin is a tty.
    ///
    /// # Errors
    ///
    /// Returns an error if `/dev/tty` cannot be opened and stdin is not a tty.
    pub fn controlling_terminal() -> io::Result<Self> {
        Self::prefer_dev_tty(
            File::options().read(true).write(true).open("/dev/tty"),
            io::stdin(),
        )
    }

    /// Picks between an attempt to open `/dev/tty` and stdin.
    ///
    /// # Errors
    ///
    /// Returns the `/dev/tty` error if `stdin` is not a tty either.
    pub fn prefer_dev_tty(
        dev_tty: io::Result<File>,
        stdin: io::Stdin,
    ) -> io::Result<Self> {
        match dev_tty {
            Ok(file) => Ok(TerminalFd::DevTty(file)),
            Err(err) if termios::isatty(&stdin) => {
                tracing::debug!(%err, "/dev/tty unavailable, falling back to stdin");
                Ok(TerminalFd::Stdin(stdin))
            }
            Err(err) => Err(err),
        }
    }
}

/// Everything [`UnixTermiosBackend`] changes, captured before it changes it.
#[derive(Debug, Clone)]
pub struct SavedTerminalState {
    pub termios: Termios,
    pub status_flags: OFlags,
}

/// Raw mode through `tcgetattr`/`tcsetattr`, with `O_NONBLOCK` set on the terminal so
/// reads report "no byte yet" instead of waiting.
#[derive(Debug)]
pub struct UnixTermiosBackend {
    flavor: RawModeFlavor,
    fd: TerminalFd,
}

impl UnixTermiosBackend {
    /// Backend for the controlling terminal.
    ///
    /// # Errors
    ///
    /// Returns [`TerminalModeErrorCouldNot::OpenTerminal`] if there is no terminal.
    pub fn new(flavor: RawModeFlavor) -> miette::Result<Self> {
        let fd = TerminalFd::controlling_terminal()
            .map_err(|source| TerminalModeErrorCouldNot::OpenTerminal { source })?;
        Ok(Self::with_fd(flavor, fd))
    }

    #[must_use]
    pub fn with_fd(flavor: RawModeFlavor, fd: TerminalFd) -> Self { Self { flavor, fd } }

    #[must_use]
    pub fn flavor(&self) -> RawModeFlavor { self.flavor }

    /// A reader for the same terminal. It shares the open file description, so the
    /// `O_NONBLOCK` flag set on entering raw mode applies to it too.
    ///
    /// # Errors
    ///
    /// Returns [`TerminalModeErrorCouldNot::DuplicateFd`] if the descriptor cannot be
    /// duplicated.
    pub fn byte_source(&self) -> miette::Result<TtyByteSource> {
        let fd = self
            .fd
            .as_fd()
            .try_clone_to_owned()
            .map_err(|source| TerminalModeErrorCouldNot::DuplicateFd { source })?;
        Ok(TtyByteSource::new(fd))
    }

    /// Applies `flavor` to a copy of `termios`.
    #[must_use]
    pub fn raw_termios(flavor: RawModeFlavor, termios: &Termios) -> Termios {
        let mut raw = termios.clone();
        match flavor {
            RawModeFlavor::Keystroke => {
                raw.local_modes.remove(LocalModes::ICANON | LocalModes::ECHO);
                raw.special_codes[SpecialCodeIndex::VMIN] = VMIN_KEYSTROKE;
                raw.special_codes[SpecialCodeIndex::VTIME] = VTIME_KEYSTROKE;
            }
            RawModeFlavor::Full => raw.make_raw(),
        }
        raw
    }

    fn set_termios(&self, termios: &Termios) -> Result<(), TerminalModeErrorCouldNot> {
        termios::tcsetattr(&self.fd, OptionalActions::Now, termios).map_err(|errno| {
            TerminalModeErrorCouldNot::SetAttributes {
                source: errno.into(),
            }
        })
    }

    fn set_status_flags(&self, flags: OFlags) -> Result<(), TerminalModeErrorCouldNot> {
        fcntl_setfl(&self.fd, flags).map_err(|errno| {
            TerminalModeErrorCouldNot::SetStatusFlags {
                source: errno.into(),
            }
        })
    }
}

impl TerminalModeBackend for UnixTermiosBackend {
    type Saved = SavedTerminalState;

    fn enter_raw_mode(&mut self) -> miette::Result<SavedTerminalState> {
        let termios = termios::tcgetattr(&self.fd).map_err(|errno| {
            TerminalModeErrorCouldNot::GetAttributes {
                source: errno.into(),
            }
        })?;
        let status_flags = fcntl_getfl(&self.fd).map_err(|errno| {
            TerminalModeErrorCouldNot::GetStatusFlags {
                source: errno.into(),
            }
        })?;

        self.set_termios(&Self::raw_termios(self.flavor, &termios))?;

        // Undo the termios change if the flags cannot be set.
        if let Err(err) = self.set_status_flags(status_flags | OFlags::NONBLOCK) {
            if let Err(rollback) = self.set_termios(&termios) {
                tracing::warn!(%rollback, "failed to roll back terminal attributes");
            }
            return Err(err.into());
        }

        tracing::debug!(flavor = ?self.flavor, "termios raw mode enabled");
        Ok(SavedTerminalState {
            termios,
            status_flags,
        })
    }

    fn restore_mode(&mut self, saved: SavedTerminalState) -> miette::Result<()> {
        // Attempt both even if the first fails.
        let termios_result = self.set_termios(&saved.termios);
        let flags_result = self.set_status_flags(saved.status_flags);
        termios_result?;
        flags_result?;
        tracing::debug!("termios prior mode restored");
        Ok(())
    }
}

/// Reads the terminal one byte at a time without blocking.
///
/// | `read(2)` result | Reported as           |
/// |:-----------------|:----------------------|
/// | 1 byte           | [`ReadByte::Byte`]    |
/// | `EAGAIN`         | [`ReadByte::Pending`] |
/// | `EINTR`          | retried               |
/// | 0 (end of file)  | [`ReadByte::Closed`]  |
/// | any other error  | [`ReadByte::Closed`]  |
///
/// Once closed, the source stays closed.
#[derive(Debug)]
pub struct TtyByteSource {
    fd: OwnedFd,
    closed: bool,
}

impl TtyByteSource {
    #[must_use]
    pub fn new(fd: OwnedFd) -> Self { Self { fd, closed: false } }
}

impl ByteSource for TtyByteSource {
    fn next_byte(&mut self) -> ReadByte {
        if self.closed {
            return ReadByte::Closed;
        }
        let mut buffer = [0_u8; 1];
        loop {
            match rustix::io::read(&self.fd, &mut buffer[..]) {
                Ok(0) => {
                    tracing::debug!("terminal reached end of file");
                    self.closed = true;
                    return ReadByte::Closed;
                }
                Ok(_) => return ReadByte::Byte(buffer[0]),
                Err(errno) if errno == Errno::AGAIN || errno == Errno::WOULDBLOCK => {
                    return ReadByte::Pending;
                }
                Err(errno) if errno == Errno::INTR => {}
                Err(errno) => {
                    tracing::warn!(%errno, "terminal read failed, treating as closed");
                    self.closed = true;
                    return ReadByte::Closed;
                }
            }
        }
    }

    fn is_closed(&self) -> bool { self.closed }
}
