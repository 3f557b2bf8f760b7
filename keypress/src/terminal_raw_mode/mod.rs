// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Terminal raw mode for single key reads.
//!
//! ## Raw Mode vs Cooked Mode
//!
//! **Cooked Mode** (default):
//! - Input is line-buffered (waits for Enter key)
//! - Typed characters are echoed to the screen
//!
//! **Raw Mode** (as used here):
//! - No line buffering, bytes are available as soon as a key is pressed
//! - No echo
//! - Reads never block: "no key yet" is a normal answer
//!
//! How much further raw mode goes is chosen with [`RawModeFlavor`].
//!
//! ## The `stty` Command
//!
//! The termios settings changed here are the ones `stty` shows. To see them while a
//! [`TerminalSession`] is active, run `stty -a < /dev/pts/N` from another terminal:
//!
//! ```bash
//! stty -a          # Keystroke flavor shows: -icanon -echo isig min = 1; time = 0
//! ```
//!
//! To see which bytes a key sends:
//!
//! ```bash
//! stty raw -echo; cat -v; stty cooked echo
//! # Left arrow shows: ^[[D (ESC [ D)
//! ```
//!
//! ## Termination Signals
//!
//! [`RawModeFlavor::Keystroke`] keeps Ctrl+C working, and a signal ends the process
//! without unwinding, so no `Drop` runs. [`ShutdownSignal`] turns `SIGINT`, `SIGQUIT`,
//! `SIGTERM` and `SIGHUP` into a flag; [`Keyboard::wait_for_key`] returns `None` once
//! it is set and the caller restores the terminal as usual.
//!
//! [`Keyboard::wait_for_key`]: crate::Keyboard::wait_for_key
//!
//! ## Platform Support
//!
//! - **Unix/Linux/macOS**: [`UnixTermiosBackend`] and [`TtyByteSource`], through
//!   rustix's safe termios API
//! - **Windows**: [`ConsoleBackend`] and [`ConsoleByteSource`], through Crossterm
//!
//! [`PlatformBackend`] and [`PlatformByteSource`] name the pair for the current
//! target.
//!
//! ## Usage Example
//!
//! ```no_run
//! use r3bl_keypress::{KeyDecoder, PlatformBackend, RawModeFlavor, TerminalSession};
//!
//! let backend = PlatformBackend::new(RawModeFlavor::Keystroke)?;
//! let mut source = backend.byte_source()?;
//! {
//!     let _session = TerminalSession::enter(backend)?;
//!     let _key = KeyDecoder::default().decode_next_key(&mut source);
//! } // Prior mode restored here.
//! # Ok::<(), miette::Report>(())
//! ```

// Attach sources.
pub mod raw_mode_error;
pub mod shutdown_signal;
pub mod terminal_session;

#[cfg(unix)]
pub mod raw_mode_unix;

#[cfg(windows)]
pub mod raw_mode_windows;

// Re-export.
pub use raw_mode_error::*;
pub use shutdown_signal::*;
pub use terminal_session::*;

#[cfg(unix)]
pub use raw_mode_unix::*;

#[cfg(windows)]
pub use raw_mode_windows::*;

/// The raw mode backend for the current target.
#[cfg(unix)]
pub type PlatformBackend = UnixTermiosBackend;
#[cfg(windows)]
pub type PlatformBackend = ConsoleBackend;

/// The byte source that pairs with [`PlatformBackend`].
#[cfg(unix)]
pub type PlatformByteSource = TtyByteSource;
#[cfg(windows)]
pub type PlatformByteSource = ConsoleByteSource;

/// The backend and byte source for the current target, not yet in raw mode.
///
/// # Errors
///
/// Returns an error if there is no terminal to attach to.
pub fn platform_backend(
    flavor: RawModeFlavor,
) -> miette::Result<(PlatformBackend, PlatformByteSource)> {
    let backend = PlatformBackend::new(flavor)?;
    let source = backend.byte_source()?;
    Ok((backend, source))
}

// Test fixtures.
#[cfg(test)]
pub mod mock_backend;
#[cfg(test)]
pub use mock_backend::*;

// PTY fixtures and PTY-backed tests (Unix only).
#[cfg(all(unix, test))]
pub mod pty_test_fixtures;
#[cfg(all(unix, test))]
pub use pty_test_fixtures::*;
