// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! One-stop keyboard: raw mode, a byte source, and a decoder behind a single value.
//!
//! ```no_run
//! use r3bl_keypress::{Keyboard, KeyboardConfig};
//!
//! let mut keyboard = Keyboard::open(KeyboardConfig::default())?;
//! while let Some(key) = keyboard.wait_for_key() {
//!     if key.as_char() == Some('q') {
//!         break;
//!     }
//!     println!("{key}\r");
//! }
//! keyboard.close()?;
//! # Ok::<(), miette::Report>(())
//! ```

use crate::{ByteSource, DecodeOptions, Key, KeyDecoder, PlatformBackend,
            PlatformByteSource, RawModeFlavor, ShutdownSignal, TerminalModeBackend,
            TerminalSession, platform_backend};
use std::time::Duration;

/// Sleep between polls in [`Keyboard::wait_for_key`].
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyboardConfig {
    pub raw_mode_flavor: RawModeFlavor,
    pub decode_options: DecodeOptions,
    pub poll_interval: Duration,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            raw_mode_flavor: RawModeFlavor::default(),
            decode_options: DecodeOptions::default(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Reads keys from the terminal while holding it in raw mode.
///
/// The terminal goes back to its prior mode on [`Keyboard::close`] or when the
/// keyboard is dropped, whichever comes first. A keyboard from [`Keyboard::open`] also
/// catches termination signals (see [`ShutdownSignal`]) so that happens before exit.
#[derive(Debug)]
pub struct Keyboard<B = PlatformBackend, S = PlatformByteSource>
where
    B: TerminalModeBackend,
    S: ByteSource,
{
    session: TerminalSession<B>,
    source: S,
    decoder: KeyDecoder,
    poll_interval: Duration,
    /// Dropped after `session`, so signals are caught until the mode is restored.
    shutdown: Option<ShutdownSignal>,
}

impl Keyboard {
    /// Attach to the controlling terminal and switch it into raw mode.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no terminal, its mode cannot be changed, or the
    /// signal handlers cannot be installed.
    pub fn open(config: KeyboardConfig) -> miette::Result<Self> {
        let shutdown = ShutdownSignal::register()?;
        let (backend, source) = platform_backend(config.raw_mode_flavor)?;
        let session = TerminalSession::enter(backend)?;
        Ok(Self::from_parts(session, source, config).with_shutdown_signal(shutdown))
    }
}

impl<B: TerminalModeBackend, S: ByteSource> Keyboard<B, S> {
    /// `source` must read from the terminal that `session` put into raw mode.
    pub fn from_parts(
        session: TerminalSession<B>,
        source: S,
        config: KeyboardConfig,
    ) -> Self {
        Self {
            session,
            source,
            decoder: KeyDecoder::new(config.decode_options),
            poll_interval: config.poll_interval,
            shutdown: None,
        }
    }

    /// Make [`Keyboard::wait_for_key`] stop once `shutdown` records a signal.
    #[must_use]
    pub fn with_shutdown_signal(mut self, shutdown: ShutdownSignal) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    #[must_use]
    pub fn decoder(&self) -> &KeyDecoder { &self.decoder }

    #[must_use]
    pub fn shutdown_requested(&self) -> bool {
        self.shutdown.as_ref().is_some_and(ShutdownSignal::is_requested)
    }

    /// The key pressed since the last call, or `None` if there is none. Never waits
    /// for a key press.
    pub fn poll_key(&mut self) -> Option<Key> {
        self.decoder.decode_next_key(&mut self.source)
    }

    /// Polls until a key arrives, sleeping `poll_interval` between attempts. Returns
    /// `None` once the terminal is gone or a termination signal has arrived.
    pub fn wait_for_key(&mut self) -> Option<Key> {
        loop {
            if self.shutdown_requested() {
                tracing::debug!("shutdown signal received");
                return None;
            }
            if let Some(key) = self.poll_key() {
                return Some(key);
            }
            if self.source.is_closed() {
                tracing::debug!("keyboard source closed");
                return None;
            }
            std::thread::sleep(self.poll_interval);
        }
    }

    /// Restore the prior terminal mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the prior mode cannot be written back.
    pub fn close(self) -> miette::Result<()> { self.session.restore() }
}
