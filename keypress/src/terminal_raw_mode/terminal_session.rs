// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Owned terminal session and the platform seam it is built on.
//!
//! This module provides:
//! - [`TerminalModeBackend`], the narrow "enter raw mode / restore mode" capability that
//!   each platform implements
//! - [`TerminalSession`], the RAII wrapper that holds the saved mode and restores it
//!   exactly once

use std::fmt::{Debug, Formatter};

/// How much of the line discipline to switch off.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum RawModeFlavor {
    /// Clear `ICANON` and `ECHO` only, with `VMIN=1`, `VTIME=0`. Ctrl+C still raises
    /// `SIGINT` and Enter still arrives as `\n`. This is what `libqwerty` did.
    #[default]
    Keystroke,
    /// `cfmakeraw()`: also disables signal generation, flow control and output
    /// processing. Ctrl+C arrives as byte `0x03`, Enter as `\r`.
    Full,
}

/// Platform specific raw mode mechanics.
///
/// [`enter_raw_mode`] returns whatever the backend needs to undo its changes. The
/// session hands that value back to [`restore_mode`] exactly once.
///
/// [`enter_raw_mode`]: TerminalModeBackend::enter_raw_mode
/// [`restore_mode`]: TerminalModeBackend::restore_mode
pub trait TerminalModeBackend {
    type Saved;

    /// # Errors
    ///
    /// Returns an error if the terminal mode cannot be read or changed. The terminal
    /// must be left in its prior mode in that case.
    fn enter_raw_mode(&mut self) -> miette::Result<Self::Saved>;

    /// # Errors
    ///
    /// Returns an error if the saved mode cannot be written back.
    fn restore_mode(&mut self, saved: Self::Saved) -> miette::Result<()>;
}

/// Raw mode for as long as this value lives.
///
/// Restores the prior terminal mode when [`restore`] is called or, failing that, when
/// the session is dropped. That includes early returns and panics that unwind through
/// the owner. Each session restores at most once.
///
/// ```no_run
/// use r3bl_keypress::{RawModeFlavor, TerminalSession, UnixTermiosBackend};
///
/// let backend = UnixTermiosBackend::new(RawModeFlavor::Keystroke)?;
/// let session = TerminalSession::enter(backend)?;
/// // ... read keys ...
/// session.restore()?;
/// # Ok::<(), miette::Report>(())
/// ```
///
/// [`restore`]: TerminalSession::restore
pub struct TerminalSession<B: TerminalModeBackend> {
    backend: B,
    saved: Option<B::Saved>,
}

impl<B: TerminalModeBackend> TerminalSession<B> {
    /// Switch the terminal into raw mode through `backend`.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if raw mode cannot be entered.
    pub fn enter(mut backend: B) -> miette::Result<Self> {
        let saved = backend.enter_raw_mode()?;
        tracing::debug!("terminal session entered raw mode");
        Ok(Self {
            backend,
            saved: Some(saved),
        })
    }

    #[must_use]
    pub fn backend(&self) -> &B { &self.backend }

    /// `true` until the prior mode has been restored.
    #[must_use]
    pub fn is_active(&self) -> bool { self.saved.is_some() }

    /// Restore the prior terminal mode now and end the session.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if the saved mode cannot be written back. The
    /// session is over either way; dropping it will not retry.
    pub fn restore(mut self) -> miette::Result<()> { self.restore_once() }

    fn restore_once(&mut self) -> miette::Result<()> {
        match self.saved.take() {
            Some(saved) => {
                tracing::debug!("terminal session restoring prior mode");
                self.backend.restore_mode(saved)
            }
            None => Ok(()),
        }
    }
}

impl<B: TerminalModeBackend> Drop for TerminalSession<B> {
    fn drop(&mut self) {
        if let Err(report) = self.restore_once() {
            tracing::warn!(?report, "failed to restore terminal mode");
        }
    }
}

impl<B: TerminalModeBackend> Debug for TerminalSession<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalSession")
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ByteSource, CountingBackend, KeyDecoder, ReadByte};
    use pretty_assertions::assert_eq;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    /// Yields the first byte of an escape sequence, then dies mid-sequence.
    struct PanickingSource {
        served: bool,
    }

    impl ByteSource for PanickingSource {
        fn next_byte(&mut self) -> ReadByte {
            if self.served {
                panic!("terminal went away mid-sequence");
            }
            self.served = true;
            ReadByte::Byte(0x1B)
        }
    }

    #[test]
    fn test_explicit_restore_fires_once() {
        let backend = CountingBackend::default();
        let counters = backend.clone();

        let session = TerminalSession::enter(backend).unwrap();
        assert!(session.is_active());
        assert_eq!(session.backend().entered_count(), 1);

        session.restore().unwrap();
        assert_eq!(counters.restored_count(), 1);
    }

    #[test]
    fn test_drop_restores_once() {
        let backend = CountingBackend::default();
        let counters = backend.clone();
        {
            let _session = TerminalSession::enter(backend).unwrap();
        }
        assert_eq!(counters.restored_count(), 1);
    }

    #[test]
    fn test_restore_fires_once_when_decode_panics() {
        let backend = CountingBackend::default();
        let counters = backend.clone();

        let result = catch_unwind(AssertUnwindSafe(move || {
            let _session = TerminalSession::enter(backend).unwrap();
            let mut source = PanickingSource { served: false };
            KeyDecoder::default().decode_next_key(&mut source)
        }));

        assert!(result.is_err());
        assert_eq!(counters.restored_count(), 1);
    }

    #[test]
    fn test_restore_fires_once_on_early_return() {
        fn read_then_bail(backend: CountingBackend) -> miette::Result<()> {
            let _session = TerminalSession::enter(backend)?;
            miette::bail!("caller gave up");
        }

        let backend = CountingBackend::default();
        let counters = backend.clone();
        assert!(read_then_bail(backend).is_err());
        assert_eq!(counters.restored_count(), 1);
    }

    #[test]
    fn test_failed_restore_is_not_retried_on_drop() {
        let backend = CountingBackend {
            fail_restore: true,
            ..CountingBackend::default()
        };
        let counters = backend.clone();

        let session = TerminalSession::enter(backend).unwrap();
        assert!(session.restore().is_err());
        assert_eq!(counters.restored_count(), 1);
    }

    #[test]
    fn test_failed_enter_never_restores() {
        let backend = CountingBackend {
            fail_enter: true,
            ..CountingBackend::default()
        };
        let counters = backend.clone();

        assert!(TerminalSession::enter(backend).is_err());
        assert_eq!(counters.restored_count(), 0);
    }

    #[test]
    fn test_debug_shows_activity() {
        let session = TerminalSession::enter(CountingBackend::default()).unwrap();
        assert_eq!(format!("{session:?}"), "TerminalSession { active: true, .. }");
    }
}
