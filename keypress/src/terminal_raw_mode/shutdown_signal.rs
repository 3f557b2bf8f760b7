// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Termination signals as a flag that the key loop checks, so the terminal goes back to
//! its prior mode through [`Keyboard::close`] instead of the process dying in raw mode.
//!
//! | Signal    | Sent when                                                  |
//! |:----------|:-----------------------------------------------------------|
//! | `SIGINT`  | Ctrl+C, since [`RawModeFlavor::Keystroke`] keeps `ISIG`    |
//! | `SIGQUIT` | Ctrl+\\                                                    |
//! | `SIGTERM` | `kill <pid>`                                               |
//! | `SIGHUP`  | the terminal hangs up                                      |
//!
//! While no [`ShutdownSignal`] is alive, these signals get their default action (the
//! process terminates). On Windows, console raw mode delivers Ctrl+C as a key, so no
//! handlers are registered.
//!
//! [`Keyboard::close`]: crate::Keyboard::close
//! [`RawModeFlavor::Keystroke`]: crate::RawModeFlavor::Keystroke

use signal_hook::SigId;
use std::sync::{Arc,
                atomic::{AtomicBool, Ordering}};

#[cfg(unix)]
use crate::TerminalModeErrorCouldNot;
#[cfg(unix)]
use signal_hook::consts::{SIGHUP, SIGINT, SIGQUIT, SIGTERM};
#[cfg(unix)]
use std::{ffi::c_int,
          sync::{Mutex, PoisonError}};

#[cfg(unix)]
pub const SHUTDOWN_SIGNALS: [c_int; 4] = [SIGINT, SIGQUIT, SIGTERM, SIGHUP];

/// Records termination signals for as long as it is alive, instead of letting them
/// terminate the process.
#[derive(Debug)]
pub struct ShutdownSignal {
    requested: Arc<AtomicBool>,
    handler_ids: Vec<SigId>,
}

impl ShutdownSignal {
    /// # Errors
    ///
    /// Returns [`TerminalModeErrorCouldNot::RegisterSignalHandler`] if a handler cannot
    /// be installed.
    ///
    /// [`TerminalModeErrorCouldNot::RegisterSignalHandler`]: crate::TerminalModeErrorCouldNot::RegisterSignalHandler
    pub fn register() -> miette::Result<Self> {
        let requested = Arc::new(AtomicBool::new(false));
        let handler_ids = register_handlers(&requested)?;
        tracing::debug!(count = handler_ids.len(), "shutdown signal handlers registered");
        Ok(Self {
            requested,
            handler_ids,
        })
    }

    #[must_use]
    pub fn is_requested(&self) -> bool { self.requested.load(Ordering::SeqCst) }
}

impl Drop for ShutdownSignal {
    fn drop(&mut self) {
        for id in self.handler_ids.drain(..) {
            signal_hook::low_level::unregister(id);
        }
        release_default_actions();
    }
}

/// Emulates each signal's default action while `armed` is set. Registered once per
/// process and never unregistered, since signal-hook does not bring the original
/// disposition back when the last handler goes away.
#[cfg(unix)]
#[derive(Debug)]
struct DefaultActions {
    live: usize,
    armed: Arc<AtomicBool>,
}

#[cfg(unix)]
static DEFAULT_ACTIONS: Mutex<Option<DefaultActions>> = Mutex::new(None);

#[cfg(unix)]
impl DefaultActions {
    fn register() -> miette::Result<Self> {
        let armed = Arc::new(AtomicBool::new(true));
        for signal in SHUTDOWN_SIGNALS {
            if let Err(source) =
                signal_hook::flag::register_conditional_default(signal, Arc::clone(&armed))
            {
                // A later attempt registers a fresh set; this one must stay inert.
                armed.store(false, Ordering::SeqCst);
                return Err(
                    TerminalModeErrorCouldNot::RegisterSignalHandler { signal, source }.into()
                );
            }
        }
        Ok(Self { live: 0, armed })
    }
}

#[cfg(unix)]
fn register_handlers(requested: &Arc<AtomicBool>) -> miette::Result<Vec<SigId>> {
    let mut defaults = DEFAULT_ACTIONS.lock().unwrap_or_else(PoisonError::into_inner);
    if defaults.is_none() {
        *defaults = Some(DefaultActions::register()?);
    }

    let mut handler_ids = Vec::with_capacity(SHUTDOWN_SIGNALS.len());
    for signal in SHUTDOWN_SIGNALS {
        match signal_hook::flag::register(signal, Arc::clone(requested)) {
            Ok(id) => handler_ids.push(id),
            Err(source) => {
                for id in handler_ids {
                    signal_hook::low_level::unregister(id);
                }
                return Err(
                    TerminalModeErrorCouldNot::RegisterSignalHandler { signal, source }.into()
                );
            }
        }
    }

    if let Some(defaults) = defaults.as_mut() {
        defaults.live += 1;
        defaults.armed.store(false, Ordering::SeqCst);
    }
    Ok(handler_ids)
}

#[cfg(unix)]
fn release_default_actions() {
    let mut defaults = DEFAULT_ACTIONS.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(defaults) = defaults.as_mut() {
        defaults.live = defaults.live.saturating_sub(1);
        if defaults.live == 0 {
            defaults.armed.store(true, Ordering::SeqCst);
        }
    }
}

#[cfg(windows)]
#[allow(clippy::unnecessary_wraps)]
fn register_handlers(_requested: &Arc<AtomicBool>) -> miette::Result<Vec<SigId>> {
    Ok(vec![])
}

#[cfg(windows)]
fn release_default_actions() {}

#[cfg(all(unix, test))]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serial_test::serial;
    use signal_hook::low_level::raise;

    #[test]
    #[serial]
    fn test_signal_sets_flag_instead_of_terminating() {
        let shutdown = ShutdownSignal::register().unwrap();
        assert!(!shutdown.is_requested());

        raise(SIGTERM).unwrap();

        assert!(shutdown.is_requested());
    }

    #[test]
    #[serial]
    fn test_each_signal_is_handled() {
        for signal in [SIGINT, SIGQUIT, SIGHUP] {
            let shutdown = ShutdownSignal::register().unwrap();
            raise(signal).unwrap();
            assert!(shutdown.is_requested(), "signal {signal} was not recorded");
        }
    }

    #[test]
    #[serial]
    fn test_default_action_stays_off_while_any_handler_lives() {
        let first = ShutdownSignal::register().unwrap();
        let second = ShutdownSignal::register().unwrap();
        drop(first);

        raise(SIGINT).unwrap();

        assert!(second.is_requested());
        let defaults = DEFAULT_ACTIONS.lock().unwrap();
        let defaults = defaults.as_ref().unwrap();
        assert_eq!(defaults.live, 1);
        assert!(!defaults.armed.load(Ordering::SeqCst));
    }

    #[test]
    #[serial]
    fn test_default_action_rearmed_after_last_drop() {
        drop(ShutdownSignal::register().unwrap());

        let defaults = DEFAULT_ACTIONS.lock().unwrap();
        let defaults = defaults.as_ref().unwrap();
        assert_eq!(defaults.live, 0);
        assert!(defaults.armed.load(Ordering::SeqCst));
    }
}
