// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io;

/// Failures while switching the terminal into raw mode or back. These surface as
/// [`miette::Report`]s from the session and backend APIs.
#[derive(thiserror::Error, Debug, miette::Diagnostic)]
pub enum TerminalModeErrorCouldNot {
    #[error("🖥️ Could not open the controlling terminal")]
    #[diagnostic(
        code(r3bl_keypress::open_terminal),
        help("/dev/tty could not be opened and stdin is not a tty")
    )]
    OpenTerminal {
        #[source]
        source: io::Error,
    },

    #[error("🔽 Could not read terminal attributes")]
    #[diagnostic(code(r3bl_keypress::get_attributes))]
    GetAttributes {
        #[source]
        source: io::Error,
    },

    #[error("🔼 Could not set terminal attributes")]
    #[diagnostic(code(r3bl_keypress::set_attributes))]
    SetAttributes {
        #[source]
        source: io::Error,
    },

    #[error("🔽 Could not read terminal file status flags")]
    #[diagnostic(code(r3bl_keypress::get_status_flags))]
    GetStatusFlags {
        #[source]
        source: io::Error,
    },

    #[error("🔼 Could not set terminal file status flags")]
    #[diagnostic(code(r3bl_keypress::set_status_flags))]
    SetStatusFlags {
        #[source]
        source: io::Error,
    },

    #[error("🔀 Could not duplicate the terminal file descriptor")]
    #[diagnostic(code(r3bl_keypress::duplicate_fd))]
    DuplicateFd {
        #[source]
        source: io::Error,
    },

    #[error("🚦 Could not register a handler for signal {signal}")]
    #[diagnostic(code(r3bl_keypress::register_signal_handler))]
    RegisterSignalHandler {
        signal: i32,
        #[source]
        source: io::Error,
    },

    #[error("❌ Could not change console mode")]
    #[diagnostic(code(r3bl_keypress::console_mode))]
    ConsoleMode {
        #[source]
        source: io::Error,
    },
}
