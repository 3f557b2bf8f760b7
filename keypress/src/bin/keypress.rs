// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use clap::Parser;
use miette::IntoDiagnostic as _;
use r3bl_keypress::{CLIArg, Keyboard, KeyReport};
use std::io::Write as _;

fn main() -> miette::Result<()> {
    let cli_arg = CLIArg::parse();
    cli_arg.tracing_config().install_global()?;

    let quit_key = cli_arg.keyboard_options.quit_key;
    let mut keyboard = Keyboard::open(cli_arg.keyboard_config())?;
    tracing::info!(?quit_key, "keypress started");

    // Raw mode may turn off output processing, so end lines with "\r\n".
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "Press keys to see what they send. Press {quit_key:?} to quit.\r\n")
        .into_diagnostic()?;
    write!(stdout, "{:<8} {:<25} {:<13} legacy id\r\n", "kind", "bytes", "name")
        .into_diagnostic()?;
    stdout.flush().into_diagnostic()?;

    while let Some(key) = keyboard.wait_for_key() {
        write!(stdout, "{}\r\n", KeyReport(&key)).into_diagnostic()?;
        stdout.flush().into_diagnostic()?;
        if key.as_char() == Some(quit_key) {
            break;
        }
    }

    tracing::info!("keypress exiting");
    keyboard.close()
}
