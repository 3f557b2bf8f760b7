// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{DecodeOptions, KeyboardConfig, RawModeFlavor, TracingConfig, Utf8Policy};
use clap::{Args, Parser};
use std::time::Duration;
use tracing_core::LevelFilter;

/// More info: <https://docs.rs/clap/latest/clap/_derive/_tutorial/chapter_2/index.html>
#[derive(Debug, Parser)]
#[command(bin_name = "keypress")]
#[command(about = "⌨️ Show what each key press sends to the terminal")]
#[command(version)]
#[command(next_line_help = true)]
#[command(arg_required_else_help(false))]
/// More info: <https://docs.rs/clap/latest/clap/struct.Command.html#method.help_template>
#[command(
      help_template = "{about}\nVersion: {bin} {version} 💻\n\nPress keys to see their bytes, name and legacy id. Press the quit key to exit.\nUSAGE 📓:\n  keypress [\x1b[34moptions\x1b[0m]\n\n[options]\n{options}"
  )]
pub struct CLIArg {
    #[command(flatten)]
    pub keyboard_options: KeyboardOption,

    #[command(flatten)]
    pub global_options: GlobalOption,
}

#[derive(Debug, Args)]
pub struct KeyboardOption {
    #[arg(
        long,
        value_enum,
        default_value_t = RawModeFlavor::Keystroke,
        help = "How much of the terminal's line discipline to turn off. `keystroke` keeps Ctrl+C working; `full` passes it through as a key."
    )]
    pub flavor: RawModeFlavor,

    #[arg(
        long,
        value_enum,
        default_value_t = Utf8Policy::ExpectedLength,
        help = "How many bytes to read for a multi-byte UTF-8 character."
    )]
    pub utf8_policy: Utf8Policy,

    #[arg(
        long,
        default_value_t = 10,
        help = "Milliseconds to sleep between polls when no key is ready."
    )]
    pub poll_interval_ms: u64,

    #[arg(long, short = 'q', default_value_t = 'q', help = "Key that exits the program.")]
    pub quit_key: char,
}

#[derive(Debug, Args)]
pub struct GlobalOption {
    #[arg(
        global = true,
        long,
        short = 'l',
        help = "Log to this file for debugging. Logging is off without it."
    )]
    pub log_file: Option<String>,

    #[arg(
        global = true,
        long,
        default_value_t = LevelFilter::DEBUG,
        help = "Log level: off, error, warn, info, debug or trace."
    )]
    pub log_level: LevelFilter,
}

impl CLIArg {
    #[must_use]
    pub fn keyboard_config(&self) -> KeyboardConfig {
        let options = &self.keyboard_options;
        KeyboardConfig {
            raw_mode_flavor: options.flavor,
            decode_options: DecodeOptions {
                utf8_policy: options.utf8_policy,
                ..DecodeOptions::default()
            },
            poll_interval: Duration::from_millis(options.poll_interval_ms),
        }
    }

    /// Logs go to a file only; the terminal shows keys.
    #[must_use]
    pub fn tracing_config(&self) -> TracingConfig {
        match &self.global_options.log_file {
            Some(log_file) => {
                TracingConfig::new_file(log_file.clone(), self.global_options.log_level)
            }
            None => TracingConfig::default(),
        }
    }
}
