// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};

/// A log file appender that never rolls over. Appends to the file if it exists.
///
/// Note that if you wrap this up in a non blocking writer, it doesn't work. Here's an
/// example of this:
/// `tracing_appender::non_blocking(try_create("keypress.log")?)`
///
/// # Errors
///
/// Returns an error if:
/// - The path has no file name
/// - Insufficient permissions to access the file or directory
pub fn try_create(
    path_str: &str,
) -> miette::Result<RollingFileAppender> {
    let path = Path::new(path_str);

    let file_name = path.file_name().ok_or_else(|| {
        miette::miette!(
            "Can't access file name {}. It might not exist, or don't have required permissions.",
            path.display()
        )
    })?;

    // A bare file name has an empty parent, meaning the current folder.
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(parent)
        .map_err(|err| {
            miette::miette!(
                "Can't create log file {}. The folder might not exist, or don't have required permissions: {err}",
                path.display()
            )
        })
}
