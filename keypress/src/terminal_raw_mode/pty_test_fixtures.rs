// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use portable_pty::{PtyPair, PtySize, native_pty_system};
use std::{fmt::{Debug, Formatter},
          fs::File,
          path::PathBuf};

/// A pseudo-terminal opened inside the test process. The master end plays the user
/// typing; `slave` is the terminal under test, opened from `slave_path`.
pub struct TestPty {
    pub pair: PtyPair,
    pub slave: File,
    pub slave_path: PathBuf,
}

impl Debug for TestPty {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestPty")
            .field("slave", &self.slave)
            .field("slave_path", &self.slave_path)
            .finish_non_exhaustive()
    }
}

/// `None` when the host cannot allocate a PTY (some sandboxes and CI runners). Tests
/// return early in that case.
pub fn open_test_pty() -> Option<TestPty> {
    let pair = match native_pty_system().openpty(PtySize {
        rows: 24,
        cols: 80,
        pixel_width: 0,
        pixel_height: 0,
    }) {
        Ok(pair) => pair,
        Err(err) => {
            eprintln!("⏭️  Skipped: could not open a PTY: {err}");
            return None;
        }
    };
    let slave_path = pair.master.tty_name()?;
    let slave = File::options().read(true).write(true).open(&slave_path).ok()?;
    Some(TestPty {
        pair,
        slave,
        slave_path,
    })
}
