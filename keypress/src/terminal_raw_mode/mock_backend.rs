// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::TerminalModeBackend;
use std::sync::{Arc,
                atomic::{AtomicUsize, Ordering}};

/// Counts calls instead of touching a terminal. Clones share the counters, so a test
/// can keep one after handing the backend to a session.
#[derive(Debug, Default, Clone)]
pub struct CountingBackend {
    pub entered: Arc<AtomicUsize>,
    pub restored: Arc<AtomicUsize>,
    pub fail_enter: bool,
    pub fail_restore: bool,
}

impl CountingBackend {
    pub fn entered_count(&self) -> usize { self.entered.load(Ordering::SeqCst) }

    pub fn restored_count(&self) -> usize { self.restored.load(Ordering::SeqCst) }
}

impl TerminalModeBackend for CountingBackend {
    type Saved = &'static str;

    fn enter_raw_mode(&mut self) -> miette::Result<Self::Saved> {
        if self.fail_enter {
            miette::bail!("enter failed");
        }
        self.entered.fetch_add(1, Ordering::SeqCst);
        Ok("cooked")
    }

    fn restore_mode(&mut self, saved: Self::Saved) -> miette::Result<()> {
        assert_eq!(saved, "cooked");
        self.restored.fetch_add(1, Ordering::SeqCst);
        if self.fail_restore {
            miette::bail!("restore failed");
        }
        Ok(())
    }
}
