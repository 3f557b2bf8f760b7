// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{ByteSource, ReadByte};
use std::collections::VecDeque;

/// Replays a fixed script of [`ReadByte`] results, then reports [`ReadByte::Closed`].
/// Lets tests model a terminal that goes idle between key presses.
#[derive(Debug, Default)]
pub struct ScriptedByteSource {
    script: VecDeque<ReadByte>,
    reported_closed: bool,
}

impl ScriptedByteSource {
    pub fn new(script: impl IntoIterator<Item = ReadByte>) -> Self {
        Self {
            script: script.into_iter().collect(),
            reported_closed: false,
        }
    }
}

impl ByteSource for ScriptedByteSource {
    fn next_byte(&mut self) -> ReadByte {
        let read_byte = self.script.pop_front().unwrap_or(ReadByte::Closed);
        if read_byte == ReadByte::Closed {
            self.reported_closed = true;
        }
        read_byte
    }

    fn is_closed(&self) -> bool { self.reported_closed }
}
