// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The single capability the key decoder needs from the outside world.
//!
//! A [`ByteSource`] hands out one byte per call and must be able to say "nothing right
//! now" ([`ReadByte::Pending`]) separately from "nothing ever again"
//! ([`ReadByte::Closed`]). The decoder relies on the first to find the end of an escape
//! sequence: the bytes of `ESC [ A` are written by the terminal in one go, so the
//! sequence ends at the first [`ReadByte::Pending`].
//!
//! Implementations:
//! - [`SliceByteSource`]: in-memory, for replay and tests.
//! - [`TtyByteSource`]: non-blocking `read(2)` on the controlling terminal (Unix).
//! - [`ConsoleByteSource`]: console key events re-encoded as VT bytes (Windows).
//!
//! [`TtyByteSource`]: crate::TtyByteSource
//! [`ConsoleByteSource`]: crate::ConsoleByteSource

/// Outcome of asking a [`ByteSource`] for its next byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadByte {
    Byte(u8),
    /// No byte is ready yet. Asking again later may produce one.
    Pending,
    /// The stream is finished. Device errors are reported this way too.
    Closed,
}

pub trait ByteSource {
    fn next_byte(&mut self) -> ReadByte;

    /// `true` once the source has reported [`ReadByte::Closed`] and will never produce
    /// another byte. Sources that cannot end keep the default.
    fn is_closed(&self) -> bool { false }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn next_byte(&mut self) -> ReadByte { (**self).next_byte() }

    fn is_closed(&self) -> bool { (**self).is_closed() }
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    fn next_byte(&mut self) -> ReadByte { (**self).next_byte() }

    fn is_closed(&self) -> bool { (**self).is_closed() }
}

/// Serves bytes from a slice, then reports `when_drained` forever.
#[derive(Clone, Debug)]
pub struct SliceByteSource<'a> {
    bytes: &'a [u8],
    consumed: usize,
    when_drained: ReadByte,
    reported_closed: bool,
}

impl<'a> SliceByteSource<'a> {
    /// Reports [`ReadByte::Closed`] once the slice is drained.
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            consumed: 0,
            when_drained: ReadByte::Closed,
            reported_closed: false,
        }
    }

    /// Reports [`ReadByte::Pending`] once the slice is drained, like an idle terminal.
    #[must_use]
    pub fn pending_when_drained(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            consumed: 0,
            when_drained: ReadByte::Pending,
            reported_closed: false,
        }
    }

    /// Number of bytes handed out so far.
    #[must_use]
    pub fn consumed(&self) -> usize { self.consumed }

    #[must_use]
    pub fn remaining(&self) -> &'a [u8] { &self.bytes[self.consumed..] }
}

impl ByteSource for SliceByteSource<'_> {
    fn next_byte(&mut self) -> ReadByte {
        match self.bytes.get(self.consumed) {
            Some(&byte) => {
                self.consumed += 1;
                ReadByte::Byte(byte)
            }
            None => {
                self.reported_closed = self.when_drained == ReadByte::Closed;
                self.when_drained
            }
        }
    }

    fn is_closed(&self) -> bool { self.reported_closed }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_source_drains_then_closes() {
        let mut source = SliceByteSource::new(b"ab");
        assert_eq!(source.next_byte(), ReadByte::Byte(b'a'));
        assert_eq!(source.remaining(), b"b");
        assert!(!source.is_closed());
        assert_eq!(source.next_byte(), ReadByte::Byte(b'b'));
        assert_eq!(source.next_byte(), ReadByte::Closed);
        assert!(source.is_closed());
        assert_eq!(source.next_byte(), ReadByte::Closed);
        assert_eq!(source.consumed(), 2);
    }

    #[test]
    fn test_slice_source_not_closed_until_closed_is_reported() {
        let mut source = SliceByteSource::new(b"a");
        assert_eq!(source.next_byte(), ReadByte::Byte(b'a'));
        assert!(source.remaining().is_empty());
        assert!(!source.is_closed());
        assert_eq!(source.next_byte(), ReadByte::Closed);
        assert!(source.is_closed());

        let empty = SliceByteSource::new(b"");
        assert!(!empty.is_closed());
    }

    #[test]
    fn test_slice_source_pending_when_drained() {
        let mut source = SliceByteSource::pending_when_drained(b"x");
        assert_eq!(source.next_byte(), ReadByte::Byte(b'x'));
        assert_eq!(source.next_byte(), ReadByte::Pending);
        assert!(source.remaining().is_empty());
        assert!(!source.is_closed());
    }

    #[test]
    fn test_source_through_mut_ref_and_box() {
        fn pull(mut source: impl ByteSource) -> ReadByte { source.next_byte() }

        let mut inner = SliceByteSource::new(b"z");
        assert_eq!(pull(&mut inner), ReadByte::Byte(b'z'));
        assert_eq!(inner.consumed(), 1);

        let mut boxed: Box<dyn ByteSource> = Box::new(SliceByteSource::new(b"y"));
        assert_eq!(boxed.next_byte(), ReadByte::Byte(b'y'));
        assert_eq!(boxed.next_byte(), ReadByte::Closed);
    }
}
