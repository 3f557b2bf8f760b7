// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Key decoding: the [`ByteSource`] seam, the [`Key`] type and the [`KeyDecoder`].

// Attach sources.
pub mod byte_source;
pub mod key;
pub mod key_decoder;

#[cfg(test)]
pub mod test_fixtures;

// Re-export.
pub use byte_source::*;
pub use key::*;
pub use key_decoder::*;

#[cfg(test)]
pub use test_fixtures::*;
