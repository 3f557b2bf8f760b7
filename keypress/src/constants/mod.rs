// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Byte-level constants for key decoding, organized by protocol:
//! - **`input_sequences`**: VT100 / xterm escape sequences and control characters.
//! - **`utf8`**: UTF-8 lead byte masks.

// Skip rustfmt for rest of file to preserve manual alignment.
// https://stackoverflow.com/a/75910283/2085356
#![cfg_attr(rustfmt, rustfmt_skip)]

// Attach.
pub mod input_sequences;
pub mod utf8;

// Re-export.
pub use input_sequences::*;
pub use utf8::*;
