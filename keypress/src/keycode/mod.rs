// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Keycode table: the static set of recognized named keys.

// Attach sources.
pub mod keycode_table;
pub mod legacy_id;

// Re-export.
pub use keycode_table::*;
pub use legacy_id::*;
