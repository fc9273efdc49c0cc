// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! End-to-end conformance scenarios: bytes in, screen state out.
//!
//! Module-level unit tests live next to their code; everything here drives
//! the full pipeline (parser → screen → buffers) the way a pty feeder would,
//! and asserts on the externally observable state.

pub mod test_helpers;
mod test_invariants;
mod test_screen_state;
mod test_sgr_and_links;
mod test_text_and_wrap;
