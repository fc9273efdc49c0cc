// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Codepoint ingestion support: UTF-8 decoding, grapheme cluster boundaries,
//! and display width.
//!
//! The VT parser does its own UTF-8 handling on the hot path; the standalone
//! decoder here serves byte re-ingestion outside the parser (pager history
//! reflow) and gives the engine one authoritative definition of the
//! malformed-input policy: every broken sequence becomes exactly one U+FFFD.

// Attach.
pub mod segmenter;
pub mod utf8;
pub mod width;

// Re-export.
pub use segmenter::*;
pub use utf8::*;
pub use width::*;
