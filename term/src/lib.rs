// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # `r3bl_term`
//!
//! Core terminal emulation engine: the byte-stream VT/ANSI/xterm parser, the
//! screen state machine that interprets it, cell-based line and history
//! buffers with rewrap-on-resize, grapheme-aware codepoint ingestion, and a
//! selection subsystem over the whole visual grid.
//!
//! The engine is deliberately blind to everything platform-shaped: no
//! windowing, no font or glyph handling, no child-process I/O, no GPU. An
//! embedder feeds it bytes and drains the effects:
//!
//! ```
//! use r3bl_term::{Screen, TermConfig, TermEvent, height, width};
//!
//! let mut screen = Screen::new(height(24) + width(80), TermConfig::default());
//! screen.apply_ansi_bytes(b"\x1b]2;hello\x07\x1b[1;31mhi\x1b[m");
//!
//! for event in screen.drain_events() {
//!     match event {
//!         TermEvent::SetTitle(title) => assert_eq!(title, "hello"),
//!         TermEvent::WriteToChild(_bytes) => { /* goes to the pty */ }
//!         _ => {}
//!     }
//! }
//!
//! // The renderer reads lines back out.
//! let line = screen.visual_line(0).unwrap();
//! assert_eq!(line.content[0].ch, 'h');
//! ```
//!
//! # Architecture
//!
//! ```text
//! bytes ──► vte parser ──► VtPerformer ──► operation modules ──► Screen
//!                                                                  │
//!                     ┌────────────────────────┬───────────────────┤
//!                     ▼                        ▼                   ▼
//!                  LineBuf (main/alt)     HistoryBuf          TermEvent queue
//!                  two parallel arrays    1024-row segments   (title, bell,
//!                  + line_map ring        + pager history      write-to-child)
//! ```
//!
//! Everything runs on one thread, nothing suspends, and ingest is
//! infallible: malformed escape sequences are absorbed, invalid UTF-8
//! becomes U+FFFD, degenerate geometry is coerced, and resource exhaustion
//! drops decoration rather than data.

// Attach.
pub mod cell;
pub mod color;
pub mod config;
pub mod history_buf;
pub mod line;
pub mod line_buf;
pub mod screen;
pub mod selection;
pub mod unicode;
pub mod units;
pub mod vt_parser;

// Re-export.
pub use cell::*;
pub use color::*;
pub use config::*;
pub use history_buf::*;
pub use line::*;
pub use line_buf::*;
pub use screen::*;
pub use selection::*;
pub use unicode::*;
pub use units::*;
pub use vt_parser::*;

// Cross-cutting conformance scenarios.
#[cfg(test)]
mod vt_conformance_tests;
