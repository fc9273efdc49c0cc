// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Engine configuration.
//!
//! A plain value the embedder fills in — parsing a config *file* is outside
//! the core. Defaults match common emulator behavior; override with struct
//! update syntax:
//!
//! ```
//! use r3bl_term::TermConfig;
//! let config = TermConfig {
//!     scrollback_lines: 10_000,
//!     ..TermConfig::default()
//! };
//! ```

/// Knobs the engine reads at construction and during operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermConfig {
    /// HistoryBuf capacity in lines.
    pub scrollback_lines: usize,
    /// Pager-history byte budget for text evicted from scrollback.
    /// 0 disables the pager buffer.
    pub pagerhist_bytes: usize,
    /// Default tab stop interval.
    pub tab_interval: usize,
    /// Characters (beyond alphanumerics) that word selection treats as part
    /// of a word.
    pub select_by_word_characters: String,
    /// DA1 reply: "VT220 with extensions".
    pub da1_reply: Vec<u8>,
    /// DA2 reply: terminal id / firmware version / cartridge.
    pub da2_reply: Vec<u8>,
}

impl Default for TermConfig {
    fn default() -> Self {
        Self {
            scrollback_lines: 2000,
            pagerhist_bytes: 512 * 1024,
            tab_interval: 8,
            select_by_word_characters: "@-./_~?&=%+#".to_string(),
            da1_reply: b"\x1b[?62;c".to_vec(),
            da2_reply: b"\x1b[>1;4000;30c".to_vec(),
        }
    }
}
