// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Character-oriented overflow buffer behind the scrollback ring.
//!
//! Cell storage quantizes text to a grid width; once a line is evicted from
//! the ring there is no cell record left to re-flow on resize. The pager
//! history keeps the *text* of evicted lines (base characters only — combining
//! marks are part of the dropped extra data) so it can be re-broken at any
//! width. It is only consulted across resize and by scrollback pagers, never
//! by the hot ingest path.

use crate::{Line, Utf8Decoder, Utf8Step, char_display_width};

/// Byte-oriented ring of evicted line text with newline separators.
#[derive(Debug)]
pub struct PagerHist {
    bytes: Vec<u8>,
    max_bytes: usize,
    wrap_width: usize,
    /// Byte offsets where display rows start at the current wrap width.
    breaks: Vec<usize>,
}

impl PagerHist {
    #[must_use]
    pub fn new(max_bytes: usize) -> Self {
        Self {
            bytes: Vec::new(),
            max_bytes: max_bytes.max(1),
            wrap_width: 80,
            breaks: Vec::new(),
        }
    }

    /// Record the text of an evicted line.
    pub fn push_line(&mut self, line: &Line) {
        let last = line.as_line_ref().last_occupied_col();
        if let Some(last) = last {
            let mut scratch = [0_u8; 4];
            for x in 0..=last.as_usize() {
                if line.style[x].attrs.width() == 0 {
                    continue;
                }
                let ch = if line.content[x].is_blank() {
                    ' '
                } else {
                    line.content[x].ch
                };
                self.bytes
                    .extend_from_slice(ch.encode_utf8(&mut scratch).as_bytes());
            }
        }
        self.bytes.push(b'\n');
        self.evict_to_budget();
        self.reflow();
    }

    fn evict_to_budget(&mut self) {
        while self.bytes.len() > self.max_bytes {
            // Drop whole oldest lines so the buffer always starts at a line
            // boundary (and therefore at a character boundary).
            match self.bytes.iter().position(|&b| b == b'\n') {
                Some(newline) => {
                    self.bytes.drain(..=newline);
                }
                None => {
                    self.bytes.clear();
                }
            }
        }
    }

    /// Re-break the stored text at `width` display columns.
    pub fn rewrap(&mut self, width: usize) {
        self.wrap_width = width.max(1);
        self.reflow();
    }

    /// Recompute display-row break offsets by walking the raw bytes through
    /// the UTF-8 decoder.
    fn reflow(&mut self) {
        self.breaks.clear();
        if self.bytes.is_empty() {
            return;
        }
        self.breaks.push(0);

        let mut decoder = Utf8Decoder::new();
        let mut column = 0_usize;
        let mut scalar_start = 0_usize;

        for (i, &byte) in self.bytes.iter().enumerate() {
            if decoder.is_accept() {
                scalar_start = i;
            }
            match decoder.step(byte) {
                Utf8Step::Incomplete => {}
                Utf8Step::Codepoint(ch) | Utf8Step::Invalid(ch) => {
                    if ch == '\n' {
                        column = 0;
                        if i + 1 < self.bytes.len() {
                            self.breaks.push(i + 1);
                        }
                        continue;
                    }
                    let char_width = char_display_width(ch).max(1);
                    if column + char_width > self.wrap_width {
                        self.breaks.push(scalar_start);
                        column = 0;
                    }
                    column += char_width;
                }
            }
        }
    }

    /// Number of display rows at the current wrap width.
    #[must_use]
    pub fn display_line_count(&self) -> usize { self.breaks.len() }

    /// One display row's text.
    #[must_use]
    pub fn display_line(&self, index: usize) -> Option<String> {
        let start = *self.breaks.get(index)?;
        let end = self
            .breaks
            .get(index + 1)
            .copied()
            .unwrap_or(self.bytes.len());
        let mut text = String::from_utf8_lossy(&self.bytes[start..end]).into_owned();
        if text.ends_with('\n') {
            text.pop();
        }
        Some(text)
    }

    /// Entire buffer as text (tests and pager hand-off).
    #[must_use]
    pub fn text(&self) -> String { String::from_utf8_lossy(&self.bytes).into_owned() }

    pub fn clear(&mut self) {
        self.bytes.clear();
        self.breaks.clear();
    }
}
