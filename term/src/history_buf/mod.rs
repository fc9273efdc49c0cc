// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Scrollback storage.
//!
//! A logical ring of up to `maxsz` lines, physically held in fixed-size
//! segments of [`SEGMENT_ROWS`] rows so growing scrollback never reallocates
//! one huge contiguous block. Lines arrive when the main screen scrolls off
//! its top and leave at the tail when the ring is full; evicted text falls
//! through to the optional [`PagerHist`] character buffer.
//!
//! Indexing is youngest-first: `line_at(0)` is the most recently pushed line,
//! matching the presenter's negative-y addressing.

// Attach.
pub mod pagerhist;

// Re-export.
pub use pagerhist::*;

use std::collections::VecDeque;

use crate::{Line, line_buf::rewrap::{FlatCell, emit_logical_line}};

/// Rows per physical segment.
pub const SEGMENT_ROWS: usize = 1024;

/// Append-only scrollback ring.
#[derive(Debug)]
pub struct HistoryBuf {
    segments: VecDeque<Vec<Line>>,
    /// Offset of the oldest live line inside the front segment.
    start_of_data: usize,
    count: usize,
    maxsz: usize,
    pagerhist: Option<PagerHist>,
}

impl HistoryBuf {
    #[must_use]
    pub fn new(maxsz: usize) -> Self {
        Self {
            segments: VecDeque::new(),
            start_of_data: 0,
            count: 0,
            maxsz,
            pagerhist: None,
        }
    }

    /// Attach a pager-history character buffer of `max_bytes` that catches
    /// text evicted from the ring.
    #[must_use]
    pub fn with_pagerhist(maxsz: usize, max_bytes: usize) -> Self {
        let mut buf = Self::new(maxsz);
        buf.pagerhist = Some(PagerHist::new(max_bytes));
        buf
    }

    #[must_use]
    pub fn count(&self) -> usize { self.count }

    #[must_use]
    pub fn maxsz(&self) -> usize { self.maxsz }

    #[must_use]
    pub fn pagerhist(&self) -> Option<&PagerHist> { self.pagerhist.as_ref() }

    /// Append a line scrolled off the screen. Evicts the oldest line first
    /// when the ring is at capacity.
    pub fn add_line(&mut self, line: Line) {
        if self.maxsz == 0 {
            if let Some(pager) = &mut self.pagerhist {
                pager.push_line(&line);
            }
            return;
        }
        if self.count == self.maxsz {
            self.evict_oldest();
        }
        let needs_segment = self
            .segments
            .back()
            .is_none_or(|segment| segment.len() == SEGMENT_ROWS);
        if needs_segment {
            self.segments.push_back(Vec::with_capacity(SEGMENT_ROWS));
        }
        self.segments.back_mut().expect("pushed above").push(line);
        self.count += 1;
    }

    fn evict_oldest(&mut self) {
        debug_assert!(self.count > 0);
        {
            let front = &self.segments[0];
            if let Some(pager) = &mut self.pagerhist {
                pager.push_line(&front[self.start_of_data]);
            }
        }
        self.start_of_data += 1;
        self.count -= 1;
        if self.start_of_data == SEGMENT_ROWS {
            self.segments.pop_front();
            self.start_of_data = 0;
        }
    }

    /// The k-th most recent line; `k = 0` is the youngest. `None` past the
    /// oldest line.
    #[must_use]
    pub fn line_at(&self, k: usize) -> Option<&Line> {
        if k >= self.count {
            return None;
        }
        let absolute = self.start_of_data + (self.count - 1 - k);
        let segment = absolute / SEGMENT_ROWS;
        let slot = absolute % SEGMENT_ROWS;
        self.segments.get(segment)?.get(slot)
    }

    /// Mutable access for in-place maintenance (mark-pool compaction).
    pub(crate) fn line_at_mut(&mut self, k: usize) -> Option<&mut Line> {
        if k >= self.count {
            return None;
        }
        let absolute = self.start_of_data + (self.count - 1 - k);
        let segment = absolute / SEGMENT_ROWS;
        let slot = absolute % SEGMENT_ROWS;
        self.segments.get_mut(segment)?.get_mut(slot)
    }

    /// Re-flow the whole ring at `new_xnum` columns, preserving logical-line
    /// linkage. Lines that no longer fit the capacity leave through the tail
    /// into the pager history.
    pub fn rewrap(&mut self, new_xnum: usize) {
        let new_xnum = new_xnum.max(1);
        if self.count == 0 {
            if let Some(pager) = &mut self.pagerhist {
                pager.rewrap(new_xnum);
            }
            return;
        }

        // Oldest → youngest walk, grouping on the continuation bit.
        let mut logicals: Vec<Vec<FlatCell>> = Vec::new();
        for k in (0..self.count).rev() {
            let line = self.line_at(k).expect("k < count");
            let is_continued = line.attrs.is_continued();
            if logicals.is_empty() || !is_continued {
                logicals.push(Vec::new());
            }
            let logical = logicals.last_mut().expect("pushed above");
            let base_col = logical.last().map_or(0, |cell| {
                cell.orig_col + usize::from(cell.style.attrs.width().max(1))
            });
            let mut offset = 0;
            for x in 0..line.content.len() {
                let style = line.style[x];
                if style.attrs.width() == 0 {
                    continue;
                }
                logical.push(FlatCell {
                    content: line.content[x],
                    style,
                    orig_col: base_col + offset,
                });
                offset += usize::from(style.attrs.width().max(1));
            }
        }
        for logical in &mut logicals {
            while logical.last().is_some_and(|cell| {
                cell.content.is_blank() && cell.style == crate::CellStyle::default()
            }) {
                logical.pop();
            }
        }

        let mut rows: Vec<Line> = Vec::new();
        let mut unused_cursor = None;
        for cells in &logicals {
            emit_logical_line(
                cells,
                new_xnum,
                crate::CellColor::Default,
                &mut rows,
                None,
                &mut unused_cursor,
            );
        }

        self.segments.clear();
        self.start_of_data = 0;
        self.count = 0;
        for line in rows {
            self.add_line(line);
        }
        if let Some(pager) = &mut self.pagerhist {
            pager.rewrap(new_xnum);
        }
    }

    /// Drop everything (ED 3).
    pub fn clear(&mut self) {
        self.segments.clear();
        self.start_of_data = 0;
        self.count = 0;
        if let Some(pager) = &mut self.pagerhist {
            pager.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{HistoryBuf, SEGMENT_ROWS};
    use crate::{CellColor, CellStyle, Line, MarkPool, col, width};

    fn text_line(text: &str, xnum: usize) -> Line {
        let mut line = Line::blank(width(xnum), CellColor::Default);
        {
            let mut view = line.as_line_mut();
            for (x, ch) in text.chars().enumerate() {
                view.set_char(col(x), ch, 1, CellStyle::default(), 0);
            }
        }
        line
    }

    fn line_text(line: &Line) -> String {
        let mut out = String::new();
        line.as_line_ref().text_into(
            &mut out,
            &MarkPool::new(),
            col(0),
            col(line.content.len()),
        );
        out.trim_end().to_string()
    }

    #[test]
    fn test_youngest_first_indexing() {
        let mut history = HistoryBuf::new(10);
        history.add_line(text_line("oldest", 8));
        history.add_line(text_line("middle", 8));
        history.add_line(text_line("newest", 8));
        assert_eq!(line_text(history.line_at(0).unwrap()), "newest");
        assert_eq!(line_text(history.line_at(2).unwrap()), "oldest");
        assert!(history.line_at(3).is_none());
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = HistoryBuf::new(3);
        for i in 0..5 {
            history.add_line(text_line(&format!("line{i}"), 8));
        }
        assert_eq!(history.count(), 3);
        assert_eq!(line_text(history.line_at(0).unwrap()), "line4");
        assert_eq!(line_text(history.line_at(2).unwrap()), "line2");
    }

    #[test]
    fn test_crosses_segment_boundaries() {
        let mut history = HistoryBuf::new(SEGMENT_ROWS * 2 + 10);
        for i in 0..SEGMENT_ROWS + 5 {
            history.add_line(text_line(&format!("{i}"), 8));
        }
        assert_eq!(history.count(), SEGMENT_ROWS + 5);
        assert_eq!(
            line_text(history.line_at(0).unwrap()),
            format!("{}", SEGMENT_ROWS + 4)
        );
        assert_eq!(line_text(history.line_at(SEGMENT_ROWS + 4).unwrap()), "0");
    }

    #[test]
    fn test_eviction_feeds_pagerhist() {
        let mut history = HistoryBuf::with_pagerhist(2, 4096);
        history.add_line(text_line("gone", 8));
        history.add_line(text_line("kept1", 8));
        history.add_line(text_line("kept2", 8));
        let pager = history.pagerhist().unwrap();
        assert!(pager.text().contains("gone"));
        assert!(!pager.text().contains("kept1"));
    }

    #[test]
    fn test_rewrap_rejoins_wrapped_history() {
        let mut history = HistoryBuf::new(10);
        let mut first = text_line("abcd", 4);
        first.style[3].attrs.set_next_char_was_wrapped(true);
        let mut second = text_line("ef", 4);
        second.attrs.set_continued(true);
        history.add_line(first);
        history.add_line(second);

        history.rewrap(8);
        assert_eq!(history.count(), 1);
        assert_eq!(line_text(history.line_at(0).unwrap()), "abcdef");
    }

    #[test]
    fn test_rewrap_splits_long_history_lines() {
        let mut history = HistoryBuf::new(10);
        history.add_line(text_line("abcdef", 8));
        history.rewrap(3);
        assert_eq!(history.count(), 2);
        assert_eq!(line_text(history.line_at(1).unwrap()), "abc");
        assert_eq!(line_text(history.line_at(0).unwrap()), "def");
        assert!(history.line_at(0).unwrap().attrs.is_continued());
    }
}
