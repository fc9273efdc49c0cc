// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! URL detection under the pointer.
//!
//! Given a cell, scan outward along the visual line while cells hold URL
//! characters, following soft wraps in both directions. A sentinel opening
//! bracket just before the URL (`(`, `[`, `{`, `<`, `"`, `'`) shortens the
//! end at its matching close, so `(https://example.com/a(b)c)` detected from
//! inside yields `https://example.com/a(b)c` and not the outer parenthesis.

use super::SelectionRange;
use crate::Screen;

/// RFC 3986 characters legal in a URL, beyond alphanumerics.
const URL_EXTRA_CHARS: &str = ":/?#[]@!$&'()*+,;=%-._~";

/// Sentinel open brackets and their closers.
const BRACKET_PAIRS: [(char, char); 6] = [
    ('(', ')'),
    ('[', ']'),
    ('{', '}'),
    ('<', '>'),
    ('"', '"'),
    ('\'', '\''),
];

fn is_url_char(ch: char) -> bool {
    ch.is_alphanumeric() || URL_EXTRA_CHARS.contains(ch)
}

impl Screen {
    /// Detect a URL covering cell `(x, y)`. Returns the inclusive cell range
    /// of the URL, or `None` when the cell is not inside something
    /// URL-shaped (a scheme separator `://` is required).
    #[must_use]
    pub fn url_at(&self, x: usize, y: isize) -> Option<SelectionRange> {
        let xnum = self.size().col_width.as_usize();
        let ch = self.url_char_at(y, x)?;
        if !is_url_char(ch) {
            return None;
        }

        // Scan left, following wraps.
        let mut start = (y, x);
        loop {
            let prev = if start.1 == 0 {
                let above = start.0 - 1;
                if !self.row_wraps(above) {
                    break;
                }
                (above, xnum - 1)
            } else {
                (start.0, start.1 - 1)
            };
            match self.url_char_at(prev.0, prev.1) {
                Some(ch) if is_url_char(ch) => start = prev,
                _ => break,
            }
        }

        // Scan right, following wraps.
        let mut end = (y, x);
        loop {
            let next = if end.1 + 1 >= xnum {
                if !self.row_wraps(end.0) {
                    break;
                }
                (end.0 + 1, 0)
            } else {
                (end.0, end.1 + 1)
            };
            match self.url_char_at(next.0, next.1) {
                Some(ch) if is_url_char(ch) => end = next,
                _ => break,
            }
        }

        // Bracket sentinel. Brackets are URL characters, so an opening
        // bracket right at the span start landed *inside* the span; it (or a
        // non-URL opener like `"` just before the span) marks the URL as
        // bracket-wrapped and its matching close terminates the URL early.
        let mut sentinel = None;
        if let Some(ch) = self.url_char_at(start.0, start.1)
            && BRACKET_PAIRS.iter().any(|(open, _)| *open == ch)
            && (start.0, start.1) < (y, x)
        {
            sentinel = Some(ch);
            start = self.step_forward(start, xnum);
        } else if let Some(ch) = self.char_before(start, xnum)
            && BRACKET_PAIRS.iter().any(|(open, _)| *open == ch)
        {
            sentinel = Some(ch);
        }
        if let Some(open) = sentinel {
            let close = BRACKET_PAIRS
                .iter()
                .find(|(bracket, _)| *bracket == open)
                .map(|(_, close)| *close)
                .expect("sentinel came from the table");
            let mut depth = 0_i32;
            let mut walker = start;
            loop {
                if let Some(ch) = self.url_char_at(walker.0, walker.1) {
                    if ch == open && open != close {
                        depth += 1;
                    } else if ch == close {
                        if depth == 0 {
                            end = self.step_back(walker, xnum)?;
                            break;
                        }
                        depth -= 1;
                    }
                }
                if walker == end {
                    break;
                }
                walker = self.step_forward(walker, xnum);
            }
        }

        // A degenerate span (the bracket held nothing) detects no URL.
        if (start.0, start.1) > (end.0, end.1) {
            return None;
        }
        // Require something scheme-shaped inside the span.
        let text = self.span_text(start, end, xnum);
        if !text.contains("://") {
            return None;
        }
        Some(SelectionRange { start, end })
    }

    fn url_char_at(&self, y: isize, x: usize) -> Option<char> {
        let line = self.visual_line(y)?;
        let cell = line.content.get(x)?;
        if cell.is_blank() { None } else { Some(cell.ch) }
    }

    fn row_wraps(&self, y: isize) -> bool {
        self.visual_line(y)
            .is_some_and(|line| line.continues_to_next_row())
    }

    fn char_before(&self, point: (isize, usize), xnum: usize) -> Option<char> {
        if point.1 == 0 {
            let above = point.0 - 1;
            if !self.row_wraps(above) {
                return None;
            }
            self.url_char_at(above, xnum - 1)
        } else {
            self.url_char_at(point.0, point.1 - 1)
        }
    }

    fn step_forward(&self, point: (isize, usize), xnum: usize) -> (isize, usize) {
        if point.1 + 1 >= xnum {
            (point.0 + 1, 0)
        } else {
            (point.0, point.1 + 1)
        }
    }

    fn step_back(&self, point: (isize, usize), xnum: usize) -> Option<(isize, usize)> {
        if point.1 == 0 {
            Some((point.0 - 1, xnum - 1))
        } else {
            Some((point.0, point.1 - 1))
        }
    }

    fn span_text(&self, start: (isize, usize), end: (isize, usize), xnum: usize) -> String {
        let mut out = String::new();
        let mut walker = start;
        loop {
            if let Some(ch) = self.url_char_at(walker.0, walker.1) {
                out.push(ch);
            }
            if walker == end {
                break;
            }
            walker = self.step_forward(walker, xnum);
        }
        out
    }

    /// Text of a detected URL range (for the embedder's "open link" action).
    #[must_use]
    pub fn url_text(&self, range: SelectionRange) -> String {
        self.span_text(range.start, range.end, self.size().col_width.as_usize())
    }
}
