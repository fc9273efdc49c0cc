// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Line views and the low-level cell mutators.
//!
//! [`LineMut`] is the only place cells get written. Every mutator maintains
//! the wide-pair invariant: a width-2 cell is always followed by a width-0
//! cell, the two form one unit for editing, and disturbing either half clears
//! both.

use super::LineAttrs;
use crate::{BLANK_CHAR, CellColor, CellContent, CellStyle, ColIndex, ColWidth,
            MarkPool, col, width};

/// An owned row, used to hand lines across buffer boundaries: scroll-off into
/// history and rewrap. Grid-resident rows live in the parallel arrays of
/// [`crate::LineBuf`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub content: Box<[CellContent]>,
    pub style: Box<[CellStyle]>,
    pub attrs: LineAttrs,
}

impl Line {
    /// A blank row of `arg_width` cells painted with `bg`.
    #[must_use]
    pub fn blank(arg_width: ColWidth, bg: CellColor) -> Self {
        Self {
            content: vec![CellContent::blank(); arg_width.as_usize()].into(),
            style: vec![CellStyle::erased(bg); arg_width.as_usize()].into(),
            attrs: LineAttrs::default(),
        }
    }

    #[must_use]
    pub fn xnum(&self) -> ColWidth { width(self.content.len()) }

    #[must_use]
    pub fn as_line_ref(&self) -> LineRef<'_> {
        LineRef {
            content: &self.content,
            style: &self.style,
            attrs: self.attrs,
        }
    }

    #[must_use]
    pub fn as_line_mut(&mut self) -> LineMut<'_> {
        LineMut {
            content: &mut self.content,
            style: &mut self.style,
            attrs: &mut self.attrs,
        }
    }
}

/// Read-only view of one row. This is what the presenter receives from
/// [`crate::Screen::visual_line`].
#[derive(Debug, Copy, Clone)]
pub struct LineRef<'a> {
    pub content: &'a [CellContent],
    pub style: &'a [CellStyle],
    pub attrs: LineAttrs,
}

impl LineRef<'_> {
    #[must_use]
    pub fn xnum(&self) -> ColWidth { width(self.content.len()) }

    /// Column of the last cell that holds anything, or `None` for an all-blank
    /// row.
    #[must_use]
    pub fn last_occupied_col(&self) -> Option<ColIndex> {
        self.content
            .iter()
            .rposition(|cell| !cell.is_blank())
            .map(col)
    }

    /// True when the last cell recorded that the following character wrapped
    /// onto the next row, i.e. the next row continues this logical line.
    #[must_use]
    pub fn continues_to_next_row(&self) -> bool {
        self.style
            .last()
            .is_some_and(|s| s.attrs.next_char_was_wrapped())
    }

    /// Append the visible text of columns `[from, to)` to `out`, resolving
    /// combining marks through the pool. Width-0 cells (wide second halves)
    /// contribute nothing; blank cells contribute a space.
    pub fn text_into(
        &self,
        out: &mut String,
        pool: &MarkPool,
        from: ColIndex,
        to: ColIndex,
    ) {
        let to = to.as_usize().min(self.content.len());
        for x in from.as_usize()..to {
            if self.style[x].attrs.width() == 0 {
                continue;
            }
            let cell = &self.content[x];
            out.push(if cell.is_blank() { ' ' } else { cell.ch });
            for &mark in &cell.marks {
                if let Some(mark_char) = pool.get(mark) {
                    out.push(mark_char);
                }
            }
        }
    }

    /// Copy this view into an owned [`Line`].
    #[must_use]
    pub fn to_owned_line(&self) -> Line {
        Line {
            content: self.content.into(),
            style: self.style.into(),
            attrs: self.attrs,
        }
    }
}

/// Mutable view of one row; hosts the line primitives.
#[derive(Debug)]
pub struct LineMut<'a> {
    pub content: &'a mut [CellContent],
    pub style: &'a mut [CellStyle],
    pub attrs: &'a mut LineAttrs,
}

impl LineMut<'_> {
    #[must_use]
    pub fn xnum(&self) -> ColWidth { width(self.content.len()) }

    /// Write `ch` at column `x` with the given pen. `char_width` is 1 or 2.
    ///
    /// A width-2 char occupies `x` and `x + 1`; the second half becomes a
    /// width-0 cell sharing the pen. A width-2 char at the last column does
    /// not fit and degrades to a single blank (the caller decides whether to
    /// re-emit the char on the next row).
    pub fn set_char(
        &mut self,
        x: ColIndex,
        ch: char,
        char_width: u16,
        pen: CellStyle,
        hyperlink: u16,
    ) {
        let x = x.as_usize();
        if x >= self.content.len() {
            return;
        }

        // Overwriting either half of an existing wide pair erases the pair.
        self.sever_wide_pair_at(col(x));

        let last_col = self.content.len() - 1;
        if char_width == 2 && x == last_col {
            // Wide char does not fit in the final column.
            self.content[x] = CellContent::blank();
            let mut style = pen;
            style.attrs.set_width(1);
            self.style[x] = style;
            self.attrs.set_has_dirty_text(true);
            return;
        }

        self.content[x] = CellContent {
            ch,
            marks: [0; 3],
            hyperlink,
        };
        let mut style = pen;
        style.attrs.set_width(char_width);
        self.style[x] = style;

        if char_width == 2 {
            self.sever_wide_pair_at(col(x + 1));
            self.content[x + 1] = CellContent {
                ch: BLANK_CHAR,
                marks: [0; 3],
                hyperlink,
            };
            let mut second = pen;
            second.attrs.set_width(0);
            self.style[x + 1] = second;
        }

        self.attrs.set_has_dirty_text(true);
    }

    /// Append a combining mark (already interned as `mark_index`) to the cell
    /// at `x`. Targets the first half when `x` lands on a wide pair's second
    /// half. A full mark list drops the mark silently; re-applying the cell's
    /// trailing mark changes nothing.
    pub fn add_combining_char(&mut self, x: ColIndex, mark_index: u16) {
        let mut x = x.as_usize();
        if x >= self.content.len() {
            return;
        }
        if self.style[x].attrs.width() == 0 && x > 0 {
            x -= 1;
        }
        if !self.content[x].push_mark(mark_index) {
            tracing::trace!("combining mark list full at col {x}, mark dropped");
        }
        self.attrs.set_has_dirty_text(true);
    }

    /// Move cells `[at, xnum - n)` right by `n`; the vacated `[at, at + n)`
    /// fills with blanks in `bg`. Cells shifted past the right edge are lost.
    pub fn right_shift(&mut self, at: ColIndex, n: usize, bg: CellColor) {
        let len = self.content.len();
        let at = at.as_usize();
        if n == 0 || at >= len {
            return;
        }
        let n = n.min(len - at);

        // A pair straddling the shift origin (second half at `at`, first half
        // staying behind) loses both halves. A whole pair at `at` just moves.
        if self.style[at].attrs.width() == 0 {
            self.sever_wide_pair_at(col(at));
        }

        self.content.copy_within(at..len - n, at + n);
        self.style.copy_within(at..len - n, at + n);
        for x in at..at + n {
            self.content[x] = CellContent::blank();
            self.style[x] = CellStyle::erased(bg);
        }

        // A wide first half pushed into the last column lost its second half.
        if self.style[len - 1].attrs.width() == 2 {
            self.content[len - 1] = CellContent::blank();
            self.style[len - 1] = CellStyle::erased(bg);
        }
        self.attrs.set_has_dirty_text(true);
    }

    /// Move cells `[at + n, xnum)` left to `at`; the vacated tail fills with
    /// blanks in `bg`.
    pub fn left_shift(&mut self, at: ColIndex, n: usize, bg: CellColor) {
        let len = self.content.len();
        let at = at.as_usize();
        if n == 0 || at >= len {
            return;
        }
        let n = n.min(len - at);

        // A pair straddling the deletion start (second half at `at`) loses
        // both halves before anything moves.
        if self.style[at].attrs.width() == 0 {
            self.sever_wide_pair_at(col(at));
        }

        self.content.copy_within(at + n..len, at);
        self.style.copy_within(at + n..len, at);
        for x in len - n..len {
            self.content[x] = CellContent::blank();
            self.style[x] = CellStyle::erased(bg);
        }

        // The cell uncovered at the boundary may be a widowed second half
        // whose first half sat inside the deleted range.
        if self.style[at].attrs.width() == 0 {
            self.content[at] = CellContent::blank();
            self.style[at] = CellStyle::erased(bg);
        }
        // Symmetric widow at the blanked tail.
        if len - n > 0 && self.style[len - n - 1].attrs.width() == 2 {
            self.content[len - n - 1] = CellContent::blank();
            self.style[len - n - 1] = CellStyle::erased(bg);
        }
        self.attrs.set_has_dirty_text(true);
    }

    /// Overwrite `n` cells starting at `at` with `erase_char` (space or
    /// [`BLANK_CHAR`]) in `bg`. The range expands to cover wide pairs that
    /// straddle either end.
    pub fn clear(&mut self, at: ColIndex, n: usize, erase_char: char, bg: CellColor) {
        let len = self.content.len();
        let mut start = at.as_usize().min(len);
        let mut end = (start + n).min(len);
        if start >= end {
            return;
        }

        // Expand over straddled wide pairs.
        if self.style[start].attrs.width() == 0 && start > 0 {
            start -= 1;
        }
        if end < len && self.style[end].attrs.width() == 0 {
            end += 1;
        }

        for x in start..end {
            self.content[x] = CellContent {
                ch: erase_char,
                marks: [0; 3],
                hyperlink: 0,
            };
            self.style[x] = CellStyle::erased(bg);
        }
        self.attrs.set_has_dirty_text(true);
    }

    /// Like [`Self::clear`] but skips cells whose protected bit (DECSCA) is
    /// set, per the selective-erase rules.
    pub fn clear_unprotected(
        &mut self,
        at: ColIndex,
        n: usize,
        erase_char: char,
        bg: CellColor,
    ) {
        let len = self.content.len();
        let start = at.as_usize().min(len);
        let end = (start + n).min(len);
        for x in start..end {
            if self.style[x].attrs.protected() {
                continue;
            }
            self.clear(col(x), 1, erase_char, bg);
        }
    }

    /// If the cell at `x` belongs to a wide pair, blank both halves. Leaves
    /// single-width cells alone.
    pub fn sever_wide_pair_at(&mut self, x: ColIndex) {
        let x = x.as_usize();
        if x >= self.content.len() {
            return;
        }
        let arg_width = self.style[x].attrs.width();
        let first = match arg_width {
            2 => x,
            0 if x > 0 => x - 1,
            _ => return,
        };
        // Only treat width-0 as a pair half when preceded by a width-2 cell;
        // an isolated width-0 cell is just empty.
        if arg_width == 0 && self.style[first].attrs.width() != 2 {
            return;
        }
        for half in [first, first + 1] {
            if half < self.content.len() {
                let bg = self.style[half].bg;
                self.content[half] = CellContent::blank();
                self.style[half] = CellStyle::erased(bg);
            }
        }
    }

    #[must_use]
    pub fn as_line_ref(&self) -> LineRef<'_> {
        LineRef {
            content: self.content,
            style: self.style,
            attrs: *self.attrs,
        }
    }
}
