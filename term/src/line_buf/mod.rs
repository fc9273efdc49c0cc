// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The active screen grid.
//!
//! `ynum × xnum` cells stored as two parallel contiguous arrays (content part,
//! style part) plus a `line_map` indirection of physical row indices. Scroll
//! operations permute `line_map` instead of moving cells, so a scroll-region
//! shift costs O(region height) on the permutation plus one row clear — never
//! a per-cell memcpy of the region.
//!
//! ```text
//! line_map: [2, 0, 1]      visual row 0 → physical row 2
//!                          visual row 1 → physical row 0
//!                          visual row 2 → physical row 1
//! ```
//!
//! Invariant: `line_map` is always a permutation of `{0..ynum-1}`.

// Attach.
pub mod rewrap;

// Re-export.
pub use rewrap::*;

use crate::{BLANK_CHAR, CellColor, CellContent, CellStyle, ColWidth, GridSize, Line,
            LineAttrs, LineMut, LineRef, RowHeight, RowIndex, col, row};

/// The two-dimensional cell grid backing one screen (main or alt).
#[derive(Debug)]
pub struct LineBuf {
    size: GridSize,
    content: Vec<CellContent>,
    style: Vec<CellStyle>,
    /// Per *physical* row attributes; they travel with the row when
    /// `line_map` rotates.
    line_attrs: Vec<LineAttrs>,
    /// Visual row → physical row.
    line_map: Vec<usize>,
    /// Staging area so region rotations swap in one pass.
    scratch: Vec<usize>,
}

impl LineBuf {
    #[must_use]
    pub fn new(size: GridSize, bg: CellColor) -> Self {
        let size = size.clamp_to_min();
        let cells = size.cell_count();
        Self {
            size,
            content: vec![CellContent::blank(); cells],
            style: vec![CellStyle::erased(bg); cells],
            line_attrs: vec![LineAttrs::default(); size.row_height.as_usize()],
            line_map: (0..size.row_height.as_usize()).collect(),
            scratch: vec![0; size.row_height.as_usize()],
        }
    }

    #[must_use]
    pub fn size(&self) -> GridSize { self.size }

    #[must_use]
    pub fn xnum(&self) -> ColWidth { self.size.col_width }

    #[must_use]
    pub fn ynum(&self) -> RowHeight { self.size.row_height }

    fn cell_range(&self, visual_row: RowIndex) -> std::ops::Range<usize> {
        let phys = self.line_map[visual_row.as_usize()];
        let xnum = self.size.col_width.as_usize();
        phys * xnum..(phys + 1) * xnum
    }

    /// Read view of the row at visual position `y`.
    #[must_use]
    pub fn line(&self, y: RowIndex) -> LineRef<'_> {
        let range = self.cell_range(y);
        let phys = self.line_map[y.as_usize()];
        LineRef {
            content: &self.content[range.clone()],
            style: &self.style[range],
            attrs: self.line_attrs[phys],
        }
    }

    /// Write view of the row at visual position `y`.
    pub fn line_mut(&mut self, y: RowIndex) -> LineMut<'_> {
        let range = self.cell_range(y);
        let phys = self.line_map[y.as_usize()];
        let Self {
            content,
            style,
            line_attrs,
            ..
        } = self;
        LineMut {
            content: &mut content[range.clone()],
            style: &mut style[range],
            attrs: &mut line_attrs[phys],
        }
    }

    /// Overwrite row `y` with blanks in `bg` and reset its attributes.
    pub fn clear_line(&mut self, y: RowIndex, bg: CellColor) {
        let xnum = self.size.col_width.as_usize();
        let mut line = self.line_mut(y);
        line.clear(col(0), xnum, BLANK_CHAR, bg);
        *line.attrs = LineAttrs::default();
    }

    /// Clear the whole grid.
    pub fn clear_all(&mut self, bg: CellColor) {
        for y in 0..self.size.row_height.as_usize() {
            self.clear_line(row(y), bg);
        }
    }

    /// Rotate `line_map[top..=bottom]` so each visual row moves up by
    /// `shift` (rows leaving the top re-enter at the bottom). The scratch
    /// array makes the permutation a single staged pass.
    fn rotate_region_up(&mut self, top: RowIndex, bottom: RowIndex, shift: usize) {
        let (top, bottom) = (top.as_usize(), bottom.as_usize());
        debug_assert!(top <= bottom && bottom < self.line_map.len());
        let len = bottom - top + 1;
        let shift = shift % len;
        if shift == 0 {
            return;
        }
        let mut scratch = std::mem::take(&mut self.scratch);
        scratch.clear();
        scratch.extend_from_slice(&self.line_map[top..top + shift]);
        self.line_map.copy_within(top + shift..=bottom, top);
        self.line_map[bottom + 1 - shift..=bottom].copy_from_slice(&scratch);
        self.scratch = scratch;
    }

    fn rotate_region_down(&mut self, top: RowIndex, bottom: RowIndex, shift: usize) {
        let len = bottom.as_usize() - top.as_usize() + 1;
        let shift = shift % len;
        if shift == 0 {
            return;
        }
        self.rotate_region_up(top, bottom, len - shift);
    }

    /// Scroll region `[top, bottom]` up by one: the top row's content leaves
    /// the region (the caller copies it out first when it should become
    /// scrollback) and a cleared row appears at the bottom.
    pub fn index(&mut self, top: RowIndex, bottom: RowIndex, bg: CellColor) {
        self.rotate_region_up(top, bottom, 1);
        self.clear_line(bottom, bg);
    }

    /// Inverse of [`Self::index`]: scroll the region down by one, clearing
    /// the new top row.
    pub fn reverse_index(&mut self, top: RowIndex, bottom: RowIndex, bg: CellColor) {
        self.rotate_region_down(top, bottom, 1);
        self.clear_line(top, bg);
    }

    /// Insert `n` blank rows at `y`, shifting `[y, bottom]` down. Rows pushed
    /// past `bottom` are lost.
    pub fn insert_lines(&mut self, n: usize, y: RowIndex, bottom: RowIndex, bg: CellColor) {
        if y > bottom {
            return;
        }
        let n = n.min(bottom.as_usize() - y.as_usize() + 1);
        self.rotate_region_down(y, bottom, n);
        for cleared in y.as_usize()..y.as_usize() + n {
            self.clear_line(row(cleared), bg);
        }
    }

    /// Delete `n` rows at `y`, shifting the rest of `[y, bottom]` up and
    /// clearing the vacated rows at the bottom of the region.
    pub fn delete_lines(&mut self, n: usize, y: RowIndex, bottom: RowIndex, bg: CellColor) {
        if y > bottom {
            return;
        }
        let n = n.min(bottom.as_usize() - y.as_usize() + 1);
        self.rotate_region_up(y, bottom, n);
        for cleared in bottom.as_usize() + 1 - n..=bottom.as_usize() {
            self.clear_line(row(cleared), bg);
        }
    }

    /// Copy the row at `y` into an owned [`Line`] (used for scroll-off into
    /// history).
    #[must_use]
    pub fn snapshot_line(&self, y: RowIndex) -> Line { self.line(y).to_owned_line() }

    /// Verify the `line_map` permutation invariant. Debug builds abort on
    /// violation; release builds report and carry on.
    #[must_use]
    pub fn line_map_is_permutation(&self) -> bool {
        let mut seen = vec![false; self.line_map.len()];
        for &phys in &self.line_map {
            if phys >= seen.len() || seen[phys] {
                return false;
            }
            seen[phys] = true;
        }
        true
    }
}
