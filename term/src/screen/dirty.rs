// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Dirty-region tracking for the presenter.
//!
//! Two bitmaps: per-line (whole row invalidated, e.g. by scroll) and per-cell
//! (single writes). [`DirtyTracker::regions`] folds both into `(row,
//! col_range)` spans the renderer can upload.

use std::ops::Range;

use crate::{GridSize, Pos, RowIndex, row};

#[derive(Debug)]
pub struct DirtyTracker {
    size: GridSize,
    line_dirty: Vec<bool>,
    cell_dirty: Vec<bool>,
}

impl DirtyTracker {
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            line_dirty: vec![true; size.row_height.as_usize()],
            cell_dirty: vec![false; size.cell_count()],
        }
    }

    pub fn mark_cell(&mut self, pos: Pos) {
        let xnum = self.size.col_width.as_usize();
        let index = pos.row_index.as_usize() * xnum + pos.col_index.as_usize();
        if let Some(slot) = self.cell_dirty.get_mut(index) {
            *slot = true;
        }
    }

    pub fn mark_line(&mut self, y: RowIndex) {
        if let Some(slot) = self.line_dirty.get_mut(y.as_usize()) {
            *slot = true;
        }
    }

    pub fn mark_lines(&mut self, from: RowIndex, to: RowIndex) {
        for y in from.as_usize()..=to.as_usize().min(self.line_dirty.len() - 1) {
            self.line_dirty[y] = true;
        }
    }

    pub fn mark_all(&mut self) {
        self.line_dirty.iter_mut().for_each(|slot| *slot = true);
    }

    /// Changed spans since the last [`Self::clear`], row-major.
    #[must_use]
    pub fn regions(&self) -> Vec<(RowIndex, Range<usize>)> {
        let xnum = self.size.col_width.as_usize();
        let mut regions = Vec::new();
        for y in 0..self.size.row_height.as_usize() {
            if self.line_dirty[y] {
                regions.push((row(y), 0..xnum));
                continue;
            }
            let cells = &self.cell_dirty[y * xnum..(y + 1) * xnum];
            let mut x = 0;
            while x < xnum {
                if !cells[x] {
                    x += 1;
                    continue;
                }
                let start = x;
                while x < xnum && cells[x] {
                    x += 1;
                }
                regions.push((row(y), start..x));
            }
        }
        regions
    }

    pub fn clear(&mut self) {
        self.line_dirty.iter_mut().for_each(|slot| *slot = false);
        self.cell_dirty.iter_mut().for_each(|slot| *slot = false);
    }

    /// Resize drops all state and reports everything dirty.
    pub fn resize(&mut self, size: GridSize) { *self = Self::new(size); }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::DirtyTracker;
    use crate::{col, height, row, width};

    #[test]
    fn test_fresh_tracker_reports_everything() {
        let tracker = DirtyTracker::new(height(2) + width(4));
        assert_eq!(tracker.regions().len(), 2);
    }

    #[test]
    fn test_cell_spans_coalesce() {
        let mut tracker = DirtyTracker::new(height(2) + width(8));
        tracker.clear();
        tracker.mark_cell(row(1) + col(2));
        tracker.mark_cell(row(1) + col(3));
        tracker.mark_cell(row(1) + col(6));
        let regions = tracker.regions();
        assert_eq!(regions, vec![(row(1), 2..4), (row(1), 6..7)]);
    }

    #[test]
    fn test_line_dirty_swallows_cell_detail() {
        let mut tracker = DirtyTracker::new(height(2) + width(8));
        tracker.clear();
        tracker.mark_cell(row(0) + col(5));
        tracker.mark_line(row(0));
        assert_eq!(tracker.regions(), vec![(row(0), 0..8)]);
    }
}
