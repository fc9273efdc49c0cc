// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Mouse selection over the unified visual grid.
//!
//! Coordinates are `(x, y)` with `y` ranging over
//! `[-history_count, ynum)` — negative rows live in scrollback. Keeping one
//! coordinate space for screen and history removes every special case from
//! extension and extraction; only the final line lookup branches (see
//! [`crate::Screen::visual_line`]).
//!
//! Half-cell precision: each endpoint records whether the pointer sat in the
//! left half of its cell, which decides whether that boundary cell is part of
//! the selection.

// Attach.
pub mod url_detect;

// Re-export.
pub use url_detect::*;

use crate::Screen;

/// How endpoints snap while extending.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SelectionMode {
    #[default]
    Cell,
    Word,
    Line,
    Rectangle,
}

/// One endpoint in unified visual coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionPoint {
    pub y: isize,
    pub x: usize,
    pub in_left_half: bool,
}

/// Live selection state owned by the screen.
#[derive(Debug, Default)]
pub struct Selection {
    pub in_progress: bool,
    pub mode: SelectionMode,
    pub anchor: SelectionPoint,
    pub head: SelectionPoint,
    /// True once start() ran and clear() has not.
    pub exists: bool,
}

impl Selection {
    pub fn clear(&mut self) { *self = Self::default(); }
}

/// Normalized inclusive cell range in reading order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SelectionRange {
    pub start: (isize, usize),
    pub end: (isize, usize),
}

impl Screen {
    /// Begin a selection: anchor and head collapse onto the given point.
    pub fn start_selection(
        &mut self,
        x: usize,
        y: isize,
        in_left_half: bool,
        rectangle: bool,
        mode: SelectionMode,
    ) {
        let mode = if rectangle { SelectionMode::Rectangle } else { mode };
        let point = SelectionPoint { y, x, in_left_half };
        self.selection.mode = mode;
        self.selection.anchor = point;
        self.selection.head = point;
        self.selection.in_progress = true;
        self.selection.exists = true;
    }

    /// Move the selection head; `ended` finishes the drag.
    pub fn update_selection(&mut self, x: usize, y: isize, in_left_half: bool, ended: bool) {
        if !self.selection.exists {
            return;
        }
        self.selection.head = SelectionPoint { y, x, in_left_half };
        if ended {
            self.selection.in_progress = false;
        }
    }

    pub fn clear_selection(&mut self) { self.selection.clear(); }

    /// The selected cell range after mode snapping, or `None` when nothing is
    /// selected.
    #[must_use]
    pub fn selection_range(&self) -> Option<SelectionRange> {
        if !self.selection.exists {
            return None;
        }
        let (first, last) = reading_order(self.selection.anchor, self.selection.head);

        // Half-cell precision: a start point in the right half excludes its
        // cell, an end point in the left half excludes its cell.
        let mut start = (first.y, if first.in_left_half { first.x } else { first.x + 1 });
        let mut end = (
            last.y,
            if last.in_left_half {
                if last.x == 0 {
                    return None;
                }
                last.x - 1
            } else {
                last.x
            },
        );

        match self.selection.mode {
            SelectionMode::Cell => {}
            SelectionMode::Rectangle => {
                let (left, right) = if start.1 <= end.1 {
                    (start.1, end.1)
                } else {
                    (end.1, start.1)
                };
                start.1 = left;
                end.1 = right;
            }
            SelectionMode::Word => {
                start = self.snap_word_left(start);
                end = self.snap_word_right(end);
            }
            SelectionMode::Line => {
                start = (self.logical_line_top(start.0), 0);
                let end_y = self.logical_line_bottom(end.0);
                end = (end_y, self.size.col_width.as_usize() - 1);
            }
        }

        if start.0 > end.0 || (start.0 == end.0 && start.1 > end.1) {
            return None;
        }
        Some(SelectionRange { start, end })
    }

    /// Materialize the selected text in reading order. Wrapped physical lines
    /// join without a newline; hard line ends trim trailing blanks.
    #[must_use]
    pub fn selection_text(&self) -> Option<String> {
        let range = self.selection_range()?;
        let rectangle = self.selection.mode == SelectionMode::Rectangle;
        let xnum = self.size.col_width.as_usize();
        let mut out = String::new();

        for y in range.start.0..=range.end.0 {
            let Some(line) = self.visual_line(y) else {
                continue;
            };
            let (from, to_inclusive) = if rectangle {
                (range.start.1, range.end.1)
            } else {
                let from = if y == range.start.0 { range.start.1 } else { 0 };
                let to = if y == range.end.0 { range.end.1 } else { xnum - 1 };
                (from, to)
            };

            let wrapped = !rectangle && line.continues_to_next_row();
            let to_inclusive = if wrapped {
                to_inclusive
            } else {
                // Hard end: stop at the content instead of copying the
                // erased tail.
                match line.last_occupied_col() {
                    Some(last) => to_inclusive.min(last.as_usize()),
                    None => {
                        if y < range.end.0 {
                            out.push('\n');
                        }
                        continue;
                    }
                }
            };

            if from <= to_inclusive {
                line.text_into(
                    &mut out,
                    &self.mark_pool,
                    crate::col(from),
                    crate::col(to_inclusive + 1),
                );
            }
            if y < range.end.0 && (rectangle || !wrapped) {
                out.push('\n');
            }
        }
        Some(out)
    }

    // ───────────────────────────── snapping ─────────────────────────────────

    fn char_at(&self, y: isize, x: usize) -> Option<char> {
        let line = self.visual_line(y)?;
        let cell = line.content.get(x)?;
        if cell.is_blank() { None } else { Some(cell.ch) }
    }

    pub(crate) fn is_word_char(&self, ch: char) -> bool {
        ch.is_alphanumeric() || self.config.select_by_word_characters.contains(ch)
    }

    fn snap_word_left(&self, mut point: (isize, usize)) -> (isize, usize) {
        loop {
            if point.1 == 0 {
                // Follow a wrap onto the previous visual row.
                let above = point.0 - 1;
                let continues = self
                    .visual_line(above)
                    .is_some_and(|line| line.continues_to_next_row());
                if continues
                    && self
                        .char_at(above, self.size.col_width.as_usize() - 1)
                        .is_some_and(|ch| self.is_word_char(ch))
                {
                    point = (above, self.size.col_width.as_usize() - 1);
                    continue;
                }
                return point;
            }
            match self.char_at(point.0, point.1 - 1) {
                Some(ch) if self.is_word_char(ch) => point.1 -= 1,
                _ => return point,
            }
        }
    }

    fn snap_word_right(&self, mut point: (isize, usize)) -> (isize, usize) {
        let xnum = self.size.col_width.as_usize();
        loop {
            if point.1 + 1 >= xnum {
                let continues = self
                    .visual_line(point.0)
                    .is_some_and(|line| line.continues_to_next_row());
                if continues
                    && self
                        .char_at(point.0 + 1, 0)
                        .is_some_and(|ch| self.is_word_char(ch))
                {
                    point = (point.0 + 1, 0);
                    continue;
                }
                return point;
            }
            match self.char_at(point.0, point.1 + 1) {
                Some(ch) if self.is_word_char(ch) => point.1 += 1,
                _ => return point,
            }
        }
    }

    fn logical_line_top(&self, mut y: isize) -> isize {
        let floor = -(self.history_count() as isize);
        while y > floor {
            let continued = self
                .visual_line(y)
                .is_some_and(|line| line.attrs.is_continued());
            if !continued {
                break;
            }
            y -= 1;
        }
        y
    }

    fn logical_line_bottom(&self, mut y: isize) -> isize {
        let ceiling = self.size.row_height.as_usize() as isize - 1;
        while y < ceiling {
            let next_continued = self
                .visual_line(y + 1)
                .is_some_and(|line| line.attrs.is_continued());
            if !next_continued {
                break;
            }
            y += 1;
        }
        y
    }

    /// Mouse selection is suppressed while the application grabbed the mouse
    /// (the embedder typically overrides with shift held).
    #[must_use]
    pub fn mouse_grabbed_by_app(&self) -> bool {
        self.mouse_tracking != crate::MouseTrackingMode::Off
    }
}

fn reading_order(a: SelectionPoint, b: SelectionPoint) -> (SelectionPoint, SelectionPoint) {
    if (b.y, b.x) < (a.y, a.x) { (b, a) } else { (a, b) }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::SelectionMode;
    use crate::{Screen, TermConfig, height, width};

    fn screen_with_text(lines: &[&str]) -> Screen {
        let mut screen = Screen::new(height(lines.len()) + width(16), TermConfig::default());
        for (y, text) in lines.iter().enumerate() {
            screen.apply_ansi_bytes(text.as_bytes());
            if y + 1 < lines.len() {
                screen.apply_ansi_bytes(b"\r\n");
            }
        }
        screen
    }

    #[test]
    fn test_cell_selection_single_row() {
        let mut screen = screen_with_text(&["hello world"]);
        screen.start_selection(0, 0, true, false, SelectionMode::Cell);
        screen.update_selection(4, 0, false, true);
        assert_eq!(screen.selection_text().unwrap(), "hello");
    }

    #[test]
    fn test_reversed_drag_normalizes() {
        let mut screen = screen_with_text(&["hello world"]);
        screen.start_selection(4, 0, false, false, SelectionMode::Cell);
        screen.update_selection(0, 0, true, true);
        assert_eq!(screen.selection_text().unwrap(), "hello");
    }

    #[test]
    fn test_multi_row_selection_inserts_newline() {
        let mut screen = screen_with_text(&["aaa", "bbb"]);
        screen.start_selection(0, 0, true, false, SelectionMode::Cell);
        screen.update_selection(2, 1, false, true);
        assert_eq!(screen.selection_text().unwrap(), "aaa\nbbb");
    }

    #[test]
    fn test_wrapped_rows_join_without_newline() {
        let mut screen = Screen::new(height(3) + width(4), TermConfig::default());
        // "abcdef" soft-wraps onto row 1.
        screen.apply_ansi_bytes(b"abcdef");
        screen.start_selection(0, 0, true, false, SelectionMode::Cell);
        screen.update_selection(1, 1, false, true);
        assert_eq!(screen.selection_text().unwrap(), "abcdef");
    }

    #[test]
    fn test_word_selection_snaps_to_boundaries() {
        let mut screen = screen_with_text(&["foo bar-baz qux"]);
        screen.start_selection(5, 0, true, false, SelectionMode::Word);
        screen.update_selection(5, 0, false, true);
        // '-' is in the default word characters.
        assert_eq!(screen.selection_text().unwrap(), "bar-baz");
    }

    #[test]
    fn test_line_selection_takes_logical_line() {
        let mut screen = Screen::new(height(3) + width(4), TermConfig::default());
        screen.apply_ansi_bytes(b"abcdef\r\nzz");
        screen.start_selection(2, 0, true, false, SelectionMode::Line);
        screen.update_selection(2, 0, false, true);
        assert_eq!(screen.selection_text().unwrap(), "abcdef");
    }

    #[test]
    fn test_rectangle_selection_slices_columns() {
        let mut screen = screen_with_text(&["abcde", "fghij", "klmno"]);
        screen.start_selection(1, 0, true, true, SelectionMode::Cell);
        screen.update_selection(3, 2, false, true);
        assert_eq!(screen.selection_text().unwrap(), "bcd\nghi\nlmn");
    }

    #[test]
    fn test_selection_into_scrollback() {
        let mut screen = Screen::new(height(2) + width(8), TermConfig::default());
        screen.apply_ansi_bytes(b"old\r\nmid\r\nnew");
        assert_eq!(screen.history_count(), 1);
        screen.start_selection(0, -1, true, false, SelectionMode::Cell);
        screen.update_selection(2, 0, false, true);
        assert_eq!(screen.selection_text().unwrap(), "old\nmid");
    }

    #[test]
    fn test_scroll_clears_selection() {
        let mut screen = screen_with_text(&["hello"]);
        screen.start_selection(0, 0, true, false, SelectionMode::Cell);
        screen.update_selection(4, 0, false, true);
        assert!(screen.selection_range().is_some());
        screen.apply_ansi_bytes(b"\r\n\r\n\r\n\r\n\r\n");
        assert!(screen.selection_range().is_none());
    }
}
