// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The two halves of a display cell.

use super::{CellAttrs, CellColor};

/// Base codepoint of a cell that holds nothing. Rendered as a space; trimmed
/// by serialization.
pub const BLANK_CHAR: char = '\0';

/// Maximum combining marks attached to one cell. Extra marks are dropped
/// silently per the resource-exhaustion policy.
pub const MAX_COMBINING_MARKS: usize = 3;

/// Content half of a cell: what the cell *says*.
///
/// Combining marks are stored as indices into the screen-wide
/// [`super::MarkPool`] rather than inline codepoints; slot value 0 means the
/// slot is unused. A hyperlink id of 0 means no hyperlink.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CellContent {
    pub ch: char,
    pub marks: [u16; MAX_COMBINING_MARKS],
    pub hyperlink: u16,
}

impl Default for CellContent {
    fn default() -> Self { Self::blank() }
}

impl CellContent {
    #[must_use]
    pub const fn blank() -> Self {
        Self {
            ch: BLANK_CHAR,
            marks: [0; MAX_COMBINING_MARKS],
            hyperlink: 0,
        }
    }

    #[must_use]
    pub const fn is_blank(&self) -> bool { self.ch as u32 == BLANK_CHAR as u32 }

    /// Number of occupied combining-mark slots.
    #[must_use]
    pub fn mark_count(&self) -> usize {
        self.marks.iter().take_while(|&&m| m != 0).count()
    }

    /// Append a mark index. Returns `false` (and drops the mark) when all
    /// slots are full, unless the mark already sits in the last occupied slot
    /// — re-applying the same trailing mark is an idempotent no-op reported
    /// as success.
    pub fn push_mark(&mut self, mark_index: u16) -> bool {
        let count = self.mark_count();
        if count > 0 && self.marks[count - 1] == mark_index {
            return true;
        }
        if count == MAX_COMBINING_MARKS {
            return false;
        }
        self.marks[count] = mark_index;
        true
    }
}

/// Style half of a cell: how the cell *looks*.
///
/// The sprite coordinates are written by the renderer after glyph lookup and
/// are opaque to the engine; they ride along so both halves stay addressable
/// by the same cell index.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CellStyle {
    pub fg: CellColor,
    pub bg: CellColor,
    pub decoration_fg: CellColor,
    pub sprite_x: u16,
    pub sprite_y: u16,
    pub sprite_z: u16,
    pub attrs: CellAttrs,
}

impl CellStyle {
    /// A blank cell painted with the given background, as produced by erase
    /// operations: content zeroed, width 1, only the background survives.
    #[must_use]
    pub fn erased(bg: CellColor) -> Self {
        Self {
            bg,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CellContent, CellStyle, MAX_COMBINING_MARKS};
    use crate::CellColor;

    #[test]
    fn test_blank_cell() {
        let content = CellContent::blank();
        assert!(content.is_blank());
        assert_eq!(content.mark_count(), 0);
        assert_eq!(content.hyperlink, 0);
    }

    #[test]
    fn test_push_mark_fills_slots_in_order() {
        let mut content = CellContent::blank();
        assert!(content.push_mark(7));
        assert!(content.push_mark(9));
        assert_eq!(content.marks, [7, 9, 0]);
        assert_eq!(content.mark_count(), 2);
    }

    #[test]
    fn test_push_mark_drops_past_capacity() {
        let mut content = CellContent::blank();
        for mark in 1..=MAX_COMBINING_MARKS as u16 {
            assert!(content.push_mark(mark));
        }
        assert!(!content.push_mark(99));
        assert_eq!(content.marks, [1, 2, 3]);
    }

    #[test]
    fn test_push_mark_idempotent_on_trailing_duplicate() {
        let mut content = CellContent::blank();
        content.push_mark(1);
        content.push_mark(2);
        content.push_mark(3);
        // Same trailing mark again: accepted, nothing changes.
        assert!(content.push_mark(3));
        assert_eq!(content.marks, [1, 2, 3]);
    }

    #[test]
    fn test_erased_style_keeps_only_bg() {
        let style = CellStyle::erased(CellColor::Indexed(4));
        assert_eq!(style.bg, CellColor::Indexed(4));
        assert_eq!(style.fg, CellColor::Default);
        assert_eq!(style.attrs.width(), 1);
        assert!(!style.attrs.bold());
    }
}
