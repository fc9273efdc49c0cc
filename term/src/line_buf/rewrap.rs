// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Resize re-flow.
//!
//! A *logical line* is a maximal run of physical rows whose successors carry
//! `is_continued`. Rewrap walks each logical line's cells and re-breaks them
//! at the new width: wide pairs never split across rows, wrap linkage
//! (`is_continued` + `next_char_was_wrapped`) is rebuilt, and the cursor's
//! position inside its logical line is preserved. Rows that no longer fit the
//! new height leave through the top into history; the whole operation builds a
//! fresh grid so a rewrap is atomic — the old grid stays untouched until the
//! caller swaps the result in.

use super::LineBuf;
use crate::{CellColor, CellContent, CellStyle, GridSize, HistoryBuf, Line, Pos,
            RowIndex, col, row};

/// One column-occupying unit of a logical line (width 1 or 2; wide second
/// halves are re-synthesized on emission).
#[derive(Copy, Clone, Debug)]
pub(crate) struct FlatCell {
    pub content: CellContent,
    pub style: CellStyle,
    /// Column this unit occupied in the pre-resize layout of its logical
    /// line; used to map the cursor through the re-break.
    pub orig_col: usize,
}

/// Outcome of a rewrap: the fresh grid and where the cursor landed.
#[derive(Debug)]
pub struct RewrapResult {
    pub buf: LineBuf,
    pub cursor: Pos,
}

impl LineBuf {
    /// Re-flow this grid into `new_size`. Rows displaced off the top feed
    /// `history` (pass `None` for the alt screen, which has no scrollback).
    #[must_use]
    pub fn rewrap(
        &self,
        new_size: GridSize,
        bg: CellColor,
        mut history: Option<&mut HistoryBuf>,
        cursor: Pos,
    ) -> RewrapResult {
        let new_size = new_size.clamp_to_min();
        let new_xnum = new_size.col_width.as_usize();
        let new_ynum = new_size.row_height.as_usize();

        let (logicals, cursor_logical, cursor_orig_col) = self.gather_logical_lines(cursor);

        let mut rows: Vec<Line> = Vec::new();
        let mut cursor_out: Option<(usize, usize)> = None;

        for (logical_idx, cells) in logicals.iter().enumerate() {
            emit_logical_line(
                cells,
                new_xnum,
                bg,
                &mut rows,
                (logical_idx == cursor_logical).then_some(cursor_orig_col),
                &mut cursor_out,
            );
        }

        let mut cursor_row = cursor_out.map_or(0, |(r, _)| r);
        let cursor_col = cursor_out.map_or(0, |(_, c)| c);

        // Shrinking height: drop blank rows below the cursor before pushing
        // real content into history.
        while rows.len() > new_ynum
            && rows.len() - 1 > cursor_row
            && rows
                .last()
                .is_some_and(|line| line.as_line_ref().last_occupied_col().is_none())
        {
            rows.pop();
        }

        // Whatever still overflows leaves through the top.
        if rows.len() > new_ynum {
            let overflow = rows.len() - new_ynum;
            for line in rows.drain(..overflow) {
                if let Some(history) = history.as_deref_mut() {
                    history.add_line(line);
                }
            }
            cursor_row = cursor_row.saturating_sub(overflow);
        }

        let mut buf = LineBuf::new(new_size, bg);
        for (y, line) in rows.iter().enumerate() {
            let mut target = buf.line_mut(row(y));
            target.content.copy_from_slice(&line.content);
            target.style.copy_from_slice(&line.style);
            *target.attrs = line.attrs;
        }

        let cursor = row(cursor_row.min(new_ynum - 1)) + col(cursor_col.min(new_xnum));
        RewrapResult { buf, cursor }
    }

    /// Collect the grid into logical lines of [`FlatCell`] units, with the
    /// cursor expressed as (logical line index, original column offset).
    fn gather_logical_lines(
        &self,
        cursor: Pos,
    ) -> (Vec<Vec<FlatCell>>, usize, usize) {
        let xnum = self.xnum().as_usize();
        let mut logicals: Vec<Vec<FlatCell>> = Vec::new();
        let mut cursor_logical = 0;
        let mut cursor_orig_col = cursor.col_index.as_usize();
        let mut rows_in_current = 0;

        for y in 0..self.ynum().as_usize() {
            let line = self.line(RowIndex(y));
            if y == 0 || !line.attrs.is_continued() {
                logicals.push(Vec::new());
                rows_in_current = 0;
            }
            let logical = logicals.last_mut().expect("pushed above");
            for x in 0..xnum {
                let style = line.style[x];
                if style.attrs.width() == 0 {
                    continue;
                }
                logical.push(FlatCell {
                    content: line.content[x],
                    style,
                    orig_col: rows_in_current * xnum + x,
                });
            }
            if y == cursor.row_index.as_usize() {
                cursor_logical = logicals.len() - 1;
                cursor_orig_col = rows_in_current * xnum + cursor.col_index.as_usize();
            }
            rows_in_current += 1;
        }

        // Trim trailing unstyled blanks of each logical line so re-breaking
        // does not manufacture wrapped rows out of erased tails.
        for logical in &mut logicals {
            while logical.last().is_some_and(|cell| {
                cell.content.is_blank() && cell.style == CellStyle::default()
            }) {
                logical.pop();
            }
        }

        (logicals, cursor_logical, cursor_orig_col)
    }
}

/// Re-break one logical line at `new_xnum`, appending the produced rows. When
/// `cursor_target` is set, record where that original column lands.
pub(crate) fn emit_logical_line(
    cells: &[FlatCell],
    new_xnum: usize,
    bg: CellColor,
    rows: &mut Vec<Line>,
    cursor_target: Option<usize>,
    cursor_out: &mut Option<(usize, usize)>,
) {
    let mut current = Line::blank(crate::width(new_xnum), bg);
    let mut x = 0_usize;

    for cell in cells {
        let mut unit_width = usize::from(cell.style.attrs.width().max(1));
        let mut cell_style = cell.style;
        if unit_width > new_xnum {
            // A wide pair cannot exist on a one-column grid; it degrades to
            // its first half.
            unit_width = new_xnum;
            cell_style.attrs.set_width(1);
        }
        if x + unit_width > new_xnum {
            // Soft wrap: close this row and link the next one.
            current.style[new_xnum - 1].attrs.set_next_char_was_wrapped(true);
            rows.push(current);
            current = Line::blank(crate::width(new_xnum), bg);
            current.attrs.set_continued(true);
            x = 0;
        }

        current.content[x] = cell.content;
        current.style[x] = cell_style;
        if unit_width == 2 && x + 1 < new_xnum {
            current.content[x + 1] = CellContent {
                ch: crate::BLANK_CHAR,
                marks: [0; 3],
                hyperlink: cell.content.hyperlink,
            };
            let mut second = cell.style;
            second.attrs.set_width(0);
            current.style[x + 1] = second;
        }

        if cursor_target == Some(cell.orig_col) {
            *cursor_out = Some((rows.len(), x));
        }
        x += unit_width;
    }

    if cursor_target.is_some() && cursor_out.is_none() {
        // Cursor sat past the content (on erased cells): land it just after
        // the re-flowed text, allowing the pending-wrap column.
        *cursor_out = Some((rows.len(), x.min(new_xnum)));
    }
    rows.push(current);
}
