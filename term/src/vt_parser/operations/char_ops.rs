// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Character edits on the current row: ICH, DCH, ECH, REP.

use vte::Params;

use crate::{BLANK_CHAR, ParamsExt, Screen};

/// ICH: insert n blanks at the cursor; the rest of the row shifts right.
pub fn insert_chars(screen: &mut Screen, params: &Params) {
    let n = usize::from(params.extract_nth_non_zero(0));
    let x = screen.effective_col();
    let y = screen.cursor.pos.row_index;
    let bg = screen.bg();
    screen.active_mut().line_mut(y).right_shift(x, n, bg);
    screen.dirty.mark_line(y);
}

/// DCH: delete n chars at the cursor; the rest shifts left, blanks fill the
/// tail.
pub fn delete_chars(screen: &mut Screen, params: &Params) {
    let n = usize::from(params.extract_nth_non_zero(0));
    let x = screen.effective_col();
    let y = screen.cursor.pos.row_index;
    let bg = screen.bg();
    screen.active_mut().line_mut(y).left_shift(x, n, bg);
    screen.dirty.mark_line(y);
}

/// ECH: overwrite n cells with blanks, no shifting.
pub fn erase_chars(screen: &mut Screen, params: &Params) {
    let n = usize::from(params.extract_nth_non_zero(0));
    let x = screen.effective_col();
    let y = screen.cursor.pos.row_index;
    let bg = screen.bg();
    screen.active_mut().line_mut(y).clear(x, n, BLANK_CHAR, bg);
    screen.dirty.mark_line(y);
}

/// REP: repeat the last graphic character n times. Nothing printed yet means
/// nothing to repeat.
pub fn repeat_char(screen: &mut Screen, params: &Params) {
    let n = params.extract_nth_non_zero(0);
    let Some(ch) = screen.last_graphic_char else {
        return;
    };
    for _ in 0..n {
        screen.draw(ch);
    }
}
