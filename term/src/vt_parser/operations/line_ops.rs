// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Line edits inside the scroll region: IL, DL.
//!
//! Both are no-ops when the cursor sits outside the margins, and both home
//! the cursor to column 0, per DEC.

use vte::Params;

use crate::{ParamsExt, Screen, col};

pub fn insert_lines(screen: &mut Screen, params: &Params) {
    let n = usize::from(params.extract_nth_non_zero(0));
    let y = screen.cursor.pos.row_index;
    if y < screen.margin_top || y > screen.margin_bottom {
        return;
    }
    let bottom = screen.margin_bottom;
    let bg = screen.bg();
    screen.active_mut().insert_lines(n, y, bottom, bg);
    screen.cursor.pos.col_index = col(0);
    screen.dirty.mark_lines(y, bottom);
    screen.selection.clear();
}

pub fn delete_lines(screen: &mut Screen, params: &Params) {
    let n = usize::from(params.extract_nth_non_zero(0));
    let y = screen.cursor.pos.row_index;
    if y < screen.margin_top || y > screen.margin_bottom {
        return;
    }
    let bottom = screen.margin_bottom;
    let bg = screen.bg();
    screen.active_mut().delete_lines(n, y, bottom, bg);
    screen.cursor.pos.col_index = col(0);
    screen.dirty.mark_lines(y, bottom);
    screen.selection.clear();
}
