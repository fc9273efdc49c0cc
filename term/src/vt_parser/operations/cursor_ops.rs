// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Cursor movement (CUU, CUD, CUF, CUB, CNL, CPL, CHA, CUP, VPA, CHT, CBT).
//!
//! Parameter handling follows the VT100 convention: missing and zero both
//! mean 1. Vertical movement clamps at the margins while the cursor is
//! inside them; absolute addressing is origin-relative under DECOM.

use vte::Params;

use crate::{ParamsExt, Screen, col, row};

pub fn cursor_up(screen: &mut Screen, params: &Params) {
    let n = params.extract_nth_non_zero(0);
    screen.move_cursor_by(-(n as isize), 0);
}

pub fn cursor_down(screen: &mut Screen, params: &Params) {
    let n = params.extract_nth_non_zero(0);
    screen.move_cursor_by(n as isize, 0);
}

pub fn cursor_forward(screen: &mut Screen, params: &Params) {
    let n = params.extract_nth_non_zero(0);
    screen.move_cursor_by(0, n as isize);
}

pub fn cursor_backward(screen: &mut Screen, params: &Params) {
    let n = params.extract_nth_non_zero(0);
    screen.move_cursor_by(0, -(n as isize));
}

pub fn cursor_next_line(screen: &mut Screen, params: &Params) {
    cursor_down(screen, params);
    screen.cursor.pos.col_index = col(0);
}

pub fn cursor_prev_line(screen: &mut Screen, params: &Params) {
    cursor_up(screen, params);
    screen.cursor.pos.col_index = col(0);
}

/// CHA / HPA: absolute column, row unchanged.
pub fn cursor_column(screen: &mut Screen, params: &Params) {
    let target = params.extract_nth_non_zero(0) as usize - 1;
    screen.cursor.pos.col_index = col(target).clamp_to(screen.size().col_width);
}

/// CUP / HVP: absolute row and column, origin-relative under DECOM.
pub fn cursor_position(screen: &mut Screen, params: &Params) {
    let target_row = params.extract_nth_non_zero(0) as usize - 1;
    let target_col = params.extract_nth_non_zero(1) as usize - 1;
    screen.set_cursor_position(row(target_row), col(target_col));
}

/// VPA: absolute row, column unchanged.
pub fn vertical_position(screen: &mut Screen, params: &Params) {
    let target_row = params.extract_nth_non_zero(0) as usize - 1;
    let keep_col = screen.effective_col();
    screen.set_cursor_position(row(target_row), keep_col);
}

/// CHT: forward n tab stops.
pub fn forward_tabs(screen: &mut Screen, params: &Params) {
    let n = params.extract_nth_non_zero(0);
    for _ in 0..n {
        let next = screen.tab_stops.next_stop(screen.effective_col());
        screen.cursor.pos.col_index = next;
    }
}

/// CBT: backward n tab stops.
pub fn backward_tabs(screen: &mut Screen, params: &Params) {
    let n = params.extract_nth_non_zero(0);
    for _ in 0..n {
        let prev = screen.tab_stops.prev_stop(screen.effective_col());
        screen.cursor.pos.col_index = prev;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{Screen, TermConfig, col, height, row, width};

    fn screen() -> Screen { Screen::new(height(10) + width(20), TermConfig::default()) }

    #[test]
    fn test_cup_is_one_based() {
        let mut screen = screen();
        screen.apply_ansi_bytes(b"\x1b[3;5H");
        assert_eq!(screen.cursor_pos(), row(2) + col(4));
    }

    #[test]
    fn test_zero_and_missing_params_mean_one() {
        let mut screen = screen();
        screen.apply_ansi_bytes(b"\x1b[5;5H\x1b[0A\x1b[B\x1b[2C");
        // Up 1, down 1, right 2 from (4,4).
        assert_eq!(screen.cursor_pos(), row(4) + col(6));
    }

    #[test]
    fn test_motion_clamps_at_edges() {
        let mut screen = screen();
        screen.apply_ansi_bytes(b"\x1b[99A\x1b[99D");
        assert_eq!(screen.cursor_pos(), row(0) + col(0));
        screen.apply_ansi_bytes(b"\x1b[99B\x1b[99C");
        assert_eq!(screen.cursor_pos(), row(9) + col(19));
    }

    #[test]
    fn test_vertical_motion_respects_margins() {
        let mut screen = screen();
        screen.apply_ansi_bytes(b"\x1b[3;6r\x1b[4;1H\x1b[99A");
        // Margins rows 3..=6 (1-based); CUU clamps at the top margin.
        assert_eq!(screen.cursor_pos(), row(2) + col(0));
        screen.apply_ansi_bytes(b"\x1b[99B");
        assert_eq!(screen.cursor_pos(), row(5) + col(0));
    }

    #[test]
    fn test_origin_mode_offsets_cup() {
        let mut screen = screen();
        screen.apply_ansi_bytes(b"\x1b[3;6r\x1b[?6h\x1b[1;1H");
        assert_eq!(screen.cursor_pos(), row(2) + col(0));
        // DECOM clamps addressing inside the margins.
        screen.apply_ansi_bytes(b"\x1b[99;1H");
        assert_eq!(screen.cursor_pos(), row(5) + col(0));
    }

    #[test]
    fn test_cnl_and_cpl_reset_column() {
        let mut screen = screen();
        screen.apply_ansi_bytes(b"abc\x1b[E");
        assert_eq!(screen.cursor_pos(), row(1) + col(0));
        screen.apply_ansi_bytes(b"xy\x1b[F");
        assert_eq!(screen.cursor_pos(), row(0) + col(0));
    }

    #[test]
    fn test_cha_and_vpa() {
        let mut screen = screen();
        screen.apply_ansi_bytes(b"\x1b[5;5H\x1b[2G");
        assert_eq!(screen.cursor_pos(), row(4) + col(1));
        screen.apply_ansi_bytes(b"\x1b[8d");
        assert_eq!(screen.cursor_pos(), row(7) + col(1));
    }

    #[test]
    fn test_tab_hopping() {
        let mut screen = screen();
        screen.apply_ansi_bytes(b"\x1b[2I");
        assert_eq!(screen.cursor_pos(), row(0) + col(16));
        screen.apply_ansi_bytes(b"\x1b[Z");
        assert_eq!(screen.cursor_pos(), row(0) + col(8));
    }
}
