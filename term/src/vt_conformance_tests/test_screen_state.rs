// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Screen state machinery: alt screen, scrollback, margins, resize.

use pretty_assertions::assert_eq;

use super::test_helpers::{grid_text, row_text, screen, screen_with_scrollback};
use crate::{col, height, row, width};

#[test]
fn test_cursor_save_restore_across_alt_screen() {
    // Enter alt (CSI ?1049h), write at (5,5), exit (CSI ?1049l): cursor and
    // main content must come back untouched.
    let mut screen = screen(20, 10);
    screen.apply_ansi_bytes(b"main content");
    let pos_before = screen.cursor_pos();

    screen.apply_ansi_bytes(b"\x1b[?1049h\x1b[6;6HX\x1b[?1049l");

    assert_eq!(screen.cursor_pos(), pos_before);
    assert_eq!(row_text(&screen, 0), "main content");
    assert!(!screen.is_alt_screen_active());
}

#[test]
fn test_alt_screen_cleared_on_entry() {
    let mut screen = screen(20, 5);
    screen.apply_ansi_bytes(b"\x1b[?1049hfirst\x1b[?1049l\x1b[?1049h");
    // Second entry sees a cleared alt screen.
    assert_eq!(row_text(&screen, 0), "");
    assert!(screen.is_alt_screen_active());
}

#[test]
fn test_scroll_with_history() {
    // 80×24, history cap 100, 124 newlines: the ring holds exactly its
    // capacity, the screen is blank, the cursor rests on the last row.
    let mut screen = screen_with_scrollback(80, 24, 100);
    screen.apply_ansi_bytes(&b"\n".repeat(124));

    assert_eq!(screen.history_count(), 100);
    assert_eq!(grid_text(&screen).trim(), "");
    assert_eq!(screen.cursor_pos(), row(23) + col(0));
}

#[test]
fn test_history_is_readable_through_negative_rows() {
    let mut screen = screen_with_scrollback(10, 2, 10);
    screen.apply_ansi_bytes(b"one\r\ntwo\r\nthree\r\nfour");
    assert_eq!(screen.history_count(), 2);
    assert_eq!(row_text(&screen, -1), "two");
    assert_eq!(row_text(&screen, -2), "one");
    assert_eq!(row_text(&screen, 0), "three");
}

#[test]
fn test_scroll_region_contains_scrolling() {
    let mut screen = screen(10, 5);
    screen.apply_ansi_bytes(b"top\x1b[2;4r\x1b[4;1Hmid\n\n\n\x1b[r");
    // Rows outside the 2..4 region never move.
    assert_eq!(row_text(&screen, 0), "top");
    assert_eq!(screen.history_count(), 0);
}

#[test]
fn test_round_trip_resize_preserves_grid_and_cursor() {
    let mut screen = screen(8, 4);
    screen.apply_ansi_bytes(b"hello\r\nworld\x1b[2;3H");
    let before_grid = grid_text(&screen);
    let before_cursor = screen.cursor_pos();

    screen.resize(height(4) + width(5));
    screen.resize(height(4) + width(8));

    assert_eq!(grid_text(&screen), before_grid);
    assert_eq!(screen.cursor_pos(), before_cursor);
}

#[test]
fn test_resize_rewraps_wrapped_lines() {
    let mut screen = screen(4, 4);
    screen.apply_ansi_bytes(b"abcdef");
    assert_eq!(row_text(&screen, 0), "abcd");
    assert_eq!(row_text(&screen, 1), "ef");

    screen.resize(height(4) + width(8));
    assert_eq!(row_text(&screen, 0), "abcdef");
}

#[test]
fn test_resize_to_zero_is_coerced() {
    let mut screen = screen(8, 4);
    screen.resize(height(0) + width(0));
    assert_eq!(screen.size().col_width, width(1));
    assert_eq!(screen.size().row_height, height(1));
}

#[test]
fn test_reverse_index_at_top_scrolls_down() {
    let mut screen = screen(8, 3);
    screen.apply_ansi_bytes(b"one\r\ntwo\x1b[1;1H\x1bM");
    assert_eq!(row_text(&screen, 0), "");
    assert_eq!(row_text(&screen, 1), "one");
    assert_eq!(row_text(&screen, 2), "two");
}

#[test]
fn test_decom_confines_cursor_to_margins() {
    let mut screen = screen(10, 6);
    screen.apply_ansi_bytes(b"\x1b[2;4r\x1b[?6h");
    assert_eq!(screen.cursor_pos(), row(1) + col(0));
    // Addressing is margin-relative and clamped to the margin bottom.
    screen.apply_ansi_bytes(b"\x1b[99;1H");
    assert_eq!(screen.cursor_pos(), row(3) + col(0));
}
