// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Text ingestion: wide chars at the right edge, grapheme clusters, wrap
//! linkage.

use pretty_assertions::assert_eq;

use super::test_helpers::{row_text, screen};
use crate::{col, row};

#[test]
fn test_wide_char_at_right_edge() {
    // 3×2 grid, input "A猫".
    //
    // Column:   0    1    2
    //         ┌────┬────┬────┐
    // Row 0:  │ A  │    │    │   the wide char did not fit
    //         ├────┼────┼────┤
    // Row 1:  │ 猫 ━━ 猫 │    │   width 2 + width 0, row continued
    //         └────┴────┴────┘
    let mut screen = screen(3, 2);
    screen.apply_ansi_bytes("A猫".as_bytes());

    assert_eq!(row_text(&screen, 0), "A");
    let line1 = screen.visual_line(1).unwrap();
    assert_eq!(line1.content[0].ch, '猫');
    assert_eq!(line1.style[0].attrs.width(), 2);
    assert_eq!(line1.style[1].attrs.width(), 0);
    assert!(line1.attrs.is_continued());
}

#[test]
fn test_grapheme_cluster_width() {
    // "e" + U+0301: one cell, one combining mark, cursor advances 1 not 2.
    let mut screen = screen(10, 2);
    screen.apply_ansi_bytes("e\u{0301}".as_bytes());

    assert_eq!(screen.cursor_pos(), row(0) + col(1));
    let line = screen.visual_line(0).unwrap();
    assert_eq!(line.content[0].ch, 'e');
    assert_eq!(line.content[0].mark_count(), 1);
    assert_eq!(
        screen.mark_pool().get(line.content[0].marks[0]),
        Some('\u{0301}')
    );
}

#[test]
fn test_zwj_emoji_occupies_one_cell_pair() {
    // Family emoji: several codepoints joined by ZWJ render as one cluster.
    let mut screen = screen(10, 2);
    screen.apply_ansi_bytes("👨\u{200D}👩\u{200D}👧x".as_bytes());

    let line = screen.visual_line(0).unwrap();
    assert_eq!(line.content[0].ch, '👨');
    assert!(line.content[0].mark_count() > 0);
    // The follow-up char lands right after the single wide cell pair.
    assert_eq!(line.content[2].ch, 'x');
}

#[test]
fn test_wrap_linkage_survives_round_trip() {
    let mut screen = screen(4, 3);
    screen.apply_ansi_bytes(b"abcdef");

    // Row 0 flags the wrap, row 1 carries the continuation bit.
    assert!(screen.visual_line(0).unwrap().continues_to_next_row());
    assert!(screen.visual_line(1).unwrap().attrs.is_continued());
    assert_eq!(row_text(&screen, 0), "abcd");
    assert_eq!(row_text(&screen, 1), "ef");
}

#[test]
fn test_invalid_utf8_becomes_replacement() {
    let mut screen = screen(10, 2);
    screen.apply_ansi_bytes(b"a\xffb");
    assert_eq!(row_text(&screen, 0), "a\u{fffd}b");
}

#[test]
fn test_insert_mode_shifts_row() {
    let mut screen = screen(10, 2);
    screen.apply_ansi_bytes(b"world\x1b[1;1H\x1b[4h##");
    assert_eq!(row_text(&screen, 0), "##world");
    assert_eq!(screen.cursor_pos(), row(0) + col(2));
}

#[test]
fn test_control_chars_do_not_print() {
    let mut screen = screen(10, 2);
    screen.apply_ansi_bytes(b"a\x00\x01b");
    assert_eq!(row_text(&screen, 0), "ab");
}
