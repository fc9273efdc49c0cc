// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The quantified properties: determinism, slice-boundary independence,
//! serialization round trips, idempotence, selection equivalences.

use pretty_assertions::assert_eq;

use super::test_helpers::{grid_text, row_text, screen};
use crate::{SelectionMode, col, decode_lossy};

/// Final state is a pure function of the byte stream — chunking must not
/// matter.
#[test]
fn test_state_is_independent_of_slice_boundaries() {
    let input: &[u8] =
        b"\x1b[2J\x1b[3;4Hhe\xe2\x9c\x93llo\x1b[1;31mred\x1b[0m\x1b]2;title\x07\x1b[5D*";

    let mut all_at_once = screen(20, 6);
    all_at_once.apply_ansi_bytes(input);

    let mut byte_by_byte = screen(20, 6);
    for &byte in input {
        byte_by_byte.apply_ansi_bytes(&[byte]);
    }

    assert_eq!(grid_text(&all_at_once), grid_text(&byte_by_byte));
    assert_eq!(all_at_once.cursor_pos(), byte_by_byte.cursor_pos());
}

/// Identical input twice from the same initial state gives identical output.
#[test]
fn test_determinism_across_instances() {
    let input = b"\x1b[2;2Hx\x1b[Ay\x1b[Bz\x1b[31mcolored\x1b[m\r\nnext";
    let mut first = screen(15, 5);
    let mut second = screen(15, 5);
    first.apply_ansi_bytes(input);
    second.apply_ansi_bytes(input);
    assert_eq!(grid_text(&first), grid_text(&second));
    assert_eq!(first.cursor_pos(), second.cursor_pos());
}

/// draw → as_ansi → decode gives back the input codepoints (modulo SGR).
#[test]
fn test_draw_as_ansi_round_trip() {
    let text = "he\u{0301}llo ┌x猫y";
    let mut screen = screen(40, 2);
    screen.apply_ansi_bytes(text.as_bytes());

    let mut bytes = Vec::new();
    screen
        .visual_line(0)
        .unwrap()
        .as_ansi(&mut bytes, screen.mark_pool());

    let decoded: String = decode_lossy(&bytes).into_iter().collect();
    assert_eq!(decoded, text);
}

/// Re-applying the cell's trailing combining mark changes nothing.
#[test]
fn test_combining_mark_idempotence() {
    let mut once = screen(10, 2);
    once.apply_ansi_bytes("e\u{0301}".as_bytes());
    let mut twice = screen(10, 2);
    twice.apply_ansi_bytes("e\u{0301}\u{0301}".as_bytes());

    let cell_once = once.visual_line(0).unwrap().content[0];
    let cell_twice = twice.visual_line(0).unwrap().content[0];
    assert_eq!(cell_once, cell_twice);
}

/// Rectangle selection text equals joining the per-line column slices.
#[test]
fn test_rectangle_selection_equals_line_slices() {
    let rows = ["alpha", "bravo", "charl"];
    let mut screen = screen(10, 3);
    screen.apply_ansi_bytes(b"alpha\r\nbravo\r\ncharl");

    screen.start_selection(1, 0, true, true, SelectionMode::Cell);
    screen.update_selection(3, 2, false, true);
    let selected = screen.selection_text().unwrap();

    let expected: Vec<String> = rows.iter().map(|text| text[1..=3].to_string()).collect();
    assert_eq!(selected, expected.join("\n"));
}

/// Selection text over a soft wrap restores the unbroken logical line.
#[test]
fn test_selection_preserves_wrap_continuity() {
    let mut screen = screen(5, 3);
    screen.apply_ansi_bytes(b"0123456789");
    screen.start_selection(0, 0, true, false, SelectionMode::Cell);
    screen.update_selection(4, 1, false, true);
    assert_eq!(screen.selection_text().unwrap(), "0123456789");
}

/// A full-cycle stress: write, scroll, resize twice, and verify nothing
/// panics and the permutation invariant holds throughout.
#[test]
fn test_mixed_workload_keeps_invariants() {
    let mut screen = screen(12, 6);
    for chunk in [
        &b"\x1b[31mhello\r\nworld\r\n"[..],
        &b"\x1b[2;4r\x1b[3;1Hmid\n\n\n"[..],
        &b"\x1b[r\x1b[?1049h on alt \x1b[?1049l"[..],
        &b"tail\x1b[A\x1b[K"[..],
    ] {
        screen.apply_ansi_bytes(chunk);
    }
    screen.resize(crate::height(3) + crate::width(7));
    screen.resize(crate::height(6) + crate::width(12));

    // Still addressable, still sane.
    for y in 0..6 {
        assert!(screen.visual_line(y).is_some());
    }
    assert!(screen.cursor_pos().col_index <= col(12));
    assert_eq!(row_text(&screen, 5), "");
}
