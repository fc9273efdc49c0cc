// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Styling and hyperlink scope across the full pipeline.

use pretty_assertions::assert_eq;

use super::test_helpers::screen;
use crate::{CellColor, CellStyle};

#[test]
fn test_sgr_reset_mid_stream() {
    // ESC[1;31mA ESC[0mB → A bold red, B default.
    let mut screen = screen(10, 2);
    screen.apply_ansi_bytes(b"\x1b[1;31mA\x1b[0mB");

    let line = screen.visual_line(0).unwrap();
    assert_eq!(line.content[0].ch, 'A');
    assert!(line.style[0].attrs.bold());
    assert_eq!(line.style[0].fg, CellColor::Indexed(1));

    assert_eq!(line.content[1].ch, 'B');
    assert_eq!(line.style[1], {
        let mut expected = CellStyle::default();
        expected.attrs.set_width(1);
        expected
    });
}

#[test]
fn test_style_applies_at_write_time() {
    // Changing the pen later never retints existing cells.
    let mut screen = screen(10, 2);
    screen.apply_ansi_bytes(b"\x1b[32mgreen\x1b[31m");
    let line = screen.visual_line(0).unwrap();
    assert_eq!(line.style[0].fg, CellColor::Indexed(2));
}

#[test]
fn test_hyperlink_scope() {
    // OSC 8 opens a scope, the empty-url form closes it.
    let mut screen = screen(20, 2);
    screen.apply_ansi_bytes(b"\x1b]8;;https://x\x1b\\hello\x1b]8;;\x1b\\world");

    let line = screen.visual_line(0).unwrap();
    let id = line.content[0].hyperlink;
    assert_ne!(id, 0);
    for x in 0..5 {
        assert_eq!(line.content[x].hyperlink, id, "column {x} inside scope");
    }
    for x in 5..10 {
        assert_eq!(line.content[x].hyperlink, 0, "column {x} outside scope");
    }
    assert_eq!(screen.hyperlink_pool().get(id).unwrap().url, "https://x");
}

#[test]
fn test_same_link_reuses_id() {
    let mut screen = screen(20, 2);
    screen.apply_ansi_bytes(b"\x1b]8;;https://x\x1b\\a\x1b]8;;\x1b\\b\x1b]8;;https://x\x1b\\c");
    let line = screen.visual_line(0).unwrap();
    assert_eq!(line.content[0].hyperlink, line.content[2].hyperlink);
    assert_eq!(line.content[1].hyperlink, 0);
}

#[test]
fn test_erase_keeps_pen_background() {
    // EL fills with the *current* background, the classic colored-prompt
    // trick.
    let mut screen = screen(10, 2);
    screen.apply_ansi_bytes(b"\x1b[44m\x1b[2K");
    let line = screen.visual_line(0).unwrap();
    assert_eq!(line.style[0].bg, CellColor::Indexed(4));
    assert_eq!(line.style[9].bg, CellColor::Indexed(4));
}

#[test]
fn test_reverse_video_mode_marks_screen() {
    let mut screen = screen(10, 2);
    let _ = screen.dirty_regions();
    screen.apply_ansi_bytes(b"\x1b[?5h");
    assert!(screen.modes.contains(crate::ScreenModes::DECSCNM));
    assert!(!screen.dirty_regions().is_empty());
}
