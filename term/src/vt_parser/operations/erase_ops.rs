// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! ED / EL and their selective variants DECSED / DECSEL.
//!
//! Cells carrying the DECSCA protected bit resist erasure, which is what
//! lets full-screen programs guard status areas against stray clears.

use vte::Params;

use crate::{ParamsExt, Screen};

pub fn erase_display(screen: &mut Screen, params: &Params, selective: bool) {
    let mode = params.extract_nth_or(0, 0);
    screen.erase_in_display(mode, selective);
}

pub fn erase_line(screen: &mut Screen, params: &Params, selective: bool) {
    let mode = params.extract_nth_or(0, 0);
    screen.erase_in_line(mode, selective);
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{Screen, TermConfig, col, height, width};

    fn screen() -> Screen { Screen::new(height(3) + width(8), TermConfig::default()) }

    fn row_text(screen: &Screen, y: isize) -> String {
        let mut out = String::new();
        let line = screen.visual_line(y).unwrap();
        line.text_into(&mut out, screen.mark_pool(), col(0), col(8));
        out.trim_end().to_string()
    }

    #[test]
    fn test_el_variants() {
        let mut screen = screen();
        screen.apply_ansi_bytes(b"abcdef\x1b[1;3H\x1b[K");
        assert_eq!(row_text(&screen, 0), "ab");

        let mut screen = self::screen();
        screen.apply_ansi_bytes(b"abcdef\x1b[1;3H\x1b[1K");
        assert_eq!(row_text(&screen, 0), "   def");

        let mut screen = self::screen();
        screen.apply_ansi_bytes(b"abcdef\x1b[2K");
        assert_eq!(row_text(&screen, 0), "");
    }

    #[test]
    fn test_ed_below_and_above() {
        let mut screen = screen();
        screen.apply_ansi_bytes(b"one\r\ntwo\r\nthree\x1b[2;2H\x1b[J");
        assert_eq!(row_text(&screen, 0), "one");
        assert_eq!(row_text(&screen, 1), "t");
        assert_eq!(row_text(&screen, 2), "");

        let mut screen = self::screen();
        screen.apply_ansi_bytes(b"one\r\ntwo\r\nthree\x1b[2;2H\x1b[1J");
        assert_eq!(row_text(&screen, 0), "");
        assert_eq!(row_text(&screen, 1), "o");
        assert_eq!(row_text(&screen, 2), "three");
    }

    #[test]
    fn test_ed_three_drops_scrollback() {
        let mut screen = screen();
        screen.apply_ansi_bytes(b"a\r\nb\r\nc\r\nd\r\ne");
        assert!(screen.history_count() > 0);
        screen.apply_ansi_bytes(b"\x1b[3J");
        assert_eq!(screen.history_count(), 0);
    }

    #[test]
    fn test_selective_erase_respects_protection() {
        let mut screen = screen();
        // b is written under DECSCA protection.
        screen.apply_ansi_bytes(b"a\x1b[1\"qb\x1b[0\"qc\x1b[?2K");
        assert_eq!(row_text(&screen, 0), " b");
    }
}
