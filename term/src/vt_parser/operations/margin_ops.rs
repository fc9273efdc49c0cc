// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! DECSTBM: set top and bottom margins.

use vte::Params;

use crate::{ParamsExt, Screen};

/// `ESC[r`, `ESC[0r`, and `ESC[0;0r` all reset to the full screen; anything
/// inverted or out of range does too. The cursor homes afterwards.
pub fn set_margins(screen: &mut Screen, params: &Params) {
    let top = usize::from(params.extract_nth_or(0, 0)).max(1);
    let bottom = usize::from(params.extract_nth_or(1, 0));
    screen.set_margins(top, bottom);
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{Screen, TermConfig, col, height, row, width};

    #[test]
    fn test_margins_set_and_home() {
        let mut screen = Screen::new(height(10) + width(20), TermConfig::default());
        screen.apply_ansi_bytes(b"\x1b[5;5H\x1b[2;8r");
        assert_eq!(screen.margin_top, row(1));
        assert_eq!(screen.margin_bottom, row(7));
        assert_eq!(screen.cursor_pos(), row(0) + col(0));
    }

    #[test]
    fn test_reset_forms() {
        let mut screen = Screen::new(height(10) + width(20), TermConfig::default());
        screen.apply_ansi_bytes(b"\x1b[2;8r\x1b[r");
        assert_eq!(screen.margin_top, row(0));
        assert_eq!(screen.margin_bottom, row(9));
    }

    #[test]
    fn test_inverted_request_resets() {
        let mut screen = Screen::new(height(10) + width(20), TermConfig::default());
        screen.apply_ansi_bytes(b"\x1b[8;2r");
        assert_eq!(screen.margin_top, row(0));
        assert_eq!(screen.margin_bottom, row(9));
    }
}
