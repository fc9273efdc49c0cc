// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! C0 control bytes (the `execute` path).

use crate::{Screen, ScreenModes, TermEvent, col,
            vt_parser::protocols::esc_codes};

pub fn execute(screen: &mut Screen, byte: u8) {
    match byte {
        esc_codes::BELL => {
            screen.push_event(TermEvent::Bell);
            screen.push_event(TermEvent::RequestAttention);
        }
        esc_codes::BACKSPACE => {
            let x = screen.effective_col();
            if x.as_usize() > 0 {
                screen.cursor.pos.col_index = x - 1;
            }
        }
        esc_codes::TAB => {
            let next = screen.tab_stops.next_stop(screen.effective_col());
            screen.cursor.pos.col_index = next;
        }
        // LF, VT, and FF all index down; LNM adds the carriage return.
        esc_codes::LINE_FEED | esc_codes::VERTICAL_TAB | esc_codes::FORM_FEED => {
            screen.index_down();
            if screen.modes.contains(ScreenModes::LNM) {
                screen.cursor.pos.col_index = col(0);
            }
        }
        esc_codes::CARRIAGE_RETURN => {
            screen.cursor.pos.col_index = col(0);
        }
        esc_codes::SHIFT_OUT => screen.charsets.shift_out(),
        esc_codes::SHIFT_IN => screen.charsets.shift_in(),
        // SUB and CAN abort sequences inside the tokenizer; other C0 bytes
        // have no display effect.
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{Screen, TermConfig, TermEvent, col, height, row, width};

    fn screen() -> Screen { Screen::new(height(4) + width(16), TermConfig::default()) }

    #[test]
    fn test_carriage_return_and_line_feed() {
        let mut screen = screen();
        screen.apply_ansi_bytes(b"ab\r\ncd");
        assert_eq!(screen.cursor_pos(), row(1) + col(2));
    }

    #[test]
    fn test_tab_moves_to_next_stop() {
        let mut screen = screen();
        screen.apply_ansi_bytes(b"a\t");
        assert_eq!(screen.cursor_pos(), row(0) + col(8));
    }

    #[test]
    fn test_backspace_stops_at_left_edge() {
        let mut screen = screen();
        screen.apply_ansi_bytes(b"\x08\x08");
        assert_eq!(screen.cursor_pos(), row(0) + col(0));
    }

    #[test]
    fn test_bell_queues_event() {
        let mut screen = screen();
        screen.apply_ansi_bytes(b"\x07");
        assert!(screen.drain_events().contains(&TermEvent::Bell));
    }
}
