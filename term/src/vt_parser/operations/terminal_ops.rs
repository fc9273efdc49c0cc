// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Terminal-level operations: direct ESC dispatch, resets, cursor style,
//! character protection, tab clearing.

use vte::Params;

use crate::{CursorShape, ParamsExt, Screen, ScreenModes, col,
            screen::charsets::CharsetDesignation,
            vt_parser::protocols::esc_codes};

/// Direct ESC sequences (`ESC final`, with at most one intermediate).
pub fn esc_dispatch(screen: &mut Screen, intermediates: &[u8], byte: u8) {
    match (intermediates, byte) {
        ([], esc_codes::DECSC_SAVE_CURSOR) => screen.save_cursor(),
        ([], esc_codes::DECRC_RESTORE_CURSOR) => screen.restore_cursor(),
        ([], esc_codes::IND_INDEX) => screen.index_down(),
        ([], esc_codes::NEL_NEXT_LINE) => {
            screen.index_down();
            screen.cursor.pos.col_index = col(0);
        }
        ([], esc_codes::RI_REVERSE_INDEX) => screen.reverse_index_up(),
        ([], esc_codes::HTS_SET_TAB) => {
            let x = screen.effective_col();
            screen.tab_stops.set(x);
        }
        ([], esc_codes::RIS_RESET) => screen.reset_hard(),
        ([], esc_codes::SS2_SINGLE_SHIFT_2) => screen.charsets.single_shift = Some(2),
        ([], esc_codes::SS3_SINGLE_SHIFT_3) => screen.charsets.single_shift = Some(3),
        ([], esc_codes::DECKPAM_KEYPAD_APP) => {
            screen.modes.insert(ScreenModes::KEYPAD_APP);
        }
        ([], esc_codes::DECKPNM_KEYPAD_NUMERIC) => {
            screen.modes.remove(ScreenModes::KEYPAD_APP);
        }
        ([esc_codes::HASH_INTERMEDIATE], esc_codes::DECALN_FILL) => {
            screen.screen_alignment_pattern();
        }
        ([slot @ (esc_codes::CHARSET_G0
        | esc_codes::CHARSET_G1
        | esc_codes::CHARSET_G2
        | esc_codes::CHARSET_G3)], final_byte) => {
            let index = usize::from(slot - esc_codes::CHARSET_G0);
            screen
                .charsets
                .designate(index, CharsetDesignation::from_final_byte(final_byte));
        }
        _ => {
            tracing::trace!("ESC {:?} {byte:#04x}: unhandled sequence", intermediates);
        }
    }
}

/// DECSCUSR (`CSI Ps SP q`): cursor shape and blink.
pub fn set_cursor_style(screen: &mut Screen, params: &Params) {
    let (shape, blink) = match params.extract_nth_or(0, 0) {
        0 | 1 => (CursorShape::Block, true),
        2 => (CursorShape::Block, false),
        3 => (CursorShape::Underline, true),
        4 => (CursorShape::Underline, false),
        5 => (CursorShape::Beam, true),
        6 => (CursorShape::Beam, false),
        other => {
            tracing::warn!("DECSCUSR {other}: unknown cursor style");
            return;
        }
    };
    screen.cursor.shape = shape;
    screen.cursor.blink = blink;
}

/// DECSCA (`CSI Ps " q`): 1 guards subsequent cells against selective erase,
/// 0/2 removes the guard.
pub fn set_protection(screen: &mut Screen, params: &Params) {
    let protect = params.extract_nth_or(0, 0) == 1;
    screen.cursor.pen.attrs.set_protected(protect);
}

/// TBC (`CSI Ps g`): 0 clears the stop at the cursor, 3 clears all.
pub fn tab_clear(screen: &mut Screen, params: &Params) {
    match params.extract_nth_or(0, 0) {
        0 => {
            let x = screen.effective_col();
            screen.tab_stops.clear(x);
        }
        3 => screen.tab_stops.clear_all(),
        other => tracing::warn!("TBC {other}: unknown tab clear mode"),
    }
}
