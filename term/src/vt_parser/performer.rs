// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The [`vte::Perform`] implementation: one semantic event per terminated
//! sequence, routed to the operation modules.
//!
//! ```text
//! Child process (vim, bash, …)
//!         ↓
//!     byte stream (arbitrary slice boundaries)
//!         ↓
//!     vte::Parser (VT500 state machine, UTF-8, OSC buffering)
//!         ↓
//!     VtPerformer [THIS TYPE]
//!         ↓
//!     operations::{cursor, char, line, scroll, erase, sgr, mode, …}
//!         ↓
//!     Screen mutations + queued TermEvents
//! ```
//!
//! Dispatch keys on the final byte *and* the intermediates: the private
//! markers `?`, `>`, `<`, `=` and the intermediates `SP`, `!`, `"`, `#`,
//! `$` select different operations for the same final (e.g. `CSI q` is
//! DECSCUSR with `SP` but DECSCA with `"`).

use vte::{Params, Perform};

use super::{operations::{char_ops, control_ops, cursor_ops, dsr_ops, erase_ops,
                         line_ops, margin_ops, mode_ops, osc_ops, scroll_ops, sgr_ops,
                         terminal_ops},
            protocols::csi_codes};
use crate::Screen;

/// Borrow of the screen for the duration of one `advance()` call.
#[derive(Debug)]
pub struct VtPerformer<'a> {
    pub screen: &'a mut Screen,
}

impl Perform for VtPerformer<'_> {
    fn print(&mut self, ch: char) { self.screen.draw(ch); }

    fn execute(&mut self, byte: u8) { control_ops::execute(self.screen, byte); }

    #[allow(clippy::too_many_lines)]
    fn csi_dispatch(
        &mut self,
        params: &Params,
        intermediates: &[u8],
        ignore: bool,
        action: char,
    ) {
        if ignore {
            // Parameter or intermediate overflow: the sequence is malformed
            // and executing a truncated version risks doing the wrong thing.
            tracing::warn!("CSI {action}: overlong sequence discarded");
            return;
        }

        let screen = &mut *self.screen;
        match (intermediates, action) {
            ([], csi_codes::CUU_CURSOR_UP) => cursor_ops::cursor_up(screen, params),
            ([], csi_codes::CUD_CURSOR_DOWN) => cursor_ops::cursor_down(screen, params),
            ([], csi_codes::CUF_CURSOR_FORWARD) => {
                cursor_ops::cursor_forward(screen, params);
            }
            ([], csi_codes::CUB_CURSOR_BACKWARD) => {
                cursor_ops::cursor_backward(screen, params);
            }
            ([], csi_codes::CNL_CURSOR_NEXT_LINE) => {
                cursor_ops::cursor_next_line(screen, params);
            }
            ([], csi_codes::CPL_CURSOR_PREV_LINE) => {
                cursor_ops::cursor_prev_line(screen, params);
            }
            ([], csi_codes::CHA_CURSOR_COLUMN | csi_codes::HPA_HORIZONTAL_POSITION) => {
                cursor_ops::cursor_column(screen, params);
            }
            ([], csi_codes::CUP_CURSOR_POSITION | csi_codes::HVP_CURSOR_POSITION) => {
                cursor_ops::cursor_position(screen, params);
            }
            ([], csi_codes::HPR_HORIZONTAL_RELATIVE) => {
                cursor_ops::cursor_forward(screen, params);
            }
            ([], csi_codes::VPA_VERTICAL_POSITION) => {
                cursor_ops::vertical_position(screen, params);
            }
            ([], csi_codes::VPR_VERTICAL_RELATIVE) => {
                cursor_ops::cursor_down(screen, params);
            }
            ([], csi_codes::CHT_FORWARD_TABS) => cursor_ops::forward_tabs(screen, params),
            ([], csi_codes::CBT_BACKWARD_TABS) => {
                cursor_ops::backward_tabs(screen, params);
            }
            ([], csi_codes::SCOSC_SAVE_CURSOR) => screen.save_cursor(),
            ([], csi_codes::SCORC_RESTORE_CURSOR) => screen.restore_cursor(),

            ([], csi_codes::ED_ERASE_DISPLAY) => {
                erase_ops::erase_display(screen, params, false);
            }
            ([], csi_codes::EL_ERASE_LINE) => erase_ops::erase_line(screen, params, false),
            ([b'?'], csi_codes::ED_ERASE_DISPLAY) => {
                erase_ops::erase_display(screen, params, true);
            }
            ([b'?'], csi_codes::EL_ERASE_LINE) => {
                erase_ops::erase_line(screen, params, true);
            }

            ([], csi_codes::SU_SCROLL_UP) => scroll_ops::scroll_up(screen, params),
            ([], csi_codes::SD_SCROLL_DOWN) => scroll_ops::scroll_down(screen, params),
            ([], csi_codes::DECSTBM_SET_MARGINS) => {
                margin_ops::set_margins(screen, params);
            }
            ([], csi_codes::IL_INSERT_LINE) => line_ops::insert_lines(screen, params),
            ([], csi_codes::DL_DELETE_LINE) => line_ops::delete_lines(screen, params),

            ([], csi_codes::ICH_INSERT_CHAR) => char_ops::insert_chars(screen, params),
            ([], csi_codes::DCH_DELETE_CHAR) => char_ops::delete_chars(screen, params),
            ([], csi_codes::ECH_ERASE_CHAR) => char_ops::erase_chars(screen, params),
            ([], csi_codes::REP_REPEAT_CHAR) => char_ops::repeat_char(screen, params),

            ([], csi_codes::TBC_TAB_CLEAR) => terminal_ops::tab_clear(screen, params),

            ([], csi_codes::DA_DEVICE_ATTRIBUTES) => {
                dsr_ops::device_attributes_primary(screen, params);
            }
            ([b'>'], csi_codes::DA_DEVICE_ATTRIBUTES) => {
                dsr_ops::device_attributes_secondary(screen, params);
            }
            ([], csi_codes::DSR_DEVICE_STATUS) => {
                dsr_ops::status_report(screen, params, false);
            }
            ([b'?'], csi_codes::DSR_DEVICE_STATUS) => {
                dsr_ops::status_report(screen, params, true);
            }

            ([], csi_codes::SM_SET_MODE) => mode_ops::set_mode(screen, params, true),
            ([], csi_codes::RM_RESET_MODE) => mode_ops::set_mode(screen, params, false),
            ([b'?'], csi_codes::SM_SET_MODE) => {
                mode_ops::set_private_mode(screen, params, true);
            }
            ([b'?'], csi_codes::RM_RESET_MODE) => {
                mode_ops::set_private_mode(screen, params, false);
            }
            ([b'$'], csi_codes::DECRQM_REQUEST_MODE) => {
                mode_ops::request_mode(screen, params, false);
            }
            ([b'?', b'$'], csi_codes::DECRQM_REQUEST_MODE) => {
                mode_ops::request_mode(screen, params, true);
            }

            ([], csi_codes::SGR_SET_GRAPHICS) => sgr_ops::set_graphics(screen, params),

            ([b' '], csi_codes::DECSCUSR_CURSOR_STYLE) => {
                terminal_ops::set_cursor_style(screen, params);
            }
            ([b'"'], csi_codes::DECSCA_PROTECTION) => {
                terminal_ops::set_protection(screen, params);
            }
            ([b'!'], csi_codes::DECSTR_SOFT_RESET) => screen.reset_soft(),
            ([b'#'], csi_codes::XTPUSHCOLORS) => screen.profile.push_colors(),
            ([b'#'], csi_codes::XTPOPCOLORS) => screen.profile.pop_colors(),

            // Progressive-enhancement keyboard protocol.
            ([b'>'], 'u') => {
                let flags = params.iter().next().and_then(|g| g.first()).copied();
                screen.push_kbd_flags(flags.unwrap_or(0) as u8);
            }
            ([b'<'], 'u') => {
                let count = params.iter().next().and_then(|g| g.first()).copied();
                screen.pop_kbd_flags(usize::from(count.unwrap_or(1)));
            }
            ([b'?'], 'u') => {
                let flags = screen.kbd_flags();
                screen.reply(format!("\x1b[?{flags}u").into_bytes());
            }

            _ => {
                tracing::warn!(
                    "CSI {:?} {action}: unknown sequence ignored",
                    intermediates
                );
            }
        }
    }

    fn esc_dispatch(&mut self, intermediates: &[u8], ignore: bool, byte: u8) {
        if ignore {
            tracing::warn!("ESC {byte:#04x}: overlong sequence discarded");
            return;
        }
        terminal_ops::esc_dispatch(self.screen, intermediates, byte);
    }

    fn osc_dispatch(&mut self, params: &[&[u8]], bell_terminated: bool) {
        osc_ops::dispatch(self.screen, params, bell_terminated);
    }

    fn hook(&mut self, _params: &Params, _intermediates: &[u8], _ignore: bool, action: char) {
        // DCS payloads (sixel, DECRQSS, …) are recognized so the state
        // machine consumes them, but carry no behavior here.
        tracing::trace!("DCS {action}: device control strings not implemented");
    }

    fn put(&mut self, _byte: u8) {}

    fn unhook(&mut self) {}
}
