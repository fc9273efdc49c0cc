// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! SM / RM and the DEC private mode family, plus DECRQM replies.
//!
//! One sequence can carry several modes (`CSI ?1000;1006h`); each is applied
//! in order. Mode changes are idempotent.

use vte::Params;

use crate::{MouseEncoding, MouseTrackingMode, ParamsExt, Screen, ScreenModes, col,
            row, vt_parser::protocols::csi_codes::PrivateMode};

/// ANSI modes: 4 (IRM) and 20 (LNM) are the ones with display semantics.
pub fn set_mode(screen: &mut Screen, params: &Params, enable: bool) {
    for group in params.iter() {
        let Some(&mode) = group.first() else { continue };
        match mode {
            4 => screen.modes.set(ScreenModes::IRM, enable),
            20 => screen.modes.set(ScreenModes::LNM, enable),
            other => {
                tracing::warn!(
                    "SM/RM {other}: unhandled ANSI mode ({})",
                    if enable { "set" } else { "reset" }
                );
            }
        }
    }
}

#[allow(clippy::too_many_lines)]
pub fn set_private_mode(screen: &mut Screen, params: &Params, enable: bool) {
    for group in params.iter() {
        let Some(&raw) = group.first() else { continue };
        match PrivateMode::from(raw) {
            PrivateMode::CursorKeys => {
                screen.modes.set(ScreenModes::DECCKM, enable);
            }
            PrivateMode::Column132 => {
                // The GUI owns the real window size; DECCOLM keeps its
                // side effects: clear, home, reset margins.
                screen.modes.set(ScreenModes::DECCOLM, enable);
                screen.erase_in_display(2, false);
                let last = screen.size().row_height.as_usize();
                screen.set_margins(1, last);
                screen.set_cursor_position(row(0), col(0));
            }
            PrivateMode::ReverseVideo => {
                screen.modes.set(ScreenModes::DECSCNM, enable);
                screen.dirty.mark_all();
            }
            PrivateMode::OriginMode => {
                screen.modes.set(ScreenModes::DECOM, enable);
                screen.set_cursor_position(row(0), col(0));
            }
            PrivateMode::AutoWrap => {
                screen.modes.set(ScreenModes::DECAWM, enable);
            }
            PrivateMode::CursorBlink => {
                screen.modes.set(ScreenModes::CURSOR_BLINK, enable);
            }
            PrivateMode::ShowCursor => {
                screen.modes.set(ScreenModes::DECTCEM, enable);
            }
            PrivateMode::FocusTracking => {
                screen.modes.set(ScreenModes::FOCUS_TRACKING, enable);
            }
            PrivateMode::BracketedPaste => {
                screen.modes.set(ScreenModes::BRACKETED_PASTE, enable);
            }

            PrivateMode::MouseX10 => {
                set_tracking(screen, MouseTrackingMode::X10, enable);
            }
            PrivateMode::MouseNormal => {
                set_tracking(screen, MouseTrackingMode::Normal, enable);
            }
            PrivateMode::MouseButtonMotion => {
                set_tracking(screen, MouseTrackingMode::ButtonMotion, enable);
            }
            PrivateMode::MouseAnyMotion => {
                set_tracking(screen, MouseTrackingMode::AnyMotion, enable);
            }
            PrivateMode::MouseUtf8 => {
                set_encoding(screen, MouseEncoding::Utf8, enable);
            }
            PrivateMode::MouseSgr => {
                set_encoding(screen, MouseEncoding::Sgr, enable);
            }
            PrivateMode::MouseUrxvt => {
                set_encoding(screen, MouseEncoding::Urxvt, enable);
            }
            PrivateMode::MouseSgrPixel => {
                set_encoding(screen, MouseEncoding::SgrPixel, enable);
            }

            PrivateMode::AltScreen => {
                if enable {
                    screen.enter_alt_screen(false, false);
                } else {
                    screen.exit_alt_screen(false);
                }
            }
            PrivateMode::AltScreenClearOnExit => {
                if enable {
                    screen.enter_alt_screen(false, false);
                } else {
                    screen.erase_in_display(2, false);
                    screen.exit_alt_screen(false);
                }
            }
            PrivateMode::SaveCursor => {
                if enable {
                    screen.save_cursor();
                } else {
                    screen.restore_cursor();
                }
            }
            PrivateMode::AltScreenSaveCursor => {
                if enable {
                    screen.enter_alt_screen(true, true);
                } else {
                    screen.exit_alt_screen(true);
                }
            }

            PrivateMode::Other(other) => {
                tracing::warn!(
                    "CSI ?{other}{}: unhandled private mode",
                    if enable { 'h' } else { 'l' }
                );
            }
        }
    }
}

fn set_tracking(screen: &mut Screen, mode: MouseTrackingMode, enable: bool) {
    if enable {
        screen.mouse_tracking = mode;
    } else if screen.mouse_tracking == mode {
        screen.mouse_tracking = MouseTrackingMode::Off;
    }
}

fn set_encoding(screen: &mut Screen, encoding: MouseEncoding, enable: bool) {
    if enable {
        screen.mouse_encoding = encoding;
    } else if screen.mouse_encoding == encoding {
        screen.mouse_encoding = MouseEncoding::Default;
    }
}

/// DECRQM: report a mode's state as `CSI [?] mode ; value $y` where value is
/// 1 (set), 2 (reset), or 0 (not recognized).
pub fn request_mode(screen: &mut Screen, params: &Params, private: bool) {
    let mode = params.extract_nth_or(0, 0);
    let value = if private {
        private_mode_state(screen, mode)
    } else {
        match mode {
            4 => flag_state(screen.modes.contains(ScreenModes::IRM)),
            20 => flag_state(screen.modes.contains(ScreenModes::LNM)),
            _ => 0,
        }
    };
    let marker = if private { "?" } else { "" };
    screen.reply(format!("\x1b[{marker}{mode};{value}$y").into_bytes());
}

fn flag_state(set: bool) -> u16 {
    if set { 1 } else { 2 }
}

fn private_mode_state(screen: &Screen, mode: u16) -> u16 {
    let modes = screen.modes;
    match PrivateMode::from(mode) {
        PrivateMode::CursorKeys => flag_state(modes.contains(ScreenModes::DECCKM)),
        PrivateMode::Column132 => flag_state(modes.contains(ScreenModes::DECCOLM)),
        PrivateMode::ReverseVideo => flag_state(modes.contains(ScreenModes::DECSCNM)),
        PrivateMode::OriginMode => flag_state(modes.contains(ScreenModes::DECOM)),
        PrivateMode::AutoWrap => flag_state(modes.contains(ScreenModes::DECAWM)),
        PrivateMode::CursorBlink => flag_state(modes.contains(ScreenModes::CURSOR_BLINK)),
        PrivateMode::ShowCursor => flag_state(modes.contains(ScreenModes::DECTCEM)),
        PrivateMode::FocusTracking => {
            flag_state(modes.contains(ScreenModes::FOCUS_TRACKING))
        }
        PrivateMode::BracketedPaste => {
            flag_state(modes.contains(ScreenModes::BRACKETED_PASTE))
        }
        PrivateMode::MouseX10 => {
            flag_state(screen.mouse_tracking == MouseTrackingMode::X10)
        }
        PrivateMode::MouseNormal => {
            flag_state(screen.mouse_tracking == MouseTrackingMode::Normal)
        }
        PrivateMode::MouseButtonMotion => {
            flag_state(screen.mouse_tracking == MouseTrackingMode::ButtonMotion)
        }
        PrivateMode::MouseAnyMotion => {
            flag_state(screen.mouse_tracking == MouseTrackingMode::AnyMotion)
        }
        PrivateMode::MouseUtf8 => {
            flag_state(screen.mouse_encoding == MouseEncoding::Utf8)
        }
        PrivateMode::MouseSgr => flag_state(screen.mouse_encoding == MouseEncoding::Sgr),
        PrivateMode::MouseUrxvt => {
            flag_state(screen.mouse_encoding == MouseEncoding::Urxvt)
        }
        PrivateMode::MouseSgrPixel => {
            flag_state(screen.mouse_encoding == MouseEncoding::SgrPixel)
        }
        PrivateMode::AltScreen
        | PrivateMode::AltScreenClearOnExit
        | PrivateMode::AltScreenSaveCursor => flag_state(screen.is_alt_screen_active()),
        PrivateMode::SaveCursor | PrivateMode::Other(_) => 0,
    }
}
