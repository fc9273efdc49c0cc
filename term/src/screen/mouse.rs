// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Mouse reporting.
//!
//! The embedder feeds decoded [`MouseEvent`]s; when a tracking mode is
//! active the screen encodes them for the child in whichever protocol the
//! application selected. Button encoding (shared by all protocols):
//!
//! ```text
//! bits 0-1  button index (3 = release / no button)
//! bit  2    shift          bit 3  alt (meta)        bit 4  control
//! bit  5    motion         bit 6  scroll wheel
//! bit  7    extra buttons 8-11
//! ```

use bitflags::bitflags;

use super::{MouseEncoding, MouseTrackingMode, Screen};
use crate::Pos;

bitflags! {
    /// Modifier keys held during an input event.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct KeyMods: u8 {
        const SHIFT = 1 << 0;
        const ALT   = 1 << 1;
        const CTRL  = 1 << 2;
        const SUPER = 1 << 3;
    }
}

/// Physical mouse button.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    WheelUp,
    WheelDown,
    WheelLeft,
    WheelRight,
    /// Buttons 8..=11.
    Extra(u8),
    /// Motion without a held button.
    None,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MouseAction {
    Press,
    Release,
    Motion,
}

/// One decoded mouse event in grid and pixel coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MouseEvent {
    pub button: MouseButton,
    pub mods: KeyMods,
    pub action: MouseAction,
    pub cell: Pos,
    pub pixel: (u32, u32),
}

impl Screen {
    /// Report a mouse event to the child if the active tracking mode wants
    /// it. Events the mode filters out are dropped silently so the embedder
    /// can feed everything unconditionally.
    pub fn mouse_event(&mut self, event: MouseEvent) {
        let wanted = match self.mouse_tracking {
            MouseTrackingMode::Off => false,
            MouseTrackingMode::X10 => event.action == MouseAction::Press,
            MouseTrackingMode::Normal => event.action != MouseAction::Motion,
            MouseTrackingMode::ButtonMotion => {
                event.action != MouseAction::Motion || event.button != MouseButton::None
            }
            MouseTrackingMode::AnyMotion => true,
        };
        if !wanted {
            return;
        }

        // X10 mode predates modifier reporting.
        let mods = if self.mouse_tracking == MouseTrackingMode::X10 {
            KeyMods::empty()
        } else {
            event.mods
        };

        let code = button_code(event.button, mods, event.action);
        let report = match self.mouse_encoding {
            MouseEncoding::Default => encode_x10(code, event.cell, event.action),
            MouseEncoding::Utf8 => encode_utf8(code, event.cell, event.action),
            MouseEncoding::Sgr => encode_sgr(code, event.cell, event.action),
            MouseEncoding::SgrPixel => {
                encode_sgr_pixel(code, event.pixel, event.action)
            }
            MouseEncoding::Urxvt => encode_urxvt(code, event.cell, event.action),
        };
        self.reply(report);
    }
}

fn button_code(button: MouseButton, mods: KeyMods, action: MouseAction) -> u8 {
    let mut code = match button {
        MouseButton::Left => 0,
        MouseButton::Middle => 1,
        MouseButton::Right => 2,
        MouseButton::None => 3,
        MouseButton::WheelUp => 64,
        MouseButton::WheelDown => 64 + 1,
        MouseButton::WheelLeft => 64 + 2,
        MouseButton::WheelRight => 64 + 3,
        MouseButton::Extra(n) => 128 + (n.saturating_sub(8) & 0b11),
    };
    if mods.contains(KeyMods::SHIFT) {
        code |= 1 << 2;
    }
    if mods.contains(KeyMods::ALT) {
        code |= 1 << 3;
    }
    if mods.contains(KeyMods::CTRL) {
        code |= 1 << 4;
    }
    if action == MouseAction::Motion {
        code |= 1 << 5;
    }
    code
}

/// Legacy encoding: `CSI M Cb Cx Cy`, all offset by 32, coordinates capped at
/// 223 (255 - 32).
fn encode_x10(mut code: u8, cell: Pos, action: MouseAction) -> Vec<u8> {
    if action == MouseAction::Release {
        code = (code & !0b11) | 3;
    }
    let cx = (cell.col_index.as_usize() + 1).min(223) as u8;
    let cy = (cell.row_index.as_usize() + 1).min(223) as u8;
    vec![0x1b, b'[', b'M', 32 + code, 32 + cx, 32 + cy]
}

/// Mode 1005: like X10 but coordinates are UTF-8 encoded, extending the
/// range to 2015.
fn encode_utf8(mut code: u8, cell: Pos, action: MouseAction) -> Vec<u8> {
    if action == MouseAction::Release {
        code = (code & !0b11) | 3;
    }
    let mut out = vec![0x1b, b'[', b'M', 32 + code];
    let mut scratch = [0_u8; 4];
    for value in [cell.col_index.as_usize() + 1, cell.row_index.as_usize() + 1] {
        let encoded = char::from_u32((32 + value.min(2015)) as u32)
            .unwrap_or(' ')
            .encode_utf8(&mut scratch);
        out.extend_from_slice(encoded.as_bytes());
    }
    out
}

/// Mode 1006: `CSI < code ; x ; y M` (press/motion) or `m` (release); the
/// button survives in release reports.
fn encode_sgr(code: u8, cell: Pos, action: MouseAction) -> Vec<u8> {
    let terminator = if action == MouseAction::Release { 'm' } else { 'M' };
    format!(
        "\x1b[<{};{};{}{}",
        code,
        cell.col_index.as_usize() + 1,
        cell.row_index.as_usize() + 1,
        terminator
    )
    .into_bytes()
}

/// Mode 1016: SGR framing, pixel coordinates.
fn encode_sgr_pixel(code: u8, pixel: (u32, u32), action: MouseAction) -> Vec<u8> {
    let terminator = if action == MouseAction::Release { 'm' } else { 'M' };
    format!("\x1b[<{};{};{}{}", code, pixel.0, pixel.1, terminator).into_bytes()
}

/// Mode 1015: `CSI code+32 ; x ; y M` in decimal.
fn encode_urxvt(mut code: u8, cell: Pos, action: MouseAction) -> Vec<u8> {
    if action == MouseAction::Release {
        code = (code & !0b11) | 3;
    }
    format!(
        "\x1b[{};{};{}M",
        u16::from(code) + 32,
        cell.col_index.as_usize() + 1,
        cell.row_index.as_usize() + 1
    )
    .into_bytes()
}
