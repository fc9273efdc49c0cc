// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The screen mode bit set and mouse tracking state.
//!
//! Mode changes are idempotent: setting a set bit or clearing a clear bit is
//! a no-op by construction of the bit operations.

use bitflags::bitflags;

bitflags! {
    /// Modes toggled by SM/RM and their DEC private (`?`) variants.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct ScreenModes: u32 {
        /// Insert/replace mode (SM 4): printing shifts existing cells right.
        const IRM             = 1 << 0;
        /// Linefeed/newline mode (SM 20): LF implies CR.
        const LNM             = 1 << 1;
        /// Application cursor keys (?1).
        const DECCKM          = 1 << 2;
        /// 132-column mode (?3).
        const DECCOLM         = 1 << 3;
        /// Reverse video (?5).
        const DECSCNM         = 1 << 4;
        /// Origin mode (?6): cursor addressing is margin-relative.
        const DECOM           = 1 << 5;
        /// Autowrap (?7).
        const DECAWM          = 1 << 6;
        /// Cursor blink (?12).
        const CURSOR_BLINK    = 1 << 7;
        /// Cursor visible (?25).
        const DECTCEM         = 1 << 8;
        /// Application keypad (DECKPAM).
        const KEYPAD_APP      = 1 << 9;
        /// Focus in/out reporting (?1004).
        const FOCUS_TRACKING  = 1 << 10;
        /// Bracketed paste (?2004).
        const BRACKETED_PASTE = 1 << 11;
    }
}

impl Default for ScreenModes {
    fn default() -> Self {
        Self::DECAWM | Self::DECTCEM | Self::CURSOR_BLINK
    }
}

/// Which mouse events get reported (modes ?9/?1000/?1002/?1003).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum MouseTrackingMode {
    #[default]
    Off,
    /// ?9: press only, no modifiers.
    X10,
    /// ?1000: press and release.
    Normal,
    /// ?1002: press, release, drag motion.
    ButtonMotion,
    /// ?1003: all motion.
    AnyMotion,
}

/// How mouse reports are encoded on the wire (modes ?1005/?1006/?1015/?1016).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum MouseEncoding {
    /// Legacy X10 byte encoding (32 + value).
    #[default]
    Default,
    /// ?1005: coordinates as UTF-8.
    Utf8,
    /// ?1006: `CSI < b ; x ; y M/m`.
    Sgr,
    /// ?1015: `CSI b ; x ; y M`.
    Urxvt,
    /// ?1016: SGR framing with pixel coordinates.
    SgrPixel,
}
