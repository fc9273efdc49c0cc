// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Control Sequence Introducer (CSI) codes.
//!
//! CSI sequences follow the pattern `ESC [ params intermediates final`:
//! - optional private marker (`?`, `>`, `=`, `<`) reported in the
//!   intermediates,
//! - numeric parameters separated by `;` (subparameters by `:`),
//! - a final character in `0x40..=0x7E` selecting the operation.
//!
//! ## Examples
//! - `ESC[2J` — clear the whole screen
//! - `ESC[1;5H` — cursor to row 1, column 5
//! - `ESC[38:5:196m` — foreground to palette 196
//! - `ESC[?1049h` — enter the alternate screen

// Cursor movement.

/// CSI A: Cursor Up (CUU), n rows, default 1.
pub const CUU_CURSOR_UP: char = 'A';

/// CSI B: Cursor Down (CUD).
pub const CUD_CURSOR_DOWN: char = 'B';

/// CSI C: Cursor Forward (CUF).
pub const CUF_CURSOR_FORWARD: char = 'C';

/// CSI D: Cursor Backward (CUB).
pub const CUB_CURSOR_BACKWARD: char = 'D';

/// CSI E: Cursor Next Line (CNL) — down n rows, column 1.
pub const CNL_CURSOR_NEXT_LINE: char = 'E';

/// CSI F: Cursor Previous Line (CPL) — up n rows, column 1.
pub const CPL_CURSOR_PREV_LINE: char = 'F';

/// CSI G: Cursor Horizontal Absolute (CHA).
pub const CHA_CURSOR_COLUMN: char = 'G';

/// CSI H: Cursor Position (CUP), 1-based row;col.
pub const CUP_CURSOR_POSITION: char = 'H';

/// CSI f: Horizontal and Vertical Position (HVP); same as CUP.
pub const HVP_CURSOR_POSITION: char = 'f';

/// CSI `: Horizontal Position Absolute (HPA); same motion as CHA.
pub const HPA_HORIZONTAL_POSITION: char = '`';

/// CSI a: Horizontal Position Relative (HPR).
pub const HPR_HORIZONTAL_RELATIVE: char = 'a';

/// CSI d: Vertical Position Absolute (VPA).
pub const VPA_VERTICAL_POSITION: char = 'd';

/// CSI e: Vertical Position Relative (VPR).
pub const VPR_VERTICAL_RELATIVE: char = 'e';

/// CSI I: Cursor Horizontal Tab (CHT) — forward n tab stops.
pub const CHT_FORWARD_TABS: char = 'I';

/// CSI Z: Cursor Backward Tab (CBT).
pub const CBT_BACKWARD_TABS: char = 'Z';

/// CSI s: Save Cursor Position (SCOSC / ANSI.SYS flavor of DECSC).
pub const SCOSC_SAVE_CURSOR: char = 's';

/// CSI u: Restore Cursor Position (SCORC). With a private marker this final
/// is the progressive-enhancement keyboard protocol instead.
pub const SCORC_RESTORE_CURSOR: char = 'u';

// Erasing.

/// CSI J: Erase in Display (ED). 0 = cursor→end, 1 = start→cursor,
/// 2 = screen, 3 = screen + scrollback. `CSI ? J` is selective (DECSED).
pub const ED_ERASE_DISPLAY: char = 'J';

/// CSI K: Erase in Line (EL). 0 = cursor→end, 1 = start→cursor, 2 = line.
/// `CSI ? K` is selective (DECSEL).
pub const EL_ERASE_LINE: char = 'K';

// Scrolling and line edits.

/// CSI S: Scroll Up (SU).
pub const SU_SCROLL_UP: char = 'S';

/// CSI T: Scroll Down (SD).
pub const SD_SCROLL_DOWN: char = 'T';

/// CSI r: Set Top and Bottom Margins (DECSTBM).
pub const DECSTBM_SET_MARGINS: char = 'r';

/// CSI L: Insert Lines (IL).
pub const IL_INSERT_LINE: char = 'L';

/// CSI M: Delete Lines (DL).
pub const DL_DELETE_LINE: char = 'M';

// Character edits.

/// CSI @: Insert Characters (ICH) — blanks at the cursor, rest shifts right.
pub const ICH_INSERT_CHAR: char = '@';

/// CSI P: Delete Characters (DCH) — rest shifts left, blanks at the end.
pub const DCH_DELETE_CHAR: char = 'P';

/// CSI X: Erase Characters (ECH) — overwrite with blanks, no shifting.
pub const ECH_ERASE_CHAR: char = 'X';

/// CSI b: Repeat (REP) — repeat the preceding graphic character n times.
pub const REP_REPEAT_CHAR: char = 'b';

// Tabs.

/// CSI g: Tab Clear (TBC). 0 = at cursor, 3 = all.
pub const TBC_TAB_CLEAR: char = 'g';

// Reports and modes.

/// CSI c: Device Attributes (DA1; DA2 with the `>` marker).
pub const DA_DEVICE_ATTRIBUTES: char = 'c';

/// CSI n: Device Status Report (DSR). 5 = status, 6 = cursor position.
pub const DSR_DEVICE_STATUS: char = 'n';

/// CSI h: Set Mode (SM; DEC private with `?`).
pub const SM_SET_MODE: char = 'h';

/// CSI l: Reset Mode (RM; DEC private with `?`).
pub const RM_RESET_MODE: char = 'l';

/// CSI $p: Request Mode (DECRQM); reply is `CSI mode;value $y`.
pub const DECRQM_REQUEST_MODE: char = 'p';

/// CSI m: Select Graphic Rendition (SGR).
pub const SGR_SET_GRAPHICS: char = 'm';

/// CSI SP q: Set Cursor Style (DECSCUSR).
pub const DECSCUSR_CURSOR_STYLE: char = 'q';

/// CSI " q: Select Character Protection (DECSCA).
pub const DECSCA_PROTECTION: char = 'q';

/// CSI ! p: Soft Reset (DECSTR).
pub const DECSTR_SOFT_RESET: char = 'p';

/// CSI # P: Push palette + dynamic colors (XTPUSHCOLORS).
pub const XTPUSHCOLORS: char = 'P';

/// CSI # Q: Pop palette + dynamic colors (XTPOPCOLORS).
pub const XTPOPCOLORS: char = 'Q';

// SGR parameters (the ones with structural meaning here; simple attribute
// toggles are matched inline in `sgr_ops`).

/// Extended foreground color introducer (38;5;n / 38;2;r;g;b, `:` accepted).
pub const SGR_FG_EXTENDED: u16 = 38;

/// Extended background color introducer.
pub const SGR_BG_EXTENDED: u16 = 48;

/// Extended underline color introducer.
pub const SGR_DECO_EXTENDED: u16 = 58;

/// Reset underline color to default.
pub const SGR_DECO_DEFAULT: u16 = 59;

/// DEC private modes (`CSI ? n h/l`).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PrivateMode {
    /// ?1 DECCKM: application cursor keys.
    CursorKeys,
    /// ?3 DECCOLM: 132-column mode.
    Column132,
    /// ?5 DECSCNM: reverse video.
    ReverseVideo,
    /// ?6 DECOM: origin mode.
    OriginMode,
    /// ?7 DECAWM: autowrap.
    AutoWrap,
    /// ?9: X10 mouse reporting.
    MouseX10,
    /// ?12: cursor blink.
    CursorBlink,
    /// ?25 DECTCEM: cursor visible.
    ShowCursor,
    /// ?47: alternate screen (no save, no clear).
    AltScreen,
    /// ?1000: normal mouse tracking.
    MouseNormal,
    /// ?1002: button-event (drag) tracking.
    MouseButtonMotion,
    /// ?1003: any-event tracking.
    MouseAnyMotion,
    /// ?1004: focus in/out reporting.
    FocusTracking,
    /// ?1005: UTF-8 mouse coordinates.
    MouseUtf8,
    /// ?1006: SGR mouse encoding.
    MouseSgr,
    /// ?1015: urxvt mouse encoding.
    MouseUrxvt,
    /// ?1016: SGR-pixel mouse encoding.
    MouseSgrPixel,
    /// ?1047: alternate screen, cleared on exit.
    AltScreenClearOnExit,
    /// ?1048: save/restore cursor.
    SaveCursor,
    /// ?1049: save cursor + alternate screen + clear.
    AltScreenSaveCursor,
    /// ?2004: bracketed paste.
    BracketedPaste,
    /// Everything else.
    Other(u16),
}

impl From<u16> for PrivateMode {
    fn from(value: u16) -> Self {
        match value {
            1 => Self::CursorKeys,
            3 => Self::Column132,
            5 => Self::ReverseVideo,
            6 => Self::OriginMode,
            7 => Self::AutoWrap,
            9 => Self::MouseX10,
            12 => Self::CursorBlink,
            25 => Self::ShowCursor,
            47 => Self::AltScreen,
            1000 => Self::MouseNormal,
            1002 => Self::MouseButtonMotion,
            1003 => Self::MouseAnyMotion,
            1004 => Self::FocusTracking,
            1005 => Self::MouseUtf8,
            1006 => Self::MouseSgr,
            1015 => Self::MouseUrxvt,
            1016 => Self::MouseSgrPixel,
            1047 => Self::AltScreenClearOnExit,
            1048 => Self::SaveCursor,
            1049 => Self::AltScreenSaveCursor,
            2004 => Self::BracketedPaste,
            other => Self::Other(other),
        }
    }
}
