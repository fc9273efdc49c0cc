// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! C0 control bytes and direct ESC sequences.
//!
//! Direct ESC sequences predate CSI: single-byte commands, no parameters.
//! Several overlap with CSI equivalents (ESC 7/8 vs CSI s/u, ESC D/M vs
//! CSI S/T) and both spellings stay supported.

// C0 control bytes handled by `execute()`.

pub const BELL: u8 = 0x07;
pub const BACKSPACE: u8 = 0x08;
pub const TAB: u8 = 0x09;
pub const LINE_FEED: u8 = 0x0A;
pub const VERTICAL_TAB: u8 = 0x0B;
pub const FORM_FEED: u8 = 0x0C;
pub const CARRIAGE_RETURN: u8 = 0x0D;
/// SO: lock shift to G1.
pub const SHIFT_OUT: u8 = 0x0E;
/// SI: lock shift to G0.
pub const SHIFT_IN: u8 = 0x0F;

// ESC finals.

/// ESC 7 (DECSC): save cursor and rendition state.
pub const DECSC_SAVE_CURSOR: u8 = b'7';

/// ESC 8 (DECRC): restore the DECSC snapshot.
pub const DECRC_RESTORE_CURSOR: u8 = b'8';

/// ESC D (IND): index — down one row, scroll at the bottom margin.
pub const IND_INDEX: u8 = b'D';

/// ESC E (NEL): next line — IND plus carriage return.
pub const NEL_NEXT_LINE: u8 = b'E';

/// ESC H (HTS): set a tab stop at the cursor column.
pub const HTS_SET_TAB: u8 = b'H';

/// ESC M (RI): reverse index — up one row, scroll at the top margin.
pub const RI_REVERSE_INDEX: u8 = b'M';

/// ESC N (SS2): single shift G2 for the next character.
pub const SS2_SINGLE_SHIFT_2: u8 = b'N';

/// ESC O (SS3): single shift G3 for the next character.
pub const SS3_SINGLE_SHIFT_3: u8 = b'O';

/// ESC c (RIS): hard reset.
pub const RIS_RESET: u8 = b'c';

/// ESC = (DECKPAM): application keypad.
pub const DECKPAM_KEYPAD_APP: u8 = b'=';

/// ESC > (DECKPNM): numeric keypad.
pub const DECKPNM_KEYPAD_NUMERIC: u8 = b'>';

/// ESC # 8 (DECALN): screen alignment pattern.
pub const DECALN_FILL: u8 = b'8';

/// Intermediate for DEC tests (`ESC # …`).
pub const HASH_INTERMEDIATE: u8 = b'#';

/// Charset designation intermediates: `ESC ( F` G0, `ESC ) F` G1,
/// `ESC * F` G2, `ESC + F` G3.
pub const CHARSET_G0: u8 = b'(';
pub const CHARSET_G1: u8 = b')';
pub const CHARSET_G2: u8 = b'*';
pub const CHARSET_G3: u8 = b'+';
