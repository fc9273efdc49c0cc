// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Operating System Command (OSC) codes.
//!
//! `ESC ] code ; payload ST` (BEL also terminates). Payloads are free-form
//! text split on `;` by the tokenizer.

/// Set window title and icon name.
pub const TITLE_AND_ICON: u16 = 0;
/// Set icon name.
pub const ICON: u16 = 1;
/// Set window title.
pub const TITLE: u16 = 2;
/// Set/query palette entries: pairs of `index;spec`.
pub const PALETTE: u16 = 4;
/// Hyperlink: `8;params;url`, empty url closes the scope.
pub const HYPERLINK: u16 = 8;
/// Dynamic colors: 10 fg, 11 bg, 12 cursor, 17 highlight bg,
/// 19 highlight fg; successive payloads advance the code.
pub const DYNAMIC_FIRST: u16 = 10;
pub const DYNAMIC_LAST: u16 = 19;
/// Clipboard access: `52;selector;base64`.
pub const CLIPBOARD: u16 = 52;
/// Reset palette entries (all when no payload).
pub const RESET_PALETTE: u16 = 104;
/// Reset dynamic colors 110..=119 (code - 100).
pub const RESET_DYNAMIC_FIRST: u16 = 110;
pub const RESET_DYNAMIC_LAST: u16 = 119;
/// Shell integration prompt marks (`133;A` prompt, `133;C` output).
pub const PROMPT_MARK: u16 = 133;
