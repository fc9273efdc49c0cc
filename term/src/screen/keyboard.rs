// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Keyboard output encoding.
//!
//! Translates logical key events into the byte sequences the child expects,
//! honoring cursor-key mode (DECCKM), keypad mode, and the
//! progressive-enhancement keyboard protocol (a flag stack pushed/popped via
//! `CSI > flags u` / `CSI < u`; flags queried with `CSI ? u`).
//!
//! Legacy encoding rules:
//! - Ctrl+letter folds into the C0 range; Alt prefixes ESC.
//! - Cursor keys: `CSI A`..`CSI D`, or `SS3 A`.. in application mode;
//!   modifiers re-route through `CSI 1;m X`.
//! - Editing/function keys use the tilde forms (`CSI 3~` delete, `CSI 15~`
//!   F5, …) with modifiers as `CSI n;m~`.
//!
//! With [`kbd_flags::REPORT_ALL_AS_CSI_U`] active, every key becomes
//! `CSI unicode;modifiers u` (the "CSI u" scheme), disambiguating sequences
//! legacy encoding collapses.

use super::{KeyMods, Screen, ScreenModes};

/// Progressive-enhancement flag bits.
pub mod kbd_flags {
    pub const DISAMBIGUATE_ESCAPES: u8 = 1;
    pub const REPORT_EVENT_TYPES: u8 = 2;
    pub const REPORT_ALTERNATE_KEYS: u8 = 4;
    pub const REPORT_ALL_AS_CSI_U: u8 = 8;
    pub const REPORT_TEXT: u8 = 16;
}

/// Maximum depth of the keyboard flag stack; pushes past this evict the
/// oldest entry, like the other bounded stacks.
const MAX_KBD_STACK: usize = 32;

/// Logical key identity.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    /// Enter on the numeric keypad; distinct only in application keypad
    /// mode (DECKPAM).
    KeypadEnter,
    Escape,
    Backspace,
    Tab,
    Up,
    Down,
    Right,
    Left,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    Delete,
    F(u8),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Press,
    Repeat,
    Release,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub mods: KeyMods,
    pub action: KeyAction,
}

impl Screen {
    /// Encode a key event and queue it for the child. Release events are
    /// only reported when the application opted into event types.
    pub fn key_event(&mut self, event: KeyEvent) {
        let flags = self.kbd_flags();
        if event.action == KeyAction::Release
            && flags & kbd_flags::REPORT_EVENT_TYPES == 0
        {
            return;
        }

        let bytes = if flags & kbd_flags::REPORT_ALL_AS_CSI_U != 0 {
            encode_csi_u(event, flags)
        } else {
            self.encode_legacy(event)
        };
        if !bytes.is_empty() {
            self.reply(bytes);
        }
    }

    /// Active progressive-enhancement flags (top of stack; 0 when empty).
    #[must_use]
    pub fn kbd_flags(&self) -> u8 {
        self.kbd_flag_stack.last().copied().unwrap_or(0)
    }

    /// `CSI > flags u`.
    pub(crate) fn push_kbd_flags(&mut self, flags: u8) {
        if self.kbd_flag_stack.len() == MAX_KBD_STACK {
            self.kbd_flag_stack.remove(0);
        }
        self.kbd_flag_stack.push(flags);
    }

    /// `CSI < count u`.
    pub(crate) fn pop_kbd_flags(&mut self, count: usize) {
        for _ in 0..count.max(1) {
            if self.kbd_flag_stack.pop().is_none() {
                break;
            }
        }
    }

    fn encode_legacy(&self, event: KeyEvent) -> Vec<u8> {
        let mods = encode_mods(event.mods);
        let app_cursor = self.modes.contains(ScreenModes::DECCKM);

        match event.key {
            Key::Char(ch) => encode_char(ch, event.mods),
            Key::Enter => b"\r".to_vec(),
            Key::KeypadEnter => {
                if self.modes.contains(ScreenModes::KEYPAD_APP) {
                    b"\x1bOM".to_vec()
                } else {
                    b"\r".to_vec()
                }
            }
            Key::Tab => {
                if event.mods.contains(KeyMods::SHIFT) {
                    b"\x1b[Z".to_vec()
                } else {
                    b"\t".to_vec()
                }
            }
            Key::Backspace => {
                if event.mods.contains(KeyMods::ALT) {
                    b"\x1b\x7f".to_vec()
                } else {
                    b"\x7f".to_vec()
                }
            }
            Key::Escape => b"\x1b".to_vec(),
            Key::Up => cursor_key(b'A', mods, app_cursor),
            Key::Down => cursor_key(b'B', mods, app_cursor),
            Key::Right => cursor_key(b'C', mods, app_cursor),
            Key::Left => cursor_key(b'D', mods, app_cursor),
            Key::Home => cursor_key(b'H', mods, app_cursor),
            Key::End => cursor_key(b'F', mods, app_cursor),
            Key::Insert => tilde_key(2, mods),
            Key::Delete => tilde_key(3, mods),
            Key::PageUp => tilde_key(5, mods),
            Key::PageDown => tilde_key(6, mods),
            Key::F(n @ 1..=4) => {
                // F1..F4 are SS3 P..S unmodified, CSI 1;m P..S with mods.
                let final_byte = b'P' + (n - 1);
                match mods {
                    None => vec![0x1b, b'O', final_byte],
                    Some(m) => format!("\x1b[1;{m}{}", final_byte as char).into_bytes(),
                }
            }
            Key::F(n @ 5..=12) => {
                let number = [15, 17, 18, 19, 20, 21, 23, 24][usize::from(n - 5)];
                tilde_key(number, mods)
            }
            Key::F(_) => Vec::new(),
        }
    }
}

/// xterm modifier parameter: 1 + bitmask.
fn encode_mods(mods: KeyMods) -> Option<u8> {
    if mods.is_empty() {
        return None;
    }
    let mut value = 1;
    if mods.contains(KeyMods::SHIFT) {
        value += 1;
    }
    if mods.contains(KeyMods::ALT) {
        value += 2;
    }
    if mods.contains(KeyMods::CTRL) {
        value += 4;
    }
    if mods.contains(KeyMods::SUPER) {
        value += 8;
    }
    Some(value)
}

fn encode_char(ch: char, mods: KeyMods) -> Vec<u8> {
    let mut out = Vec::new();
    if mods.contains(KeyMods::ALT) {
        out.push(0x1b);
    }
    if mods.contains(KeyMods::CTRL) && ch.is_ascii_alphabetic() {
        out.push((ch.to_ascii_uppercase() as u8) & 0x1f);
        return out;
    }
    if mods.contains(KeyMods::CTRL) {
        // The classic control-key folds that are not letters.
        let folded = match ch {
            ' ' | '@' => Some(0x00),
            '[' => Some(0x1b),
            '\\' => Some(0x1c),
            ']' => Some(0x1d),
            '^' => Some(0x1e),
            '_' | '/' => Some(0x1f),
            _ => None,
        };
        if let Some(byte) = folded {
            out.push(byte);
            return out;
        }
    }
    let mut scratch = [0_u8; 4];
    out.extend_from_slice(ch.encode_utf8(&mut scratch).as_bytes());
    out
}

fn cursor_key(final_byte: u8, mods: Option<u8>, app_mode: bool) -> Vec<u8> {
    match mods {
        Some(m) => format!("\x1b[1;{m}{}", final_byte as char).into_bytes(),
        None if app_mode => vec![0x1b, b'O', final_byte],
        None => vec![0x1b, b'[', final_byte],
    }
}

fn tilde_key(number: u8, mods: Option<u8>) -> Vec<u8> {
    match mods {
        Some(m) => format!("\x1b[{number};{m}~").into_bytes(),
        None => format!("\x1b[{number}~").into_bytes(),
    }
}

/// The CSI u scheme: `CSI unicode ; modifiers [:event] u`.
fn encode_csi_u(event: KeyEvent, flags: u8) -> Vec<u8> {
    let codepoint = match event.key {
        Key::Char(ch) => ch as u32,
        Key::Enter | Key::KeypadEnter => 13,
        Key::Escape => 27,
        Key::Backspace => 127,
        Key::Tab => 9,
        // Functional keys keep their legacy CSI forms even in CSI u mode;
        // re-encode through the legacy path with mods forced on.
        Key::Up => return format!("\x1b[1;{}A", csi_u_mods(event, flags)).into_bytes(),
        Key::Down => return format!("\x1b[1;{}B", csi_u_mods(event, flags)).into_bytes(),
        Key::Right => return format!("\x1b[1;{}C", csi_u_mods(event, flags)).into_bytes(),
        Key::Left => return format!("\x1b[1;{}D", csi_u_mods(event, flags)).into_bytes(),
        Key::Home => return format!("\x1b[1;{}H", csi_u_mods(event, flags)).into_bytes(),
        Key::End => return format!("\x1b[1;{}F", csi_u_mods(event, flags)).into_bytes(),
        Key::Insert => return format!("\x1b[2;{}~", csi_u_mods(event, flags)).into_bytes(),
        Key::Delete => return format!("\x1b[3;{}~", csi_u_mods(event, flags)).into_bytes(),
        Key::PageUp => return format!("\x1b[5;{}~", csi_u_mods(event, flags)).into_bytes(),
        Key::PageDown => {
            return format!("\x1b[6;{}~", csi_u_mods(event, flags)).into_bytes();
        }
        Key::F(n @ 1..=4) => {
            return format!("\x1b[{};{}~", 10 + n, csi_u_mods(event, flags)).into_bytes();
        }
        Key::F(n @ 5..=12) => {
            let number = [15, 17, 18, 19, 20, 21, 23, 24][usize::from(n - 5)];
            return format!("\x1b[{number};{}~", csi_u_mods(event, flags)).into_bytes();
        }
        Key::F(_) => return Vec::new(),
    };
    format!("\x1b[{codepoint};{}u", csi_u_mods(event, flags)).into_bytes()
}

fn csi_u_mods(event: KeyEvent, flags: u8) -> String {
    let base = encode_mods(event.mods).unwrap_or(1);
    if flags & kbd_flags::REPORT_EVENT_TYPES != 0 {
        let event_code = match event.action {
            KeyAction::Press => 1,
            KeyAction::Repeat => 2,
            KeyAction::Release => 3,
        };
        if event_code != 1 {
            return format!("{base}:{event_code}");
        }
    }
    base.to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{Key, KeyAction, KeyEvent, kbd_flags};
    use crate::{KeyMods, Screen, ScreenModes, TermConfig, TermEvent, height, width};

    fn screen() -> Screen { Screen::new(height(24) + width(80), TermConfig::default()) }

    fn press(key: Key, mods: KeyMods) -> KeyEvent {
        KeyEvent {
            key,
            mods,
            action: KeyAction::Press,
        }
    }

    fn encoded(screen: &mut Screen, event: KeyEvent) -> Vec<u8> {
        screen.key_event(event);
        match screen.drain_events().pop() {
            Some(TermEvent::WriteToChild(bytes)) => bytes,
            _ => Vec::new(),
        }
    }

    #[test]
    fn test_plain_char() {
        let mut screen = screen();
        assert_eq!(encoded(&mut screen, press(Key::Char('a'), KeyMods::empty())), b"a");
    }

    #[test]
    fn test_ctrl_letter_folds_to_c0() {
        let mut screen = screen();
        assert_eq!(
            encoded(&mut screen, press(Key::Char('c'), KeyMods::CTRL)),
            vec![0x03]
        );
    }

    #[test]
    fn test_alt_prefixes_escape() {
        let mut screen = screen();
        assert_eq!(
            encoded(&mut screen, press(Key::Char('x'), KeyMods::ALT)),
            b"\x1bx"
        );
    }

    #[test]
    fn test_cursor_keys_follow_decckm() {
        let mut screen = screen();
        assert_eq!(
            encoded(&mut screen, press(Key::Up, KeyMods::empty())),
            b"\x1b[A"
        );
        screen.modes.insert(ScreenModes::DECCKM);
        assert_eq!(
            encoded(&mut screen, press(Key::Up, KeyMods::empty())),
            b"\x1bOA"
        );
    }

    #[test]
    fn test_modified_cursor_key() {
        let mut screen = screen();
        // Ctrl = modifier parameter 5.
        assert_eq!(
            encoded(&mut screen, press(Key::Right, KeyMods::CTRL)),
            b"\x1b[1;5C"
        );
    }

    #[test]
    fn test_function_and_editing_keys() {
        let mut screen = screen();
        assert_eq!(encoded(&mut screen, press(Key::F(1), KeyMods::empty())), b"\x1bOP");
        assert_eq!(
            encoded(&mut screen, press(Key::F(5), KeyMods::empty())),
            b"\x1b[15~"
        );
        assert_eq!(
            encoded(&mut screen, press(Key::Delete, KeyMods::SHIFT)),
            b"\x1b[3;2~"
        );
    }

    #[test]
    fn test_keypad_enter_follows_deckpam() {
        let mut screen = screen();
        assert_eq!(
            encoded(&mut screen, press(Key::KeypadEnter, KeyMods::empty())),
            b"\r"
        );
        screen.apply_ansi_bytes(b"\x1b=");
        assert_eq!(
            encoded(&mut screen, press(Key::KeypadEnter, KeyMods::empty())),
            b"\x1bOM"
        );
        screen.apply_ansi_bytes(b"\x1b>");
        assert_eq!(
            encoded(&mut screen, press(Key::KeypadEnter, KeyMods::empty())),
            b"\r"
        );
    }

    #[test]
    fn test_release_ignored_without_event_types() {
        let mut screen = screen();
        let release = KeyEvent {
            key: Key::Char('a'),
            mods: KeyMods::empty(),
            action: KeyAction::Release,
        };
        screen.key_event(release);
        assert!(screen.drain_events().is_empty());
    }

    #[test]
    fn test_csi_u_mode_encodes_unicode_and_event_types() {
        let mut screen = screen();
        screen.push_kbd_flags(
            kbd_flags::REPORT_ALL_AS_CSI_U | kbd_flags::REPORT_EVENT_TYPES,
        );
        assert_eq!(
            encoded(&mut screen, press(Key::Char('a'), KeyMods::empty())),
            b"\x1b[97;1u"
        );
        let release = KeyEvent {
            key: Key::Char('a'),
            mods: KeyMods::empty(),
            action: KeyAction::Release,
        };
        assert_eq!(encoded(&mut screen, release), b"\x1b[97;1:3u");
    }

    #[test]
    fn test_flag_stack_push_pop() {
        let mut screen = screen();
        assert_eq!(screen.kbd_flags(), 0);
        screen.push_kbd_flags(1);
        screen.push_kbd_flags(9);
        assert_eq!(screen.kbd_flags(), 9);
        screen.pop_kbd_flags(1);
        assert_eq!(screen.kbd_flags(), 1);
        screen.pop_kbd_flags(5);
        assert_eq!(screen.kbd_flags(), 0);
    }
}
