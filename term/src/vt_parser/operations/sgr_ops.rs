// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! SGR (Select Graphic Rendition): the pen the next characters are stamped
//! with.
//!
//! Parameters apply left to right. Extended color selectors (38/48/58)
//! accept both separator conventions and treat them identically:
//!
//! ```text
//! ESC[38;5;196m      semicolon form: three separate parameter groups
//! ESC[38:5:196m      colon form: one group with subparameters
//! ESC[38:2::255:0:0m colon form with the optional colorspace id slot
//! ```
//!
//! Bold and dim are independent bits; their shared reset (22) clears both,
//! and nothing else touches the other's state.

use vte::Params;

use crate::{CellColor, DecorationStyle, Rgb, Screen,
            vt_parser::protocols::csi_codes};

pub fn set_graphics(screen: &mut Screen, params: &Params) {
    let groups: Vec<&[u16]> = params.iter().collect();
    if groups.is_empty() {
        screen.cursor.reset_pen();
        return;
    }

    let mut i = 0;
    while i < groups.len() {
        let group = groups[i];
        let code = group.first().copied().unwrap_or(0);
        let pen = &mut screen.cursor.pen;
        match code {
            0 => screen.cursor.reset_pen(),
            1 => pen.attrs.set_bold(true),
            2 => pen.attrs.set_dim(true),
            3 => pen.attrs.set_italic(true),
            4 => {
                let style = match group.get(1) {
                    None | Some(1) => DecorationStyle::Straight,
                    Some(0) => DecorationStyle::None,
                    Some(2) => DecorationStyle::Double,
                    Some(3) => DecorationStyle::Curly,
                    Some(4) => DecorationStyle::Dotted,
                    Some(5) => DecorationStyle::Dashed,
                    Some(_) => DecorationStyle::Straight,
                };
                pen.attrs.set_decoration(style);
            }
            7 => pen.attrs.set_reverse(true),
            9 => pen.attrs.set_strike(true),
            21 => pen.attrs.set_decoration(DecorationStyle::Double),
            22 => {
                pen.attrs.set_bold(false);
                pen.attrs.set_dim(false);
            }
            23 => pen.attrs.set_italic(false),
            24 => pen.attrs.set_decoration(DecorationStyle::None),
            27 => pen.attrs.set_reverse(false),
            29 => pen.attrs.set_strike(false),
            30..=37 => pen.fg = CellColor::Indexed((code - 30) as u8),
            csi_codes::SGR_FG_EXTENDED => {
                if let Some(color) = parse_extended_color(&groups, &mut i) {
                    screen.cursor.pen.fg = color;
                }
            }
            39 => pen.fg = CellColor::Default,
            40..=47 => pen.bg = CellColor::Indexed((code - 40) as u8),
            csi_codes::SGR_BG_EXTENDED => {
                if let Some(color) = parse_extended_color(&groups, &mut i) {
                    screen.cursor.pen.bg = color;
                }
            }
            49 => pen.bg = CellColor::Default,
            csi_codes::SGR_DECO_EXTENDED => {
                if let Some(color) = parse_extended_color(&groups, &mut i) {
                    screen.cursor.pen.decoration_fg = color;
                }
            }
            csi_codes::SGR_DECO_DEFAULT => pen.decoration_fg = CellColor::Default,
            90..=97 => pen.fg = CellColor::Indexed((code - 90 + 8) as u8),
            100..=107 => pen.bg = CellColor::Indexed((code - 100 + 8) as u8),
            // Blink (5/6/25) and conceal (8/28) have no cell representation.
            5 | 6 | 8 | 25 | 28 => {
                tracing::trace!("SGR {code}: attribute not representable, ignored");
            }
            other => tracing::trace!("SGR {other}: unsupported parameter ignored"),
        }
        i += 1;
    }
}

/// Decode the color selector starting at group `i` (which holds 38/48/58).
/// Advances `i` past consumed groups in the semicolon form; the colon form
/// is self-contained in one group.
fn parse_extended_color(groups: &[&[u16]], i: &mut usize) -> Option<CellColor> {
    let group = groups[*i];
    if group.len() > 1 {
        // Colon form: subparameters in this group.
        return match group[1] {
            5 => group.get(2).map(|&n| CellColor::Indexed(clamp_u8(n))),
            2 => {
                // With 6+ entries the third slot is the colorspace id; the
                // components are always the last three.
                let components = if group.len() >= 6 {
                    &group[group.len() - 3..]
                } else {
                    group.get(2..5)?
                };
                Some(CellColor::Rgb(Rgb::new(
                    clamp_u8(components[0]),
                    clamp_u8(components[1]),
                    clamp_u8(components[2]),
                )))
            }
            _ => None,
        };
    }

    // Semicolon form: the selector and components arrived as separate groups.
    match groups.get(*i + 1).and_then(|g| g.first()).copied()? {
        5 => {
            let index = groups.get(*i + 2).and_then(|g| g.first()).copied()?;
            *i += 2;
            Some(CellColor::Indexed(clamp_u8(index)))
        }
        2 => {
            let red = groups.get(*i + 2).and_then(|g| g.first()).copied()?;
            let green = groups.get(*i + 3).and_then(|g| g.first()).copied()?;
            let blue = groups.get(*i + 4).and_then(|g| g.first()).copied()?;
            *i += 4;
            Some(CellColor::Rgb(Rgb::new(
                clamp_u8(red),
                clamp_u8(green),
                clamp_u8(blue),
            )))
        }
        _ => None,
    }
}

fn clamp_u8(value: u16) -> u8 { value.min(255) as u8 }

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use crate::{CellColor, DecorationStyle, Rgb, Screen, TermConfig, height, width};

    fn pen_after(bytes: &[u8]) -> crate::CellStyle {
        let mut screen = Screen::new(height(3) + width(10), TermConfig::default());
        screen.apply_ansi_bytes(bytes);
        screen.cursor.pen
    }

    #[test]
    fn test_basic_attributes() {
        let pen = pen_after(b"\x1b[1;3;7;9m");
        assert!(pen.attrs.bold());
        assert!(pen.attrs.italic());
        assert!(pen.attrs.reverse());
        assert!(pen.attrs.strike());
    }

    #[test]
    fn test_reset_clears_everything() {
        let pen = pen_after(b"\x1b[1;31;44m\x1b[0m");
        assert_eq!(pen, crate::CellStyle::default());
    }

    #[test]
    fn test_basic_and_bright_colors() {
        let pen = pen_after(b"\x1b[31;104m");
        assert_eq!(pen.fg, CellColor::Indexed(1));
        assert_eq!(pen.bg, CellColor::Indexed(12));
    }

    // The two separator conventions must behave identically.
    #[test_case(b"\x1b[38;5;196m" ; "semicolon indexed")]
    #[test_case(b"\x1b[38:5:196m" ; "colon indexed")]
    fn test_extended_indexed_forms(bytes: &[u8]) {
        assert_eq!(pen_after(bytes).fg, CellColor::Indexed(196));
    }

    #[test_case(b"\x1b[48;2;10;20;30m" ; "semicolon rgb")]
    #[test_case(b"\x1b[48:2:10:20:30m" ; "colon rgb")]
    #[test_case(b"\x1b[48:2::10:20:30m" ; "colon rgb with colorspace")]
    fn test_extended_rgb_forms(bytes: &[u8]) {
        assert_eq!(pen_after(bytes).bg, CellColor::Rgb(Rgb::new(10, 20, 30)));
    }

    #[test]
    fn test_semicolon_form_consumes_components() {
        // The trailing 1 must still be read as bold.
        let pen = pen_after(b"\x1b[38;5;100;1m");
        assert_eq!(pen.fg, CellColor::Indexed(100));
        assert!(pen.attrs.bold());
    }

    #[test]
    fn test_bold_dim_interplay() {
        let pen = pen_after(b"\x1b[1;2m");
        assert!(pen.attrs.bold());
        assert!(pen.attrs.dim());
        let pen = pen_after(b"\x1b[1;2;22m");
        assert!(!pen.attrs.bold());
        assert!(!pen.attrs.dim());
    }

    #[test]
    fn test_underline_styles_and_color() {
        let pen = pen_after(b"\x1b[4:3m\x1b[58:5:9m");
        assert_eq!(pen.attrs.decoration(), DecorationStyle::Curly);
        assert_eq!(pen.decoration_fg, CellColor::Indexed(9));
        let pen = pen_after(b"\x1b[4:3m\x1b[24m");
        assert_eq!(pen.attrs.decoration(), DecorationStyle::None);
    }

    #[test]
    fn test_defaults_revert() {
        let pen = pen_after(b"\x1b[31;41m\x1b[39;49m");
        assert_eq!(pen.fg, CellColor::Default);
        assert_eq!(pen.bg, CellColor::Default);
    }
}
