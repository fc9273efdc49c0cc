// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Serialize a line back into bytes: text plus the shortest SGR transitions
//! that reproduce its styling.
//!
//! Used by rewrap (via the pager history buffer) and by selection copy. The
//! output is plain UTF-8 with embedded `ESC [ … m` sequences; re-feeding it to
//! the parser reproduces the cell text and styles.

use super::LineRef;
use crate::{CellColor, CellStyle, DecorationStyle, MarkPool};

impl LineRef<'_> {
    /// Append this row's content to `buf` as text + SGR sequences. Trailing
    /// blank cells are trimmed; a populated row always ends with a full SGR
    /// reset so fragments can be concatenated safely.
    pub fn as_ansi(&self, buf: &mut Vec<u8>, pool: &MarkPool) {
        let Some(last) = self.last_occupied_col() else {
            return;
        };

        let mut pen = CellStyle::default();
        let mut emitted_sgr = false;
        let mut scratch = [0_u8; 4];

        for x in 0..=last.as_usize() {
            let style = &self.style[x];
            if style.attrs.width() == 0 {
                continue;
            }
            if !sgr_eq(&pen, style) {
                append_sgr_transition(buf, &pen, style);
                pen = *style;
                emitted_sgr = true;
            }
            let cell = &self.content[x];
            let ch = if cell.is_blank() { ' ' } else { cell.ch };
            buf.extend_from_slice(ch.encode_utf8(&mut scratch).as_bytes());
            for &mark in &cell.marks {
                if let Some(mark_char) = pool.get(mark) {
                    buf.extend_from_slice(
                        mark_char.encode_utf8(&mut scratch).as_bytes(),
                    );
                }
            }
        }

        if emitted_sgr {
            buf.extend_from_slice(b"\x1b[m");
        }
    }
}

/// Equality over the SGR-visible parts of a style: colors, decoration, and the
/// attribute flags SGR controls. Width/wrap/mark bits are layout, not style.
fn sgr_eq(a: &CellStyle, b: &CellStyle) -> bool {
    a.fg == b.fg
        && a.bg == b.bg
        && a.decoration_fg == b.decoration_fg
        && a.attrs.bold() == b.attrs.bold()
        && a.attrs.dim() == b.attrs.dim()
        && a.attrs.italic() == b.attrs.italic()
        && a.attrs.reverse() == b.attrs.reverse()
        && a.attrs.strike() == b.attrs.strike()
        && a.attrs.decoration() == b.attrs.decoration()
}

fn is_sgr_default(style: &CellStyle) -> bool { sgr_eq(style, &CellStyle::default()) }

/// Append the shortest `ESC [ … m` taking `prev` to `next`.
fn append_sgr_transition(buf: &mut Vec<u8>, prev: &CellStyle, next: &CellStyle) {
    if is_sgr_default(next) {
        buf.extend_from_slice(b"\x1b[m");
        return;
    }

    let mut params: Vec<String> = Vec::new();

    // Bold/dim share their reset parameter (22), so turning either off means
    // re-asserting the survivor.
    let bold_dim_changed =
        prev.attrs.bold() != next.attrs.bold() || prev.attrs.dim() != next.attrs.dim();
    if bold_dim_changed {
        let removed = (prev.attrs.bold() && !next.attrs.bold())
            || (prev.attrs.dim() && !next.attrs.dim());
        if removed {
            params.push("22".into());
        }
        if next.attrs.bold() && (removed || !prev.attrs.bold()) {
            params.push("1".into());
        }
        if next.attrs.dim() && (removed || !prev.attrs.dim()) {
            params.push("2".into());
        }
    }

    push_flag_delta(&mut params, prev.attrs.italic(), next.attrs.italic(), "3", "23");
    push_flag_delta(&mut params, prev.attrs.reverse(), next.attrs.reverse(), "7", "27");
    push_flag_delta(&mut params, prev.attrs.strike(), next.attrs.strike(), "9", "29");

    if prev.attrs.decoration() != next.attrs.decoration() {
        match next.attrs.decoration() {
            DecorationStyle::None => params.push("24".into()),
            style => params.push(format!("4:{}", style as u16)),
        }
    }

    if prev.fg != next.fg {
        params.push(fg_param(next.fg));
    }
    if prev.bg != next.bg {
        params.push(bg_param(next.bg));
    }
    if prev.decoration_fg != next.decoration_fg {
        params.push(deco_param(next.decoration_fg));
    }

    if params.is_empty() {
        return;
    }
    buf.extend_from_slice(b"\x1b[");
    buf.extend_from_slice(params.join(";").as_bytes());
    buf.push(b'm');
}

fn push_flag_delta(
    params: &mut Vec<String>,
    prev: bool,
    next: bool,
    on: &str,
    off: &str,
) {
    if prev != next {
        params.push(if next { on.into() } else { off.into() });
    }
}

fn fg_param(color: CellColor) -> String {
    match color {
        CellColor::Default => "39".into(),
        CellColor::Indexed(n @ 0..=7) => (30 + u16::from(n)).to_string(),
        CellColor::Indexed(n @ 8..=15) => (90 + u16::from(n) - 8).to_string(),
        CellColor::Indexed(n) => format!("38:5:{n}"),
        CellColor::Rgb(rgb) => format!("38:2:{}:{}:{}", rgb.red, rgb.green, rgb.blue),
    }
}

fn bg_param(color: CellColor) -> String {
    match color {
        CellColor::Default => "49".into(),
        CellColor::Indexed(n @ 0..=7) => (40 + u16::from(n)).to_string(),
        CellColor::Indexed(n @ 8..=15) => (100 + u16::from(n) - 8).to_string(),
        CellColor::Indexed(n) => format!("48:5:{n}"),
        CellColor::Rgb(rgb) => format!("48:2:{}:{}:{}", rgb.red, rgb.green, rgb.blue),
    }
}

fn deco_param(color: CellColor) -> String {
    match color {
        CellColor::Default => "59".into(),
        CellColor::Indexed(n) => format!("58:5:{n}"),
        CellColor::Rgb(rgb) => format!("58:2:{}:{}:{}", rgb.red, rgb.green, rgb.blue),
    }
}
