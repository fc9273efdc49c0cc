// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Operating System Command handlers: titles, colors, hyperlinks, clipboard,
//! prompt marks.
//!
//! Payload fields arrive pre-split on `;`. Anything malformed inside a
//! payload (bad color spec, non-numeric index) is logged and skipped without
//! abandoning the rest of the sequence.

use crate::{ClipboardSelector, DynamicColor, PromptKind, Rgb, Screen, TermEvent,
            parse_color_spec, vt_parser::protocols::osc_codes};

pub fn dispatch(screen: &mut Screen, params: &[&[u8]], bell_terminated: bool) {
    let Some(code) = params
        .first()
        .and_then(|raw| std::str::from_utf8(raw).ok())
        .and_then(|text| text.parse::<u16>().ok())
    else {
        return;
    };

    match code {
        osc_codes::TITLE_AND_ICON => {
            if let Some(text) = text_field(params, 1) {
                screen.push_event(TermEvent::SetTitle(text.clone()));
                screen.push_event(TermEvent::SetIconName(text));
            }
        }
        osc_codes::ICON => {
            if let Some(text) = text_field(params, 1) {
                screen.push_event(TermEvent::SetIconName(text));
            }
        }
        osc_codes::TITLE => {
            if let Some(text) = text_field(params, 1) {
                screen.push_event(TermEvent::SetTitle(text));
            }
        }
        osc_codes::PALETTE => set_palette(screen, params, bell_terminated),
        osc_codes::RESET_PALETTE => reset_palette(screen, params),
        osc_codes::HYPERLINK => hyperlink(screen, params),
        osc_codes::DYNAMIC_FIRST..=osc_codes::DYNAMIC_LAST => {
            dynamic_colors(screen, code, params, bell_terminated);
        }
        osc_codes::RESET_DYNAMIC_FIRST..=osc_codes::RESET_DYNAMIC_LAST => {
            reset_dynamic_color(screen, code - 100);
        }
        osc_codes::CLIPBOARD => clipboard(screen, params),
        osc_codes::PROMPT_MARK => prompt_mark(screen, params),
        other => tracing::trace!("OSC {other}: unhandled command"),
    }
}

fn text_field(params: &[&[u8]], index: usize) -> Option<String> {
    params
        .get(index)
        .map(|raw| String::from_utf8_lossy(raw).into_owned())
}

fn terminator(bell_terminated: bool) -> &'static str {
    if bell_terminated { "\x07" } else { "\x1b\\" }
}

/// OSC 4: `index;spec` pairs. Spec `?` queries the current value back.
fn set_palette(screen: &mut Screen, params: &[&[u8]], bell_terminated: bool) {
    let mut fields = params[1..].iter();
    while let (Some(index_raw), Some(spec_raw)) = (fields.next(), fields.next()) {
        let Ok(index) = String::from_utf8_lossy(index_raw).parse::<u8>() else {
            tracing::warn!("OSC 4: bad palette index, pair skipped");
            continue;
        };
        let spec = String::from_utf8_lossy(spec_raw);
        if spec.as_ref() == "?" {
            let value = screen.profile.palette_color(index);
            let reply = format!(
                "\x1b]4;{index};rgb:{:02x}/{:02x}/{:02x}{}",
                value.red,
                value.green,
                value.blue,
                terminator(bell_terminated)
            );
            screen.reply(reply.into_bytes());
            continue;
        }
        match parse_color_spec(&spec) {
            Ok(rgb) => screen.profile.set_palette_color(index, rgb),
            Err(error) => tracing::warn!("OSC 4;{index}: {error}"),
        }
    }
}

/// OSC 104: reset listed entries, or the whole palette with no payload.
fn reset_palette(screen: &mut Screen, params: &[&[u8]]) {
    if params.len() <= 1 {
        screen.profile.reset_palette();
        return;
    }
    for raw in &params[1..] {
        if let Ok(index) = String::from_utf8_lossy(raw).parse::<u8>() {
            screen.profile.reset_palette_color(index);
        }
    }
}

/// OSC 10..19: successive payload fields walk successive color slots, so
/// `OSC 10;fg;bg` sets both foreground and background.
fn dynamic_colors(
    screen: &mut Screen,
    first_code: u16,
    params: &[&[u8]],
    bell_terminated: bool,
) {
    for (offset, raw) in params[1..].iter().enumerate() {
        let code = first_code + offset as u16;
        let spec = String::from_utf8_lossy(raw);
        if spec.as_ref() == "?" {
            let value = resolve_dynamic(screen, code);
            let reply = format!(
                "\x1b]{code};rgb:{:02x}/{:02x}/{:02x}{}",
                value.red,
                value.green,
                value.blue,
                terminator(bell_terminated)
            );
            screen.reply(reply.into_bytes());
            continue;
        }
        match parse_color_spec(&spec) {
            Ok(rgb) => set_dynamic(screen, code, DynamicColor::Rgb(rgb)),
            Err(error) => tracing::warn!("OSC {code}: {error}"),
        }
    }
}

fn set_dynamic(screen: &mut Screen, code: u16, value: DynamicColor) {
    let dynamic = &mut screen.profile.dynamic;
    match code {
        10 => dynamic.default_fg = value,
        11 => dynamic.default_bg = value,
        12 => dynamic.cursor = value,
        17 => dynamic.highlight_bg = value,
        19 => dynamic.highlight_fg = value,
        other => tracing::trace!("OSC {other}: dynamic color slot not supported"),
    }
}

fn reset_dynamic_color(screen: &mut Screen, code: u16) {
    set_dynamic(screen, code, DynamicColor::NotSet);
}

fn resolve_dynamic(screen: &Screen, code: u16) -> Rgb {
    let dynamic = screen.profile.dynamic;
    let (entry, fallback) = match code {
        10 => (dynamic.default_fg, Rgb::new(0xff, 0xff, 0xff)),
        11 => (dynamic.default_bg, Rgb::new(0x00, 0x00, 0x00)),
        12 => (dynamic.cursor, Rgb::new(0xff, 0xff, 0xff)),
        17 => (dynamic.highlight_bg, Rgb::new(0xff, 0xff, 0xff)),
        19 => (dynamic.highlight_fg, Rgb::new(0x00, 0x00, 0x00)),
        _ => (DynamicColor::NotSet, Rgb::new(0, 0, 0)),
    };
    screen.profile.resolve(entry, fallback)
}

/// OSC 8: `params;url`. An empty url closes the scope; identical links
/// intern to the same id so a scope reopened with the same target rejoins it.
fn hyperlink(screen: &mut Screen, params: &[&[u8]]) {
    let url = params
        .get(2)
        .map(|raw| String::from_utf8_lossy(raw).into_owned())
        .unwrap_or_default();
    if url.is_empty() {
        screen.active_hyperlink = 0;
        return;
    }
    let id_param = params
        .get(1)
        .map(|raw| String::from_utf8_lossy(raw).into_owned())
        .unwrap_or_default();
    let id_param = id_param
        .split(':')
        .find_map(|kv| kv.strip_prefix("id="))
        .unwrap_or_default();
    screen.active_hyperlink = screen.hyperlink_pool.intern(id_param, &url);
}

/// OSC 52: clipboard write. Queries (`?`) are refused — reading the
/// clipboard back is a policy decision that belongs to the embedder.
fn clipboard(screen: &mut Screen, params: &[&[u8]]) {
    let selectors = params.get(1).copied().unwrap_or(b"c");
    let Some(&data) = params.get(2) else { return };
    if data == b"?" {
        tracing::warn!("OSC 52: clipboard read request refused");
        return;
    }
    let selector = if selectors.contains(&b'p') {
        ClipboardSelector::Primary
    } else {
        ClipboardSelector::Clipboard
    };
    screen.push_event(TermEvent::SetClipboard {
        selector,
        data: data.to_vec(),
    });
}

/// OSC 133 shell-integration marks: `A` opens a prompt, `C` starts command
/// output; both tag the cursor row.
fn prompt_mark(screen: &mut Screen, params: &[&[u8]]) {
    let kind = match params.get(1).copied() {
        Some(b"A") => PromptKind::PromptStart,
        Some(b"C") => PromptKind::OutputStart,
        _ => return,
    };
    let y = screen.cursor.pos.row_index;
    screen
        .active_mut()
        .line_mut(y)
        .attrs
        .set_prompt_kind(kind);
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{ClipboardSelector, PromptKind, Rgb, Screen, TermConfig, TermEvent,
                height, width};

    fn screen() -> Screen { Screen::new(height(4) + width(20), TermConfig::default()) }

    #[test]
    fn test_title_and_icon() {
        let mut screen = screen();
        screen.apply_ansi_bytes(b"\x1b]2;hello\x07\x1b]1;icon\x07");
        assert_eq!(
            screen.drain_events(),
            vec![
                TermEvent::SetTitle("hello".into()),
                TermEvent::SetIconName("icon".into()),
            ]
        );
    }

    #[test]
    fn test_osc0_sets_both() {
        let mut screen = screen();
        screen.apply_ansi_bytes(b"\x1b]0;both\x1b\\");
        assert_eq!(
            screen.drain_events(),
            vec![
                TermEvent::SetTitle("both".into()),
                TermEvent::SetIconName("both".into()),
            ]
        );
    }

    #[test]
    fn test_palette_set_query_reset() {
        let mut screen = screen();
        screen.apply_ansi_bytes(b"\x1b]4;1;#102030\x07");
        assert_eq!(screen.profile.palette_color(1), Rgb::new(0x10, 0x20, 0x30));

        screen.apply_ansi_bytes(b"\x1b]4;1;?\x07");
        assert_eq!(
            screen.drain_events(),
            vec![TermEvent::WriteToChild(
                b"\x1b]4;1;rgb:10/20/30\x07".to_vec()
            )]
        );

        screen.apply_ansi_bytes(b"\x1b]104;1\x07");
        assert_ne!(screen.profile.palette_color(1), Rgb::new(0x10, 0x20, 0x30));
    }

    #[test]
    fn test_hyperlink_scope() {
        let mut screen = screen();
        screen.apply_ansi_bytes(b"\x1b]8;;https://x\x1b\\hello\x1b]8;;\x1b\\more");
        let line = screen.visual_line(0).unwrap();
        let id = line.content[0].hyperlink;
        assert_ne!(id, 0);
        for x in 0..5 {
            assert_eq!(line.content[x].hyperlink, id, "column {x}");
        }
        for x in 5..9 {
            assert_eq!(line.content[x].hyperlink, 0, "column {x}");
        }
        assert_eq!(
            screen.hyperlink_pool().get(id).unwrap().url,
            "https://x"
        );
    }

    #[test]
    fn test_clipboard_write() {
        let mut screen = screen();
        screen.apply_ansi_bytes(b"\x1b]52;c;aGVsbG8=\x07");
        assert_eq!(
            screen.drain_events(),
            vec![TermEvent::SetClipboard {
                selector: ClipboardSelector::Clipboard,
                data: b"aGVsbG8=".to_vec(),
            }]
        );
    }

    #[test]
    fn test_prompt_mark_tags_row() {
        let mut screen = screen();
        screen.apply_ansi_bytes(b"\x1b]133;A\x07$ ");
        assert_eq!(
            screen.visual_line(0).unwrap().attrs.prompt_kind(),
            PromptKind::PromptStart
        );
    }

    #[test]
    fn test_dynamic_color_set_and_query() {
        let mut screen = screen();
        screen.apply_ansi_bytes(b"\x1b]10;#aabbcc\x07\x1b]10;?\x07");
        assert_eq!(
            screen.drain_events(),
            vec![TermEvent::WriteToChild(
                b"\x1b]10;rgb:aa/bb/cc\x07".to_vec()
            )]
        );
    }
}
