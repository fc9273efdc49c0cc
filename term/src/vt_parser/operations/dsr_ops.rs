// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Device queries: DSR, CPR, DA1, DA2.
//!
//! Replies go through the event queue, so they interleave with other
//! write-backs in exactly the order the queries arrived.

use vte::Params;

use crate::{ParamsExt, Screen, ScreenModes};

/// DSR 5 ("are you ok") and DSR 6 (cursor position report). The private
/// variant (`CSI ? 6 n`, DECXCPR) gets the `?`-marked reply.
pub fn status_report(screen: &mut Screen, params: &Params, private: bool) {
    match params.extract_nth_or(0, 0) {
        5 => screen.reply(b"\x1b[0n".to_vec()),
        6 => {
            // Origin mode makes the report margin-relative.
            let origin = if screen.modes.contains(ScreenModes::DECOM) {
                screen.margin_top.as_usize()
            } else {
                0
            };
            let report_row =
                screen.cursor.pos.row_index.as_usize().saturating_sub(origin) + 1;
            let report_col = screen.effective_col().as_usize() + 1;
            let reply = if private {
                format!("\x1b[?{report_row};{report_col}R")
            } else {
                format!("\x1b[{report_row};{report_col}R")
            };
            screen.reply(reply.into_bytes());
        }
        other => tracing::warn!("DSR {other}: unsupported status request"),
    }
}

/// DA1: `CSI c` / `CSI 0 c`. Non-zero parameters are malformed and ignored.
pub fn device_attributes_primary(screen: &mut Screen, params: &Params) {
    if params.extract_nth_or(0, 0) != 0 {
        return;
    }
    let reply = screen.config.da1_reply.clone();
    screen.reply(reply);
}

/// DA2: `CSI > c`.
pub fn device_attributes_secondary(screen: &mut Screen, params: &Params) {
    if params.extract_nth_or(0, 0) != 0 {
        return;
    }
    let reply = screen.config.da2_reply.clone();
    screen.reply(reply);
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{Screen, TermConfig, TermEvent, height, width};

    fn replies(screen: &mut Screen) -> Vec<Vec<u8>> {
        screen
            .drain_events()
            .into_iter()
            .filter_map(|event| match event {
                TermEvent::WriteToChild(bytes) => Some(bytes),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_dsr_status() {
        let mut screen = Screen::new(height(5) + width(10), TermConfig::default());
        screen.apply_ansi_bytes(b"\x1b[5n");
        assert_eq!(replies(&mut screen), vec![b"\x1b[0n".to_vec()]);
    }

    #[test]
    fn test_cpr_reports_one_based_position() {
        let mut screen = Screen::new(height(5) + width(10), TermConfig::default());
        screen.apply_ansi_bytes(b"\x1b[3;4H\x1b[6n");
        assert_eq!(replies(&mut screen), vec![b"\x1b[3;4R".to_vec()]);
    }

    #[test]
    fn test_cpr_is_origin_relative_under_decom() {
        let mut screen = Screen::new(height(10) + width(10), TermConfig::default());
        screen.apply_ansi_bytes(b"\x1b[3;6r\x1b[?6h\x1b[2;1H\x1b[6n");
        assert_eq!(replies(&mut screen), vec![b"\x1b[2;1R".to_vec()]);
    }

    #[test]
    fn test_da_replies_use_profile_strings() {
        let mut screen = Screen::new(height(5) + width(10), TermConfig::default());
        screen.apply_ansi_bytes(b"\x1b[c\x1b[>c");
        let config = TermConfig::default();
        assert_eq!(
            replies(&mut screen),
            vec![config.da1_reply.clone(), config.da2_reply.clone()]
        );
    }
}
