// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Shared fixtures for the conformance scenarios.

use crate::{Screen, TermConfig, col, height, width};

pub fn screen(cols: usize, rows: usize) -> Screen {
    Screen::new(height(rows) + width(cols), TermConfig::default())
}

pub fn screen_with_scrollback(cols: usize, rows: usize, scrollback: usize) -> Screen {
    let config = TermConfig {
        scrollback_lines: scrollback,
        ..TermConfig::default()
    };
    Screen::new(height(rows) + width(cols), config)
}

/// Visible text of one visual row, trailing blanks trimmed.
pub fn row_text(screen: &Screen, y: isize) -> String {
    let mut out = String::new();
    let line = screen.visual_line(y).expect("row in range");
    line.text_into(
        &mut out,
        screen.mark_pool(),
        col(0),
        col(line.xnum().as_usize()),
    );
    out.trim_end().to_string()
}

/// The whole grid as newline-joined trimmed rows.
pub fn grid_text(screen: &Screen) -> String {
    (0..screen.size().row_height.as_usize() as isize)
        .map(|y| row_text(screen, y))
        .collect::<Vec<_>>()
        .join("\n")
}
