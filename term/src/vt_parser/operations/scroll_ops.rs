// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Explicit scrolling: SU, SD.
//!
//! Cursor stays put; only the region content moves. Scroll-off into history
//! follows the screen's whole-region/main-grid rule.

use vte::Params;

use crate::{ParamsExt, Screen};

pub fn scroll_up(screen: &mut Screen, params: &Params) {
    let n = usize::from(params.extract_nth_non_zero(0));
    screen.scroll_up_region(n);
    tracing::trace!("CSI S (SU): scrolled up {n} lines");
}

pub fn scroll_down(screen: &mut Screen, params: &Params) {
    let n = usize::from(params.extract_nth_non_zero(0));
    screen.scroll_down_region(n);
    tracing::trace!("CSI T (SD): scrolled down {n} lines");
}
