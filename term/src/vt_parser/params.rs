// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Parameter extraction helpers for [`vte::Params`].
//!
//! The VT100 convention: a missing parameter defaults to 0, and for count
//! parameters 0 means 1 (`ESC[A`, `ESC[0A`, `ESC[1A` all move one row).

use vte::Params;

pub trait ParamsExt {
    /// First subparameter of the nth `;`-separated group.
    fn extract_nth(&self, n: usize) -> Option<u16>;

    /// Like [`Self::extract_nth`] with a default for missing groups.
    fn extract_nth_or(&self, n: usize, default: u16) -> u16;

    /// Count parameter: missing and 0 both mean 1.
    fn extract_nth_non_zero(&self, n: usize) -> u16;
}

impl ParamsExt for Params {
    fn extract_nth(&self, n: usize) -> Option<u16> {
        self.iter().nth(n).and_then(|group| group.first().copied())
    }

    fn extract_nth_or(&self, n: usize, default: u16) -> u16 {
        self.extract_nth(n).unwrap_or(default)
    }

    fn extract_nth_non_zero(&self, n: usize) -> u16 {
        match self.extract_nth(n) {
            None | Some(0) => 1,
            Some(value) => value,
        }
    }
}
