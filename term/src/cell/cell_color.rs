// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Per-cell color values.
//!
//! A cell carries a foreground, a background, and a decoration (underline)
//! color. Each is either the terminal default, a 256-palette index, or a
//! truecolor value. Resolution against the live palette happens in
//! [`crate::ColorProfile::resolve_cell_color`], not here — cells never store
//! resolved RGB for indexed entries so palette changes retint existing content.

use std::fmt;

/// A 24-bit RGB triple.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self { Self { red, green, blue } }
}

impl fmt::Debug for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

/// Color slot of one cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellColor {
    /// Use the profile's dynamic default for this slot.
    #[default]
    Default,
    /// Index into the 256-entry palette.
    Indexed(u8),
    /// Direct truecolor.
    Rgb(Rgb),
}
