// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The live color state of one screen.
//!
//! Holds the mutable 256-entry palette next to the pristine
//! `orig_color_table` (what OSC 104 resets to), the dynamic colors that OSC
//! 10-19 manipulate, and the bounded XTPUSHCOLORS/XTPOPCOLORS snapshot stack.

use super::default_palette;
use crate::{CellColor, Rgb};

/// A dynamic color slot value.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DynamicColor {
    /// Nothing configured; resolution falls back to the caller's default.
    #[default]
    NotSet,
    /// A special marker (e.g. "cursor color follows text color"); resolution
    /// falls back to the caller's default.
    Special,
    /// Palette reference.
    Index(u8),
    /// Direct value.
    Rgb(Rgb),
}

/// Snapshot pushed by XTPUSHCOLORS.
#[derive(Clone, Debug)]
struct ColorSnapshot {
    palette: [Rgb; 256],
    dynamic: DynamicColors,
}

/// The seven dynamic colors as a unit.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DynamicColors {
    pub default_fg: DynamicColor,
    pub default_bg: DynamicColor,
    pub cursor: DynamicColor,
    pub cursor_text: DynamicColor,
    pub highlight_fg: DynamicColor,
    pub highlight_bg: DynamicColor,
    pub visual_bell: DynamicColor,
}

/// Color stack depth, matching xterm's XTPUSHCOLORS limit.
const MAX_COLOR_STACK: usize = 10;

#[derive(Debug)]
pub struct ColorProfile {
    palette: [Rgb; 256],
    /// Immutable after construction; OSC 104 restores from here.
    orig_color_table: [Rgb; 256],
    pub dynamic: DynamicColors,
    stack: Vec<ColorSnapshot>,
}

impl Default for ColorProfile {
    fn default() -> Self { Self::new() }
}

impl ColorProfile {
    #[must_use]
    pub fn new() -> Self {
        let palette = default_palette();
        Self {
            palette,
            orig_color_table: palette,
            dynamic: DynamicColors::default(),
            stack: Vec::new(),
        }
    }

    #[must_use]
    pub fn palette_color(&self, index: u8) -> Rgb { self.palette[usize::from(index)] }

    pub fn set_palette_color(&mut self, index: u8, value: Rgb) {
        self.palette[usize::from(index)] = value;
    }

    /// OSC 104 with an index, or without one to restore everything.
    pub fn reset_palette_color(&mut self, index: u8) {
        self.palette[usize::from(index)] = self.orig_color_table[usize::from(index)];
    }

    pub fn reset_palette(&mut self) { self.palette = self.orig_color_table; }

    /// Resolve a dynamic color against the live palette; `NotSet` and
    /// `Special` fall back to `defval`.
    #[must_use]
    pub fn resolve(&self, entry: DynamicColor, defval: Rgb) -> Rgb {
        match entry {
            DynamicColor::NotSet | DynamicColor::Special => defval,
            DynamicColor::Index(index) => self.palette_color(index),
            DynamicColor::Rgb(rgb) => rgb,
        }
    }

    /// Resolve a cell color slot; `Default` falls back to `defval`.
    #[must_use]
    pub fn resolve_cell_color(&self, color: CellColor, defval: Rgb) -> Rgb {
        match color {
            CellColor::Default => defval,
            CellColor::Indexed(index) => self.palette_color(index),
            CellColor::Rgb(rgb) => rgb,
        }
    }

    /// XTPUSHCOLORS. The stack is bounded; pushing past the limit drops the
    /// oldest snapshot, mirroring the savepoint policy.
    pub fn push_colors(&mut self) {
        if self.stack.len() == MAX_COLOR_STACK {
            self.stack.remove(0);
        }
        self.stack.push(ColorSnapshot {
            palette: self.palette,
            dynamic: self.dynamic,
        });
    }

    /// XTPOPCOLORS. Popping an empty stack is a no-op.
    pub fn pop_colors(&mut self) {
        if let Some(snapshot) = self.stack.pop() {
            self.palette = snapshot.palette;
            self.dynamic = snapshot.dynamic;
        }
    }

    #[must_use]
    pub fn stack_depth(&self) -> usize { self.stack.len() }
}
