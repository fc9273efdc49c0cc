// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The cursor: position, pen, and rendering hints.

use strum_macros::FromRepr;

use crate::{CellStyle, Pos};

/// Shape requested by DECSCUSR.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, FromRepr)]
#[repr(u8)]
pub enum CursorShape {
    #[default]
    Block = 0,
    Underline = 1,
    Beam = 2,
}

/// The live cursor. The pen is the full SGR state (colors + attribute flags);
/// [`crate::LineMut::set_char`] stamps it onto every written cell, which is
/// how "cells remember the style active when they were written" falls out for
/// free.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    pub pos: Pos,
    pub pen: CellStyle,
    pub shape: CursorShape,
    pub blink: bool,
}

impl Cursor {
    #[must_use]
    pub fn new() -> Self {
        Self {
            blink: true,
            ..Self::default()
        }
    }

    /// Reset the pen to default SGR state (SGR 0), leaving position and shape
    /// alone.
    pub fn reset_pen(&mut self) {
        let protected = self.pen.attrs.protected();
        self.pen = CellStyle::default();
        // DECSCA protection is not an SGR attribute and survives SGR 0.
        self.pen.attrs.set_protected(protected);
    }
}
