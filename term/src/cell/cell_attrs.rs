// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The 16-bit packed attribute word carried by every cell's style record.
//!
//! Bit layout (low to high):
//!
//! | Bits  | Field                  | Values                                  |
//! |-------|------------------------|-----------------------------------------|
//! | 0-1   | width                  | 0 = empty, 1 = single, 2 = wide first half |
//! | 2-4   | decoration style       | [`DecorationStyle`]                     |
//! | 5     | bold                   |                                         |
//! | 6     | italic                 |                                         |
//! | 7     | reverse                |                                         |
//! | 8     | strike                 |                                         |
//! | 9     | dim                    |                                         |
//! | 10-11 | mark class             | marker highlight group, 0 = none        |
//! | 12    | next-char-was-wrapped  | set on the last cell of a soft-wrapped row |
//! | 13    | protected              | DECSCA selective-erase guard            |
//!
//! Explicit shifts and masks, no bitfield syntax, so the layout is identical
//! on every platform and the word can be handed to the renderer as-is.

use std::fmt;

use strum_macros::FromRepr;

/// Underline/decoration rendering selected by SGR 4, SGR 4:n and SGR 21.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, FromRepr)]
#[repr(u16)]
pub enum DecorationStyle {
    #[default]
    None = 0,
    Straight = 1,
    Double = 2,
    Curly = 3,
    Dotted = 4,
    Dashed = 5,
}

const WIDTH_SHIFT: u16 = 0;
const WIDTH_MASK: u16 = 0b11;
const DECORATION_SHIFT: u16 = 2;
const DECORATION_MASK: u16 = 0b111;
const MARK_SHIFT: u16 = 10;
const MARK_MASK: u16 = 0b11;

const BOLD_BIT: u16 = 1 << 5;
const ITALIC_BIT: u16 = 1 << 6;
const REVERSE_BIT: u16 = 1 << 7;
const STRIKE_BIT: u16 = 1 << 8;
const DIM_BIT: u16 = 1 << 9;
const NEXT_CHAR_WAS_WRAPPED_BIT: u16 = 1 << 12;
const PROTECTED_BIT: u16 = 1 << 13;

/// Define a getter/setter pair for one boolean flag in the attribute word.
macro_rules! attr_flag {
    ($getter:ident, $setter:ident, $bit:expr) => {
        #[inline]
        #[must_use]
        pub const fn $getter(self) -> bool { self.0 & $bit != 0 }

        #[inline]
        pub const fn $setter(&mut self, value: bool) {
            if value {
                self.0 |= $bit;
            } else {
                self.0 &= !$bit;
            }
        }
    };
}

/// The packed attribute word. A fresh cell is `CellAttrs::default()` with
/// width 1 (a blank single-width cell).
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct CellAttrs(pub u16);

impl Default for CellAttrs {
    fn default() -> Self { Self::blank() }
}

impl CellAttrs {
    /// A blank single-width cell with no styling.
    #[must_use]
    pub const fn blank() -> Self { Self(1 << WIDTH_SHIFT) }

    /// Display width of this cell: 0 (empty / wide second half), 1, or 2.
    #[inline]
    #[must_use]
    pub const fn width(self) -> u16 { (self.0 >> WIDTH_SHIFT) & WIDTH_MASK }

    #[inline]
    pub const fn set_width(&mut self, value: u16) {
        self.0 = (self.0 & !(WIDTH_MASK << WIDTH_SHIFT))
            | ((value & WIDTH_MASK) << WIDTH_SHIFT);
    }

    #[inline]
    #[must_use]
    pub fn decoration(self) -> DecorationStyle {
        DecorationStyle::from_repr((self.0 >> DECORATION_SHIFT) & DECORATION_MASK)
            .unwrap_or(DecorationStyle::None)
    }

    #[inline]
    pub const fn set_decoration(&mut self, value: DecorationStyle) {
        self.0 = (self.0 & !(DECORATION_MASK << DECORATION_SHIFT))
            | (((value as u16) & DECORATION_MASK) << DECORATION_SHIFT);
    }

    /// Marker highlight class 0..=3 (0 = unmarked).
    #[inline]
    #[must_use]
    pub const fn mark(self) -> u16 { (self.0 >> MARK_SHIFT) & MARK_MASK }

    #[inline]
    pub const fn set_mark(&mut self, value: u16) {
        self.0 =
            (self.0 & !(MARK_MASK << MARK_SHIFT)) | ((value & MARK_MASK) << MARK_SHIFT);
    }

    attr_flag!(bold, set_bold, BOLD_BIT);
    attr_flag!(italic, set_italic, ITALIC_BIT);
    attr_flag!(reverse, set_reverse, REVERSE_BIT);
    attr_flag!(strike, set_strike, STRIKE_BIT);
    attr_flag!(dim, set_dim, DIM_BIT);
    attr_flag!(
        next_char_was_wrapped,
        set_next_char_was_wrapped,
        NEXT_CHAR_WAS_WRAPPED_BIT
    );
    attr_flag!(protected, set_protected, PROTECTED_BIT);

    /// Copy only the SGR-controlled bits from `other`, leaving width, mark,
    /// wrap, and protection bits of `self` untouched.
    pub const fn copy_sgr_from(&mut self, other: CellAttrs) {
        const SGR_BITS: u16 = BOLD_BIT
            | ITALIC_BIT
            | REVERSE_BIT
            | STRIKE_BIT
            | DIM_BIT
            | (DECORATION_MASK << DECORATION_SHIFT);
        self.0 = (self.0 & !SGR_BITS) | (other.0 & SGR_BITS);
    }
}

impl fmt::Debug for CellAttrs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CellAttrs(w:{}", self.width())?;
        if self.bold() {
            write!(f, " bold")?;
        }
        if self.italic() {
            write!(f, " italic")?;
        }
        if self.reverse() {
            write!(f, " rev")?;
        }
        if self.strike() {
            write!(f, " strike")?;
        }
        if self.dim() {
            write!(f, " dim")?;
        }
        if self.decoration() != DecorationStyle::None {
            write!(f, " deco:{:?}", self.decoration())?;
        }
        if self.next_char_was_wrapped() {
            write!(f, " wrapped")?;
        }
        if self.protected() {
            write!(f, " prot")?;
        }
        write!(f, ")")
    }
}
