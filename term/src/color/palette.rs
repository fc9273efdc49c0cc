// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The 256-entry palette and its standard initial values.
//!
//! Layout follows xterm: 16 named ANSI colors, a 6×6×6 color cube
//! (16..=231), and a 24-step grayscale ramp (232..=255).

use strum_macros::{Display, EnumIter, FromRepr};

use crate::Rgb;

/// The 16 base ANSI colors in SGR order (30-37 select the first eight,
/// 90-97 the bright half).
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, EnumIter, FromRepr)]
#[repr(u8)]
pub enum NamedColor {
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    White = 7,
    BrightBlack = 8,
    BrightRed = 9,
    BrightGreen = 10,
    BrightYellow = 11,
    BrightBlue = 12,
    BrightMagenta = 13,
    BrightCyan = 14,
    BrightWhite = 15,
}

impl NamedColor {
    /// Conventional RGB value used to seed the palette.
    #[must_use]
    pub const fn rgb(self) -> Rgb {
        match self {
            Self::Black => Rgb::new(0x00, 0x00, 0x00),
            Self::Red => Rgb::new(0xcc, 0x04, 0x03),
            Self::Green => Rgb::new(0x19, 0xcb, 0x00),
            Self::Yellow => Rgb::new(0xce, 0xcb, 0x00),
            Self::Blue => Rgb::new(0x0d, 0x73, 0xcc),
            Self::Magenta => Rgb::new(0xcb, 0x1e, 0xd1),
            Self::Cyan => Rgb::new(0x0d, 0xcd, 0xcd),
            Self::White => Rgb::new(0xdd, 0xdd, 0xdd),
            Self::BrightBlack => Rgb::new(0x76, 0x76, 0x76),
            Self::BrightRed => Rgb::new(0xf2, 0x20, 0x1f),
            Self::BrightGreen => Rgb::new(0x23, 0xfd, 0x00),
            Self::BrightYellow => Rgb::new(0xff, 0xfd, 0x00),
            Self::BrightBlue => Rgb::new(0x1a, 0x8f, 0xff),
            Self::BrightMagenta => Rgb::new(0xfd, 0x28, 0xff),
            Self::BrightCyan => Rgb::new(0x14, 0xff, 0xff),
            Self::BrightWhite => Rgb::new(0xff, 0xff, 0xff),
        }
    }
}

/// Build the standard 256-entry startup palette.
#[must_use]
pub fn default_palette() -> [Rgb; 256] {
    let mut palette = [Rgb::default(); 256];

    for index in 0..16 {
        palette[index] =
            NamedColor::from_repr(index as u8).expect("index in range").rgb();
    }

    // 6x6x6 color cube. Component values follow the xterm ramp where level 0
    // is 0 and levels 1..=5 are 55 + 40 * level.
    let level = |component: usize| -> u8 {
        if component == 0 {
            0
        } else {
            (55 + 40 * component) as u8
        }
    };
    for red in 0..6 {
        for green in 0..6 {
            for blue in 0..6 {
                let index = 16 + 36 * red + 6 * green + blue;
                palette[index] = Rgb::new(level(red), level(green), level(blue));
            }
        }
    }

    // Grayscale ramp 8, 18, ..., 238.
    for step in 0..24 {
        let value = (8 + 10 * step) as u8;
        palette[232 + step] = Rgb::new(value, value, value);
    }

    palette
}
