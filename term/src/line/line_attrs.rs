// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The per-row attribute byte.

use strum_macros::FromRepr;

/// Shell-integration classification of a row, reported by OSC 133-style
/// prompt marks.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, FromRepr)]
#[repr(u8)]
pub enum PromptKind {
    #[default]
    Unknown = 0,
    PromptStart = 1,
    SecondaryPrompt = 2,
    OutputStart = 3,
}

const CONTINUED_BIT: u8 = 1 << 0;
const DIRTY_TEXT_BIT: u8 = 1 << 1;
const IMAGE_PLACEHOLDER_BIT: u8 = 1 << 2;
const PROMPT_SHIFT: u8 = 3;
const PROMPT_MASK: u8 = 0b11;

/// One byte of row metadata riding alongside the cell arrays.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct LineAttrs(pub u8);

impl LineAttrs {
    /// True when this physical row is the continuation of the previous one
    /// (soft wrap), i.e. both belong to the same logical line.
    #[must_use]
    pub const fn is_continued(self) -> bool { self.0 & CONTINUED_BIT != 0 }

    pub const fn set_continued(&mut self, value: bool) {
        if value {
            self.0 |= CONTINUED_BIT;
        } else {
            self.0 &= !CONTINUED_BIT;
        }
    }

    #[must_use]
    pub const fn has_dirty_text(self) -> bool { self.0 & DIRTY_TEXT_BIT != 0 }

    pub const fn set_has_dirty_text(&mut self, value: bool) {
        if value {
            self.0 |= DIRTY_TEXT_BIT;
        } else {
            self.0 &= !DIRTY_TEXT_BIT;
        }
    }

    #[must_use]
    pub const fn has_image_placeholders(self) -> bool {
        self.0 & IMAGE_PLACEHOLDER_BIT != 0
    }

    pub const fn set_has_image_placeholders(&mut self, value: bool) {
        if value {
            self.0 |= IMAGE_PLACEHOLDER_BIT;
        } else {
            self.0 &= !IMAGE_PLACEHOLDER_BIT;
        }
    }

    #[must_use]
    pub fn prompt_kind(self) -> PromptKind {
        PromptKind::from_repr((self.0 >> PROMPT_SHIFT) & PROMPT_MASK)
            .unwrap_or(PromptKind::Unknown)
    }

    pub const fn set_prompt_kind(&mut self, kind: PromptKind) {
        self.0 = (self.0 & !(PROMPT_MASK << PROMPT_SHIFT))
            | (((kind as u8) & PROMPT_MASK) << PROMPT_SHIFT);
    }
}

impl std::fmt::Debug for LineAttrs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LineAttrs(cont:{} dirty:{} img:{} prompt:{:?})",
            self.is_continued(),
            self.has_dirty_text(),
            self.has_image_placeholders(),
            self.prompt_kind()
        )
    }
}
