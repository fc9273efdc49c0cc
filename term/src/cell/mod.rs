// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The packed per-cell data model.
//!
//! One display cell is split into two co-located records so the render path
//! only ever reads the GPU-relevant half:
//!
//! - [`CellContent`]: base codepoint, combining-mark indices, hyperlink id.
//! - [`CellStyle`]: colors, sprite coordinates, and the 16-bit
//!   [`CellAttrs`] attribute word.
//!
//! The grid stores these in two parallel contiguous arrays (see
//! [`crate::LineBuf`]); nothing in this module owns storage for more than a
//! single cell.

// Attach.
pub mod cell_attrs;
pub mod cell_color;
pub mod content;
pub mod pools;

// Re-export.
pub use cell_attrs::*;
pub use cell_color::*;
pub use content::*;
pub use pools::*;
