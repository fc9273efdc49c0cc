// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! One grid row: attributes, views, and the low-level cell mutators.
//!
//! A line is exactly `xnum` cells plus one [`LineAttrs`] byte. Lines are owned
//! by a [`crate::LineBuf`] or a [`crate::HistoryBuf`] segment; everything else
//! works through the borrowed [`LineMut`] / [`LineRef`] views. The owned
//! [`Line`] type exists only to hand rows across buffer boundaries (scroll-off
//! into history, rewrap).

// Attach.
pub mod ansi_serialize;
pub mod line_attrs;
pub mod line_view;

// Re-export.
pub use ansi_serialize::*;
pub use line_attrs::*;
pub use line_view::*;
