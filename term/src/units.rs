// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Strongly-typed grid units.
//!
//! The grid math in this crate never mixes up rows and columns, or indices and
//! lengths, because each one is its own type. Constructor functions ([`row`],
//! [`col`], [`height`], [`width`]) keep call sites short:
//!
//! ```
//! use r3bl_term::{row, col, Pos};
//! let pos: Pos = row(2) + col(5);
//! assert_eq!(pos.row_index.as_usize(), 2);
//! ```
//!
//! Indices are 0-based. Terminal wire coordinates (CSI parameters) are 1-based
//! and are converted at the parser boundary, never inside the engine.

use std::{fmt,
          ops::{Add, AddAssign, Sub}};

/// 0-based row index into a grid.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowIndex(pub usize);

/// 0-based column index into a grid. May equal the grid width transiently while
/// the cursor sits in the pending-wrap position.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColIndex(pub usize);

/// Number of rows in a grid. Always ≥ 1 once a grid exists.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowHeight(pub usize);

/// Number of columns in a grid. Always ≥ 1 once a grid exists.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColWidth(pub usize);

/// Create a [`RowIndex`].
#[must_use]
pub const fn row(value: usize) -> RowIndex { RowIndex(value) }

/// Create a [`ColIndex`].
#[must_use]
pub const fn col(value: usize) -> ColIndex { ColIndex(value) }

/// Create a [`RowHeight`].
#[must_use]
pub const fn height(value: usize) -> RowHeight { RowHeight(value) }

/// Create a [`ColWidth`].
#[must_use]
pub const fn width(value: usize) -> ColWidth { ColWidth(value) }

macro_rules! unit_impls {
    ($name:ident) => {
        impl $name {
            #[must_use]
            pub const fn as_usize(self) -> usize { self.0 }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl Add<usize> for $name {
            type Output = $name;
            fn add(self, rhs: usize) -> $name { $name(self.0 + rhs) }
        }

        impl AddAssign<usize> for $name {
            fn add_assign(&mut self, rhs: usize) { self.0 += rhs; }
        }

        impl Sub<usize> for $name {
            type Output = $name;
            fn sub(self, rhs: usize) -> $name { $name(self.0.saturating_sub(rhs)) }
        }
    };
}

unit_impls!(RowIndex);
unit_impls!(ColIndex);
unit_impls!(RowHeight);
unit_impls!(ColWidth);

impl RowHeight {
    /// Largest valid [`RowIndex`] in a grid of this height.
    #[must_use]
    pub const fn max_row_index(self) -> RowIndex { RowIndex(self.0 - 1) }

    /// `index < height`.
    #[must_use]
    pub const fn contains(self, index: RowIndex) -> bool { index.0 < self.0 }
}

impl ColWidth {
    /// Largest valid [`ColIndex`] in a grid of this width.
    #[must_use]
    pub const fn max_col_index(self) -> ColIndex { ColIndex(self.0 - 1) }

    /// `index < width`.
    #[must_use]
    pub const fn contains(self, index: ColIndex) -> bool { index.0 < self.0 }
}

impl RowIndex {
    /// Clamp to the last row of a grid of `arg_height` rows.
    #[must_use]
    pub fn clamp_to(self, arg_height: RowHeight) -> RowIndex {
        RowIndex(self.0.min(arg_height.0.saturating_sub(1)))
    }
}

impl ColIndex {
    /// Clamp to the last column of a grid of `arg_width` columns.
    #[must_use]
    pub fn clamp_to(self, arg_width: ColWidth) -> ColIndex {
        ColIndex(self.0.min(arg_width.0.saturating_sub(1)))
    }
}

/// A cursor position on the grid, built as `row(2) + col(5)`.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row_index: RowIndex,
    pub col_index: ColIndex,
}

impl Add<ColIndex> for RowIndex {
    type Output = Pos;
    fn add(self, rhs: ColIndex) -> Pos {
        Pos {
            row_index: self,
            col_index: rhs,
        }
    }
}

impl fmt::Debug for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pos(r:{}, c:{})", self.row_index.0, self.col_index.0)
    }
}

/// Grid dimensions. Constructed with `height(24) + width(80)`.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct GridSize {
    pub row_height: RowHeight,
    pub col_width: ColWidth,
}

impl Add<ColWidth> for RowHeight {
    type Output = GridSize;
    fn add(self, rhs: ColWidth) -> GridSize {
        GridSize {
            row_height: self,
            col_width: rhs,
        }
    }
}

impl fmt::Debug for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GridSize({}x{})", self.col_width.0, self.row_height.0)
    }
}

impl GridSize {
    /// Coerce degenerate requests (0 rows or 0 cols) to the 1×1 minimum, per
    /// the geometry error policy.
    #[must_use]
    pub fn clamp_to_min(self) -> GridSize {
        GridSize {
            row_height: RowHeight(self.row_height.0.max(1)),
            col_width: ColWidth(self.col_width.0.max(1)),
        }
    }

    #[must_use]
    pub const fn cell_count(self) -> usize { self.row_height.0 * self.col_width.0 }
}
