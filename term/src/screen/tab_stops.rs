// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The tab stop bitmap.

use crate::{ColIndex, ColWidth, col};

/// One bool per column; HTS/TBC edits flip `user_modified`, which makes a
/// resize preserve the custom stops instead of re-seeding the default grid.
#[derive(Debug, Clone)]
pub struct TabStops {
    stops: Vec<bool>,
    interval: usize,
    user_modified: bool,
}

impl TabStops {
    #[must_use]
    pub fn new(arg_width: ColWidth, interval: usize) -> Self {
        let interval = interval.max(1);
        let mut tab_stops = Self {
            stops: Vec::new(),
            interval,
            user_modified: false,
        };
        tab_stops.seed(arg_width);
        tab_stops
    }

    fn seed(&mut self, arg_width: ColWidth) {
        self.stops = (0..arg_width.as_usize())
            .map(|x| x != 0 && x % self.interval == 0)
            .collect();
    }

    /// First stop strictly right of `from`, or the last column.
    #[must_use]
    pub fn next_stop(&self, from: ColIndex) -> ColIndex {
        let start = from.as_usize() + 1;
        for x in start..self.stops.len() {
            if self.stops[x] {
                return col(x);
            }
        }
        col(self.stops.len().saturating_sub(1))
    }

    /// First stop strictly left of `from`, or column 0.
    #[must_use]
    pub fn prev_stop(&self, from: ColIndex) -> ColIndex {
        let end = from.as_usize().min(self.stops.len());
        for x in (0..end).rev() {
            if self.stops[x] {
                return col(x);
            }
        }
        col(0)
    }

    /// HTS: set a stop at `x`.
    pub fn set(&mut self, x: ColIndex) {
        if let Some(stop) = self.stops.get_mut(x.as_usize()) {
            *stop = true;
            self.user_modified = true;
        }
    }

    /// TBC 0: clear the stop at `x`.
    pub fn clear(&mut self, x: ColIndex) {
        if let Some(stop) = self.stops.get_mut(x.as_usize()) {
            *stop = false;
            self.user_modified = true;
        }
    }

    /// TBC 3: clear every stop.
    pub fn clear_all(&mut self) {
        self.stops.iter_mut().for_each(|stop| *stop = false);
        self.user_modified = true;
    }

    /// Resize: user-set stops survive (new columns get default seeding);
    /// untouched maps re-seed wholesale.
    pub fn resize(&mut self, arg_width: ColWidth) {
        if !self.user_modified {
            self.seed(arg_width);
            return;
        }
        let old_len = self.stops.len();
        self.stops.resize(arg_width.as_usize(), false);
        for x in old_len..self.stops.len() {
            self.stops[x] = x != 0 && x % self.interval == 0;
        }
    }

    /// RIS: back to the default grid.
    pub fn reset(&mut self, arg_width: ColWidth) {
        self.user_modified = false;
        self.seed(arg_width);
    }
}
