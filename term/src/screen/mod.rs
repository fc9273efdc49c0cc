// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The screen state machine.
//!
//! [`Screen`] owns everything the parser mutates: both grids (main and alt),
//! the scrollback, the cursor and its savepoints, modes, margins, tab stops,
//! charsets, the color profile, the shared pools, selection state, and the
//! outbound event queue. Parser operations are thin functions over this type
//! (see [`crate::vt_parser`]); the presenter reads it back through
//! [`Screen::visual_line`], [`Screen::cursor_render_info`] and
//! [`Screen::dirty_regions`].
//!
//! ```text
//! bytes → vte parser → performer ops ──┐
//!                                      ▼
//!                                   Screen ──── mutates ──► LineBuf / HistoryBuf
//!                                      │
//!                                      └── queues ──► TermEvent (title, bell,
//!                                                     write-to-child, …)
//! ```
//!
//! Everything here is single-threaded and infallible: malformed input was
//! already absorbed by the parser, geometry is coerced, and resource
//! exhaustion degrades by dropping decoration, never by failing ingest.

// Attach.
pub mod charsets;
pub mod cursor;
pub mod dirty;
pub mod events;
pub mod keyboard;
pub mod modes;
pub mod mouse;
pub mod savepoint;
pub mod tab_stops;

// Re-export.
pub use charsets::*;
pub use cursor::*;
pub use dirty::*;
pub use events::*;
pub use keyboard::*;
pub use modes::*;
pub use mouse::*;
pub use savepoint::*;
pub use tab_stops::*;

use std::collections::VecDeque;

use smallvec::SmallVec;

use crate::{BLANK_CHAR, CellColor, ColIndex, GridSize, GraphemeSegmenter, HistoryBuf,
            HyperlinkPool, LineBuf, LineRef, MarkPool, Pos, Rgb, RowIndex, Selection,
            TermConfig, VS16, char_display_width, cluster_display_width, col, row,
            vt_parser::VtPerformer};

/// OSC payload accumulation cap. Sequences that outgrow this are truncated
/// by the tokenizer instead of growing without bound.
const OSC_PAYLOAD_CAP: usize = 1024 * 1024;

/// What the renderer needs to draw the cursor.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CursorRenderInfo {
    pub visible: bool,
    pub shape: CursorShape,
    pub blink: bool,
    pub pos: Pos,
    pub text_color: Rgb,
}

/// The core terminal engine for one window.
pub struct Screen {
    pub(crate) size: GridSize,
    main_linebuf: LineBuf,
    alt_linebuf: LineBuf,
    pub(crate) active_is_alt: bool,
    pub(crate) history: HistoryBuf,

    pub(crate) cursor: Cursor,
    saved_main: SavepointStack,
    saved_alt: SavepointStack,

    pub(crate) modes: ScreenModes,
    pub(crate) mouse_tracking: MouseTrackingMode,
    pub(crate) mouse_encoding: MouseEncoding,
    pub(crate) margin_top: RowIndex,
    pub(crate) margin_bottom: RowIndex,
    pub(crate) tab_stops: TabStops,
    pub(crate) charsets: Charsets,

    segmenter: GraphemeSegmenter,
    parser: vte::Parser<OSC_PAYLOAD_CAP>,

    pub(crate) profile: crate::ColorProfile,
    pub(crate) mark_pool: MarkPool,
    pub(crate) hyperlink_pool: HyperlinkPool,
    /// Hyperlink id stamped on newly written cells; 0 when no OSC 8 scope is
    /// open.
    pub(crate) active_hyperlink: u16,

    pub(crate) selection: Selection,
    pub(crate) dirty: DirtyTracker,
    pending_events: VecDeque<TermEvent>,

    /// Progressive-enhancement keyboard flag stack (`CSI > flags u`).
    pub(crate) kbd_flag_stack: SmallVec<[u8; 8]>,
    /// Last printed char, for REP.
    pub(crate) last_graphic_char: Option<char>,

    pub(crate) config: TermConfig,
    shutdown: bool,
}

/// The parser field keeps its state opaque; summarize the rest.
impl std::fmt::Debug for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Screen")
            .field("size", &self.size)
            .field("cursor", &self.cursor)
            .field("alt_active", &self.active_is_alt)
            .field("history_count", &self.history.count())
            .field("modes", &self.modes)
            .finish_non_exhaustive()
    }
}

impl Screen {
    #[must_use]
    pub fn new(size: GridSize, config: TermConfig) -> Self {
        let size = size.clamp_to_min();
        let bg = CellColor::Default;
        Self {
            size,
            main_linebuf: LineBuf::new(size, bg),
            alt_linebuf: LineBuf::new(size, bg),
            active_is_alt: false,
            history: HistoryBuf::with_pagerhist(
                config.scrollback_lines,
                config.pagerhist_bytes.max(1),
            ),
            cursor: Cursor::new(),
            saved_main: SavepointStack::new(),
            saved_alt: SavepointStack::new(),
            modes: ScreenModes::default(),
            mouse_tracking: MouseTrackingMode::Off,
            mouse_encoding: MouseEncoding::Default,
            margin_top: row(0),
            margin_bottom: size.row_height.max_row_index(),
            tab_stops: TabStops::new(size.col_width, config.tab_interval),
            charsets: Charsets::default(),
            segmenter: GraphemeSegmenter::new(),
            parser: vte::Parser::default(),
            profile: crate::ColorProfile::new(),
            mark_pool: MarkPool::new(),
            hyperlink_pool: HyperlinkPool::new(),
            active_hyperlink: 0,
            selection: Selection::default(),
            dirty: DirtyTracker::new(size),
            pending_events: VecDeque::new(),
            kbd_flag_stack: SmallVec::new(),
            last_graphic_char: None,
            config,
            shutdown: false,
        }
    }

    // ────────────────────────── ingest entry points ──────────────────────────

    /// Feed raw bytes from the child. Slice boundaries are arbitrary; parser
    /// state persists across calls. After shutdown this is a no-op.
    pub fn apply_ansi_bytes(&mut self, bytes: impl AsRef<[u8]>) {
        if self.shutdown {
            return;
        }
        let mut parser = std::mem::take(&mut self.parser);
        {
            let mut performer = VtPerformer { screen: self };
            parser.advance(&mut performer, bytes.as_ref());
        }
        self.parser = parser;
    }

    /// Stop ingesting; every later call becomes a no-op.
    pub fn shutdown(&mut self) { self.shutdown = true; }

    #[must_use]
    pub fn is_shutdown(&self) -> bool { self.shutdown }

    // ─────────────────────────────── geometry ────────────────────────────────

    #[must_use]
    pub fn size(&self) -> GridSize { self.size }

    #[must_use]
    pub fn cursor_pos(&self) -> Pos { self.cursor.pos }

    #[must_use]
    pub fn is_alt_screen_active(&self) -> bool { self.active_is_alt }

    pub(crate) fn active(&self) -> &LineBuf {
        if self.active_is_alt {
            &self.alt_linebuf
        } else {
            &self.main_linebuf
        }
    }

    pub(crate) fn active_mut(&mut self) -> &mut LineBuf {
        if self.active_is_alt {
            &mut self.alt_linebuf
        } else {
            &mut self.main_linebuf
        }
    }

    /// Background the current pen paints erased cells with.
    pub(crate) fn bg(&self) -> CellColor { self.cursor.pen.bg }

    /// Top of the addressable area under origin mode.
    pub(crate) fn origin_top(&self) -> RowIndex {
        if self.modes.contains(ScreenModes::DECOM) {
            self.margin_top
        } else {
            row(0)
        }
    }

    /// Bottom of the addressable area under origin mode.
    pub(crate) fn origin_bottom(&self) -> RowIndex {
        if self.modes.contains(ScreenModes::DECOM) {
            self.margin_bottom
        } else {
            self.size.row_height.max_row_index()
        }
    }

    /// Absolute cursor placement honoring origin mode; clamps into range and
    /// cancels any pending wrap.
    pub(crate) fn set_cursor_position(&mut self, target_row: RowIndex, target_col: ColIndex) {
        let top = self.origin_top().as_usize();
        let bottom = self.origin_bottom().as_usize();
        let y = (top + target_row.as_usize()).min(bottom);
        self.cursor.pos.row_index = row(y);
        self.cursor.pos.col_index = target_col.clamp_to(self.size.col_width);
        self.dirty.mark_line(self.cursor.pos.row_index);
    }

    /// Relative cursor move clamped to the addressable area. Vertical moves
    /// never cross margins when the cursor starts inside them.
    pub(crate) fn move_cursor_by(&mut self, delta_rows: isize, delta_cols: isize) {
        let y = self.cursor.pos.row_index.as_usize() as isize;
        let (floor, ceiling) = if y >= self.margin_top.as_usize() as isize
            && y <= self.margin_bottom.as_usize() as isize
        {
            (self.margin_top.as_usize() as isize, self.margin_bottom.as_usize() as isize)
        } else {
            (0, self.size.row_height.as_usize() as isize - 1)
        };
        let new_y = (y + delta_rows).clamp(floor, ceiling);

        let x = self.effective_col().as_usize() as isize;
        let new_x =
            (x + delta_cols).clamp(0, self.size.col_width.as_usize() as isize - 1);

        self.cursor.pos = row(new_y as usize) + col(new_x as usize);
    }

    /// Cursor column clamped out of the pending-wrap position.
    pub(crate) fn effective_col(&self) -> ColIndex {
        self.cursor.pos.col_index.clamp_to(self.size.col_width)
    }

    // ─────────────────────────────── text ingest ─────────────────────────────

    /// Ingest one decoded codepoint (the parser's `print` path).
    pub fn draw(&mut self, ch: char) {
        let ch = self.charsets.translate(ch);
        let starts_cluster = self.segmenter.step(ch);
        let char_width = char_display_width(ch);

        if !starts_cluster || char_width == 0 {
            // Joins the cell most recently written: combining mark, ZWJ
            // continuation, variation selector, second regional indicator.
            self.draw_cluster_continuation(ch);
            return;
        }

        self.draw_grid_char(ch, char_width as u16);
        self.last_graphic_char = Some(ch);
    }

    fn draw_grid_char(&mut self, ch: char, char_width: u16) {
        let xnum = self.size.col_width.as_usize();
        let needed = usize::from(char_width);
        if needed > xnum {
            // A wide char on a one-column grid has nowhere to go.
            return;
        }

        if self.cursor.pos.col_index.as_usize() + needed > xnum {
            if self.modes.contains(ScreenModes::DECAWM) {
                // A not-fitting wide char blanks the remainder of the row
                // before wrapping.
                let x = self.cursor.pos.col_index.as_usize();
                if x < xnum {
                    let bg = self.bg();
                    let y = self.cursor.pos.row_index;
                    self.active_mut()
                        .line_mut(y)
                        .clear(col(x), xnum - x, BLANK_CHAR, bg);
                }
                self.wrap_to_next_line();
            } else {
                // DECAWM off: stay pinned at the right edge, overwriting.
                self.cursor.pos.col_index = col(xnum - needed);
            }
        }

        let pos = row(self.cursor.pos.row_index.as_usize())
            + col(self.cursor.pos.col_index.as_usize());

        if self.modes.contains(ScreenModes::IRM) {
            let bg = self.bg();
            self.active_mut()
                .line_mut(pos.row_index)
                .right_shift(pos.col_index, needed, bg);
            self.dirty.mark_line(pos.row_index);
        }

        let pen = self.cursor.pen;
        let link = self.active_hyperlink;
        self.active_mut()
            .line_mut(pos.row_index)
            .set_char(pos.col_index, ch, char_width, pen, link);

        self.dirty.mark_cell(pos);
        if char_width == 2 {
            self.dirty
                .mark_cell(pos.row_index + (pos.col_index + 1));
        }

        // Advance; reaching xnum parks the cursor in the pending-wrap
        // position without moving to the next line yet.
        self.cursor.pos.col_index += needed;
    }

    fn draw_cluster_continuation(&mut self, ch: char) {
        let x = self.cursor.pos.col_index.as_usize();
        if x == 0 {
            // Nothing on this row to attach to; the degenerate mark is
            // dropped (base preserved is vacuously true).
            return;
        }
        let target = col(x - 1);
        let y = self.cursor.pos.row_index;

        // VARIATION SELECTOR-16 upgrades a narrow cell to a wide pair when
        // emoji presentation makes the cluster wide and the neighbor cell is
        // free to become the second half.
        if ch == VS16 && cluster_display_width(self.segmenter.current_cluster()) == 2 {
            let xnum = self.size.col_width.as_usize();
            let can_widen = {
                let line = self.active().line(y);
                let tx = target.as_usize();
                line.style[tx].attrs.width() == 1
                    && tx + 1 < xnum
                    && line.content[tx + 1].is_blank()
                    && line.style[tx + 1].attrs.width() != 0
            };
            if can_widen {
                let mut line = self.active_mut().line_mut(y);
                let tx = target.as_usize();
                line.style[tx].attrs.set_width(2);
                line.content[tx + 1] = crate::CellContent {
                    ch: BLANK_CHAR,
                    marks: [0; 3],
                    hyperlink: line.content[tx].hyperlink,
                };
                let mut second = line.style[tx];
                second.attrs.set_width(0);
                line.style[tx + 1] = second;
                self.cursor.pos.col_index += 1;
                self.dirty.mark_line(y);
                return;
            }
        }

        let Some(mark_index) = self.mark_pool.intern(ch) else {
            return;
        };
        self.active_mut()
            .line_mut(y)
            .add_combining_char(target, mark_index);
        self.dirty.mark_cell(y + target);
    }

    fn wrap_to_next_line(&mut self) {
        let xnum = self.size.col_width.as_usize();
        let y = self.cursor.pos.row_index;
        {
            let mut line = self.active_mut().line_mut(y);
            line.style[xnum - 1].attrs.set_next_char_was_wrapped(true);
        }
        self.index_down();
        self.cursor.pos.col_index = col(0);
        let y = self.cursor.pos.row_index;
        {
            let mut line = self.active_mut().line_mut(y);
            line.attrs.set_continued(true);
        }
        self.dirty.mark_line(y);
    }

    // ──────────────────────────── vertical motion ────────────────────────────

    /// IND / LF: down one row, scrolling when sitting on the bottom margin.
    pub(crate) fn index_down(&mut self) {
        if self.cursor.pos.row_index == self.margin_bottom {
            self.scroll_up_region(1);
        } else if self.size.row_height.contains(self.cursor.pos.row_index + 1) {
            self.cursor.pos.row_index += 1;
        }
    }

    /// RI: up one row, scrolling down when sitting on the top margin.
    pub(crate) fn reverse_index_up(&mut self) {
        if self.cursor.pos.row_index == self.margin_top {
            self.scroll_down_region(1);
        } else if self.cursor.pos.row_index.as_usize() > 0 {
            self.cursor.pos.row_index = self.cursor.pos.row_index - 1;
        }
    }

    /// Scroll the margin region up `n` rows. Rows leaving the top become
    /// scrollback only when the region spans the whole screen and the main
    /// grid is active.
    pub(crate) fn scroll_up_region(&mut self, n: usize) {
        let (top, bottom) = (self.margin_top, self.margin_bottom);
        let whole_screen =
            top.as_usize() == 0 && bottom == self.size.row_height.max_row_index();
        let feed_history = whole_screen && !self.active_is_alt;
        let bg = self.bg();

        for _ in 0..n {
            if feed_history {
                let line = self.active().snapshot_line(top);
                self.history.add_line(line);
            }
            self.active_mut().index(top, bottom, bg);
        }
        self.dirty.mark_lines(top, bottom);
        self.selection.clear();
    }

    /// Scroll the margin region down `n` rows.
    pub(crate) fn scroll_down_region(&mut self, n: usize) {
        let (top, bottom) = (self.margin_top, self.margin_bottom);
        let bg = self.bg();
        for _ in 0..n {
            self.active_mut().reverse_index(top, bottom, bg);
        }
        self.dirty.mark_lines(top, bottom);
        self.selection.clear();
    }

    // ─────────────────────────────── erasing ─────────────────────────────────

    /// EL: erase in line. `mode` 0 = cursor→end, 1 = start→cursor, 2 = all.
    /// DECSCA-protected cells resist both the plain and the selective
    /// (DECSEL) form; only overwrites and ECH get through the guard.
    pub(crate) fn erase_in_line(&mut self, mode: u16, _selective: bool) {
        let xnum = self.size.col_width.as_usize();
        let x = self.effective_col().as_usize();
        let (start, n) = match mode {
            0 => (x, xnum - x),
            1 => (0, x + 1),
            2 => (0, xnum),
            _ => return,
        };
        let bg = self.bg();
        let y = self.cursor.pos.row_index;
        let mut line = self.active_mut().line_mut(y);
        line.clear_unprotected(col(start), n, BLANK_CHAR, bg);
        self.dirty.mark_line(y);
    }

    /// ED: erase in display. `mode` 3 additionally drops the scrollback.
    pub(crate) fn erase_in_display(&mut self, mode: u16, selective: bool) {
        let last_row = self.size.row_height.max_row_index().as_usize();
        let y = self.cursor.pos.row_index.as_usize();
        match mode {
            0 => {
                self.erase_in_line(0, selective);
                for target in y + 1..=last_row {
                    self.erase_full_row(row(target), selective);
                }
            }
            1 => {
                self.erase_in_line(1, selective);
                for target in 0..y {
                    self.erase_full_row(row(target), selective);
                }
            }
            2 => {
                for target in 0..=last_row {
                    self.erase_full_row(row(target), selective);
                }
            }
            3 => {
                for target in 0..=last_row {
                    self.erase_full_row(row(target), selective);
                }
                self.history.clear();
            }
            _ => {}
        }
        self.dirty.mark_all();
        self.selection.clear();
    }

    fn erase_full_row(&mut self, y: RowIndex, selective: bool) {
        let xnum = self.size.col_width.as_usize();
        let bg = self.bg();
        let mut line = self.active_mut().line_mut(y);
        line.clear_unprotected(col(0), xnum, BLANK_CHAR, bg);
        if !selective {
            *line.attrs = crate::LineAttrs::default();
        }
    }

    // ─────────────────────────── margins / regions ───────────────────────────

    /// DECSTBM. Out-of-range or inverted requests reset to the full screen.
    /// Moves the cursor home (origin-relative).
    pub(crate) fn set_margins(&mut self, top_1based: usize, bottom_1based: usize) {
        let ynum = self.size.row_height.as_usize();
        let top = top_1based.max(1) - 1;
        let bottom = if bottom_1based == 0 { ynum } else { bottom_1based }.min(ynum) - 1;
        if top >= bottom {
            self.margin_top = row(0);
            self.margin_bottom = row(ynum - 1);
        } else {
            self.margin_top = row(top);
            self.margin_bottom = row(bottom);
        }
        self.set_cursor_position(row(0), col(0));
    }

    // ─────────────────────────────── alt screen ──────────────────────────────

    /// Modes 47/1047/1049. 1049 = save cursor, switch, clear.
    pub(crate) fn enter_alt_screen(&mut self, save_cursor: bool, clear: bool) {
        if self.active_is_alt {
            return;
        }
        if save_cursor {
            self.save_cursor();
        }
        self.active_is_alt = true;
        if clear {
            let bg = self.bg();
            self.alt_linebuf.clear_all(bg);
            self.cursor.pos = row(0) + col(0);
        }
        self.dirty.mark_all();
        self.selection.clear();
    }

    pub(crate) fn exit_alt_screen(&mut self, restore_cursor: bool) {
        if !self.active_is_alt {
            return;
        }
        self.active_is_alt = false;
        if restore_cursor {
            self.restore_cursor();
        }
        self.dirty.mark_all();
        self.selection.clear();
    }

    // ─────────────────────────────── savepoints ──────────────────────────────

    /// DECSC.
    pub(crate) fn save_cursor(&mut self) {
        let savepoint = Savepoint {
            cursor: self.cursor,
            charsets: self.charsets,
            origin_mode: self.modes.contains(ScreenModes::DECOM),
            autowrap: self.modes.contains(ScreenModes::DECAWM),
            reverse_video: self.modes.contains(ScreenModes::DECSCNM),
        };
        if self.active_is_alt {
            self.saved_alt.push(savepoint);
        } else {
            self.saved_main.push(savepoint);
        }
    }

    /// DECRC. Popping an empty stack restores defaults-at-home, matching the
    /// VT behavior of "restore without save".
    pub(crate) fn restore_cursor(&mut self) {
        let stack = if self.active_is_alt {
            &mut self.saved_alt
        } else {
            &mut self.saved_main
        };
        let Some(savepoint) = stack.pop() else {
            self.cursor.pos = row(0) + col(0);
            self.cursor.reset_pen();
            return;
        };
        self.cursor = savepoint.cursor;
        self.charsets = savepoint.charsets;
        self.modes.set(ScreenModes::DECOM, savepoint.origin_mode);
        self.modes.set(ScreenModes::DECAWM, savepoint.autowrap);
        self.modes.set(ScreenModes::DECSCNM, savepoint.reverse_video);
        // The saved position may be stale after a resize.
        self.cursor.pos.row_index =
            self.cursor.pos.row_index.clamp_to(self.size.row_height);
        self.cursor.pos.col_index = col(self
            .cursor
            .pos
            .col_index
            .as_usize()
            .min(self.size.col_width.as_usize()));
    }

    // ─────────────────────────────── resize ──────────────────────────────────

    /// Resize both grids with rewrap; displaced main-grid rows feed the
    /// scrollback. Atomic: intermediate states are never observable.
    pub fn resize(&mut self, new_size: GridSize) {
        let new_size = new_size.clamp_to_min();
        if new_size == self.size {
            return;
        }

        self.history.rewrap(new_size.col_width.as_usize());

        let bg = CellColor::Default;
        let main_cursor = if self.active_is_alt {
            row(0) + col(0)
        } else {
            self.cursor.pos
        };
        let alt_cursor = if self.active_is_alt {
            self.cursor.pos
        } else {
            row(0) + col(0)
        };

        let main_result =
            self.main_linebuf
                .rewrap(new_size, bg, Some(&mut self.history), main_cursor);
        let alt_result = self.alt_linebuf.rewrap(new_size, bg, None, alt_cursor);

        self.main_linebuf = main_result.buf;
        self.alt_linebuf = alt_result.buf;
        self.cursor.pos = if self.active_is_alt {
            alt_result.cursor
        } else {
            main_result.cursor
        };

        self.size = new_size;
        self.margin_top = row(0);
        self.margin_bottom = new_size.row_height.max_row_index();
        self.tab_stops.resize(new_size.col_width);
        self.dirty.resize(new_size);
        self.selection.clear();
    }

    // ─────────────────────────────── resets ──────────────────────────────────

    /// RIS: everything back to power-on state. Scrollback survives.
    pub(crate) fn reset_hard(&mut self) {
        let size = self.size;
        self.main_linebuf = LineBuf::new(size, CellColor::Default);
        self.alt_linebuf = LineBuf::new(size, CellColor::Default);
        self.active_is_alt = false;
        self.cursor = Cursor::new();
        self.saved_main.clear();
        self.saved_alt.clear();
        self.modes = ScreenModes::default();
        self.mouse_tracking = MouseTrackingMode::Off;
        self.mouse_encoding = MouseEncoding::Default;
        self.margin_top = row(0);
        self.margin_bottom = size.row_height.max_row_index();
        self.tab_stops.reset(size.col_width);
        self.charsets = Charsets::default();
        self.segmenter.reset();
        self.profile = crate::ColorProfile::new();
        self.active_hyperlink = 0;
        self.selection.clear();
        self.kbd_flag_stack.clear();
        self.last_graphic_char = None;
        self.dirty.mark_all();
    }

    /// DECSTR soft reset: modes, margins, pen, charsets — content stays.
    pub(crate) fn reset_soft(&mut self) {
        self.modes = ScreenModes::default();
        self.margin_top = row(0);
        self.margin_bottom = self.size.row_height.max_row_index();
        self.cursor.reset_pen();
        self.cursor.pen.attrs.set_protected(false);
        self.cursor.shape = CursorShape::default();
        self.charsets = Charsets::default();
        self.save_cursor_baseline();
    }

    /// DECSTR defines the post-reset DECSC state as home/defaults.
    fn save_cursor_baseline(&mut self) {
        let stack = if self.active_is_alt {
            &mut self.saved_alt
        } else {
            &mut self.saved_main
        };
        stack.clear();
    }

    /// DECALN: fill the screen with `E`, reset margins, home the cursor.
    pub(crate) fn screen_alignment_pattern(&mut self) {
        self.margin_top = row(0);
        self.margin_bottom = self.size.row_height.max_row_index();
        let pen = crate::CellStyle::default();
        for y in 0..self.size.row_height.as_usize() {
            let mut line = self.active_mut().line_mut(row(y));
            for x in 0..line.xnum().as_usize() {
                line.set_char(col(x), 'E', 1, pen, 0);
            }
        }
        self.cursor.pos = row(0) + col(0);
        self.dirty.mark_all();
    }

    // ─────────────────────────────── events ──────────────────────────────────

    pub(crate) fn push_event(&mut self, event: TermEvent) {
        self.pending_events.push_back(event);
    }

    /// Queue response bytes for the child (DSR, DA, …).
    pub(crate) fn reply(&mut self, bytes: impl Into<Vec<u8>>) {
        self.pending_events
            .push_back(TermEvent::WriteToChild(bytes.into()));
    }

    /// Drain queued outbound effects in arrival order.
    pub fn drain_events(&mut self) -> Vec<TermEvent> {
        self.pending_events.drain(..).collect()
    }

    /// Paste from the embedder, honoring bracketed-paste mode. Embedded
    /// bracket terminators in the payload are stripped so a malicious paste
    /// cannot break out of the brackets.
    pub fn paste(&mut self, data: &[u8]) {
        if self.shutdown {
            return;
        }
        if self.modes.contains(ScreenModes::BRACKETED_PASTE) {
            let mut framed = Vec::with_capacity(data.len() + 12);
            framed.extend_from_slice(b"\x1b[200~");
            let mut rest = data;
            while let Some(found) = find_subslice(rest, b"\x1b[201~") {
                framed.extend_from_slice(&rest[..found]);
                rest = &rest[found + 6..];
            }
            framed.extend_from_slice(rest);
            framed.extend_from_slice(b"\x1b[201~");
            self.reply(framed);
        } else {
            self.reply(data.to_vec());
        }
    }

    /// Window focus change; reported to the child when mode ?1004 is on.
    pub fn focus_changed(&mut self, focused: bool) {
        if self.modes.contains(ScreenModes::FOCUS_TRACKING) {
            self.reply(if focused { b"\x1b[I".to_vec() } else { b"\x1b[O".to_vec() });
        }
    }

    // ─────────────────────────── presenter queries ───────────────────────────

    /// Number of scrollback lines currently available.
    #[must_use]
    pub fn history_count(&self) -> usize { self.history.count() }

    /// Visual line addressing over screen + scrollback: `y` in
    /// `[-history_count, ynum)`; negative rows read the scrollback, `-1`
    /// being the line just above the screen.
    #[must_use]
    pub fn visual_line(&self, y: isize) -> Option<LineRef<'_>> {
        if y >= 0 {
            let y = y as usize;
            if y >= self.size.row_height.as_usize() {
                return None;
            }
            Some(self.active().line(row(y)))
        } else {
            let k = (-y - 1) as usize;
            self.history.line_at(k).map(crate::Line::as_line_ref)
        }
    }

    #[must_use]
    pub fn cursor_render_info(&self) -> CursorRenderInfo {
        let default_bg = self
            .profile
            .resolve(self.profile.dynamic.default_bg, Rgb::new(0, 0, 0));
        CursorRenderInfo {
            visible: self.modes.contains(ScreenModes::DECTCEM),
            shape: self.cursor.shape,
            blink: self.cursor.blink && self.modes.contains(ScreenModes::CURSOR_BLINK),
            pos: self.cursor.pos,
            text_color: self
                .profile
                .resolve(self.profile.dynamic.cursor_text, default_bg),
        }
    }

    /// Changed `(row, col_range)` spans since the last call.
    pub fn dirty_regions(&mut self) -> Vec<(RowIndex, std::ops::Range<usize>)> {
        let regions = self.dirty.regions();
        self.dirty.clear();
        regions
    }

    /// Reference to the mark pool for resolving combining marks in views.
    #[must_use]
    pub fn mark_pool(&self) -> &MarkPool { &self.mark_pool }

    /// Reference to the hyperlink pool for resolving cell hyperlink ids.
    #[must_use]
    pub fn hyperlink_pool(&self) -> &HyperlinkPool { &self.hyperlink_pool }

    // ─────────────────────────── pool maintenance ────────────────────────────

    /// Rebuild the combining-mark pool from live cells and rewrite every
    /// cell's indices. Call when the pool has accumulated garbage from
    /// scrolled-away content.
    pub fn compact_mark_pool(&mut self) {
        let mut live: Vec<u16> = Vec::new();
        let mut collect = |buf: &LineBuf| {
            for y in 0..buf.ynum().as_usize() {
                for cell in buf.line(row(y)).content {
                    live.extend(cell.marks.iter().copied().filter(|&m| m != 0));
                }
            }
        };
        collect(&self.main_linebuf);
        collect(&self.alt_linebuf);
        for k in 0..self.history.count() {
            if let Some(line) = self.history.line_at(k) {
                for cell in &line.content {
                    live.extend(cell.marks.iter().copied().filter(|&m| m != 0));
                }
            }
        }

        let remap = self.mark_pool.compact(live.into_iter());

        let rewrite = |marks: &mut [u16; 3]| {
            for mark in marks.iter_mut() {
                if *mark != 0 {
                    *mark = remap.get(mark).copied().unwrap_or(0);
                }
            }
        };
        for buf in [&mut self.main_linebuf, &mut self.alt_linebuf] {
            for y in 0..buf.ynum().as_usize() {
                for cell in buf.line_mut(row(y)).content.iter_mut() {
                    rewrite(&mut cell.marks);
                }
            }
        }
        // History lines are owned; walk them via rewrap-free direct access.
        for k in 0..self.history.count() {
            // Safe: line_at_mut equivalent via re-adding is overkill; expose a
            // direct mutable walk instead.
            if let Some(line) = self.history_line_mut(k) {
                for cell in line.content.iter_mut() {
                    rewrite(&mut cell.marks);
                }
            }
        }
    }

    fn history_line_mut(&mut self, k: usize) -> Option<&mut crate::Line> {
        self.history.line_at_mut(k)
    }
}

/// Find the first occurrence of `needle` in `haystack`.
fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{Screen, ScreenModes, TermEvent};
    use crate::{GridSize, TermConfig, col, height, row, width};

    fn screen(cols: usize, rows: usize) -> Screen {
        Screen::new(height(rows) + width(cols), TermConfig::default())
    }

    fn screen_size(cols: usize, rows: usize) -> GridSize { height(rows) + width(cols) }

    fn row_text(screen: &Screen, y: isize) -> String {
        let mut out = String::new();
        let line = screen.visual_line(y).unwrap();
        line.text_into(
            &mut out,
            screen.mark_pool(),
            col(0),
            col(line.xnum().as_usize()),
        );
        out.trim_end().to_string()
    }

    #[test]
    fn test_draw_advances_cursor() {
        let mut screen = screen(10, 4);
        for ch in "hey".chars() {
            screen.draw(ch);
        }
        assert_eq!(row_text(&screen, 0), "hey");
        assert_eq!(screen.cursor_pos(), row(0) + col(3));
    }

    #[test]
    fn test_pending_wrap_holds_at_right_edge() {
        let mut screen = screen(3, 2);
        for ch in "abc".chars() {
            screen.draw(ch);
        }
        // Cursor parks at x = xnum, no wrap yet.
        assert_eq!(screen.cursor_pos(), row(0) + col(3));
        screen.draw('d');
        assert_eq!(row_text(&screen, 0), "abc");
        assert_eq!(row_text(&screen, 1), "d");
        assert_eq!(screen.cursor_pos(), row(1) + col(1));
        assert!(screen.visual_line(1).unwrap().attrs.is_continued());
        assert!(screen.visual_line(0).unwrap().continues_to_next_row());
    }

    #[test]
    fn test_autowrap_off_pins_cursor() {
        let mut screen = screen(3, 2);
        screen.modes.remove(ScreenModes::DECAWM);
        for ch in "abcXY".chars() {
            screen.draw(ch);
        }
        // Everything past the edge overwrites the last column.
        assert_eq!(row_text(&screen, 0), "abY");
        assert_eq!(screen.cursor_pos(), row(0) + col(3));
    }

    #[test]
    fn test_wide_char_at_edge_wraps_whole_char() {
        let mut screen = screen(3, 2);
        screen.draw('A');
        screen.draw('猫');
        // Scenario: A then blank on row 0; the wide pair opens row 1.
        assert_eq!(row_text(&screen, 0), "A");
        let line1 = screen.visual_line(1).unwrap();
        assert_eq!(line1.content[0].ch, '猫');
        assert_eq!(line1.style[0].attrs.width(), 2);
        assert_eq!(line1.style[1].attrs.width(), 0);
        assert!(line1.attrs.is_continued());
    }

    #[test]
    fn test_combining_mark_joins_previous_cell() {
        let mut screen = screen(10, 2);
        screen.draw('e');
        screen.draw('\u{0301}');
        assert_eq!(screen.cursor_pos(), row(0) + col(1));
        let line = screen.visual_line(0).unwrap();
        assert_eq!(line.content[0].ch, 'e');
        assert_eq!(line.content[0].mark_count(), 1);
    }

    #[test]
    fn test_scrolloff_feeds_history_only_from_full_region() {
        let mut screen = screen(4, 3);
        for ch in "top".chars() {
            screen.draw(ch);
        }
        screen.cursor.pos = row(2) + col(0);
        screen.scroll_up_region(1);
        assert_eq!(screen.history_count(), 1);
        assert_eq!(row_text(&screen, -1), "top");

        // With margins narrower than the screen nothing reaches history.
        screen.set_margins(1, 2);
        screen.scroll_up_region(1);
        assert_eq!(screen.history_count(), 1);
    }

    #[test]
    fn test_alt_screen_never_feeds_history() {
        let mut screen = screen(4, 3);
        screen.enter_alt_screen(true, true);
        for ch in "alt".chars() {
            screen.draw(ch);
        }
        screen.cursor.pos = row(2) + col(0);
        screen.scroll_up_region(1);
        assert_eq!(screen.history_count(), 0);
        screen.exit_alt_screen(true);
    }

    #[test]
    fn test_alt_screen_1049_round_trip() {
        let mut screen = screen(10, 5);
        for ch in "main".chars() {
            screen.draw(ch);
        }
        let saved_pos = screen.cursor_pos();
        screen.enter_alt_screen(true, true);
        screen.set_cursor_position(row(3), col(5));
        screen.draw('X');
        screen.exit_alt_screen(true);
        assert_eq!(screen.cursor_pos(), saved_pos);
        assert_eq!(row_text(&screen, 0), "main");
    }

    #[test]
    fn test_resize_round_trip_preserves_screen() {
        let mut screen = screen(8, 4);
        for ch in "hello".chars() {
            screen.draw(ch);
        }
        let cursor = screen.cursor_pos();
        screen.resize(screen_size(3, 4));
        screen.resize(screen_size(8, 4));
        assert_eq!(row_text(&screen, 0), "hello");
        assert_eq!(screen.cursor_pos(), cursor);
    }

    #[test]
    fn test_shutdown_makes_ingest_noop() {
        let mut screen = screen(8, 2);
        screen.apply_ansi_bytes(b"before");
        screen.shutdown();
        screen.apply_ansi_bytes(b"after");
        assert_eq!(row_text(&screen, 0), "before");
    }

    #[test]
    fn test_bracketed_paste_framing_and_filtering() {
        let mut screen = screen(8, 2);
        screen.modes.insert(ScreenModes::BRACKETED_PASTE);
        screen.paste(b"hi\x1b[201~there");
        let events = screen.drain_events();
        assert_eq!(
            events,
            vec![TermEvent::WriteToChild(b"\x1b[200~hithere\x1b[201~".to_vec())]
        );
    }

    #[test]
    fn test_erase_honors_protection() {
        let mut screen = screen(6, 2);
        screen.draw('a');
        screen.cursor.pen.attrs.set_protected(true);
        screen.draw('b');
        screen.cursor.pen.attrs.set_protected(false);
        screen.draw('c');
        screen.cursor.pos = row(0) + col(0);
        screen.erase_in_line(2, true);
        assert_eq!(row_text(&screen, 0), " b");
    }

    #[test]
    fn test_decaln_fills_screen() {
        let mut screen = screen(4, 2);
        screen.screen_alignment_pattern();
        assert_eq!(row_text(&screen, 0), "EEEE");
        assert_eq!(row_text(&screen, 1), "EEEE");
        assert_eq!(screen.cursor_pos(), row(0) + col(0));
    }

    #[test]
    fn test_compact_mark_pool_drops_dead_marks() {
        let mut screen = screen(10, 2);
        // First mark becomes garbage once its cell is erased; the second
        // stays live and must survive compaction with a valid index.
        screen.apply_ansi_bytes("x\u{0301}\x1b[2J\x1b[He\u{0300}".as_bytes());
        assert_eq!(screen.mark_pool().len(), 2);
        screen.compact_mark_pool();
        assert_eq!(screen.mark_pool().len(), 1);
        let line = screen.visual_line(0).unwrap();
        assert_eq!(
            screen.mark_pool().get(line.content[0].marks[0]),
            Some('\u{0300}')
        );
    }

    #[test]
    fn test_vs16_widens_narrow_emoji() {
        let mut screen = screen(6, 2);
        screen.draw('\u{2764}'); // HEAVY BLACK HEART, width 1.
        screen.draw(VS16_CHAR);
        let line = screen.visual_line(0).unwrap();
        assert_eq!(line.style[0].attrs.width(), 2);
        assert_eq!(line.style[1].attrs.width(), 0);
        assert_eq!(screen.cursor_pos(), row(0) + col(2));
    }

    const VS16_CHAR: char = '\u{FE0F}';
}
