// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Shared interning pools referenced by cell content.
//!
//! Cells are a fixed size, so variable-size payloads (combining marks beyond
//! the base codepoint, hyperlink targets) live in screen-wide pools and cells
//! hold 16-bit indices. Index 0 is reserved as "none" in both pools. The pools
//! are only ever touched from the core thread, so there is no locking.

use rustc_hash::FxHashMap;

/// Interning pool for combining-mark codepoints.
///
/// Indices handed out are stable until [`MarkPool::compact`] runs; compaction
/// returns a remap table and the caller must revisit every live cell.
#[derive(Debug, Default)]
pub struct MarkPool {
    /// Slot `i` holds the mark for index `i + 1`.
    marks: Vec<char>,
    lookup: FxHashMap<char, u16>,
}

impl MarkPool {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Intern a combining mark, returning its index (≥ 1). Returns `None` when
    /// the 16-bit index space is exhausted; the caller drops the mark.
    pub fn intern(&mut self, mark: char) -> Option<u16> {
        if let Some(&index) = self.lookup.get(&mark) {
            return Some(index);
        }
        if self.marks.len() >= usize::from(u16::MAX) {
            tracing::warn!("combining-mark pool full, dropping U+{:04X}", mark as u32);
            return None;
        }
        self.marks.push(mark);
        let index = self.marks.len() as u16;
        self.lookup.insert(mark, index);
        Some(index)
    }

    /// Resolve an index back to its codepoint. Index 0 (or a stale index past
    /// the pool) yields `None`.
    #[must_use]
    pub fn get(&self, index: u16) -> Option<char> {
        if index == 0 {
            return None;
        }
        self.marks.get(usize::from(index) - 1).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize { self.marks.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.marks.is_empty() }

    /// Rebuild the pool keeping only the marks reported live by the caller.
    /// Returns the old-index → new-index remap table (0 stays 0). Every cell
    /// must be rewritten with the table afterwards; until then cell indices
    /// are stale.
    #[must_use]
    pub fn compact(&mut self, live: impl Iterator<Item = u16>) -> FxHashMap<u16, u16> {
        let mut remap = FxHashMap::default();
        let mut kept: Vec<char> = Vec::new();
        let mut kept_lookup: FxHashMap<char, u16> = FxHashMap::default();

        for old_index in live {
            if remap.contains_key(&old_index) {
                continue;
            }
            if let Some(mark) = self.get(old_index) {
                let new_index = if let Some(&existing) = kept_lookup.get(&mark) {
                    existing
                } else {
                    kept.push(mark);
                    let index = kept.len() as u16;
                    kept_lookup.insert(mark, index);
                    index
                };
                remap.insert(old_index, new_index);
            }
        }

        self.marks = kept;
        self.lookup = kept_lookup;
        remap
    }
}

/// One interned hyperlink: the OSC 8 `id=` parameter (possibly empty) plus the
/// target URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hyperlink {
    pub id_param: String,
    pub url: String,
}

/// Interning pool for OSC 8 hyperlinks. Cells store the 16-bit handle; 0 means
/// "no hyperlink".
#[derive(Debug, Default)]
pub struct HyperlinkPool {
    links: Vec<Hyperlink>,
    lookup: FxHashMap<Hyperlink, u16>,
}

impl HyperlinkPool {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Intern a hyperlink, returning its id (≥ 1). On id-space overflow the
    /// link is dropped and 0 is returned, so affected text simply loses its
    /// hyperlink rather than failing ingest.
    pub fn intern(&mut self, id_param: &str, url: &str) -> u16 {
        let link = Hyperlink {
            id_param: id_param.to_string(),
            url: url.to_string(),
        };
        if let Some(&id) = self.lookup.get(&link) {
            return id;
        }
        if self.links.len() >= usize::from(u16::MAX) {
            tracing::warn!("hyperlink pool full, dropping {url}");
            return 0;
        }
        self.links.push(link.clone());
        let id = self.links.len() as u16;
        self.lookup.insert(link, id);
        id
    }

    #[must_use]
    pub fn get(&self, id: u16) -> Option<&Hyperlink> {
        if id == 0 {
            return None;
        }
        self.links.get(usize::from(id) - 1)
    }

    #[must_use]
    pub fn len(&self) -> usize { self.links.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.links.is_empty() }
}
