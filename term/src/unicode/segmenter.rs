// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Incremental grapheme cluster segmentation.
//!
//! The ingest pipeline receives one codepoint at a time and must decide, per
//! codepoint, whether it starts a new display cluster (a new cell) or joins
//! the previous one (a combining mark, ZWJ continuation, variation selector,
//! regional-indicator pairing, Indic conjunct, …).
//!
//! Boundary rules are UAX #29 extended grapheme clusters as shipped by the
//! `unicode-segmentation` crate — its tables are generated from the canonical
//! Unicode data files, which is exactly where this logic should come from.
//! This type adds the incremental shell: it holds the current cluster in a
//! small inline buffer and asks [`GraphemeCursor`] whether a boundary exists
//! before each new codepoint.

use smallstr::SmallString;
use unicode_segmentation::GraphemeCursor;

/// Pathological joiner chains get force-broken at this size so the cluster
/// buffer stays bounded; anything legitimate is far smaller.
const MAX_CLUSTER_BYTES: usize = 128;

/// Streaming `step(cp) → is_break` segmenter.
#[derive(Debug, Default)]
pub struct GraphemeSegmenter {
    cluster: SmallString<[u8; 32]>,
}

impl GraphemeSegmenter {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Feed the next codepoint. Returns `true` when a cluster boundary sits
    /// *before* `cp` (i.e. `cp` starts a new user-perceived character).
    pub fn step(&mut self, cp: char) -> bool {
        if self.cluster.is_empty() {
            self.cluster.push(cp);
            return true;
        }
        if self.cluster.len() + cp.len_utf8() > MAX_CLUSTER_BYTES {
            self.cluster.clear();
            self.cluster.push(cp);
            return true;
        }

        let boundary_offset = self.cluster.len();
        self.cluster.push(cp);
        let mut cursor =
            GraphemeCursor::new(boundary_offset, self.cluster.len(), true);
        let is_break = cursor
            .is_boundary(self.cluster.as_str(), 0)
            .unwrap_or(true);

        if is_break {
            // `cp` starts a fresh cluster.
            let tail_start = self.cluster.len() - cp.len_utf8();
            let fresh: SmallString<[u8; 32]> =
                SmallString::from_str(&self.cluster.as_str()[tail_start..]);
            self.cluster = fresh;
        }
        is_break
    }

    /// The codepoints of the cluster currently being built.
    #[must_use]
    pub fn current_cluster(&self) -> &str { self.cluster.as_str() }

    /// Restore start-of-text state.
    pub fn reset(&mut self) { self.cluster.clear(); }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::GraphemeSegmenter;

    /// Feed a string and count the clusters the segmenter reports.
    fn cluster_count(text: &str) -> usize {
        let mut segmenter = GraphemeSegmenter::new();
        text.chars().filter(|&cp| segmenter.step(cp)).count()
    }

    #[test_case("abc", 3 ; "plain ascii")]
    #[test_case("e\u{0301}", 1 ; "combining acute joins")]
    #[test_case("a\u{0301}b", 2 ; "mark then new base")]
    #[test_case("\r\n", 1 ; "crlf is one cluster")]
    #[test_case("\r a", 3 ; "cr breaks from non lf")]
    #[test_case("🇮🇳🇮🇳", 2 ; "regional indicators pair up")]
    #[test_case("👨\u{200D}👩\u{200D}👧", 1 ; "zwj family sequence")]
    #[test_case("👍🏽", 1 ; "emoji with skin tone modifier")]
    #[test_case("क\u{094D}ष", 1 ; "indic conjunct via virama")]
    #[test_case("नि", 1 ; "consonant plus dependent vowel")]
    fn test_cluster_boundaries(text: &str, expected: usize) {
        assert_eq!(cluster_count(text), expected, "text: {text:?}");
    }

    #[test]
    fn test_reset_restores_start_of_text() {
        let mut segmenter = GraphemeSegmenter::new();
        assert!(segmenter.step('e'));
        assert!(!segmenter.step('\u{0301}'));
        segmenter.reset();
        // A lone combining mark at start-of-text is its own (degenerate)
        // cluster.
        assert!(segmenter.step('\u{0301}'));
    }

    #[test]
    fn test_current_cluster_accumulates() {
        let mut segmenter = GraphemeSegmenter::new();
        segmenter.step('e');
        segmenter.step('\u{0301}');
        assert_eq!(segmenter.current_cluster(), "e\u{0301}");
        segmenter.step('x');
        assert_eq!(segmenter.current_cluster(), "x");
    }

    #[test]
    fn test_runaway_joiner_chain_is_bounded() {
        let mut segmenter = GraphemeSegmenter::new();
        segmenter.step('a');
        // An absurd run of combining marks must eventually force a break
        // instead of growing without bound.
        let breaks = (0..200).filter(|_| segmenter.step('\u{0301}')).count();
        assert!(breaks >= 1);
        assert!(segmenter.current_cluster().len() <= 128);
    }
}
