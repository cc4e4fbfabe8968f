//! Lexicon-driven phrase matching with frequency ranking

use crate::error::{Result, ResumeAnalyzerError};
use aho_corasick::{AhoCorasick, MatchKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Frequency-ranked phrase matches from a single scan of a text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    /// Distinct matched phrases, most frequent first. Ties keep the order in
    /// which each phrase first appeared in the text.
    pub all: Vec<String>,
    /// Leading slice of `all`, at most `top_n` entries.
    pub top: Vec<String>,
    /// Occurrence count per matched phrase.
    pub counts: HashMap<String, usize>,
}

impl MatchSummary {
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// Total number of phrase hits across the scanned text.
    pub fn total_hits(&self) -> usize {
        self.counts.values().sum()
    }
}

/// Single-pass matcher over one lexicon domain.
///
/// The whole phrase list is compiled into one Aho-Corasick automaton so a
/// scan touches the text once regardless of lexicon size. Matching is
/// case-insensitive; a hit only counts when it sits on phrase boundaries,
/// so `go` never fires inside `algorithm` and `r` never fires inside `rust`.
pub struct LexiconMatcher {
    automaton: AhoCorasick,
    phrases: Vec<String>,
    top_n: usize,
}

impl LexiconMatcher {
    /// Compile a matcher over `phrases`, reporting at most `top_n` top entries.
    pub fn new(phrases: &[String], top_n: usize) -> Result<Self> {
        let canonical: Vec<String> = phrases.iter().map(|p| p.to_lowercase()).collect();
        let automaton = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostLongest) // Prefer longer phrases on overlap
            .build(&canonical)
            .map_err(|e| {
                ResumeAnalyzerError::TextProcessing(format!(
                    "Failed to build lexicon automaton: {}",
                    e
                ))
            })?;

        Ok(Self {
            automaton,
            phrases: canonical,
            top_n,
        })
    }

    /// Scan `text` and rank every boundary-verified hit.
    ///
    /// Ranking groups hits by phrase and sorts by descending count; ties
    /// preserve first-encounter order (the sort is stable over a list that
    /// is already in first-seen order).
    pub fn find_matches(&self, text: &str) -> MatchSummary {
        let mut counts: HashMap<usize, usize> = HashMap::new();
        let mut first_seen: Vec<usize> = Vec::new();

        for mat in self.automaton.find_iter(text) {
            if !on_phrase_boundary(text, mat.start(), mat.end()) {
                continue;
            }
            let id = mat.pattern().as_usize();
            let entry = counts.entry(id).or_insert(0);
            if *entry == 0 {
                first_seen.push(id);
            }
            *entry += 1;
        }

        let mut ranked = first_seen;
        ranked.sort_by(|a, b| counts[b].cmp(&counts[a]));

        let all: Vec<String> = ranked.iter().map(|&id| self.phrases[id].clone()).collect();
        let top: Vec<String> = all.iter().take(self.top_n).cloned().collect();
        let counts = counts
            .into_iter()
            .map(|(id, n)| (self.phrases[id].clone(), n))
            .collect();

        MatchSummary { all, top, counts }
    }

    /// True if `text` contains at least one boundary-verified phrase hit.
    pub fn contains_any(&self, text: &str) -> bool {
        self.automaton
            .find_iter(text)
            .any(|mat| on_phrase_boundary(text, mat.start(), mat.end()))
    }

    pub fn phrase_count(&self) -> usize {
        self.phrases.len()
    }
}

/// A hit is whole-phrase only when the characters flanking it are not
/// alphanumeric (or the match touches the text edge).
fn on_phrase_boundary(text: &str, start: usize, end: usize) -> bool {
    let before_ok = text[..start]
        .chars()
        .next_back()
        .map_or(true, |c| !c.is_alphanumeric());
    let after_ok = text[end..]
        .chars()
        .next()
        .map_or(true, |c| !c.is_alphanumeric());
    before_ok && after_ok
}
