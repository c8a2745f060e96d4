//! Ranked search over a list of candidate strings

use nucleo_matcher::{Config, Matcher, Utf32Str};

use crate::error::{PaletteError, Result};
use crate::fuzzy::{fuzzy_match_with_capacity, FuzzyMatch, MatchPositions, MAX_MATCHES};

/// Which matcher ranks the candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchBackend {
    /// Byte-oriented subsequence scorer from [`crate::fuzzy`]
    #[default]
    Subsequence,
    /// nucleo-matcher (same algorithm as Helix/Zed), Unicode aware
    Nucleo,
}

/// One matching candidate of a search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Index of the candidate in the searched list
    pub item_index: usize,
    pub score: i32,
    /// Matched byte offsets into the candidate text
    pub positions: MatchPositions,
}

/// Match every candidate against `query` and rank the hits
///
/// Results are sorted by score, highest first. Candidates with equal scores
/// keep their original relative order. An empty query yields no results;
/// callers show the unfiltered list instead.
///
/// A query longer than `capacity` is a contract violation: the UI would not
/// be able to highlight every matched character.
pub fn search<'a, I>(
    query: &str,
    candidates: I,
    backend: MatchBackend,
    capacity: usize,
) -> Result<Vec<SearchResult>>
where
    I: IntoIterator<Item = &'a str>,
{
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let capacity = capacity.min(MAX_MATCHES);
    let query_len = match backend {
        MatchBackend::Subsequence => query.len(),
        MatchBackend::Nucleo => query.chars().count(),
    };
    if query_len > capacity {
        log::warn!(
            "Search query of {} characters exceeds match capacity {}",
            query_len,
            capacity
        );
        return Err(PaletteError::PatternTooLong {
            len: query_len,
            capacity,
        });
    }

    let mut results: Vec<SearchResult> = match backend {
        MatchBackend::Subsequence => candidates
            .into_iter()
            .enumerate()
            .filter_map(|(item_index, candidate)| {
                fuzzy_match_with_capacity(query, candidate, capacity).map(|m| SearchResult {
                    item_index,
                    score: m.score,
                    positions: m.positions,
                })
            })
            .collect(),
        MatchBackend::Nucleo => {
            let mut matcher = NucleoSearch::new(query, capacity);
            candidates
                .into_iter()
                .enumerate()
                .filter_map(|(item_index, candidate)| {
                    matcher.fuzzy_match(candidate).map(|m| SearchResult {
                        item_index,
                        score: m.score,
                        positions: m.positions,
                    })
                })
                .collect()
        }
    };

    // Sort by score (descending); sort_by is stable so ties keep source order
    results.sort_by(|a, b| b.score.cmp(&a.score));

    log::debug!("Search {:?} matched {} candidates", query, results.len());

    Ok(results)
}

/// nucleo-matcher wrapper that reports byte offsets like the subsequence scorer
struct NucleoSearch {
    matcher: Matcher,
    needle: String,
    capacity: usize,
    // Reusable buffers for UTF-32 conversion (avoids per-candidate allocations)
    haystack_buf: Vec<char>,
    needle_buf: Vec<char>,
    indices: Vec<u32>,
}

impl NucleoSearch {
    fn new(query: &str, capacity: usize) -> Self {
        Self {
            matcher: Matcher::new(Config::DEFAULT),
            // The matcher folds the haystack only, so the needle goes in lowercase
            needle: query.to_lowercase(),
            capacity,
            haystack_buf: Vec::new(),
            needle_buf: Vec::new(),
            indices: Vec::new(),
        }
    }

    fn fuzzy_match(&mut self, candidate: &str) -> Option<FuzzyMatch> {
        self.haystack_buf.clear();
        self.needle_buf.clear();
        self.indices.clear();

        let haystack = Utf32Str::new(candidate, &mut self.haystack_buf);
        let needle = Utf32Str::new(&self.needle, &mut self.needle_buf);
        let score = self.matcher.fuzzy_indices(haystack, needle, &mut self.indices)?;

        // Indices may come back unsorted or repeated
        self.indices.sort_unstable();
        self.indices.dedup();
        if self.indices.len() > self.capacity {
            return None;
        }

        let mut offsets = [0usize; MAX_MATCHES];
        let mut wanted = self.indices.iter().peekable();
        let mut len = 0;
        for (char_index, (byte_offset, _)) in candidate.char_indices().enumerate() {
            match wanted.peek() {
                Some(&&index) if index as usize == char_index => {
                    offsets[len] = byte_offset;
                    len += 1;
                    wanted.next();
                }
                Some(_) => {}
                None => break,
            }
        }

        Some(FuzzyMatch {
            score: i32::from(score),
            positions: MatchPositions::from_slice(&offsets[..len])?,
        })
    }
}
