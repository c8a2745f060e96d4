//! Fuzzy subsequence matcher with highlight positions
//!
//! The pattern matches when all of its bytes appear in the candidate in the
//! same order (ASCII case-insensitive). Among all such alignments the matcher
//! keeps the best scoring one, probing alternatives with a bounded recursion.
//!
//! Scoring starts at 100 and then rewards:
//! - consecutive matches (`+15` each)
//! - matches right after a separator (space, `_`, `-`) or on a camel-case hump (`+30`)
//! - a match on the very first byte (`+15`)
//!
//! and penalizes:
//! - bytes before the first match (`-5` each, capped at `-15`)
//! - every candidate byte that is not matched (`-1` each)

use std::fmt;
use std::ops::Range;

/// Upper bound on the number of matched positions a single match records
pub const MAX_MATCHES: usize = 32;

/// Total number of alignments probed per match call
const RECURSION_LIMIT: usize = 10;

const BASE_SCORE: i32 = 100;
const SEQUENTIAL_BONUS: i32 = 15;
const SEPARATOR_BONUS: i32 = 30;
const CAMEL_BONUS: i32 = 30;
const FIRST_LETTER_BONUS: i32 = 15;
const LEADING_LETTER_PENALTY: i32 = -5;
const MAX_LEADING_LETTER_PENALTY: i32 = -15;
const UNMATCHED_LETTER_PENALTY: i32 = -1;

/// Fixed-capacity, strictly increasing list of byte offsets into a candidate
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct MatchPositions {
    len: usize,
    offsets: [usize; MAX_MATCHES],
}

impl MatchPositions {
    /// An empty position list (used for rows shown without a search)
    pub const fn new() -> Self {
        Self {
            len: 0,
            offsets: [0; MAX_MATCHES],
        }
    }

    /// Build from a sorted slice, `None` if it does not fit
    pub fn from_slice(offsets: &[usize]) -> Option<Self> {
        if offsets.len() > MAX_MATCHES {
            return None;
        }
        let mut positions = Self::new();
        positions.offsets[..offsets.len()].copy_from_slice(offsets);
        positions.len = offsets.len();
        Some(positions)
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.offsets[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.as_slice().binary_search(&offset).is_ok()
    }

    /// Collapse the positions into contiguous byte ranges
    ///
    /// `[0, 1, 2, 5]` becomes `0..3, 5..6`, which is what a renderer needs to
    /// draw highlighted runs without splitting per byte.
    pub fn ranges(&self) -> Vec<Range<usize>> {
        let mut ranges: Vec<Range<usize>> = Vec::new();
        for &offset in self.as_slice() {
            match ranges.last_mut() {
                Some(last) if last.end == offset => last.end += 1,
                _ => ranges.push(offset..offset + 1),
            }
        }
        ranges
    }
}

impl Default for MatchPositions {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MatchPositions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<'a> IntoIterator for &'a MatchPositions {
    type Item = &'a usize;
    type IntoIter = std::slice::Iter<'a, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

/// A successful match: its score and the matched byte offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuzzyMatch {
    pub score: i32,
    pub positions: MatchPositions,
}

/// Match `pattern` against `candidate` recording up to [`MAX_MATCHES`] positions
pub fn fuzzy_match(pattern: &str, candidate: &str) -> Option<FuzzyMatch> {
    fuzzy_match_with_capacity(pattern, candidate, MAX_MATCHES)
}

/// Match with an explicit position capacity
///
/// A pattern longer than `capacity` is rejected instead of being truncated,
/// since highlighting assumes every pattern byte has a recorded position.
/// Capacities above [`MAX_MATCHES`] are clamped. An empty pattern never
/// matches.
pub fn fuzzy_match_with_capacity(
    pattern: &str,
    candidate: &str,
    capacity: usize,
) -> Option<FuzzyMatch> {
    let capacity = capacity.min(MAX_MATCHES);
    let pattern = pattern.as_bytes();
    if pattern.len() > capacity {
        return None;
    }

    let mut search = AlignmentSearch {
        pattern,
        candidate: candidate.as_bytes(),
        capacity,
        probes: 0,
    };
    let mut offsets = [0; MAX_MATCHES];
    let score = search.best_alignment(0, 0, None, &mut offsets, 0)?;

    Some(FuzzyMatch {
        score,
        positions: MatchPositions {
            len: pattern.len(),
            offsets,
        },
    })
}

struct AlignmentSearch<'a> {
    pattern: &'a [u8],
    candidate: &'a [u8],
    capacity: usize,
    probes: usize,
}

impl AlignmentSearch<'_> {
    /// Greedily align the rest of the pattern starting at `(p, s)`, probing
    /// for each matched byte whether matching it later scores better.
    ///
    /// `prefix` holds the positions already fixed by the caller; on success
    /// `matches` holds the complete winning alignment.
    fn best_alignment(
        &mut self,
        mut p: usize,
        mut s: usize,
        prefix: Option<&[usize]>,
        matches: &mut [usize; MAX_MATCHES],
        mut next: usize,
    ) -> Option<i32> {
        self.probes += 1;
        if self.probes >= RECURSION_LIMIT {
            return None;
        }
        if p == self.pattern.len() || s == self.candidate.len() {
            return None;
        }

        let mut best: Option<(i32, [usize; MAX_MATCHES])> = None;
        let mut prefix_copied = false;

        while p < self.pattern.len() && s < self.candidate.len() {
            if self.pattern[p].eq_ignore_ascii_case(&self.candidate[s]) {
                if next >= self.capacity {
                    return None;
                }
                if !prefix_copied {
                    if let Some(prefix) = prefix {
                        matches[..next].copy_from_slice(&prefix[..next]);
                    }
                    prefix_copied = true;
                }

                let mut alternative = [0; MAX_MATCHES];
                if let Some(score) =
                    self.best_alignment(p, s + 1, Some(&matches[..next]), &mut alternative, next)
                {
                    if best.map_or(true, |(best_score, _)| score > best_score) {
                        best = Some((score, alternative));
                    }
                }

                matches[next] = s;
                next += 1;
                p += 1;
            }
            s += 1;
        }

        let greedy = (p == self.pattern.len()).then(|| self.score(&matches[..next]));

        match (best, greedy) {
            (Some((best_score, alternative)), Some(score)) if best_score > score => {
                *matches = alternative;
                Some(best_score)
            }
            (Some((best_score, alternative)), None) => {
                *matches = alternative;
                Some(best_score)
            }
            (_, greedy) => greedy,
        }
    }

    fn score(&self, matches: &[usize]) -> i32 {
        let mut score = BASE_SCORE;

        let leading = i32::try_from(matches[0]).unwrap_or(i32::MAX);
        score += LEADING_LETTER_PENALTY
            .saturating_mul(leading)
            .max(MAX_LEADING_LETTER_PENALTY);

        let unmatched = i32::try_from(self.candidate.len() - matches.len()).unwrap_or(i32::MAX);
        score = score.saturating_add(UNMATCHED_LETTER_PENALTY.saturating_mul(unmatched));

        for (i, &current) in matches.iter().enumerate() {
            if i > 0 && current == matches[i - 1] + 1 {
                score += SEQUENTIAL_BONUS;
            }

            if current == 0 {
                score += FIRST_LETTER_BONUS;
                continue;
            }

            let neighbor = self.candidate[current - 1];
            let byte = self.candidate[current];
            if neighbor.is_ascii_lowercase() && byte.is_ascii_uppercase() {
                score += CAMEL_BONUS;
            }
            if matches!(neighbor, b' ' | b'_' | b'-') {
                score += SEPARATOR_BONUS;
            }
        }

        score
    }
}
