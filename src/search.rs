//! Text searching.
//!
//! Searching is literal and case-sensitive, performed over the *rendered* form of
//! each row using the Knuth-Morris-Pratt algorithm. Every match in the document is
//! collected up front into a [`Session`], which then supports cyclic navigation
//! between matches.

use crate::document::Document;
use tracing::debug;

/// A literal pattern-matching algorithm implemented using Knuth-Morris-Pratt.
pub struct Pattern {
    pattern: Vec<u8>,

    /// Failure table, where `lps[i]` is the length of the longest proper prefix of
    /// `pattern[..=i]` that is also a suffix of it.
    lps: Vec<usize>,
}

impl Pattern {
    pub fn new(term: &[u8]) -> Pattern {
        Pattern {
            pattern: term.to_vec(),
            lps: Self::build_lps(term),
        }
    }

    fn build_lps(pattern: &[u8]) -> Vec<usize> {
        let mut lps = vec![0; pattern.len()];
        let mut n = 0;
        let mut i = 1;
        while i < pattern.len() {
            if pattern[i] == pattern[n] {
                n += 1;
                lps[i] = n;
                i += 1;
            } else if n > 0 {
                n = lps[n - 1];
            } else {
                i += 1;
            }
        }
        lps
    }

    /// Returns the starting positions of all non-overlapping matches in `text`, in
    /// ascending order.
    ///
    /// Once a match completes, scanning resumes immediately after it with no partial
    /// state carried over, so matches may be adjacent but never overlap. An empty
    /// pattern matches nothing.
    pub fn find_all(&self, text: &[u8]) -> Vec<usize> {
        let len = self.pattern.len();
        let mut found = Vec::new();
        if len > 0 {
            let mut j = 0;
            for (i, &b) in text.iter().enumerate() {
                while j > 0 && b != self.pattern[j] {
                    j = self.lps[j - 1];
                }
                if b == self.pattern[j] {
                    j += 1;
                }
                if j == len {
                    found.push(i + 1 - len);
                    j = 0;
                }
            }
        }
        found
    }
}

/// A single match in a document.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Match {
    pub row: usize,

    /// Logical column where the match begins.
    pub start: usize,

    /// Logical column just past the end of the match, which is where the cursor
    /// lands when this match is selected.
    pub col: usize,
}

/// The complete set of matches from a single search, with a notion of the current
/// match.
pub struct Session {
    matches: Vec<Match>,
    current: usize,
}

impl Session {
    pub fn empty() -> Session {
        Session {
            matches: Vec::new(),
            current: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Returns the index of the current match.
    pub fn index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<Match> {
        self.matches.get(self.current).copied()
    }

    /// Advances to the following match, wrapping to the first after the last.
    pub fn next(&mut self) -> Option<Match> {
        if !self.matches.is_empty() {
            self.current = (self.current + 1) % self.matches.len();
        }
        self.current()
    }

    /// Retreats to the preceding match, wrapping to the last before the first.
    pub fn prev(&mut self) -> Option<Match> {
        if !self.matches.is_empty() {
            self.current = if self.current == 0 {
                self.matches.len() - 1
            } else {
                self.current - 1
            };
        }
        self.current()
    }
}

/// Searches every row of `doc` for `term`, returning a session whose current match
/// is the first match in document order.
pub fn search(doc: &Document, term: &[u8]) -> Session {
    let pattern = Pattern::new(term);
    let mut matches = Vec::new();
    for row in 0..doc.rows() {
        if let Some(r) = doc.row(row) {
            for rx in pattern.find_all(r.rendered()) {
                matches.push(Match {
                    row,
                    start: doc.rx_to_cx(row, rx),
                    col: doc.rx_to_cx(row, rx + term.len()),
                });
            }
        }
    }
    debug!(term_len = term.len(), matches = matches.len(), "search");
    Session {
        matches,
        current: 0,
    }
}
