//! Optional / catch-all overlap detection
//!
//! Two patterns overlap when at least one concrete path is accepted by both. Each pattern
//! is a small automaton over path pieces, so the question is whether their product can
//! reach the joint final state `(|A|, |B|)`.
//!
//! Moves from a state `(i, j)`:
//! - skip an `Optional` on either side without consuming a piece
//! - stop a `CatchAll` on either side without consuming a piece
//! - consume one piece jointly when both segments accept some common piece; a `CatchAll`
//!   that absorbs the piece stays where it is
//!
//! A catch-all in final position accepts every remaining suffix, and every pattern accepts
//! at least one suffix, so reaching one ends the search.

use std::collections::{HashSet, VecDeque};

use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::route::pattern::tail_matches_empty;
use crate::route::{Pattern, Segment};
use crate::table::RouteEntry;

/// Whether some concrete path is accepted by both patterns
///
/// Exact, and therefore symmetric.
///
/// # Examples
///
/// ```
/// use silcrow_router::{patterns_overlap, Pattern};
///
/// let catch_all = Pattern::parse("a/[...rest]").unwrap();
/// let specific = Pattern::parse("a/b/[id]").unwrap();
/// assert!(patterns_overlap(&catch_all, &specific));
/// assert!(patterns_overlap(&specific, &catch_all));
///
/// let other = Pattern::parse("b/[[page]]").unwrap();
/// assert!(!patterns_overlap(&catch_all, &other));
/// ```
pub fn patterns_overlap(a: &Pattern, b: &Pattern) -> bool {
    overlap_witness(a, b).is_some()
}

/// A sample path accepted by both patterns, if any
///
/// # Examples
///
/// ```
/// use silcrow_router::{analyze::overlap_witness, Pattern};
///
/// let a = Pattern::parse("a/[...rest]").unwrap();
/// let b = Pattern::parse("a/b/[id]").unwrap();
/// assert_eq!(overlap_witness(&a, &b).as_deref(), Some("/a/b/id"));
/// ```
pub fn overlap_witness(a: &Pattern, b: &Pattern) -> Option<String> {
    Product::new(a.segments(), b.segments())
        .search()
        .map(|pieces| format!("/{}", pieces.join("/")))
}

/// Flags every pair of entries whose patterns overlap
///
/// Only pairs where at least one pattern has an optional or catch-all segment are checked;
/// two patterns made of statics and params overlap only when they share a route id, which
/// table construction already rejects.
pub fn detect_overlaps<H>(entries: &[RouteEntry<H>]) -> Vec<Diagnostic> {
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut diagnostics = Vec::new();

    for (idx, first) in entries.iter().enumerate() {
        for second in &entries[idx + 1..] {
            if !first.pattern.has_optional_or_catch_all()
                && !second.pattern.has_optional_or_catch_all()
            {
                continue;
            }

            let key = if first.id <= second.id {
                (first.id.as_str(), second.id.as_str())
            } else {
                (second.id.as_str(), first.id.as_str())
            };
            if !seen.insert(key) {
                continue;
            }

            if let Some(witness) = overlap_witness(&first.pattern, &second.pattern) {
                diagnostics.push(Diagnostic::warning(
                    DiagnosticKind::OverlapConflict,
                    format!(
                        "Potential optional/catch-all overlap between {} ({}) and {} ({}): both accept {}. \
                         Use a more specific static prefix or remove optional/catch-all overlap if this is unintended.",
                        first.source, first.id, second.source, second.id, witness
                    ),
                    vec![first.id.clone(), second.id.clone()],
                    vec![first.source.clone(), second.source.clone()],
                ));
            }
        }
    }

    diagnostics
}

/// Last move into a state, kept to rebuild the witness path
#[derive(Clone, Copy)]
struct Step<'a> {
    from: usize,
    piece: Option<&'a str>,
}

struct Product<'a> {
    a: &'a [Segment],
    b: &'a [Segment],
    width: usize,
}

impl<'a> Product<'a> {
    fn new(a: &'a [Segment], b: &'a [Segment]) -> Self {
        Product {
            a,
            b,
            width: b.len() + 1,
        }
    }

    fn index(&self, i: usize, j: usize) -> usize {
        i * self.width + j
    }

    fn position(&self, state: usize) -> (usize, usize) {
        (state / self.width, state % self.width)
    }

    /// Breadth-first search over `(i, j)`; returns the pieces of a common path
    fn search(&self) -> Option<Vec<&'a str>> {
        let (n, m) = (self.a.len(), self.b.len());
        let mut visited = vec![false; (n + 1) * self.width];
        let mut parent: Vec<Option<Step<'a>>> = vec![None; (n + 1) * self.width];
        let mut queue = VecDeque::new();

        let start = self.index(0, 0);
        visited[start] = true;
        queue.push_back(start);

        while let Some(state) = queue.pop_front() {
            let (i, j) = self.position(state);

            if i == n && j == m {
                return Some(self.trace(&parent, state, Vec::new()));
            }
            if (i == n && tail_matches_empty(self.b, j)) || (j == m && tail_matches_empty(self.a, i)) {
                return Some(self.trace(&parent, state, Vec::new()));
            }
            if is_final_catch_all(self.a, i) {
                return Some(self.trace(&parent, state, sample_tail(self.b, j)));
            }
            if is_final_catch_all(self.b, j) {
                return Some(self.trace(&parent, state, sample_tail(self.a, i)));
            }

            let mut moves: Vec<(usize, usize, Option<&'a str>)> = Vec::with_capacity(3);

            if i < n && skippable(&self.a[i]) {
                moves.push((i + 1, j, None));
            }
            if j < m && skippable(&self.b[j]) {
                moves.push((i, j + 1, None));
            }
            if i < n && j < m {
                if let Some(piece) = common_piece(&self.a[i], &self.b[j]) {
                    moves.push((advance(self.a, i), advance(self.b, j), Some(piece)));
                }
            }

            for (ni, nj, piece) in moves {
                let next = self.index(ni, nj);
                if visited[next] {
                    continue;
                }
                visited[next] = true;
                parent[next] = Some(Step { from: state, piece });
                queue.push_back(next);
            }
        }

        None
    }

    fn trace(
        &self,
        parent: &[Option<Step<'a>>],
        mut state: usize,
        tail: Vec<&'a str>,
    ) -> Vec<&'a str> {
        let mut pieces = Vec::new();
        while let Some(step) = parent[state] {
            if let Some(piece) = step.piece {
                pieces.push(piece);
            }
            state = step.from;
        }
        pieces.reverse();
        pieces.extend(tail);
        pieces
    }
}

/// Segments that may be passed over without consuming a piece
fn skippable(segment: &Segment) -> bool {
    matches!(segment, Segment::Optional(_) | Segment::CatchAll(_))
}

fn advance(segments: &[Segment], idx: usize) -> usize {
    match segments[idx] {
        Segment::CatchAll(_) => idx,
        _ => idx + 1,
    }
}

fn is_final_catch_all(segments: &[Segment], idx: usize) -> bool {
    idx + 1 == segments.len() && matches!(segments[idx], Segment::CatchAll(_))
}

/// A piece both segments accept, if their piece sets intersect
fn common_piece<'a>(a: &'a Segment, b: &'a Segment) -> Option<&'a str> {
    match (a, b) {
        (Segment::Static(x), Segment::Static(y)) => (x == y).then_some(x.as_str()),
        (Segment::Static(literal), _) | (_, Segment::Static(literal)) => Some(literal.as_str()),
        (dynamic, _) => dynamic.name(),
    }
}

/// Shortest pieces accepted by `segments[from..]`
fn sample_tail(segments: &[Segment], from: usize) -> Vec<&str> {
    segments[from..]
        .iter()
        .filter_map(|segment| match segment {
            Segment::Static(literal) => Some(literal.as_str()),
            Segment::Param(name) => Some(name.as_str()),
            Segment::Optional(_) | Segment::CatchAll(_) => None,
        })
        .collect()
}
