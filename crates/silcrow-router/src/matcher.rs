//! Pattern × path-pieces matching
//!
//! Strict by construction: a path either fits the pattern exactly or produces `None`.
//! Pieces are expected to be already split and percent-decoded
//! (see [`crate::path::decode_pieces`]).

use std::collections::HashMap;

use crate::route::{Pattern, Segment};

/// Values bound by a successful match
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    /// `[param]` and `[[optional]]` values; an optional that matched nothing is absent
    pub params: HashMap<String, String>,
    /// `[...catchAll]` values in path order, possibly empty
    pub catch_all: HashMap<String, Vec<String>>,
}

/// Matches `pieces` against `pattern`
///
/// Walks the pattern left to right:
/// - **Static** needs a piece equal to its literal
/// - **Param** needs a piece and binds it
/// - **Optional** binds the next piece when the rest of the pattern can still accept the
///   rest of the path, otherwise binds nothing
/// - **CatchAll** (always final) absorbs every remaining piece, zero or more
///
/// Leftover pieces mean no match; the root pattern only matches an empty path.
///
/// # Examples
///
/// ```
/// use silcrow_router::{match_pattern, Pattern};
///
/// let pattern = Pattern::parse("[[lang]]/about").unwrap();
///
/// let m = match_pattern(&pattern, &["about"]).unwrap();
/// assert_eq!(m.params.get("lang"), None);
///
/// let m = match_pattern(&pattern, &["en", "about"]).unwrap();
/// assert_eq!(m.params.get("lang"), Some(&"en".to_string()));
///
/// assert!(match_pattern(&pattern, &["en", "fr", "about"]).is_none());
/// ```
///
/// # Round trips
///
/// Optionals fill left first, so a path generated with an earlier optional left out can
/// rebind its value to that earlier optional: `[[a]]/[[b]]` generated with only `b = "x"`
/// renders `/x`, which matches back as `a = "x"`. The same holds for `[[lang]]/[...rest]`
/// with `lang` absent. Round trips are exact whenever every optional before the last
/// supplied value is also supplied.
///
/// # Performance
///
/// - O(|pattern| + |pieces|) for patterns without optional segments
/// - O(|pattern| · |pieces|) otherwise (one feasibility table, no backtracking)
/// - paths longer than a pattern without a catch-all are rejected before any table is built
pub fn match_pattern<S: AsRef<str>>(pattern: &Pattern, pieces: &[S]) -> Option<Bindings> {
    let segments = pattern.segments();

    let open_ended = matches!(segments.last(), Some(Segment::CatchAll(_)));
    if !open_ended && pieces.len() > segments.len() {
        return None;
    }

    let tail = if pattern.has_optional() {
        let table = TailTable::new(segments, pieces);
        if !table.accepts(0, 0) {
            return None;
        }
        Some(table)
    } else {
        None
    };

    let mut bindings = Bindings::default();
    let mut cursor = 0;

    for (idx, segment) in segments.iter().enumerate() {
        match segment {
            Segment::Static(literal) => {
                let piece = pieces.get(cursor)?;
                if piece.as_ref() != literal.as_str() {
                    return None;
                }
                cursor += 1;
            }
            Segment::Param(name) => {
                let piece = pieces.get(cursor)?;
                bindings
                    .params
                    .insert(name.clone(), piece.as_ref().to_string());
                cursor += 1;
            }
            Segment::Optional(name) => {
                let consume = cursor < pieces.len()
                    && tail
                        .as_ref()
                        .map_or(true, |table| table.accepts(idx + 1, cursor + 1));
                if consume {
                    bindings
                        .params
                        .insert(name.clone(), pieces[cursor].as_ref().to_string());
                    cursor += 1;
                } else if cursor == pieces.len() && !pattern.can_match_empty_from(idx + 1) {
                    return None;
                }
            }
            Segment::CatchAll(name) => {
                let rest = pieces[cursor..]
                    .iter()
                    .map(|piece| piece.as_ref().to_string())
                    .collect();
                bindings.catch_all.insert(name.clone(), rest);
                cursor = pieces.len();
            }
        }
    }

    (cursor == pieces.len()).then_some(bindings)
}

/// `accepts(i, j)`: can `segments[i..]` match exactly `pieces[j..]`?
///
/// Filled bottom-up so the forward pass can decide every optional segment locally.
struct TailTable {
    width: usize,
    cells: Vec<bool>,
}

impl TailTable {
    fn new<S: AsRef<str>>(segments: &[Segment], pieces: &[S]) -> Self {
        let n = segments.len();
        let m = pieces.len();
        let width = m + 1;
        let mut cells = vec![false; (n + 1) * width];

        cells[n * width + m] = true;

        for i in (0..n).rev() {
            for j in (0..=m).rev() {
                let next = |jj: usize| cells[(i + 1) * width + jj];
                let has_piece = j < m;
                let ok = match &segments[i] {
                    Segment::Static(literal) => {
                        has_piece && pieces[j].as_ref() == literal.as_str() && next(j + 1)
                    }
                    Segment::Param(_) => has_piece && next(j + 1),
                    Segment::Optional(_) => next(j) || (has_piece && next(j + 1)),
                    // Stop absorbing here, or absorb one piece and stay
                    Segment::CatchAll(_) => next(j) || (has_piece && cells[i * width + j + 1]),
                };
                cells[i * width + j] = ok;
            }
        }

        TailTable { width, cells }
    }

    fn accepts(&self, segment: usize, piece: usize) -> bool {
        self.cells[segment * self.width + piece]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pattern(source: &str) -> Pattern {
        Pattern::parse(source).unwrap()
    }

    fn matches(source: &str, pieces: &[&str]) -> Option<Bindings> {
        match_pattern(&pattern(source), pieces)
    }

    #[test]
    fn test_static_match() {
        assert!(matches("about", &["about"]).is_some());
        assert!(matches("about", &["other"]).is_none());
        assert!(matches("about", &["About"]).is_none());
        assert!(matches("about", &[]).is_none());
        assert!(matches("about", &["about", "extra"]).is_none());
    }

    #[test]
    fn test_param_binds_piece() {
        let m = matches("users/[id]", &["users", "123"]).unwrap();
        assert_eq!(m.params.get("id"), Some(&"123".to_string()));
        assert!(matches("users/[id]", &["users"]).is_none());
    }

    #[test]
    fn test_root_matches_only_empty_path() {
        let m = matches("", &[]).unwrap();
        assert!(m.params.is_empty());
        assert!(matches("", &["a"]).is_none());
    }

    #[test]
    fn test_optional_trailing() {
        let m = matches("posts/[[page]]", &["posts"]).unwrap();
        assert_eq!(m.params.get("page"), None);

        let m = matches("posts/[[page]]", &["posts", "2"]).unwrap();
        assert_eq!(m.params.get("page"), Some(&"2".to_string()));

        assert!(matches("posts/[[page]]", &["posts", "2", "3"]).is_none());
    }

    #[test]
    fn test_optional_leading() {
        assert!(matches("[[lang]]/about", &["about"]).is_some());
        let m = matches("[[lang]]/about", &["en", "about"]).unwrap();
        assert_eq!(m.params.get("lang"), Some(&"en".to_string()));
        assert!(matches("[[lang]]/about", &["en", "fr", "about"]).is_none());
    }

    #[test]
    fn test_optional_without_piece_needs_empty_tail() {
        assert!(matches("[[a]]/[id]", &[]).is_none());
        assert!(matches("[[a]]/[[b]]", &[]).is_some());
        assert!(matches("[[a]]/[...rest]", &[]).is_some());
    }

    #[test]
    fn test_consecutive_optionals_fill_left_first() {
        let m = matches("[[a]]/[[b]]/x", &["1", "x"]).unwrap();
        assert_eq!(m.params.get("a"), Some(&"1".to_string()));
        assert_eq!(m.params.get("b"), None);

        let m = matches("[[a]]/[[b]]/x", &["1", "2", "x"]).unwrap();
        assert_eq!(m.params.get("a"), Some(&"1".to_string()));
        assert_eq!(m.params.get("b"), Some(&"2".to_string()));
    }

    #[test]
    fn test_optional_yields_to_later_static() {
        // Consuming `x` for `a` would leave nothing for the literal
        let m = matches("[[a]]/x/[[b]]", &["x", "y"]).unwrap();
        assert_eq!(m.params.get("a"), None);
        assert_eq!(m.params.get("b"), Some(&"y".to_string()));
    }

    #[test]
    fn test_catch_all_absorbs_zero_or_more() {
        let m = matches("docs/[...rest]", &["docs"]).unwrap();
        assert_eq!(m.catch_all.get("rest"), Some(&Vec::<String>::new()));

        let m = matches("docs/[...rest]", &["docs", "guide", "intro"]).unwrap();
        assert_eq!(
            m.catch_all.get("rest"),
            Some(&vec!["guide".to_string(), "intro".to_string()])
        );

        assert!(matches("docs/[...rest]", &["blog", "x"]).is_none());
    }

    #[test]
    fn test_optional_before_catch_all_consumes() {
        let m = matches("[[lang]]/[...rest]", &["en", "a", "b"]).unwrap();
        assert_eq!(m.params.get("lang"), Some(&"en".to_string()));
        assert_eq!(m.catch_all["rest"], vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_long_path_rejected_without_catch_all() {
        let pieces: Vec<String> = (0..10_000).map(|i| i.to_string()).collect();
        assert!(match_pattern(&pattern("[[a]]/[[b]]/x"), &pieces).is_none());

        let m = match_pattern(&pattern("[[a]]/[...rest]"), &pieces).unwrap();
        assert_eq!(m.params["a"], "0");
        assert_eq!(m.catch_all["rest"].len(), 9_999);
    }

    #[test]
    fn test_later_optional_value_rebinds_to_earlier_optional() {
        let p = pattern("[[a]]/[[b]]");
        let path = crate::generate::generate(&p, &[("b", "x")]);
        assert_eq!(path, "/x");

        let m = match_pattern(&p, &crate::path::split_path(&path)).unwrap();
        assert_eq!(m.params.get("a"), Some(&"x".to_string()));
        assert_eq!(m.params.get("b"), None);
    }

    #[test]
    fn test_pieces_may_be_owned_strings() {
        let pieces = vec!["users".to_string(), "42".to_string()];
        let m = match_pattern(&pattern("users/[id]"), &pieces).unwrap();
        assert_eq!(m.params["id"], "42");
    }
}
