//! Route patterns: ordered, validated segment sequences
//!
//! Pure functional parsers that transform segment tokens and file paths into [`Pattern`]s,
//! plus the derived values the rest of the crate keys on (route id, signature, precedence).

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::segment::{parse_segment, Segment};
use crate::RouteError;

/// Immutable ordered sequence of [`Segment`]s
///
/// Construction validates two invariants:
/// - a catch-all may only be the final segment
/// - parameter names are unique within the pattern
///
/// # Examples
///
/// ```
/// use silcrow_router::Pattern;
///
/// let pattern = Pattern::parse("users/[id]/[[tab]]").unwrap();
/// assert_eq!(pattern.route_id(), "/users/:id/:tab?");
/// assert_eq!(pattern.signature(), "static:users/param/optional");
///
/// assert_eq!(Pattern::root().route_id(), "/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Segment>", into = "Vec<Segment>")]
pub struct Pattern {
    segments: Vec<Segment>,
}

impl Pattern {
    /// Builds a pattern from already-parsed segments
    pub fn new(segments: Vec<Segment>) -> Result<Self, RouteError> {
        let rendered = || {
            segments
                .iter()
                .map(Segment::to_token)
                .collect::<Vec<_>>()
                .join("/")
        };

        let last = segments.len().saturating_sub(1);
        if let Some((_, seg)) = segments
            .iter()
            .enumerate()
            .find(|(idx, seg)| matches!(seg, Segment::CatchAll(_)) && *idx != last)
        {
            return Err(RouteError::CatchAllNotFinal {
                name: seg.name().unwrap_or_default().to_string(),
                pattern: rendered(),
            });
        }

        let mut seen = HashSet::new();
        if let Some(name) = segments
            .iter()
            .filter_map(Segment::name)
            .find(|name| !seen.insert(*name))
        {
            return Err(RouteError::DuplicateParamName {
                name: name.to_string(),
                pattern: rendered(),
            });
        }

        Ok(Pattern { segments })
    }

    /// The empty pattern; matches only `/`
    pub fn root() -> Self {
        Pattern::default()
    }

    /// Parses a slash-separated token string such as `users/[id]`
    ///
    /// Empty pieces (leading, trailing or doubled slashes) are ignored.
    pub fn parse(source: &str) -> Result<Self, RouteError> {
        Self::from_tokens(source.split('/').filter(|s| !s.is_empty()))
    }

    /// Parses an ordered list of segment tokens
    pub fn from_tokens<I, S>(tokens: I) -> Result<Self, RouteError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let segments = tokens
            .into_iter()
            .map(|token| parse_segment(token.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(segments)
    }

    /// Derives the pattern for a route file
    ///
    /// Converts file paths like `routes/users/[id].purs` into the pattern `users/[id]`:
    /// - strips `routes_root` and the file extension
    /// - normalizes backslashes
    /// - drops a trailing `index` component
    ///
    /// # Examples
    ///
    /// ```
    /// use silcrow_router::Pattern;
    ///
    /// let pattern = Pattern::from_file_path("routes/users/[id].purs", "routes").unwrap();
    /// assert_eq!(pattern.route_id(), "/users/:id");
    ///
    /// let pattern = Pattern::from_file_path("routes/blog/index.purs", "routes").unwrap();
    /// assert_eq!(pattern.route_id(), "/blog");
    /// ```
    pub fn from_file_path(file_path: &str, routes_root: &str) -> Result<Self, RouteError> {
        Self::from_tokens(file_path_tokens(file_path, routes_root))
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Whether this is the root pattern `/`
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Canonical route id: `/literal/:param/:optional?/*catchAll`, root renders as `/`
    pub fn route_id(&self) -> String {
        if self.segments.is_empty() {
            return "/".to_string();
        }
        self.segments
            .iter()
            .map(|seg| format!("/{}", seg.route_id_part()))
            .collect()
    }

    /// Structural signature: static literals kept, dynamic segments reduced to their kind
    ///
    /// Two patterns differing only in parameter names share a signature.
    pub fn signature(&self) -> String {
        self.segments
            .iter()
            .map(Segment::signature_part)
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Number of leading static segments (match precedence)
    pub fn static_prefix_len(&self) -> usize {
        self.segments.iter().take_while(|seg| seg.is_static()).count()
    }

    pub fn has_dynamic(&self) -> bool {
        self.segments.iter().any(Segment::is_dynamic)
    }

    pub fn has_optional_or_catch_all(&self) -> bool {
        self.segments
            .iter()
            .any(|seg| matches!(seg, Segment::Optional(_) | Segment::CatchAll(_)))
    }

    pub fn has_optional(&self) -> bool {
        self.segments
            .iter()
            .any(|seg| matches!(seg, Segment::Optional(_)))
    }

    /// Parameter names in declaration order
    pub fn param_names(&self) -> Vec<&str> {
        self.segments.iter().filter_map(Segment::name).collect()
    }

    /// Whether `segments[from..]` can all match an empty tail
    ///
    /// True when every remaining segment is optional, or a catch-all in final position.
    pub fn can_match_empty_from(&self, from: usize) -> bool {
        tail_matches_empty(&self.segments, from)
    }
}

/// Shared by the matcher and the overlap detector
pub(crate) fn tail_matches_empty(segments: &[Segment], from: usize) -> bool {
    let last = segments.len().saturating_sub(1);
    segments
        .iter()
        .enumerate()
        .skip(from)
        .all(|(idx, seg)| match seg {
            Segment::Optional(_) => true,
            Segment::CatchAll(_) => idx == last,
            Segment::Static(_) | Segment::Param(_) => false,
        })
}

/// Segment tokens for a route file, relative to `routes_root`
pub(crate) fn file_path_tokens(file_path: &str, routes_root: &str) -> Vec<String> {
    let normalized = file_path.replace('\\', "/");
    let root = routes_root.replace('\\', "/");
    let relative = normalized
        .strip_prefix(root.trim_end_matches('/'))
        .unwrap_or(normalized.as_str())
        .trim_start_matches('/');

    let mut components: Vec<&str> = relative.split('/').filter(|s| !s.is_empty()).collect();
    if let Some(last) = components.last_mut() {
        *last = strip_extension(*last);
    }
    if components.last() == Some(&"index") {
        components.pop();
    }

    components.into_iter().map(str::to_string).collect()
}

/// Strips a trailing `.ext` when the extension is a plain alphanumeric word
fn strip_extension(component: &str) -> &str {
    match component.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty()
                && !ext.is_empty()
                && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            stem
        }
        _ => component,
    }
}

impl TryFrom<Vec<Segment>> for Pattern {
    type Error = RouteError;

    fn try_from(segments: Vec<Segment>) -> Result<Self, Self::Error> {
        Pattern::new(segments)
    }
}

impl From<Pattern> for Vec<Segment> {
    fn from(pattern: Pattern) -> Self {
        pattern.segments
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.route_id())
    }
}
