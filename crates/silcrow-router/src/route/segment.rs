//! Segment tokens for file-based route patterns
//!
//! Pure functional parsing of segment tokens into the closed [`Segment`] sum type.
//! All functions are **pure**: same input → same output, no side effects.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use crate::RouteError;

// Parameter names: identifier charset only
static NAME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").unwrap());

// Literals: text that still equals itself after a path piece is percent-decoded
static LITERAL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^/\\\[\]?#%\s\p{Cc}]+$").unwrap());

/// One slash-delimited component of a route pattern
///
/// Functional sum type: every consumer (matcher, generator, analyzer) handles all
/// four variants exhaustively.
///
/// # Examples
///
/// ```
/// use silcrow_router::{parse_segment, Segment};
///
/// assert_eq!(parse_segment("about").unwrap(), Segment::Static("about".into()));
/// assert_eq!(parse_segment("[id]").unwrap(), Segment::Param("id".into()));
/// assert_eq!(parse_segment("[[lang]]").unwrap(), Segment::Optional("lang".into()));
/// assert_eq!(parse_segment("[...rest]").unwrap(), Segment::CatchAll("rest".into()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Segment {
    /// Matches exactly one literal path piece
    Static(String),
    /// `[name]`: exactly one arbitrary piece
    Param(String),
    /// `[[name]]`: zero or one piece
    Optional(String),
    /// `[...name]`: zero or more trailing pieces
    CatchAll(String),
}

/// Unvalidated descriptor shape, checked on the way into [`Segment`]
#[derive(Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
enum RawSegment {
    Static(String),
    Param(String),
    Optional(String),
    CatchAll(String),
}

impl TryFrom<RawSegment> for Segment {
    type Error = RouteError;

    fn try_from(raw: RawSegment) -> Result<Self, Self::Error> {
        match raw {
            RawSegment::Static(literal) => validate_literal(&literal).map(Segment::Static),
            RawSegment::Param(name) => validate_name(&name, &name).map(Segment::Param),
            RawSegment::Optional(name) => validate_name(&name, &name).map(Segment::Optional),
            RawSegment::CatchAll(name) => validate_name(&name, &name).map(Segment::CatchAll),
        }
    }
}

impl<'de> Deserialize<'de> for Segment {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawSegment::deserialize(deserializer)?;
        Segment::try_from(raw).map_err(serde::de::Error::custom)
    }
}

impl Segment {
    /// Parameter name for dynamic segments, `None` for static ones
    pub fn name(&self) -> Option<&str> {
        match self {
            Segment::Static(_) => None,
            Segment::Param(name) | Segment::Optional(name) | Segment::CatchAll(name) => Some(name),
        }
    }

    pub fn is_static(&self) -> bool {
        matches!(self, Segment::Static(_))
    }

    pub fn is_dynamic(&self) -> bool {
        !self.is_static()
    }

    /// Whether the segment alone may consume zero path pieces
    ///
    /// Position matters for catch-alls; callers check finality themselves.
    pub fn can_match_empty(&self) -> bool {
        matches!(self, Segment::Optional(_) | Segment::CatchAll(_))
    }

    /// Signature part: literal text for statics, the kind for everything else
    pub fn signature_part(&self) -> String {
        match self {
            Segment::Static(literal) => format!("static:{}", literal),
            Segment::Param(_) => "param".to_string(),
            Segment::Optional(_) => "optional".to_string(),
            Segment::CatchAll(_) => "catchAll".to_string(),
        }
    }

    /// Route id part: `literal`, `:name`, `:name?` or `*name`
    pub fn route_id_part(&self) -> String {
        match self {
            Segment::Static(literal) => literal.clone(),
            Segment::Param(name) => format!(":{}", name),
            Segment::Optional(name) => format!(":{}?", name),
            Segment::CatchAll(name) => format!("*{}", name),
        }
    }

    /// Canonical source token, the inverse of [`parse_segment`]
    pub fn to_token(&self) -> String {
        match self {
            Segment::Static(literal) => literal.clone(),
            Segment::Param(name) => format!("[{}]", name),
            Segment::Optional(name) => format!("[[{}]]", name),
            Segment::CatchAll(name) => format!("[...{}]", name),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_token())
    }
}

/// Parses a segment token (pure function)
///
/// # Parsing Rules (evaluated in order)
///
/// 1. **Optional**: `[[name]]`
/// 2. **Catch-all**: `[...name]`
/// 3. **Param**: `[name]`
/// 4. **Static**: any other text
///
/// Names must match `[A-Za-z0-9_]+`. Literals must be non-empty, free of
/// `/ \ [ ] ? # %`, whitespace and control characters, and may not start with `:` or `*`.
///
/// # Errors
///
/// [`RouteError::InvalidSegmentSyntax`] for malformed brackets, bad names or bad literals.
pub fn parse_segment(token: &str) -> Result<Segment, RouteError> {
    // Double brackets first: `[[name]]` would otherwise parse as `[` + `[name]` + `]`
    if let Some(inner) = token.strip_prefix("[[").and_then(|s| s.strip_suffix("]]")) {
        if inner.starts_with("...") {
            return Err(RouteError::invalid_segment(
                token,
                "optional catch-all is not supported; `[...name]` already matches zero pieces",
            ));
        }
        return validate_name(token, inner).map(Segment::Optional);
    }

    match token.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        Some(inner) => match inner.strip_prefix("...") {
            Some(name) => validate_name(token, name).map(Segment::CatchAll),
            None => validate_name(token, inner).map(Segment::Param),
        },
        None => validate_literal(token).map(Segment::Static),
    }
}

fn validate_name(token: &str, name: &str) -> Result<String, RouteError> {
    if name.is_empty() {
        return Err(RouteError::invalid_segment(token, "parameter name is empty"));
    }
    if !NAME_REGEX.is_match(name) {
        return Err(RouteError::invalid_segment(
            token,
            format!("parameter name `{}` must match [A-Za-z0-9_]+", name),
        ));
    }
    Ok(name.to_string())
}

fn validate_literal(literal: &str) -> Result<String, RouteError> {
    if literal.is_empty() {
        return Err(RouteError::invalid_segment(literal, "segment is empty"));
    }
    if literal == "." || literal == ".." {
        return Err(RouteError::invalid_segment(literal, "dot segments are not routable"));
    }
    if literal.contains('[') || literal.contains(']') {
        return Err(RouteError::invalid_segment(literal, "unbalanced or misplaced brackets"));
    }
    if literal.starts_with([':', '*']) {
        return Err(RouteError::invalid_segment(
            literal,
            "literal may not start with `:` or `*`; those mark parameters in route ids",
        ));
    }
    if !LITERAL_REGEX.is_match(literal) {
        return Err(RouteError::invalid_segment(
            literal,
            "literal contains a reserved character (/ \\ ? # % or whitespace)",
        ));
    }
    Ok(literal.to_string())
}
