//! Pattern × parameters → path, for outgoing links
//!
//! Generation is permissive on purpose: it never fails. A missing required parameter
//! degrades the whole link to `/`, while optional and catch-all values simply drop out.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::route::{Pattern, Segment};

/// Read access to parameter values by name
///
/// For catch-all segments the value is the raw, slash-joined string (`"a/b/c"`).
pub trait ParamLookup {
    fn lookup(&self, name: &str) -> Option<&str>;
}

impl<S: BuildHasher> ParamLookup for HashMap<String, String, S> {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl<'a, S: BuildHasher> ParamLookup for HashMap<&'a str, &'a str, S> {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name).copied()
    }
}

impl ParamLookup for BTreeMap<String, String> {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl<'a> ParamLookup for [(&'a str, &'a str)] {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.iter().find(|(key, _)| *key == name).map(|(_, value)| *value)
    }
}

impl<'a, const N: usize> ParamLookup for [(&'a str, &'a str); N] {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.as_slice().lookup(name)
    }
}

impl<T: ParamLookup + ?Sized> ParamLookup for &T {
    fn lookup(&self, name: &str) -> Option<&str> {
        (**self).lookup(name)
    }
}

/// Renders `pattern` into a concrete path
///
/// - **Static**: emitted verbatim
/// - **Param**: percent-encoded; missing or empty aborts generation and yields `/`
/// - **Optional**: percent-encoded when present and non-empty, otherwise dropped
/// - **CatchAll**: split on `/`, empty pieces dropped, each piece percent-encoded
///
/// # Examples
///
/// ```
/// use silcrow_router::{generate, Pattern};
///
/// let pattern = Pattern::parse("users/[id]/[[tab]]").unwrap();
///
/// assert_eq!(generate(&pattern, &[("id", "42")]), "/users/42");
/// assert_eq!(generate(&pattern, &[("id", "42"), ("tab", "posts")]), "/users/42/posts");
/// assert_eq!(generate(&pattern, &[("tab", "posts")]), "/");
///
/// let docs = Pattern::parse("docs/[...rest]").unwrap();
/// assert_eq!(generate(&docs, &[("rest", "/guide//intro/")]), "/docs/guide/intro");
/// ```
pub fn generate<P: ParamLookup + ?Sized>(pattern: &Pattern, params: &P) -> String {
    let mut pieces: Vec<Cow<'_, str>> = Vec::with_capacity(pattern.len());

    for segment in pattern.segments() {
        match segment {
            Segment::Static(literal) => pieces.push(Cow::Borrowed(literal.as_str())),
            Segment::Param(name) => match non_empty(params.lookup(name)) {
                Some(value) => pieces.push(urlencoding::encode(value)),
                None => {
                    tracing::debug!(
                        "Missing required param `{}` for {}, falling back to /",
                        name,
                        pattern
                    );
                    return "/".to_string();
                }
            },
            Segment::Optional(name) => {
                if let Some(value) = non_empty(params.lookup(name)) {
                    pieces.push(urlencoding::encode(value));
                }
            }
            Segment::CatchAll(name) => {
                if let Some(value) = non_empty(params.lookup(name)) {
                    pieces.extend(
                        value
                            .split('/')
                            .filter(|piece| !piece.is_empty())
                            .map(urlencoding::encode),
                    );
                }
            }
        }
    }

    if pieces.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", pieces.join("/"))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
