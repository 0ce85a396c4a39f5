//! The route table: validated, ordered, analyzed routes
//!
//! Built once from [`RouteDeclaration`]s and read-only afterwards. Construction either
//! returns a complete table (with its advisory diagnostics) or a [`RouteError`].

use std::cmp::Reverse;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::analyze::analyze;
use crate::config::RouterConfig;
use crate::diagnostic::Diagnostic;
use crate::generate::{generate, ParamLookup};
use crate::matcher::match_pattern;
use crate::path::{decode_pieces, join_base_path, normalize_path, path_only, strip_base_path};
use crate::route::pattern::file_path_tokens;
use crate::route::Pattern;
use crate::RouteError;

// ============================================================================
// Declarations
// ============================================================================

/// A route as supplied by the caller, before validation
///
/// `handler` is opaque to the router; `source` is a provenance label (usually the route
/// file) used in errors and diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDeclaration<H> {
    /// Explicit route id; defaults to the pattern's canonical id
    #[serde(default)]
    pub id: Option<String>,
    /// Segment tokens such as `["users", "[id]"]`
    #[serde(default)]
    pub segments: Vec<String>,
    pub handler: H,
    #[serde(default)]
    pub source: String,
}

impl<H> RouteDeclaration<H> {
    pub fn new<I, S>(segments: I, handler: H, source: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RouteDeclaration {
            id: None,
            segments: segments.into_iter().map(Into::into).collect(),
            handler,
            source: source.into(),
        }
    }

    /// Declares a route from a slash-separated token string, e.g. `users/[id]`
    ///
    /// The string itself is used as the source label.
    pub fn parse(pattern: &str, handler: H) -> Self {
        Self::new(
            pattern.split('/').filter(|s| !s.is_empty()),
            handler,
            pattern,
        )
    }

    /// Declares a route from a route file path relative to `routes_root`
    ///
    /// # Examples
    ///
    /// ```
    /// use silcrow_router::RouteDeclaration;
    ///
    /// let decl = RouteDeclaration::from_file_path("routes/blog/[slug]/index.purs", "routes", ());
    /// assert_eq!(decl.segments, vec!["blog", "[slug]"]);
    /// assert_eq!(decl.source, "routes/blog/[slug]/index.purs");
    /// ```
    pub fn from_file_path(file_path: &str, routes_root: &str, handler: H) -> Self {
        Self::new(file_path_tokens(file_path, routes_root), handler, file_path)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

// ============================================================================
// Core Types
// ============================================================================

/// A validated route inside a [`RouteTable`]
#[derive(Debug, Clone)]
pub struct RouteEntry<H> {
    pub id: String,
    pub pattern: Pattern,
    pub handler: H,
    pub source: String,
    /// Position in the declaration list as supplied
    pub registration: usize,
}

impl<H> RouteEntry<H> {
    pub fn new(
        id: impl Into<String>,
        pattern: Pattern,
        handler: H,
        source: impl Into<String>,
        registration: usize,
    ) -> Self {
        RouteEntry {
            id: id.into(),
            pattern,
            handler,
            source: source.into(),
            registration,
        }
    }
}

/// Result of matching a path against a [`RouteTable`]
#[derive(Debug)]
pub struct RouteMatch<'a, H> {
    /// The matched entry
    pub entry: &'a RouteEntry<H>,
    /// `[param]` and `[[optional]]` bindings; unmatched optionals are absent
    pub params: HashMap<String, String>,
    /// `[...catchAll]` bindings, piece by piece
    pub catch_all: HashMap<String, Vec<String>>,
}

impl<'a, H> RouteMatch<'a, H> {
    pub fn id(&self) -> &'a str {
        &self.entry.id
    }

    pub fn handler(&self) -> &'a H {
        &self.entry.handler
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Pieces bound by a catch-all, possibly empty
    pub fn pieces(&self, name: &str) -> Option<&[String]> {
        self.catch_all.get(name).map(Vec::as_slice)
    }

    /// All bindings in the shape [`generate`] expects, catch-alls joined with `/`
    ///
    /// Feeding these back into [`RouteTable::url_for`] reproduces the matched path.
    pub fn generation_params(&self) -> HashMap<String, String> {
        let mut params = self.params.clone();
        params.extend(
            self.catch_all
                .iter()
                .map(|(name, pieces)| (name.clone(), pieces.join("/"))),
        );
        params
    }
}

// ============================================================================
// Route Table
// ============================================================================

/// Immutable set of routes with a fixed match order
///
/// Match order: longer static prefix first, then route id, then registration order.
/// The first matching entry wins.
///
/// # Examples
///
/// ```
/// use silcrow_router::{RouteDeclaration, RouteTable};
///
/// let table = RouteTable::build(vec![
///     RouteDeclaration::parse("users/[id]", "user_page"),
///     RouteDeclaration::parse("users/me", "me_page"),
/// ])
/// .unwrap();
///
/// let m = table.match_path("/users/42").unwrap();
/// assert_eq!(*m.handler(), "user_page");
/// assert_eq!(m.param("id"), Some("42"));
///
/// assert_eq!(*table.match_path("/users/me").unwrap().handler(), "me_page");
/// assert_eq!(table.url_for("/users/:id", &[("id", "7")]).as_deref(), Some("/users/7"));
/// ```
#[derive(Debug, Clone)]
pub struct RouteTable<H> {
    entries: Vec<RouteEntry<H>>,
    by_id: HashMap<String, usize>,
    match_order: Vec<usize>,
    diagnostics: Vec<Diagnostic>,
    base_path: String,
}

impl<H> RouteTable<H> {
    /// Builds a table with the default configuration
    pub fn build<I>(declarations: I) -> Result<Self, RouteError>
    where
        I: IntoIterator<Item = RouteDeclaration<H>>,
    {
        Self::build_with_config(declarations, &RouterConfig::default())
    }

    /// Builds a table, running the analyses enabled in `config`
    ///
    /// Fails on the first invalid declaration, on duplicate route ids, and (when
    /// `deny_warnings` is set) on any diagnostic.
    pub fn build_with_config<I>(declarations: I, config: &RouterConfig) -> Result<Self, RouteError>
    where
        I: IntoIterator<Item = RouteDeclaration<H>>,
    {
        let mut entries = declarations
            .into_iter()
            .enumerate()
            .map(|(registration, decl)| into_entry(decl, registration))
            .collect::<Result<Vec<_>, _>>()?;

        entries.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| a.source.cmp(&b.source)));

        if let Some(pair) = entries.windows(2).find(|pair| pair[0].id == pair[1].id) {
            return Err(RouteError::DuplicateRouteId {
                id: pair[0].id.clone(),
                first: pair[0].source.clone(),
                second: pair[1].source.clone(),
            });
        }

        let diagnostics = analyze(&entries, &config.diagnostics);
        for diagnostic in &diagnostics {
            tracing::warn!("{}", diagnostic);
        }
        if config.diagnostics.deny_warnings && !diagnostics.is_empty() {
            return Err(RouteError::DeniedDiagnostics {
                count: diagnostics.len(),
                diagnostics,
            });
        }

        let by_id = entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| (entry.id.clone(), idx))
            .collect();

        let mut match_order: Vec<usize> = (0..entries.len()).collect();
        match_order.sort_by_cached_key(|&idx| {
            let entry = &entries[idx];
            (
                Reverse(entry.pattern.static_prefix_len()),
                entry.pattern.route_id(),
                entry.registration,
            )
        });

        tracing::debug!(
            "Built route table with {} routes and {} warnings",
            entries.len(),
            diagnostics.len()
        );

        Ok(RouteTable {
            entries,
            by_id,
            match_order,
            diagnostics,
            base_path: config.base_path(),
        })
    }

    // ========================================================================
    // Matching
    // ========================================================================

    /// Matches already split and decoded path pieces
    pub fn match_pieces<S: AsRef<str>>(&self, pieces: &[S]) -> Option<RouteMatch<'_, H>> {
        self.match_order.iter().find_map(|&idx| {
            let entry = &self.entries[idx];
            match_pattern(&entry.pattern, pieces).map(|bindings| RouteMatch {
                entry,
                params: bindings.params,
                catch_all: bindings.catch_all,
            })
        })
    }

    /// Matches a request path
    ///
    /// Drops any query string or fragment, normalizes slashes, strips the configured base
    /// path and percent-decodes each piece. A piece that is not valid UTF-8 once decoded
    /// matches nothing.
    pub fn match_path(&self, path: &str) -> Option<RouteMatch<'_, H>> {
        let normalized = normalize_path(path_only(path));
        let relative = strip_base_path(&normalized, &self.base_path);
        let pieces = decode_pieces(relative)?;
        self.match_pieces(&pieces)
    }

    // ========================================================================
    // Generation
    // ========================================================================

    /// Generates a link for the route with `id`, prefixed with the base path
    ///
    /// `None` only when no route has that id; missing params degrade as in [`generate`].
    pub fn url_for<P: ParamLookup + ?Sized>(&self, id: &str, params: &P) -> Option<String> {
        self.get(id)
            .map(|entry| join_base_path(&self.base_path, &generate(&entry.pattern, params)))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Entries in `(id, source)` order
    pub fn entries(&self) -> &[RouteEntry<H>] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&RouteEntry<H>> {
        self.by_id.get(id).map(|&idx| &self.entries[idx])
    }

    /// Entries in the order matching tries them
    pub fn iter(&self) -> impl Iterator<Item = &RouteEntry<H>> {
        self.match_order.iter().map(move |&idx| &self.entries[idx])
    }

    /// Warnings produced while building the table
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Normalized base path, empty when mounted at `/`
    pub fn base_path(&self) -> &str {
        &self.base_path
    }
}

fn into_entry<H>(decl: RouteDeclaration<H>, registration: usize) -> Result<RouteEntry<H>, RouteError> {
    let pattern = match Pattern::from_tokens(&decl.segments) {
        Ok(pattern) => pattern,
        Err(error) => {
            return Err(RouteError::InvalidDeclaration {
                source_label: decl.source,
                error: Box::new(error),
            })
        }
    };

    Ok(RouteEntry {
        id: decl.id.unwrap_or_else(|| pattern.route_id()),
        pattern,
        handler: decl.handler,
        source: decl.source,
        registration,
    })
}
