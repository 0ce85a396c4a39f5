//! Request path helpers: canonical form, base path mounting, splitting and decoding
//!
//! Matching works on decoded pieces; these functions get a raw request target there.

use std::borrow::Cow;

/// Whether `path` is already in canonical `/a/b` form
///
/// Canonical means a leading `/` followed by non-empty pieces separated by single `/`,
/// with no backslashes. The root `/` is canonical; the empty string is not.
///
/// # Examples
///
/// ```
/// use silcrow_router::path::is_valid_path;
///
/// assert!(is_valid_path("/"));
/// assert!(is_valid_path("/users/123"));
///
/// assert!(!is_valid_path(""));
/// assert!(!is_valid_path("about"));
/// assert!(!is_valid_path("/about/"));
/// assert!(!is_valid_path("/about//page"));
/// assert!(!is_valid_path("/about\\page"));
/// ```
pub fn is_valid_path(path: &str) -> bool {
    match path.strip_prefix('/') {
        Some("") => true,
        Some(rest) => rest
            .split('/')
            .all(|piece| !piece.is_empty() && !piece.contains('\\')),
        None => false,
    }
}

/// Rewrites `path` into canonical form, borrowing when it already is
///
/// Both `/` and `\` separate pieces; empty pieces are dropped.
///
/// # Examples
///
/// ```
/// use silcrow_router::path::normalize_path;
/// use std::borrow::Cow;
///
/// assert!(matches!(normalize_path("/about"), Cow::Borrowed("/about")));
/// assert_eq!(normalize_path("users\\123/"), "/users/123");
/// assert_eq!(normalize_path("//"), "/");
/// ```
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    if is_valid_path(path) {
        return Cow::Borrowed(path);
    }

    let pieces: Vec<&str> = path
        .split(['/', '\\'])
        .filter(|piece| !piece.is_empty())
        .collect();
    Cow::Owned(format!("/{}", pieces.join("/")))
}

/// Canonical base path: empty for none, otherwise `/prefix` without a trailing slash
///
/// # Examples
///
/// ```
/// use silcrow_router::path::normalize_base_path;
///
/// assert_eq!(normalize_base_path(""), "");
/// assert_eq!(normalize_base_path("/"), "");
/// assert_eq!(normalize_base_path("app/"), "/app");
/// assert_eq!(normalize_base_path("/app"), "/app");
/// ```
pub fn normalize_base_path(base: &str) -> String {
    let normalized = normalize_path(base);
    if normalized == "/" {
        String::new()
    } else {
        normalized.into_owned()
    }
}

/// Removes a (normalized) base path prefix from a request path
///
/// `base` and `base/` map to `/`; paths outside the base are returned unchanged.
///
/// # Examples
///
/// ```
/// use silcrow_router::path::strip_base_path;
///
/// assert_eq!(strip_base_path("/app", "/app"), "/");
/// assert_eq!(strip_base_path("/app/users/1", "/app"), "/users/1");
/// assert_eq!(strip_base_path("/application", "/app"), "/application");
/// assert_eq!(strip_base_path("/users", ""), "/users");
/// ```
pub fn strip_base_path<'a>(path: &'a str, base: &str) -> &'a str {
    if base.is_empty() {
        return path;
    }

    match path.strip_prefix(base) {
        Some("") | Some("/") => "/",
        Some(rest) if rest.starts_with('/') => rest,
        _ => path,
    }
}

/// Prefixes a generated route path with a (normalized) base path
///
/// # Examples
///
/// ```
/// use silcrow_router::path::join_base_path;
///
/// assert_eq!(join_base_path("", "/users/1"), "/users/1");
/// assert_eq!(join_base_path("/app", "/users/1"), "/app/users/1");
/// assert_eq!(join_base_path("/app", "/"), "/app");
/// ```
pub fn join_base_path(base: &str, route_path: &str) -> String {
    match (base.is_empty(), route_path) {
        (true, _) => route_path.to_string(),
        (false, "/") => base.to_string(),
        (false, _) => format!("{}{}", base, route_path),
    }
}

/// Drops the query string and fragment of a request target
///
/// # Examples
///
/// ```
/// use silcrow_router::path::path_only;
///
/// assert_eq!(path_only("/search?q=rust#top"), "/search");
/// assert_eq!(path_only("/docs#intro"), "/docs");
/// assert_eq!(path_only("/plain"), "/plain");
/// ```
pub fn path_only(target: &str) -> &str {
    match target.find(['?', '#']) {
        Some(end) => &target[..end],
        None => target,
    }
}

/// Non-empty pieces of a path, still percent-encoded
///
/// # Examples
///
/// ```
/// use silcrow_router::path::split_path;
///
/// assert_eq!(split_path("/users//42/"), vec!["users", "42"]);
/// assert!(split_path("/").is_empty());
/// ```
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Splits a path and percent-decodes each piece
///
/// Splitting happens before decoding, so an encoded `%2F` stays inside its piece.
/// Returns `None` when a piece does not decode to valid UTF-8.
///
/// # Examples
///
/// ```
/// use silcrow_router::path::decode_pieces;
///
/// assert_eq!(
///     decode_pieces("/users/a%20b%2Fc").unwrap(),
///     vec!["users".to_string(), "a b/c".to_string()]
/// );
/// assert!(decode_pieces("/bad/%FF").is_none());
/// ```
pub fn decode_pieces(path: &str) -> Option<Vec<String>> {
    split_path(path)
        .into_iter()
        .map(|piece| urlencoding::decode(piece).ok().map(Cow::into_owned))
        .collect()
}
