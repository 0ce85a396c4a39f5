//! Fatal, build-time route configuration errors.
//!
//! Everything here aborts table construction. Advisory findings live in
//! [`crate::diagnostic`] instead, and a path that matches nothing is a plain `None`.

use crate::diagnostic::{Diagnostic, DiagnosticKind, Severity};

/// Errors raised while parsing patterns or assembling a [`crate::RouteTable`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// A segment token is malformed or uses characters outside the allowed set
    #[error("invalid segment `{token}`: {reason}")]
    InvalidSegmentSyntax { token: String, reason: String },

    /// `[...name]` used anywhere but the last position
    #[error("catch-all segment `[...{name}]` must be the final segment of `{pattern}`")]
    CatchAllNotFinal { name: String, pattern: String },

    /// The same parameter name bound twice inside one pattern
    #[error("parameter `{name}` is bound more than once in `{pattern}`")]
    DuplicateParamName { name: String, pattern: String },

    /// A declaration failed to parse; carries the provenance of the declaration
    #[error("route declared in {source_label} is invalid: {error}")]
    InvalidDeclaration {
        source_label: String,
        #[source]
        error: Box<RouteError>,
    },

    /// Two declarations resolve to the same route id
    #[error("duplicate route id {id} from {first} and {second}")]
    DuplicateRouteId {
        id: String,
        first: String,
        second: String,
    },

    /// Warnings were produced and the configuration denies them
    #[error("route table produced {count} warning(s) and warnings are denied")]
    DeniedDiagnostics { count: usize, diagnostics: Vec<Diagnostic> },
}

impl RouteError {
    pub(crate) fn invalid_segment(token: &str, reason: impl Into<String>) -> Self {
        RouteError::InvalidSegmentSyntax {
            token: token.to_string(),
            reason: reason.into(),
        }
    }

    /// Kind used when this error is reported alongside diagnostics
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            RouteError::InvalidSegmentSyntax { .. } => DiagnosticKind::InvalidSegmentSyntax,
            RouteError::CatchAllNotFinal { .. } => DiagnosticKind::CatchAllNotFinal,
            RouteError::DuplicateParamName { .. } => DiagnosticKind::DuplicateParamName,
            RouteError::InvalidDeclaration { error, .. } => error.kind(),
            RouteError::DuplicateRouteId { .. } => DiagnosticKind::DuplicateRouteId,
            RouteError::DeniedDiagnostics { .. } => DiagnosticKind::DeniedDiagnostics,
        }
    }

    /// Renders the error as a fatal [`Diagnostic`]
    ///
    /// # Examples
    ///
    /// ```
    /// use silcrow_router::{RouteError, Severity};
    ///
    /// let err = RouteError::DuplicateRouteId {
    ///     id: "/users/:id".to_string(),
    ///     first: "users/[id].purs".to_string(),
    ///     second: "users/[id]/index.purs".to_string(),
    /// };
    /// let diagnostic = err.to_diagnostic();
    /// assert_eq!(diagnostic.severity, Severity::Fatal);
    /// assert_eq!(diagnostic.involved_ids, vec!["/users/:id".to_string()]);
    /// ```
    pub fn to_diagnostic(&self) -> Diagnostic {
        let (involved_ids, sources) = match self {
            RouteError::DuplicateRouteId { id, first, second } => {
                (vec![id.clone()], vec![first.clone(), second.clone()])
            }
            RouteError::InvalidDeclaration { source_label, .. } => {
                (Vec::new(), vec![source_label.clone()])
            }
            RouteError::DeniedDiagnostics { diagnostics, .. } => {
                let mut ids: Vec<String> = diagnostics
                    .iter()
                    .flat_map(|d| d.involved_ids.iter().cloned())
                    .collect();
                ids.sort();
                ids.dedup();
                (ids, Vec::new())
            }
            _ => (Vec::new(), Vec::new()),
        };

        Diagnostic {
            severity: Severity::Fatal,
            kind: self.kind(),
            message: self.to_string(),
            involved_ids,
            sources,
        }
    }
}
