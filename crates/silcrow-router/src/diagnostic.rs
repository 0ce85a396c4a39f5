//! Build-time findings about a route table.

use std::fmt;

use serde::Serialize;

/// How serious a diagnostic is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Advisory; the table is still usable
    Warning,
    /// Construction was aborted
    Fatal,
}

/// What a diagnostic is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DiagnosticKind {
    InvalidSegmentSyntax,
    CatchAllNotFinal,
    DuplicateParamName,
    DuplicateRouteId,
    DeniedDiagnostics,
    /// Same positional shape registered under different parameter names
    EquivalentShapeConflict,
    /// Two patterns with optional or catch-all segments accept a common path
    OverlapConflict,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::InvalidSegmentSyntax => "invalid-segment-syntax",
            DiagnosticKind::CatchAllNotFinal => "catch-all-not-final",
            DiagnosticKind::DuplicateParamName => "duplicate-param-name",
            DiagnosticKind::DuplicateRouteId => "duplicate-route-id",
            DiagnosticKind::DeniedDiagnostics => "denied-diagnostics",
            DiagnosticKind::EquivalentShapeConflict => "equivalent-shape-conflict",
            DiagnosticKind::OverlapConflict => "overlap-conflict",
        }
    }
}

/// A single finding, naming the routes involved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub message: String,
    /// Route ids of every entry involved, in table order
    pub involved_ids: Vec<String>,
    /// Provenance labels matching `involved_ids` where known
    pub sources: Vec<String>,
}

impl Diagnostic {
    pub fn warning(
        kind: DiagnosticKind,
        message: impl Into<String>,
        involved_ids: Vec<String>,
        sources: Vec<String>,
    ) -> Self {
        Diagnostic {
            severity: Severity::Warning,
            kind,
            message: message.into(),
            involved_ids,
            sources,
        }
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Warning => "warning",
            Severity::Fatal => "error",
        };
        write!(f, "[{}][{}] {}", level, self.kind.as_str(), self.message)
    }
}
