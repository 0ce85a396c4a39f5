//! Static analysis over a full set of routes
//!
//! Runs once per table build, before any request is served. Findings are advisory
//! [`Diagnostic`]s; whether they fail the build is decided by [`DiagnosticsConfig`].

pub mod overlap;
pub mod shape;

pub use overlap::{detect_overlaps, overlap_witness, patterns_overlap};
pub use shape::detect_equivalent_shapes;

use crate::config::DiagnosticsConfig;
use crate::diagnostic::Diagnostic;
use crate::table::RouteEntry;

/// Runs every enabled detector over `entries`
///
/// Equivalent-shape findings come first, then overlap findings, each in table order.
pub fn analyze<H>(entries: &[RouteEntry<H>], config: &DiagnosticsConfig) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    if config.equivalent_shapes {
        diagnostics.extend(detect_equivalent_shapes(entries));
    }
    if config.overlaps {
        diagnostics.extend(detect_overlaps(entries));
    }

    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::DiagnosticKind;
    use crate::route::Pattern;

    fn entries() -> Vec<RouteEntry<()>> {
        ["users/[id]", "users/[name]", "docs/[...rest]", "docs/[[page]]"]
            .iter()
            .enumerate()
            .map(|(idx, source)| {
                let pattern = Pattern::parse(source).unwrap();
                RouteEntry::new(pattern.route_id(), pattern, (), *source, idx)
            })
            .collect()
    }

    #[test]
    fn test_all_detectors_enabled_by_default() {
        let kinds: Vec<_> = analyze(&entries(), &DiagnosticsConfig::default())
            .into_iter()
            .map(|d| d.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                DiagnosticKind::EquivalentShapeConflict,
                DiagnosticKind::OverlapConflict
            ]
        );
    }

    #[test]
    fn test_detectors_can_be_disabled() {
        let config = DiagnosticsConfig {
            equivalent_shapes: false,
            overlaps: false,
            deny_warnings: false,
        };
        assert!(analyze(&entries(), &config).is_empty());
    }
}
