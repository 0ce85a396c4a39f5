//! Equivalent-shape detection
//!
//! `users/[id]` and `users/[userId]` accept exactly the same paths but bind different
//! parameter names, so which name a handler sees depends on match order.

use std::collections::HashMap;

use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::table::RouteEntry;

/// Groups entries by [`crate::Pattern::signature`] and flags groups of more than one
/// entry that contain a dynamic segment
///
/// Groups are reported in order of first appearance.
pub fn detect_equivalent_shapes<H>(entries: &[RouteEntry<H>]) -> Vec<Diagnostic> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<&RouteEntry<H>>> = HashMap::new();

    for entry in entries {
        let signature = entry.pattern.signature();
        groups
            .entry(signature.clone())
            .or_insert_with(|| {
                order.push(signature);
                Vec::new()
            })
            .push(entry);
    }

    order
        .iter()
        .filter_map(|signature| {
            let members = groups.get(signature)?;
            let dynamic = members.iter().any(|entry| entry.pattern.has_dynamic());
            (members.len() > 1 && dynamic).then(|| shape_conflict(signature, members))
        })
        .collect()
}

fn shape_conflict<H>(signature: &str, members: &[&RouteEntry<H>]) -> Diagnostic {
    let listed = members
        .iter()
        .map(|entry| format!("{} ({})", entry.source, entry.id))
        .collect::<Vec<_>>()
        .join(", ");

    Diagnostic::warning(
        DiagnosticKind::EquivalentShapeConflict,
        format!(
            "Equivalent dynamic route shape ({}) appears in multiple routes: {}. \
             Consider using one canonical route to avoid ambiguous param naming.",
            signature, listed
        ),
        members.iter().map(|entry| entry.id.clone()).collect(),
        members.iter().map(|entry| entry.source.clone()).collect(),
    )
}
