//! Raw → canonical conversion.

use strix_rules::SeverityMap;

use crate::diagnostic::{CanonicalDiagnostic, RawDiagnostic};

/// Normalize one file's raw diagnostics against a resolved severity map.
///
/// - Rule-less diagnostics pass through at their intrinsic category; they
///   are never suppressible.
/// - A rule resolved to `off` drops the diagnostic entirely.
/// - Otherwise the resolved severity's display category replaces the
///   intrinsic one.
///
/// Output is sorted by (start line, start column, rule name) so downstream
/// diffing is deterministic regardless of engine emission order.
pub fn normalize(raw: Vec<RawDiagnostic>, severities: &SeverityMap) -> Vec<CanonicalDiagnostic> {
    let mut canonical: Vec<CanonicalDiagnostic> = raw
        .into_iter()
        .filter_map(|diag| {
            let category = match diag.rule {
                None => Some(diag.category),
                Some(rule) => severities.get(rule).category(),
            };
            category.map(|category| CanonicalDiagnostic {
                rule: diag.rule,
                range: diag.range,
                message: diag.message,
                category,
            })
        })
        .collect();
    canonical.sort_by_key(|diag| {
        (
            diag.range.start.line,
            diag.range.start.column,
            diag.rule.map(|rule| rule.as_str()),
        )
    });
    canonical
}
