//! Error-count delta reporting for baseline operations.

use crate::diagnostic::CanonicalDiagnostic;

/// Count the error-category diagnostics in a batch.
pub fn count_errors(diagnostics: &[CanonicalDiagnostic]) -> usize {
    diagnostics
        .iter()
        .filter(|diag| diag.category.is_error())
        .count()
}

/// The consumer-facing delta message for a baseline update.
pub fn summary_message(previous_errors: usize, current_errors: usize) -> String {
    match current_errors.cmp(&previous_errors) {
        std::cmp::Ordering::Equal => "error count didn't change".to_string(),
        std::cmp::Ordering::Greater => {
            format!("error count went up by {}", current_errors - previous_errors)
        }
        std::cmp::Ordering::Less => {
            format!("error count went down by {}", previous_errors - current_errors)
        }
    }
}

#[cfg(test)]
mod tests;
