//! Raw and canonical diagnostic forms.

use std::fmt;

use strix_ir::{Category, Range};
use strix_rules::Rule;

/// A diagnostic as the inference engine emits it: unfiltered, unordered,
/// with its intrinsic category.
///
/// `rule` is `None` for diagnostics that have no configurable rule (syntax
/// errors, engine failures surfaced as diagnostics); those always pass
/// through normalization at their intrinsic category.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct RawDiagnostic {
    pub rule: Option<Rule>,
    pub range: Range,
    pub message: String,
    pub category: Category,
}

impl RawDiagnostic {
    /// Create a rule-backed diagnostic.
    pub fn new(rule: Rule, range: Range, message: impl Into<String>, category: Category) -> Self {
        RawDiagnostic {
            rule: Some(rule),
            range,
            message: message.into(),
            category,
        }
    }

    /// Create a rule-less diagnostic (e.g. a parse error). Never
    /// suppressible by configuration.
    pub fn unruled(range: Range, message: impl Into<String>, category: Category) -> Self {
        RawDiagnostic {
            rule: None,
            range,
            message: message.into(),
            category,
        }
    }
}

/// Position/rule-derived identity used to match a diagnostic across edits.
///
/// Line numbers are deliberately excluded so inserting or removing unrelated
/// lines elsewhere in the file does not invalidate a baseline entry; the
/// span's line *count* is retained as a weak corroborating signal.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Fingerprint {
    pub rule: Option<Rule>,
    pub start_column: u32,
    pub end_column: u32,
    pub line_count: u32,
}

impl Fingerprint {
    /// Match against a possibly old-format counterpart whose line count was
    /// never recorded: `None` is a wildcard on that field only.
    pub fn matches(&self, rule: Option<Rule>, start_column: u32, end_column: u32, line_count: Option<u32>) -> bool {
        self.rule == rule
            && self.start_column == start_column
            && self.end_column == end_column
            && line_count.map_or(true, |count| count == self.line_count)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = self.rule.map_or("<no rule>", Rule::as_str);
        write!(
            f,
            "{rule}@{}..{}x{}",
            self.start_column, self.end_column, self.line_count
        )
    }
}

/// A diagnostic in canonical form: severity resolved, order normalized,
/// fingerprint derivable. This is what reconciliation and consumers see.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct CanonicalDiagnostic {
    pub rule: Option<Rule>,
    pub range: Range,
    pub message: String,
    /// Resolved display category (post rule-set resolution, pre baseline
    /// demotion).
    pub category: Category,
}

impl CanonicalDiagnostic {
    /// The baseline-matching identity of this diagnostic.
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint {
            rule: self.rule,
            start_column: self.range.start.column,
            end_column: self.range.end.column,
            line_count: self.range.line_count(),
        }
    }

    /// Replace the display category, keeping everything else.
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }
}

impl fmt::Display for CanonicalDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.category, self.message, self.range)?;
        if let Some(rule) = self.rule {
            write!(f, " [{rule}]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
