//! The persisted baseline file model.
//!
//! Paths are forward-slash-normalized and project-root-relative so the file
//! is portable and diff-friendly across machines and checkouts. Keys live in
//! a `BTreeMap`: repeated saves of logically-identical content are
//! byte-identical.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use strix_diagnostic::{CanonicalDiagnostic, Fingerprint};
use strix_rules::Rule;

/// Forward-slash-normalize a project-relative path for use as a baseline key.
pub fn normalize_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Persisted span of one accepted diagnostic.
///
/// Absolute line numbers are deliberately absent. `line_count` is optional
/// for compatibility with baselines written before line-count tracking
/// existed; a missing value matches any count.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BaselineRange {
    pub start_column: u32,
    pub end_column: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_count: Option<u32>,
}

/// One accepted diagnostic, persisted under its file's path.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BaselineEntry {
    /// Rule surface name; absent for rule-less diagnostics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub range: BaselineRange,
}

impl BaselineEntry {
    /// Persisted form of a canonical diagnostic.
    pub fn from_diagnostic(diag: &CanonicalDiagnostic) -> Self {
        let fingerprint = diag.fingerprint();
        BaselineEntry {
            code: fingerprint.rule.map(|rule| rule.as_str().to_string()),
            range: BaselineRange {
                start_column: fingerprint.start_column,
                end_column: fingerprint.end_column,
                line_count: Some(fingerprint.line_count),
            },
        }
    }

    /// Fingerprint-equality against a current diagnostic. An entry whose
    /// `lineCount` was never recorded is a wildcard on that field only; an
    /// entry whose code names a rule this build no longer knows matches
    /// nothing.
    pub fn matches(&self, fingerprint: &Fingerprint) -> bool {
        self.code.as_deref() == fingerprint.rule.map(Rule::as_str)
            && self.range.start_column == fingerprint.start_column
            && self.range.end_column == fingerprint.end_column
            && self
                .range
                .line_count
                .map_or(true, |count| count == fingerprint.line_count)
    }
}

/// The whole persisted baseline: file path → accepted diagnostics.
#[derive(Clone, Eq, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BaselineFile {
    #[serde(default)]
    pub files: BTreeMap<String, Vec<BaselineEntry>>,
}

impl BaselineFile {
    /// An empty baseline — the normal state for a fresh project.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Accepted entries for a file, empty when the file has none.
    pub fn entries_for(&self, path: &str) -> &[BaselineEntry] {
        self.files.get(path).map_or(&[], Vec::as_slice)
    }

    /// Record a file's entries. A file with zero diagnostics is omitted
    /// entirely.
    pub fn insert(&mut self, path: String, entries: Vec<BaselineEntry>) {
        if entries.is_empty() {
            self.files.remove(&path);
        } else {
            self.files.insert(path, entries);
        }
    }

    /// Whether the baseline has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Total number of accepted diagnostics across all files.
    pub fn total_entries(&self) -> usize {
        self.files.values().map(Vec::len).sum()
    }
}
