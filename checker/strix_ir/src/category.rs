//! Diagnostic categories and hint tiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Non-suppressing, low-emphasis display tiers.
///
/// A baselined diagnostic whose rule supports one of these tiers is demoted
/// to it instead of being hidden, so an interactive consumer can still render
/// it (struck through, faded, ...) without alarming the user.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HintTier {
    Unused,
    Deprecated,
    Unreachable,
}

impl HintTier {
    /// Demotion priority order: when a rule nominally supports several tiers,
    /// the first entry here that the rule lists wins.
    pub const PRIORITY: [HintTier; 3] = [HintTier::Unreachable, HintTier::Deprecated, HintTier::Unused];

    /// Surface name as it appears in configuration documents.
    pub const fn as_str(self) -> &'static str {
        match self {
            HintTier::Unused => "unused",
            HintTier::Deprecated => "deprecated",
            HintTier::Unreachable => "unreachable",
        }
    }
}

impl fmt::Display for HintTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display category of a diagnostic.
///
/// Closed tagged variant: the configuration surface is string-based, but
/// validation at the parsing boundary converts to this enum and everything
/// downstream matches on it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Error,
    Warning,
    Information,
    Hint(HintTier),
}

impl Category {
    /// Whether this category counts toward the error total.
    pub const fn is_error(self) -> bool {
        matches!(self, Category::Error)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Error => f.write_str("error"),
            Category::Warning => f.write_str("warning"),
            Category::Information => f.write_str("information"),
            Category::Hint(tier) => write!(f, "hint ({tier})"),
        }
    }
}
