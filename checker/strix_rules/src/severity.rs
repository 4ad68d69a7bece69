//! Type-checking presets and configured rule severities.

use std::fmt;

use serde::{Deserialize, Serialize};
use strix_ir::{Category, HintTier};

/// Named bundle of default rule severities.
///
/// The defaults table lives on [`crate::Rule::default_severity`]; this enum
/// only names the five columns.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Off,
    Basic,
    #[default]
    Standard,
    Strict,
    All,
}

impl Preset {
    /// Whether overrides under this preset may only raise severity.
    ///
    /// Once the preset is strict-or-stricter, lowering a rule below its
    /// preset default is a configuration error, not a silent clamp.
    pub const fn is_strict(self) -> bool {
        matches!(self, Preset::Strict | Preset::All)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Preset::Off => "off",
            Preset::Basic => "basic",
            Preset::Standard => "standard",
            Preset::Strict => "strict",
            Preset::All => "all",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configured severity of a rule.
///
/// Four base levels (off, hint, warning, error) plus the three display tiers
/// accepted for rules that support them — the full seven-string override
/// surface. Booleans map to `Error`/`Off`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum RuleSeverity {
    Off,
    /// Hint-like interactive level; rendered as `Category::Information`.
    Hint,
    Warning,
    Error,
    /// One of the special display tiers (unused/deprecated/unreachable).
    Tier(HintTier),
}

impl RuleSeverity {
    /// Parse a surface severity string. `information` is accepted as an
    /// alias for `hint`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "off" | "none" => Some(RuleSeverity::Off),
            "hint" | "information" => Some(RuleSeverity::Hint),
            "warning" => Some(RuleSeverity::Warning),
            "error" => Some(RuleSeverity::Error),
            "unused" => Some(RuleSeverity::Tier(HintTier::Unused)),
            "deprecated" => Some(RuleSeverity::Tier(HintTier::Deprecated)),
            "unreachable" => Some(RuleSeverity::Tier(HintTier::Unreachable)),
            _ => None,
        }
    }

    /// Surface name.
    pub const fn as_str(self) -> &'static str {
        match self {
            RuleSeverity::Off => "off",
            RuleSeverity::Hint => "hint",
            RuleSeverity::Warning => "warning",
            RuleSeverity::Error => "error",
            RuleSeverity::Tier(tier) => tier.as_str(),
        }
    }

    /// Rank used for strict-mode monotonicity checks.
    ///
    /// Hint and the display tiers share a rank: swapping one low-emphasis
    /// rendering for another is not a lowering.
    pub const fn rank(self) -> u8 {
        match self {
            RuleSeverity::Off => 0,
            RuleSeverity::Hint | RuleSeverity::Tier(_) => 1,
            RuleSeverity::Warning => 2,
            RuleSeverity::Error => 3,
        }
    }

    /// The display category a diagnostic receives under this severity, or
    /// `None` when the rule is off (the diagnostic is dropped).
    pub const fn category(self) -> Option<Category> {
        match self {
            RuleSeverity::Off => None,
            RuleSeverity::Hint => Some(Category::Information),
            RuleSeverity::Warning => Some(Category::Warning),
            RuleSeverity::Error => Some(Category::Error),
            RuleSeverity::Tier(tier) => Some(Category::Hint(tier)),
        }
    }
}

impl fmt::Display for RuleSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests;
