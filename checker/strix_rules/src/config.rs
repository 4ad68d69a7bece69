//! The layered, JSON-compatible configuration document.
//!
//! This core consumes an already-merged document: "extends" chains and glob
//! include/exclude resolution happen upstream. What arrives here is one
//! global scope plus an ordered list of execution-environment scopes, each
//! overriding rule severities by name. Everything is validated eagerly; a
//! bad document never reaches the resolver.

use std::collections::BTreeMap;

use bitflags::bitflags;
use serde::Deserialize;
use strix_ir::HintTier;

use crate::rule::Rule;
use crate::severity::{Preset, RuleSeverity};

/// Error validating a configuration document.
///
/// Configuration errors are loud and blocking: analysis does not proceed for
/// scopes depending on the offending document until it is corrected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown diagnostic rule `{key}`")]
    UnknownRule { key: String },

    #[error("invalid severity `{value}` for rule `{rule}`")]
    InvalidSeverity { rule: Rule, value: String },

    #[error("rule `{rule}` does not support the `{tier}` display tier")]
    UnsupportedTier { rule: Rule, tier: HintTier },

    #[error(
        "rule `{rule}` defaults to `{default}` under the `{preset}` preset \
         and cannot be lowered to `{given}`"
    )]
    BelowPresetDefault {
        rule: Rule,
        preset: Preset,
        default: RuleSeverity,
        given: RuleSeverity,
    },

    #[error("unknown type evaluation flag `{key}`")]
    UnknownFlag { key: String },
}

bitflags! {
    /// Per-scope type-evaluation behavior toggles, handed through to the
    /// engine with the configuration snapshot.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct TypeEvalFlags: u8 {
        const STRICT_LIST_INFERENCE = 1 << 0;
        const STRICT_DICT_INFERENCE = 1 << 1;
        const STRICT_SET_INFERENCE = 1 << 2;
        const ANALYZE_UNANNOTATED = 1 << 3;
    }
}

impl TypeEvalFlags {
    /// Parse one surface flag name.
    pub fn parse_flag(name: &str) -> Option<Self> {
        match name {
            "strictListInference" => Some(Self::STRICT_LIST_INFERENCE),
            "strictDictInference" => Some(Self::STRICT_DICT_INFERENCE),
            "strictSetInference" => Some(Self::STRICT_SET_INFERENCE),
            "analyzeUnannotated" => Some(Self::ANALYZE_UNANNOTATED),
            _ => None,
        }
    }

    /// Fold a list of surface flag names.
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<Self, ConfigError> {
        let mut flags = Self::empty();
        for name in names {
            let flag = Self::parse_flag(name).ok_or_else(|| ConfigError::UnknownFlag {
                key: name.to_string(),
            })?;
            flags |= flag;
        }
        Ok(flags)
    }
}

/// One rule override as it appears on the surface: a boolean
/// (`true` → error, `false` → off) or a severity string.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SeverityOverride {
    Enabled(bool),
    Named(String),
}

/// Ordered map of rule-name → override. `BTreeMap` keeps validation errors
/// deterministic for a given document.
pub type RuleOverrides = BTreeMap<String, SeverityOverride>;

/// Validate one override map against a preset.
///
/// Checks, in order: the rule name is known; the severity string parses; a
/// display tier is only used on a rule that supports it; and, when the
/// preset is strict-or-stricter, the override does not lower the rule below
/// its preset default.
pub(crate) fn validate_overrides(
    overrides: &RuleOverrides,
    preset: Preset,
) -> Result<Vec<(Rule, RuleSeverity)>, ConfigError> {
    let mut validated = Vec::with_capacity(overrides.len());
    for (key, value) in overrides {
        let rule = Rule::parse(key).ok_or_else(|| ConfigError::UnknownRule { key: key.clone() })?;
        let severity = match value {
            SeverityOverride::Enabled(true) => RuleSeverity::Error,
            SeverityOverride::Enabled(false) => RuleSeverity::Off,
            SeverityOverride::Named(name) => {
                RuleSeverity::parse(name).ok_or_else(|| ConfigError::InvalidSeverity {
                    rule,
                    value: name.clone(),
                })?
            }
        };
        if let RuleSeverity::Tier(tier) = severity {
            if !rule.supports_tier(tier) {
                return Err(ConfigError::UnsupportedTier { rule, tier });
            }
        }
        if preset.is_strict() {
            let default = rule.default_severity(preset);
            if severity.rank() < default.rank() {
                return Err(ConfigError::BelowPresetDefault {
                    rule,
                    preset,
                    default,
                    given: severity,
                });
            }
        }
        validated.push((rule, severity));
    }
    Ok(validated)
}

/// One execution-environment scope as declared in the document.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ExecutionEnvConfig {
    /// Root path prefix, relative to the project root.
    pub root: String,
    /// Per-scope rule overrides, applied on top of the global scope.
    #[serde(default)]
    pub rules: RuleOverrides,
    /// Surface names of type-evaluation flags for this scope.
    #[serde(default)]
    pub type_eval_flags: Vec<String>,
}

/// The fully-merged configuration document for one project.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CheckerConfig {
    /// Active preset; defaults to `standard`.
    #[serde(default)]
    pub type_checking_mode: Preset,
    /// Global-scope rule overrides.
    #[serde(default)]
    pub rules: RuleOverrides,
    /// Execution-environment scopes, in declaration order.
    #[serde(default)]
    pub execution_environments: Vec<ExecutionEnvConfig>,
}
