//! The closed registry of diagnostic rules.
//!
//! Every rule the engine can report is named here, together with its surface
//! name, its five-column preset defaults, and the hint tiers it supports for
//! baseline demotion. This enum is the single source of truth: configuration
//! validation, severity resolution, and baseline fingerprints all go through
//! it.

use std::fmt;

use strix_ir::HintTier;

use crate::severity::{Preset, RuleSeverity};

/// A named category of static-analysis issue with a configurable severity.
///
/// Grouped by the analysis that produces them:
/// - binding/scope rules
/// - type-consistency rules
/// - style/liveness rules (the hint-tier rules live here)
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Rule {
    // Binding and scope
    /// Name is not bound anywhere in scope.
    UndefinedVariable,
    /// Name is bound on some paths but not all.
    PossiblyUnbound,
    /// Name redeclared with an incompatible kind.
    Redeclaration,

    // Type consistency
    /// Assigned value is incompatible with the declared type.
    AssignmentIncompatible,
    /// Call has too few or too many arguments.
    CallArity,
    /// Member access on a value that may be absent.
    OptionalMemberAccess,
    /// Call of a value that may be absent.
    OptionalCall,
    /// Member not known on the inferred type.
    UnknownMember,
    /// Generic used without required type arguments.
    MissingTypeArgument,
    /// Expression is not a valid type annotation.
    InvalidTypeForm,
    /// Function can fall off the end without returning.
    MissingReturn,
    /// Method is missing its instance/class parameter.
    SelfClsParameter,

    // Style and liveness
    /// Adjacent string literals concatenated implicitly.
    ImplicitStringConcat,
    /// Statement can never execute.
    UnreachableCode,
    /// Use of a symbol marked deprecated.
    DeprecatedUsage,
    /// Local variable is never read.
    UnusedVariable,
    /// Import is never used.
    UnusedImport,
}

impl Rule {
    /// Every known rule, in registry order. Registry order is also the
    /// dense index used by severity maps.
    pub const ALL: [Rule; 17] = [
        Rule::UndefinedVariable,
        Rule::PossiblyUnbound,
        Rule::Redeclaration,
        Rule::AssignmentIncompatible,
        Rule::CallArity,
        Rule::OptionalMemberAccess,
        Rule::OptionalCall,
        Rule::UnknownMember,
        Rule::MissingTypeArgument,
        Rule::InvalidTypeForm,
        Rule::MissingReturn,
        Rule::SelfClsParameter,
        Rule::ImplicitStringConcat,
        Rule::UnreachableCode,
        Rule::DeprecatedUsage,
        Rule::UnusedVariable,
        Rule::UnusedImport,
    ];

    /// Number of known rules.
    pub const COUNT: usize = Self::ALL.len();

    /// Dense index in registry order.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Surface name as it appears in configuration documents and baselines.
    pub const fn as_str(self) -> &'static str {
        match self {
            Rule::UndefinedVariable => "undefined-variable",
            Rule::PossiblyUnbound => "possibly-unbound",
            Rule::Redeclaration => "redeclaration",
            Rule::AssignmentIncompatible => "assignment-incompatible",
            Rule::CallArity => "call-arity",
            Rule::OptionalMemberAccess => "optional-member-access",
            Rule::OptionalCall => "optional-call",
            Rule::UnknownMember => "unknown-member",
            Rule::MissingTypeArgument => "missing-type-argument",
            Rule::InvalidTypeForm => "invalid-type-form",
            Rule::MissingReturn => "missing-return",
            Rule::SelfClsParameter => "self-cls-parameter",
            Rule::ImplicitStringConcat => "implicit-string-concat",
            Rule::UnreachableCode => "unreachable-code",
            Rule::DeprecatedUsage => "deprecated-usage",
            Rule::UnusedVariable => "unused-variable",
            Rule::UnusedImport => "unused-import",
        }
    }

    /// Look up a rule by surface name.
    pub fn parse(name: &str) -> Option<Rule> {
        Self::ALL.iter().copied().find(|rule| rule.as_str() == name)
    }

    /// Default severity under each preset.
    ///
    /// The five columns of the configuration reference table; `Off` turns
    /// everything off, `All` raises everything to at least warning.
    pub const fn default_severity(self, preset: Preset) -> RuleSeverity {
        use RuleSeverity::{Error, Off, Tier, Warning};
        if matches!(preset, Preset::Off) {
            return Off;
        }
        match self {
            Rule::UndefinedVariable | Rule::CallArity | Rule::InvalidTypeForm => Error,
            Rule::PossiblyUnbound | Rule::UnknownMember => match preset {
                Preset::Basic => Warning,
                _ => Error,
            },
            Rule::AssignmentIncompatible | Rule::OptionalMemberAccess | Rule::OptionalCall => {
                match preset {
                    Preset::Basic => Off,
                    _ => Error,
                }
            }
            Rule::Redeclaration | Rule::MissingReturn | Rule::SelfClsParameter => match preset {
                Preset::Basic => Off,
                Preset::Standard => Warning,
                _ => Error,
            },
            Rule::MissingTypeArgument => match preset {
                Preset::Basic | Preset::Standard => Off,
                _ => Error,
            },
            Rule::ImplicitStringConcat => match preset {
                Preset::Basic | Preset::Standard => Off,
                Preset::Strict => Warning,
                _ => Error,
            },
            Rule::UnreachableCode => match preset {
                Preset::All => Warning,
                _ => Tier(HintTier::Unreachable),
            },
            Rule::DeprecatedUsage => match preset {
                Preset::Strict => Warning,
                Preset::All => Error,
                _ => Tier(HintTier::Deprecated),
            },
            Rule::UnusedVariable | Rule::UnusedImport => match preset {
                Preset::All => Warning,
                _ => Tier(HintTier::Unused),
            },
        }
    }

    /// Hint tiers this rule supports for baseline demotion, in the rule's
    /// nominal order. A baselined match is demoted to the highest-priority
    /// supported tier ([`HintTier::PRIORITY`]) instead of being suppressed.
    pub const fn hint_tiers(self) -> &'static [HintTier] {
        match self {
            Rule::UnreachableCode => &[HintTier::Unreachable],
            Rule::DeprecatedUsage => &[HintTier::Deprecated],
            _ => &[],
        }
    }

    /// Whether this rule accepts `tier` on the configuration surface.
    pub fn supports_tier(self, tier: HintTier) -> bool {
        match tier {
            HintTier::Unused => matches!(self, Rule::UnusedVariable | Rule::UnusedImport),
            HintTier::Deprecated => matches!(self, Rule::DeprecatedUsage),
            HintTier::Unreachable => matches!(self, Rule::UnreachableCode),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
