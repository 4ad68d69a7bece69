//! Rule registry and cascading severity resolution.
//!
//! The configuration surface is a layered, JSON-compatible document: one
//! global scope plus zero or more execution-environment scopes selected by
//! path prefix. Validation happens once at load time ([`RuleSet::from_config`])
//! and is loud: unknown rule names and strict-mode violations fail with a
//! [`ConfigError`] naming the offending key. After that,
//! [`RuleSet::resolve`] is a pure, deterministic fold from preset defaults
//! through editor and project overrides to a concrete [`SeverityMap`].

mod config;
mod resolve;
mod rule;
mod severity;

pub use config::{
    CheckerConfig, ConfigError, ExecutionEnvConfig, RuleOverrides, SeverityOverride, TypeEvalFlags,
};
pub use resolve::{ExecutionEnv, ResolverCache, RuleSet, SeverityMap};
pub use rule::Rule;
pub use severity::{Preset, RuleSeverity};
