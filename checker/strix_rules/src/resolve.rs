//! The RuleSet resolver: (config, environments, file path) → severity map.
//!
//! Resolution is a deterministic, side-effect-free fold: preset defaults,
//! then editor-channel overrides, then the project document's global
//! overrides, then the overrides of the matching execution-environment
//! scope. It runs once per file per generation; [`ResolverCache`] memoizes
//! the result and is invalidated wholesale on configuration reload.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::config::{validate_overrides, CheckerConfig, ConfigError, RuleOverrides, TypeEvalFlags};
use crate::rule::Rule;
use crate::severity::{Preset, RuleSeverity};

/// Concrete severity for every known rule.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct SeverityMap([RuleSeverity; Rule::COUNT]);

impl SeverityMap {
    /// The preset defaults column, before any overrides.
    pub fn defaults(preset: Preset) -> Self {
        let mut map = [RuleSeverity::Off; Rule::COUNT];
        for rule in Rule::ALL {
            map[rule.index()] = rule.default_severity(preset);
        }
        SeverityMap(map)
    }

    /// Severity assigned to `rule`.
    #[inline]
    pub fn get(&self, rule: Rule) -> RuleSeverity {
        self.0[rule.index()]
    }

    /// Iterate rules in registry order with their severities.
    pub fn iter(&self) -> impl Iterator<Item = (Rule, RuleSeverity)> + '_ {
        Rule::ALL.iter().map(|rule| (*rule, self.get(*rule)))
    }

    fn apply(&mut self, overrides: &[(Rule, RuleSeverity)]) {
        for (rule, severity) in overrides {
            self.0[rule.index()] = *severity;
        }
    }
}

/// A validated execution-environment scope.
#[derive(Clone, Debug)]
pub struct ExecutionEnv {
    /// Root path prefix, project-root-relative.
    root: PathBuf,
    overrides: Vec<(Rule, RuleSeverity)>,
    /// Type-evaluation toggles handed to the engine for files in this scope.
    pub flags: TypeEvalFlags,
}

impl ExecutionEnv {
    /// Root path prefix of this scope.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether `path` falls under this scope's root, component-wise.
    pub fn applies_to(&self, path: &Path) -> bool {
        path.starts_with(&self.root)
    }
}

/// Immutable, validated rule configuration for one project.
///
/// Built once per configuration load; reloaded wholesale on change.
#[derive(Clone, Debug)]
pub struct RuleSet {
    preset: Preset,
    editor: Vec<(Rule, RuleSeverity)>,
    global: Vec<(Rule, RuleSeverity)>,
    envs: Vec<ExecutionEnv>,
}

impl RuleSet {
    /// Validate a configuration document with no editor-channel overrides.
    pub fn from_config(config: &CheckerConfig) -> Result<Self, ConfigError> {
        Self::with_editor_overrides(config, &RuleOverrides::new())
    }

    /// Validate a configuration document together with an editor-settings
    /// override layer.
    ///
    /// The editor layer uses the same surface and the same validation as the
    /// project document, but applies *below* it: when both configure a rule,
    /// the project document wins.
    pub fn with_editor_overrides(
        config: &CheckerConfig,
        editor: &RuleOverrides,
    ) -> Result<Self, ConfigError> {
        let preset = config.type_checking_mode;
        let editor = validate_overrides(editor, preset)?;
        let global = validate_overrides(&config.rules, preset)?;
        let envs = config
            .execution_environments
            .iter()
            .map(|env| {
                Ok(ExecutionEnv {
                    root: PathBuf::from(&env.root),
                    overrides: validate_overrides(&env.rules, preset)?,
                    flags: TypeEvalFlags::from_names(
                        env.type_eval_flags.iter().map(String::as_str),
                    )?,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;
        Ok(RuleSet {
            preset,
            editor,
            global,
            envs,
        })
    }

    /// The active preset.
    pub fn preset(&self) -> Preset {
        self.preset
    }

    /// The execution-environment scope applying to `path`, if any.
    ///
    /// Plain ordered-list scan: the first scope in declaration order whose
    /// root is a component prefix of `path` wins; unmatched files use the
    /// global scope only.
    pub fn environment_for(&self, path: &Path) -> Option<&ExecutionEnv> {
        self.envs.iter().find(|env| env.applies_to(path))
    }

    /// Resolve the concrete severity map for `path`.
    pub fn resolve(&self, path: &Path) -> SeverityMap {
        let mut map = SeverityMap::defaults(self.preset);
        map.apply(&self.editor);
        map.apply(&self.global);
        if let Some(env) = self.environment_for(path) {
            map.apply(&env.overrides);
        }
        map
    }
}

/// Generation-stamped memo of path → severity map, owning the active rules.
///
/// The rule set and the memo live under one lock and swap together, so a
/// reader can never pair a freshly-installed configuration with maps
/// resolved under the previous one. Invalidation is wholesale (not
/// incremental) on any configuration change: reloads are rare relative to
/// file edits, so precision is traded for simplicity.
#[derive(Debug)]
pub struct ResolverCache {
    inner: Mutex<CacheInner>,
}

#[derive(Debug)]
struct CacheInner {
    rules: Arc<RuleSet>,
    generation: u64,
    map: FxHashMap<PathBuf, Arc<SeverityMap>>,
}

impl ResolverCache {
    /// Create a cache at generation zero over the initial rule set.
    pub fn new(rules: Arc<RuleSet>) -> Self {
        ResolverCache {
            inner: Mutex::new(CacheInner {
                rules,
                generation: 0,
                map: FxHashMap::default(),
            }),
        }
    }

    /// The active rule set.
    pub fn rules(&self) -> Arc<RuleSet> {
        Arc::clone(&self.inner.lock().rules)
    }

    /// Swap in a new rule set, dropping every memoized entry and advancing
    /// the generation stamp in the same critical section.
    pub fn install(&self, rules: Arc<RuleSet>) {
        let mut inner = self.inner.lock();
        inner.rules = rules;
        inner.generation += 1;
        inner.map.clear();
    }

    /// Resolve through the cache under the active rule set.
    pub fn resolve(&self, path: &Path) -> Arc<SeverityMap> {
        let mut inner = self.inner.lock();
        if let Some(map) = inner.map.get(path) {
            return Arc::clone(map);
        }
        let map = Arc::new(inner.rules.resolve(path));
        inner.map.insert(path.to_path_buf(), Arc::clone(&map));
        map
    }

    /// Current generation stamp.
    pub fn generation(&self) -> u64 {
        self.inner.lock().generation
    }
}

#[cfg(test)]
mod tests;
