#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::path::Path;

use pretty_assertions::assert_eq;
use strix_ir::HintTier;

use super::*;
use crate::config::SeverityOverride;

fn config(json: &str) -> CheckerConfig {
    serde_json::from_str(json).unwrap()
}

#[test]
fn defaults_column_matches_registry() {
    let map = SeverityMap::defaults(Preset::Standard);
    for rule in Rule::ALL {
        assert_eq!(map.get(rule), rule.default_severity(Preset::Standard));
    }
}

#[test]
fn global_overrides_apply_to_every_file() {
    let rules = RuleSet::from_config(&config(
        r#"{ "rules": { "possibly-unbound": "off" } }"#,
    ))
    .unwrap();
    let map = rules.resolve(Path::new("src/app.py"));
    assert_eq!(map.get(Rule::PossiblyUnbound), RuleSeverity::Off);
    // Untouched rules keep their preset default.
    assert_eq!(
        map.get(Rule::UndefinedVariable),
        Rule::UndefinedVariable.default_severity(Preset::Standard)
    );
}

#[test]
fn first_declared_matching_scope_wins() {
    // Both scopes' roots prefix the file; declaration order decides.
    let rules = RuleSet::from_config(&config(
        r#"{
            "executionEnvironments": [
                { "root": "src", "rules": { "possibly-unbound": "warning" } },
                { "root": "src/scripts", "rules": { "possibly-unbound": "off" } }
            ]
        }"#,
    ))
    .unwrap();
    let map = rules.resolve(Path::new("src/scripts/tool.py"));
    assert_eq!(map.get(Rule::PossiblyUnbound), RuleSeverity::Warning);
}

#[test]
fn prefix_match_is_component_wise() {
    let rules = RuleSet::from_config(&config(
        r#"{ "executionEnvironments": [ { "root": "src", "rules": { "possibly-unbound": "off" } } ] }"#,
    ))
    .unwrap();
    // "srcs/..." must not match the "src" scope.
    assert!(rules.environment_for(Path::new("srcs/app.py")).is_none());
    assert!(rules.environment_for(Path::new("src/app.py")).is_some());
}

#[test]
fn unmatched_files_fall_back_to_the_global_scope() {
    let rules = RuleSet::from_config(&config(
        r#"{
            "rules": { "unknown-member": "warning" },
            "executionEnvironments": [
                { "root": "src", "rules": { "unknown-member": "off" } }
            ]
        }"#,
    ))
    .unwrap();
    assert_eq!(
        rules.resolve(Path::new("tests/test_app.py")).get(Rule::UnknownMember),
        RuleSeverity::Warning
    );
    assert_eq!(
        rules.resolve(Path::new("src/app.py")).get(Rule::UnknownMember),
        RuleSeverity::Off
    );
}

#[test]
fn project_document_beats_editor_settings() {
    let editor: RuleOverrides = [(
        "possibly-unbound".to_string(),
        SeverityOverride::Named("off".to_string()),
    )]
    .into_iter()
    .collect();
    let rules = RuleSet::with_editor_overrides(
        &config(r#"{ "rules": { "possibly-unbound": "warning" } }"#),
        &editor,
    )
    .unwrap();
    assert_eq!(
        rules.resolve(Path::new("a.py")).get(Rule::PossiblyUnbound),
        RuleSeverity::Warning
    );
}

#[test]
fn editor_settings_apply_when_the_project_is_silent() {
    let editor: RuleOverrides = [(
        "unknown-member".to_string(),
        SeverityOverride::Named("off".to_string()),
    )]
    .into_iter()
    .collect();
    let rules = RuleSet::with_editor_overrides(&config("{}"), &editor).unwrap();
    assert_eq!(
        rules.resolve(Path::new("a.py")).get(Rule::UnknownMember),
        RuleSeverity::Off
    );
}

#[test]
fn editor_settings_are_validated_like_the_project_document() {
    let editor: RuleOverrides = [(
        "possibly-unbound".to_string(),
        SeverityOverride::Named("warning".to_string()),
    )]
    .into_iter()
    .collect();
    let err = RuleSet::with_editor_overrides(
        &config(r#"{ "typeCheckingMode": "strict" }"#),
        &editor,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::BelowPresetDefault { .. }));
}

#[test]
fn scope_flags_are_exposed() {
    let rules = RuleSet::from_config(&config(
        r#"{ "executionEnvironments": [ { "root": "src", "typeEvalFlags": ["analyzeUnannotated"] } ] }"#,
    ))
    .unwrap();
    let env = rules.environment_for(Path::new("src/app.py")).unwrap();
    assert!(env.flags.contains(TypeEvalFlags::ANALYZE_UNANNOTATED));
    assert_eq!(env.root(), Path::new("src"));
}

#[test]
fn resolution_is_deterministic() {
    let rules = RuleSet::from_config(&config(
        r#"{ "typeCheckingMode": "strict", "rules": { "deprecated-usage": "error" } }"#,
    ))
    .unwrap();
    let first = rules.resolve(Path::new("src/app.py"));
    let second = rules.resolve(Path::new("src/app.py"));
    assert_eq!(first, second);
}

#[test]
fn tier_defaults_survive_resolution() {
    let rules = RuleSet::from_config(&config("{}")).unwrap();
    let map = rules.resolve(Path::new("a.py"));
    assert_eq!(
        map.get(Rule::UnreachableCode),
        RuleSeverity::Tier(HintTier::Unreachable)
    );
    assert_eq!(
        map.get(Rule::UnusedVariable),
        RuleSeverity::Tier(HintTier::Unused)
    );
}

#[test]
fn cache_returns_memoized_maps_until_reinstalled() {
    let rules = Arc::new(RuleSet::from_config(&config("{}")).unwrap());
    let cache = ResolverCache::new(Arc::clone(&rules));
    assert_eq!(cache.generation(), 0);

    let first = cache.resolve(Path::new("src/app.py"));
    let second = cache.resolve(Path::new("src/app.py"));
    assert!(Arc::ptr_eq(&first, &second));

    cache.install(rules);
    assert_eq!(cache.generation(), 1);
    let third = cache.resolve(Path::new("src/app.py"));
    assert!(!Arc::ptr_eq(&first, &third));
    assert_eq!(*first, *third);
}

#[test]
fn install_applies_the_new_rules_to_later_resolutions() {
    let old = Arc::new(
        RuleSet::from_config(&config(r#"{ "rules": { "possibly-unbound": "off" } }"#)).unwrap(),
    );
    let cache = ResolverCache::new(old);
    let path = Path::new("src/app.py");
    assert_eq!(
        cache.resolve(path).get(Rule::PossiblyUnbound),
        RuleSeverity::Off
    );

    let new = Arc::new(RuleSet::from_config(&config("{}")).unwrap());
    cache.install(Arc::clone(&new));
    // A memoized map must never outlive the configuration it was resolved
    // under; post-install resolutions see only the new rules.
    assert_eq!(
        cache.resolve(path).get(Rule::PossiblyUnbound),
        new.resolve(path).get(Rule::PossiblyUnbound)
    );
    assert_eq!(
        cache.resolve(path).get(Rule::PossiblyUnbound),
        RuleSeverity::Error
    );
}
