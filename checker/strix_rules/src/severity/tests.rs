use pretty_assertions::assert_eq;

use super::*;

#[test]
fn parse_covers_all_seven_surface_strings() {
    assert_eq!(RuleSeverity::parse("off"), Some(RuleSeverity::Off));
    assert_eq!(RuleSeverity::parse("hint"), Some(RuleSeverity::Hint));
    assert_eq!(RuleSeverity::parse("warning"), Some(RuleSeverity::Warning));
    assert_eq!(RuleSeverity::parse("error"), Some(RuleSeverity::Error));
    assert_eq!(
        RuleSeverity::parse("unused"),
        Some(RuleSeverity::Tier(HintTier::Unused))
    );
    assert_eq!(
        RuleSeverity::parse("deprecated"),
        Some(RuleSeverity::Tier(HintTier::Deprecated))
    );
    assert_eq!(
        RuleSeverity::parse("unreachable"),
        Some(RuleSeverity::Tier(HintTier::Unreachable))
    );
    assert_eq!(RuleSeverity::parse("fatal"), None);
}

#[test]
fn information_is_an_alias_for_hint() {
    assert_eq!(RuleSeverity::parse("information"), Some(RuleSeverity::Hint));
}

#[test]
fn rank_orders_off_hint_warning_error() {
    assert!(RuleSeverity::Off.rank() < RuleSeverity::Hint.rank());
    assert!(RuleSeverity::Hint.rank() < RuleSeverity::Warning.rank());
    assert!(RuleSeverity::Warning.rank() < RuleSeverity::Error.rank());
    // Tiers are not a lowering relative to hint.
    assert_eq!(
        RuleSeverity::Tier(HintTier::Unreachable).rank(),
        RuleSeverity::Hint.rank()
    );
}

#[test]
fn category_mapping() {
    assert_eq!(RuleSeverity::Off.category(), None);
    assert_eq!(RuleSeverity::Hint.category(), Some(Category::Information));
    assert_eq!(RuleSeverity::Warning.category(), Some(Category::Warning));
    assert_eq!(RuleSeverity::Error.category(), Some(Category::Error));
    assert_eq!(
        RuleSeverity::Tier(HintTier::Unused).category(),
        Some(Category::Hint(HintTier::Unused))
    );
}

#[test]
fn strict_presets() {
    assert!(!Preset::Standard.is_strict());
    assert!(Preset::Strict.is_strict());
    assert!(Preset::All.is_strict());
}
