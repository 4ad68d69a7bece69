use pretty_assertions::assert_eq;
use strix_ir::{HintTier, Range};

use super::*;

fn canonical(rule: Option<Rule>, range: Range) -> CanonicalDiagnostic {
    CanonicalDiagnostic {
        rule,
        range,
        message: "m".to_string(),
        category: Category::Error,
    }
}

#[test]
fn fingerprint_excludes_absolute_lines() {
    let on_line_ten = canonical(Some(Rule::PossiblyUnbound), Range::from_parts(9, 4, 9, 10));
    let on_line_fifteen = canonical(Some(Rule::PossiblyUnbound), Range::from_parts(14, 4, 14, 10));
    assert_eq!(on_line_ten.fingerprint(), on_line_fifteen.fingerprint());
}

#[test]
fn fingerprint_keeps_line_count() {
    let single = canonical(Some(Rule::UnknownMember), Range::from_parts(2, 0, 2, 4));
    let double = canonical(Some(Rule::UnknownMember), Range::from_parts(2, 0, 3, 4));
    assert_ne!(single.fingerprint(), double.fingerprint());
    assert_eq!(single.fingerprint().line_count, 1);
    assert_eq!(double.fingerprint().line_count, 2);
}

#[test]
fn fingerprint_distinguishes_rules_and_absence() {
    let ruled = canonical(Some(Rule::CallArity), Range::from_parts(0, 1, 0, 5));
    let unruled = canonical(None, Range::from_parts(0, 1, 0, 5));
    assert_ne!(ruled.fingerprint(), unruled.fingerprint());
}

#[test]
fn missing_line_count_matches_as_wildcard() {
    let fp = canonical(Some(Rule::CallArity), Range::from_parts(4, 1, 6, 5)).fingerprint();
    assert!(fp.matches(Some(Rule::CallArity), 1, 5, None));
    assert!(fp.matches(Some(Rule::CallArity), 1, 5, Some(3)));
    assert!(!fp.matches(Some(Rule::CallArity), 1, 5, Some(1)));
    assert!(!fp.matches(Some(Rule::PossiblyUnbound), 1, 5, None));
    assert!(!fp.matches(Some(Rule::CallArity), 2, 5, None));
}

#[test]
fn with_category_replaces_only_the_category() {
    let diag = canonical(Some(Rule::UnreachableCode), Range::from_parts(1, 0, 1, 8));
    let demoted = diag.clone().with_category(Category::Hint(HintTier::Unreachable));
    assert_eq!(demoted.rule, diag.rule);
    assert_eq!(demoted.range, diag.range);
    assert_eq!(demoted.category, Category::Hint(HintTier::Unreachable));
}
